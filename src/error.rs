/// Exit code for usage, configuration, and local I/O problems.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for dashboards whose dataset has not been purchased.
pub const EXIT_ACCESS: u8 = 3;
/// Exit code for a failed market-data load (network, HTTP status, or parse).
pub const EXIT_LOAD: u8 = 4;

/// User-visible prefix shared by every load failure.
///
/// Network errors, non-2xx responses, and malformed JSON all collapse into
/// this one message; the detail is appended for the terminal but the
/// dashboard only distinguishes "loaded" from "failed to load".
pub const LOAD_FAILED: &str = "Failed to load market data";

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// A data load failure with the shared user-facing prefix.
    pub fn load(detail: impl std::fmt::Display) -> Self {
        Self::new(EXIT_LOAD, format!("{LOAD_FAILED}: {detail}"))
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_load_failure(&self) -> bool {
        self.exit_code == EXIT_LOAD
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_errors_share_prefix_and_exit_code() {
        let err = AppError::load("status 404 Not Found");
        assert_eq!(err.exit_code(), EXIT_LOAD);
        assert!(err.is_load_failure());
        assert!(err.to_string().starts_with(LOAD_FAILED));
    }
}
