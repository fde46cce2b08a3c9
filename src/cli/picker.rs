//! Interactive dashboard picker.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `mdash overview` and choose a dashboard" UX

use std::io::{self, Write};

use crate::data::catalog::{Dashboard, accessible_dashboards, open_dashboard};
use crate::error::{AppError, EXIT_USAGE};

/// Outcome of one line of picker input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Choice {
    Picked(&'static Dashboard),
    Quit,
    Invalid,
}

/// Prompt the user to select one of the accessible dashboards.
///
/// Behavior:
/// - list the dashboards of purchased datasets
/// - accept either a number (from the list) or a dashboard id
/// - `q` cancels
pub fn prompt_for_dashboard() -> Result<&'static Dashboard, AppError> {
    let dashboards = accessible_dashboards();
    if dashboards.is_empty() {
        return Err(AppError::new(EXIT_USAGE, "No dashboards are available."));
    }

    println!("Available dashboards:");
    for (idx, db) in dashboards.iter().enumerate() {
        println!("{:>3}) {:<20} {}", idx + 1, db.id, db.title);
    }

    loop {
        print!("Select a dashboard by number (1-{}) or id (q to quit): ", dashboards.len());
        io::stdout()
            .flush()
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = io::stdin()
            .read_line(&mut input)
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::new(
                EXIT_USAGE,
                "No input received. Pass a dashboard with `-d <id>`.",
            ));
        }

        match resolve_choice(&input, &dashboards) {
            Choice::Picked(db) => return Ok(db),
            Choice::Quit => return Err(AppError::new(EXIT_USAGE, "Canceled.")),
            Choice::Invalid => {
                println!("Invalid choice: {}. Enter a number between 1 and {}.", input.trim(), dashboards.len());
            }
        }
    }
}

/// Interpret one line of input against the listed dashboards.
pub fn resolve_choice(input: &str, dashboards: &[&'static Dashboard]) -> Choice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }

    if let Ok(choice) = input.parse::<usize>() {
        return match dashboards.get(choice.wrapping_sub(1)) {
            Some(db) => Choice::Picked(*db),
            None => Choice::Invalid,
        };
    }

    match open_dashboard(input) {
        Ok(db) => Choice::Picked(db),
        Err(_) => Choice::Invalid,
    }
}
