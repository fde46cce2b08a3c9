//! Shared "load pipeline" used by both CLI and TUI front-ends.
//!
//! dashboard lookup -> access check -> client -> fetch -> expand
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use log::warn;

use crate::data::MarketDataClient;
use crate::data::catalog::{Dashboard, open_dashboard};
use crate::domain::{MarketData, ReportConfig};
use crate::error::AppError;

/// A loaded dashboard together with the settings used to render it.
#[derive(Debug, Clone)]
pub struct DashboardRun {
    pub dashboard: &'static Dashboard,
    pub data: MarketData,
    pub config: ReportConfig,
}

/// Resolve `dashboard_id`, build a client from `source` / the environment, and load.
pub fn run_load(
    dashboard_id: &str,
    source: Option<&str>,
    config: ReportConfig,
) -> Result<DashboardRun, AppError> {
    let dashboard = open_dashboard(dashboard_id)?;
    let client = MarketDataClient::from_env(source)?;
    load_with_client(&client, dashboard, config)
}

/// Load with an existing client.
///
/// This is useful for the TUI, where the client is shared with the fetch thread.
pub fn load_with_client(
    client: &MarketDataClient,
    dashboard: &'static Dashboard,
    config: ReportConfig,
) -> Result<DashboardRun, AppError> {
    let data = client.load_dashboard(dashboard)?;
    check_years(&data, &config);
    Ok(DashboardRun { dashboard, data, config })
}

fn check_years(data: &MarketData, config: &ReportConfig) {
    for (what, year) in [
        ("selected year", config.selected_year),
        ("base year", config.base_year),
        ("forecast year", config.forecast_year),
    ] {
        if !data.years.contains(&year) {
            warn!("{what} {year} is outside the document's year axis; values read as 0");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSource;
    use crate::error::{EXIT_ACCESS, EXIT_LOAD};

    #[test]
    fn loads_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("aircraft-soft-goods-market.json"),
            r#"{"years": [2024, 2025], "totalMarket": [10, 11], "region": {"Europe": [10, 11]}}"#,
        )
        .unwrap();

        let run = run_load("soft-goods", dir.path().to_str(), ReportConfig::default()).unwrap();
        assert_eq!(run.dashboard.id, "soft-goods");
        assert_eq!(run.data.total_market.len(), 2);
        assert_eq!(run.data.region[0].name, "Europe");
    }

    #[test]
    fn missing_document_is_a_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let client = MarketDataClient::new(DataSource::Dir(dir.path().to_path_buf()));
        let dashboard = open_dashboard("galley-market").unwrap();
        let err = load_with_client(&client, dashboard, ReportConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_LOAD);
        assert!(err.is_load_failure());
    }

    #[test]
    fn locked_dataset_is_refused_before_loading() {
        let err = run_load("cf-global", Some("/nonexistent"), ReportConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_ACCESS);
    }
}
