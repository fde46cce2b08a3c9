use std::fs;

use market_dash::app::pipeline::run_load;
use market_dash::domain::{Axis, CrossTab, Orientation, ReportConfig};
use market_dash::error::{EXIT_ACCESS, EXIT_LOAD};
use market_dash::metrics::{cross_tab, segment_shares};
use market_dash::report::{Kpis, format_overview, format_segment_detail};

const DOCUMENT: &str = r#"{
    "years": [2024, 2025, 2034],
    "totalMarket": [1000, 1100, 2000],
    "endUser": {"OE": [600, 660, 1200], "Aftermarket": [400, 440, 800]},
    "aircraftType": {"Narrow Body": [700, 770, 1400], "Wide Body": [300, 330, 600]},
    "region": {"North America": [550, 605, 1100], "Europe": [450, 495, 900]},
    "application": {},
    "furnishedEquipment": {"Seats": [1000, 1100, 2000]},
    "countryDataByRegion": {
        "North America": {"United States": [500, 550, 1000], "Canada": [50, 55, 100]},
        "Europe": {"Germany": [450, 495, 900]}
    },
    "aircraftTypeByRegion": {
        "Narrow Body": {"North America": [400, 440, 800], "Europe": [300, 330, 600]},
        "Wide Body": {"North America": [150, 165, 300], "Europe": [150, 165, 300]}
    }
}"#;

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("marketData.json"), DOCUMENT).unwrap();
    dir
}

#[test]
fn overview_kpis_from_local_document() {
    let dir = data_dir();
    let run = run_load("aircraft-interiors", dir.path().to_str(), ReportConfig::default()).unwrap();

    let kpis = Kpis::compute(&run.data, &run.config);
    assert_eq!(kpis.market_size, 1100.0);
    assert_eq!(kpis.forecast_value, 2000.0);
    let expected = (2f64.powf(0.1) - 1.0) * 100.0;
    assert!((kpis.cagr - expected).abs() < 1e-9);

    let text = format_overview(run.dashboard, &run.data, &run.config);
    assert!(text.contains("Global Aircraft Interiors Market"));
    assert!(text.contains("$1.10B"));
    assert!(text.contains("Narrow Body"));
}

#[test]
fn shares_and_cross_tabs_agree_with_document() {
    let dir = data_dir();
    let run = run_load("aircraft-interiors", dir.path().to_str(), ReportConfig::default()).unwrap();

    let shares = segment_shares(&run.data.end_user, 2025);
    assert!((shares[0].share - 60.0).abs() < 1e-9);
    assert!((shares.iter().map(|s| s.share).sum::<f64>() - 100.0).abs() < 1e-9);

    let bars = cross_tab(&run.data, CrossTab::AircraftByRegion, Orientation::Stored, 2025);
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].name, "Narrow Body");
    assert_eq!(bars[0].total, 770.0);

    let regions = cross_tab(&run.data, CrossTab::AircraftByRegion, Orientation::Transposed, 2025);
    assert_eq!(regions[0].name, "North America");
    assert_eq!(regions[0].total, 605.0);

    let countries = cross_tab(&run.data, CrossTab::CountryByRegion, Orientation::Stored, 2034);
    assert_eq!(countries[0].cells.len(), 2);
    assert_eq!(countries[1].cells.len(), 1);
    assert_eq!(countries[0].total, 1100.0);

    // Present but empty axes get no tab.
    assert!(!run.data.available_axes().contains(&Axis::Application));
    let detail = format_segment_detail(run.dashboard, &run.data, Axis::Region, &run.config);
    assert!(detail.contains("United States"));
}

#[test]
fn load_and_access_failures_map_to_exit_codes() {
    let empty = tempfile::tempdir().unwrap();
    let err = run_load("aircraft-interiors", empty.path().to_str(), ReportConfig::default()).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_LOAD);
    assert!(err.to_string().starts_with("Failed to load market data"));

    let err = run_load("gf-market", empty.path().to_str(), ReportConfig::default()).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_ACCESS);
}
