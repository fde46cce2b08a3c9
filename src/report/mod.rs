//! Reporting utilities: KPI cards, drill-downs, and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the metrics code stays clean and testable
//! - output changes are localized

use crate::domain::{Axis, MarketData, ReportConfig, SegmentData, YearlyData};
use crate::metrics::{cagr, value_at, yoy_growth};

pub mod format;

pub use format::*;

/// Headline numbers of the overview tab.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub selected_year: i32,
    pub market_size: f64,
    pub base_year: i32,
    pub forecast_year: i32,
    pub forecast_value: f64,
    /// CAGR from `base_year` to `forecast_year`, percent.
    pub cagr: f64,
}

impl Kpis {
    pub fn compute(data: &MarketData, config: &ReportConfig) -> Self {
        let base = value_at(&data.total_market, config.base_year);
        let forecast_value = value_at(&data.total_market, config.forecast_year);
        Self {
            selected_year: config.selected_year,
            market_size: value_at(&data.total_market, config.selected_year),
            base_year: config.base_year,
            forecast_year: config.forecast_year,
            forecast_value,
            cagr: cagr(base, forecast_value, f64::from(config.cagr_period())),
        }
    }
}

/// Detail view of one segment (or one cross-tab cell).
#[derive(Debug, Clone, PartialEq)]
pub struct DrillDown {
    pub name: String,
    pub series: Vec<YearlyData>,
    pub base_year: i32,
    pub base_value: f64,
    pub forecast_year: i32,
    pub forecast_value: f64,
    pub cagr: f64,
    pub yoy: Vec<Option<f64>>,
}

impl DrillDown {
    pub fn compute(name: impl Into<String>, series: &[YearlyData], config: &ReportConfig) -> Self {
        let base_value = value_at(series, config.drill_base_year);
        let forecast_value = value_at(series, config.forecast_year);
        Self {
            name: name.into(),
            series: series.to_vec(),
            base_year: config.drill_base_year,
            base_value,
            forecast_year: config.forecast_year,
            forecast_value,
            cagr: cagr(base_value, forecast_value, f64::from(config.drill_period())),
            yoy: yoy_growth(series),
        }
    }
}

/// Axis shown alongside a drill-down opened from the overview distribution.
pub fn related_axis(axis: Axis) -> Axis {
    match axis {
        Axis::EndUser => Axis::Region,
        Axis::Aircraft => Axis::Application,
        Axis::Region => Axis::EndUser,
        Axis::Application => Axis::Aircraft,
        Axis::Equipment => Axis::EndUser,
        Axis::Process | Axis::Material => Axis::Region,
    }
}

/// Find a segment by exact name, falling back to a case-insensitive match.
pub fn find_segment<'a>(segments: &'a [SegmentData], name: &str) -> Option<&'a SegmentData> {
    segments
        .iter()
        .find(|s| s.name == name)
        .or_else(|| segments.iter().find(|s| s.name.eq_ignore_ascii_case(name.trim())))
}
