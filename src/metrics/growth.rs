//! Growth rates: CAGR, year-over-year, and total growth.
//!
//! All rates are returned as percentages. Degenerate baselines saturate to `0`
//! (or to `None` for YoY) instead of producing `NaN`/`inf`.

use crate::domain::YearlyData;

/// Compound annual growth rate in percent.
///
/// ```text
/// ((end / start)^(1 / period_years) - 1) * 100
/// ```
///
/// Returns `0.0` when `start <= 0` or `period_years <= 0`.
pub fn cagr(start: f64, end: f64, period_years: f64) -> f64 {
    if start <= 0.0 || period_years <= 0.0 {
        return 0.0;
    }
    ((end / start).powf(1.0 / period_years) - 1.0) * 100.0
}

/// CAGR between two years of a series (values looked up by year).
pub fn series_cagr(series: &[YearlyData], start_year: i32, end_year: i32) -> f64 {
    let start = crate::metrics::value_at(series, start_year);
    let end = crate::metrics::value_at(series, end_year);
    cagr(start, end, f64::from(end_year - start_year))
}

/// Year-over-year growth in percent for a series sorted by year.
///
/// The first point has no prior-year baseline and is `None`; so is any point
/// whose previous value is zero.
pub fn yoy_growth(series: &[YearlyData]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(series.len());
    for (i, point) in series.iter().enumerate() {
        if i == 0 {
            out.push(None);
            continue;
        }
        let prev = series[i - 1].value;
        if prev == 0.0 {
            out.push(None);
        } else {
            out.push(Some((point.value - prev) / prev * 100.0));
        }
    }
    out
}

/// Simple growth `(end - start) / start` in percent; `0.0` when `start <= 0`.
pub fn total_growth(start: f64, end: f64) -> f64 {
    if start <= 0.0 {
        return 0.0;
    }
    (end - start) / start * 100.0
}
