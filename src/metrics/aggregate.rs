//! Year lookups, totals, shares, and the table shapes built from them.
//!
//! Lookups go by year value, not by position: derived series share the year
//! set of the master axis but not necessarily its indices. A missing year
//! contributes `0`.

use crate::domain::{SegmentData, YearlyData};
use crate::metrics::growth::{cagr, total_growth, yoy_growth};

/// One member of a distribution (pie/donut) at a given year.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentShare {
    pub name: String,
    pub value: f64,
    /// Percent of the distribution total.
    pub share: f64,
}

/// One row of a trend table: a master-axis year with per-segment values.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    pub year: i32,
    /// Values aligned to the segment list the rows were built from.
    pub values: Vec<f64>,
    /// Total market value for the year.
    pub total: f64,
    pub yoy: Option<f64>,
}

/// One row of a growth-analysis table.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub name: String,
    pub start_value: f64,
    pub end_value: f64,
    pub cagr: f64,
    pub growth: f64,
}

/// Value at `year`, or `0.0` when the series has no such year.
pub fn value_at(series: &[YearlyData], year: i32) -> f64 {
    series
        .iter()
        .find(|d| d.year == year)
        .map(|d| d.value)
        .unwrap_or(0.0)
}

/// Sum of every segment's value at `year`.
pub fn segment_total(segments: &[SegmentData], year: i32) -> f64 {
    segments.iter().map(|s| value_at(&s.data, year)).sum()
}

/// Percent of total for each value; all zero when the total is not positive.
pub fn shares(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / total * 100.0).collect()
}

/// Distribution of an axis at `year`, in segment order.
pub fn segment_shares(segments: &[SegmentData], year: i32) -> Vec<SegmentShare> {
    let values: Vec<f64> = segments.iter().map(|s| value_at(&s.data, year)).collect();
    let pct = shares(&values);
    segments
        .iter()
        .zip(values)
        .zip(pct)
        .map(|((s, value), share)| SegmentShare {
            name: s.name.clone(),
            value,
            share,
        })
        .collect()
}

/// Trend table rows: one per year of `total`, with each segment looked up by year.
pub fn trend_rows(total: &[YearlyData], segments: &[SegmentData]) -> Vec<TrendRow> {
    let yoy = yoy_growth(total);
    total
        .iter()
        .zip(yoy)
        .map(|(point, yoy)| TrendRow {
            year: point.year,
            values: segments.iter().map(|s| value_at(&s.data, point.year)).collect(),
            total: point.value,
            yoy,
        })
        .collect()
}

/// Growth analysis per segment between two years.
pub fn comparison_rows(segments: &[SegmentData], start_year: i32, end_year: i32) -> Vec<ComparisonRow> {
    let period = f64::from(end_year - start_year);
    segments
        .iter()
        .map(|s| {
            let start_value = value_at(&s.data, start_year);
            let end_value = value_at(&s.data, end_year);
            ComparisonRow {
                name: s.name.clone(),
                start_value,
                end_value,
                cagr: cagr(start_value, end_value, period),
                growth: total_growth(start_value, end_value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(name: &str, points: &[(i32, f64)]) -> SegmentData {
        SegmentData {
            name: name.to_string(),
            data: points
                .iter()
                .map(|&(year, value)| YearlyData { year, value })
                .collect(),
        }
    }

    #[test]
    fn value_at_missing_year_is_zero() {
        let s = seg("A", &[(2024, 5.0), (2025, 6.0)]);
        assert_eq!(value_at(&s.data, 2025), 6.0);
        assert_eq!(value_at(&s.data, 2030), 0.0);
    }

    #[test]
    fn segment_total_uses_year_not_index() {
        // Same year set, different positions.
        let a = seg("A", &[(2024, 1.0), (2025, 2.0)]);
        let b = seg("B", &[(2025, 20.0), (2024, 10.0)]);
        let c = seg("C", &[(2024, 100.0)]);
        assert_eq!(segment_total(&[a, b, c], 2025), 22.0);
    }

    #[test]
    fn shares_sum_to_hundred() {
        let out = shares(&[30.0, 70.0]);
        assert!((out[0] - 30.0).abs() < 1e-12);
        assert!((out[1] - 70.0).abs() < 1e-12);
        assert!((out.iter().sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn shares_all_zero_input() {
        let out = shares(&[0.0, 0.0, 0.0]);
        assert_eq!(out, vec![0.0, 0.0, 0.0]);
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn segment_shares_keep_order() {
        let segments = vec![seg("OE", &[(2025, 60.0)]), seg("Aftermarket", &[(2025, 40.0)])];
        let out = segment_shares(&segments, 2025);
        assert_eq!(out[0].name, "OE");
        assert!((out[0].share - 60.0).abs() < 1e-12);
        assert_eq!(out[1].value, 40.0);
    }

    #[test]
    fn trend_rows_follow_total_years() {
        let total = vec![
            YearlyData { year: 2024, value: 100.0 },
            YearlyData { year: 2025, value: 120.0 },
        ];
        let segments = vec![seg("A", &[(2025, 70.0)]), seg("B", &[(2024, 40.0), (2025, 50.0)])];
        let rows = trend_rows(&total, &segments);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].values, vec![0.0, 40.0]);
        assert_eq!(rows[1].values, vec![70.0, 50.0]);
        assert_eq!(rows[0].yoy, None);
        assert!((rows[1].yoy.unwrap() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn comparison_rows_guard_zero_baseline() {
        let segments = vec![
            seg("Grows", &[(2024, 100.0), (2034, 200.0)]),
            seg("New", &[(2024, 0.0), (2034, 50.0)]),
        ];
        let rows = comparison_rows(&segments, 2024, 2034);
        assert!((rows[0].growth - 100.0).abs() < 1e-12);
        assert!((rows[0].cagr - 7.177346253629313).abs() < 1e-9);
        assert_eq!(rows[1].cagr, 0.0);
        assert_eq!(rows[1].growth, 0.0);
    }
}
