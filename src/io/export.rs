//! Export dashboard tables to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts, so values stay in raw US$ millions regardless of the display scale.

use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};

use log::info;

use crate::data::catalog::Dashboard;
use crate::domain::{Axis, CrossTab, MarketData, Orientation, ReportConfig, SegmentData};
use crate::error::{AppError, EXIT_USAGE};
use crate::metrics::{PivotBar, comparison_rows, cross_tab, trend_rows};

/// Write a trend table: one row per year, one column per segment, plus total and YoY.
pub fn write_trend_csv(path: &Path, data: &MarketData, segments: &[SegmentData]) -> Result<(), AppError> {
    let mut writer = create_writer(path)?;

    let mut header: Vec<String> = vec!["year".to_string()];
    header.extend(segments.iter().map(|s| s.name.clone()));
    header.push("total".to_string());
    header.push("yoy_pct".to_string());
    writer.write_record(&header).map_err(|e| write_error(path, e))?;

    for row in trend_rows(&data.total_market, segments) {
        let mut record = vec![row.year.to_string()];
        record.extend(row.values.iter().map(|v| format!("{v:.4}")));
        record.push(format!("{:.4}", row.total));
        record.push(row.yoy.map(|v| format!("{v:.4}")).unwrap_or_default());
        writer.write_record(&record).map_err(|e| write_error(path, e))?;
    }

    writer.flush().map_err(|e| write_error(path, e))
}

/// Write a growth-analysis table.
pub fn write_comparison_csv(
    path: &Path,
    segments: &[SegmentData],
    start_year: i32,
    end_year: i32,
) -> Result<(), AppError> {
    let mut writer = create_writer(path)?;
    writer
        .write_record(["segment", "start_year", "start_value", "end_year", "end_value", "cagr_pct", "growth_pct"])
        .map_err(|e| write_error(path, e))?;

    for row in comparison_rows(segments, start_year, end_year) {
        writer
            .write_record([
                row.name,
                start_year.to_string(),
                format!("{:.4}", row.start_value),
                end_year.to_string(),
                format!("{:.4}", row.end_value),
                format!("{:.4}", row.cagr),
                format!("{:.4}", row.growth),
            ])
            .map_err(|e| write_error(path, e))?;
    }

    writer.flush().map_err(|e| write_error(path, e))
}

/// Write a pivoted cross-tab in long form (one row per bar/stack pair).
pub fn write_cross_tab_csv(path: &Path, bars: &[PivotBar], year: i32) -> Result<(), AppError> {
    let mut writer = create_writer(path)?;
    writer
        .write_record(["bar", "stack", "year", "value", "share_of_bar_pct", "bar_total"])
        .map_err(|e| write_error(path, e))?;

    for bar in bars {
        for cell in &bar.cells {
            writer
                .write_record([
                    bar.name.clone(),
                    cell.name.clone(),
                    year.to_string(),
                    format!("{:.4}", cell.value),
                    format!("{:.4}", cell.share_of(bar.total)),
                    format!("{:.4}", bar.total),
                ])
                .map_err(|e| write_error(path, e))?;
        }
    }

    writer.flush().map_err(|e| write_error(path, e))
}

/// Export everything shown on one axis tab into `dir`; returns the files written.
///
/// Absent optional axes and cross-tabs are skipped.
pub fn export_axis(
    dir: &Path,
    dashboard: &Dashboard,
    data: &MarketData,
    axis: Axis,
    config: &ReportConfig,
) -> Result<Vec<PathBuf>, AppError> {
    let Some(segments) = data.axis(axis) else {
        return Err(AppError::new(
            EXIT_USAGE,
            format!("{} is not available for {}.", dashboard.label(axis), dashboard.title),
        ));
    };

    create_dir_all(dir)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create export dir '{}': {e}", dir.display())))?;

    let stem = format!("{}_{}", dashboard.id, slug(dashboard.label(axis)));
    let mut written = Vec::new();

    let trend = dir.join(format!("{stem}_trend.csv"));
    write_trend_csv(&trend, data, segments)?;
    written.push(trend);

    let growth = dir.join(format!("{stem}_growth_{}_{}.csv", config.base_year, config.forecast_year));
    write_comparison_csv(&growth, segments, config.base_year, config.forecast_year)?;
    written.push(growth);

    for table in CrossTab::for_axis(axis) {
        let bars = cross_tab(data, table, Orientation::Stored, config.selected_year);
        if bars.is_empty() {
            continue;
        }
        let path = dir.join(format!("{}_{}_{}.csv", dashboard.id, slug(table.wire_key()), config.selected_year));
        write_cross_tab_csv(&path, &bars, config.selected_year)?;
        written.push(path);
    }

    info!("exported {} file(s) to {}", written.len(), dir.display());
    Ok(written)
}

fn create_writer(path: &Path) -> Result<csv::Writer<File>, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    Ok(csv::Writer::from_writer(file))
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> AppError {
    AppError::new(EXIT_USAGE, format!("Failed to write export CSV '{}': {e}", path.display()))
}

/// `Aircraft Type` -> `aircraft-type`, `endUserByRegion` -> `end-user-by-region`.
fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len() + 4);
    for ch in label.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}
