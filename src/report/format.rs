//! Formatted terminal output for dashboards.
//!
//! Every function returns a `String` so callers decide where it goes
//! (stdout, a TUI paragraph, a test assertion).

use crate::data::catalog::{CATEGORIES, Dashboard};
use crate::domain::{Axis, CrossTab, MarketData, Orientation, ReportConfig, SegmentData, UnitScale};
use crate::metrics::{PivotBar, comparison_rows, flatten_nested, segment_shares, segment_total, trend_rows};
use crate::report::{DrillDown, Kpis};

const NAME_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 12;

/// Overview tab: KPIs, total market with YoY, and every available distribution.
pub fn format_overview(dashboard: &Dashboard, data: &MarketData, config: &ReportConfig) -> String {
    let mut out = String::new();
    let unit = config.unit;
    let kpis = Kpis::compute(data, config);

    out.push_str(&format!("=== {} ===\n", dashboard.title));
    if let (Some(first), Some(last)) = (data.first_year(), data.last_year()) {
        out.push_str(&format!("Years: {first}-{last} | Values: {}\n", unit.label()));
    }
    out.push('\n');
    out.push_str(&format_kpis(&kpis, unit));
    out.push('\n');

    out.push_str("Market size & YoY growth:\n");
    out.push_str(&format_market_series(data, unit));
    out.push('\n');

    out.push_str(&format!("{} market distribution:\n", config.selected_year));
    for axis in data.available_axes() {
        if let Some(segments) = data.axis(axis) {
            out.push_str(&format!("\n{}:\n", dashboard.label(axis)));
            out.push_str(&format_distribution(segments, config.selected_year, unit));
        }
    }

    out
}

pub fn format_kpis(kpis: &Kpis, unit: UnitScale) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} Market Size: {}\n", kpis.selected_year, unit.format(kpis.market_size)));
    out.push_str(&format!(
        "CAGR {}-{}: {}\n",
        kpis.base_year,
        kpis.forecast_year,
        fmt_pct(Some(kpis.cagr))
    ));
    out.push_str(&format!("{} Forecast: {}\n", kpis.forecast_year, unit.format(kpis.forecast_value)));
    out
}

/// Year / value / YoY table of the total market.
pub fn format_market_series(data: &MarketData, unit: UnitScale) -> String {
    let mut out = String::new();
    push_line(&mut out, format!("{:<6} {:>VALUE_WIDTH$} {:>10}", "year", "value", "yoy"));
    push_line(&mut out, format!("{:-<6} {:-<VALUE_WIDTH$} {:-<10}", "", "", ""));
    for row in trend_rows(&data.total_market, &[]) {
        push_line(
            &mut out,
            format!(
                "{:<6} {:>VALUE_WIDTH$} {:>10}",
                row.year,
                unit.format(row.total),
                fmt_pct(row.yoy)
            ),
        );
    }
    out
}

/// Segment / value / share table at `year`.
pub fn format_distribution(segments: &[SegmentData], year: i32, unit: UnitScale) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!("{:<NAME_WIDTH$} {:>VALUE_WIDTH$} {:>8}", "segment", format!("value {year}"), "share"),
    );
    push_line(&mut out, format!("{:-<NAME_WIDTH$} {:-<VALUE_WIDTH$} {:-<8}", "", "", ""));
    for s in segment_shares(segments, year) {
        push_line(
            &mut out,
            format!(
                "{:<NAME_WIDTH$} {:>VALUE_WIDTH$} {:>8}",
                truncate(&s.name, NAME_WIDTH),
                unit.format(s.value),
                format!("{:.1}%", s.share)
            ),
        );
    }
    out
}

/// Detail tab of one axis: trend, distribution, growth analysis, and cross-tabs.
pub fn format_segment_detail(dashboard: &Dashboard, data: &MarketData, axis: Axis, config: &ReportConfig) -> String {
    let mut out = String::new();
    let unit = config.unit;
    let label = dashboard.label(axis);

    let Some(segments) = data.axis(axis) else {
        out.push_str(&format!("{label}: not available for {}.\n", dashboard.title));
        return out;
    };

    out.push_str(&format!("=== {} - {label} ===\n", dashboard.title));
    let total = segment_total(segments, config.selected_year);
    out.push_str(&format!("{} {label} total: {}\n", config.selected_year, unit.format(total)));
    let base = segment_total(segments, config.base_year);
    let forecast = segment_total(segments, config.forecast_year);
    out.push_str(&format!(
        "CAGR {}-{}: {}\n\n",
        config.base_year,
        config.forecast_year,
        fmt_pct(Some(crate::metrics::cagr(base, forecast, f64::from(config.cagr_period()))))
    ));

    out.push_str(&format!("{label} - Market Trend ({}):\n", unit.label()));
    out.push_str(&format_trend(data, segments, unit));
    out.push('\n');

    if axis == Axis::Region && !data.country_data_by_region.is_empty() {
        let countries = flatten_nested(&data.country_data_by_region);
        out.push_str("Countries - Market Trend:\n");
        out.push_str(&format_trend(data, &countries, unit));
        out.push('\n');
    }

    out.push_str(&format!("{label} - {} distribution:\n", config.selected_year));
    out.push_str(&format_distribution(segments, config.selected_year, unit));
    out.push('\n');

    out.push_str(&format!("{label} - Growth Analysis:\n"));
    out.push_str(&format_comparison(segments, config.base_year, config.forecast_year, unit));

    for table in CrossTab::for_axis(axis) {
        let bars = crate::metrics::cross_tab(data, table, Orientation::Stored, config.selected_year);
        if bars.is_empty() {
            continue;
        }
        out.push('\n');
        out.push_str(&format_cross_tab(dashboard, table, Orientation::Stored, &bars, config));
    }

    out
}

/// Year rows x segment columns, plus the total market column.
pub fn format_trend(data: &MarketData, segments: &[SegmentData], unit: UnitScale) -> String {
    let mut out = String::new();
    let mut header = format!("{:<6}", "year");
    for s in segments {
        header.push_str(&format!(" {:>VALUE_WIDTH$}", truncate(&s.name, VALUE_WIDTH)));
    }
    header.push_str(&format!(" {:>VALUE_WIDTH$}", "total"));
    push_line(&mut out, header);

    for row in trend_rows(&data.total_market, segments) {
        let mut line = format!("{:<6}", row.year);
        for v in &row.values {
            line.push_str(&format!(" {:>VALUE_WIDTH$}", unit.format(*v)));
        }
        line.push_str(&format!(" {:>VALUE_WIDTH$}", unit.format(row.total)));
        push_line(&mut out, line);
    }
    out
}

/// Growth-analysis table: start value, end value, CAGR, growth.
pub fn format_comparison(segments: &[SegmentData], start_year: i32, end_year: i32, unit: UnitScale) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!(
            "{:<NAME_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>8} {:>9}",
            "segment",
            start_year.to_string(),
            end_year.to_string(),
            "cagr",
            "growth"
        ),
    );
    push_line(
        &mut out,
        format!("{:-<NAME_WIDTH$} {:-<VALUE_WIDTH$} {:-<VALUE_WIDTH$} {:-<8} {:-<9}", "", "", "", "", ""),
    );
    for row in comparison_rows(segments, start_year, end_year) {
        push_line(
            &mut out,
            format!(
                "{:<NAME_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>8} {:>9}",
                truncate(&row.name, NAME_WIDTH),
                unit.format(row.start_value),
                unit.format(row.end_value),
                fmt_pct(Some(row.cagr)),
                fmt_pct(Some(row.growth))
            ),
        );
    }
    out
}

/// Stacked-bar table: one row per bar, one column per stack, plus the bar total.
pub fn format_cross_tab(
    dashboard: &Dashboard,
    table: CrossTab,
    orientation: Orientation,
    bars: &[PivotBar],
    config: &ReportConfig,
) -> String {
    let mut out = String::new();
    let unit = config.unit;
    let outer_label = dashboard.label(table.outer_axis());
    let inner_label = match table.inner_axis() {
        Some(axis) => dashboard.label(axis),
        None => table.inner_label(),
    };
    let (bar_label, stack_label) = match orientation {
        Orientation::Stored => (outer_label, inner_label),
        Orientation::Transposed => (inner_label, outer_label),
    };

    out.push_str(&format!("{bar_label} by {stack_label} ({}):\n", config.selected_year));
    if bars.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let same_stacks = bars.iter().all(|bar| {
        bar.cells.len() == bars[0].cells.len()
            && bar.cells.iter().zip(&bars[0].cells).all(|(a, b)| a.name == b.name)
    });
    if !same_stacks {
        for bar in bars {
            push_line(
                &mut out,
                format!(
                    "{:<NAME_WIDTH$} {:>VALUE_WIDTH$}",
                    truncate(&display_name(&bar.name), NAME_WIDTH),
                    unit.format(bar.total)
                ),
            );
            for cell in &bar.cells {
                push_line(
                    &mut out,
                    format!(
                        "  {:<w$} {:>VALUE_WIDTH$} {:>8}",
                        truncate(&cell.name, NAME_WIDTH - 2),
                        unit.format(cell.value),
                        format!("{:.1}%", cell.share_of(bar.total)),
                        w = NAME_WIDTH - 2
                    ),
                );
            }
        }
        return out;
    }

    let mut header = format!("{:<NAME_WIDTH$}", truncate(bar_label, NAME_WIDTH));
    for cell in &bars[0].cells {
        header.push_str(&format!(" {:>VALUE_WIDTH$}", truncate(&cell.name, VALUE_WIDTH)));
    }
    header.push_str(&format!(" {:>VALUE_WIDTH$}", "total"));
    push_line(&mut out, header);

    for bar in bars {
        let mut line = format!("{:<NAME_WIDTH$}", truncate(&display_name(&bar.name), NAME_WIDTH));
        for cell in &bar.cells {
            line.push_str(&format!(" {:>VALUE_WIDTH$}", unit.format(cell.value)));
        }
        line.push_str(&format!(" {:>VALUE_WIDTH$}", unit.format(bar.total)));
        push_line(&mut out, line);

        let mut shares = format!("{:<NAME_WIDTH$}", "");
        for cell in &bar.cells {
            shares.push_str(&format!(" {:>VALUE_WIDTH$}", format!("{:.1}%", cell.share_of(bar.total))));
        }
        push_line(&mut out, shares);
    }
    out
}

/// Drill-down detail, optionally followed by a related distribution.
pub fn format_drill_down(
    drill: &DrillDown,
    related: Option<(&str, &[SegmentData])>,
    config: &ReportConfig,
) -> String {
    let mut out = String::new();
    let unit = config.unit;

    out.push_str(&format!("=== {} ===\n", display_name(&drill.name)));
    out.push_str(&format!("{} Value: {}\n", drill.base_year, unit.format(drill.base_value)));
    out.push_str(&format!("{} Forecast: {}\n", drill.forecast_year, unit.format(drill.forecast_value)));
    out.push_str(&format!(
        "CAGR {}-{}: {}\n\n",
        drill.base_year,
        drill.forecast_year,
        fmt_pct(Some(drill.cagr))
    ));

    push_line(&mut out, format!("{:<6} {:>VALUE_WIDTH$} {:>10}", "year", "value", "yoy"));
    push_line(&mut out, format!("{:-<6} {:-<VALUE_WIDTH$} {:-<10}", "", "", ""));
    for (point, yoy) in drill.series.iter().zip(&drill.yoy) {
        push_line(
            &mut out,
            format!(
                "{:<6} {:>VALUE_WIDTH$} {:>10}",
                point.year,
                unit.format(point.value),
                fmt_pct(*yoy)
            ),
        );
    }
    if drill.series.is_empty() {
        out.push_str("(no data)\n");
    }

    if let Some((title, segments)) = related {
        out.push_str(&format!("\nBy {title}:\n"));
        out.push_str(&format_distribution(segments, config.selected_year, unit));
    }

    out
}

/// Category / dataset / dashboard listing with access markers.
pub fn format_catalog() -> String {
    let mut out = String::new();
    for category in CATEGORIES {
        out.push_str(&format!("{}\n", category.title));
        for dataset in category.datasets {
            let access = if dataset.purchased { "" } else { " [locked]" };
            out.push_str(&format!("  {}{access}\n", dataset.name));
            for entry in dataset.dashboards {
                match entry.dashboard {
                    Some(db) => push_line(&mut out, format!("    {:<22} {}", db.id, entry.name)),
                    None => push_line(&mut out, format!("    {:<22} {} (coming soon)", "-", entry.name)),
                }
            }
        }
        out.push('\n');
    }
    out
}

/// `+12.3%`, `-4.0%`, or `-` for a missing rate.
pub fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}{v:.1}%", if v >= 0.0 { "+" } else { "" }),
        _ => "-".to_string(),
    }
}

/// Expand terse segment codes used as stored keys.
pub fn display_name(name: &str) -> String {
    match name {
        "OE" => "OE (Original Equipment)".to_string(),
        other => other.to_string(),
    }
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
