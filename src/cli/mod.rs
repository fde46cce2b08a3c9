//! Command-line parsing for the market dashboards.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the loading/metrics code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::catalog::Dashboard;
use crate::domain::{Axis, CrossTab, ReportConfig, UnitScale};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mdash", version, about = "Market research dashboards in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List research categories, datasets, and dashboards.
    List,
    /// Print the market overview (KPIs, total market with YoY, distributions).
    Overview(ViewArgs),
    /// Print the detail view of one breakdown axis.
    Segment(SegmentArgs),
    /// Print one cross-tab as a stacked table.
    Crosstab(CrossTabArgs),
    /// Print the drill-down of a single segment.
    Drill(DrillArgs),
    /// Export an axis tab to CSV, plus the loaded document as compact JSON.
    Export(ExportArgs),
    /// Launch the interactive TUI.
    ///
    /// Loads the same documents as the other commands, but renders tabs,
    /// charts, and tables using Ratatui.
    Tui(ViewArgs),
}

/// Options shared by every dashboard view.
#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    /// Dashboard id (e.g. aircraft-interiors, soft-goods). Prompts when omitted.
    #[arg(short = 'd', long)]
    pub dashboard: Option<String>,

    /// Data root: an http(s) base URL or a local directory (overrides MDASH_DATA_URL).
    #[arg(long)]
    pub source: Option<String>,

    /// Year shown in KPIs, distributions, and cross-tabs.
    #[arg(short = 'y', long, default_value_t = 2025)]
    pub year: i32,

    /// Start year of the headline CAGR and growth analysis.
    #[arg(long, default_value_t = 2024)]
    pub base_year: i32,

    /// Forecast horizon (end year of every CAGR).
    #[arg(long, default_value_t = 2034)]
    pub forecast_year: i32,

    /// Start year of drill-down CAGRs.
    #[arg(long, default_value_t = 2025)]
    pub drill_base_year: i32,

    /// Show values in US$ millions regardless of the dashboard default.
    #[arg(long)]
    pub millions: bool,
}

impl ViewArgs {
    /// Report settings for `dashboard`, honoring its default unit scale.
    pub fn report_config(&self, dashboard: &Dashboard) -> ReportConfig {
        ReportConfig {
            selected_year: self.year,
            base_year: self.base_year,
            forecast_year: self.forecast_year,
            drill_base_year: self.drill_base_year,
            unit: if self.millions { UnitScale::Millions } else { dashboard.unit },
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct SegmentArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Breakdown axis to show.
    #[arg(short = 'a', long, value_enum)]
    pub axis: Axis,
}

#[derive(Debug, Args, Clone)]
pub struct CrossTabArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Stored cross-tab to pivot.
    #[arg(short = 't', long, value_enum)]
    pub table: CrossTab,

    /// Make the inner categories the bars (e.g. regions stacked by aircraft type).
    #[arg(long)]
    pub transpose: bool,
}

#[derive(Debug, Args, Clone)]
pub struct DrillArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Axis containing the segment.
    #[arg(short = 'a', long, value_enum)]
    pub axis: Axis,

    /// Segment name (case-insensitive).
    #[arg(short = 's', long)]
    pub segment: String,

    /// Also print the related distribution shown with overview drill-downs.
    #[arg(long)]
    pub related: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Axis tab to export.
    #[arg(short = 'a', long, value_enum)]
    pub axis: Axis,

    /// Output directory.
    #[arg(short = 'o', long, default_value = "export")]
    pub out: PathBuf,

    /// Skip writing the compact JSON snapshot.
    #[arg(long)]
    pub no_compact: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::{AIRCRAFT_INTERIORS, SOFT_GOODS};

    #[test]
    fn parses_segment_command() {
        let cli = Cli::parse_from(["mdash", "segment", "-d", "soft-goods", "--axis", "end-user", "-y", "2030"]);
        let Command::Segment(args) = cli.command else {
            panic!("expected segment command");
        };
        assert_eq!(args.axis, Axis::EndUser);
        assert_eq!(args.view.year, 2030);
        assert_eq!(args.view.dashboard.as_deref(), Some("soft-goods"));
    }

    #[test]
    fn parses_crosstab_with_transpose() {
        let cli = Cli::parse_from(["mdash", "crosstab", "-d", "aircraft-interiors", "-t", "aircraft-by-region", "--transpose"]);
        let Command::Crosstab(args) = cli.command else {
            panic!("expected crosstab command");
        };
        assert_eq!(args.table, CrossTab::AircraftByRegion);
        assert!(args.transpose);
    }

    #[test]
    fn unit_follows_dashboard_unless_forced() {
        let cli = Cli::parse_from(["mdash", "overview"]);
        let Command::Overview(args) = cli.command else {
            panic!("expected overview command");
        };
        assert_eq!(args.report_config(&AIRCRAFT_INTERIORS).unit, UnitScale::Billions);
        assert_eq!(args.report_config(&SOFT_GOODS).unit, UnitScale::Millions);

        let forced = ViewArgs { millions: true, ..args };
        assert_eq!(forced.report_config(&AIRCRAFT_INTERIORS).unit, UnitScale::Millions);
    }
}
