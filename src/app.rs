//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the dashboard (flag or interactive picker)
//! - loads the market document
//! - prints reports or writes exports

use clap::Parser;

use crate::cli::{Command, CrossTabArgs, DrillArgs, ExportArgs, SegmentArgs, ViewArgs};
use crate::data::catalog::{Dashboard, open_dashboard};
use crate::domain::Orientation;
use crate::error::{AppError, EXIT_USAGE};
use crate::report::{DrillDown, find_segment, related_axis};

pub mod pipeline;

/// Entry point for the `mdash` binary.
pub fn run() -> Result<(), AppError> {
    // `mdash` and `mdash -d soft-goods` behave like `mdash tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::List => {
            print!("{}", crate::report::format_catalog());
            Ok(())
        }
        Command::Overview(args) => handle_overview(args),
        Command::Segment(args) => handle_segment(args),
        Command::Crosstab(args) => handle_crosstab(args),
        Command::Drill(args) => handle_drill(args),
        Command::Export(args) => handle_export(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_overview(args: ViewArgs) -> Result<(), AppError> {
    let run = load(&args)?;
    print!("{}", crate::report::format_overview(run.dashboard, &run.data, &run.config));
    Ok(())
}

fn handle_segment(args: SegmentArgs) -> Result<(), AppError> {
    let run = load(&args.view)?;
    print!(
        "{}",
        crate::report::format_segment_detail(run.dashboard, &run.data, args.axis, &run.config)
    );
    Ok(())
}

fn handle_crosstab(args: CrossTabArgs) -> Result<(), AppError> {
    let run = load(&args.view)?;
    let orientation = if args.transpose {
        Orientation::Transposed
    } else {
        Orientation::Stored
    };
    let bars = crate::metrics::cross_tab(&run.data, args.table, orientation, run.config.selected_year);
    print!(
        "{}",
        crate::report::format_cross_tab(run.dashboard, args.table, orientation, &bars, &run.config)
    );
    Ok(())
}

fn handle_drill(args: DrillArgs) -> Result<(), AppError> {
    let run = load(&args.view)?;
    let label = run.dashboard.label(args.axis);
    let segments = run.data.axis(args.axis).ok_or_else(|| {
        AppError::new(EXIT_USAGE, format!("{label} is not available for {}.", run.dashboard.title))
    })?;
    let segment = find_segment(segments, &args.segment).ok_or_else(|| {
        let names: Vec<&str> = segments.iter().map(|s| s.name.as_str()).collect();
        AppError::new(
            EXIT_USAGE,
            format!("No {label} segment named '{}'. Choices: {}", args.segment, names.join(", ")),
        )
    })?;

    let drill = DrillDown::compute(&segment.name, &segment.data, &run.config);
    let other = related_axis(args.axis);
    let related = if args.related {
        run.data
            .axis(other)
            .map(|segments| (run.dashboard.label(other), segments))
    } else {
        None
    };
    print!("{}", crate::report::format_drill_down(&drill, related, &run.config));
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let run = load(&args.view)?;
    let mut written = crate::io::export_axis(&args.out, run.dashboard, &run.data, args.axis, &run.config)?;

    if !args.no_compact {
        let path = args.out.join(run.dashboard.data_file);
        crate::io::write_compact_json(&path, &run.data)?;
        written.push(path);
    }

    for path in &written {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn handle_tui(args: ViewArgs) -> Result<(), AppError> {
    let dashboard = resolve_dashboard(&args)?;
    crate::tui::run(dashboard, args.source.clone(), args.report_config(dashboard))
}

fn load(args: &ViewArgs) -> Result<pipeline::DashboardRun, AppError> {
    let dashboard = resolve_dashboard(args)?;
    pipeline::run_load(dashboard.id, args.source.as_deref(), args.report_config(dashboard))
}

/// `-d` when given, otherwise the interactive picker.
fn resolve_dashboard(args: &ViewArgs) -> Result<&'static Dashboard, AppError> {
    match &args.dashboard {
        Some(id) => open_dashboard(id),
        None => crate::cli::picker::prompt_for_dashboard(),
    }
}

/// Rewrite argv so `mdash` defaults to `mdash tui`.
///
/// Rules:
/// - `mdash`                        -> `mdash tui`
/// - `mdash -d soft-goods ...`      -> `mdash tui -d soft-goods ...`
/// - `mdash --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "list" | "overview" | "segment" | "crosstab" | "drill" | "export" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(args(&["mdash"])), args(&["mdash", "tui"]));
        assert_eq!(
            rewrite_args(args(&["mdash", "-d", "galley-market"])),
            args(&["mdash", "tui", "-d", "galley-market"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(args(&["mdash", "list"])), args(&["mdash", "list"]));
        assert_eq!(rewrite_args(args(&["mdash", "--help"])), args(&["mdash", "--help"]));
        assert_eq!(
            rewrite_args(args(&["mdash", "overview", "-d", "psu-market"])),
            args(&["mdash", "overview", "-d", "psu-market"])
        );
    }
}
