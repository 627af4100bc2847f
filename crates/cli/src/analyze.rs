//! `stockguard analyze` — reconcile a stock snapshot against minimum thresholds.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use stockguard_io::{LoadOptions, LoadedSheet, SheetData};
use stockguard_recon::config::UNMATCHED_SHEET_NAME;
use stockguard_recon::export::{export_rows, unmatched_rows, EXPORT_HEADERS, UNMATCHED_HEADERS};
use stockguard_recon::model::{ReconMeta, ReconReport, ReconSummary};
use stockguard_recon::{
    filter_by_status, ColumnAliases, Field, ReconConfig, ReconInput, ReconciledItem, StatusFilter,
    UnmatchedItem,
};

use crate::exit_codes::{EXIT_ALERTS, EXIT_EMPTY_INPUT, EXIT_USAGE};
use crate::table::{Align, TextTable};
use crate::{load_config, CliError};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Current stock file (.xlsx, .xls, .ods, .csv, .tsv, .json)
    pub stock: PathBuf,

    /// Minimum thresholds file
    pub thresholds: PathBuf,

    /// Worksheet to read from the stock file (default: first)
    #[arg(long)]
    pub stock_sheet: Option<String>,

    /// Worksheet to read from the thresholds file (default: first)
    #[arg(long)]
    pub thresholds_sheet: Option<String>,

    /// CSV delimiter for both files (default: sniffed)
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Config file with header aliases and export settings
    #[arg(long, env = "STOCKGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Which items to show and export: all, alert, ok
    #[arg(long, default_value = "all")]
    pub filter: StatusFilter,

    /// Print the JSON report to stdout instead of tables
    #[arg(long)]
    pub json: bool,

    /// Write the full JSON report to a file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write the analysis sheet (.xlsx, .csv, .tsv, .json)
    #[arg(long, conflicts_with = "export_dir")]
    pub export: Option<PathBuf>,

    /// Write the analysis sheet into DIR as <prefix>_<date>.xlsx
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Also list (and export) stock items that have no threshold
    #[arg(long)]
    pub unmatched: bool,

    /// Exit with a non-zero code when any item is in alert
    #[arg(long)]
    pub strict: bool,

    /// Only print the summary
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// JSON shape printed by `--json`: the report with the status filter applied.
#[derive(Serialize)]
struct FilteredReport<'a> {
    meta: &'a ReconMeta,
    summary: &'a ReconSummary,
    filter: StatusFilter,
    matched: Vec<&'a ReconciledItem>,
    unmatched: &'a [UnmatchedItem],
}

pub fn cmd_analyze(args: AnalyzeArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_ref())?;

    let delimiter = match args.delimiter {
        Some(c) if c.is_ascii() => Some(c as u8),
        Some(c) => {
            return Err(CliError::new(EXIT_USAGE, format!("delimiter must be ASCII, got '{c}'")))
        }
        None => None,
    };

    let stock = load(&args.stock, args.stock_sheet.clone(), delimiter)?;
    let thresholds = load(&args.thresholds, args.thresholds_sheet.clone(), delimiter)?;

    check_columns(&args.stock, &stock, &config.columns, &[Field::Identifier, Field::Quantity]);
    check_columns(&args.thresholds, &thresholds, &config.columns, &[Field::Identifier, Field::Threshold]);

    let input = ReconInput { inventory: stock.rows, thresholds: thresholds.rows };
    if !input.is_reconcilable() {
        let empty = if input.inventory.is_empty() { &args.stock } else { &args.thresholds };
        return Err(CliError::new(
            EXIT_EMPTY_INPUT,
            format!("{} has no data rows; both files are needed to analyze", empty.display()),
        )
        .with_hint("the first non-empty row must hold the column headers"));
    }

    let report = stockguard_recon::run(&config, &input);

    if let Some(ref path) = args.output {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::other(format!("JSON serialization error: {e}")))?;
        std::fs::write(path, json)
            .map_err(|e| CliError::output(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("wrote {}", path.display());
    }

    if let Some(path) = export_path(&args, &config) {
        write_export(&path, &report, &config, args.filter, args.unmatched)?;
        eprintln!("wrote {}", path.display());
    }

    if args.json {
        let filtered = FilteredReport {
            meta: &report.meta,
            summary: &report.summary,
            filter: args.filter,
            matched: filter_by_status(&report.matched, args.filter),
            unmatched: &report.unmatched,
        };
        let json = serde_json::to_string_pretty(&filtered)
            .map_err(|e| CliError::other(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    } else {
        print_human(&report, args.filter, args.unmatched, args.quiet);
    }

    if args.strict && report.summary.alerts > 0 {
        return Err(CliError::new(
            EXIT_ALERTS,
            format!("{} item(s) below threshold", report.summary.alerts),
        ));
    }

    Ok(())
}

fn load(path: &Path, sheet: Option<String>, delimiter: Option<u8>) -> Result<LoadedSheet, CliError> {
    let options = LoadOptions { sheet, delimiter };
    stockguard_io::load_rows(path, &options).map_err(|e| CliError::input(e.to_string()))
}

/// Warn when a file has none of the accepted headers for a field it needs.
fn check_columns(path: &Path, sheet: &LoadedSheet, aliases: &ColumnAliases, fields: &[Field]) {
    if sheet.is_empty() {
        return;
    }
    for &field in fields {
        match aliases.matching_header(&sheet.headers, field) {
            Some(header) => log::debug!("{}: {field} read from column '{header}'", path.display()),
            None => log::warn!(
                "{}: no {field} column found (accepted headers: {})",
                path.display(),
                aliases.for_field(field).join(", ")
            ),
        }
    }
}

fn export_path(args: &AnalyzeArgs, config: &ReconConfig) -> Option<PathBuf> {
    if let Some(ref path) = args.export {
        return Some(path.clone());
    }
    let dir = args.export_dir.as_ref()?;
    let today = chrono::Local::now().date_naive();
    Some(dir.join(stockguard_io::default_export_name(&config.export.file_prefix, today)))
}

fn write_export(
    path: &Path,
    report: &ReconReport,
    config: &ReconConfig,
    filter: StatusFilter,
    include_unmatched: bool,
) -> Result<(), CliError> {
    let mut sheets = vec![SheetData {
        name: &config.export.sheet_name,
        headers: &EXPORT_HEADERS,
        rows: export_rows(&report.matched, filter).iter().map(|r| r.cells()).collect(),
    }];
    if include_unmatched && !report.unmatched.is_empty() {
        sheets.push(SheetData {
            name: UNMATCHED_SHEET_NAME,
            headers: &UNMATCHED_HEADERS,
            rows: unmatched_rows(&report.unmatched).iter().map(|r| r.cells()).collect(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| CliError::output(format!("cannot create {}: {e}", parent.display())))?;
    }
    stockguard_io::write_export(path, &sheets).map_err(|e| CliError::output(e.to_string()))
}

// ============================================================================
// Human output
// ============================================================================

fn print_human(report: &ReconReport, filter: StatusFilter, show_unmatched: bool, quiet: bool) {
    let s = &report.summary;

    if !quiet {
        let shown = filter_by_status(&report.matched, filter);
        if !shown.is_empty() {
            let mut t = TextTable::new(
                &EXPORT_HEADERS,
                &[Align::Left, Align::Right, Align::Right, Align::Left, Align::Left, Align::Left, Align::Right],
            );
            for row in export_rows(&report.matched, filter) {
                t.push(row.cells().iter().map(|c| c.to_string()).collect());
            }
            print!("{}", t.render());
        }
        println!("showing {} of {} item(s) (filter: {filter})", shown.len(), s.total);

        if show_unmatched && !report.unmatched.is_empty() {
            println!();
            println!("Items without threshold ({}):", report.unmatched.len());
            let mut t = TextTable::new(&UNMATCHED_HEADERS, &[Align::Left, Align::Right, Align::Left]);
            for row in unmatched_rows(&report.unmatched) {
                t.push(row.cells().iter().map(|c| c.to_string()).collect());
            }
            print!("{}", t.render());
        }
        println!();
    }

    println!(
        "{} item(s) checked: {} in alert ({}%), {} ok",
        s.total, s.alerts, s.percent_alert, s.ok
    );
    if s.alerts > 0 {
        println!(
            "priority: {} high, {} medium, {} low",
            s.by_priority.high, s.by_priority.medium, s.by_priority.low
        );
    }
    if s.unmatched > 0 {
        let hint = if show_unmatched { "" } else { " (use --unmatched to list)" };
        println!("{} stock item(s) without threshold{hint}", s.unmatched);
    }
}
