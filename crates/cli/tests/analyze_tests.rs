// End-to-end tests for `stockguard analyze`: exit codes, --json contract, exports.
//
// Run with: cargo test -p stockguard-cli --test analyze_tests -- --nocapture

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn stockguard() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_stockguard"));
    cmd.env_remove("STOCKGUARD_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Stock with one item in alert (A2), one ok (A1), one without threshold (A3).
fn fixtures(dir: &TempDir) -> (PathBuf, PathBuf) {
    let stock = write(
        dir,
        "stock.csv",
        "Référence interne,Quantité\nA1,5\nA2,1\nA3,7\n",
    );
    let thresholds = write(dir, "seuils.csv", "Référence,Seuil\nA1,3\nA2,4\n");
    (stock, thresholds)
}

fn run(args: &[&str], paths: &[&Path]) -> Output {
    let mut cmd = stockguard();
    cmd.arg("analyze");
    for p in paths {
        cmd.arg(p);
    }
    cmd.args(args).output().expect("run stockguard analyze")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "exit code: {:?}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("stdout must be one JSON value: {e}\nstdout:\n{stdout}"))
}

// ===========================================================================
// --json contract
// ===========================================================================

#[test]
fn json_report_shape() {
    let dir = TempDir::new().unwrap();
    let (stock, thresholds) = fixtures(&dir);

    let val = stdout_json(&run(&["--json"], &[&stock, &thresholds]));

    let summary = &val["summary"];
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["alerts"], 1);
    assert_eq!(summary["ok"], 1);
    assert_eq!(summary["percent_alert"], 50);
    assert_eq!(summary["unmatched"], 1);
    assert_eq!(summary["by_priority"]["high"], 1);

    let matched = val["matched"].as_array().expect("matched array");
    assert_eq!(matched.len(), 2);
    assert_eq!(matched[0]["identifier"], "A1");
    assert_eq!(matched[0]["status"], "ok");
    assert_eq!(matched[1]["identifier"], "A2");
    assert_eq!(matched[1]["status"], "alert");
    assert_eq!(matched[1]["sequence_id"], 2);

    let unmatched = val["unmatched"].as_array().expect("unmatched array");
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0]["identifier"], "A3");

    assert_eq!(val["filter"], "all");
    assert_eq!(val["meta"]["config_name"], "default");
    assert_eq!(val["meta"]["thresholds_loaded"], 2);
}

#[test]
fn json_filter_alert_keeps_summary_whole() {
    let dir = TempDir::new().unwrap();
    let (stock, thresholds) = fixtures(&dir);

    let val = stdout_json(&run(&["--json", "--filter", "alert"], &[&stock, &thresholds]));

    let matched = val["matched"].as_array().unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0]["identifier"], "A2");
    assert_eq!(val["summary"]["total"], 2, "summary covers every matched item");
    assert_eq!(val["filter"], "alert");
}

#[test]
fn identifiers_match_across_case_and_spaces() {
    let dir = TempDir::new().unwrap();
    let stock = write(&dir, "stock.csv", "Article,QTE\n  abc-1 ,2\n");
    let thresholds = write(&dir, "seuils.csv", "Pièce,Minimum\nABC-1,10\n");

    let val = stdout_json(&run(&["--json"], &[&stock, &thresholds]));

    let matched = val["matched"].as_array().unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0]["identifier"], "abc-1");
    assert_eq!(matched[0]["status"], "alert");
}

// ===========================================================================
// Human output
// ===========================================================================

#[test]
fn human_output_lists_items_and_summary() {
    let dir = TempDir::new().unwrap();
    let (stock, thresholds) = fixtures(&dir);

    let output = run(&["--unmatched"], &[&stock, &thresholds]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("Référence interne"), "header row:\n{stdout}");
    assert!(stdout.contains("Demande d'achat nécessaire"));
    assert!(stdout.contains("Stock suffisant"));
    assert!(stdout.contains("Seuil non défini"));
    assert!(stdout.contains("2 item(s) checked: 1 in alert (50%), 1 ok"));
}

#[test]
fn quiet_prints_only_summary() {
    let dir = TempDir::new().unwrap();
    let (stock, thresholds) = fixtures(&dir);

    let output = run(&["--quiet"], &[&stock, &thresholds]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Référence interne"));
    assert!(stdout.contains("in alert"));
}

// ===========================================================================
// Exit codes
// ===========================================================================

#[test]
fn empty_stock_exits_6() {
    let dir = TempDir::new().unwrap();
    let stock = write(&dir, "stock.csv", "");
    let thresholds = write(&dir, "seuils.csv", "Référence,Seuil\nA1,3\n");

    let output = run(&[], &[&stock, &thresholds]);
    assert_eq!(output.status.code(), Some(6));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no data rows"), "stderr: {stderr}");
}

#[test]
fn headers_only_threshold_exits_6() {
    let dir = TempDir::new().unwrap();
    let stock = write(&dir, "stock.csv", "Référence,Quantité\nA1,3\n");
    let thresholds = write(&dir, "seuils.csv", "Référence,Seuil\n");

    let output = run(&[], &[&stock, &thresholds]);
    assert_eq!(output.status.code(), Some(6));
}

#[test]
fn strict_exits_7_on_alert() {
    let dir = TempDir::new().unwrap();
    let (stock, thresholds) = fixtures(&dir);

    let output = run(&["--strict", "--quiet"], &[&stock, &thresholds]);
    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn strict_passes_without_alert() {
    let dir = TempDir::new().unwrap();
    let stock = write(&dir, "stock.csv", "Référence,Quantité\nA1,10\n");
    let thresholds = write(&dir, "seuils.csv", "Référence,Seuil\nA1,3\n");

    let output = run(&["--strict", "--quiet"], &[&stock, &thresholds]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn missing_file_exits_3() {
    let dir = TempDir::new().unwrap();
    let (_, thresholds) = fixtures(&dir);
    let missing = dir.path().join("absent.csv");

    let output = run(&[], &[&missing, &thresholds]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn unsupported_extension_exits_3() {
    let dir = TempDir::new().unwrap();
    let (_, thresholds) = fixtures(&dir);
    let stock = write(&dir, "stock.pdf", "whatever");

    let output = run(&[], &[&stock, &thresholds]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn invalid_config_exits_4() {
    let dir = TempDir::new().unwrap();
    let (stock, thresholds) = fixtures(&dir);
    let config = write(&dir, "bad.toml", "[columns]\nidentifier = []\n");

    let output = run(&["--config", config.to_str().unwrap()], &[&stock, &thresholds]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn no_subcommand_is_usage_error() {
    let output = stockguard().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ===========================================================================
// Config
// ===========================================================================

#[test]
fn config_adds_header_aliases() {
    let dir = TempDir::new().unwrap();
    let stock = write(&dir, "stock.csv", "SKU,On hand\nX1,2\n");
    let thresholds = write(&dir, "seuils.csv", "SKU,Reorder point\nX1,5\n");
    let config = write(
        &dir,
        "stockguard.toml",
        "name = \"warehouse\"\n\n[columns]\nidentifier = [\"SKU\"]\nquantity = [\"On hand\"]\nthreshold = [\"Reorder point\"]\n",
    );

    let output = stockguard()
        .arg("analyze")
        .arg(&stock)
        .arg(&thresholds)
        .arg("--json")
        .env("STOCKGUARD_CONFIG", &config)
        .output()
        .unwrap();
    let val = stdout_json(&output);
    assert_eq!(val["meta"]["config_name"], "warehouse");
    assert_eq!(val["summary"]["alerts"], 1);
}

#[test]
fn validate_config_reports_ok() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "stockguard.toml", "name = \"shop\"\n\n[export]\nsheet_name = \"Stock\"\n");

    let output = stockguard().arg("validate-config").arg(&config).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ok (config 'shop')"));
    assert!(stdout.contains("export sheet: Stock"));
}

#[test]
fn aliases_lists_builtin_headers() {
    let output = stockguard().arg("aliases").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"Référence interne\""));
    assert!(stdout.contains("\"Seuil (U)\""));
}

// ===========================================================================
// Export
// ===========================================================================

#[test]
fn export_xlsx_writes_workbook() {
    let dir = TempDir::new().unwrap();
    let (stock, thresholds) = fixtures(&dir);
    let out = dir.path().join("out").join("analyse.xlsx");

    let output = run(&["--quiet", "--export", out.to_str().unwrap()], &[&stock, &thresholds]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
}

#[test]
fn export_csv_follows_filter() {
    let dir = TempDir::new().unwrap();
    let (stock, thresholds) = fixtures(&dir);
    let out = dir.path().join("alerts.csv");

    let output = run(
        &["--quiet", "--filter", "alert", "--export", out.to_str().unwrap()],
        &[&stock, &thresholds],
    );
    assert!(output.status.success());

    let csv = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2, "header + one alert row:\n{csv}");
    assert!(lines[0].starts_with("Référence interne,"));
    assert!(lines[1].starts_with("A2,1,4,"));
    assert!(lines[1].contains("ALERTE"));
    assert!(lines[1].ends_with("25 %"));
}

#[test]
fn export_dir_uses_dated_name() {
    let dir = TempDir::new().unwrap();
    let (stock, thresholds) = fixtures(&dir);
    let out_dir = dir.path().join("exports");

    let output = run(
        &["--quiet", "--export-dir", out_dir.to_str().unwrap()],
        &[&stock, &thresholds],
    );
    assert!(output.status.success());

    let names: Vec<String> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("analyse_stock_"));
    assert!(names[0].ends_with(".xlsx"));
}

#[test]
fn output_writes_full_report() {
    let dir = TempDir::new().unwrap();
    let (stock, thresholds) = fixtures(&dir);
    let report = dir.path().join("report.json");

    let output = run(
        &["--quiet", "--filter", "ok", "--output", report.to_str().unwrap()],
        &[&stock, &thresholds],
    );
    assert!(output.status.success());

    let val: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(val["matched"].as_array().unwrap().len(), 2, "report file is unfiltered");
}

#[test]
fn config_sheet_name_clashing_with_unmatched_sheet_exits_4() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "stockguard.toml", "[export]\nsheet_name = \"Sans seuil\"\n");

    let output = stockguard().arg("validate-config").arg(&config).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reserved"), "stderr: {stderr}");
}

#[test]
fn export_to_read_only_format_exits_5() {
    let dir = TempDir::new().unwrap();
    let (stock, thresholds) = fixtures(&dir);
    let out = dir.path().join("analyse.ods");

    let output = run(&["--quiet", "--export", out.to_str().unwrap()], &[&stock, &thresholds]);
    assert_eq!(output.status.code(), Some(5));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("output must be .xlsx, .csv, .tsv or .json"), "stderr: {stderr}");
}
