//! E2E tests running the fedtax binary

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn fedtax(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fedtax"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn fedtax_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_fedtax"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().expect("Failed to wait for command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("fedtax-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

/// Test the liability table for a single wage earner
#[test]
fn liability_single_wage_earner() {
    let output = fedtax(&["liability", "-y", "2024", "-s", "s", "-w", "60000"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = stdout(&output);
    assert!(stdout.contains("TAX LIABILITY (2024, Single)"));
    assert!(stdout.contains("$45400.00"));
    assert!(stdout.contains("$5216.00"));
    assert!(stdout.contains("Marginal rate 12%"));
}

/// Test JSON output of the liability command
#[test]
fn liability_json() {
    let output = fedtax(&[
        "liability",
        "--year",
        "2024",
        "--status",
        "MFJ",
        "--wages",
        "100000",
        "--qualified-income",
        "40000",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["filing_status"], "MFJ");
    assert_eq!(json["year"], 2024);
    assert_eq!(json["taxable_income"], "110800.00");
    assert_eq!(json["capital_gains_tax"], "2512.50");
    assert_eq!(json["total_tax"], "10544.50");
}

/// Test that dependents counted by age feed the earned income credit
#[test]
fn liability_child_ages() {
    let output = fedtax(&[
        "liability",
        "-y",
        "2024",
        "-s",
        "s",
        "-w",
        "20000",
        "--child-age",
        "30",
        "--student-age",
        "22",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["earned_income_credit"], "4168.00");
}

/// Test warnings in the liability output
#[test]
fn liability_warns_for_mfs_credit() {
    let output = fedtax(&["liability", "-y", "2024", "-s", "mfs", "-w", "15000"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout(&output).contains("1 warning(s)"));
}

/// Test that an unknown year is rejected
#[test]
fn liability_unknown_year() {
    let output = fedtax(&["liability", "-y", "1999", "-s", "s", "-w", "1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no dataset for tax year 1999"));
}

/// Test batch CSV processing
#[test]
fn batch_csv() {
    let output = fedtax(&["batch", "-y", "2024", "tests/data/profiles.csv"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = stdout(&output);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[1].starts_with("1,S,45400.00,5216.00"));
    assert!(lines[2].starts_with("2,MFJ,110800.00,8032.00,2512.50"));
    assert!(lines[3].contains(",4168.00,"));
    assert!(lines[4].contains("cannot be claimed"));
    assert!(lines[5].contains("exemption worksheet"));
}

/// Test the bracket schedule display
#[test]
fn brackets_table() {
    let output = fedtax(&["brackets", "-y", "2024", "-s", "hoh", "-i", "50000"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = stdout(&output);
    assert!(stdout.contains("ORDINARY INCOME (2024, Head of Household)"));
    assert!(stdout.contains("$16550.00"));
    assert!(stdout.contains("and over"));
    assert!(stdout.contains("Tax on $50000.00: $5669.00 (marginal rate 12%)"));
}

/// Test the capital gains schedule as JSON
#[test]
fn brackets_capital_gains_json() {
    let output = fedtax(&[
        "brackets",
        "-y",
        "2024",
        "-s",
        "s",
        "--schedule",
        "capital-gains",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let brackets = json["brackets"].as_array().unwrap();
    assert_eq!(brackets.len(), 3);
    assert_eq!(brackets[0]["rate"], "0%");
    assert_eq!(brackets[0]["to"], "$47025.00");
    assert_eq!(brackets[2]["rate"], "20%");
}

/// Test the earned income credit on its plateau
#[test]
fn eic_plateau() {
    let output = fedtax(&[
        "eic", "-y", "2024", "-s", "mfj", "-c", "2", "-i", "20000", "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["credit"], "$6892.00");
    assert_eq!(json["points"].as_array().unwrap().len(), 4);
}

/// Test the limits table
#[test]
fn limits_table() {
    let output = fedtax(&["limits", "-y", "2024"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout(&output).contains("$168600.00"));
}

/// Test that an exported dataset validates with the same fingerprint
#[test]
fn export_then_validate() {
    let export = fedtax(&["export", "-y", "2024"]);
    assert!(export.status.success(), "Command failed: {:?}", export);
    let stderr = String::from_utf8_lossy(&export.stderr);
    let fingerprint = stderr
        .lines()
        .find_map(|l| l.strip_prefix("tax year 2024 fingerprint "))
        .unwrap()
        .to_string();

    let validate = fedtax_stdin(&["validate", "--json"], &stdout(&export));
    assert!(validate.status.success(), "Command failed: {:?}", validate);
    let json: serde_json::Value = serde_json::from_str(&stdout(&validate)).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["tax_year"], "2024");
    assert_eq!(json["fingerprint"], fingerprint.as_str());
}

/// Test that a malformed table is reported with its location
#[test]
fn validate_reports_table_path() {
    let export = fedtax(&["export", "-y", "2024", "--compact"]);
    let mut dataset: serde_json::Value = serde_json::from_str(&stdout(&export)).unwrap();
    dataset["ordinary"]["status"]["HOH"]["brackets"]
        .as_array_mut()
        .unwrap()
        .pop();
    let path = temp_file("bad-hoh.json", &dataset.to_string());

    let output = fedtax(&["validate", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout(&output);
    assert!(stdout.contains("Invalid dataset"));
    assert!(stdout.contains("ordinary.HOH.brackets: expected 6 rates for 5 breakpoints, found 7"));
}

/// Test that JSON missing whole sections is rejected
#[test]
fn validate_incomplete_json() {
    let output = fedtax(&["validate", "--json", "tests/data/bad_dataset.json"]);
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["valid"], false);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid dataset json"));
}

/// Test that a user-supplied dataset overrides the built-in one
#[test]
fn liability_with_dataset_file() {
    let export = fedtax(&["export", "-y", "2024", "--compact"]);
    let mut dataset: serde_json::Value = serde_json::from_str(&stdout(&export)).unwrap();
    dataset["ordinary"]["status"]["S"]["deductions"][0]["amount"] = "20000".into();
    let path = temp_file("raised-deduction.json", &dataset.to_string());

    let output = fedtax(&[
        "liability",
        "--dataset",
        path.to_str().unwrap(),
        "-s",
        "s",
        "-w",
        "60000",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["taxable_income"], "40000.00");
}

/// Test the schema outputs
#[test]
fn schema_outputs() {
    let header = fedtax(&["schema", "csv-header"]);
    assert!(header.status.success());
    assert!(stdout(&header).starts_with("filing_status,wages,other_income"));

    let fields = fedtax(&["schema", "csv-fields"]);
    assert!(stdout(&fields).contains("amt_income"));

    let dataset = fedtax(&["schema", "dataset"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&dataset)).unwrap();
    assert_eq!(json["title"], "DatasetInput");
}
