// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use sreview::commands::{doctor, exporter, periods, reports};
use sreview::{cli, data, Ledger, ViewMode};
use tempfile::tempdir;

fn fixture() -> Ledger {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sre.json");
    data::load(&path).unwrap().1
}

fn sub_matches(args: &[&str]) -> (String, clap::ArgMatches) {
    let mut argv = vec!["sreview"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (name, sub) = matches.subcommand().unwrap();
    (name.to_string(), sub.clone())
}

#[test]
fn export_quarters_writes_normalized_json() {
    let ledger = fixture();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("quarters.json");
    let out_str = out_path.to_string_lossy().to_string();

    let (name, m) = sub_matches(&["export", "quarters", "--format", "json", "--out", &out_str]);
    assert_eq!(name, "export");
    exporter::handle(&ledger, &m).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: Vec<sreview::FinancialQuarter> = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed.as_slice(), ledger.quarters());
    assert!(parsed[2].fund_summary.is_none());
}

#[test]
fn export_quarters_writes_csv_rows() {
    let ledger = fixture();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("quarters.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let (_, m) = sub_matches(&["export", "quarters", "--format", "CSV", "--out", &out_str]);
    exporter::handle(&ledger, &m).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "Q3-2023");
    assert_eq!(&rows[2][11], "false");
}

#[test]
fn export_quarters_rejects_unknown_format() {
    let ledger = fixture();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("quarters.xml");
    let out_str = out_path.to_string_lossy().to_string();

    let (_, m) = sub_matches(&["export", "quarters", "--format", "xml", "--out", &out_str]);
    assert!(exporter::handle(&ledger, &m).is_err());
    assert!(!out_path.exists());
}

#[test]
fn selection_follows_year_quarter_and_mode_flags() {
    let ledger = fixture();

    let (_, m) = sub_matches(&["summary", "--year", "2023", "--mode", "year"]);
    let sel = reports::resolve_selection(&ledger, &m).unwrap();
    assert_eq!(sel.year, "2023");
    assert_eq!(sel.mode, ViewMode::Year);

    let (_, m) = sub_matches(&["income", "--quarter", "Q1"]);
    let sel = reports::resolve_selection(&ledger, &m).unwrap();
    assert_eq!(sel.quarter.period, "Q1-2024");
    assert_eq!(sel.mode, ViewMode::Quarter);

    let (_, m) = sub_matches(&["income", "--year", "2023", "--quarter", "Q1"]);
    assert!(reports::resolve_selection(&ledger, &m).is_err());

    let (_, m) = sub_matches(&["summary", "--year", "1999"]);
    assert!(reports::resolve_selection(&ledger, &m).is_err());
}

#[test]
fn report_commands_run_against_fixture() {
    let ledger = fixture();
    let (_, m) = sub_matches(&["summary", "--json"]);
    reports::summary(&ledger, &m).unwrap();
    let (_, m) = sub_matches(&["income", "--mode", "year", "--jsonl"]);
    reports::income(&ledger, &m).unwrap();
    let (_, m) = sub_matches(&["expenditure", "--year", "2023"]);
    reports::expenditure(&ledger, &m).unwrap();
    let (_, m) = sub_matches(&["years"]);
    periods::years(&ledger, &m).unwrap();
}

#[test]
fn quarters_for_unknown_year_is_an_error() {
    let ledger = fixture();
    let (_, m) = sub_matches(&["quarters", "--year", "2030"]);
    assert!(periods::quarters(&ledger, &m).is_err());
    let (_, m) = sub_matches(&["quarters", "--year", "2024"]);
    periods::quarters(&ledger, &m).unwrap();
}

#[test]
fn doctor_flags_years_missing_quarters_in_fixture() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sre.json");
    let (raw, ledger) = data::load(&path).unwrap();
    let found = doctor::findings(&raw, &ledger);
    assert!(found
        .iter()
        .any(|f| f.issue == "missing_quarters" && f.detail == "2023 Q1,Q2,Q4"));
    assert!(found.iter().all(|f| f.issue != "total_mismatch"));

    let (_, m) = sub_matches(&["doctor", "--limit", "1"]);
    doctor::handle(&raw, &ledger, &m).unwrap();
}
