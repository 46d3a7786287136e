// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use campusledger::engine::aggregate::{summarize, FilterSpec};
use campusledger::engine::export::{build_workbook, ledger_csv_row, ReportBreakdown};
use campusledger::engine::funding::FundingMode;
use campusledger::engine::normalize::normalize_snapshot;
use campusledger::engine::period::PeriodSpec;
use campusledger::models::Snapshot;
use campusledger::{cli, commands, snapshot};
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn sample_snapshot() -> Snapshot {
    let v = json!({
        "students": [{
            "id": "s1", "name": "Ali",
            "feesHistory": [
                {"id": "c1", "month": "May", "amount": 1500, "status": "paid", "type": "monthly", "date": "2024-05-03"},
                {"id": "c2", "amount": 500, "status": "paid", "type": "admission", "date": "2024-04-02"}
            ]
        }],
        "staff": [{"id": "t1", "name": "Sara", "salaryHistory": [
            {"id": "p1", "month": "May", "netSalary": 30000, "status": "paid", "paymentDate": "2024-05-10"},
            {"id": "p2", "netSalary": 5000, "status": "advance", "paymentDate": "2024-05-12"}
        ]}],
        "expenses": [
            {"id": "e1", "date": "2024-05-15", "amount": 200, "category": "Utilities"},
            {"id": "e2", "date": "2024-05-18", "amount": 120, "category": "Utilities"},
            {"id": "e3", "date": "2024-05-20", "amount": 80}
        ],
        "canteenIncome": [{"id": "k1", "date": "2024-05-16", "amount": 350, "description": "May canteen"}],
        "sponsorshipIncome": [{"id": "sp1", "date": "2024-05-17", "amount": 1000, "sponsor": "Acme"}]
    });
    snapshot::parse(&v.to_string()).unwrap()
}

#[test]
fn every_sheet_totals_row_reconciles_with_its_rows() {
    let snap = sample_snapshot();
    let spec = FilterSpec::new(PeriodSpec::Yearly(2024), FundingMode::Traditional);
    let history = normalize_snapshot(&snap);
    let summary = summarize(&history, &spec);
    let breakdown = ReportBreakdown::from_snapshot(&snap, &spec);

    let sheets = build_workbook(&summary, &breakdown);
    assert_eq!(sheets.len(), 5);
    for sheet in &sheets {
        let sum: Decimal = sheet.rows.iter().map(|r| r.amount).sum();
        assert_eq!(sheet.total, sum, "sheet '{}' does not reconcile", sheet.name);
        assert_eq!(sheet.totals_row().len(), sheet.headers.len());
    }
}

#[test]
fn summary_sheet_total_is_the_net_balance() {
    let snap = sample_snapshot();
    let spec = FilterSpec::new(PeriodSpec::Yearly(2024), FundingMode::Traditional);
    let history = normalize_snapshot(&snap);
    let summary = summarize(&history, &spec);
    let breakdown = ReportBreakdown::from_snapshot(&snap, &spec);

    let sheets = build_workbook(&summary, &breakdown);
    assert_eq!(sheets[0].name, "Summary");
    assert_eq!(sheets[0].total, summary.net_balance);
}

#[test]
fn expenses_sheet_groups_by_category_and_matches_other_expenses() {
    let snap = sample_snapshot();
    let spec = FilterSpec::new(PeriodSpec::Yearly(2024), FundingMode::Traditional);
    let breakdown = ReportBreakdown::from_snapshot(&snap, &spec);

    assert_eq!(
        breakdown.expenses_by_category,
        vec![
            ("Unspecified".to_string(), Decimal::from(80)),
            ("Utilities".to_string(), Decimal::from(320)),
        ]
    );

    let history = normalize_snapshot(&snap);
    let summary = summarize(&history, &spec);
    let total: Decimal = breakdown.expenses_by_category.iter().map(|(_, a)| *a).sum();
    assert_eq!(total, summary.other_expenses);
}

#[test]
fn staff_salary_rows_exclude_advances() {
    let snap = sample_snapshot();
    let spec = FilterSpec::new(PeriodSpec::Yearly(2024), FundingMode::Traditional);
    let breakdown = ReportBreakdown::from_snapshot(&snap, &spec);

    assert_eq!(breakdown.staff_salaries.len(), 1);
    assert_eq!(breakdown.staff_salaries[0].0, "Sara");
    assert_eq!(breakdown.staff_salaries[0].2, Decimal::from(30000));
}

#[test]
fn ledger_csv_row_projection_has_fixed_columns() {
    let snap = sample_snapshot();
    let history = normalize_snapshot(&snap);
    let fee = history
        .iter()
        .find(|t| t.description.contains("Tuition"))
        .unwrap();
    let row = ledger_csv_row(fee);
    assert_eq!(row.len(), 5);
    assert_eq!(row[0], "Fee Collection");
    assert_eq!(row[2], "Monthly");
    assert_eq!(row[3], "2024-05-03");
    assert_eq!(row[4], "1500");
}

#[test]
fn export_report_writes_stacked_csv_sheets() {
    let snap = sample_snapshot();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("report.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "campusledger",
        "export",
        "report",
        "--period",
        "yearly",
        "--year",
        "2024",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        commands::exporter::handle(&snap, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert!(contents.starts_with("Summary\n"));
    assert!(contents.contains("Expenses by Category"));
    assert!(contents.contains("Staff Salaries"));
    assert!(contents.contains("Canteen Income"));
    assert!(contents.contains("Sponsorship Income"));
    assert!(contents.contains("Total"));
}

#[test]
fn export_report_rejects_unknown_format() {
    let snap = sample_snapshot();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("report.xml");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "campusledger",
        "export",
        "report",
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(commands::exporter::handle(&snap, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}

#[test]
fn export_activity_writes_the_full_filtered_ledger() {
    let snap = sample_snapshot();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("activity.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "campusledger",
        "export",
        "activity",
        "--flow",
        "out",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        commands::exporter::handle(&snap, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["type", "description", "category", "date", "amount"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    // salary, advance, and three expenses flow out.
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r[4].starts_with('-')));
}
