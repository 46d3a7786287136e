// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use campusledger::engine::aggregate::{summarize, FilterSpec};
use campusledger::engine::funding::FundingMode;
use campusledger::engine::normalize::{normalize_snapshot, NormalizedTransaction};
use campusledger::engine::period::PeriodSpec;
use campusledger::models::{Quarter, Snapshot};
use campusledger::snapshot;
use rust_decimal::Decimal;
use serde_json::json;

fn parse(v: serde_json::Value) -> Snapshot {
    snapshot::parse(&v.to_string()).unwrap()
}

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

#[test]
fn scenario_one_admission_fee_and_utility_expense() {
    let snap = parse(json!({
        "students": [{
            "id": "s1", "name": "Ali",
            "feesHistory": [{"id": "c1", "amount": 500, "status": "paid", "type": "admission", "date": "2024-03-01"}]
        }],
        "expenses": [{"id": "e1", "date": "2024-03-15", "amount": 200, "category": "Utilities"}]
    }));
    let txs = normalize_snapshot(&snap);
    let spec = FilterSpec::new(PeriodSpec::Yearly(2024), FundingMode::Traditional);
    let s = summarize(&txs, &spec);

    assert_eq!(s.admission_fees, dec(500));
    assert_eq!(s.total_expenses, dec(200));
    assert_eq!(s.total_income, dec(500));
    assert_eq!(s.net_balance, dec(300));
}

#[test]
fn scenario_two_ngo_mode_counts_received_subsidies_only() {
    let snap = parse(json!({
        "schoolInfo": {"fundingType": "ngo"},
        "subsidies": [
            {"id": "n1", "quarter": "Q1", "year": 2024, "amount": 50000, "status": "received", "receivedDate": "2024-02-15"},
            {"id": "n2", "quarter": "Q1", "year": 2024, "amount": 90000, "status": "planned", "receivedDate": "2024-03-01"}
        ]
    }));
    let txs = normalize_snapshot(&snap);
    let spec = FilterSpec::new(
        PeriodSpec::Quarter {
            quarter: Some(Quarter::Q1),
            year: Some(2024),
        },
        FundingMode::resolve(snap.school_info.funding_type.as_deref()),
    );
    let s = summarize(&txs, &spec);

    assert_eq!(s.total_subsidies_received, dec(50000));
    assert_eq!(s.total_income, dec(50000));
}

#[test]
fn scenario_three_advances_excluded_from_staff_salaries() {
    let snap = parse(json!({
        "staff": [{
            "id": "t1", "name": "Sara",
            "salaryHistory": [
                {"id": "p1", "month": "May", "netSalary": 30000, "status": "paid", "paymentDate": "2024-05-10"},
                {"id": "p2", "netSalary": 5000, "status": "advance", "paymentDate": "2024-05-12"}
            ]
        }]
    }));
    let txs = normalize_snapshot(&snap);
    let spec = FilterSpec::new(
        PeriodSpec::Monthly { year: 2024, month: 5 },
        FundingMode::Traditional,
    );
    let s = summarize(&txs, &spec);

    assert_eq!(s.total_staff_salaries, dec(30000));
    assert_eq!(s.total_expenses, dec(30000));
    // The advance is still a ledger-visible entry.
    assert!(txs.iter().any(|t| t.amount == dec(-5000)));
}

#[test]
fn fines_are_tracked_separately_and_inside_other_fees() {
    let snap = parse(json!({
        "students": [{
            "id": "s1", "name": "Ali",
            "feesHistory": [
                {"id": "c1", "amount": 1000, "status": "paid", "type": "monthly", "date": "2024-05-01"},
                {"id": "c2", "amount": 150, "status": "paid", "type": "fine", "date": "2024-05-02"},
                {"id": "c3", "amount": 80, "status": "paid", "type": "other", "date": "2024-05-03"},
                {"id": "c4", "amount": 20, "status": "paid", "type": "misc", "date": "2024-05-04"}
            ]
        }]
    }));
    let txs = normalize_snapshot(&snap);
    let spec = FilterSpec::new(PeriodSpec::Overall, FundingMode::Traditional);
    let s = summarize(&txs, &spec);

    assert_eq!(s.tuition_fees, dec(1000));
    assert_eq!(s.fine_amount, dec(150));
    assert_eq!(s.other_fees, dec(250)); // fine + other + unspecified
    assert_eq!(s.total_income, dec(1250));
}

#[test]
fn funding_mode_gates_income_categories() {
    let snap = parse(json!({
        "students": [{
            "id": "s1", "name": "Ali",
            "feesHistory": [{"id": "c1", "amount": 500, "status": "paid", "type": "monthly", "date": "2024-05-01"}]
        }],
        "subsidies": [{"id": "n1", "amount": 40000, "status": "received", "receivedDate": "2024-05-02"}],
        "canteenIncome": [{"id": "k1", "date": "2024-05-03", "amount": 300}],
        "staff": [{"id": "t1", "name": "Sara", "salaryHistory": [
            {"id": "p1", "netSalary": 20000, "status": "paid", "paymentDate": "2024-05-10"}
        ]}]
    }));
    let txs = normalize_snapshot(&snap);

    let trad = summarize(
        &txs,
        &FilterSpec::new(PeriodSpec::Overall, FundingMode::Traditional),
    );
    assert_eq!(trad.tuition_fees, dec(500));
    assert_eq!(trad.total_subsidies_received, dec(0));
    assert_eq!(trad.total_income, dec(800));

    let ngo = summarize(&txs, &FilterSpec::new(PeriodSpec::Overall, FundingMode::Ngo));
    assert_eq!(ngo.tuition_fees, dec(0));
    assert_eq!(ngo.total_subsidies_received, dec(40000));
    assert_eq!(ngo.total_income, dec(40300));
    // Salaries apply in both modes.
    assert_eq!(trad.total_staff_salaries, dec(20000));
    assert_eq!(ngo.total_staff_salaries, dec(20000));
}

#[test]
fn manual_drafts_override_summed_canteen_and_sponsorship() {
    let snap = parse(json!({
        "canteenIncome": [{"id": "k1", "date": "2024-05-03", "amount": 300}],
        "sponsorshipIncome": [{"id": "sp1", "date": "2024-05-04", "amount": 1000}]
    }));
    let txs = normalize_snapshot(&snap);
    let spec = FilterSpec::new(PeriodSpec::Overall, FundingMode::Traditional)
        .with_canteen_draft(Some(dec(450)))
        .with_sponsorship_draft(Some(dec(0)));
    let s = summarize(&txs, &spec);

    assert_eq!(s.total_canteen_income, dec(450));
    assert_eq!(s.total_sponsorship_income, dec(0));
    assert_eq!(s.total_income, dec(450));
}

#[test]
fn fee_collection_date_bypass_is_an_independent_flag() {
    let snap = parse(json!({
        "students": [{
            "id": "s1", "name": "Ali",
            "feesHistory": [
                {"id": "c1", "amount": 500, "status": "paid", "type": "monthly", "date": "2023-01-01"},
                {"id": "c2", "amount": 250, "status": "paid", "type": "monthly"}
            ]
        }],
        "expenses": [{"id": "e1", "date": "2023-01-05", "amount": 100}]
    }));
    let txs = normalize_snapshot(&snap);

    // Bounded period, flag off: neither challan matches May 2024.
    let mut spec = FilterSpec::new(
        PeriodSpec::Monthly { year: 2024, month: 5 },
        FundingMode::Traditional,
    );
    assert!(!spec.include_all_paid_regardless_of_date);
    let s = summarize(&txs, &spec);
    assert_eq!(s.tuition_fees, dec(0));
    assert_eq!(s.other_expenses, dec(0));

    // Same bounded period, flag on: every paid challan counts, expenses do not.
    spec.include_all_paid_regardless_of_date = true;
    let s = summarize(&txs, &spec);
    assert_eq!(s.tuition_fees, dec(750));
    assert_eq!(s.other_expenses, dec(0));

    // Overall auto-enables the flag, so the dateless challan is included.
    let overall = FilterSpec::new(PeriodSpec::Overall, FundingMode::Traditional);
    assert!(overall.include_all_paid_regardless_of_date);
    let s = summarize(&txs, &overall);
    assert_eq!(s.tuition_fees, dec(750));
    assert_eq!(s.other_expenses, dec(100));
}

#[test]
fn batch_filter_restricts_fee_rows_only() {
    let snap = parse(json!({
        "students": [
            {"id": "s1", "name": "Ali", "academicYear": "2024-2025", "feesHistory": [
                {"id": "c1", "amount": 500, "status": "paid", "type": "monthly", "date": "2024-05-01"}
            ]},
            {"id": "s2", "name": "Bilal", "academicYear": "2023-2024", "feesHistory": [
                {"id": "c2", "amount": 700, "status": "paid", "type": "monthly", "date": "2024-05-02"}
            ]},
            {"id": "s3", "name": "Dawood", "feesHistory": [
                {"id": "c3", "amount": 900, "status": "paid", "type": "monthly", "date": "2024-05-03"}
            ]}
        ],
        "staff": [{"id": "t1", "name": "Sara", "salaryHistory": [
            {"id": "p1", "netSalary": 20000, "status": "paid", "paymentDate": "2024-05-10"}
        ]}]
    }));
    let txs = normalize_snapshot(&snap);
    let spec = FilterSpec::new(PeriodSpec::Overall, FundingMode::Traditional)
        .with_batch(Some("2024-2025".to_string()));
    let s = summarize(&txs, &spec);

    // Only Ali's challan belongs to the selected batch; Dawood has no
    // academic year at all and is excluded rather than passed through.
    assert_eq!(s.tuition_fees, dec(500));
    // Salaries never carry a batch and pass through the batch filter.
    assert_eq!(s.total_staff_salaries, dec(20000));
}

#[test]
fn identical_inputs_yield_identical_summaries() {
    let snap = parse(json!({
        "students": [{"id": "s1", "name": "Ali", "feesHistory": [
            {"id": "c1", "amount": 500, "status": "paid", "type": "admission", "date": "2024-03-01"}
        ]}],
        "expenses": [{"id": "e1", "date": "2024-03-15", "amount": 200, "category": "Utilities"}]
    }));
    let txs = normalize_snapshot(&snap);
    let spec = FilterSpec::new(PeriodSpec::Yearly(2024), FundingMode::Traditional);
    let first = summarize(&txs, &spec);
    for _ in 0..10 {
        assert_eq!(summarize(&txs, &spec), first);
    }
}

#[test]
fn net_balance_invariant_holds_across_arbitrary_histories() {
    let snap = parse(json!({
        "students": [{"id": "s1", "name": "Ali", "academicYear": "2024-2025", "feesHistory": [
            {"id": "c1", "amount": 500, "status": "paid", "type": "monthly", "date": "2024-05-01"},
            {"id": "c2", "amount": "bogus", "status": "paid", "type": "fine", "date": "2024-05-02"},
            {"id": "c3", "amount": 120, "status": "paid", "type": "special"}
        ]}],
        "staff": [{"id": "t1", "name": "Sara", "salaryHistory": [
            {"id": "p1", "netSalary": 20000, "status": "paid", "paymentDate": "2024-05-10"},
            {"id": "p2", "netSalary": 3000, "status": "advance", "paymentDate": "2024-05-11"}
        ]}],
        "expenses": [{"id": "e1", "date": "2024-05-12", "amount": 900}],
        "canteenIncome": [{"id": "k1", "date": "2024-05-13", "amount": 77}],
        "sponsorshipIncome": [{"id": "sp1", "date": "bad date", "amount": 11}]
    }));
    let txs = normalize_snapshot(&snap);
    let specs = [
        FilterSpec::new(PeriodSpec::Overall, FundingMode::Traditional),
        FilterSpec::new(PeriodSpec::Monthly { year: 2024, month: 5 }, FundingMode::Traditional),
        FilterSpec::new(PeriodSpec::Yearly(2024), FundingMode::Ngo),
    ];
    for spec in specs {
        let s = summarize(&txs, &spec);
        assert_eq!(s.net_balance, s.total_income - s.total_expenses);
        assert_eq!(s.total_expenses, s.total_staff_salaries + s.other_expenses);
    }
}

#[test]
fn expense_ratio_guards_divide_by_zero() {
    let spec = FilterSpec::new(PeriodSpec::Overall, FundingMode::Traditional);
    let empty: Vec<NormalizedTransaction> = Vec::new();
    let s = summarize(&empty, &spec);
    assert_eq!(s.total_income, dec(0));
    assert_eq!(s.expense_ratio(), dec(0));
}
