// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::engine::aggregate::{summarize, FilterSpec, FinancialSummary};
use crate::engine::funding::FundingMode;
use crate::engine::normalize::normalize_snapshot;
use crate::models::Snapshot;
use crate::utils::{fmt_amount, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let funding = FundingMode::resolve(snap.school_info.funding_type.as_deref());
    let period = super::period_spec(sub)?;
    let canteen = sub
        .get_one::<String>("canteen")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let sponsorship = sub
        .get_one::<String>("sponsorship")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let spec = FilterSpec::new(period, funding)
        .with_batch(sub.get_one::<String>("batch").cloned())
        .with_canteen_draft(canteen)
        .with_sponsorship_draft(sponsorship);

    let history = normalize_snapshot(snap);
    let summary = summarize(&history, &spec);

    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        print_summary(&summary, &spec);
    }
    Ok(())
}

fn print_summary(summary: &FinancialSummary, spec: &FilterSpec) {
    let mut rows: Vec<Vec<String>> = Vec::new();
    if spec.funding.is_traditional() {
        rows.push(line("Tuition fees", &summary.tuition_fees));
        rows.push(line("Admission fees", &summary.admission_fees));
        rows.push(line("Fines", &summary.fine_amount));
        rows.push(line("Other fees (incl. fines)", &summary.other_fees));
    } else {
        rows.push(line("Subsidies received", &summary.total_subsidies_received));
    }
    rows.push(line("Canteen income", &summary.total_canteen_income));
    rows.push(line("Sponsorship income", &summary.total_sponsorship_income));
    rows.push(line("Total income", &summary.total_income));
    rows.push(line("Staff salaries", &summary.total_staff_salaries));
    rows.push(line("Other expenses", &summary.other_expenses));
    rows.push(line("Total expenses", &summary.total_expenses));
    rows.push(line("Net balance", &summary.net_balance));

    println!(
        "Financial summary ({}, {} funding)",
        spec.period.label(),
        spec.funding.label()
    );
    if let Some(batch) = &spec.batch {
        println!("Batch: {}", batch);
    }
    println!("{}", pretty_table(&["Item", "Amount"], rows));
}

fn line(label: &str, amount: &rust_decimal::Decimal) -> Vec<String> {
    vec![label.to_string(), fmt_amount(amount)]
}
