// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::engine::aggregate::{FilterSpec, FinancialSummary};
use crate::engine::normalize::NormalizedTransaction;
use crate::models::{SalaryStatus, Snapshot};
use crate::utils::{fmt_amount, parse_when, parse_when_value};

pub const LEDGER_CSV_HEADERS: [&str; 5] = ["type", "description", "category", "date", "amount"];

/// One data row of a report sheet: display cells plus the signed amount the
/// sheet's totals row reconciles against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetRow {
    pub cells: Vec<String>,
    pub amount: Decimal,
}

impl SheetRow {
    pub fn new(cells: Vec<String>, amount: Decimal) -> Self {
        Self { cells, amount }
    }
}

/// A named sheet of the report workbook. `total` always equals the sum of
/// the row amounts; `totals_row` renders it in the sheet's column layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
    pub total: Decimal,
}

impl Sheet {
    pub fn new(name: &str, headers: &[&str], rows: Vec<SheetRow>) -> Self {
        let total = rows.iter().map(|r| r.amount).sum();
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
            total,
        }
    }

    pub fn totals_row(&self) -> Vec<String> {
        let mut row = vec!["Total".to_string()];
        while row.len() < self.headers.len().saturating_sub(1) {
            row.push(String::new());
        }
        row.push(fmt_amount(&self.total));
        row
    }
}

/// Per-category row lists for one period, assembled from the snapshot by the
/// caller and handed to the exporter alongside the summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportBreakdown {
    pub expenses_by_category: Vec<(String, Decimal)>,
    pub staff_salaries: Vec<(String, String, Decimal)>,
    pub canteen_entries: Vec<(String, String, Decimal)>,
    pub sponsorship_entries: Vec<(String, String, Decimal)>,
}

impl ReportBreakdown {
    pub fn from_snapshot(snap: &Snapshot, spec: &FilterSpec) -> Self {
        let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
        for exp in &snap.expenses {
            if !spec.period.matches(parse_when(exp.date.as_deref())) {
                continue;
            }
            let key = match exp.category.as_deref() {
                Some(c) if !c.trim().is_empty() => c.trim().to_string(),
                _ => "Unspecified".to_string(),
            };
            *by_category.entry(key).or_insert(Decimal::ZERO) += exp.amount;
        }

        let mut staff_salaries = Vec::new();
        for member in &snap.staff {
            for rec in &member.salary_history {
                if rec.status != SalaryStatus::Paid {
                    continue;
                }
                let date = parse_when_value(rec.payment_timestamp.as_ref())
                    .or_else(|| parse_when(rec.payment_date.as_deref()));
                if !spec.period.matches(date) {
                    continue;
                }
                staff_salaries.push((
                    member.name.clone(),
                    rec.month.clone().unwrap_or_default(),
                    rec.net_salary,
                ));
            }
        }

        let mut canteen_entries = Vec::new();
        for entry in &snap.canteen_income {
            let date = parse_when(entry.date.as_deref());
            if !spec.period.matches(date) {
                continue;
            }
            canteen_entries.push((
                entry.date.clone().unwrap_or_default(),
                entry.description.clone().unwrap_or_default(),
                entry.amount,
            ));
        }

        let mut sponsorship_entries = Vec::new();
        for entry in &snap.sponsorship_income {
            let date = parse_when(entry.date.as_deref());
            if !spec.period.matches(date) {
                continue;
            }
            let label = match entry.sponsor.as_deref() {
                Some(s) if !s.is_empty() => {
                    format!("{} [{}]", entry.description.clone().unwrap_or_default(), s)
                }
                _ => entry.description.clone().unwrap_or_default(),
            };
            sponsorship_entries.push((
                entry.date.clone().unwrap_or_default(),
                label,
                entry.amount,
            ));
        }

        Self {
            expenses_by_category: by_category.into_iter().collect(),
            staff_salaries,
            canteen_entries,
            sponsorship_entries,
        }
    }
}

/// Ordered workbook of named sheets. The Summary sheet carries signed
/// component amounts (expenses negative), so its total reconciles to the
/// period's net balance; every other sheet totals its own rows.
pub fn build_workbook(summary: &FinancialSummary, breakdown: &ReportBreakdown) -> Vec<Sheet> {
    let mut sheets = Vec::new();

    let summary_lines: [(&str, Decimal); 8] = [
        ("Tuition fees", summary.tuition_fees),
        ("Admission fees", summary.admission_fees),
        ("Other fees (incl. fines)", summary.other_fees),
        ("Subsidies received", summary.total_subsidies_received),
        ("Canteen income", summary.total_canteen_income),
        ("Sponsorship income", summary.total_sponsorship_income),
        ("Staff salaries", -summary.total_staff_salaries),
        ("Other expenses", -summary.other_expenses),
    ];
    let rows = summary_lines
        .iter()
        .map(|(label, amount)| {
            SheetRow::new(vec![label.to_string(), fmt_amount(amount)], *amount)
        })
        .collect();
    sheets.push(Sheet::new("Summary", &["Item", "Amount"], rows));

    let rows = breakdown
        .expenses_by_category
        .iter()
        .map(|(cat, amount)| SheetRow::new(vec![cat.clone(), fmt_amount(amount)], *amount))
        .collect();
    sheets.push(Sheet::new(
        "Expenses by Category",
        &["Category", "Amount"],
        rows,
    ));

    let rows = breakdown
        .staff_salaries
        .iter()
        .map(|(name, month, amount)| {
            SheetRow::new(
                vec![name.clone(), month.clone(), fmt_amount(amount)],
                *amount,
            )
        })
        .collect();
    sheets.push(Sheet::new(
        "Staff Salaries",
        &["Staff", "Month", "Amount"],
        rows,
    ));

    let rows = breakdown
        .canteen_entries
        .iter()
        .map(|(date, desc, amount)| {
            SheetRow::new(
                vec![date.clone(), desc.clone(), fmt_amount(amount)],
                *amount,
            )
        })
        .collect();
    sheets.push(Sheet::new(
        "Canteen Income",
        &["Date", "Description", "Amount"],
        rows,
    ));

    let rows = breakdown
        .sponsorship_entries
        .iter()
        .map(|(date, desc, amount)| {
            SheetRow::new(
                vec![date.clone(), desc.clone(), fmt_amount(amount)],
                *amount,
            )
        })
        .collect();
    sheets.push(Sheet::new(
        "Sponsorship Income",
        &["Date", "Description", "Amount"],
        rows,
    ));

    sheets
}

/// Flat CSV projection of one ledger entry: type, description, category,
/// ISO-8601 date (empty when unparsable), signed amount.
pub fn ledger_csv_row(tx: &NormalizedTransaction) -> Vec<String> {
    vec![
        tx.kind.label().to_string(),
        tx.description.clone(),
        tx.category.label().to_string(),
        tx.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        tx.amount.to_string(),
    ]
}
