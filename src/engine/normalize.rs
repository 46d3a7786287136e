// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{ChallanStatus, ChallanType, SalaryStatus, Snapshot, SubsidyStatus};
use crate::utils::{parse_when, parse_when_value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TxKind {
    FeeCollection(ChallanType),
    SalaryPayment,
    AdvancePayment,
    SubsidyReceived,
    Expense,
    CanteenIncome,
    SponsorshipIncome,
    StudentAdmission,
    StaffJoin,
}

impl TxKind {
    pub fn label(&self) -> &'static str {
        match self {
            TxKind::FeeCollection(_) => "Fee Collection",
            TxKind::SalaryPayment => "Salary Payment",
            TxKind::AdvancePayment => "Advance Payment",
            TxKind::SubsidyReceived => "Subsidy Received",
            TxKind::Expense => "Expense",
            TxKind::CanteenIncome => "Canteen Income",
            TxKind::SponsorshipIncome => "Sponsorship Income",
            TxKind::StudentAdmission => "Student Admission",
            TxKind::StaffJoin => "Staff Join",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TxCategory {
    /// Fee collections are categorised by their challan type.
    Fee(ChallanType),
    Income,
    Expense,
    Students,
    Staff,
}

impl TxCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TxCategory::Fee(t) => t.label(),
            TxCategory::Income => "Income",
            TxCategory::Expense => "Expense",
            TxCategory::Students => "Students",
            TxCategory::Staff => "Staff",
        }
    }
}

/// One normalized activity entry. Amounts are signed: income positive,
/// expense negative; visibility markers carry zero and never touch totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTransaction {
    pub id: String,
    pub kind: TxKind,
    pub category: TxCategory,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub batch: Option<String>,
}

fn tx_id(prefix: &str, raw: &str, ordinal: usize) -> String {
    if raw.is_empty() {
        format!("{}-{}", prefix, ordinal)
    } else {
        format!("{}-{}", prefix, raw)
    }
}

/// Map every snapshot entity into zero or more normalized transactions.
/// Total over any well-typed snapshot: malformed amounts arrive as zero from
/// the model layer and malformed dates become None here.
pub fn normalize_snapshot(snap: &Snapshot) -> Vec<NormalizedTransaction> {
    let mut out = Vec::new();

    for (si, student) in snap.students.iter().enumerate() {
        let batch = student.academic_year.clone();
        for (ci, challan) in student.fees_history.iter().enumerate() {
            if challan.status != ChallanStatus::Paid {
                continue;
            }
            let date = parse_when_value(challan.payment_timestamp.as_ref())
                .or_else(|| parse_when(challan.date.as_deref()));
            let month = challan.month.as_deref().unwrap_or("");
            // Monthly challans read as tuition in every user-facing surface.
            let prefix = match challan.fee_type {
                ChallanType::Monthly => "Tuition",
                other => other.label(),
            };
            let description = if month.is_empty() {
                format!("{} fee - {}", prefix, student.name)
            } else {
                format!("{} fee - {} ({})", prefix, student.name, month)
            };
            out.push(NormalizedTransaction {
                id: tx_id("challan", &challan.id, si * 1000 + ci),
                kind: TxKind::FeeCollection(challan.fee_type),
                category: TxCategory::Fee(challan.fee_type),
                amount: challan.amount,
                date,
                description,
                batch: batch.clone(),
            });
        }
        // Zero-amount admission marker: ledger visibility only.
        out.push(NormalizedTransaction {
            id: tx_id("student", &student.id, si),
            kind: TxKind::StudentAdmission,
            category: TxCategory::Students,
            amount: Decimal::ZERO,
            date: parse_when_value(student.admission_timestamp.as_ref())
                .or_else(|| parse_when(student.date_of_admission.as_deref())),
            description: format!("New student admission - {}", student.name),
            batch,
        });
    }

    for (mi, member) in snap.staff.iter().enumerate() {
        for (ri, rec) in member.salary_history.iter().enumerate() {
            let date = parse_when_value(rec.payment_timestamp.as_ref())
                .or_else(|| parse_when(rec.payment_date.as_deref()));
            let month = rec.month.as_deref().unwrap_or("");
            match rec.status {
                SalaryStatus::Paid => {
                    let description = if month.is_empty() {
                        format!("Salary - {}", member.name)
                    } else {
                        format!("Salary - {} ({})", member.name, month)
                    };
                    out.push(NormalizedTransaction {
                        id: tx_id("salary", &rec.id, mi * 1000 + ri),
                        kind: TxKind::SalaryPayment,
                        category: TxCategory::Expense,
                        amount: -rec.net_salary,
                        date,
                        description,
                        batch: None,
                    });
                }
                SalaryStatus::Advance => {
                    let description = match rec.reason.as_deref() {
                        Some(r) if !r.is_empty() => {
                            format!("Salary advance - {} ({})", member.name, r)
                        }
                        _ => format!("Salary advance - {}", member.name),
                    };
                    out.push(NormalizedTransaction {
                        id: tx_id("advance", &rec.id, mi * 1000 + ri),
                        kind: TxKind::AdvancePayment,
                        category: TxCategory::Expense,
                        amount: -rec.net_salary.abs(),
                        date,
                        description,
                        batch: None,
                    });
                }
                // Unknown status: ledger-visible at zero, never counted.
                SalaryStatus::Unspecified => {
                    out.push(NormalizedTransaction {
                        id: tx_id("salary", &rec.id, mi * 1000 + ri),
                        kind: TxKind::SalaryPayment,
                        category: TxCategory::Expense,
                        amount: Decimal::ZERO,
                        date,
                        description: format!("Salary (unrecorded status) - {}", member.name),
                        batch: None,
                    });
                }
            }
        }
        // Zero-amount join marker: ledger visibility only.
        out.push(NormalizedTransaction {
            id: tx_id("staff", &member.id, mi),
            kind: TxKind::StaffJoin,
            category: TxCategory::Staff,
            amount: Decimal::ZERO,
            date: parse_when_value(member.added_timestamp.as_ref())
                .or_else(|| parse_when(member.date_of_joining.as_deref())),
            description: format!("Staff joined - {}", member.name),
            batch: None,
        });
    }

    for (i, sub) in snap.subsidies.iter().enumerate() {
        if sub.status != SubsidyStatus::Received {
            continue;
        }
        let description = match sub.description.as_deref() {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => match (sub.quarter, sub.year) {
                (Some(q), Some(y)) => format!("Subsidy {} {}", q.label(), y),
                (Some(q), None) => format!("Subsidy {}", q.label()),
                _ => "Subsidy".to_string(),
            },
        };
        out.push(NormalizedTransaction {
            id: tx_id("subsidy", &sub.id, i),
            kind: TxKind::SubsidyReceived,
            category: TxCategory::Income,
            amount: sub.amount,
            date: parse_when(sub.received_date.as_deref()),
            description,
            batch: None,
        });
    }

    for (i, exp) in snap.expenses.iter().enumerate() {
        let category = exp.category.as_deref().unwrap_or("");
        let description = match exp.description.as_deref() {
            Some(d) if !d.is_empty() && !category.is_empty() => format!("{} ({})", d, category),
            Some(d) if !d.is_empty() => d.to_string(),
            _ if !category.is_empty() => category.to_string(),
            _ => "Expense".to_string(),
        };
        out.push(NormalizedTransaction {
            id: tx_id("expense", &exp.id, i),
            kind: TxKind::Expense,
            category: TxCategory::Expense,
            amount: -exp.amount,
            date: parse_when(exp.date.as_deref()),
            description,
            batch: None,
        });
    }

    for (i, entry) in snap.canteen_income.iter().enumerate() {
        let description = match entry.description.as_deref() {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => "Canteen income".to_string(),
        };
        out.push(NormalizedTransaction {
            id: tx_id("canteen", &entry.id, i),
            kind: TxKind::CanteenIncome,
            category: TxCategory::Income,
            amount: entry.amount,
            date: parse_when(entry.date.as_deref()),
            description,
            batch: None,
        });
    }

    for (i, entry) in snap.sponsorship_income.iter().enumerate() {
        let base = match entry.description.as_deref() {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => "Sponsorship income".to_string(),
        };
        let description = match entry.sponsor.as_deref() {
            Some(s) if !s.is_empty() => format!("{} [{}]", base, s),
            _ => base,
        };
        out.push(NormalizedTransaction {
            id: tx_id("sponsorship", &entry.id, i),
            kind: TxKind::SponsorshipIncome,
            category: TxCategory::Income,
            amount: entry.amount,
            date: parse_when(entry.date.as_deref()),
            description,
            batch: None,
        });
    }

    out
}
