// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::funding::FundingMode;
use crate::engine::normalize::{NormalizedTransaction, TxCategory, TxKind};
use crate::engine::period::{PeriodFilter, PeriodSpec};
use crate::models::ChallanType;
use crate::utils::ratio_or_zero;

/// Immutable filter selection for one summary computation. Both the
/// dashboard and the report views pass one of these; there is no ambient
/// filter state anywhere in the engine.
#[derive(Debug, Clone, Serialize)]
pub struct FilterSpec {
    pub period: PeriodFilter,
    pub funding: FundingMode,
    /// Restricts fee collections and student markers to one academic year;
    /// students without one are excluded. Other categories never carry a
    /// batch and pass through untouched.
    pub batch: Option<String>,
    /// Fee-collection totals count every paid challan even when its date is
    /// missing or outside the period. Auto-enabled for `Overall`.
    pub include_all_paid_regardless_of_date: bool,
    /// Unsaved draft value for the current period, overrides the summed total.
    pub canteen_draft: Option<Decimal>,
    pub sponsorship_draft: Option<Decimal>,
}

impl FilterSpec {
    pub fn new(spec: PeriodSpec, funding: FundingMode) -> Self {
        let overall = matches!(spec, PeriodSpec::Overall);
        Self {
            period: PeriodFilter::new(spec),
            funding,
            batch: None,
            include_all_paid_regardless_of_date: overall,
            canteen_draft: None,
            sponsorship_draft: None,
        }
    }

    pub fn with_batch(mut self, batch: Option<String>) -> Self {
        self.batch = batch;
        self
    }

    pub fn with_canteen_draft(mut self, draft: Option<Decimal>) -> Self {
        self.canteen_draft = draft;
        self
    }

    pub fn with_sponsorship_draft(mut self, draft: Option<Decimal>) -> Self {
        self.sponsorship_draft = draft;
        self
    }

    fn batch_matches(&self, tx: &NormalizedTransaction) -> bool {
        let Some(want) = self.batch.as_deref() else {
            return true;
        };
        match tx.category {
            TxCategory::Fee(_) | TxCategory::Students => tx.batch.as_deref() == Some(want),
            _ => true,
        }
    }
}

/// Category-level totals for one reporting period. Fee figures are zero in
/// NGO mode, subsidy figures are zero in traditional mode, so `total_income`
/// is always the plain sum of the income fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct FinancialSummary {
    pub tuition_fees: Decimal,
    pub admission_fees: Decimal,
    pub fine_amount: Decimal,
    pub other_fees: Decimal,
    pub total_subsidies_received: Decimal,
    pub total_canteen_income: Decimal,
    pub total_sponsorship_income: Decimal,
    pub total_staff_salaries: Decimal,
    pub other_expenses: Decimal,
    pub total_expenses: Decimal,
    pub total_income: Decimal,
    pub net_balance: Decimal,
}

impl FinancialSummary {
    /// Share of income consumed by expenses; zero when there is no income.
    pub fn expense_ratio(&self) -> Decimal {
        ratio_or_zero(self.total_expenses, self.total_income)
    }
}

/// Pure fold over normalized transactions. Identical inputs always produce
/// an identical summary; nothing is cached and nothing is mutated.
pub fn summarize(txs: &[NormalizedTransaction], spec: &FilterSpec) -> FinancialSummary {
    let mut s = FinancialSummary::default();
    let mut misc_fees = Decimal::ZERO;

    for tx in txs {
        if !spec.batch_matches(tx) {
            continue;
        }
        let in_period = spec.period.matches(tx.date);
        match tx.kind {
            TxKind::FeeCollection(fee_type) => {
                if !spec.funding.is_traditional() {
                    continue;
                }
                if !in_period && !spec.include_all_paid_regardless_of_date {
                    continue;
                }
                match fee_type {
                    ChallanType::Monthly => s.tuition_fees += tx.amount,
                    ChallanType::Admission => s.admission_fees += tx.amount,
                    ChallanType::Fine => s.fine_amount += tx.amount,
                    ChallanType::Other | ChallanType::Unspecified => misc_fees += tx.amount,
                }
            }
            TxKind::SalaryPayment => {
                if in_period {
                    s.total_staff_salaries += tx.amount.abs();
                }
            }
            // Advances are ledger-visible only; excluded from salary totals.
            TxKind::AdvancePayment => {}
            TxKind::SubsidyReceived => {
                if spec.funding.is_ngo() && in_period {
                    s.total_subsidies_received += tx.amount;
                }
            }
            TxKind::Expense => {
                if in_period {
                    s.other_expenses += tx.amount.abs();
                }
            }
            TxKind::CanteenIncome => {
                if in_period {
                    s.total_canteen_income += tx.amount;
                }
            }
            TxKind::SponsorshipIncome => {
                if in_period {
                    s.total_sponsorship_income += tx.amount;
                }
            }
            TxKind::StudentAdmission | TxKind::StaffJoin => {}
        }
    }

    s.other_fees = s.fine_amount + misc_fees;
    if let Some(draft) = spec.canteen_draft {
        s.total_canteen_income = draft;
    }
    if let Some(draft) = spec.sponsorship_draft {
        s.total_sponsorship_income = draft;
    }
    s.total_expenses = s.total_staff_salaries + s.other_expenses;
    s.total_income = s.tuition_fees
        + s.admission_fees
        + s.other_fees
        + s.total_sponsorship_income
        + s.total_canteen_income
        + s.total_subsidies_received;
    s.net_balance = s.total_income - s.total_expenses;
    s
}
