// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

use crate::engine::normalize::{NormalizedTransaction, TxCategory};
use crate::engine::period::{PeriodFilter, PeriodSpec};

pub const PAGE_SIZE: usize = 10;

/// Direction filter for the activity ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    #[default]
    All,
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum LedgerWindow {
    #[default]
    All,
    Daily(NaiveDate),
    Monthly {
        year: i32,
        month: u32,
    },
    Custom {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl LedgerWindow {
    fn period(&self) -> PeriodFilter {
        let spec = match *self {
            LedgerWindow::All => PeriodSpec::Overall,
            LedgerWindow::Daily(d) => PeriodSpec::Daily(d),
            LedgerWindow::Monthly { year, month } => PeriodSpec::Monthly { year, month },
            LedgerWindow::Custom { start, end } => PeriodSpec::Custom { start, end },
        };
        PeriodFilter::new(spec)
    }
}

/// Immutable ledger filter criteria. Pages are 1-based.
#[derive(Debug, Clone, Serialize, Default)]
pub struct LedgerQuery {
    pub search: Option<String>,
    pub flow: Flow,
    pub window: LedgerWindow,
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct LedgerTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerPage {
    pub entries: Vec<NormalizedTransaction>,
    pub page: usize,
    pub total_count: usize,
    pub total_pages: usize,
    /// Running totals over the filtered, unpaginated result set, using
    /// absolute values per side.
    pub totals: LedgerTotals,
}

fn flow_matches(flow: Flow, tx: &NormalizedTransaction) -> bool {
    match flow {
        Flow::All => true,
        // Money in, plus the zero-amount admission markers.
        Flow::In => {
            (tx.category == TxCategory::Income && tx.amount > Decimal::ZERO)
                || tx.category == TxCategory::Students
        }
        // Money out; negative fee entries are reserved but handled symmetrically.
        Flow::Out => {
            tx.amount < Decimal::ZERO
                && (tx.category == TxCategory::Expense
                    || matches!(tx.category, TxCategory::Fee(_)))
        }
    }
}

fn search_matches(needle: &str, tx: &NormalizedTransaction) -> bool {
    let needle = needle.to_lowercase();
    tx.description.to_lowercase().contains(&needle)
        || tx.kind.label().to_lowercase().contains(&needle)
        || tx.category.label().to_lowercase().contains(&needle)
}

fn date_desc(a: &NormalizedTransaction, b: &NormalizedTransaction) -> Ordering {
    match (a.date, b.date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filter, sort, and paginate the full normalized history. Concatenating all
/// pages of the same query yields the filtered, sorted list exactly once.
pub fn build_page(history: &[NormalizedTransaction], query: &LedgerQuery) -> LedgerPage {
    let mut filtered: Vec<NormalizedTransaction> = history
        .iter()
        .filter(|tx| flow_matches(query.flow, tx))
        .filter(|tx| query.window.period().matches(tx.date))
        .filter(|tx| match query.search.as_deref() {
            Some(s) if !s.trim().is_empty() => search_matches(s.trim(), tx),
            _ => true,
        })
        .cloned()
        .collect();

    // Stable sort keeps tie order deterministic across calls.
    filtered.sort_by(date_desc);

    let mut totals = LedgerTotals::default();
    for tx in &filtered {
        if tx.amount > Decimal::ZERO {
            totals.income += tx.amount.abs();
        } else if tx.amount < Decimal::ZERO {
            totals.expense += tx.amount.abs();
        }
    }
    totals.net = totals.income - totals.expense;

    let total_count = filtered.len();
    let total_pages = total_count.div_ceil(PAGE_SIZE);
    let page = query.page.max(1);
    let entries = filtered
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    LedgerPage {
        entries,
        page,
        total_count,
        total_pages,
        totals,
    }
}
