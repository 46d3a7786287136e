// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::Quarter;

/// Reporting period selection. `Quarter` with both fields absent behaves like
/// `Overall`; it exists because the NGO subsidy view filters by quarter and
/// year independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PeriodSpec {
    Daily(NaiveDate),
    Monthly { year: i32, month: u32 },
    Yearly(i32),
    Overall,
    Custom { start: NaiveDate, end: NaiveDate },
    Quarter { quarter: Option<Quarter>, year: Option<i32> },
}

/// Date predicate plus human-readable label for one reporting period.
/// A record whose date failed to parse never matches a bounded period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodFilter {
    spec: PeriodSpec,
}

impl PeriodFilter {
    pub fn new(spec: PeriodSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &PeriodSpec {
        &self.spec
    }

    pub fn is_overall(&self) -> bool {
        matches!(self.spec, PeriodSpec::Overall)
    }

    pub fn matches(&self, date: Option<NaiveDate>) -> bool {
        match self.spec {
            PeriodSpec::Overall => true,
            PeriodSpec::Quarter { quarter: None, year: None } => true,
            _ => {
                let Some(d) = date else {
                    return false;
                };
                match self.spec {
                    PeriodSpec::Daily(day) => d == day,
                    PeriodSpec::Monthly { year, month } => d.year() == year && d.month() == month,
                    PeriodSpec::Yearly(year) => d.year() == year,
                    PeriodSpec::Custom { start, end } => start <= d && d <= end,
                    PeriodSpec::Quarter { quarter, year } => {
                        let q_ok = quarter.map(|q| q.contains(d)).unwrap_or(true);
                        let y_ok = year.map(|y| d.year() == y).unwrap_or(true);
                        q_ok && y_ok
                    }
                    PeriodSpec::Overall => true,
                }
            }
        }
    }

    pub fn label(&self) -> String {
        match self.spec {
            PeriodSpec::Daily(day) => day.format("%Y-%m-%d").to_string(),
            PeriodSpec::Monthly { year, month } => {
                let d = NaiveDate::from_ymd_opt(year, month, 1);
                match d {
                    Some(d) => d.format("%B %Y").to_string(),
                    None => format!("{}-{:02}", year, month),
                }
            }
            PeriodSpec::Yearly(year) => year.to_string(),
            PeriodSpec::Overall => "All time".to_string(),
            PeriodSpec::Custom { start, end } => format!(
                "{} to {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
            PeriodSpec::Quarter { quarter, year } => match (quarter, year) {
                (Some(q), Some(y)) => format!("{} {}", q.label(), y),
                (Some(q), None) => format!("{} (all years)", q.label()),
                (None, Some(y)) => format!("All quarters {}", y),
                (None, None) => "All time".to_string(),
            },
        }
    }
}
