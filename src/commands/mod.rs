// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod batches;
pub mod exporter;
pub mod ledger;
pub mod summary;

use anyhow::{bail, Context, Result};

use crate::engine::ledger::{Flow, LedgerQuery, LedgerWindow};
use crate::engine::period::PeriodSpec;
use crate::utils::{parse_date, parse_month, parse_year};

fn required<'a>(sub: &'a clap::ArgMatches, name: &str, period: &str) -> Result<&'a String> {
    sub.get_one::<String>(name)
        .with_context(|| format!("--{} is required for --period {}", name, period))
}

pub(crate) fn period_spec(sub: &clap::ArgMatches) -> Result<PeriodSpec> {
    let period = sub
        .get_one::<String>("period")
        .map(|s| s.as_str())
        .unwrap_or("overall");
    let spec = match period {
        "daily" => PeriodSpec::Daily(parse_date(required(sub, "date", "daily")?)?),
        "monthly" => {
            let (year, month) = parse_month(required(sub, "month", "monthly")?)?;
            PeriodSpec::Monthly { year, month }
        }
        "yearly" => PeriodSpec::Yearly(parse_year(required(sub, "year", "yearly")?)?),
        "overall" => PeriodSpec::Overall,
        "custom" => PeriodSpec::Custom {
            start: parse_date(required(sub, "from", "custom")?)?,
            end: parse_date(required(sub, "to", "custom")?)?,
        },
        "quarter" => {
            let quarter = sub
                .get_one::<String>("quarter")
                .map(|s| s.parse().map_err(|e: String| anyhow::anyhow!(e)))
                .transpose()?;
            let year = sub
                .get_one::<String>("year")
                .map(|s| parse_year(s))
                .transpose()?;
            PeriodSpec::Quarter { quarter, year }
        }
        other => bail!(
            "Unknown period '{}' (use daily|monthly|yearly|overall|custom|quarter)",
            other
        ),
    };
    Ok(spec)
}

pub(crate) fn ledger_query(sub: &clap::ArgMatches) -> Result<LedgerQuery> {
    let flow = match sub.get_one::<String>("flow").map(|s| s.as_str()) {
        None | Some("all") => Flow::All,
        Some("in") => Flow::In,
        Some("out") => Flow::Out,
        Some(other) => bail!("Unknown flow '{}' (use all|in|out)", other),
    };
    let window = match sub.get_one::<String>("window").map(|s| s.as_str()) {
        None | Some("all") => LedgerWindow::All,
        Some("daily") => LedgerWindow::Daily(parse_date(required(sub, "date", "daily")?)?),
        Some("monthly") => {
            let (year, month) = parse_month(required(sub, "month", "monthly")?)?;
            LedgerWindow::Monthly { year, month }
        }
        Some("custom") => LedgerWindow::Custom {
            start: parse_date(required(sub, "from", "custom")?)?,
            end: parse_date(required(sub, "to", "custom")?)?,
        },
        Some(other) => bail!("Unknown window '{}' (use all|daily|monthly|custom)", other),
    };
    Ok(LedgerQuery {
        search: sub.get_one::<String>("search").cloned(),
        flow,
        window,
        // Not every caller defines --page (exports walk all pages).
        page: sub
            .try_get_one::<usize>("page")
            .ok()
            .flatten()
            .copied()
            .unwrap_or(1),
    })
}
