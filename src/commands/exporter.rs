// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};

use crate::engine::aggregate::{summarize, FilterSpec};
use crate::engine::export::{build_workbook, ledger_csv_row, ReportBreakdown, LEDGER_CSV_HEADERS};
use crate::engine::funding::FundingMode;
use crate::engine::ledger::build_page;
use crate::engine::normalize::normalize_snapshot;
use crate::models::Snapshot;

pub fn handle(snap: &Snapshot, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => export_report(snap, sub),
        Some(("activity", sub)) => export_activity(snap, sub),
        _ => Ok(()),
    }
}

fn export_report(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let funding = FundingMode::resolve(snap.school_info.funding_type.as_deref());
    let spec = FilterSpec::new(super::period_spec(sub)?, funding)
        .with_batch(sub.get_one::<String>("batch").cloned());
    let history = normalize_snapshot(snap);
    let summary = summarize(&history, &spec);
    let breakdown = ReportBreakdown::from_snapshot(snap, &spec);
    let sheets = build_workbook(&summary, &breakdown);

    match fmt.as_str() {
        "csv" => {
            // Sheets are stacked in one file; each starts with its name row.
            let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(out)?;
            for sheet in &sheets {
                wtr.write_record([sheet.name.as_str()])?;
                wtr.write_record(&sheet.headers)?;
                for row in &sheet.rows {
                    wtr.write_record(&row.cells)?;
                }
                wtr.write_record(sheet.totals_row())?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&sheets)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported report ({}) to {}", spec.period.label(), out);
    Ok(())
}

fn export_activity(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();

    let mut query = super::ledger_query(sub)?;
    query.page = 1;
    let history = normalize_snapshot(snap);

    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(LEDGER_CSV_HEADERS)?;
    // Walk every page so the file mirrors the filtered, sorted ledger.
    loop {
        let page = build_page(&history, &query);
        for tx in &page.entries {
            wtr.write_record(ledger_csv_row(tx))?;
        }
        if page.page >= page.total_pages {
            break;
        }
        query.page += 1;
    }
    wtr.flush()?;
    println!("Exported activity ledger to {}", out);
    Ok(())
}
