// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::engine::ledger::build_page;
use crate::engine::normalize::normalize_snapshot;
use crate::models::Snapshot;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};

pub fn handle(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let query = super::ledger_query(sub)?;
    let history = normalize_snapshot(snap);
    let page = build_page(&history, &query);

    if !maybe_print_json(json_flag, jsonl_flag, &page)? {
        let rows: Vec<Vec<String>> = page
            .entries
            .iter()
            .map(|tx| {
                vec![
                    tx.date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    tx.kind.label().to_string(),
                    tx.description.clone(),
                    tx.category.label().to_string(),
                    fmt_amount(&tx.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Description", "Category", "Amount"], rows)
        );
        println!(
            "Page {} of {} ({} entries) | in {} / out {} / net {}",
            page.page,
            page.total_pages,
            page.total_count,
            fmt_amount(&page.totals.income),
            fmt_amount(&page.totals.expense),
            fmt_amount(&page.totals.net),
        );
    }
    Ok(())
}
