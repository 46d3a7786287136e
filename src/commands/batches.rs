// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::Snapshot;
use crate::utils::{maybe_print_json, pretty_table};

#[derive(Serialize)]
pub struct BatchRow {
    pub batch: String,
    pub students: usize,
    pub classes: usize,
}

pub fn handle(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let data = enumerate(snap);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.batch.clone(),
                    b.students.to_string(),
                    b.classes.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Batch", "Students", "Classes"], rows));
    }
    Ok(())
}

/// Distinct academic years across students and classes, sorted.
pub fn enumerate(snap: &Snapshot) -> Vec<BatchRow> {
    let mut map: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for student in &snap.students {
        if let Some(year) = student.academic_year.as_deref() {
            if !year.trim().is_empty() {
                map.entry(year.trim().to_string()).or_default().0 += 1;
            }
        }
    }
    for class in &snap.classes {
        if let Some(year) = class.academic_year.as_deref() {
            if !year.trim().is_empty() {
                map.entry(year.trim().to_string()).or_default().1 += 1;
            }
        }
    }
    map.into_iter()
        .map(|(batch, (students, classes))| BatchRow {
            batch,
            students,
            classes,
        })
        .collect()
}
