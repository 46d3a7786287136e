// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SnapshotError;
use crate::models::Snapshot;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("org.campusledger", "Campusledger", "campusledger"));

const COLLECTIONS: &[&str] = &[
    "students",
    "staff",
    "expenses",
    "subsidies",
    "canteenIncome",
    "sponsorshipIncome",
    "classes",
];

/// Default location for the data-store hand-off when --snapshot is not given.
pub fn default_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("snapshot.json"))
}

pub fn load(path: &Path) -> Result<Snapshot, SnapshotError> {
    let raw = fs::read_to_string(path)?;
    parse(&raw)
}

/// Parse and structurally validate a snapshot. A non-object root or a
/// collection key bound to a non-array is a caller contract violation and is
/// rejected up front; absent collections default to empty.
pub fn parse(raw: &str) -> Result<Snapshot, SnapshotError> {
    let value: Value = serde_json::from_str(raw)?;
    let obj = value
        .as_object()
        .ok_or_else(|| SnapshotError::InvalidInput("snapshot root must be a JSON object".into()))?;
    for key in COLLECTIONS {
        if let Some(v) = obj.get(*key) {
            if !v.is_array() {
                return Err(SnapshotError::InvalidInput(format!(
                    "'{}' must be an array",
                    key
                )));
            }
        }
    }
    if let Some(info) = obj.get("schoolInfo") {
        if !info.is_object() {
            return Err(SnapshotError::InvalidInput(
                "'schoolInfo' must be an object".into(),
            ));
        }
    }
    Ok(serde_json::from_value(value)?)
}
