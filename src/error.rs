// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors raised while loading the data-store snapshot. The engine itself is
/// total over a well-typed snapshot; a structurally invalid hand-off is a
/// caller contract violation and is reported immediately, never patched.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot input: {0}")]
    InvalidInput(String),

    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}
