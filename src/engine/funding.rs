// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

/// How the school is funded. Traditional schools earn fee income from
/// challans; NGO schools earn subsidy income. Staff salaries, other expenses,
/// canteen income, and sponsorship income apply to both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FundingMode {
    #[default]
    Traditional,
    Ngo,
}

impl FundingMode {
    /// Lenient resolution from the schoolInfo config value; anything that is
    /// not recognisably "ngo" falls back to Traditional.
    pub fn resolve(funding_type: Option<&str>) -> FundingMode {
        match funding_type.map(|s| s.trim().to_lowercase()) {
            Some(s) if s == "ngo" => FundingMode::Ngo,
            _ => FundingMode::Traditional,
        }
    }

    pub fn is_traditional(&self) -> bool {
        matches!(self, FundingMode::Traditional)
    }

    pub fn is_ngo(&self) -> bool {
        matches!(self, FundingMode::Ngo)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FundingMode::Traditional => "Traditional",
            FundingMode::Ngo => "NGO",
        }
    }
}
