// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Lenient field readers for the duck-typed snapshot hand-off. The upstream
/// CRUD flows never guaranteed field types, so amounts and ids arrive as
/// numbers, strings, or nothing at all.
pub(crate) mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(crate) fn coerce_amount(v: Option<&Value>) -> Decimal {
        match v {
            Some(Value::Number(n)) => n
                .as_f64()
                .and_then(|f| Decimal::try_from(f).ok())
                .unwrap_or(Decimal::ZERO),
            Some(Value::String(s)) => s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO),
            _ => Decimal::ZERO,
        }
    }

    pub(crate) fn amount<'de, D: Deserializer<'de>>(de: D) -> Result<Decimal, D::Error> {
        let v = Option::<Value>::deserialize(de)?;
        Ok(coerce_amount(v.as_ref()))
    }

    pub(crate) fn string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
        let v = Option::<Value>::deserialize(de)?;
        Ok(match v {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        })
    }

    pub(crate) fn quarter<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<super::Quarter>, D::Error> {
        let v = Option::<Value>::deserialize(de)?;
        Ok(match v {
            Some(Value::String(s)) => s.parse().ok(),
            Some(Value::Number(n)) => n.as_i64().and_then(|i| i.to_string().parse().ok()),
            _ => None,
        })
    }

    pub(crate) fn year<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i32>, D::Error> {
        let v = Option::<Value>::deserialize(de)?;
        Ok(match v {
            Some(Value::Number(n)) => n.as_i64().and_then(|i| i32::try_from(i).ok()),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }

    fn tag(v: Option<Value>) -> String {
        match v {
            Some(Value::String(s)) => s.trim().to_lowercase(),
            _ => String::new(),
        }
    }

    pub(crate) fn challan_status<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<super::ChallanStatus, D::Error> {
        let v = Option::<Value>::deserialize(de)?;
        Ok(match tag(v).as_str() {
            "paid" => super::ChallanStatus::Paid,
            _ => super::ChallanStatus::Pending,
        })
    }

    pub(crate) fn challan_type<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<super::ChallanType, D::Error> {
        let v = Option::<Value>::deserialize(de)?;
        Ok(match tag(v).as_str() {
            "admission" => super::ChallanType::Admission,
            "monthly" => super::ChallanType::Monthly,
            "fine" => super::ChallanType::Fine,
            "other" => super::ChallanType::Other,
            _ => super::ChallanType::Unspecified,
        })
    }

    pub(crate) fn salary_status<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<super::SalaryStatus, D::Error> {
        let v = Option::<Value>::deserialize(de)?;
        Ok(match tag(v).as_str() {
            "paid" => super::SalaryStatus::Paid,
            "advance" => super::SalaryStatus::Advance,
            _ => super::SalaryStatus::Unspecified,
        })
    }

    pub(crate) fn subsidy_status<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<super::SubsidyStatus, D::Error> {
        let v = Option::<Value>::deserialize(de)?;
        Ok(match tag(v).as_str() {
            "received" => super::SubsidyStatus::Received,
            _ => super::SubsidyStatus::Planned,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChallanStatus {
    Paid,
    #[default]
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChallanType {
    Admission,
    Monthly,
    Fine,
    Other,
    // Unknown or absent fee types land here instead of corrupting totals.
    #[default]
    Unspecified,
}

impl ChallanType {
    pub fn label(&self) -> &'static str {
        match self {
            ChallanType::Admission => "Admission",
            ChallanType::Monthly => "Monthly",
            ChallanType::Fine => "Fine",
            ChallanType::Other => "Other",
            ChallanType::Unspecified => "Unspecified",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SalaryStatus {
    Paid,
    Advance,
    #[default]
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubsidyStatus {
    Received,
    #[default]
    Planned,
}

/// Calendar quarters with fixed boundaries: Q1=Jan-Mar ... Q4=Oct-Dec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub fn of(date: NaiveDate) -> Quarter {
        match date.month() {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Quarter::of(date) == *self
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "Q1" | "1" => Ok(Quarter::Q1),
            "Q2" | "2" => Ok(Quarter::Q2),
            "Q3" | "3" => Ok(Quarter::Q3),
            "Q4" | "4" => Ok(Quarter::Q4),
            other => Err(format!("Invalid quarter '{}', expected Q1..Q4", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeChallan {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub month: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: Decimal,
    #[serde(deserialize_with = "lenient::challan_status")]
    pub status: ChallanStatus,
    #[serde(rename = "type", deserialize_with = "lenient::challan_type")]
    pub fee_type: ChallanType,
    pub date: Option<String>,
    pub due_date: Option<String>,
    pub academic_year: Option<String>,
    pub payment_timestamp: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Student {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    pub academic_year: Option<String>,
    pub date_of_admission: Option<String>,
    pub admission_timestamp: Option<Value>,
    pub fees_history: Vec<FeeChallan>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub month: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub net_salary: Decimal,
    #[serde(deserialize_with = "lenient::salary_status")]
    pub status: SalaryStatus,
    pub payment_date: Option<String>,
    pub payment_timestamp: Option<Value>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffMember {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    pub role: Option<String>,
    pub date_of_joining: Option<String>,
    pub added_timestamp: Option<Value>,
    pub salary_history: Vec<SalaryRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Subsidy {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::quarter")]
    pub quarter: Option<Quarter>,
    #[serde(deserialize_with = "lenient::year")]
    pub year: Option<i32>,
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: Decimal,
    #[serde(deserialize_with = "lenient::subsidy_status")]
    pub status: SubsidyStatus,
    pub received_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Expense {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: Decimal,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CanteenIncomeEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SponsorshipIncomeEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: Decimal,
    pub description: Option<String>,
    pub sponsor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassRoom {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SchoolInfo {
    pub name: Option<String>,
    pub funding_type: Option<String>,
}

/// Read-only snapshot of the data store. The engine treats this as immutable:
/// every derived value is a fresh allocation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub students: Vec<Student>,
    pub staff: Vec<StaffMember>,
    pub expenses: Vec<Expense>,
    pub subsidies: Vec<Subsidy>,
    pub canteen_income: Vec<CanteenIncomeEntry>,
    pub sponsorship_income: Vec<SponsorshipIncomeEntry>,
    pub classes: Vec<ClassRoom>,
    pub school_info: SchoolInfo,
}
