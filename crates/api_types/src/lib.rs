//! Wire types of the expenses backend.
//!
//! Every field the backend may omit or send as `null` is optional here: the
//! engine decides how to degrade, these types only mirror the payloads.

use serde::{Deserialize, Serialize};

/// Amount as sent by the backend: either a JSON number or a decimal string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    /// Textual form of the amount, as typed by the user or emitted by the
    /// backend (numbers use the shortest round-trip representation).
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }
}

pub mod expense {
    use super::*;

    /// One expense as returned by `GET /expenses`.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseOut {
        #[serde(default)]
        pub id: Option<String>,
        #[serde(default)]
        pub amount: Option<RawAmount>,
        /// Pre-formatted amount (currency symbol, grouping), passed through.
        #[serde(default)]
        pub display_amount: Option<String>,
        #[serde(default)]
        pub item: Option<String>,
        #[serde(default)]
        pub notes: Option<String>,
        #[serde(default)]
        pub category: Option<String>,
        /// ISO 8601 timestamp, kept verbatim.
        #[serde(default)]
        pub timestamp: Option<String>,
    }

    /// Body of `GET /expenses`.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseResponse {
        #[serde(default)]
        pub total_count: u64,
        #[serde(default)]
        pub data: Vec<ExpenseOut>,
    }
}

pub mod summary {
    use super::*;

    /// Total spent in one category.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryTotal {
        pub category: String,
        pub total: f64,
        #[serde(default)]
        pub display_amount: Option<String>,
    }

    /// Body of `GET /expenses/summary`, consumed by the pie chart.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct CategorySummary {
        #[serde(default)]
        pub by_category: Vec<CategoryTotal>,
        #[serde(default)]
        pub total_amount: f64,
    }
}
