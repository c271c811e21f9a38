use std::{borrow::Cow, fmt, str::FromStr};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{EngineError, FinancialRecord};

/// Columns of the expense table, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Timestamp,
    Amount,
    Item,
    Category,
    Notes,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Timestamp,
        Column::Amount,
        Column::Item,
        Column::Category,
        Column::Notes,
    ];

    /// Stable key used by filters and sort state.
    pub fn key(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Amount => "amount",
            Self::Item => "item",
            Self::Category => "category",
            Self::Notes => "notes",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Self::Timestamp => "Date",
            Self::Amount => "Amount",
            Self::Item => "Item",
            Self::Category => "Category",
            Self::Notes => "Notes",
        }
    }

    /// `true` for columns that sort by value instead of by text.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Timestamp | Self::Amount)
    }

    /// Text shown in the cell, which is also the text filters match.
    ///
    /// Dates are shown as local `yyyy-MM-dd HH:mm:ss`; an unparseable
    /// timestamp falls back to the raw backend value.
    pub fn text(self, record: &FinancialRecord, tz: Tz) -> Cow<'_, str> {
        match self {
            Self::Timestamp => match record.timestamp() {
                Some(ts) => Cow::Owned(ts.local_text(tz)),
                None => Cow::Borrowed(record.raw_timestamp()),
            },
            Self::Amount => Cow::Borrowed(record.display_amount()),
            Self::Item => Cow::Borrowed(record.item()),
            Self::Category => Cow::Borrowed(record.category()),
            Self::Notes => Cow::Borrowed(record.notes()),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Column {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Column::ALL
            .into_iter()
            .find(|column| column.key() == key || column.header().eq_ignore_ascii_case(&key))
            .ok_or_else(|| EngineError::UnknownColumn(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use api_types::{RawAmount, expense::ExpenseOut};

    use super::*;

    #[test]
    fn parses_keys_and_headers() {
        assert_eq!("timestamp".parse::<Column>().unwrap(), Column::Timestamp);
        assert_eq!("Date".parse::<Column>().unwrap(), Column::Timestamp);
        assert_eq!(" CATEGORY ".parse::<Column>().unwrap(), Column::Category);
        assert_eq!(
            "price".parse::<Column>(),
            Err(EngineError::UnknownColumn("price".to_string()))
        );
    }

    #[test]
    fn cell_text_uses_displayed_values() {
        let record = FinancialRecord::from(ExpenseOut {
            id: Some("1".to_string()),
            amount: Some(RawAmount::Number(9.9)),
            display_amount: Some("$9.90".to_string()),
            item: Some("Book".to_string()),
            timestamp: Some("2024-05-01T22:15:00Z".to_string()),
            ..Default::default()
        });
        let tz: Tz = "Europe/Rome".parse().unwrap();
        assert_eq!(Column::Timestamp.text(&record, tz), "2024-05-02 00:15:00");
        assert_eq!(Column::Amount.text(&record, tz), "$9.90");
        assert_eq!(Column::Category.text(&record, tz), "Uncategorized");
        assert_eq!(Column::Notes.text(&record, tz), "");
    }
}
