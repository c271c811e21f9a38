use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{FinancialRecord, util::fold_text};

use super::Column;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Direction a column sorts in when it is first selected: value columns
    /// show the largest/newest first, text columns go A to Z.
    pub fn first_for(column: Column) -> Self {
        if column.is_numeric() {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

/// The single active sort key. There is always one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub column: Column,
    pub direction: SortDirection,
}

impl Default for SortKey {
    fn default() -> Self {
        Self {
            column: Column::Timestamp,
            direction: SortDirection::Descending,
        }
    }
}

impl SortKey {
    /// Header click: flip the direction of the active column, or switch to
    /// `column` in its first direction. The key is never removed.
    #[must_use]
    pub fn toggle(self, column: Column) -> Self {
        if self.column == column {
            Self {
                column,
                direction: self.direction.toggled(),
            }
        } else {
            Self {
                column,
                direction: SortDirection::first_for(column),
            }
        }
    }

    /// Stable sort of `rows`; equal keys keep their incoming order.
    pub(crate) fn sort(self, rows: &mut [&FinancialRecord]) {
        match self.column {
            Column::Timestamp => {
                self.sort_by_key(rows, |r| r.timestamp().map(|ts| ts.sort_key()))
            }
            Column::Amount => self.sort_by_key(rows, FinancialRecord::amount),
            Column::Item => self.sort_by_key(rows, |r| fold_text(r.item())),
            Column::Category => self.sort_by_key(rows, |r| fold_text(r.category())),
            Column::Notes => self.sort_by_key(rows, |r| fold_text(r.notes())),
        }
    }

    fn sort_by_key<K, F>(self, rows: &mut [&FinancialRecord], key: F)
    where
        K: Ord,
        F: Fn(&FinancialRecord) -> K,
    {
        let direction = self.direction;
        let mut keyed: Vec<(K, &FinancialRecord)> = rows.iter().map(|r| (key(r), *r)).collect();
        keyed.sort_by(|(a, _), (b, _)| match direction {
            SortDirection::Ascending => a.cmp(b),
            SortDirection::Descending => b.cmp(a),
        });
        for (slot, (_, record)) in rows.iter_mut().zip(keyed) {
            *slot = record;
        }
    }
}

/// Orders two records the way [`SortKey::sort`] would.
pub fn compare(key: SortKey, a: &FinancialRecord, b: &FinancialRecord) -> Ordering {
    let ordering = match key.column {
        Column::Timestamp => a
            .timestamp()
            .map(|ts| ts.sort_key())
            .cmp(&b.timestamp().map(|ts| ts.sort_key())),
        Column::Amount => a.amount().cmp(&b.amount()),
        Column::Item => fold_text(a.item()).cmp(&fold_text(b.item())),
        Column::Category => fold_text(a.category()).cmp(&fold_text(b.category())),
        Column::Notes => fold_text(a.notes()).cmp(&fold_text(b.notes())),
    };
    match key.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}
