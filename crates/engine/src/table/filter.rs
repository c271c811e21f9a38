use std::collections::BTreeMap;

use chrono_tz::Tz;
use serde::Serialize;

use crate::{FinancialRecord, util::Needle};

use super::Column;

/// Separator placed between cells when the global filter scans a row, so a
/// pattern never matches across two cells.
const CELL_SEPARATOR: char = '\u{1f}';

/// Per-column patterns plus one global pattern.
///
/// An empty pattern means "no filter" and is not stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    columns: BTreeMap<Column, String>,
    global: String,
}

impl FilterState {
    #[must_use]
    pub fn with_column(mut self, column: Column, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if pattern.is_empty() {
            self.columns.remove(&column);
        } else {
            self.columns.insert(column, pattern);
        }
        self
    }

    #[must_use]
    pub fn with_global(mut self, pattern: impl Into<String>) -> Self {
        self.global = pattern.into();
        self
    }

    pub fn column(&self, column: Column) -> Option<&str> {
        self.columns.get(&column).map(String::as_str)
    }

    pub fn global(&self) -> &str {
        &self.global
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.global.is_empty()
    }

    pub(crate) fn compile(&self) -> CompiledFilter {
        CompiledFilter {
            columns: self
                .columns
                .iter()
                .filter_map(|(column, pattern)| Needle::new(pattern).map(|n| (*column, n)))
                .collect(),
            global: Needle::new(&self.global),
        }
    }
}

/// Patterns folded once for a whole pass over the records.
pub(crate) struct CompiledFilter {
    columns: Vec<(Column, Needle)>,
    global: Option<Needle>,
}

impl CompiledFilter {
    /// Column filters first, then the global filter.
    pub(crate) fn matches(&self, record: &FinancialRecord, tz: Tz) -> bool {
        let columns_match = self
            .columns
            .iter()
            .all(|(column, needle)| needle.found_in(&column.text(record, tz)));
        if !columns_match {
            return false;
        }

        match &self.global {
            None => true,
            Some(needle) => {
                let mut row = String::new();
                for column in Column::ALL {
                    row.push_str(&column.text(record, tz));
                    row.push(CELL_SEPARATOR);
                }
                needle.found_in(&row)
            }
        }
    }
}
