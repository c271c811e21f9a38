//! Snapshot of the records fetched from the backend.

use std::collections::BTreeSet;

use api_types::expense::ExpenseResponse;

use crate::{FinancialRecord, ResultEngine};

/// Immutable snapshot of financial records.
///
/// A refresh replaces the whole store; nothing in the engine mutates it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<FinancialRecord>,
}

impl RecordStore {
    /// Builds a store from the `GET /expenses` body.
    pub fn from_response(response: ExpenseResponse) -> Self {
        let store: Self = response.data.into_iter().map(FinancialRecord::from).collect();

        let malformed = store.records.iter().filter(|r| !r.is_chartable()).count();
        if malformed > 0 {
            tracing::warn!(
                malformed,
                total = store.len(),
                "records without a parseable timestamp or amount are left out of the chart"
            );
        }
        if response.total_count != store.len() as u64 {
            tracing::debug!(
                total_count = response.total_count,
                received = store.len(),
                "snapshot size differs from reported total count"
            );
        }
        store
    }

    /// Parses a JSON `GET /expenses` body.
    pub fn from_json(body: &str) -> ResultEngine<Self> {
        let response: ExpenseResponse = serde_json::from_str(body)?;
        Ok(Self::from_response(response))
    }

    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FinancialRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Distinct categories of the chartable records, sorted by name.
    pub fn categories(&self) -> BTreeSet<&str> {
        chartable_categories(&self.records)
    }
}

impl FromIterator<FinancialRecord> for RecordStore {
    fn from_iter<T: IntoIterator<Item = FinancialRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

pub(crate) fn chartable_categories(records: &[FinancialRecord]) -> BTreeSet<&str> {
    records
        .iter()
        .filter(|record| record.is_chartable())
        .map(FinancialRecord::category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "total_count": 3,
        "data": [
            {"id": "1", "amount": 10, "category": "Food", "item": "Lunch",
             "timestamp": "2024-01-01T12:00:00Z"},
            {"id": "2", "amount": 4.5, "category": "Transport", "item": "Bus",
             "timestamp": "2024-01-02T08:00:00Z"},
            {"id": "3", "amount": "n/a", "category": "Rent", "item": "Flat",
             "timestamp": "2024-01-03T08:00:00Z"}
        ]
    }"#;

    #[test]
    fn from_json_keeps_every_record() {
        let store = RecordStore::from_json(BODY).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("2").map(FinancialRecord::item), Some("Bus"));
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn categories_skip_malformed_records() {
        let store = RecordStore::from_json(BODY).unwrap();
        let categories: Vec<&str> = store.categories().into_iter().collect();
        assert_eq!(categories, vec!["Food", "Transport"]);
    }

    #[test]
    fn from_json_rejects_invalid_body() {
        assert!(RecordStore::from_json("[1, 2").is_err());
    }
}
