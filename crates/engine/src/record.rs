//! Financial records as the engine sees them.
//!
//! A record keeps the backend's raw text next to the parsed values so the
//! table can still show a malformed row while aggregation skips it.

use api_types::expense::ExpenseOut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::Money;

/// Category shown for records the backend sent without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub(crate) const DAY_FORMAT: &str = "%Y-%m-%d";

/// When a record happened.
///
/// The backend stores UTC instants, but older exports carry a bare
/// `yyyy-MM-dd` date, which is already a calendar day and is never shifted
/// by a timezone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordTime {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

impl RecordTime {
    /// Parses RFC 3339, naive ISO datetimes (taken as UTC) and plain dates.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self::Instant(instant.with_timezone(&Utc)));
        }
        if let Ok(instant) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
            return Some(Self::Instant(instant.with_timezone(&Utc)));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(Self::Instant(naive.and_utc()));
            }
        }
        NaiveDate::parse_from_str(raw, DAY_FORMAT).ok().map(Self::Day)
    }

    /// Calendar day on the viewer's wall clock.
    pub fn local_day(self, tz: Tz) -> NaiveDate {
        match self {
            Self::Instant(instant) => instant.with_timezone(&tz).date_naive(),
            Self::Day(day) => day,
        }
    }

    /// Text shown in the table's date column.
    pub fn local_text(self, tz: Tz) -> String {
        match self {
            Self::Instant(instant) => instant
                .with_timezone(&tz)
                .format(LOCAL_DATETIME_FORMAT)
                .to_string(),
            Self::Day(day) => day.format(DAY_FORMAT).to_string(),
        }
    }

    /// Absolute ordering key; a bare day sorts as its UTC midnight.
    pub(crate) fn sort_key(self) -> DateTime<Utc> {
        match self {
            Self::Instant(instant) => instant,
            Self::Day(day) => day.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

/// One expense entry of a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinancialRecord {
    id: String,
    #[serde(rename = "timestamp")]
    raw_timestamp: String,
    #[serde(skip)]
    timestamp: Option<RecordTime>,
    item: String,
    category: String,
    #[serde(rename = "amount")]
    raw_amount: String,
    #[serde(skip)]
    amount: Option<Money>,
    display_amount: String,
    notes: String,
}

impl FinancialRecord {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Parsed timestamp, `None` when the backend sent something unparseable.
    pub fn timestamp(&self) -> Option<RecordTime> {
        self.timestamp
    }

    pub fn raw_timestamp(&self) -> &str {
        &self.raw_timestamp
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Parsed amount, `None` when the backend sent a non-numeric value.
    pub fn amount(&self) -> Option<Money> {
        self.amount
    }

    pub fn raw_amount(&self) -> &str {
        &self.raw_amount
    }

    /// Pre-formatted amount, falling back to the raw amount text.
    pub fn display_amount(&self) -> &str {
        if self.display_amount.is_empty() {
            &self.raw_amount
        } else {
            &self.display_amount
        }
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Local day of the record, if it can be charted at all.
    pub fn local_day(&self, tz: Tz) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.local_day(tz))
    }

    /// `true` when both timestamp and amount parsed.
    pub fn is_chartable(&self) -> bool {
        self.timestamp.is_some() && self.amount.is_some()
    }
}

impl From<ExpenseOut> for FinancialRecord {
    fn from(value: ExpenseOut) -> Self {
        let raw_timestamp = value.timestamp.unwrap_or_default();
        let raw_amount = value
            .amount
            .as_ref()
            .map(|amount| amount.to_text())
            .unwrap_or_default();
        let category = value
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        Self {
            id: value.id.unwrap_or_default(),
            timestamp: RecordTime::parse(&raw_timestamp),
            raw_timestamp,
            item: value.item.unwrap_or_default(),
            category,
            amount: raw_amount.parse().ok(),
            raw_amount,
            display_amount: value.display_amount.unwrap_or_default(),
            notes: value.notes.unwrap_or_default(),
        }
    }
}
