//! Date window driving the category chart.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::{EngineError, ResultEngine, record::DAY_FORMAT};

/// Days between a window's start and its derived end.
pub const DEFAULT_SPAN_DAYS: u32 = 5;

/// Inclusive `[start, end]` range of calendar days.
///
/// `end` is derived from `start`: it is `start + span` days, clamped so the
/// window never reaches past `today`. There is no way to set it directly, so
/// `start <= end <= today` always holds for the `today` the window was built
/// with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
    #[serde(skip)]
    span_days: u32,
}

impl DateWindow {
    /// Window starting at `start` with the default span.
    pub fn starting_at(start: NaiveDate, today: NaiveDate) -> Self {
        Self::with_span(start, today, DEFAULT_SPAN_DAYS)
    }

    /// Window starting at `start`, `span_days` long unless `today` comes
    /// first. A start in the future is treated as `today`.
    pub fn with_span(start: NaiveDate, today: NaiveDate, span_days: u32) -> Self {
        let start = if start > today {
            tracing::debug!(%start, %today, "window start in the future, clamped to today");
            today
        } else {
            start
        };
        let end = start
            .checked_add_days(Days::new(u64::from(span_days)))
            .map_or(today, |end| end.min(today));

        Self {
            start,
            end,
            span_days,
        }
    }

    /// Window of `span_days` ending on `today`.
    pub fn ending_on(today: NaiveDate, span_days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(span_days)))
            .unwrap_or(NaiveDate::MIN);
        Self::with_span(start, today, span_days)
    }

    /// New window for a changed start, keeping the span.
    #[must_use]
    pub fn set_start(self, start: NaiveDate, today: NaiveDate) -> Self {
        Self::with_span(start, today, self.span_days)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn span_days(&self) -> u32 {
        self.span_days
    }

    /// `true` if `day` lies in the window, both ends included.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of days in the window, both ends included.
    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Every day of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |day| *day <= self.end)
    }

    /// `yyyy-MM-dd` label of every day of the window.
    pub fn labels(&self) -> Vec<String> {
        self.days()
            .map(|day| day.format(DAY_FORMAT).to_string())
            .collect()
    }
}

/// Parses a `yyyy-MM-dd` date as typed in the date picker.
pub fn parse_day(value: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT)
        .map_err(|_| EngineError::InvalidDate(format!("expected yyyy-MM-dd, got {value:?}")))
}
