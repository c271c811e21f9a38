//! In-memory record engine of the spending dashboard.
//!
//! The engine turns a snapshot of expenses into the two projections the
//! dashboard shows: a filtered, sorted, paginated table ([`table::view`])
//! and per-category daily series for a date window ([`aggregate`]). Both
//! are pure functions of their inputs. The timezone and "today" are always
//! passed in, never read from the environment.
//!
//! ```rust
//! use engine::{Engine, RecordStore, ViewState, window::parse_day};
//!
//! let store = RecordStore::from_json(r#"{"total_count": 1, "data": [
//!     {"id": "1", "amount": 10, "item": "Lunch", "category": "Food",
//!      "timestamp": "2024-01-01T12:00:00Z"}
//! ]}"#).unwrap();
//! let engine = Engine::builder().timezone_name("Europe/Rome").unwrap().build();
//!
//! let today = parse_day("2024-01-03").unwrap();
//! let window = engine.window_starting(parse_day("2024-01-01").unwrap(), today);
//! let chart = engine.chart_series(store.records(), &window);
//! assert_eq!(chart.labels, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
//!
//! let table = engine.table_view(store.records(), &ViewState::default());
//! assert_eq!(table.total_rows, 1);
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

pub use aggregation::{Buckets, ChartData, ChartSeries, aggregate};
pub use error::EngineError;
pub use money::Money;
pub use palette::{Color, Palette};
pub use record::{FinancialRecord, RecordTime, UNCATEGORIZED};
pub use state::{DashboardState, Intent, ViewState};
pub use store::RecordStore;
pub use table::{Column, PageSize, SortDirection, SortKey, TableView};
pub use window::{DEFAULT_SPAN_DAYS, DateWindow};

mod aggregation;
mod error;
mod money;
pub mod palette;
mod record;
mod state;
mod store;
pub mod table;
mod util;
pub mod window;

type ResultEngine<T> = Result<T, EngineError>;

/// Dashboard settings bound to the pure projections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Engine {
    timezone: Tz,
    palette: Palette,
    window_span_days: u32,
    page_size: PageSize,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Calendar day of `now` on the viewer's wall clock.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone).date_naive()
    }

    /// Window starting at `start`, with the configured span.
    pub fn window_starting(&self, start: NaiveDate, today: NaiveDate) -> DateWindow {
        DateWindow::with_span(start, today, self.window_span_days)
    }

    /// Initial dashboard: default table state and a window ending today.
    pub fn initial_state(&self, today: NaiveDate) -> DashboardState {
        DashboardState::new(
            ViewState::with_page_size_default(self.page_size),
            DateWindow::ending_on(today, self.window_span_days),
        )
    }

    /// Table projection, see [`table::view`].
    pub fn table_view<'a>(
        &self,
        records: &'a [FinancialRecord],
        state: &ViewState,
    ) -> TableView<'a> {
        table::view(records, state, self.timezone)
    }

    /// Chart projection, see [`aggregate`].
    pub fn chart_series(&self, records: &[FinancialRecord], window: &DateWindow) -> ChartData {
        aggregate(records, window, self.timezone, &self.palette)
    }

    /// Text of one table cell as the viewer sees it.
    pub fn cell_text(&self, record: &FinancialRecord, column: Column) -> String {
        column.text(record, self.timezone).into_owned()
    }
}

#[derive(Debug)]
pub struct EngineBuilder {
    timezone: Tz,
    palette: Palette,
    window_span_days: u32,
    page_size: PageSize,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            palette: Palette::default(),
            window_span_days: DEFAULT_SPAN_DAYS,
            page_size: PageSize::default(),
        }
    }
}

impl EngineBuilder {
    /// Timezone used for day buckets and displayed dates.
    pub fn timezone(mut self, timezone: Tz) -> EngineBuilder {
        self.timezone = timezone;
        self
    }

    /// Timezone by IANA name, e.g. `Europe/Rome`.
    pub fn timezone_name(self, name: &str) -> ResultEngine<EngineBuilder> {
        let timezone: Tz = name
            .trim()
            .parse()
            .map_err(|_| EngineError::InvalidTimezone(name.to_string()))?;
        Ok(self.timezone(timezone))
    }

    pub fn palette(mut self, palette: Palette) -> EngineBuilder {
        self.palette = palette;
        self
    }

    pub fn window_span_days(mut self, days: u32) -> EngineBuilder {
        self.window_span_days = days;
        self
    }

    pub fn page_size(mut self, size: PageSize) -> EngineBuilder {
        self.page_size = size;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            timezone: self.timezone,
            palette: self.palette,
            window_span_days: self.window_span_days,
            page_size: self.page_size,
        }
    }
}
