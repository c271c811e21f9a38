//! Filtered, sorted and paginated view of the expense table.
//!
//! The pipeline always runs in the same order: column filters, global
//! filter, stable sort, pagination. The date window plays no part here; the
//! table always covers the whole snapshot.

use chrono_tz::Tz;
use serde::Serialize;

use crate::{FinancialRecord, ViewState};

pub use column::Column;
pub use filter::FilterState;
pub use page::{PAGE_SIZE_OPTIONS, PageSize, PageState};
pub use sort::{SortDirection, SortKey, compare};

mod column;
mod filter;
mod page;
mod sort;

/// One page of the table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableView<'a> {
    pub rows: Vec<&'a FinancialRecord>,
    /// Rows left after filtering, across all pages.
    pub total_rows: usize,
    pub total_pages: usize,
    /// The state the page was computed with, page index clamped.
    pub state: ViewState,
}

impl TableView<'_> {
    pub fn page_index(&self) -> usize {
        self.state.page().index
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index() > 0
    }

    pub fn has_next_page(&self) -> bool {
        self.page_index() + 1 < self.total_pages
    }
}

/// Runs the table pipeline over `records`.
///
/// A page index past the end of the filtered rows is clamped to the last
/// page; the returned view carries the clamped state.
pub fn view<'a>(records: &'a [FinancialRecord], state: &ViewState, tz: Tz) -> TableView<'a> {
    let filter = state.filters().compile();
    let mut rows: Vec<&FinancialRecord> = records
        .iter()
        .filter(|record| filter.matches(record, tz))
        .collect();

    state.sort().sort(&mut rows);

    let total_rows = rows.len();
    let page = state.page().clamped(total_rows);
    let range = page.range(total_rows);
    let total_pages = page.page_count(total_rows);

    TableView {
        rows: rows.drain(range).collect(),
        total_rows,
        total_pages,
        state: state.clone().with_page_state(page),
    }
}
