//! Dashboard state as plain values.
//!
//! Every intent consumes a state and returns the next one; nothing is shared
//! or mutated behind the caller's back.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    DateWindow,
    table::{Column, FilterState, PageSize, PageState, SortKey},
};

/// Filters, sort key and page of the expense table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    filters: FilterState,
    sort: SortKey,
    page: PageState,
}

impl ViewState {
    /// Default state with a custom page size.
    pub fn with_page_size_default(size: PageSize) -> Self {
        Self {
            page: PageState { index: 0, size },
            ..Self::default()
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    /// Sets a column filter and goes back to the first page.
    #[must_use]
    pub fn with_column_filter(mut self, column: Column, pattern: impl Into<String>) -> Self {
        self.filters = self.filters.with_column(column, pattern);
        self.page.index = 0;
        self
    }

    /// Sets the global filter and goes back to the first page.
    #[must_use]
    pub fn with_global_filter(mut self, pattern: impl Into<String>) -> Self {
        self.filters = self.filters.with_global(pattern);
        self.page.index = 0;
        self
    }

    #[must_use]
    pub fn toggle_sort(mut self, column: Column) -> Self {
        self.sort = self.sort.toggle(column);
        self
    }

    /// Jumps to `index`; an index past the end is clamped when the view is
    /// computed.
    #[must_use]
    pub fn with_page(mut self, index: usize) -> Self {
        self.page.index = index;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page = self.page.resized(size);
        self
    }

    #[must_use]
    pub fn next_page(mut self) -> Self {
        self.page.index = self.page.index.saturating_add(1);
        self
    }

    #[must_use]
    pub fn previous_page(mut self) -> Self {
        self.page.index = self.page.index.saturating_sub(1);
        self
    }

    #[must_use]
    pub(crate) fn with_page_state(mut self, page: PageState) -> Self {
        self.page = page;
        self
    }
}

/// Something the presentation layer asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    SetColumnFilter { column: Column, pattern: String },
    SetGlobalFilter(String),
    ToggleSort(Column),
    SetPage(usize),
    NextPage,
    PreviousPage,
    SetPageSize(PageSize),
    SetWindowStart(NaiveDate),
}

/// Table state plus chart window: everything the dashboard can change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardState {
    pub view: ViewState,
    pub window: DateWindow,
}

impl DashboardState {
    pub fn new(view: ViewState, window: DateWindow) -> Self {
        Self { view, window }
    }

    /// Applies one intent. `today` only matters for window changes.
    #[must_use]
    pub fn apply(self, intent: Intent, today: NaiveDate) -> Self {
        let Self { view, window } = self;
        match intent {
            Intent::SetColumnFilter { column, pattern } => Self {
                view: view.with_column_filter(column, pattern),
                window,
            },
            Intent::SetGlobalFilter(pattern) => Self {
                view: view.with_global_filter(pattern),
                window,
            },
            Intent::ToggleSort(column) => Self {
                view: view.toggle_sort(column),
                window,
            },
            Intent::SetPage(index) => Self {
                view: view.with_page(index),
                window,
            },
            Intent::NextPage => Self {
                view: view.next_page(),
                window,
            },
            Intent::PreviousPage => Self {
                view: view.previous_page(),
                window,
            },
            Intent::SetPageSize(size) => Self {
                view: view.with_page_size(size),
                window,
            },
            Intent::SetWindowStart(start) => Self {
                view,
                window: window.set_start(start, today),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{table::SortDirection, window::parse_day};

    #[test]
    fn default_view_state() {
        let state = ViewState::default();
        assert_eq!(state.sort().column, Column::Timestamp);
        assert_eq!(state.sort().direction, SortDirection::Descending);
        assert_eq!(state.page().index, 0);
        assert_eq!(state.page().size.get(), 5);
        assert!(state.filters().is_empty());
    }

    #[test]
    fn intents_return_new_states() {
        let before = ViewState::default();
        let after = before.clone().with_global_filter("food").toggle_sort(Column::Item);
        assert_eq!(before, ViewState::default());
        assert_eq!(after.filters().global(), "food");
        assert_eq!(after.sort().column, Column::Item);
    }

    #[test]
    fn filter_changes_return_to_first_page() {
        let state = ViewState::default().with_page(3);
        assert_eq!(state.clone().with_global_filter("tea").page().index, 0);
        assert_eq!(
            state
                .with_column_filter(Column::Item, "tea")
                .with_page(2)
                .with_column_filter(Column::Item, "")
                .page()
                .index,
            0
        );
    }

    #[test]
    fn huge_page_index_survives_page_size_change() {
        let state = ViewState::default()
            .with_page(usize::MAX / 2)
            .with_page_size(PageSize::try_from(10).unwrap());
        assert_eq!(state.page().size.get(), 10);
        assert_eq!(state.page().index, usize::MAX / 10);
    }

    #[test]
    fn previous_page_stops_at_zero() {
        let state = ViewState::default().previous_page();
        assert_eq!(state.page().index, 0);
        assert_eq!(state.next_page().next_page().page().index, 2);
    }

    #[test]
    fn dashboard_applies_window_and_table_intents() {
        let today = parse_day("2024-06-10").unwrap();
        let state = DashboardState::new(
            ViewState::default(),
            DateWindow::ending_on(today, crate::DEFAULT_SPAN_DAYS),
        );

        let state = state
            .apply(Intent::SetWindowStart(parse_day("2024-06-08").unwrap()), today)
            .apply(Intent::SetGlobalFilter("food".to_string()), today)
            .apply(
                Intent::SetColumnFilter {
                    column: Column::Notes,
                    pattern: "lunch".to_string(),
                },
                today,
            )
            .apply(Intent::SetPage(3), today)
            .apply(
                Intent::SetPageSize(PageSize::try_from(10).unwrap()),
                today,
            );

        assert_eq!(state.window.start(), parse_day("2024-06-08").unwrap());
        assert_eq!(state.window.end(), today);
        assert_eq!(state.view.filters().global(), "food");
        assert_eq!(state.view.filters().column(Column::Notes), Some("lunch"));
        assert_eq!(state.view.page().index, 1);
        assert_eq!(state.view.page().size.get(), 10);
    }
}
