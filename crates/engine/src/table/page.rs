use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Page sizes offered by the table, the first one being the default.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// A page size from [`PAGE_SIZE_OPTIONS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub const fn get(self) -> usize {
        self.0
    }

    pub fn options() -> impl Iterator<Item = PageSize> {
        PAGE_SIZE_OPTIONS.into_iter().map(PageSize)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(PAGE_SIZE_OPTIONS[0])
    }
}

impl TryFrom<usize> for PageSize {
    type Error = EngineError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if PAGE_SIZE_OPTIONS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(EngineError::InvalidPageSize(format!(
                "{value} is not one of {PAGE_SIZE_OPTIONS:?}"
            )))
        }
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

impl FromStr for PageSize {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|_| EngineError::InvalidPageSize(format!("{s:?} is not a number")))?;
        Self::try_from(value)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Zero-based page index and page size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageState {
    pub index: usize,
    pub size: PageSize,
}

impl PageState {
    /// Changes the size keeping the first row of the current page visible.
    #[must_use]
    pub fn resized(self, size: PageSize) -> Self {
        let top_row = self.index.saturating_mul(self.size.get());
        Self {
            index: top_row / size.get(),
            size,
        }
    }

    /// Pages needed for `total_rows`; zero rows means zero pages.
    pub fn page_count(self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.size.get())
    }

    /// Pulls the index back onto the last page when it ran past the end.
    #[must_use]
    pub fn clamped(self, total_rows: usize) -> Self {
        let last = self.page_count(total_rows).saturating_sub(1);
        if self.index > last {
            tracing::debug!(
                index = self.index,
                last,
                "page index past the last page, clamped"
            );
        }
        Self {
            index: self.index.min(last),
            size: self.size,
        }
    }

    /// Row range of the page, for a list of `total_rows` rows.
    pub fn range(self, total_rows: usize) -> std::ops::Range<usize> {
        let start = self.index.saturating_mul(self.size.get()).min(total_rows);
        let end = start.saturating_add(self.size.get()).min(total_rows);
        start..end
    }
}
