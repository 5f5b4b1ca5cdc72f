//! Page windows and the result envelope.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::ordering::SortField;

/// A requested page: 0-based index and size.
///
/// A size of zero or less disables pagination. A negative index is
/// treated as the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Page {
    /// 0-based page index.
    pub index: i64,
    /// Records per page; `<= 0` means unlimited.
    pub size: i64,
}

impl Page {
    /// Creates a page request.
    pub fn new(index: i64, size: i64) -> Self {
        Page { index, size }
    }

    /// Returns `true` if pagination is disabled.
    pub fn is_unbounded(&self) -> bool {
        self.size <= 0
    }

    /// The slice of a `len`-long sequence this page covers.
    ///
    /// A page starting at or past the end is the empty range `len..len`.
    pub fn window(&self, len: usize) -> Range<usize> {
        if self.is_unbounded() {
            return 0..len;
        }

        let len_wide = len as i128;
        let start = i128::from(self.index.max(0)) * i128::from(self.size);
        if start >= len_wide {
            return len..len;
        }
        let end = (start + i128::from(self.size)).min(len_wide);

        // both bounds are within 0..=len here
        start as usize..end as usize
    }

    /// Number of pages needed for `total` records.
    ///
    /// Unbounded pagination is one page, or none when there are no records.
    pub fn total_pages(&self, total: usize) -> i64 {
        let total = total as i64;
        if self.is_unbounded() {
            return i64::from(total > 0);
        }
        total / self.size + i64::from(total % self.size != 0)
    }
}

/// Cuts the page out of a sequence.
pub fn paginate<T>(mut items: Vec<T>, page: Page) -> Vec<T> {
    let window = page.window(items.len());
    items.truncate(window.end);
    items.drain(..window.start);
    items
}

/// A page of results plus pagination metadata.
///
/// `total_size` and `total_page` describe the collection before filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult<T> {
    /// Records on this page.
    pub data: Vec<T>,
    /// Requested page index.
    pub page_index: i64,
    /// Requested page size.
    pub page_size: i64,
    /// Number of records before filtering.
    pub total_size: i64,
    /// Number of pages for `total_size` records.
    pub total_page: i64,
    /// Sort keys that were applied.
    pub sort: Vec<SortField>,
}

impl<T> PaginationResult<T> {
    /// Maps the records, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> PaginationResult<U>
    where
        F: FnMut(T) -> U,
    {
        PaginationResult {
            data: self.data.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_size: self.total_size,
            total_page: self.total_page,
            sort: self.sort,
        }
    }
}
