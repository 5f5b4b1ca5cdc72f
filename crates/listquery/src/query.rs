//! Query construction and execution.
//!
//! A [`ListQuery`] bundles the decoded filter root, the sort keys and the
//! page request. It is built either from raw request parameters (lenient,
//! never fails) or with the builder methods, and then run against a
//! collection.

use std::cmp::Ordering;

use crate::cancel::Cancellation;
use crate::combine::filter_records;
use crate::decode::{decode_filter, decode_sort, parse_page_number};
use crate::filter::{Filter, FilterRoot};
use crate::ordering::{compare_records, stable_sort_by, SortField, SortOrder};
use crate::paginate::{paginate, Page, PaginationResult};
use crate::record::Record;

/// Names of the four query-string parameters.
///
/// Defaults to `filter`, `sort`, `pageIndex` and `pageSize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamNames {
    /// Parameter carrying the encoded filter.
    pub filter: String,
    /// Parameter carrying the encoded sort.
    pub sort: String,
    /// Parameter carrying the zero-based page index.
    pub page_index: String,
    /// Parameter carrying the page size.
    pub page_size: String,
}

impl Default for ParamNames {
    fn default() -> Self {
        ParamNames {
            filter: "filter".to_string(),
            sort: "sort".to_string(),
            page_index: "pageIndex".to_string(),
            page_size: "pageSize".to_string(),
        }
    }
}

/// A filter, sort and page request ready to run against a collection.
///
/// # Example
///
/// ```
/// use listquery::{Filter, FilterRoot, ListQuery, Mode, SortField};
///
/// let query = ListQuery::new()
///     .with_filter(FilterRoot::all([Filter::new("age", Mode::Gte, 18)]))
///     .sort_by(SortField::desc("age"))
///     .page(0, 20);
///
/// assert_eq!(query.sort().len(), 1);
/// assert_eq!(query.pagination().size, 20);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    filter: FilterRoot,
    sort: Vec<SortField>,
    page: Page,
}

impl ListQuery {
    /// Creates a query that returns everything in input order.
    pub fn new() -> Self {
        ListQuery::default()
    }

    /// Builds a query from raw request parameters.
    ///
    /// `filter` and `sort` are decoded independently; a missing or malformed
    /// value falls back to its default (no filters, no sort). Page values
    /// that are missing or not integers are `0`.
    pub fn from_params(
        filter: Option<&str>,
        sort: Option<&str>,
        page_index: Option<&str>,
        page_size: Option<&str>,
    ) -> Self {
        let filter = match filter.filter(|raw| !raw.is_empty()) {
            None => FilterRoot::default(),
            Some(raw) => decode_filter(raw).unwrap_or_else(|err| {
                tracing::debug!(error = %err, "ignoring malformed filter parameter");
                FilterRoot::default()
            }),
        };

        let sort = match sort.filter(|raw| !raw.is_empty()) {
            None => Vec::new(),
            Some(raw) => decode_sort(raw).unwrap_or_else(|err| {
                tracing::debug!(error = %err, "ignoring malformed sort parameter");
                Vec::new()
            }),
        };

        let page = Page::new(
            page_index.map_or(0, parse_page_number),
            page_size.map_or(0, parse_page_number),
        );

        ListQuery { filter, sort, page }
    }

    /// Builds a query from a raw query string such as `pageIndex=1&pageSize=10`.
    ///
    /// A leading `?` is ignored. When a parameter repeats, the first
    /// occurrence wins. Page values are percent-decoded before parsing.
    pub fn from_query_string(raw: &str, names: &ParamNames) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);

        let mut filter = None;
        let mut sort = None;
        let mut page_index = None;
        let mut page_size = None;

        for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let slot = if key == names.filter {
                &mut filter
            } else if key == names.sort {
                &mut sort
            } else if key == names.page_index {
                &mut page_index
            } else if key == names.page_size {
                &mut page_size
            } else {
                continue;
            };
            slot.get_or_insert(value);
        }

        let page_index = page_index.map(unescape_page_value);
        let page_size = page_size.map(unescape_page_value);

        ListQuery::from_params(filter, sort, page_index.as_deref(), page_size.as_deref())
    }

    /// Replaces the filter root.
    pub fn with_filter(mut self, filter: FilterRoot) -> Self {
        self.filter = filter;
        self
    }

    /// Appends a filter to the current root.
    pub fn filter_by(mut self, filter: Filter) -> Self {
        self.filter.filters.push(filter);
        self
    }

    /// Replaces the sort keys.
    pub fn with_sort(mut self, sort: Vec<SortField>) -> Self {
        self.sort = sort;
        self
    }

    /// Appends a sort key.
    pub fn sort_by(mut self, key: SortField) -> Self {
        self.sort.push(key);
        self
    }

    /// Appends a sort key by field and direction.
    pub fn order_by(self, field: &str, order: SortOrder) -> Self {
        self.sort_by(SortField::new(field, order))
    }

    /// Sets the page request. A size of zero or less disables pagination.
    pub fn page(mut self, index: i64, size: i64) -> Self {
        self.page = Page::new(index, size);
        self
    }

    /// The filter root.
    pub fn filter(&self) -> &FilterRoot {
        &self.filter
    }

    /// The sort keys.
    pub fn sort(&self) -> &[SortField] {
        &self.sort
    }

    /// The page request.
    pub fn pagination(&self) -> Page {
        self.page
    }

    /// Sorts, filters and pages a collection.
    pub fn run<T: Record>(&self, items: Vec<T>) -> PaginationResult<T> {
        self.run_with(items, &())
    }

    /// Like [`run`](Self::run) over borrowed records, without cloning them.
    pub fn run_ref<'a, T: Record>(&self, items: &'a [T]) -> PaginationResult<&'a T> {
        self.run_with(items.iter().collect(), &())
    }

    /// Sorts, filters and pages a collection, polling `cancel` as it goes.
    ///
    /// Sorting runs first and is stable. `total_size` and `total_page` in the
    /// result count the records before filtering. Cancellation is not an
    /// error: the comparator stops ordering and filtering returns what it has
    /// matched so far.
    pub fn run_with<T, C>(&self, mut items: Vec<T>, cancel: &C) -> PaginationResult<T>
    where
        T: Record,
        C: Cancellation + ?Sized,
    {
        let total = items.len();

        if !self.sort.is_empty() {
            let mut cancelled = false;
            items = stable_sort_by(items, |a, b| {
                if cancelled {
                    return Ordering::Equal;
                }
                if cancel.is_cancelled() {
                    tracing::debug!("list query cancelled while sorting");
                    cancelled = true;
                    return Ordering::Equal;
                }
                compare_records(a, b, &self.sort)
            });
        }

        let matched = filter_records(items, &self.filter, cancel);
        let matched_len = matched.len();
        let data = paginate(matched, self.page);

        tracing::trace!(
            total,
            matched = matched_len,
            returned = data.len(),
            filters = self.filter.filters.len(),
            sort_keys = self.sort.len(),
            page_index = self.page.index,
            page_size = self.page.size,
            "list query executed"
        );

        PaginationResult {
            data,
            page_index: self.page.index,
            page_size: self.page.size,
            total_size: total as i64,
            total_page: self.page.total_pages(total),
            sort: self.sort.clone(),
        }
    }
}

fn unescape_page_value(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|value| value.into_owned())
        .unwrap_or_default()
}
