//! Listquery - filter, sort and paginate in-memory collections for list endpoints.
//!
//! A list endpoint receives four query parameters: `filter` and `sort`
//! (base64-encoded JSON, percent-escaped) plus `pageIndex` and `pageSize`.
//! Listquery decodes them into a [`ListQuery`] and runs it over an
//! already-loaded `Vec` of records, producing a [`PaginationResult`].
//!
//! # Quick Start
//!
//! ```rust
//! use listquery::{encode_filter, Filter, FilterRoot, ListQuery, Mode, Record};
//!
//! #[derive(Debug, Record)]
//! struct Task {
//!     name: String,
//!     priority: i32,
//!     archived: bool,
//! }
//!
//! let tasks = vec![
//!     Task { name: "Write docs".into(), priority: 3, archived: false },
//!     Task { name: "Fix bug".into(), priority: 5, archived: false },
//!     Task { name: "Old task".into(), priority: 1, archived: true },
//! ];
//!
//! // what a client would send as `?filter=...`
//! let filter = encode_filter(&FilterRoot::all([
//!     Filter::new("priority", Mode::Gte, 3),
//!     Filter::new("archived", Mode::IsEmpty, serde_json::Value::Null),
//! ]))
//! .unwrap();
//!
//! let query = ListQuery::from_params(Some(filter.as_str()), None, Some("0"), Some("10"));
//! let result = query.run(tasks);
//!
//! assert_eq!(result.data.len(), 2);
//! assert_eq!(result.total_size, 3);
//! assert_eq!(result.data[1].name, "Fix bug");
//! ```
//!
//! # Execution
//!
//! Every run does the same three passes:
//!
//! 1. **Sort**: stable, key by key; a key missing on either record is skipped.
//! 2. **Filter**: under `AND` every filter must match and a missing field
//!    fails; under `OR` one filter must match and a missing field is
//!    skipped. No filters means no filtering.
//! 3. **Page**: `pageSize <= 0` returns everything.
//!
//! `totalSize` and `totalPage` always count the records before filtering.
//!
//! # Filter Modes
//!
//! | Data type | Modes |
//! |-----------|-------|
//! | `text` | `equal`, `not-equal`, `contains`, `not-contains`, `starts-with`, `ends-with` |
//! | `date` | `equal`, `not-equal`, `gt`, `gte`, `lt`, `lte`, `before`, `after` |
//! | `boolean` | `equal`, `not-equal` |
//! | untyped | `gt`, `gte`, `lt`, `lte`, `range`, `before`, `after`, `isempty`, `isnotempty`, and the text modes |
//!
//! A date filter whose value is exactly midnight covers the whole day.
//!
//! # Field Paths
//!
//! Filter and sort fields are dotted paths such as `owner.address.city`.
//! Each segment matches a field's external name (`#[serde(rename)]` or
//! `#[query(rename)]`) case-insensitively before its Rust identifier, and
//! flattened fields are searched when nothing matches directly.
//!
//! # Errors
//!
//! Request handling never fails: malformed parameters fall back to their
//! defaults and are reported through `tracing` at debug level. The strict
//! [`decode_filter`] and [`decode_sort`] return a [`DecodeError`] instead.

mod cancel;
mod combine;
mod decode;
mod error;
mod filter;
mod layout;
mod mode;
mod ordering;
mod paginate;
mod predicate;
mod query;
mod record;
mod resolve;
mod value;

// Re-export public API
pub use cancel::Cancellation;
pub use combine::{filter_records, Matcher};
pub use decode::{decode_filter, decode_sort, encode_filter, encode_sort, parse_page_number};
pub use error::{DecodeError, Result};
pub use filter::{DataType, Filter, FilterRoot, Logic};
pub use layout::parse_time;
pub use mode::Mode;
pub use ordering::{compare_records, compare_values, stable_sort_by, SortField, SortOrder};
pub use paginate::{paginate, Page, PaginationResult};
pub use predicate::Predicate;
pub use query::{ListQuery, ParamNames};
pub use record::{FieldDef, Record};
pub use resolve::resolve;
pub use value::{AsValue, Number, Value};

#[cfg(feature = "macros")]
pub use listquery_macros::Record;
