//! Proc macros for Listquery.
//!
//! This crate provides [`Record`], which makes a struct queryable by
//! `listquery` without runtime reflection. Use it through the re-export in
//! `listquery` (enabled by the default `macros` feature).

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `listquery::Record` (and `listquery::AsValue`) for a struct.
///
/// Every named field goes into a static field table in declaration order.
/// Field values are converted with `listquery::AsValue`, so each field type
/// must implement it; nested structs deriving `Record` implement it
/// automatically and can be reached with dotted paths.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[query(rename = "...")]` | External name, matched before the identifier |
/// | `#[query(skip)]` | Exclude this field from queries |
/// | `#[query(flatten)]` | Search this field's own fields from the parent |
/// | `#[serde(rename = "...")]` | Used as the external name when `#[query(rename)]` is absent |
/// | `#[serde(flatten)]` | Same as `#[query(flatten)]` |
///
/// On the struct, `#[query(rename_all = "...")]` or `#[serde(rename_all = "...")]`
/// derives external names for fields without an explicit rename.
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Field name constants (e.g., `Task::NAME`, `Task::CREATED_AT`) holding
///    the external name, for every field that is not flattened
/// 2. Implementation of `Record::fields()` and `Record::field_value()`
/// 3. Implementation of `AsValue` returning `Value::Record`
///
/// # Example
///
/// ```ignore
/// use listquery::{Filter, ListQuery, Mode, Record};
/// use serde::Serialize;
///
/// #[derive(Serialize, Record)]
/// #[serde(rename_all = "camelCase")]
/// struct Task {
///     name: String,
///     created_at: chrono::DateTime<chrono::Utc>,
///     #[serde(flatten)]
///     meta: Meta,
///     #[query(skip)]
///     #[serde(skip)]
///     internal_id: u64,
/// }
///
/// #[derive(Serialize, Record)]
/// struct Meta {
///     owner: Option<String>,
/// }
///
/// let query = ListQuery::new()
///     .filter_by(Filter::new(Task::NAME, Mode::Contains, "docs"))
///     .filter_by(Filter::new("owner", Mode::IsNotEmpty, serde_json::Value::Null));
/// ```
#[proc_macro_derive(Record, attributes(query))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
