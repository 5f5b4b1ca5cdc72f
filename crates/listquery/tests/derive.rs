//! Integration tests for the Record derive macro.
//!
//! These tests verify that `#[derive(Record)]` builds field tables that
//! resolve aliases, nested records and flattened fields the way queries
//! expect.

#![cfg(feature = "macros")]
#![allow(dead_code)] // Some fields are intentionally skipped for testing

use chrono::{DateTime, TimeZone, Utc};
use listquery::{resolve, Filter, ListQuery, Mode, Record, SortField, Value};
use serde::Serialize;
use serde_json::json;

// =============================================================================
// Fixtures
// =============================================================================

#[derive(Debug, Clone, Serialize, Record)]
#[serde(rename_all = "camelCase")]
struct Address {
    city: String,
    zip_code: String,
}

#[derive(Debug, Clone, Serialize, Record)]
struct Audit {
    #[serde(rename = "createdAt")]
    created: DateTime<Utc>,
    #[query(rename = "author")]
    created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Record)]
#[serde(rename_all = "camelCase")]
struct Customer {
    id: u32,
    #[serde(rename = "fullName")]
    name: String,
    address: Option<Address>,
    #[serde(flatten)]
    audit: Audit,
    #[query(skip)]
    #[serde(skip)]
    password_hash: String,
    tags: Vec<String>,
}

fn customer(id: u32, name: &str, city: Option<&str>, day: u32) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        address: city.map(|c| Address {
            city: c.to_string(),
            zip_code: format!("{id:05}"),
        }),
        audit: Audit {
            created: Utc.with_ymd_and_hms(2024, 3, day, 9, 30, 0).unwrap(),
            created_by: (id % 2 == 0).then(|| "ops".to_string()),
        },
        password_hash: "secret".to_string(),
        tags: Vec::new(),
    }
}

fn customers() -> Vec<Customer> {
    vec![
        customer(1, "Ada Lovelace", Some("London"), 1),
        customer(2, "Grace Hopper", Some("Arlington"), 2),
        customer(3, "Alan Turing", None, 3),
        customer(4, "Edsger Dijkstra", Some("Nuenen"), 4),
    ]
}

fn ids(result: &listquery::PaginationResult<Customer>) -> Vec<u32> {
    result.data.iter().map(|c| c.id).collect()
}

// =============================================================================
// Generated items
// =============================================================================

#[test]
fn test_field_constants_use_external_names() {
    assert_eq!(Customer::ID, "id");
    assert_eq!(Customer::FULL_NAME, "fullName");
    assert_eq!(Customer::ADDRESS, "address");
    assert_eq!(Customer::TAGS, "tags");
    assert_eq!(Address::ZIP_CODE, "zipCode");
    assert_eq!(Audit::CREATED_AT, "createdAt");
    assert_eq!(Audit::AUTHOR, "author");
}

#[test]
fn test_field_table_skips_and_flags() {
    let c = customer(1, "Ada", None, 1);
    let fields = c.fields();

    let idents: Vec<_> = fields.iter().map(|f| f.ident()).collect();
    assert_eq!(idents, vec!["id", "name", "address", "audit", "tags"]);

    assert_eq!(fields[1].alias(), Some("fullName"));
    assert!(fields[3].is_flattened());
    assert!(!fields[0].is_flattened());
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_alias_and_identifier_resolve() {
    let c = customer(7, "Ada", Some("London"), 1);

    assert_eq!(resolve(&c, "fullName"), Some(Value::String("Ada")));
    assert_eq!(resolve(&c, "FULLNAME"), Some(Value::String("Ada")));
    assert_eq!(resolve(&c, "name"), Some(Value::String("Ada")));
    assert!(resolve(&c, "passwordHash").is_none());
    assert!(resolve(&c, "password_hash").is_none());
}

#[test]
fn test_nested_paths() {
    let c = customer(7, "Ada", Some("London"), 1);
    assert_eq!(resolve(&c, "address.city"), Some(Value::String("London")));
    assert_eq!(resolve(&c, "Address.ZipCode"), Some(Value::String("00007")));
    assert!(resolve(&c, "address.country").is_none());

    let homeless = customer(8, "Alan", None, 1);
    assert_eq!(resolve(&homeless, "address"), Some(Value::Null));
    assert!(resolve(&homeless, "address.city").is_none());
}

#[test]
fn test_flattened_fields_promote() {
    let c = customer(2, "Grace", None, 2);
    assert_eq!(
        resolve(&c, "createdAt").and_then(|v| v.as_time()),
        Some(Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap())
    );
    assert_eq!(resolve(&c, "author"), Some(Value::String("ops")));
    assert!(resolve(&c, "audit").is_some());
}

// =============================================================================
// Queries over derived records
// =============================================================================

#[test]
fn test_filter_through_nested_and_flattened_fields() {
    let by_city = ListQuery::new()
        .filter_by(Filter::new("address.city", Mode::StartsWith, "n"))
        .run(customers());
    assert_eq!(ids(&by_city), vec![4]);

    let by_author = ListQuery::new()
        .filter_by(Filter::new("author", Mode::IsNotEmpty, json!(null)))
        .run(customers());
    assert_eq!(ids(&by_author), vec![2, 4]);

    let without_address = ListQuery::new()
        .filter_by(Filter::new(Customer::ADDRESS, Mode::IsEmpty, json!(null)))
        .run(customers());
    assert_eq!(ids(&without_address), vec![3]);
}

#[test]
fn test_sort_by_nested_field_skips_missing() {
    // customer 3 has no address, so the key is skipped for every pair involving it
    let result = ListQuery::new()
        .sort_by(SortField::asc("address.city"))
        .run(vec![customer(1, "a", Some("Zurich"), 1), customer(2, "b", Some("Athens"), 2)]);
    assert_eq!(ids(&result), vec![2, 1]);
}

#[test]
fn test_date_filter_on_flattened_alias() {
    let result = ListQuery::new()
        .filter_by(
            Filter::new("createdAt", Mode::Equal, "2024-03-02").typed(listquery::DataType::Date),
        )
        .run(customers());
    assert_eq!(ids(&result), vec![2]);
}

#[test]
fn test_run_ref_with_derived_records() {
    let all = customers();
    let result = ListQuery::new()
        .sort_by(SortField::desc(Customer::ID))
        .page(0, 2)
        .run_ref(&all);

    let ids: Vec<u32> = result.data.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![4, 3]);
    assert_eq!(result.total_page, 2);
}

// =============================================================================
// Generics
// =============================================================================

#[derive(Debug, Record)]
struct Tagged<T> {
    label: String,
    payload: T,
}

#[test]
fn test_generic_record() {
    let inner = Tagged {
        label: "outer".to_string(),
        payload: Tagged {
            label: "inner".to_string(),
            payload: 42u8,
        },
    };
    assert_eq!(resolve(&inner, "payload.label"), Some(Value::String("inner")));
    assert_eq!(
        resolve(&inner, "payload.payload").and_then(|v| v.to_f64()),
        Some(42.0)
    );
}
