//! Wire encoding of filter and sort parameters.
//!
//! Both parameters travel as JSON, base64-encoded with the standard alphabet
//! and then percent-escaped for the query string. Decoding runs the stages in
//! reverse: unescape, base64-decode, JSON-decode.
//!
//! The functions here are strict and report the failing stage. Request
//! handling goes through [`ListQuery::from_params`](crate::ListQuery::from_params),
//! which falls back to defaults instead.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::filter::FilterRoot;
use crate::ordering::SortField;

/// Decodes a `filter` parameter.
pub fn decode_filter(raw: &str) -> Result<FilterRoot> {
    let root: Option<FilterRoot> = decode_payload(raw)?;
    Ok(root.unwrap_or_default())
}

/// Decodes a `sort` parameter.
pub fn decode_sort(raw: &str) -> Result<Vec<SortField>> {
    let fields: Option<Vec<SortField>> = decode_payload(raw)?;
    Ok(fields.unwrap_or_default())
}

/// Encodes a filter root into its query-string form.
pub fn encode_filter(root: &FilterRoot) -> Result<String> {
    encode_payload(root)
}

/// Encodes sort keys into their query-string form.
pub fn encode_sort(fields: &[SortField]) -> Result<String> {
    encode_payload(fields)
}

/// Parses a page number; anything but a base-10 integer is `0`.
pub fn parse_page_number(raw: &str) -> i64 {
    raw.parse().unwrap_or(0)
}

fn decode_payload<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let unescaped = urlencoding::decode(raw)?;
    let bytes = STANDARD.decode(unescaped.as_bytes())?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn encode_payload<T: Serialize + ?Sized>(payload: &T) -> Result<String> {
    let json = serde_json::to_vec(payload)?;
    let encoded = STANDARD.encode(json);
    Ok(urlencoding::encode(&encoded).into_owned())
}
