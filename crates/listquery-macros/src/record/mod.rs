//! Implementation of the `#[derive(Record)]` macro.
//!
//! This module generates the field table, the index-based accessor and the
//! field name constants for `listquery` records.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
