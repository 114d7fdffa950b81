//! Filter and search stage.
//!
//! # Responsibility
//! - Derive the visible subset of a store from search text, equality
//!   selectors and an optional calendar day.
//!
//! # Invariants
//! - Predicates compose as logical AND.
//! - Results keep input order; an empty result is a valid state.
//! - The `"all"` selector sentinel never excludes a record.

pub mod query;

pub use query::{DateAccessor, RecordFilter, Searchable, Selector, TextAccessor, ALL_SENTINEL};
