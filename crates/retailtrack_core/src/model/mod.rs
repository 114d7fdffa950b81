//! Retail domain model.
//!
//! # Responsibility
//! - Define the record shapes held by entity stores.
//! - Define per-record patches and form drafts next to each record.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId` assigned at creation.
//! - Numeric fields are never validated against other records.
//! - Derived values (available credit, outstanding balance, free stock) are
//!   computed on demand, never stored.

pub mod bank;
pub mod branch;
pub mod customer;
pub mod field_config;
pub mod finance;
pub mod inventory;
pub mod receipt;
pub mod record;
pub mod sale;
pub mod stock;
pub mod user;
