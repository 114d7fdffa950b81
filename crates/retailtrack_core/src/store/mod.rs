//! Entity store layer.
//!
//! # Responsibility
//! - Define the repository contract shared by every entity kind.
//! - Provide the in-memory implementation used by the desk service.
//!
//! # Invariants
//! - Ids are unique within one store.
//! - `update` and `remove` on an unknown id leave the store unchanged.
//! - Store constructors are pure; seed data is injected, never embedded.

pub mod memory;

pub use memory::{update_or_not_found, MemoryStore, Repository, StoreError, StoreResult};
