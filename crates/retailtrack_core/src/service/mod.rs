//! Dashboard use-case services.
//!
//! # Responsibility
//! - Hold one store per entity kind behind a single facade.
//! - Implement the cross-record screen operations (transfers, toggles,
//!   protected deletes) and the summary queries.

pub mod desk;

pub use desk::{Desk, ServiceError, ServiceResult};
