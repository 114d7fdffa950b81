//! Core domain logic for the RetailTrack dashboard.
//! Entity stores, filters, aggregates, forms and capability data live here;
//! presentation layers consume them in-process.

pub mod access;
pub mod aggregate;
pub mod coerce;
pub mod config;
pub mod filter;
pub mod fixtures;
pub mod form;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use access::{Action, CapabilitySet, Module, Role, Session};
pub use config::CoreConfig;
pub use filter::{RecordFilter, Searchable, Selector};
pub use fixtures::{builtin_fixtures, load_fixtures_from_path, FixtureError, Fixtures};
pub use form::{FormError, FormSession, SubmitOutcome};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::record::{Entity, RecordId};
pub use service::{Desk, ServiceError, ServiceResult};
pub use store::{MemoryStore, Repository, StoreError, StoreResult};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
