//! Role-based capability data for UI gating.
//!
//! # Responsibility
//! - Resolve a role into an explicit capability set once per session.
//! - Offer the resolved set as data the presentation layer can consult.
//!
//! # Invariants
//! - Undeclared capabilities are denied.
//! - Core stores and forms never consult capabilities themselves.

pub mod capability;
pub mod session;

pub use capability::{
    Action, Capability, CapabilityParseError, CapabilitySet, Module, Role, ScreenAccess,
};
pub use session::{AccessError, Session};
