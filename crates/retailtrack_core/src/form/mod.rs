//! Form/edit stage.
//!
//! # Responsibility
//! - Hold the transient draft for a record being created or edited.
//! - Commit the draft into a repository as an insert or an in-place patch.
//!
//! # Invariants
//! - A session is either `Empty` or `Editing`; submit and cancel both return
//!   it to `Empty`.
//! - Field input is coerced, never rejected; only unknown field names fail.
//! - Required-field rules from field configuration are not consulted here.

pub mod session;

pub use session::{
    DraftFields, Draftable, FormError, FormResult, FormSession, FormState, SubmitOutcome,
};
