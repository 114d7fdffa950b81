//! Shared record contract for every entity kind.

use uuid::Uuid;

/// Stable identifier for every stored record.
pub type RecordId = Uuid;

/// Where a newly created record lands in its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Master data: newest last.
    Append,
    /// Transactional logs: newest first.
    Prepend,
}

/// Contract implemented by every record type held in an entity store.
///
/// # Invariants
/// - `id()` never changes for the lifetime of a record.
/// - `apply_patch` touches only the fields the patch sets and never the id.
pub trait Entity: Clone {
    /// Partial update shape. `Default` must be the empty patch.
    type Patch: Default;

    /// Stable entity name used in log events.
    const KIND: &'static str;

    /// Placement policy for inserted records.
    const INSERT_POSITION: InsertPosition = InsertPosition::Append;

    fn id(&self) -> RecordId;

    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Generates a fresh record id.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4()
}

/// Overwrites `slot` when the patch carries a value.
pub(crate) fn patch_field<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
