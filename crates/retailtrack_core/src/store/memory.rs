//! Repository contract and in-memory implementation.

use crate::model::record::{Entity, InsertPosition, RecordId};
use log::{debug, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    DuplicateId { kind: &'static str, id: RecordId },
    NotFound { kind: &'static str, id: RecordId },
    /// A mutation tried to change the record id.
    IdReassigned { kind: &'static str, id: RecordId },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId { kind, id } => write!(f, "{kind} id already exists: {id}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::IdReassigned { kind, id } => {
                write!(f, "{kind} id cannot be reassigned: {id}")
            }
        }
    }
}

impl Error for StoreError {}

/// Repository interface for one entity kind.
pub trait Repository<E: Entity> {
    /// Records in display order.
    fn list(&self) -> &[E];

    fn get(&self, id: RecordId) -> Option<&E>;

    /// Inserts a record according to `E::INSERT_POSITION`.
    ///
    /// # Errors
    /// - `DuplicateId` when a record with the same id already exists.
    fn insert(&mut self, record: E) -> StoreResult<RecordId>;

    /// Applies a partial patch. Returns `false` (store unchanged) for an unknown id.
    fn update(&mut self, id: RecordId, patch: E::Patch) -> bool;

    /// Removes a record. Returns `None` (store unchanged) for an unknown id.
    fn remove(&mut self, id: RecordId) -> Option<E>;

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

/// Applies a patch and reports an unknown id as `NotFound`.
pub fn update_or_not_found<E, R>(repo: &mut R, id: RecordId, patch: E::Patch) -> StoreResult<()>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    if repo.update(id, patch) {
        Ok(())
    } else {
        Err(StoreError::NotFound { kind: E::KIND, id })
    }
}

/// Ordered in-memory store.
#[derive(Debug, Clone)]
pub struct MemoryStore<E> {
    records: Vec<E>,
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from injected records, keeping their order.
    ///
    /// # Errors
    /// - `DuplicateId` when two records share an id.
    pub fn with_records(records: Vec<E>) -> StoreResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(StoreError::DuplicateId {
                    kind: E::KIND,
                    id: record.id(),
                });
            }
        }
        Ok(Self { records })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.records.iter()
    }

    /// Mutates one record in place and returns the closure's result.
    ///
    /// # Errors
    /// - `NotFound` for an unknown id.
    /// - `IdReassigned` when the closure changed the id; the record is restored.
    pub fn modify<R, F>(&mut self, id: RecordId, change: F) -> StoreResult<R>
    where
        E: Clone,
        F: FnOnce(&mut E) -> R,
    {
        let index = self
            .position(id)
            .ok_or(StoreError::NotFound { kind: E::KIND, id })?;
        let record = &mut self.records[index];
        let before = record.clone();
        let outcome = change(record);
        if record.id() != id {
            *record = before;
            warn!(
                "event=record_modify module=store status=error kind={} id={id} reason=id_reassigned",
                E::KIND
            );
            return Err(StoreError::IdReassigned { kind: E::KIND, id });
        }
        debug!(
            "event=record_modify module=store status=ok kind={} id={id}",
            E::KIND
        );
        Ok(outcome)
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }
}

impl<E: Entity> Repository<E> for MemoryStore<E> {
    fn list(&self) -> &[E] {
        &self.records
    }

    fn get(&self, id: RecordId) -> Option<&E> {
        self.records.iter().find(|record| record.id() == id)
    }

    fn insert(&mut self, record: E) -> StoreResult<RecordId> {
        let id = record.id();
        if self.position(id).is_some() {
            return Err(StoreError::DuplicateId { kind: E::KIND, id });
        }

        match E::INSERT_POSITION {
            InsertPosition::Append => self.records.push(record),
            InsertPosition::Prepend => self.records.insert(0, record),
        }
        debug!(
            "event=record_insert module=store status=ok kind={} id={} len={}",
            E::KIND,
            id,
            self.records.len()
        );
        Ok(id)
    }

    fn update(&mut self, id: RecordId, patch: E::Patch) -> bool {
        match self.records.iter_mut().find(|record| record.id() == id) {
            Some(record) => {
                record.apply_patch(patch);
                debug!(
                    "event=record_update module=store status=ok kind={} id={}",
                    E::KIND,
                    id
                );
                true
            }
            None => {
                debug!(
                    "event=record_update module=store status=skip kind={} id={} reason=not_found",
                    E::KIND,
                    id
                );
                false
            }
        }
    }

    fn remove(&mut self, id: RecordId) -> Option<E> {
        let index = self.position(id)?;
        let removed = self.records.remove(index);
        debug!(
            "event=record_remove module=store status=ok kind={} id={} len={}",
            E::KIND,
            id,
            self.records.len()
        );
        Some(removed)
    }
}
