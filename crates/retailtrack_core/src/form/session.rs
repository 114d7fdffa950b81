//! Draft state machine shared by every record form.

use crate::model::record::{new_record_id, Entity, RecordId};
use crate::store::{Repository, StoreError};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FormResult<T> = Result<T, FormError>;

/// Form-stage error.
#[derive(Debug)]
pub enum FormError {
    /// Submit or field input arrived while no draft is open.
    NotEditing,
    /// Presentation layer referenced a field the draft does not have.
    UnknownField {
        kind: &'static str,
        field: String,
    },
    Store(StoreError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotEditing => write!(f, "no draft is open"),
            Self::UnknownField { kind, field } => {
                write!(f, "unknown {kind} form field `{field}`")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Text-driven field input for a draft.
pub trait DraftFields {
    /// Coerces `raw` into the named field. Returns `false` for unknown names.
    fn set_field(&mut self, field: &str, raw: &str) -> bool;
}

/// Records that can be created and edited through a [`FormSession`].
pub trait Draftable: Entity {
    /// Blank draft is `Default::default()`.
    type Draft: Default + Clone + DraftFields;

    /// Copies the editable fields of an existing record.
    fn to_draft(&self) -> Self::Draft;

    /// Builds a new record from a submitted draft.
    fn from_draft(id: RecordId, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Converts a submitted draft into a patch over the edited record.
    ///
    /// Fields outside the form (id, creation stamps) must stay untouched.
    fn draft_patch(draft: Self::Draft) -> Self::Patch;
}

/// Current form state.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState<D> {
    Empty,
    Editing {
        draft: D,
        /// Record being edited; `None` for a create form.
        target: Option<RecordId>,
    },
}

/// Result of a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(RecordId),
    Updated(RecordId),
    /// The edited record vanished before submit; the store is unchanged.
    Skipped(RecordId),
}

impl SubmitOutcome {
    pub fn record_id(self) -> RecordId {
        match self {
            Self::Created(id) | Self::Updated(id) | Self::Skipped(id) => id,
        }
    }
}

/// Create/edit form over one record type.
pub struct FormSession<E: Draftable> {
    state: FormState<E::Draft>,
}

impl<E: Draftable> Default for FormSession<E> {
    fn default() -> Self {
        Self {
            state: FormState::Empty,
        }
    }
}

impl<E: Draftable> FormSession<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState<E::Draft> {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, FormState::Editing { .. })
    }

    /// Id of the record being edited, if this is an edit form.
    pub fn target(&self) -> Option<RecordId> {
        match &self.state {
            FormState::Editing { target, .. } => *target,
            FormState::Empty => None,
        }
    }

    pub fn draft(&self) -> Option<&E::Draft> {
        match &self.state {
            FormState::Editing { draft, .. } => Some(draft),
            FormState::Empty => None,
        }
    }

    /// Direct access for structured edits such as sale line items.
    pub fn draft_mut(&mut self) -> Option<&mut E::Draft> {
        match &mut self.state {
            FormState::Editing { draft, .. } => Some(draft),
            FormState::Empty => None,
        }
    }

    /// Opens a blank create form, discarding any open draft.
    pub fn open_create(&mut self) {
        self.state = FormState::Editing {
            draft: E::Draft::default(),
            target: None,
        };
    }

    /// Opens an edit form pre-populated from `record`.
    pub fn open_edit(&mut self, record: &E) {
        self.state = FormState::Editing {
            draft: record.to_draft(),
            target: Some(record.id()),
        };
    }

    pub fn cancel(&mut self) {
        self.state = FormState::Empty;
    }

    /// Applies one text input to the open draft.
    pub fn set_field(&mut self, field: &str, raw: &str) -> FormResult<()> {
        let draft = self.draft_mut().ok_or(FormError::NotEditing)?;
        if draft.set_field(field, raw) {
            Ok(())
        } else {
            Err(FormError::UnknownField {
                kind: E::KIND,
                field: field.to_string(),
            })
        }
    }

    /// Commits the open draft and resets the form to `Empty`.
    ///
    /// # Errors
    /// - `NotEditing` when no draft is open.
    /// - `Store` when the repository rejects the insert (id collision).
    pub fn submit<R>(&mut self, repo: &mut R, now: DateTime<Utc>) -> FormResult<SubmitOutcome>
    where
        R: Repository<E> + ?Sized,
    {
        let FormState::Editing { draft, target } =
            std::mem::replace(&mut self.state, FormState::Empty)
        else {
            return Err(FormError::NotEditing);
        };

        match target {
            None => {
                let record = E::from_draft(new_record_id(), draft, now);
                let id = repo.insert(record)?;
                debug!(
                    "event=form_submit module=form status=ok kind={} mode=create id={}",
                    E::KIND,
                    id
                );
                Ok(SubmitOutcome::Created(id))
            }
            Some(id) => {
                if repo.update(id, E::draft_patch(draft)) {
                    debug!(
                        "event=form_submit module=form status=ok kind={} mode=edit id={}",
                        E::KIND,
                        id
                    );
                    Ok(SubmitOutcome::Updated(id))
                } else {
                    warn!(
                        "event=form_submit module=form status=skip kind={} mode=edit id={} reason=record_missing",
                        E::KIND,
                        id
                    );
                    Ok(SubmitOutcome::Skipped(id))
                }
            }
        }
    }
}
