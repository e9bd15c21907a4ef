//! In-memory record store with optimistic edits
//!
//! Row lifecycle:
//!
//! ```text
//! Clean ──begin_edit──▶ Editing ──commit──▶ PendingConfirmation ──success──▶ Reconciled
//!   ▲                     │  ▲                    │        │
//!   └──commit, no diff────┘  └──cancel_pending────┘        └──failure──▶ SaveFailed
//!                           ▲                                                  │
//!                           └────────────────────set_field─────────────────────┘
//! ```
//!
//! "No diff" looks at editable fields only. Computed fields are rewritten
//! locally on every edit and need not match the server's formatting.
//!
//! A single pending slot serializes confirmations: while one change waits
//! for confirmation or for the server, no other commit is accepted.

use chrono::Utc;
use contracts::domain::common::Resource;
use contracts::shared::record::{Record, RecordId, ID_FIELD};
use serde_json::Value;
use std::marker::PhantomData;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(RecordId),

    #[error("record {id} is {state:?}, cannot {operation}")]
    InvalidState {
        id: RecordId,
        state: RecordState,
        operation: &'static str,
    },

    #[error("a change to record {0} is already awaiting confirmation")]
    ConfirmationBusy(RecordId),

    #[error("no change is awaiting confirmation")]
    NothingPending,

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field {0} is computed and cannot be edited")]
    DerivedField(String),

    #[error("field {0} cannot be edited")]
    ReadOnlyField(String),

    #[error("`{value}` is not a valid {field}")]
    NotAllowed { field: String, value: String },

    #[error("server returned no record for {0}")]
    MissingServerRecord(RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Clean,
    Editing,
    PendingConfirmation,
    /// Replaced by the server's representation
    Reconciled,
    /// Last save was rejected; local edits are kept for a retry and
    /// further edits move the row back to `Editing`
    SaveFailed,
}

impl RecordState {
    fn can_begin_edit(self) -> bool {
        matches!(
            self,
            RecordState::Clean | RecordState::Reconciled | RecordState::SaveFailed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitAction {
    Save,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

/// Change awaiting confirmation and server acknowledgment
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    pub kind: MutationKind,
    pub target: RecordId,
    /// Snapshot taken when editing started
    pub original_item: Option<Record>,
}

/// Network call to issue once the user confirmed
#[derive(Debug, Clone, PartialEq)]
pub enum MutationRequest {
    Create { target: RecordId, payload: Record },
    Update { id: RecordId, payload: Record },
    Delete { id: RecordId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Nothing changed; no network call needed
    Unchanged,
    /// An unsaved draft was deleted locally
    DraftDiscarded,
    AwaitingConfirmation(PendingMutation),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    record: Record,
    state: RecordState,
    original: Option<Record>,
    last_error: Option<String>,
}

impl StoredRecord {
    fn clean(record: Record) -> Self {
        Self {
            record,
            state: RecordState::Clean,
            original: None,
            last_error: None,
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn state(&self) -> RecordState {
        self.state
    }

    pub fn original(&self) -> Option<&Record> {
        self.original.as_ref()
    }

    /// Message of the last failed save
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn id(&self) -> Option<RecordId> {
        self.record.id()
    }
}

/// Collection owned by one list view
#[derive(Debug)]
pub struct RecordStore<R> {
    rows: Vec<StoredRecord>,
    pending: Option<PendingMutation>,
    draft_seq: u64,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> RecordStore<R> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            pending: None,
            draft_seq: 0,
            _resource: PhantomData,
        }
    }

    /// Replace the collection with freshly fetched records
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.rows = records.into_iter().map(StoredRecord::clean).collect();
        self.pending = None;
        info!(collection = R::collection_name(), count = self.rows.len(), "records loaded");
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|row| &row.record)
    }

    pub fn rows(&self) -> &[StoredRecord] {
        &self.rows
    }

    pub fn get(&self, id: &RecordId) -> Option<&StoredRecord> {
        self.rows.iter().find(|row| row.id().as_ref() == Some(id))
    }

    pub fn state_of(&self, id: &RecordId) -> Option<RecordState> {
        self.get(id).map(|row| row.state)
    }

    pub fn pending(&self) -> Option<&PendingMutation> {
        self.pending.as_ref()
    }

    fn position(&self, id: &RecordId) -> Result<usize, StoreError> {
        self.rows
            .iter()
            .position(|row| row.id().as_ref() == Some(id))
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Insert an unsaved record at the top, already in `Editing`
    pub fn add_draft(&mut self) -> RecordId {
        let id = RecordId::temporary(Utc::now().timestamp_millis(), self.draft_seq);
        self.draft_seq += 1;

        let mut record = Record::new();
        record.set_id(&id);
        for (key, value) in R::blank_record().iter() {
            record.set(key.clone(), value.clone());
        }

        self.rows.insert(
            0,
            StoredRecord {
                original: Some(record.clone()),
                record,
                state: RecordState::Editing,
                last_error: None,
            },
        );
        debug!(collection = R::collection_name(), %id, "draft added");
        id
    }

    pub fn begin_edit(&mut self, id: &RecordId) -> Result<(), StoreError> {
        let pos = self.position(id)?;
        let row = &mut self.rows[pos];
        if row.state == RecordState::Editing {
            return Ok(());
        }
        if !row.state.can_begin_edit() {
            return Err(StoreError::InvalidState {
                id: id.clone(),
                state: row.state,
                operation: "begin editing",
            });
        }
        // After a failed save the snapshot still holds the server state
        if row.state != RecordState::SaveFailed || row.original.is_none() {
            row.original = Some(row.record.clone());
        }
        row.state = RecordState::Editing;
        Ok(())
    }

    /// Set an input field of a record being edited and recompute its
    /// derived fields in the same update
    pub fn set_field(&mut self, id: &RecordId, field: &str, value: Value) -> Result<(), StoreError> {
        let spec = R::field(field).ok_or_else(|| StoreError::UnknownField(field.to_string()))?;
        if !spec.is_editable() {
            return Err(if spec.derived {
                StoreError::DerivedField(field.to_string())
            } else {
                StoreError::ReadOnlyField(field.to_string())
            });
        }
        if let Value::String(text) = &value {
            if !text.trim().is_empty() && !spec.allows(text) {
                return Err(StoreError::NotAllowed {
                    field: field.to_string(),
                    value: text.clone(),
                });
            }
        }

        let pos = self.position(id)?;
        let row = &mut self.rows[pos];
        match row.state {
            RecordState::Editing => {}
            // A rejected save stays open for correction
            RecordState::SaveFailed => {
                row.state = RecordState::Editing;
                row.last_error = None;
            }
            state => {
                return Err(StoreError::InvalidState {
                    id: id.clone(),
                    state,
                    operation: "edit",
                })
            }
        }
        row.record.set(field, value);
        R::derive(&mut row.record);
        Ok(())
    }

    /// Drop local edits: drafts disappear, other records get their snapshot back
    pub fn discard_edit(&mut self, id: &RecordId) -> Result<(), StoreError> {
        let pos = self.position(id)?;
        let row = &mut self.rows[pos];
        if !matches!(row.state, RecordState::Editing | RecordState::SaveFailed) {
            return Err(StoreError::InvalidState {
                id: id.clone(),
                state: row.state,
                operation: "discard edits",
            });
        }
        if id.is_temporary() {
            self.rows.remove(pos);
            return Ok(());
        }
        if let Some(original) = row.original.take() {
            row.record = original;
        }
        row.state = RecordState::Clean;
        row.last_error = None;
        Ok(())
    }

    /// Commit a save or delete. Produces the pending confirmation, or
    /// resolves locally when no server call is needed.
    pub fn commit(&mut self, id: &RecordId, action: CommitAction) -> Result<CommitOutcome, StoreError> {
        if let Some(pending) = &self.pending {
            return Err(StoreError::ConfirmationBusy(pending.target.clone()));
        }
        let pos = self.position(id)?;
        let row = &mut self.rows[pos];

        let allowed = match action {
            CommitAction::Save => matches!(row.state, RecordState::Editing | RecordState::SaveFailed),
            CommitAction::Delete => row.state != RecordState::PendingConfirmation,
        };
        if !allowed {
            return Err(StoreError::InvalidState {
                id: id.clone(),
                state: row.state,
                operation: "commit",
            });
        }

        let kind = match action {
            CommitAction::Save if id.is_temporary() => MutationKind::Create,
            CommitAction::Save => {
                if !has_user_changes::<R>(row.original.as_ref(), &row.record) {
                    // Keep the server's representation of computed fields
                    if let Some(original) = row.original.take() {
                        row.record = original;
                    }
                    row.state = RecordState::Clean;
                    row.last_error = None;
                    debug!(collection = R::collection_name(), %id, "no changes, save skipped");
                    return Ok(CommitOutcome::Unchanged);
                }
                MutationKind::Update
            }
            CommitAction::Delete if id.is_temporary() => {
                self.rows.remove(pos);
                debug!(collection = R::collection_name(), %id, "draft discarded");
                return Ok(CommitOutcome::DraftDiscarded);
            }
            CommitAction::Delete => MutationKind::Delete,
        };

        if row.original.is_none() {
            row.original = Some(row.record.clone());
        }
        row.state = RecordState::PendingConfirmation;
        let pending = PendingMutation {
            kind,
            target: id.clone(),
            original_item: row.original.clone(),
        };
        self.pending = Some(pending.clone());
        Ok(CommitOutcome::AwaitingConfirmation(pending))
    }

    /// The user dismissed the confirmation step
    pub fn cancel_pending(&mut self) -> Result<RecordId, StoreError> {
        let pending = self.pending.take().ok_or(StoreError::NothingPending)?;
        let pos = self.position(&pending.target)?;
        let row = &mut self.rows[pos];
        if !pending.target.is_temporary() && !has_user_changes::<R>(row.original.as_ref(), &row.record) {
            if let Some(original) = row.original.take() {
                row.record = original;
            }
            row.state = RecordState::Clean;
        } else {
            row.state = RecordState::Editing;
        }
        Ok(pending.target)
    }

    /// The user confirmed; returns the call to issue. The slot stays
    /// occupied until the call is resolved.
    pub fn confirm(&self) -> Result<MutationRequest, StoreError> {
        let pending = self.pending.as_ref().ok_or(StoreError::NothingPending)?;
        let row = &self.rows[self.position(&pending.target)?];

        let request = match pending.kind {
            MutationKind::Create => MutationRequest::Create {
                target: pending.target.clone(),
                payload: payload_of(&row.record),
            },
            MutationKind::Update => MutationRequest::Update {
                id: pending.target.clone(),
                payload: payload_of(&row.record),
            },
            MutationKind::Delete => MutationRequest::Delete {
                id: pending.target.clone(),
            },
        };
        Ok(request)
    }

    /// Apply the server's acknowledgment. Create/update replace the row in
    /// place with the server representation, delete removes it. Returns
    /// the identifier the row now has (or had, for deletes).
    pub fn resolve_success(&mut self, response: Option<Record>) -> Result<RecordId, StoreError> {
        let (kind, target) = {
            let pending = self.pending.as_ref().ok_or(StoreError::NothingPending)?;
            (pending.kind, pending.target.clone())
        };
        let pos = self.position(&target)?;

        let resolved = match kind {
            MutationKind::Create | MutationKind::Update => {
                let server = response.ok_or_else(|| StoreError::MissingServerRecord(target.clone()))?;
                let new_id = server.id().unwrap_or_else(|| {
                    warn!(collection = R::collection_name(), %target, "server record has no id");
                    target.clone()
                });
                self.rows[pos] = StoredRecord {
                    record: server,
                    state: RecordState::Reconciled,
                    original: None,
                    last_error: None,
                };
                new_id
            }
            MutationKind::Delete => {
                self.rows.remove(pos);
                target.clone()
            }
        };
        self.pending = None;
        info!(
            collection = R::collection_name(),
            ?kind,
            %target,
            id = %resolved,
            "change reconciled"
        );
        Ok(resolved)
    }

    /// The server call failed: edits stay, the row is marked `SaveFailed`
    /// and the slot is freed for a retry
    pub fn resolve_failure(&mut self, message: impl Into<String>) -> Result<RecordId, StoreError> {
        let pending = self.pending.take().ok_or(StoreError::NothingPending)?;
        let message = message.into();
        warn!(
            collection = R::collection_name(),
            kind = ?pending.kind,
            target = %pending.target,
            error = %message,
            "change rejected"
        );
        let pos = self.position(&pending.target)?;
        let row = &mut self.rows[pos];
        row.state = RecordState::SaveFailed;
        row.last_error = Some(message);
        Ok(pending.target)
    }
}

/// Whether an editable field differs from the snapshot. Computed fields
/// are left out: the server may write them in another form (`"13500.00"`,
/// `4500.0`) than the local recomputation.
fn has_user_changes<R: Resource>(original: Option<&Record>, record: &Record) -> bool {
    let Some(original) = original else {
        return true;
    };
    R::fields()
        .iter()
        .filter(|f| f.is_editable())
        .any(|f| original.get(f.name) != record.get(f.name))
}

/// Body sent to the server: the record without its identifier
fn payload_of(record: &Record) -> Record {
    let mut payload = record.clone();
    payload.remove(ID_FIELD);
    payload
}
