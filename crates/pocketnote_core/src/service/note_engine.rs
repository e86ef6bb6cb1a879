//! Group/note state engine.
//!
//! # Responsibility
//! - Hold the collection and the active-group selection for one session.
//! - Validate input and allocate ids for new groups and notes.
//! - Write the full collection through the store adapter after every commit.
//!
//! # Invariants
//! - The engine is only constructed after a successful initial load, so no
//!   operation can run against an unloaded collection, and no commit can
//!   overwrite data that failed to read.
//! - Rejected calls (`InvalidInput`, `NoActiveGroup`) leave state untouched
//!   and write nothing.
//! - After a successful commit the stored collection equals the in-memory
//!   one. After a failed write the in-memory collection stays authoritative
//!   and the next commit rewrites it in full.
//! - Selection is never persisted and never validated on `select_group`.

use crate::model::group::{Collection, Group, GroupId, GroupSummary};
use crate::model::id::allocate_id;
use crate::model::note::{created_at_label, Note, NoteId};
use crate::model::validation::{require_text, BlankInputError, InputField};
use crate::store::collection_store::CollectionStore;
use crate::store::{KeyValueStore, StoreError};
use chrono::Local;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors returned by engine operations.
#[derive(Debug)]
pub enum EngineError {
    /// Required text was empty or whitespace only.
    InvalidInput(BlankInputError),
    /// Note creation attempted without a selected, existing group.
    NoActiveGroup,
    /// The stored collection could not be read; no engine was opened.
    LoadFailure(StoreError),
    /// The in-memory change was applied but the store rejected the write.
    ///
    /// `unsaved` carries the value the call would have returned; it is part
    /// of the in-memory collection already.
    Persistence {
        source: StoreError,
        unsaved: Option<UnsavedChange>,
    },
}

/// Value created by a mutation whose write failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsavedChange {
    Group(Group),
    Note { group_id: GroupId, note: Note },
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::NoActiveGroup => write!(f, "no active group selected"),
            Self::LoadFailure(err) => write!(f, "failed to read stored collection: {err}"),
            Self::Persistence { source, .. } => {
                write!(f, "failed to persist collection: {source}")
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::LoadFailure(err) => Some(err),
            Self::Persistence { source, .. } => Some(source),
            Self::NoActiveGroup => None,
        }
    }
}

impl From<BlankInputError> for EngineError {
    fn from(value: BlankInputError) -> Self {
        Self::InvalidInput(value)
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Session-scoped owner of the group/note collection.
pub struct NoteEngine<S: KeyValueStore> {
    store: CollectionStore<S>,
    groups: Collection,
    active_group: Option<GroupId>,
    synced: bool,
}

impl<S: KeyValueStore> NoteEngine<S> {
    /// Loads the stored collection and returns a ready engine with no
    /// selection.
    ///
    /// # Errors
    /// - `LoadFailure` when the backing store cannot be read. Absent or
    ///   corrupt data is not an error and opens an empty collection.
    pub fn open(store: CollectionStore<S>) -> EngineResult<Self> {
        let groups = store.load().map_err(EngineError::LoadFailure)?;
        info!(
            "event=engine_open module=engine status=ok groups={}",
            groups.len()
        );
        Ok(Self {
            store,
            groups,
            active_group: None,
            synced: true,
        })
    }

    /// Creates a group named `name` at the end of the collection.
    ///
    /// # Errors
    /// - `InvalidInput` when `name` is blank; nothing changes.
    /// - `Persistence` when the write fails; the group stays in memory and
    ///   is returned as `UnsavedChange::Group`.
    pub fn create_group(&mut self, name: impl Into<String>) -> EngineResult<Group> {
        let name = require_text(InputField::GroupName, name.into())?;
        let groups = &self.groups;
        let id = GroupId::new(allocate_id(|candidate| {
            groups.iter().any(|group| group.id.as_str() == candidate)
        }));

        let group = Group::new(id, name);
        self.groups.push(group.clone());
        info!(
            "event=group_create module=engine status=ok group_id={} groups={}",
            group.id,
            self.groups.len()
        );

        self.commit().map_err(|source| EngineError::Persistence {
            source,
            unsaved: Some(UnsavedChange::Group(group.clone())),
        })?;
        Ok(group)
    }

    /// Points note creation at `group_id`.
    ///
    /// Existence is not checked here; a dangling selection makes
    /// [`Self::add_note`] fail with `NoActiveGroup`.
    pub fn select_group(&mut self, group_id: GroupId) {
        debug!(
            "event=group_select module=engine status=ok group_id={} known={}",
            group_id,
            self.group(&group_id).is_some()
        );
        self.active_group = Some(group_id);
    }

    /// Drops the active-group selection.
    pub fn clear_selection(&mut self) {
        self.active_group = None;
    }

    /// Returns the selected group id, if any.
    pub fn active_group(&self) -> Option<&GroupId> {
        self.active_group.as_ref()
    }

    /// Appends a note to the active group.
    ///
    /// # Errors
    /// - `InvalidInput` when `text` is blank.
    /// - `NoActiveGroup` when nothing is selected or the selection does not
    ///   match any group.
    /// - `Persistence` when the write fails; the note stays in memory and
    ///   is returned as `UnsavedChange::Note`.
    pub fn add_note(&mut self, text: impl Into<String>) -> EngineResult<Note> {
        let text = require_text(InputField::NoteText, text.into())?;
        let active_group = self.active_group.as_ref().ok_or(EngineError::NoActiveGroup)?;
        let group = self
            .groups
            .iter_mut()
            .find(|group| &group.id == active_group)
            .ok_or(EngineError::NoActiveGroup)?;

        let id = NoteId::new(allocate_id(|candidate| group.has_note(candidate)));
        let note = Note::new(id, text, created_at_label(&Local::now()));
        group.notes.push(note.clone());
        info!(
            "event=note_create module=engine status=ok group_id={} note_id={} notes={}",
            group.id,
            note.id,
            group.notes.len()
        );
        let group_id = group.id.clone();

        self.commit().map_err(|source| EngineError::Persistence {
            source,
            unsaved: Some(UnsavedChange::Note {
                group_id,
                note: note.clone(),
            }),
        })?;
        Ok(note)
    }

    /// Returns the notes of `group_id` in creation order.
    ///
    /// Empty when `group_id` is `None` or unknown.
    pub fn get_notes(&self, group_id: Option<&GroupId>) -> &[Note] {
        group_id
            .and_then(|group_id| self.group(group_id))
            .map(|group| group.notes.as_slice())
            .unwrap_or_default()
    }

    /// Returns the notes of the active group.
    pub fn active_notes(&self) -> &[Note] {
        self.get_notes(self.active_group.as_ref())
    }

    /// Returns all groups in creation order.
    pub fn groups(&self) -> &[Group] {
        self.groups.as_slice()
    }

    /// Returns id/name listing rows in creation order.
    pub fn group_summaries(&self) -> Vec<GroupSummary> {
        self.groups.iter().map(GroupSummary::from).collect()
    }

    /// Looks up one group by id.
    pub fn group(&self, group_id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| &group.id == group_id)
    }

    /// Returns whether the last commit reached the store.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// Rewrites the full collection now.
    ///
    /// Commits already do this; `flush` lets a caller retry after a failed
    /// write without making another change.
    pub fn flush(&mut self) -> EngineResult<()> {
        self.commit().map_err(|source| EngineError::Persistence {
            source,
            unsaved: None,
        })
    }

    /// Borrows the store adapter.
    pub fn store(&self) -> &CollectionStore<S> {
        &self.store
    }

    /// Mutably borrows the store adapter.
    pub fn store_mut(&mut self) -> &mut CollectionStore<S> {
        &mut self.store
    }

    /// Ends the session and hands back the store adapter.
    pub fn into_store(self) -> CollectionStore<S> {
        self.store
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        match self.store.save(&self.groups) {
            Ok(()) => {
                self.synced = true;
                Ok(())
            }
            Err(err) => {
                self.synced = false;
                warn!(
                    "event=commit module=engine status=error error_code=persist_failed groups={}",
                    self.groups.len()
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineError, NoteEngine};
    use crate::model::group::GroupId;
    use crate::store::collection_store::CollectionStore;
    use crate::store::memory_kv::MemoryKeyValueStore;

    fn empty_engine() -> NoteEngine<MemoryKeyValueStore> {
        NoteEngine::open(CollectionStore::new(MemoryKeyValueStore::new())).unwrap()
    }

    #[test]
    fn open_on_empty_store_has_no_groups_and_no_selection() {
        let engine = empty_engine();
        assert!(engine.groups().is_empty());
        assert!(engine.active_group().is_none());
        assert!(engine.is_synced());
    }

    #[test]
    fn select_group_accepts_unknown_id() {
        let mut engine = empty_engine();
        engine.select_group(GroupId::new("missing"));
        assert_eq!(engine.active_group(), Some(&GroupId::new("missing")));
        assert!(engine.active_notes().is_empty());
    }

    #[test]
    fn add_note_with_dangling_selection_fails_without_writing() {
        let mut engine = empty_engine();
        engine.select_group(GroupId::new("missing"));
        let err = engine.add_note("hello").unwrap_err();
        assert!(matches!(err, EngineError::NoActiveGroup));
        assert_eq!(engine.store().backend().used_bytes(), 0);
    }

    #[test]
    fn blank_text_is_reported_before_missing_selection() {
        let mut engine = empty_engine();
        let err = engine.add_note("  ").unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn clear_selection_returns_to_no_selection() {
        let mut engine = empty_engine();
        let group = engine.create_group("Work").unwrap();
        engine.select_group(group.id);
        engine.clear_selection();
        assert!(matches!(
            engine.add_note("hello").unwrap_err(),
            EngineError::NoActiveGroup
        ));
    }
}
