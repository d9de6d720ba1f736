//! Board state synchronizer.
//!
//! # Responsibility
//! - Mirror the caller's notes/categories in memory and reconcile the
//!   mirror with repository responses after every mutation.
//! - Apply drag-move and category add/remove optimistically, rolling
//!   back on failure.
//! - Retain the most-recently-deleted note for a single-slot undo.
//!
//! # Invariants
//! - Mutations are fire-and-refetch; the mirror is replaced wholesale by
//!   `refresh`, never patched incrementally from the store.
//! - Notes with empty content never enter the mirror.
//! - Undo recreates the note through `create_note`; the recreated note
//!   receives a new id.

use crate::model::board::{NoteId, NoteInput, NotePatch, NoteWithTypeName, TypeId};
use crate::repo::board_repo::BoardRepository;
use crate::session::Session;
use crate::sync::notify::{NotificationSink, SilentSink};
use crate::sync::optimistic::{MoveCommand, TypeAddCommand, TypeRemoveCommand};
use log::info;
use uuid::Uuid;

/// Identity of a mirrored category entry.
///
/// `Pending` entries exist only locally while a create request is in
/// flight; the next successful refetch replaces them with `Confirmed`
/// server ids, so reconciliation is explicit and collision-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSlot {
    Pending(Uuid),
    Confirmed(TypeId),
}

/// A category entry as held by the mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorType {
    pub slot: TypeSlot,
    pub type_name: String,
}

impl MirrorType {
    /// Server id when the entry is confirmed.
    pub fn confirmed_id(&self) -> Option<TypeId> {
        match self.slot {
            TypeSlot::Confirmed(id) => Some(id),
            TypeSlot::Pending(_) => None,
        }
    }
}

/// The client-held in-memory copy of the caller's notes and categories.
#[derive(Debug, Clone, Default)]
pub struct Mirror {
    pub notes: Vec<NoteWithTypeName>,
    pub types: Vec<MirrorType>,
}

/// Synchronizer between the mirror and the board repository.
pub struct BoardSync<R: BoardRepository, S: NotificationSink = SilentSink> {
    repo: R,
    session: Box<dyn Session>,
    sink: S,
    mirror: Mirror,
    undo_slot: Option<NoteWithTypeName>,
}

impl<R: BoardRepository, S: NotificationSink> BoardSync<R, S> {
    /// Creates a synchronizer with an empty mirror; call `refresh` to
    /// populate it.
    pub fn new(repo: R, session: Box<dyn Session>, sink: S) -> Self {
        Self {
            repo,
            session,
            sink,
            mirror: Mirror::default(),
            undo_slot: None,
        }
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    pub fn notes(&self) -> &[NoteWithTypeName] {
        &self.mirror.notes
    }

    pub fn types(&self) -> &[MirrorType] {
        &self.mirror.types
    }

    /// Snapshot held in the undo slot, if any.
    pub fn last_deleted(&self) -> Option<&NoteWithTypeName> {
        self.undo_slot.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Full refetch of notes and categories.
    ///
    /// Replaces the mirror wholesale, which also reconciles pending
    /// category entries against their confirmed server rows. Notes with
    /// empty content are filtered out of the mirror.
    pub fn refresh(&mut self) {
        let notes = self.repo.list_notes(self.session.as_ref());
        let types = self.repo.list_types(self.session.as_ref());

        self.mirror.notes = notes
            .into_iter()
            .filter(|note| !note.content.is_empty())
            .collect();
        self.mirror.types = types
            .into_iter()
            .map(|entry| MirrorType {
                slot: TypeSlot::Confirmed(entry.id),
                type_name: entry.type_name,
            })
            .collect();
        info!(
            "event=refresh module=sync status=ok notes={} types={}",
            self.mirror.notes.len(),
            self.mirror.types.len()
        );
    }

    /// Creates a note, then unconditionally refetches.
    pub fn add_note(&mut self, input: &NoteInput) -> bool {
        let created = self.repo.create_note(self.session.as_ref(), input);
        self.refresh();
        match created {
            Some(_) => {
                self.sink.success("Note created successfully");
                true
            }
            None => {
                self.sink.error("Failed to create note");
                false
            }
        }
    }

    /// Applies a partial update, then unconditionally refetches.
    pub fn edit_note(&mut self, id: NoteId, patch: &NotePatch) -> bool {
        let updated = self.repo.update_note(self.session.as_ref(), id, patch);
        self.refresh();
        match updated {
            Some(_) => {
                self.sink.success("Note updated successfully");
                true
            }
            None => {
                self.sink.error("Failed to update note");
                false
            }
        }
    }

    /// Deletes a note; on success the snapshot lands in the undo slot
    /// (overwriting any previous snapshot) and the mirror is refetched.
    /// On failure the mirror is left untouched.
    pub fn remove_note(&mut self, id: NoteId) -> bool {
        let snapshot = self
            .mirror
            .notes
            .iter()
            .find(|note| note.id == id)
            .cloned();

        if !self.repo.delete_note(self.session.as_ref(), id) {
            self.sink.error("Failed to delete note");
            return false;
        }

        self.undo_slot = snapshot;
        self.refresh();
        self.sink.success("Note deleted successfully");
        true
    }

    /// Recreates the note held in the undo slot.
    ///
    /// The slot is consumed on invocation regardless of outcome; only
    /// the single most-recently-deleted note is ever undoable. The
    /// recreated note receives a new store-assigned id.
    pub fn undo_delete(&mut self) -> bool {
        let Some(snapshot) = self.undo_slot.take() else {
            return false;
        };

        let recreated = self
            .repo
            .create_note(self.session.as_ref(), &snapshot.as_input());
        match recreated {
            Some(_) => {
                self.refresh();
                self.sink.success("Note recovered successfully");
                true
            }
            None => {
                self.sink.error("Failed to recover note");
                false
            }
        }
    }

    /// Moves a note to another category, optimistically.
    ///
    /// The mirror flips before the repository call; a failed write rolls
    /// the mirror back to the prior category. A successful move does not
    /// refetch.
    pub fn move_note(&mut self, note_id: NoteId, new_type_id: TypeId) -> bool {
        let mut command = MoveCommand::new(note_id, new_type_id);
        if !command.apply(&mut self.mirror) {
            return false;
        }

        let updated = self.repo.update_note(
            self.session.as_ref(),
            note_id,
            &NotePatch::move_to(new_type_id),
        );
        match updated {
            Some(_) => {
                self.sink.success("Note moved successfully");
                true
            }
            None => {
                command.rollback(&mut self.mirror);
                self.sink.error("Failed to move note");
                false
            }
        }
    }

    /// Adds a category, optimistically.
    ///
    /// A pending entry appears in the mirror immediately; success
    /// refetches (replacing pending with the confirmed row), failure
    /// removes the pending entry.
    pub fn add_type(&mut self, type_name: &str) -> bool {
        let command = TypeAddCommand::new(type_name);
        command.apply(&mut self.mirror);

        if self.repo.create_type(self.session.as_ref(), type_name) {
            self.refresh();
            self.sink.success("Note type added successfully");
            true
        } else {
            command.rollback(&mut self.mirror);
            self.sink.error("Failed to add note type");
            false
        }
    }

    /// Removes a category, optimistically.
    ///
    /// The entry leaves the mirror immediately and is restored in place
    /// when the backing delete fails. Success refetches; notes orphaned
    /// by the delete disappear from the mirror without being deleted
    /// from the store.
    pub fn remove_type(&mut self, type_id: TypeId) -> bool {
        let mut command = TypeRemoveCommand::new(type_id);
        command.apply(&mut self.mirror);

        if self.repo.delete_type(self.session.as_ref(), type_id) {
            self.refresh();
            self.sink.success("Note type removed successfully");
            true
        } else {
            command.rollback(&mut self.mirror);
            self.sink.error("Failed to remove note type");
            false
        }
    }
}
