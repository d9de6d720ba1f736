//! Board interaction controller.
//!
//! # Responsibility
//! - Map drag gestures and modal submissions onto synchronizer calls.
//! - Track the modal/editing state machine.
//!
//! # Invariants
//! - A drag that fails to resolve a target category id is a no-op: no
//!   state change, no synchronizer call.
//! - Modal cancel always returns to `Idle` with no side effect.
//! - Submissions in a non-matching state are no-ops.

use crate::model::board::{NoteId, NoteInput, NotePatch, TypeId};
use crate::repo::board_repo::BoardRepository;
use crate::sync::board_sync::{BoardSync, Mirror};
use crate::sync::notify::{NotificationSink, SilentSink};
use log::warn;

const DROP_ZONE_PREFIX: &str = "droppable-";

/// Modal/editing state of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardMode {
    Idle,
    CreatingNote { type_id: TypeId },
    EditingNote { note_id: NoteId },
    CreatingType,
    ConfirmingDelete { note_id: NoteId },
}

/// Values collected by the note modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteForm {
    pub content: String,
    pub type_id: TypeId,
    pub color: String,
}

/// Gesture-to-synchronizer front end over a `BoardSync`.
pub struct BoardController<R: BoardRepository, S: NotificationSink = SilentSink> {
    sync: BoardSync<R, S>,
    mode: BoardMode,
}

impl<R: BoardRepository, S: NotificationSink> BoardController<R, S> {
    pub fn new(sync: BoardSync<R, S>) -> Self {
        Self {
            sync,
            mode: BoardMode::Idle,
        }
    }

    pub fn mode(&self) -> BoardMode {
        self.mode
    }

    pub fn mirror(&self) -> &Mirror {
        self.sync.mirror()
    }

    pub fn sync(&self) -> &BoardSync<R, S> {
        &self.sync
    }

    pub fn sync_mut(&mut self) -> &mut BoardSync<R, S> {
        &mut self.sync
    }

    /// Drop onto a category column. Resolves the drop-zone identifier
    /// and moves the note directly (no modal). Malformed identifiers,
    /// unknown notes and same-column drops are no-ops.
    pub fn drag_to_zone(&mut self, note_id: NoteId, drop_zone: &str) {
        let Some(target) = parse_drop_zone(drop_zone) else {
            warn!("event=drag module=board status=ignored reason=bad_zone zone={drop_zone}");
            return;
        };
        let Some(note) = self.sync.notes().iter().find(|note| note.id == note_id) else {
            warn!("event=drag module=board status=ignored reason=unknown_note note_id={note_id}");
            return;
        };
        if note.type_id == target {
            return;
        }

        self.sync.move_note(note_id, target);
    }

    /// Drop outside any column: asks for delete confirmation.
    pub fn drag_to_void(&mut self, note_id: NoteId) {
        if self.mode != BoardMode::Idle {
            return;
        }
        if self.sync.notes().iter().any(|note| note.id == note_id) {
            self.mode = BoardMode::ConfirmingDelete { note_id };
        }
    }

    /// Opens the create-note modal for a column.
    pub fn begin_create_note(&mut self, type_id: TypeId) {
        if self.mode == BoardMode::Idle {
            self.mode = BoardMode::CreatingNote { type_id };
        }
    }

    /// Opens the edit modal for an existing note.
    pub fn begin_edit_note(&mut self, note_id: NoteId) {
        if self.mode != BoardMode::Idle {
            return;
        }
        if self.sync.notes().iter().any(|note| note.id == note_id) {
            self.mode = BoardMode::EditingNote { note_id };
        }
    }

    /// Opens the create-category modal.
    pub fn begin_create_type(&mut self) {
        if self.mode == BoardMode::Idle {
            self.mode = BoardMode::CreatingType;
        }
    }

    /// Submits the note modal. Creates or updates depending on the
    /// active mode; a no-op in any other mode.
    pub fn submit_note_form(&mut self, form: NoteForm) -> bool {
        match self.mode {
            BoardMode::CreatingNote { .. } => {
                let accepted = self.sync.add_note(&NoteInput {
                    content: form.content,
                    type_id: form.type_id,
                    color: form.color,
                });
                self.mode = BoardMode::Idle;
                accepted
            }
            BoardMode::EditingNote { note_id } => {
                let accepted = self.sync.edit_note(
                    note_id,
                    &NotePatch {
                        content: Some(form.content),
                        type_id: Some(form.type_id),
                        color: Some(form.color),
                    },
                );
                self.mode = BoardMode::Idle;
                accepted
            }
            _ => false,
        }
    }

    /// Submits the create-category modal; a no-op in any other mode.
    pub fn submit_type_form(&mut self, type_name: &str) -> bool {
        if self.mode != BoardMode::CreatingType {
            return false;
        }
        let accepted = self.sync.add_type(type_name);
        self.mode = BoardMode::Idle;
        accepted
    }

    /// Confirms a pending delete; a no-op outside `ConfirmingDelete`.
    pub fn confirm_delete(&mut self) -> bool {
        let BoardMode::ConfirmingDelete { note_id } = self.mode else {
            return false;
        };
        let accepted = self.sync.remove_note(note_id);
        self.mode = BoardMode::Idle;
        accepted
    }

    /// Closes any open modal without side effects.
    pub fn cancel(&mut self) {
        self.mode = BoardMode::Idle;
    }
}

/// Resolves a drop-zone identifier of the form `droppable-<id>`.
pub fn parse_drop_zone(drop_zone: &str) -> Option<TypeId> {
    drop_zone
        .strip_prefix(DROP_ZONE_PREFIX)?
        .parse::<TypeId>()
        .ok()
}
