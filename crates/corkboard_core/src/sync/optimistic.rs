//! Optimistic mutation commands over the board mirror.
//!
//! # Responsibility
//! - Capture each optimistic mirror mutation as a command with a
//!   symmetric `apply`/`rollback` pair.
//!
//! # Invariants
//! - `rollback` after `apply` restores the mirror to its prior state.
//! - The commit leg is the post-success refetch: a confirmed server
//!   response replaces the mirror wholesale, superseding the command.

use crate::model::board::{NoteId, TypeId};
use crate::sync::board_sync::{Mirror, MirrorType, TypeSlot};
use uuid::Uuid;

/// Moves a note to another category in the mirror before the backing
/// write resolves.
#[derive(Debug)]
pub struct MoveCommand {
    note_id: NoteId,
    to_type: TypeId,
    prior: Option<(TypeId, String)>,
}

impl MoveCommand {
    pub fn new(note_id: NoteId, to_type: TypeId) -> Self {
        Self {
            note_id,
            to_type,
            prior: None,
        }
    }

    /// Flips the note's category in the mirror, remembering the prior
    /// `(type_id, type_name)` pair. Returns `false` when the note is
    /// not mirrored, in which case nothing changed.
    pub fn apply(&mut self, mirror: &mut Mirror) -> bool {
        let Some(note) = mirror.notes.iter_mut().find(|note| note.id == self.note_id) else {
            return false;
        };

        self.prior = Some((note.type_id, note.type_name.clone()));
        note.type_id = self.to_type;
        // The target name may be a pending entry without a server id;
        // in that case the stale name stands until the next refetch.
        if let Some(target) = mirror
            .types
            .iter()
            .find(|entry| entry.slot == TypeSlot::Confirmed(self.to_type))
        {
            let target_name = target.type_name.clone();
            if let Some(note) = mirror.notes.iter_mut().find(|note| note.id == self.note_id) {
                note.type_name = target_name;
            }
        }
        true
    }

    /// Restores the prior category; a no-op when `apply` never landed.
    pub fn rollback(&mut self, mirror: &mut Mirror) {
        let Some((type_id, type_name)) = self.prior.take() else {
            return;
        };
        if let Some(note) = mirror.notes.iter_mut().find(|note| note.id == self.note_id) {
            note.type_id = type_id;
            note.type_name = type_name;
        }
    }
}

/// Inserts a locally-synthesized pending category while the create
/// request is in flight.
#[derive(Debug)]
pub struct TypeAddCommand {
    temp_id: Uuid,
    type_name: String,
}

impl TypeAddCommand {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            temp_id: Uuid::new_v4(),
            type_name: type_name.into(),
        }
    }

    pub fn apply(&self, mirror: &mut Mirror) {
        mirror.types.push(MirrorType {
            slot: TypeSlot::Pending(self.temp_id),
            type_name: self.type_name.clone(),
        });
    }

    pub fn rollback(&self, mirror: &mut Mirror) {
        mirror
            .types
            .retain(|entry| entry.slot != TypeSlot::Pending(self.temp_id));
    }
}

/// Removes a category from the mirror before the backing delete
/// resolves, restoring it in place on failure.
#[derive(Debug)]
pub struct TypeRemoveCommand {
    type_id: TypeId,
    removed: Option<(usize, MirrorType)>,
}

impl TypeRemoveCommand {
    pub fn new(type_id: TypeId) -> Self {
        Self {
            type_id,
            removed: None,
        }
    }

    pub fn apply(&mut self, mirror: &mut Mirror) {
        if let Some(index) = mirror
            .types
            .iter()
            .position(|entry| entry.slot == TypeSlot::Confirmed(self.type_id))
        {
            self.removed = Some((index, mirror.types.remove(index)));
        }
    }

    pub fn rollback(&mut self, mirror: &mut Mirror) {
        if let Some((index, entry)) = self.removed.take() {
            let index = index.min(mirror.types.len());
            mirror.types.insert(index, entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MoveCommand, TypeAddCommand, TypeRemoveCommand};
    use crate::model::board::NoteWithTypeName;
    use crate::sync::board_sync::{Mirror, MirrorType, TypeSlot};

    fn mirror_with_one_note() -> Mirror {
        Mirror {
            notes: vec![NoteWithTypeName {
                id: 1,
                content: "x".to_string(),
                type_id: 10,
                color: "#fff".to_string(),
                type_name: "A".to_string(),
            }],
            types: vec![
                MirrorType {
                    slot: TypeSlot::Confirmed(10),
                    type_name: "A".to_string(),
                },
                MirrorType {
                    slot: TypeSlot::Confirmed(20),
                    type_name: "B".to_string(),
                },
            ],
        }
    }

    #[test]
    fn move_apply_then_rollback_restores_prior_state() {
        let mut mirror = mirror_with_one_note();
        let mut command = MoveCommand::new(1, 20);

        assert!(command.apply(&mut mirror));
        assert_eq!(mirror.notes[0].type_id, 20);
        assert_eq!(mirror.notes[0].type_name, "B");

        command.rollback(&mut mirror);
        assert_eq!(mirror.notes[0].type_id, 10);
        assert_eq!(mirror.notes[0].type_name, "A");
    }

    #[test]
    fn move_apply_is_noop_for_unknown_note() {
        let mut mirror = mirror_with_one_note();
        let mut command = MoveCommand::new(99, 20);
        assert!(!command.apply(&mut mirror));
        assert_eq!(mirror.notes[0].type_id, 10);
    }

    #[test]
    fn type_add_rollback_removes_only_its_pending_entry() {
        let mut mirror = mirror_with_one_note();
        let command = TypeAddCommand::new("Pending col");
        command.apply(&mut mirror);
        assert_eq!(mirror.types.len(), 3);

        command.rollback(&mut mirror);
        assert_eq!(mirror.types.len(), 2);
        assert!(mirror
            .types
            .iter()
            .all(|entry| matches!(entry.slot, TypeSlot::Confirmed(_))));
    }

    #[test]
    fn type_remove_rollback_restores_at_original_index() {
        let mut mirror = mirror_with_one_note();
        let mut command = TypeRemoveCommand::new(10);
        command.apply(&mut mirror);
        assert_eq!(mirror.types.len(), 1);

        command.rollback(&mut mirror);
        assert_eq!(mirror.types.len(), 2);
        assert_eq!(mirror.types[0].slot, TypeSlot::Confirmed(10));
    }
}
