//! Note/category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Enforce ownership scoping on every read and write.
//! - Join notes to category names for list views, excluding orphans.
//! - Collapse all failures to the designated failure value and log them.
//!
//! # Invariants
//! - No entry point throws; `Unauthenticated`, `NotFound` and transport
//!   failures are indistinguishable in the return value by design.
//! - `create_note` never persists empty content.
//! - `update_note`/`delete_note` verify ownership by joining through the
//!   note's category. The original contract skipped this check; it is
//!   enforced here as a correctness fix.
//! - `delete_type` does NOT cascade to notes: orphaned notes stay in
//!   storage and are filtered out of `list_notes`.

use crate::db::gateway::{self, NoteRow};
use crate::model::board::{Note, NoteId, NoteInput, NotePatch, NoteType, NoteWithTypeName, TypeId};
use crate::session::{Session, SessionUser};
use log::{error, warn};
use rusqlite::Connection;
use std::collections::HashMap;

/// Scoped data-access contract for the board.
///
/// `ctx` is the opaque caller identity, resolved once per call. Methods
/// report failure through their return value only: an empty sequence,
/// `None` or `false`. Every operation is a single round trip; there is
/// no multi-statement transaction wrapping.
pub trait BoardRepository {
    /// Every category owned by `ctx`; empty on any failure. Order is not
    /// guaranteed.
    fn list_types(&self, ctx: &dyn Session) -> Vec<NoteType>;
    /// Every note whose category is owned by `ctx`, joined with the
    /// category name. Orphaned notes are excluded. Empty on any failure.
    fn list_notes(&self, ctx: &dyn Session) -> Vec<NoteWithTypeName>;
    /// Persists a note in a category owned by `ctx`; `None` on failure.
    fn create_note(&self, ctx: &dyn Session, input: &NoteInput) -> Option<Note>;
    /// Partial-field update; `None` when the note does not exist, is not
    /// owned by `ctx`, or the write fails.
    fn update_note(&self, ctx: &dyn Session, id: NoteId, patch: &NotePatch) -> Option<Note>;
    /// `true` on success; deleting a nonexistent or foreign id reports
    /// `false`, not an error.
    fn delete_note(&self, ctx: &dyn Session, id: NoteId) -> bool;
    /// Creates a category owned by `ctx`. Duplicate names are permitted.
    fn create_type(&self, ctx: &dyn Session, type_name: &str) -> bool;
    /// Deletes a category owned by `ctx`. Never deletes its notes.
    fn delete_type(&self, ctx: &dyn Session, id: TypeId) -> bool;
}

/// SQLite-backed board repository.
pub struct SqliteBoardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBoardRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn resolve_session(&self, op: &str, ctx: &dyn Session) -> Option<SessionUser> {
        let user = ctx.current_user();
        if user.is_none() {
            warn!("event={op} module=repo status=denied reason=no_session");
        }
        user
    }

    /// Checks that `type_id` exists and is owned by `owner`.
    fn type_owned_by(&self, op: &str, type_id: TypeId, owner: i64) -> bool {
        match gateway::select_type_by_id(self.conn, type_id) {
            Ok(Some(row)) if row.owner == owner => true,
            Ok(Some(_)) => {
                warn!("event={op} module=repo status=denied reason=foreign_type type_id={type_id}");
                false
            }
            Ok(None) => {
                warn!("event={op} module=repo status=failed reason=unknown_type type_id={type_id}");
                false
            }
            Err(err) => {
                error!("event={op} module=repo status=error error={err}");
                false
            }
        }
    }
}

impl BoardRepository for SqliteBoardRepository<'_> {
    fn list_types(&self, ctx: &dyn Session) -> Vec<NoteType> {
        let Some(user) = self.resolve_session("list_types", ctx) else {
            return Vec::new();
        };

        match gateway::select_types_by_owner(self.conn, user.id) {
            Ok(rows) => rows
                .into_iter()
                .map(|row| NoteType {
                    id: row.id,
                    type_name: row.type_name,
                    owner: row.owner,
                })
                .collect(),
            Err(err) => {
                error!("event=list_types module=repo status=error error={err}");
                Vec::new()
            }
        }
    }

    fn list_notes(&self, ctx: &dyn Session) -> Vec<NoteWithTypeName> {
        let Some(user) = self.resolve_session("list_notes", ctx) else {
            return Vec::new();
        };

        // Categories first: the id -> name map both scopes the note
        // fetch and supplies the derived names.
        let types = match gateway::select_types_by_owner(self.conn, user.id) {
            Ok(rows) => rows,
            Err(err) => {
                error!("event=list_notes module=repo status=error stage=types error={err}");
                return Vec::new();
            }
        };
        let name_by_id: HashMap<TypeId, String> = types
            .into_iter()
            .map(|row| (row.id, row.type_name))
            .collect();
        let type_ids: Vec<TypeId> = name_by_id.keys().copied().collect();

        let notes = match gateway::select_notes_by_type_ids(self.conn, &type_ids) {
            Ok(rows) => rows,
            Err(err) => {
                error!("event=list_notes module=repo status=error stage=notes error={err}");
                return Vec::new();
            }
        };

        notes
            .into_iter()
            .filter_map(|row| {
                // Defense against a type deleted between the two reads:
                // a note without a resolvable category name is an orphan.
                let type_name = name_by_id.get(&row.type_id)?.clone();
                Some(NoteWithTypeName {
                    id: row.id,
                    content: row.content,
                    type_id: row.type_id,
                    color: row.color,
                    type_name,
                })
            })
            .collect()
    }

    fn create_note(&self, ctx: &dyn Session, input: &NoteInput) -> Option<Note> {
        let user = self.resolve_session("create_note", ctx)?;

        if input.content.trim().is_empty() {
            warn!("event=create_note module=repo status=failed reason=empty_content");
            return None;
        }
        if !self.type_owned_by("create_note", input.type_id, user.id) {
            return None;
        }

        match gateway::insert_note(self.conn, &input.content, input.type_id, &input.color) {
            Ok(row) => Some(note_from_row(row)),
            Err(err) => {
                error!("event=create_note module=repo status=error error={err}");
                None
            }
        }
    }

    fn update_note(&self, ctx: &dyn Session, id: NoteId, patch: &NotePatch) -> Option<Note> {
        let user = self.resolve_session("update_note", ctx)?;

        if patch.is_empty() {
            warn!("event=update_note module=repo status=failed reason=empty_patch note_id={id}");
            return None;
        }
        if let Some(content) = patch.content.as_deref() {
            if content.trim().is_empty() {
                warn!("event=update_note module=repo status=failed reason=empty_content note_id={id}");
                return None;
            }
        }
        // A move must land in a category the caller owns.
        if let Some(new_type_id) = patch.type_id {
            if !self.type_owned_by("update_note", new_type_id, user.id) {
                return None;
            }
        }

        let changed = match gateway::update_note_row(
            self.conn,
            id,
            patch.content.as_deref(),
            patch.type_id,
            patch.color.as_deref(),
            user.id,
        ) {
            Ok(changed) => changed,
            Err(err) => {
                error!("event=update_note module=repo status=error note_id={id} error={err}");
                return None;
            }
        };
        if changed == 0 {
            warn!("event=update_note module=repo status=failed reason=not_found note_id={id}");
            return None;
        }

        match gateway::select_note_scoped(self.conn, id, user.id) {
            Ok(Some(row)) => Some(note_from_row(row)),
            Ok(None) => {
                error!("event=update_note module=repo status=error reason=readback_missing note_id={id}");
                None
            }
            Err(err) => {
                error!("event=update_note module=repo status=error note_id={id} error={err}");
                None
            }
        }
    }

    fn delete_note(&self, ctx: &dyn Session, id: NoteId) -> bool {
        let Some(user) = self.resolve_session("delete_note", ctx) else {
            return false;
        };

        match gateway::delete_note_row(self.conn, id, user.id) {
            Ok(0) => {
                warn!("event=delete_note module=repo status=failed reason=not_found note_id={id}");
                false
            }
            Ok(_) => true,
            Err(err) => {
                error!("event=delete_note module=repo status=error note_id={id} error={err}");
                false
            }
        }
    }

    fn create_type(&self, ctx: &dyn Session, type_name: &str) -> bool {
        let Some(user) = self.resolve_session("create_type", ctx) else {
            return false;
        };

        match gateway::insert_type(self.conn, type_name, user.id) {
            Ok(_) => true,
            Err(err) => {
                error!("event=create_type module=repo status=error error={err}");
                false
            }
        }
    }

    fn delete_type(&self, ctx: &dyn Session, id: TypeId) -> bool {
        let Some(user) = self.resolve_session("delete_type", ctx) else {
            return false;
        };
        if !self.type_owned_by("delete_type", id, user.id) {
            return false;
        }

        // One round trip, no cascade: notes referencing this id become
        // orphans and disappear from list views only.
        match gateway::delete_type_row(self.conn, id) {
            Ok(0) => {
                warn!("event=delete_type module=repo status=failed reason=not_found type_id={id}");
                false
            }
            Ok(_) => true,
            Err(err) => {
                error!("event=delete_type module=repo status=error type_id={id} error={err}");
                false
            }
        }
    }
}

fn note_from_row(row: NoteRow) -> Note {
    Note {
        id: row.id,
        content: row.content,
        type_id: row.type_id,
        color: row.color,
    }
}
