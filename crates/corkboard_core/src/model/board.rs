//! Note and category record shapes.
//!
//! # Responsibility
//! - Define `Note`, `NoteType` and the derived `NoteWithTypeName` view.
//! - Keep serialized field names (`typeId`, `typeName`) aligned with the
//!   external row contract.
//!
//! # Invariants
//! - `NoteWithTypeName::type_name` is derived through `type_id` at read
//!   time; it is never stored.
//! - Duplicate `type_name` values per owner are permitted; categories
//!   are distinguished only by `id`.

use serde::{Deserialize, Serialize};

/// Store-assigned note identifier.
pub type NoteId = i64;
/// Store-assigned category identifier.
pub type TypeId = i64;

/// A single user-authored text item with a color and a category reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    #[serde(rename = "typeId")]
    pub type_id: TypeId,
    /// Hex (`#RGB`/`#RRGGBB`) or `rgb(r, g, b)` color spec.
    pub color: String,
}

/// Fields supplied by the caller when creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub content: String,
    #[serde(rename = "typeId")]
    pub type_id: TypeId,
    pub color: String,
}

/// Partial-field note update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "typeId", skip_serializing_if = "Option::is_none")]
    pub type_id: Option<TypeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NotePatch {
    /// A patch that only moves the note to another category.
    pub fn move_to(type_id: TypeId) -> Self {
        Self {
            type_id: Some(type_id),
            ..Self::default()
        }
    }

    /// Returns whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.type_id.is_none() && self.color.is_none()
    }
}

/// A user-defined category that groups notes (a board column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteType {
    pub id: TypeId,
    #[serde(rename = "typeName")]
    pub type_name: String,
    pub owner: i64,
}

/// Read view of a note joined with its resolved category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteWithTypeName {
    pub id: NoteId,
    pub content: String,
    #[serde(rename = "typeId")]
    pub type_id: TypeId,
    pub color: String,
    #[serde(rename = "typeName")]
    pub type_name: String,
}

impl NoteWithTypeName {
    /// Drops the derived name, leaving the stored note fields.
    pub fn into_note(self) -> Note {
        Note {
            id: self.id,
            content: self.content,
            type_id: self.type_id,
            color: self.color,
        }
    }

    /// Snapshot of the fields needed to recreate this note.
    ///
    /// Used by the undo path: the recreated note gets a new id, so the
    /// old `id` is deliberately not part of the snapshot.
    pub fn as_input(&self) -> NoteInput {
        NoteInput {
            content: self.content.clone(),
            type_id: self.type_id,
            color: self.color.clone(),
        }
    }
}
