//! Row-oriented persistence gateway.
//!
//! # Responsibility
//! - Execute single-statement CRUD against `users`, `notes_type` and
//!   `notes`, surfacing `DbError` unchanged.
//! - Keep SQL text and row mapping in one place; no business rules.
//!
//! # Invariants
//! - Ownership scoping is expressed only through parameters supplied by
//!   the repository layer; the gateway never decides who may see what.
//! - Every mutation is one round trip; no multi-statement transactions.

use crate::db::DbResult;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

/// Row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub name: String,
    /// PHC-formatted password hash; never a plaintext password.
    pub password: String,
}

/// Row of the `notes_type` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRow {
    pub id: i64,
    pub type_name: String,
    pub owner: i64,
}

/// Row of the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: i64,
    pub content: String,
    pub type_id: i64,
    pub color: String,
}

/// Inserts one user row and returns it with the assigned id.
pub fn insert_user(
    conn: &Connection,
    email: &str,
    name: &str,
    password_hash: &str,
) -> DbResult<UserRow> {
    conn.execute(
        "INSERT INTO users (email, name, password) VALUES (?1, ?2, ?3);",
        params![email, name, password_hash],
    )?;

    Ok(UserRow {
        id: conn.last_insert_rowid(),
        email: email.to_string(),
        name: name.to_string(),
        password: password_hash.to_string(),
    })
}

/// Inserts one category row and returns it with the assigned id.
pub fn insert_type(conn: &Connection, type_name: &str, owner: i64) -> DbResult<TypeRow> {
    conn.execute(
        "INSERT INTO notes_type (typeName, owner) VALUES (?1, ?2);",
        params![type_name, owner],
    )?;

    Ok(TypeRow {
        id: conn.last_insert_rowid(),
        type_name: type_name.to_string(),
        owner,
    })
}

/// Lists every category row owned by `owner`.
pub fn select_types_by_owner(conn: &Connection, owner: i64) -> DbResult<Vec<TypeRow>> {
    let mut stmt =
        conn.prepare("SELECT id, typeName, owner FROM notes_type WHERE owner = ?1;")?;
    let mut rows = stmt.query([owner])?;
    let mut types = Vec::new();
    while let Some(row) = rows.next()? {
        types.push(parse_type_row(row)?);
    }
    Ok(types)
}

/// Gets one category row by id.
pub fn select_type_by_id(conn: &Connection, id: i64) -> DbResult<Option<TypeRow>> {
    let mut stmt = conn.prepare("SELECT id, typeName, owner FROM notes_type WHERE id = ?1;")?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_type_row(row)?));
    }
    Ok(None)
}

/// Deletes one category row. Returns the number of deleted rows.
///
/// Does NOT touch `notes`: rows referencing the deleted id become
/// orphans by contract.
pub fn delete_type_row(conn: &Connection, id: i64) -> DbResult<usize> {
    let changed = conn.execute("DELETE FROM notes_type WHERE id = ?1;", [id])?;
    Ok(changed)
}

/// Inserts one note row and returns it with the assigned id.
pub fn insert_note(
    conn: &Connection,
    content: &str,
    type_id: i64,
    color: &str,
) -> DbResult<NoteRow> {
    conn.execute(
        "INSERT INTO notes (content, typeId, color) VALUES (?1, ?2, ?3);",
        params![content, type_id, color],
    )?;

    Ok(NoteRow {
        id: conn.last_insert_rowid(),
        content: content.to_string(),
        type_id,
        color: color.to_string(),
    })
}

/// Lists every note row whose `typeId` is in `type_ids`.
pub fn select_notes_by_type_ids(conn: &Connection, type_ids: &[i64]) -> DbResult<Vec<NoteRow>> {
    if type_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; type_ids.len()].join(", ");
    let sql = format!(
        "SELECT id, content, typeId, color FROM notes WHERE typeId IN ({placeholders});"
    );
    let bind_values: Vec<Value> = type_ids.iter().map(|id| Value::Integer(*id)).collect();

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut notes = Vec::new();
    while let Some(row) = rows.next()? {
        notes.push(parse_note_row(row)?);
    }
    Ok(notes)
}

/// Gets one note row by id, constrained to notes whose category is
/// owned by `owner`.
pub fn select_note_scoped(conn: &Connection, id: i64, owner: i64) -> DbResult<Option<NoteRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, content, typeId, color
         FROM notes
         WHERE id = ?1
           AND typeId IN (SELECT id FROM notes_type WHERE owner = ?2);",
    )?;
    let mut rows = stmt.query(params![id, owner])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_note_row(row)?));
    }
    Ok(None)
}

/// Applies a partial update to one note row, constrained to notes whose
/// category is owned by `owner`. Returns the number of changed rows; an
/// all-`None` patch changes nothing.
pub fn update_note_row(
    conn: &Connection,
    id: i64,
    content: Option<&str>,
    type_id: Option<i64>,
    color: Option<&str>,
    owner: i64,
) -> DbResult<usize> {
    let mut assignments: Vec<&str> = Vec::new();
    let mut bind_values: Vec<Value> = Vec::new();

    if let Some(content) = content {
        assignments.push("content = ?");
        bind_values.push(Value::Text(content.to_string()));
    }
    if let Some(type_id) = type_id {
        assignments.push("typeId = ?");
        bind_values.push(Value::Integer(type_id));
    }
    if let Some(color) = color {
        assignments.push("color = ?");
        bind_values.push(Value::Text(color.to_string()));
    }

    if assignments.is_empty() {
        return Ok(0);
    }

    let sql = format!(
        "UPDATE notes SET {} WHERE id = ? AND typeId IN (SELECT id FROM notes_type WHERE owner = ?);",
        assignments.join(", ")
    );
    bind_values.push(Value::Integer(id));
    bind_values.push(Value::Integer(owner));

    let changed = conn.execute(&sql, params_from_iter(bind_values))?;
    Ok(changed)
}

/// Deletes one note row, constrained to notes whose category is owned
/// by `owner`. Returns the number of deleted rows.
pub fn delete_note_row(conn: &Connection, id: i64, owner: i64) -> DbResult<usize> {
    let changed = conn.execute(
        "DELETE FROM notes
         WHERE id = ?1
           AND typeId IN (SELECT id FROM notes_type WHERE owner = ?2);",
        params![id, owner],
    )?;
    Ok(changed)
}

fn parse_type_row(row: &Row<'_>) -> DbResult<TypeRow> {
    Ok(TypeRow {
        id: row.get("id")?,
        type_name: row.get("typeName")?,
        owner: row.get("owner")?,
    })
}

fn parse_note_row(row: &Row<'_>) -> DbResult<NoteRow> {
    Ok(NoteRow {
        id: row.get("id")?,
        content: row.get("content")?,
        type_id: row.get("typeId")?,
        color: row.get("color")?,
    })
}
