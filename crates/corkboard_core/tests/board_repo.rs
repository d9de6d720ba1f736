use corkboard_core::db::{gateway, open_db_in_memory};
use corkboard_core::{
    BoardRepository, NoteInput, NotePatch, Session, SessionUser, SignedIn, SignedOut,
    SqliteBoardRepository,
};
use rusqlite::Connection;

fn signed_in(conn: &Connection, email: &str, name: &str) -> SignedIn {
    let user = gateway::insert_user(conn, email, name, "$argon2id$stub").unwrap();
    SignedIn::new(SessionUser {
        id: user.id,
        name: user.name,
        email: user.email,
    })
}

fn owned_type(repo: &SqliteBoardRepository<'_>, ctx: &dyn Session, name: &str) -> i64 {
    assert!(repo.create_type(ctx, name));
    repo.list_types(ctx)
        .into_iter()
        .find(|entry| entry.type_name == name)
        .expect("created type should be listed")
        .id
}

fn note_input(content: &str, type_id: i64) -> NoteInput {
    NoteInput {
        content: content.to_string(),
        type_id,
        color: "#D95806".to_string(),
    }
}

#[test]
fn create_type_then_note_joins_type_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBoardRepository::new(&conn);
    let ctx = signed_in(&conn, "u@example.com", "U");

    let ideas = owned_type(&repo, &ctx, "Ideas");
    let types = repo.list_types(&ctx);
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].type_name, "Ideas");

    let created = repo
        .create_note(&ctx, &note_input("hello", ideas))
        .expect("create_note should persist");
    assert_eq!(created.content, "hello");
    assert_eq!(created.type_id, ideas);

    let listed = repo.list_notes(&ctx);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].type_name, "Ideas");
    assert_eq!(listed[0].content, "hello");
    assert_eq!(listed[0].id, created.id);
}

#[test]
fn unauthenticated_calls_fail_closed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBoardRepository::new(&conn);
    let ctx = signed_in(&conn, "u@example.com", "U");
    let ideas = owned_type(&repo, &ctx, "Ideas");

    let anon = SignedOut;
    assert!(repo.list_types(&anon).is_empty());
    assert!(repo.list_notes(&anon).is_empty());
    assert!(repo.create_note(&anon, &note_input("x", ideas)).is_none());
    assert!(repo
        .update_note(&anon, 1, &NotePatch::move_to(ideas))
        .is_none());
    assert!(!repo.delete_note(&anon, 1));
    assert!(!repo.create_type(&anon, "Nope"));
    assert!(!repo.delete_type(&anon, ideas));

    // No row was persisted by the rejected create.
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn listing_is_scoped_to_the_owner() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBoardRepository::new(&conn);
    let alice = signed_in(&conn, "alice@example.com", "Alice");
    let bob = signed_in(&conn, "bob@example.com", "Bob");

    let alice_type = owned_type(&repo, &alice, "Home");
    let bob_type = owned_type(&repo, &bob, "Work");
    repo.create_note(&alice, &note_input("alice note", alice_type))
        .unwrap();
    repo.create_note(&bob, &note_input("bob note", bob_type))
        .unwrap();

    let alice_notes = repo.list_notes(&alice);
    assert_eq!(alice_notes.len(), 1);
    assert_eq!(alice_notes[0].content, "alice note");

    let bob_types = repo.list_types(&bob);
    assert_eq!(bob_types.len(), 1);
    assert_eq!(bob_types[0].type_name, "Work");
}

#[test]
fn delete_type_orphans_notes_without_deleting_them() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBoardRepository::new(&conn);
    let ctx = signed_in(&conn, "u@example.com", "U");

    let ideas = owned_type(&repo, &ctx, "Ideas");
    let note = repo.create_note(&ctx, &note_input("keepme", ideas)).unwrap();

    assert!(repo.delete_type(&ctx, ideas));
    assert!(repo.list_notes(&ctx).is_empty());

    // The orphaned row is still in the datastore.
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM notes WHERE id = ?1;",
            [note.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn create_note_rejects_empty_content_and_foreign_types() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBoardRepository::new(&conn);
    let alice = signed_in(&conn, "alice@example.com", "Alice");
    let bob = signed_in(&conn, "bob@example.com", "Bob");

    let alice_type = owned_type(&repo, &alice, "Home");

    assert!(repo.create_note(&alice, &note_input("", alice_type)).is_none());
    assert!(repo
        .create_note(&alice, &note_input("   ", alice_type))
        .is_none());
    // Bob may not file notes into Alice's category.
    assert!(repo.create_note(&bob, &note_input("sneaky", alice_type)).is_none());
    // Unknown category.
    assert!(repo.create_note(&alice, &note_input("x", 999)).is_none());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn update_note_applies_partial_fields_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBoardRepository::new(&conn);
    let ctx = signed_in(&conn, "u@example.com", "U");
    let ideas = owned_type(&repo, &ctx, "Ideas");
    let note = repo.create_note(&ctx, &note_input("before", ideas)).unwrap();

    let updated = repo
        .update_note(
            &ctx,
            note.id,
            &NotePatch {
                content: Some("after".to_string()),
                ..NotePatch::default()
            },
        )
        .expect("update should succeed");

    assert_eq!(updated.content, "after");
    assert_eq!(updated.type_id, ideas);
    assert_eq!(updated.color, "#D95806");
}

#[test]
fn update_note_enforces_ownership_through_the_category_join() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBoardRepository::new(&conn);
    let alice = signed_in(&conn, "alice@example.com", "Alice");
    let bob = signed_in(&conn, "bob@example.com", "Bob");

    let alice_type = owned_type(&repo, &alice, "Home");
    let bob_type = owned_type(&repo, &bob, "Work");
    let note = repo
        .create_note(&alice, &note_input("private", alice_type))
        .unwrap();

    // Bob cannot touch Alice's note, even through his own category.
    assert!(repo
        .update_note(&bob, note.id, &NotePatch::move_to(bob_type))
        .is_none());
    // Alice cannot move her note into Bob's category.
    assert!(repo
        .update_note(&alice, note.id, &NotePatch::move_to(bob_type))
        .is_none());
    // Empty patches report failure rather than a silent no-op write.
    assert!(repo
        .update_note(&alice, note.id, &NotePatch::default())
        .is_none());

    let unchanged = repo.list_notes(&alice);
    assert_eq!(unchanged[0].type_id, alice_type);
    assert_eq!(unchanged[0].content, "private");
}

#[test]
fn delete_note_reports_false_for_missing_or_foreign_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBoardRepository::new(&conn);
    let alice = signed_in(&conn, "alice@example.com", "Alice");
    let bob = signed_in(&conn, "bob@example.com", "Bob");

    let alice_type = owned_type(&repo, &alice, "Home");
    let note = repo
        .create_note(&alice, &note_input("target", alice_type))
        .unwrap();

    assert!(!repo.delete_note(&alice, 424242));
    assert!(!repo.delete_note(&bob, note.id));
    assert!(repo.delete_note(&alice, note.id));
    // Deleting again reports failure, not an error.
    assert!(!repo.delete_note(&alice, note.id));
}

#[test]
fn duplicate_type_names_per_owner_are_permitted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBoardRepository::new(&conn);
    let ctx = signed_in(&conn, "u@example.com", "U");

    assert!(repo.create_type(&ctx, "Ideas"));
    assert!(repo.create_type(&ctx, "Ideas"));

    let types = repo.list_types(&ctx);
    assert_eq!(types.len(), 2);
    assert_ne!(types[0].id, types[1].id);
    assert!(types.iter().all(|entry| entry.type_name == "Ideas"));
}

#[test]
fn delete_type_rejects_foreign_owners() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBoardRepository::new(&conn);
    let alice = signed_in(&conn, "alice@example.com", "Alice");
    let bob = signed_in(&conn, "bob@example.com", "Bob");

    let alice_type = owned_type(&repo, &alice, "Home");
    assert!(!repo.delete_type(&bob, alice_type));
    assert_eq!(repo.list_types(&alice).len(), 1);
}
