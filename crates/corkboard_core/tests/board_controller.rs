use corkboard_core::db::{gateway, open_db_in_memory};
use corkboard_core::{
    BoardController, BoardMode, BoardRepository, BoardSync, NoteForm, RecordingSink, SessionUser,
    SignedIn, SqliteBoardRepository, TypeId,
};
use rusqlite::Connection;

fn board(conn: &Connection) -> (BoardController<SqliteBoardRepository<'_>, RecordingSink>, TypeId, TypeId)
{
    let user = gateway::insert_user(conn, "u@example.com", "U", "$argon2id$stub").unwrap();
    let session = SignedIn::new(SessionUser {
        id: user.id,
        name: user.name,
        email: user.email,
    });
    let repo = SqliteBoardRepository::new(conn);
    assert!(repo.create_type(&session, "Todo"));
    assert!(repo.create_type(&session, "Done"));
    let types = repo.list_types(&session);
    let todo = types
        .iter()
        .find(|entry| entry.type_name == "Todo")
        .unwrap()
        .id;
    let done = types
        .iter()
        .find(|entry| entry.type_name == "Done")
        .unwrap()
        .id;

    let mut sync = BoardSync::new(repo, Box::new(session), RecordingSink::default());
    sync.refresh();
    (BoardController::new(sync), todo, done)
}

fn add_note(
    controller: &mut BoardController<SqliteBoardRepository<'_>, RecordingSink>,
    content: &str,
    type_id: TypeId,
) -> i64 {
    controller.begin_create_note(type_id);
    assert!(controller.submit_note_form(NoteForm {
        content: content.to_string(),
        type_id,
        color: "#fff".to_string(),
    }));
    controller
        .mirror()
        .notes
        .iter()
        .find(|note| note.content == content)
        .expect("submitted note should be mirrored")
        .id
}

#[test]
fn create_note_modal_flow_lands_in_the_mirror() {
    let conn = open_db_in_memory().unwrap();
    let (mut controller, todo, _done) = board(&conn);

    controller.begin_create_note(todo);
    assert_eq!(controller.mode(), BoardMode::CreatingNote { type_id: todo });

    assert!(controller.submit_note_form(NoteForm {
        content: "write tests".to_string(),
        type_id: todo,
        color: "#D95806".to_string(),
    }));
    assert_eq!(controller.mode(), BoardMode::Idle);
    assert_eq!(controller.mirror().notes.len(), 1);
    assert_eq!(controller.mirror().notes[0].type_name, "Todo");
}

#[test]
fn edit_note_modal_flow_updates_fields() {
    let conn = open_db_in_memory().unwrap();
    let (mut controller, todo, done) = board(&conn);
    let note_id = add_note(&mut controller, "draft", todo);

    controller.begin_edit_note(note_id);
    assert_eq!(controller.mode(), BoardMode::EditingNote { note_id });

    assert!(controller.submit_note_form(NoteForm {
        content: "final".to_string(),
        type_id: done,
        color: "#000".to_string(),
    }));
    assert_eq!(controller.mode(), BoardMode::Idle);

    let note = &controller.mirror().notes[0];
    assert_eq!(note.content, "final");
    assert_eq!(note.type_id, done);
    assert_eq!(note.type_name, "Done");
}

#[test]
fn drag_to_zone_moves_between_columns() {
    let conn = open_db_in_memory().unwrap();
    let (mut controller, todo, done) = board(&conn);
    let note_id = add_note(&mut controller, "movable", todo);

    controller.drag_to_zone(note_id, &format!("droppable-{done}"));

    assert_eq!(controller.mode(), BoardMode::Idle);
    assert_eq!(controller.mirror().notes[0].type_id, done);
    assert!(controller
        .sync()
        .sink()
        .successes
        .contains(&"Note moved successfully".to_string()));
}

#[test]
fn malformed_drop_zone_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let (mut controller, todo, _done) = board(&conn);
    let note_id = add_note(&mut controller, "anchored", todo);
    let successes_after_setup = controller.sync().sink().successes.len();

    controller.drag_to_zone(note_id, "droppable-notanumber");
    controller.drag_to_zone(note_id, "sidebar");

    assert_eq!(controller.mode(), BoardMode::Idle);
    assert_eq!(controller.mirror().notes[0].type_id, todo);
    assert_eq!(controller.sync().sink().successes.len(), successes_after_setup);
    assert!(controller.sync().sink().errors.is_empty());
}

#[test]
fn same_column_drop_issues_no_call() {
    let conn = open_db_in_memory().unwrap();
    let (mut controller, todo, _done) = board(&conn);
    let note_id = add_note(&mut controller, "stationary", todo);

    controller.drag_to_zone(note_id, &format!("droppable-{todo}"));

    assert!(controller.sync().sink().successes.len() == 1); // only the create
    assert_eq!(controller.mirror().notes[0].type_id, todo);
}

#[test]
fn drag_to_void_then_confirm_deletes_the_note() {
    let conn = open_db_in_memory().unwrap();
    let (mut controller, todo, _done) = board(&conn);
    let note_id = add_note(&mut controller, "doomed", todo);

    controller.drag_to_void(note_id);
    assert_eq!(controller.mode(), BoardMode::ConfirmingDelete { note_id });

    assert!(controller.confirm_delete());
    assert_eq!(controller.mode(), BoardMode::Idle);
    assert!(controller.mirror().notes.is_empty());
    assert_eq!(
        controller.sync().last_deleted().map(|note| note.id),
        Some(note_id)
    );
}

#[test]
fn cancel_closes_the_modal_without_side_effects() {
    let conn = open_db_in_memory().unwrap();
    let (mut controller, todo, _done) = board(&conn);
    let note_id = add_note(&mut controller, "survivor", todo);

    controller.drag_to_void(note_id);
    assert_eq!(controller.mode(), BoardMode::ConfirmingDelete { note_id });
    controller.cancel();

    assert_eq!(controller.mode(), BoardMode::Idle);
    assert_eq!(controller.mirror().notes.len(), 1);
    // Confirming after cancel is a no-op.
    assert!(!controller.confirm_delete());
}

#[test]
fn submissions_outside_their_mode_are_noops() {
    let conn = open_db_in_memory().unwrap();
    let (mut controller, todo, _done) = board(&conn);

    assert!(!controller.submit_note_form(NoteForm {
        content: "stray".to_string(),
        type_id: todo,
        color: "#fff".to_string(),
    }));
    assert!(!controller.submit_type_form("stray"));
    assert!(!controller.confirm_delete());
    assert!(controller.mirror().notes.is_empty());
    assert_eq!(controller.mirror().types.len(), 2);
}

#[test]
fn create_type_modal_flow_adds_a_column() {
    let conn = open_db_in_memory().unwrap();
    let (mut controller, _todo, _done) = board(&conn);

    controller.begin_create_type();
    assert_eq!(controller.mode(), BoardMode::CreatingType);
    assert!(controller.submit_type_form("Blocked"));

    assert_eq!(controller.mode(), BoardMode::Idle);
    assert_eq!(controller.mirror().types.len(), 3);
    assert!(controller
        .mirror()
        .types
        .iter()
        .any(|entry| entry.type_name == "Blocked"));
}

#[test]
fn drag_of_an_unknown_note_is_ignored() {
    let conn = open_db_in_memory().unwrap();
    let (mut controller, _todo, done) = board(&conn);

    controller.drag_to_zone(999, &format!("droppable-{done}"));
    controller.drag_to_void(999);

    assert_eq!(controller.mode(), BoardMode::Idle);
}
