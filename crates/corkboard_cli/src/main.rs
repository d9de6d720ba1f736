//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `corkboard_core` wiring:
//!   migrations, repository, synchronizer and the contrast helper run
//!   against a throwaway in-memory board.

use corkboard_core::db::{gateway, open_db_in_memory};
use corkboard_core::model::color;
use corkboard_core::{
    BoardRepository, BoardSync, NoteInput, SessionUser, SignedIn, SilentSink,
    SqliteBoardRepository,
};

fn main() {
    println!("corkboard_core version={}", corkboard_core::core_version());

    let conn = open_db_in_memory().expect("in-memory db should open");
    let user = gateway::insert_user(&conn, "demo@example.com", "Demo", "$argon2id$demo")
        .expect("demo user should insert");
    let session = SignedIn::new(SessionUser {
        id: user.id,
        name: user.name,
        email: user.email,
    });

    let repo = SqliteBoardRepository::new(&conn);
    repo.create_type(&session, "Ideas");
    let type_id = repo
        .list_types(&session)
        .first()
        .expect("created type should be listed")
        .id;

    let mut sync = BoardSync::new(repo, Box::new(session), SilentSink);
    sync.refresh();
    sync.add_note(&NoteInput {
        content: "hello board".to_string(),
        type_id,
        color: "#D95806".to_string(),
    });

    for note in sync.notes() {
        let contrast = if color::is_dark(&note.color) {
            "light-text"
        } else {
            "dark-text"
        };
        println!(
            "[{}] {} ({} {contrast})",
            note.type_name, note.content, note.color
        );
    }
}
