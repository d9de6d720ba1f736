//! Core domain logic for the corkboard note board.
//! This crate is the single source of truth for board consistency rules.

pub mod board;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod session;
pub mod sync;

pub use board::controller::{BoardController, BoardMode, NoteForm};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::board::{Note, NoteId, NoteInput, NotePatch, NoteType, NoteWithTypeName, TypeId};
pub use repo::board_repo::{BoardRepository, SqliteBoardRepository};
pub use session::{Session, SessionUser, SignedIn, SignedOut, UserId};
pub use sync::board_sync::{BoardSync, Mirror, MirrorType, TypeSlot};
pub use sync::notify::{NotificationSink, RecordingSink, SilentSink};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
