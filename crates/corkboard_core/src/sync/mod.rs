//! Client-side state synchronization for the board.
//!
//! # Responsibility
//! - Hold the in-memory mirror of notes/categories for the active
//!   session and keep it consistent with the repository.
//! - Apply optimistic mutations with symmetric rollback and retain the
//!   single undo-after-delete snapshot.
//!
//! # Invariants
//! - Every mutation is fire-and-refetch; there is no incremental patch
//!   channel from the store.
//! - A failed optimistic mutation must restore the prior mirror state.

pub mod board_sync;
pub mod notify;
pub mod optimistic;
