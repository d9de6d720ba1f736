//! Repository layer: scoped note/category data access.
//!
//! # Responsibility
//! - Define the fail-closed board data-access contract.
//! - Isolate SQLite gateway details from synchronizer orchestration.
//!
//! # Invariants
//! - Repository methods never raise to callers; every failure collapses
//!   to an empty sequence, `None` or `false` plus a logged diagnostic.
//! - Every entry point resolves the caller session first.

pub mod board_repo;
