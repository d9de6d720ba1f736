//! Domain model for notes and user-defined categories.
//!
//! # Responsibility
//! - Define the canonical shapes shared by repository, synchronizer and
//!   controller layers.
//!
//! # Invariants
//! - Identifiers are store-assigned and never reused for another row.
//! - A note is only *visible* when its `type_id` resolves to a category
//!   owned by the same user.

pub mod board;
pub mod color;
