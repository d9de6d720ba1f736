//! Board interaction layer: gesture and modal state handling.
//!
//! # Responsibility
//! - Translate user gestures (drag, add, edit, delete) into
//!   synchronizer calls.
//! - Own the modal/editing state machine.

pub mod controller;
