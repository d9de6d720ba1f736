//! Caller identity seam for repository scoping.
//!
//! # Responsibility
//! - Define the `Session` contract the external auth collaborator
//!   fulfills, plus trivial implementations for wiring and tests.
//!
//! # Invariants
//! - Identity is resolved once per repository call and never mutated by
//!   the core.
//! - Every repository entry point fails closed when no identity is
//!   available.

/// Store-assigned user identifier.
pub type UserId = i64;

/// Identity attached to a session by the external auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Opaque caller identity resolved per repository call.
pub trait Session {
    /// Returns the signed-in user, or `None` when the session is invalid.
    fn current_user(&self) -> Option<SessionUser>;
}

/// A session carrying a fixed, already-authenticated identity.
#[derive(Debug, Clone)]
pub struct SignedIn {
    user: SessionUser,
}

impl SignedIn {
    pub fn new(user: SessionUser) -> Self {
        Self { user }
    }
}

impl Session for SignedIn {
    fn current_user(&self) -> Option<SessionUser> {
        Some(self.user.clone())
    }
}

/// A session with no identity; every repository call fails closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignedOut;

impl Session for SignedOut {
    fn current_user(&self) -> Option<SessionUser> {
        None
    }
}
