// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository error taxonomy.

use thiserror::Error;

/// Errors surfaced by [`crate::Repository`] operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A referenced record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A consumption post would drive an inventory line negative.
    /// Carries the current on-hand quantity for the re-prompt.
    #[error("insufficient stock: {on_hand} on hand")]
    InsufficientStock { on_hand: f64 },

    /// The write could not be persisted.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl RepositoryError {
    pub fn not_found(kind: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound { kind, id: id.to_string() }
    }
}
