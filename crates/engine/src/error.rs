// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error taxonomy.
//!
//! Validation failures (bad amount text, short name, empty selection) never
//! appear here; flows handle them locally with a re-prompt and no state
//! change.

use thiserror::Error;
use ustabot_core::MissingItem;
use ustabot_adapters::ChannelError;
use ustabot_storage::RepositoryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// Finish was requested with prerequisites unmet; carries exactly the
    /// failing subset, in stable order.
    #[error("finish blocked, missing: {0:?}")]
    IncompletePrerequisites(Vec<MissingItem>),
}
