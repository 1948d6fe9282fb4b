// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The outgoing channel contract.

use async_trait::async_trait;
use thiserror::Error;
use ustabot_core::{ChatId, MessageId};

use crate::keyboard::Keyboard;

/// Errors surfaced by [`Channel`] operations.
///
/// `NotModified` and `EditTargetMissing` are benign for dashboard refreshes:
/// re-rendering identical text, or editing a message the user deleted, must
/// not abort the flow that triggered the refresh.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// An edit produced byte-identical content.
    #[error("message not modified")]
    NotModified,

    /// The message to edit no longer exists.
    #[error("message to edit not found")]
    EditTargetMissing,

    /// The transport failed.
    #[error("channel transport: {0}")]
    Transport(String),
}

impl ChannelError {
    /// True for edit failures a dashboard refresh may swallow.
    pub fn is_benign(&self) -> bool {
        matches!(self, ChannelError::NotModified | ChannelError::EditTargetMissing)
    }
}

/// Outgoing side of the chat platform.
///
/// Inbound traffic arrives as `ustabot_core::Inbound` through the daemon's
/// listener; this trait is everything the flows may do in response.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Send a new message, returning its id for later edits.
    async fn send(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<MessageId, ChannelError>;

    /// Edit a previously sent message in place.
    async fn edit(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<(), ChannelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_edit_failures() {
        assert!(ChannelError::NotModified.is_benign());
        assert!(ChannelError::EditTargetMissing.is_benign());
        assert!(!ChannelError::Transport("timeout".into()).is_benign());
    }
}
