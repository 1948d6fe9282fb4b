// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound events from the message transport.

use crate::id::{ChatId, UserId};
use serde::{Deserialize, Serialize};

/// One typed event received from the chat channel.
///
/// Serializes with `{"type": "...", ...fields}` format for the intake wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelEvent {
    /// A slash command, without the leading slash (e.g. "start").
    Command { name: String },
    /// Plain text message.
    Text { text: String },
    /// Inline button press carrying an opaque callback payload.
    Callback { payload: String },
    /// Shared contact (own phone number).
    Contact { phone: String },
    /// Shared live location.
    Location { lat: f64, lng: f64 },
    /// Photo upload; `file_ref` is the transport's binary reference.
    Photo { file_ref: String },
}

impl ChannelEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelEvent::Command { .. } => "command",
            ChannelEvent::Text { .. } => "text",
            ChannelEvent::Callback { .. } => "callback",
            ChannelEvent::Contact { .. } => "contact",
            ChannelEvent::Location { .. } => "location",
            ChannelEvent::Photo { .. } => "photo",
        }
    }

    /// True for the `/start` command, which the access gate never blocks.
    pub fn is_start_command(&self) -> bool {
        matches!(self, ChannelEvent::Command { name } if name == "start")
    }
}

/// An inbound event together with the identity it arrived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inbound {
    pub user: UserId,
    pub chat: ChatId,
    #[serde(flatten)]
    pub event: ChannelEvent,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
