// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound channel that writes messages to the log.
//!
//! The real chat transport is an external collaborator; the daemon ships
//! with this stand-in so the full pipeline runs end to end. Message ids are
//! allocated from a process-local counter so dashboard bindings and
//! in-place edits behave like they would against a real transport.

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;
use ustabot_adapters::{Channel, ChannelError, Keyboard};
use ustabot_core::{ChatId, MessageId};

#[derive(Default)]
pub struct LogChannel {
    next_message: Mutex<i64>,
}

impl LogChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn keyboard_json(keyboard: &Keyboard) -> String {
        serde_json::to_string(keyboard).unwrap_or_default()
    }
}

#[async_trait]
impl Channel for LogChannel {
    async fn send(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<MessageId, ChannelError> {
        let id = {
            let mut next = self.next_message.lock();
            *next += 1;
            *next
        };
        info!(
            target: "ustabot::outbound",
            %chat,
            message = id,
            keyboard = %Self::keyboard_json(&keyboard),
            text,
            "send"
        );
        Ok(MessageId::new(id))
    }

    async fn edit(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<(), ChannelError> {
        info!(
            target: "ustabot::outbound",
            %chat,
            message = message.as_i64(),
            keyboard = %Self::keyboard_json(&keyboard),
            text,
            "edit"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_allocates_increasing_message_ids() {
        let channel = LogChannel::new();
        let first = channel.send(ChatId::new(1), "a", Keyboard::None).await.unwrap();
        let second = channel.send(ChatId::new(1), "b", Keyboard::Remove).await.unwrap();
        assert_eq!(first, MessageId::new(1));
        assert_eq!(second, MessageId::new(2));
    }

    #[tokio::test]
    async fn edit_never_fails() {
        let channel = LogChannel::new();
        channel.edit(ChatId::new(1), MessageId::new(7), "x", Keyboard::None).await.unwrap();
    }
}
