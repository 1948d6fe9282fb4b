// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory channel double for engine tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use ustabot_core::{ChatId, MessageId};

use crate::channel::{Channel, ChannelError};
use crate::keyboard::Keyboard;

/// A message the fake has sent or edited.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub chat: ChatId,
    pub message: MessageId,
    pub text: String,
    pub keyboard: Keyboard,
    pub edited: bool,
}

#[derive(Default)]
struct State {
    log: Vec<SentMessage>,
    next_message_id: i64,
    fail_next_edit: Option<ChannelError>,
    fail_next_send: bool,
}

/// Records every send/edit; message ids increment from 1.
#[derive(Default)]
pub struct FakeChannel {
    state: Mutex<State>,
}

impl FakeChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent or edited, in order.
    pub fn log(&self) -> Vec<SentMessage> {
        self.state.lock().log.clone()
    }

    /// Texts of fresh sends (edits excluded), in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.state
            .lock()
            .log
            .iter()
            .filter(|m| !m.edited)
            .map(|m| m.text.clone())
            .collect()
    }

    pub fn last(&self) -> Option<SentMessage> {
        self.state.lock().log.last().cloned()
    }

    /// The most recent message (send or edit) in a chat.
    pub fn last_in(&self, chat: ChatId) -> Option<SentMessage> {
        self.state.lock().log.iter().rev().find(|m| m.chat == chat).cloned()
    }

    pub fn fail_next_edit(&self, err: ChannelError) {
        self.state.lock().fail_next_edit = Some(err);
    }

    pub fn fail_next_send(&self) {
        self.state.lock().fail_next_send = true;
    }

    pub fn clear(&self) {
        self.state.lock().log.clear();
    }
}

#[async_trait]
impl Channel for FakeChannel {
    async fn send(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<MessageId, ChannelError> {
        let mut state = self.state.lock();
        if state.fail_next_send {
            state.fail_next_send = false;
            return Err(ChannelError::Transport("injected send failure".into()));
        }
        state.next_message_id += 1;
        let message = MessageId::new(state.next_message_id);
        state.log.push(SentMessage {
            chat,
            message,
            text: text.to_string(),
            keyboard,
            edited: false,
        });
        Ok(message)
    }

    async fn edit(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<(), ChannelError> {
        let mut state = self.state.lock();
        if let Some(err) = state.fail_next_edit.take() {
            return Err(err);
        }
        state.log.push(SentMessage {
            chat,
            message,
            text: text.to_string(),
            keyboard,
            edited: true,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
