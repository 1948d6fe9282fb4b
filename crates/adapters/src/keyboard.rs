// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keyboard layouts attached to outgoing messages.

use serde::{Deserialize, Serialize};

/// A button on a reply keyboard (rendered in place of the text input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyButton {
    pub label: String,
    /// Tapping shares the user's phone number as a contact event.
    #[serde(default)]
    pub request_contact: bool,
    /// Tapping shares the user's location as a location event.
    #[serde(default)]
    pub request_location: bool,
}

impl ReplyButton {
    pub fn text(label: impl Into<String>) -> Self {
        Self { label: label.into(), request_contact: false, request_location: false }
    }

    pub fn contact(label: impl Into<String>) -> Self {
        Self { label: label.into(), request_contact: true, request_location: false }
    }

    pub fn location(label: impl Into<String>) -> Self {
        Self { label: label.into(), request_contact: false, request_location: true }
    }
}

/// A button on an inline keyboard (rendered under a message).
///
/// `payload` comes back verbatim as a callback event when tapped; the engine
/// encodes it with `CallbackAction::encode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub label: String,
    pub payload: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self { label: label.into(), payload: payload.into() }
    }
}

/// Keyboard attachment for an outgoing message.
///
/// `Remove` explicitly clears any reply keyboard left on the client; sending
/// `None` leaves whatever is there untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Keyboard {
    #[default]
    None,
    Remove,
    Reply {
        rows: Vec<Vec<ReplyButton>>,
    },
    Inline {
        rows: Vec<Vec<InlineButton>>,
    },
}

impl Keyboard {
    /// Reply keyboard with one button per row.
    pub fn reply_column(buttons: Vec<ReplyButton>) -> Self {
        Keyboard::Reply { rows: buttons.into_iter().map(|b| vec![b]).collect() }
    }

    /// Inline keyboard with one button per row.
    pub fn inline_column(buttons: Vec<InlineButton>) -> Self {
        Keyboard::Inline { rows: buttons.into_iter().map(|b| vec![b]).collect() }
    }

    /// Inline keyboard packed `per_row` buttons to a row.
    pub fn inline_grid(buttons: Vec<InlineButton>, per_row: usize) -> Self {
        let per_row = per_row.max(1);
        let mut rows: Vec<Vec<InlineButton>> = Vec::new();
        for button in buttons {
            match rows.last_mut() {
                Some(row) if row.len() < per_row => row.push(button),
                _ => rows.push(vec![button]),
            }
        }
        Keyboard::Inline { rows }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Keyboard::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_grid_packs_rows() {
        let buttons: Vec<InlineButton> =
            (0..5).map(|i| InlineButton::new(format!("b{i}"), format!("p{i}"))).collect();
        let Keyboard::Inline { rows } = Keyboard::inline_grid(buttons, 2) else {
            panic!("expected inline keyboard");
        };
        let shape: Vec<usize> = rows.iter().map(Vec::len).collect();
        assert_eq!(shape, vec![2, 2, 1]);
    }

    #[test]
    fn inline_grid_clamps_zero_width() {
        let buttons = vec![InlineButton::new("a", "a"), InlineButton::new("b", "b")];
        let Keyboard::Inline { rows } = Keyboard::inline_grid(buttons, 0) else {
            panic!("expected inline keyboard");
        };
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn reply_buttons_carry_request_flags() {
        assert!(ReplyButton::contact("📱 Share phone").request_contact);
        assert!(ReplyButton::location("📍 Share location").request_location);
        let plain = ReplyButton::text("Back");
        assert!(!plain.request_contact && !plain.request_location);
    }
}
