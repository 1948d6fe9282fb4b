// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ustabot-adapters: the chat channel boundary.
//!
//! The engine talks to the messaging platform only through the [`Channel`]
//! trait; everything platform-specific (transports, retries, rate limits)
//! lives behind it. `FakeChannel` is the in-memory double the engine tests
//! run against.

mod channel;
mod keyboard;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use channel::{Channel, ChannelError};
pub use keyboard::{InlineButton, Keyboard, ReplyButton};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeChannel, SentMessage};
