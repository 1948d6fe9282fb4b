// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ustabot-engine: the conversational engine.
//!
//! One [`Router`] instance owns the session store and drives every flow:
//! access gating, registration, the job dashboard with its guarded stage
//! transitions, parts consumption, expense and work-amount entry, photos,
//! and the main menu. The router is constructed explicitly from a
//! repository, a channel, and a clock; there are no ambient globals.

mod dashboard;
mod error;
mod export;
mod finance;
mod lifecycle;
mod menu;
mod parts;
mod photo;
mod registration;
mod router;
mod session_store;
pub mod texts;

#[cfg(test)]
pub(crate) mod test_util;

pub use dashboard::JobFacts;
pub use error::EngineError;
pub use export::{history_rows, JobHistoryRow};
pub use router::{Router, RouterConfig};
pub use session_store::SessionStore;
