// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ustabot-storage: the repository contract over the backing store, plus an
//! in-process reference implementation with transactional inventory
//! semantics.

mod error;
mod memory;
mod repository;

pub use error::RepositoryError;
pub use memory::MemoryRepository;
pub use repository::{PhotoRef, Repository};
