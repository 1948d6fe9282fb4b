// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ustabot-core: Domain types for the usta (field contractor) bot backend

pub mod macros;

pub mod clock;
pub mod contractor;
pub mod error;
pub mod event;
pub mod id;
pub mod inventory;
pub mod job;
pub mod ledger;
pub mod money;
pub mod payload;
pub mod phone;
pub mod region;
pub mod session;
pub mod stage;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use contractor::{Activation, Contractor, GeoPoint, Language, NewContractor};
pub use error::MissingItem;
pub use event::{ChannelEvent, Inbound};
pub use id::{ChatId, ContractorId, DistrictId, JobId, MessageId, PartId, RegionId, StageId, UserId};
pub use inventory::{InventoryLine, PartsMovement};
pub use job::{Completeness, DashboardBinding, Job, ProductLine};
pub use ledger::{Direction, LedgerEntry};
pub use money::{format_money, format_money_signed};
pub use payload::CallbackAction;
pub use phone::{normalize_phone, normalize_phone_with};
pub use region::{District, Region};
pub use session::{FlowState, Scratch, Session};
pub use stage::{Stage, StageIds, StageResolver};
