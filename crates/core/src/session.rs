// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ephemeral per-user conversation state.
//!
//! A session exists only while a multi-step flow is in progress. It is
//! created lazily on the first event that needs state and cleared on flow
//! completion, cancellation, or expiry. Nothing here survives a restart.

use crate::id::{DistrictId, JobId, MessageId, PartId, RegionId};
use crate::ledger::Direction;
use serde::{Deserialize, Serialize};

/// Which step of which flow this user is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    // Registration
    RegPhone,
    RegRegion,
    RegDistricts,
    RegLocation,
    RegFullName,
    // Work
    WorkAmount,
    ExpenseType,
    ExpenseAmount,
    ExpenseNote,
    PartsPick,
    PartsQty,
    PartsPrice,
    Photo,
}

crate::simple_display! {
    FlowState {
        RegPhone => "reg:phone",
        RegRegion => "reg:region",
        RegDistricts => "reg:districts",
        RegLocation => "reg:location",
        RegFullName => "reg:full_name",
        WorkAmount => "work:amount",
        ExpenseType => "work:expense_type",
        ExpenseAmount => "work:expense_amount",
        ExpenseNote => "work:expense_note",
        PartsPick => "work:parts_pick",
        PartsQty => "work:parts_qty",
        PartsPrice => "work:parts_price",
        Photo => "work:photo",
    }
}

/// Typed scratch space accumulated across flow steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scratch {
    pub phone: Option<String>,
    pub region_id: Option<RegionId>,
    pub region_name: Option<String>,
    /// Toggle set with insertion order preserved for display.
    pub district_ids: Vec<DistrictId>,
    pub district_names: Vec<String>,
    pub geo_lat: Option<f64>,
    pub geo_lng: Option<f64>,
    pub job: Option<JobId>,
    pub part: Option<PartId>,
    pub qty: Option<f64>,
    pub expense_direction: Option<Direction>,
    pub expense_note: Option<String>,
    pub expense_amount: Option<u64>,
    pub page: u32,
    /// The message the flow's inline keyboard lives on, edited in place as
    /// the selection changes.
    pub anchor: Option<MessageId>,
}

impl Scratch {
    /// Toggle a district in the selection set. Returns true if now selected.
    pub fn toggle_district(&mut self, id: DistrictId, name: &str) -> bool {
        if let Some(idx) = self.district_ids.iter().position(|d| *d == id) {
            self.district_ids.remove(idx);
            if let Some(nidx) = self.district_names.iter().position(|n| n == name) {
                self.district_names.remove(nidx);
            }
            false
        } else {
            self.district_ids.push(id);
            self.district_names.push(name.to_string());
            true
        }
    }
}

/// One user's in-progress flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub state: FlowState,
    #[serde(default)]
    pub scratch: Scratch,
    /// Last activity, for idle expiry.
    pub touched_at_epoch_ms: u64,
}

impl Session {
    pub fn new(state: FlowState, now_epoch_ms: u64) -> Self {
        Self { state, scratch: Scratch::default(), touched_at_epoch_ms: now_epoch_ms }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
