// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-contractor inventory lines and consumption movements.

use crate::id::{ContractorId, JobId, PartId};
use serde::{Deserialize, Serialize};

/// Stock balance of one replacement part held by one contractor.
///
/// Invariant: `on_hand >= 0`. The balance is maintained by the repository
/// as movements post; this core never decrements it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub contractor: ContractorId,
    pub part: PartId,
    pub code: String,
    pub name: String,
    /// Unit of measure label, e.g. "dona".
    pub uom: String,
    pub on_hand: f64,
}

impl InventoryLine {
    /// Button/list label: `[CODE] Name • qty uom`.
    pub fn label(&self) -> String {
        format!("[{}] {} • {} {}", self.code, self.name, self.on_hand, self.uom)
    }
}

/// One outbound consumption movement posted against an inventory line.
///
/// The repository owns the movement ledger and derives the running balance
/// from it transactionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartsMovement {
    pub contractor: ContractorId,
    pub part: PartId,
    pub job: JobId,
    pub qty: f64,
    /// Unit price in UZS; 0 means the part's default price applies.
    pub unit_price: u64,
    pub note: Option<String>,
    pub at_epoch_ms: u64,
}
