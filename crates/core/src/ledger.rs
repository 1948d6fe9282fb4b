// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only income/expense ledger entries.

use crate::id::{ContractorId, JobId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Income,
    Expense,
}

crate::simple_display! {
    Direction {
        Income => "income",
        Expense => "expense",
    }
}

impl Direction {
    /// Sign shown next to amounts in confirmations.
    pub fn sign(&self) -> char {
        match self {
            Direction::Income => '+',
            Direction::Expense => '−',
        }
    }
}

/// One ledger posting tied to a job and contractor. Never mutated or
/// deleted by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub job: JobId,
    pub contractor: ContractorId,
    pub direction: Direction,
    /// Always positive; direction carries the sign.
    pub amount: u64,
    pub note: String,
    pub at_epoch_ms: u64,
}
