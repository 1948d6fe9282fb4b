// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job (lead) records and the finish-guard completeness checks.

use crate::error::MissingItem;
use crate::id::{ChatId, ContractorId, JobId, MessageId, StageId};
use serde::{Deserialize, Serialize};

/// The (chat, message) pair a job's live dashboard card is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardBinding {
    pub chat: ChatId,
    pub message: MessageId,
}

/// One sold product shown on the dashboard card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    pub code: String,
    pub name: String,
    /// Sale timestamp as recorded by the store, preformatted for display.
    #[serde(default)]
    pub sold_at: Option<String>,
}

/// A unit of field work with a lifecycle stage, owned by one contractor.
///
/// Stage is stored as the backing store's (id, display name) pair and mapped
/// to a [`crate::Stage`] by the resolver; the store remains the source of
/// truth for stage identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    /// Human-facing service number; falls back to the id for display.
    #[serde(default)]
    pub number: Option<String>,
    pub title: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    /// Job's own address fields, already composed.
    #[serde(default)]
    pub address: Option<String>,
    /// Structured address from the linked customer record, used as fallback.
    #[serde(default)]
    pub customer_address: Option<String>,
    /// Explicitly stored location link. Never derived or geocoded.
    #[serde(default)]
    pub location_url: Option<String>,
    #[serde(default)]
    pub contractor: Option<ContractorId>,
    #[serde(default)]
    pub stage_id: Option<StageId>,
    #[serde(default)]
    pub stage_name: String,
    #[serde(default)]
    pub work_amount: Option<u64>,
    #[serde(default)]
    pub photo_count: u32,
    #[serde(default)]
    pub dashboard: Option<DashboardBinding>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub products: Vec<ProductLine>,
    pub created_at_epoch_ms: u64,
}

impl Job {
    /// Display number: the stored service number, or the record id.
    pub fn display_number(&self) -> String {
        match &self.number {
            Some(n) if !n.is_empty() => n.clone(),
            _ => self.id.to_string(),
        }
    }

    /// Address for display: own address first, customer record fallback.
    pub fn display_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .filter(|a| !a.is_empty())
            .or(self.customer_address.as_deref().filter(|a| !a.is_empty()))
    }
}

/// The four finish-guard predicates, evaluated against unrelated sources
/// (job record, parts movements, ledger, photos).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completeness {
    pub amount: bool,
    pub parts: bool,
    pub ledger: bool,
    pub photo: bool,
}

impl Completeness {
    pub fn ready(&self) -> bool {
        self.amount && self.parts && self.ledger && self.photo
    }

    /// The failing subset, in stable order: amount, parts, expense, photo.
    pub fn missing(&self) -> Vec<MissingItem> {
        let mut out = Vec::new();
        if !self.amount {
            out.push(MissingItem::Amount);
        }
        if !self.parts {
            out.push(MissingItem::Parts);
        }
        if !self.ledger {
            out.push(MissingItem::Expense);
        }
        if !self.photo {
            out.push(MissingItem::Photo);
        }
        out
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
