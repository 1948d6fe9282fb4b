// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared error vocabulary used across the flow crates.

use serde::{Deserialize, Serialize};

/// One of the four finish-guard prerequisites, used both in failure
/// enumerations and in dashboard indicators. Stable, human-decodable tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingItem {
    Amount,
    Parts,
    Expense,
    Photo,
}

crate::simple_display! {
    MissingItem {
        Amount => "amount",
        Parts => "parts",
        Expense => "expense",
        Photo => "photo",
    }
}

impl MissingItem {
    /// User-facing label for finish-guard failure lists.
    pub fn label(&self) -> &'static str {
        match self {
            MissingItem::Amount => "💰 Service amount",
            MissingItem::Parts => "🔩 Parts",
            MissingItem::Expense => "🧮 Expense / travel fare",
            MissingItem::Photo => "🖼️ Photo",
        }
    }
}
