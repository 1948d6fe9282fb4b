// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Contractor (usta) records.

use crate::id::{ChatId, ContractorId, DistrictId, RegionId, UserId};
use serde::{Deserialize, Serialize};

/// Activation status of a contractor account.
///
/// New registrations start `Pending`; an operator activates (or disables)
/// the account outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Pending,
    Active,
    Disabled,
}

crate::simple_display! {
    Activation {
        Pending => "pending",
        Active => "active",
        Disabled => "disabled",
    }
}

/// Language preference for outgoing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Uzbek,
    English,
}

/// Geolocation captured during registration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A field-service contractor linked to a chat identity.
///
/// Optional fields are explicit: a record either carries a linked channel
/// identity or it does not — there is no per-access probing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contractor {
    pub id: ContractorId,
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub chat_id: Option<ChatId>,
    #[serde(default)]
    pub region_id: Option<RegionId>,
    #[serde(default)]
    pub district_ids: Vec<DistrictId>,
    #[serde(default)]
    pub geo: Option<GeoPoint>,
    pub activation: Activation,
    /// Operator-controlled work switch; a contractor can be active but
    /// temporarily barred from taking jobs.
    #[serde(default)]
    pub enabled_for_work: bool,
    #[serde(default)]
    pub language: Language,
}

impl Contractor {
    /// True when the contractor may use the work features of the bot.
    pub fn can_work(&self) -> bool {
        self.activation == Activation::Active && self.enabled_for_work
    }

    pub fn is_linked(&self) -> bool {
        self.user_id.is_some() && self.chat_id.is_some()
    }
}

/// Fields for creating a contractor during registration.
///
/// The created record is always `Pending` and not enabled for work; only an
/// operator flips either switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContractor {
    pub full_name: String,
    pub phone: String,
    pub user_id: UserId,
    pub chat_id: ChatId,
    pub region_id: RegionId,
    pub district_ids: Vec<DistrictId>,
    #[serde(default)]
    pub geo: Option<GeoPoint>,
}
