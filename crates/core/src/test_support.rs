// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::contractor::{Activation, Contractor, Language};
use crate::id::{ChatId, ContractorId, JobId, PartId, UserId};
use crate::inventory::InventoryLine;
use crate::job::{DashboardBinding, Job, ProductLine};

// ── Builders ────────────────────────────────────────────────────────────

/// Test builder for [`Job`].
#[derive(Debug, Clone)]
pub struct JobBuilder {
    job: Job,
}

impl JobBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            job: Job {
                id: JobId::new(id),
                number: None,
                title: format!("Job {id}"),
                customer_name: None,
                customer_phone: None,
                address: None,
                customer_address: None,
                location_url: None,
                contractor: None,
                stage_id: None,
                stage_name: String::new(),
                work_amount: None,
                photo_count: 0,
                dashboard: None,
                description: String::new(),
                tags: Vec::new(),
                products: Vec::new(),
                created_at_epoch_ms: 1_000_000,
            },
        }
    }

    pub fn number(mut self, n: impl Into<String>) -> Self {
        self.job.number = Some(n.into());
        self
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.job.title = t.into();
        self
    }

    pub fn customer(mut self, name: impl Into<String>, phone: impl Into<String>) -> Self {
        self.job.customer_name = Some(name.into());
        self.job.customer_phone = Some(phone.into());
        self
    }

    pub fn address(mut self, a: impl Into<String>) -> Self {
        self.job.address = Some(a.into());
        self
    }

    pub fn customer_address(mut self, a: impl Into<String>) -> Self {
        self.job.customer_address = Some(a.into());
        self
    }

    pub fn location_url(mut self, u: impl Into<String>) -> Self {
        self.job.location_url = Some(u.into());
        self
    }

    pub fn contractor(mut self, id: ContractorId) -> Self {
        self.job.contractor = Some(id);
        self
    }

    pub fn stage_name(mut self, name: impl Into<String>) -> Self {
        self.job.stage_name = name.into();
        self
    }

    pub fn work_amount(mut self, amount: u64) -> Self {
        self.job.work_amount = Some(amount);
        self
    }

    pub fn photos(mut self, count: u32) -> Self {
        self.job.photo_count = count;
        self
    }

    pub fn bound(mut self, chat: i64, message: i64) -> Self {
        self.job.dashboard =
            Some(DashboardBinding { chat: ChatId::new(chat), message: crate::MessageId::new(message) });
        self
    }

    pub fn description(mut self, d: impl Into<String>) -> Self {
        self.job.description = d.into();
        self
    }

    pub fn tag(mut self, t: impl Into<String>) -> Self {
        self.job.tags.push(t.into());
        self
    }

    pub fn product(mut self, code: &str, name: &str, sold_at: Option<&str>) -> Self {
        self.job.products.push(ProductLine {
            code: code.to_string(),
            name: name.to_string(),
            sold_at: sold_at.map(str::to_string),
        });
        self
    }

    pub fn build(self) -> Job {
        self.job
    }
}

/// Test builder for [`Contractor`].
#[derive(Debug, Clone)]
pub struct ContractorBuilder {
    contractor: Contractor,
}

impl ContractorBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            contractor: Contractor {
                id: ContractorId::new(id),
                full_name: format!("Usta {id}"),
                phone: format!("+99890000000{id}"),
                user_id: None,
                chat_id: None,
                region_id: None,
                district_ids: Vec::new(),
                geo: None,
                activation: Activation::Active,
                enabled_for_work: true,
                language: Language::default(),
            },
        }
    }

    pub fn linked(mut self, user: i64, chat: i64) -> Self {
        self.contractor.user_id = Some(UserId::new(user));
        self.contractor.chat_id = Some(ChatId::new(chat));
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.contractor.phone = phone.into();
        self
    }

    pub fn pending(mut self) -> Self {
        self.contractor.activation = Activation::Pending;
        self.contractor.enabled_for_work = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.contractor.activation = Activation::Disabled;
        self
    }

    pub fn barred(mut self) -> Self {
        self.contractor.enabled_for_work = false;
        self
    }

    pub fn build(self) -> Contractor {
        self.contractor
    }
}

/// Inventory line factory.
pub fn inventory_line(contractor: u64, part: u64, code: &str, name: &str, qty: f64) -> InventoryLine {
    InventoryLine {
        contractor: ContractorId::new(contractor),
        part: PartId::new(part),
        code: code.to_string(),
        name: name.to_string(),
        uom: "dona".to_string(),
        on_hand: qty,
    }
}
