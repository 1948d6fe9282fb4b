// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared spec harness: the full stack behind one struct.

use std::sync::Arc;

pub use ustabot_adapters::{FakeChannel, Keyboard};
pub use ustabot_core::test_support::{inventory_line, ContractorBuilder, JobBuilder};
pub use ustabot_core::{
    ChannelEvent, ChatId, ContractorId, FakeClock, Inbound, Job, JobId, PartId, UserId,
};
pub use ustabot_engine::{texts, Router, RouterConfig};
pub use ustabot_storage::{MemoryRepository, Repository};

pub const USER: UserId = UserId::new(100);
pub const CHAT: ChatId = ChatId::new(100);
pub const CONTRACTOR: ContractorId = ContractorId::new(1);

pub struct Spec {
    pub repo: Arc<MemoryRepository>,
    pub channel: Arc<FakeChannel>,
    pub router: Arc<Router<MemoryRepository, FakeChannel, FakeClock>>,
}

impl Spec {
    pub fn new() -> Self {
        let repo = Arc::new(MemoryRepository::new());
        let channel = Arc::new(FakeChannel::new());
        let router = Arc::new(Router::new(
            Arc::clone(&repo),
            Arc::clone(&channel),
            FakeClock::new(),
            RouterConfig::default(),
        ));
        Self { repo, channel, router }
    }

    pub fn with_contractor() -> Self {
        let spec = Self::new();
        spec.repo.seed_contractor(
            ContractorBuilder::new(CONTRACTOR.as_u64())
                .linked(USER.as_i64(), CHAT.as_i64())
                .build(),
        );
        spec
    }

    pub fn seed_progress_job(&self, id: u64) {
        self.repo
            .seed_job(JobBuilder::new(id).contractor(CONTRACTOR).stage_name("Jarayonda").build());
    }

    pub async fn event(&self, event: ChannelEvent) {
        self.router.handle(Inbound { user: USER, chat: CHAT, event }).await.unwrap();
    }

    pub async fn command(&self, name: &str) {
        self.event(ChannelEvent::Command { name: name.to_string() }).await;
    }

    pub async fn text(&self, text: &str) {
        self.event(ChannelEvent::Text { text: text.to_string() }).await;
    }

    pub async fn callback(&self, payload: &str) {
        self.event(ChannelEvent::Callback { payload: payload.to_string() }).await;
    }

    pub async fn contact(&self, phone: &str) {
        self.event(ChannelEvent::Contact { phone: phone.to_string() }).await;
    }

    pub async fn location(&self, lat: f64, lng: f64) {
        self.event(ChannelEvent::Location { lat, lng }).await;
    }

    pub async fn photo(&self, file_ref: &str) {
        self.event(ChannelEvent::Photo { file_ref: file_ref.to_string() }).await;
    }

    pub fn last_text(&self) -> String {
        self.channel.last().map(|m| m.text).unwrap_or_default()
    }

    pub async fn job(&self, id: u64) -> Job {
        self.repo.find_job(JobId::new(id)).await.unwrap()
    }

    pub async fn on_hand(&self, part: u64) -> f64 {
        self.repo
            .find_inventory_line(CONTRACTOR, PartId::new(part))
            .await
            .unwrap()
            .map(|l| l.on_hand)
            .unwrap_or_default()
    }
}
