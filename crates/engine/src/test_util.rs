// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared engine test harness: router over memory repo + fake channel.

use std::sync::Arc;

use ustabot_adapters::FakeChannel;
use ustabot_core::test_support::{ContractorBuilder, JobBuilder};
use ustabot_core::{
    ChannelEvent, ChatId, ContractorId, FakeClock, Inbound, Job, JobId, UserId,
};
use ustabot_storage::MemoryRepository;

use crate::router::{Router, RouterConfig};

pub(crate) const USER: UserId = UserId::new(100);
pub(crate) const CHAT: ChatId = ChatId::new(100);
pub(crate) const CONTRACTOR: ContractorId = ContractorId::new(1);

pub(crate) struct Harness {
    pub repo: Arc<MemoryRepository>,
    pub channel: Arc<FakeChannel>,
    pub clock: FakeClock,
    pub router: Router<MemoryRepository, FakeChannel, FakeClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        let repo = Arc::new(MemoryRepository::new());
        let channel = Arc::new(FakeChannel::new());
        let clock = FakeClock::new();
        let router =
            Router::new(Arc::clone(&repo), Arc::clone(&channel), clock.clone(), config);
        Self { repo, channel, clock, router }
    }

    /// Seed a linked, active contractor matching [`USER`] / [`CHAT`].
    pub fn seed_active_contractor(&self) -> ContractorId {
        self.repo.seed_contractor(
            ContractorBuilder::new(CONTRACTOR.as_u64()).linked(USER.as_i64(), CHAT.as_i64()).build(),
        );
        CONTRACTOR
    }

    /// Seed an in-progress job owned by [`CONTRACTOR`].
    pub fn seed_progress_job(&self, id: u64) -> Job {
        let job = JobBuilder::new(id)
            .contractor(CONTRACTOR)
            .stage_name("Jarayonda")
            .title("Boiler repair")
            .build();
        self.repo.seed_job(job.clone());
        job
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
        use ustabot_storage::Repository;
        self.repo.find_job(JobId::new(id)).await.unwrap()
    }
}
