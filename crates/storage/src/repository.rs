// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The repository contract.
//!
//! The backing store (jobs, contractors, inventory, ledger) is an external
//! collaborator; this trait is the full surface the flows are allowed to
//! touch. Implementations must make `post_parts_consumption` atomic per
//! (contractor, part): check on-hand and append the movement under one
//! transaction so concurrent posts can never drive a balance negative.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ustabot_core::{
    ChatId, Contractor, ContractorId, District, InventoryLine, Job, JobId, LedgerEntry,
    MessageId, NewContractor, PartId, PartsMovement, Region, RegionId, StageId, StageIds, UserId,
};

use crate::error::RepositoryError;

/// Opaque reference to uploaded photo bytes, as handed over by the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef(pub String);

#[async_trait]
pub trait Repository: Send + Sync {
    // ── Contractors ─────────────────────────────────────────────────────

    async fn find_contractor_by_user(
        &self,
        user: UserId,
    ) -> Result<Option<Contractor>, RepositoryError>;

    async fn find_contractor_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<Contractor>, RepositoryError>;

    /// Create a contractor in pending, not-enabled-for-work state.
    async fn create_contractor(
        &self,
        fields: NewContractor,
    ) -> Result<Contractor, RepositoryError>;

    async fn link_contractor_channel(
        &self,
        contractor: ContractorId,
        user: UserId,
        chat: ChatId,
    ) -> Result<(), RepositoryError>;

    async fn unlink_contractor_channel(
        &self,
        contractor: ContractorId,
    ) -> Result<(), RepositoryError>;

    // ── Jobs ────────────────────────────────────────────────────────────

    async fn find_job(&self, job: JobId) -> Result<Job, RepositoryError>;

    /// Open (not done) jobs assigned to the contractor, newest first.
    async fn list_open_jobs(
        &self,
        contractor: ContractorId,
        limit: usize,
    ) -> Result<Vec<Job>, RepositoryError>;

    /// All jobs for the contractor, newest first (history export).
    async fn list_jobs(
        &self,
        contractor: ContractorId,
        limit: usize,
    ) -> Result<Vec<Job>, RepositoryError>;

    async fn set_job_stage(
        &self,
        job: JobId,
        stage_id: Option<StageId>,
        stage_name: &str,
    ) -> Result<(), RepositoryError>;

    async fn set_job_work_amount(&self, job: JobId, amount: u64) -> Result<(), RepositoryError>;

    async fn set_job_dashboard_binding(
        &self,
        job: JobId,
        chat: ChatId,
        message: MessageId,
    ) -> Result<(), RepositoryError>;

    /// Append an operator-visible note to the job's log.
    async fn post_job_note(&self, job: JobId, note: &str) -> Result<(), RepositoryError>;

    /// Configured stage ids; all-unset means degraded name matching.
    async fn configured_stage_ids(&self) -> Result<StageIds, RepositoryError>;

    // ── Regions ─────────────────────────────────────────────────────────

    async fn list_regions(&self) -> Result<Vec<Region>, RepositoryError>;

    async fn list_districts(&self, region: RegionId) -> Result<Vec<District>, RepositoryError>;

    // ── Inventory ───────────────────────────────────────────────────────

    /// Inventory lines for the contractor, sorted by code then name.
    async fn list_inventory(
        &self,
        contractor: ContractorId,
        positive_only: bool,
    ) -> Result<Vec<InventoryLine>, RepositoryError>;

    async fn find_inventory_line(
        &self,
        contractor: ContractorId,
        part: PartId,
    ) -> Result<Option<InventoryLine>, RepositoryError>;

    /// Atomically validate stock and append an outbound movement.
    ///
    /// The implementation re-checks `qty <= on_hand` at commit time and
    /// maintains the running balance itself; callers never decrement lines.
    async fn post_parts_consumption(
        &self,
        movement: PartsMovement,
    ) -> Result<(), RepositoryError>;

    async fn count_parts_movements(&self, job: JobId) -> Result<u32, RepositoryError>;

    // ── Ledger ──────────────────────────────────────────────────────────

    async fn post_ledger_entry(&self, entry: LedgerEntry) -> Result<(), RepositoryError>;

    async fn sum_expenses(&self, job: JobId) -> Result<u64, RepositoryError>;

    async fn any_ledger_entry(&self, job: JobId) -> Result<bool, RepositoryError>;

    /// Running balance of the contractor across all postings.
    async fn balance_total(&self, contractor: ContractorId) -> Result<i64, RepositoryError>;

    // ── Photos ──────────────────────────────────────────────────────────

    async fn attach_photo(&self, job: JobId, photo: PhotoRef) -> Result<(), RepositoryError>;
}
