// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process repository over a single mutex.
//!
//! Reference implementation of the [`Repository`] contract. One lock guards
//! the whole store, so every operation is a transaction; in particular
//! `post_parts_consumption` performs its stock re-check and the movement
//! append under the same lock acquisition.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;
use ustabot_core::{
    ChatId, Contractor, ContractorId, DashboardBinding, Direction, District, InventoryLine, Job,
    JobId, LedgerEntry, MessageId, NewContractor, PartId, PartsMovement, Region, RegionId,
    StageId, StageIds, StageResolver, UserId,
};

use crate::error::RepositoryError;
use crate::repository::{PhotoRef, Repository};

#[derive(Default)]
struct Store {
    contractors: HashMap<ContractorId, Contractor>,
    jobs: HashMap<JobId, Job>,
    inventory: HashMap<(ContractorId, PartId), InventoryLine>,
    movements: Vec<PartsMovement>,
    ledger: Vec<LedgerEntry>,
    photos: HashMap<JobId, Vec<PhotoRef>>,
    job_notes: Vec<(JobId, String)>,
    regions: Vec<Region>,
    districts: Vec<District>,
    stage_ids: StageIds,
    next_contractor_id: u64,
    #[cfg(any(test, feature = "test-support"))]
    fail_next_write: bool,
}

impl Store {
    #[cfg(any(test, feature = "test-support"))]
    fn check_write(&mut self) -> Result<(), RepositoryError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(RepositoryError::Persistence("injected write failure".into()));
        }
        Ok(())
    }

    #[cfg(not(any(test, feature = "test-support")))]
    fn check_write(&mut self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// In-memory [`Repository`].
#[derive(Default)]
pub struct MemoryRepository {
    inner: Mutex<Store>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stage_ids(stage_ids: StageIds) -> Self {
        let repo = Self::default();
        repo.inner.lock().stage_ids = stage_ids;
        repo
    }
}

// ── Seeding and inspection helpers ──────────────────────────────────────

#[cfg(any(test, feature = "test-support"))]
impl MemoryRepository {
    pub fn seed_contractor(&self, contractor: Contractor) {
        let mut store = self.inner.lock();
        let next = contractor.id.as_u64() + 1;
        store.next_contractor_id = store.next_contractor_id.max(next);
        store.contractors.insert(contractor.id, contractor);
    }

    pub fn seed_job(&self, job: Job) {
        self.inner.lock().jobs.insert(job.id, job);
    }

    pub fn seed_inventory(&self, line: InventoryLine) {
        self.inner.lock().inventory.insert((line.contractor, line.part), line);
    }

    pub fn seed_region(&self, region: Region, districts: Vec<District>) {
        let mut store = self.inner.lock();
        store.regions.push(region);
        store.districts.extend(districts);
    }

    pub fn set_stage_ids(&self, stage_ids: StageIds) {
        self.inner.lock().stage_ids = stage_ids;
    }

    /// Make the next write operation fail with a persistence error.
    pub fn fail_next_write(&self) {
        self.inner.lock().fail_next_write = true;
    }

    pub fn movement_count(&self) -> usize {
        self.inner.lock().movements.len()
    }

    pub fn ledger_entries(&self, job: JobId) -> Vec<LedgerEntry> {
        self.inner.lock().ledger.iter().filter(|e| e.job == job).cloned().collect()
    }

    pub fn job_notes(&self, job: JobId) -> Vec<String> {
        self.inner
            .lock()
            .job_notes
            .iter()
            .filter(|(j, _)| *j == job)
            .map(|(_, n)| n.clone())
            .collect()
    }

    pub fn contractor(&self, id: ContractorId) -> Option<Contractor> {
        self.inner.lock().contractors.get(&id).cloned()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn find_contractor_by_user(
        &self,
        user: UserId,
    ) -> Result<Option<Contractor>, RepositoryError> {
        let store = self.inner.lock();
        Ok(store.contractors.values().find(|c| c.user_id == Some(user)).cloned())
    }

    async fn find_contractor_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<Contractor>, RepositoryError> {
        let store = self.inner.lock();
        Ok(store.contractors.values().find(|c| c.phone == phone).cloned())
    }

    async fn create_contractor(
        &self,
        fields: NewContractor,
    ) -> Result<Contractor, RepositoryError> {
        let mut store = self.inner.lock();
        store.check_write()?;
        store.next_contractor_id += 1;
        let id = ContractorId::new(store.next_contractor_id);
        let contractor = Contractor {
            id,
            full_name: fields.full_name,
            phone: fields.phone,
            user_id: Some(fields.user_id),
            chat_id: Some(fields.chat_id),
            region_id: Some(fields.region_id),
            district_ids: fields.district_ids,
            geo: fields.geo,
            activation: ustabot_core::Activation::Pending,
            enabled_for_work: false,
            language: Default::default(),
        };
        store.contractors.insert(id, contractor.clone());
        debug!(contractor = %id, "contractor created");
        Ok(contractor)
    }

    async fn link_contractor_channel(
        &self,
        contractor: ContractorId,
        user: UserId,
        chat: ChatId,
    ) -> Result<(), RepositoryError> {
        let mut store = self.inner.lock();
        store.check_write()?;
        let rec = store
            .contractors
            .get_mut(&contractor)
            .ok_or_else(|| RepositoryError::not_found("contractor", contractor))?;
        rec.user_id = Some(user);
        rec.chat_id = Some(chat);
        Ok(())
    }

    async fn unlink_contractor_channel(
        &self,
        contractor: ContractorId,
    ) -> Result<(), RepositoryError> {
        let mut store = self.inner.lock();
        store.check_write()?;
        let rec = store
            .contractors
            .get_mut(&contractor)
            .ok_or_else(|| RepositoryError::not_found("contractor", contractor))?;
        rec.user_id = None;
        rec.chat_id = None;
        Ok(())
    }

    async fn find_job(&self, job: JobId) -> Result<Job, RepositoryError> {
        let store = self.inner.lock();
        store.jobs.get(&job).cloned().ok_or_else(|| RepositoryError::not_found("job", job))
    }

    async fn list_open_jobs(
        &self,
        contractor: ContractorId,
        limit: usize,
    ) -> Result<Vec<Job>, RepositoryError> {
        let store = self.inner.lock();
        let resolver = StageResolver::new(store.stage_ids);
        let mut jobs: Vec<Job> = store
            .jobs
            .values()
            .filter(|j| j.contractor == Some(contractor))
            .filter(|j| !resolver.resolve(j.stage_id, &j.stage_name).is_terminal())
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at_epoch_ms.cmp(&a.created_at_epoch_ms));
        jobs.truncate(limit);
        Ok(jobs)
    }

    async fn list_jobs(
        &self,
        contractor: ContractorId,
        limit: usize,
    ) -> Result<Vec<Job>, RepositoryError> {
        let store = self.inner.lock();
        let mut jobs: Vec<Job> =
            store.jobs.values().filter(|j| j.contractor == Some(contractor)).cloned().collect();
        jobs.sort_by(|a, b| b.created_at_epoch_ms.cmp(&a.created_at_epoch_ms));
        jobs.truncate(limit);
        Ok(jobs)
    }

    async fn set_job_stage(
        &self,
        job: JobId,
        stage_id: Option<StageId>,
        stage_name: &str,
    ) -> Result<(), RepositoryError> {
        let mut store = self.inner.lock();
        store.check_write()?;
        let rec =
            store.jobs.get_mut(&job).ok_or_else(|| RepositoryError::not_found("job", job))?;
        rec.stage_id = stage_id;
        rec.stage_name = stage_name.to_string();
        Ok(())
    }

    async fn set_job_work_amount(&self, job: JobId, amount: u64) -> Result<(), RepositoryError> {
        let mut store = self.inner.lock();
        store.check_write()?;
        let rec =
            store.jobs.get_mut(&job).ok_or_else(|| RepositoryError::not_found("job", job))?;
        rec.work_amount = Some(amount);
        Ok(())
    }

    async fn set_job_dashboard_binding(
        &self,
        job: JobId,
        chat: ChatId,
        message: MessageId,
    ) -> Result<(), RepositoryError> {
        let mut store = self.inner.lock();
        store.check_write()?;
        let rec =
            store.jobs.get_mut(&job).ok_or_else(|| RepositoryError::not_found("job", job))?;
        rec.dashboard = Some(DashboardBinding { chat, message });
        Ok(())
    }

    async fn post_job_note(&self, job: JobId, note: &str) -> Result<(), RepositoryError> {
        let mut store = self.inner.lock();
        store.check_write()?;
        if !store.jobs.contains_key(&job) {
            return Err(RepositoryError::not_found("job", job));
        }
        store.job_notes.push((job, note.to_string()));
        Ok(())
    }

    async fn configured_stage_ids(&self) -> Result<StageIds, RepositoryError> {
        Ok(self.inner.lock().stage_ids)
    }

    async fn list_regions(&self) -> Result<Vec<Region>, RepositoryError> {
        let mut regions = self.inner.lock().regions.clone();
        regions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(regions)
    }

    async fn list_districts(&self, region: RegionId) -> Result<Vec<District>, RepositoryError> {
        let mut districts: Vec<District> = self
            .inner
            .lock()
            .districts
            .iter()
            .filter(|d| d.region_id == region)
            .cloned()
            .collect();
        districts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(districts)
    }

    async fn list_inventory(
        &self,
        contractor: ContractorId,
        positive_only: bool,
    ) -> Result<Vec<InventoryLine>, RepositoryError> {
        let store = self.inner.lock();
        let mut lines: Vec<InventoryLine> = store
            .inventory
            .values()
            .filter(|l| l.contractor == contractor)
            .filter(|l| !positive_only || l.on_hand > 0.0)
            .cloned()
            .collect();
        lines.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.name.cmp(&b.name)));
        Ok(lines)
    }

    async fn find_inventory_line(
        &self,
        contractor: ContractorId,
        part: PartId,
    ) -> Result<Option<InventoryLine>, RepositoryError> {
        Ok(self.inner.lock().inventory.get(&(contractor, part)).cloned())
    }

    async fn post_parts_consumption(
        &self,
        movement: PartsMovement,
    ) -> Result<(), RepositoryError> {
        // Check-then-post under one lock acquisition: the invariant
        // on_hand >= 0 holds under concurrent posts for the same line.
        let mut store = self.inner.lock();
        store.check_write()?;
        let key = (movement.contractor, movement.part);
        let line = store
            .inventory
            .get_mut(&key)
            .ok_or_else(|| RepositoryError::not_found("inventory line", movement.part))?;
        if movement.qty > line.on_hand {
            return Err(RepositoryError::InsufficientStock { on_hand: line.on_hand });
        }
        line.on_hand -= movement.qty;
        debug!(part = %movement.part, qty = movement.qty, on_hand = line.on_hand, "parts movement posted");
        store.movements.push(movement);
        Ok(())
    }

    async fn count_parts_movements(&self, job: JobId) -> Result<u32, RepositoryError> {
        let store = self.inner.lock();
        Ok(store.movements.iter().filter(|m| m.job == job).count() as u32)
    }

    async fn post_ledger_entry(&self, entry: LedgerEntry) -> Result<(), RepositoryError> {
        let mut store = self.inner.lock();
        store.check_write()?;
        debug!(job = %entry.job, direction = %entry.direction, amount = entry.amount, "ledger entry posted");
        store.ledger.push(entry);
        Ok(())
    }

    async fn sum_expenses(&self, job: JobId) -> Result<u64, RepositoryError> {
        let store = self.inner.lock();
        Ok(store
            .ledger
            .iter()
            .filter(|e| e.job == job && e.direction == Direction::Expense)
            .map(|e| e.amount)
            .sum())
    }

    async fn any_ledger_entry(&self, job: JobId) -> Result<bool, RepositoryError> {
        let store = self.inner.lock();
        Ok(store.ledger.iter().any(|e| e.job == job && e.amount > 0))
    }

    async fn balance_total(&self, contractor: ContractorId) -> Result<i64, RepositoryError> {
        let store = self.inner.lock();
        Ok(store
            .ledger
            .iter()
            .filter(|e| e.contractor == contractor)
            .map(|e| match e.direction {
                Direction::Income => e.amount as i64,
                Direction::Expense => -(e.amount as i64),
            })
            .sum())
    }

    async fn attach_photo(&self, job: JobId, photo: PhotoRef) -> Result<(), RepositoryError> {
        let mut store = self.inner.lock();
        store.check_write()?;
        let rec =
            store.jobs.get_mut(&job).ok_or_else(|| RepositoryError::not_found("job", job))?;
        rec.photo_count += 1;
        store.photos.entry(job).or_default().push(photo);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
