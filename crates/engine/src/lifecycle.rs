// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Guarded job stage transitions.
//!
//! Transitions are monotonic: a job never moves to a stage of lower or equal
//! rank, so stale buttons and repeated taps are no-ops. Finishing is guarded
//! by the four completeness predicates; a failure reports exactly the
//! missing subset and leaves the job untouched.

use tracing::info;
use ustabot_adapters::{Channel, Keyboard};
use ustabot_core::{ChatId, Clock, Job, JobId, Stage, StageResolver, UserId};
use ustabot_storage::Repository;

use crate::error::EngineError;
use crate::router::Router;
use crate::texts;

/// Display name recorded alongside the stage id. Chosen so degraded-mode
/// keyword resolution reads them back as the same stage.
fn stage_display_name(stage: Stage) -> &'static str {
    match stage {
        Stage::New => "New",
        Stage::Waiting | Stage::Accepted => "Waiting",
        Stage::Progress => "In progress",
        Stage::Done => "Done",
    }
}

impl<R: Repository, C: Channel, K: Clock> Router<R, C, K> {
    /// Move the job to `target` if that is forward. Returns whether a write
    /// happened.
    pub(crate) async fn transition_stage(
        &self,
        job: &Job,
        target: Stage,
    ) -> Result<bool, EngineError> {
        let ids = self.repo.configured_stage_ids().await?;
        let current = StageResolver::new(ids).resolve(job.stage_id, &job.stage_name);
        if current.rank() >= target.rank() {
            return Ok(false);
        }
        // Configured id when present; degraded mode records the name only.
        self.repo.set_job_stage(job.id, ids.id_for(target), stage_display_name(target)).await?;
        info!(job = %job.id, from = %current, to = %target, "stage transition");
        Ok(true)
    }

    /// The finish guard: all four predicates, or the exact failing subset.
    pub(crate) async fn request_finish(&self, job: &Job) -> Result<(), EngineError> {
        let completeness = self.job_facts(job.id).await?.completeness(job);
        if !completeness.ready() {
            return Err(EngineError::IncompletePrerequisites(completeness.missing()));
        }
        if self.transition_stage(job, Stage::Done).await? {
            let note = format!("🏁 Contractor finished job #{}", job.display_number());
            self.repo.post_job_note(job.id, &note).await?;
        }
        Ok(())
    }

    pub(crate) async fn on_accept(
        &self,
        _user: UserId,
        chat: ChatId,
        job: JobId,
    ) -> Result<(), EngineError> {
        let before = self.repo.find_job(job).await?;
        self.transition_stage(&before, Stage::Waiting).await?;
        let after = self.repo.find_job(job).await?;
        self.refresh_dashboard(chat, &after).await
    }

    pub(crate) async fn on_start_job(
        &self,
        _user: UserId,
        chat: ChatId,
        job: JobId,
    ) -> Result<(), EngineError> {
        let before = self.repo.find_job(job).await?;
        self.transition_stage(&before, Stage::Progress).await?;
        let after = self.repo.find_job(job).await?;
        self.refresh_dashboard(chat, &after).await
    }

    pub(crate) async fn on_finish(
        &self,
        _user: UserId,
        chat: ChatId,
        job: JobId,
    ) -> Result<(), EngineError> {
        let before = self.repo.find_job(job).await?;
        match self.request_finish(&before).await {
            Ok(()) => {
                let after = self.repo.find_job(job).await?;
                self.refresh_dashboard(chat, &after).await?;
                self.channel.send(chat, "🏁 Job finished. Well done!", Keyboard::None).await?;
                Ok(())
            }
            Err(EngineError::IncompletePrerequisites(missing)) => {
                let labels: Vec<&'static str> = missing.iter().map(|m| m.label()).collect();
                self.channel.send(chat, &texts::finish_blocked(&labels), Keyboard::None).await?;
                // Card stays as it was.
                self.refresh_dashboard(chat, &before).await
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
