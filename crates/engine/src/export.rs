// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! History export rows. Serialization to a file format is a consumer concern.

use serde::{Deserialize, Serialize};
use ustabot_core::ContractorId;
use ustabot_storage::Repository;

use crate::error::EngineError;

const DESCRIPTION_LIMIT: usize = 2000;

/// One job, flattened for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobHistoryRow {
    pub number: String,
    pub title: String,
    pub customer: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at_epoch_ms: u64,
    pub stage_name: String,
    pub work_amount: Option<u64>,
    pub expenses_total: u64,
    pub parts_count: u32,
    pub description: String,
}

/// Flatten the contractor's jobs, newest first, up to `limit`.
pub async fn history_rows<R: Repository + ?Sized>(
    repo: &R,
    contractor: ContractorId,
    limit: usize,
) -> Result<Vec<JobHistoryRow>, EngineError> {
    let jobs = repo.list_jobs(contractor, limit).await?;
    let mut rows = Vec::with_capacity(jobs.len());
    for job in jobs {
        let expenses_total = repo.sum_expenses(job.id).await?;
        let parts_count = repo.count_parts_movements(job.id).await?;
        let description = if job.description.chars().count() > DESCRIPTION_LIMIT {
            job.description.chars().take(DESCRIPTION_LIMIT).collect()
        } else {
            job.description.clone()
        };
        let number = job.display_number();
        let address = job.display_address().map(str::to_string);
        rows.push(JobHistoryRow {
            number,
            title: job.title,
            customer: job.customer_name,
            phone: job.customer_phone,
            address,
            created_at_epoch_ms: job.created_at_epoch_ms,
            stage_name: job.stage_name,
            work_amount: job.work_amount,
            expenses_total,
            parts_count,
            description,
        });
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
