// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle stages and the two-tier stage resolver.
//!
//! Stage resolution is primary-then-fallback: first an equality check against
//! the configured stage ids, then a case-insensitive keyword match on the
//! stage display name. The fallback keeps the bot usable on deployments where
//! no stage ids were ever configured (degraded mode).

use crate::id::StageId;
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a job as seen by the contractor.
///
/// `Done` is terminal for this core; post-done confirmation happens on the
/// operator side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    New,
    Waiting,
    Accepted,
    Progress,
    Done,
}

crate::simple_display! {
    Stage {
        New => "new",
        Waiting => "waiting",
        Accepted => "accepted",
        Progress => "progress",
        Done => "done",
    }
}

impl Stage {
    /// Monotonic position in the lifecycle. Transitions never decrease rank.
    pub fn rank(&self) -> u8 {
        match self {
            Stage::New => 0,
            Stage::Waiting => 1,
            Stage::Accepted => 1,
            Stage::Progress => 2,
            Stage::Done => 3,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Done)
    }
}

/// Configured stage ids, loaded from the backing store's settings.
///
/// Any field may be unset; fully unset means degraded mode where resolution
/// relies on display-name keywords only. The waiting id also answers for
/// `accepted` — deployments configure a single "accepted/waiting" column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageIds {
    pub waiting: Option<StageId>,
    pub progress: Option<StageId>,
    pub done: Option<StageId>,
}

impl StageIds {
    pub fn is_empty(&self) -> bool {
        self.waiting.is_none() && self.progress.is_none() && self.done.is_none()
    }

    /// The configured id for a target stage, if any.
    pub fn id_for(&self, stage: Stage) -> Option<StageId> {
        match stage {
            Stage::Waiting | Stage::Accepted => self.waiting,
            Stage::Progress => self.progress,
            Stage::Done => self.done,
            Stage::New => None,
        }
    }
}

/// Display-name keywords per stage, multilingual (uz/en).
///
/// Order matters: the first stage whose keyword list matches wins, and more
/// terminal stages are checked first so "done" names never read as "waiting".
const NAME_KEYWORDS: &[(Stage, &[&str])] = &[
    (Stage::Done, &["yakunlandi", "done", "finished", "tugadi"]),
    (Stage::Progress, &["jarayonda", "progress", "boshlandi"]),
    (Stage::Waiting, &["kutilmoqda", "waiting", "pending"]),
    (Stage::Accepted, &["qabul", "accept"]),
];

/// Two-tier stage resolver: configured ids first, name keywords second.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageResolver {
    ids: StageIds,
}

impl StageResolver {
    pub fn new(ids: StageIds) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> StageIds {
        self.ids
    }

    /// Resolve a stored (id, display name) pair to a lifecycle stage.
    pub fn resolve(&self, stage_id: Option<StageId>, stage_name: &str) -> Stage {
        if let Some(sid) = stage_id {
            if self.ids.done == Some(sid) {
                return Stage::Done;
            }
            if self.ids.progress == Some(sid) {
                return Stage::Progress;
            }
            if self.ids.waiting == Some(sid) {
                return Stage::Waiting;
            }
        }
        Self::resolve_by_name(stage_name)
    }

    /// Fallback tier: keyword match against the display name.
    pub fn resolve_by_name(stage_name: &str) -> Stage {
        let name = stage_name.to_lowercase();
        for (stage, keywords) in NAME_KEYWORDS {
            if keywords.iter().any(|kw| name.contains(kw)) {
                return *stage;
            }
        }
        Stage::New
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
