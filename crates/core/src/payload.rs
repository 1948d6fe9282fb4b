// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inline action payload codec.
//!
//! Payloads are colon-delimited opaque strings: namespace, sub-action, then
//! positional arguments. This is the wire format between the dashboard
//! renderer and the event router. It must stay stable within a deployment —
//! in-flight messages keep their old payload strings until users press them.
//! Malformed or unknown payloads parse to `None` and get dropped silently.

use crate::id::{DistrictId, JobId, PartId, RegionId};

/// Every inline action the bot can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Registration: region picked.
    RegRegion(RegionId),
    /// Registration: district toggled.
    RegDistrict(DistrictId),
    /// Registration: district selection confirmed.
    RegDistrictsOk,
    /// Registration: back to region list.
    RegBackToRegion,
    /// Job card: accept the job.
    Accept(JobId),
    /// Job card: start the work.
    Start(JobId),
    /// Job card: request finish (guarded).
    Finish(JobId),
    /// Job card: capture work amount.
    Amount(JobId),
    /// Job card: open parts consumption.
    Parts(JobId),
    /// Job card: open expense/income entry.
    Expenses(JobId),
    /// Job card: collect photos.
    Photo(JobId),
    /// Parts flow: line picked on a page.
    PartsPick { job: JobId, part: PartId, page: u32 },
    /// Parts flow: navigate to page.
    PartsPage { job: JobId, page: u32 },
    /// Parts flow: back to the job card.
    PartsBack(JobId),
    /// Expense flow: predefined travel-fare category.
    ExpenseFare(JobId),
    /// Expense flow: back to the job card.
    ExpenseBack(JobId),
    /// History menu: build the export.
    HistoryExport,
    /// Settings: language row (display only for now).
    SetLanguage,
    /// Settings: unlink the channel identity.
    Logout,
    /// Disabled placeholder button.
    Noop,
}

impl CallbackAction {
    /// Encode to the wire string.
    pub fn encode(&self) -> String {
        match self {
            CallbackAction::RegRegion(r) => format!("reg:vil:{r}"),
            CallbackAction::RegDistrict(d) => format!("reg:tum:{d}"),
            CallbackAction::RegDistrictsOk => "reg:tum:ok".into(),
            CallbackAction::RegBackToRegion => "reg:back:vil".into(),
            CallbackAction::Accept(j) => format!("rq:accept:{j}"),
            CallbackAction::Start(j) => format!("rq:start:{j}"),
            CallbackAction::Finish(j) => format!("rq:finish:{j}"),
            CallbackAction::Amount(j) => format!("rq:amount:{j}"),
            CallbackAction::Parts(j) => format!("rq:parts:{j}"),
            CallbackAction::Expenses(j) => format!("rq:travel:{j}"),
            CallbackAction::Photo(j) => format!("rq:photo:{j}"),
            CallbackAction::PartsPick { job, part, page } => {
                format!("zp:pick:{job}:{part}:{page}")
            }
            CallbackAction::PartsPage { job, page } => format!("zp:pg:{job}:{page}"),
            CallbackAction::PartsBack(j) => format!("zp:back:{j}"),
            CallbackAction::ExpenseFare(j) => format!("exp:type:fare:{j}"),
            CallbackAction::ExpenseBack(j) => format!("exp:type:back:{j}"),
            CallbackAction::HistoryExport => "hist:export".into(),
            CallbackAction::SetLanguage => "set:lang".into(),
            CallbackAction::Logout => "logout".into(),
            CallbackAction::Noop => "noop".into(),
        }
    }

    /// Parse a wire string. Returns `None` for anything unrecognized.
    pub fn parse(payload: &str) -> Option<Self> {
        let parts: Vec<&str> = payload.split(':').collect();
        match parts.as_slice() {
            ["reg", "vil", r] => Some(CallbackAction::RegRegion(r.parse().ok()?)),
            ["reg", "tum", "ok"] => Some(CallbackAction::RegDistrictsOk),
            ["reg", "tum", d] => Some(CallbackAction::RegDistrict(d.parse().ok()?)),
            ["reg", "back", "vil"] => Some(CallbackAction::RegBackToRegion),
            ["rq", "accept", j] => Some(CallbackAction::Accept(j.parse().ok()?)),
            ["rq", "start", j] => Some(CallbackAction::Start(j.parse().ok()?)),
            ["rq", "finish", j] => Some(CallbackAction::Finish(j.parse().ok()?)),
            ["rq", "amount", j] => Some(CallbackAction::Amount(j.parse().ok()?)),
            ["rq", "parts", j] => Some(CallbackAction::Parts(j.parse().ok()?)),
            ["rq", "travel", j] => Some(CallbackAction::Expenses(j.parse().ok()?)),
            ["rq", "photo", j] => Some(CallbackAction::Photo(j.parse().ok()?)),
            ["zp", "pick", j, p, page] => Some(CallbackAction::PartsPick {
                job: j.parse().ok()?,
                part: p.parse().ok()?,
                page: page.parse().ok()?,
            }),
            ["zp", "pg", j, page] => Some(CallbackAction::PartsPage {
                job: j.parse().ok()?,
                page: page.parse().ok()?,
            }),
            ["zp", "back", j] => Some(CallbackAction::PartsBack(j.parse().ok()?)),
            ["exp", "type", "fare", j] => Some(CallbackAction::ExpenseFare(j.parse().ok()?)),
            ["exp", "type", "back", j] => Some(CallbackAction::ExpenseBack(j.parse().ok()?)),
            ["hist", "export"] => Some(CallbackAction::HistoryExport),
            ["set", "lang"] => Some(CallbackAction::SetLanguage),
            ["logout"] => Some(CallbackAction::Logout),
            ["noop"] => Some(CallbackAction::Noop),
            _ => None,
        }
    }
}

impl std::fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
