// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job dashboard card: one message per job, edited in place.
//!
//! The card is the contractor's whole view of a job: header, customer,
//! address, products, the four completeness indicators, and stage-dependent
//! action buttons. Refreshing a bound card edits it and swallows benign
//! edit failures; an unbound card is sent fresh and its binding persisted.

use tracing::debug;
use ustabot_adapters::{Channel, ChannelError, InlineButton, Keyboard};
use ustabot_core::{
    format_money, CallbackAction, ChatId, Clock, Completeness, Job, JobId, MessageId, Stage,
};
use ustabot_storage::Repository;

use crate::error::EngineError;
use crate::router::Router;

const DESCRIPTION_LIMIT: usize = 600;

/// Completeness facts gathered from outside the job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobFacts {
    pub parts_count: u32,
    pub expenses_total: u64,
    pub has_ledger: bool,
}

impl JobFacts {
    pub fn completeness(&self, job: &Job) -> Completeness {
        Completeness {
            amount: job.work_amount.is_some(),
            parts: self.parts_count > 0,
            ledger: self.has_ledger,
            photo: job.photo_count > 0,
        }
    }
}

fn btn(label: &str, action: CallbackAction) -> InlineButton {
    InlineButton::new(label, action.encode())
}

fn card_keyboard(job: JobId, stage: Stage) -> Keyboard {
    use CallbackAction::*;
    let rows = match stage {
        Stage::New => vec![vec![btn("✅ Accept", Accept(job))]],
        Stage::Waiting | Stage::Accepted => vec![vec![btn("▶️ Start", Start(job))]],
        Stage::Progress => vec![
            vec![btn("🏁 Finish", Finish(job))],
            vec![btn("💰 Amount", Amount(job)), btn("🔩 Parts", Parts(job))],
            vec![btn("🧾 Expenses", Expenses(job)), btn("📷 Photo", Photo(job))],
        ],
        Stage::Done => vec![vec![btn("✔️ Completed", Noop)]],
    };
    Keyboard::Inline { rows }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit).collect();
    out.push('…');
    out
}

/// Render the card body and its action keyboard.
pub(crate) fn render_card(job: &Job, stage: Stage, facts: &JobFacts) -> (String, Keyboard) {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("🧾 Job #{} — {}", job.display_number(), job.title));

    match (&job.customer_name, &job.customer_phone) {
        (Some(name), Some(phone)) => lines.push(format!("👤 {name} 📞 {phone}")),
        (Some(name), None) => lines.push(format!("👤 {name}")),
        (None, Some(phone)) => lines.push(format!("📞 {phone}")),
        (None, None) => {}
    }
    if let Some(address) = job.display_address() {
        lines.push(format!("📍 {address}"));
    }
    // Only the explicitly stored link, never derived.
    if let Some(url) = job.location_url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(format!("🔗 {url}"));
    }

    if !job.products.is_empty() {
        lines.push(String::new());
        lines.push("🛒 Products:".to_string());
        for (i, product) in job.products.iter().enumerate() {
            let mut row = format!("{}. [{}] {}", i + 1, product.code, product.name);
            if let Some(sold_at) = product.sold_at.as_deref().filter(|s| !s.is_empty()) {
                row.push_str(&format!(" ({sold_at})"));
            }
            lines.push(row);
        }
    }

    let completeness = facts.completeness(job);
    lines.push(String::new());
    lines.push(format!(
        "💰 Amount: {}",
        job.work_amount.map(format_money).unwrap_or_else(|| "—".to_string())
    ));
    lines.push(format!("🔩 Parts: {}", if completeness.parts { "✅" } else { "—" }));
    lines.push(format!(
        "🧾 Expense: {}",
        if facts.expenses_total > 0 {
            format_money(facts.expenses_total)
        } else if completeness.ledger {
            "✅".to_string()
        } else {
            "—".to_string()
        }
    ));
    lines.push(format!("📷 Photo: {}", if completeness.photo { "✅" } else { "—" }));

    if !job.tags.is_empty() {
        lines.push(String::new());
        lines.push(format!("🏷 {}", job.tags.join(", ")));
    }
    if !job.description.is_empty() {
        lines.push(String::new());
        lines.push(format!("📝 {}", truncate(&job.description, DESCRIPTION_LIMIT)));
    }

    (lines.join("\n"), card_keyboard(job.id, stage))
}

impl<R: Repository, C: Channel, K: Clock> Router<R, C, K> {
    pub(crate) async fn job_facts(&self, job: JobId) -> Result<JobFacts, EngineError> {
        Ok(JobFacts {
            parts_count: self.repo.count_parts_movements(job).await?,
            expenses_total: self.repo.sum_expenses(job).await?,
            has_ledger: self.repo.any_ledger_entry(job).await?,
        })
    }

    /// Re-render the job's card: edit when bound, fresh send + bind otherwise.
    pub(crate) async fn refresh_dashboard(
        &self,
        chat: ChatId,
        job: &Job,
    ) -> Result<(), EngineError> {
        let resolver = self.resolver().await?;
        let facts = self.job_facts(job.id).await?;
        let stage = resolver.resolve(job.stage_id, &job.stage_name);
        let (text, keyboard) = render_card(job, stage, &facts);

        match job.dashboard {
            Some(binding) => {
                match self.channel.edit(binding.chat, binding.message, &text, keyboard).await {
                    Ok(()) => Ok(()),
                    Err(e) if e.is_benign() => {
                        debug!(job = %job.id, error = %e, "dashboard edit swallowed");
                        Ok(())
                    }
                    Err(e) => Err(e.into()),
                }
            }
            None => {
                let message = self.channel.send(chat, &text, keyboard).await?;
                self.repo.set_job_dashboard_binding(job.id, chat, message).await?;
                Ok(())
            }
        }
    }

    /// Send a fresh card regardless of any existing binding, then rebind.
    pub(crate) async fn send_card(&self, chat: ChatId, job: &Job) -> Result<(), EngineError> {
        let resolver = self.resolver().await?;
        let facts = self.job_facts(job.id).await?;
        let stage = resolver.resolve(job.stage_id, &job.stage_name);
        let (text, keyboard) = render_card(job, stage, &facts);
        let message = self.channel.send(chat, &text, keyboard).await?;
        self.repo.set_job_dashboard_binding(job.id, chat, message).await?;
        Ok(())
    }

    /// Edit the anchored flow message, falling back to a fresh send when the
    /// target is gone. Returns the id the content now lives on.
    pub(crate) async fn edit_or_send(
        &self,
        chat: ChatId,
        anchor: Option<MessageId>,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<MessageId, EngineError> {
        if let Some(message) = anchor {
            match self.channel.edit(chat, message, text, keyboard.clone()).await {
                Ok(()) | Err(ChannelError::NotModified) => return Ok(message),
                Err(ChannelError::EditTargetMissing) => {
                    debug!(%chat, %message, "anchor gone, sending fresh");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(self.channel.send(chat, text, keyboard).await?)
    }
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
