// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Money entry flows: the service work amount and expense/income postings.
//!
//! Travel fare is an income posting with a fixed note; free-text categories
//! post as expenses. All amounts are whole currency units, digits only.

use ustabot_adapters::{Channel, InlineButton, Keyboard};
use ustabot_core::{
    format_money, CallbackAction, ChatId, Clock, ContractorId, Direction, FlowState, JobId,
    LedgerEntry, Session, UserId,
};
use ustabot_storage::Repository;

use crate::error::EngineError;
use crate::router::Router;
use crate::texts;

pub(crate) const TRAVEL_FARE_NOTE: &str = "Travel fare";
pub(crate) const SERVICE_REVENUE_NOTE: &str = "Service revenue";

/// Whole positive amount, digits only.
fn parse_amount(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = trimmed.parse().ok()?;
    (amount > 0).then_some(amount)
}

fn expense_type_keyboard(job: JobId) -> Keyboard {
    Keyboard::Inline {
        rows: vec![
            vec![InlineButton::new(
                texts::BTN_TRAVEL_FARE,
                CallbackAction::ExpenseFare(job).encode(),
            )],
            vec![InlineButton::new(texts::BTN_BACK, CallbackAction::ExpenseBack(job).encode())],
        ],
    }
}

impl<R: Repository, C: Channel, K: Clock> Router<R, C, K> {
    // ── Work amount ─────────────────────────────────────────────────────

    pub(crate) async fn open_work_amount(
        &self,
        user: UserId,
        chat: ChatId,
        job: JobId,
        now: u64,
    ) -> Result<(), EngineError> {
        let mut session = Session::new(FlowState::WorkAmount, now);
        session.scratch.job = Some(job);
        self.sessions.set(user, session);
        self.channel.send(chat, texts::ASK_WORK_AMOUNT, Keyboard::None).await?;
        Ok(())
    }

    pub(crate) async fn work_amount_on_text(
        &self,
        user: UserId,
        chat: ChatId,
        contractor: ContractorId,
        session: &Session,
        text: &str,
        now: u64,
    ) -> Result<(), EngineError> {
        let Some(amount) = parse_amount(text) else {
            self.channel.send(chat, texts::BAD_AMOUNT, Keyboard::None).await?;
            return Ok(());
        };
        let Some(job) = session.scratch.job else {
            return self.flow_abort(user, chat).await;
        };

        self.repo.set_job_work_amount(job, amount).await?;
        self.repo
            .post_ledger_entry(LedgerEntry {
                job,
                contractor,
                direction: Direction::Income,
                amount,
                note: SERVICE_REVENUE_NOTE.to_string(),
                at_epoch_ms: now,
            })
            .await?;

        self.sessions.clear(user);
        let job = self.repo.find_job(job).await?;
        self.refresh_dashboard(chat, &job).await?;
        let confirm = format!("💰 Service amount set: {}.", format_money(amount));
        self.channel.send(chat, &confirm, Keyboard::None).await?;
        Ok(())
    }

    // ── Expense / income ────────────────────────────────────────────────

    pub(crate) async fn open_expense(
        &self,
        user: UserId,
        chat: ChatId,
        job: JobId,
        now: u64,
    ) -> Result<(), EngineError> {
        let mut session = Session::new(FlowState::ExpenseType, now);
        session.scratch.job = Some(job);
        self.sessions.set(user, session);
        self.channel.send(chat, texts::EXPENSE_PROMPT, expense_type_keyboard(job)).await?;
        Ok(())
    }

    pub(crate) async fn expense_on_fare(
        &self,
        user: UserId,
        chat: ChatId,
        job: JobId,
        now: u64,
    ) -> Result<(), EngineError> {
        self.sessions.mutate(user, now, |s| {
            s.state = FlowState::ExpenseAmount;
            s.scratch.job = Some(job);
            s.scratch.expense_direction = Some(Direction::Income);
            s.scratch.expense_note = Some(TRAVEL_FARE_NOTE.to_string());
        });
        self.channel.send(chat, texts::ASK_EXPENSE_AMOUNT, Keyboard::None).await?;
        Ok(())
    }

    pub(crate) async fn expense_on_back(
        &self,
        user: UserId,
        chat: ChatId,
        job: JobId,
    ) -> Result<(), EngineError> {
        self.sessions.clear(user);
        let job = self.repo.find_job(job).await?;
        self.refresh_dashboard(chat, &job).await
    }

    /// Free text on the category step names an expense.
    pub(crate) async fn expense_on_free_text(
        &self,
        user: UserId,
        chat: ChatId,
        session: &Session,
        text: &str,
        now: u64,
    ) -> Result<(), EngineError> {
        let note = text.trim();
        if note.is_empty() {
            self.channel.send(chat, texts::EXPENSE_PROMPT, Keyboard::None).await?;
            return Ok(());
        }
        if session.scratch.job.is_none() {
            return self.flow_abort(user, chat).await;
        }
        let note = note.to_string();
        self.sessions.mutate(user, now, |s| {
            s.state = FlowState::ExpenseAmount;
            s.scratch.expense_direction = Some(Direction::Expense);
            s.scratch.expense_note = Some(note);
        });
        self.channel.send(chat, texts::ASK_EXPENSE_AMOUNT, Keyboard::None).await?;
        Ok(())
    }

    pub(crate) async fn expense_on_amount(
        &self,
        user: UserId,
        chat: ChatId,
        contractor: ContractorId,
        session: &Session,
        text: &str,
        now: u64,
    ) -> Result<(), EngineError> {
        let Some(amount) = parse_amount(text) else {
            self.channel.send(chat, texts::BAD_AMOUNT, Keyboard::None).await?;
            return Ok(());
        };
        match session.scratch.expense_note.clone() {
            Some(note) => {
                self.post_expense(user, chat, contractor, session, &note, amount, now).await
            }
            None => {
                self.sessions.mutate(user, now, |s| {
                    s.state = FlowState::ExpenseNote;
                    s.scratch.expense_amount = Some(amount);
                });
                self.channel.send(chat, texts::ASK_EXPENSE_NOTE, Keyboard::None).await?;
                Ok(())
            }
        }
    }

    pub(crate) async fn expense_on_note(
        &self,
        user: UserId,
        chat: ChatId,
        contractor: ContractorId,
        session: &Session,
        text: &str,
        now: u64,
    ) -> Result<(), EngineError> {
        let note = text.trim();
        if note.is_empty() {
            self.channel.send(chat, texts::ASK_EXPENSE_NOTE, Keyboard::None).await?;
            return Ok(());
        }
        let Some(amount) = session.scratch.expense_amount else {
            return self.flow_abort(user, chat).await;
        };
        self.post_expense(user, chat, contractor, session, note, amount, now).await
    }

    #[allow(clippy::too_many_arguments)]
    async fn post_expense(
        &self,
        user: UserId,
        chat: ChatId,
        contractor: ContractorId,
        session: &Session,
        note: &str,
        amount: u64,
        now: u64,
    ) -> Result<(), EngineError> {
        let Some(job) = session.scratch.job else {
            return self.flow_abort(user, chat).await;
        };
        let direction = session.scratch.expense_direction.unwrap_or(Direction::Expense);

        self.repo
            .post_ledger_entry(LedgerEntry {
                job,
                contractor,
                direction,
                amount,
                note: note.to_string(),
                at_epoch_ms: now,
            })
            .await?;

        self.sessions.clear(user);
        let job = self.repo.find_job(job).await?;
        self.refresh_dashboard(chat, &job).await?;
        let confirm =
            format!("🧾 Recorded: {}{} ({note}).", direction.sign(), format_money(amount));
        self.channel.send(chat, &confirm, Keyboard::None).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "finance_tests.rs"]
mod tests;
