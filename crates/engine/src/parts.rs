// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parts consumption flow: pick → quantity → price → post.
//!
//! The picker pages positive-stock lines on one anchored inline message.
//! Quantity is checked against on-hand at entry for a fast answer, and the
//! repository re-checks at commit; only the commit check is authoritative.

use tracing::debug;
use ustabot_adapters::{Channel, InlineButton, Keyboard};
use ustabot_core::{
    CallbackAction, ChatId, Clock, ContractorId, FlowState, InventoryLine, JobId, PartId,
    PartsMovement, Session, UserId,
};
use ustabot_storage::{Repository, RepositoryError};

use crate::error::EngineError;
use crate::router::Router;
use crate::texts;

fn picker(lines: &[InventoryLine], job: JobId, page: u32, page_size: usize) -> (String, Keyboard) {
    let page_size = page_size.max(1);
    let pages = lines.len().div_ceil(page_size).max(1);
    let page = page.min(pages.saturating_sub(1) as u32);
    let start = page as usize * page_size;
    let end = (start + page_size).min(lines.len());

    let mut rows: Vec<Vec<InlineButton>> = lines[start..end]
        .iter()
        .map(|line| {
            vec![InlineButton::new(
                line.label(),
                CallbackAction::PartsPick { job, part: line.part, page }.encode(),
            )]
        })
        .collect();

    let mut nav = Vec::new();
    if page > 0 {
        nav.push(InlineButton::new(
            "⬅️",
            CallbackAction::PartsPage { job, page: page - 1 }.encode(),
        ));
    }
    if end < lines.len() {
        nav.push(InlineButton::new(
            "➡️",
            CallbackAction::PartsPage { job, page: page + 1 }.encode(),
        ));
    }
    if !nav.is_empty() {
        rows.push(nav);
    }
    rows.push(vec![InlineButton::new(texts::BTN_BACK, CallbackAction::PartsBack(job).encode())]);

    (texts::parts_header(pages, page), Keyboard::Inline { rows })
}

/// Quantity input: decimals allowed, comma accepted as the separator.
fn parse_qty(text: &str) -> Option<f64> {
    let qty: f64 = text.trim().replace(',', ".").parse().ok()?;
    (qty > 0.0 && qty.is_finite()).then_some(qty)
}

impl<R: Repository, C: Channel, K: Clock> Router<R, C, K> {
    pub(crate) async fn open_parts(
        &self,
        user: UserId,
        chat: ChatId,
        contractor: ContractorId,
        job: JobId,
        now: u64,
    ) -> Result<(), EngineError> {
        let lines = self.repo.list_inventory(contractor, true).await?;
        if lines.is_empty() {
            self.channel.send(chat, texts::NO_PARTS, Keyboard::None).await?;
            return Ok(());
        }

        let (text, keyboard) = picker(&lines, job, 0, self.config.page_size);
        let anchor = self.channel.send(chat, &text, keyboard).await?;

        let mut session = Session::new(FlowState::PartsPick, now);
        session.scratch.job = Some(job);
        session.scratch.anchor = Some(anchor);
        self.sessions.set(user, session);
        Ok(())
    }

    pub(crate) async fn parts_on_page(
        &self,
        user: UserId,
        chat: ChatId,
        contractor: ContractorId,
        job: JobId,
        page: u32,
        now: u64,
    ) -> Result<(), EngineError> {
        let Some(session) = self.sessions.get(user, now) else { return Ok(()) };
        let lines = self.repo.list_inventory(contractor, true).await?;
        if lines.is_empty() {
            return self.parts_on_back(user, chat, job).await;
        }
        let (text, keyboard) = picker(&lines, job, page, self.config.page_size);
        let anchor = self.edit_or_send(chat, session.scratch.anchor, &text, keyboard).await?;
        self.sessions.mutate(user, now, |s| {
            s.scratch.page = page;
            s.scratch.anchor = Some(anchor);
        });
        Ok(())
    }

    pub(crate) async fn parts_on_pick(
        &self,
        user: UserId,
        chat: ChatId,
        contractor: ContractorId,
        job: JobId,
        part: PartId,
        page: u32,
        now: u64,
    ) -> Result<(), EngineError> {
        let Some(line) = self.repo.find_inventory_line(contractor, part).await? else {
            debug!(%user, %part, "picked line vanished");
            return self.parts_on_page(user, chat, contractor, job, page, now).await;
        };
        self.sessions.mutate(user, now, |s| {
            s.state = FlowState::PartsQty;
            s.scratch.job = Some(job);
            s.scratch.part = Some(part);
            s.scratch.page = page;
        });
        self.channel
            .send(chat, &texts::ask_qty(&line.name, line.on_hand, &line.uom), Keyboard::None)
            .await?;
        Ok(())
    }

    pub(crate) async fn parts_on_back(
        &self,
        user: UserId,
        chat: ChatId,
        job: JobId,
    ) -> Result<(), EngineError> {
        self.sessions.clear(user);
        let job = self.repo.find_job(job).await?;
        self.refresh_dashboard(chat, &job).await
    }

    pub(crate) async fn parts_on_qty(
        &self,
        user: UserId,
        chat: ChatId,
        contractor: ContractorId,
        session: &Session,
        text: &str,
        now: u64,
    ) -> Result<(), EngineError> {
        let Some(qty) = parse_qty(text) else {
            self.channel.send(chat, texts::BAD_QTY, Keyboard::None).await?;
            return Ok(());
        };
        let Some(part) = session.scratch.part else {
            return self.flow_abort(user, chat).await;
        };

        // Fast check; the commit re-checks under the store lock.
        if let Some(line) = self.repo.find_inventory_line(contractor, part).await? {
            if qty > line.on_hand {
                self.channel
                    .send(chat, &texts::insufficient_stock(line.on_hand), Keyboard::None)
                    .await?;
                return Ok(());
            }
        }

        self.sessions.mutate(user, now, |s| {
            s.state = FlowState::PartsPrice;
            s.scratch.qty = Some(qty);
        });
        self.channel.send(chat, texts::ASK_PRICE, Keyboard::None).await?;
        Ok(())
    }

    pub(crate) async fn parts_on_price(
        &self,
        user: UserId,
        chat: ChatId,
        contractor: ContractorId,
        session: &Session,
        text: &str,
        now: u64,
    ) -> Result<(), EngineError> {
        let Ok(unit_price) = text.trim().parse::<u64>() else {
            self.channel.send(chat, texts::BAD_AMOUNT, Keyboard::None).await?;
            return Ok(());
        };
        let (Some(job), Some(part), Some(qty)) =
            (session.scratch.job, session.scratch.part, session.scratch.qty)
        else {
            return self.flow_abort(user, chat).await;
        };

        let line = self.repo.find_inventory_line(contractor, part).await?;
        let movement = PartsMovement {
            contractor,
            part,
            job,
            qty,
            unit_price,
            note: None,
            at_epoch_ms: now,
        };
        match self.repo.post_parts_consumption(movement).await {
            Ok(()) => {}
            Err(RepositoryError::InsufficientStock { on_hand }) => {
                // The stock moved under us; back to quantity.
                self.sessions.mutate(user, now, |s| {
                    s.state = FlowState::PartsQty;
                    s.scratch.qty = None;
                });
                self.channel
                    .send(chat, &texts::insufficient_stock(on_hand), Keyboard::None)
                    .await?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        self.sessions.clear(user);
        let job = self.repo.find_job(job).await?;
        self.refresh_dashboard(chat, &job).await?;
        let confirm = match line {
            Some(line) => format!("🔩 Recorded: {qty} {} of {}.", line.uom, line.name),
            None => format!("🔩 Recorded: {qty}."),
        };
        self.channel.send(chat, &confirm, Keyboard::None).await?;
        Ok(())
    }

    /// Flow scratch went missing: unwind to idle with a notice.
    pub(crate) async fn flow_abort(&self, user: UserId, chat: ChatId) -> Result<(), EngineError> {
        debug!(%user, "flow scratch incomplete, aborting");
        self.sessions.clear(user);
        self.channel.send(chat, texts::FAILURE_NOTICE, Keyboard::None).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "parts_tests.rs"]
mod tests;
