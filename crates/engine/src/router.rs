// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The event router: one entry point per inbound event.
//!
//! `handle` acquires the user's turn lock, runs the access gate, then
//! dispatches on (session state, event shape). Anything unmatched is dropped
//! silently — stale buttons and stray text must never crash a turn or leak a
//! reply. Repository failures unwind the current flow to idle with a generic
//! notice; benign channel errors are swallowed where they occur.

use std::sync::Arc;

use tracing::{debug, warn};
use ustabot_adapters::{Channel, Keyboard};
use ustabot_core::{
    Activation, CallbackAction, ChannelEvent, ChatId, Clock, Contractor, FlowState, Inbound,
    Session, StageResolver, UserId,
};
use ustabot_storage::Repository;

use crate::error::EngineError;
use crate::session_store::{SessionStore, DEFAULT_SESSION_TTL_MS};
use crate::texts;

#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Inventory lines per parts-picker page.
    pub page_size: usize,
    pub session_ttl_ms: u64,
    /// Cap on cards sent from the active-jobs menu.
    pub open_jobs_limit: usize,
    /// Cap on rows in a history export.
    pub history_limit: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            page_size: 8,
            session_ttl_ms: DEFAULT_SESSION_TTL_MS,
            open_jobs_limit: 20,
            history_limit: 200,
        }
    }
}

/// The conversational engine. One instance serves every user.
pub struct Router<R, C, K> {
    pub(crate) repo: Arc<R>,
    pub(crate) channel: Arc<C>,
    pub(crate) clock: K,
    pub(crate) sessions: SessionStore,
    pub(crate) config: RouterConfig,
}

impl<R: Repository, C: Channel, K: Clock> Router<R, C, K> {
    pub fn new(repo: Arc<R>, channel: Arc<C>, clock: K, config: RouterConfig) -> Self {
        let sessions = SessionStore::new(config.session_ttl_ms);
        Self { repo, channel, clock, sessions, config }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Process one inbound event to completion.
    pub async fn handle(&self, inbound: Inbound) -> Result<(), EngineError> {
        let lock = self.sessions.turn_lock(inbound.user);
        let _turn = lock.lock().await;
        let now = self.clock.epoch_ms();

        let contractor = self.repo.find_contractor_by_user(inbound.user).await?;

        // Access gate: a known contractor who may not work is blocked from
        // everything except /start. Unknown users pass so registration can
        // proceed. The gate never touches session state.
        if let Some(c) = &contractor {
            if !c.can_work() && !inbound.event.is_start_command() {
                debug!(user = %inbound.user, activation = %c.activation, "gated");
                let notice = match c.activation {
                    Activation::Pending => texts::PENDING_ACTIVATION,
                    _ => texts::RESTRICTED,
                };
                self.channel.send(inbound.chat, notice, Keyboard::Remove).await?;
                return Ok(());
            }
        }

        let session = self.sessions.get(inbound.user, now);
        match self.dispatch(&inbound, contractor.as_ref(), session, now).await {
            Ok(()) => Ok(()),
            Err(EngineError::Channel(e)) if e.is_benign() => {
                debug!(user = %inbound.user, error = %e, "benign channel error");
                Ok(())
            }
            Err(EngineError::Repository(e)) => {
                warn!(user = %inbound.user, error = %e, "flow aborted");
                self.sessions.clear(inbound.user);
                if let Err(send_err) =
                    self.channel.send(inbound.chat, texts::FAILURE_NOTICE, Keyboard::None).await
                {
                    debug!(error = %send_err, "failure notice undeliverable");
                }
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    async fn dispatch(
        &self,
        inbound: &Inbound,
        contractor: Option<&Contractor>,
        session: Option<Session>,
        now: u64,
    ) -> Result<(), EngineError> {
        let user = inbound.user;
        let chat = inbound.chat;
        let state = session.as_ref().map(|s| s.state);

        match &inbound.event {
            ChannelEvent::Command { name } if name == "start" => {
                self.on_start(user, chat, contractor, now).await
            }
            ChannelEvent::Command { name } => {
                debug!(%user, command = %name, "unknown command dropped");
                Ok(())
            }
            ChannelEvent::Callback { payload } => match CallbackAction::parse(payload) {
                Some(action) => {
                    self.on_callback(user, chat, action, contractor, session, now).await
                }
                None => {
                    debug!(%user, %payload, "unparseable callback dropped");
                    Ok(())
                }
            },
            ChannelEvent::Contact { phone } => match state {
                Some(FlowState::RegPhone) => self.reg_on_phone(user, chat, phone, now).await,
                _ => Ok(()),
            },
            ChannelEvent::Location { lat, lng } => match state {
                Some(FlowState::RegLocation) => {
                    self.reg_on_location(user, chat, *lat, *lng, now).await
                }
                _ => Ok(()),
            },
            ChannelEvent::Photo { file_ref } => match (state, session.as_ref()) {
                (Some(FlowState::Photo), Some(s)) => {
                    self.photo_on_upload(user, chat, s, file_ref).await
                }
                _ => Ok(()),
            },
            ChannelEvent::Text { text } => {
                self.on_text(user, chat, text, contractor, session, now).await
            }
        }
    }

    async fn on_text(
        &self,
        user: UserId,
        chat: ChatId,
        text: &str,
        contractor: Option<&Contractor>,
        session: Option<Session>,
        now: u64,
    ) -> Result<(), EngineError> {
        let Some(session) = session else {
            // Idle: only the main menu reacts to text, and only for a
            // contractor in good standing.
            if let Some(c) = contractor {
                return self.on_menu_text(user, chat, c, text).await;
            }
            debug!(%user, "idle text from unknown user dropped");
            return Ok(());
        };

        match session.state {
            FlowState::RegPhone => self.reg_on_phone(user, chat, text, now).await,
            FlowState::RegLocation if texts::is_back_text(text) => {
                self.reg_back_to_districts(user, chat, &session, now).await
            }
            FlowState::RegFullName => self.reg_on_full_name(user, chat, &session, text, now).await,
            FlowState::WorkAmount => {
                let Some(c) = contractor else { return Ok(()) };
                self.work_amount_on_text(user, chat, c.id, &session, text, now).await
            }
            FlowState::ExpenseType => {
                self.expense_on_free_text(user, chat, &session, text, now).await
            }
            FlowState::ExpenseAmount => {
                let Some(c) = contractor else { return Ok(()) };
                self.expense_on_amount(user, chat, c.id, &session, text, now).await
            }
            FlowState::ExpenseNote => {
                let Some(c) = contractor else { return Ok(()) };
                self.expense_on_note(user, chat, c.id, &session, text, now).await
            }
            FlowState::PartsQty => {
                let Some(c) = contractor else { return Ok(()) };
                self.parts_on_qty(user, chat, c.id, &session, text, now).await
            }
            FlowState::PartsPrice => {
                let Some(c) = contractor else { return Ok(()) };
                self.parts_on_price(user, chat, c.id, &session, text, now).await
            }
            FlowState::Photo => self.photo_on_text(user, chat, text).await,
            state => {
                debug!(%user, %state, "text dropped in this state");
                Ok(())
            }
        }
    }

    async fn on_callback(
        &self,
        user: UserId,
        chat: ChatId,
        action: CallbackAction,
        contractor: Option<&Contractor>,
        session: Option<Session>,
        now: u64,
    ) -> Result<(), EngineError> {
        use CallbackAction::*;
        let state = session.as_ref().map(|s| s.state);

        match (action, state) {
            // Registration
            (RegRegion(region), Some(FlowState::RegRegion)) => {
                self.reg_on_region(user, chat, region, now).await
            }
            (RegDistrict(district), Some(FlowState::RegDistricts)) => {
                let session = session.unwrap_or_else(|| Session::new(FlowState::RegDistricts, now));
                self.reg_on_district_toggle(user, chat, session, district, now).await
            }
            (RegDistrictsOk, Some(FlowState::RegDistricts)) => {
                let session = session.unwrap_or_else(|| Session::new(FlowState::RegDistricts, now));
                self.reg_on_districts_confirm(user, chat, session, now).await
            }
            (RegBackToRegion, Some(FlowState::RegDistricts)) => {
                self.reg_back_to_regions(user, chat, now).await
            }

            // Job card actions are valid from any state for a linked
            // contractor; they restart whatever flow was in progress.
            (Accept(job), _) => {
                if contractor.is_none() {
                    return Ok(());
                }
                self.on_accept(user, chat, job).await
            }
            (Start(job), _) => {
                if contractor.is_none() {
                    return Ok(());
                }
                self.on_start_job(user, chat, job).await
            }
            (Finish(job), _) => {
                if contractor.is_none() {
                    return Ok(());
                }
                self.on_finish(user, chat, job).await
            }
            (Amount(job), _) => {
                if contractor.is_none() {
                    return Ok(());
                }
                self.open_work_amount(user, chat, job, now).await
            }
            (Parts(job), _) => {
                let Some(c) = contractor else { return Ok(()) };
                self.open_parts(user, chat, c.id, job, now).await
            }
            (Expenses(job), _) => {
                if contractor.is_none() {
                    return Ok(());
                }
                self.open_expense(user, chat, job, now).await
            }
            (Photo(job), _) => {
                if contractor.is_none() {
                    return Ok(());
                }
                self.open_photo(user, chat, job, now).await
            }

            // Parts picker
            (PartsPick { job, part, page }, Some(FlowState::PartsPick)) => {
                let Some(c) = contractor else { return Ok(()) };
                self.parts_on_pick(user, chat, c.id, job, part, page, now).await
            }
            (PartsPage { job, page }, Some(FlowState::PartsPick)) => {
                let Some(c) = contractor else { return Ok(()) };
                self.parts_on_page(user, chat, c.id, job, page, now).await
            }
            (
                PartsBack(job),
                Some(FlowState::PartsPick | FlowState::PartsQty | FlowState::PartsPrice),
            ) => self.parts_on_back(user, chat, job).await,

            // Expense category
            (ExpenseFare(job), Some(FlowState::ExpenseType)) => {
                self.expense_on_fare(user, chat, job, now).await
            }
            (ExpenseBack(job), Some(FlowState::ExpenseType)) => {
                self.expense_on_back(user, chat, job).await
            }

            // Menu
            (HistoryExport, _) => {
                let Some(c) = contractor else { return Ok(()) };
                self.on_history_export(chat, c).await
            }
            (Logout, _) => {
                let Some(c) = contractor else { return Ok(()) };
                self.on_logout(user, chat, c).await
            }
            (SetLanguage, _) | (Noop, _) => Ok(()),

            (action, state) => {
                debug!(%user, action = %action, state = ?state.map(|s| s.to_string()), "callback dropped");
                Ok(())
            }
        }
    }

    async fn on_start(
        &self,
        user: UserId,
        chat: ChatId,
        contractor: Option<&Contractor>,
        now: u64,
    ) -> Result<(), EngineError> {
        // /start always resets whatever flow was in progress.
        self.sessions.clear(user);
        match contractor {
            Some(c) if c.can_work() => {
                self.channel
                    .send(chat, &texts::greeting(&c.full_name), texts::main_menu_keyboard())
                    .await?;
                Ok(())
            }
            Some(c) if c.activation == Activation::Pending => {
                self.channel.send(chat, texts::PENDING_ACTIVATION, Keyboard::Remove).await?;
                Ok(())
            }
            Some(_) => {
                self.channel.send(chat, texts::RESTRICTED, Keyboard::Remove).await?;
                Ok(())
            }
            None => self.reg_start(user, chat, now).await,
        }
    }

    /// The resolver for the store's current stage configuration.
    pub(crate) async fn resolver(&self) -> Result<StageResolver, EngineError> {
        Ok(StageResolver::new(self.repo.configured_stage_ids().await?))
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
