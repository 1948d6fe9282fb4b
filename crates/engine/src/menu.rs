// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Idle-state main menu: active jobs, balance, history, settings.

use tracing::debug;
use ustabot_adapters::{Channel, InlineButton, Keyboard};
use ustabot_core::{format_money_signed, CallbackAction, ChatId, Clock, Contractor, UserId};
use ustabot_storage::Repository;

use crate::error::EngineError;
use crate::export::history_rows;
use crate::router::Router;
use crate::texts;

const BALANCE_INVENTORY_LINES: usize = 10;

impl<R: Repository, C: Channel, K: Clock> Router<R, C, K> {
    pub(crate) async fn on_menu_text(
        &self,
        user: UserId,
        chat: ChatId,
        contractor: &Contractor,
        text: &str,
    ) -> Result<(), EngineError> {
        match text.trim() {
            texts::MENU_ACTIVE_JOBS => self.menu_active_jobs(chat, contractor).await,
            texts::MENU_BALANCE => self.menu_balance(chat, contractor).await,
            texts::MENU_HISTORY => self.menu_history(chat).await,
            texts::MENU_SETTINGS => self.menu_settings(chat).await,
            other => {
                debug!(%user, text = %other, "idle text dropped");
                Ok(())
            }
        }
    }

    /// One fresh card per open job, newest first, binding persisted.
    async fn menu_active_jobs(
        &self,
        chat: ChatId,
        contractor: &Contractor,
    ) -> Result<(), EngineError> {
        let jobs = self.repo.list_open_jobs(contractor.id, self.config.open_jobs_limit).await?;
        if jobs.is_empty() {
            self.channel.send(chat, texts::NO_OPEN_JOBS, Keyboard::None).await?;
            return Ok(());
        }
        for job in &jobs {
            self.send_card(chat, job).await?;
        }
        Ok(())
    }

    async fn menu_balance(&self, chat: ChatId, contractor: &Contractor) -> Result<(), EngineError> {
        let total = self.repo.balance_total(contractor.id).await?;
        let inventory = self.repo.list_inventory(contractor.id, false).await?;

        let mut lines = vec![format!("💰 Balance: {}", format_money_signed(total))];
        if !inventory.is_empty() {
            lines.push(String::new());
            lines.push("🔩 Inventory:".to_string());
            for line in inventory.iter().take(BALANCE_INVENTORY_LINES) {
                lines.push(format!("• {}", line.label()));
            }
        }
        self.channel.send(chat, &lines.join("\n"), Keyboard::None).await?;
        Ok(())
    }

    async fn menu_history(&self, chat: ChatId) -> Result<(), EngineError> {
        let keyboard = Keyboard::Inline {
            rows: vec![vec![InlineButton::new(
                "⬇️ Export",
                CallbackAction::HistoryExport.encode(),
            )]],
        };
        self.channel.send(chat, "📜 Your job history:", keyboard).await?;
        Ok(())
    }

    async fn menu_settings(&self, chat: ChatId) -> Result<(), EngineError> {
        let keyboard = Keyboard::Inline {
            rows: vec![
                vec![InlineButton::new("🌐 Language", CallbackAction::SetLanguage.encode())],
                vec![InlineButton::new("🚪 Logout", CallbackAction::Logout.encode())],
            ],
        };
        self.channel.send(chat, "⚙️ Settings:", keyboard).await?;
        Ok(())
    }

    pub(crate) async fn on_history_export(
        &self,
        chat: ChatId,
        contractor: &Contractor,
    ) -> Result<(), EngineError> {
        let rows =
            history_rows(self.repo.as_ref(), contractor.id, self.config.history_limit).await?;
        let notice = format!("📦 Export ready: {} jobs.", rows.len());
        self.channel.send(chat, &notice, Keyboard::None).await?;
        Ok(())
    }

    pub(crate) async fn on_logout(
        &self,
        user: UserId,
        chat: ChatId,
        contractor: &Contractor,
    ) -> Result<(), EngineError> {
        self.repo.unlink_contractor_channel(contractor.id).await?;
        self.sessions.clear(user);
        self.channel.send(chat, texts::LOGGED_OUT, Keyboard::Remove).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "menu_tests.rs"]
mod tests;
