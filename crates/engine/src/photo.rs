// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Photo collection flow: attach uploads to the job until "Done".

use ustabot_adapters::{Channel, Keyboard, ReplyButton};
use ustabot_core::{ChatId, Clock, FlowState, JobId, Session, UserId};
use ustabot_storage::{PhotoRef, Repository};

use crate::error::EngineError;
use crate::router::Router;
use crate::texts;

fn photo_keyboard() -> Keyboard {
    Keyboard::Reply {
        rows: vec![vec![ReplyButton::text(texts::BTN_DONE), ReplyButton::text(texts::BTN_BACK)]],
    }
}

impl<R: Repository, C: Channel, K: Clock> Router<R, C, K> {
    pub(crate) async fn open_photo(
        &self,
        user: UserId,
        chat: ChatId,
        job: JobId,
        now: u64,
    ) -> Result<(), EngineError> {
        let mut session = Session::new(FlowState::Photo, now);
        session.scratch.job = Some(job);
        self.sessions.set(user, session);
        self.channel.send(chat, texts::PHOTO_PROMPT, photo_keyboard()).await?;
        Ok(())
    }

    pub(crate) async fn photo_on_upload(
        &self,
        user: UserId,
        chat: ChatId,
        session: &Session,
        file_ref: &str,
    ) -> Result<(), EngineError> {
        let Some(job) = session.scratch.job else {
            return self.flow_abort(user, chat).await;
        };
        self.repo.attach_photo(job, PhotoRef(file_ref.to_string())).await?;
        let job = self.repo.find_job(job).await?;
        self.refresh_dashboard(chat, &job).await?;
        self.channel.send(chat, texts::PHOTO_SAVED, Keyboard::None).await?;
        Ok(())
    }

    /// "Done" or "Back" ends the collection; anything else is ignored.
    pub(crate) async fn photo_on_text(
        &self,
        user: UserId,
        chat: ChatId,
        text: &str,
    ) -> Result<(), EngineError> {
        if texts::is_done_text(text) || texts::is_back_text(text) {
            self.sessions.clear(user);
            self.channel.send(chat, texts::BTN_DONE, Keyboard::Remove).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "photo_tests.rs"]
mod tests;
