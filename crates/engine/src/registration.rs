// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registration flow: phone → region → districts → location → full name.
//!
//! The phone step doubles as sign-in: a known phone relinks the channel
//! identity and skips the rest. Region and district selection live on one
//! anchored inline message edited in place; district toggling is
//! multi-select with live checkmarks. The created contractor is always
//! pending and not enabled for work.

use tracing::debug;
use ustabot_adapters::{Channel, InlineButton, Keyboard, ReplyButton};
use ustabot_core::{
    normalize_phone, CallbackAction, ChatId, Clock, District, DistrictId, FlowState, GeoPoint,
    NewContractor, Region, RegionId, Session, UserId,
};
use ustabot_storage::Repository;

use crate::error::EngineError;
use crate::router::Router;
use crate::texts;

fn region_keyboard(regions: &[Region]) -> Keyboard {
    Keyboard::inline_column(
        regions
            .iter()
            .map(|r| InlineButton::new(&r.name, CallbackAction::RegRegion(r.id).encode()))
            .collect(),
    )
}

fn district_keyboard(districts: &[District], selected: &[DistrictId]) -> Keyboard {
    let buttons: Vec<InlineButton> = districts
        .iter()
        .map(|d| {
            let label = if selected.contains(&d.id) {
                format!("✅ {}", d.name)
            } else {
                d.name.clone()
            };
            InlineButton::new(label, CallbackAction::RegDistrict(d.id).encode())
        })
        .collect();
    let Keyboard::Inline { mut rows } = Keyboard::inline_grid(buttons, 2) else {
        return Keyboard::None;
    };
    rows.push(vec![InlineButton::new("✅ Confirm", CallbackAction::RegDistrictsOk.encode())]);
    rows.push(vec![InlineButton::new(texts::BTN_BACK, CallbackAction::RegBackToRegion.encode())]);
    Keyboard::Inline { rows }
}

fn location_keyboard() -> Keyboard {
    Keyboard::Reply {
        rows: vec![
            vec![ReplyButton::location(texts::BTN_SHARE_LOCATION)],
            vec![ReplyButton::text(texts::BTN_BACK)],
        ],
    }
}

impl<R: Repository, C: Channel, K: Clock> Router<R, C, K> {
    /// `/start` from an unknown user: open the phone step.
    pub(crate) async fn reg_start(
        &self,
        user: UserId,
        chat: ChatId,
        now: u64,
    ) -> Result<(), EngineError> {
        self.sessions.start(user, FlowState::RegPhone, now);
        let keyboard =
            Keyboard::Reply { rows: vec![vec![ReplyButton::contact(texts::BTN_SHARE_PHONE)]] };
        self.channel.send(chat, texts::ASK_PHONE, keyboard).await?;
        Ok(())
    }

    /// Phone received as a shared contact or typed text.
    pub(crate) async fn reg_on_phone(
        &self,
        user: UserId,
        chat: ChatId,
        raw: &str,
        now: u64,
    ) -> Result<(), EngineError> {
        let Some(phone) = normalize_phone(raw) else {
            self.channel.send(chat, texts::BAD_PHONE, Keyboard::None).await?;
            return Ok(());
        };

        // Known phone: this is a sign-in, not a registration.
        if let Some(existing) = self.repo.find_contractor_by_phone(&phone).await? {
            self.repo.link_contractor_channel(existing.id, user, chat).await?;
            self.sessions.clear(user);
            if existing.can_work() {
                self.channel
                    .send(chat, &texts::greeting(&existing.full_name), texts::main_menu_keyboard())
                    .await?;
            } else {
                self.channel.send(chat, texts::PENDING_ACTIVATION, Keyboard::Remove).await?;
            }
            return Ok(());
        }

        let regions = self.repo.list_regions().await?;
        if regions.is_empty() {
            self.sessions.clear(user);
            self.channel.send(chat, texts::NO_REGIONS, Keyboard::Remove).await?;
            return Ok(());
        }

        let anchor =
            self.channel.send(chat, texts::ASK_REGION, region_keyboard(&regions)).await?;
        self.sessions.mutate(user, now, |s| {
            s.state = FlowState::RegRegion;
            s.scratch.phone = Some(phone);
            s.scratch.anchor = Some(anchor);
        });
        Ok(())
    }

    pub(crate) async fn reg_on_region(
        &self,
        user: UserId,
        chat: ChatId,
        region: RegionId,
        now: u64,
    ) -> Result<(), EngineError> {
        let Some(session) = self.sessions.get(user, now) else { return Ok(()) };
        let regions = self.repo.list_regions().await?;
        let Some(picked) = regions.into_iter().find(|r| r.id == region) else {
            debug!(%user, %region, "unknown region pick dropped");
            return Ok(());
        };

        let districts = self.repo.list_districts(region).await?;
        if districts.is_empty() {
            // Nothing to cover here; the user picks another region.
            self.channel.send(chat, texts::NO_DISTRICTS, Keyboard::None).await?;
            return Ok(());
        }

        let anchor = self
            .edit_or_send(
                chat,
                session.scratch.anchor,
                &texts::districts_header(0),
                district_keyboard(&districts, &[]),
            )
            .await?;
        self.sessions.mutate(user, now, |s| {
            s.state = FlowState::RegDistricts;
            s.scratch.region_id = Some(region);
            s.scratch.region_name = Some(picked.name);
            s.scratch.district_ids.clear();
            s.scratch.district_names.clear();
            s.scratch.anchor = Some(anchor);
        });
        Ok(())
    }

    /// Toggle one district; the anchored message reflects the selection.
    pub(crate) async fn reg_on_district_toggle(
        &self,
        user: UserId,
        chat: ChatId,
        mut session: Session,
        district: DistrictId,
        now: u64,
    ) -> Result<(), EngineError> {
        let Some(region) = session.scratch.region_id else {
            return self.reg_abort(user, chat).await;
        };
        let districts = self.repo.list_districts(region).await?;
        let Some(picked) = districts.iter().find(|d| d.id == district) else {
            debug!(%user, %district, "unknown district toggle dropped");
            return Ok(());
        };

        session.scratch.toggle_district(district, &picked.name);
        let header = texts::districts_header(session.scratch.district_ids.len());
        let keyboard = district_keyboard(&districts, &session.scratch.district_ids);
        let anchor = self.edit_or_send(chat, session.scratch.anchor, &header, keyboard).await?;

        session.scratch.anchor = Some(anchor);
        session.touched_at_epoch_ms = now;
        self.sessions.set(user, session);
        Ok(())
    }

    pub(crate) async fn reg_on_districts_confirm(
        &self,
        user: UserId,
        chat: ChatId,
        session: Session,
        now: u64,
    ) -> Result<(), EngineError> {
        if session.scratch.district_ids.is_empty() {
            self.channel.send(chat, texts::NEED_DISTRICT, Keyboard::None).await?;
            return Ok(());
        }
        self.sessions.mutate(user, now, |s| s.state = FlowState::RegLocation);
        self.channel.send(chat, texts::ASK_LOCATION, location_keyboard()).await?;
        Ok(())
    }

    pub(crate) async fn reg_back_to_regions(
        &self,
        user: UserId,
        chat: ChatId,
        now: u64,
    ) -> Result<(), EngineError> {
        let Some(session) = self.sessions.get(user, now) else { return Ok(()) };
        let regions = self.repo.list_regions().await?;
        if regions.is_empty() {
            self.sessions.clear(user);
            self.channel.send(chat, texts::NO_REGIONS, Keyboard::Remove).await?;
            return Ok(());
        }
        let anchor = self
            .edit_or_send(chat, session.scratch.anchor, texts::ASK_REGION, region_keyboard(&regions))
            .await?;
        self.sessions.mutate(user, now, |s| {
            s.state = FlowState::RegRegion;
            s.scratch.region_id = None;
            s.scratch.region_name = None;
            s.scratch.district_ids.clear();
            s.scratch.district_names.clear();
            s.scratch.anchor = Some(anchor);
        });
        Ok(())
    }

    /// "Back" text on the location step returns to district selection.
    pub(crate) async fn reg_back_to_districts(
        &self,
        user: UserId,
        chat: ChatId,
        session: &Session,
        now: u64,
    ) -> Result<(), EngineError> {
        let Some(region) = session.scratch.region_id else {
            return self.reg_abort(user, chat).await;
        };
        let districts = self.repo.list_districts(region).await?;
        let header = texts::districts_header(session.scratch.district_ids.len());
        let keyboard = district_keyboard(&districts, &session.scratch.district_ids);
        // The reply keyboard is gone; anchor a fresh inline message.
        let anchor = self.channel.send(chat, &header, keyboard).await?;
        self.sessions.mutate(user, now, |s| {
            s.state = FlowState::RegDistricts;
            s.scratch.anchor = Some(anchor);
        });
        Ok(())
    }

    pub(crate) async fn reg_on_location(
        &self,
        user: UserId,
        chat: ChatId,
        lat: f64,
        lng: f64,
        now: u64,
    ) -> Result<(), EngineError> {
        self.sessions.mutate(user, now, |s| {
            s.state = FlowState::RegFullName;
            s.scratch.geo_lat = Some(lat);
            s.scratch.geo_lng = Some(lng);
        });
        self.channel.send(chat, texts::ASK_FULL_NAME, Keyboard::Remove).await?;
        Ok(())
    }

    pub(crate) async fn reg_on_full_name(
        &self,
        user: UserId,
        chat: ChatId,
        session: &Session,
        text: &str,
        _now: u64,
    ) -> Result<(), EngineError> {
        let name = text.trim();
        if name.chars().count() < 3 {
            self.channel.send(chat, texts::SHORT_NAME, Keyboard::None).await?;
            return Ok(());
        }

        let scratch = &session.scratch;
        let (Some(phone), Some(region_id), Some(region_name)) =
            (scratch.phone.clone(), scratch.region_id, scratch.region_name.clone())
        else {
            return self.reg_abort(user, chat).await;
        };
        if scratch.district_ids.is_empty() {
            return self.reg_abort(user, chat).await;
        }

        let geo = match (scratch.geo_lat, scratch.geo_lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        };
        self.repo
            .create_contractor(NewContractor {
                full_name: name.to_string(),
                phone,
                user_id: user,
                chat_id: chat,
                region_id,
                district_ids: scratch.district_ids.clone(),
                geo,
            })
            .await?;

        let summary = texts::registered(name, &region_name, &scratch.district_names);
        self.sessions.clear(user);
        self.channel.send(chat, &summary, Keyboard::Remove).await?;
        Ok(())
    }

    /// Invariant breach mid-registration: unwind to idle with a notice.
    async fn reg_abort(&self, user: UserId, chat: ChatId) -> Result<(), EngineError> {
        debug!(%user, "registration scratch incomplete, aborting");
        self.sessions.clear(user);
        self.channel.send(chat, texts::REGISTRATION_BROKEN, Keyboard::Remove).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
