// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory session store with per-user turn locks.
//!
//! Sessions are ephemeral flow state keyed by [`UserId`]. Each user also gets
//! a turn lock: the router holds it for the whole turn, so one user's events
//! are processed strictly in arrival order while distinct users proceed
//! concurrently. Idle sessions expire after a TTL, checked on access and by
//! the periodic [`SessionStore::sweep`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use ustabot_core::{FlowState, Session, UserId};

pub const DEFAULT_SESSION_TTL_MS: u64 = 30 * 60 * 1000;

#[derive(Default)]
struct Inner {
    sessions: HashMap<UserId, Session>,
    turn_locks: HashMap<UserId, Arc<tokio::sync::Mutex<()>>>,
}

#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<Inner>,
    ttl_ms: u64,
}

impl SessionStore {
    pub fn new(ttl_ms: u64) -> Self {
        Self { inner: Mutex::default(), ttl_ms }
    }

    /// The user's turn lock, created on first use.
    ///
    /// Returned as an owned handle so the guard can be held across awaits.
    pub fn turn_lock(&self, user: UserId) -> Arc<tokio::sync::Mutex<()>> {
        let mut inner = self.inner.lock();
        Arc::clone(inner.turn_locks.entry(user).or_default())
    }

    /// The user's live session, dropping it first if it has expired.
    pub fn get(&self, user: UserId, now_epoch_ms: u64) -> Option<Session> {
        let mut inner = self.inner.lock();
        if let Some(session) = inner.sessions.get(&user) {
            if self.expired(session, now_epoch_ms) {
                debug!(%user, state = %session.state, "session expired");
                inner.sessions.remove(&user);
                return None;
            }
        }
        inner.sessions.get(&user).cloned()
    }

    pub fn set(&self, user: UserId, session: Session) {
        self.inner.lock().sessions.insert(user, session);
    }

    /// Start a fresh session in `state`, discarding any previous scratch.
    pub fn start(&self, user: UserId, state: FlowState, now_epoch_ms: u64) -> Session {
        let session = Session::new(state, now_epoch_ms);
        self.set(user, session.clone());
        session
    }

    /// Mutate the user's session in place; no-op when absent.
    pub fn mutate(&self, user: UserId, now_epoch_ms: u64, f: impl FnOnce(&mut Session)) {
        let mut inner = self.inner.lock();
        if let Some(session) = inner.sessions.get_mut(&user) {
            f(session);
            session.touched_at_epoch_ms = now_epoch_ms;
        }
    }

    pub fn clear(&self, user: UserId) {
        self.inner.lock().sessions.remove(&user);
    }

    /// Drop every expired session. Returns how many were dropped.
    ///
    /// Also prunes turn locks nobody holds, so the lock map does not grow
    /// with every user ever seen.
    pub fn sweep(&self, now_epoch_ms: u64) -> usize {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let before = inner.sessions.len();
        let ttl_ms = self.ttl_ms;
        inner
            .sessions
            .retain(|_, s| now_epoch_ms.saturating_sub(s.touched_at_epoch_ms) < ttl_ms);
        let live = &inner.sessions;
        inner
            .turn_locks
            .retain(|user, lock| Arc::strong_count(lock) > 1 || live.contains_key(user));
        before - live.len()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().sessions.is_empty()
    }

    fn expired(&self, session: &Session, now_epoch_ms: u64) -> bool {
        now_epoch_ms.saturating_sub(session.touched_at_epoch_ms) >= self.ttl_ms
    }
}

#[cfg(test)]
#[path = "session_store_tests.rs"]
mod tests;
