// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use ustabot_core::{FlowState, UserId};

use crate::session_store::{SessionStore, DEFAULT_SESSION_TTL_MS};

const USER: UserId = UserId::new(1);

#[test]
fn start_get_clear_roundtrip() {
    let store = SessionStore::new(DEFAULT_SESSION_TTL_MS);
    assert!(store.get(USER, 0).is_none());

    store.start(USER, FlowState::RegPhone, 100);
    let session = store.get(USER, 200).unwrap();
    assert_eq!(session.state, FlowState::RegPhone);
    assert_eq!(session.touched_at_epoch_ms, 100);

    store.clear(USER);
    assert!(store.get(USER, 300).is_none());
}

#[test]
fn mutate_touches_the_session() {
    let store = SessionStore::new(DEFAULT_SESSION_TTL_MS);
    store.start(USER, FlowState::PartsPick, 100);
    store.mutate(USER, 5_000, |s| {
        s.state = FlowState::PartsQty;
        s.scratch.qty = Some(2.0);
    });

    let session = store.get(USER, 6_000).unwrap();
    assert_eq!(session.state, FlowState::PartsQty);
    assert_eq!(session.scratch.qty, Some(2.0));
    assert_eq!(session.touched_at_epoch_ms, 5_000);
}

#[test]
fn mutate_on_absent_session_is_a_noop() {
    let store = SessionStore::new(DEFAULT_SESSION_TTL_MS);
    store.mutate(USER, 100, |s| s.scratch.page = 3);
    assert!(store.get(USER, 200).is_none());
}

#[test]
fn sessions_expire_on_access() {
    let store = SessionStore::new(1_000);
    store.start(USER, FlowState::RegPhone, 0);

    assert!(store.get(USER, 999).is_some());
    assert!(store.get(USER, 1_000).is_none());
    // Expiry removed the record for good.
    assert!(store.is_empty());
}

#[test]
fn sweep_drops_only_expired_sessions() {
    let store = SessionStore::new(1_000);
    store.start(UserId::new(1), FlowState::RegPhone, 0);
    store.start(UserId::new(2), FlowState::RegPhone, 800);

    assert_eq!(store.sweep(1_200), 1);
    assert_eq!(store.len(), 1);
    assert!(store.get(UserId::new(2), 1_200).is_some());
}

#[test]
fn sweep_prunes_unheld_turn_locks() {
    let store = SessionStore::new(1_000);
    store.start(UserId::new(1), FlowState::RegPhone, 0);
    store.start(UserId::new(2), FlowState::RegPhone, 800);
    let expired_unheld = Arc::downgrade(&store.turn_lock(UserId::new(1)));
    let live_unheld = Arc::downgrade(&store.turn_lock(UserId::new(2)));
    let held = store.turn_lock(UserId::new(3));

    store.sweep(1_200);

    // Session expired and nothing holds the lock: entry dropped.
    assert!(expired_unheld.upgrade().is_none());
    // Live session keeps its lock, and a held handle keeps its entry.
    assert!(live_unheld.upgrade().is_some());
    assert!(Arc::ptr_eq(&store.turn_lock(UserId::new(3)), &held));
}

#[tokio::test]
async fn turn_lock_serializes_one_user() {
    let store = Arc::new(SessionStore::new(DEFAULT_SESSION_TTL_MS));
    let lock = store.turn_lock(USER);
    let guard = lock.lock().await;

    // Same user: second acquisition must wait.
    let second = store.turn_lock(USER);
    assert!(second.try_lock().is_err());

    // Different user proceeds independently.
    let other = store.turn_lock(UserId::new(2));
    assert!(other.try_lock().is_ok());

    drop(guard);
    assert!(second.try_lock().is_ok());
}
