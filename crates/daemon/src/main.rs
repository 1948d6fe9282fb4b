// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ustabotd: the conversational backend daemon.
//!
//! Wires the event router to a unix-socket intake and a logging outbound
//! channel. Every collaborator is constructed explicitly here; nothing in
//! the engine reaches for ambient globals.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;
mod listener;
mod log_channel;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::UnixListener;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ustabot_core::{Clock, SystemClock};
use ustabot_engine::Router;
use ustabot_storage::MemoryRepository;

use crate::config::{Config, ConfigError};
use crate::listener::Listener;
use crate::log_channel::LogChannel;

const INTAKE_QUEUE_DEPTH: usize = 256;
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
enum DaemonError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to prepare state dir {path}: {source}")]
    StateDir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to bind {path}: {source}")]
    Bind {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shutdown signal unavailable: {0}")]
    Signal(std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ustabotd: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), DaemonError> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        state_dir = %config.state_dir.display(),
        socket = %config.socket_path.display(),
        "starting"
    );

    let repo = Arc::new(MemoryRepository::with_stage_ids(config.stage_ids));
    let channel = Arc::new(LogChannel::new());
    let clock = SystemClock;
    let router = Arc::new(Router::new(repo, channel, clock.clone(), config.router.clone()));

    // Bind the intake socket. A stale file from a previous run is removed;
    // a live daemon would still hold the old inode.
    std::fs::create_dir_all(&config.state_dir)
        .map_err(|source| DaemonError::StateDir { path: config.state_dir.clone(), source })?;
    if config.socket_path.exists() {
        std::fs::remove_file(&config.socket_path)
            .map_err(|source| DaemonError::Bind { path: config.socket_path.clone(), source })?;
    }
    let unix = UnixListener::bind(&config.socket_path)
        .map_err(|source| DaemonError::Bind { path: config.socket_path.clone(), source })?;

    let (events_tx, mut events_rx) = mpsc::channel(INTAKE_QUEUE_DEPTH);
    let listener_task = tokio::spawn(Listener::new(unix, events_tx).run());

    let sweeper_task = {
        let router = Arc::clone(&router);
        let clock = clock.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(SESSION_SWEEP_INTERVAL);
            loop {
                tick.tick().await;
                let dropped = router.sessions().sweep(clock.epoch_ms());
                if dropped > 0 {
                    info!(dropped, "expired sessions swept");
                }
            }
        })
    };

    info!("ready");
    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.map_err(DaemonError::Signal)?;
                info!("shutdown signal received");
                break;
            }
            inbound = events_rx.recv() => match inbound {
                Some(inbound) => {
                    if let Err(e) = router.handle(inbound).await {
                        warn!(error = %e, "event dispatch failed");
                    }
                }
                None => break,
            },
        }
    }

    listener_task.abort();
    sweeper_task.abort();
    if let Err(e) = std::fs::remove_file(&config.socket_path) {
        warn!(error = %e, "socket cleanup failed");
    }
    info!("stopped");
    Ok(())
}
