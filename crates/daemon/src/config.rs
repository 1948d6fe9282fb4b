// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration.
//!
//! Read from `ustabot.toml` in the state directory; every field is optional
//! and falls back to a default. `USTABOT_*` environment variables override
//! the file for the paths and the log filter.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use ustabot_core::{StageId, StageIds};
use ustabot_engine::RouterConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no state directory: set USTABOT_STATE_DIR or HOME")]
    NoStateDir,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// On-disk shape of `ustabot.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    log_filter: Option<String>,
    socket_path: Option<PathBuf>,
    page_size: Option<usize>,
    session_ttl_minutes: Option<u64>,
    open_jobs_limit: Option<usize>,
    history_limit: Option<usize>,
    #[serde(default)]
    stages: FileStages,
}

/// Configured stage ids in the backing store; unset means name matching.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileStages {
    waiting: Option<u64>,
    progress: Option<u64>,
    done: Option<u64>,
}

/// Fully resolved daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub state_dir: PathBuf,
    pub socket_path: PathBuf,
    /// `tracing_subscriber` env-filter directive string.
    pub log_filter: String,
    pub router: RouterConfig,
    pub stage_ids: StageIds,
}

impl Config {
    /// Resolve the state directory, read `ustabot.toml` when present, and
    /// apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let state_dir = state_dir()?;
        let path = state_dir.join("ustabot.toml");
        let file = match std::fs::read_to_string(&path) {
            Ok(raw) => {
                toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        Ok(Self::resolve(state_dir, file))
    }

    fn resolve(state_dir: PathBuf, file: FileConfig) -> Self {
        let mut router = RouterConfig::default();
        if let Some(n) = file.page_size {
            router.page_size = n.max(1);
        }
        if let Some(minutes) = file.session_ttl_minutes {
            router.session_ttl_ms = minutes * 60 * 1000;
        }
        if let Some(n) = file.open_jobs_limit {
            router.open_jobs_limit = n;
        }
        if let Some(n) = file.history_limit {
            router.history_limit = n;
        }

        let log_filter = env_var("USTABOT_LOG")
            .or(file.log_filter)
            .unwrap_or_else(|| "info".to_string());

        let socket_path = env_var("USTABOT_SOCKET")
            .map(PathBuf::from)
            .or(file.socket_path)
            .unwrap_or_else(|| state_dir.join("ustabot.sock"));

        let stage_ids = StageIds {
            waiting: file.stages.waiting.map(StageId::new),
            progress: file.stages.progress.map(StageId::new),
            done: file.stages.done.map(StageId::new),
        };

        Self { state_dir, socket_path, log_filter, router, stage_ids }
    }
}

/// Resolve state directory: USTABOT_STATE_DIR > XDG_STATE_HOME/ustabot >
/// ~/.local/state/ustabot.
fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = env_var("USTABOT_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = env_var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("ustabot"));
    }
    match env_var("HOME") {
        Some(home) => Ok(PathBuf::from(home).join(".local/state/ustabot")),
        None => Err(ConfigError::NoStateDir),
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
