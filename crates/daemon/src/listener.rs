// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Intake listener for the inbound event socket.
//!
//! Each connection carries JSON-lines of [`Inbound`]; lines are forwarded to
//! the dispatch loop in arrival order. A malformed line is logged and
//! skipped so one bad producer cannot wedge the socket.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::UnixListener;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};
use ustabot_core::Inbound;

pub struct Listener {
    unix: UnixListener,
    events: mpsc::Sender<Inbound>,
}

impl Listener {
    pub fn new(unix: UnixListener, events: mpsc::Sender<Inbound>) -> Self {
        Self { unix, events }
    }

    /// Accept loop; runs until the task is dropped.
    pub async fn run(self) {
        loop {
            match self.unix.accept().await {
                Ok((stream, _)) => {
                    let events = self.events.clone();
                    tokio::spawn(async move {
                        if let Err(e) = read_events(stream, events).await {
                            debug!(error = %e, "intake connection closed with error");
                        }
                    });
                }
                Err(e) => error!(error = %e, "intake accept failed"),
            }
        }
    }
}

/// Read JSON-lines of [`Inbound`] from `stream` until EOF or the dispatch
/// side hangs up.
async fn read_events<S: AsyncRead + Unpin>(
    stream: S,
    events: mpsc::Sender<Inbound>,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(stream).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Inbound>(line) {
            Ok(inbound) => {
                if events.send(inbound).await.is_err() {
                    // Dispatch loop is gone; stop reading.
                    break;
                }
            }
            Err(e) => warn!(error = %e, "malformed intake line skipped"),
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
