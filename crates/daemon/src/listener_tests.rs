// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use tokio::io::AsyncWriteExt;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use ustabot_core::{ChannelEvent, ChatId, Inbound, UserId};

use super::{read_events, Listener};

fn inbound(user: i64, text: &str) -> Inbound {
    Inbound {
        user: UserId::new(user),
        chat: ChatId::new(user),
        event: ChannelEvent::Text { text: text.to_string() },
    }
}

#[tokio::test]
async fn read_events_forwards_each_json_line() {
    let (mut writer, reader) = tokio::io::duplex(1024);
    let (tx, mut rx) = mpsc::channel(8);
    let task = tokio::spawn(read_events(reader, tx));

    let first = serde_json::to_string(&inbound(1, "hello")).unwrap();
    let second = serde_json::to_string(&inbound(2, "world")).unwrap();
    writer.write_all(format!("{first}\n{second}\n").as_bytes()).await.unwrap();
    drop(writer);

    assert_eq!(rx.recv().await.unwrap(), inbound(1, "hello"));
    assert_eq!(rx.recv().await.unwrap(), inbound(2, "world"));
    assert!(rx.recv().await.is_none());
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn malformed_and_blank_lines_are_skipped() {
    let (mut writer, reader) = tokio::io::duplex(1024);
    let (tx, mut rx) = mpsc::channel(8);
    let task = tokio::spawn(read_events(reader, tx));

    let good = serde_json::to_string(&inbound(3, "ok")).unwrap();
    writer.write_all(format!("not json\n\n{{\"user\":1}}\n{good}\n").as_bytes()).await.unwrap();
    drop(writer);

    assert_eq!(rx.recv().await.unwrap(), inbound(3, "ok"));
    assert!(rx.recv().await.is_none());
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn reading_stops_when_the_dispatch_side_hangs_up() {
    let (mut writer, reader) = tokio::io::duplex(1024);
    let (tx, rx) = mpsc::channel(1);
    drop(rx);
    let task = tokio::spawn(read_events(reader, tx));

    let line = serde_json::to_string(&inbound(1, "dropped")).unwrap();
    writer.write_all(format!("{line}\n").as_bytes()).await.unwrap();
    drop(writer);

    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn accepts_unix_socket_connections() {
    let dir = tempfile::tempdir().unwrap();
    let socket_path = dir.path().join("ustabot.sock");
    let unix = UnixListener::bind(&socket_path).unwrap();
    let (tx, mut rx) = mpsc::channel(8);
    let listener = Listener::new(unix, tx);
    let task = tokio::spawn(listener.run());

    let mut stream = UnixStream::connect(&socket_path).await.unwrap();
    let line = serde_json::to_string(&inbound(7, "over the socket")).unwrap();
    stream.write_all(format!("{line}\n").as_bytes()).await.unwrap();
    stream.shutdown().await.unwrap();

    assert_eq!(rx.recv().await.unwrap(), inbound(7, "over the socket"));
    task.abort();
}
