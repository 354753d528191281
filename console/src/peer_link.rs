use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use tictactoe_game::Notice;

use crate::event_loop::Event;
use crate::log;

/// Line-based peer link: one peer at a time, each line `<topic> <payload>`.
/// Inbound lines on the move topic become events; notices go out on the
/// notice topic. Notices published with no peer connected are dropped.
pub async fn run_peer_link(
    listener: TcpListener,
    move_topic: String,
    notice_topic: String,
    events_tx: mpsc::Sender<Event>,
    mut notice_rx: mpsc::Receiver<Notice>,
) {
    loop {
        let (stream, peer_addr) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(connection) => connection,
                Err(e) => {
                    log!("Peer accept failed: {}", e);
                    continue;
                }
            },
            notice = notice_rx.recv() => match notice {
                Some(notice) => {
                    log!("No peer connected, dropping '{}' notice", notice.payload());
                    continue;
                }
                None => return,
            },
        };

        log!("Peer connected: {}", peer_addr);
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        match move_payload(&line, &move_topic) {
                            Some(payload) => {
                                if events_tx
                                    .send(Event::RemoteMove(payload.to_string()))
                                    .await
                                    .is_err()
                                {
                                    return;
                                }
                            }
                            None => {
                                if !line.trim().is_empty() {
                                    log!("Ignoring peer line off the move topic: {}", line);
                                }
                            }
                        }
                    }
                    Ok(None) => {
                        log!("Peer disconnected: {}", peer_addr);
                        break;
                    }
                    Err(e) => {
                        log!("Peer read error: {}", e);
                        break;
                    }
                },
                notice = notice_rx.recv() => match notice {
                    Some(notice) => {
                        let frame = format!("{} {}\n", notice_topic, notice.payload());
                        if let Err(e) = writer.write_all(frame.as_bytes()).await {
                            log!("Peer write failed: {}", e);
                            break;
                        }
                    }
                    None => return,
                },
            }
        }
    }
}

fn move_payload<'a>(line: &'a str, move_topic: &str) -> Option<&'a str> {
    let line = line.trim();
    let (topic, payload) = line.split_once(char::is_whitespace)?;
    if topic != move_topic {
        return None;
    }
    Some(payload.trim())
}
