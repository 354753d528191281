use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::event_loop::Event;
use crate::log;

/// Reads stdin lines and enqueues them; never touches game state itself.
pub async fn run_local_input(events_tx: mpsc::Sender<Event>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim().to_string();
                if events_tx.send(Event::LocalLine(line)).await.is_err() {
                    return;
                }
            }
            Ok(None) => {
                log!("Local input closed");
                return;
            }
            Err(e) => {
                log!("Local input read error: {}", e);
                return;
            }
        }
    }
}
