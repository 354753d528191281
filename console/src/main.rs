mod config;
mod event_loop;
mod local_input;
mod logger;
mod peer_link;

use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use tictactoe_game::{GameSession, InputRouter, SessionRng};

use crate::event_loop::EventLoop;

#[derive(Parser)]
#[command(name = "tictactoe_console")]
struct Args {
    #[arg(long, default_value = "tictactoe_console_config.yaml")]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Console".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = config::load_config(&args.config)?;

    let listener = TcpListener::bind(&config.listen_address).await?;
    crate::log!("Peer link listening on {}", config.listen_address);

    let (events_tx, events_rx) = mpsc::channel(128);
    let (notice_tx, notice_rx) = mpsc::channel(32);

    tokio::spawn(local_input::run_local_input(events_tx.clone()));
    tokio::spawn(peer_link::run_peer_link(
        listener,
        config.move_topic.clone(),
        config.notice_topic.clone(),
        events_tx.clone(),
        notice_rx,
    ));

    let session = GameSession::new(SessionRng::from_random());
    let event_loop = EventLoop::new(
        InputRouter::new(session),
        events_rx,
        events_tx,
        notice_tx,
        Duration::from_millis(config.menu_return_delay_ms),
    );
    event_loop.run().await;

    Ok(())
}
