use std::time::Duration;
use tokio::sync::mpsc;

use tictactoe_game::{Effect, InputRouter, Notice};

use crate::log;

#[derive(Debug)]
pub enum Event {
    LocalLine(String),
    RemoteMove(String),
    MenuTimeout(u64),
}

/// Single consumer of the event queue; the only task that touches the
/// session. Producers (stdin, peer link, timers) just send `Event`s.
pub struct EventLoop {
    router: InputRouter,
    events_rx: mpsc::Receiver<Event>,
    events_tx: mpsc::Sender<Event>,
    notice_tx: mpsc::Sender<Notice>,
    menu_return_delay: Duration,
    timer_generation: u64,
}

impl EventLoop {
    pub fn new(
        router: InputRouter,
        events_rx: mpsc::Receiver<Event>,
        events_tx: mpsc::Sender<Event>,
        notice_tx: mpsc::Sender<Notice>,
        menu_return_delay: Duration,
    ) -> Self {
        Self {
            router,
            events_rx,
            events_tx,
            notice_tx,
            menu_return_delay,
            timer_generation: 0,
        }
    }

    pub async fn run(mut self) {
        self.perform(self.router.startup_effects()).await;

        while let Some(event) = self.events_rx.recv().await {
            let effects = self.handle_event(event);
            self.perform(effects).await;
        }
    }

    fn handle_event(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::LocalLine(line) => self.router.handle_local_line(&line),
            Event::RemoteMove(payload) => {
                log!("Peer move message: {}", payload);
                self.router.handle_remote_payload(&payload)
            }
            Event::MenuTimeout(generation) => {
                // Stale timers from an earlier game are ignored.
                if generation == self.timer_generation {
                    self.router.handle_menu_timeout()
                } else {
                    Vec::new()
                }
            }
        }
    }

    async fn perform(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Print(text) => println!("{}", text),
                Effect::Publish(notice) => {
                    if self.notice_tx.send(notice).await.is_err() {
                        log!("Peer link gone, dropping '{}' notice", notice.payload());
                    }
                }
                Effect::ScheduleMenuReturn => self.schedule_menu_return(),
            }
        }
    }

    fn schedule_menu_return(&mut self) {
        self.timer_generation += 1;
        let generation = self.timer_generation;
        let delay = self.menu_return_delay;
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events_tx.send(Event::MenuTimeout(generation)).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_game::{GameSession, SessionPhase, SessionRng};

    fn event_loop(delay_ms: u64) -> (EventLoop, mpsc::Sender<Event>, mpsc::Receiver<Notice>) {
        let (events_tx, events_rx) = mpsc::channel(16);
        let (notice_tx, notice_rx) = mpsc::channel(16);
        let router = InputRouter::new(GameSession::new(SessionRng::new(5)));
        let event_loop = EventLoop::new(
            router,
            events_rx,
            events_tx.clone(),
            notice_tx,
            Duration::from_millis(delay_ms),
        );
        (event_loop, events_tx, notice_rx)
    }

    #[tokio::test]
    async fn test_win_schedules_menu_return_and_notifies_peer() {
        let (event_loop, events_tx, mut notice_rx) = event_loop(10);

        let script = [
            Event::LocalLine("1".to_string()),
            Event::LocalLine("0 0".to_string()),
            Event::RemoteMove("O,1,1".to_string()),
            Event::LocalLine("0 1".to_string()),
            Event::RemoteMove("O,2,2".to_string()),
            Event::LocalLine("0 2".to_string()),
        ];
        for event in script {
            events_tx.send(event).await.unwrap();
        }

        // The loop runs until the process exits; give it time to drain the
        // queue (including the short menu-return timer), then stop it.
        let handle = tokio::spawn(event_loop.run());
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        let mut notices = Vec::new();
        while let Ok(notice) = notice_rx.try_recv() {
            notices.push(notice);
        }
        assert_eq!(
            notices,
            vec![Notice::New, Notice::Next, Notice::Next, Notice::Done]
        );
    }

    #[tokio::test]
    async fn test_stale_menu_timeout_is_ignored() {
        let (mut event_loop, _events_tx, _notice_rx) = event_loop(10);

        // Play a game to terminal; this schedules the generation-1 timer.
        for line in ["2", "0 0", "1 1", "0 1", "2 2", "0 2"] {
            let effects = event_loop.handle_event(Event::LocalLine(line.to_string()));
            event_loop.perform(effects).await;
        }
        assert_eq!(event_loop.timer_generation, 1);

        // A timeout from an older generation must not touch the session.
        let effects = event_loop.handle_event(Event::MenuTimeout(0));
        assert!(effects.is_empty());
        assert!(matches!(
            event_loop.router.session().phase(),
            SessionPhase::Terminal(_)
        ));

        // The current generation performs the return to the menu.
        let effects = event_loop.handle_event(Event::MenuTimeout(1));
        assert!(!effects.is_empty());
        assert_eq!(event_loop.router.session().phase(), SessionPhase::Menu);
    }
}
