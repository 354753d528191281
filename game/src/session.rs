use std::fmt;

use crate::board::{Board, Mark, PlaceError};
use crate::heuristic;
use crate::session_rng::SessionRng;
use crate::win_detector::{Outcome, evaluate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    HumanVsRemote,
    HumanVsHuman,
    AutoVsRemote,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveSource {
    Local,
    Remote,
    Agent,
}

impl Mode {
    pub fn from_menu_choice(choice: u32) -> Option<Mode> {
        match choice {
            1 => Some(Mode::HumanVsRemote),
            2 => Some(Mode::HumanVsHuman),
            3 => Some(Mode::AutoVsRemote),
            _ => None,
        }
    }

    pub fn source_for(&self, mark: Mark) -> MoveSource {
        match (self, mark) {
            (Mode::HumanVsRemote, Mark::O) | (Mode::AutoVsRemote, Mark::O) => MoveSource::Remote,
            (Mode::AutoVsRemote, _) => MoveSource::Agent,
            _ => MoveSource::Local,
        }
    }

    pub fn has_remote_peer(&self) -> bool {
        matches!(self, Mode::HumanVsRemote | Mode::AutoVsRemote)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    New,
    Next,
    Done,
    Taken,
}

impl Notice {
    pub fn payload(&self) -> &'static str {
        match self {
            Notice::New => "new",
            Notice::Next => "next",
            Notice::Done => "done",
            Notice::Taken => "taken",
        }
    }
}

/// Side effects requested by the state machine; the event loop performs them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Print(String),
    Publish(Notice),
    ScheduleMenuReturn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Menu,
    AwaitingMove(Mark),
    Terminal(Outcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveError {
    WrongTurn,
    NotAcceptingMoves,
    InvalidCell(PlaceError),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::WrongTurn => write!(f, "not this player's turn"),
            MoveError::NotAcceptingMoves => write!(f, "no game is accepting moves"),
            MoveError::InvalidCell(e) => write!(f, "{}", e),
        }
    }
}

impl From<PlaceError> for MoveError {
    fn from(e: PlaceError) -> Self {
        MoveError::InvalidCell(e)
    }
}

pub fn menu_text() -> String {
    concat!(
        "Select a mode:\n",
        "  1) Human vs remote peer\n",
        "  2) Two humans on this console\n",
        "  3) Auto player vs remote peer"
    )
    .to_string()
}

pub struct GameSession {
    board: Board,
    mode: Option<Mode>,
    phase: SessionPhase,
    rng: SessionRng,
}

impl GameSession {
    pub fn new(rng: SessionRng) -> Self {
        Self {
            board: Board::new(),
            mode: None,
            phase: SessionPhase::Menu,
            rng,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Starts a game. Rejected outside the menu, including during the
    /// terminal-to-menu delay.
    pub fn select_mode(&mut self, mode: Mode) -> Vec<Effect> {
        if self.phase != SessionPhase::Menu {
            return Vec::new();
        }

        self.board.reset();
        self.mode = Some(mode);
        self.phase = SessionPhase::AwaitingMove(Mark::X);

        let mut effects = Vec::new();
        if mode.has_remote_peer() {
            effects.push(Effect::Publish(Notice::New));
        }
        effects.push(Effect::Print(self.render_board()));

        match mode.source_for(Mark::X) {
            MoveSource::Agent => self.play_agent_turn(&mut effects),
            MoveSource::Local => effects.push(Effect::Print(turn_prompt(Mark::X))),
            MoveSource::Remote => effects.push(Effect::Print(waiting_line(Mark::X))),
        }
        effects
    }

    pub fn apply_move(
        &mut self,
        mark: Mark,
        row: usize,
        col: usize,
    ) -> Result<Vec<Effect>, MoveError> {
        let current = match self.phase {
            SessionPhase::AwaitingMove(m) => m,
            _ => return Err(MoveError::NotAcceptingMoves),
        };
        if mark != current {
            return Err(MoveError::WrongTurn);
        }

        self.board.place(row, col, mark)?;

        let mut effects = Vec::new();
        self.after_move(&mut effects);
        Ok(effects)
    }

    /// Sole exit from the terminal phase; driven by the menu-return timer.
    pub fn return_to_menu(&mut self) -> Vec<Effect> {
        if !matches!(self.phase, SessionPhase::Terminal(_)) {
            return Vec::new();
        }
        self.phase = SessionPhase::Menu;
        self.mode = None;
        self.board.reset();
        vec![Effect::Print(menu_text())]
    }

    fn after_move(&mut self, effects: &mut Vec<Effect>) {
        effects.push(Effect::Print(self.render_board()));

        let outcome = evaluate(&self.board);
        if outcome != Outcome::InProgress {
            self.phase = SessionPhase::Terminal(outcome);
            effects.push(Effect::Print(outcome_line(outcome)));
            if self.mode.is_some_and(|m| m.has_remote_peer()) {
                effects.push(Effect::Publish(Notice::Done));
            }
            effects.push(Effect::ScheduleMenuReturn);
            return;
        }

        let current = match self.phase {
            SessionPhase::AwaitingMove(m) => m,
            _ => return,
        };
        let next = if current == Mark::X { Mark::O } else { Mark::X };
        self.phase = SessionPhase::AwaitingMove(next);

        let Some(mode) = self.mode else {
            return;
        };
        match mode.source_for(next) {
            // Synchronous chaining, bounded by the nine board cells.
            MoveSource::Agent => self.play_agent_turn(effects),
            MoveSource::Remote => {
                effects.push(Effect::Publish(Notice::Next));
                effects.push(Effect::Print(waiting_line(next)));
            }
            MoveSource::Local => effects.push(Effect::Print(turn_prompt(next))),
        }
    }

    fn play_agent_turn(&mut self, effects: &mut Vec<Effect>) {
        let SessionPhase::AwaitingMove(mark) = self.phase else {
            return;
        };

        match heuristic::choose_move(&self.board, mark, &mut self.rng) {
            Some((row, col)) => {
                // The cell came from the empty-cell enumeration.
                if self.board.place(row, col, mark).is_ok() {
                    effects.push(Effect::Print(format!(
                        "Auto player {} moves to ({}, {})",
                        mark.as_char(),
                        row,
                        col
                    )));
                    self.after_move(effects);
                }
            }
            None => {
                debug_assert!(false, "agent invoked with no empty cells");
                effects.push(Effect::Print(
                    "Internal error: no move available for the auto player".to_string(),
                ));
            }
        }
    }

    fn render_board(&self) -> String {
        format!("\nCurrent board:\n\n{}", self.board.render())
    }
}

fn turn_prompt(mark: Mark) -> String {
    format!(
        "Player {}'s turn, enter row and column (0-2)",
        mark.as_char()
    )
}

fn waiting_line(mark: Mark) -> String {
    format!("Waiting for player {}'s move from the remote peer..", mark.as_char())
}

fn outcome_line(outcome: Outcome) -> String {
    match outcome {
        Outcome::XWon => "Player X wins!".to_string(),
        Outcome::OWon => "Player O wins!".to_string(),
        Outcome::Draw => "It's a draw!".to_string(),
        Outcome::InProgress => String::new(),
    }
}
