use crate::board::Mark;
use crate::session::{
    Effect, GameSession, Mode, MoveError, MoveSource, Notice, SessionPhase, menu_text,
};

/// Gates the two inbound event streams by mode and turn, parses their
/// textual payloads, and feeds eligible moves to the session. Ineligible
/// or malformed input is discarded, never queued.
pub struct InputRouter {
    session: GameSession,
}

impl InputRouter {
    pub fn new(session: GameSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn startup_effects(&self) -> Vec<Effect> {
        vec![
            Effect::Print("Tic-Tac-Toe (Text UI)".to_string()),
            Effect::Print(menu_text()),
        ]
    }

    pub fn handle_local_line(&mut self, line: &str) -> Vec<Effect> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        match self.session.phase() {
            SessionPhase::Menu => match line.parse::<u32>().ok().and_then(Mode::from_menu_choice) {
                Some(mode) => self.session.select_mode(mode),
                None => vec![Effect::Print("Enter 1, 2 or 3 to pick a mode.".to_string())],
            },
            SessionPhase::AwaitingMove(mark) => self.handle_local_move(mark, line),
            SessionPhase::Terminal(_) => Vec::new(),
        }
    }

    fn handle_local_move(&mut self, mark: Mark, line: &str) -> Vec<Effect> {
        let Some(mode) = self.session.mode() else {
            return Vec::new();
        };
        if mode.source_for(mark) != MoveSource::Local {
            return Vec::new();
        }

        let Some((row, col)) = parse_move_line(line) else {
            return vec![Effect::Print(
                "Invalid input, enter two numbers.".to_string(),
            )];
        };

        match self.session.apply_move(mark, row, col) {
            Ok(effects) => effects,
            Err(MoveError::InvalidCell(_)) => {
                vec![Effect::Print("Invalid move, try again.".to_string())]
            }
            // WrongTurn/NotAcceptingMoves cannot surface here: the mark and
            // phase were just read from the session.
            Err(_) => Vec::new(),
        }
    }

    pub fn handle_remote_payload(&mut self, payload: &str) -> Vec<Effect> {
        let Some((mark, row, col)) = parse_move_record(payload) else {
            return Vec::new();
        };

        let SessionPhase::AwaitingMove(current) = self.session.phase() else {
            return Vec::new();
        };
        let Some(mode) = self.session.mode() else {
            return Vec::new();
        };
        if mode.source_for(current) != MoveSource::Remote || mark != current {
            return Vec::new();
        }

        match self.session.apply_move(mark, row, col) {
            Ok(effects) => effects,
            Err(MoveError::InvalidCell(_)) => vec![Effect::Publish(Notice::Taken)],
            Err(_) => Vec::new(),
        }
    }

    pub fn handle_menu_timeout(&mut self) -> Vec<Effect> {
        self.session.return_to_menu()
    }
}

fn parse_move_line(line: &str) -> Option<(usize, usize)> {
    let mut fields = line.split_whitespace();
    let row = fields.next()?.parse::<usize>().ok()?;
    let col = fields.next()?.parse::<usize>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((row, col))
}

/// Remote move record: `<mark-char>,<row>,<col>`, e.g. `O,1,2`.
fn parse_move_record(payload: &str) -> Option<(Mark, usize, usize)> {
    let mut fields = payload.trim().split(',');
    let mark_field = fields.next()?.trim();
    let row_field = fields.next()?.trim();
    let col_field = fields.next()?.trim();
    if fields.next().is_some() {
        return None;
    }

    let mut chars = mark_field.chars();
    let mark = Mark::from_char(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }

    let row = row_field.parse::<usize>().ok()?;
    let col = col_field.parse::<usize>().ok()?;
    Some((mark, row, col))
}
