mod board;
mod heuristic;
mod router;
mod session;
mod session_rng;
mod win_detector;

pub use board::{BOARD_SIZE, Board, Mark, PlaceError};
pub use heuristic::choose_move;
pub use router::InputRouter;
pub use session::{
    Effect, GameSession, Mode, MoveError, MoveSource, Notice, SessionPhase, menu_text,
};
pub use session_rng::SessionRng;
pub use win_detector::{Outcome, evaluate};
