//! The player-facing side of a match.

use std::sync::mpsc::{Receiver, SyncSender};

use arbiter_core::{Board, Color, Move};

/// A nudge from the referee that it is this player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    /// The opponent's already-validated move; absent on the game's first turn.
    pub opponent_move: Option<Move>,
}

/// One side's connection to a running game.
///
/// The player owns a private copy of the board and keeps it current by
/// replaying the opponent's move from each prompt with
/// [`Board::apply_unchecked`] — the referee has already validated it. Both
/// channels hold a single slot; there is never more than one prompt or one
/// submitted move in flight.
pub struct Seat {
    pub color: Color,
    pub board: Board,
    pub prompts: Receiver<Prompt>,
    pub moves: SyncSender<Move>,
}

/// A chess player.
///
/// `run` is called once, on a dedicated thread: wait for prompts on the seat,
/// pick a move, submit it, repeat. Either channel failing means the game is
/// over and `run` should return.
pub trait Player: Send {
    fn run(&mut self, seat: Seat);
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn run(&mut self, seat: Seat) {
        (**self).run(seat);
    }
}
