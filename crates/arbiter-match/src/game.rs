//! The referee: turn loop, clocks, and adjudication.

use std::fmt;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use arbiter_core::{Board, Color, Move};

use crate::player::{Player, Prompt, Seat};
use crate::time_control::TimeControl;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The winner delivered checkmate.
    Checkmate { winner: Color },
    /// Neither side retains mating material.
    InsufficientMaterial,
    /// The loser forfeited; the winner did nothing wrong.
    Forfeit { winner: Color, reason: ForfeitReason },
}

/// What a forfeiting player did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForfeitReason {
    /// Submitted a move the authoritative board rejected.
    IllegalMove,
    /// Failed to submit a move before the clock ran out.
    OutOfTime,
    /// Hung up: the player's channel closed without a move.
    Abandoned,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            GameOutcome::InsufficientMaterial => {
                write!(f, "draw by insufficient mating material")
            }
            GameOutcome::Forfeit { winner, reason } => {
                write!(f, "{winner} wins: opponent {reason}")
            }
        }
    }
}

impl fmt::Display for ForfeitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForfeitReason::IllegalMove => write!(f, "submitted an illegal move"),
            ForfeitReason::OutOfTime => write!(f, "ran out of time"),
            ForfeitReason::Abandoned => write!(f, "abandoned the game"),
        }
    }
}

/// The referee's end of one seat's channel pair.
struct SeatWires {
    prompts: SyncSender<Prompt>,
    moves: Receiver<Move>,
}

/// Build the single-slot channel pair for one side.
fn wire_seat(color: Color) -> (Seat, SeatWires) {
    let (prompt_tx, prompt_rx) = mpsc::sync_channel(1);
    let (move_tx, move_rx) = mpsc::sync_channel(1);
    let seat = Seat {
        color,
        board: Board::starting_position(),
        prompts: prompt_rx,
        moves: move_tx,
    };
    let wires = SeatWires {
        prompts: prompt_tx,
        moves: move_rx,
    };
    (seat, wires)
}

/// A running game: the authoritative board, both clocks, and the channel
/// ends of both seats.
///
/// Players run on their own threads and only ever see their private board
/// copies; every submitted move is validated here before it counts.
pub struct Game {
    board: Board,
    clocks: [Duration; Color::COUNT],
    increment: Duration,
    wires: [SeatWires; Color::COUNT],
}

impl Game {
    /// Play a full game between the two players and return the outcome.
    ///
    /// Each player thread is detached rather than joined: when the game ends
    /// the referee drops its channel ends, and a well-behaved player unwinds
    /// on its next channel operation. A player stuck in a blocking read is
    /// left for process teardown, the same way the original terminal players
    /// are.
    pub fn play<W, B>(mut white: W, mut black: B, control: &dyn TimeControl) -> GameOutcome
    where
        W: Player + 'static,
        B: Player + 'static,
    {
        let (white_seat, white_wires) = wire_seat(Color::White);
        let (black_seat, black_wires) = wire_seat(Color::Black);

        thread::spawn(move || white.run(white_seat));
        thread::spawn(move || black.run(black_seat));

        let mut game = Game {
            board: Board::starting_position(),
            clocks: [control.initial(); Color::COUNT],
            increment: control.increment(),
            wires: [white_wires, black_wires],
        };
        let outcome = game.run();
        info!(%outcome, "game over");
        outcome
    }

    fn run(&mut self) -> GameOutcome {
        let mut last_move = None;

        loop {
            let mover = self.board.side_to_move();
            let wires = &self.wires[mover.index()];

            let prompt = Prompt {
                opponent_move: last_move,
            };
            if wires.prompts.send(prompt).is_err() {
                return self.forfeit(mover, ForfeitReason::Abandoned);
            }
            let stamp = Instant::now();

            let mv = match wires.moves.recv_timeout(self.clocks[mover.index()]) {
                Ok(mv) => mv,
                Err(RecvTimeoutError::Timeout) => {
                    return self.forfeit(mover, ForfeitReason::OutOfTime);
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return self.forfeit(mover, ForfeitReason::Abandoned);
                }
            };

            if let Err(err) = self.board.make_move(mv) {
                warn!(%mover, %mv, %err, "rejected submitted move");
                return self.forfeit(mover, ForfeitReason::IllegalMove);
            }

            let clock = &mut self.clocks[mover.index()];
            *clock = clock.saturating_sub(stamp.elapsed()) + self.increment;
            info!(%mover, %mv, clock_left = ?self.clocks[mover.index()], "move accepted");

            if self.board.is_checkmate() {
                return GameOutcome::Checkmate { winner: mover };
            }
            if self.board.insufficient_material() {
                return GameOutcome::InsufficientMaterial;
            }

            last_move = Some(mv);
        }
    }

    fn forfeit(&self, loser: Color, reason: ForfeitReason) -> GameOutcome {
        warn!(%loser, %reason, "forfeit");
        GameOutcome::Forfeit {
            winner: loser.flip(),
            reason,
        }
    }
}
