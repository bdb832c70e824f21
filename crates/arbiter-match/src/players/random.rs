//! A legal-but-clueless opponent.

use rand::Rng;
use tracing::debug;

use arbiter_core::{File, Move, PromotionPiece, Rank, Square};

use crate::player::{Player, Seat};

/// Proposes uniformly random candidate moves against its own board until one
/// is accepted, then submits it.
#[derive(Debug, Default)]
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> RandomPlayer {
        RandomPlayer
    }
}

fn random_square(rng: &mut impl Rng) -> Square {
    let rank = Rank::ALL[rng.random_range(0..Rank::ALL.len())];
    let file = File::ALL[rng.random_range(0..File::ALL.len())];
    Square::new(rank, file)
}

/// A random from/to pair with, one time in five, a random promotion piece.
/// Almost all candidates are illegal; the caller keeps drawing until the
/// board accepts one.
fn random_candidate(rng: &mut impl Rng) -> Move {
    let from = random_square(rng);
    let to = random_square(rng);
    match PromotionPiece::ALL.get(rng.random_range(0..=PromotionPiece::ALL.len())) {
        Some(&piece) => Move::promoting(from, to, piece),
        None => Move::new(from, to),
    }
}

impl Player for RandomPlayer {
    fn run(&mut self, mut seat: Seat) {
        let mut rng = rand::rng();
        while let Ok(prompt) = seat.prompts.recv() {
            if let Some(mv) = prompt.opponent_move {
                seat.board.apply_unchecked(mv);
            }

            let mv = loop {
                let candidate = random_candidate(&mut rng);
                if seat.board.make_move(candidate).is_ok() {
                    break candidate;
                }
            };
            debug!(color = %seat.color, %mv, "random player settled on a move");

            if seat.moves.send(mv).is_err() {
                return;
            }
        }
    }
}
