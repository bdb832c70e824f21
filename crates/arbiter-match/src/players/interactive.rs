//! A human player on the terminal.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use arbiter_core::{Move, PromotionPiece, Square};

use crate::player::{Player, Seat};

/// Why a line of input could not be read as a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    /// The line does not split into two or three fields.
    #[error("expected \"<from> <to>\" with an optional promotion piece, e.g. \"e2 e4\" or \"g7 g8 q\"")]
    WrongShape,
    /// A coordinate field is not a file a-h followed by a rank 1-8.
    #[error("bad coordinate \"{found}\": expected a file a-h followed by a rank 1-8")]
    BadCoordinate { found: String },
    /// The promotion field names something other than n, b, r, or q.
    #[error("bad promotion piece \"{found}\": expected one of n, b, r, q")]
    BadPromotion { found: String },
}

/// Parse `"<from> <to> [promotion]"` into a move.
///
/// This is the text edge: anything malformed is rejected here, before the
/// move value reaches a board.
pub fn parse_move(input: &str) -> Result<Move, ParseMoveError> {
    let fields: Vec<&str> = input.split_whitespace().collect();
    let (from, to, promotion) = match fields.as_slice() {
        [from, to] => (*from, *to, None),
        [from, to, piece] => (*from, *to, Some(*piece)),
        _ => return Err(ParseMoveError::WrongShape),
    };

    let parse_square = |text: &str| {
        Square::from_algebraic(text).ok_or_else(|| ParseMoveError::BadCoordinate {
            found: text.to_string(),
        })
    };
    let from = parse_square(from)?;
    let to = parse_square(to)?;

    match promotion {
        None => Ok(Move::new(from, to)),
        Some(text) => {
            let mut glyphs = text.chars();
            match (glyphs.next().and_then(PromotionPiece::from_glyph), glyphs.next()) {
                (Some(piece), None) => Ok(Move::promoting(from, to, piece)),
                _ => Err(ParseMoveError::BadPromotion {
                    found: text.to_string(),
                }),
            }
        }
    }
}

/// Prompts on stdout, reads moves from stdin, and retries until its own
/// board accepts one.
#[derive(Debug, Default)]
pub struct InteractivePlayer;

impl InteractivePlayer {
    pub fn new() -> InteractivePlayer {
        InteractivePlayer
    }
}

impl Player for InteractivePlayer {
    fn run(&mut self, mut seat: Seat) {
        println!("interactive player [{}] ready", seat.color);
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        while let Ok(prompt) = seat.prompts.recv() {
            if let Some(mv) = prompt.opponent_move {
                println!("opponent played {mv}");
                seat.board.apply_unchecked(mv);
            }

            let chosen = loop {
                println!("\n{}", seat.board);
                print!("{} to move > ", seat.color);
                let _ = io::stdout().flush();

                let line = match lines.next() {
                    Some(Ok(line)) => line,
                    // Stdin is gone; the referee scores this as abandonment.
                    Some(Err(_)) | None => return,
                };
                let mv = match parse_move(&line) {
                    Ok(mv) => mv,
                    Err(err) => {
                        println!("could not read that: {err}");
                        continue;
                    }
                };
                match seat.board.make_move(mv) {
                    Ok(()) => break mv,
                    Err(err) => println!("illegal move: {err}"),
                }
            };

            if seat.moves.send(chosen).is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use arbiter_core::{Move, PromotionPiece, Square};

    use super::{ParseMoveError, parse_move};

    #[test]
    fn plain_move() {
        assert_eq!(
            parse_move("e2 e4"),
            Ok(Move::new(Square::E2, Square::E4))
        );
        // Surrounding and repeated whitespace is fine.
        assert_eq!(
            parse_move("  g8   f6 "),
            Ok(Move::new(Square::G8, Square::F6))
        );
    }

    #[test]
    fn promoting_move() {
        assert_eq!(
            parse_move("g7 g8 q"),
            Ok(Move::promoting(Square::G7, Square::G8, PromotionPiece::Queen))
        );
        assert_eq!(
            parse_move("b2 b1 N"),
            Ok(Move::promoting(Square::B2, Square::B1, PromotionPiece::Knight))
        );
    }

    #[test]
    fn wrong_shape() {
        assert_eq!(parse_move(""), Err(ParseMoveError::WrongShape));
        assert_eq!(parse_move("e2e4"), Err(ParseMoveError::WrongShape));
        assert_eq!(
            parse_move("e2 e4 q q"),
            Err(ParseMoveError::WrongShape)
        );
    }

    #[test]
    fn bad_coordinates() {
        assert_eq!(
            parse_move("i2 e4"),
            Err(ParseMoveError::BadCoordinate {
                found: "i2".to_string()
            })
        );
        assert_eq!(
            parse_move("e2 e9"),
            Err(ParseMoveError::BadCoordinate {
                found: "e9".to_string()
            })
        );
        assert_eq!(
            parse_move("E2 e4"),
            Err(ParseMoveError::BadCoordinate {
                found: "E2".to_string()
            })
        );
    }

    #[test]
    fn bad_promotion_pieces() {
        // Promoting to a king or pawn is not a thing.
        assert_eq!(
            parse_move("g7 g8 k"),
            Err(ParseMoveError::BadPromotion {
                found: "k".to_string()
            })
        );
        assert_eq!(
            parse_move("g7 g8 p"),
            Err(ParseMoveError::BadPromotion {
                found: "p".to_string()
            })
        );
        assert_eq!(
            parse_move("g7 g8 queen"),
            Err(ParseMoveError::BadPromotion {
                found: "queen".to_string()
            })
        );
    }
}
