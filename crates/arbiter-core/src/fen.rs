//! Position text parsing and serialization (FEN-style).
//!
//! The board keeps no move counters, so the two counter fields are accepted
//! and ignored on input and written as `0 1` on output.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::file::File;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

/// The standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Board {
    type Err = FenError;

    fn from_str(text: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        let mut pieces = [Bitboard::EMPTY; PieceKind::COUNT];
        let mut sides = [Bitboard::EMPTY; Color::COUNT];

        for (row, rank_text) in ranks.iter().enumerate() {
            // Placement rows run from rank 8 down to rank 1.
            let rank = Rank::ALL[7 - row];
            let mut file_index: usize = 0;

            for c in rank_text.chars() {
                if let Some(run) = c.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file_index += run as usize;
                } else {
                    let piece = Piece::from_glyph(c)
                        .ok_or(FenError::InvalidPieceChar { character: c })?;
                    if file_index >= 8 {
                        return Err(FenError::BadRankLength {
                            rank: row,
                            length: file_index + 1,
                        });
                    }
                    let sq = Square::new(rank, File::ALL[file_index]);
                    pieces[piece.kind().index()] |= sq.bitboard();
                    sides[piece.color().index()] |= sq.bitboard();
                    file_index += 1;
                }
            }

            if file_index != 8 {
                return Err(FenError::BadRankLength {
                    rank: row,
                    length: file_index,
                });
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        let castling = parse_castling(fields[2])?;

        let en_passant = if fields[3] == "-" {
            None
        } else {
            Some(Square::from_algebraic(fields[3]).ok_or_else(|| {
                FenError::InvalidEnPassant {
                    found: fields[3].to_string(),
                }
            })?)
        };

        // Counters, when present, only need to be numeric.
        for field in fields.iter().skip(4) {
            if field.parse::<u16>().is_err() {
                return Err(FenError::InvalidMoveCounter {
                    found: field.to_string(),
                });
            }
        }

        let board = Board::from_raw(pieces, sides, side_to_move, castling, en_passant);
        board.validate()?;
        Ok(board)
    }
}

fn parse_castling(field: &str) -> Result<CastleRights, FenError> {
    if field == "-" {
        return Ok(CastleRights::NONE);
    }
    let mut rights = CastleRights::NONE;
    for c in field.chars() {
        let flag = match c {
            'K' => CastleRights::WHITE_KING,
            'Q' => CastleRights::WHITE_QUEEN,
            'k' => CastleRights::BLACK_KING,
            'q' => CastleRights::BLACK_QUEEN,
            _ => return Err(FenError::InvalidCastlingChar { character: c }),
        };
        rights = rights.insert(flag);
    }
    Ok(rights)
}

impl Board {
    /// Serialize the position in FEN form, with `0 1` for the counters.
    pub fn to_fen(&self) -> String {
        let mut out = String::new();

        for rank in (0..8).rev() {
            let mut empty_run = 0;
            for file in 0..8 {
                let sq = Square::new(Rank::ALL[rank], File::ALL[file]);
                match (self.color_on(sq), piece_kind_at(self, sq)) {
                    (Some(color), Some(kind)) => {
                        if empty_run > 0 {
                            let _ = write!(out, "{empty_run}");
                            empty_run = 0;
                        }
                        out.push(Piece::new(kind, color).glyph());
                    }
                    _ => empty_run += 1,
                }
            }
            if empty_run > 0 {
                let _ = write!(out, "{empty_run}");
            }
            if rank > 0 {
                out.push('/');
            }
        }

        let _ = write!(out, " {}", match self.side_to_move() {
            Color::White => "w",
            Color::Black => "b",
        });

        out.push(' ');
        if self.castling().is_empty() {
            out.push('-');
        } else {
            if self.castling().contains(CastleRights::WHITE_KING) {
                out.push('K');
            }
            if self.castling().contains(CastleRights::WHITE_QUEEN) {
                out.push('Q');
            }
            if self.castling().contains(CastleRights::BLACK_KING) {
                out.push('k');
            }
            if self.castling().contains(CastleRights::BLACK_QUEEN) {
                out.push('q');
            }
        }

        match self.en_passant() {
            Some(sq) => {
                let _ = write!(out, " {sq}");
            }
            None => out.push_str(" -"),
        }

        out.push_str(" 0 1");
        out
    }
}

/// Raw piece-kind lookup for serialization: the en passant phantom must not
/// leak into the placement field.
fn piece_kind_at(board: &Board, sq: Square) -> Option<PieceKind> {
    PieceKind::ALL
        .into_iter()
        .find(|&kind| board.pieces(kind).contains(sq))
}
