//! Attack maps, checking pieces, and pin detection.

use crate::attacks::{
    between, bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// An enemy piece currently giving check.
///
/// `ray` holds the squares a friendly piece could interpose on, including the
/// checker's own square and excluding the king's. Contact checkers (knights
/// and pawns) cannot be blocked, so their ray is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckingPiece {
    pub piece: Piece,
    pub square: Square,
    pub ray: Bitboard,
}

/// Compute the set of squares attacked by `color`, scanning sliders against
/// the given occupancy. Squares holding the attacker's own pieces are
/// included: an attacked set answers "could this square be captured on", and
/// defended friendly pieces count for that.
pub(crate) fn attacks_by(board: &Board, color: Color, occupied: Bitboard) -> Bitboard {
    let own = board.side(color);
    let mut attacked = Bitboard::EMPTY;

    for sq in board.pieces(PieceKind::Pawn) & own {
        attacked |= pawn_attacks(color, sq);
    }
    for sq in board.pieces(PieceKind::Knight) & own {
        attacked |= knight_attacks(sq);
    }
    attacked |= king_attacks(board.king_square(color));

    let queens = board.pieces(PieceKind::Queen);
    for sq in (board.pieces(PieceKind::Bishop) | queens) & own {
        attacked |= bishop_attacks(sq, occupied);
    }
    for sq in (board.pieces(PieceKind::Rook) | queens) & own {
        attacked |= rook_attacks(sq, occupied);
    }

    attacked
}

impl Board {
    /// Return the squares attacked by `color`, cached until the next mutation.
    ///
    /// Sliding rays treat the defending king as transparent, so the squares
    /// behind a checked king along the checking ray still count as attacked —
    /// a king cannot retreat along the very ray that checks it.
    pub fn attacked_squares(&self, color: Color) -> Bitboard {
        if let Some(cached) = self.cached_attacks(color) {
            return cached;
        }
        let defender_king = self.king_square(color.flip()).bitboard();
        let map = attacks_by(self, color, self.occupied() & !defender_king);
        self.store_attacks(color, map);
        map
    }

    /// Return `true` if the given side's king is currently attacked.
    pub fn in_check(&self, color: Color) -> bool {
        self.attacked_squares(color.flip())
            .contains(self.king_square(color))
    }

    /// Return the enemy pieces currently giving check to the side to move.
    pub fn checking_pieces(&self) -> Vec<CheckingPiece> {
        checkers_and_pins(self).0
    }
}

/// Find the checkers of the side to move and its pinned pieces in one pass.
///
/// Contact checks are found by reverse lookup from the king square. For
/// sliders, each enemy bishop/rook/queen that would see the king on an empty
/// board is classified by the number of pieces standing on the connecting
/// line: none means check, exactly one friendly piece means that piece is
/// pinned to the king along the line.
pub(crate) fn checkers_and_pins(board: &Board) -> (Vec<CheckingPiece>, Bitboard) {
    let us = board.side_to_move();
    let them = us.flip();
    let king_sq = board.king_square(us);
    let own = board.side(us);
    let enemy = board.side(them);
    let occupied = board.occupied();

    let mut checkers = Vec::new();
    let mut pinned = Bitboard::EMPTY;

    // A knight or pawn giving check stands where a piece of that kind on the
    // king's square would attack.
    for sq in knight_attacks(king_sq) & board.pieces(PieceKind::Knight) & enemy {
        checkers.push(CheckingPiece {
            piece: Piece::new(PieceKind::Knight, them),
            square: sq,
            ray: Bitboard::EMPTY,
        });
    }
    for sq in pawn_attacks(us, king_sq) & board.pieces(PieceKind::Pawn) & enemy {
        checkers.push(CheckingPiece {
            piece: Piece::new(PieceKind::Pawn, them),
            square: sq,
            ray: Bitboard::EMPTY,
        });
    }

    let queens = board.pieces(PieceKind::Queen);
    let diag_candidates =
        bishop_attacks(king_sq, Bitboard::EMPTY) & (board.pieces(PieceKind::Bishop) | queens) & enemy;
    let orth_candidates =
        rook_attacks(king_sq, Bitboard::EMPTY) & (board.pieces(PieceKind::Rook) | queens) & enemy;

    for attacker_sq in diag_candidates | orth_candidates {
        let kind = if queens.contains(attacker_sq) {
            PieceKind::Queen
        } else if board.pieces(PieceKind::Bishop).contains(attacker_sq) {
            PieceKind::Bishop
        } else {
            PieceKind::Rook
        };
        let line = between(king_sq, attacker_sq);
        let blockers = line & occupied;
        match blockers.count() {
            0 => checkers.push(CheckingPiece {
                piece: Piece::new(kind, them),
                square: attacker_sq,
                ray: line | attacker_sq.bitboard(),
            }),
            1 => {
                // A lone friendly piece on the line is pinned; a lone enemy
                // piece merely blocks.
                pinned |= blockers & own;
            }
            _ => {}
        }
    }

    (checkers, pinned)
}

/// Quiet-move destinations reachable by the unpinned, non-king pieces of
/// `color`: where a piece could step to interpose against a check. Pawn
/// pushes honor blocking; sliders and knights reach their empty attack
/// squares.
pub(crate) fn interpose_reach(board: &Board, color: Color, pinned: Bitboard) -> Bitboard {
    let occupied = board.occupied();
    let movers = board.side(color) & !pinned & !board.pieces(PieceKind::King);
    let mut reach = Bitboard::EMPTY;

    for sq in board.pieces(PieceKind::Knight) & movers {
        reach |= knight_attacks(sq) & !occupied;
    }
    let queens = board.pieces(PieceKind::Queen);
    for sq in (board.pieces(PieceKind::Bishop) | queens) & movers {
        reach |= bishop_attacks(sq, occupied) & !occupied;
    }
    for sq in (board.pieces(PieceKind::Rook) | queens) & movers {
        reach |= rook_attacks(sq, occupied) & !occupied;
    }

    for sq in board.pieces(PieceKind::Pawn) & movers {
        let forward = match color {
            Color::White => sq.index() + 8,
            Color::Black => sq.index().wrapping_sub(8),
        };
        let Some(single) = Square::from_index(forward as u8) else {
            continue;
        };
        if occupied.contains(single) {
            continue;
        }
        reach |= single.bitboard();

        let start_rank = match color {
            Color::White => Bitboard::RANK_2,
            Color::Black => Bitboard::RANK_7,
        };
        if start_rank.contains(sq) {
            let double = match color {
                Color::White => sq.index() + 16,
                Color::Black => sq.index() - 16,
            };
            if let Some(double) = Square::from_index(double as u8)
                && !occupied.contains(double)
            {
                reach |= double.bitboard();
            }
        }
    }

    reach
}

/// Attack squares of the unpinned, non-king pieces of `color`: where such a
/// piece could capture. Pinned pieces are excluded because they cannot leave
/// their pin line even to take the checker.
pub(crate) fn capture_reach(board: &Board, color: Color, pinned: Bitboard) -> Bitboard {
    let occupied = board.occupied();
    let movers = board.side(color) & !pinned & !board.pieces(PieceKind::King);
    let mut reach = Bitboard::EMPTY;

    for sq in board.pieces(PieceKind::Pawn) & movers {
        reach |= pawn_attacks(color, sq);
    }
    for sq in board.pieces(PieceKind::Knight) & movers {
        reach |= knight_attacks(sq);
    }
    let queens = board.pieces(PieceKind::Queen);
    for sq in (board.pieces(PieceKind::Bishop) | queens) & movers {
        reach |= bishop_attacks(sq, occupied);
    }
    for sq in (board.pieces(PieceKind::Rook) | queens) & movers {
        reach |= rook_attacks(sq, occupied);
    }

    reach
}
