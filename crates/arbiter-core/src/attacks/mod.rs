//! Movement and attack geometry: precomputed masks plus the ray scan used by
//! sliding pieces.

mod tables;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use self::tables::{
    BETWEEN, BISHOP_MASKS, KING_ATTACKS, KING_MOVES, KNIGHT_ATTACKS, PAWN_ATTACKS, PAWN_PUSHES,
    RAYS, ROOK_MASKS,
};

/// A ray direction, clockwise from North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The rook's ray directions.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The bishop's ray directions.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Return the index (0..7).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether square indices grow along this direction.
    #[inline]
    const fn is_rising(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::NorthEast | Direction::East | Direction::NorthWest
        )
    }
}

/// Return the full ray from `sq` toward `dir`, up to the board edge
/// (`sq` itself excluded).
#[inline]
pub fn ray(dir: Direction, sq: Square) -> Bitboard {
    RAYS[dir.index()][sq.index()]
}

/// Scan along a ray from `sq`: every empty square traversed plus the first
/// occupied square reached, where the scan stops.
#[inline]
pub fn ray_scan(dir: Direction, sq: Square, occupied: Bitboard) -> Bitboard {
    let full = RAYS[dir.index()][sq.index()];
    let blockers = full & occupied;
    let first = if dir.is_rising() {
        blockers.lsb()
    } else {
        blockers.msb()
    };
    match first {
        // Everything past the first blocker is cut off; the blocker stays.
        Some(blocker) => full ^ RAYS[dir.index()][blocker.index()],
        None => full,
    }
}

/// Return the squares a knight on `sq` attacks.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

/// Return the squares a king on `sq` attacks (the adjacent ring).
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

/// Return the squares a king on `sq` may move to: the adjacent ring plus, from
/// the home squares, the two-file castle destinations.
#[inline]
pub fn king_moves(sq: Square) -> Bitboard {
    KING_MOVES[sq.index()]
}

/// Return the squares a pawn of `color` on `sq` attacks.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}

/// Return the squares a pawn of `color` on `sq` may push to, ignoring
/// occupancy: the single step, plus the double step from the starting rank.
#[inline]
pub fn pawn_pushes(color: Color, sq: Square) -> Bitboard {
    PAWN_PUSHES[color.index()][sq.index()]
}

/// Return rook attacks from `sq` given the occupied squares.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    Direction::ORTHOGONAL
        .into_iter()
        .fold(Bitboard::EMPTY, |acc, dir| acc | ray_scan(dir, sq, occupied))
}

/// Return bishop attacks from `sq` given the occupied squares.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    Direction::DIAGONAL
        .into_iter()
        .fold(Bitboard::EMPTY, |acc, dir| acc | ray_scan(dir, sq, occupied))
}

/// Return queen attacks from `sq` given the occupied squares.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Return squares strictly between `from` and `to` along their shared rank,
/// file, or diagonal; empty when the squares share none.
#[inline]
pub fn between(from: Square, to: Square) -> Bitboard {
    BETWEEN[from.index()][to.index()]
}

/// The quiet-move mask of a piece on a square, ignoring occupancy. For
/// sliders this is the maximal ray union, clipped against blockers at query
/// time by [`ray_scan`].
pub fn move_mask(piece: Piece, sq: Square) -> Bitboard {
    match piece.kind() {
        PieceKind::Pawn => pawn_pushes(piece.color(), sq),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => BISHOP_MASKS[sq.index()],
        PieceKind::Rook => ROOK_MASKS[sq.index()],
        PieceKind::Queen => Bitboard::new(
            ROOK_MASKS[sq.index()].inner() | BISHOP_MASKS[sq.index()].inner(),
        ),
        PieceKind::King => king_moves(sq),
    }
}

/// The attack mask of a piece on a square, ignoring occupancy. Differs from
/// the move mask only for pawns (diagonal captures) and kings (no castle
/// destinations).
pub fn attack_mask(piece: Piece, sq: Square) -> Bitboard {
    match piece.kind() {
        PieceKind::Pawn => pawn_attacks(piece.color(), sq),
        PieceKind::King => king_attacks(sq),
        _ => move_mask(piece, sq),
    }
}
