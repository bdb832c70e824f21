//! Castling rights as a 4-bit flag set.

use std::fmt;

use crate::color::Color;

/// Which wing of the board a castle heads toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::KingSide => write!(f, "kingside"),
            CastleSide::QueenSide => write!(f, "queenside"),
        }
    }
}

/// The four castling permissions: bit 0 = WK, 1 = WQ, 2 = BK, 3 = BQ.
///
/// Rights only ever transition from set to cleared; nothing restores them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    /// No castling rights.
    pub const NONE: CastleRights = CastleRights(0);
    /// All four castling rights.
    pub const ALL: CastleRights = CastleRights(0b1111);

    /// White king-side castling.
    pub const WHITE_KING: CastleRights = CastleRights(0b0001);
    /// White queen-side castling.
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0010);
    /// Black king-side castling.
    pub const BLACK_KING: CastleRights = CastleRights(0b0100);
    /// Black queen-side castling.
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b1000);

    /// Both white rights.
    pub const WHITE_BOTH: CastleRights = CastleRights(0b0011);
    /// Both black rights.
    pub const BLACK_BOTH: CastleRights = CastleRights(0b1100);

    /// Return the raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Return `true` if no rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Return new rights with all bits of `other` added.
    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    /// Return new rights with all bits of `other` removed.
    #[inline]
    pub const fn remove(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// Check whether the given color may still castle on the given side.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        (self.0 & Self::flag(color, side).0) != 0
    }

    /// Return the single-bit flag for a color and side.
    #[inline]
    pub(crate) const fn flag(color: Color, side: CastleSide) -> CastleRights {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => Self::WHITE_KING,
            (Color::White, CastleSide::QueenSide) => Self::WHITE_QUEEN,
            (Color::Black, CastleSide::KingSide) => Self::BLACK_KING,
            (Color::Black, CastleSide::QueenSide) => Self::BLACK_QUEEN,
        }
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "CastleRights(-)");
        }
        write!(f, "CastleRights(")?;
        if self.contains(Self::WHITE_KING) {
            write!(f, "K")?;
        }
        if self.contains(Self::WHITE_QUEEN) {
            write!(f, "Q")?;
        }
        if self.contains(Self::BLACK_KING) {
            write!(f, "k")?;
        }
        if self.contains(Self::BLACK_QUEEN) {
            write!(f, "q")?;
        }
        write!(f, ")")
    }
}
