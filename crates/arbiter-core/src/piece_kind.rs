//! Piece kinds, without color.

use std::fmt;

/// The kind of a piece, independent of its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Total number of piece kinds.
    pub const COUNT: usize = 6;

    /// All piece kinds in index order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Return the index (0..5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the lowercase glyph for this kind.
    #[inline]
    pub const fn glyph(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a glyph (either case) into a piece kind.
    #[inline]
    pub fn from_glyph(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::PieceKind;

    #[test]
    fn glyph_roundtrip() {
        for kind in PieceKind::ALL {
            let c = kind.glyph();
            assert_eq!(PieceKind::from_glyph(c), Some(kind));
            assert_eq!(PieceKind::from_glyph(c.to_ascii_uppercase()), Some(kind));
        }
    }

    #[test]
    fn from_glyph_invalid() {
        assert_eq!(PieceKind::from_glyph('x'), None);
        assert_eq!(PieceKind::from_glyph('1'), None);
    }

    #[test]
    fn indices_are_contiguous() {
        for (expected, kind) in PieceKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), expected);
        }
    }
}
