//! The board: piece placement, side to move, castling rights, en passant
//! target, and the derived caches.

use std::cell::Cell;
use std::fmt;

use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::BoardError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// A complete chess position.
///
/// The twelve per-chessman occupancy sets are stored factored as six
/// per-kind bitboards and two per-side bitboards; `pieces(kind) & side(color)`
/// recovers any individual set. `occupied` is kept consistent eagerly by the
/// toggle primitive, while the attacked-squares maps are computed lazily and
/// thrown away on every mutation.
///
/// Cloning produces a fully independent value: the cache cells are copied by
/// value and never shared, so speculative copies can warm or drop their caches
/// without touching the original.
#[derive(Clone)]
pub struct Board {
    /// One bitboard per piece kind, both colors mixed.
    pieces: [Bitboard; PieceKind::COUNT],
    /// One bitboard per side.
    sides: [Bitboard; Color::COUNT],
    /// Union of both sides.
    occupied: Bitboard,
    /// The side to move next.
    side_to_move: Color,
    /// Remaining castling permissions.
    castling: CastleRights,
    /// The square a pawn skipped on its double push last move, if any.
    en_passant: Option<Square>,
    /// Lazily computed attacked-squares map per color; `None` means stale.
    attack_cache: [Cell<Option<Bitboard>>; Color::COUNT],
}

impl Board {
    /// Return the standard starting position: all thirty-two men on their
    /// home squares, full castling rights, White to move.
    pub fn starting_position() -> Board {
        let white_back = Bitboard::RANK_1;
        let black_back = Bitboard::RANK_8;

        let pawns = Bitboard::RANK_2 | Bitboard::RANK_7;
        let knights = Square::B1.bitboard()
            | Square::G1.bitboard()
            | Square::B8.bitboard()
            | Square::G8.bitboard();
        let bishops = Square::C1.bitboard()
            | Square::F1.bitboard()
            | Square::C8.bitboard()
            | Square::F8.bitboard();
        let rooks = Square::A1.bitboard()
            | Square::H1.bitboard()
            | Square::A8.bitboard()
            | Square::H8.bitboard();
        let queens = Square::D1.bitboard() | Square::D8.bitboard();
        let kings = Square::E1.bitboard() | Square::E8.bitboard();

        let white = white_back | Bitboard::RANK_2;
        let black = black_back | Bitboard::RANK_7;

        Board {
            pieces: [pawns, knights, bishops, rooks, queens, kings],
            sides: [white, black],
            occupied: white | black,
            side_to_move: Color::White,
            castling: CastleRights::ALL,
            en_passant: None,
            attack_cache: [Cell::new(None), Cell::new(None)],
        }
    }

    /// Construct a board from raw placement data. Used by position parsing.
    pub(crate) fn from_raw(
        pieces: [Bitboard; PieceKind::COUNT],
        sides: [Bitboard; Color::COUNT],
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
    ) -> Board {
        Board {
            pieces,
            sides,
            occupied: sides[Color::White.index()] | sides[Color::Black.index()],
            side_to_move,
            castling,
            en_passant,
            attack_cache: [Cell::new(None), Cell::new(None)],
        }
    }

    /// Return the piece on the given square, if any.
    ///
    /// When `sq` is the en passant target this reports the "phantom" pawn of
    /// the side that just double-pushed, even though no bit is set there: the
    /// square is capturable as if that pawn stood on it.
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        if self.en_passant == Some(sq) {
            return Some(Piece::new(PieceKind::Pawn, self.side_to_move.flip()));
        }
        let kind = self.piece_kind_on(sq)?;
        let color = self.color_on(sq)?;
        Some(Piece::new(kind, color))
    }

    /// Return the kind of the piece whose bit is set on `sq`, if any.
    /// Unlike [`Board::piece_on`] this never reports the en passant phantom.
    pub(crate) fn piece_kind_on(&self, sq: Square) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|&kind| self.pieces[kind.index()].contains(sq))
    }

    /// Return the color of the piece on the given square, if any.
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|&color| self.sides[color.index()].contains(sq))
    }

    /// Return the bitboard for the given piece kind, both colors mixed.
    #[inline]
    pub fn pieces(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()]
    }

    /// Return the occupancy of the given side.
    #[inline]
    pub fn side(&self, color: Color) -> Bitboard {
        self.sides[color.index()]
    }

    /// Return the occupancy of both sides.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// Return the square of the given side's king.
    ///
    /// # Panics
    ///
    /// Panics if the side has no king; [`Board::validate`] rules that out for
    /// any board this crate constructs.
    pub fn king_square(&self, color: Color) -> Square {
        (self.pieces[PieceKind::King.index()] & self.sides[color.index()])
            .lsb()
            .expect("each side must have a king")
    }

    /// Return the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Return the remaining castling rights.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Return the en passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Toggle a piece's bit in the placement arrays and drop the caches.
    #[inline]
    pub(crate) fn toggle_piece(&mut self, sq: Square, kind: PieceKind, color: Color) {
        let mask = sq.bitboard();
        self.pieces[kind.index()] ^= mask;
        self.sides[color.index()] ^= mask;
        self.occupied = self.sides[Color::White.index()] | self.sides[Color::Black.index()];
        self.invalidate_caches();
    }

    /// Mark every derived cache stale.
    #[inline]
    pub(crate) fn invalidate_caches(&self) {
        self.attack_cache[Color::White.index()].set(None);
        self.attack_cache[Color::Black.index()].set(None);
    }

    /// Read the cached attacked-squares map for a color, if still fresh.
    #[inline]
    pub(crate) fn cached_attacks(&self, color: Color) -> Option<Bitboard> {
        self.attack_cache[color.index()].get()
    }

    /// Store a freshly computed attacked-squares map for a color.
    #[inline]
    pub(crate) fn store_attacks(&self, color: Color, map: Bitboard) {
        self.attack_cache[color.index()].set(Some(map));
    }

    /// Set the en passant target square.
    #[inline]
    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    /// Set the castling rights.
    #[inline]
    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    /// Set the side to move.
    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Check the structural invariants: pairwise-disjoint piece sets, exactly
    /// one king per side, consistent side and occupancy unions, and no pawns
    /// on either back rank.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let kings =
                (self.pieces[PieceKind::King.index()] & self.sides[color.index()]).count();
            if kings != 1 {
                let color = match color {
                    Color::White => "white",
                    Color::Black => "black",
                };
                return Err(BoardError::InvalidKingCount { color, count: kings });
            }
        }

        let back_ranks = Bitboard::RANK_1 | Bitboard::RANK_8;
        if (self.pieces[PieceKind::Pawn.index()] & back_ranks).is_nonempty() {
            return Err(BoardError::PawnsOnBackRank);
        }

        for i in 0..PieceKind::COUNT {
            for j in (i + 1)..PieceKind::COUNT {
                if (self.pieces[i] & self.pieces[j]).is_nonempty() {
                    return Err(BoardError::OverlappingPieces);
                }
            }
        }

        if (self.sides[Color::White.index()] & self.sides[Color::Black.index()]).is_nonempty() {
            return Err(BoardError::InconsistentSides);
        }

        let union = self.sides[Color::White.index()] | self.sides[Color::Black.index()];
        if self.occupied != union {
            return Err(BoardError::InconsistentOccupied);
        }

        Ok(())
    }
}

/// Board equality is positional: the caches do not participate.
impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.pieces == other.pieces
            && self.sides == other.sides
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
    }
}

impl Eq for Board {}

/// Render the position as an 8x8 glyph grid, rank 8 first: uppercase White,
/// lowercase Black, `-` for empty. The en passant phantom is not drawn.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            for file in 0u8..8 {
                let sq = Square::from_index_unchecked(rank * 8 + file);
                let glyph = match (self.piece_kind_on(sq), self.color_on(sq)) {
                    (Some(kind), Some(color)) => Piece::new(kind, color).glyph(),
                    _ => '-',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Debug shows the grid plus the bookkeeping fields.
impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for line in self.to_string().lines() {
            writeln!(f, "    {line}")?;
        }
        writeln!(f, "    to move: {}", self.side_to_move)?;
        writeln!(f, "    castling: {:?}", self.castling)?;
        match self.en_passant {
            Some(sq) => writeln!(f, "    en passant: {sq}")?,
            None => writeln!(f, "    en passant: -")?,
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    #[test]
    fn starting_position_validates() {
        Board::starting_position().validate().unwrap();
    }

    #[test]
    fn starting_position_layout() {
        let board = Board::starting_position();
        assert_eq!(board.piece_on(Square::E1), Some(Piece::WHITE_KING));
        assert_eq!(board.piece_on(Square::D8), Some(Piece::BLACK_QUEEN));
        assert_eq!(board.piece_on(Square::A1), Some(Piece::WHITE_ROOK));
        assert_eq!(board.piece_on(Square::G8), Some(Piece::BLACK_KNIGHT));
        assert_eq!(board.piece_on(Square::C2), Some(Piece::WHITE_PAWN));
        assert_eq!(board.piece_on(Square::E4), None);
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.en_passant(), None);
    }

    #[test]
    fn king_squares() {
        let board = Board::starting_position();
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
    }

    #[test]
    fn toggle_piece_moves_a_bit() {
        let mut board = Board::starting_position();
        board.toggle_piece(Square::E2, PieceKind::Pawn, Color::White);
        board.toggle_piece(Square::E4, PieceKind::Pawn, Color::White);
        assert_eq!(board.piece_on(Square::E2), None);
        assert_eq!(board.piece_on(Square::E4), Some(Piece::WHITE_PAWN));
        assert_eq!(board.occupied().count(), 32);
        board.validate().unwrap();
    }

    #[test]
    fn render_starting_position() {
        let board = Board::starting_position();
        let expected = "\
rnbqkbnr
pppppppp
--------
--------
--------
--------
PPPPPPPP
RNBQKBNR
";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn equality_ignores_caches() {
        let a = Board::starting_position();
        let b = Board::starting_position();
        // Warm one board's cache; they must still compare equal.
        let _ = a.attacked_squares(Color::White);
        assert_eq!(a, b);
    }

    #[test]
    fn clone_has_independent_caches() {
        let a = Board::starting_position();
        let _ = a.attacked_squares(Color::White);
        let mut b = a.clone();
        // Mutating the clone must not disturb the original's cache.
        b.toggle_piece(Square::E2, PieceKind::Pawn, Color::White);
        assert!(b.cached_attacks(Color::White).is_none());
        assert!(a.cached_attacks(Color::White).is_some());
    }
}
