//! Applying moves to the board.

use tracing::trace;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::MoveError;
use crate::file::File;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Castling rights lost when a move touches each square, as either source or
/// destination. Covering the destination revokes rights when a home rook is
/// captured, which keeps "right still held" equivalent to "king and rook
/// unmoved on their home squares".
const CASTLE_REVOKE: [CastleRights; 64] = {
    let mut table = [CastleRights::NONE; 64];
    table[Square::E1.index()] = CastleRights::WHITE_BOTH;
    table[Square::A1.index()] = CastleRights::WHITE_QUEEN;
    table[Square::H1.index()] = CastleRights::WHITE_KING;
    table[Square::E8.index()] = CastleRights::BLACK_BOTH;
    table[Square::A8.index()] = CastleRights::BLACK_QUEEN;
    table[Square::H8.index()] = CastleRights::BLACK_KING;
    table
};

impl Board {
    /// Validate and apply a move. On rejection the board is untouched.
    pub fn make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        self.check_move(mv)?;
        self.apply_unchecked(mv);
        trace!(%mv, "move applied");
        Ok(())
    }

    /// Apply a move without any validation.
    ///
    /// For trusted callers only — typically replaying a move the authoritative
    /// board has already accepted. Feeding an illegal move here corrupts the
    /// position silently.
    pub fn apply_unchecked(&mut self, mv: Move) {
        let us = self.side_to_move();
        let them = us.flip();
        let Some(mover) = self.piece_kind_on(mv.from) else {
            return;
        };

        // Remove whatever the move captures. For an en passant capture the
        // victim stands one rank behind the destination, not on it.
        if let Some(captured) = self.piece_kind_on(mv.to) {
            self.toggle_piece(mv.to, captured, them);
        } else if mover == PieceKind::Pawn && self.en_passant() == Some(mv.to) {
            let victim_index = match us {
                Color::White => mv.to.index() - 8,
                Color::Black => mv.to.index() + 8,
            };
            if let Some(victim) = Square::from_index(victim_index as u8) {
                self.toggle_piece(victim, PieceKind::Pawn, them);
            }
        }

        // Relocate the mover.
        self.toggle_piece(mv.from, mover, us);
        self.toggle_piece(mv.to, mover, us);

        // Promotion swaps the arrived pawn for the chosen piece: two more
        // toggles rather than a replacement.
        if let Some(promotion) = mv.promotion {
            self.toggle_piece(mv.to, PieceKind::Pawn, us);
            self.toggle_piece(mv.to, promotion.kind(), us);
        }

        // A fresh double push exposes the skipped square for one move.
        let double_push = mover == PieceKind::Pawn && mv.from.index().abs_diff(mv.to.index()) == 16;
        self.set_en_passant(if double_push {
            Square::from_index(((mv.from.index() + mv.to.index()) / 2) as u8)
        } else {
            None
        });

        // A two-file king move is a castle: bring the rook across.
        if mover == PieceKind::King && mv.from.file().index().abs_diff(mv.to.file().index()) == 2 {
            let (rook_from, rook_to) = if mv.to.file() == File::FileG {
                match us {
                    Color::White => (Square::H1, Square::F1),
                    Color::Black => (Square::H8, Square::F8),
                }
            } else {
                match us {
                    Color::White => (Square::A1, Square::D1),
                    Color::Black => (Square::A8, Square::D8),
                }
            };
            self.toggle_piece(rook_from, PieceKind::Rook, us);
            self.toggle_piece(rook_to, PieceKind::Rook, us);
        }

        let rights = self
            .castling()
            .remove(CASTLE_REVOKE[mv.from.index()])
            .remove(CASTLE_REVOKE[mv.to.index()]);
        self.set_castling(rights);

        self.invalidate_caches();
        self.set_side_to_move(them);
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::castle_rights::CastleSide;
    use crate::chess_move::{Move, PromotionPiece};
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::square::Square;

    #[test]
    fn pawn_double_push_sets_en_passant() {
        let mut board = Board::starting_position();
        board.make_move(Move::new(Square::E2, Square::E4)).unwrap();
        assert_eq!(board.piece_on(Square::E4), Some(Piece::WHITE_PAWN));
        assert_eq!(board.en_passant(), Some(Square::E3));
        assert_eq!(board.side_to_move(), Color::Black);

        board.make_move(Move::new(Square::D7, Square::D5)).unwrap();
        assert_eq!(board.en_passant(), Some(Square::D6));

        // A quiet move clears the target again.
        board.make_move(Move::new(Square::G1, Square::F3)).unwrap();
        assert_eq!(board.en_passant(), None);
    }

    #[test]
    fn capture_removes_the_victim() {
        let mut board = Board::starting_position();
        board.make_move(Move::new(Square::E2, Square::E4)).unwrap();
        board.make_move(Move::new(Square::D7, Square::D5)).unwrap();
        board.make_move(Move::new(Square::E4, Square::D5)).unwrap();

        assert_eq!(board.piece_on(Square::D5), Some(Piece::WHITE_PAWN));
        assert_eq!(board.piece_on(Square::E4), None);
        assert_eq!(board.occupied().count(), 31);
        board.validate().unwrap();
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let mut board = Board::starting_position();
        for mv in [
            Move::new(Square::E2, Square::E4),
            Move::new(Square::A7, Square::A6),
            Move::new(Square::E4, Square::E5),
            Move::new(Square::F7, Square::F5),
        ] {
            board.make_move(mv).unwrap();
        }
        assert_eq!(board.en_passant(), Some(Square::F6));
        // The phantom pawn is reported on the target square.
        assert_eq!(board.piece_on(Square::F6), Some(Piece::BLACK_PAWN));

        board.make_move(Move::new(Square::E5, Square::F6)).unwrap();
        assert_eq!(board.piece_on(Square::F6), Some(Piece::WHITE_PAWN));
        assert_eq!(board.piece_on(Square::F5), None, "captured pawn removed");
        assert_eq!(board.piece_on(Square::E5), None);
        assert_eq!(board.en_passant(), None);
        board.validate().unwrap();
    }

    #[test]
    fn only_pawns_capture_the_en_passant_phantom() {
        // 1.Nc3 h6 2.Nb5 d5 3.Nd6+: the knight lands on the en passant
        // target square as a quiet move; the d5 pawn stays on the board.
        let mut board = Board::starting_position();
        for mv in [
            Move::new(Square::B1, Square::C3),
            Move::new(Square::H7, Square::H6),
            Move::new(Square::C3, Square::B5),
            Move::new(Square::D7, Square::D5),
        ] {
            board.make_move(mv).unwrap();
        }
        assert_eq!(board.en_passant(), Some(Square::D6));
        let men_before = board.occupied().count();
        board.make_move(Move::new(Square::B5, Square::D6)).unwrap();
        assert_eq!(board.occupied().count(), men_before);
        assert_eq!(board.piece_on(Square::D5), Some(Piece::BLACK_PAWN));
        board.validate().unwrap();
    }

    #[test]
    fn castling_relocates_both_king_and_rook() {
        let mut board: Board = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq -"
            .parse()
            .unwrap();
        board.make_move(Move::new(Square::E1, Square::G1)).unwrap();
        assert_eq!(board.piece_on(Square::G1), Some(Piece::WHITE_KING));
        assert_eq!(board.piece_on(Square::F1), Some(Piece::WHITE_ROOK));
        assert_eq!(board.piece_on(Square::E1), None);
        assert_eq!(board.piece_on(Square::H1), None);
        assert!(!board.castling().has(Color::White, CastleSide::KingSide));
        assert!(!board.castling().has(Color::White, CastleSide::QueenSide));
        assert!(board.castling().has(Color::Black, CastleSide::KingSide));

        board.make_move(Move::new(Square::E8, Square::C8)).unwrap();
        assert_eq!(board.piece_on(Square::C8), Some(Piece::BLACK_KING));
        assert_eq!(board.piece_on(Square::D8), Some(Piece::BLACK_ROOK));
        assert_eq!(board.piece_on(Square::A8), None);
        assert!(board.castling().is_empty());
        board.validate().unwrap();
    }

    #[test]
    fn rook_moves_revoke_one_side() {
        let mut board: Board = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq -"
            .parse()
            .unwrap();
        board.make_move(Move::new(Square::H1, Square::G1)).unwrap();
        assert!(!board.castling().has(Color::White, CastleSide::KingSide));
        assert!(board.castling().has(Color::White, CastleSide::QueenSide));
    }

    #[test]
    fn capturing_a_home_rook_revokes_its_right() {
        // A white rook storms into a8 and takes the rook sitting there.
        let mut board: Board = "r3k2r/1ppppppp/8/8/8/8/1PPPPPPP/R3K2R w KQkq -"
            .parse()
            .unwrap();
        board.make_move(Move::new(Square::A1, Square::A8)).unwrap();
        assert!(!board.castling().has(Color::Black, CastleSide::QueenSide));
        assert!(board.castling().has(Color::Black, CastleSide::KingSide));
        // White's own queenside right went with the rook leaving a1.
        assert!(!board.castling().has(Color::White, CastleSide::QueenSide));
    }

    #[test]
    fn promotion_is_two_extra_toggles() {
        let mut board: Board = "4k3/6P1/8/8/8/8/8/4K3 w - -".parse().unwrap();
        board
            .make_move(Move::promoting(Square::G7, Square::G8, PromotionPiece::Queen))
            .unwrap();
        assert_eq!(board.piece_on(Square::G8), Some(Piece::WHITE_QUEEN));
        assert_eq!(board.piece_on(Square::G7), None);
        board.validate().unwrap();
    }

    #[test]
    fn rejected_moves_leave_the_board_alone() {
        let mut board = Board::starting_position();
        let before = board.clone();
        assert!(board.make_move(Move::new(Square::E2, Square::E5)).is_err());
        assert!(board.make_move(Move::new(Square::E7, Square::E5)).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn turn_alternates() {
        let mut board = Board::starting_position();
        assert_eq!(board.side_to_move(), Color::White);
        board.make_move(Move::new(Square::E2, Square::E4)).unwrap();
        assert_eq!(board.side_to_move(), Color::Black);
        board.make_move(Move::new(Square::E7, Square::E5)).unwrap();
        assert_eq!(board.side_to_move(), Color::White);
    }

    #[test]
    fn accepted_moves_never_leave_the_mover_in_check() {
        // Soundness of the self-check guard across a sequence with checks.
        let mut board = Board::starting_position();
        let moves = [
            Move::new(Square::E2, Square::E4),
            Move::new(Square::E7, Square::E5),
            Move::new(Square::F1, Square::C4),
            Move::new(Square::B8, Square::C6),
            Move::new(Square::D1, Square::H5),
            Move::new(Square::G8, Square::F6),
        ];
        for mv in moves {
            let mover = board.side_to_move();
            board.make_move(mv).unwrap();
            assert!(!board.in_check(mover), "{mv} left the mover in check");
            board.validate().unwrap();
        }
    }
}
