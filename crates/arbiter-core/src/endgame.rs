//! Terminal positions: checkmate and dead draws.

use crate::analysis::{capture_reach, checkers_and_pins, interpose_reach};
use crate::attacks::king_attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::color::Color;
use crate::piece_kind::PieceKind;

impl Board {
    /// Return `true` if the side to move is checkmated.
    ///
    /// # Panics
    ///
    /// Panics if the analysis reports more than two simultaneous checkers,
    /// which no reachable position can produce.
    pub fn is_checkmate(&self) -> bool {
        let us = self.side_to_move();
        let them = us.flip();

        if !self.in_check(us) {
            return false;
        }

        let (checkers, pinned) = checkers_and_pins(self);
        let attacked = self.attacked_squares(them);
        let king_sq = self.king_square(us);
        // Escape squares: off one's own pieces, off anything covered. Enemy
        // squares remain candidates — capturing an undefended attacker with
        // the king is an escape.
        let escapes = king_attacks(king_sq) & !self.side(us) & !attacked;

        match checkers.len() {
            1 => {
                let checker = checkers[0];

                // A sliding check can be interposed on; a contact check has
                // an empty ray and cannot.
                let gaps = checker.ray & !checker.square.bitboard();
                if gaps.is_nonempty()
                    && (interpose_reach(self, us, pinned) & gaps).is_nonempty()
                {
                    return false;
                }

                // An unpinned piece may capture the checker.
                if capture_reach(self, us, pinned).contains(checker.square) {
                    return false;
                }

                escapes.is_empty()
            }
            // Double check: nothing but a king move addresses both lines.
            2 => escapes.is_empty(),
            n => panic!("impossible number of simultaneous checkers: {n}"),
        }
    }

    /// Return `true` if neither side retains enough material to ever deliver
    /// mate: bare kings, a lone minor piece, or same-colored lone bishops.
    pub fn insufficient_material(&self) -> bool {
        let heavy = self.pieces(PieceKind::Queen)
            | self.pieces(PieceKind::Rook)
            | self.pieces(PieceKind::Pawn);
        if heavy.is_nonempty() {
            return false;
        }

        let bishops = self.pieces(PieceKind::Bishop);
        let minors = bishops | self.pieces(PieceKind::Knight);
        let white_minors = minors & self.side(Color::White);
        let black_minors = minors & self.side(Color::Black);

        match (white_minors.count(), black_minors.count()) {
            (0, 0) => true,
            (1, 0) | (0, 1) => true,
            (1, 1) => {
                // Only the bishop pair on same-colored squares is dead; a
                // knight against any minor can still construct mates.
                if white_minors != (white_minors & bishops)
                    || black_minors != (black_minors & bishops)
                {
                    return false;
                }
                let both = white_minors | black_minors;
                (both & Bitboard::LIGHT_SQUARES) == both || (both & Bitboard::DARK_SQUARES) == both
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::chess_move::Move;
    use crate::color::Color;
    use crate::square::Square;

    fn mv(from: &str, to: &str) -> Move {
        Move::new(
            Square::from_algebraic(from).unwrap(),
            Square::from_algebraic(to).unwrap(),
        )
    }

    fn play(board: &mut Board, moves: &[&str]) {
        for pair in moves {
            let (from, to) = pair.split_at(2);
            board.make_move(mv(from, to)).unwrap();
        }
    }

    #[test]
    fn fools_mate() {
        let mut board = Board::starting_position();
        play(&mut board, &["f2f3", "e7e6", "g2g4"]);
        assert!(!board.is_checkmate());
        play(&mut board, &["d8h4"]);
        assert!(board.is_checkmate());
    }

    #[test]
    fn not_mate_when_a_piece_can_block() {
        // The queen checks from e4, but bishop or queen can interpose on e2.
        let mut board = Board::starting_position();
        play(
            &mut board,
            &["e2e4", "e7e6", "a2a3", "d8h4", "g1f3", "h4e4"],
        );
        assert!(board.in_check(Color::White));
        assert!(!board.is_checkmate());
    }

    #[test]
    fn not_mate_when_the_king_can_capture() {
        // Qxf2+ is met by Kxf2: the queen is undefended.
        let mut board = Board::starting_position();
        play(
            &mut board,
            &["e2e4", "e7e6", "a2a3", "d8h4", "g1f3", "h4f2"],
        );
        assert!(!board.is_checkmate());
    }

    #[test]
    fn not_mate_when_only_a_block_exists() {
        // A check where the sole defense is the bishop interposing.
        let mut board = Board::starting_position();
        play(
            &mut board,
            &["d2d4", "e7e6", "b1d2", "f8b4", "e2e4", "d8h4", "g1f3", "h4e4"],
        );
        assert!(!board.is_checkmate());
    }

    #[test]
    fn back_rank_mate() {
        // The pawns in front of the castled king seal every flight square.
        let mut board: Board = "6k1/5ppp/8/8/8/8/8/R3K3 w - -".parse().unwrap();
        play(&mut board, &["a1a8"]);
        assert!(board.is_checkmate());
    }

    #[test]
    fn double_check_forces_a_king_move() {
        // Rook on the e-file and knight on d3 both check the e1 king.
        let board: Board = "4k3/4r3/8/8/8/3n4/8/R3K3 w - -".parse().unwrap();
        assert!(board.in_check(Color::White));
        assert_eq!(board.checking_pieces().len(), 2);
        assert!(!board.is_checkmate(), "the king can flee to d1 or f1");
    }

    #[test]
    fn smothered_corner_is_mate() {
        // Classic smothered-mate shape: the knight checks from f7, the
        // king's own rook and pawns box it in, and nothing reaches f7.
        let board: Board = "6rk/5Npp/8/8/8/8/8/4K3 b - -".parse().unwrap();
        assert!(board.in_check(Color::Black));
        assert!(board.is_checkmate());
    }

    #[test]
    fn insufficient_material_cases() {
        // Bare kings.
        let board: Board = "4k3/8/8/8/8/8/8/4K3 w - -".parse().unwrap();
        assert!(board.insufficient_material());

        // King and bishop against a bare king.
        let board: Board = "4k3/8/8/8/8/8/8/2B1K3 w - -".parse().unwrap();
        assert!(board.insufficient_material());

        // King and knight against a bare king.
        let board: Board = "4k3/8/8/8/8/8/8/1N2K3 w - -".parse().unwrap();
        assert!(board.insufficient_material());

        // King and rook is mating material.
        let board: Board = "4k3/8/8/8/8/8/8/R3K3 w - -".parse().unwrap();
        assert!(!board.insufficient_material());

        // A single pawn can still promote.
        let board: Board = "4k3/8/8/8/8/8/4P3/4K3 w - -".parse().unwrap();
        assert!(!board.insufficient_material());

        // Same-colored bishops: c1 and f4 are both dark squares.
        let board: Board = "4k3/8/8/8/5b2/8/8/2B1K3 w - -".parse().unwrap();
        assert!(board.insufficient_material());

        // Opposite-colored bishops can still mate.
        let board: Board = "4k3/8/8/8/4b3/8/8/2B1K3 w - -".parse().unwrap();
        assert!(!board.insufficient_material());

        // Two minors on one side are enough to play on.
        let board: Board = "4k3/8/8/8/8/8/8/1NB1K3 w - -".parse().unwrap();
        assert!(!board.insufficient_material());
    }
}
