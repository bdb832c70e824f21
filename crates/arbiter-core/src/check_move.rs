//! Move legality: the ordered rule battery.

use crate::attacks::{attack_mask, between, move_mask};
use crate::board::Board;
use crate::castle_rights::CastleSide;
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::MoveError;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

impl Board {
    /// Check a proposed move against the full rule set without applying it.
    ///
    /// The checks run in a fixed order and the first failure wins, so the
    /// returned reason is deterministic for a given position and move. The
    /// board is never mutated; the self-check and castling probes work on
    /// speculative copies.
    pub fn check_move(&self, mv: Move) -> Result<(), MoveError> {
        let Some(mover) = self.piece_on(mv.from) else {
            return Err(MoveError::EmptySource);
        };
        let target = self.piece_on(mv.to);

        if let Some(target) = target
            && target.color() == mover.color()
        {
            return Err(MoveError::FriendlyCapture);
        }

        if mover.color() != self.side_to_move() {
            return Err(MoveError::OutOfTurn);
        }

        let moves = move_mask(mover, mv.from);
        let attacks = attack_mask(mover, mv.from);
        if !(moves | attacks).contains(mv.to) {
            return Err(MoveError::BadGeometry);
        }

        if mover.kind() == PieceKind::Pawn {
            // Diagonals only capture (the en passant phantom counts as a
            // target); pushes only land on empty squares.
            if attacks.contains(mv.to) && target.is_none() {
                return Err(MoveError::PawnCaptureEmpty);
            }
            if moves.contains(mv.to) && target.is_some() {
                return Err(MoveError::PawnPushBlocked);
            }
        }

        if mv.from == mv.to {
            return Err(MoveError::NullMove);
        }

        if mover.kind() != PieceKind::Knight
            && (between(mv.from, mv.to) & self.occupied()).is_nonempty()
        {
            return Err(MoveError::PathBlocked);
        }

        // Speculatively apply and verify the mover's own king survives. This
        // covers pinned pieces and king steps into attacked squares alike.
        let mut probe = self.clone();
        probe.apply_unchecked(mv);
        if probe.in_check(mover.color()) {
            return Err(MoveError::SelfCheck);
        }

        if mover.kind() == PieceKind::King
            && mv.from.file().index().abs_diff(mv.to.file().index()) == 2
        {
            self.check_castle(mover.color(), mv.from, mv.to)?;
        }

        let back_rank = Rank::promotion_rank(mover.color());
        match mv.promotion {
            None => {
                if mover.kind() == PieceKind::Pawn && mv.to.rank() == back_rank {
                    return Err(MoveError::PromotionRequired);
                }
            }
            Some(_) => {
                if mover.kind() != PieceKind::Pawn {
                    return Err(MoveError::PromotionNotAPawn);
                }
                if mv.to.rank() != back_rank {
                    return Err(MoveError::PromotionBadRank);
                }
            }
        }

        Ok(())
    }

    /// The castling-specific preconditions, on top of the generic checks.
    fn check_castle(&self, color: Color, from: Square, to: Square) -> Result<(), MoveError> {
        let side = if to.file() > from.file() {
            CastleSide::KingSide
        } else {
            CastleSide::QueenSide
        };

        if !self.castling().has(color, side) {
            return Err(MoveError::CastleRightsLost);
        }

        // The whole corridor to the rook must be clear; for the queenside
        // that includes the b-file square the king never crosses.
        let rook_home = match (color, side) {
            (Color::White, CastleSide::KingSide) => Square::H1,
            (Color::White, CastleSide::QueenSide) => Square::A1,
            (Color::Black, CastleSide::KingSide) => Square::H8,
            (Color::Black, CastleSide::QueenSide) => Square::A8,
        };
        if (between(from, rook_home) & self.occupied()).is_nonempty() {
            return Err(MoveError::CastleBlocked);
        }

        // The king may not cross an attacked square...
        let crossed = between(from, to)
            .lsb()
            .expect("a two-file king move has a crossed square");
        let mut probe = self.clone();
        probe.apply_unchecked(Move::new(from, crossed));
        if probe.in_check(color) {
            return Err(MoveError::CastleThroughCheck);
        }

        // ...and may not castle while checked.
        if self.in_check(color) {
            return Err(MoveError::CastleOutOfCheck);
        }

        Ok(())
    }
}
