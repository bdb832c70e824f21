//! Error types: move rejection reasons, board validation, position text.

use thiserror::Error;

/// Why a proposed move was rejected.
///
/// Every variant is recoverable: the board is untouched and the caller may
/// simply propose another move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The source square holds no piece.
    #[error("there is no piece on the source square")]
    EmptySource,
    /// The destination holds a piece of the mover's own color.
    #[error("cannot capture a piece of the same color")]
    FriendlyCapture,
    /// The piece on the source square belongs to the side not on move.
    #[error("it is the other side's turn to move")]
    OutOfTurn,
    /// The destination is not reachable by that piece from that square.
    #[error("that piece does not move that way")]
    BadGeometry,
    /// A pawn capture was aimed at an empty, non-en-passant square.
    #[error("pawns may only capture diagonally onto an occupied square")]
    PawnCaptureEmpty,
    /// A pawn push was aimed at an occupied square.
    #[error("pawns may not push onto an occupied square")]
    PawnPushBlocked,
    /// Source and destination are the same square.
    #[error("source and destination are the same square")]
    NullMove,
    /// A piece stands between the source and the destination.
    #[error("another piece blocks the path")]
    PathBlocked,
    /// The move would leave or place the mover's own king in check.
    #[error("the move would leave the king in check")]
    SelfCheck,
    /// The castling right for that side has been lost.
    #[error("castling rights on that side have been lost")]
    CastleRightsLost,
    /// A piece stands between the king and the castling rook.
    #[error("cannot castle across an occupied square")]
    CastleBlocked,
    /// The king would pass through an attacked square while castling.
    #[error("cannot castle through check")]
    CastleThroughCheck,
    /// The king is in check and castling cannot answer it.
    #[error("cannot castle out of check")]
    CastleOutOfCheck,
    /// A pawn reached the back rank without naming a promotion piece.
    #[error("a pawn reaching the back rank must promote")]
    PromotionRequired,
    /// A promotion was requested for a piece that is not a pawn.
    #[error("only pawns may promote")]
    PromotionNotAPawn,
    /// A promotion was requested on a square short of the back rank.
    #[error("pawns may only promote on the back rank")]
    PromotionBadRank,
}

/// Structural defects found by [`Board::validate`](crate::Board::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount { color: &'static str, count: u32 },
    /// Pawns occupy the first or eighth rank.
    #[error("pawns found on a back rank")]
    PawnsOnBackRank,
    /// Two different piece kinds claim the same square.
    #[error("overlapping piece bitboards")]
    OverlappingPieces,
    /// The two side bitboards overlap.
    #[error("white and black side bitboards overlap")]
    InconsistentSides,
    /// The occupied bitboard does not equal the union of both sides.
    #[error("occupied bitboard is inconsistent with side bitboards")]
    InconsistentOccupied,
}

/// Errors from parsing a position string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    /// The string does not have 4 (or 6, with move counters) fields.
    #[error("expected 4 or 6 position fields, found {found}")]
    WrongFieldCount { found: usize },
    /// The piece placement does not describe exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },
    /// A placement rank describes more or fewer than 8 squares.
    #[error("rank {rank} of the placement describes {length} squares, expected 8")]
    BadRankLength { rank: usize, length: usize },
    /// An unrecognized character appeared in the piece placement.
    #[error("invalid piece character '{character}'")]
    InvalidPieceChar { character: char },
    /// The active color field is not "w" or "b".
    #[error("invalid active color \"{found}\"")]
    InvalidColor { found: String },
    /// An unrecognized character appeared in the castling field.
    #[error("invalid castling character '{character}'")]
    InvalidCastlingChar { character: char },
    /// The en passant field is not "-" or a valid algebraic square.
    #[error("invalid en passant square \"{found}\"")]
    InvalidEnPassant { found: String },
    /// A move counter field is not a number.
    #[error("invalid move counter \"{found}\"")]
    InvalidMoveCounter { found: String },
    /// The parsed position fails structural validation.
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
}
