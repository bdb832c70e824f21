//! Precomputed movement and attack geometry, built once at compile time.

use crate::bitboard::Bitboard;

/// (rank, file) steps indexed like [`Direction`](super::Direction): clockwise
/// from North.
pub(crate) const DIRECTION_STEPS: [(i8, i8); 8] = [
    (1, 0),   // North
    (1, 1),   // NorthEast
    (0, 1),   // East
    (-1, 1),  // SouthEast
    (-1, 0),  // South
    (-1, -1), // SouthWest
    (0, -1),  // West
    (1, -1),  // NorthWest
];

/// Build a leaper table: for each square, the squares reached by the deltas.
const fn leaper_table(deltas: [(i8, i8); 8]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut bits = 0u64;
        let mut d = 0usize;
        while d < 8 {
            let r = rank + deltas[d].0;
            let f = file + deltas[d].1;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                bits |= 1u64 << (r as usize * 8 + f as usize);
            }
            d += 1;
        }
        table[sq] = Bitboard::new(bits);
        sq += 1;
    }
    table
}

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

/// Attack squares of a pawn of each color: the two forward diagonals, with
/// file-edge wrapping masked off.
const fn pawn_attack_tables() -> [[Bitboard; 64]; 2] {
    const FILE_A_BITS: u64 = 0x0101_0101_0101_0101;
    const FILE_H_BITS: u64 = 0x8080_8080_8080_8080;

    let mut table = [[Bitboard::EMPTY; 64]; 2];
    let mut sq = 0usize;
    while sq < 64 {
        let bit = 1u64 << sq;
        // White attacks north; a pawn on the A file has no north-west attack
        // (it would wrap to the H file) and symmetrically for H.
        let white = ((bit & !FILE_A_BITS) << 7) | ((bit & !FILE_H_BITS) << 9);
        let black = ((bit & !FILE_H_BITS) >> 7) | ((bit & !FILE_A_BITS) >> 9);
        table[0][sq] = Bitboard::new(white);
        table[1][sq] = Bitboard::new(black);
        sq += 1;
    }
    table
}

/// Quiet-move squares of a pawn of each color: the single push, plus the
/// double push from the starting rank.
const fn pawn_push_tables() -> [[Bitboard; 64]; 2] {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    let mut sq = 0usize;
    while sq < 64 {
        let mut white = 0u64;
        if sq < 56 {
            white |= 1u64 << (sq + 8);
            if sq / 8 == 1 {
                white |= 1u64 << (sq + 16);
            }
        }
        let mut black = 0u64;
        if sq >= 8 {
            black |= 1u64 << (sq - 8);
            if sq / 8 == 6 {
                black |= 1u64 << (sq - 16);
            }
        }
        table[0][sq] = Bitboard::new(white);
        table[1][sq] = Bitboard::new(black);
        sq += 1;
    }
    table
}

/// King quiet-move squares: the adjacent ring, plus the two-file castle
/// destinations from each king's home square. The castle destinations are
/// part of the move geometry only; the attack table stays the plain ring.
const fn king_move_table() -> [Bitboard; 64] {
    let mut table = leaper_table(DIRECTION_STEPS);
    // e1 -> c1 / g1, e8 -> c8 / g8
    table[4] = Bitboard::new(table[4].inner() | (1u64 << 2) | (1u64 << 6));
    table[60] = Bitboard::new(table[60].inner() | (1u64 << 58) | (1u64 << 62));
    table
}

/// For each direction and square, every square along that direction up to the
/// board edge (the source square excluded).
const fn ray_tables() -> [[Bitboard; 64]; 8] {
    let mut table = [[Bitboard::EMPTY; 64]; 8];
    let mut d = 0usize;
    while d < 8 {
        let (dr, df) = DIRECTION_STEPS[d];
        let mut sq = 0usize;
        while sq < 64 {
            let mut bits = 0u64;
            let mut r = (sq / 8) as i8 + dr;
            let mut f = (sq % 8) as i8 + df;
            while r >= 0 && r < 8 && f >= 0 && f < 8 {
                bits |= 1u64 << (r as usize * 8 + f as usize);
                r += dr;
                f += df;
            }
            table[d][sq] = Bitboard::new(bits);
            sq += 1;
        }
        d += 1;
    }
    table
}

/// Squares strictly between two squares sharing a rank, file, or diagonal;
/// empty for unaligned pairs.
const fn between_tables() -> [[Bitboard; 64]; 64] {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let mut from = 0usize;
    while from < 64 {
        let mut to = 0usize;
        while to < 64 {
            let dr = (to / 8) as i8 - (from / 8) as i8;
            let df = (to % 8) as i8 - (from % 8) as i8;
            let aligned = from != to && (dr == 0 || df == 0 || dr == df || dr == -df);
            if aligned {
                let step_r = if dr > 0 { 1 } else if dr < 0 { -1 } else { 0 };
                let step_f = if df > 0 { 1 } else if df < 0 { -1 } else { 0 };
                let mut bits = 0u64;
                let mut r = (from / 8) as i8 + step_r;
                let mut f = (from % 8) as i8 + step_f;
                while r as usize * 8 + f as usize != to {
                    bits |= 1u64 << (r as usize * 8 + f as usize);
                    r += step_r;
                    f += step_f;
                }
                table[from][to] = Bitboard::new(bits);
            }
            to += 1;
        }
        from += 1;
    }
    table
}

/// Union of the four orthogonal rays per square: the rook's maximal reach.
const fn rook_mask_table() -> [Bitboard; 64] {
    let rays = ray_tables();
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        table[sq] = Bitboard::new(
            rays[0][sq].inner() | rays[2][sq].inner() | rays[4][sq].inner() | rays[6][sq].inner(),
        );
        sq += 1;
    }
    table
}

/// Union of the four diagonal rays per square: the bishop's maximal reach.
const fn bishop_mask_table() -> [Bitboard; 64] {
    let rays = ray_tables();
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        table[sq] = Bitboard::new(
            rays[1][sq].inner() | rays[3][sq].inner() | rays[5][sq].inner() | rays[7][sq].inner(),
        );
        sq += 1;
    }
    table
}

pub(crate) static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(KNIGHT_DELTAS);
pub(crate) static KING_ATTACKS: [Bitboard; 64] = leaper_table(DIRECTION_STEPS);
pub(crate) static KING_MOVES: [Bitboard; 64] = king_move_table();
pub(crate) static PAWN_ATTACKS: [[Bitboard; 64]; 2] = pawn_attack_tables();
pub(crate) static PAWN_PUSHES: [[Bitboard; 64]; 2] = pawn_push_tables();
pub(crate) static RAYS: [[Bitboard; 64]; 8] = ray_tables();
pub(crate) static BETWEEN: [[Bitboard; 64]; 64] = between_tables();
pub(crate) static ROOK_MASKS: [Bitboard; 64] = rook_mask_table();
pub(crate) static BISHOP_MASKS: [Bitboard; 64] = bishop_mask_table();
