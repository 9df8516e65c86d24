//! Pre-computed attack tables.
//!
//! Leapers (knight, king, pawn) use per-square tables. Sliders use ray tables
//! and stop at the first occupied square along each ray.

use crate::bitboard::Bitboard;
use crate::types::Color;

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Ray directions as (file, rank) steps, indexed by ray number.
/// 0=N, 1=NE, 2=E, 3=SE, 4=S, 5=SW, 6=W, 7=NW. Rays 0..=2 and 7 run
/// toward higher squares.
const RAY_DELTAS: [(i8, i8); 8] = KING_DELTAS;

const ORTHOGONAL_RAYS: [usize; 4] = [0, 2, 4, 6];
const DIAGONAL_RAYS: [usize; 4] = [1, 3, 5, 7];

const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let f = file + deltas[i].0;
            let r = rank + deltas[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                bits |= 1u64 << (r * 8 + f) as u32;
            }
            i += 1;
        }
        table[sq] = Bitboard(bits);
        sq += 1;
    }
    table
}

pub static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_DELTAS);

pub static KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_DELTAS);

/// Squares a pawn of each colour attacks, indexed by [color][square].
pub static PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&[(-1, 1), (1, 1)]),
    leaper_table(&[(-1, -1), (1, -1)]),
];

/// RAYS[direction][square]: every square in that direction, excluding the
/// origin.
pub static RAYS: [[Bitboard; 64]; 8] = {
    let mut rays = [[Bitboard::EMPTY; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (df, dr) = RAY_DELTAS[dir];
        let mut sq = 0;
        while sq < 64 {
            let mut f = (sq % 8) as i8 + df;
            let mut r = (sq / 8) as i8 + dr;
            let mut bits = 0u64;
            while f >= 0 && f < 8 && r >= 0 && r < 8 {
                bits |= 1u64 << (r * 8 + f) as u32;
                f += df;
                r += dr;
            }
            rays[dir][sq] = Bitboard(bits);
            sq += 1;
        }
        dir += 1;
    }
    rays
};

#[inline(always)]
pub fn pawn_attacks(sq: u8, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.idx()][sq as usize]
}

#[inline(always)]
pub fn knight_attacks(sq: u8) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

#[inline(always)]
pub fn king_attacks(sq: u8) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

/// Ray from `sq` in `dir`, cut after the first blocker (blocker included).
#[inline]
fn ray_attacks(sq: u8, dir: usize, occupied: Bitboard) -> Bitboard {
    let ray = RAYS[dir][sq as usize];
    let blockers = ray & occupied;
    // Rays pointing to higher squares meet their nearest blocker at the LSB.
    let nearest = if dir <= 2 || dir == 7 {
        blockers.lsb()
    } else {
        blockers.msb()
    };
    match nearest {
        Some(b) => ray & !RAYS[dir][b as usize],
        None => ray,
    }
}

#[inline]
pub fn bishop_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    DIAGONAL_RAYS
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray_attacks(sq, dir, occupied))
}

#[inline]
pub fn rook_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    ORTHOGONAL_RAYS
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray_attacks(sq, dir, occupied))
}

#[inline]
pub fn queen_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
