//! Zigzag scan order
//!
//! Walks the anti-diagonals `d = row + col` of an 8x8 block from the DC
//! corner to the bottom-right. Even diagonals run bottom-left to top-right
//! (row decreasing), odd diagonals run top-right to bottom-left (row
//! increasing). The walk is computed once at compile time and shared by
//! both directions, so scan and inverse scan are exact inverses.

use crate::consts::{DCTSIZE, DCTSIZE2};
use crate::types::Block;

/// Maps zigzag position to natural (row-major) position.
///
/// `natural_pos = ZIGZAG_ORDER[zigzag_pos]`
pub const ZIGZAG_ORDER: [usize; DCTSIZE2] = zigzag_order();

/// Maps natural (row-major) position to zigzag position.
///
/// Inverse of [`ZIGZAG_ORDER`].
pub const NATURAL_TO_ZIGZAG: [usize; DCTSIZE2] = {
    let mut table = [0usize; DCTSIZE2];
    let mut i = 0;
    while i < DCTSIZE2 {
        table[ZIGZAG_ORDER[i]] = i;
        i += 1;
    }
    table
};

const fn zigzag_order() -> [usize; DCTSIZE2] {
    let last = DCTSIZE - 1;
    let mut order = [0usize; DCTSIZE2];
    let mut k = 0;
    let mut d = 0;
    while d <= 2 * last {
        let lo = if d > last { d - last } else { 0 };
        let hi = if d < last { d } else { last };
        if d % 2 == 0 {
            let mut row = hi + 1;
            while row > lo {
                row -= 1;
                order[k] = row * DCTSIZE + (d - row);
                k += 1;
            }
        } else {
            let mut row = lo;
            while row <= hi {
                order[k] = row * DCTSIZE + (d - row);
                k += 1;
                row += 1;
            }
        }
        d += 1;
    }
    order
}

/// Reorder a natural-order block into zigzag order.
pub fn scan_block(natural: &[f64; DCTSIZE2]) -> [f64; DCTSIZE2] {
    let mut out = [0.0f64; DCTSIZE2];
    for (dst, &src) in out.iter_mut().zip(ZIGZAG_ORDER.iter()) {
        *dst = natural[src];
    }
    out
}

/// Place a zigzag-order sequence back into natural order.
pub fn unscan_block(zigzag: &[f64; DCTSIZE2]) -> [f64; DCTSIZE2] {
    let mut out = [0.0f64; DCTSIZE2];
    for (&src, &dst) in zigzag.iter().zip(ZIGZAG_ORDER.iter()) {
        out[dst] = src;
    }
    out
}

#[inline]
pub fn scan(block: &Block) -> [f64; DCTSIZE2] {
    scan_block(&block.data)
}

/// Rebuild a block at grid position (0, 0); use [`Block::with_data`] or
/// [`inverse_scan_at`] to place it elsewhere.
#[inline]
pub fn inverse_scan(sequence: &[f64; DCTSIZE2]) -> Block {
    inverse_scan_at(sequence, 0, 0)
}

#[inline]
pub fn inverse_scan_at(sequence: &[f64; DCTSIZE2], row: usize, col: usize) -> Block {
    Block::new(row, col, unscan_block(sequence))
}
