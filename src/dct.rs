//! 8x8 Discrete Cosine Transform
//!
//! Orthonormal DCT-II (forward) and DCT-III (inverse), computed separably:
//! a 1D pass over rows followed by a 1D pass over columns. With orthonormal
//! scaling the inverse is the transpose of the forward basis, so
//! `inverse(forward(b))` reproduces `b` up to floating-point error.
//!
//! Input is not level-shifted: a flat block of 128 has DC = 1024.

use std::sync::OnceLock;

use crate::consts::{DCTSIZE, DCTSIZE2};
use crate::types::Block;

/// `BASIS[u][x] = c(u) * cos((2x + 1) * u * PI / 16)`,
/// with `c(0) = sqrt(1/8)` and `c(u > 0) = sqrt(2/8)`.
static BASIS: OnceLock<[[f64; DCTSIZE]; DCTSIZE]> = OnceLock::new();

fn basis() -> &'static [[f64; DCTSIZE]; DCTSIZE] {
    BASIS.get_or_init(|| {
        let mut table = [[0.0f64; DCTSIZE]; DCTSIZE];
        for (u, row) in table.iter_mut().enumerate() {
            let scale = if u == 0 {
                (1.0 / DCTSIZE as f64).sqrt()
            } else {
                (2.0 / DCTSIZE as f64).sqrt()
            };
            for (x, entry) in row.iter_mut().enumerate() {
                let angle = (2 * x + 1) as f64 * u as f64 * std::f64::consts::PI / 16.0;
                *entry = scale * angle.cos();
            }
        }
        table
    })
}

/// Forward 8x8 DCT on samples in natural (row-major) order.
pub fn forward_dct_8x8(samples: &[f64; DCTSIZE2]) -> [f64; DCTSIZE2] {
    let c = basis();

    // Rows: temp[y][u] = sum_x c[u][x] * s[y][x]
    let mut temp = [0.0f64; DCTSIZE2];
    for y in 0..DCTSIZE {
        let row = &samples[y * DCTSIZE..(y + 1) * DCTSIZE];
        for u in 0..DCTSIZE {
            temp[y * DCTSIZE + u] = (0..DCTSIZE).map(|x| c[u][x] * row[x]).sum();
        }
    }

    // Columns: out[v][u] = sum_y c[v][y] * temp[y][u]
    let mut output = [0.0f64; DCTSIZE2];
    for u in 0..DCTSIZE {
        for v in 0..DCTSIZE {
            output[v * DCTSIZE + u] = (0..DCTSIZE).map(|y| c[v][y] * temp[y * DCTSIZE + u]).sum();
        }
    }

    output
}

/// Inverse 8x8 DCT, coefficients in natural (row-major) order.
pub fn inverse_dct_8x8(coeffs: &[f64; DCTSIZE2]) -> [f64; DCTSIZE2] {
    let c = basis();

    // Columns: temp[y][u] = sum_v c[v][y] * F[v][u]
    let mut temp = [0.0f64; DCTSIZE2];
    for u in 0..DCTSIZE {
        for y in 0..DCTSIZE {
            temp[y * DCTSIZE + u] = (0..DCTSIZE).map(|v| c[v][y] * coeffs[v * DCTSIZE + u]).sum();
        }
    }

    // Rows: out[y][x] = sum_u c[u][x] * temp[y][u]
    let mut output = [0.0f64; DCTSIZE2];
    for y in 0..DCTSIZE {
        for x in 0..DCTSIZE {
            output[y * DCTSIZE + x] = (0..DCTSIZE).map(|u| c[u][x] * temp[y * DCTSIZE + u]).sum();
        }
    }

    output
}

/// DCT-II of a spatial block; the result keeps the block's grid position.
#[inline]
pub fn forward(block: &Block) -> Block {
    block.with_data(forward_dct_8x8(&block.data))
}

/// DCT-III of a coefficient block.
#[inline]
pub fn inverse(coeffs: &Block) -> Block {
    coeffs.with_data(inverse_dct_8x8(&coeffs.data))
}
