//! Quantization matrix construction and application
//!
//! The matrix is derived from the standard JPEG luminance table scaled by
//! a 1-100 quality value, and applied elementwise to DCT coefficient blocks.
//! This is the only lossy stage of the pipeline.

use log::debug;

use crate::consts::{DCTSIZE, DCTSIZE2, MAX_QUALITY, MIN_QUALITY, STD_LUMA_QUANT};
use crate::error::Error;
use crate::types::Block;
use crate::zigzag::ZIGZAG_ORDER;
use crate::Result;

/// 8x8 table of positive divisors in natural (row-major) order.
///
/// Every entry is at least 1, so quantization never divides by zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizationMatrix {
    values: [u16; DCTSIZE2],
}

impl QuantizationMatrix {
    /// Use a caller-supplied table.
    pub fn new(values: [u16; DCTSIZE2]) -> Result<Self> {
        if let Some(position) = values.iter().position(|&v| v == 0) {
            return Err(Error::DegenerateQuantization { position });
        }
        Ok(Self { values })
    }

    /// Standard luminance table scaled for `quality` (clamped to 1..=100).
    pub fn from_quality(quality: i32) -> Self {
        Self::from_base_table(&STD_LUMA_QUANT, quality)
    }

    /// Scale a base quantization table by quality factor
    ///
    /// Uses the IJG scaling curve, `5000 / q` below 50 and `200 - 2q` above,
    /// with `(base * scale + 50) / 100` rounded half to even. Entries that
    /// round to zero (every entry at quality 100) are raised to 1.
    pub fn from_base_table(base: &[u16; DCTSIZE2], quality: i32) -> Self {
        let quality = quality.clamp(MIN_QUALITY, MAX_QUALITY);

        let scale = if quality < 50 {
            5000.0 / quality as f64
        } else {
            (200 - 2 * quality) as f64
        };

        let mut values = [0u16; DCTSIZE2];
        let mut degenerate = 0usize;
        for (out, &b) in values.iter_mut().zip(base) {
            let val = ((b as f64 * scale + 50.0) / 100.0).round_ties_even();
            if val < 1.0 {
                degenerate += 1;
            }
            *out = val.clamp(1.0, u16::MAX as f64) as u16;
        }

        if degenerate > 0 {
            debug!(
                "quality {} produced {} zero divisors, clamped to 1",
                quality, degenerate
            );
        }

        Self { values }
    }

    /// Quantization values in natural order
    #[inline]
    pub fn values(&self) -> &[u16; DCTSIZE2] {
        &self.values
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.values[row * DCTSIZE + col]
    }

    /// Get quantization value at zigzag position
    #[inline]
    pub fn at_zigzag(&self, pos: usize) -> u16 {
        self.values[ZIGZAG_ORDER[pos]]
    }
}

/// Build the quantization matrix for a quality setting.
#[inline]
pub fn build(quality: i32) -> QuantizationMatrix {
    QuantizationMatrix::from_quality(quality)
}

/// Divide each coefficient by its table entry and round to the nearest integer.
pub fn quantize_block(coeffs: &[f64; DCTSIZE2], matrix: &QuantizationMatrix) -> [f64; DCTSIZE2] {
    let mut output = [0.0f64; DCTSIZE2];
    for ((out, &c), &q) in output.iter_mut().zip(coeffs).zip(matrix.values()) {
        *out = (c / q as f64).round();
    }
    output
}

/// Multiply each quantized value by its table entry.
pub fn dequantize_block(quantized: &[f64; DCTSIZE2], matrix: &QuantizationMatrix) -> [f64; DCTSIZE2] {
    let mut output = [0.0f64; DCTSIZE2];
    for ((out, &v), &q) in output.iter_mut().zip(quantized).zip(matrix.values()) {
        *out = v * q as f64;
    }
    output
}

#[inline]
pub fn quantize(coeffs: &Block, matrix: &QuantizationMatrix) -> Block {
    coeffs.with_data(quantize_block(&coeffs.data, matrix))
}

#[inline]
pub fn dequantize(quantized: &Block, matrix: &QuantizationMatrix) -> Block {
    quantized.with_data(dequantize_block(&quantized.data, matrix))
}
