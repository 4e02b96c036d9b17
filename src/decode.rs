//! Decoder pipeline
//!
//! Reverses the encoder: coefficient streams are cut into 64-value blocks,
//! un-zigzagged, dequantized, inverse transformed, laid back out into planes
//! and converted to RGB with clipping.

use log::{debug, trace};

use crate::block::{self, map_blocks, PaddingPolicy};
use crate::color::ycbcr_to_rgb;
use crate::consts::{DCTSIZE, DCTSIZE2};
use crate::dct;
use crate::encode::CompressedRepresentation;
use crate::error::Error;
use crate::quant::{self, QuantizationMatrix};
use crate::types::{Block, Channel, CoefficientStream, Image};
use crate::zigzag;
use crate::Result;

/// Rebuilds images from a [`CompressedRepresentation`]
#[derive(Clone, Debug)]
pub struct Decoder {
    parallel: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Spread block transforms over the rayon pool (needs the `parallel` feature)
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Decode a representation back into an RGB image of its declared shape.
    ///
    /// Every stream is validated before any block is transformed, so a bad
    /// representation fails without partial work.
    pub fn decode(&self, repr: &CompressedRepresentation) -> Result<Image> {
        let (height, width) = repr.shape();
        if height == 0 || width == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        if repr.padding == PaddingPolicy::Strict
            && (height % DCTSIZE != 0 || width % DCTSIZE != 0)
        {
            return Err(Error::ShapeMismatch {
                expected: block::padded_shape(height, width),
                actual: (height, width),
                reason: "declared shape is not a multiple of 8 and no padding was applied",
            });
        }

        // Rejects shapes whose padded planes cannot be addressed
        let per_plane = block::block_count(height, width)?;
        let (rows, cols) = block::block_grid(height, width);
        for (name, stream) in repr.channels() {
            if stream.len() % DCTSIZE2 != 0 {
                return Err(Error::FormatError {
                    channel: name,
                    len: stream.len(),
                });
            }
            if stream.block_count() != per_plane {
                return Err(Error::ShapeMismatch {
                    expected: (per_plane, 1),
                    actual: (stream.block_count(), 1),
                    reason: "coefficient stream block count does not match declared shape",
                });
            }
        }

        let planes = repr
            .channels()
            .map(|(name, stream)| self.decode_channel(name, stream, &repr.matrix, rows, cols));
        let [y, cb, cr] = planes;
        let (y, cb, cr) = (y?, cb?, cr?);

        let (y, cb, cr) = if (rows * DCTSIZE, cols * DCTSIZE) == (height, width) {
            (y, cb, cr)
        } else {
            (
                block::crop(&y, height, width)?,
                block::crop(&cb, height, width)?,
                block::crop(&cr, height, width)?,
            )
        };

        let image = ycbcr_to_rgb(&y, &cb, &cr)?;
        debug!(
            "decoded {}x{} image from {} blocks per plane",
            width,
            height,
            per_plane
        );
        Ok(image)
    }

    fn decode_channel(
        &self,
        name: &'static str,
        stream: &CoefficientStream,
        matrix: &QuantizationMatrix,
        rows: usize,
        cols: usize,
    ) -> Result<Channel> {
        let chunks: Vec<(usize, &[f64])> = stream.blocks().enumerate().collect();

        let blocks: Vec<Result<Block>> = map_blocks(&chunks, self.parallel, |&(i, chunk)| {
            let sequence: &[f64; DCTSIZE2] = chunk.try_into().map_err(|_| Error::FormatError {
                channel: name,
                len: chunk.len(),
            })?;
            let quantized = zigzag::inverse_scan_at(sequence, i / cols, i % cols);
            Ok(dct::inverse(&quant::dequantize(&quantized, matrix)))
        });
        let blocks = blocks.into_iter().collect::<Result<Vec<_>>>()?;
        trace!("{}: inverse transformed {} blocks", name, blocks.len());

        block::combine(&blocks, rows * DCTSIZE, cols * DCTSIZE)
    }
}

/// Decode with default settings.
pub fn decode(repr: &CompressedRepresentation) -> Result<Image> {
    Decoder::new().decode(repr)
}
