//! Encoder pipeline
//!
//! RGB image -> YCbCr planes -> 8x8 blocks -> DCT -> quantization -> zigzag,
//! producing one coefficient stream per plane plus the matrix and shape the
//! decoder needs to undo it.

use log::{debug, trace};

use crate::block::{self, map_blocks, PaddingPolicy};
use crate::color::rgb_to_ycbcr;
use crate::consts::{DCTSIZE, DCTSIZE2, DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY};
use crate::dct;
use crate::error::Error;
use crate::quant::{self, QuantizationMatrix};
use crate::types::{Block, Channel, CoefficientStream, Image};
use crate::zigzag;
use crate::Result;

/// Everything the decoder needs to rebuild an image.
///
/// An in-memory value, not a byte format.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedRepresentation {
    pub y: CoefficientStream,
    pub cb: CoefficientStream,
    pub cr: CoefficientStream,
    /// Matrix used for all three planes
    pub matrix: QuantizationMatrix,
    /// Original image height, before any padding
    pub height: usize,
    /// Original image width, before any padding
    pub width: usize,
    /// Padding the encoder applied; tells the decoder how to size the block grid
    pub padding: PaddingPolicy,
}

impl CompressedRepresentation {
    /// (height, width) of the original image
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// The three streams with their plane names, in Y, Cb, Cr order.
    pub fn channels(&self) -> [(&'static str, &CoefficientStream); 3] {
        [("Y", &self.y), ("Cb", &self.cb), ("Cr", &self.cr)]
    }

    /// Total in-memory size of the three coefficient streams in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.channels().iter().map(|(_, s)| s.byte_len()).sum()
    }

    /// Coefficients left non-zero after quantization, across all planes.
    #[must_use]
    pub fn nonzero_coefficients(&self) -> usize {
        self.channels().iter().map(|(_, s)| s.nonzero_count()).sum()
    }
}

/// Transform-domain encoder with configurable quality
#[derive(Clone, Debug)]
pub struct Encoder {
    quality: i32,
    padding: PaddingPolicy,
    parallel: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Create a new encoder with default settings
    pub fn new() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            padding: PaddingPolicy::Strict,
            parallel: true,
        }
    }

    /// Set quality (1-100, out-of-range values are clamped)
    pub fn quality(mut self, quality: i32) -> Self {
        self.quality = quality;
        self
    }

    /// Set how dimensions that are not multiples of 8 are handled
    pub fn padding(mut self, padding: PaddingPolicy) -> Self {
        self.padding = padding;
        self
    }

    /// Spread block transforms over the rayon pool (needs the `parallel` feature)
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Encode an image into quantized, zigzag-ordered coefficients.
    pub fn encode(&self, image: &Image) -> Result<CompressedRepresentation> {
        let (height, width) = image.shape();
        if self.padding == PaddingPolicy::Strict
            && (height % DCTSIZE != 0 || width % DCTSIZE != 0)
        {
            return Err(Error::ShapeMismatch {
                expected: block::padded_shape(height, width),
                actual: (height, width),
                reason: "image dimensions must be multiples of 8 without padding",
            });
        }

        // Built once and shared by every block of every plane
        let matrix = QuantizationMatrix::from_quality(self.quality);

        let (y, cb, cr) = rgb_to_ycbcr(image);
        trace!("converted {}x{} image to YCbCr", width, height);

        let y = self.encode_channel(&y, &matrix)?;
        let cb = self.encode_channel(&cb, &matrix)?;
        let cr = self.encode_channel(&cr, &matrix)?;

        let repr = CompressedRepresentation {
            y,
            cb,
            cr,
            matrix,
            height,
            width,
            padding: self.padding,
        };

        debug!(
            "encoded {}x{} at quality {}: {} blocks per plane, {} of {} coefficients non-zero",
            width,
            height,
            self.quality.clamp(MIN_QUALITY, MAX_QUALITY),
            repr.y.block_count(),
            repr.nonzero_coefficients(),
            repr.y.len() * 3
        );

        Ok(repr)
    }

    fn encode_channel(&self, channel: &Channel, matrix: &QuantizationMatrix) -> Result<CoefficientStream> {
        let blocks = match self.padding {
            PaddingPolicy::Strict => block::split(channel)?,
            PaddingPolicy::EdgeReplicate => block::split(&block::pad_to_block_multiple(channel)?)?,
        };

        let sequences: Vec<[f64; DCTSIZE2]> = map_blocks(&blocks, self.parallel, |b: &Block| {
            zigzag::scan(&quant::quantize(&dct::forward(b), matrix))
        });
        trace!("transformed {} blocks", sequences.len());

        Ok(sequences.iter().flatten().copied().collect())
    }
}

/// Encode with default settings at the given quality.
pub fn encode(image: &Image, quality: i32) -> Result<CompressedRepresentation> {
    Encoder::new().quality(quality).encode(image)
}
