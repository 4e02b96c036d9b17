//! Core types for zentransform

use imgref::{ImgRef, ImgVec};
use rgb::RGB8;

use crate::consts::{DCTSIZE, DCTSIZE2};
use crate::error::Error;
use crate::Result;

/// `width * height`, or `InvalidDimensions` if it (or its byte size) overflows.
fn pixel_count(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .filter(|n| n.checked_mul(3).is_some())
        .ok_or(Error::InvalidDimensions { width, height })
}

/// An RGB image with 8-bit samples, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<RGB8>,
}

impl Image {
    /// Wrap a row-major pixel buffer of exactly `width * height` pixels.
    pub fn new(width: usize, height: usize, pixels: Vec<RGB8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let count = pixel_count(width, height)?;
        if pixels.len() != count {
            return Err(Error::InvalidPixelData {
                expected: count * 3,
                actual: pixels.len() * 3,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image from interleaved RGB bytes.
    pub fn from_rgb_bytes(rgb: &[u8], width: usize, height: usize) -> Result<Self> {
        let expected = pixel_count(width, height)? * 3;
        if rgb.len() != expected {
            return Err(Error::InvalidPixelData {
                expected,
                actual: rgb.len(),
            });
        }
        let pixels = rgb
            .chunks_exact(3)
            .map(|c| RGB8::new(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Image where every pixel has the same color.
    pub fn filled(width: usize, height: usize, color: RGB8) -> Result<Self> {
        let count = pixel_count(width, height)?;
        Self::new(width, height, vec![color; count])
    }

    /// Copy out of an `imgref` view, dropping any row padding (stride).
    pub fn from_imgref(img: ImgRef<'_, RGB8>) -> Result<Self> {
        let pixels = img.rows().flat_map(|row| row.iter().copied()).collect();
        Self::new(img.width(), img.height(), pixels)
    }

    /// Borrow the pixels as an `imgref` view.
    pub fn as_imgref(&self) -> ImgRef<'_, RGB8> {
        ImgRef::new(&self.pixels[..], self.width, self.height)
    }

    /// Convert into an owned `imgref` buffer.
    pub fn into_imgvec(self) -> ImgVec<RGB8> {
        ImgVec::new(self.pixels, self.width, self.height)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// (height, width)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    #[inline]
    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> RGB8 {
        self.pixels[y * self.width + x]
    }

    /// Interleaved RGB bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }

    /// Size of the raw pixel data in bytes (3 per pixel).
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.pixels.len() * 3
    }
}

/// A single plane of real-valued samples, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Channel {
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(Error::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(Error::InvalidPixelData {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Caller guarantees `data.len() == width * height`.
    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Panics if the plane cannot be allocated.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width.saturating_mul(height)],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// (height, width)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.width + col] = value;
    }

    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }
}

/// One 8x8 tile of a channel, tagged with its position in the block grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    /// Block row (row-band index, not a pixel row)
    pub row: usize,
    /// Block column (column-band index, not a pixel column)
    pub col: usize,
    /// Samples or coefficients in natural (row-major) order
    pub data: [f64; DCTSIZE2],
}

impl Block {
    pub fn new(row: usize, col: usize, data: [f64; DCTSIZE2]) -> Self {
        Self { row, col, data }
    }

    /// Block at grid position (0, 0) filled with one value.
    pub fn splat(value: f64) -> Self {
        Self::new(0, 0, [value; DCTSIZE2])
    }

    /// Same position, new contents.
    #[inline]
    pub fn with_data(&self, data: [f64; DCTSIZE2]) -> Self {
        Self::new(self.row, self.col, data)
    }

    #[inline]
    pub fn get(&self, y: usize, x: usize) -> f64 {
        self.data[y * DCTSIZE + x]
    }
}

/// Zigzag-ordered coefficients for one channel, 64 values per block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoefficientStream {
    values: Vec<f64>,
}

impl CoefficientStream {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of whole 64-value blocks; trailing partial data is ignored.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.values.len() / DCTSIZE2
    }

    /// Iterate over whole 64-value blocks.
    pub fn blocks(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(DCTSIZE2)
    }

    /// In-memory size of the coefficients in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.values.len() * std::mem::size_of::<f64>()
    }

    /// Coefficients that survived quantization.
    #[must_use]
    pub fn nonzero_count(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }
}

impl From<Vec<f64>> for CoefficientStream {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<f64> for CoefficientStream {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
