//! # zentransform - JPEG-style transform core
//!
//! The lossy middle of a JPEG codec without the bitstream around it:
//! YCbCr color conversion, 8x8 block partitioning, the orthonormal 2D DCT,
//! quality-scaled quantization and zigzag coefficient ordering, plus the
//! exact inverse of each stage.
//!
//! ## Usage
//!
//! ```rust
//! use zentransform::{Encoder, Decoder, Image};
//! use rgb::RGB8;
//!
//! let image = Image::filled(16, 16, RGB8::new(200, 100, 50))?;
//!
//! let compressed = Encoder::new().quality(50).encode(&image)?;
//! println!("{} bytes -> {} bytes", image.byte_len(), compressed.byte_len());
//!
//! let decoded = Decoder::new().decode(&compressed)?;
//! assert_eq!(decoded.shape(), image.shape());
//! # Ok::<(), zentransform::Error>(())
//! ```
//!
//! ## What is and is not here
//!
//! - No entropy coding, Huffman tables, markers or container format. The
//!   [`CompressedRepresentation`] is an in-memory value.
//! - No chroma subsampling: all three planes use full resolution and share
//!   one quantization matrix.
//! - Dimensions must be multiples of 8 unless [`PaddingPolicy::EdgeReplicate`]
//!   is selected.
//!
//! Per-block work runs on the rayon thread pool when the `parallel` feature
//! (on by default) is enabled. Results are identical either way.

// Core modules
mod consts;
mod error;
mod types;

// Pipeline stages
pub mod block;
pub mod color;
pub mod dct;
pub mod quant;
pub mod zigzag;

// Orchestration
mod decode;
mod encode;

// Public API
pub use block::PaddingPolicy;
pub use consts::{DCTSIZE, DCTSIZE2, DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY, STD_LUMA_QUANT};
pub use decode::{decode, Decoder};
pub use encode::{encode, CompressedRepresentation, Encoder};
pub use error::Error;
pub use quant::QuantizationMatrix;
pub use types::{Block, Channel, CoefficientStream, Image};

/// Result type for zentransform operations
pub type Result<T> = std::result::Result<T, Error>;
