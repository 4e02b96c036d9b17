//! Constants and tables for the transform pipeline

/// DCT block dimension
pub const DCTSIZE: usize = 8;

/// DCT block size (8x8 = 64)
pub const DCTSIZE2: usize = 64;

/// Standard JPEG Annex K luminance quantization table
#[rustfmt::skip]
pub const STD_LUMA_QUANT: [u16; 64] = [
    16, 11, 10, 16,  24,  40,  51,  61,
    12, 12, 14, 19,  26,  58,  60,  55,
    14, 13, 16, 24,  40,  57,  69,  56,
    14, 17, 22, 29,  51,  87,  80,  62,
    18, 22, 37, 56,  68, 109, 103,  77,
    24, 35, 55, 64,  81, 104, 113,  92,
    49, 64, 78, 87, 103, 121, 120, 101,
    72, 92, 95, 98, 112, 100, 103,  99,
];

/// Quality range accepted by the matrix builder; inputs outside are clamped.
pub const MIN_QUALITY: i32 = 1;
pub const MAX_QUALITY: i32 = 100;

/// Default encoding quality
pub const DEFAULT_QUALITY: i32 = 50;
