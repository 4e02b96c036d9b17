//! Common test utilities for zentransform tests.
//!
//! Synthetic image generators and pixel-difference metrics.
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rgb::RGB8;
use zentransform::Image;

/// Create a simple gradient test image
pub fn create_gradient_image(width: usize, height: usize) -> Image {
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width) as u8;
            let g = (y * 255 / height) as u8;
            let b = ((x + y) * 255 / (width + height)) as u8;
            pixels.push(RGB8::new(r, g, b));
        }
    }
    Image::new(width, height, pixels).unwrap()
}

/// Create a uniform color test image
pub fn create_uniform_image(width: usize, height: usize, r: u8, g: u8, b: u8) -> Image {
    Image::filled(width, height, RGB8::new(r, g, b)).unwrap()
}

/// Uniform random pixels from a fixed seed
pub fn create_noise_image(width: usize, height: usize, seed: u64) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    let pixels = (0..width * height)
        .map(|_| RGB8::new(rng.gen(), rng.gen(), rng.gen()))
        .collect();
    Image::new(width, height, pixels).unwrap()
}

/// Largest per-sample difference between two images of equal shape
pub fn max_abs_diff(a: &Image, b: &Image) -> u8 {
    assert_eq!(a.shape(), b.shape());
    a.to_rgb_bytes()
        .iter()
        .zip(b.to_rgb_bytes())
        .map(|(&x, y)| x.abs_diff(y))
        .max()
        .unwrap_or(0)
}

pub fn mean_abs_diff(a: &Image, b: &Image) -> f64 {
    assert_eq!(a.shape(), b.shape());
    let a = a.to_rgb_bytes();
    let b = b.to_rgb_bytes();
    let total: u64 = a.iter().zip(&b).map(|(&x, &y)| x.abs_diff(y) as u64).sum();
    total as f64 / a.len() as f64
}

pub fn calculate_psnr(original: &Image, decoded: &Image) -> f64 {
    let a = original.to_rgb_bytes();
    let b = decoded.to_rgb_bytes();
    let mse: f64 = a
        .iter()
        .zip(&b)
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum::<f64>()
        / a.len() as f64;
    if mse == 0.0 {
        f64::INFINITY
    } else {
        10.0 * (255.0 * 255.0 / mse).log10()
    }
}
