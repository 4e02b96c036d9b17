//! Encode a PNG through the transform pipeline and report sizes.
//!
//! Usage: cargo run --example compress_report -- <input.png> [quality] [output.png]
//!
//! Set RUST_LOG=debug to see per-stage pipeline logging.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

use zentransform::{Decoder, Encoder, Image, PaddingPolicy};

fn load_png(path: &str) -> Result<Image, Box<dyn Error>> {
    let mut decoder = png::Decoder::new(File::open(path)?);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];

    let rgb: Vec<u8> = match info.color_type {
        png::ColorType::Rgb => data.to_vec(),
        png::ColorType::Rgba => data.chunks_exact(4).flat_map(|p| [p[0], p[1], p[2]]).collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&v| [v, v, v]).collect(),
        png::ColorType::GrayscaleAlpha => data.chunks_exact(2).flat_map(|p| [p[0], p[0], p[0]]).collect(),
        other => return Err(format!("unsupported PNG color type {:?}", other).into()),
    };

    Ok(Image::from_rgb_bytes(&rgb, info.width as usize, info.height as usize)?)
}

fn save_png(path: &str, image: &Image) -> Result<(), Box<dyn Error>> {
    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(writer, image.width() as u32, image.height() as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.to_rgb_bytes())?;
    Ok(())
}

fn calculate_psnr(original: &[u8], decoded: &[u8]) -> f64 {
    let mse: f64 = original
        .iter()
        .zip(decoded)
        .map(|(&a, &b)| {
            let d = a as f64 - b as f64;
            d * d
        })
        .sum::<f64>()
        / original.len() as f64;
    if mse == 0.0 {
        f64::INFINITY
    } else {
        10.0 * (255.0 * 255.0 / mse).log10()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: {} <input.png> [quality] [output.png]", args[0]);
        std::process::exit(2);
    }
    let quality: i32 = match args.get(2) {
        Some(q) => q.parse()?,
        None => 50,
    };

    let original = load_png(&args[1])?;

    let compressed = Encoder::new()
        .quality(quality)
        .padding(PaddingPolicy::EdgeReplicate)
        .encode(&original)?;
    let decoded = Decoder::new().decode(&compressed)?;

    println!("Original image size: {} bytes", original.byte_len());
    println!("Compressed data size: {} bytes", compressed.byte_len());
    println!("Decoded image size: {} bytes", decoded.byte_len());
    println!(
        "Non-zero coefficients: {} of {}",
        compressed.nonzero_coefficients(),
        compressed.y.len() * 3
    );
    println!(
        "PSNR: {:.2} dB",
        calculate_psnr(&original.to_rgb_bytes(), &decoded.to_rgb_bytes())
    );

    if let Some(out) = args.get(3) {
        save_png(out, &decoded)?;
        println!("Wrote {}", out);
    }

    Ok(())
}
