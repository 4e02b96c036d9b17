//! Roundtrip encoding/decoding tests for zentransform

mod common;

use common::{
    calculate_psnr, create_gradient_image, create_noise_image, create_uniform_image, max_abs_diff,
    mean_abs_diff,
};
use zentransform::{decode, encode, Decoder, Encoder, Error, PaddingPolicy};

#[test]
fn test_roundtrip_single_color_q50() {
    let img = create_uniform_image(16, 16, 200, 100, 50);

    let repr = encode(&img, 50).unwrap();
    let decoded = decode(&repr).unwrap();

    assert_eq!(decoded.shape(), (16, 16));
    let diff = max_abs_diff(&img, &decoded);
    assert!(diff <= 2, "max diff {} > 2", diff);
}

#[test]
fn test_roundtrip_gradient_q90() {
    let img = create_gradient_image(64, 64);
    let decoded = decode(&encode(&img, 90).unwrap()).unwrap();

    let psnr = calculate_psnr(&img, &decoded);
    assert!(psnr > 30.0, "PSNR {:.2} dB too low", psnr);
}

#[test]
fn test_lower_quality_loses_more() {
    let img = create_gradient_image(64, 48);

    let hi = encode(&img, 90).unwrap();
    let lo = encode(&img, 10).unwrap();
    assert!(
        lo.nonzero_coefficients() < hi.nonzero_coefficients(),
        "q10 kept {} coefficients, q90 kept {}",
        lo.nonzero_coefficients(),
        hi.nonzero_coefficients()
    );

    let err_hi = mean_abs_diff(&img, &decode(&hi).unwrap());
    let err_lo = mean_abs_diff(&img, &decode(&lo).unwrap());
    assert!(err_lo > err_hi, "q10 error {} <= q90 error {}", err_lo, err_hi);
}

#[test]
fn test_q100_is_near_lossless() {
    let img = create_noise_image(32, 32, 7);
    let decoded = decode(&encode(&img, 100).unwrap()).unwrap();

    assert!(max_abs_diff(&img, &decoded) <= 5);
    assert!(mean_abs_diff(&img, &decoded) < 1.0);
}

#[test]
fn test_invalid_shape_rejected() {
    let img = create_uniform_image(10, 10, 1, 2, 3);
    match encode(&img, 50) {
        Err(Error::ShapeMismatch { actual, .. }) => assert_eq!(actual, (10, 10)),
        other => panic!("expected ShapeMismatch, got {:?}", other),
    }
}

#[test]
fn test_edge_replicate_roundtrip() {
    let img = create_uniform_image(10, 13, 40, 180, 220);
    let repr = Encoder::new()
        .quality(75)
        .padding(PaddingPolicy::EdgeReplicate)
        .encode(&img)
        .unwrap();
    // 2 x 2 blocks after padding to 16x16
    assert_eq!(repr.y.block_count(), 4);

    let decoded = decode(&repr).unwrap();
    assert_eq!(decoded.shape(), (13, 10));
    assert!(max_abs_diff(&img, &decoded) <= 2);
}

#[test]
fn test_parallel_matches_sequential() {
    let img = create_noise_image(48, 40, 1234);

    let seq = Encoder::new().quality(60).parallel(false).encode(&img).unwrap();
    let par = Encoder::new().quality(60).parallel(true).encode(&img).unwrap();
    assert_eq!(seq, par);

    let a = Decoder::new().parallel(false).decode(&seq).unwrap();
    let b = Decoder::new().parallel(true).decode(&par).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_size_queries() {
    let img = create_gradient_image(32, 16);
    let repr = encode(&img, 50).unwrap();

    assert_eq!(img.byte_len(), 32 * 16 * 3);
    // 8 blocks per plane, 64 f64 coefficients each
    assert_eq!(repr.y.byte_len(), 8 * 64 * 8);
    assert_eq!(repr.byte_len(), 3 * 8 * 64 * 8);
    assert!(repr.nonzero_coefficients() <= 3 * 8 * 64);
}

#[test]
fn test_out_of_range_quality_clamped() {
    let img = create_gradient_image(16, 16);
    assert_eq!(encode(&img, 0).unwrap(), encode(&img, 1).unwrap());
    assert_eq!(encode(&img, 500).unwrap(), encode(&img, 100).unwrap());
}
