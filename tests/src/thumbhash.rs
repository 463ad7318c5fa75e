/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::read;

use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_thumbhash::{probe_thumbhash, ThumbHashDecoder, ThumbHashEncoder};

use crate::{alpha_ring, fixture_path, gradient, quadrants, TestEntry};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|x| format!("{x:02x}")).collect()
}

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_thumbhash() {
    let file = fixture_path().join("thumbhash.json");

    let json_file = read(file).unwrap();

    let entries: Vec<TestEntry> = serde_json::from_slice(&json_file).unwrap();

    let mut error = false;
    let mut failed = Vec::new();

    for entry in &entries {
        let pixels = entry.generator.generate(entry.width, entry.height);

        let encoder = ThumbHashEncoder::new(&pixels, entry.width, entry.height, ColorSpace::RGBA);
        let hash = encoder.encode().unwrap();

        let header_matches = match &entry.header {
            Some(header) => hash.starts_with(header),
            None => true
        };

        if !header_matches || hash.len() != entry.length {
            error = true;
            failed.push(entry.to_owned());

            let err = format!(
                "Hash mismatch for {}\nExpected header {} and length {} but found {} ({} bytes)\nConfig:{:#?}",
                entry.name,
                hex(entry.header.as_deref().unwrap_or_default()),
                entry.length,
                hex(&hash),
                hash.len(),
                entry
            );
            eprintln!("{}\n", err);
        }
    }
    if error {
        panic!("Errors found during test encoding\n {:#?}", failed);
    }
}

#[test]
fn quadrants_header_bits() {
    let pixels = quadrants();
    let hash = ThumbHashEncoder::new(&pixels, 2, 2, ColorSpace::RGBA)
        .encode()
        .unwrap();

    assert_eq!(hash.len(), 24);
    // no alpha flag
    assert_eq!(hash[2] & 0x80, 0);
    // square input is not landscape
    assert_eq!(hash[4] & 0x80, 0);

    let mut decoder = ThumbHashDecoder::new(&hash);
    let rgba = decoder.decode().unwrap();

    assert_eq!(decoder.dimensions(), Some((32, 32)));
    assert_eq!(rgba.len(), 32 * 32 * 4);
    assert!(rgba.chunks_exact(4).all(|x| x[3] == 255));
}

#[test]
fn hash_length_stays_in_bounds() {
    // every size in the allowed range, sampled
    let sizes: Vec<usize> = (1..=100).step_by(9).chain([2, 99, 100]).collect();

    for &width in &sizes {
        for &height in &sizes {
            for (pixels, alpha) in [
                (gradient(width, height), false),
                (alpha_ring(width, height), true)
            ] {
                let encoder = ThumbHashEncoder::new(&pixels, width, height, ColorSpace::RGBA);
                let hash = encoder.encode().unwrap();

                assert!(
                    (5..=25).contains(&hash.len()),
                    "{width}x{height} gave {} bytes",
                    hash.len()
                );
                assert!(hash.len() <= encoder.max_size());
                assert!(probe_thumbhash(&hash));

                assert_eq!(hash[2] & 0x80 != 0, alpha, "{width}x{height}");
            }
        }
    }
}

#[test]
fn decoded_size_follows_aspect_ratio() {
    for (width, height) in [(100, 25), (25, 100), (64, 48), (1, 100), (100, 1), (7, 7)] {
        let pixels = gradient(width, height);
        let hash = ThumbHashEncoder::new(&pixels, width, height, ColorSpace::RGBA)
            .encode()
            .unwrap();

        let options = DecoderOptions::default().set_strict_mode(true);
        let mut decoder = ThumbHashDecoder::new_with_options(&hash, options);
        let rgba = decoder.decode().unwrap();
        let (w, h) = decoder.dimensions().unwrap();

        assert_eq!(w.max(h), 32, "{width}x{height}");
        assert!(w >= 1 && h >= 1);
        assert_eq!(rgba.len(), w * h * 4);
        assert_eq!(width >= height, w >= h, "{width}x{height} decoded to {w}x{h}");
    }
}

#[test]
fn opaque_fixtures_decode_opaque() {
    let pixels = gradient(40, 30);
    let hash = ThumbHashEncoder::new(&pixels, 40, 30, ColorSpace::RGBA)
        .encode()
        .unwrap();
    let rgba = ThumbHashDecoder::new(&hash).decode().unwrap();

    assert!(rgba.chunks_exact(4).all(|x| x[3] == 255));
}

#[test]
fn translucent_fixtures_keep_translucency() {
    let pixels = alpha_ring(40, 40);
    let hash = ThumbHashEncoder::new(&pixels, 40, 40, ColorSpace::RGBA)
        .encode()
        .unwrap();

    assert_ne!(hash[2] & 0x80, 0);

    let rgba = ThumbHashDecoder::new(&hash).decode().unwrap();
    let corner = rgba[3];
    let center = rgba[(16 * 32 + 16) * 4 + 3];

    assert!(corner < center, "corner {corner} center {center}");
}
