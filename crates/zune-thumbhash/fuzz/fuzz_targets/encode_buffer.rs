/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![no_main]

use libfuzzer_sys::fuzz_target;
use zune_core::colorspace::ColorSpace;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    // first two bytes pick the dimensions, the rest are repeated to fill the pixels
    let width = usize::from(data[0] % 100) + 1;
    let height = usize::from(data[1] % 100) + 1;
    let pixels: Vec<u8> = data[2..].iter().copied().cycle().take(width * height * 4).collect();

    let encoder = zune_thumbhash::ThumbHashEncoder::new(&pixels, width, height, ColorSpace::RGBA);

    let hash = encoder.encode().unwrap();

    assert!((5..=25).contains(&hash.len()));
    assert!(zune_thumbhash::probe_thumbhash(&hash));
    zune_thumbhash::ThumbHashDecoder::new(&hash).decode().unwrap();
});
