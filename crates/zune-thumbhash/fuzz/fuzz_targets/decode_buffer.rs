/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = zune_thumbhash::average_color(data);
    let _ = zune_thumbhash::aspect_ratio(data);

    let mut decoder = zune_thumbhash::ThumbHashDecoder::new(data);
    if let Ok(pixels) = decoder.decode() {
        let (w, h) = decoder.dimensions().unwrap();
        assert!(w <= 32 && h <= 32);
        assert_eq!(pixels.len(), w * h * 4);
    }
});
