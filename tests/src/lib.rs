/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::{Path, PathBuf};

use serde::Deserialize;

mod thumbhash;

/// Synthetic images the fixtures are generated from
#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Generator {
    Quadrants,
    Gradient,
    AlphaRing
}

impl Generator {
    /// Produce `width * height` RGBA pixels
    pub fn generate(self, width: usize, height: usize) -> Vec<u8> {
        match self {
            Self::Quadrants => quadrants(),
            Self::Gradient => gradient(width, height),
            Self::AlphaRing => alpha_ring(width, height)
        }
    }
}

#[derive(Clone, Deserialize, Debug)]
pub struct TestEntry {
    pub name:      String,
    pub generator: Generator,
    pub width:     usize,
    pub height:    usize,
    /// Leading header bytes, absent where they sit on a rounding boundary
    pub header:    Option<Vec<u8>>,
    pub length:    usize,
    pub comment:   Option<String>
}

pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests")
}

/// Red, green, blue and yellow pixels of a 2x2 image
pub fn quadrants() -> Vec<u8> {
    vec![
        255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 0, 255,
    ]
}

/// Opaque ramps, red along x, green along y and a blue pattern
pub fn gradient(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);

    for y in 0..height {
        for x in 0..width {
            pixels.push(((x * 255) / (width - 1).max(1)) as u8);
            pixels.push(((y * 200) / (height - 1).max(1) + 20) as u8);
            pixels.push((40 + ((x * y) * 97) % 150) as u8);
            pixels.push(255);
        }
    }
    pixels
}

/// A mostly opaque disc over a nearly transparent background
pub fn alpha_ring(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    let radius = (width.min(height) as i64 - 1).pow(2);

    for y in 0..height {
        for x in 0..width {
            let dx = 2 * x as i64 - width as i64 + 1;
            let dy = 2 * y as i64 - height as i64 + 1;
            let inside = dx * dx + dy * dy <= radius;

            pixels.push((32 + (x * 191) / (width - 1).max(1)) as u8);
            pixels.push((200 - (y * 150) / (height - 1).max(1)) as u8);
            pixels.push(90);
            pixels.push(if inside { 230 } else { 17 });
        }
    }
    pixels
}
