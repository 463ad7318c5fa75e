/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Encoding and decoding ThumbHash image placeholders
//!
//! [Reference](https://evanw.github.io/thumbhash/)
//!
//! A thumbhash is a 5 to 25 byte summary of a small image, enough to
//! reconstruct a blurry 32 pixel placeholder together with the average
//! color and aspect ratio of the original while the real image loads.
//!
//! The image is converted to a luminance, yellow-blue, red-green and alpha
//! representation, each plane is compressed with a truncated DCT and the
//! coefficients are quantized to 4 bits each.
//!
//! # Features
//! - Decoding and encoding
//! - Byte exact with hashes produced by other implementations
//! - Fuzz tested
//!
//! # Example
//! ```
//! use zune_core::colorspace::ColorSpace;
//! use zune_thumbhash::{average_color, ThumbHashDecoder, ThumbHashEncoder};
//!
//! let pixels = [128_u8; 16 * 9 * 3];
//! let hash = ThumbHashEncoder::new(&pixels, 16, 9, ColorSpace::RGB).encode().unwrap();
//!
//! let [r, g, b, a] = average_color(&hash).unwrap();
//! assert!((r - 0.5).abs() < 0.05 && (g - 0.5).abs() < 0.05 && (b - 0.5).abs() < 0.05);
//! assert_eq!(a, 1.0);
//!
//! let placeholder = ThumbHashDecoder::new(&hash).decode().unwrap();
//! ```
//!
//! # Note
//! The crate needs the platform `cos` and `round` routines, it doesn't
//! support `no_std`.
#![forbid(unsafe_code)]
#![macro_use]
extern crate alloc;
extern crate core;

pub use bitpack::ThumbHashHeader;
pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use zune_core;

mod bitpack;
mod color;
mod constants;
mod dct;
mod decoder;
mod encoder;
mod errors;
