/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Largest width or height the encoder accepts
pub const MAX_INPUT_DIMENSION: usize = 100;

/// Header length for hashes without an alpha channel (24 + 16 bits)
pub const HEADER_SIZE: usize = 5;
/// Header length for hashes with the extra alpha byte
pub const HEADER_SIZE_ALPHA: usize = 6;

/// Largest possible hash, reached by 5x5 luma + alpha
pub const MAX_HASH_SIZE: usize = 25;

/// Longest side of a decoded placeholder
pub const OUTPUT_DIMENSION: usize = 32;

/// Luminance grid limits, alpha images trade luma detail for the alpha channel
pub const L_LIMIT: usize = 7;
pub const L_LIMIT_ALPHA: usize = 5;

/// Chroma channels (P and Q) always use a 3x3 grid
pub const PQ_GRID: usize = 3;
/// Alpha channel always uses a 5x5 grid
pub const A_GRID: usize = 5;
/// Smallest grid the luminance channel is transformed with
pub const MIN_L_GRID: usize = 3;

/// Chroma scales are boosted on decode to make up for
/// saturation lost during quantization
pub const PQ_SATURATION_BOOST: f32 = 1.25;
