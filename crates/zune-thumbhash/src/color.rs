/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Conversion between straight RGBA8 and the planar LPQA representation
//!
//! - `l`: luminance, `(r+g+b)/3`
//! - `p`: yellow-blue, `(r+g)/2 - b`
//! - `q`: red-green, `r - g`
//! - `a`: alpha in `0..=1`
use alloc::vec;
use alloc::vec::Vec;

use zune_core::colorspace::ColorSpace;

/// Colorspaces the encoder can expand into RGBA
pub(crate) const SUPPORTED_COLORSPACES: [ColorSpace; 6] = [
    ColorSpace::RGBA,
    ColorSpace::RGB,
    ColorSpace::BGRA,
    ColorSpace::BGR,
    ColorSpace::Luma,
    ColorSpace::LumaA
];

/// Four equally sized planes produced from an image
pub(crate) struct LpqaPlanes {
    pub l:         Vec<f32>,
    pub p:         Vec<f32>,
    pub q:         Vec<f32>,
    pub a:         Vec<f32>,
    /// True if at least one pixel is not fully opaque
    pub has_alpha: bool
}

/// Convert straight (not premultiplied) RGBA8 pixels into LPQA planes.
///
/// Every pixel is composited over the alpha weighted average color of the
/// image. The alpha factor is applied once when averaging and once again
/// when compositing, hashes produced elsewhere depend on this.
pub(crate) fn rgba_to_lpqa(rgba: &[u8]) -> LpqaPlanes {
    let pixel_count = rgba.len() / 4;

    let mut avg_r = 0.0_f32;
    let mut avg_g = 0.0_f32;
    let mut avg_b = 0.0_f32;
    let mut avg_a = 0.0_f32;

    for pixel in rgba.chunks_exact(4) {
        let alpha = f32::from(pixel[3]) / 255.0;

        avg_r += alpha / 255.0 * f32::from(pixel[0]);
        avg_g += alpha / 255.0 * f32::from(pixel[1]);
        avg_b += alpha / 255.0 * f32::from(pixel[2]);
        avg_a += alpha;
    }
    if avg_a > 0.0 {
        avg_r /= avg_a;
        avg_g /= avg_a;
        avg_b /= avg_a;
    }

    let has_alpha = avg_a < pixel_count as f32;

    let mut l = vec![0.0; pixel_count];
    let mut p = vec![0.0; pixel_count];
    let mut q = vec![0.0; pixel_count];
    let mut a = vec![0.0; pixel_count];

    for (i, pixel) in rgba.chunks_exact(4).enumerate() {
        let alpha = f32::from(pixel[3]) / 255.0;

        let r = avg_r * (1.0 - alpha) + alpha / 255.0 * f32::from(pixel[0]);
        let g = avg_g * (1.0 - alpha) + alpha / 255.0 * f32::from(pixel[1]);
        let b = avg_b * (1.0 - alpha) + alpha / 255.0 * f32::from(pixel[2]);

        l[i] = (r + g + b) / 3.0;
        p[i] = (r + g) / 2.0 - b;
        q[i] = r - g;
        a[i] = alpha;
    }

    LpqaPlanes {
        l,
        p,
        q,
        a,
        has_alpha
    }
}

/// Inverse of the plane construction, returns unclamped `[r, g, b]`
#[inline(always)]
pub(crate) fn lpq_to_rgb(l: f32, p: f32, q: f32) -> [f32; 3] {
    let b = l - 2.0 / 3.0 * p;
    let r = (3.0 * l - b + q) / 2.0;
    let g = r - q;

    [r, g, b]
}

/// Clamp a normalized sample to `0..=1` and scale it to a byte.
///
/// The cast truncates.
#[inline(always)]
pub(crate) fn unit_to_u8(value: f32) -> u8 {
    (255.0 * value.min(1.0)).max(0.0) as u8
}

/// Expand 8-bit pixels of a supported colorspace into straight RGBA.
///
/// The caller must ensure `colorspace` is one of [`SUPPORTED_COLORSPACES`]
/// and that `data` holds whole pixels.
pub(crate) fn expand_to_rgba(data: &[u8], colorspace: ColorSpace) -> Vec<u8> {
    let components = colorspace.num_components();
    let mut out = Vec::with_capacity(data.len() / components * 4);

    for pix in data.chunks_exact(components) {
        let expanded = match colorspace {
            ColorSpace::RGB => [pix[0], pix[1], pix[2], 255],
            ColorSpace::BGRA => [pix[2], pix[1], pix[0], pix[3]],
            ColorSpace::BGR => [pix[2], pix[1], pix[0], 255],
            ColorSpace::Luma => [pix[0], pix[0], pix[0], 255],
            ColorSpace::LumaA => [pix[0], pix[0], pix[0], pix[1]],
            _ => [pix[0], pix[1], pix[2], pix[3]]
        };
        out.extend_from_slice(&expanded);
    }
    out
}
