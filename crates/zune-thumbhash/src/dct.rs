/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Truncated 2D DCT-II over a single plane
//!
//! Only the low frequency corner of the `nx` by `ny` coefficient grid is kept,
//! a coefficient `(cx, cy)` survives while `cx * ny < nx * (ny - cy)`.
//! Coefficients are visited row by row (`cy` outer, `cx` inner), the first one
//! visited is always `(0, 0)`, the DC term.
//!
//! Encoder and decoder both walk the grid through [`TriangularScan`], the
//! packed format has no other way of telling which coefficient a nibble
//! belongs to.
use alloc::vec;
use alloc::vec::Vec;
use core::f32::consts::PI;

/// Largest grid dimension any channel can use
pub(crate) const MAX_GRID: usize = 7;

/// Iterator over the coefficient positions `(cx, cy)` kept for a grid
///
/// The first item is the DC term `(0, 0)`, use `.skip(1)` to visit only AC terms.
#[derive(Copy, Clone, Debug)]
pub(crate) struct TriangularScan {
    nx: usize,
    ny: usize,
    cx: usize,
    cy: usize
}

impl TriangularScan {
    pub const fn new(nx: usize, ny: usize) -> TriangularScan {
        TriangularScan { nx, ny, cx: 0, cy: 0 }
    }
}

impl Iterator for TriangularScan {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.cy < self.ny {
            if self.cx * self.ny < self.nx * (self.ny - self.cy) {
                let position = (self.cx, self.cy);
                self.cx += 1;
                return Some(position);
            }
            self.cy += 1;
            self.cx = 0;
        }
        None
    }
}

/// Number of coefficients kept for an `nx` by `ny` grid, DC included
pub(crate) fn coefficient_count(nx: usize, ny: usize) -> usize {
    TriangularScan::new(nx, ny).count()
}

/// Number of AC coefficients stored in a hash for an `nx` by `ny` grid
pub(crate) fn ac_count(nx: usize, ny: usize) -> usize {
    coefficient_count(nx, ny).saturating_sub(1)
}

/// Position of the `index`-th coefficient in scan order,
/// index zero is the DC term
#[cfg(test)]
pub(crate) fn nth_coefficient(nx: usize, ny: usize, index: usize) -> Option<(usize, usize)> {
    TriangularScan::new(nx, ny).nth(index)
}

/// Result of transforming a single plane
#[derive(Clone, Debug, Default)]
pub(crate) struct EncodedChannel {
    pub dc:    f32,
    /// AC terms in scan order, normalized to `0..=1` when `scale > 0`
    pub ac:    Vec<f32>,
    /// Largest absolute AC term before normalization
    pub scale: f32
}

impl EncodedChannel {
    /// The channel stored for images without transparency
    pub fn opaque_alpha() -> EncodedChannel {
        EncodedChannel {
            dc:    1.0,
            ac:    Vec::new(),
            scale: 1.0
        }
    }
}

/// Forward transform of a `width` by `height` plane keeping the
/// triangular corner of an `nx` by `ny` coefficient grid
pub(crate) fn encode_channel(
    plane: &[f32], width: usize, height: usize, nx: usize, ny: usize
) -> EncodedChannel {
    let mut channel = EncodedChannel {
        dc:    0.0,
        ac:    Vec::with_capacity(ac_count(nx, ny)),
        scale: 0.0
    };
    let mut fx = vec![0.0_f32; width];

    for (cx, cy) in TriangularScan::new(nx, ny) {
        for (x, v) in fx.iter_mut().enumerate() {
            *v = (PI / width as f32 * cx as f32 * (x as f32 + 0.5)).cos();
        }
        let mut f = 0.0_f32;

        for (y, row) in plane.chunks_exact(width).take(height).enumerate() {
            let fy = (PI / height as f32 * cy as f32 * (y as f32 + 0.5)).cos();

            for (sample, basis) in row.iter().zip(fx.iter()) {
                f += sample * basis * fy;
            }
        }
        f /= (width * height) as f32;

        if cx > 0 || cy > 0 {
            channel.ac.push(f);
            channel.scale = channel.scale.max(f.abs());
        } else {
            channel.dc = f;
        }
    }
    if channel.scale > 0.0 {
        for ac in channel.ac.iter_mut() {
            *ac = 0.5 + 0.5 / channel.scale * *ac;
        }
    }
    channel
}

/// Cosine basis values for one sample position, indexed by frequency
pub(crate) type CosineTable = [f32; MAX_GRID];

/// Fill the basis values of sample `position` along an axis of length `size`
/// for the first `frequencies` frequencies
pub(crate) fn cosine_table(size: usize, position: usize, frequencies: usize) -> CosineTable {
    let mut table = [0.0; MAX_GRID];

    for (freq, v) in table.iter_mut().enumerate().take(frequencies) {
        *v = (PI / size as f32 * (position as f32 + 0.5) * freq as f32).cos();
    }
    table
}

/// Inverse transform contribution of the AC terms at one sample.
///
/// `ac` holds signed, de-quantized terms in scan order. The DC term is not
/// included, callers add it themselves.
#[inline]
pub(crate) fn accumulate_ac(
    ac: &[f32], nx: usize, ny: usize, fx: &CosineTable, fy: &CosineTable
) -> f32 {
    let mut value = 0.0;

    for ((cx, cy), coefficient) in TriangularScan::new(nx, ny).skip(1).zip(ac) {
        value += coefficient * fx[cx] * (fy[cy] * 2.0);
    }
    value
}
