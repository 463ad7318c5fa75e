/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Packed hash layout
//!
//! ```text
//! ╔═══════╤═══════════╤══════════════════════════════════════════════╗
//! ║ Bytes │ Bits      │ Description                                  ║
//! ╠═══════╪═══════════╪══════════════════════════════════════════════╣
//! ║ 0..3  │ 0..6      │ round(63 * l_dc)                             ║
//! ║       │ 6..12     │ round(31.5 + 31.5 * p_dc)                    ║
//! ║       │ 12..18    │ round(31.5 + 31.5 * q_dc)                    ║
//! ║       │ 18..23    │ round(31 * l_scale)                          ║
//! ║       │ 23        │ has_alpha                                    ║
//! ╟───────┼───────────┼──────────────────────────────────────────────╢
//! ║ 3..5  │ 0..3      │ ly if landscape, else lx                     ║
//! ║       │ 3..9      │ round(63 * p_scale)                          ║
//! ║       │ 9..15     │ round(63 * q_scale)                          ║
//! ║       │ 15        │ is_landscape                                 ║
//! ╟───────┼───────────┼──────────────────────────────────────────────╢
//! ║ 5     │ 0..4      │ round(15 * a_dc)     (only with alpha)       ║
//! ║       │ 4..8      │ round(15 * a_scale)  (only with alpha)       ║
//! ╟───────┼───────────┼──────────────────────────────────────────────╢
//! ║ rest  │ 4 each    │ AC terms of L, P, Q, (A), low nibble first   ║
//! ╚═══════╧═══════════╧══════════════════════════════════════════════╝
//! ```
//! Fields are packed LSB first. Nibbles run across channel boundaries
//! without padding, the only thing telling a reader how long the hash is
//! are the header fields.
use alloc::vec::Vec;

use crate::constants::{
    A_GRID, HEADER_SIZE, HEADER_SIZE_ALPHA, L_LIMIT, L_LIMIT_ALPHA, MIN_L_GRID, OUTPUT_DIMENSION,
    PQ_GRID
};
use crate::dct::{ac_count, EncodedChannel};
use crate::errors::ThumbHashDecodeErrors;

#[inline(always)]
fn quantize(value: f32, max: u32) -> u32 {
    (value.round() as u32).min(max)
}

/// Largest luminance frequency count a hash can carry along its long side
#[inline(always)]
pub(crate) const fn luma_limit(has_alpha: bool) -> usize {
    if has_alpha {
        L_LIMIT_ALPHA
    } else {
        L_LIMIT
    }
}

/// Number of header bytes for a hash
#[inline(always)]
pub(crate) const fn header_size(has_alpha: bool) -> usize {
    if has_alpha {
        HEADER_SIZE_ALPHA
    } else {
        HEADER_SIZE
    }
}

/// Number of AC nibbles stored for the given luminance grid
pub(crate) fn total_ac_count(l_nx: usize, l_ny: usize, has_alpha: bool) -> usize {
    let mut count = ac_count(l_nx, l_ny) + 2 * ac_count(PQ_GRID, PQ_GRID);

    if has_alpha {
        count += ac_count(A_GRID, A_GRID);
    }
    count
}

/// Write the 5 (or 6 with alpha) header bytes into `out`
///
/// `lx` and `ly` are the luminance frequency counts before they are raised
/// to the minimum grid size.
///
/// Returns the number of bytes written
#[allow(clippy::too_many_arguments)]
pub(crate) fn write_header(
    out: &mut [u8], l: &EncodedChannel, p: &EncodedChannel, q: &EncodedChannel,
    a: &EncodedChannel, has_alpha: bool, is_landscape: bool, lx: usize, ly: usize
) -> usize {
    let header24 = quantize(63.0 * l.dc, 63)
        | quantize(31.5 + 31.5 * p.dc, 63) << 6
        | quantize(31.5 + 31.5 * q.dc, 63) << 12
        | quantize(31.0 * l.scale, 31) << 18
        | u32::from(has_alpha) << 23;

    let l_count = if is_landscape { ly } else { lx };

    let header16 = (l_count as u32 & 7)
        | quantize(63.0 * p.scale, 63) << 3
        | quantize(63.0 * q.scale, 63) << 9
        | u32::from(is_landscape) << 15;

    out[0] = (header24 & 255) as u8;
    out[1] = ((header24 >> 8) & 255) as u8;
    out[2] = (header24 >> 16) as u8;
    out[3] = (header16 & 255) as u8;
    out[4] = (header16 >> 8) as u8;

    if has_alpha {
        out[5] = (quantize(15.0 * a.dc, 15) | quantize(15.0 * a.scale, 15) << 4) as u8;
        return HEADER_SIZE_ALPHA;
    }
    HEADER_SIZE
}

/// Writes normalized AC terms as 4-bit values, two per byte
pub(crate) struct NibbleWriter<'a> {
    out:   &'a mut [u8],
    start: usize,
    index: usize
}

impl<'a> NibbleWriter<'a> {
    /// Create a writer placing its first nibble at `out[start]`
    pub fn new(out: &'a mut [u8], start: usize) -> NibbleWriter<'a> {
        NibbleWriter {
            out,
            start,
            index: 0
        }
    }

    /// Append every term of a channel, continuing from where the previous channel ended
    ///
    /// The buffer must have room for every nibble, the encoder sizes
    /// it from the header before writing.
    pub fn write_channel(&mut self, ac: &[f32]) {
        for value in ac {
            let nibble = quantize(15.0 * value, 15) as u8;
            let position = self.start + (self.index >> 1);

            if self.index & 1 == 0 {
                self.out[position] = nibble;
            } else {
                self.out[position] |= nibble << 4;
            }
            self.index += 1;
        }
    }

    /// Total bytes used in the output, header included
    pub const fn bytes_written(&self) -> usize {
        self.start + (self.index + 1) / 2
    }
}

/// Reads AC terms back out of a hash, the inverse of [`NibbleWriter`]
pub(crate) struct NibbleReader<'a> {
    hash:  &'a [u8],
    start: usize,
    index: usize
}

impl<'a> NibbleReader<'a> {
    pub fn new(hash: &'a [u8], start: usize) -> NibbleReader<'a> {
        NibbleReader {
            hash,
            start,
            index: 0
        }
    }

    /// Read the AC terms for an `nx` by `ny` grid and map them to signed
    /// values in `-scale..=scale`
    ///
    /// Callers must have checked the hash holds every nibble the header describes.
    pub fn read_channel(&mut self, nx: usize, ny: usize, scale: f32) -> Vec<f32> {
        let count = ac_count(nx, ny);
        let mut ac = Vec::with_capacity(count);

        for _ in 0..count {
            let byte = self.hash[self.start + (self.index >> 1)];
            let nibble = (byte >> ((self.index & 1) << 2)) & 15;

            ac.push((f32::from(nibble) / 7.5 - 1.0) * scale);
            self.index += 1;
        }
        ac
    }
}

/// Header fields of a hash
///
/// This is a read-only view over the first 5 or 6 bytes, nothing here
/// needs the AC terms. Values are de-quantized but otherwise exactly as
/// stored, the chroma saturation boost applied when decoding is not included.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ThumbHashHeader {
    /// Average luminance, `0..=1`
    pub l_dc:         f32,
    /// Average yellow-blue, `-1..=1`
    pub p_dc:         f32,
    /// Average red-green, `-1..=1`
    pub q_dc:         f32,
    /// Largest luminance AC magnitude
    pub l_scale:      f32,
    /// Largest yellow-blue AC magnitude
    pub p_scale:      f32,
    /// Largest red-green AC magnitude
    pub q_scale:      f32,
    /// Average alpha, `1.0` when the hash has no alpha channel
    pub a_dc:         f32,
    /// Largest alpha AC magnitude, `1.0` when the hash has no alpha channel
    pub a_scale:      f32,
    pub has_alpha:    bool,
    /// Whether the source image was wider than it was tall
    pub is_landscape: bool,
    /// Luminance frequencies along x as stored
    pub lx:           usize,
    /// Luminance frequencies along y as stored
    pub ly:           usize
}

impl ThumbHashHeader {
    /// Parse header fields of a hash
    ///
    /// Only the header bytes are checked, use [`hash_length`](Self::hash_length)
    /// to confirm the AC terms are present.
    ///
    /// # Errors
    /// If the hash is shorter than 5 bytes, or shorter than 6 bytes
    /// when the alpha bit is set.
    pub fn parse(hash: &[u8]) -> Result<ThumbHashHeader, ThumbHashDecodeErrors> {
        if hash.len() < HEADER_SIZE {
            return Err(ThumbHashDecodeErrors::TooShortHash(HEADER_SIZE, hash.len()));
        }
        let header24 =
            u32::from(hash[0]) | u32::from(hash[1]) << 8 | u32::from(hash[2]) << 16;
        let header16 = u32::from(hash[3]) | u32::from(hash[4]) << 8;

        let has_alpha = (header24 >> 23) != 0;
        let is_landscape = (header16 >> 15) != 0;

        if has_alpha && hash.len() < HEADER_SIZE_ALPHA {
            return Err(ThumbHashDecodeErrors::TooShortHash(
                HEADER_SIZE_ALPHA,
                hash.len()
            ));
        }

        let l_limit = luma_limit(has_alpha);
        let l_count = (header16 & 7) as usize;

        let (lx, ly) = if is_landscape {
            (l_limit, l_count)
        } else {
            (l_count, l_limit)
        };
        let (a_dc, a_scale) = if has_alpha {
            (
                f32::from(hash[5] & 15) / 15.0,
                f32::from(hash[5] >> 4) / 15.0
            )
        } else {
            (1.0, 1.0)
        };

        Ok(ThumbHashHeader {
            l_dc: (header24 & 63) as f32 / 63.0,
            p_dc: ((header24 >> 6) & 63) as f32 / 31.5 - 1.0,
            q_dc: ((header24 >> 12) & 63) as f32 / 31.5 - 1.0,
            l_scale: ((header24 >> 18) & 31) as f32 / 31.0,
            p_scale: ((header16 >> 3) & 63) as f32 / 63.0,
            q_scale: ((header16 >> 9) & 63) as f32 / 63.0,
            a_dc,
            a_scale,
            has_alpha,
            is_landscape,
            lx,
            ly
        })
    }

    /// Number of header bytes, 5 or 6
    pub const fn header_size(&self) -> usize {
        header_size(self.has_alpha)
    }

    /// The luminance coefficient grid, never smaller than 3x3
    pub fn luma_grid(&self) -> (usize, usize) {
        (self.lx.max(MIN_L_GRID), self.ly.max(MIN_L_GRID))
    }

    /// Number of AC terms stored after the header
    pub fn ac_count(&self) -> usize {
        let (nx, ny) = self.luma_grid();
        total_ac_count(nx, ny, self.has_alpha)
    }

    /// Exact length in bytes of a hash with this header
    pub fn hash_length(&self) -> usize {
        self.header_size() + (self.ac_count() + 1) / 2
    }

    /// Approximate `width / height` of the source image
    pub fn aspect_ratio(&self) -> f32 {
        self.lx as f32 / self.ly as f32
    }

    /// Dimensions of the placeholder a decoder produces
    ///
    /// The longer side is always 32.
    pub fn dimensions(&self) -> (usize, usize) {
        let ratio = self.aspect_ratio();
        let side = OUTPUT_DIMENSION as f32;

        let (w, h) = if ratio > 1.0 {
            (side, (side / ratio).round())
        } else {
            ((side * ratio).round(), side)
        };
        // a zero field in a malformed hash would otherwise give an empty image
        (
            (w as usize).clamp(1, OUTPUT_DIMENSION),
            (h as usize).clamp(1, OUTPUT_DIMENSION)
        )
    }

    /// Average color as `[r, g, b, a]`, each in `0..=1`
    pub fn average_color(&self) -> [f32; 4] {
        let [r, g, b] = crate::color::lpq_to_rgb(self.l_dc, self.p_dc, self.q_dc);

        [
            r.clamp(0.0, 1.0),
            g.clamp(0.0, 1.0),
            b.clamp(0.0, 1.0),
            self.a_dc
        ]
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::bitpack::{write_header, NibbleReader, NibbleWriter, ThumbHashHeader};
    use crate::dct::EncodedChannel;
    use crate::errors::ThumbHashDecodeErrors;

    fn channel(dc: f32, scale: f32) -> EncodedChannel {
        EncodedChannel {
            dc,
            ac: Vec::new(),
            scale
        }
    }

    #[test]
    fn header_bits_land_where_expected() {
        let mut out = [0_u8; 6];
        let l = channel(1.0, 1.0);
        let p = channel(-1.0, 0.0);
        let q = channel(1.0, 1.0);

        let size = write_header(&mut out, &l, &p, &q, &EncodedChannel::opaque_alpha(), false, true, 7, 4);
        assert_eq!(size, 5);

        // l_dc = 63, p_dc = 0, q_dc = 63, l_scale = 31, no alpha
        let header24 = u32::from(out[0]) | u32::from(out[1]) << 8 | u32::from(out[2]) << 16;
        assert_eq!(header24 & 63, 63);
        assert_eq!((header24 >> 6) & 63, 0);
        assert_eq!((header24 >> 12) & 63, 63);
        assert_eq!((header24 >> 18) & 31, 31);
        assert_eq!(header24 >> 23, 0);

        // landscape stores ly
        let header16 = u32::from(out[3]) | u32::from(out[4]) << 8;
        assert_eq!(header16 & 7, 4);
        assert_eq!((header16 >> 3) & 63, 0);
        assert_eq!((header16 >> 9) & 63, 63);
        assert_eq!(header16 >> 15, 1);
    }

    #[test]
    fn header_parses_back() {
        let mut out = [0_u8; 6];
        let l = channel(40.0 / 63.0, 10.0 / 31.0);
        let p = channel(0.0, 20.0 / 63.0);
        let q = channel(-0.5, 30.0 / 63.0);
        let a = channel(0.6, 0.2);

        write_header(&mut out, &l, &p, &q, &a, true, false, 3, 5);
        let header = ThumbHashHeader::parse(&out).unwrap();

        assert!(header.has_alpha);
        assert!(!header.is_landscape);
        assert_eq!((header.lx, header.ly), (3, 5));
        assert!((header.l_dc - 40.0 / 63.0).abs() < 1e-6);
        assert!((header.p_dc - (32.0 / 31.5 - 1.0)).abs() < 1e-6);
        assert!((header.q_dc - (16.0 / 31.5 - 1.0)).abs() < 1e-6);
        assert!((header.l_scale - 10.0 / 31.0).abs() < 1e-6);
        assert!((header.p_scale - 20.0 / 63.0).abs() < 1e-6);
        assert!((header.q_scale - 30.0 / 63.0).abs() < 1e-6);
        assert!((header.a_dc - 9.0 / 15.0).abs() < 1e-6);
        assert!((header.a_scale - 3.0 / 15.0).abs() < 1e-6);
    }

    #[test]
    fn nibbles_cross_channel_boundaries() {
        let mut out = [0xAA_u8; 8];
        let mut writer = NibbleWriter::new(&mut out, 5);

        // three terms, the third shares a byte with the next channel
        writer.write_channel(&[0.0, 1.0, 0.4]);
        writer.write_channel(&[0.6]);
        assert_eq!(writer.bytes_written(), 7);

        assert_eq!(out[5], 0xF0);
        assert_eq!(out[6], 0x96);

        let mut reader = NibbleReader::new(&out, 5);
        let first = reader.read_channel(2, 2, 1.0);
        assert_eq!(first.len(), 2);
        assert_eq!(first, [-1.0, 1.0]);
    }

    #[test]
    fn alpha_bit_requires_sixth_byte() {
        let hash = [0, 0, 0x80, 0, 0];
        assert!(matches!(
            ThumbHashHeader::parse(&hash),
            Err(ThumbHashDecodeErrors::TooShortHash(6, 5))
        ));
    }

    #[test]
    fn four_bytes_are_rejected() {
        assert!(matches!(
            ThumbHashHeader::parse(&[1, 2, 3, 4]),
            Err(ThumbHashDecodeErrors::TooShortHash(5, 4))
        ));
    }

    #[test]
    fn dimensions_follow_aspect_ratio() {
        let mut header = ThumbHashHeader::parse(&[0, 0, 0, 7, 0]).unwrap();
        assert_eq!(header.dimensions(), (32, 32));

        header.lx = 3;
        assert_eq!(header.dimensions(), (14, 32));

        header.lx = 0;
        assert_eq!(header.dimensions(), (1, 32));

        header.is_landscape = true;
        header.lx = 7;
        header.ly = 4;
        assert_eq!(header.dimensions(), (32, 18));
    }
}
