/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use zune_core::colorspace::ColorSpace;
use zune_core::log::trace;

use crate::bitpack::{header_size, luma_limit, total_ac_count, write_header, NibbleWriter};
use crate::color::{expand_to_rgba, rgba_to_lpqa, SUPPORTED_COLORSPACES};
use crate::constants::{
    A_GRID, HEADER_SIZE, MAX_HASH_SIZE, MAX_INPUT_DIMENSION, MIN_L_GRID, PQ_GRID
};
use crate::dct::{encode_channel, EncodedChannel};
use crate::errors::ThumbHashEncodeErrors;

/// A ThumbHash encoder
///
/// Compresses an image of at most 100 by 100 pixels into a hash of 5 to 25 bytes.
/// Larger images should be downscaled first, the hash cannot carry more detail
/// than a 100x100 image anyway.
///
/// # Example
/// - Encode a 100 by 75 RGBA image
///
/// ```
/// use zune_core::colorspace::ColorSpace;
/// use zune_thumbhash::ThumbHashEncoder;
/// use zune_thumbhash::ThumbHashEncodeErrors;
///
/// const W:usize=100;
/// const H:usize=75;
///
/// fn main()->Result<(), ThumbHashEncodeErrors>{
///     let pixels = std::array::from_fn::<u8,{W * H * 4},_>(|i| (i%256) as u8);
///     let encoder = ThumbHashEncoder::new(&pixels,W,H,ColorSpace::RGBA);
///     let hash = encoder.encode()?;
///     assert!(hash.len() <= 25);
///     Ok(())
///}
/// ```
pub struct ThumbHashEncoder<'a> {
    // raw pixels, in any of the supported colorspaces
    pixel_data: &'a [u8],
    width:      usize,
    height:     usize,
    colorspace: ColorSpace
}

impl<'a> ThumbHashEncoder<'a> {
    /// Create a new encoder which will encode the pixels
    ///
    /// # Arguments
    /// - data: Pixel data, 8 bits per sample, not premultiplied,
    ///   size must be equal to `width*height*colorspace channels`
    /// - width, height: Image dimensions, each between 1 and 100
    /// - colorspace: One of `RGBA`, `RGB`, `BGRA`, `BGR`, `Luma` or `LumaA`
    pub const fn new(
        data: &'a [u8], width: usize, height: usize, colorspace: ColorSpace
    ) -> ThumbHashEncoder<'a> {
        ThumbHashEncoder {
            pixel_data: data,
            width,
            height,
            colorspace
        }
    }

    /// Return the maximum size for which the encoder can safely
    /// encode the image without fearing for an out of space error
    pub const fn max_size(&self) -> usize {
        MAX_HASH_SIZE
    }

    fn check_input(&self) -> Result<(), ThumbHashEncodeErrors> {
        if !(1..=MAX_INPUT_DIMENSION).contains(&self.width) {
            return Err(ThumbHashEncodeErrors::InvalidDimensions(
                "width",
                self.width
            ));
        }
        if !(1..=MAX_INPUT_DIMENSION).contains(&self.height) {
            return Err(ThumbHashEncodeErrors::InvalidDimensions(
                "height",
                self.height
            ));
        }
        if !SUPPORTED_COLORSPACES.contains(&self.colorspace) {
            return Err(ThumbHashEncodeErrors::UnsupportedColorspace(
                self.colorspace,
                &SUPPORTED_COLORSPACES
            ));
        }
        let expected_len = self.width * self.height * self.colorspace.num_components();

        if self.pixel_data.len() != expected_len {
            return Err(ThumbHashEncodeErrors::InvalidInputLength(
                expected_len,
                self.pixel_data.len()
            ));
        }
        Ok(())
    }

    /// Luminance frequencies along each axis, proportional to the image sides
    fn luma_frequencies(&self, has_alpha: bool) -> (usize, usize) {
        let l_limit = luma_limit(has_alpha) as f32;
        let longest = self.width.max(self.height) as f32;

        let lx = (l_limit * self.width as f32 / longest).round() as usize;
        let ly = (l_limit * self.height as f32 / longest).round() as usize;

        (lx.max(1), ly.max(1))
    }

    /// Bytes a hash of this image takes
    fn hash_length(&self, has_alpha: bool) -> usize {
        let (lx, ly) = self.luma_frequencies(has_alpha);
        let ac = total_ac_count(lx.max(MIN_L_GRID), ly.max(MIN_L_GRID), has_alpha);

        header_size(has_alpha) + (ac + 1) / 2
    }

    /// Encode into a pre-allocated buffer and error out if
    /// the buffer provided is too small
    ///
    /// A buffer of [`max_size`](Self::max_size) bytes is always big enough.
    ///
    /// # Arguments.
    /// - out: The buffer to write the hash to
    ///
    /// # Returns
    /// - Ok(size): Actual bytes used for the hash
    /// - Err: The error encountered during encoding
    pub fn encode_into(&self, out: &mut [u8]) -> Result<usize, ThumbHashEncodeErrors> {
        self.check_input()?;

        if out.len() < HEADER_SIZE {
            return Err(ThumbHashEncodeErrors::TooSmallOutput(HEADER_SIZE, out.len()));
        }

        let rgba = match self.colorspace {
            ColorSpace::RGBA => Cow::Borrowed(self.pixel_data),
            colorspace => Cow::Owned(expand_to_rgba(self.pixel_data, colorspace))
        };
        let planes = rgba_to_lpqa(&rgba);

        let has_alpha = planes.has_alpha;
        let is_landscape = self.width > self.height;
        let (lx, ly) = self.luma_frequencies(has_alpha);
        let (l_nx, l_ny) = (lx.max(MIN_L_GRID), ly.max(MIN_L_GRID));

        let hash_length = self.hash_length(has_alpha);

        if out.len() < hash_length {
            return Err(ThumbHashEncodeErrors::TooSmallOutput(hash_length, out.len()));
        }
        trace!("Image width: {:?}", self.width);
        trace!("Image height: {:?}", self.height);
        trace!("Has alpha: {has_alpha}, luminance grid {l_nx}x{l_ny}");

        let (w, h) = (self.width, self.height);

        let l = encode_channel(&planes.l, w, h, l_nx, l_ny);
        let p = encode_channel(&planes.p, w, h, PQ_GRID, PQ_GRID);
        let q = encode_channel(&planes.q, w, h, PQ_GRID, PQ_GRID);
        let a = if has_alpha {
            encode_channel(&planes.a, w, h, A_GRID, A_GRID)
        } else {
            EncodedChannel::opaque_alpha()
        };

        let ac_start = write_header(out, &l, &p, &q, &a, has_alpha, is_landscape, lx, ly);

        let mut writer = NibbleWriter::new(out, ac_start);

        writer.write_channel(&l.ac);
        writer.write_channel(&p.ac);
        writer.write_channel(&q.ac);
        if has_alpha {
            writer.write_channel(&a.ac);
        }
        let len = writer.bytes_written();

        trace!("Hash length: {len}");

        Ok(len)
    }

    /// Encode the image returning a vector holding the hash
    pub fn encode(&self) -> Result<Vec<u8>, ThumbHashEncodeErrors> {
        let mut output = vec![0; MAX_HASH_SIZE];
        let len = self.encode_into(&mut output)?;

        output.truncate(len);

        Ok(output)
    }
}
