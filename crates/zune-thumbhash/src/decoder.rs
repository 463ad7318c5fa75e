/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use zune_core::log::{trace, warn};
use zune_core::options::DecoderOptions;

use crate::bitpack::{NibbleReader, ThumbHashHeader};
use crate::color::{lpq_to_rgb, unit_to_u8};
use crate::constants::{A_GRID, PQ_GRID, PQ_SATURATION_BOOST};
use crate::dct::{accumulate_ac, cosine_table, CosineTable};
use crate::errors::ThumbHashDecodeErrors;

/// Returns true if the bytes look like a complete thumbhash
///
/// This only confirms the hash is as long as its header says,
/// any 5+ byte sequence has a valid header.
pub fn probe_thumbhash(hash: &[u8]) -> bool {
    match ThumbHashHeader::parse(hash) {
        Ok(header) => header.hash_length() == hash.len(),
        Err(_) => false
    }
}

/// Average color of the image a hash was made from
///
/// Only header bytes are read, nothing is decoded.
///
/// # Returns
/// `[r, g, b, a]`, each in `0..=1`, alpha is `1.0` for hashes without an alpha channel
///
/// # Errors
/// If the hash is shorter than its header
pub fn average_color(hash: &[u8]) -> Result<[f32; 4], ThumbHashDecodeErrors> {
    Ok(ThumbHashHeader::parse(hash)?.average_color())
}

/// Approximate aspect ratio (`width / height`) of the image a hash was made from
///
/// Only header bytes are read, nothing is decoded.
pub fn aspect_ratio(hash: &[u8]) -> Result<f32, ThumbHashDecodeErrors> {
    Ok(ThumbHashHeader::parse(hash)?.aspect_ratio())
}

/// A ThumbHash decoder
///
/// Reconstructs a small RGBA placeholder from a hash, the longer side of
/// the output is always 32 pixels and the shorter side follows the
/// aspect ratio stored in the hash.
///
/// # Example
/// ```
/// use zune_core::colorspace::ColorSpace;
/// use zune_thumbhash::{ThumbHashDecoder, ThumbHashEncoder};
///
/// let pixels = [200_u8; 8 * 6 * 4];
/// let hash = ThumbHashEncoder::new(&pixels, 8, 6, ColorSpace::RGBA).encode().unwrap();
///
/// let mut decoder = ThumbHashDecoder::new(&hash);
/// let placeholder = decoder.decode().unwrap();
/// let (width, height) = decoder.dimensions().unwrap();
///
/// assert_eq!(placeholder.len(), width * height * 4);
/// ```
pub struct ThumbHashDecoder<'a> {
    hash:            &'a [u8],
    header:          Option<ThumbHashHeader>,
    width:           usize,
    height:          usize,
    decoded_headers: bool,
    options:         DecoderOptions
}

impl<'a> ThumbHashDecoder<'a> {
    /// Create a new decoder with the default options
    ///
    /// # Arguments
    /// - `hash`: The hash bytes
    pub fn new(hash: &'a [u8]) -> ThumbHashDecoder<'a> {
        ThumbHashDecoder::new_with_options(hash, DecoderOptions::default())
    }

    /// Create a new decoder that obeys specified restrictions
    ///
    /// Respected options
    /// - `max_width` and `max_height`: Refuse hashes whose placeholder is larger
    /// - `strict_mode`: Refuse hashes with bytes past the ones the header describes
    ///
    /// # Example
    /// ```
    /// use zune_core::options::DecoderOptions;
    /// use zune_thumbhash::ThumbHashDecoder;
    ///
    /// let options = DecoderOptions::default().set_strict_mode(true);
    /// let mut decoder = ThumbHashDecoder::new_with_options(&[0; 30], options);
    /// assert!(decoder.decode_headers().is_err());
    /// ```
    pub fn new_with_options(hash: &'a [u8], options: DecoderOptions) -> ThumbHashDecoder<'a> {
        ThumbHashDecoder {
            hash,
            header: None,
            width: 0,
            height: 0,
            decoded_headers: false,
            options
        }
    }

    /// Parse and validate the hash header
    ///
    /// After this the dimensions and header fields are available.
    ///
    /// # Errors
    /// - The hash is shorter than 5 bytes (6 with alpha)
    /// - The hash is shorter than the AC terms the header describes
    /// - The hash is longer than the header describes and strict mode is on
    /// - The output dimensions exceed the configured limits
    pub fn decode_headers(&mut self) -> Result<(), ThumbHashDecodeErrors> {
        let header = ThumbHashHeader::parse(self.hash)?;

        let expected = header.hash_length();

        if self.hash.len() < expected {
            return Err(ThumbHashDecodeErrors::TooShortHash(
                expected,
                self.hash.len()
            ));
        }
        if self.hash.len() > expected {
            if self.options.strict_mode() {
                return Err(ThumbHashDecodeErrors::TrailingBytes(
                    expected,
                    self.hash.len()
                ));
            }
            warn!(
                "Hash has {} bytes but header describes {expected}, ignoring the rest",
                self.hash.len()
            );
        }

        let (width, height) = header.dimensions();

        if width > self.options.max_width() {
            return Err(ThumbHashDecodeErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                width
            ));
        }
        if height > self.options.max_height() {
            return Err(ThumbHashDecodeErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                height
            ));
        }

        trace!("Header: {:?}", header);
        trace!("Image width: {:?}", width);
        trace!("Image height: {:?}", height);

        self.header = Some(header);
        self.width = width;
        self.height = height;
        self.decoded_headers = true;

        Ok(())
    }

    /// Average color of the source image, see [`average_color`]
    pub fn average_color(&self) -> Result<[f32; 4], ThumbHashDecodeErrors> {
        average_color(self.hash)
    }

    /// Aspect ratio of the source image, see [`aspect_ratio`]
    pub fn aspect_ratio(&self) -> Result<f32, ThumbHashDecodeErrors> {
        aspect_ratio(self.hash)
    }

    /// Parsed header fields, or `None` if headers were not decoded
    pub fn header(&self) -> Option<ThumbHashHeader> {
        self.header
    }

    /// Get the width and height of the placeholder
    ///
    /// # Returns
    /// - `Some((width, height))`
    /// - `None`: Indicates the headers weren't decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            return Some((self.width, self.height));
        }
        None
    }

    /// Return the number of bytes required to hold the placeholder
    ///
    /// # Returns
    ///  - `Some(usize)`: Minimum size for a buffer needed to decode the image
    ///  - `None`: Indicates the headers weren't decoded.
    pub const fn output_buffer_size(&self) -> Option<usize> {
        if self.decoded_headers {
            return Some(self.width * self.height * 4);
        }
        None
    }

    /// Decode the hash, returning RGBA pixels (not premultiplied)
    ///
    /// Dimensions are accessible afterwards via [`dimensions`](Self::dimensions)
    pub fn decode(&mut self) -> Result<Vec<u8>, ThumbHashDecodeErrors> {
        if !self.decoded_headers {
            self.decode_headers()?;
        }
        let mut output = vec![0; self.width * self.height * 4];

        self.decode_into(&mut output)?;

        Ok(output)
    }

    /// Decode the hash and store RGBA pixels into the output buffer
    ///
    /// Returns an error if the buffer cannot hold the placeholder,
    /// only the first `width*height*4` bytes are written.
    pub fn decode_into(&mut self, pixels: &mut [u8]) -> Result<(), ThumbHashDecodeErrors> {
        if !self.decoded_headers {
            self.decode_headers()?;
        }
        let header = self
            .header
            .ok_or(ThumbHashDecodeErrors::GenericStatic("Headers not decoded"))?;

        let (w, h) = (self.width, self.height);
        let size = w * h * 4;

        if pixels.len() < size {
            return Err(ThumbHashDecodeErrors::TooSmallOutput(size, pixels.len()));
        }

        let has_alpha = header.has_alpha;
        let (lx, ly) = header.luma_grid();

        let mut reader = NibbleReader::new(self.hash, header.header_size());

        let l_ac = reader.read_channel(lx, ly, header.l_scale);
        let p_ac = reader.read_channel(PQ_GRID, PQ_GRID, header.p_scale * PQ_SATURATION_BOOST);
        let q_ac = reader.read_channel(PQ_GRID, PQ_GRID, header.q_scale * PQ_SATURATION_BOOST);
        let a_ac = if has_alpha {
            reader.read_channel(A_GRID, A_GRID, header.a_scale)
        } else {
            Vec::new()
        };

        let min_grid = if has_alpha { A_GRID } else { PQ_GRID };
        let x_frequencies = lx.max(min_grid);
        let y_frequencies = ly.max(min_grid);

        let columns: Vec<CosineTable> = (0..w)
            .map(|x| cosine_table(w, x, x_frequencies))
            .collect();

        for (y, row) in pixels[..size].chunks_exact_mut(w * 4).enumerate() {
            let fy = cosine_table(h, y, y_frequencies);

            for (fx, pix) in columns.iter().zip(row.chunks_exact_mut(4)) {
                let l = header.l_dc + accumulate_ac(&l_ac, lx, ly, fx, &fy);
                let p = header.p_dc + accumulate_ac(&p_ac, PQ_GRID, PQ_GRID, fx, &fy);
                let q = header.q_dc + accumulate_ac(&q_ac, PQ_GRID, PQ_GRID, fx, &fy);

                let mut a = header.a_dc;

                if has_alpha {
                    a += accumulate_ac(&a_ac, A_GRID, A_GRID, fx, &fy);
                }
                let [r, g, b] = lpq_to_rgb(l, p, q);

                pix[0] = unit_to_u8(r);
                pix[1] = unit_to_u8(g);
                pix[2] = unit_to_u8(b);
                pix[3] = unit_to_u8(a);
            }
        }
        Ok(())
    }
}
