/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during encoding and decoding.
//!
//! Every error here is an invalid argument supplied by the caller,
//! they are detected before any pixel is touched.
use core::fmt::{Debug, Display, Formatter};

use zune_core::colorspace::ColorSpace;

/// Errors encountered during encoding
#[non_exhaustive]
pub enum ThumbHashEncodeErrors {
    /// Width or height is zero or larger than the encoder can handle
    ///
    /// # Arguments
    /// - 1st argument is the dimension name (`width` or `height`)
    /// - 2nd argument is the value found
    InvalidDimensions(&'static str, usize),
    /// Unsupported colorspace
    ///
    /// The first argument is the colorspace encountered
    /// The second argument is list of supported colorspaces
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    /// The pixel buffer length does not match `width*height*components`
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes found
    InvalidInputLength(usize, usize),
    /// The output buffer cannot hold the hash
    TooSmallOutput(usize, usize)
}

impl ThumbHashEncodeErrors {
    /// Whether this error was caused by an argument passed by the caller
    ///
    /// The encoder has no other failure mode, so this is always true,
    /// it's provided for callers mapping errors into their own kinds.
    pub const fn is_invalid_argument(&self) -> bool {
        true
    }
}

impl Debug for ThumbHashEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions(dimension, found) => {
                writeln!(
                    f,
                    "Invalid {dimension} {found}, expected a value between 1 and {}",
                    crate::constants::MAX_INPUT_DIMENSION
                )
            }
            Self::UnsupportedColorspace(found, supported) => {
                writeln!(f, "Cannot encode image with colorspace {found:?} into a thumbhash, supported ones are {supported:?}")
            }
            Self::InvalidInputLength(expected, found) => {
                writeln!(
                    f,
                    "Expected pixel buffer of length {expected} but found {found}"
                )
            }
            Self::TooSmallOutput(expected, found) => {
                writeln!(
                    f,
                    "Too small output size, expected {expected}, but found {found}"
                )
            }
        }
    }
}

impl Display for ThumbHashEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

/// Possible Errors that may occur during decoding
#[non_exhaustive]
pub enum ThumbHashDecodeErrors {
    /// The hash doesn't have enough bytes for the header
    /// or for the coefficients the header describes
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes actually present
    TooShortHash(usize, usize),
    /// The hash has more bytes than the header describes,
    /// only reported in strict mode
    TrailingBytes(usize, usize),
    /// Decoded dimensions are above the configured limits
    TooLargeDimensions(&'static str, usize, usize),
    /// To small output size
    TooSmallOutput(usize, usize),
    /// Generic message does not need heap allocation
    GenericStatic(&'static str)
}

impl ThumbHashDecodeErrors {
    /// Whether this error was caused by an argument passed by the caller
    ///
    /// Always true, decoding performs no I/O and cannot fail otherwise.
    pub const fn is_invalid_argument(&self) -> bool {
        true
    }
}

impl Debug for ThumbHashDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooShortHash(expected, found) => {
                writeln!(
                    f,
                    "Too short hash, expected at least {expected} bytes but found {found}"
                )
            }
            Self::TrailingBytes(expected, found) => {
                writeln!(
                    f,
                    "Hash header describes {expected} bytes but the hash has {found}"
                )
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            Self::TooSmallOutput(expected, found) => {
                writeln!(
                    f,
                    "Too small output size, expected {expected}, but found {found}"
                )
            }
            Self::GenericStatic(val) => {
                writeln!(f, "{val}")
            }
        }
    }
}

impl Display for ThumbHashDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl From<&'static str> for ThumbHashDecodeErrors {
    fn from(r: &'static str) -> Self {
        Self::GenericStatic(r)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ThumbHashEncodeErrors {}

#[cfg(feature = "std")]
impl std::error::Error for ThumbHashDecodeErrors {}
