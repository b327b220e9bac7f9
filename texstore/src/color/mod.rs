//! Color space handling for decoded texture tiles.
//!
//! Every tile entering the store is converted once, at load time, from
//! its source color space to the renderer's linear working space. The
//! conversions themselves are pure functions in [`convert`].

mod convert;

pub use convert::{
    ciexyz_to_linear_rgb, convert_tile_to_linear, linear_rgb_to_srgb, srgb_to_linear_rgb,
};

use std::fmt;
use thiserror::Error;

/// Source color space of a texture's pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Already linear, no conversion needed.
    LinearRgb,
    /// sRGB encoded, decoded with the inverse sRGB transfer function.
    Srgb,
    /// CIE 1931 XYZ, converted with the XYZ to linear RGB matrix.
    CieXyz,
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpace::LinearRgb => write!(f, "linear RGB"),
            ColorSpace::Srgb => write!(f, "sRGB"),
            ColorSpace::CieXyz => write!(f, "CIE XYZ"),
        }
    }
}

/// Errors from the tile conversion pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Tiles must carry RGB or RGBA pixels.
    #[error("unsupported channel count {0} (tiles must have 3 or 4 channels)")]
    UnsupportedChannelCount(usize),
}
