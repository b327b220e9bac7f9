//! Pure color conversion functions.

use crate::color::{ColorError, ColorSpace};
use crate::tile::TileData;

/// Decode a single sRGB-encoded channel to linear.
#[inline]
fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode a single linear channel to sRGB.
#[inline]
fn linear_channel_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert an sRGB-encoded color to linear RGB.
///
/// Applies the inverse sRGB transfer function to each channel.
#[inline]
pub fn srgb_to_linear_rgb(color: [f32; 3]) -> [f32; 3] {
    [
        srgb_channel_to_linear(color[0]),
        srgb_channel_to_linear(color[1]),
        srgb_channel_to_linear(color[2]),
    ]
}

/// Convert a linear RGB color to sRGB encoding.
///
/// Inverse of [`srgb_to_linear_rgb`], used to build encoded fixtures
/// and to export display-referred values.
#[inline]
pub fn linear_rgb_to_srgb(color: [f32; 3]) -> [f32; 3] {
    [
        linear_channel_to_srgb(color[0]),
        linear_channel_to_srgb(color[1]),
        linear_channel_to_srgb(color[2]),
    ]
}

/// Convert a CIE 1931 XYZ color to linear RGB.
///
/// Uses the standard XYZ to sRGB primaries matrix (D65 white point).
#[inline]
pub fn ciexyz_to_linear_rgb(color: [f32; 3]) -> [f32; 3] {
    let [x, y, z] = color;
    [
        3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z,
        -0.969_266_0 * x + 1.876_010_8 * y + 0.041_556_0 * z,
        0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z,
    ]
}

/// Convert a decoded tile in place to the linear working space.
///
/// Dispatches on the tile's source color space: linear tiles pass
/// through untouched, sRGB tiles are decoded per channel, and CIE XYZ
/// tiles go through the primaries matrix. On 4-channel tiles only the
/// RGB channels are converted; alpha is left bit-exact.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedChannelCount`] if the tile does not
/// carry 3 or 4 channels per pixel.
pub fn convert_tile_to_linear(space: ColorSpace, tile: &mut TileData) -> Result<(), ColorError> {
    let channels = tile.channels();
    if channels != 3 && channels != 4 {
        return Err(ColorError::UnsupportedChannelCount(channels));
    }

    match space {
        ColorSpace::LinearRgb => {}
        ColorSpace::Srgb => convert_pixels(tile, srgb_to_linear_rgb),
        ColorSpace::CieXyz => convert_pixels(tile, ciexyz_to_linear_rgb),
    }

    Ok(())
}

fn convert_pixels(tile: &mut TileData, convert: fn([f32; 3]) -> [f32; 3]) {
    for i in 0..tile.pixel_count() {
        tile.set_pixel3(i, convert(tile.pixel3(i)));
    }
}


/// Property-based tests for the conversion curves.
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Decoding then re-encoding an sRGB value is the identity
        /// within float tolerance.
        #[test]
        fn srgb_roundtrip_is_identity(r in 0.0f32..=1.0, g in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let encoded = [r, g, b];
            let back = linear_rgb_to_srgb(srgb_to_linear_rgb(encoded));
            for (a, e) in back.iter().zip(encoded.iter()) {
                prop_assert!((a - e).abs() < 1e-5, "roundtrip drifted: {:?} vs {:?}", back, encoded);
            }
        }

        /// The sRGB decode curve is monotonically increasing.
        #[test]
        fn srgb_decode_is_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo_linear = srgb_to_linear_rgb([lo, lo, lo])[0];
            let hi_linear = srgb_to_linear_rgb([hi, hi, hi])[0];
            prop_assert!(lo_linear <= hi_linear);
        }

        /// Decoded values stay inside the unit interval.
        #[test]
        fn srgb_decode_stays_in_unit_range(c in 0.0f32..=1.0) {
            let linear = srgb_to_linear_rgb([c, c, c])[0];
            prop_assert!((0.0..=1.0).contains(&linear));
        }
    }
}
