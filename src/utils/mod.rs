//! Internal helpers shared by the pipeline stages.

use image::{Luma, Rgba};
use imageproc::definitions::Image;
use imageproc::map::map_colors;

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
/// * `context` - A description of the context for error messages
///
/// # Returns
///
/// `Ok(())` if the dimensions are valid, otherwise an error
pub fn validate_non_empty_image(width: u32, height: u32, context: &str) -> Result<(), String> {
    if width == 0 || height == 0 {
        Err(format!("{context}: Image dimensions must be non-zero"))
    } else {
        Ok(())
    }
}

/// Validates that two images have matching dimensions.
///
/// # Arguments
///
/// * `width1` - The width of the first image
/// * `height1` - The height of the first image
/// * `width2` - The width of the second image
/// * `height2` - The height of the second image
/// * `context` - A description of the context for error messages
///
/// # Returns
///
/// `Ok(())` if the dimensions match, otherwise an error
pub fn validate_matching_dimensions(
    width1: u32,
    height1: u32,
    width2: u32,
    height2: u32,
    context: &str,
) -> Result<(), String> {
    if width1 != width2 || height1 != height2 {
        Err(format!(
            "{context}: Image dimensions must match. Got {width1}x{height1} and {width2}x{height2}"
        ))
    } else {
        Ok(())
    }
}

/// Rec.601 luminance of an RGB triple, in the 0-255 range.
#[inline]
pub fn luma_rec601(red: u8, green: u8, blue: u8) -> f32 {
    0.299 * f32::from(red) + 0.587 * f32::from(green) + 0.114 * f32::from(blue)
}

/// Linear blend from `degenerate` toward `value`.
///
/// A factor of 0 returns the degenerate, 1 returns the value unchanged, and
/// factors above 1 extrapolate past the value. The result is rounded and
/// clamped to the u8 range.
#[inline]
pub fn blend_toward(degenerate: f32, value: f32, factor: f32) -> u8 {
    (degenerate + (value - degenerate) * factor)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Extracts the alpha channel of an RGBA image as a grayscale image.
pub fn alpha_channel(image: &Image<Rgba<u8>>) -> Image<Luma<u8>> {
    map_colors(image, |Rgba([_, _, _, alpha])| Luma([alpha]))
}
