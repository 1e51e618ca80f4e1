use image::{Luma, Rgba};
use imageproc::definitions::Image;
use imageproc::map::map_colors;

use crate::{config::IconConfig, error::MaskExtractError, utils::validate_non_empty_image};

/// Alpha level above which a pixel of a pre-masked image counts as foreground.
pub(crate) const ALPHA_FOREGROUND_THRESHOLD: u8 = 20;

/// Classifies each pixel of `image` as foreground (255) or background (0).
///
/// Two strategies, selected by the image's own opacity:
///
/// * If the mean alpha is below `config.alpha_presence_threshold` the image is
///   considered pre-masked (e.g. a prepared product cutout) and its existing
///   transparency is trusted: foreground = alpha above a fixed low cutoff.
/// * Otherwise the background color is estimated as the mean RGB of the four
///   corner pixels, and foreground = pixels whose Euclidean RGB distance from
///   that estimate exceeds `config.background_distance_threshold`. This is a
///   deliberate corner-sampling heuristic, not general segmentation; it
///   assumes the background fills the corners.
///
/// Pure and deterministic. A fully uniform image yields an empty or full
/// mask; downstream stages tolerate both.
///
/// # Errors
///
/// * `MaskExtractError::EmptyImage` - When the image has a zero dimension
pub fn extract_mask(
    image: &Image<Rgba<u8>>,
    config: &IconConfig,
) -> Result<Image<Luma<u8>>, MaskExtractError> {
    let (width, height) = image.dimensions();
    validate_non_empty_image(width, height, "MaskExtract")
        .map_err(|_| MaskExtractError::EmptyImage)?;

    if mean_alpha_impl(image) < config.alpha_presence_threshold {
        return Ok(map_colors(image, |Rgba([_, _, _, alpha])| {
            Luma([if alpha > ALPHA_FOREGROUND_THRESHOLD {
                255
            } else {
                0
            }])
        }));
    }

    let background = estimate_background_impl(image);
    let threshold = config.background_distance_threshold;
    Ok(map_colors(image, |Rgba([red, green, blue, _])| {
        let distance = color_distance_impl([red, green, blue], background);
        Luma([if distance > threshold { 255 } else { 0 }])
    }))
}

/// Mean opacity over the whole image.
fn mean_alpha_impl(image: &Image<Rgba<u8>>) -> f32 {
    let total: u64 = image
        .pixels()
        .map(|Rgba([_, _, _, alpha])| u64::from(*alpha))
        .sum();
    let count = u64::from(image.width()) * u64::from(image.height());
    (total as f64 / count as f64) as f32
}

/// Background color estimate: mean RGB of the four corner pixels.
fn estimate_background_impl(image: &Image<Rgba<u8>>) -> [f32; 3] {
    let (width, height) = image.dimensions();
    let last_x = width.saturating_sub(1);
    let last_y = height.saturating_sub(1);

    let corners = [(0, 0), (last_x, 0), (0, last_y), (last_x, last_y)];
    let mut sum = [0.0f32; 3];
    for (x, y) in corners {
        let Rgba([red, green, blue, _]) = *image.get_pixel(x, y);
        sum[0] += f32::from(red);
        sum[1] += f32::from(green);
        sum[2] += f32::from(blue);
    }
    [sum[0] / 4.0, sum[1] / 4.0, sum[2] / 4.0]
}

/// Euclidean distance between a pixel's RGB and the background estimate.
fn color_distance_impl(pixel: [u8; 3], background: [f32; 3]) -> f32 {
    let dr = f32::from(pixel[0]) - background[0];
    let dg = f32::from(pixel[1]) - background[1];
    let db = f32::from(pixel[2]) - background[2];
    (dr * dr + dg * dg + db * db).sqrt()
}
