use image::{Luma, Rgba};
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::definitions::Image;
use imageproc::filter::filter3x3;
use imageproc::map::{map_colors, map_colors2};

use crate::config::IconConfig;
use crate::utils::{blend_toward, luma_rec601};

/// Enhancement factors pushing photographic input toward an illustrated look.
/// Applied in this order; each stage compounds on the previous one.
const SATURATION_FACTOR: f32 = 1.35;
const CONTRAST_FACTOR: f32 = 1.15;
const SHARPNESS_FACTOR: f32 = 1.2;
/// Contrast boost applied to the inverted edge map before binarization.
const EDGE_CONTRAST_FACTOR: f32 = 2.1;

/// 3x3 smoothing kernel used as the sharpness degenerate.
const SMOOTH_KERNEL: [f32; 9] = [
    1.0 / 13.0,
    1.0 / 13.0,
    1.0 / 13.0,
    1.0 / 13.0,
    5.0 / 13.0,
    1.0 / 13.0,
    1.0 / 13.0,
    1.0 / 13.0,
    1.0 / 13.0,
];

/// 3x3 Laplacian kernel producing bright responses at luminance edges.
const EDGE_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];

/// Applies the color treatment and derives the binarized sketch edge map.
///
/// The enhanced image is the input with saturation, contrast, and sharpness
/// boosted in that order; the alpha channel passes through untouched. The
/// edge map is the Rec.601 luminance of the enhanced image run through an
/// edge kernel, inverted so background stays light and edges become dark,
/// contrast-boosted, then hard-thresholded at
/// `config.edge_binarize_threshold`. It is a cosmetic approximation of
/// hand-drawn interior detail, not a structural edge detector.
pub fn stylize_foreground(
    image: &Image<Rgba<u8>>,
    config: &IconConfig,
) -> (Image<Rgba<u8>>, Image<Luma<u8>>) {
    let enhanced = adjust_saturation_impl(image, SATURATION_FACTOR);
    let enhanced = adjust_contrast_impl(&enhanced, CONTRAST_FACTOR);
    let enhanced = adjust_sharpness_impl(&enhanced, SHARPNESS_FACTOR);

    let edges = sketch_edges_impl(&enhanced, config.edge_binarize_threshold);

    (enhanced, edges)
}

/// Blends each pixel away from its own grayscale value.
fn adjust_saturation_impl(image: &Image<Rgba<u8>>, factor: f32) -> Image<Rgba<u8>> {
    map_colors(image, |Rgba([red, green, blue, alpha])| {
        let gray = luma_rec601(red, green, blue);
        Rgba([
            blend_toward(gray, f32::from(red), factor),
            blend_toward(gray, f32::from(green), factor),
            blend_toward(gray, f32::from(blue), factor),
            alpha,
        ])
    })
}

/// Blends each pixel away from the image-wide mean luminance.
fn adjust_contrast_impl(image: &Image<Rgba<u8>>, factor: f32) -> Image<Rgba<u8>> {
    let mean = mean_luma_impl(image);
    map_colors(image, |Rgba([red, green, blue, alpha])| {
        Rgba([
            blend_toward(mean, f32::from(red), factor),
            blend_toward(mean, f32::from(green), factor),
            blend_toward(mean, f32::from(blue), factor),
            alpha,
        ])
    })
}

/// Blends each pixel away from its smoothed neighborhood.
fn adjust_sharpness_impl(image: &Image<Rgba<u8>>, factor: f32) -> Image<Rgba<u8>> {
    let smoothed: Image<Rgba<u8>> = filter3x3::<_, f32, u8>(image, &SMOOTH_KERNEL);
    map_colors2(
        image,
        &smoothed,
        |Rgba([red, green, blue, alpha]), Rgba([s_red, s_green, s_blue, _])| {
            Rgba([
                blend_toward(f32::from(s_red), f32::from(red), factor),
                blend_toward(f32::from(s_green), f32::from(green), factor),
                blend_toward(f32::from(s_blue), f32::from(blue), factor),
                alpha,
            ])
        },
    )
}

/// Binarized sketch lines from the enhanced image's luminance.
fn sketch_edges_impl(enhanced: &Image<Rgba<u8>>, binarize_threshold: u8) -> Image<Luma<u8>> {
    let gray = luminance_impl(enhanced);
    let edges: Image<Luma<u8>> = filter3x3::<_, f32, u8>(&gray, &EDGE_KERNEL);
    let inverted = map_colors(&edges, |Luma([value])| Luma([255 - value]));
    let boosted = adjust_gray_contrast_impl(&inverted, EDGE_CONTRAST_FACTOR);
    threshold(&boosted, binarize_threshold, ThresholdType::Binary)
}

/// Rec.601 grayscale of the RGB channels; alpha is ignored.
fn luminance_impl(image: &Image<Rgba<u8>>) -> Image<Luma<u8>> {
    map_colors(image, |Rgba([red, green, blue, _])| {
        Luma([luma_rec601(red, green, blue).round().clamp(0.0, 255.0) as u8])
    })
}

/// Mean Rec.601 luminance over all pixels.
fn mean_luma_impl(image: &Image<Rgba<u8>>) -> f32 {
    let total: f64 = image
        .pixels()
        .map(|Rgba([red, green, blue, _])| f64::from(luma_rec601(*red, *green, *blue)))
        .sum();
    let count = u64::from(image.width()) * u64::from(image.height());
    (total / count as f64).round() as f32
}

/// Blends a grayscale image away from its mean intensity.
fn adjust_gray_contrast_impl(gray: &Image<Luma<u8>>, factor: f32) -> Image<Luma<u8>> {
    let total: f64 = gray.pixels().map(|Luma([value])| f64::from(*value)).sum();
    let count = u64::from(gray.width()) * u64::from(gray.height());
    let mean = (total / count as f64).round() as f32;
    map_colors(gray, |Luma([value])| {
        Luma([blend_toward(mean, f32::from(value), factor)])
    })
}
