use image::imageops::{resize, FilterType};
use image::{Luma, Rgba};
use imageproc::definitions::Image;
use imageproc::map::{map_colors, map_colors2};
use imageproc::morphology::{grayscale_dilate, Mask};
use itertools::iproduct;

use crate::config::IconConfig;
use crate::error::ComposeError;
use crate::utils::{alpha_channel, validate_matching_dimensions};

/// L-inf radius of the 7x7 square structuring element behind the outline
/// ring.
const OUTLINE_KERNEL_RADIUS: u8 = 3;
/// Color of the bold outer contour.
const OUTLINE_COLOR: [u8; 3] = [38, 27, 21];
/// Color of the interior sketch lines.
const SKETCH_COLOR: [u8; 3] = [28, 20, 16];

/// Scales the stylized foreground onto a fixed transparent canvas and layers
/// the outline and sketch passes on top.
///
/// The mask becomes the image's alpha channel, then image and edge map are
/// resized identically (Lanczos3, aspect preserved) so the longer dimension
/// fits inside `output_size` minus the inset margin, and centered. Layer
/// order: base image, then an outline ring isolated by dilating the base
/// alpha and subtracting it, then sketch lines whose alpha is the edge map
/// multiplied by the base alpha so they never render outside the silhouette.
///
/// # Errors
///
/// * `ComposeError::DimensionMismatch` - When image, mask, and edge map
///   dimensions disagree
/// * `ComposeError::CanvasTooSmall` - When the inset leaves no content area
pub fn compose_icon(
    image: &Image<Rgba<u8>>,
    mask: &Image<Luma<u8>>,
    edges: &Image<Luma<u8>>,
    config: &IconConfig,
) -> Result<Image<Rgba<u8>>, ComposeError> {
    let (width, height) = image.dimensions();
    for (other_width, other_height) in [mask.dimensions(), edges.dimensions()] {
        validate_matching_dimensions(width, height, other_width, other_height, "Compose")
            .map_err(|_| ComposeError::DimensionMismatch {
                expected: (width, height),
                actual: (other_width, other_height),
            })?;
    }

    let size = config.output_size;
    let inset = (size as f32 * config.inset_fraction) as u32;
    let content = size
        .checked_sub(inset * 2)
        .filter(|content| *content > 0)
        .ok_or(ComposeError::CanvasTooSmall {
            output_size: size,
            inset,
        })?;

    // The refined mask becomes the foreground's opacity.
    let base = map_colors2(image, mask, |Rgba([red, green, blue, _]), Luma([alpha])| {
        Rgba([red, green, blue, alpha])
    });

    let scale = f32::min(
        content as f32 / width as f32,
        content as f32 / height as f32,
    );
    let new_width = ((width as f32 * scale) as u32).max(1);
    let new_height = ((height as f32 * scale) as u32).max(1);

    // Image and edge map resize identically so they stay pixel-aligned.
    let base = resize(&base, new_width, new_height, FilterType::Lanczos3);
    let edges = resize(edges, new_width, new_height, FilterType::Lanczos3);

    let offset_x = (size - new_width) / 2;
    let offset_y = (size - new_height) / 2;

    let mut canvas: Image<Rgba<u8>> = Image::new(size, size);
    composite_over_impl(&mut canvas, &base, offset_x, offset_y);

    let silhouette = alpha_channel(&canvas);

    // Bold outer contour: a thin ring just outside the silhouette.
    let dilated = grayscale_dilate(&silhouette, &Mask::square(OUTLINE_KERNEL_RADIUS));
    let ring = map_colors2(&dilated, &silhouette, |Luma([grown]), Luma([alpha])| {
        Luma([grown.saturating_sub(alpha)])
    });
    let outline = colorize_impl(&ring, OUTLINE_COLOR);
    composite_over_impl(&mut canvas, &outline, 0, 0);

    // Interior sketch lines, masked to the silhouette.
    let sketch_map = place_centered_impl(&edges, size, offset_x, offset_y);
    let sketch_alpha = map_colors2(&sketch_map, &silhouette, |Luma([edge]), Luma([alpha])| {
        Luma([multiply_alpha_impl(edge, alpha)])
    });
    let sketch = colorize_impl(&sketch_alpha, SKETCH_COLOR);
    composite_over_impl(&mut canvas, &sketch, 0, 0);

    Ok(canvas)
}

/// Alpha-composites `src` over `dst` (Porter-Duff "over") at the given
/// offset. The offset rectangle must lie inside `dst`.
fn composite_over_impl(dst: &mut Image<Rgba<u8>>, src: &Image<Rgba<u8>>, x: u32, y: u32) {
    for (src_x, src_y, pixel) in src.enumerate_pixels() {
        let Rgba([red, green, blue, alpha]) = *pixel;
        if alpha == 0 {
            continue;
        }

        let target = dst.get_pixel_mut(x + src_x, y + src_y);
        let Rgba([t_red, t_green, t_blue, t_alpha]) = *target;

        let src_a = f32::from(alpha) / 255.0;
        let dst_a = f32::from(t_alpha) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let blend = |s: u8, d: u8| -> u8 {
            let value =
                (f32::from(s) * src_a + f32::from(d) * dst_a * (1.0 - src_a)) / out_a;
            value.round().clamp(0.0, 255.0) as u8
        };

        *target = Rgba([
            blend(red, t_red),
            blend(green, t_green),
            blend(blue, t_blue),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        ]);
    }
}

/// Turns a grayscale intensity plane into a constant-color RGBA layer whose
/// alpha is the intensity.
fn colorize_impl(intensity: &Image<Luma<u8>>, color: [u8; 3]) -> Image<Rgba<u8>> {
    map_colors(intensity, |Luma([alpha])| {
        Rgba([color[0], color[1], color[2], alpha])
    })
}

/// Places a grayscale image on a zero-filled square canvas at the given
/// offset, keeping it aligned with the composited base layer.
fn place_centered_impl(src: &Image<Luma<u8>>, size: u32, x: u32, y: u32) -> Image<Luma<u8>> {
    let mut out: Image<Luma<u8>> = Image::new(size, size);
    let (width, height) = src.dimensions();
    for (src_x, src_y) in iproduct!(0..width, 0..height) {
        out.put_pixel(x + src_x, y + src_y, *src.get_pixel(src_x, src_y));
    }
    out
}

/// Per-pixel multiply of two alpha values, normalized to 0-1 and rescaled.
#[inline]
fn multiply_alpha_impl(a: u8, b: u8) -> u8 {
    ((f32::from(a) / 255.0) * (f32::from(b) / 255.0) * 255.0)
        .round()
        .clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_rgba(width: u32, height: u32, pixel: Rgba<u8>) -> Image<Rgba<u8>> {
        let mut image = Image::new(width, height);
        for (x, y) in iproduct!(0..width, 0..height) {
            image.put_pixel(x, y, pixel);
        }
        image
    }

    fn solid_gray(width: u32, height: u32, value: u8) -> Image<Luma<u8>> {
        let mut mask = Image::new(width, height);
        for (x, y) in iproduct!(0..width, 0..height) {
            mask.put_pixel(x, y, Luma([value]));
        }
        mask
    }

    // size 40 with a quarter inset: content area 20x20 centered at 10..30.
    fn wide_margin_config() -> IconConfig {
        IconConfig {
            output_size: 40,
            inset_fraction: 0.25,
            ..IconConfig::default()
        }
    }

    #[test]
    fn compose_icon_output_is_always_square_output_size() {
        let image = solid_rgba(30, 10, Rgba([50, 60, 70, 255]));
        let mask = solid_gray(30, 10, 255);
        let edges = solid_gray(30, 10, 0);

        let icon = compose_icon(&image, &mask, &edges, &IconConfig::default()).unwrap();

        assert_eq!(icon.dimensions(), (128, 128));
    }

    #[test]
    fn compose_icon_applies_mask_as_alpha() {
        // Source alpha is zero everywhere; the mask alone decides opacity.
        let image = solid_rgba(10, 10, Rgba([200, 40, 40, 0]));
        let mask = solid_gray(10, 10, 255);
        let edges = solid_gray(10, 10, 0);

        let icon = compose_icon(&image, &mask, &edges, &wide_margin_config()).unwrap();

        assert_eq!(icon.get_pixel(20, 20)[3], 255);
    }

    #[test]
    fn compose_icon_centers_content_inside_inset() {
        let image = solid_rgba(10, 10, Rgba([200, 40, 40, 255]));
        let mask = solid_gray(10, 10, 255);
        let edges = solid_gray(10, 10, 0);

        let icon = compose_icon(&image, &mask, &edges, &wide_margin_config()).unwrap();

        // Content occupies 10..30; the outline ring reaches 3 further.
        let Rgba([red, green, blue, alpha]) = *icon.get_pixel(20, 20);
        assert_eq!(alpha, 255);
        assert!(red.abs_diff(200) <= 2 && green.abs_diff(40) <= 2 && blue.abs_diff(40) <= 2);
        assert_eq!(icon.get_pixel(0, 0)[3], 0);
        assert_eq!(icon.get_pixel(39, 39)[3], 0);
    }

    #[test]
    fn compose_icon_outline_ring_sits_just_outside_the_silhouette() {
        let image = solid_rgba(10, 10, Rgba([200, 40, 40, 255]));
        let mask = solid_gray(10, 10, 255);
        let edges = solid_gray(10, 10, 0);

        let icon = compose_icon(&image, &mask, &edges, &wide_margin_config()).unwrap();

        // Inside the dilation band (2 pixels left of the content edge).
        let Rgba([red, green, blue, alpha]) = *icon.get_pixel(8, 20);
        assert_eq!(alpha, 255);
        assert_eq!([red, green, blue], OUTLINE_COLOR);

        // Beyond the band nothing is drawn.
        assert_eq!(icon.get_pixel(5, 20)[3], 0);
        assert_eq!(icon.get_pixel(20, 5)[3], 0);

        // The ring never covers the silhouette interior.
        let interior = *icon.get_pixel(20, 20);
        assert_ne!([interior[0], interior[1], interior[2]], OUTLINE_COLOR);
    }

    #[test]
    fn compose_icon_sketch_stays_inside_the_silhouette() {
        let image = solid_rgba(10, 10, Rgba([200, 40, 40, 255]));
        let mask = solid_gray(10, 10, 255);
        // A fully light edge map paints the sketch tone across the interior.
        let edges = solid_gray(10, 10, 255);

        let icon = compose_icon(&image, &mask, &edges, &wide_margin_config()).unwrap();

        let Rgba([red, green, blue, _]) = *icon.get_pixel(20, 20);
        assert_eq!([red, green, blue], SKETCH_COLOR);

        // On the outline ring the silhouette alpha is zero, so the sketch
        // contributes nothing there.
        let Rgba([red, green, blue, _]) = *icon.get_pixel(8, 20);
        assert_eq!([red, green, blue], OUTLINE_COLOR);
    }

    #[test]
    fn compose_icon_with_mismatched_layers_returns_error() {
        let image = solid_rgba(10, 10, Rgba([0, 0, 0, 255]));
        let mask = solid_gray(10, 10, 255);
        let edges = solid_gray(5, 5, 0);

        let result = compose_icon(&image, &mask, &edges, &IconConfig::default());

        assert_eq!(
            result.unwrap_err(),
            ComposeError::DimensionMismatch {
                expected: (10, 10),
                actual: (5, 5),
            }
        );
    }

    #[test]
    fn compose_icon_with_inset_consuming_canvas_returns_error() {
        let image = solid_rgba(4, 4, Rgba([0, 0, 0, 255]));
        let mask = solid_gray(4, 4, 255);
        let edges = solid_gray(4, 4, 0);
        let config = IconConfig {
            output_size: 10,
            inset_fraction: 0.5,
            ..IconConfig::default()
        };

        let result = compose_icon(&image, &mask, &edges, &config);

        assert_eq!(
            result.unwrap_err(),
            ComposeError::CanvasTooSmall {
                output_size: 10,
                inset: 5,
            }
        );
    }

    #[test]
    fn compose_icon_longer_dimension_respects_the_content_area() {
        let image = solid_rgba(50, 100, Rgba([10, 200, 10, 255]));
        let mask = solid_gray(50, 100, 255);
        let edges = solid_gray(50, 100, 0);
        let config = IconConfig::default();

        let icon = compose_icon(&image, &mask, &edges, &config).unwrap();

        // Scale = 112/100, so the content spans 56x112; anything farther
        // than the outline radius outside that box stays transparent.
        let content_left = (128 - 56) / 2;
        let band = u32::from(OUTLINE_KERNEL_RADIUS);
        for y in 0..128 {
            for x in 0..content_left - band {
                assert_eq!(icon.get_pixel(x, y)[3], 0, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn multiply_alpha_impl_matches_normalized_product() {
        assert_eq!(multiply_alpha_impl(255, 255), 255);
        assert_eq!(multiply_alpha_impl(255, 0), 0);
        assert_eq!(multiply_alpha_impl(128, 128), 64);
    }

    #[test]
    fn composite_over_impl_on_transparent_canvas_copies_source() {
        let mut canvas: Image<Rgba<u8>> = Image::new(4, 4);
        let src = solid_rgba(2, 2, Rgba([10, 20, 30, 200]));

        composite_over_impl(&mut canvas, &src, 1, 1);

        assert_eq!(canvas.get_pixel(1, 1), &Rgba([10, 20, 30, 200]));
        assert_eq!(canvas.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn composite_over_impl_blends_semi_transparent_layers() {
        let mut canvas = solid_rgba(1, 1, Rgba([0, 0, 0, 255]));
        let src = solid_rgba(1, 1, Rgba([255, 255, 255, 128]));

        composite_over_impl(&mut canvas, &src, 0, 0);

        let Rgba([red, _, _, alpha]) = *canvas.get_pixel(0, 0);
        assert_eq!(alpha, 255);
        assert_eq!(red, 128);
    }
}
