use image::{GenericImageView, Luma, Rgba};
use imageproc::definitions::Image;
use imageproc::rect::Rect;

use crate::error::CropError;
use crate::utils::validate_matching_dimensions;

/// Tight bounding box of all foreground (non-zero) mask pixels.
///
/// Returns `None` when the mask is empty.
pub fn foreground_bounds(mask: &Image<Luma<u8>>) -> Option<Rect> {
    let mut bounds: Option<[u32; 4]> = None; // [left, top, right, bottom]

    for (x, y, pixel) in mask.enumerate_pixels() {
        if pixel[0] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => [x, y, x, y],
            Some([left, top, right, bottom]) => {
                [left.min(x), top.min(y), right.max(x), bottom.max(y)]
            }
        });
    }

    bounds.map(|[left, top, right, bottom]| {
        Rect::at(left as i32, top as i32).of_size(right - left + 1, bottom - top + 1)
    })
}

/// Crops an image and its mask to the mask's foreground bounding box.
///
/// An empty mask falls back to the full source extent; this is an explicit
/// policy, not a failure, so the result is never zero-area. The returned
/// sub-image and sub-mask always share dimensions.
///
/// # Errors
///
/// * `CropError::DimensionMismatch` - When image and mask dimensions differ
pub fn crop_to_foreground(
    image: &Image<Rgba<u8>>,
    mask: &Image<Luma<u8>>,
) -> Result<(Image<Rgba<u8>>, Image<Luma<u8>>), CropError> {
    let (width, height) = image.dimensions();
    let (mask_width, mask_height) = mask.dimensions();
    validate_matching_dimensions(width, height, mask_width, mask_height, "Crop").map_err(
        |_| CropError::DimensionMismatch {
            expected: (width, height),
            actual: (mask_width, mask_height),
        },
    )?;

    let bounds =
        foreground_bounds(mask).unwrap_or_else(|| Rect::at(0, 0).of_size(width, height));

    let x = bounds.left() as u32;
    let y = bounds.top() as u32;
    let sub_image = image.view(x, y, bounds.width(), bounds.height()).to_image();
    let sub_mask = mask.view(x, y, bounds.width(), bounds.height()).to_image();

    Ok((sub_image, sub_mask))
}
