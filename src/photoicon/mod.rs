pub mod compose;
pub mod crop;
pub mod extract;
pub mod refine;
pub mod stylize;

use image::Rgba;
use imageproc::definitions::Image;
use tracing::debug;

use crate::config::IconConfig;
use crate::error::IconError;

/// Runs the full photo-to-icon pipeline on a decoded RGBA buffer.
///
/// Stages run strictly forward: mask extraction, mask refinement,
/// content-aware crop, color/edge stylization, canvas composition. Each
/// stage is a pure function of its input buffers, so separate icons can be
/// built on independent threads with no coordination.
///
/// # Errors
///
/// Any stage failure is surfaced as an [`IconError`]; there are no retries
/// because every stage is deterministic. Degenerate masks are not failures:
/// an image with no detectable foreground still produces a structurally
/// valid (if visually poor) icon via the full-extent crop fallback.
pub fn stylize_icon(
    image: &Image<Rgba<u8>>,
    config: &IconConfig,
) -> Result<Image<Rgba<u8>>, IconError> {
    let raw_mask = extract::extract_mask(image, config)?;
    debug!(
        width = image.width(),
        height = image.height(),
        "extracted foreground mask"
    );

    let mask = refine::refine_mask(&raw_mask, config);

    let (sub_image, sub_mask) = crop::crop_to_foreground(image, &mask)?;
    debug!(
        width = sub_image.width(),
        height = sub_image.height(),
        "cropped to foreground bounds"
    );

    let (enhanced, edges) = stylize::stylize_foreground(&sub_image, config);

    let icon = compose::compose_icon(&enhanced, &sub_mask, &edges, config)?;
    debug!(size = config.output_size, "composed icon canvas");

    Ok(icon)
}

/// Trait providing the photo-to-icon pipeline as a method on RGBA buffers.
pub trait IconStylizeExt {
    /// Converts this photograph into a stylized transparent-background icon.
    ///
    /// # Errors
    ///
    /// See [`stylize_icon`].
    fn stylize_icon(&self, config: &IconConfig) -> Result<Image<Rgba<u8>>, IconError>;
}

impl IconStylizeExt for Image<Rgba<u8>> {
    fn stylize_icon(&self, config: &IconConfig) -> Result<Image<Rgba<u8>>, IconError> {
        stylize_icon(self, config)
    }
}
