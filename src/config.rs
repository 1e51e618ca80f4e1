/// Options recognized by the photo-to-icon pipeline.
///
/// Morphological kernel sizes and the enhancement factors are fixed constants
/// of the stylization and are deliberately not exposed here; they define the
/// pipeline's visual identity. The thresholds below are empirically tuned
/// defaults, not correctness invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct IconConfig {
    /// Pixel dimension of the square output canvas.
    pub output_size: u32,
    /// Euclidean RGB distance from the corner-estimated background color
    /// above which a pixel counts as foreground.
    pub background_distance_threshold: f32,
    /// Mean-opacity cutoff below which an image is treated as pre-masked
    /// and its own alpha channel is trusted as the segmentation.
    pub alpha_presence_threshold: f32,
    /// Binarization threshold applied after the refiner's gaussian pass.
    pub mask_binarize_threshold: u8,
    /// Binarization threshold applied to the inverted edge map.
    pub edge_binarize_threshold: u8,
    /// Margin reserved around the content, as a fraction of the canvas
    /// per side.
    pub inset_fraction: f32,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            output_size: 128,
            background_distance_threshold: 28.0,
            alpha_presence_threshold: 250.0,
            mask_binarize_threshold: 80,
            edge_binarize_threshold: 210,
            inset_fraction: 0.07,
        }
    }
}

impl IconConfig {
    /// Returns the default configuration with a different canvas size.
    #[must_use]
    pub fn with_output_size(output_size: u32) -> Self {
        Self {
            output_size,
            ..Self::default()
        }
    }
}
