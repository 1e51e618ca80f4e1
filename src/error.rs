use thiserror::Error;

/// Errors raised by mask extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaskExtractError {
    /// The source image has a zero-area dimension.
    #[error("MaskExtract: image dimensions must be non-zero")]
    EmptyImage,
}

/// Errors raised when cropping an image/mask pair to its foreground bounds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CropError {
    /// Image and mask dimensions don't match.
    #[error("Crop: image and mask dimensions must match. Got {expected:?} and {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Errors raised while composing the final icon canvas.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// Image, mask, and edge map must all share dimensions.
    #[error("Compose: layer dimensions must match. Got {expected:?} and {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    /// The inset margin leaves no room for content on the canvas.
    #[error("Compose: output size {output_size} leaves no content area inside inset {inset}")]
    CanvasTooSmall { output_size: u32, inset: u32 },
}

/// Any failure of the photo-to-icon pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IconError {
    #[error(transparent)]
    MaskExtract(#[from] MaskExtractError),
    #[error(transparent)]
    Crop(#[from] CropError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
}
