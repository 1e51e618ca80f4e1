//! # photoicon
//!
//! Converts a raw photograph of an object into a small, stylized,
//! transparent-background icon: a cropped, color-enhanced silhouette with a
//! bold dark outline and interior sketch lines, composited onto a fixed-size
//! canvas.
//!
//! The pipeline chains five stages, each a pure function over in-memory
//! pixel buffers:
//!
//! - **Mask Extraction**: Per-pixel foreground/background classification,
//!   trusting existing transparency or falling back to a corner-sampled
//!   background-color heuristic
//! - **Mask Refinement**: A fixed median/dilate/blur/threshold sequence that
//!   turns the raw classification into a stable binary silhouette
//! - **Cropping**: Tight bounding box of the silhouette, with a full-extent
//!   fallback for empty masks
//! - **Stylization**: Saturation/contrast/sharpness treatment plus a
//!   binarized sketch edge map derived from luminance
//! - **Composition**: Lanczos-scaled placement on a transparent canvas, with
//!   an outline ring and silhouette-masked sketch layer on top
//!
//! Decoding and encoding raster files is the caller's responsibility; the
//! pipeline consumes and produces `Image<Rgba<u8>>` buffers.
//!
//! ## Example Usage
//!
//! ```no_run
//! use photoicon::{stylize_icon, IconConfig, IconStylizeExt};
//! use imageproc::definitions::Image;
//! use image::Rgba;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let photo: Image<Rgba<u8>> = Image::new(400, 400);
//!
//! // Free function with explicit configuration...
//! let config = IconConfig::default();
//! let icon = stylize_icon(&photo, &config)?;
//! assert_eq!(icon.dimensions(), (128, 128));
//!
//! // ...or the extension trait with a custom canvas size.
//! let icon = photo.stylize_icon(&IconConfig::with_output_size(64))?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod photoicon;
mod utils;

pub use config::IconConfig;
pub use error::{ComposeError, CropError, IconError, MaskExtractError};
pub use photoicon::compose::compose_icon;
pub use photoicon::crop::{crop_to_foreground, foreground_bounds};
pub use photoicon::extract::extract_mask;
pub use photoicon::refine::refine_mask;
pub use photoicon::stylize::stylize_foreground;
pub use photoicon::{stylize_icon, IconStylizeExt};

// Re-export imageproc::definitions::Image for convenience
pub use imageproc::definitions::Image;
