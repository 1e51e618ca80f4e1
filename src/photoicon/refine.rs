use image::Luma;
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::definitions::Image;
use imageproc::distance_transform::Norm;
use imageproc::filter::{gaussian_blur_f32, median_filter};
use imageproc::morphology::dilate;

use crate::config::IconConfig;

/// L-inf radius of the 5x5 median kernel that removes salt-and-pepper noise.
const DESPECKLE_RADIUS: u32 = 2;
/// L-inf radius of the 5x5 dilation that closes small gaps and thin holes.
const CLOSE_GAPS_RADIUS: u8 = 2;
/// Sigma of the gaussian pass that softens the dilated edge before
/// re-thresholding.
const EDGE_SOFTEN_SIGMA: f32 = 1.2;

/// Cleans a raw foreground classification into a stable binary silhouette.
///
/// The sequence is a fixed recipe, not a configurable policy:
/// median filter, dilation, gaussian blur, then a hard threshold at
/// `config.mask_binarize_threshold`. The ordering is part of the contract;
/// the blur must sit between the dilation and the threshold. The output is
/// strictly binary (0 or 255).
pub fn refine_mask(mask: &Image<Luma<u8>>, config: &IconConfig) -> Image<Luma<u8>> {
    let despeckled = median_filter(mask, DESPECKLE_RADIUS, DESPECKLE_RADIUS);
    let closed = dilate(&despeckled, Norm::LInf, CLOSE_GAPS_RADIUS);
    let softened = gaussian_blur_f32(&closed, EDGE_SOFTEN_SIGMA);
    threshold(
        &softened,
        config.mask_binarize_threshold,
        ThresholdType::Binary,
    )
}
