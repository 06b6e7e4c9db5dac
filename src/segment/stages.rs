//! Binarization stages. Each stage maps the source image to a 0/255 mask of the same size.

use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;

/// Source image plus derived planes shared by all stages.
pub struct StageInput<'a> {
    pub rgb: &'a RgbImage,
    pub gray: GrayImage,
}

impl<'a> StageInput<'a> {
    pub fn new(rgb: &'a RgbImage) -> Self {
        Self {
            rgb,
            gray: image::imageops::grayscale(rgb),
        }
    }
}

/// One independent foreground signal.
pub trait BinarizeStage: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, input: &StageInput<'_>) -> GrayImage;
}

/// OpenCV-compatible sigma for a square Gaussian kernel of odd size `k`.
pub(crate) fn sigma_for_kernel(k: u32) -> f32 {
    0.3 * ((k as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

fn binary(on: bool) -> Luma<u8> {
    Luma([if on { 255 } else { 0 }])
}

/// Foreground where gray intensity is at or below `cutoff` (dark ink on light paper).
#[derive(Clone, Copy, Debug)]
pub struct FixedThreshold {
    pub cutoff: u8,
}

impl FixedThreshold {
    pub fn new(cutoff: u8) -> Self {
        Self { cutoff }
    }
}

impl BinarizeStage for FixedThreshold {
    fn name(&self) -> &'static str {
        "fixed_threshold"
    }

    fn apply(&self, input: &StageInput<'_>) -> GrayImage {
        let gray = &input.gray;
        GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
            binary(gray.get_pixel(x, y)[0] <= self.cutoff)
        })
    }
}

/// Foreground where a pixel is darker than its Gaussian-weighted neighbourhood by `c`.
#[derive(Clone, Copy, Debug)]
pub struct AdaptiveGaussianThreshold {
    /// Odd neighbourhood size in pixels.
    pub block_size: u32,
    pub c: i16,
}

impl Default for AdaptiveGaussianThreshold {
    fn default() -> Self {
        Self {
            block_size: 25,
            c: 8,
        }
    }
}

impl BinarizeStage for AdaptiveGaussianThreshold {
    fn name(&self) -> &'static str {
        "adaptive_gaussian"
    }

    fn apply(&self, input: &StageInput<'_>) -> GrayImage {
        let gray = &input.gray;
        let local = imageproc::filter::gaussian_blur_f32(gray, sigma_for_kernel(self.block_size));
        GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
            let v = i16::from(gray.get_pixel(x, y)[0]);
            let t = i16::from(local.get_pixel(x, y)[0]) - self.c;
            binary(v <= t)
        })
    }
}

/// Canny edges over a lightly blurred gray plane, thickened with 3x3 dilations.
#[derive(Clone, Copy, Debug)]
pub struct DilatedEdges {
    pub blur_kernel: u32,
    pub low: f32,
    pub high: f32,
    pub dilation: u8,
}

impl Default for DilatedEdges {
    fn default() -> Self {
        Self {
            blur_kernel: 5,
            low: 50.0,
            high: 150.0,
            dilation: 2,
        }
    }
}

impl BinarizeStage for DilatedEdges {
    fn name(&self) -> &'static str {
        "dilated_edges"
    }

    fn apply(&self, input: &StageInput<'_>) -> GrayImage {
        let blurred =
            imageproc::filter::gaussian_blur_f32(&input.gray, sigma_for_kernel(self.blur_kernel));
        let edges = imageproc::edges::canny(&blurred, self.low, self.high);
        if self.dilation == 0 {
            return edges;
        }
        imageproc::morphology::dilate(&edges, Norm::LInf, self.dilation)
    }
}

/// Foreground where HSV saturation (0..=255 scale) exceeds `cutoff`.
#[derive(Clone, Copy, Debug)]
pub struct SaturationThreshold {
    pub cutoff: u8,
}

impl SaturationThreshold {
    pub fn new(cutoff: u8) -> Self {
        Self { cutoff }
    }
}

impl BinarizeStage for SaturationThreshold {
    fn name(&self) -> &'static str {
        "saturation"
    }

    fn apply(&self, input: &StageInput<'_>) -> GrayImage {
        let rgb = input.rgb;
        GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
            binary(saturation(rgb.get_pixel(x, y).0) > self.cutoff)
        })
    }
}

/// HSV saturation of an RGB8 pixel, scaled to `0..=255`.
pub(crate) fn saturation(px: [u8; 3]) -> u8 {
    let max = px.iter().copied().max().unwrap_or(0);
    let min = px.iter().copied().min().unwrap_or(0);
    if max == 0 {
        return 0;
    }
    let s = (u32::from(max - min) * 255 + u32::from(max) / 2) / u32::from(max);
    s.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/segment/stages.rs"]
mod tests;
