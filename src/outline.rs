//! Line-art variant of the source image for the outline drawing modes.

use image::{GrayImage, Luma, RgbImage};

use crate::foundation::error::{SketchError, SketchResult};
use crate::segment::cleanup::and;

/// Builds black-on-white line art: an adaptive mean binarization ANDed with inverted Canny edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineBuilder {
    /// Median pre-smoothing radius (0 disables).
    pub median_radius: u32,
    /// Odd side length of the local-mean window.
    pub block_size: u32,
    /// Offset subtracted from the local mean.
    pub c: i16,
    pub canny_low: f32,
    pub canny_high: f32,
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self {
            median_radius: 2,
            block_size: 9,
            c: 2,
            canny_low: 30.0,
            canny_high: 100.0,
        }
    }
}

impl OutlineBuilder {
    pub fn build(&self, image: &RgbImage) -> SketchResult<RgbImage> {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Err(SketchError::validation("outline source must be non-empty"));
        }
        if self.block_size.is_multiple_of(2) {
            return Err(SketchError::validation("outline block size must be odd"));
        }
        let lines = self.line_mask(image);
        let mut out = RgbImage::new(w, h);
        for (dst, src) in out.pixels_mut().zip(lines.pixels()) {
            let v = src[0];
            dst.0 = [v, v, v];
        }
        tracing::debug!(width = w, height = h, "built outline");
        Ok(out)
    }

    /// Single-channel line art: 255 is paper, 0 is ink.
    pub fn line_mask(&self, image: &RgbImage) -> GrayImage {
        let gray = image::imageops::grayscale(image);
        let smooth = if self.median_radius > 0 {
            imageproc::filter::median_filter(&gray, self.median_radius, self.median_radius)
        } else {
            gray
        };

        let r = self.block_size / 2;
        let local = imageproc::filter::box_filter(&smooth, r, r);
        let paper = GrayImage::from_fn(smooth.width(), smooth.height(), |x, y| {
            let v = i16::from(smooth.get_pixel(x, y)[0]);
            let t = i16::from(local.get_pixel(x, y)[0]) - self.c;
            Luma([if v > t { 255 } else { 0 }])
        });

        let mut not_edges = imageproc::edges::canny(&smooth, self.canny_low, self.canny_high);
        image::imageops::invert(&mut not_edges);

        and(&paper, &not_edges)
    }
}

#[cfg(test)]
#[path = "../tests/unit/outline.rs"]
mod tests;
