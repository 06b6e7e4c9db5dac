//! Element detection.
//!
//! A [`Segmenter`] runs a fixed list of binarization [`stages`] over the source image, ORs their
//! outputs, cleans the union with morphology, fills interior holes and labels 8-connected
//! components. Components whose area lies strictly inside the configured band become
//! [`DetectedElement`]s.
//!
//! An empty result is a normal outcome: callers use it to decide on a fallback.

pub mod cleanup;
pub mod stages;

use image::{GrayImage, RgbImage};

use crate::foundation::core::Point;
use crate::foundation::error::{SketchError, SketchResult};
use crate::segment::stages::{
    AdaptiveGaussianThreshold, BinarizeStage, DilatedEdges, FixedThreshold, SaturationThreshold,
    StageInput,
};

/// Axis-aligned integer bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BBox {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl BBox {
    pub fn center(self) -> Point {
        Point::new(
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }
}

/// One connected region of the source image, drawn as a unit.
#[derive(Clone, Debug)]
pub struct DetectedElement {
    /// Full-frame silhouette (255 inside), already softened by extra dilation.
    pub mask: GrayImage,
    /// Box of the undilated component.
    pub bbox: BBox,
    /// Pixel count of the undilated component.
    pub area: u64,
    /// Mean pixel position of the undilated component.
    pub centroid: Point,
}

impl DetectedElement {
    /// Top edge, used for row and half assignment.
    pub fn top(&self) -> u32 {
        self.bbox.y
    }

    /// Left edge, used for column assignment.
    pub fn left(&self) -> u32 {
        self.bbox.x
    }

    pub fn center(&self) -> Point {
        self.bbox.center()
    }
}

/// Tuning for [`Segmenter`].
#[derive(Clone, Debug)]
pub struct SegmenterOpts {
    /// Closing iterations with a 3x3 element.
    pub close_iterations: u8,
    /// Opening iterations with a 3x3 element.
    pub open_iterations: u8,
    /// Extra 3x3 dilations applied to each surviving element mask.
    pub mask_dilation: u8,
    /// `min_area = floor(H*W / min_area_divisor)`.
    pub min_area_divisor: u64,
    /// `max_area = floor(H*W * max_area_fraction)`.
    pub max_area_fraction: f64,
}

impl Default for SegmenterOpts {
    fn default() -> Self {
        Self {
            close_iterations: 4,
            open_iterations: 2,
            mask_dilation: 3,
            min_area_divisor: 500,
            max_area_fraction: 0.8,
        }
    }
}

/// Multi-signal element detector. Stateless apart from its configuration.
pub struct Segmenter {
    opts: SegmenterOpts,
    stages: Vec<Box<dyn BinarizeStage>>,
}

impl std::fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stages.iter().map(|s| s.name()).collect();
        f.debug_struct("Segmenter")
            .field("opts", &self.opts)
            .field("stages", &names)
            .finish()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(SegmenterOpts::default())
    }
}

impl Segmenter {
    /// Segmenter with the standard five binarization signals.
    pub fn new(opts: SegmenterOpts) -> Self {
        Self::with_stages(
            opts,
            vec![
                Box::new(FixedThreshold::new(245)),
                Box::new(FixedThreshold::new(220)),
                Box::new(AdaptiveGaussianThreshold::default()),
                Box::new(DilatedEdges::default()),
                Box::new(SaturationThreshold::new(30)),
            ],
        )
    }

    /// Segmenter with a caller-provided stage list.
    pub fn with_stages(opts: SegmenterOpts, stages: Vec<Box<dyn BinarizeStage>>) -> Self {
        Self { opts, stages }
    }

    pub fn opts(&self) -> &SegmenterOpts {
        &self.opts
    }

    /// Exclusive area band `(min, max)` for an image of `width x height`.
    pub fn area_band(&self, width: u32, height: u32) -> (u64, u64) {
        let px = u64::from(width) * u64::from(height);
        let min = px / self.opts.min_area_divisor.max(1);
        let max = ((px as f64) * self.opts.max_area_fraction).floor() as u64;
        (min, max)
    }

    /// OR of every stage output, before cleanup.
    pub fn combined_mask(&self, image: &RgbImage) -> SketchResult<GrayImage> {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Err(SketchError::segmentation("image has zero width or height"));
        }
        let input = StageInput::new(image);
        let mut combined = GrayImage::new(w, h);
        for stage in &self.stages {
            let out = stage.apply(&input);
            if out.dimensions() != (w, h) {
                return Err(SketchError::segmentation(format!(
                    "stage '{}' produced {}x{}, expected {w}x{h}",
                    stage.name(),
                    out.width(),
                    out.height()
                )));
            }
            cleanup::or_in_place(&mut combined, &out);
        }
        Ok(combined)
    }

    /// Detect elements. Returns an empty vector when nothing survives the area filter.
    pub fn detect(&self, image: &RgbImage) -> SketchResult<Vec<DetectedElement>> {
        let (w, h) = image.dimensions();
        let combined = self.combined_mask(image)?;
        // A single pixel can never fall inside the area band, and labelling needs two pixels.
        if u64::from(w) * u64::from(h) < 2 {
            return Ok(Vec::new());
        }
        let cleaned = cleanup::close_then_open(
            &combined,
            self.opts.close_iterations,
            self.opts.open_iterations,
        );
        let filled = cleanup::fill_holes(&cleaned);
        let components = cleanup::label_components(&filled);

        let (min_area, max_area) = self.area_band(w, h);
        let mut elements = Vec::new();
        for comp in &components.stats {
            if !(min_area < comp.area && comp.area < max_area) {
                continue;
            }
            let mask = cleanup::dilate_square(
                &components.mask_for(comp.label),
                self.opts.mask_dilation,
            );
            elements.push(DetectedElement {
                mask,
                bbox: comp.bbox(),
                area: comp.area,
                centroid: comp.centroid(),
            });
        }

        tracing::debug!(
            components = components.stats.len(),
            kept = elements.len(),
            min_area,
            max_area,
            "segmentation finished"
        );
        Ok(elements)
    }
}

#[cfg(test)]
#[path = "../tests/unit/segment/segmenter.rs"]
mod tests;
