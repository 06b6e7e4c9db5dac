//! Mask cleanup and connected-component labelling.

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::distance_transform::Norm;
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::foundation::core::Point;
use crate::segment::BBox;

pub(crate) fn or_in_place(dst: &mut GrayImage, src: &GrayImage) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = (*d).max(*s);
    }
}

pub(crate) fn and(a: &GrayImage, b: &GrayImage) -> GrayImage {
    let mut out = a.clone();
    for (o, s) in out.iter_mut().zip(b.iter()) {
        *o = (*o).min(*s);
    }
    out
}

/// `k` iterations of a 3x3 dilation. Growth stops at the image border.
pub fn dilate_square(mask: &GrayImage, k: u8) -> GrayImage {
    if k == 0 {
        return mask.clone();
    }
    imageproc::morphology::dilate(mask, Norm::LInf, k)
}

/// Closing (`close` iterations) followed by opening (`open` iterations), 3x3 element.
pub fn close_then_open(mask: &GrayImage, close: u8, open: u8) -> GrayImage {
    let closed = if close == 0 {
        mask.clone()
    } else {
        imageproc::morphology::close(mask, Norm::LInf, close)
    };
    if open == 0 {
        return closed;
    }
    imageproc::morphology::open(&closed, Norm::LInf, open)
}

/// Fill every background region that does not touch the image border.
///
/// Background is 4-connected, so this fills exactly the interior of each 8-connected blob's
/// outer contour.
pub fn fill_holes(mask: &GrayImage) -> GrayImage {
    let (w, h) = mask.dimensions();
    let inverted = GrayImage::from_fn(w, h, |x, y| {
        Luma([if mask.get_pixel(x, y)[0] == 0 { 255 } else { 0 }])
    });
    let labels = connected_components(&inverted, Connectivity::Four, Luma([0u8]));

    let max_label = labels.pixels().map(|p| p[0]).max().unwrap_or(0) as usize;
    let mut touches_border = vec![false; max_label + 1];
    for (x, y, p) in labels.enumerate_pixels() {
        if x == 0 || y == 0 || x + 1 == w || y + 1 == h {
            touches_border[p[0] as usize] = true;
        }
    }

    GrayImage::from_fn(w, h, |x, y| {
        let label = labels.get_pixel(x, y)[0] as usize;
        let hole = label != 0 && !touches_border[label];
        Luma([if hole { 255 } else { mask.get_pixel(x, y)[0] }])
    })
}

/// Per-component statistics gathered in one pass over the label image.
#[derive(Clone, Copy, Debug)]
pub struct ComponentStats {
    pub label: u32,
    pub area: u64,
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    sum_x: u64,
    sum_y: u64,
}

impl ComponentStats {
    fn new(label: u32) -> Self {
        Self {
            label,
            area: 0,
            min_x: u32::MAX,
            min_y: u32::MAX,
            max_x: 0,
            max_y: 0,
            sum_x: 0,
            sum_y: 0,
        }
    }

    fn add(&mut self, x: u32, y: u32) {
        self.area += 1;
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.sum_x += u64::from(x);
        self.sum_y += u64::from(y);
    }

    pub fn bbox(&self) -> BBox {
        BBox {
            x: self.min_x,
            y: self.min_y,
            width: self.max_x - self.min_x + 1,
            height: self.max_y - self.min_y + 1,
        }
    }

    pub fn centroid(&self) -> Point {
        let n = self.area.max(1) as f64;
        Point::new(self.sum_x as f64 / n, self.sum_y as f64 / n)
    }
}

/// Label image plus statistics, ordered by label.
pub struct Components {
    labels: ImageBuffer<Luma<u32>, Vec<u32>>,
    pub stats: Vec<ComponentStats>,
}

impl Components {
    /// 0/255 mask of a single component.
    pub fn mask_for(&self, label: u32) -> GrayImage {
        let (w, h) = self.labels.dimensions();
        GrayImage::from_fn(w, h, |x, y| {
            Luma([if self.labels.get_pixel(x, y)[0] == label {
                255
            } else {
                0
            }])
        })
    }
}

/// Label 8-connected foreground components.
pub fn label_components(mask: &GrayImage) -> Components {
    let labels = connected_components(mask, Connectivity::Eight, Luma([0u8]));
    let max_label = labels.pixels().map(|p| p[0]).max().unwrap_or(0);
    let mut stats: Vec<ComponentStats> = (1..=max_label).map(ComponentStats::new).collect();
    for (x, y, p) in labels.enumerate_pixels() {
        let label = p[0];
        if label == 0 {
            continue;
        }
        stats[(label - 1) as usize].add(x, y);
    }
    stats.retain(|s| s.area > 0);
    Components { labels, stats }
}

#[cfg(test)]
#[path = "../../tests/unit/segment/cleanup.rs"]
mod tests;
