//! Cumulative reveal state and brush strokes.

use image::{GrayImage, Luma};

use crate::foundation::core::Point;

/// Integer pixel position of a path sample (truncating, like the stroke rasterizer expects).
pub fn pixel_of(p: Point) -> (i32, i32) {
    (p.x as i32, p.y as i32)
}

/// Round brush: a thick line from the previous sample plus a disc at the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brush {
    pub radius: i32,
}

impl Brush {
    pub fn new(radius: i32) -> Self {
        Self {
            radius: radius.max(1),
        }
    }

    /// Full-frame sweeps: `max(15, min(w, h) / 25)`.
    pub fn for_sweep(width: u32, height: u32) -> Self {
        Self::new((width.min(height) / 25).max(15) as i32)
    }

    /// Color fill over an outline: `max(20, min(w, h) / 20)`.
    pub fn for_fill_over(width: u32, height: u32) -> Self {
        Self::new((width.min(height) / 20).max(20) as i32)
    }

    /// One element's box: `max(8, min(w, h) / 8)`.
    pub fn for_element(width: u32, height: u32) -> Self {
        Self::new((width.min(height) / 8).max(8) as i32)
    }

    /// Paint one stroke into `mask`.
    pub fn stamp(self, mask: &mut GrayImage, from: Option<(i32, i32)>, to: (i32, i32)) {
        if let Some(from) = from {
            fill_capsule(mask, from, to, self.radius);
        }
        imageproc::drawing::draw_filled_circle_mut(mask, to, self.radius, Luma([255u8]));
    }
}

fn fill_capsule(mask: &mut GrayImage, a: (i32, i32), b: (i32, i32), radius: i32) {
    let (w, h) = (mask.width() as i32, mask.height() as i32);
    if w == 0 || h == 0 {
        return;
    }
    let x0 = (a.0.min(b.0) - radius).max(0);
    let x1 = (a.0.max(b.0) + radius).min(w - 1);
    let y0 = (a.1.min(b.1) - radius).max(0);
    let y1 = (a.1.max(b.1) + radius).min(h - 1);
    if x0 > x1 || y0 > y1 {
        return;
    }

    let (ax, ay) = (f64::from(a.0), f64::from(a.1));
    let (dx, dy) = (f64::from(b.0) - ax, f64::from(b.1) - ay);
    let len2 = dx * dx + dy * dy;
    let r2 = f64::from(radius) * f64::from(radius);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let (px, py) = (f64::from(x) - ax, f64::from(y) - ay);
            let t = if len2 > 0.0 {
                ((px * dx + py * dy) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (ex, ey) = (px - t * dx, py - t * dy);
            if ex * ex + ey * ey <= r2 {
                mask.put_pixel(x as u32, y as u32, Luma([255]));
            }
        }
    }
}

/// Pixels revealed so far in one generation run.
///
/// Only additive operations are exposed, so a pixel never returns to hidden.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealMask {
    pixels: GrayImage,
}

impl RevealMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: GrayImage::new(width, height),
        }
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Stroke directly into the cumulative mask.
    pub fn stroke(&mut self, brush: Brush, from: Option<(i32, i32)>, to: (i32, i32)) {
        brush.stamp(&mut self.pixels, from, to);
    }

    /// Union another 0..=255 mask into this one (per-pixel max).
    pub fn union(&mut self, other: &GrayImage) {
        crate::segment::cleanup::or_in_place(&mut self.pixels, other);
    }

    /// Snapshot of `self ∪ (stroke ∩ clip)`; `self` is left untouched.
    pub fn with_clipped(&self, stroke: &GrayImage, clip: &GrayImage) -> RevealMask {
        let mut out = self.clone();
        for ((o, &s), &c) in out.pixels.iter_mut().zip(stroke.iter()).zip(clip.iter()) {
            *o = (*o).max(s.min(c));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/reveal.rs"]
mod tests;
