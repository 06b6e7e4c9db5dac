//! Diagnostic rendering of detected elements and their draw order.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::order::{ElementDirection, NUM_BANDS};
use crate::segment::DetectedElement;

const DIVIDER: Rgb<u8> = Rgb([255, 255, 0]);

const PALETTE: [Rgb<u8>; 6] = [
    Rgb([0, 0, 255]),
    Rgb([0, 255, 0]),
    Rgb([255, 0, 0]),
    Rgb([0, 255, 255]),
    Rgb([255, 0, 255]),
    Rgb([255, 255, 0]),
];

/// Copy of `image` with band dividers, element boxes and draw-order tallies.
///
/// `ordered` is expected in draw order, as returned by [`crate::order::ordered_elements`].
pub fn render_element_overlay(
    image: &RgbImage,
    ordered: &[DetectedElement],
    direction: ElementDirection,
) -> RgbImage {
    let mut out = image.clone();
    let (w, h) = image.dimensions();
    let (wf, hf) = (w as f32, h as f32);

    match direction {
        ElementDirection::Default => hline(&mut out, (h / 2) as f32),
        ElementDirection::RowWise => {
            for i in 1..NUM_BANDS {
                hline(&mut out, (i as f32 * hf / NUM_BANDS as f32).floor());
            }
        }
        ElementDirection::ColumnWise => {
            for i in 1..NUM_BANDS {
                vline(&mut out, (i as f32 * wf / NUM_BANDS as f32).floor());
            }
        }
    }

    for (index, element) in ordered.iter().enumerate() {
        let color = PALETTE[index % PALETTE.len()];
        let b = element.bbox;
        if b.width == 0 || b.height == 0 {
            continue;
        }
        let (x, y) = (b.x as i32, b.y as i32);
        draw_hollow_rect_mut(&mut out, Rect::at(x, y).of_size(b.width, b.height), color);
        if b.width > 2 && b.height > 2 {
            draw_hollow_rect_mut(
                &mut out,
                Rect::at(x + 1, y + 1).of_size(b.width - 2, b.height - 2),
                color,
            );
        }
        tally(&mut out, (x + 5) as f32, (y + 5) as f32, index + 1, color);
    }
    out
}

fn hline(img: &mut RgbImage, y: f32) {
    let w = img.width() as f32;
    for dy in 0..2 {
        draw_line_segment_mut(img, (0.0, y + dy as f32), (w, y + dy as f32), DIVIDER);
    }
}

fn vline(img: &mut RgbImage, x: f32) {
    let h = img.height() as f32;
    for dx in 0..2 {
        draw_line_segment_mut(img, (x + dx as f32, 0.0), (x + dx as f32, h), DIVIDER);
    }
}

/// `count` vertical marks, every fifth struck through.
fn tally(img: &mut RgbImage, x0: f32, y0: f32, count: usize, color: Rgb<u8>) {
    const MARK_H: f32 = 8.0;
    const STEP: f32 = 3.0;
    const GROUP_GAP: f32 = 4.0;
    let mut x = x0;
    for n in 1..=count {
        if n % 5 == 0 {
            draw_line_segment_mut(img, (x - 4.0 * STEP, y0 + MARK_H), (x, y0), color);
            x += GROUP_GAP;
        } else {
            draw_line_segment_mut(img, (x, y0), (x, y0 + MARK_H), color);
            x += STEP;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/debug.rs"]
mod tests;
