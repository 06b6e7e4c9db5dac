use image::{GrayImage, RgbImage};

use crate::foundation::core::{Frame, Point};
use crate::foundation::error::SketchResult;
use crate::path::{FrameBudget, SweepDirection, element_fill_path, sweep_path, travel_path};
use crate::render::blur::MaskBlur;
use crate::render::composite::{Backdrop, Compositor};
use crate::render::hand::HandSprite;
use crate::render::reveal::{Brush, RevealMask, pixel_of};
use crate::segment::DetectedElement;

const SWEEP_BLUR: u32 = 5;
const FILL_OVER_BLUR: u32 = 7;
const ELEMENT_BLUR: u32 = 5;

/// Reveal `target` over white along a full-frame sweep. Jitter restarts at 0.
pub(super) fn sweep(
    target: &RgbImage,
    total: usize,
    direction: SweepDirection,
    sprite: &HandSprite,
    out: &mut Vec<Frame>,
) -> SketchResult<()> {
    let comp = Compositor::new(target, Backdrop::White, MaskBlur::for_kernel_size(SWEEP_BLUR)?)?;
    let (w, h) = target.dimensions();
    stroke_path(&comp, Brush::for_sweep(w, h), direction, total, sprite, out)
}

/// Reveal `color` over `outline` along a full-frame sweep with the wider fill brush.
pub(super) fn fill_over(
    outline: &RgbImage,
    color: &RgbImage,
    total: usize,
    direction: SweepDirection,
    sprite: &HandSprite,
    out: &mut Vec<Frame>,
) -> SketchResult<()> {
    let comp = Compositor::new(
        color,
        Backdrop::Image(outline),
        MaskBlur::for_kernel_size(FILL_OVER_BLUR)?,
    )?;
    let (w, h) = color.dimensions();
    stroke_path(&comp, Brush::for_fill_over(w, h), direction, total, sprite, out)
}

fn stroke_path(
    comp: &Compositor<'_>,
    brush: Brush,
    direction: SweepDirection,
    total: usize,
    sprite: &HandSprite,
    out: &mut Vec<Frame>,
) -> SketchResult<()> {
    let (w, h) = comp.target().dimensions();
    let mut mask = RevealMask::new(w, h);
    let mut prev = None;
    for (i, p) in sweep_path(w, h, total, direction).into_iter().enumerate() {
        let at = pixel_of(p);
        mask.stroke(brush, prev, at);
        prev = Some(at);
        out.push(comp.with_hand(&mask, sprite, at, i as u64)?);
    }
    Ok(())
}

/// Draw `elements` one at a time, travelling between them, over exactly `total` frames.
///
/// Strokes are clipped to the element's silhouette; once an element is done its whole mask
/// joins the reveal. Jitter is indexed by position in this pass.
pub(super) fn elements(
    target: &RgbImage,
    elements: &[DetectedElement],
    total: usize,
    sprite: &HandSprite,
    out: &mut Vec<Frame>,
) -> SketchResult<()> {
    let comp = Compositor::new(target, Backdrop::White, MaskBlur::for_kernel_size(ELEMENT_BLUR)?)?;
    let (w, h) = target.dimensions();
    let budget = FrameBudget::new(total, elements.len());
    tracing::debug!(
        elements = elements.len(),
        travel = budget.travel_frames(),
        draw = budget.draw_frames_per(),
        "element budget"
    );

    let mut cumulative = RevealMask::new(w, h);
    let mut last: Option<Point> = None;
    let mut used = 0usize;

    for (index, element) in elements.iter().enumerate() {
        let bbox = element.bbox;
        let entry = Point::new(
            f64::from(bbox.x + bbox.width / 2),
            f64::from(bbox.y),
        );

        if let Some(from) = last {
            for p in travel_path(from, entry, budget.travel_frames()) {
                out.push(comp.with_hand(&cumulative, sprite, pixel_of(p), used as u64)?);
                used += 1;
            }
        }

        let allotted = budget.allot(index, used);
        let brush = Brush::for_element(bbox.width, bbox.height);
        let mut strokes = GrayImage::new(w, h);
        let mut prev = None;
        for p in element_fill_path(bbox, allotted) {
            let at = pixel_of(p);
            brush.stamp(&mut strokes, prev, at);
            prev = Some(at);
            let shown = cumulative.with_clipped(&strokes, &element.mask);
            out.push(comp.with_hand(&shown, sprite, at, used as u64)?);
            used += 1;
        }

        cumulative.union(&element.mask);
        last = prev.map(|(x, y)| Point::new(f64::from(x), f64::from(y)));
    }
    Ok(())
}

/// Hand-free pause on the finished image.
pub(super) fn hold(image: &RgbImage, frames: usize, out: &mut Vec<Frame>) {
    out.extend(std::iter::repeat_n(image, frames).cloned());
}
