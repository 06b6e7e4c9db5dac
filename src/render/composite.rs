use image::RgbImage;

use crate::foundation::core::Frame;
use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::lerp_u8;
use crate::render::blur::MaskBlur;
use crate::render::hand::HandSprite;
use crate::render::reveal::RevealMask;

/// What shows through where nothing has been revealed yet.
#[derive(Clone, Copy, Debug)]
pub enum Backdrop<'a> {
    White,
    Image(&'a RgbImage),
}

/// Deterministic hand wobble for a frame index.
pub fn jitter(index: u64) -> (i32, i32) {
    let i = index as f64;
    let dx = 2.5 * (0.25 * i).sin() + 1.2 * (0.6 * i).sin();
    let dy = 1.8 * (0.35 * i + 0.5).sin() + 1.0 * (0.8 * i).sin();
    (dx as i32, dy as i32)
}

/// Blends `target` over a backdrop through a softened reveal mask.
#[derive(Clone, Debug)]
pub struct Compositor<'a> {
    target: &'a RgbImage,
    backdrop: Backdrop<'a>,
    blur: MaskBlur,
}

impl<'a> Compositor<'a> {
    pub fn new(target: &'a RgbImage, backdrop: Backdrop<'a>, blur: MaskBlur) -> SketchResult<Self> {
        if let Backdrop::Image(bg) = backdrop
            && bg.dimensions() != target.dimensions()
        {
            return Err(SketchError::render(format!(
                "backdrop is {:?}, target is {:?}",
                bg.dimensions(),
                target.dimensions()
            )));
        }
        Ok(Self {
            target,
            backdrop,
            blur,
        })
    }

    pub fn target(&self) -> &RgbImage {
        self.target
    }

    /// Frame for the current reveal state, without a hand.
    pub fn reveal(&self, mask: &RevealMask) -> SketchResult<Frame> {
        if mask.dimensions() != self.target.dimensions() {
            return Err(SketchError::render(format!(
                "reveal mask is {:?}, target is {:?}",
                mask.dimensions(),
                self.target.dimensions()
            )));
        }
        let alpha = self.blur.apply(mask.as_image());
        let mut out = self.target.clone();
        for ((px, a), x) in out.pixels_mut().zip(alpha.iter()).zip(self.backdrop_pixels()) {
            let a = *a;
            for c in 0..3 {
                px.0[c] = lerp_u8(px.0[c], x[c], a);
            }
        }
        Ok(out)
    }

    /// Frame for the current reveal state with the hand tip placed at `tip`.
    pub fn with_hand(
        &self,
        mask: &RevealMask,
        sprite: &HandSprite,
        tip: (i32, i32),
        jitter_index: u64,
    ) -> SketchResult<Frame> {
        let mut frame = self.reveal(mask)?;
        let (jx, jy) = jitter(jitter_index);
        let origin = (tip.0 - sprite.tip_x + jx, tip.1 - sprite.tip_y + jy);
        overlay_hand(&mut frame, sprite, origin);
        Ok(frame)
    }

    fn backdrop_pixels(&self) -> Box<dyn Iterator<Item = [u8; 3]> + '_> {
        match self.backdrop {
            Backdrop::White => Box::new(std::iter::repeat([255u8; 3])),
            Backdrop::Image(bg) => Box::new(bg.pixels().map(|p| p.0)),
        }
    }
}

/// Straight-alpha overlay of `sprite` with its top-left at `origin`, clipped to the frame.
///
/// Returns `false` (frame untouched) when the sprite lies entirely outside.
pub fn overlay_hand(frame: &mut Frame, sprite: &HandSprite, origin: (i32, i32)) -> bool {
    let (fw, fh) = (frame.width() as i64, frame.height() as i64);
    let (sw, sh) = (sprite.image.width() as i64, sprite.image.height() as i64);
    let (ox, oy) = (i64::from(origin.0), i64::from(origin.1));

    let x0 = ox.max(0);
    let y0 = oy.max(0);
    let x1 = (ox + sw).min(fw);
    let y1 = (oy + sh).min(fh);
    if x0 >= x1 || y0 >= y1 {
        return false;
    }

    for y in y0..y1 {
        for x in x0..x1 {
            let src = sprite.image.get_pixel((x - ox) as u32, (y - oy) as u32).0;
            let a = src[3];
            if a == 0 {
                continue;
            }
            let dst = frame.get_pixel_mut(x as u32, y as u32);
            if a == 255 {
                dst.0 = [src[0], src[1], src[2]];
                continue;
            }
            for c in 0..3 {
                dst.0[c] = lerp_u8(src[c], dst.0[c], a);
            }
        }
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
