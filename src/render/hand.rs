//! Hand sprites: the table of bundled styles, loading from disk and the procedural fallback.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use image::{Rgba, RgbaImage, imageops::FilterType};
use imageproc::point::Point as PolyPoint;

use crate::foundation::error::{SketchError, SketchResult};

/// Named hand style requested by the caller.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HandStyle {
    #[default]
    #[serde(rename = "hand_1")]
    Hand1,
    #[serde(rename = "hand_2")]
    Hand2,
    #[serde(rename = "hand_3")]
    Hand3,
    #[serde(rename = "hand_4")]
    Hand4,
    /// Procedurally drawn pencil-in-hand.
    Generated,
}

/// On-disk asset description for a bundled style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandAsset {
    /// File stem inside the hands directory (`1` -> `1.png` or `1.svg`).
    pub stem: &'static str,
    pub tip_x: u32,
    pub tip_y: u32,
    pub scale: f32,
}

impl HandStyle {
    pub const ALL: [HandStyle; 5] = [
        HandStyle::Hand1,
        HandStyle::Hand2,
        HandStyle::Hand3,
        HandStyle::Hand4,
        HandStyle::Generated,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hand1 => "hand_1",
            Self::Hand2 => "hand_2",
            Self::Hand3 => "hand_3",
            Self::Hand4 => "hand_4",
            Self::Generated => "generated",
        }
    }

    /// Asset table entry; `None` for the procedural style.
    pub fn asset(self) -> Option<HandAsset> {
        let (stem, tip_x, tip_y, scale) = match self {
            Self::Hand1 => ("1", 66, 478, 0.3),
            Self::Hand2 => ("2", 133, 720, 0.25),
            Self::Hand3 => ("3", 80, 25, 0.3),
            Self::Hand4 => ("4", 42, 235, 0.35),
            Self::Generated => return None,
        };
        Some(HandAsset {
            stem,
            tip_x,
            tip_y,
            scale,
        })
    }
}

impl std::str::FromStr for HandStyle {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| {
                SketchError::validation(format!(
                    "unknown hand style '{s}' (expected hand_1..hand_4 or generated)"
                ))
            })
    }
}

/// Straight-alpha RGBA sprite with the pencil tip location in sprite pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct HandSprite {
    pub image: RgbaImage,
    pub tip_x: i32,
    pub tip_y: i32,
}

impl HandSprite {
    pub fn new(image: RgbaImage, tip_x: i32, tip_y: i32) -> Self {
        Self {
            image,
            tip_x,
            tip_y,
        }
    }

    /// Build from a full-size source, scaling image and tip by `scale`.
    pub fn scaled(source: RgbaImage, tip_x: u32, tip_y: u32, scale: f32) -> SketchResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SketchError::asset("hand scale must be > 0"));
        }
        let new_w = ((source.width() as f32 * scale) as u32).max(1);
        let new_h = ((source.height() as f32 * scale) as u32).max(1);
        let image = image::imageops::resize(&source, new_w, new_h, FilterType::Triangle);
        Ok(Self {
            image,
            tip_x: (tip_x as f32 * scale) as i32,
            tip_y: (tip_y as f32 * scale) as i32,
        })
    }

    /// The procedural pencil-in-hand used when no asset is available.
    pub fn generated() -> Self {
        const SIZE: u32 = 200;
        let (tip_x, tip_y) = (25.0f32, 175.0f32);
        let end = (SIZE as f32 - 40.0, 30.0f32);
        let along = |f: f32| (tip_x + (end.0 - tip_x) * f, tip_y + (end.1 - tip_y) * f);

        let mut img = RgbaImage::new(SIZE, SIZE);

        // Shaft.
        thick_line(&mut img, (tip_x, tip_y), end, 14.0, Rgba([255, 210, 80, 255]));

        // Graphite tip.
        draw_polygon(
            &mut img,
            &[
                (tip_x - 6.0, tip_y - 20.0),
                (tip_x + 6.0, tip_y - 20.0),
                (tip_x, tip_y),
            ],
            Rgba([50, 50, 50, 255]),
        );

        fill_rotated_ellipse(&mut img, along(0.8), (9.0, 5.0), -55.0, Rgba([180, 180, 180, 255]));
        fill_rotated_ellipse(&mut img, end, (10.0, 7.0), -55.0, Rgba([220, 160, 180, 255]));
        fill_rotated_ellipse(&mut img, along(0.45), (48.0, 36.0), -55.0, Rgba([225, 190, 170, 245]));

        Self::new(img, tip_x as i32, tip_y as i32)
    }
}

fn draw_polygon(img: &mut RgbaImage, pts: &[(f32, f32)], color: Rgba<u8>) {
    let mut poly: Vec<PolyPoint<i32>> = pts
        .iter()
        .map(|&(x, y)| PolyPoint::new(x.round() as i32, y.round() as i32))
        .collect();
    poly.dedup();
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    if poly.len() < 3 {
        return;
    }
    imageproc::drawing::draw_polygon_mut(img, &poly, color);
}

fn thick_line(img: &mut RgbaImage, a: (f32, f32), b: (f32, f32), width: f32, color: Rgba<u8>) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len <= f32::EPSILON {
        return;
    }
    let half = width / 2.0;
    let (nx, ny) = (-dy / len * half, dx / len * half);
    draw_polygon(
        img,
        &[
            (a.0 + nx, a.1 + ny),
            (b.0 + nx, b.1 + ny),
            (b.0 - nx, b.1 - ny),
            (a.0 - nx, a.1 - ny),
        ],
        color,
    );
    let r = half.round() as i32;
    for (x, y) in [a, b] {
        imageproc::drawing::draw_filled_circle_mut(
            img,
            (x.round() as i32, y.round() as i32),
            r,
            color,
        );
    }
}

fn fill_rotated_ellipse(
    img: &mut RgbaImage,
    center: (f32, f32),
    axes: (f32, f32),
    angle_deg: f32,
    color: Rgba<u8>,
) {
    const SEGMENTS: usize = 48;
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let pts: Vec<(f32, f32)> = (0..SEGMENTS)
        .map(|i| {
            let t = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
            let (ex, ey) = (axes.0 * t.cos(), axes.1 * t.sin());
            (
                center.0 + ex * cos - ey * sin,
                center.1 + ex * sin + ey * cos,
            )
        })
        .collect();
    draw_polygon(img, &pts, color);
}

/// Read-only sprite cache keyed by style. Built once, then shared (`Arc`) across generations.
#[derive(Clone, Debug)]
pub struct HandLibrary {
    sprites: BTreeMap<HandStyle, Arc<HandSprite>>,
    fallback: Arc<HandSprite>,
}

impl Default for HandLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HandLibrary {
    /// Library with only the procedural sprite.
    pub fn builtin() -> Self {
        let fallback = Arc::new(HandSprite::generated());
        let mut sprites = BTreeMap::new();
        sprites.insert(HandStyle::Generated, Arc::clone(&fallback));
        Self { sprites, fallback }
    }

    /// Load every table entry found in `dir`. Missing files are skipped; so are unreadable ones,
    /// with a warning.
    pub fn load(dir: &Path) -> Self {
        let mut lib = Self::builtin();
        for style in HandStyle::ALL {
            let Some(asset) = style.asset() else {
                continue;
            };
            match load_asset(dir, asset) {
                Ok(Some(sprite)) => {
                    tracing::debug!(style = style.as_str(), "loaded hand sprite");
                    lib.sprites.insert(style, Arc::new(sprite));
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(style = style.as_str(), error = %err, "skipping hand sprite");
                }
            }
        }
        lib
    }

    /// Register or replace a sprite.
    pub fn with_sprite(mut self, style: HandStyle, sprite: HandSprite) -> Self {
        let sprite = Arc::new(sprite);
        if style == HandStyle::Generated {
            self.fallback = Arc::clone(&sprite);
        }
        self.sprites.insert(style, sprite);
        self
    }

    /// Sprite for `style`, or the procedural fallback when the asset was not available.
    pub fn sprite(&self, style: HandStyle) -> &HandSprite {
        self.sprites.get(&style).unwrap_or(&self.fallback).as_ref()
    }
}

fn load_asset(dir: &Path, asset: HandAsset) -> SketchResult<Option<HandSprite>> {
    let png = dir.join(format!("{}.png", asset.stem));
    let svg = dir.join(format!("{}.svg", asset.stem));
    let source = if png.is_file() {
        let img = image::open(&png).with_context(|| format!("decode '{}'", png.display()))?;
        // Gray and RGB sources get an opaque alpha channel here.
        img.to_rgba8()
    } else if svg.is_file() {
        let bytes = std::fs::read(&svg).with_context(|| format!("read '{}'", svg.display()))?;
        rasterize_svg(&bytes)?
    } else {
        return Ok(None);
    };
    HandSprite::scaled(source, asset.tip_x, asset.tip_y, asset.scale).map(Some)
}

/// Rasterize an SVG at its intrinsic size into straight-alpha RGBA8.
pub fn rasterize_svg(bytes: &[u8]) -> SketchResult<RgbaImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    let size = tree.size();
    let (w, h) = (size.width().ceil() as u32, size.height().ceil() as u32);
    if w == 0 || h == 0 || w > 16_384 || h > 16_384 {
        return Err(SketchError::asset(format!("svg has unusable size {w}x{h}")));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| SketchError::asset("failed to allocate svg pixmap"))?;
    resvg::render(&tree, resvg::tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let mut data = pixmap.take();
    unpremultiply_rgba8_in_place(&mut data);
    RgbaImage::from_raw(w, h, data).ok_or_else(|| SketchError::asset("svg pixmap size mismatch"))
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/hand.rs"]
mod tests;
