//! Frame generation: dispatch by drawing mode and direction, then run the reveal passes.
//!
//! A [`FrameGenerator`] holds only read-only components (segmenter, outline builder, hand
//! library), so one instance can serve concurrent requests from several threads.

mod passes;

use std::sync::Arc;

use image::RgbImage;

use crate::foundation::core::{Fps, Frame};
use crate::foundation::error::{SketchError, SketchResult};
use crate::order::{ElementDirection, ordered_elements};
use crate::outline::OutlineBuilder;
use crate::path::SweepDirection;
use crate::render::hand::{HandLibrary, HandSprite, HandStyle};
use crate::segment::{DetectedElement, Segmenter};

/// What gets drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingMode {
    /// Reveal the full-color image.
    #[default]
    Normal,
    /// Reveal line art only.
    OutlineOnly,
    /// Line art over the first half of the budget, color over it in the second.
    OutlineThenFill,
}

impl DrawingMode {
    pub const ALL: [DrawingMode; 3] = [Self::Normal, Self::OutlineOnly, Self::OutlineThenFill];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::OutlineOnly => "outline_only",
            Self::OutlineThenFill => "outline_then_fill",
        }
    }
}

impl std::str::FromStr for DrawingMode {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| SketchError::validation(format!("unknown drawing mode '{s}'")))
    }
}

/// How the pencil moves across the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingDirection {
    #[default]
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
    CenterOut,
    /// Detect elements and draw them one at a time.
    ElementByElement,
}

impl DrawingDirection {
    pub const ALL: [DrawingDirection; 6] = [
        Self::LeftToRight,
        Self::RightToLeft,
        Self::TopToBottom,
        Self::BottomToTop,
        Self::CenterOut,
        Self::ElementByElement,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftToRight => "left_to_right",
            Self::RightToLeft => "right_to_left",
            Self::TopToBottom => "top_to_bottom",
            Self::BottomToTop => "bottom_to_top",
            Self::CenterOut => "center_out",
            Self::ElementByElement => "element_by_element",
        }
    }

    /// The sweep pattern for this direction, `None` for element mode.
    pub fn sweep(self) -> Option<SweepDirection> {
        match self {
            Self::LeftToRight => Some(SweepDirection::LeftToRight),
            Self::RightToLeft => Some(SweepDirection::RightToLeft),
            Self::TopToBottom => Some(SweepDirection::TopToBottom),
            Self::BottomToTop => Some(SweepDirection::BottomToTop),
            Self::CenterOut => Some(SweepDirection::CenterOut),
            Self::ElementByElement => None,
        }
    }
}

impl std::str::FromStr for DrawingDirection {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| SketchError::validation(format!("unknown drawing direction '{s}'")))
    }
}

/// Parameters of one generation call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GenerateRequest {
    pub duration_secs: f64,
    pub fps: Fps,
    #[serde(default)]
    pub hand: HandStyle,
    #[serde(default)]
    pub direction: DrawingDirection,
    /// Only consulted for [`DrawingDirection::ElementByElement`].
    #[serde(default)]
    pub element_direction: ElementDirection,
    #[serde(default)]
    pub mode: DrawingMode,
}

impl GenerateRequest {
    pub fn new(duration_secs: f64, fps: Fps) -> Self {
        Self {
            duration_secs,
            fps,
            hand: HandStyle::default(),
            direction: DrawingDirection::default(),
            element_direction: ElementDirection::default(),
            mode: DrawingMode::default(),
        }
    }

    pub fn with_hand(mut self, hand: HandStyle) -> Self {
        self.hand = hand;
        self
    }

    pub fn with_direction(mut self, direction: DrawingDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_element_direction(mut self, element_direction: ElementDirection) -> Self {
        self.element_direction = element_direction;
        self
    }

    pub fn with_mode(mut self, mode: DrawingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Animated frames before any trailing hold: `floor(duration * fps)`.
    pub fn total_frames(&self) -> usize {
        self.fps.frames_for_secs(self.duration_secs)
    }

    pub fn validate(&self) -> SketchResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(SketchError::validation("duration must be a positive number of seconds"));
        }
        if self.total_frames() == 0 {
            return Err(SketchError::validation(format!(
                "duration {}s at {} fps yields no frames",
                self.duration_secs, self.fps
            )));
        }
        Ok(())
    }
}

/// Generator-wide tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeneratorOpts {
    /// Length of the hand-free pause appended after each drawing pass.
    pub trailing_hold_secs: f64,
}

impl Default for GeneratorOpts {
    fn default() -> Self {
        Self {
            trailing_hold_secs: 0.3,
        }
    }
}

/// Produces the full frame list for a request.
#[derive(Clone, Debug)]
pub struct FrameGenerator {
    segmenter: Arc<Segmenter>,
    outline: OutlineBuilder,
    hands: Arc<HandLibrary>,
    opts: GeneratorOpts,
}

impl Default for FrameGenerator {
    fn default() -> Self {
        Self::new(Arc::new(HandLibrary::builtin()), GeneratorOpts::default())
    }
}

impl FrameGenerator {
    pub fn new(hands: Arc<HandLibrary>, opts: GeneratorOpts) -> Self {
        Self {
            segmenter: Arc::new(Segmenter::default()),
            outline: OutlineBuilder::default(),
            hands,
            opts,
        }
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    pub fn hands(&self) -> &HandLibrary {
        &self.hands
    }

    pub fn opts(&self) -> &GeneratorOpts {
        &self.opts
    }

    /// Render every frame for `image`.
    ///
    /// Output length is `total_frames` plus one trailing hold per drawing pass (two passes in
    /// [`DrawingMode::OutlineThenFill`]). Element mode on an image without usable elements falls
    /// back to a left-to-right sweep.
    #[tracing::instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn generate(&self, image: &RgbImage, req: &GenerateRequest) -> SketchResult<Vec<Frame>> {
        if image.width() == 0 || image.height() == 0 {
            return Err(SketchError::validation("source image must be non-empty"));
        }
        req.validate()?;

        let total = req.total_frames();
        let hold = req.fps.hold_frames(self.opts.trailing_hold_secs);
        let sprite = self.hands.sprite(req.hand);
        tracing::debug!(total, hold, "frame budget");

        let mut frames = Vec::with_capacity(total + 2 * hold);
        match req.mode {
            DrawingMode::Normal => {
                self.draw_with_direction(image, total, req, sprite, hold, &mut frames)?;
            }
            DrawingMode::OutlineOnly => {
                let outline = self.outline.build(image)?;
                self.draw_with_direction(&outline, total, req, sprite, hold, &mut frames)?;
            }
            DrawingMode::OutlineThenFill => {
                let outline = self.outline.build(image)?;
                let first = total / 2;
                self.draw_with_direction(&outline, first, req, sprite, hold, &mut frames)?;
                // Element mode fills color with a left-to-right sweep.
                let sweep = req.direction.sweep().unwrap_or(SweepDirection::LeftToRight);
                passes::fill_over(&outline, image, total - first, sweep, sprite, &mut frames)?;
                passes::hold(image, hold, &mut frames);
            }
        }

        tracing::info!(frames = frames.len(), mode = req.mode.as_str(), "generated frames");
        Ok(frames)
    }

    /// Detected elements of `target` in draw order, or `None` when nothing usable was found.
    pub fn plan_elements(
        &self,
        target: &RgbImage,
        direction: ElementDirection,
    ) -> SketchResult<Option<Vec<DetectedElement>>> {
        let detected = self.segmenter.detect(target)?;
        if detected.is_empty() {
            return Ok(None);
        }
        let ordered = ordered_elements(detected, target.width(), target.height(), direction);
        Ok(Some(ordered))
    }

    fn draw_with_direction(
        &self,
        target: &RgbImage,
        total: usize,
        req: &GenerateRequest,
        sprite: &HandSprite,
        hold: usize,
        out: &mut Vec<Frame>,
    ) -> SketchResult<()> {
        let sweep = match req.direction.sweep() {
            Some(sweep) => sweep,
            None => match self.plan_elements(target, req.element_direction)? {
                Some(elements) => {
                    tracing::debug!(count = elements.len(), "drawing element by element");
                    passes::elements(target, &elements, total, sprite, out)?;
                    passes::hold(target, hold, out);
                    return Ok(());
                }
                None => {
                    tracing::warn!("no drawable elements detected, sweeping left to right");
                    SweepDirection::LeftToRight
                }
            },
        };
        passes::sweep(target, total, sweep, sprite, out)?;
        passes::hold(target, hold, out);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/generate/mod.rs"]
mod tests;
