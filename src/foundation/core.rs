use crate::foundation::error::{SketchError, SketchResult};

pub use kurbo::Point;

/// A rendered frame: tightly packed RGB8, row-major.
pub type Frame = image::RgbImage;

/// Absolute 0-based position of a frame in an output sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> SketchResult<Self> {
        if den == 0 {
            return Err(SketchError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SketchError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole-number rate, e.g. `Fps::integer(30)`.
    pub fn integer(num: u32) -> SketchResult<Self> {
        Self::new(num, 1)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Number of frames covering `secs`, floor semantics.
    ///
    /// A tiny epsilon absorbs binary representation error (`0.3 * 30` is 9, not 8).
    pub fn frames_for_secs(self, secs: f64) -> usize {
        (secs * self.as_f64() + 1e-9).floor().max(0.0) as usize
    }

    /// Trailing pause length for a hold of `secs`.
    pub fn hold_frames(self, secs: f64) -> usize {
        self.frames_for_secs(secs)
    }
}

impl std::fmt::Display for Fps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
