//! Runtime settings loaded from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::Fps;
use crate::foundation::error::{SketchError, SketchResult};
use crate::generate::GeneratorOpts;

/// Process-level knobs. Every field has a default, so `{}` is a valid settings file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fps: u32,
    pub trailing_hold_secs: f64,
    /// x264 constant rate factor for MP4 output.
    pub video_crf: u8,
    /// Upper bound on the frame rate written into GIFs.
    pub gif_max_fps: u32,
    /// Directory holding `1.png` .. `4.png` (or `.svg`) hand sprites.
    pub hands_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 30,
            trailing_hold_secs: 0.3,
            video_crf: 23,
            gif_max_fps: 15,
            hands_dir: None,
        }
    }
}

impl Settings {
    pub fn from_reader<R: std::io::Read>(r: R) -> SketchResult<Self> {
        let settings: Self = serde_json::from_reader(r)
            .map_err(|e| SketchError::validation(format!("parse settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SketchResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SketchError::validation(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> SketchResult<()> {
        if self.fps == 0 || self.gif_max_fps == 0 {
            return Err(SketchError::validation("frame rates must be > 0"));
        }
        if !self.trailing_hold_secs.is_finite() || self.trailing_hold_secs < 0.0 {
            return Err(SketchError::validation("trailing_hold_secs must be >= 0"));
        }
        if self.video_crf > 51 {
            return Err(SketchError::validation("video_crf must be in 0..=51"));
        }
        Ok(())
    }

    pub fn fps(&self) -> SketchResult<Fps> {
        Fps::integer(self.fps)
    }

    pub fn generator_opts(&self) -> GeneratorOpts {
        GeneratorOpts {
            trailing_hold_secs: self.trailing_hold_secs,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
