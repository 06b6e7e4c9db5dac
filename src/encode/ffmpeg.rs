use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, Frame, FrameIndex};
use crate::foundation::error::{SketchError, SketchResult};

/// Container written by [`FfmpegSink`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Mp4,
    Gif,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Gif => "gif",
        }
    }

    /// Format implied by a file extension, if recognized.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        ext.parse().ok()
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mp4" => Ok(Self::Mp4),
            "gif" => Ok(Self::Gif),
            other => Err(SketchError::validation(format!(
                "unknown output format '{other}' (expected mp4 or gif)"
            ))),
        }
    }
}

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    pub format: OutputFormat,
    /// x264 constant rate factor (MP4 only).
    pub crf: u8,
    /// Cap on the written frame rate (GIF only).
    pub gif_max_fps: u32,
    /// Encoder executable, looked up on `PATH` when not a path.
    pub program: PathBuf,
}

impl FfmpegSinkOpts {
    /// Options for `out_path`, with the format taken from its extension (MP4 when unknown).
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        let out_path = out_path.into();
        let format = OutputFormat::from_path(&out_path).unwrap_or_default();
        Self {
            out_path,
            overwrite: true,
            format,
            crf: 23,
            gif_max_fps: 15,
            program: PathBuf::from("ffmpeg"),
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Output-side arguments for the selected format.
    pub fn output_args(&self, fps: Fps) -> Vec<String> {
        match self.format {
            OutputFormat::Mp4 => {
                let crf = self.crf.to_string();
                [
                    "-an",
                    "-vf",
                    "pad=ceil(iw/2)*2:ceil(ih/2)*2:color=white",
                    "-c:v",
                    "libx264",
                    "-preset",
                    "medium",
                    "-crf",
                    crf.as_str(),
                    "-pix_fmt",
                    "yuv420p",
                    "-movflags",
                    "+faststart",
                ]
                .map(String::from)
                .to_vec()
            }
            OutputFormat::Gif => {
                let mut args = vec![
                    "-filter_complex".to_owned(),
                    "split[s0][s1];[s0]palettegen=stats_mode=diff[p];\
                     [s1][p]paletteuse=dither=bayer:bayer_scale=5"
                        .to_owned(),
                ];
                if fps.as_f64() > f64::from(self.gif_max_fps) {
                    args.extend(["-r".to_owned(), self.gif_max_fps.to_string()]);
                }
                args.extend(["-loop".to_owned(), "0".to_owned()]);
                args
            }
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw `rgb24` frames to its stdin.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            cfg: None,
            last_idx: None,
        }
    }

    pub fn opts(&self) -> &FfmpegSinkOpts {
        &self.opts
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> SketchResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(SketchError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(SketchError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(SketchError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_program_available(&self.opts.program) {
            return Err(SketchError::encode(format!(
                "ffmpeg is required for video encoding, but '{}' could not be run",
                self.opts.program.display()
            )));
        }

        let mut cmd = Command::new(&self.opts.program);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0"]);
        cmd.args(self.opts.output_args(cfg.fps));
        cmd.arg(&self.opts.out_path);

        tracing::debug!(
            format = self.opts.format.as_str(),
            out = %self.opts.out_path.display(),
            "spawning ffmpeg"
        );
        let mut child = cmd.spawn().map_err(|e| {
            SketchError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SketchError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| SketchError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> SketchResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SketchError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(SketchError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.dimensions() != (cfg.width, cfg.height) {
            return Err(SketchError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SketchError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        if let Err(e) = stdin.write_all(frame.as_raw()) {
            // ffmpeg closed its input; its exit status and stderr say why.
            tracing::debug!(error = %e, "ffmpeg stdin closed early");
            self.finish()?;
            return Err(SketchError::encode(format!(
                "failed to write frame to ffmpeg stdin: {e}"
            )));
        }
        Ok(())
    }

    fn end(&mut self) -> SketchResult<()> {
        self.finish()
    }
}

impl FfmpegSink {
    /// Close stdin, wait for the child and report a failed exit with its stderr.
    fn finish(&mut self) -> SketchResult<()> {
        drop(self.stdin.take());
        self.cfg = None;
        let mut child = self
            .child
            .take()
            .ok_or_else(|| SketchError::encode("ffmpeg sink not started"))?;

        let status = child.wait().map_err(|e| {
            SketchError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| SketchError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| SketchError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(SketchError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // Rawvideo input rate goes before `-i`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> SketchResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    is_program_available(Path::new("ffmpeg"))
}

/// Return `true` when `program -version` runs and exits successfully.
pub fn is_program_available(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
