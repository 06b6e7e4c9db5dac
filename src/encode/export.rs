use std::path::PathBuf;

use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, Frame, FrameIndex};
use crate::foundation::error::{SketchError, SketchResult};

/// What a successful file export produced.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub frame_count: usize,
    pub duration_secs: f64,
    pub file_size_bytes: u64,
    pub fps: Fps,
}

/// Push the whole sequence into `sink` in order. All frames must share the first frame's size.
pub fn export_frames(frames: &[Frame], fps: Fps, sink: &mut dyn FrameSink) -> SketchResult<()> {
    let first = frames
        .first()
        .ok_or_else(|| SketchError::encode("no frames to export"))?;
    let (width, height) = first.dimensions();
    sink.begin(SinkConfig { width, height, fps })?;
    let pushed = frames
        .iter()
        .enumerate()
        .try_for_each(|(i, frame)| sink.push_frame(FrameIndex(i as u64), frame));
    if let Err(push_err) = pushed {
        // Let the sink release its resources; the push error is what the caller sees.
        if let Err(end_err) = sink.end() {
            tracing::debug!(error = %end_err, "sink end after failed push");
        }
        return Err(push_err);
    }
    sink.end()
}

/// Encode `frames` to `opts.out_path` through `ffmpeg`.
pub fn encode_to_file(
    frames: &[Frame],
    fps: Fps,
    opts: &FfmpegSinkOpts,
) -> SketchResult<ExportSummary> {
    let mut sink = FfmpegSink::new(opts.clone());
    export_frames(frames, fps, &mut sink)?;

    let file_size_bytes = std::fs::metadata(&opts.out_path)
        .map_err(|e| {
            SketchError::encode(format!(
                "encoded file '{}' is missing: {e}",
                opts.out_path.display()
            ))
        })?
        .len();
    let summary = ExportSummary {
        path: opts.out_path.clone(),
        frame_count: frames.len(),
        duration_secs: fps.frames_to_secs(frames.len() as u64),
        file_size_bytes,
        fps,
    };
    tracing::info!(
        path = %summary.path.display(),
        frames = summary.frame_count,
        bytes = summary.file_size_bytes,
        "encoded"
    );
    Ok(summary)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/export.rs"]
mod tests;
