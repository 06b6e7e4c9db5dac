//! Encoding sinks and file export.
//!
//! Sinks consume finished frames in sequence order. Generation never streams: the full frame list
//! exists before the first frame reaches a sink.

/// `ffmpeg`-based sink (MP4 and GIF output via the system `ffmpeg`).
pub mod ffmpeg;
/// Whole-sequence export helpers.
pub mod export;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;

pub use export::{ExportSummary, encode_to_file, export_frames};
pub use ffmpeg::{FfmpegSink, FfmpegSinkOpts, OutputFormat, is_ffmpeg_on_path};
pub use sink::{FrameSink, InMemorySink, SinkConfig};
