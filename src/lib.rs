//! Sketchreel turns a still image into the frames of a hand-drawn reveal animation.
//!
//! The pipeline is synchronous and deterministic:
//!
//! - [`Segmenter`] finds drawable elements (element mode only)
//! - [`order`] arranges them into draw order
//! - [`path`] plans the pencil trajectory with an exact frame count
//! - [`render`] turns reveal progress into frames and overlays the hand
//! - [`FrameGenerator`] ties these together and returns the whole frame list
//!
//! Encoding to MP4/GIF lives in [`encode`] and consumes the finished list.
#![forbid(unsafe_code)]

mod foundation;

/// Runtime settings.
pub mod config;
/// Element overlay for inspecting detection and ordering.
pub mod debug;
/// Encoding sinks.
pub mod encode;
/// Request dispatch and the reveal passes.
pub mod generate;
/// Element ordering strategies.
pub mod order;
/// Line-art derivation.
pub mod outline;
/// Trajectory planning.
pub mod path;
/// Reveal masks, compositing and hand sprites.
pub mod render;
/// Element detection.
pub mod segment;

pub use crate::foundation::core::{Fps, Frame, FrameIndex, Point};
pub use crate::foundation::error::{SketchError, SketchResult};

pub use crate::config::Settings;
pub use crate::debug::render_element_overlay;
pub use crate::encode::{
    ExportSummary, FfmpegSink, FfmpegSinkOpts, FrameSink, InMemorySink, OutputFormat, SinkConfig,
    encode_to_file, export_frames,
};
pub use crate::generate::{
    DrawingDirection, DrawingMode, FrameGenerator, GenerateRequest, GeneratorOpts,
};
pub use crate::order::ElementDirection;
pub use crate::outline::OutlineBuilder;
pub use crate::path::SweepDirection;
pub use crate::render::hand::{HandLibrary, HandSprite, HandStyle};
pub use crate::segment::{BBox, DetectedElement, Segmenter, SegmenterOpts};
