use crate::foundation::core::Point;
use crate::path::{fit_len, strip_t};

/// Inset from the frame edge kept by every sweep.
pub const SWEEP_MARGIN: f64 = 5.0;

/// Total spiral rotation over the whole path, in radians.
const SPIRAL_TURNS_RAD: f64 = 14.0 * std::f64::consts::PI;

/// Full-frame sweep patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepDirection {
    /// Vertical serpentine strokes, columns advancing left to right.
    LeftToRight,
    /// Vertical serpentine strokes, columns advancing right to left.
    RightToLeft,
    /// Horizontal serpentine strokes, rows advancing top to bottom.
    TopToBottom,
    /// Horizontal serpentine strokes, rows advancing bottom to top.
    BottomToTop,
    /// Spiral from the center outwards.
    CenterOut,
}

#[derive(Clone, Copy)]
enum Axis {
    /// Strips are columns; travel is along y.
    Columns,
    /// Strips are rows; travel is along x.
    Rows,
}

/// Sweep trajectory of exactly `total_frames` samples over a `width x height` frame.
pub fn sweep_path(
    width: u32,
    height: u32,
    total_frames: usize,
    direction: SweepDirection,
) -> Vec<Point> {
    let (w, h) = (f64::from(width), f64::from(height));
    let path = match direction {
        SweepDirection::LeftToRight => serpentine(w, h, total_frames, Axis::Columns, false),
        SweepDirection::RightToLeft => serpentine(w, h, total_frames, Axis::Columns, true),
        SweepDirection::TopToBottom => serpentine(w, h, total_frames, Axis::Rows, false),
        SweepDirection::BottomToTop => serpentine(w, h, total_frames, Axis::Rows, true),
        SweepDirection::CenterOut => spiral(width, height, total_frames),
    };
    fit_len(
        path,
        total_frames,
        Point::new(f64::from(width / 2), f64::from(height / 2)),
    )
}

/// Number of strips for a cross-axis extent: `max(8, extent / 40)`.
pub fn strip_count(extent: u32) -> usize {
    (extent / 40).max(8) as usize
}

fn serpentine(w: f64, h: f64, total_frames: usize, axis: Axis, reverse: bool) -> Vec<Point> {
    let m = SWEEP_MARGIN;
    let (cross, along) = match axis {
        Axis::Columns => (w, h),
        Axis::Rows => (h, w),
    };
    let strips = strip_count(cross as u32);
    let strip_size = (cross - 2.0 * m) / strips as f64;
    let per_strip = (total_frames / strips).max(1);
    let span = along - 2.0 * m;

    let order: Box<dyn Iterator<Item = usize>> = if reverse {
        Box::new((0..strips).rev())
    } else {
        Box::new(0..strips)
    };

    let mut path = Vec::with_capacity(strips * per_strip);
    for strip in order {
        let c = m + strip as f64 * strip_size + strip_size / 2.0;
        // Parity of the absolute strip index picks the stroke direction.
        let forward = strip % 2 == 0;
        for i in 0..per_strip {
            let t = strip_t(i, per_strip);
            let a = if forward {
                m + t * span
            } else {
                (along - m) - t * span
            };
            path.push(match axis {
                Axis::Columns => Point::new(c, a),
                Axis::Rows => Point::new(a, c),
            });
        }
    }
    path
}

fn spiral(width: u32, height: u32, total_frames: usize) -> Vec<Point> {
    let m = SWEEP_MARGIN;
    let (w, h) = (f64::from(width), f64::from(height));
    let cx = f64::from(width / 2);
    let cy = f64::from(height / 2);
    let max_radius = (cx * cx + cy * cy).sqrt();

    (0..total_frames)
        .map(|i| {
            let t = i as f64 / total_frames as f64;
            let radius = t * max_radius;
            let angle = t * SPIRAL_TURNS_RAD;
            Point::new(
                (cx + radius * angle.cos()).clamp(m, (w - m).max(m)),
                (cy + radius * angle.sin()).clamp(m, (h - m).max(m)),
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/path/sweep.rs"]
mod tests;
