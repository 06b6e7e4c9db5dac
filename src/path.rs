//! Pencil-tip trajectories.
//!
//! Every generator returns exactly the number of samples it was asked for: short natural paths
//! are padded with their final point, long ones are truncated.

pub mod budget;
pub mod fill;
pub mod sweep;
pub mod travel;

use crate::foundation::core::Point;

pub use budget::FrameBudget;
pub use fill::element_fill_path;
pub use sweep::{SweepDirection, sweep_path};
pub use travel::travel_path;

/// Pad with the last point (or `fallback` when empty) and truncate to exactly `len` samples.
pub(crate) fn fit_len(mut path: Vec<Point>, len: usize, fallback: Point) -> Vec<Point> {
    if path.len() < len {
        let last = path.last().copied().unwrap_or(fallback);
        path.resize(len, last);
    }
    path.truncate(len);
    path
}

/// Normalized position of sample `i` within a strip of `n` samples (`0` and `1` inclusive).
pub(crate) fn strip_t(i: usize, n: usize) -> f64 {
    i as f64 / n.saturating_sub(1).max(1) as f64
}

#[cfg(test)]
#[path = "../tests/unit/path/mod.rs"]
mod tests;
