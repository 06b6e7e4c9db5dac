use crate::foundation::core::Point;
use crate::foundation::math::smoothstep;
use crate::path::strip_t;

/// Eased move from `start` to `end` in exactly `num_frames` samples.
pub fn travel_path(start: Point, end: Point, num_frames: usize) -> Vec<Point> {
    (0..num_frames)
        .map(|i| start.lerp(end, smoothstep(strip_t(i, num_frames))))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/path/travel.rs"]
mod tests;
