use crate::foundation::core::Point;
use crate::path::{fit_len, strip_t};
use crate::segment::BBox;

/// Rows used to zigzag over an element box: `max(4, height / 12)`.
fn fill_row_count(height: u32) -> usize {
    (height / 12).max(4) as usize
}

/// Horizontal serpentine over `bbox`, exactly `num_frames` samples.
pub fn element_fill_path(bbox: BBox, num_frames: usize) -> Vec<Point> {
    let x = f64::from(bbox.x);
    let y = f64::from(bbox.y);
    let w = f64::from(bbox.width);
    let h = f64::from(bbox.height);

    let rows = fill_row_count(bbox.height);
    let row_h = h / rows as f64;
    let per_row = (num_frames / rows).max(1);

    let mut path = Vec::with_capacity(rows * per_row);
    for row in 0..rows {
        let row_y = y + row as f64 * row_h + row_h / 2.0;
        let go_right = row % 2 == 0;
        for i in 0..per_row {
            let t = strip_t(i, per_row);
            let row_x = if go_right { x + t * w } else { x + w - t * w };
            path.push(Point::new(row_x, row_y));
        }
    }
    fit_len(path, num_frames, bbox.center())
}

#[cfg(test)]
#[path = "../../tests/unit/path/fill.rs"]
mod tests;
