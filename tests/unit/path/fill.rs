use super::*;

fn bbox() -> BBox {
    BBox {
        x: 100,
        y: 50,
        width: 60,
        height: 48,
    }
}

#[test]
fn fill_path_has_exact_length() {
    for n in [0usize, 1, 3, 4, 10, 37, 400] {
        assert_eq!(element_fill_path(bbox(), n).len(), n);
    }
}

#[test]
fn rows_zigzag_corner_to_corner() {
    // height 48 -> 4 rows of 12px, 40 frames -> 10 per row.
    let p = element_fill_path(bbox(), 40);
    assert_eq!(p[0], Point::new(100.0, 56.0));
    assert_eq!(p[9], Point::new(160.0, 56.0));
    assert_eq!(p[10], Point::new(160.0, 68.0));
    assert_eq!(p[19], Point::new(100.0, 68.0));
    assert_eq!(p[39].y, 92.0);
}

#[test]
fn row_count_grows_with_height() {
    assert_eq!(fill_row_count(10), 4);
    assert_eq!(fill_row_count(120), 10);
}

#[test]
fn short_budget_is_truncated_to_first_rows() {
    // 2 frames over 4 rows: one sample per row, cut to the first two rows.
    let p = element_fill_path(bbox(), 2);
    assert_eq!(p, vec![Point::new(100.0, 56.0), Point::new(160.0, 68.0)]);
}

#[test]
fn padding_repeats_final_sample() {
    // 42 frames over 4 rows: 10 per row then two padded samples.
    let p = element_fill_path(bbox(), 42);
    assert_eq!(p[40], p[39]);
    assert_eq!(p[41], p[39]);
}
