use super::*;

const ALL: [SweepDirection; 5] = [
    SweepDirection::LeftToRight,
    SweepDirection::RightToLeft,
    SweepDirection::TopToBottom,
    SweepDirection::BottomToTop,
    SweepDirection::CenterOut,
];

#[test]
fn every_direction_returns_exact_length() {
    for dir in ALL {
        for total in [0usize, 1, 7, 8, 150, 151, 1000] {
            assert_eq!(sweep_path(320, 240, total, dir).len(), total, "{dir:?} {total}");
        }
    }
}

#[test]
fn strip_count_has_floor_of_eight() {
    assert_eq!(strip_count(100), 8);
    assert_eq!(strip_count(400), 10);
    assert_eq!(strip_count(1920), 48);
}

#[test]
fn left_to_right_columns_advance_and_alternate() {
    // 300 wide -> 8 columns, 150 frames -> 18 per column (144), padded to 150.
    let p = sweep_path(300, 200, 150, SweepDirection::LeftToRight);
    let col_w = 290.0 / 8.0;
    assert!((p[0].x - (5.0 + col_w / 2.0)).abs() < 1e-9);
    assert_eq!(p[0].y, 5.0);
    assert_eq!(p[17].y, 195.0);
    // Second column starts at the bottom.
    assert!((p[18].x - (5.0 + 1.5 * col_w)).abs() < 1e-9);
    assert_eq!(p[18].y, 195.0);
    assert_eq!(p[35].y, 5.0);
    // Padding repeats the final sample.
    assert!(p[143..].iter().all(|&q| q == p[143]));
    for w in p.windows(2) {
        assert!(w[1].x >= w[0].x);
    }
}

#[test]
fn right_to_left_mirrors_absolute_parity() {
    let p = sweep_path(300, 200, 160, SweepDirection::RightToLeft);
    // 8 columns, 20 samples each. First visited column is index 7 (odd), so it strokes upward.
    let col_w = 290.0 / 8.0;
    assert!((p[0].x - (5.0 + 7.5 * col_w)).abs() < 1e-9);
    assert_eq!(p[0].y, 195.0);
    // Column 6 (even) strokes downward.
    assert_eq!(p[20].y, 5.0);
    for w in p.windows(2) {
        assert!(w[1].x <= w[0].x);
    }
}

#[test]
fn bottom_to_top_rows_descend() {
    let p = sweep_path(200, 300, 80, SweepDirection::BottomToTop);
    assert_eq!(p.len(), 80);
    for w in p.windows(2) {
        assert!(w[1].y <= w[0].y);
    }
    assert!(p[0].y > 250.0);
}

#[test]
fn top_to_bottom_rows_serpentine_along_x() {
    let p = sweep_path(200, 300, 80, SweepDirection::TopToBottom);
    // 8 rows, 10 samples each.
    assert_eq!(p[0].x, 5.0);
    assert_eq!(p[9].x, 195.0);
    assert_eq!(p[10].x, 195.0);
    assert_eq!(p[19].x, 5.0);
}

#[test]
fn few_frames_truncate_instead_of_overflowing() {
    // 3 frames over 8 columns: one sample per column, cut to 3.
    let p = sweep_path(300, 200, 3, SweepDirection::LeftToRight);
    assert_eq!(p.len(), 3);
    assert!(p[0].x < p[1].x && p[1].x < p[2].x);
}

#[test]
fn spiral_starts_at_center_and_stays_inside_margin() {
    let p = sweep_path(120, 80, 200, SweepDirection::CenterOut);
    assert_eq!(p[0], Point::new(60.0, 40.0));
    for q in &p {
        assert!((5.0..=115.0).contains(&q.x));
        assert!((5.0..=75.0).contains(&q.y));
    }
}

#[test]
fn sweeps_are_deterministic() {
    for dir in ALL {
        assert_eq!(sweep_path(97, 61, 77, dir), sweep_path(97, 61, 77, dir));
    }
}
