use super::*;

fn revealed(mask: &RevealMask) -> usize {
    mask.pixels.iter().filter(|&&v| v != 0).count()
}

/// Every pixel revealed in `earlier` is also revealed in `now`.
fn covers(now: &RevealMask, earlier: &RevealMask) -> bool {
    now.pixels
        .iter()
        .zip(earlier.pixels.iter())
        .all(|(&n, &e)| e == 0 || n != 0)
}

#[test]
fn brush_sizes_follow_image_dimensions() {
    assert_eq!(Brush::for_sweep(300, 300).radius, 15);
    assert_eq!(Brush::for_sweep(1000, 800).radius, 32);
    assert_eq!(Brush::for_fill_over(300, 300).radius, 20);
    assert_eq!(Brush::for_fill_over(1000, 800).radius, 40);
    assert_eq!(Brush::for_element(60, 40).radius, 8);
    assert_eq!(Brush::for_element(200, 160).radius, 20);
}

#[test]
fn first_stroke_is_a_disc() {
    let mut m = RevealMask::new(50, 50);
    m.stroke(Brush::new(5), None, (25, 25));
    let img = m.as_image();
    assert_eq!(img.get_pixel(25, 25)[0], 255);
    assert_eq!(img.get_pixel(29, 25)[0], 255);
    assert_eq!(img.get_pixel(32, 25)[0], 0);
    assert_eq!(img.get_pixel(25, 10)[0], 0);
}

#[test]
fn stroke_covers_segment_between_samples() {
    let mut m = RevealMask::new(100, 40);
    m.stroke(Brush::new(4), Some((10, 20)), (90, 20));
    let img = m.as_image();
    for x in 10..=90 {
        assert_eq!(img.get_pixel(x, 20)[0], 255);
        assert_eq!(img.get_pixel(x, 23)[0], 255);
    }
    assert_eq!(img.get_pixel(50, 30)[0], 0);
}

#[test]
fn strokes_outside_the_frame_are_clipped() {
    let mut m = RevealMask::new(20, 20);
    m.stroke(Brush::new(3), Some((-50, -50)), (-40, -40));
    assert_eq!(revealed(&m), 0);
    m.stroke(Brush::new(3), Some((-5, 10)), (2, 10));
    assert!(revealed(&m) > 0);
}

#[test]
fn reveal_is_monotonic_across_strokes() {
    let mut m = RevealMask::new(64, 64);
    let mut prev = m.clone();
    let pts = [(5, 5), (60, 5), (60, 60), (5, 60), (32, 32)];
    let mut last = None;
    for p in pts {
        m.stroke(Brush::new(6), last, p);
        assert!(covers(&m, &prev));
        assert!(revealed(&m) >= revealed(&prev));
        prev = m.clone();
        last = Some(p);
    }
}

#[test]
fn clipped_snapshot_stays_inside_clip_and_keeps_base() {
    let mut base = RevealMask::new(30, 30);
    base.stroke(Brush::new(2), None, (3, 3));

    let mut stroke = GrayImage::new(30, 30);
    Brush::new(10).stamp(&mut stroke, None, (15, 15));
    let clip = GrayImage::from_fn(30, 30, |x, _| Luma([if x >= 15 { 255 } else { 0 }]));

    let snap = base.with_clipped(&stroke, &clip);
    assert!(covers(&snap, &base));
    assert_eq!(snap.as_image().get_pixel(12, 15)[0], 0);
    assert_eq!(snap.as_image().get_pixel(18, 15)[0], 255);
    // The base is not modified by taking a snapshot.
    assert_eq!(base.as_image().get_pixel(18, 15)[0], 0);
}

#[test]
fn union_adds_pixels() {
    let mut m = RevealMask::new(4, 4);
    let other = GrayImage::from_fn(4, 4, |x, y| Luma([if x == y { 255 } else { 0 }]));
    m.union(&other);
    assert_eq!(revealed(&m), 4);
}

#[test]
fn pixel_of_truncates() {
    assert_eq!(pixel_of(Point::new(3.9, 7.2)), (3, 7));
}
