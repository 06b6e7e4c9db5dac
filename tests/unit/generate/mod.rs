use image::{Rgb, Rgba, RgbaImage};

use super::*;

fn fps(n: u32) -> Fps {
    Fps::integer(n).unwrap()
}

fn blank(w: u32, h: u32) -> RgbImage {
    RgbImage::from_pixel(w, h, Rgb([255, 255, 255]))
}

fn with_squares(w: u32, h: u32, squares: &[(u32, u32, u32)]) -> RgbImage {
    let mut img = blank(w, h);
    for &(x0, y0, side) in squares {
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
    }
    img
}

/// Generator whose hand is invisible, so frames show only the reveal.
fn invisible_hand() -> FrameGenerator {
    let lib = HandLibrary::builtin().with_sprite(
        HandStyle::Hand1,
        HandSprite::new(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0])), 0, 0),
    );
    FrameGenerator::new(Arc::new(lib), GeneratorOpts::default())
}

#[test]
fn enum_names_parse() {
    for m in DrawingMode::ALL {
        assert_eq!(m.as_str().parse::<DrawingMode>().unwrap(), m);
    }
    for d in DrawingDirection::ALL {
        assert_eq!(d.as_str().parse::<DrawingDirection>().unwrap(), d);
    }
    assert!("diagonal".parse::<DrawingDirection>().is_err());
    assert!("sepia".parse::<DrawingMode>().is_err());
}

#[test]
fn only_element_mode_lacks_a_sweep() {
    for d in DrawingDirection::ALL {
        assert_eq!(d.sweep().is_none(), d == DrawingDirection::ElementByElement);
    }
}

#[test]
fn request_deserializes_with_defaults() {
    let req: GenerateRequest =
        serde_json::from_str(r#"{"duration_secs": 2.0, "fps": {"num": 24, "den": 1}}"#).unwrap();
    assert_eq!(req.mode, DrawingMode::Normal);
    assert_eq!(req.direction, DrawingDirection::LeftToRight);
    assert_eq!(req.hand, HandStyle::Hand1);
    assert_eq!(req.total_frames(), 48);
}

#[test]
fn invalid_requests_are_rejected() {
    let g = FrameGenerator::default();
    let img = blank(40, 40);
    assert!(g.generate(&img, &GenerateRequest::new(0.0, fps(10))).is_err());
    assert!(g.generate(&img, &GenerateRequest::new(f64::NAN, fps(10))).is_err());
    assert!(g.generate(&img, &GenerateRequest::new(0.01, fps(10))).is_err());
    assert!(
        g.generate(&RgbImage::new(0, 0), &GenerateRequest::new(1.0, fps(10)))
            .is_err()
    );
}

#[test]
fn sweep_frame_count_includes_hold() {
    let g = FrameGenerator::default();
    let img = with_squares(80, 60, &[(20, 20, 10)]);
    for d in DrawingDirection::ALL {
        let req = GenerateRequest::new(1.0, fps(20)).with_direction(d);
        let frames = g.generate(&img, &req).unwrap();
        // 20 animated + floor(20 * 0.3) = 6 held.
        if d.sweep().is_some() {
            assert_eq!(frames.len(), 26, "{d:?}");
        }
        assert!(frames.iter().all(|f| f.dimensions() == (80, 60)));
    }
}

#[test]
fn hold_frames_are_the_target() {
    let g = FrameGenerator::default();
    let img = with_squares(50, 50, &[(10, 10, 12)]);
    let frames = g.generate(&img, &GenerateRequest::new(1.0, fps(10))).unwrap();
    assert_eq!(frames.len(), 13);
    for f in &frames[10..] {
        assert_eq!(f, &img);
    }
}

#[test]
fn outline_then_fill_holds_twice() {
    let g = FrameGenerator::default();
    let img = with_squares(60, 60, &[(15, 15, 20)]);
    let req = GenerateRequest::new(1.0, fps(10)).with_mode(DrawingMode::OutlineThenFill);
    let frames = g.generate(&img, &req).unwrap();
    assert_eq!(frames.len(), 10 + 2 * 3);
    assert_eq!(frames.last().unwrap(), &img);

    let outline = OutlineBuilder::default().build(&img).unwrap();
    // Phase 1 ends with the outline hold.
    assert_eq!(frames[5 + 2], outline);
}

#[test]
fn outline_only_ends_on_outline() {
    let g = FrameGenerator::default();
    let img = with_squares(60, 60, &[(15, 15, 20)]);
    let req = GenerateRequest::new(1.0, fps(10)).with_mode(DrawingMode::OutlineOnly);
    let frames = g.generate(&img, &req).unwrap();
    assert_eq!(frames.len(), 13);
    assert_eq!(frames.last().unwrap(), &OutlineBuilder::default().build(&img).unwrap());
}

#[test]
fn element_mode_spends_exact_budget() {
    let g = FrameGenerator::default();
    let img = with_squares(300, 300, &[(40, 40, 40), (200, 180, 50)]);
    let req = GenerateRequest::new(2.0, fps(30))
        .with_direction(DrawingDirection::ElementByElement)
        .with_element_direction(ElementDirection::RowWise);
    let planned = g.plan_elements(&img, req.element_direction).unwrap().unwrap();
    assert_eq!(planned.len(), 2);
    let frames = g.generate(&img, &req).unwrap();
    assert_eq!(frames.len(), 60 + 9);
}

#[test]
fn element_mode_falls_back_on_blank_image() {
    let g = FrameGenerator::default();
    let img = blank(120, 90);
    assert!(g.plan_elements(&img, ElementDirection::Default).unwrap().is_none());

    let base = GenerateRequest::new(1.0, fps(12));
    let sweep = g
        .generate(&img, &base.with_direction(DrawingDirection::LeftToRight))
        .unwrap();
    let fallback = g
        .generate(&img, &base.with_direction(DrawingDirection::ElementByElement))
        .unwrap();
    assert_eq!(sweep, fallback);
}

#[test]
fn element_reveal_never_regresses() {
    let g = invisible_hand();
    let img = with_squares(300, 300, &[(40, 40, 40), (200, 180, 50)]);
    let req = GenerateRequest::new(2.0, fps(15))
        .with_direction(DrawingDirection::ElementByElement);
    let frames = g.generate(&img, &req).unwrap();
    assert_eq!(frames.len(), 30 + 4);
    // Black squares on white: a revealed pixel only ever gets darker.
    for pair in frames[..30].windows(2) {
        for (a, b) in pair[0].pixels().zip(pair[1].pixels()) {
            assert!(b.0[0] <= a.0[0]);
        }
    }
}

#[test]
fn single_pixel_element_mode_falls_back_in_every_mode() {
    let g = FrameGenerator::default();
    let img = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));
    for mode in DrawingMode::ALL {
        let base = GenerateRequest::new(1.0, fps(10)).with_mode(mode);
        let elements = g
            .generate(&img, &base.with_direction(DrawingDirection::ElementByElement))
            .unwrap();
        let sweep = g
            .generate(&img, &base.with_direction(DrawingDirection::LeftToRight))
            .unwrap();
        assert_eq!(elements, sweep, "{mode:?}");
    }
}
