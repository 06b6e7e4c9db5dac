use image::{Rgb, RgbImage};

use super::*;

fn white_with_block(w: u32, h: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| {
        if (10..20).contains(&x) && (10..20).contains(&y) {
            Rgb(color)
        } else {
            Rgb([255, 255, 255])
        }
    })
}

#[test]
fn saturation_of_grays_is_zero() {
    assert_eq!(saturation([0, 0, 0]), 0);
    assert_eq!(saturation([128, 128, 128]), 0);
    assert_eq!(saturation([255, 0, 0]), 255);
}

#[test]
fn fixed_threshold_marks_dark_pixels_only() {
    let img = white_with_block(32, 32, [0, 0, 0]);
    let input = StageInput::new(&img);
    let out = FixedThreshold::new(245).apply(&input);
    assert_eq!(out.get_pixel(15, 15)[0], 255);
    assert_eq!(out.get_pixel(2, 2)[0], 0);
}

#[test]
fn saturation_stage_ignores_black_ink() {
    let black = white_with_block(32, 32, [0, 0, 0]);
    let red = white_with_block(32, 32, [220, 30, 30]);
    let stage = SaturationThreshold::new(30);
    assert!(stage.apply(&StageInput::new(&black)).iter().all(|&v| v == 0));
    assert_eq!(stage.apply(&StageInput::new(&red)).get_pixel(12, 12)[0], 255);
}

#[test]
fn every_stage_is_blank_on_uniform_white() {
    let img = RgbImage::from_pixel(40, 30, Rgb([255, 255, 255]));
    let input = StageInput::new(&img);
    let stages: Vec<Box<dyn BinarizeStage>> = vec![
        Box::new(FixedThreshold::new(245)),
        Box::new(FixedThreshold::new(220)),
        Box::new(AdaptiveGaussianThreshold::default()),
        Box::new(DilatedEdges::default()),
        Box::new(SaturationThreshold::new(30)),
    ];
    for stage in &stages {
        let out = stage.apply(&input);
        assert_eq!(out.dimensions(), (40, 30));
        assert!(out.iter().all(|&v| v == 0), "stage {} fired", stage.name());
    }
}

#[test]
fn opencv_kernel_sigma() {
    assert!((sigma_for_kernel(5) - 1.1).abs() < 1e-6);
    assert!((sigma_for_kernel(25) - 4.1).abs() < 1e-5);
}
