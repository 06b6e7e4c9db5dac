use image::{Rgb, Rgba, RgbaImage};

use super::*;
use crate::render::reveal::Brush;

fn blur5() -> MaskBlur {
    MaskBlur::for_kernel_size(5).unwrap()
}

#[test]
fn jitter_is_deterministic_and_small() {
    assert_eq!(jitter(0), (0, 0));
    for i in 0..500 {
        let (dx, dy) = jitter(i);
        assert_eq!(jitter(i), (dx, dy));
        assert!(dx.abs() <= 3 && dy.abs() <= 2);
    }
    // i = 4: 2.5 sin(1) + 1.2 sin(2.4) = 2.10 + 0.81 -> 2
    assert_eq!(jitter(4).0, 2);
}

#[test]
fn empty_mask_shows_white() {
    let target = RgbImage::from_pixel(20, 20, Rgb([0, 0, 0]));
    let c = Compositor::new(&target, Backdrop::White, blur5()).unwrap();
    let f = c.reveal(&RevealMask::new(20, 20)).unwrap();
    assert!(f.pixels().all(|p| p.0 == [255, 255, 255]));
}

#[test]
fn full_mask_shows_target() {
    let target = RgbImage::from_pixel(20, 20, Rgb([10, 20, 30]));
    let c = Compositor::new(&target, Backdrop::White, blur5()).unwrap();
    let mut mask = RevealMask::new(20, 20);
    mask.union(&image::GrayImage::from_pixel(20, 20, image::Luma([255])));
    assert_eq!(c.reveal(&mask).unwrap(), target);
}

#[test]
fn image_backdrop_shows_through_hidden_pixels() {
    let target = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
    let outline = RgbImage::from_pixel(10, 10, Rgb([90, 90, 90]));
    let c = Compositor::new(&target, Backdrop::Image(&outline), blur5()).unwrap();
    assert_eq!(c.reveal(&RevealMask::new(10, 10)).unwrap(), outline);
}

#[test]
fn mismatched_sizes_are_rejected() {
    let target = RgbImage::new(10, 10);
    let other = RgbImage::new(11, 10);
    assert!(Compositor::new(&target, Backdrop::Image(&other), blur5()).is_err());
    let c = Compositor::new(&target, Backdrop::White, blur5()).unwrap();
    assert!(c.reveal(&RevealMask::new(5, 5)).is_err());
}

#[test]
fn revealed_stroke_center_matches_target() {
    let target = RgbImage::from_pixel(60, 60, Rgb([0, 0, 0]));
    let c = Compositor::new(&target, Backdrop::White, blur5()).unwrap();
    let mut mask = RevealMask::new(60, 60);
    mask.stroke(Brush::new(10), None, (30, 30));
    let f = c.reveal(&mask).unwrap();
    assert_eq!(f.get_pixel(30, 30).0, [0, 0, 0]);
    assert_eq!(f.get_pixel(2, 2).0, [255, 255, 255]);
}

#[test]
fn overlay_outside_frame_is_a_no_op() {
    let mut frame = RgbImage::from_pixel(10, 10, Rgb([7, 7, 7]));
    let before = frame.clone();
    let sprite = HandSprite::new(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])), 0, 0);
    assert!(!overlay_hand(&mut frame, &sprite, (50, 50)));
    assert!(!overlay_hand(&mut frame, &sprite, (-4, 0)));
    assert_eq!(frame, before);
}

#[test]
fn overlay_is_clipped_and_straight_alpha() {
    let mut frame = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
    let sprite = HandSprite::new(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 128])), 0, 0);
    assert!(overlay_hand(&mut frame, &sprite, (8, 8)));
    // (0*128 + 255*127 + 127) / 255 = 127
    assert_eq!(frame.get_pixel(9, 9).0, [127, 127, 127]);
    assert_eq!(frame.get_pixel(7, 7).0, [255, 255, 255]);
}

#[test]
fn with_hand_places_tip_with_jitter() {
    let target = RgbImage::from_pixel(40, 40, Rgb([255, 255, 255]));
    let c = Compositor::new(&target, Backdrop::White, blur5()).unwrap();
    let sprite = HandSprite::new(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255])), 0, 0);
    let f = c
        .with_hand(&RevealMask::new(40, 40), &sprite, (20, 20), 0)
        .unwrap();
    assert_eq!(f.get_pixel(20, 20).0, [0, 0, 0]);
    let dark = f.pixels().filter(|p| p.0 == [0, 0, 0]).count();
    assert_eq!(dark, 1);
}
