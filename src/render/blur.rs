use image::GrayImage;

use crate::foundation::error::{SketchError, SketchResult};

/// Separable Gaussian blur of a single-channel mask with a Q16 fixed-point kernel.
///
/// Borders replicate the edge pixel. The result is bit-exact across platforms.
#[derive(Clone, Debug)]
pub struct MaskBlur {
    kernel: Vec<u32>,
}

impl MaskBlur {
    pub fn new(radius: u32, sigma: f32) -> SketchResult<Self> {
        Ok(Self {
            kernel: gaussian_kernel_q16(radius, sigma)?,
        })
    }

    /// Blur matching an odd `k x k` kernel with the conventional sigma for that size.
    pub fn for_kernel_size(k: u32) -> SketchResult<Self> {
        if k == 0 || k.is_multiple_of(2) {
            return Err(SketchError::validation("blur kernel size must be odd"));
        }
        Self::new(k / 2, crate::segment::stages::sigma_for_kernel(k))
    }

    pub fn radius(&self) -> u32 {
        (self.kernel.len() / 2) as u32
    }

    pub fn apply(&self, src: &GrayImage) -> GrayImage {
        if self.kernel.len() == 1 {
            return src.clone();
        }
        let (w, h) = src.dimensions();
        let mut tmp = GrayImage::new(w, h);
        let mut out = GrayImage::new(w, h);
        horizontal_pass(src, &mut tmp, &self.kernel);
        vertical_pass(&tmp, &mut out, &self.kernel);
        out
    }
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> SketchResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(SketchError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(SketchError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &GrayImage, dst: &mut [u8], k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let (w, h) = src.dimensions();
    let (w, h) = (w as i32, h as i32);
    let src = src.as_raw();
    for y in 0..h {
        let row = (y * w) as usize;
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                acc += u64::from(kw) * u64::from(src[row + sx as usize]);
            }
            dst[row + x as usize] = q16_to_u8(acc);
        }
    }
}

fn vertical_pass(src: &GrayImage, dst: &mut [u8], k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let (w, h) = src.dimensions();
    let (w, h) = (w as i32, h as i32);
    let src = src.as_raw();
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                acc += u64::from(kw) * u64::from(src[(sy * w + x) as usize]);
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
