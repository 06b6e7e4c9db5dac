/// Blend `a` over `b` with 8-bit weight `w` (255 keeps `a`, 0 keeps `b`).
pub(crate) fn lerp_u8(a: u8, b: u8, w: u8) -> u8 {
    let w = u32::from(w);
    let v = (u32::from(a) * w + u32::from(b) * (255 - w) + 127) / 255;
    v.min(255) as u8
}

/// Cubic smoothstep on normalized `t` in `[0, 1]`.
pub(crate) fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
