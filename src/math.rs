//! Fixed point u8 arithmetic

/// Interpolate a value between two end points using fixed point math
///
/// `p + (q - p) * a / 255`, rounded
pub fn lerp_u8(p: u8, q: u8, a: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let v = if p > q { 1 } else { 0 };
    let (q,p,a) = (i32::from(q), i32::from(p), i32::from(a));
    let t0 : i32 = (q - p) * a + base_msb - v;
    let t1 : i32 = ((t0>>base_shift) + t0) >> base_shift;
    (p + t1) as u8
}

/// Interpolate with a premultiplied end point, `p + q - p * a / 255`
pub fn prelerp_u8(p: u8, q: u8, a: u8) -> u8 {
    p.wrapping_add(q).wrapping_sub(multiply_u8(p,a))
}

/// Multiply two u8 values using fixed point math, `a * b / 255` rounded
pub fn multiply_u8(a: u8, b: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let (a,b) = (u32::from(a), u32::from(b));
    let t : u32  = a * b + base_msb;
    let tt : u32 = ((t >> base_shift) + t) >> base_shift;
    tt as u8
}

/// Convert an f64 [0,1] component to u8 [0,255]
pub fn cu8(v: f64) -> u8 {
    (v.max(0.0).min(1.0) * 255.0).round() as u8
}
