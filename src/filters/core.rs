//! Core utilities shared by the blend modes and the effects.
//!
//! This module provides:
//! - Fixed-point color interpolation (`lerp`, `lerp_percentile`)
//! - Angle normalization and integer sine/cosine tables
//!
//! All arithmetic is integer with truncating division. Output must match
//! bit for bit across platforms, so nothing in here touches floats.

use crate::color::Color;

/// Full scale of [`lerp_percentile`] weights and gradient positions.
pub const PERCENTILE_SCALE: u32 = 10_000;

/// Interpolate every channel from `a` towards `b` by `t` in `[0, 255]`.
#[inline]
pub fn lerp(a: Color, b: Color, t: u8) -> Color {
    let t = t as u32;
    let inv_t = 255 - t;
    let mix = |x: u8, y: u8| (x as u32 * inv_t / 255 + y as u32 * t / 255) as u8;
    Color::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

/// Interpolate every channel from `a` towards `b` by `t` in `[0, 10000]`.
///
/// Used by gradients, where 256 steps are not enough along long ramps.
#[inline]
pub fn lerp_percentile(a: Color, b: Color, t: u32) -> Color {
    let t = t.min(PERCENTILE_SCALE);
    let inv_t = PERCENTILE_SCALE - t;
    let mix = |x: u8, y: u8| {
        (x as u32 * inv_t / PERCENTILE_SCALE + y as u32 * t / PERCENTILE_SCALE) as u8
    };
    Color::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

/// Like [`lerp`] on RGB, but the alpha is the max of both inputs.
#[inline]
pub fn lerp_preserve_alpha(a: Color, b: Color, t: u8) -> Color {
    let mixed = lerp(a, b, t);
    mixed.with_alpha(a.a.max(b.a))
}

/// Normalize any integer angle into `[0, 360)`.
#[inline]
pub fn wrap_angle(angle: i32) -> u16 {
    angle.rem_euclid(360) as u16
}

/// `round(sin(deg) * 10000)` for every integer degree.
pub static SIN_TABLE: [i32; 360] = [
    0, 175, 349, 523, 698, 872, 1045, 1219, 1392, 1564, 1736, 1908,
    2079, 2250, 2419, 2588, 2756, 2924, 3090, 3256, 3420, 3584, 3746, 3907,
    4067, 4226, 4384, 4540, 4695, 4848, 5000, 5150, 5299, 5446, 5592, 5736,
    5878, 6018, 6157, 6293, 6428, 6561, 6691, 6820, 6947, 7071, 7193, 7314,
    7431, 7547, 7660, 7771, 7880, 7986, 8090, 8192, 8290, 8387, 8480, 8572,
    8660, 8746, 8829, 8910, 8988, 9063, 9135, 9205, 9272, 9336, 9397, 9455,
    9511, 9563, 9613, 9659, 9703, 9744, 9781, 9816, 9848, 9877, 9903, 9925,
    9945, 9962, 9976, 9986, 9994, 9998, 10000, 9998, 9994, 9986, 9976, 9962,
    9945, 9925, 9903, 9877, 9848, 9816, 9781, 9744, 9703, 9659, 9613, 9563,
    9511, 9455, 9397, 9336, 9272, 9205, 9135, 9063, 8988, 8910, 8829, 8746,
    8660, 8572, 8480, 8387, 8290, 8192, 8090, 7986, 7880, 7771, 7660, 7547,
    7431, 7314, 7193, 7071, 6947, 6820, 6691, 6561, 6428, 6293, 6157, 6018,
    5878, 5736, 5592, 5446, 5299, 5150, 5000, 4848, 4695, 4540, 4384, 4226,
    4067, 3907, 3746, 3584, 3420, 3256, 3090, 2924, 2756, 2588, 2419, 2250,
    2079, 1908, 1736, 1564, 1392, 1219, 1045, 872, 698, 523, 349, 175,
    0, -175, -349, -523, -698, -872, -1045, -1219, -1392, -1564, -1736, -1908,
    -2079, -2250, -2419, -2588, -2756, -2924, -3090, -3256, -3420, -3584, -3746, -3907,
    -4067, -4226, -4384, -4540, -4695, -4848, -5000, -5150, -5299, -5446, -5592, -5736,
    -5878, -6018, -6157, -6293, -6428, -6561, -6691, -6820, -6947, -7071, -7193, -7314,
    -7431, -7547, -7660, -7771, -7880, -7986, -8090, -8192, -8290, -8387, -8480, -8572,
    -8660, -8746, -8829, -8910, -8988, -9063, -9135, -9205, -9272, -9336, -9397, -9455,
    -9511, -9563, -9613, -9659, -9703, -9744, -9781, -9816, -9848, -9877, -9903, -9925,
    -9945, -9962, -9976, -9986, -9994, -9998, -10000, -9998, -9994, -9986, -9976, -9962,
    -9945, -9925, -9903, -9877, -9848, -9816, -9781, -9744, -9703, -9659, -9613, -9563,
    -9511, -9455, -9397, -9336, -9272, -9205, -9135, -9063, -8988, -8910, -8829, -8746,
    -8660, -8572, -8480, -8387, -8290, -8192, -8090, -7986, -7880, -7771, -7660, -7547,
    -7431, -7314, -7193, -7071, -6947, -6820, -6691, -6561, -6428, -6293, -6157, -6018,
    -5878, -5736, -5592, -5446, -5299, -5150, -5000, -4848, -4695, -4540, -4384, -4226,
    -4067, -3907, -3746, -3584, -3420, -3256, -3090, -2924, -2756, -2588, -2419, -2250,
    -2079, -1908, -1736, -1564, -1392, -1219, -1045, -872, -698, -523, -349, -175,
];

/// Fixed-point sine, scaled by 10000. `angle` must already be wrapped.
#[inline]
pub fn sin_fixed(angle: u16) -> i32 {
    SIN_TABLE[angle as usize % 360]
}

/// Fixed-point cosine, scaled by 10000, read as `sin(angle + 90)`.
#[inline]
pub fn cos_fixed(angle: u16) -> i32 {
    SIN_TABLE[(angle as usize + 90) % 360]
}
