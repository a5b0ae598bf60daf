//! Separable box blur over flat RGBA pixel buffers.
//!
//! Horizontal pass averages `2 * radius + 1` samples of each row into a
//! scratch buffer, the vertical pass averages that buffer into `dst`.
//! Both passes truncate, so the result is the average of averages.
//!
//! ## Border policy
//! Pixels within `radius` of any edge are never written. Nothing is clamped
//! or wrapped: windows that would leave the image are simply not evaluated.

use crate::color::{Color, Size};

#[derive(Clone, Copy, Default)]
struct Accum {
    r: u32,
    g: u32,
    b: u32,
    a: u32,
}

impl Accum {
    #[inline]
    fn add(&mut self, c: Color) {
        self.r += c.r as u32;
        self.g += c.g as u32;
        self.b += c.b as u32;
        self.a += c.a as u32;
    }

    #[inline]
    fn sub(&mut self, c: Color) {
        self.r -= c.r as u32;
        self.g -= c.g as u32;
        self.b -= c.b as u32;
        self.a -= c.a as u32;
    }

    #[inline]
    fn average(&self, taps: u32) -> Color {
        Color::new(
            (self.r / taps) as u8,
            (self.g / taps) as u8,
            (self.b / taps) as u8,
            (self.a / taps) as u8,
        )
    }
}

/// Whether a blur of `radius` leaves at least one interior pixel.
pub fn has_interior(size: Size, radius: u32) -> bool {
    let diameter = 2 * radius as u64;
    diameter < size.width as u64 && diameter < size.height as u64
}

/// Box blur `src` into `dst`.
///
/// Only interior pixels of `dst` are written; the border keeps whatever
/// `dst` held before. Both buffers must hold `size.pixel_count()` cells.
pub fn box_blur(dst: &mut [Color], src: &[Color], size: Size, radius: u32) {
    let (width, height) = (size.width as usize, size.height as usize);
    debug_assert_eq!(src.len(), width * height);
    debug_assert_eq!(dst.len(), width * height);

    if !has_interior(size, radius) {
        return;
    }

    let r = radius as usize;
    let taps = 2 * radius + 1;
    let mut temp = vec![Color::TRANSPARENT; width * height];

    // Horizontal pass
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        let out = &mut temp[y * width..(y + 1) * width];

        let mut acc = Accum::default();
        for &c in &row[..2 * r + 1] {
            acc.add(c);
        }
        out[r] = acc.average(taps);
        for x in r + 1..width - r {
            acc.sub(row[x - r - 1]);
            acc.add(row[x + r]);
            out[x] = acc.average(taps);
        }
    }

    // Vertical pass
    for x in r..width - r {
        let mut acc = Accum::default();
        for y in 0..2 * r + 1 {
            acc.add(temp[y * width + x]);
        }
        dst[r * width + x] = acc.average(taps);
        for y in r + 1..height - r {
            acc.sub(temp[(y - r - 1) * width + x]);
            acc.add(temp[(y + r) * width + x]);
            dst[y * width + x] = acc.average(taps);
        }
    }
}

/// Blur `src` into a fresh, fully transparent buffer.
///
/// Shadow and glow effects read the alpha of this buffer; its border stays
/// transparent.
pub fn blurred_copy(src: &[Color], size: Size, radius: u32) -> Vec<Color> {
    let mut out = vec![Color::TRANSPARENT; src.len()];
    box_blur(&mut out, src, size, radius);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(size: Size) -> Vec<Color> {
        (0..size.pixel_count())
            .map(|i| {
                let v = if i % 3 == 0 { 255 } else { (i * 37 % 256) as u8 };
                Color::new(v, 255 - v, v / 2, v)
            })
            .collect()
    }

    /// Straightforward two-pass blur used as a reference.
    fn naive(src: &[Color], size: Size, radius: usize) -> Vec<Color> {
        let (w, h) = (size.width as usize, size.height as usize);
        let taps = (2 * radius + 1) as u32;
        let mut temp = vec![Color::TRANSPARENT; w * h];
        let mut out = src.to_vec();
        for y in 0..h {
            for x in radius..w - radius {
                let mut acc = Accum::default();
                for k in x - radius..=x + radius {
                    acc.add(src[y * w + k]);
                }
                temp[y * w + x] = acc.average(taps);
            }
        }
        for y in radius..h - radius {
            for x in radius..w - radius {
                let mut acc = Accum::default();
                for k in y - radius..=y + radius {
                    acc.add(temp[k * w + x]);
                }
                out[y * w + x] = acc.average(taps);
            }
        }
        out
    }

    #[test]
    fn test_uniform_image_is_unchanged() {
        let color = Color::new(13, 200, 77, 181);
        for (w, h) in [(5, 5), (9, 4), (16, 11)] {
            let size = Size::new(w, h);
            for radius in 0..3 {
                if !has_interior(size, radius) {
                    continue;
                }
                let src = vec![color; size.pixel_count()];
                let mut dst = src.clone();
                box_blur(&mut dst, &src, size, radius);
                assert!(dst.iter().all(|&c| c == color), "{w}x{h} r={radius}");
            }
        }
    }

    #[test]
    fn test_border_is_untouched() {
        let size = Size::new(10, 8);
        let radius = 2;
        let src = checker(size);
        let mut dst = src.clone();
        box_blur(&mut dst, &src, size, radius);

        let r = radius as usize;
        for y in 0..8 {
            for x in 0..10 {
                let border = x < r || y < r || x >= 10 - r || y >= 8 - r;
                if border {
                    assert_eq!(dst[y * 10 + x], src[y * 10 + x], "border pixel ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_matches_naive_two_pass() {
        let size = Size::new(12, 9);
        let src = checker(size);
        for radius in 0..4u32 {
            let mut dst = src.clone();
            box_blur(&mut dst, &src, size, radius);
            assert_eq!(dst, naive(&src, size, radius as usize), "radius {radius}");
        }
    }

    #[test]
    fn test_radius_zero_copies() {
        let size = Size::new(4, 3);
        let src = checker(size);
        let mut dst = vec![Color::TRANSPARENT; size.pixel_count()];
        box_blur(&mut dst, &src, size, 0);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_single_pixel_spreads() {
        let size = Size::new(5, 5);
        let mut src = vec![Color::TRANSPARENT; 25];
        src[12] = Color::new(0, 0, 0, 255);
        let out = blurred_copy(&src, size, 1);
        // Horizontal: 255 / 3 = 85, vertical: 85 / 3 = 28.
        assert_eq!(out[12].a, 28);
        assert_eq!(out[6].a, 28);
        assert_eq!(out[0].a, 0);
    }

    #[test]
    fn test_too_large_radius_is_noop() {
        let size = Size::new(4, 4);
        let src = checker(size);
        let mut dst = vec![Color::TRANSPARENT; 16];
        box_blur(&mut dst, &src, size, 2);
        assert!(dst.iter().all(|&c| c == Color::TRANSPARENT));
        assert!(!has_interior(size, 2));
        assert!(has_interior(size, 1));
    }
}
