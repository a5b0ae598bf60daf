//! Value types shared by effects, layers and the compositor.
//!
//! Pixel buffers are flat, row-major slices of [`Color`] with no stride
//! beyond `width` cells. Byte order inside a cell is R, G, B, A.

use std::fmt;

/// 8-bit RGBA color. Straight (non-premultiplied) alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from(c: (u8, u8, u8, u8)) -> Self {
        Self::new(c.0, c.1, c.2, c.3)
    }
}

/// Image dimensions in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixel cells a buffer of this size holds.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn rect(self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Signed pixel displacement. Positive `y` moves down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && (x as i64) < self.x as i64 + self.width as i64
            && (y as i64) < self.y as i64 + self.height as i64
    }
}

/// One stop of a piecewise-linear gradient ramp.
///
/// `percent` is the stop position along the gradient axis, 0 to 100.
/// Keys of a gradient must be given in non-decreasing `percent` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GradientKey {
    pub color: Color,
    pub percent: u8,
}

impl GradientKey {
    pub const fn new(color: Color, percent: u8) -> Self {
        Self { color, percent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_count() {
        assert_eq!(Size::new(4, 3).pixel_count(), 12);
        assert_eq!(Size::new(0, 7).pixel_count(), 0);
    }

    #[test]
    fn test_color_conversions() {
        let c = Color::from([1, 2, 3, 4]);
        assert_eq!(c, Color::new(1, 2, 3, 4));
        assert_eq!(c.to_array(), [1, 2, 3, 4]);
        assert_eq!(Color::from((9, 8, 7, 6)).with_alpha(255), Color::new(9, 8, 7, 255));
    }

    #[test]
    fn test_rect_contains_bounds() {
        let r = Size::new(3, 2).rect();
        assert!(r.contains(0, 0));
        assert!(r.contains(2, 1));
        assert!(!r.contains(3, 1));
        assert!(!r.contains(-1, 0));
    }
}
