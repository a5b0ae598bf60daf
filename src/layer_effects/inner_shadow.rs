//! Inner Shadow layer effect.
//!
//! Same blur and offset as the drop shadow, but the blurred alpha is
//! inverted and masked by the layer's own alpha, so the shadow only
//! appears inside the shape along the edges facing away from the offset.

use crate::color::{Color, Offset, Size};
use crate::error::LayerFxResult;
use crate::filters::blend::{blend, BlendMode};
use crate::filters::blur::blurred_copy;

use super::{check_effect_size, shifted_pairs};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InnerShadow {
    color: Color,
    offset: Offset,
    size: u32,
    blend_mode: BlendMode,
}

impl Default for InnerShadow {
    fn default() -> Self {
        Self {
            color: Color::new(0, 0, 0, 245),
            offset: Offset::new(3, 3),
            size: 3,
            blend_mode: BlendMode::Multiply,
        }
    }
}

impl InnerShadow {
    /// # Arguments
    /// * `color` - Shadow color; alpha is the shadow opacity
    /// * `offset` - Displacement; `(0, 5)` shows the shadow along the top edge
    /// * `size` - Blur radius of the shadow
    /// * `blend_mode` - How the shadow is blended into the layer
    pub fn new(color: Color, offset: Offset, size: u32, blend_mode: BlendMode) -> LayerFxResult<Self> {
        Ok(Self {
            color,
            offset,
            size: check_effect_size("inner_shadow", size)?,
            blend_mode: blend_mode.ensure_supported()?,
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub(crate) fn apply(&self, dst: &mut [Color], src: &[Color], size: Size) {
        let blurred = blurred_copy(src, size, self.size);

        for (target, sample) in shifted_pairs(size, self.offset) {
            let a = (255 - blurred[sample].a as u32) * self.color.a as u32 / 255;
            let a = a * src[target].a as u32 / 255;
            dst[target] = blend(src[target], self.color.with_alpha(a as u8), self.blend_mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_stays_inside_shape() {
        let size = Size::new(6, 6);
        let mut src = vec![Color::TRANSPARENT; 36];
        for y in 1..5 {
            for x in 1..5 {
                src[y * 6 + x] = Color::new(255, 255, 255, 255);
            }
        }
        let mut dst = src.clone();

        let shadow = InnerShadow::new(Color::new(0, 0, 0, 255), Offset::new(1, 1), 0, BlendMode::Normal).unwrap();
        shadow.apply(&mut dst, &src, size);
        let at = |x: usize, y: usize| y * 6 + x;

        // Top-left edge of the square samples outside the shape: full shadow.
        assert_eq!(dst[at(1, 1)], Color::new(0, 0, 0, 255));
        assert_eq!(dst[at(3, 1)], Color::new(0, 0, 0, 255));
        // Interior samples inside the shape: no shadow.
        assert_eq!(dst[at(2, 2)], Color::new(255, 255, 255, 255));
        assert_eq!(dst[at(4, 4)], Color::new(255, 255, 255, 255));
        // Outside the shape the mask keeps the layer transparent.
        assert_eq!(dst[0], Color::TRANSPARENT);
        assert_eq!(dst[at(5, 5)], Color::TRANSPARENT);
    }

    #[test]
    fn test_partial_alpha_mask() {
        let size = Size::new(1, 1);
        let src = vec![Color::new(255, 255, 255, 128)];
        let mut dst = src.clone();
        // Radius 0 copy of a half-transparent pixel: inverted alpha 127.
        let shadow = InnerShadow::new(Color::new(0, 0, 0, 255), Offset::default(), 0, BlendMode::Normal).unwrap();
        shadow.apply(&mut dst, &src, size);

        // a = 127 * 255 / 255 = 127, masked: 127 * 128 / 255 = 63.
        let expected = blend(src[0], Color::new(0, 0, 0, 63), BlendMode::Normal);
        assert_eq!(dst[0], expected);
    }
}
