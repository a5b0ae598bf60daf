//! Drop shadow layer effect.
//!
//! Creates a shadow by:
//! 1. Blurring the layer (only the alpha of the result is used)
//! 2. Shifting the blurred field by `offset`
//! 3. Scaling by the shadow color's alpha
//! 4. Blending onto the base beneath the layer
//!
//! The layer itself is composited afterwards, so the shadow only shows where
//! it extends past the shape.

use crate::color::{Color, Offset, Size};
use crate::error::LayerFxResult;
use crate::filters::blend::{blend, BlendMode};
use crate::filters::blur::blurred_copy;

use super::{check_effect_size, shifted_pairs};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shadow {
    color: Color,
    offset: Offset,
    size: u32,
    blend_mode: BlendMode,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::new(0, 0, 0, 255),
            offset: Offset::new(3, 5),
            size: 5,
            blend_mode: BlendMode::Multiply,
        }
    }
}

impl Shadow {
    /// # Arguments
    /// * `color` - Shadow color; alpha is the shadow opacity
    /// * `offset` - Displacement; `(0, 5)` moves the shadow 5 pixels down
    /// * `size` - Blur radius of the shadow
    /// * `blend_mode` - How the shadow is blended onto the base
    pub fn new(color: Color, offset: Offset, size: u32, blend_mode: BlendMode) -> LayerFxResult<Self> {
        Ok(Self {
            color,
            offset,
            size: check_effect_size("shadow", size)?,
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

    pub(crate) fn apply(&self, base: &mut [Color], src: &[Color], size: Size) {
        let blurred = blurred_copy(src, size, self.size);

        for (target, sample) in shifted_pairs(size, self.offset) {
            let a = blurred[sample].a as u32 * self.color.a as u32 / 255;
            base[target] = blend(base[target], self.color.with_alpha(a as u8), self.blend_mode);
        }
    }
}
