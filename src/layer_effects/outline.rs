//! Outline layer effect.
//!
//! Blurs the layer's alpha and pushes it through a steep step so the soft
//! edge becomes a ring of roughly `size` pixels. The ring is blended onto
//! the base beneath the layer, so the layer itself later covers its inside.

use crate::color::{Color, Size};
use crate::error::LayerFxResult;
use crate::filters::blend::{blend, BlendMode};
use crate::filters::blur::blurred_copy;

use super::check_effect_size;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outline {
    color: Color,
    size: u32,
    blend_mode: BlendMode,
}

impl Default for Outline {
    fn default() -> Self {
        Self {
            color: Color::new(0, 0, 0, 245),
            size: 2,
            blend_mode: BlendMode::Normal,
        }
    }
}

impl Outline {
    /// # Arguments
    /// * `color` - Outline color; alpha scales the ring opacity
    /// * `size` - Thickness of the ring in pixels
    /// * `blend_mode` - How the ring is blended onto the base
    pub fn new(color: Color, size: u32, blend_mode: BlendMode) -> LayerFxResult<Self> {
        Ok(Self {
            color,
            size: check_effect_size("outline", size)?,
            blend_mode: blend_mode.ensure_supported()?,
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Step parameters `(divider, multiplier)`, derived from the smallest
    /// power of two >= `size`, capped at 32.
    fn step(&self) -> (u32, u32) {
        let mut pow2 = 1u32;
        while pow2 < self.size {
            pow2 *= 2;
        }
        let pow2 = pow2.min(32);
        (32 / pow2, 8 * pow2)
    }

    pub(crate) fn apply(&self, base: &mut [Color], src: &[Color], size: Size) {
        let blurred = blurred_copy(src, size, self.size);
        let (divider, multiplier) = self.step();

        for (out, px) in base.iter_mut().zip(&blurred) {
            let a = (px.a as u32).min(divider);
            let a = (a * multiplier).min(255);
            let a = a * self.color.a as u32 / 255;
            *out = blend(*out, self.color.with_alpha(a as u8), self.blend_mode);
        }
    }
}
