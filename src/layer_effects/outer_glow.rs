//! Glow layer effect.
//!
//! Blurs the layer's alpha, saturates it with a steep curve (clamped to
//! 128, then doubled) and blends the glow color onto the base beneath the
//! layer.

use crate::color::{Color, Size};
use crate::error::LayerFxResult;
use crate::filters::blend::{blend, BlendMode};
use crate::filters::blur::blurred_copy;

use super::check_effect_size;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glow {
    color: Color,
    size: u32,
    blend_mode: BlendMode,
}

impl Default for Glow {
    fn default() -> Self {
        Self {
            color: Color::new(255, 255, 190, 150),
            size: 5,
            blend_mode: BlendMode::Screen,
        }
    }
}

impl Glow {
    /// # Arguments
    /// * `color` - Glow color; alpha is the glow opacity
    /// * `size` - How far the glow reaches from the edges
    /// * `blend_mode` - How the glow is blended onto the base
    pub fn new(color: Color, size: u32, blend_mode: BlendMode) -> LayerFxResult<Self> {
        Ok(Self {
            color,
            size: check_effect_size("glow", size)?,
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

    pub(crate) fn apply(&self, base: &mut [Color], src: &[Color], size: Size) {
        let blurred = blurred_copy(src, size, self.size);

        for (out, px) in base.iter_mut().zip(&blurred) {
            let a = (px.a as u32).min(128) * 2;
            let a = a.min(255) * self.color.a as u32 / 255;
            *out = blend(*out, self.color.with_alpha(a as u8), self.blend_mode);
        }
    }
}
