//! Inner Glow layer effect.
//!
//! Blurs the layer's alpha and maps the upper half of the blurred range
//! through `255 - 2 * (alpha - 127)`, which is bright near the edges and
//! fades to nothing towards the middle of the shape. The glow is masked by
//! the layer's alpha and blended into the layer.

use crate::color::{Color, Size};
use crate::error::LayerFxResult;
use crate::filters::blend::{blend, BlendMode};
use crate::filters::blur::blurred_copy;

use super::check_effect_size;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InnerGlow {
    color: Color,
    size: u32,
    blend_mode: BlendMode,
}

impl Default for InnerGlow {
    fn default() -> Self {
        Self {
            color: Color::new(255, 255, 190, 150),
            size: 5,
            blend_mode: BlendMode::Screen,
        }
    }
}

impl InnerGlow {
    pub fn new(color: Color, size: u32, blend_mode: BlendMode) -> LayerFxResult<Self> {
        Ok(Self {
            color,
            size: check_effect_size("inner_glow", size)?,
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

    pub(crate) fn apply(&self, dst: &mut [Color], src: &[Color], size: Size) {
        let blurred = blurred_copy(src, size, self.size);

        for ((out, px), orig) in dst.iter_mut().zip(&blurred).zip(src) {
            let a = (px.a as u32).clamp(127, 255) - 127;
            let a = 255 - (a * 2).min(255);
            let a = a * self.color.a as u32 / 255;
            let a = a * orig.a as u32 / 255;
            *out = blend(*out, self.color.with_alpha(a as u8), self.blend_mode);
        }
    }
}
