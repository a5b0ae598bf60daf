//! Color Overlay layer effect.
//!
//! Blends a solid color over every pixel while preserving alpha, so the
//! overlay tints the layer but never changes its shape or opacity.

use crate::color::Color;
use crate::error::LayerFxResult;
use crate::filters::blend::{blend, BlendMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorOverlay {
    color: Color,
    blend_mode: BlendMode,
}

impl Default for ColorOverlay {
    fn default() -> Self {
        Self {
            color: Color::new(255, 0, 0, 255),
            blend_mode: BlendMode::Normal,
        }
    }
}

impl ColorOverlay {
    /// # Arguments
    /// * `color` - Overlay color; its alpha is the overlay opacity
    /// * `blend_mode` - How `color` is blended onto the layer
    pub fn new(color: Color, blend_mode: BlendMode) -> LayerFxResult<Self> {
        Ok(Self {
            color,
            blend_mode: blend_mode.ensure_supported()?,
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub(crate) fn apply(&self, dst: &mut [Color], src: &[Color]) {
        for (out, &px) in dst.iter_mut().zip(src) {
            *out = blend(px, self.color, self.blend_mode).with_alpha(px.a);
        }
    }
}
