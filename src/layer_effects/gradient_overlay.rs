//! Gradient layer effect.
//!
//! Fills the layer with a linear gradient while preserving the alpha
//! channel. Angle 0 runs top to bottom; angles go counter-clockwise.
//!
//! Each pixel is projected onto the gradient axis with the fixed-point
//! sine/cosine tables, giving a position in `[0, 10000]`. The ordered keys
//! are then walked to find the bracketing pair, which is interpolated with
//! `lerp_percentile`.

use crate::color::{Color, GradientKey, Size};
use crate::error::{LayerFxError, LayerFxResult};
use crate::filters::blend::{blend, BlendMode};
use crate::filters::core::{cos_fixed, lerp_percentile, sin_fixed, wrap_angle, PERCENTILE_SCALE};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gradient {
    keys: Vec<GradientKey>,
    angle: u16,
    blend_mode: BlendMode,
}

impl Gradient {
    /// # Arguments
    /// * `keys` - Gradient stops, `percent` in 0..=100, non-decreasing
    /// * `angle` - Degrees, any integer; wrapped into `[0, 360)`
    /// * `blend_mode` - How the gradient is blended into the layer
    ///
    /// An empty key list is accepted and makes the effect a no-op.
    pub fn new(keys: Vec<GradientKey>, angle: i32, blend_mode: BlendMode) -> LayerFxResult<Self> {
        let mut previous = 0u8;
        for (i, key) in keys.iter().enumerate() {
            if key.percent > 100 {
                return Err(LayerFxError::invalid_parameter(format!(
                    "gradient key {i} has percent {} outside 0..=100",
                    key.percent
                )));
            }
            if key.percent < previous {
                return Err(LayerFxError::invalid_parameter(format!(
                    "gradient key {i} at {}% comes after a key at {previous}%",
                    key.percent
                )));
            }
            previous = key.percent;
        }

        Ok(Self {
            keys,
            angle: wrap_angle(angle),
            blend_mode: blend_mode.ensure_supported()?,
        })
    }

    pub fn keys(&self) -> &[GradientKey] {
        &self.keys
    }

    /// Normalized angle in `[0, 360)`.
    pub fn angle(&self) -> u16 {
        self.angle
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Ramp color at `position` in `[0, 10000]`.
    ///
    /// Positions before the first key take its color, positions at or past
    /// the last key take the last key's color.
    pub fn color_at(&self, position: u32) -> Color {
        let Some(first) = self.keys.first() else {
            return Color::TRANSPARENT;
        };

        let mut color = first.color;
        let mut local = 0u32;
        for key in &self.keys {
            let stop = key.percent as u32 * 100;
            if position < stop {
                let t = (position - local) * PERCENTILE_SCALE / (stop - local);
                return lerp_percentile(color, key.color, t);
            }
            color = key.color;
            local = stop;
        }
        color
    }

    pub(crate) fn apply(&self, dst: &mut [Color], src: &[Color], size: Size) {
        if self.keys.is_empty() || size.pixel_count() == 0 {
            return;
        }

        let sin = sin_fixed(self.angle) as i64 / 100;
        let cos = cos_fixed(self.angle) as i64 / 100;
        let (w, h) = (size.width as i64, size.height as i64);
        let span = (sin * w).abs() + (cos * h).abs();
        if span == 0 {
            return;
        }

        let scale = PERCENTILE_SCALE as i64;
        for y in 0..h {
            let along_y = if cos >= 0 { y * cos } else { (h - y) * -cos };
            for x in 0..w {
                let along_x = if sin >= 0 { x * sin } else { (w - x) * -sin };
                let position = ((along_x + along_y) * scale / span).clamp(0, scale) as u32;

                let i = (y * w + x) as usize;
                let mut color = self.color_at(position);
                color.a = (src[i].a as u32 * color.a as u32 / 255) as u8;
                dst[i] = blend(dst[i], color, self.blend_mode);
            }
        }
    }
}
