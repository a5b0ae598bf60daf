//! Layers: an owned pixel copy, an effect stack and a blend mode.
//!
//! Baking runs the effects in order over a working copy of the layer, then
//! composites that copy onto the destination:
//!
//! ```text
//! work = pixels
//! for effect in effects:
//!     snapshot = work
//!     effect.apply(base = dst, dst = work, src = snapshot)
//! dst[i] = blend(dst[i], work[i], blend_mode)
//! ```
//!
//! Outline, Shadow and Glow write into `dst` directly while the stack runs,
//! so they end up underneath the composited layer.

use crate::color::{Color, Size};
use crate::compositor::EffectHandle;
use crate::error::{LayerFxError, LayerFxResult};
use crate::filters::blend::{blend, BlendMode};
use crate::layer_effects::Effect;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    pixels: Vec<Color>,
    size: Size,
    blend_mode: BlendMode,
    effects: Vec<EffectHandle>,
}

impl Layer {
    /// Copy `src` into a new layer with an empty effect stack.
    pub fn new(src: &[Color], size: Size, blend_mode: BlendMode) -> LayerFxResult<Self> {
        check_buffer(src, size)?;
        Ok(Self {
            pixels: src.to_vec(),
            size,
            blend_mode: blend_mode.ensure_supported()?,
            effects: Vec::new(),
        })
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Attached effects in application order.
    pub fn effects(&self) -> &[EffectHandle] {
        &self.effects
    }

    pub(crate) fn push_effect(&mut self, effect: EffectHandle) {
        self.effects.push(effect);
    }

    /// Detach the first attachment of `effect`.
    pub(crate) fn remove_effect(&mut self, effect: EffectHandle) -> bool {
        match self.effects.iter().position(|&e| e == effect) {
            Some(i) => {
                self.effects.remove(i);
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_effects(&mut self) -> Vec<EffectHandle> {
        std::mem::take(&mut self.effects)
    }

    /// Run `effects` over this layer and composite the result onto `dst`.
    ///
    /// Every effect is validated against the layer size before any pixel of
    /// `dst` is touched.
    #[tracing::instrument(level = "debug", skip_all, fields(size = %self.size, effects = effects.len()))]
    pub fn bake_with(&self, dst: &mut [Color], effects: &[&Effect]) -> LayerFxResult<()> {
        check_buffer(dst, self.size)?;
        for effect in effects {
            effect.validate_for(self.size)?;
        }

        let mut work = self.pixels.clone();
        let mut snapshot = vec![Color::TRANSPARENT; work.len()];
        for effect in effects {
            snapshot.copy_from_slice(&work);
            effect.apply(dst, &mut work, &snapshot, self.size);
            tracing::debug!(effect = effect.name(), "applied effect");
        }

        for (out, &px) in dst.iter_mut().zip(&work) {
            *out = blend(*out, px, self.blend_mode);
        }
        Ok(())
    }
}

/// Bake `effects` over `pixels` and composite the result back onto them.
pub fn apply_effects(pixels: &mut [Color], size: Size, effects: &[Effect]) -> LayerFxResult<()> {
    let layer = Layer::new(pixels, size, BlendMode::Normal)?;
    let effects: Vec<&Effect> = effects.iter().collect();
    layer.bake_with(pixels, &effects)
}

/// Bake `effects` over `src` and composite the result onto `dst`.
pub fn apply_effects_into(
    dst: &mut [Color],
    src: &[Color],
    size: Size,
    effects: &[Effect],
) -> LayerFxResult<()> {
    let layer = Layer::new(src, size, BlendMode::Normal)?;
    let effects: Vec<&Effect> = effects.iter().collect();
    layer.bake_with(dst, &effects)
}

pub(crate) fn check_buffer(buffer: &[Color], size: Size) -> LayerFxResult<()> {
    if buffer.len() != size.pixel_count() {
        tracing::warn!(%size, len = buffer.len(), "pixel buffer does not match size");
        return Err(LayerFxError::BufferSize {
            expected: size.pixel_count(),
            found: buffer.len(),
        });
    }
    Ok(())
}
