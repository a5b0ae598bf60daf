//! Pooled effects and layers, and the multi-layer bake.
//!
//! A [`Compositor`] owns one fixed-capacity [`Pool`] that stores every effect
//! and layer it creates. Callers hold typed handles and manage lifetimes with
//! explicit retain/release, exactly like the objects they stand for:
//!
//! - every factory returns a handle with a reference count of 1
//! - attaching an effect to a layer retains it, detaching releases it
//! - releasing the last reference frees the slot; a layer releases its
//!   effects on the way out
//!
//! Handles are generational, so a handle used after its final release is
//! reported as [`LayerFxError::StaleHandle`] instead of reaching a new object.

use crate::color::{Color, GradientKey, Offset, Size};
use crate::config::CompositorConfig;
use crate::error::{LayerFxError, LayerFxResult};
use crate::filters::blend::BlendMode;
use crate::layer::{check_buffer, Layer};
use crate::layer_effects::{
    Blur, ColorOverlay, Effect, Glow, Gradient, InnerGlow, InnerShadow, Outline, Shadow,
};
use crate::pool::{Pool, SlotId};
use crate::refcount::RefCounted;

/// Reference to a pooled [`Effect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectHandle(SlotId);

/// Reference to a pooled [`Layer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerHandle(SlotId);

/// Contents of one pool slot.
#[derive(Debug)]
pub enum PoolObject {
    Effect(RefCounted<Effect>),
    Layer(RefCounted<Layer>),
}

#[derive(Debug)]
pub struct Compositor {
    pool: Pool<PoolObject>,
    config: CompositorConfig,
}

impl Compositor {
    /// Compositor with the default pool capacity.
    pub fn new() -> LayerFxResult<Self> {
        Self::with_config(CompositorConfig::default())
    }

    pub fn with_config(config: CompositorConfig) -> LayerFxResult<Self> {
        let mut pool = Pool::new();
        pool.register_type::<RefCounted<Effect>>()?;
        pool.register_type::<RefCounted<Layer>>()?;
        pool.create(config.pool_capacity)?;
        Ok(Self { pool, config })
    }

    pub fn config(&self) -> CompositorConfig {
        self.config
    }

    // ========================================================================
    // Effect Factories
    // ========================================================================

    pub fn color_overlay(&mut self, color: Color, blend_mode: BlendMode) -> LayerFxResult<EffectHandle> {
        self.add_effect_object(ColorOverlay::new(color, blend_mode)?.into())
    }

    pub fn blur(&mut self, size: u32) -> LayerFxResult<EffectHandle> {
        self.add_effect_object(Blur::new(size)?.into())
    }

    pub fn outline(&mut self, color: Color, size: u32, blend_mode: BlendMode) -> LayerFxResult<EffectHandle> {
        self.add_effect_object(Outline::new(color, size, blend_mode)?.into())
    }

    pub fn shadow(
        &mut self,
        color: Color,
        offset: Offset,
        size: u32,
        blend_mode: BlendMode,
    ) -> LayerFxResult<EffectHandle> {
        self.add_effect_object(Shadow::new(color, offset, size, blend_mode)?.into())
    }

    pub fn inner_shadow(
        &mut self,
        color: Color,
        offset: Offset,
        size: u32,
        blend_mode: BlendMode,
    ) -> LayerFxResult<EffectHandle> {
        self.add_effect_object(InnerShadow::new(color, offset, size, blend_mode)?.into())
    }

    pub fn glow(&mut self, color: Color, size: u32, blend_mode: BlendMode) -> LayerFxResult<EffectHandle> {
        self.add_effect_object(Glow::new(color, size, blend_mode)?.into())
    }

    pub fn inner_glow(&mut self, color: Color, size: u32, blend_mode: BlendMode) -> LayerFxResult<EffectHandle> {
        self.add_effect_object(InnerGlow::new(color, size, blend_mode)?.into())
    }

    pub fn gradient(
        &mut self,
        keys: Vec<GradientKey>,
        angle: i32,
        blend_mode: BlendMode,
    ) -> LayerFxResult<EffectHandle> {
        self.add_effect_object(Gradient::new(keys, angle, blend_mode)?.into())
    }

    /// Pool an already constructed effect.
    pub fn add_effect_object(&mut self, effect: Effect) -> LayerFxResult<EffectHandle> {
        let name = effect.name();
        let id = self.pool.alloc(PoolObject::Effect(RefCounted::new(effect)))?;
        tracing::debug!(effect = name, index = id.index(), "created effect");
        Ok(EffectHandle(id))
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// Copy `src` into a pooled layer and attach `effects` in order.
    ///
    /// Each attachment retains its effect; the caller keeps its own references.
    pub fn create_layer(
        &mut self,
        src: &[Color],
        size: Size,
        effects: &[EffectHandle],
        blend_mode: BlendMode,
    ) -> LayerFxResult<LayerHandle> {
        let mut layer = Layer::new(src, size, blend_mode)?;
        for &effect in effects {
            self.effect(effect)?;
        }
        for &effect in effects {
            self.retain_effect(effect)?;
            layer.push_effect(effect);
        }

        match self.pool.alloc(PoolObject::Layer(RefCounted::new(layer))) {
            Ok(id) => {
                tracing::debug!(%size, effects = effects.len(), index = id.index(), "created layer");
                Ok(LayerHandle(id))
            }
            Err(err) => {
                for &effect in effects {
                    self.release_effect(effect)?;
                }
                Err(err)
            }
        }
    }

    pub fn add_effect(&mut self, layer: LayerHandle, effect: EffectHandle) -> LayerFxResult<()> {
        self.layer(layer)?;
        self.retain_effect(effect)?;
        self.layer_mut(layer)?.push_effect(effect);
        Ok(())
    }

    /// Detach the first attachment of `effect`. Returns whether one was found.
    pub fn remove_effect(&mut self, layer: LayerHandle, effect: EffectHandle) -> LayerFxResult<bool> {
        let removed = self.layer_mut(layer)?.remove_effect(effect);
        if removed {
            self.release_effect(effect)?;
        }
        Ok(removed)
    }

    // ========================================================================
    // Retain / Release
    // ========================================================================

    pub fn retain_effect(&mut self, effect: EffectHandle) -> LayerFxResult<()> {
        self.effect_entry(effect)?.retain();
        Ok(())
    }

    /// Drop one reference; the effect is freed when none remain.
    pub fn release_effect(&mut self, effect: EffectHandle) -> LayerFxResult<()> {
        if self.effect_entry(effect)?.release()? {
            self.pool.free(effect.0)?;
            tracing::debug!(index = effect.0.index(), "freed effect");
        }
        Ok(())
    }

    pub fn retain_layer(&mut self, layer: LayerHandle) -> LayerFxResult<()> {
        self.layer_entry(layer)?.retain();
        Ok(())
    }

    /// Drop one reference; the layer is freed when none remain, releasing
    /// each of its effect attachments.
    pub fn release_layer(&mut self, layer: LayerHandle) -> LayerFxResult<()> {
        if !self.layer_entry(layer)?.release()? {
            return Ok(());
        }

        let effects = match self.pool.free(layer.0)? {
            PoolObject::Layer(mut freed) => freed.take_effects(),
            PoolObject::Effect(_) => Vec::new(),
        };
        tracing::debug!(index = layer.0.index(), effects = effects.len(), "freed layer");
        let mut first_err = None;
        for effect in effects {
            if let Err(err) = self.release_effect(effect) {
                tracing::warn!(index = effect.0.index(), %err, "failed to release layer effect");
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn effect(&self, effect: EffectHandle) -> LayerFxResult<&Effect> {
        match self.pool.get(effect.0)? {
            PoolObject::Effect(e) => Ok(&**e),
            PoolObject::Layer(_) => Err(LayerFxError::StaleHandle { index: effect.0.index() }),
        }
    }

    pub fn layer(&self, layer: LayerHandle) -> LayerFxResult<&Layer> {
        match self.pool.get(layer.0)? {
            PoolObject::Layer(l) => Ok(&**l),
            PoolObject::Effect(_) => Err(LayerFxError::StaleHandle { index: layer.0.index() }),
        }
    }

    pub fn effect_ref_count(&self, effect: EffectHandle) -> LayerFxResult<u32> {
        match self.pool.get(effect.0)? {
            PoolObject::Effect(e) => Ok(e.count()),
            PoolObject::Layer(_) => Err(LayerFxError::StaleHandle { index: effect.0.index() }),
        }
    }

    pub fn layer_ref_count(&self, layer: LayerHandle) -> LayerFxResult<u32> {
        match self.pool.get(layer.0)? {
            PoolObject::Layer(l) => Ok(l.count()),
            PoolObject::Effect(_) => Err(LayerFxError::StaleHandle { index: layer.0.index() }),
        }
    }

    /// Effects and layers currently occupying pool slots.
    pub fn live_objects(&self) -> usize {
        self.pool.live_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Free every pooled object at once without running release cascades.
    ///
    /// All outstanding handles become stale.
    pub fn clear(&mut self) {
        self.pool.clear();
    }

    // ========================================================================
    // Bake
    // ========================================================================

    /// Bake `layers` onto `dst` in order, later layers on top.
    ///
    /// All layers must share the first layer's size and `dst` must hold
    /// exactly that many pixels. Sizes and effect parameters of every layer
    /// are checked before anything is drawn.
    #[tracing::instrument(level = "debug", skip_all, fields(layers = layers.len()))]
    pub fn bake(&self, dst: &mut [Color], layers: &[LayerHandle]) -> LayerFxResult<()> {
        let Some(&first) = layers.first() else {
            return Ok(());
        };

        let expected = self.layer(first)?.size();
        let mut staged = Vec::with_capacity(layers.len());
        for &handle in layers {
            let layer = self.layer(handle)?;
            let found = layer.size();
            if found != expected {
                tracing::warn!(%expected, %found, "layer size mismatch");
                return Err(LayerFxError::DimensionMismatch { expected, found });
            }
            let effects = layer
                .effects()
                .iter()
                .map(|&e| self.effect(e))
                .collect::<LayerFxResult<Vec<_>>>()?;
            for effect in &effects {
                effect.validate_for(expected)?;
            }
            staged.push((layer, effects));
        }
        check_buffer(dst, expected)?;

        for (layer, effects) in &staged {
            layer.bake_with(dst, effects)?;
        }
        Ok(())
    }

    fn effect_entry(&mut self, effect: EffectHandle) -> LayerFxResult<&mut RefCounted<Effect>> {
        match self.pool.get_mut(effect.0)? {
            PoolObject::Effect(e) => Ok(e),
            PoolObject::Layer(_) => Err(LayerFxError::StaleHandle { index: effect.0.index() }),
        }
    }

    fn layer_entry(&mut self, layer: LayerHandle) -> LayerFxResult<&mut RefCounted<Layer>> {
        match self.pool.get_mut(layer.0)? {
            PoolObject::Layer(l) => Ok(l),
            PoolObject::Effect(_) => Err(LayerFxError::StaleHandle { index: layer.0.index() }),
        }
    }

    fn layer_mut(&mut self, layer: LayerHandle) -> LayerFxResult<&mut Layer> {
        Ok(&mut **self.layer_entry(layer)?)
    }
}
