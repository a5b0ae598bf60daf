//! LayerFX
//!
//! Layer-effects compositor for 8-bit RGBA images, with Python bindings via
//! PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! All buffers are flat, row-major RGBA8 with straight alpha:
//! - **Core API**: `&[Color]`, `width * height` cells
//! - **Bytes**: `width * height * 4` bytes, channel order R, G, B, A
//! - **Python**: `(height, width, 4)` uint8 arrays
//!
//! ## Architecture
//! - [`filters`] - integer color algebra, blend modes, box blur
//! - [`layer_effects`] - the eight effects and the [`Effect`] dispatcher
//! - [`layer`] - effect pipeline for one layer
//! - [`compositor`] - pooled, reference-counted effects and layers, and
//!   the multi-layer bake
//!
//! All arithmetic is truncating integer math, so output is bit-for-bit
//! reproducible across platforms.
//!
//! ## Example
//!
//! ```
//! use layerfx::{BlendMode, Color, Compositor, Size};
//!
//! let mut comp = Compositor::new()?;
//! let size = Size::new(4, 4);
//! let green = comp.color_overlay(Color::new(0, 255, 0, 255), BlendMode::Normal)?;
//! let layer = comp.create_layer(&[Color::new(255, 0, 0, 255); 16], size, &[green], BlendMode::Normal)?;
//!
//! let mut dst = vec![Color::TRANSPARENT; 16];
//! comp.bake(&mut dst, &[layer])?;
//! assert_eq!(dst[0], Color::new(0, 255, 0, 255));
//! # Ok::<(), layerfx::LayerFxError>(())
//! ```

pub mod buffer;
pub mod color;
pub mod compositor;
pub mod config;
pub mod error;
pub mod filters;
pub mod layer;
pub mod layer_effects;
pub mod pool;
pub mod refcount;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use color::{Color, GradientKey, Offset, Rect, Size};
pub use compositor::{Compositor, EffectHandle, LayerHandle};
pub use config::CompositorConfig;
pub use error::{LayerFxError, LayerFxResult};
pub use filters::blend::{blend, BlendMode};
pub use layer::{apply_effects, apply_effects_into, Layer};
pub use layer_effects::Effect;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::prelude::*;

    use crate::buffer::{pixels_from_array, pixels_to_array};
    use crate::color::{Color, GradientKey, Offset, Size};
    use crate::compositor::Compositor;
    use crate::config::CompositorConfig;
    use crate::error::{LayerFxError, LayerFxResult};
    use crate::filters::blend::BlendMode;
    use crate::layer::apply_effects_into;
    use crate::layer_effects::{
        Blur, ColorOverlay, Effect, Glow, Gradient, InnerGlow, InnerShadow, Outline, Shadow,
    };

    type Rgba = (u8, u8, u8, u8);

    /// Destination pixels: `base` if given, else transparent.
    fn destination(base: Option<PyReadonlyArray3<'_, u8>>, size: Size) -> LayerFxResult<Vec<Color>> {
        let Some(base) = base else {
            return Ok(vec![Color::TRANSPARENT; size.pixel_count()]);
        };
        let (pixels, found) = pixels_from_array(base.as_array())?;
        if found != size {
            return Err(LayerFxError::DimensionMismatch { expected: size, found });
        }
        Ok(pixels)
    }

    /// Bake a single effect over `image` onto `base`.
    fn bake_one<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        base: Option<PyReadonlyArray3<'py, u8>>,
        effect: Effect,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let (src, size) = pixels_from_array(image.as_array())?;
        let mut dst = destination(base, size)?;
        apply_effects_into(&mut dst, &src, size, &[effect])?;
        Ok(pixels_to_array(&dst, size)?.into_pyarray(py))
    }

    // ========================================================================
    // Overlay Effects
    // ========================================================================

    /// Tint the layer with a solid color, keeping its alpha.
    #[pyfunction]
    #[pyo3(signature = (image, base=None, color=(255, 0, 0, 255), blend_mode="normal"))]
    pub fn color_overlay_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        base: Option<PyReadonlyArray3<'py, u8>>,
        color: Rgba,
        blend_mode: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let effect = ColorOverlay::new(color.into(), blend_mode.parse()?)?;
        bake_one(py, image, base, effect.into())
    }

    /// Fill the layer with a linear gradient.
    ///
    /// `keys` is a list of `((r, g, b, a), percent)` stops in ascending order.
    #[pyfunction]
    #[pyo3(signature = (image, keys, base=None, angle=0, blend_mode="normal"))]
    pub fn gradient_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        keys: Vec<(Rgba, u8)>,
        base: Option<PyReadonlyArray3<'py, u8>>,
        angle: i32,
        blend_mode: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let keys = keys
            .into_iter()
            .map(|(color, percent)| GradientKey::new(color.into(), percent))
            .collect();
        let effect = Gradient::new(keys, angle, blend_mode.parse()?)?;
        bake_one(py, image, base, effect.into())
    }

    // ========================================================================
    // Blur and Outline
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, size, base=None))]
    pub fn blur_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        size: u32,
        base: Option<PyReadonlyArray3<'py, u8>>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        bake_one(py, image, base, Blur::new(size)?.into())
    }

    #[pyfunction]
    #[pyo3(signature = (image, base=None, color=(0, 0, 0, 245), size=2, blend_mode="normal"))]
    pub fn outline_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        base: Option<PyReadonlyArray3<'py, u8>>,
        color: Rgba,
        size: u32,
        blend_mode: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let effect = Outline::new(color.into(), size, blend_mode.parse()?)?;
        bake_one(py, image, base, effect.into())
    }

    // ========================================================================
    // Shadow Effects
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, base=None, color=(0, 0, 0, 255), offset=(3, 5), size=5, blend_mode="multiply"))]
    pub fn shadow_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        base: Option<PyReadonlyArray3<'py, u8>>,
        color: Rgba,
        offset: (i32, i32),
        size: u32,
        blend_mode: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let offset = Offset::new(offset.0, offset.1);
        let effect = Shadow::new(color.into(), offset, size, blend_mode.parse()?)?;
        bake_one(py, image, base, effect.into())
    }

    #[pyfunction]
    #[pyo3(signature = (image, base=None, color=(0, 0, 0, 245), offset=(3, 3), size=3, blend_mode="multiply"))]
    pub fn inner_shadow_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        base: Option<PyReadonlyArray3<'py, u8>>,
        color: Rgba,
        offset: (i32, i32),
        size: u32,
        blend_mode: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let offset = Offset::new(offset.0, offset.1);
        let effect = InnerShadow::new(color.into(), offset, size, blend_mode.parse()?)?;
        bake_one(py, image, base, effect.into())
    }

    // ========================================================================
    // Glow Effects
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, base=None, color=(255, 255, 190, 150), size=5, blend_mode="screen"))]
    pub fn glow_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        base: Option<PyReadonlyArray3<'py, u8>>,
        color: Rgba,
        size: u32,
        blend_mode: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let effect = Glow::new(color.into(), size, blend_mode.parse()?)?;
        bake_one(py, image, base, effect.into())
    }

    #[pyfunction]
    #[pyo3(signature = (image, base=None, color=(255, 255, 190, 150), size=5, blend_mode="screen"))]
    pub fn inner_glow_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        base: Option<PyReadonlyArray3<'py, u8>>,
        color: Rgba,
        size: u32,
        blend_mode: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let effect = InnerGlow::new(color.into(), size, blend_mode.parse()?)?;
        bake_one(py, image, base, effect.into())
    }

    // ========================================================================
    // Compositing
    // ========================================================================

    /// Composite `(image, blend_mode)` layers onto `base`, first layer at the
    /// bottom. All images must have the same shape.
    #[pyfunction]
    pub fn composite_rgba<'py>(
        py: Python<'py>,
        base: PyReadonlyArray3<'py, u8>,
        layers: Vec<(PyReadonlyArray3<'py, u8>, String)>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let (mut dst, size) = pixels_from_array(base.as_array())?;
        let config = CompositorConfig::default().with_pool_capacity(layers.len());
        let mut comp = Compositor::with_config(config)?;

        let mut handles = Vec::with_capacity(layers.len());
        for (image, mode) in &layers {
            let (pixels, layer_size) = pixels_from_array(image.as_array())?;
            if layer_size != size {
                return Err(LayerFxError::DimensionMismatch { expected: size, found: layer_size }.into());
            }
            let mode: BlendMode = mode.parse()?;
            handles.push(comp.create_layer(&pixels, layer_size, &[], mode)?);
        }
        comp.bake(&mut dst, &handles)?;
        Ok(pixels_to_array(&dst, size)?.into_pyarray(py))
    }

    #[pymodule]
    pub fn layerfx(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Layer effects
        m.add_function(wrap_pyfunction!(color_overlay_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(gradient_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(blur_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(outline_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(shadow_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(inner_shadow_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(glow_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(inner_glow_rgba, m)?)?;

        // Compositing
        m.add_function(wrap_pyfunction!(composite_rgba, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::layerfx;
