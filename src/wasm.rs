//! WebAssembly exports for the layer effects.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! ## Buffers
//!
//! Images are flat RGBA byte arrays (length = width * height * 4). Every
//! function bakes one effect over `data` onto `base`, or onto a transparent
//! image when `base` is omitted, and returns the composited bytes.
//!
//! Colors are packed as `0xRRGGBBAA`.

use wasm_bindgen::prelude::*;

use crate::buffer::{pixels_from_bytes, pixels_to_bytes};
use crate::color::{Color, GradientKey, Offset, Size};
use crate::error::{LayerFxError, LayerFxResult};
use crate::filters::blend::BlendMode;
use crate::layer::apply_effects_into;
use crate::layer_effects::{
    Blur, ColorOverlay, Effect, Glow, Gradient, InnerGlow, InnerShadow, Outline, Shadow,
};

fn unpack(color: u32) -> Color {
    Color::from(color.to_be_bytes())
}

fn bake_one(
    data: &[u8],
    base: Option<Vec<u8>>,
    width: u32,
    height: u32,
    effect: Effect,
) -> LayerFxResult<Vec<u8>> {
    let size = Size::new(width, height);
    let src = pixels_from_bytes(data, size)?;
    let mut dst = match base {
        Some(bytes) => pixels_from_bytes(&bytes, size)?,
        None => vec![Color::TRANSPARENT; size.pixel_count()],
    };
    apply_effects_into(&mut dst, &src, size, &[effect])?;
    Ok(pixels_to_bytes(&dst))
}

// ============================================================================
// Overlay Effects
// ============================================================================

/// Tint the layer with a solid color, keeping its alpha.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `base` - Optional image beneath the layer, same layout
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `color` - Overlay color, `0xRRGGBBAA`
/// * `blend_mode` - Blend mode name, e.g. `"normal"` or `"multiply"`
#[wasm_bindgen]
pub fn color_overlay_rgba_wasm(
    data: &[u8],
    base: Option<Vec<u8>>,
    width: u32,
    height: u32,
    color: u32,
    blend_mode: &str,
) -> Result<Vec<u8>, JsValue> {
    let effect = ColorOverlay::new(unpack(color), blend_mode.parse()?)?;
    Ok(bake_one(data, base, width, height, effect.into())?)
}

/// Linear gradient fill.
///
/// `keys` holds 5 bytes per stop: `r, g, b, a, percent`.
#[wasm_bindgen]
pub fn gradient_rgba_wasm(
    data: &[u8],
    base: Option<Vec<u8>>,
    width: u32,
    height: u32,
    keys: &[u8],
    angle: i32,
    blend_mode: &str,
) -> Result<Vec<u8>, JsValue> {
    if keys.len() % 5 != 0 {
        return Err(LayerFxError::invalid_parameter("gradient keys must be 5 bytes per stop").into());
    }
    let keys = keys
        .chunks_exact(5)
        .map(|k| GradientKey::new(Color::new(k[0], k[1], k[2], k[3]), k[4]))
        .collect();
    let effect = Gradient::new(keys, angle, blend_mode.parse()?)?;
    Ok(bake_one(data, base, width, height, effect.into())?)
}

// ============================================================================
// Blur and Outline
// ============================================================================

#[wasm_bindgen]
pub fn blur_rgba_wasm(
    data: &[u8],
    base: Option<Vec<u8>>,
    width: u32,
    height: u32,
    size: u32,
) -> Result<Vec<u8>, JsValue> {
    Ok(bake_one(data, base, width, height, Blur::new(size)?.into())?)
}

#[wasm_bindgen]
pub fn outline_rgba_wasm(
    data: &[u8],
    base: Option<Vec<u8>>,
    width: u32,
    height: u32,
    color: u32,
    size: u32,
    blend_mode: &str,
) -> Result<Vec<u8>, JsValue> {
    let effect = Outline::new(unpack(color), size, blend_mode.parse()?)?;
    Ok(bake_one(data, base, width, height, effect.into())?)
}

// ============================================================================
// Shadow Effects
// ============================================================================

#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn shadow_rgba_wasm(
    data: &[u8],
    base: Option<Vec<u8>>,
    width: u32,
    height: u32,
    color: u32,
    offset_x: i32,
    offset_y: i32,
    size: u32,
    blend_mode: &str,
) -> Result<Vec<u8>, JsValue> {
    let offset = Offset::new(offset_x, offset_y);
    let effect = Shadow::new(unpack(color), offset, size, blend_mode.parse()?)?;
    Ok(bake_one(data, base, width, height, effect.into())?)
}

#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn inner_shadow_rgba_wasm(
    data: &[u8],
    base: Option<Vec<u8>>,
    width: u32,
    height: u32,
    color: u32,
    offset_x: i32,
    offset_y: i32,
    size: u32,
    blend_mode: &str,
) -> Result<Vec<u8>, JsValue> {
    let offset = Offset::new(offset_x, offset_y);
    let effect = InnerShadow::new(unpack(color), offset, size, blend_mode.parse()?)?;
    Ok(bake_one(data, base, width, height, effect.into())?)
}

// ============================================================================
// Glow Effects
// ============================================================================

#[wasm_bindgen]
pub fn glow_rgba_wasm(
    data: &[u8],
    base: Option<Vec<u8>>,
    width: u32,
    height: u32,
    color: u32,
    size: u32,
    blend_mode: &str,
) -> Result<Vec<u8>, JsValue> {
    let effect = Glow::new(unpack(color), size, blend_mode.parse()?)?;
    Ok(bake_one(data, base, width, height, effect.into())?)
}

#[wasm_bindgen]
pub fn inner_glow_rgba_wasm(
    data: &[u8],
    base: Option<Vec<u8>>,
    width: u32,
    height: u32,
    color: u32,
    size: u32,
    blend_mode: &str,
) -> Result<Vec<u8>, JsValue> {
    let effect = InnerGlow::new(unpack(color), size, blend_mode.parse()?)?;
    Ok(bake_one(data, base, width, height, effect.into())?)
}

// ============================================================================
// Blend Modes
// ============================================================================

/// Whether `name` parses to a blend mode the effects accept.
#[wasm_bindgen]
pub fn is_blend_mode_supported_wasm(name: &str) -> bool {
    name.parse::<BlendMode>()
        .map(BlendMode::is_supported)
        .unwrap_or(false)
}
