//! Layer effects (Photoshop-style layer styles).
//!
//! This module provides all layer effects:
//!
//! ## Shadow Effects
//! - **Shadow** - Shadow cast behind the layer (`drop_shadow.rs`)
//! - **Inner Shadow** - Shadow inside the layer edges (`inner_shadow.rs`)
//!
//! ## Glow Effects
//! - **Glow** - Glow radiating outward from edges (`outer_glow.rs`)
//! - **Inner Glow** - Glow radiating inward from edges (`inner_glow.rs`)
//!
//! ## Overlay Effects
//! - **Color Overlay** - Solid color fill preserving alpha (`color_overlay.rs`)
//! - **Gradient** - Linear gradient fill preserving alpha (`gradient_overlay.rs`)
//!
//! ## Other
//! - **Blur** - Box blur of the whole layer (`blur.rs`)
//! - **Outline** - Ring around layer content (`outline.rs`)
//!
//! ## Buffers
//!
//! Every effect is applied as `apply(base, dst, src, size)`:
//! - `src` is the layer as it was before this effect (read only)
//! - `dst` is the working copy of the layer the effect accumulates into
//! - `base` is whatever lies beneath the layer; Outline, Shadow and Glow
//!   draw there, *under* the layer, instead of into `dst`
//!
//! The three buffers are distinct slices, so they can never alias.

pub mod blur;
pub mod color_overlay;
pub mod drop_shadow;
pub mod gradient_overlay;
pub mod inner_glow;
pub mod inner_shadow;
pub mod outer_glow;
pub mod outline;

pub use blur::Blur;
pub use color_overlay::ColorOverlay;
pub use drop_shadow::Shadow;
pub use gradient_overlay::Gradient;
pub use inner_glow::InnerGlow;
pub use inner_shadow::InnerShadow;
pub use outer_glow::Glow;
pub use outline::Outline;

use crate::color::{Color, Offset, Size};
use crate::config::MAX_EFFECT_SIZE;
use crate::error::{LayerFxError, LayerFxResult};
use crate::filters::blur::has_interior;

/// One entry of a layer's effect stack.
///
/// Dispatch is a plain `match` so the per-pixel loops stay monomorphic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    ColorOverlay(ColorOverlay),
    Blur(Blur),
    Outline(Outline),
    Shadow(Shadow),
    InnerShadow(InnerShadow),
    Glow(Glow),
    InnerGlow(InnerGlow),
    Gradient(Gradient),
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::ColorOverlay(_) => "color_overlay",
            Effect::Blur(_) => "blur",
            Effect::Outline(_) => "outline",
            Effect::Shadow(_) => "shadow",
            Effect::InnerShadow(_) => "inner_shadow",
            Effect::Glow(_) => "glow",
            Effect::InnerGlow(_) => "inner_glow",
            Effect::Gradient(_) => "gradient",
        }
    }

    /// Check the effect's parameters against an image of `size`.
    ///
    /// Blur-based effects need at least one interior pixel; offsets must
    /// stay inside the image.
    pub fn validate_for(&self, size: Size) -> LayerFxResult<()> {
        match self {
            Effect::ColorOverlay(_) | Effect::Gradient(_) => Ok(()),
            Effect::Blur(e) => check_blur_fits("blur", e.size(), size),
            Effect::Outline(e) => check_blur_fits("outline", e.size(), size),
            Effect::Glow(e) => check_blur_fits("glow", e.size(), size),
            Effect::InnerGlow(e) => check_blur_fits("inner_glow", e.size(), size),
            Effect::Shadow(e) => {
                check_blur_fits("shadow", e.size(), size)?;
                check_offset_fits("shadow", e.offset(), size)
            }
            Effect::InnerShadow(e) => {
                check_blur_fits("inner_shadow", e.size(), size)?;
                check_offset_fits("inner_shadow", e.offset(), size)
            }
        }
    }

    /// Apply the effect. All buffers hold `size.pixel_count()` cells.
    pub fn apply(&self, base: &mut [Color], dst: &mut [Color], src: &[Color], size: Size) {
        debug_assert_eq!(base.len(), size.pixel_count());
        debug_assert_eq!(dst.len(), size.pixel_count());
        debug_assert_eq!(src.len(), size.pixel_count());

        match self {
            Effect::ColorOverlay(e) => e.apply(dst, src),
            Effect::Blur(e) => e.apply(dst, src, size),
            Effect::Outline(e) => e.apply(base, src, size),
            Effect::Shadow(e) => e.apply(base, src, size),
            Effect::InnerShadow(e) => e.apply(dst, src, size),
            Effect::Glow(e) => e.apply(base, src, size),
            Effect::InnerGlow(e) => e.apply(dst, src, size),
            Effect::Gradient(e) => e.apply(dst, src, size),
        }
    }
}

macro_rules! impl_from_effect {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Effect {
                fn from(effect: $variant) -> Self {
                    Effect::$variant(effect)
                }
            }
        )*
    };
}

impl_from_effect!(ColorOverlay, Blur, Outline, Shadow, InnerShadow, Glow, InnerGlow, Gradient);

/// Construction-time bound on blur radii.
pub(crate) fn check_effect_size(effect: &str, size: u32) -> LayerFxResult<u32> {
    if size > MAX_EFFECT_SIZE {
        tracing::warn!(effect, size, "effect size out of range");
        return Err(LayerFxError::invalid_parameter(format!(
            "{effect} size {size} exceeds the maximum of {MAX_EFFECT_SIZE}"
        )));
    }
    Ok(size)
}

fn check_blur_fits(effect: &str, radius: u32, image: Size) -> LayerFxResult<()> {
    if has_interior(image, radius) {
        return Ok(());
    }
    tracing::warn!(effect, radius, %image, "blur radius leaves no interior pixels");
    Err(LayerFxError::invalid_parameter(format!(
        "{effect} size {radius} is too large for a {image} image"
    )))
}

fn check_offset_fits(effect: &str, offset: Offset, image: Size) -> LayerFxResult<()> {
    let fits = (offset.x.unsigned_abs()) < image.width && (offset.y.unsigned_abs()) < image.height;
    if fits {
        return Ok(());
    }
    tracing::warn!(effect, x = offset.x, y = offset.y, %image, "offset moves the effect off the image");
    Err(LayerFxError::invalid_parameter(format!(
        "{effect} offset ({}, {}) is outside a {image} image",
        offset.x, offset.y
    )))
}

/// Pairs of `(target, sample)` pixel indices for a field shifted by `offset`.
///
/// `target` is where the shifted value lands, `sample` where it is read from.
/// Targets whose sample would fall outside the image are skipped.
pub(crate) fn shifted_pairs(size: Size, offset: Offset) -> impl Iterator<Item = (usize, usize)> {
    let (w, h) = (size.width as i64, size.height as i64);
    let (ox, oy) = (offset.x as i64, offset.y as i64);
    let xs = ox.max(0)..(w + ox.min(0));
    let ys = oy.max(0)..(h + oy.min(0));

    ys.flat_map(move |y| {
        xs.clone().map(move |x| {
            let target = y * w + x;
            let sample = (y - oy) * w + (x - ox);
            (target as usize, sample as usize)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::blend::BlendMode;

    #[test]
    fn test_shifted_pairs_positive_offset() {
        let pairs: Vec<_> = shifted_pairs(Size::new(3, 2), Offset::new(1, 1)).collect();
        // Only (1,1) and (2,1) receive samples, from (0,0) and (1,0).
        assert_eq!(pairs, vec![(4, 0), (5, 1)]);
    }

    #[test]
    fn test_shifted_pairs_negative_offset() {
        let pairs: Vec<_> = shifted_pairs(Size::new(3, 2), Offset::new(-2, 0)).collect();
        assert_eq!(pairs, vec![(0, 2), (3, 5)]);
    }

    #[test]
    fn test_shifted_pairs_zero_offset_is_identity() {
        let pairs: Vec<_> = shifted_pairs(Size::new(2, 2), Offset::default()).collect();
        assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_validate_rejects_oversized_blur() {
        let effect = Effect::from(Blur::new(3).unwrap());
        assert!(effect.validate_for(Size::new(7, 7)).is_ok());
        assert!(matches!(
            effect.validate_for(Size::new(6, 7)),
            Err(LayerFxError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_validate_rejects_offset_outside_image() {
        let shadow = Shadow::new(Color::BLACK, Offset::new(-8, 0), 1, BlendMode::Multiply).unwrap();
        let effect = Effect::from(shadow);
        assert!(effect.validate_for(Size::new(9, 9)).is_ok());
        assert!(effect.validate_for(Size::new(8, 9)).is_err());
    }

    #[test]
    fn test_overlays_fit_any_size() {
        let effect = Effect::from(ColorOverlay::default());
        assert!(effect.validate_for(Size::new(1, 1)).is_ok());
        assert_eq!(effect.name(), "color_overlay");
    }

    #[test]
    fn test_construction_rejects_absurd_size() {
        assert!(check_effect_size("blur", MAX_EFFECT_SIZE).is_ok());
        assert!(Blur::new(MAX_EFFECT_SIZE + 1).is_err());
    }
}
