//! Blend modes and the per-pixel blend function.
//!
//! Every implemented mode first computes an intermediate color from the
//! destination `d` and source `s`, with alpha `min(255, d.a + s.a)`, then
//! interpolates from `d` to that intermediate by `s.a`.
//!
//! | Mode | f(d, s) per channel |
//! |------|---------------------|
//! | Normal | s |
//! | Multiply | d * s / 255 |
//! | Screen | 255 - (255 - d) * (255 - s) / 255 |
//! | Darken / Lighten | min / max |
//! | Difference | \|d - s\| |
//! | Exclusion | d + s - 2ds / 255 |
//! | Subtract | max(0, d - s) |
//! | LinearBurn | max(0, d + s - 255) |
//! | Overlay / HardLight | multiply or screen, switched on d (resp. s) |
//!
//! Screen substitutes the source color into a low-alpha destination before
//! compositing, so that a transparent black base does not darken glows.

use std::str::FromStr;

use crate::color::Color;
use crate::error::{LayerFxError, LayerFxResult};

use super::core::{lerp, lerp_preserve_alpha};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    #[default]
    Normal,
    Dissolve,

    Darken,
    Multiply,
    ColorBurn,
    LinearBurn,
    DarkerColor,

    Lighten,
    Screen,
    ColorDodge,
    LinearDodge,
    LighterColor,

    Overlay,
    SoftLight,
    HardLight,
    VividLight,
    LinearLight,
    PinLight,
    HardMix,

    Difference,
    Exclusion,
    Subtract,
    Divide,

    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// Historical name for the glow/shadow compositing mode. It composites
    /// like [`Screen`](BlendMode::Screen), not like the declared but
    /// unimplemented [`LinearDodge`](BlendMode::LinearDodge).
    pub const ADDITIVE: BlendMode = BlendMode::Screen;

    /// Whether [`blend`] implements this mode.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            BlendMode::Normal
                | BlendMode::Multiply
                | BlendMode::Screen
                | BlendMode::Darken
                | BlendMode::Lighten
                | BlendMode::Difference
                | BlendMode::Exclusion
                | BlendMode::Subtract
                | BlendMode::LinearBurn
                | BlendMode::Overlay
                | BlendMode::HardLight
        )
    }

    /// Reject modes that [`blend`] would treat as a no-op.
    pub fn ensure_supported(self) -> LayerFxResult<Self> {
        if self.is_supported() {
            Ok(self)
        } else {
            tracing::warn!(mode = ?self, "rejecting unimplemented blend mode");
            Err(LayerFxError::UnsupportedBlendMode(self))
        }
    }
}

impl FromStr for BlendMode {
    type Err = LayerFxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s.to_ascii_lowercase().as_str() {
            "normal" => BlendMode::Normal,
            "dissolve" => BlendMode::Dissolve,
            "darken" => BlendMode::Darken,
            "multiply" => BlendMode::Multiply,
            "color_burn" => BlendMode::ColorBurn,
            "linear_burn" => BlendMode::LinearBurn,
            "darker_color" => BlendMode::DarkerColor,
            "lighten" => BlendMode::Lighten,
            "screen" | "additive" => BlendMode::Screen,
            "color_dodge" => BlendMode::ColorDodge,
            "linear_dodge" => BlendMode::LinearDodge,
            "lighter_color" => BlendMode::LighterColor,
            "overlay" => BlendMode::Overlay,
            "soft_light" => BlendMode::SoftLight,
            "hard_light" => BlendMode::HardLight,
            "vivid_light" => BlendMode::VividLight,
            "linear_light" => BlendMode::LinearLight,
            "pin_light" => BlendMode::PinLight,
            "hard_mix" => BlendMode::HardMix,
            "difference" => BlendMode::Difference,
            "exclusion" => BlendMode::Exclusion,
            "subtract" => BlendMode::Subtract,
            "divide" => BlendMode::Divide,
            "hue" => BlendMode::Hue,
            "saturation" => BlendMode::Saturation,
            "color" => BlendMode::Color,
            "luminosity" => BlendMode::Luminosity,
            other => {
                return Err(LayerFxError::invalid_parameter(format!(
                    "unknown blend mode '{other}'"
                )))
            }
        };
        Ok(mode)
    }
}

#[inline]
fn per_channel(d: Color, s: Color, f: impl Fn(u32, u32) -> u32) -> Color {
    let ch = |x: u8, y: u8| f(x as u32, y as u32).min(255) as u8;
    Color::new(
        ch(d.r, s.r),
        ch(d.g, s.g),
        ch(d.b, s.b),
        (d.a as u32 + s.a as u32).min(255) as u8,
    )
}

#[inline]
fn overlay_channel(base: u32, top: u32) -> u32 {
    if base < 128 {
        2 * base * top / 255
    } else {
        255 - 2 * (255 - base) * (255 - top) / 255
    }
}

/// Composite `src` over `dst` under `mode`.
///
/// Unsupported modes leave `dst` unchanged; callers validate modes up front
/// with [`BlendMode::ensure_supported`].
#[inline]
pub fn blend(dst: Color, src: Color, mode: BlendMode) -> Color {
    let (base, target) = match mode {
        BlendMode::Normal => (dst, per_channel(dst, src, |_, s| s)),
        BlendMode::Multiply => (dst, per_channel(dst, src, |d, s| d * s / 255)),
        BlendMode::Screen => {
            // A near-transparent base takes the source color first.
            let base = lerp_preserve_alpha(src, dst, dst.a);
            let target = per_channel(dst, src, |d, s| 255 - (255 - d) * (255 - s) / 255);
            (base, target)
        }
        BlendMode::Darken => (dst, per_channel(dst, src, |d, s| d.min(s))),
        BlendMode::Lighten => (dst, per_channel(dst, src, |d, s| d.max(s))),
        BlendMode::Difference => (dst, per_channel(dst, src, |d, s| d.abs_diff(s))),
        BlendMode::Exclusion => (dst, per_channel(dst, src, |d, s| d + s - 2 * d * s / 255)),
        BlendMode::Subtract => (dst, per_channel(dst, src, |d, s| d.saturating_sub(s))),
        BlendMode::LinearBurn => (dst, per_channel(dst, src, |d, s| (d + s).saturating_sub(255))),
        BlendMode::Overlay => (dst, per_channel(dst, src, overlay_channel)),
        BlendMode::HardLight => (dst, per_channel(dst, src, |d, s| overlay_channel(s, d))),
        _ => return dst,
    };
    lerp(base, target, src.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [BlendMode; 3] = [BlendMode::Normal, BlendMode::Multiply, BlendMode::Screen];

    // ========================================================================
    // Identity Tests
    // ========================================================================

    #[test]
    fn test_normal_transparent_src_is_identity() {
        let dst = Color::new(12, 200, 99, 180);
        for src in [Color::new(255, 0, 0, 0), Color::new(0, 0, 0, 0), Color::new(77, 1, 250, 0)] {
            assert_eq!(blend(dst, src, BlendMode::Normal), dst);
        }
    }

    #[test]
    fn test_normal_opaque_src_replaces() {
        let dst = Color::new(12, 200, 99, 180);
        let src = Color::new(1, 2, 3, 255);
        assert_eq!(blend(dst, src, BlendMode::Normal), src);
    }

    #[test]
    fn test_multiply_transparent_src_is_identity() {
        let dst = Color::new(120, 40, 250, 255);
        assert_eq!(blend(dst, Color::new(0, 0, 0, 0), BlendMode::Multiply), dst);
    }

    // ========================================================================
    // Arithmetic Tests
    // ========================================================================

    #[test]
    fn test_multiply_opaque() {
        let dst = Color::new(200, 100, 255, 255);
        let src = Color::new(128, 255, 0, 255);
        // 200 * 128 / 255 = 100, 100 * 255 / 255 = 100, 255 * 0 / 255 = 0
        assert_eq!(blend(dst, src, BlendMode::Multiply), Color::new(100, 100, 0, 255));
    }

    #[test]
    fn test_screen_opaque() {
        let dst = Color::new(100, 0, 255, 255);
        let src = Color::new(100, 0, 0, 255);
        // 255 - 155 * 155 / 255 = 255 - 94 = 161
        assert_eq!(blend(dst, src, BlendMode::Screen), Color::new(161, 0, 255, 255));
    }

    #[test]
    fn test_screen_over_transparent_base_takes_src_color() {
        // Transparent black base: substitution keeps the glow from darkening.
        let dst = Color::new(0, 0, 0, 0);
        let src = Color::new(255, 255, 190, 128);
        let out = blend(dst, src, BlendMode::Screen);
        // base = (255, 255, 190, 128); target = (255, 255, 190, 128)
        assert_eq!(out.r, 255);
        assert_eq!(out.g, 255);
        assert_eq!(out.b, 189);
        // 128 * 127 / 255 + 128 * 128 / 255 = 63 + 64
        assert_eq!(out.a, 127);
    }

    #[test]
    fn test_normal_half_alpha_mix() {
        let dst = Color::new(0, 0, 0, 255);
        let src = Color::new(255, 255, 255, 128);
        let out = blend(dst, src, BlendMode::Normal);
        // alpha: 255 * 127 / 255 + 255 * 128 / 255 = 255
        assert_eq!(out, Color::new(128, 128, 128, 255));
    }

    #[test]
    fn test_extended_modes_opaque() {
        let d = Color::new(200, 50, 128, 255);
        let s = Color::new(100, 100, 255, 255);
        assert_eq!(blend(d, s, BlendMode::Darken), Color::new(100, 50, 128, 255));
        assert_eq!(blend(d, s, BlendMode::Lighten), Color::new(200, 100, 255, 255));
        assert_eq!(blend(d, s, BlendMode::Difference), Color::new(100, 50, 127, 255));
        assert_eq!(blend(d, s, BlendMode::Subtract), Color::new(100, 0, 0, 255));
        assert_eq!(blend(d, s, BlendMode::LinearBurn), Color::new(45, 0, 128, 255));
    }

    #[test]
    fn test_results_stay_in_range_for_all_supported_modes() {
        let samples = [0u8, 1, 127, 128, 254, 255];
        let modes = [
            BlendMode::Normal,
            BlendMode::Multiply,
            BlendMode::Screen,
            BlendMode::Darken,
            BlendMode::Lighten,
            BlendMode::Difference,
            BlendMode::Exclusion,
            BlendMode::Subtract,
            BlendMode::LinearBurn,
            BlendMode::Overlay,
            BlendMode::HardLight,
        ];
        for mode in modes {
            for &d in &samples {
                for &s in &samples {
                    for &a in &samples {
                        // Must not panic on overflow in debug builds.
                        let _ = blend(Color::new(d, s, d, a), Color::new(s, d, s, a), mode);
                    }
                }
            }
        }
    }

    // ========================================================================
    // Mode Table Tests
    // ========================================================================

    #[test]
    fn test_unsupported_mode_is_noop_and_rejected() {
        let dst = Color::new(1, 2, 3, 4);
        assert_eq!(blend(dst, Color::WHITE, BlendMode::Hue), dst);
        assert_eq!(
            BlendMode::Hue.ensure_supported(),
            Err(LayerFxError::UnsupportedBlendMode(BlendMode::Hue))
        );
        for mode in MODES {
            assert!(mode.ensure_supported().is_ok());
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("normal".parse::<BlendMode>().unwrap(), BlendMode::Normal);
        assert_eq!("Multiply".parse::<BlendMode>().unwrap(), BlendMode::Multiply);
        assert_eq!("additive".parse::<BlendMode>().unwrap(), BlendMode::ADDITIVE);
        assert_eq!("linear_burn".parse::<BlendMode>().unwrap(), BlendMode::LinearBurn);
        assert!("sparkle".parse::<BlendMode>().is_err());
    }

    #[test]
    fn test_linear_dodge_is_declared_but_unsupported() {
        assert_eq!("linear_dodge".parse::<BlendMode>().unwrap(), BlendMode::LinearDodge);
        assert!(!BlendMode::LinearDodge.is_supported());
        assert_ne!(BlendMode::ADDITIVE, BlendMode::LinearDodge);
    }
}
