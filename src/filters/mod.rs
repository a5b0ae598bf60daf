//! Pixel primitives the layer effects are built from.
//!
//! ## Pixel Format
//!
//! | Format | Layout | Type | Description |
//! |--------|--------|------|-------------|
//! | RGBA8 | flat `[Color]`, row-major | u8 | straight alpha, 0-255 |
//!
//! ## Architecture
//!
//! - **Integer only** - every channel operation uses truncating integer
//!   division; no float approximations
//! - **In place** - primitives write into caller-provided buffers
//! - **Single threaded** - every call runs to completion on the caller's thread
//!
//! ## Modules
//!
//! - **core**: `lerp`, `lerp_percentile`, angle wrapping, fixed-point trig
//! - **blend**: blend modes and the per-pixel `blend` function
//! - **blur**: separable box blur shared by the shadow and glow effects

pub mod blend;
pub mod blur;
pub mod core;
