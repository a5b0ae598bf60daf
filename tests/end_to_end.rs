//! End-to-end compositing through the public API.

use layerfx::buffer::{pixels_from_bytes, pixels_to_bytes};
use layerfx::filters::core::lerp_percentile;
use layerfx::{
    blend, BlendMode, Color, Compositor, CompositorConfig, GradientKey, LayerFxError, Offset, Size,
};

const RED: Color = Color::new(255, 0, 0, 255);
const GREEN: Color = Color::new(0, 255, 0, 255);
const BLUE: Color = Color::new(0, 0, 255, 255);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Opaque white square of `side` pixels at `(x0, y0)` on a transparent image.
fn square(size: Size, x0: u32, y0: u32, side: u32) -> Vec<Color> {
    let mut px = vec![Color::TRANSPARENT; size.pixel_count()];
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            px[(y * size.width + x) as usize] = Color::WHITE;
        }
    }
    px
}

#[test]
fn green_overlay_over_red_layer_from_bytes() {
    init_tracing();
    let size = Size::new(4, 4);
    let bytes: Vec<u8> = RED.to_array().repeat(16);
    let src = pixels_from_bytes(&bytes, size).unwrap();

    let mut comp = Compositor::new().unwrap();
    let overlay = comp.color_overlay(GREEN, BlendMode::Normal).unwrap();
    let layer = comp.create_layer(&src, size, &[overlay], BlendMode::Normal).unwrap();

    let mut dst = vec![Color::TRANSPARENT; 16];
    comp.bake(&mut dst, &[layer]).unwrap();
    assert_eq!(pixels_to_bytes(&dst), GREEN.to_array().repeat(16));
}

#[test]
fn opaque_top_layer_occludes() {
    init_tracing();
    let size = Size::new(2, 2);
    let mut comp = Compositor::new().unwrap();
    let blue = comp.create_layer(&[BLUE; 4], size, &[], BlendMode::Normal).unwrap();
    let red = comp.create_layer(&[RED; 4], size, &[], BlendMode::Normal).unwrap();

    let mut dst = vec![Color::TRANSPARENT; 4];
    comp.bake(&mut dst, &[blue, red]).unwrap();
    assert_eq!(dst, vec![RED; 4]);
}

#[test]
fn gradient_rows_follow_percentile_ramp() {
    init_tracing();
    let a = Color::new(10, 20, 30, 255);
    let b = Color::new(250, 200, 100, 255);
    let size = Size::new(5, 10);

    let mut comp = Compositor::new().unwrap();
    let keys = vec![GradientKey::new(a, 0), GradientKey::new(b, 100)];
    let gradient = comp.gradient(keys, 0, BlendMode::Normal).unwrap();
    let layer = comp
        .create_layer(&vec![Color::WHITE; size.pixel_count()], size, &[gradient], BlendMode::Normal)
        .unwrap();

    let mut dst = vec![Color::TRANSPARENT; size.pixel_count()];
    comp.bake(&mut dst, &[layer]).unwrap();

    for y in 0..size.height {
        let ramp = lerp_percentile(a, b, y * 10_000 / size.height);
        // The ramp lands on a white layer, which then lands on transparency.
        let layer_px = blend(Color::WHITE, ramp, BlendMode::Normal);
        let expected = blend(Color::TRANSPARENT, layer_px, BlendMode::Normal);
        for x in 0..size.width {
            assert_eq!(dst[(y * size.width + x) as usize], expected, "row {y}");
        }
    }
}

#[test]
fn drop_shadow_is_visible_beside_the_shape() {
    init_tracing();
    let size = Size::new(16, 16);
    let src = square(size, 4, 4, 6);

    let mut comp = Compositor::new().unwrap();
    let shadow = comp
        .shadow(Color::BLACK, Offset::new(3, 3), 1, BlendMode::Normal)
        .unwrap();
    let layer = comp.create_layer(&src, size, &[shadow], BlendMode::Normal).unwrap();

    let backdrop = Color::new(200, 200, 200, 255);
    let mut dst = vec![backdrop; size.pixel_count()];
    comp.bake(&mut dst, &[layer]).unwrap();

    let at = |x: u32, y: u32| dst[(y * size.width + x) as usize];
    // Inside the shape the layer covers the shadow.
    assert_eq!(at(5, 5), Color::WHITE);
    // Below and right of the shape the shadow darkens the backdrop.
    assert!(at(11, 11).r < backdrop.r);
    // Above and left of the shape the backdrop is untouched.
    assert_eq!(at(1, 1), backdrop);
}

#[test]
fn full_effect_stack_bakes() {
    init_tracing();
    let size = Size::new(24, 24);
    let src = square(size, 8, 8, 8);

    let mut comp = Compositor::new().unwrap();
    let effects = [
        comp.shadow(Color::BLACK, Offset::new(2, 2), 2, BlendMode::Multiply).unwrap(),
        comp.glow(Color::new(255, 255, 190, 150), 3, BlendMode::Screen).unwrap(),
        comp.outline(Color::new(0, 0, 0, 245), 2, BlendMode::Normal).unwrap(),
        comp.inner_shadow(Color::new(0, 0, 0, 245), Offset::new(3, 3), 3, BlendMode::Multiply).unwrap(),
        comp.inner_glow(Color::new(255, 255, 190, 150), 2, BlendMode::Screen).unwrap(),
        comp.color_overlay(Color::new(30, 60, 200, 255), BlendMode::Multiply).unwrap(),
        comp.gradient(
            vec![GradientKey::new(RED, 0), GradientKey::new(BLUE, 100)],
            45,
            BlendMode::Overlay,
        )
        .unwrap(),
        comp.blur(1).unwrap(),
    ];
    let layer = comp.create_layer(&src, size, &effects, BlendMode::Normal).unwrap();
    assert_eq!(comp.live_objects(), effects.len() + 1);

    let mut dst = vec![Color::TRANSPARENT; size.pixel_count()];
    comp.bake(&mut dst, &[layer]).unwrap();
    // Corners are far from every effect; Screen may tint them but they stay clear.
    assert_eq!(dst[0].a, 0);
    // The centre of the shape stays opaque.
    assert_eq!(dst[(12 * 24 + 12) as usize].a, 255);

    for effect in effects {
        comp.release_effect(effect).unwrap();
    }
    assert_eq!(comp.live_objects(), 9);
    comp.release_layer(layer).unwrap();
    assert_eq!(comp.live_objects(), 0);
}

#[test]
fn effect_too_large_for_image_is_rejected() {
    init_tracing();
    let size = Size::new(6, 6);
    let mut comp = Compositor::new().unwrap();
    let glow = comp.glow(Color::WHITE, 3, BlendMode::Screen).unwrap();
    let layer = comp.create_layer(&[RED; 36], size, &[glow], BlendMode::Normal).unwrap();

    let mut dst = vec![Color::TRANSPARENT; 36];
    let err = comp.bake(&mut dst, &[layer]).unwrap_err();
    assert!(matches!(err, LayerFxError::InvalidParameter(_)));
}

#[test]
fn capacity_is_enforced_across_effects_and_layers() {
    init_tracing();
    let config = CompositorConfig::default().with_pool_capacity(3);
    let mut comp = Compositor::with_config(config).unwrap();
    let blur = comp.blur(0).unwrap();
    let l1 = comp.create_layer(&[RED], Size::new(1, 1), &[blur], BlendMode::Normal).unwrap();
    let _l2 = comp.create_layer(&[RED], Size::new(1, 1), &[], BlendMode::Normal).unwrap();

    assert_eq!(
        comp.create_layer(&[RED], Size::new(1, 1), &[], BlendMode::Normal),
        Err(LayerFxError::CapacityExhausted { capacity: 3 })
    );

    comp.release_layer(l1).unwrap();
    assert!(comp.create_layer(&[RED], Size::new(1, 1), &[], BlendMode::Normal).is_ok());
}

#[test]
fn helpers_match_compositor() {
    init_tracing();
    let size = Size::new(8, 8);
    let src = square(size, 2, 2, 4);
    let effect = layerfx::layer_effects::Glow::new(Color::new(255, 200, 0, 200), 1, BlendMode::Screen).unwrap();

    let mut via_helper = vec![Color::BLACK; size.pixel_count()];
    layerfx::apply_effects_into(&mut via_helper, &src, size, &[effect.into()]).unwrap();

    let mut comp = Compositor::new().unwrap();
    let glow = comp.add_effect_object(effect.into()).unwrap();
    let layer = comp.create_layer(&src, size, &[glow], BlendMode::Normal).unwrap();
    let mut via_compositor = vec![Color::BLACK; size.pixel_count()];
    comp.bake(&mut via_compositor, &[layer]).unwrap();

    assert_eq!(via_helper, via_compositor);
}
