//! Conversions between pixel containers.
//!
//! - flat RGBA bytes, `width * height * 4` long, row-major
//! - `ndarray` images shaped `(height, width, 4)`
//! - flat `[Color]` buffers used by layers and effects

use ndarray::{Array3, ArrayView3};

use crate::color::{Color, Size};
use crate::error::{LayerFxError, LayerFxResult};
use crate::layer::check_buffer;

/// Reinterpret flat RGBA bytes as pixels.
pub fn pixels_from_bytes(bytes: &[u8], size: Size) -> LayerFxResult<Vec<Color>> {
    let expected = size.pixel_count() * 4;
    if bytes.len() != expected {
        return Err(LayerFxError::BufferSize {
            expected,
            found: bytes.len(),
        });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| Color::new(c[0], c[1], c[2], c[3]))
        .collect())
}

pub fn pixels_to_bytes(pixels: &[Color]) -> Vec<u8> {
    pixels.iter().flat_map(|c| c.to_array()).collect()
}

/// Read an `(H, W, 4)` image. Any memory layout is accepted.
pub fn pixels_from_array(image: ArrayView3<u8>) -> LayerFxResult<(Vec<Color>, Size)> {
    let (height, width, channels) = image.dim();
    if channels != 4 {
        return Err(LayerFxError::invalid_parameter(format!(
            "expected 4 channels (RGBA), got {channels}"
        )));
    }
    let size = Size::new(dimension(width)?, dimension(height)?);

    let mut pixels = Vec::with_capacity(size.pixel_count());
    for row in image.outer_iter() {
        for px in row.outer_iter() {
            pixels.push(Color::new(px[0], px[1], px[2], px[3]));
        }
    }
    Ok((pixels, size))
}

/// Write pixels out as an `(H, W, 4)` image.
pub fn pixels_to_array(pixels: &[Color], size: Size) -> LayerFxResult<Array3<u8>> {
    check_buffer(pixels, size)?;
    let shape = (size.height as usize, size.width as usize, 4);
    Array3::from_shape_vec(shape, pixels_to_bytes(pixels))
        .map_err(|e| LayerFxError::invalid_parameter(e.to_string()))
}

fn dimension(n: usize) -> LayerFxResult<u32> {
    u32::try_from(n).map_err(|_| LayerFxError::invalid_parameter(format!("dimension {n} too large")))
}
