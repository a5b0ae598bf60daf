//! Blur layer effect: box blur of the whole layer, all four channels.

use crate::color::{Color, Size};
use crate::error::LayerFxResult;
use crate::filters::blur::box_blur;

use super::check_effect_size;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blur {
    size: u32,
}

impl Blur {
    /// `size` is the blur radius: 0 leaves the layer as is, 5 averages a
    /// 11x11 window centred on each pixel.
    pub fn new(size: u32) -> LayerFxResult<Self> {
        Ok(Self {
            size: check_effect_size("blur", size)?,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub(crate) fn apply(&self, dst: &mut [Color], src: &[Color], size: Size) {
        box_blur(dst, src, size, self.size);
    }
}
