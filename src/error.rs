//! Error type shared by every layer-effects operation.

use crate::color::Size;
use crate::filters::blend::BlendMode;

pub type LayerFxResult<T> = Result<T, LayerFxError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LayerFxError {
    #[error("pool capacity exhausted: all {capacity} slots are live")]
    CapacityExhausted { capacity: usize },

    #[error("pool has not been created yet")]
    PoolNotCreated,

    #[error("pool has already been created")]
    PoolAlreadyCreated,

    #[error("reference count underflow: release called on a zero count")]
    RefCountUnderflow,

    #[error("stale handle: slot {index} no longer holds the referenced object")]
    StaleHandle { index: u32 },

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: Size, found: Size },

    #[error("buffer size mismatch: expected {expected} elements, found {found}")]
    BufferSize { expected: usize, found: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unsupported blend mode: {0:?}")]
    UnsupportedBlendMode(BlendMode),
}

impl LayerFxError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

#[cfg(feature = "python")]
impl From<LayerFxError> for pyo3::PyErr {
    fn from(err: LayerFxError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(feature = "wasm")]
impl From<LayerFxError> for wasm_bindgen::JsValue {
    fn from(err: LayerFxError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
