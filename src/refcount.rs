//! Shared-ownership counter for pooled effects and layers.

use std::ops::{Deref, DerefMut};

use crate::error::{LayerFxError, LayerFxResult};

/// A value with an explicit reference count, starting at 1.
///
/// The count is bookkeeping only: the owner of the storage (the compositor's
/// pool) frees the value when [`release`](Self::release) reports zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefCounted<T> {
    value: T,
    count: u32,
}

impl<T> RefCounted<T> {
    pub fn new(value: T) -> Self {
        Self { value, count: 1 }
    }

    pub fn retain(&mut self) {
        self.count += 1;
    }

    /// Drop one reference. Returns `true` when the last one is gone.
    pub fn release(&mut self) -> LayerFxResult<bool> {
        if self.count == 0 {
            tracing::warn!("release on a zero reference count");
            return Err(LayerFxError::RefCountUnderflow);
        }
        self.count -= 1;
        Ok(self.count == 0)
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for RefCounted<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for RefCounted<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}
