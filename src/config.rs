//! Configuration knobs for the compositor and effect limits.
//!
//! Effect parameter defaults live on each effect's `Default` impl; this
//! module holds the values that bound them.

/// Default number of slots shared by effects and layers.
pub const DEFAULT_POOL_CAPACITY: usize = 1000;

/// Largest blur/outline/shadow/glow `size` accepted at construction.
pub const MAX_EFFECT_SIZE: u32 = 1024;

/// Settings for a [`Compositor`](crate::compositor::Compositor).
///
/// # Example
///
/// ```
/// use layerfx::config::CompositorConfig;
///
/// let config = CompositorConfig::default().with_pool_capacity(64);
/// assert_eq!(config.pool_capacity, 64);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositorConfig {
    /// Total number of effects and layers that may be alive at once.
    pub pool_capacity: usize,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl CompositorConfig {
    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }
}
