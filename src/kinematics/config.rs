use crate::math::TOLERANCE;

/// Tunables for a [`super::CurveKinematicsEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Distance of the chase camera behind the cart, along the reverse tangent.
    pub camera_offset: f64,
    /// Approximate speeds `|d| / increment` below this are treated as degenerate.
    pub degenerate_epsilon: f64,
    /// Whether path positions are cached per engine instance.
    pub memoize: bool,
    /// Maximum number of cached positions before the cache is flushed.
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            camera_offset: 5.0,
            degenerate_epsilon: TOLERANCE,
            memoize: false,
            cache_capacity: 4096,
        }
    }
}

impl EngineConfig {
    /// Sets the chase-camera distance.
    #[must_use]
    pub fn with_camera_offset(mut self, camera_offset: f64) -> Self {
        self.camera_offset = camera_offset;
        self
    }

    /// Sets the speed below which the tangent is undefined.
    #[must_use]
    pub fn with_degenerate_epsilon(mut self, degenerate_epsilon: f64) -> Self {
        self.degenerate_epsilon = degenerate_epsilon;
        self
    }

    /// Enables the position cache with the given capacity.
    #[must_use]
    pub fn with_memoization(mut self, cache_capacity: usize) -> Self {
        self.memoize = true;
        self.cache_capacity = cache_capacity;
        self
    }
}
