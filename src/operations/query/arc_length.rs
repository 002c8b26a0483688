use tracing::debug;

use crate::error::Result;
use crate::geometry::path::PathFunction;
use crate::kinematics::CurveKinematicsEngine;
use crate::math::quadrature::{integrate_scalar, QuadratureBounds};

/// Computes the arc length of a path over a parameter range.
pub struct ArcLength {
    range: Option<(f64, f64)>,
}

impl ArcLength {
    /// Arc length over the engine's full sampling bounds.
    #[must_use]
    pub fn full() -> Self {
        Self { range: None }
    }

    /// Signed arc length from `start` to `end`; negative when `end < start`.
    #[must_use]
    pub fn between(start: f64, end: f64) -> Self {
        Self {
            range: Some((start, end)),
        }
    }

    /// Executes the query, integrating `derivative_magnitude` at the engine's increment.
    ///
    /// # Errors
    ///
    /// Returns an error if a bound is not finite or the path fails to evaluate.
    pub fn execute<P: PathFunction>(&self, engine: &CurveKinematicsEngine<P>) -> Result<f64> {
        let Some((start, end)) = self.range else {
            return engine.arc_length();
        };
        let bounds = QuadratureBounds::new(start, engine.bounds().increment(), end)?;
        let length = integrate_scalar(|t| engine.derivative_magnitude(t), &bounds)?;
        debug!(start, end, length, "computed partial arc length");
        Ok(length)
    }
}
