use crate::error::Result;
use crate::math::quadrature::{integrate_vector, QuadratureBounds};
use crate::math::Vector3;

use super::PathFunction;

/// A path defined by its velocity field.
///
/// `P(t) = origin + ∫_anchor^t velocity(s) ds`, evaluated with the
/// right-endpoint quadrature at a fixed step. For `t < anchor` the integral is
/// taken with reversed bounds and therefore negated.
#[derive(Debug, Clone)]
pub struct IntegratedPath<V> {
    velocity: V,
    origin: Vector3,
    anchor: f64,
    step: f64,
}

impl<V: PathFunction> IntegratedPath<V> {
    /// Creates a path starting at `origin` when `t == anchor`.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is not positive or `anchor` is not finite.
    pub fn new(velocity: V, origin: Vector3, anchor: f64, step: f64) -> Result<Self> {
        // Validates step and anchor up front so evaluation only fails on bad t.
        QuadratureBounds::new(anchor, step, anchor)?;
        Ok(Self {
            velocity,
            origin,
            anchor,
            step,
        })
    }

    /// Parameter at which the path equals its origin.
    #[must_use]
    pub fn anchor(&self) -> f64 {
        self.anchor
    }

    /// Integration step.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}

impl<V: PathFunction> PathFunction for IntegratedPath<V> {
    fn evaluate(&self, t: f64) -> Result<Vector3> {
        let bounds = QuadratureBounds::new(self.anchor, self.step, t)?;
        let displacement = integrate_vector(|s| self.velocity.evaluate(s), &bounds)?;
        Ok(self.origin + displacement)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn constant_velocity_is_a_line() {
        let path =
            IntegratedPath::new(|_: f64| Vector3::new(1.0, 0.0, 2.0), Vector3::zeros(), 0.0, 0.01)
                .unwrap();
        let p = path.evaluate(1.0).unwrap();
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.z, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn parabolic_track() {
        // velocity (1, t, 1) gives y ≈ t^2 / 2
        let path =
            IntegratedPath::new(|t: f64| Vector3::new(1.0, t, 1.0), Vector3::zeros(), 0.0, 0.01)
                .unwrap();
        let p = path.evaluate(2.0).unwrap();
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 0.02);
    }

    #[test]
    fn before_anchor_runs_backwards() {
        let path =
            IntegratedPath::new(|_: f64| Vector3::x(), Vector3::new(0.0, 5.0, 0.0), 0.0, 0.01)
                .unwrap();
        let p = path.evaluate(-2.0).unwrap();
        assert_abs_diff_eq!(p.x, -2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 5.0);
    }

    #[test]
    fn at_anchor_is_origin() {
        let origin = Vector3::new(1.0, 2.0, 3.0);
        let path = IntegratedPath::new(|_: f64| Vector3::x(), origin, 0.5, 0.1).unwrap();
        assert_eq!(path.evaluate(0.5).unwrap(), origin);
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(IntegratedPath::new(|_: f64| Vector3::x(), Vector3::zeros(), 0.0, 0.0).is_err());
    }
}
