use crate::error::{GeometryError, Result};
use crate::math::{Vector3, TOLERANCE};

use super::PathFunction;

/// A straight track `P(t) = origin + t * speed * direction`.
///
/// Useful as a zero-curvature reference and as a connector between segments
/// of a [`super::PiecewisePath`].
#[derive(Debug, Clone)]
pub struct LinePath {
    origin: Vector3,
    velocity: Vector3,
}

impl LinePath {
    /// Creates a line through `origin` moving along `direction` at `speed` per unit of `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction is zero-length or the speed is not positive.
    pub fn new(origin: Vector3, direction: Vector3, speed: f64) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        if speed < TOLERANCE {
            return Err(GeometryError::Degenerate("line speed must be positive".into()).into());
        }
        Ok(Self {
            origin,
            velocity: direction / len * speed,
        })
    }

    /// Returns the position at `t = 0`.
    #[must_use]
    pub fn origin(&self) -> &Vector3 {
        &self.origin
    }

    /// Returns the unit direction of travel.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        self.velocity.normalize()
    }
}

impl PathFunction for LinePath {
    fn evaluate(&self, t: f64) -> Result<Vector3> {
        Ok(self.origin + self.velocity * t)
    }
}
