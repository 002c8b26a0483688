mod circle;
mod integrated;
mod line;
mod piecewise;

pub use circle::CirclePath;
pub use integrated::IntegratedPath;
pub use line::LinePath;
pub use piecewise::{PiecewisePath, Segment};

use crate::error::Result;
use crate::math::Vector3;

/// A curve given as a map from a scalar parameter `t` to a 3D position.
///
/// Any `Fn(f64) -> Vector3` closure is a path function. Wrap closures that can
/// fail in [`TryPath`].
pub trait PathFunction {
    /// Evaluates the position at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is outside the path's own valid domain.
    fn evaluate(&self, t: f64) -> Result<Vector3>;
}

impl<F> PathFunction for F
where
    F: Fn(f64) -> Vector3,
{
    fn evaluate(&self, t: f64) -> Result<Vector3> {
        Ok(self(t))
    }
}

/// Adapts a fallible closure into a [`PathFunction`].
#[derive(Debug, Clone, Copy)]
pub struct TryPath<F>(pub F);

impl<F> PathFunction for TryPath<F>
where
    F: Fn(f64) -> Result<Vector3>,
{
    fn evaluate(&self, t: f64) -> Result<Vector3> {
        (self.0)(t)
    }
}
