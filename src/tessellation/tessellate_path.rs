use crate::error::Result;
use crate::geometry::path::PathFunction;
use crate::kinematics::CurveKinematicsEngine;

use super::Polyline;

/// Samples one period of a path into a polyline for drawing the track.
///
/// Vertices are taken at `begin, begin + h, ...` strictly below `final`. When
/// `closed` is set the first vertex is repeated at the end, joining the track
/// back onto itself the way the cart wraps around.
pub struct TessellatePath {
    closed: bool,
}

impl TessellatePath {
    /// Creates a new `TessellatePath` operation.
    #[must_use]
    pub fn new(closed: bool) -> Self {
        Self { closed }
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if the path fails to evaluate.
    pub fn execute<P: PathFunction>(&self, engine: &CurveKinematicsEngine<P>) -> Result<Polyline> {
        let mut points = engine
            .bounds()
            .sample_points()
            .map(|t| engine.position(t))
            .collect::<Result<Vec<_>>>()?;
        if self.closed {
            if let Some(first) = points.first().copied() {
                points.push(first);
            }
        }
        Ok(Polyline { points })
    }
}
