use crate::error::{GeometryError, Result};
use crate::geometry::path::PathFunction;
use crate::kinematics::CurveKinematicsEngine;
use crate::math::Vector3;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Vector3,
    /// Maximum corner of the bounding box.
    pub max: Vector3,
}

impl Aabb {
    /// Center of the box, e.g. for aiming an overview camera at the track.
    #[must_use]
    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    fn include(&mut self, point: &Vector3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }
}

/// Computes the axis-aligned bounding box of one period of sampled path positions.
#[derive(Debug, Default)]
pub struct BoundingBox;

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns an error if the path fails to evaluate.
    pub fn execute<P: PathFunction>(&self, engine: &CurveKinematicsEngine<P>) -> Result<Aabb> {
        let mut samples = engine.bounds().sample_points();
        let first = samples
            .next()
            .ok_or_else(|| GeometryError::Degenerate("path has no sample points".into()))?;
        let origin = engine.position(first)?;
        let mut aabb = Aabb {
            min: origin,
            max: origin,
        };
        for t in samples {
            aabb.include(&engine.position(t)?);
        }
        Ok(aabb)
    }
}
