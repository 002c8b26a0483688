use crate::error::{GeometryError, Result};
use crate::math::{Vector3, TOLERANCE};

use super::PathFunction;

/// A full circle in 3D space, traced once per `2*pi` of parameter.
///
/// `P(t) = center + radius * cos(t) * ref_dir + radius * sin(t) * binormal`
/// where `binormal = normal x ref_dir`.
#[derive(Debug, Clone)]
pub struct CirclePath {
    center: Vector3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
}

impl CirclePath {
    /// Creates a new circle path.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the circle
    /// * `radius` - Radius (must be positive)
    /// * `normal` - Normal vector defining the circle plane
    /// * `ref_dir` - Direction of the start point `t = 0` (must be perpendicular to normal)
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, either direction is
    /// zero-length, or the reference direction is not perpendicular to the normal.
    pub fn new(center: Vector3, radius: f64, normal: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("circle radius must be positive".into()).into());
        }

        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / normal_len;

        let ref_len = ref_dir.norm();
        if ref_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let ref_dir = ref_dir / ref_len;

        if normal.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
        })
    }

    /// A circle in the ground plane around the origin: `(r cos t, 0, r sin t)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn horizontal(radius: f64) -> Result<Self> {
        Self::new(Vector3::zeros(), radius, -Vector3::y(), Vector3::x())
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> &Vector3 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the unit normal of the circle plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }
}

impl PathFunction for CirclePath {
    fn evaluate(&self, t: f64) -> Result<Vector3> {
        let x = self.radius * t.cos();
        let y = self.radius * t.sin();
        Ok(self.center + self.ref_dir * x + self.binormal() * y)
    }
}
