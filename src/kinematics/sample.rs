use crate::math::Vector3;

/// Euler angles that turn a cart to face along the track.
///
/// Assumes a right-handed, Y-up frame: `yaw` rotates about Y and follows the
/// tangent's horizontal heading, `pitch` rotates about Z and follows its
/// vertical component. `roll` is always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub roll: f64,
    pub yaw: f64,
    pub pitch: f64,
}

impl Orientation {
    /// Computes `(0, -atan2(z, x), -acos(y))` for a unit tangent `(x, y, z)`.
    #[must_use]
    pub fn from_unit_tangent(tangent: &Vector3) -> Self {
        Self {
            roll: 0.0,
            yaw: -tangent.z.atan2(tangent.x),
            pitch: -tangent.y.clamp(-1.0, 1.0).acos(),
        }
    }

    /// The angles as an `(x, y, z)` rotation vector, as renderers expect.
    #[must_use]
    pub fn to_vector(&self) -> Vector3 {
        Vector3::new(self.roll, self.yaw, self.pitch)
    }
}

/// Every kinematic quantity of the path at one parameter value.
///
/// Computed on demand by [`super::CurveKinematicsEngine::sample`]; the engine
/// never stores samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicSample {
    pub t: f64,
    pub position: Vector3,
    pub next_position: Vector3,
    /// `position(value_after(t)) - position(t)`, roughly velocity times increment.
    pub scaled_differential: Vector3,
    pub unit_tangent: Vector3,
    pub orientation: Orientation,
    pub next_scaled_differential: Vector3,
    /// Roughly acceleration times increment squared.
    pub scaled_second_differential: Vector3,
    pub curvature: f64,
    pub camera_position: Vector3,
}
