use tracing::debug;

use crate::error::Result;
use crate::geometry::path::PathFunction;
use crate::kinematics::CurveKinematicsEngine;
use crate::math::Vector3;

/// The sharpest point of a path found so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvaturePeak {
    pub t: f64,
    pub point: Vector3,
    pub curvature: f64,
}

impl CurvaturePeak {
    /// Keeps whichever of `self` and the candidate is sharper; ties keep `self`.
    #[must_use]
    pub fn max(self, candidate: Self) -> Self {
        if candidate.curvature > self.curvature {
            candidate
        } else {
            self
        }
    }
}

/// Scans one period of a path for its maximum curvature.
#[derive(Debug, Default)]
pub struct MaxCurvature;

impl MaxCurvature {
    /// Creates a scan over every sample of the bounds.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query over every sample point of the engine's bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if any sample is degenerate or fails to evaluate.
    pub fn execute<P: PathFunction>(
        &self,
        engine: &CurveKinematicsEngine<P>,
    ) -> Result<Option<CurvaturePeak>> {
        let mut peak: Option<CurvaturePeak> = None;
        for t in engine.bounds().sample_points() {
            let candidate = CurvaturePeak {
                t,
                point: engine.position(t)?,
                curvature: engine.curvature(t)?,
            };
            peak = Some(match peak {
                Some(best) => best.max(candidate),
                None => candidate,
            });
        }
        if let Some(peak) = &peak {
            debug!(t = peak.t, curvature = peak.curvature, "found curvature peak");
        }
        Ok(peak)
    }
}
