use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::geometry::path::PathFunction;
use crate::math::quadrature::integrate_scalar;
use crate::math::Vector3;

use super::cache::{CacheStats, PositionCache};
use super::{EngineConfig, KinematicSample, Orientation, SamplingBounds};

/// Derives kinematic and geometric quantities of a path by finite differences.
///
/// The engine is a pure function table over `(path, bounds)`. The caller owns
/// the running parameter `t` and advances it with [`Self::value_after`].
/// All differences are forward differences of one `increment`, wrapping
/// periodically at the end of the domain.
#[derive(Debug)]
pub struct CurveKinematicsEngine<P> {
    path: P,
    bounds: SamplingBounds,
    config: EngineConfig,
    cache: Option<PositionCache>,
}

impl<P: PathFunction> CurveKinematicsEngine<P> {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(path: P, bounds: SamplingBounds) -> Self {
        Self::with_config(path, bounds, EngineConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    #[must_use]
    pub fn with_config(path: P, bounds: SamplingBounds, config: EngineConfig) -> Self {
        debug!(
            begin = bounds.begin(),
            increment = bounds.increment(),
            final_value = bounds.final_value(),
            memoize = config.memoize,
            "creating kinematics engine"
        );
        let cache = config
            .memoize
            .then(|| PositionCache::new(config.cache_capacity));
        Self {
            path,
            bounds,
            config,
            cache,
        }
    }

    /// Returns the path being sampled.
    #[must_use]
    pub fn path(&self) -> &P {
        &self.path
    }

    /// Returns the sampling bounds.
    #[must_use]
    pub fn bounds(&self) -> &SamplingBounds {
        &self.bounds
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replaces the path, returning the old one. Cached positions are dropped.
    pub fn set_path(&mut self, path: P) -> P {
        debug!("replacing path");
        self.invalidate();
        std::mem::replace(&mut self.path, path)
    }

    /// Replaces the sampling bounds. Cached positions are dropped.
    pub fn set_bounds(&mut self, bounds: SamplingBounds) {
        debug!(
            begin = bounds.begin(),
            increment = bounds.increment(),
            final_value = bounds.final_value(),
            "replacing sampling bounds"
        );
        self.invalidate();
        self.bounds = bounds;
    }

    /// Cache counters, or `None` when memoization is off.
    #[must_use]
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(PositionCache::stats)
    }

    fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// The parameter one increment after `t`, wrapped into `[begin, final)`.
    #[must_use]
    pub fn value_after(&self, t: f64) -> f64 {
        self.bounds.value_after(t)
    }

    /// The parameter one increment before `t`, wrapped into `[begin, final)`.
    #[must_use]
    pub fn value_before(&self, t: f64) -> f64 {
        self.bounds.value_before(t)
    }

    /// Evaluates the path at `t`, through the cache when memoization is on.
    ///
    /// # Errors
    ///
    /// Propagates path evaluation failures.
    pub fn position(&self, t: f64) -> Result<Vector3> {
        match &self.cache {
            Some(cache) => cache.get_or_try_insert(t, |t| self.path.evaluate(t)),
            None => self.path.evaluate(t),
        }
    }

    /// Forward difference `position(value_after(t)) - position(t)`.
    ///
    /// If the path is discontinuous at the wrap point the result is whatever
    /// the jump is; that is accepted approximation error.
    ///
    /// # Errors
    ///
    /// Propagates path evaluation failures.
    pub fn scaled_differential(&self, t: f64) -> Result<Vector3> {
        Ok(self.position(self.value_after(t))? - self.position(t)?)
    }

    /// The scaled differential normalized to unit length.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateTangent`] when the path is stationary at `t`.
    pub fn unit_tangent(&self, t: f64) -> Result<Vector3> {
        let differential = self.scaled_differential(t)?;
        self.normalize(t, &differential)
    }

    /// Cart rotation angles derived from the unit tangent.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::unit_tangent`].
    pub fn orientation(&self, t: f64) -> Result<Orientation> {
        Ok(Orientation::from_unit_tangent(&self.unit_tangent(t)?))
    }

    /// Second forward difference, roughly acceleration times increment squared.
    ///
    /// # Errors
    ///
    /// Propagates path evaluation failures.
    pub fn scaled_second_differential(&self, t: f64) -> Result<Vector3> {
        Ok(self.scaled_differential(self.value_after(t))? - self.scaled_differential(t)?)
    }

    /// Curvature `|d x d2| / |d|^3`.
    ///
    /// Numerator and denominator both scale with the cube of the increment, so
    /// no compensation is needed.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateTangent`] when the path is stationary at `t`,
    /// and [`GeometryError::NonFiniteCurvature`] when the path yields a non-finite
    /// value one or two increments ahead.
    pub fn curvature(&self, t: f64) -> Result<f64> {
        let differential = self.scaled_differential(t)?;
        self.check_differential(t, &differential)?;
        let second = self.scaled_second_differential(t)?;
        Self::curvature_of(t, &differential, &second)
    }

    /// Chase-camera position, `camera_offset` behind the cart along the reverse tangent.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::unit_tangent`].
    pub fn camera_position(&self, t: f64) -> Result<Vector3> {
        let position = self.position(t)?;
        let tangent = self.unit_tangent(t)?;
        Ok(position - tangent * self.config.camera_offset)
    }

    /// Approximate speed `|d| / increment`. Zero where the path is stationary.
    ///
    /// # Errors
    ///
    /// Propagates path evaluation failures.
    pub fn derivative_magnitude(&self, t: f64) -> Result<f64> {
        Ok(self.scaled_differential(t)?.norm() / self.bounds.increment())
    }

    /// Length of one period of the path, integrating the approximate speed.
    ///
    /// # Errors
    ///
    /// Propagates path evaluation failures.
    pub fn arc_length(&self) -> Result<f64> {
        let length = integrate_scalar(
            |t| self.derivative_magnitude(t),
            &self.bounds.to_quadrature(),
        )?;
        debug!(length, "computed arc length");
        Ok(length)
    }

    /// Computes every quantity at `t` from three consecutive path positions.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateTangent`] when the path is stationary
    /// at `t`, [`GeometryError::NonFiniteCurvature`] when the curvature is not
    /// finite, and propagates path evaluation failures.
    pub fn sample(&self, t: f64) -> Result<KinematicSample> {
        let t_next = self.value_after(t);
        let position = self.position(t)?;
        let next_position = self.position(t_next)?;
        let after_next = self.position(self.value_after(t_next))?;

        let scaled_differential = next_position - position;
        let next_scaled_differential = after_next - next_position;
        let scaled_second_differential = next_scaled_differential - scaled_differential;

        let unit_tangent = self.normalize(t, &scaled_differential)?;
        let curvature = Self::curvature_of(t, &scaled_differential, &scaled_second_differential)?;
        Ok(KinematicSample {
            t,
            position,
            next_position,
            scaled_differential,
            unit_tangent,
            orientation: Orientation::from_unit_tangent(&unit_tangent),
            next_scaled_differential,
            scaled_second_differential,
            curvature,
            camera_position: position - unit_tangent * self.config.camera_offset,
        })
    }

    /// Degenerate means the approximate speed `|d| / increment` is below the epsilon.
    fn check_differential(&self, t: f64, differential: &Vector3) -> Result<f64> {
        let length = differential.norm();
        let speed = length / self.bounds.increment();
        if speed < self.config.degenerate_epsilon || !length.is_finite() {
            return Err(GeometryError::DegenerateTangent { t, length }.into());
        }
        Ok(length)
    }

    fn normalize(&self, t: f64, differential: &Vector3) -> Result<Vector3> {
        let length = self.check_differential(t, differential)?;
        Ok(*differential / length)
    }

    fn curvature_of(t: f64, differential: &Vector3, second: &Vector3) -> Result<f64> {
        let curvature = differential.cross(second).norm() / differential.norm().powi(3);
        if !curvature.is_finite() {
            return Err(GeometryError::NonFiniteCurvature { t, curvature }.into());
        }
        Ok(curvature)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{CartpathError, PathError};
    use crate::geometry::path::{CirclePath, LinePath, TryPath};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{PI, TAU};

    fn circle_engine(radius: f64, increment: f64) -> CurveKinematicsEngine<CirclePath> {
        CurveKinematicsEngine::new(
            CirclePath::horizontal(radius).unwrap(),
            SamplingBounds::new(0.0, increment, TAU).unwrap(),
        )
    }

    fn is_degenerate<T: std::fmt::Debug>(result: &Result<T>) -> bool {
        matches!(
            result,
            Err(CartpathError::Geometry(GeometryError::DegenerateTangent { .. }))
        )
    }

    #[test]
    fn unit_circle_scenario() {
        let engine = circle_engine(1.0, PI / 100.0);
        let tangent = engine.unit_tangent(0.0).unwrap();
        assert_abs_diff_eq!((tangent - Vector3::z()).norm(), 0.0, epsilon = 0.02);
        assert_abs_diff_eq!(engine.curvature(0.0).unwrap(), 1.0, epsilon = 1e-3);
        assert_relative_eq!(engine.arc_length().unwrap(), TAU, max_relative = 1e-3);
    }

    #[test]
    fn circle_curvature_is_inverse_radius() {
        for radius in [0.5, 2.0, 10.0] {
            let engine = circle_engine(radius, 0.01);
            for t in [0.0, 1.0, 3.0, 5.5] {
                let kappa = engine.curvature(t).unwrap();
                assert_relative_eq!(kappa, 1.0 / radius, max_relative = 0.02);
            }
        }
    }

    #[test]
    fn unit_tangent_has_unit_length() {
        let engine = circle_engine(3.0, 0.05);
        for t in engine.bounds().sample_points() {
            let tangent = engine.unit_tangent(t).unwrap();
            assert_abs_diff_eq!(tangent.norm(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn constant_path_is_degenerate_everywhere() {
        let engine = CurveKinematicsEngine::new(
            |_: f64| Vector3::new(1.0, 1.0, 1.0),
            SamplingBounds::new(0.0, 0.1, 1.0).unwrap(),
        );
        for t in engine.bounds().sample_points() {
            assert!(is_degenerate(&engine.unit_tangent(t)));
            assert!(is_degenerate(&engine.curvature(t)));
            assert!(is_degenerate(&engine.orientation(t)));
            assert!(is_degenerate(&engine.camera_position(t)));
            assert!(is_degenerate(&engine.sample(t)));
            assert_abs_diff_eq!(engine.derivative_magnitude(t).unwrap(), 0.0);
        }
        assert_abs_diff_eq!(engine.arc_length().unwrap(), 0.0);
    }

    #[test]
    fn straight_line_has_zero_curvature() {
        let line = LinePath::new(Vector3::zeros(), Vector3::new(1.0, 2.0, 2.0), 3.0).unwrap();
        let engine =
            CurveKinematicsEngine::new(line, SamplingBounds::new(0.0, 0.01, 1.0).unwrap());
        assert_abs_diff_eq!(engine.curvature(0.3).unwrap(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(engine.derivative_magnitude(0.3).unwrap(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn camera_trails_the_cart() {
        let engine = CurveKinematicsEngine::with_config(
            LinePath::new(Vector3::zeros(), Vector3::x(), 1.0).unwrap(),
            SamplingBounds::new(0.0, 0.1, 10.0).unwrap(),
            EngineConfig::default().with_camera_offset(2.0),
        );
        let camera = engine.camera_position(4.0).unwrap();
        assert_abs_diff_eq!((camera - Vector3::new(2.0, 0.0, 0.0)).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn default_camera_offset_is_five() {
        let engine = circle_engine(1.0, 0.01);
        let position = engine.position(1.0).unwrap();
        let camera = engine.camera_position(1.0).unwrap();
        assert_abs_diff_eq!((position - camera).norm(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn sample_agrees_with_individual_queries() {
        let engine = circle_engine(2.0, 0.05);
        let t = 1.3;
        let sample = engine.sample(t).unwrap();
        assert_eq!(sample.position, engine.position(t).unwrap());
        assert_eq!(
            sample.next_position,
            engine.position(engine.value_after(t)).unwrap()
        );
        assert_eq!(sample.scaled_differential, engine.scaled_differential(t).unwrap());
        assert_eq!(sample.unit_tangent, engine.unit_tangent(t).unwrap());
        assert_eq!(sample.orientation, engine.orientation(t).unwrap());
        assert_eq!(
            sample.scaled_second_differential,
            engine.scaled_second_differential(t).unwrap()
        );
        assert_eq!(sample.curvature, engine.curvature(t).unwrap());
        assert_eq!(sample.camera_position, engine.camera_position(t).unwrap());
    }

    #[test]
    fn differential_wraps_at_domain_end() {
        let engine = CurveKinematicsEngine::new(
            |t: f64| Vector3::new(t, 0.0, 0.0),
            SamplingBounds::new(-2.0, 0.5, 2.0).unwrap(),
        );
        // value_after(1.5) wraps to -2, so the cart jumps back to the start.
        let d = engine.scaled_differential(1.5).unwrap();
        assert_abs_diff_eq!(d.x, -3.5);
    }

    #[test]
    fn path_errors_propagate() {
        let engine = CurveKinematicsEngine::new(
            TryPath(|t: f64| {
                if t > 0.5 {
                    Err(PathError::Evaluation("off the track".into()).into())
                } else {
                    Ok(Vector3::new(t, 0.0, 0.0))
                }
            }),
            SamplingBounds::new(0.0, 0.1, 1.0).unwrap(),
        );
        assert!(engine.unit_tangent(0.1).is_ok());
        assert!(matches!(
            engine.unit_tangent(0.5),
            Err(CartpathError::Path(PathError::Evaluation(_)))
        ));
        assert!(engine.arc_length().is_err());
    }

    #[test]
    fn non_finite_second_differential_is_an_error() {
        let engine = CurveKinematicsEngine::new(
            |t: f64| {
                if t >= 0.45 {
                    Vector3::repeat(f64::NAN)
                } else {
                    Vector3::new(t, t * t, 0.0)
                }
            },
            SamplingBounds::new(0.0, 0.1, 1.0).unwrap(),
        );
        // d at 0.3 only reaches 0.4; d2 needs the NaN at 0.5.
        assert!(engine.unit_tangent(0.3).is_ok());
        assert!(matches!(
            engine.curvature(0.3),
            Err(CartpathError::Geometry(GeometryError::NonFiniteCurvature { .. }))
        ));
        assert!(matches!(
            engine.sample(0.3),
            Err(CartpathError::Geometry(GeometryError::NonFiniteCurvature { .. }))
        ));
        assert!(engine.curvature(0.2).unwrap().is_finite());
    }

    #[test]
    fn tiny_circle_is_not_degenerate() {
        let engine = circle_engine(1e-8, 0.001);
        assert_relative_eq!(engine.curvature(1.0).unwrap(), 1e8, max_relative = 1e-3);
        assert_abs_diff_eq!(engine.unit_tangent(1.0).unwrap().norm(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn degeneracy_threshold_is_on_speed() {
        let bounds = SamplingBounds::new(0.0, 0.01, 1.0).unwrap();
        let line = |speed: f64| move |t: f64| Vector3::new(speed * t, 0.0, 0.0);

        // Default epsilon is 1e-10 in units of distance per parameter.
        let below = CurveKinematicsEngine::new(line(5e-11), bounds);
        assert!(is_degenerate(&below.unit_tangent(0.5)));
        assert!(is_degenerate(&below.curvature(0.5)));
        let above = CurveKinematicsEngine::new(line(2e-10), bounds);
        assert!(above.unit_tangent(0.5).is_ok());

        // The same path at a finer step keeps its speed.
        let finer = CurveKinematicsEngine::new(
            line(2e-10),
            SamplingBounds::new(0.0, 1e-4, 1.0).unwrap(),
        );
        assert!(finer.unit_tangent(0.5).is_ok());
    }

    #[test]
    fn custom_degenerate_epsilon() {
        let bounds = SamplingBounds::new(0.0, 0.1, 10.0).unwrap();
        let config = EngineConfig::default().with_degenerate_epsilon(0.5);
        let slow = CurveKinematicsEngine::with_config(
            LinePath::new(Vector3::zeros(), Vector3::y(), 0.4).unwrap(),
            bounds,
            config,
        );
        assert!(is_degenerate(&slow.orientation(2.0)));
        assert!(is_degenerate(&slow.sample(2.0)));
        let fast = CurveKinematicsEngine::with_config(
            LinePath::new(Vector3::zeros(), Vector3::y(), 0.6).unwrap(),
            bounds,
            config,
        );
        assert!(fast.sample(2.0).is_ok());
    }

    #[test]
    fn memoized_engine_matches_plain_engine() {
        let plain = circle_engine(1.5, 0.02);
        let cached = CurveKinematicsEngine::with_config(
            CirclePath::horizontal(1.5).unwrap(),
            SamplingBounds::new(0.0, 0.02, TAU).unwrap(),
            EngineConfig::default().with_memoization(1024),
        );
        assert!(plain.cache_stats().is_none());
        for t in [0.0, 0.7, 2.2] {
            assert_eq!(plain.sample(t).unwrap(), cached.sample(t).unwrap());
            assert_eq!(plain.curvature(t).unwrap(), cached.curvature(t).unwrap());
        }
        let stats = cached.cache_stats().unwrap();
        assert!(stats.hits > 0);
        assert!(stats.entries > 0);
    }

    #[test]
    fn replacing_bounds_invalidates_cache() {
        let mut engine = CurveKinematicsEngine::with_config(
            CirclePath::horizontal(1.0).unwrap(),
            SamplingBounds::new(0.0, 0.1, TAU).unwrap(),
            EngineConfig::default().with_memoization(64),
        );
        engine.sample(0.0).unwrap();
        assert!(engine.cache_stats().unwrap().entries > 0);

        engine.set_bounds(SamplingBounds::new(0.0, 0.2, TAU).unwrap());
        assert_eq!(engine.cache_stats().unwrap(), CacheStats::default());
        assert_abs_diff_eq!(engine.value_after(0.0), 0.2);
    }

    #[test]
    fn replacing_path_invalidates_cache() {
        let mut engine = CurveKinematicsEngine::with_config(
            CirclePath::horizontal(1.0).unwrap(),
            SamplingBounds::new(0.0, 0.1, TAU).unwrap(),
            EngineConfig::default().with_memoization(64),
        );
        let before = engine.position(0.0).unwrap();
        let old = engine.set_path(CirclePath::horizontal(4.0).unwrap());
        assert_abs_diff_eq!(old.radius(), 1.0);
        let after = engine.position(0.0).unwrap();
        assert_abs_diff_eq!(before.x, 1.0);
        assert_abs_diff_eq!(after.x, 4.0);
    }
}
