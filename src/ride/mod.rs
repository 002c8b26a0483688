mod readout;

pub use readout::StatusReadout;

use tracing::debug;

use crate::error::Result;
use crate::geometry::path::PathFunction;
use crate::kinematics::{CurveKinematicsEngine, KinematicSample, Orientation};
use crate::math::Vector3;
use crate::operations::query::CurvaturePeak;

/// Nominal wall-clock interval between ticks, in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 25;

/// Everything the renderer needs for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub sample: KinematicSample,
    pub readout: StatusReadout,
}

impl Frame {
    /// Where to place the cart.
    #[must_use]
    pub fn position(&self) -> Vector3 {
        self.sample.position
    }

    /// How to rotate the cart.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.sample.orientation
    }

    /// Where to put the chase camera.
    #[must_use]
    pub fn camera_position(&self) -> Vector3 {
        self.sample.camera_position
    }
}

/// Arc length accumulated tick by tick until the cart completes one lap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningArcLength {
    pub value: f64,
    pub finished: bool,
}

/// A cart riding a path, one increment per tick.
///
/// The host calls [`Ride::tick`] on its own timer (every [`TICK_INTERVAL_MS`])
/// and applies the returned [`Frame`] to its scene.
#[derive(Debug)]
pub struct Ride<P> {
    engine: CurveKinematicsEngine<P>,
    t: f64,
    paused: bool,
    arc_length: RunningArcLength,
    peak: Option<CurvaturePeak>,
}

impl<P: PathFunction> Ride<P> {
    /// Starts a ride at the beginning of the engine's domain.
    #[must_use]
    pub fn new(engine: CurveKinematicsEngine<P>) -> Self {
        let t = engine.bounds().begin();
        Self {
            engine,
            t,
            paused: false,
            arc_length: RunningArcLength::default(),
            peak: None,
        }
    }

    /// Returns the engine driving the ride.
    #[must_use]
    pub fn engine(&self) -> &CurveKinematicsEngine<P> {
        &self.engine
    }

    /// Gives the engine back, ending the ride.
    pub fn into_engine(self) -> CurveKinematicsEngine<P> {
        self.engine
    }

    /// The parameter the next step will sample.
    #[must_use]
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Whether ticks are currently ignored.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flips the pause flag and returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        debug!(paused = self.paused, "toggled pause");
        self.paused
    }

    /// Arc length accumulated so far.
    #[must_use]
    pub fn arc_length(&self) -> RunningArcLength {
        self.arc_length
    }

    /// The sharpest point seen so far, if any step has completed.
    #[must_use]
    pub fn max_curvature(&self) -> Option<CurvaturePeak> {
        self.peak
    }

    /// Returns to the start of the domain and forgets all statistics.
    pub fn reset(&mut self) {
        self.t = self.engine.bounds().begin();
        self.arc_length = RunningArcLength::default();
        self.peak = None;
    }

    /// Advances one tick unless paused.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::step`].
    pub fn tick(&mut self) -> Result<Option<Frame>> {
        if self.paused {
            return Ok(None);
        }
        self.step().map(Some)
    }

    /// Samples the path at the current parameter, records statistics and advances.
    ///
    /// On error nothing is recorded and the parameter stays where it is; the
    /// host decides whether to [`Self::skip`] the frame, freeze, or stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample is degenerate or the path fails to evaluate.
    pub fn step(&mut self) -> Result<Frame> {
        let sample = self.engine.sample(self.t)?;

        if !self.arc_length.finished {
            self.arc_length.value += sample.scaled_differential.norm();
        }

        let candidate = CurvaturePeak {
            t: sample.t,
            point: sample.position,
            curvature: sample.curvature,
        };
        let peak = match self.peak {
            Some(best) => best.max(candidate),
            None => candidate,
        };
        if self.peak != Some(peak) {
            debug!(t = peak.t, curvature = peak.curvature, "new curvature peak");
        }
        self.peak = Some(peak);

        let readout = StatusReadout::new(&sample, &peak, self.arc_length.value);
        self.advance();
        Ok(Frame { sample, readout })
    }

    /// Advances the parameter without sampling. Skipped ticks add no arc length.
    pub fn skip(&mut self) {
        self.advance();
    }

    fn advance(&mut self) {
        let next = self.engine.value_after(self.t);
        if next <= self.t && !self.arc_length.finished {
            self.arc_length.finished = true;
            debug!(arc_length = self.arc_length.value, "completed first lap");
        }
        self.t = next;
    }
}
