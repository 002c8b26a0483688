//! Sample tracks for the ride demo.

use std::f64::consts::{PI, TAU};

use cartpath::geometry::{CirclePath, IntegratedPath, LinePath, PathFunction, PiecewisePath};
use cartpath::math::Vector3;
use cartpath::{Result, SamplingBounds};

pub const NAMES: [&str; 3] = ["loop", "parabola", "stadium"];

/// A path together with the bounds it is meant to be ridden over.
pub struct Track {
    pub path: PiecewisePath,
    pub bounds: SamplingBounds,
}

impl Track {
    /// A single path covering the whole of `bounds`.
    fn whole(path: impl PathFunction + 'static, bounds: SamplingBounds) -> Result<Self> {
        let mut piecewise = PiecewisePath::starting_at(bounds.begin());
        piecewise.push(
            bounds.begin()..bounds.final_value(),
            bounds.begin(),
            Vector3::zeros(),
            path,
        )?;
        Ok(Self {
            path: piecewise,
            bounds,
        })
    }
}

pub fn by_name(name: &str) -> Result<Option<Track>> {
    let track = match name {
        "loop" => Track::whole(
            CirclePath::horizontal(4.0)?,
            SamplingBounds::new(0.0, PI / 100.0, TAU)?,
        )?,
        // Velocity (1, t, 1): a parabola climbing out of a dip at t = 0.
        "parabola" => Track::whole(
            IntegratedPath::new(|t: f64| Vector3::new(1.0, t, 1.0), Vector3::zeros(), 0.0, 0.01)?,
            SamplingBounds::new(-2.0, 0.01, 2.0)?,
        )?,
        "stadium" => stadium()?,
        _ => return Ok(None),
    };
    Ok(Some(track))
}

/// Two straights joined by half circles.
fn stadium() -> Result<Track> {
    let radius = 2.0;
    let straight = 6.0;
    let mut path = PiecewisePath::starting_at(0.0);
    path.chain(1.0, LinePath::new(Vector3::zeros(), Vector3::x(), straight)?)?;
    path.chain(
        PI,
        CirclePath::new(Vector3::zeros(), radius, -Vector3::y(), -Vector3::z())?,
    )?;
    path.chain(1.0, LinePath::new(Vector3::zeros(), -Vector3::x(), straight)?)?;
    path.chain(
        PI,
        CirclePath::new(Vector3::zeros(), radius, -Vector3::y(), Vector3::z())?,
    )?;
    let bounds = SamplingBounds::new(0.0, 0.01, path.end())?;
    Ok(Track { path, bounds })
}
