use std::fmt;
use std::ops::Range;

use crate::error::{PathError, Result};
use crate::math::Vector3;

use super::PathFunction;

/// One piece of a [`PiecewisePath`].
///
/// For a global parameter `t` in `range`, the segment is evaluated at the
/// local parameter `t - range.start + local_start` and shifted by `translation`.
pub struct Segment {
    range: Range<f64>,
    local_start: f64,
    translation: Vector3,
    path: Box<dyn PathFunction>,
}

impl Segment {
    /// Global parameter range covered by this segment.
    #[must_use]
    pub fn range(&self) -> &Range<f64> {
        &self.range
    }

    /// Offset added to every evaluated point.
    #[must_use]
    pub fn translation(&self) -> &Vector3 {
        &self.translation
    }

    fn local(&self, t: f64) -> f64 {
        t - self.range.start + self.local_start
    }

    fn evaluate(&self, t: f64) -> Result<Vector3> {
        Ok(self.path.evaluate(self.local(t))? + self.translation)
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("range", &self.range)
            .field("local_start", &self.local_start)
            .field("translation", &self.translation)
            .finish_non_exhaustive()
    }
}

/// A path assembled end to end from an ordered list of segments.
///
/// Evaluation picks the first segment whose half-open range contains `t`; the
/// last segment also contains its end point. Continuity across boundaries is
/// the composer's responsibility, [`PiecewisePath::chain`] takes care of it.
#[derive(Debug)]
pub struct PiecewisePath {
    start: f64,
    segments: Vec<Segment>,
}

impl PiecewisePath {
    /// Creates an empty path whose first chained segment begins at `start`.
    #[must_use]
    pub fn starting_at(start: f64) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    /// Returns the parameter where the next chained segment would begin.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.segments.last().map_or(self.start, |s| s.range.end)
    }

    /// Returns the segments in evaluation order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Appends a segment exactly as given.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty or not finite.
    pub fn push(
        &mut self,
        range: Range<f64>,
        local_start: f64,
        translation: Vector3,
        path: impl PathFunction + 'static,
    ) -> Result<()> {
        if !(range.start.is_finite() && range.end.is_finite() && local_start.is_finite()) {
            return Err(PathError::InvalidSegment(format!(
                "range {range:?} with local start {local_start} is not finite"
            ))
            .into());
        }
        if range.end <= range.start {
            return Err(PathError::InvalidSegment(format!("range {range:?} is empty")).into());
        }
        self.segments.push(Segment {
            range,
            local_start,
            translation,
            path: Box::new(path),
        });
        Ok(())
    }

    /// Appends a segment of parameter length `length` right after the last one.
    ///
    /// The segment is evaluated from local parameter `0` and translated so that
    /// its start coincides with the end of the previous segment.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is not positive or either endpoint fails to evaluate.
    pub fn chain(&mut self, length: f64, path: impl PathFunction + 'static) -> Result<()> {
        let start = self.end();
        let translation = match self.segments.last() {
            Some(previous) => previous.evaluate(previous.range.end)? - path.evaluate(0.0)?,
            None => Vector3::zeros(),
        };
        self.push(start..start + length, 0.0, translation, path)
    }

    fn segment_at(&self, t: f64) -> Option<&Segment> {
        let last = self.segments.len().checked_sub(1)?;
        self.segments
            .iter()
            .enumerate()
            .find(|(i, s)| s.range.contains(&t) || (*i == last && t == s.range.end))
            .map(|(_, s)| s)
    }
}

impl Default for PiecewisePath {
    fn default() -> Self {
        Self::starting_at(0.0)
    }
}

impl PathFunction for PiecewisePath {
    fn evaluate(&self, t: f64) -> Result<Vector3> {
        match self.segment_at(t) {
            Some(segment) => segment.evaluate(t),
            None => Err(PathError::OutsideSegments { t }.into()),
        }
    }
}
