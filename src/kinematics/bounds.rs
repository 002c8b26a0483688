use crate::error::{DomainError, Result};
use crate::math::quadrature::{check_finite, QuadratureBounds};

/// Slack used when counting sample points, see [`SamplingBounds::sample_count`].
const COUNT_SLACK: f64 = 1e-9;

/// Parameters closer than this many increments below `final` wrap to `begin`.
const WRAP_SLACK: f64 = 1e-9;

/// The periodic parameter domain `[begin, final)` and its sampling step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingBounds {
    begin: f64,
    increment: f64,
    final_value: f64,
}

impl SamplingBounds {
    /// Creates sampling bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if any bound is not finite, `increment <= 0`, or
    /// `final_value <= begin`.
    pub fn new(begin: f64, increment: f64, final_value: f64) -> Result<Self> {
        check_finite("begin", begin)?;
        check_finite("increment", increment)?;
        check_finite("final", final_value)?;
        if increment <= 0.0 {
            return Err(DomainError::NonPositiveIncrement { increment }.into());
        }
        if final_value <= begin {
            return Err(DomainError::EmptyDomain { begin, final_value }.into());
        }
        Ok(Self {
            begin,
            increment,
            final_value,
        })
    }

    /// Start of the domain.
    #[must_use]
    pub fn begin(&self) -> f64 {
        self.begin
    }

    /// Sampling step.
    #[must_use]
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// End of the domain, exclusive for sampling.
    #[must_use]
    pub fn final_value(&self) -> f64 {
        self.final_value
    }

    /// Length of one period, `final - begin`.
    #[must_use]
    pub fn domain_length(&self) -> f64 {
        self.final_value - self.begin
    }

    /// Advances `t` by one increment, wrapping periodically into `[begin, final)`.
    ///
    /// The wrap is taken relative to `begin`, so domains that do not start at
    /// zero cycle correctly.
    #[must_use]
    pub fn value_after(&self, t: f64) -> f64 {
        self.wrap(t - self.begin + self.increment)
    }

    /// Steps `t` back by one increment; the inverse of [`Self::value_after`].
    #[must_use]
    pub fn value_before(&self, t: f64) -> f64 {
        self.wrap(t - self.begin - self.increment)
    }

    /// Maps an offset from `begin` into `[begin, final)`.
    ///
    /// Offsets within a rounding error of a whole number of periods snap to
    /// `begin`, so a cart stepping `k` increments around a domain of `k`
    /// increments lands exactly back on `begin`.
    fn wrap(&self, offset: f64) -> f64 {
        let len = self.domain_length();
        let remainder = offset.rem_euclid(len);
        let slack = WRAP_SLACK * self.increment;
        if remainder < slack || len - remainder < slack {
            return self.begin;
        }
        let wrapped = remainder + self.begin;
        // The addition can still round up onto the open end.
        if wrapped >= self.final_value {
            self.begin
        } else {
            wrapped
        }
    }

    /// Number of sample points `begin, begin + h, ...` strictly below `final`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample_count(&self) -> usize {
        (self.domain_length() / self.increment - COUNT_SLACK).ceil() as usize
    }

    /// Iterates the sample points of one period.
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.sample_count()).map(move |k| self.begin + k as f64 * self.increment)
    }

    /// The same interval as integration bounds.
    #[must_use]
    pub fn to_quadrature(&self) -> QuadratureBounds {
        QuadratureBounds::from_validated(self.begin, self.increment, self.final_value)
    }
}
