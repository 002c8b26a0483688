use crate::error::{DomainError, Result};

use super::{Quantity, Vector3};

/// Slack on the step count so that `2π / (π / 100)` counts as 200 steps.
const STEP_SLACK: f64 = 1e-9;

/// Integration bounds. Unlike sampling bounds, `begin` may exceed `final`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureBounds {
    begin: f64,
    increment: f64,
    final_value: f64,
}

impl QuadratureBounds {
    /// Creates integration bounds over `[begin, final_value]` with step `increment`.
    ///
    /// # Errors
    ///
    /// Returns an error if any bound is not finite or `increment <= 0`.
    pub fn new(begin: f64, increment: f64, final_value: f64) -> Result<Self> {
        check_finite("begin", begin)?;
        check_finite("increment", increment)?;
        check_finite("final", final_value)?;
        if increment <= 0.0 {
            return Err(DomainError::NonPositiveIncrement { increment }.into());
        }
        Ok(Self {
            begin,
            increment,
            final_value,
        })
    }

    /// Builds bounds that were already validated elsewhere.
    pub(crate) const fn from_validated(begin: f64, increment: f64, final_value: f64) -> Self {
        Self {
            begin,
            increment,
            final_value,
        }
    }

    /// Lower integration limit.
    #[must_use]
    pub fn begin(&self) -> f64 {
        self.begin
    }

    /// Step width `h`.
    #[must_use]
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Upper integration limit.
    #[must_use]
    pub fn final_value(&self) -> f64 {
        self.final_value
    }

    /// Returns the same bounds with `begin` and `final` swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            begin: self.final_value,
            increment: self.increment,
            final_value: self.begin,
        }
    }

    /// Number of full steps between `begin` and `final` (zero when reversed).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn steps(&self) -> usize {
        let span = self.final_value - self.begin;
        if span <= 0.0 {
            return 0;
        }
        (span / self.increment + STEP_SLACK).floor() as usize
    }
}

pub(crate) fn check_finite(bound: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonFinite { bound, value }.into())
    }
}

/// Integrates `f` over `bounds` with a right-endpoint Riemann sum.
///
/// The last sub-interval `[b - h, b]` is weighted by `f(b)`, then the rest of
/// the interval is handled the same way until less than one full step is left.
///
/// Reversed bounds yield the negated integral over the swapped bounds, so
/// `∫_a^b f = -∫_b^a f` holds exactly. Equal bounds yield [`Quantity::zero`].
///
/// # Errors
///
/// Propagates the first error returned by `f`, unchanged.
pub fn integrate<T, F>(mut f: F, bounds: &QuadratureBounds) -> Result<T>
where
    T: Quantity,
    F: FnMut(f64) -> Result<T>,
{
    if bounds.begin > bounds.final_value {
        return integrate(f, &bounds.reversed()).map(|value| -value);
    }

    let h = bounds.increment;
    let steps = bounds.steps();
    let mut acc = T::zero();
    // Walk upwards so the integrand sees parameters in increasing order.
    for k in (0..steps).rev() {
        #[allow(clippy::cast_precision_loss)]
        let x = bounds.final_value - k as f64 * h;
        acc = acc + f(x)? * h;
    }
    Ok(acc)
}

/// Integrates a scalar-valued function.
///
/// # Errors
///
/// Propagates the first error returned by `f`.
pub fn integrate_scalar<F>(f: F, bounds: &QuadratureBounds) -> Result<f64>
where
    F: FnMut(f64) -> Result<f64>,
{
    integrate(f, bounds)
}

/// Integrates a vector-valued function component-wise.
///
/// # Errors
///
/// Propagates the first error returned by `f`.
pub fn integrate_vector<F>(f: F, bounds: &QuadratureBounds) -> Result<Vector3>
where
    F: FnMut(f64) -> Result<Vector3>,
{
    integrate(f, bounds)
}
