pub mod format;
pub mod quadrature;

use std::ops::{Add, Mul, Neg};

/// 3D vector type. Path positions are vectors so they can be integrated.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// A value that can be summed and scaled, i.e. something a Riemann sum can produce.
pub trait Quantity: Copy + Add<Output = Self> + Neg<Output = Self> + Mul<f64, Output = Self> {
    /// The additive identity.
    fn zero() -> Self;
}

impl Quantity for f64 {
    fn zero() -> Self {
        0.0
    }
}

impl Quantity for Vector3 {
    fn zero() -> Self {
        Vector3::zeros()
    }
}
