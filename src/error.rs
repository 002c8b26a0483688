use thiserror::Error;

/// Top-level error type for the cartpath engine.
#[derive(Debug, Error)]
pub enum CartpathError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Errors related to differential-geometry computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The forward difference at `t` is too short to define a direction.
    ///
    /// Tangent, orientation, curvature and camera placement all fail with this.
    #[error("degenerate tangent at t = {t}: differential length {length} is below tolerance")]
    DegenerateTangent { t: f64, length: f64 },

    /// The path produced a non-finite value within two increments of `t`.
    #[error("curvature at t = {t} is not finite: {curvature}")]
    NonFiniteCurvature { t: f64, curvature: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised when sampling or integration bounds are malformed.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("increment must be positive, got {increment}")]
    NonPositiveIncrement { increment: f64 },

    #[error("domain is empty: final ({final_value}) must be greater than begin ({begin})")]
    EmptyDomain { begin: f64, final_value: f64 },

    #[error("bound {bound} is not finite: {value}")]
    NonFinite { bound: &'static str, value: f64 },
}

/// Errors raised by path functions.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("parameter t = {t} is not covered by any path segment")]
    OutsideSegments { t: f64 },

    #[error("invalid path segment: {0}")]
    InvalidSegment(String),

    #[error("path evaluation failed: {0}")]
    Evaluation(String),
}

/// Convenience type alias for results using [`CartpathError`].
pub type Result<T> = std::result::Result<T, CartpathError>;
