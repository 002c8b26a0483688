pub mod error;
pub mod geometry;
pub mod kinematics;
pub mod math;
pub mod operations;
pub mod ride;
pub mod tessellation;

pub use error::{CartpathError, Result};
pub use geometry::PathFunction;
pub use kinematics::{CurveKinematicsEngine, EngineConfig, SamplingBounds};
