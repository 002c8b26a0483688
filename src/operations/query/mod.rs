mod arc_length;
mod bounding_box;
mod max_curvature;

pub use arc_length::ArcLength;
pub use bounding_box::{Aabb, BoundingBox};
pub use max_curvature::{CurvaturePeak, MaxCurvature};
