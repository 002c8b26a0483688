pub mod path;

pub use path::{CirclePath, IntegratedPath, LinePath, PathFunction, PiecewisePath, TryPath};
