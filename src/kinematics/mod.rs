mod bounds;
mod cache;
mod config;
mod engine;
mod sample;

pub use bounds::SamplingBounds;
pub use cache::CacheStats;
pub use config::EngineConfig;
pub use engine::CurveKinematicsEngine;
pub use sample::{KinematicSample, Orientation};
