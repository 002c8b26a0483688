//! Cartpath ride demo: runs the tick loop headless and prints the status panel.
//!
//! Usage:
//! ```text
//! cargo run --example ride                      # default (loop)
//! cargo run --example ride -- parabola 50       # track name, tick count
//! RUST_LOG=cartpath=debug cargo run --example ride
//! ```

mod tracks;

use cartpath::ride::Ride;
use cartpath::{CartpathError, CurveKinematicsEngine, EngineConfig};

fn main() -> Result<(), CartpathError> {
    // Default: WARN for everything, INFO for cartpath.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("cartpath=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "loop".to_owned());
    let ticks: usize = args.next().and_then(|n| n.parse().ok()).unwrap_or(10);

    let Some(track) = tracks::by_name(&name)? else {
        eprintln!("unknown track '{name}', expected one of: {}", tracks::NAMES.join(", "));
        std::process::exit(2);
    };

    let engine = CurveKinematicsEngine::with_config(
        track.path,
        track.bounds,
        EngineConfig::default().with_memoization(1024),
    );
    println!("track: {name}, arc length {:.3}", engine.arc_length()?);

    let mut ride = Ride::new(engine);
    for _ in 0..ticks {
        match ride.tick()? {
            Some(frame) => println!("t = {:.3}\n{}", frame.sample.t, frame.readout),
            None => break,
        }
    }

    if let Some(stats) = ride.engine().cache_stats() {
        println!(
            "cache: {} hits, {} misses, {} entries",
            stats.hits, stats.misses, stats.entries
        );
    }
    Ok(())
}
