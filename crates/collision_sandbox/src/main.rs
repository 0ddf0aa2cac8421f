//! Headless collision sandbox
//!
//! Usage: `collision_sandbox [config.toml|config.ron]`
//!
//! Runs a bouncing-ball arena for a fixed number of ticks and logs lifecycle
//! events and broad-phase statistics. Set `RUST_LOG=debug` (or `trace`) for
//! per-tick detail.

mod config;
mod scenario;

use collision_engine::config::Config;
use collision_engine::foundation::logging;
use config::SandboxConfig;
use scenario::Scenario;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading sandbox config from {path}");
            SandboxConfig::load_from_file(&path)?
        }
        None => {
            log::info!("No config given, using defaults");
            SandboxConfig::default()
        }
    };
    config.validate()?;

    let mut scenario = Scenario::new(&config)?;
    let summary = scenario.run(config.ticks);

    log::info!(
        "Finished {} ticks: {} enters, {} exits, {} zone visits",
        summary.ticks,
        summary.enters,
        summary.exits,
        summary.zone_visits
    );
    Ok(())
}
