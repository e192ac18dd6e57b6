//! Planet Slice entry point
//!
//! Headless native runner: plays a session with the autopilot at a
//! simulated 60 Hz and logs the final snapshot.
//!
//! Usage: `planet-slice [settings.json] [frames]`

use std::path::PathBuf;

use clap::Parser;
use planet_slice::{Session, Settings};

/// Simulated display refresh interval
const FRAME_MS: f32 = 1000.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "planet-slice")]
#[command(about = "Play a headless Planet Slice session with the autopilot")]
struct Args {
    /// Settings JSON file (defaults are used when absent or unreadable)
    settings: Option<PathBuf>,

    /// Maximum number of frames to simulate
    #[arg(default_value_t = 3600)]
    frames: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Planet Slice (headless) starting...");

    let settings = match &args.settings {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let mut session = Session::new(&settings);
    session.set_autopilot(true);
    session.start();

    let mut frames = 0;
    while frames < args.frames && session.frame(FRAME_MS) {
        frames += 1;
    }

    let snapshot = session.snapshot();
    log::info!(
        "Stopped after {} frames: {:?}, score {}, level {}, lives {}",
        frames,
        snapshot.phase,
        snapshot.score,
        snapshot.level,
        snapshot.lives_remaining
    );
    match serde_json::to_string(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["planet-slice"]).unwrap();
        assert!(args.settings.is_none());
        assert_eq!(args.frames, 3600);
    }

    #[test]
    fn test_args_positional() {
        let args = Args::try_parse_from(["planet-slice", "s.json", "120"]).unwrap();
        assert_eq!(args.settings, Some(PathBuf::from("s.json")));
        assert_eq!(args.frames, 120);
    }

    #[test]
    fn test_malformed_frame_count_is_rejected() {
        assert!(Args::try_parse_from(["planet-slice", "s.json", "10x"]).is_err());
    }
}
