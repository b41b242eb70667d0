//! Sandbox configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings of one headless duel.
#[derive(Clone, Debug)]
pub struct SandboxConfig {
    /// Frames to simulate before giving up.
    pub ticks: u32,
    /// Seconds per frame.
    pub frame_dt: f32,
    /// Content directory holding `combat.toml`, `stats.ron`, `attacks.ron`
    /// and `encounters/`. `None` runs the built-in encounter.
    pub data_dir: Option<PathBuf>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            ticks: 1800,
            frame_dt: 1.0 / 60.0,
            data_dir: None,
        }
    }
}

impl SandboxConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_TICKS` - Frames to simulate (default: 1800)
    /// - `DUEL_FRAME_DT` - Seconds per frame (default: 1/60)
    /// - `DUEL_CONFIG` - Content directory (default: built-in encounter)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ticks) = read_env::<u32>("DUEL_TICKS") {
            config.ticks = ticks;
        }
        if let Some(dt) = read_env::<f32>("DUEL_FRAME_DT").filter(|dt| *dt > 0.0) {
            config.frame_dt = dt;
        }
        if let Some(dir) = read_env::<PathBuf>("DUEL_CONFIG") {
            config.data_dir = Some(dir);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
