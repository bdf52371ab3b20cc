use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use exam_common::similarity::{DEFAULT_SCAN_CAP, DUPLICATE_THRESHOLD};
use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub snapshot_path: PathBuf,
    pub duplicate_threshold: u8,
    pub duplicate_scan_cap: usize,
    /// Seconds between checks for a newer snapshot on disk. Zero disables reloading.
    pub reload_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            snapshot_path: PathBuf::from("data/questions.cbor"),
            duplicate_threshold: DUPLICATE_THRESHOLD,
            duplicate_scan_cap: DEFAULT_SCAN_CAP,
            reload_secs: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, String> {
        let defaults = Self::default();
        Ok(Self {
            port: try_load("EXAM_API_PORT", defaults.port)?,
            snapshot_path: try_load("EXAM_SNAPSHOT_PATH", defaults.snapshot_path.display())?,
            duplicate_threshold: try_load("EXAM_DUPLICATE_THRESHOLD", defaults.duplicate_threshold)?,
            duplicate_scan_cap: try_load("EXAM_DUPLICATE_SCAN_CAP", defaults.duplicate_scan_cap)?,
            reload_secs: try_load("EXAM_RELOAD_SECS", defaults.reload_secs)?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: impl Display) -> Result<T, String>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        format!("Environment misconfigured: {key}={raw:?}: {e}")
    })
}
