use crate::services::archive::PollSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub edition: String,
    pub game_folder: Option<PathBuf>,
    pub restore_folder: Option<PathBuf>,
    pub retro_regens_folder: Option<PathBuf>,
    pub regens_type: Option<String>,
    pub poll_interval_ms: u64,
    pub unpack_timeout_secs: u64,
    pub log_level: String, // "error", "warn", "info", "debug", "trace"
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            edition: "2024".into(),
            game_folder: None,
            restore_folder: None,
            retro_regens_folder: None,
            regens_type: None,
            poll_interval_ms: 500,
            unpack_timeout_secs: 30 * 60,
            log_level: "info".into(),
        }
    }
}

impl AppSettings {
    /// Poll cadence for archive extraction. Zero values fall back to defaults.
    pub fn poll_settings(&self) -> PollSettings {
        let defaults = PollSettings::default();
        PollSettings {
            interval: match self.poll_interval_ms {
                0 => defaults.interval,
                ms => Duration::from_millis(ms),
            },
            timeout: match self.unpack_timeout_secs {
                0 => defaults.timeout,
                secs => Duration::from_secs(secs),
            },
        }
    }
}
