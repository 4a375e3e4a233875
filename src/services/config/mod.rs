pub mod models;

pub use models::*;

use directories::BaseDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const APP_DIR_NAME: &str = "fm-workshop";
const CONFIG_FILE_NAME: &str = "config.json";

/// JSON-backed settings store. Reads once at construction, writes through on save.
pub struct ConfigService {
    path: PathBuf,
    settings: Mutex<AppSettings>,
}

impl ConfigService {
    /// Load settings from `path`. A missing or unreadable file yields defaults.
    pub fn new(path: PathBuf) -> Self {
        let settings = Self::load(&path);
        Self {
            path,
            settings: Mutex::new(settings),
        }
    }

    /// `<data_local_dir>/fm-workshop/config.json`
    pub fn default_path() -> Result<PathBuf, String> {
        let base = BaseDirs::new().ok_or_else(|| "Failed to resolve home directory".to_string())?;
        Ok(base
            .data_local_dir()
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> AppSettings {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return AppSettings::default();
            }
            Err(e) => {
                log::error!("Failed to read config {}: {e}", path.display());
                return AppSettings::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid config {}, using defaults: {e}", path.display());
                AppSettings::default()
            }
        }
    }

    pub fn get_settings(&self) -> AppSettings {
        self.settings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn save_settings(&self, mut new_settings: AppSettings) -> Result<(), String> {
        new_settings.edition = new_settings.edition.trim().to_string();
        new_settings.regens_type = new_settings
            .regens_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let raw = serde_json::to_string_pretty(&new_settings).map_err(|e| e.to_string())?;
        write_atomic(&self.path, raw.as_bytes())?;

        *self
            .settings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = new_settings;
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the target.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), String> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .map_err(|e| format!("Failed to create config dir {}: {e}", parent.display()))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| CONFIG_FILE_NAME.to_string());
    let tmp_path = parent.join(format!(".{file_name}.tmp"));

    {
        let mut file = fs::File::create(&tmp_path)
            .map_err(|e| format!("Failed to create {}: {e}", tmp_path.display()))?;
        file.write_all(contents)
            .map_err(|e| format!("Failed to write {}: {e}", tmp_path.display()))?;
        file.sync_all()
            .map_err(|e| format!("Failed to flush {}: {e}", tmp_path.display()))?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(format!("Failed to replace {}: {e}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
