use super::errors::ModError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const INSTALL_MOD_LABEL: &str = "Install Mod";
pub const UNINSTALL_MOD_LABEL: &str = "Uninstall Mod";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModAction {
    #[serde(rename = "Install Mod", alias = "install")]
    Install,
    #[serde(rename = "Uninstall Mod", alias = "uninstall")]
    Uninstall,
}

impl ModAction {
    pub fn label(self) -> &'static str {
        match self {
            ModAction::Install => INSTALL_MOD_LABEL,
            ModAction::Uninstall => UNINSTALL_MOD_LABEL,
        }
    }
}

impl fmt::Display for ModAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModAction {
    type Err = ModError;

    /// Accepts the UI labels ("Install Mod") and the short forms ("install").
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "install mod" | "install" => Ok(ModAction::Install),
            "uninstall mod" | "uninstall" => Ok(ModAction::Uninstall),
            _ => Err(ModError::UnknownAction(raw.to_string())),
        }
    }
}

/// Input record for one install or uninstall run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModProcessingOptions {
    pub action: ModAction,
    /// Four digit year of the game release, e.g. "2024".
    pub edition: String,
    /// Archive or unpacked mod directory. Install only.
    #[serde(default)]
    pub mod_file: Option<PathBuf>,
    pub game_folder: PathBuf,
    /// Where the live folder is exported before restoring. Uninstall only.
    #[serde(default)]
    pub restore_folder: Option<PathBuf>,
    /// Target path template, may contain `${gameVersion}`.
    #[serde(default)]
    pub retro_regens_folder: Option<PathBuf>,
    #[serde(default)]
    pub regens_type: Option<String>,
}

impl ModProcessingOptions {
    pub fn mod_file(&self) -> Option<&Path> {
        non_empty_path(self.mod_file.as_deref())
    }

    pub fn restore_folder(&self) -> Option<&Path> {
        non_empty_path(self.restore_folder.as_deref())
    }

    pub fn retro_regens_folder(&self) -> Option<&Path> {
        non_empty_path(self.retro_regens_folder.as_deref())
    }

    pub fn regens_type(&self) -> Option<&str> {
        self.regens_type
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

fn non_empty_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

/// Returns true for a four digit year such as "2024".
pub fn is_valid_edition(edition: &str) -> bool {
    edition.len() == 4 && edition.chars().all(|c| c.is_ascii_digit())
}

/// Summary of a finished install or uninstall.
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    pub action: ModAction,
    pub game_folder: PathBuf,
    pub backup_folder: PathBuf,
    pub backup_created: bool,
    pub backup_restored: bool,
    pub unpacked_dir: Option<PathBuf>,
    pub regens_installed: Option<PathBuf>,
    pub regens_removed: Vec<PathBuf>,
    pub files_transferred: usize,
    pub finished_at: DateTime<Utc>,
}

impl OperationReport {
    pub fn new(action: ModAction, game_folder: PathBuf, backup_folder: PathBuf) -> Self {
        Self {
            action,
            game_folder,
            backup_folder,
            backup_created: false,
            backup_restored: false,
            unpacked_dir: None,
            regens_installed: None,
            regens_removed: Vec::new(),
            files_transferred: 0,
            finished_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[path = "tests/mod_options_tests.rs"]
mod tests;
