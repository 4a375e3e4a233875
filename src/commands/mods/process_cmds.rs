use crate::services::core::operation_lock::OperationLock;
use crate::services::installer::{self, ProcessContext};
use crate::types::errors::{CommandError, CommandResult};
use crate::types::mod_options::{
    is_valid_edition, ModAction, ModProcessingOptions, OperationReport,
};
use serde::Deserialize;
use std::path::PathBuf;

/// Raw request as submitted by a front end. Strings are validated here
/// before anything touches the filesystem.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModRequest {
    pub action: String,
    pub edition: String,
    #[serde(default)]
    pub mod_file: Option<String>,
    pub game_folder: String,
    #[serde(default)]
    pub restore_folder: Option<String>,
    #[serde(default)]
    pub retro_regens_folder: Option<String>,
    #[serde(default)]
    pub regens_type: Option<String>,
}

impl ModRequest {
    pub fn into_options(self) -> CommandResult<ModProcessingOptions> {
        let action: ModAction = self.action.parse()?;

        let edition = self.edition.trim().to_string();
        if !is_valid_edition(&edition) {
            return Err(CommandError::Validation(format!(
                "Edition must be a four digit year, got '{}'",
                self.edition
            )));
        }

        let game_folder = self.game_folder.trim();
        if game_folder.is_empty() {
            return Err(CommandError::Validation(
                "Game folder is required".to_string(),
            ));
        }

        Ok(ModProcessingOptions {
            action,
            edition,
            mod_file: optional_path(self.mod_file),
            game_folder: PathBuf::from(game_folder),
            restore_folder: optional_path(self.restore_folder),
            retro_regens_folder: optional_path(self.retro_regens_folder),
            regens_type: self
                .regens_type
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        })
    }
}

fn optional_path(raw: Option<String>) -> Option<PathBuf> {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Validate the request, take the operation lock and run install/uninstall.
pub async fn process_mod_cmd(
    lock: &OperationLock,
    request: ModRequest,
    ctx: &ProcessContext,
) -> CommandResult<OperationReport> {
    let options = request.into_options()?;
    let _guard = lock.acquire().await?;

    installer::process(&options, ctx)
        .await
        .map_err(CommandError::from)
}

#[cfg(test)]
#[path = "tests/process_cmds_tests.rs"]
mod tests;
