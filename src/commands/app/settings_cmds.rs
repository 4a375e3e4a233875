use crate::services::config::{AppSettings, ConfigService};
use crate::services::regens::RegensPathPreset;
use crate::types::errors::{CommandError, CommandResult};
use crate::types::mod_options::is_valid_edition;
use serde::Serialize;

pub fn get_settings_cmd(state: &ConfigService) -> CommandResult<AppSettings> {
    Ok(state.get_settings())
}

pub fn save_settings_cmd(state: &ConfigService, settings: AppSettings) -> CommandResult<()> {
    if !is_valid_edition(settings.edition.trim()) {
        return Err(CommandError::Validation(format!(
            "Edition must be a four digit year, got '{}'",
            settings.edition
        )));
    }
    state.save_settings(settings).map_err(CommandError::Io)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegensPresetInfo {
    pub preset: RegensPathPreset,
    pub template: String,
}

/// Retro regens folder templates for `edition`, one per known install layout.
pub fn retro_regens_presets_cmd(edition: &str) -> CommandResult<Vec<RegensPresetInfo>> {
    let edition = edition.trim();
    if !is_valid_edition(edition) {
        return Err(CommandError::Validation(format!(
            "Edition must be a four digit year, got '{edition}'"
        )));
    }

    Ok(RegensPathPreset::ALL
        .iter()
        .map(|preset| RegensPresetInfo {
            preset: *preset,
            template: preset.template(edition),
        })
        .collect())
}

#[cfg(test)]
#[path = "tests/settings_cmds_tests.rs"]
mod tests;
