use serde::{Deserialize, Serialize};

pub const GAME_VERSION_PLACEHOLDER: &str = "${gameVersion}";

pub fn has_placeholder(template: &str) -> bool {
    template.contains(GAME_VERSION_PLACEHOLDER)
}

/// Replace every `${gameVersion}` in `template` with `version`.
pub fn apply_version(template: &str, version: &str) -> String {
    template.replace(GAME_VERSION_PLACEHOLDER, version)
}

/// Known install layouts for the retro regens folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegensPathPreset {
    SteamWindows,
    EpicGames,
    SteamMac,
}

impl RegensPathPreset {
    pub const ALL: [RegensPathPreset; 3] = [
        RegensPathPreset::SteamWindows,
        RegensPathPreset::EpicGames,
        RegensPathPreset::SteamMac,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RegensPathPreset::SteamWindows => "STEAM_WINDOWS",
            RegensPathPreset::EpicGames => "EPIC_GAMES",
            RegensPathPreset::SteamMac => "STEAM_MAC",
        }
    }

    /// Path template for `edition`, with the version left as a placeholder.
    pub fn template(self, edition: &str) -> String {
        match self {
            RegensPathPreset::SteamWindows => format!(
                "C:/Program Files (x86)/Steam/steamapps/common/Football Manager {edition}/data/database/db/{GAME_VERSION_PLACEHOLDER}/edt/permanent"
            ),
            RegensPathPreset::EpicGames => format!(
                "/Users/Shared/Epic Games/FootballManager{edition}/database/data/db/{GAME_VERSION_PLACEHOLDER}/edt/permanent"
            ),
            RegensPathPreset::SteamMac => format!(
                "Library/Application Support/Steam/steamapps/common/Football Manager {edition}/database/data/db/{GAME_VERSION_PLACEHOLDER}/edt/permanent"
            ),
        }
    }
}
