//! Retro regens files: picking the right `.edt` out of a mod pack and
//! placing it as `support_staff.edt` under the game's versioned db folder.

pub mod installer;
pub mod matcher;
pub mod template;

pub use installer::{install_regens, remove_regens};
pub use matcher::{extract_version, select_regens_file, RegensMatch};
pub use template::{apply_version, RegensPathPreset, GAME_VERSION_PLACEHOLDER};

/// Name every installed regens file is copied to.
pub const TARGET_FILE_NAME: &str = "support_staff.edt";
pub const REGENS_EXTENSION: &str = ".edt";

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod matcher_tests;

#[cfg(test)]
#[path = "tests/template_tests.rs"]
mod template_tests;

#[cfg(test)]
#[path = "tests/installer_tests.rs"]
mod installer_tests;
