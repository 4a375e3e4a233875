use super::{run_blocking, ProcessContext};
use crate::services::backup::{backup_name, restore_from_backup, RestoreOutcome};
use crate::services::regens::remove_regens;
use crate::types::errors::{ModError, ModResult};
use crate::types::mod_options::{ModAction, ModProcessingOptions, OperationReport};
use chrono::Utc;

const RESTORE_FOLDER_REQUIRED: &str = "Restore folder is required for uninstall operation";

/// Undo an install: export the live folder, restore the backup, and remove
/// the installed regens file.
///
/// A missing backup is not an error; the game folder is left untouched.
pub async fn uninstall_mod(
    options: &ModProcessingOptions,
    _ctx: &ProcessContext,
) -> ModResult<OperationReport> {
    let restore_folder = options
        .restore_folder()
        .ok_or_else(|| ModError::MissingInput(RESTORE_FOLDER_REQUIRED.to_string()))?
        .to_path_buf();
    if !restore_folder.is_dir() {
        return Err(ModError::MissingInput(format!(
            "{RESTORE_FOLDER_REQUIRED}: {} is not a directory",
            restore_folder.display()
        )));
    }

    if options.game_folder.as_os_str().is_empty() {
        return Err(ModError::MissingInput(
            "Game folder is required for uninstall operation".to_string(),
        ));
    }

    let edition = options.edition.clone();
    let game_folder = options.game_folder.clone();
    let backup = backup_name(&game_folder, &edition)?;
    let mut report = OperationReport::new(ModAction::Uninstall, game_folder.clone(), backup);

    let outcome = run_blocking(move || restore_from_backup(&game_folder, &edition, &restore_folder))
        .await?;
    match outcome {
        RestoreOutcome::NoBackup => {
            log::info!("Nothing to restore for {}", report.game_folder.display());
        }
        RestoreOutcome::Restored { restored, .. } => {
            report.backup_restored = true;
            report.files_transferred = restored.files_copied;
        }
    }

    if let Some(template) = options.retro_regens_folder() {
        let template = template.to_path_buf();
        report.regens_removed = run_blocking(move || remove_regens(&template)).await?;
    }

    report.finished_at = Utc::now();
    Ok(report)
}
