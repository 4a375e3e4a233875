use super::{run_blocking, ProcessContext};
use crate::services::archive::unpack_and_await;
use crate::services::backup::{backup_name, create_backup, replace_game_folder};
use crate::services::fs_utils::file_utils::transfer;
use crate::services::fs_utils::path_utils::is_archive_path;
use crate::services::regens::install_regens;
use crate::types::errors::{ModError, ModResult};
use crate::types::mod_options::{ModAction, ModProcessingOptions, OperationReport};
use chrono::Utc;
use std::path::PathBuf;

/// Folder inside a mod pack that mirrors the game installation.
pub fn game_root_name(edition: &str) -> String {
    format!("Football Manager {edition}")
}

/// Install a mod pack over the live game folder.
///
/// 1. Unpack `mod_file` first if it is an archive
/// 2. Check `<mod>/Football Manager <edition>` and the game folder exist
/// 3. Move the game folder aside and recreate it empty
/// 4. Copy the mod's game root in
/// 5. Place the regens file when a regens type and target are given
pub async fn install_mod(
    options: &ModProcessingOptions,
    ctx: &ProcessContext,
) -> ModResult<OperationReport> {
    let mod_file = options
        .mod_file()
        .ok_or_else(|| {
            ModError::MissingInput("Mod file is required for install operation".to_string())
        })?
        .to_path_buf();
    if options.game_folder.as_os_str().is_empty() {
        return Err(ModError::MissingInput(
            "Game folder is required for install operation".to_string(),
        ));
    }

    let edition = options.edition.clone();
    let game_folder = options.game_folder.clone();
    // Validates the edition against the folder name before anything moves.
    let backup = backup_name(&game_folder, &edition)?;
    let mut report = OperationReport::new(ModAction::Install, game_folder.clone(), backup);

    let mod_dir: PathBuf = if mod_file.is_file() && is_archive_path(&mod_file) {
        let unpacked = unpack_and_await(&mod_file, &ctx.poll, &ctx.cancel).await?;
        report.unpacked_dir = Some(unpacked.clone());
        unpacked
    } else {
        mod_file
    };

    let mod_root = mod_dir.join(game_root_name(&edition));
    if !mod_root.is_dir() {
        return Err(ModError::SourceNotFound(mod_root.display().to_string()));
    }

    if !game_folder.is_dir() {
        return Err(ModError::TargetNotFound(game_folder.display().to_string()));
    }
    log::info!("Game location to install mod exists: {}", game_folder.display());

    {
        let game_folder = game_folder.clone();
        let edition = edition.clone();
        run_blocking(move || {
            create_backup(&game_folder, &edition)?;
            replace_game_folder(&game_folder)
        })
        .await?;
    }
    report.backup_created = true;

    let transferred = {
        let game_folder = game_folder.clone();
        let on_transfer = ctx.on_transfer.clone();
        run_blocking(move || match on_transfer {
            Some(callback) => transfer(&mod_root, &game_folder, Some(&*callback)),
            None => transfer(&mod_root, &game_folder, None),
        })
        .await?
    };
    report.files_transferred = transferred.files_copied;
    log::info!("Game mod files transferred successfully!");

    match (options.regens_type(), options.retro_regens_folder()) {
        (Some(regens_type), Some(template)) => {
            let regens_type = regens_type.to_string();
            let template = template.to_path_buf();
            let installed =
                run_blocking(move || install_regens(&mod_dir, &regens_type, &template)).await?;
            report.regens_installed = Some(installed);
        }
        _ => log::debug!("No regens type or retro regens folder selected; skipping regens"),
    }

    report.finished_at = Utc::now();
    Ok(report)
}
