//! Rename-based snapshot of the game folder.
//!
//! Install moves `Football Manager 2024` aside to `Football Manager 2024_backup`
//! and fills a fresh folder with the mod. Uninstall exports whatever is live
//! to the restore folder, then copies the snapshot back and deletes it.
//! The backup name is always derived, never stored.

use crate::services::fs_utils::file_utils::{rename_cross_drive_fallback, transfer, TransferReport};
use crate::types::errors::{ModError, ModResult};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const BACKUP_SUFFIX: &str = "_backup";

/// Sibling of `game_folder` whose name has `edition` replaced by
/// `<edition>_backup`.
///
/// Only the folder's own name is rewritten. If it does not contain the
/// edition the backup would collide with the live folder, so this fails
/// with `InvalidEdition` instead.
pub fn backup_name(game_folder: &Path, edition: &str) -> ModResult<PathBuf> {
    let invalid = || ModError::InvalidEdition {
        edition: edition.to_string(),
        game_folder: game_folder.display().to_string(),
    };

    if edition.is_empty() {
        return Err(invalid());
    }
    let name = game_folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(invalid)?;
    if !name.contains(edition) {
        return Err(invalid());
    }

    let renamed = name.replacen(edition, &format!("{edition}{BACKUP_SUFFIX}"), 1);
    Ok(game_folder.with_file_name(renamed))
}

/// Move `game_folder` aside to its backup name.
pub fn create_backup(game_folder: &Path, edition: &str) -> ModResult<PathBuf> {
    let backup = backup_name(game_folder, edition)?;
    if backup.exists() {
        return Err(ModError::BackupExists(backup.display().to_string()));
    }

    log::info!("Creating backup folder: {}", backup.display());
    rename_cross_drive_fallback(game_folder, &backup).map_err(|e| {
        ModError::io(
            format!(
                "Failed to move {} to {}",
                game_folder.display(),
                backup.display()
            ),
            e,
        )
    })?;
    Ok(backup)
}

/// Create an empty game folder after the original has been moved aside.
pub fn replace_game_folder(game_folder: &Path) -> ModResult<()> {
    fs::create_dir_all(game_folder).map_err(|e| {
        ModError::io(format!("Failed to create {}", game_folder.display()), e)
    })?;
    log::info!("New game folder created");
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RestoreOutcome {
    /// Nothing was ever installed; the game folder was not touched.
    NoBackup,
    Restored {
        /// What was copied out of the live folder, if it existed.
        exported: Option<TransferReport>,
        restored: TransferReport,
    },
}

/// Put the snapshot back in place of the live game folder.
///
/// The live folder is exported to `restore_folder` before it is deleted,
/// and the backup is removed only after it has been copied back. A restore
/// folder inside the live folder is rejected before anything moves.
pub fn restore_from_backup(
    game_folder: &Path,
    edition: &str,
    restore_folder: &Path,
) -> ModResult<RestoreOutcome> {
    let backup = backup_name(game_folder, edition)?;

    if !backup.is_dir() {
        log::info!("No backup folder found, cannot uninstall");
        return Ok(RestoreOutcome::NoBackup);
    }
    log::info!("Backup folder found: {}", backup.display());

    let exported = if game_folder.is_dir() {
        if is_within(restore_folder, game_folder) {
            return Err(ModError::MissingInput(format!(
                "Restore folder {} must be outside the game folder {}",
                restore_folder.display(),
                game_folder.display()
            )));
        }
        let report = transfer(game_folder, restore_folder, None)?;
        log::info!(
            "Mod contents transferred to restore folder: {}",
            restore_folder.display()
        );

        remove_dir(game_folder)?;
        log::info!("Current mod folder removed");
        Some(report)
    } else {
        None
    };

    replace_game_folder(game_folder)?;

    let restored = transfer(&backup, game_folder, None)?;
    log::info!("Backup contents transferred to game folder");

    remove_dir(&backup)?;
    log::info!("Backup folder removed");

    Ok(RestoreOutcome::Restored { exported, restored })
}

/// True when `path` is `root` or lies under it. Both are canonicalized when
/// they exist so `..` segments and symlinks cannot hide the overlap.
fn is_within(path: &Path, root: &Path) -> bool {
    let path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    path.starts_with(&root)
}

fn remove_dir(path: &Path) -> ModResult<()> {
    fs::remove_dir_all(path)
        .map_err(|e| ModError::io(format!("Failed to remove {}", path.display()), e))
}

#[cfg(test)]
#[path = "tests/backup_tests.rs"]
mod tests;
