use crate::types::errors::{ModError, ModResult, TransferFailure};
use serde::Serialize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Tries to rename a file or directory using `std::fs::rename`.
/// If it fails (likely due to cross-device link errors), it falls back
/// to using `fs_extra` to copy and remove the original.
pub fn rename_cross_drive_fallback(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::rename(from, to) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::warn!(
                "fs::rename failed (cross-device?): {}. Attempting fallback move...",
                e
            );

            if !from.exists() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Source path does not exist",
                ));
            }

            if to.exists() {
                return Err(e); // Propagate the original error (e.g., AlreadyExists)
            }

            if let Some(parent) = to.parent() {
                fs::create_dir_all(parent)?;
            }

            if from.is_dir() {
                let mut options = fs_extra::dir::CopyOptions::new();
                options.copy_inside = true;

                fs_extra::dir::move_dir(from, to, &options)
                    .map(|_| ())
                    .map_err(|err| std::io::Error::other(err.to_string()))
            } else {
                let mut options = fs_extra::file::CopyOptions::new();
                options.overwrite = false;

                fs_extra::file::move_file(from, to, &options)
                    .map(|_| ())
                    .map_err(|err| std::io::Error::other(err.to_string()))
            }
        }
    }
}

/// Progress of a running transfer: files copied so far out of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransferProgress {
    pub copied: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub files_copied: usize,
    pub dirs_created: usize,
    pub bytes_copied: u64,
}

/// Copy everything inside `from` into `to`, creating `to` if needed.
///
/// Walks the whole tree even when entries fail; every failure is collected
/// and reported together as `ModError::TransferFailed`.
pub fn transfer(
    from: &Path,
    to: &Path,
    on_progress: Option<&dyn Fn(TransferProgress)>,
) -> ModResult<TransferReport> {
    if !from.is_dir() {
        return Err(ModError::io(
            format!("Transfer source is not a directory: {}", from.display()),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    }

    fs::create_dir_all(to)
        .map_err(|e| ModError::io(format!("Failed to create {}", to.display()), e))?;

    let mut failures = Vec::new();
    let mut entries = Vec::new();
    for entry in WalkDir::new(from).min_depth(1) {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(e) => failures.push(TransferFailure {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| from.to_path_buf()),
                reason: e.to_string(),
            }),
        }
    }

    let total = entries.iter().filter(|e| !e.file_type().is_dir()).count();
    let mut report = TransferReport::default();

    for entry in entries {
        let Ok(relative) = entry.path().strip_prefix(from) else {
            continue;
        };
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            match fs::create_dir_all(&target) {
                Ok(()) => report.dirs_created += 1,
                Err(e) => failures.push(TransferFailure {
                    path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                }),
            }
            continue;
        }

        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                failures.push(TransferFailure {
                    path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        }

        match fs::copy(entry.path(), &target) {
            Ok(bytes) => {
                report.files_copied += 1;
                report.bytes_copied += bytes;
                if let Some(callback) = on_progress {
                    callback(TransferProgress {
                        copied: report.files_copied,
                        total,
                    });
                }
            }
            Err(e) => failures.push(TransferFailure {
                path: entry.path().to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }

    if !failures.is_empty() {
        for failure in &failures {
            log::error!(
                "Transfer failed for {}: {}",
                failure.path.display(),
                failure.reason
            );
        }
        return Err(ModError::TransferFailed {
            to: to.display().to_string(),
            failures,
        });
    }

    log::debug!(
        "Transferred {} file(s), {} bytes: {} -> {}",
        report.files_copied,
        report.bytes_copied,
        from.display(),
        to.display()
    );
    Ok(report)
}
