use super::progress::{ProgressGuard, UnpackProgress};
use super::types::{ArchiveFormat, ExtractionResult};
use crate::services::fs_utils::path_utils::unpacked_dir_for;
use crate::types::errors::{ModError, ModResult};
use std::fs;
use std::io;
use std::path::Path;

/// Extract a mod archive next to itself.
///
/// Steps:
/// 1. Recreate the destination folder empty (archive name sans extension,
///    same parent), so a re-download never mixes with an earlier unpack
/// 2. Extract all entries, reporting bytes into `progress` under `key`
/// 3. Flatten a wrapper folder that repeats the destination's own name
///
/// The progress entry for `key` is cleared when this returns, whatever the
/// outcome.
pub fn extract_archive(
    archive_path: &Path,
    progress: &UnpackProgress,
    key: &str,
) -> ModResult<ExtractionResult> {
    let _guard = ProgressGuard::new(progress, key);

    let format = ArchiveFormat::from_path(archive_path)
        .ok_or_else(|| ModError::UnsupportedArchive(archive_path.display().to_string()))?;

    let dest_path = unpacked_dir_for(archive_path);
    clear_destination(&dest_path)?;

    fs::create_dir_all(&dest_path).map_err(|e| {
        ModError::io(format!("Failed to create destination {}", dest_path.display()), e)
    })?;

    let files_extracted = match format {
        ArchiveFormat::Zip => extract_zip_inner(archive_path, &dest_path, progress, key)?,
        ArchiveFormat::SevenZ => extract_7z_inner(archive_path, &dest_path, progress, key)?,
        ArchiveFormat::Rar => extract_rar_inner(archive_path, &dest_path, progress, key)?,
    };

    if let Err(e) = flatten_same_named_wrapper(&dest_path) {
        log::warn!("Wrapper flattening failed (non-fatal): {e}");
    }

    log::info!(
        "Extracted {} file(s) from {} into {}",
        files_extracted,
        archive_path.display(),
        dest_path.display()
    );

    Ok(ExtractionResult {
        format,
        dest_path,
        files_extracted,
    })
}

fn extract_zip_inner(
    archive_path: &Path,
    dest_path: &Path,
    progress: &UnpackProgress,
    key: &str,
) -> ModResult<usize> {
    let file = fs::File::open(archive_path)
        .map_err(|e| ModError::io(format!("Failed to open archive {}", archive_path.display()), e))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| ModError::Unpack(format!("Invalid or corrupt ZIP: {e}")))?;

    let total: u64 = (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|entry| entry.size()))
        .sum();
    progress.set_total(key, total);

    let mut count: usize = 0;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| ModError::Unpack(format!("Failed to read entry {i}: {e}")))?;

        let entry_path = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => continue, // Skip unsafe paths
        };

        let output_path = dest_path.join(&entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&output_path)
                .map_err(|e| ModError::io("Failed to create dir", e))?;
        } else {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| ModError::io("Failed to create parent", e))?;
            }
            let mut outfile = fs::File::create(&output_path).map_err(|e| {
                ModError::io(format!("Failed to create file {}", output_path.display()), e)
            })?;
            let written = io::copy(&mut entry, &mut outfile).map_err(|e| {
                ModError::io(format!("Failed to write file {}", output_path.display()), e)
            })?;
            progress.advance(key, written);
            count += 1;
        }
    }
    Ok(count)
}

fn extract_7z_inner(
    archive_path: &Path,
    dest_path: &Path,
    progress: &UnpackProgress,
    key: &str,
) -> ModResult<usize> {
    progress.set_total(key, 1);
    sevenz_rust::decompress_file(archive_path, dest_path)
        .map_err(|e| ModError::Unpack(format!("Failed to extract 7z: {e}")))?;
    progress.advance(key, 1);

    Ok(count_files(dest_path))
}

fn extract_rar_inner(
    archive_path: &Path,
    dest_path: &Path,
    progress: &UnpackProgress,
    key: &str,
) -> ModResult<usize> {
    let path_str = archive_path
        .to_str()
        .ok_or_else(|| ModError::Unpack("RAR path contains invalid UTF-8".to_string()))?;
    let dest_str = dest_path
        .to_str()
        .ok_or_else(|| ModError::Unpack("Dest path contains invalid UTF-8".to_string()))?;

    progress.set_total(key, 1);
    rar::Archive::extract_all(path_str, dest_str, "")
        .map_err(|e| ModError::Unpack(format!("Failed to extract RAR: {e:?}")))?;
    progress.advance(key, 1);

    Ok(count_files(dest_path))
}

fn count_files(dest_path: &Path) -> usize {
    walkdir::WalkDir::new(dest_path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .count()
}

/// Remove whatever an earlier unpack left at `dest_path`.
fn clear_destination(dest_path: &Path) -> ModResult<()> {
    let result = if dest_path.is_dir() {
        fs::remove_dir_all(dest_path)
    } else if dest_path.exists() {
        fs::remove_file(dest_path)
    } else {
        return Ok(());
    };
    log::info!("Replacing previous unpack at {}", dest_path.display());
    result.map_err(|e| {
        ModError::io(format!("Failed to clear destination {}", dest_path.display()), e)
    })
}

/// Archives packed as `Name.zip -> Name/...` would otherwise unpack to
/// `Name/Name/...`. When the destination holds exactly one folder carrying
/// the destination's own name, move its contents up and drop the wrapper.
///
/// Any other single folder (e.g. `Football Manager 2024`) is left alone.
pub fn flatten_same_named_wrapper(dest_path: &Path) -> ModResult<()> {
    let entries: Vec<_> = fs::read_dir(dest_path)
        .map_err(|e| ModError::io("Failed to read dest", e))?
        .filter_map(|e| e.ok())
        .collect();

    if entries.len() != 1 {
        return Ok(());
    }

    let wrapper_path = entries[0].path();
    if !wrapper_path.is_dir() || wrapper_path.file_name() != dest_path.file_name() {
        return Ok(());
    }

    let wrapper_children: Vec<_> = fs::read_dir(&wrapper_path)
        .map_err(|e| ModError::io("Failed to read wrapper", e))?
        .filter_map(|e| e.ok())
        .collect();

    for child in wrapper_children {
        let child_name = child.file_name();
        let new_location = dest_path.join(&child_name);

        if new_location.exists() {
            log::warn!(
                "Skip flatten: {} already exists at destination",
                child_name.to_string_lossy()
            );
            continue;
        }

        fs::rename(child.path(), &new_location).map_err(|e| {
            ModError::io(format!("Failed to move {}", child_name.to_string_lossy()), e)
        })?;
    }

    // Remove empty wrapper
    if fs::read_dir(&wrapper_path)
        .map(|mut d| d.next().is_none())
        .unwrap_or(false)
    {
        if let Err(e) = fs::remove_dir(&wrapper_path) {
            log::warn!(
                "Failed to remove empty wrapper {}: {e}",
                wrapper_path.display()
            );
        }
    }

    Ok(())
}
