use super::matcher::select_regens_file;
use super::template::{apply_version, has_placeholder, GAME_VERSION_PLACEHOLDER};
use super::TARGET_FILE_NAME;
use crate::services::fs_utils::path_utils::to_forward_slashes;
use crate::types::errors::{ModError, ModResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Copy the regens file for `regens_type` from `mod_dir` into the folder
/// described by `template`, as `support_staff.edt`.
///
/// Returns the path of the installed file.
pub fn install_regens(mod_dir: &Path, regens_type: &str, template: &Path) -> ModResult<PathBuf> {
    log::info!("Processing retro regens files ({regens_type})...");

    let file_names: Vec<String> = fs::read_dir(mod_dir)
        .map_err(|e| ModError::io(format!("Failed to read {}", mod_dir.display()), e))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();

    let selected = select_regens_file(file_names.iter().map(String::as_str), regens_type)?;
    let target_dir = resolve_target_dir(template, &selected.file_name, selected.version.as_deref())?;

    fs::create_dir_all(&target_dir).map_err(|e| {
        ModError::io(format!("Failed to create {}", target_dir.display()), e)
    })?;

    let source = mod_dir.join(&selected.file_name);
    let target = target_dir.join(TARGET_FILE_NAME);
    fs::copy(&source, &target).map_err(|e| {
        ModError::io(
            format!("Failed to copy {} to {}", source.display(), target.display()),
            e,
        )
    })?;

    log::info!("Processed {} -> {}", selected.file_name, target.display());
    Ok(target)
}

/// Target folder for a regens file. A template that needs a version fails
/// closed when the file name carried none.
fn resolve_target_dir(template: &Path, file_name: &str, version: Option<&str>) -> ModResult<PathBuf> {
    let raw = to_forward_slashes(template);
    if !has_placeholder(&raw) {
        return Ok(PathBuf::from(raw));
    }
    match version {
        Some(version) => Ok(PathBuf::from(apply_version(&raw, version))),
        None => Err(ModError::UnresolvedRegensVersion {
            file: file_name.to_string(),
            template: raw,
        }),
    }
}

/// Delete previously installed `support_staff.edt` files under `template`.
///
/// Without a placeholder the template is a plain folder. With one, every
/// existing folder that fits the template with a four digit version in
/// place of the placeholder is checked. Missing files are not an error.
pub fn remove_regens(template: &Path) -> ModResult<Vec<PathBuf>> {
    log::info!("Cleaning up retro regens files...");

    let raw = to_forward_slashes(template);
    let candidates = if has_placeholder(&raw) {
        expand_versioned_dirs(&raw)?
    } else {
        vec![PathBuf::from(raw)]
    };

    let mut removed = Vec::new();
    for dir in candidates {
        let file = dir.join(TARGET_FILE_NAME);
        match fs::remove_file(&file) {
            Ok(()) => {
                log::info!("Removed {}", file.display());
                removed.push(file);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No regens file at {}", file.display());
            }
            Err(e) => {
                return Err(ModError::io(
                    format!("Failed to remove {}", file.display()),
                    e,
                ))
            }
        }
    }

    if removed.is_empty() {
        log::info!("No retro regens files to clean up");
    }
    Ok(removed)
}

/// Existing folders matching a template such as `.../db/${gameVersion}/edt`.
fn expand_versioned_dirs(template: &str) -> ModResult<Vec<PathBuf>> {
    let Some(at) = template.find(GAME_VERSION_PLACEHOLDER) else {
        return Ok(vec![PathBuf::from(template)]);
    };

    let component_start = template[..at].rfind('/').map(|i| i + 1).unwrap_or(0);
    let after = at + GAME_VERSION_PLACEHOLDER.len();
    let component_end = template[after..]
        .find('/')
        .map(|i| after + i)
        .unwrap_or(template.len());

    let base = match &template[..component_start] {
        "" => ".",
        "/" => "/",
        other => other.trim_end_matches('/'),
    };
    let prefix = &template[component_start..at];
    let suffix = &template[after..component_end];
    let rest = &template[component_end..];

    let entries = match fs::read_dir(base) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("Regens base folder missing: {base}");
            return Ok(Vec::new());
        }
        Err(e) => return Err(ModError::io(format!("Failed to read {base}"), e)),
    };

    let mut dirs = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let Some(version) = name
            .strip_prefix(prefix)
            .and_then(|middle| middle.strip_suffix(suffix))
        else {
            continue;
        };
        if version.len() != 4 || !version.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let resolved_rest = apply_version(rest, version);
        dirs.push(entry.path().join(resolved_rest.trim_start_matches('/')));
    }
    dirs.sort();
    Ok(dirs)
}
