use std::path::{Path, PathBuf};

/// Extensions recognised as mod archives, lower-case, without the dot.
pub const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z"];

/// Render a path with forward slashes only.
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Strip a single trailing `/` or `\`. A bare root separator is kept.
pub fn strip_trailing_separator(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix(['/', '\\']).unwrap_or(path)
    } else {
        path
    }
}

/// Parent directory of `path`, joined back with forward slashes.
pub fn parent_directory(path: &str) -> String {
    let clean = strip_trailing_separator(path);
    let mut parts: Vec<&str> = clean.split(['/', '\\']).collect();
    parts.pop();
    parts.join("/")
}

/// Last component of `path`, ignoring a trailing separator.
pub fn base_name(path: &str) -> &str {
    let clean = strip_trailing_separator(path);
    clean.rsplit(['/', '\\']).next().unwrap_or(clean)
}

/// Returns the archive extension (lower-case) if `name` ends with one we handle.
pub fn archive_extension(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.to_lowercase();
    ARCHIVE_EXTENSIONS.iter().copied().find(|known| *known == ext)
}

/// Drop a recognised archive extension from a file name, case-insensitively.
pub fn strip_archive_extension(name: &str) -> &str {
    match archive_extension(name) {
        Some(ext) => &name[..name.len() - ext.len() - 1],
        None => name,
    }
}

/// Directory an archive is expected to unpack into: a sibling sharing its
/// base name minus the archive extension.
pub fn unpacked_dir_for(archive_path: &Path) -> PathBuf {
    let raw = to_forward_slashes(archive_path);
    let parent = parent_directory(&raw);
    let stem = strip_archive_extension(base_name(&raw));
    if parent.is_empty() && !raw.starts_with('/') {
        PathBuf::from(stem)
    } else {
        PathBuf::from(format!("{parent}/{stem}"))
    }
}

pub fn is_archive_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(archive_extension)
        .is_some()
}
