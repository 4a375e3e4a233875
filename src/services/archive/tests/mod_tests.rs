use super::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper: create a minimal valid ZIP.
fn create_test_zip(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let zip_path = dir.join(name);
    let file = fs::File::create(&zip_path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for (entry_name, content) in files {
        writer.start_file(entry_name.to_string(), options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
    zip_path
}

#[test]
fn test_format_detection() {
    assert_eq!(
        ArchiveFormat::from_path(Path::new("mod.zip")),
        Some(ArchiveFormat::Zip)
    );
    assert_eq!(
        ArchiveFormat::from_path(Path::new("mod.7Z")),
        Some(ArchiveFormat::SevenZ)
    );
    assert_eq!(
        ArchiveFormat::from_path(Path::new("mod.RAR")),
        Some(ArchiveFormat::Rar)
    );
    assert_eq!(ArchiveFormat::from_path(Path::new("mod.txt")), None);
}

#[test]
fn test_extract_zip_next_to_archive() {
    let dir = TempDir::new().unwrap();
    let zip_path = create_test_zip(
        dir.path(),
        "FM24 Retro.zip",
        &[
            ("Football Manager 2024/data/db.dat", b"database"),
            ("db_fixed_pa_2024.edt", b"regens"),
        ],
    );

    let progress = UnpackProgress::new();
    progress.begin("key");
    let result = extract_archive(&zip_path, &progress, "key").unwrap();

    assert_eq!(result.format, ArchiveFormat::Zip);
    assert_eq!(result.files_extracted, 2);
    assert_eq!(result.dest_path, dir.path().join("FM24 Retro"));
    assert!(result
        .dest_path
        .join("Football Manager 2024/data/db.dat")
        .exists());
    assert!(result.dest_path.join("db_fixed_pa_2024.edt").exists());
    // Archive itself stays where it was
    assert!(zip_path.exists());
}

#[test]
fn test_extract_flattens_same_named_wrapper() {
    let dir = TempDir::new().unwrap();
    let zip_path = create_test_zip(
        dir.path(),
        "retro.zip",
        &[
            ("retro/Football Manager 2024/a.txt", b"a"),
            ("retro/db_random_pa_2024.edt", b"r"),
        ],
    );

    let progress = UnpackProgress::new();
    let result = extract_archive(&zip_path, &progress, "key").unwrap();

    let dest = dir.path().join("retro");
    assert_eq!(result.dest_path, dest);
    assert!(dest.join("Football Manager 2024").join("a.txt").exists());
    assert!(dest.join("db_random_pa_2024.edt").exists());
    assert!(!dest.join("retro").exists());
}

#[test]
fn test_re_extract_replaces_previous_unpack() {
    let dir = TempDir::new().unwrap();
    create_test_zip(
        dir.path(),
        "retro.zip",
        &[
            ("retro/Football Manager 2024/db.dat", b"v1"),
            ("retro/Football Manager 2024/old.cfg", b"old"),
        ],
    );
    let progress = UnpackProgress::new();
    extract_archive(&dir.path().join("retro.zip"), &progress, "key").unwrap();

    // Updated download under the same name, one file dropped
    let zip_path = create_test_zip(
        dir.path(),
        "retro.zip",
        &[("retro/Football Manager 2024/db.dat", b"v2")],
    );
    let result = extract_archive(&zip_path, &progress, "key").unwrap();

    let game_root = result.dest_path.join("Football Manager 2024");
    assert_eq!(fs::read(game_root.join("db.dat")).unwrap(), b"v2");
    assert!(!game_root.join("old.cfg").exists());
    assert!(!result.dest_path.join("retro").exists());
}

#[test]
fn test_extract_keeps_single_game_folder() {
    let dir = TempDir::new().unwrap();
    let zip_path = create_test_zip(
        dir.path(),
        "pack.zip",
        &[("Football Manager 2024/a.txt", b"a")],
    );

    let progress = UnpackProgress::new();
    let result = extract_archive(&zip_path, &progress, "key").unwrap();

    assert!(result
        .dest_path
        .join("Football Manager 2024")
        .join("a.txt")
        .exists());
}

#[test]
fn test_extract_clears_progress_entry() {
    let dir = TempDir::new().unwrap();
    let zip_path = create_test_zip(dir.path(), "pack.zip", &[("a.txt", b"abc")]);

    let progress = UnpackProgress::new();
    progress.begin("key");
    assert_eq!(progress.query("key").unwrap(), Some((0, 0)));

    extract_archive(&zip_path, &progress, "key").unwrap();
    assert_eq!(progress.query("key").unwrap(), None);
}

#[test]
fn test_extract_corrupt_archive_clears_progress() {
    let dir = TempDir::new().unwrap();
    let zip_path = dir.path().join("corrupt.zip");
    fs::write(&zip_path, b"not a real zip file").unwrap();

    let progress = UnpackProgress::new();
    progress.begin("key");
    let result = extract_archive(&zip_path, &progress, "key");

    assert!(matches!(result, Err(crate::types::errors::ModError::Unpack(_))));
    assert_eq!(progress.query("key").unwrap(), None);
}

#[test]
fn test_progress_reports_in_flight_until_total_reached() {
    let progress = UnpackProgress::new();
    progress.begin("a");
    progress.set_total("a", 10);
    progress.advance("a", 4);
    assert_eq!(progress.query("a").unwrap(), Some((4, 10)));

    progress.advance("a", 6);
    assert_eq!(progress.query("a").unwrap(), None);

    // Unknown keys read as complete
    assert_eq!(progress.query("never-started").unwrap(), None);
}

#[test]
fn test_progress_trackers_are_independent() {
    let first = UnpackProgress::new();
    let second = UnpackProgress::new();
    first.begin("same.zip");

    assert_eq!(first.query("same.zip").unwrap(), Some((0, 0)));
    assert_eq!(second.query("same.zip").unwrap(), None);
}
