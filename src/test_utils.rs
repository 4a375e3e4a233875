use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

/// A throwaway game install plus an unpacked mod pack for the same edition.
pub struct TestContext {
    _tmp: TempDir,
    pub root: PathBuf,
    pub game: PathBuf,
    pub mod_dir: PathBuf,
    pub restore: PathBuf,
}

impl TestContext {
    pub fn backup(&self) -> PathBuf {
        self.game.with_file_name("Football Manager 2024_backup")
    }
}

/// Layout (edition 2024):
///
/// ```text
/// Steam/Football Manager 2024/{fm.exe, data/db.dat}
/// downloads/Retro/Football Manager 2024/{retro.cfg, data/db.dat}
/// downloads/Retro/db_{fixed,random}_pa_2024.edt
/// restore/
/// ```
pub fn init_test_game() -> TestContext {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

    let tmp = TempDir::new().expect("Failed to create temp dir");
    let root = tmp.path().to_path_buf();

    let game = root.join("Steam").join("Football Manager 2024");
    write(&game.join("data").join("db.dat"), b"original db");
    write(&game.join("fm.exe"), b"exe");

    let mod_dir = root.join("downloads").join("Retro");
    let mod_root = mod_dir.join("Football Manager 2024");
    write(&mod_root.join("data").join("db.dat"), b"retro db");
    write(&mod_root.join("retro.cfg"), b"cfg");
    write(&mod_dir.join("db_fixed_pa_2024.edt"), b"fixed");
    write(&mod_dir.join("db_random_pa_2024.edt"), b"random");

    let restore = root.join("restore");
    fs::create_dir_all(&restore).expect("Failed to create restore dir");

    TestContext {
        _tmp: tmp,
        root,
        game,
        mod_dir,
        restore,
    }
}

/// Relative path -> contents for every file under `dir`.
pub fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(dir)
                .expect("walked path is under root")
                .to_path_buf();
            (rel, fs::read(e.path()).expect("Failed to read file"))
        })
        .collect()
}

fn write(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, contents).expect("Failed to write fixture file");
}
