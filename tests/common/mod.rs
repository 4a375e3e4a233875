#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

pub struct TestContext {
    _tmp: TempDir,
    pub root: PathBuf,
    pub game: PathBuf,
    pub mod_dir: PathBuf,
    pub restore: PathBuf,
}

pub fn init_test_game(edition: &str) -> TestContext {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

    let tmp = TempDir::new().expect("Failed to create temp dir");
    let root = tmp.path().to_path_buf();
    let game_root = format!("Football Manager {edition}");

    let game = root.join("games").join(&game_root);
    write(&game.join("data").join("db.dat"), b"original db");
    write(&game.join("shaders").join("main.fx"), b"shader");

    let mod_dir = root.join("downloads").join("RetroPack");
    write(&mod_dir.join(&game_root).join("data").join("db.dat"), b"retro db");
    write(&mod_dir.join(&game_root).join("logos.pkg"), b"logos");
    write(
        &mod_dir.join(format!("db_random_pa_{edition}.edt")),
        b"random regens",
    );

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

pub fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(dir).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn write(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
