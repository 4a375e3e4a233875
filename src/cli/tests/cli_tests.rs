use super::dispatch::build_request;
use super::*;
use crate::services::config::{AppSettings, ConfigService};
use clap::Parser;
use std::path::PathBuf;

fn saved_settings() -> AppSettings {
    AppSettings {
        edition: "2023".to_string(),
        game_folder: Some(PathBuf::from("/games/Football Manager 2023")),
        restore_folder: Some(PathBuf::from("/restore")),
        retro_regens_folder: Some(PathBuf::from("/db/${gameVersion}/edt")),
        regens_type: Some("fixed_pa".to_string()),
        ..AppSettings::default()
    }
}

#[test]
fn test_parse_install() {
    let cli = Cli::try_parse_from([
        "fm-workshop",
        "install",
        "--mod-file",
        "/downloads/Retro.zip",
        "--game-folder",
        "/games/Football Manager 2024",
        "--edition",
        "2024",
    ])
    .unwrap();

    match cli.command {
        Commands::Install {
            mod_file, target, ..
        } => {
            assert_eq!(mod_file, PathBuf::from("/downloads/Retro.zip"));
            assert_eq!(target.edition.as_deref(), Some("2024"));
        }
        _ => panic!("Expected install"),
    }
}

#[test]
fn test_install_requires_mod_file() {
    assert!(Cli::try_parse_from(["fm-workshop", "install"]).is_err());
}

#[test]
fn test_parse_process_with_label() {
    let cli =
        Cli::try_parse_from(["fm-workshop", "process", "--action", "Uninstall Mod"]).unwrap();
    assert!(matches!(cli.command, Commands::Process { ref action, .. } if action == "Uninstall Mod"));
}

#[test]
fn test_parse_config_set() {
    let cli = Cli::try_parse_from([
        "fm-workshop",
        "--config",
        "/tmp/fm.json",
        "config",
        "set",
        "--poll-interval-ms",
        "250",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("/tmp/fm.json")));
    match cli.command {
        Commands::Config {
            command: ConfigCommand::Set {
                poll_interval_ms, ..
            },
        } => assert_eq!(poll_interval_ms, Some(250)),
        _ => panic!("Expected config set"),
    }
}

#[test]
fn test_build_request_falls_back_to_settings() {
    let request = build_request(
        "Uninstall Mod",
        None,
        None,
        None,
        TargetArgs::default(),
        &saved_settings(),
    );

    assert_eq!(request.edition, "2023");
    assert_eq!(request.game_folder, "/games/Football Manager 2023");
    assert_eq!(request.restore_folder.as_deref(), Some("/restore"));
    assert_eq!(
        request.retro_regens_folder.as_deref(),
        Some("/db/${gameVersion}/edt")
    );
    assert_eq!(request.regens_type.as_deref(), Some("fixed_pa"));
}

#[test]
fn test_build_request_flags_override_settings() {
    let target = TargetArgs {
        game_folder: Some(PathBuf::from("/other/Football Manager 2024")),
        edition: Some("2024".to_string()),
        retro_regens_folder: None,
    };
    let request = build_request(
        "Install Mod",
        Some(PathBuf::from("/downloads/Retro")),
        None,
        Some("random_pa".to_string()),
        target,
        &saved_settings(),
    );

    assert_eq!(request.edition, "2024");
    assert_eq!(request.game_folder, "/other/Football Manager 2024");
    assert_eq!(request.mod_file.as_deref(), Some("/downloads/Retro"));
    assert_eq!(request.regens_type.as_deref(), Some("random_pa"));
}

#[test]
fn test_build_request_without_any_game_folder() {
    let request = build_request(
        "Install Mod",
        None,
        None,
        None,
        TargetArgs::default(),
        &AppSettings::default(),
    );
    assert!(request.game_folder.is_empty());
    assert!(request.into_options().is_err());
}

#[tokio::test]
async fn test_dispatch_shares_process_wide_lock() {
    let tmp = tempfile::TempDir::new().unwrap();
    let game = tmp.path().join("Football Manager 2024");
    std::fs::create_dir_all(&game).unwrap();
    let config = ConfigService::new(tmp.path().join("config.json"));

    let _held = dispatch::operation_lock().acquire().await.unwrap();
    let command = Commands::Uninstall {
        restore_folder: Some(tmp.path().to_path_buf()),
        target: TargetArgs {
            game_folder: Some(game.clone()),
            edition: Some("2024".to_string()),
            retro_regens_folder: None,
        },
    };

    let err = dispatch::dispatch(command, &config).await.unwrap_err();
    assert!(format!("{err:#}").contains("Operation in progress"));
    assert!(game.exists());
}
