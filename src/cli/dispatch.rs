//! Command dispatch functions

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio_util::sync::CancellationToken;

use crate::cli::*;
use crate::commands::app::settings_cmds;
use crate::commands::mods::process_cmds::{self, ModRequest};
use crate::services::config::{AppSettings, ConfigService};
use crate::services::core::OperationLock;
use crate::services::fs_utils::file_utils::TransferProgress;
use crate::services::installer::ProcessContext;
use crate::types::mod_options::{INSTALL_MOD_LABEL, UNINSTALL_MOD_LABEL};

/// One lock for the whole process, shared by every dispatched operation.
static OPERATION_LOCK: LazyLock<OperationLock> = LazyLock::new(OperationLock::new);

pub fn operation_lock() -> &'static OperationLock {
    &OPERATION_LOCK
}

pub async fn dispatch(command: Commands, config: &ConfigService) -> Result<()> {
    match command {
        Commands::Install {
            mod_file,
            regens_type,
            target,
        } => {
            let request = build_request(
                INSTALL_MOD_LABEL,
                Some(mod_file),
                None,
                regens_type,
                target,
                &config.get_settings(),
            );
            run_process(request, config).await
        }

        Commands::Uninstall {
            restore_folder,
            target,
        } => {
            let request = build_request(
                UNINSTALL_MOD_LABEL,
                None,
                restore_folder,
                None,
                target,
                &config.get_settings(),
            );
            run_process(request, config).await
        }

        Commands::Process {
            action,
            mod_file,
            restore_folder,
            regens_type,
            target,
        } => {
            let request = build_request(
                &action,
                mod_file,
                restore_folder,
                regens_type,
                target,
                &config.get_settings(),
            );
            run_process(request, config).await
        }

        Commands::Config { command } => dispatch_config(command, config),

        Commands::Presets { edition } => {
            let edition = edition.unwrap_or_else(|| config.get_settings().edition);
            let presets = settings_cmds::retro_regens_presets_cmd(&edition)?;
            print_json(&presets)
        }
    }
}

/// Dispatch config subcommands
pub fn dispatch_config(command: ConfigCommand, config: &ConfigService) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let settings = settings_cmds::get_settings_cmd(config)?;
            println!("# {}", config.path().display());
            print_json(&settings)
        }

        ConfigCommand::Set {
            edition,
            game_folder,
            restore_folder,
            retro_regens_folder,
            regens_type,
            poll_interval_ms,
            unpack_timeout_secs,
            log_level,
        } => {
            let mut settings = settings_cmds::get_settings_cmd(config)?;
            if let Some(v) = edition {
                settings.edition = v;
            }
            if let Some(v) = game_folder {
                settings.game_folder = Some(v);
            }
            if let Some(v) = restore_folder {
                settings.restore_folder = Some(v);
            }
            if let Some(v) = retro_regens_folder {
                settings.retro_regens_folder = Some(v);
            }
            if let Some(v) = regens_type {
                settings.regens_type = Some(v);
            }
            if let Some(v) = poll_interval_ms {
                settings.poll_interval_ms = v;
            }
            if let Some(v) = unpack_timeout_secs {
                settings.unpack_timeout_secs = v;
            }
            if let Some(v) = log_level {
                settings.log_level = v;
            }
            settings_cmds::save_settings_cmd(config, settings)?;
            println!("Saved settings to {}", config.path().display());
            Ok(())
        }
    }
}

/// Merge command line flags over saved settings into a raw request.
pub fn build_request(
    action: &str,
    mod_file: Option<PathBuf>,
    restore_folder: Option<PathBuf>,
    regens_type: Option<String>,
    target: TargetArgs,
    settings: &AppSettings,
) -> ModRequest {
    ModRequest {
        action: action.to_string(),
        edition: target.edition.unwrap_or_else(|| settings.edition.clone()),
        mod_file: mod_file.as_deref().map(path_string),
        game_folder: target
            .game_folder
            .or_else(|| settings.game_folder.clone())
            .as_deref()
            .map(path_string)
            .unwrap_or_default(),
        restore_folder: restore_folder
            .or_else(|| settings.restore_folder.clone())
            .as_deref()
            .map(path_string),
        retro_regens_folder: target.retro_regens_folder.or_else(|| {
            settings
                .retro_regens_folder
                .as_deref()
                .map(path_string)
        }),
        regens_type: regens_type.or_else(|| settings.regens_type.clone()),
    }
}

async fn run_process(request: ModRequest, config: &ConfigService) -> Result<()> {
    let cancel = CancellationToken::new();
    let watcher = spawn_ctrl_c_watcher(cancel.clone());

    let ctx = ProcessContext {
        poll: config.get_settings().poll_settings(),
        cancel,
        on_transfer: Some(std::sync::Arc::new(|progress: TransferProgress| {
            log::debug!("Transferred {}/{}", progress.copied, progress.total);
        })),
    };

    let result = process_cmds::process_mod_cmd(operation_lock(), request, &ctx).await;
    watcher.abort();

    let report = result.context("Mod processing failed")?;
    print_json(&report)
}

fn spawn_ctrl_c_watcher(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling");
            cancel.cancel();
        }
    })
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
