//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fm-workshop")]
#[command(about = "Football Manager retro database mod installer", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to the per-user data directory)
    #[arg(long, global = true, env = "FM_WORKSHOP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by install and uninstall. Unset values come from saved settings.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Live game folder, e.g. ".../Football Manager 2024"
    #[arg(short, long)]
    pub game_folder: Option<PathBuf>,

    /// Four digit game edition
    #[arg(short, long)]
    pub edition: Option<String>,

    /// Regens target folder, may contain ${gameVersion}
    #[arg(long)]
    pub retro_regens_folder: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Back up the game folder and install a mod pack over it
    #[command(visible_alias = "i")]
    Install {
        /// Mod archive (.zip, .rar, .7z) or unpacked mod directory
        #[arg(short, long)]
        mod_file: PathBuf,

        /// Regens variant to install, e.g. "fixed_pa"
        #[arg(long)]
        regens_type: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Restore the game folder from its backup
    #[command(visible_alias = "u")]
    Uninstall {
        /// Folder that receives the modded files before restore
        #[arg(short, long)]
        restore_folder: Option<PathBuf>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Run an action by its label ("Install Mod" / "Uninstall Mod")
    Process {
        #[arg(short, long)]
        action: String,

        #[arg(short, long)]
        mod_file: Option<PathBuf>,

        #[arg(short, long)]
        restore_folder: Option<PathBuf>,

        #[arg(long)]
        regens_type: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Show or change saved settings
    #[command(visible_alias = "c")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// List retro regens folder templates for known install layouts
    Presets {
        #[arg(short, long)]
        edition: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print current settings as JSON
    Show,

    /// Update one or more settings
    Set {
        #[arg(long)]
        edition: Option<String>,

        #[arg(long)]
        game_folder: Option<PathBuf>,

        #[arg(long)]
        restore_folder: Option<PathBuf>,

        #[arg(long)]
        retro_regens_folder: Option<PathBuf>,

        #[arg(long)]
        regens_type: Option<String>,

        #[arg(long)]
        poll_interval_ms: Option<u64>,

        #[arg(long)]
        unpack_timeout_secs: Option<u64>,

        #[arg(long)]
        log_level: Option<String>,
    },
}
