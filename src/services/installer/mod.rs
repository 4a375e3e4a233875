//! Install/uninstall orchestration.
//!
//! Each operation is a strict sequence of filesystem steps. Any failure
//! aborts the remaining steps; nothing already done is rolled back, the
//! backup folder is the only safety net.

mod install;
mod uninstall;

pub use install::install_mod;
pub use uninstall::uninstall_mod;

use crate::services::archive::PollSettings;
use crate::services::fs_utils::file_utils::TransferProgress;
use crate::types::errors::{ModError, ModResult};
use crate::types::mod_options::{ModAction, ModProcessingOptions, OperationReport};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub type TransferCallback = Arc<dyn Fn(TransferProgress) + Send + Sync>;

/// Per-invocation settings and state for one operation.
#[derive(Clone, Default)]
pub struct ProcessContext {
    pub poll: PollSettings,
    pub cancel: CancellationToken,
    pub on_transfer: Option<TransferCallback>,
}

/// Run the install or uninstall described by `options`.
pub async fn process(
    options: &ModProcessingOptions,
    ctx: &ProcessContext,
) -> ModResult<OperationReport> {
    log::info!(
        "Processing {} for edition {} at {}",
        options.action,
        options.edition,
        options.game_folder.display()
    );

    let result = match options.action {
        ModAction::Install => install_mod(options, ctx).await,
        ModAction::Uninstall => uninstall_mod(options, ctx).await,
    };

    match &result {
        Ok(_) => log::info!("{} completed successfully!", options.action),
        Err(e) => log::error!("Error processing mod: {e}"),
    }
    result
}

/// Run blocking filesystem work off the async executor and wait for it.
async fn run_blocking<T, F>(work: F) -> ModResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> ModResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ModError::io("Filesystem task failed", std::io::Error::other(e)))?
}

#[cfg(test)]
#[path = "tests/installer_tests.rs"]
mod tests;
