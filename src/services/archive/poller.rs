//! Drives an archive extraction to completion by polling its progress entry.

use super::extract::extract_archive;
use super::progress::{ProgressSource, UnpackProgress};
use super::types::ArchiveFormat;
use crate::services::fs_utils::path_utils::to_forward_slashes;
use crate::types::errors::{ModError, ModResult};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_UNPACK_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_UNPACK_TIMEOUT,
        }
    }
}

/// Unpack `archive_path` next to itself and wait until extraction is done.
///
/// Returns the unpacked directory. On timeout or cancellation the blocking
/// extraction keeps running in the background; only the wait is abandoned.
pub async fn unpack_and_await(
    archive_path: &Path,
    poll: &PollSettings,
    cancel: &CancellationToken,
) -> ModResult<PathBuf> {
    if ArchiveFormat::from_path(archive_path).is_none() {
        return Err(ModError::UnsupportedArchive(
            archive_path.display().to_string(),
        ));
    }

    let key = to_forward_slashes(archive_path);
    let progress = UnpackProgress::new();
    progress.begin(&key);

    log::info!("Starting extraction: {}", archive_path.display());
    let task = {
        let progress = progress.clone();
        let key = key.clone();
        let archive = archive_path.to_path_buf();
        tokio::task::spawn_blocking(move || extract_archive(&archive, &progress, &key))
    };

    wait_for_unpack(&progress, &key, poll, cancel).await?;

    let extraction = task
        .await
        .map_err(|e| ModError::Unpack(format!("Extraction task failed: {e}")))??;

    log::info!("Extraction complete: {}", extraction.dest_path.display());
    Ok(extraction.dest_path)
}

/// Poll `progress` for `key` every `poll.interval` until the entry is gone.
///
/// Query errors are logged and retried.
pub async fn wait_for_unpack<P: ProgressSource + ?Sized>(
    progress: &P,
    key: &str,
    poll: &PollSettings,
    cancel: &CancellationToken,
) -> ModResult<()> {
    let deadline = Instant::now() + poll.timeout;

    loop {
        match progress.query(key) {
            Ok(None) => return Ok(()),
            Ok(Some((done, total))) => {
                log::debug!("Unpacking {key}: {done}/{total} bytes");
            }
            Err(e) => {
                log::warn!("Unpack progress query failed, retrying: {e}");
            }
        }

        if Instant::now() >= deadline {
            return Err(ModError::UnpackTimeout {
                archive: key.to_string(),
                secs: poll.timeout.as_secs(),
            });
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(ModError::Cancelled),
            _ = tokio::time::sleep(poll.interval) => {}
        }
    }
}
