//! Archive extraction for downloaded mod packs, plus the poll loop that
//! waits for an extraction to finish.

mod extract;
mod poller;
mod progress;
mod types;

// Re-export public API
pub use extract::{extract_archive, flatten_same_named_wrapper};
pub use poller::{
    unpack_and_await, wait_for_unpack, PollSettings, DEFAULT_POLL_INTERVAL,
    DEFAULT_UNPACK_TIMEOUT,
};
pub use progress::{ProgressGuard, ProgressSource, UnpackProgress};
pub use types::{ArchiveFormat, ExtractionResult};

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/poller_tests.rs"]
mod poller_tests;
