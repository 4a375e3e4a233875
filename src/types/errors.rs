use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// A single entry that could not be copied during a tree transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Errors raised by the install/uninstall services.
#[derive(Debug, Error)]
pub enum ModError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Missing input: {0}")]
    MissingInput(String),
    #[error("Edition {edition} does not appear in game folder name: {game_folder}")]
    InvalidEdition { edition: String, game_folder: String },
    #[error("Not found game directory in unpacked modification to install: {0}")]
    SourceNotFound(String),
    #[error("Game location to install mod not exist: {0}")]
    TargetNotFound(String),
    #[error("Backup folder already exists: {0}")]
    BackupExists(String),
    #[error("No regens file found for type: {0}")]
    NoRegensFile(String),
    #[error("More than one regens file found for type: {0}")]
    AmbiguousRegensFile(String),
    #[error("Regens file {file} has no version but target path needs one: {template}")]
    UnresolvedRegensVersion { file: String, template: String },
    #[error("Unsupported archive format: {0}")]
    UnsupportedArchive(String),
    #[error("Failed to unpack archive: {0}")]
    Unpack(String),
    #[error("Timed out after {secs}s waiting for archive to unpack: {archive}")]
    UnpackTimeout { archive: String, secs: u64 },
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Failed to transfer {} item(s) into {to}", failures.len())]
    TransferFailed {
        to: String,
        failures: Vec<TransferFailure>,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ModError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ModError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type ModResult<T> = Result<T, ModError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Operation in progress. Please wait.")]
    Busy,
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Operation failed: {0}")]
    Operation(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ModError> for CommandError {
    fn from(error: ModError) -> Self {
        match error {
            ModError::UnknownAction(_)
            | ModError::MissingInput(_)
            | ModError::InvalidEdition { .. } => CommandError::Validation(error.to_string()),
            ModError::Io { .. } => CommandError::Io(error.to_string()),
            other => CommandError::Operation(other.to_string()),
        }
    }
}

impl Serialize for CommandError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
