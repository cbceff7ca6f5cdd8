use std::io;
use std::path::PathBuf;

/// Failures while moving a dictionary file between disk and memory.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A missing file (or its directory) could not be created
    #[error("could not create {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },

    /// The file could not be read or decoded
    #[error("could not load {}: {cause}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        cause: LoadCause,
    },

    /// The cleaned records could not be written
    #[error("could not save {}: {source}", .path.display())]
    Save { path: PathBuf, source: io::Error },
}

impl SyncError {
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::Create { .. } => "create_failure",
            SyncError::Load { .. } => "load_failure",
            SyncError::Save { .. } => "save_failure",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadCause {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("no encoding could decode the file (tried {}; last: {last})", .tried.join(", "))]
    Undecodable {
        tried: Vec<&'static str>,
        last: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record index {index} is out of range ({len} records)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown language profile '{0}'")]
    UnknownProfile(String),

    #[error("there are unsaved changes")]
    UnsavedChanges,
}

impl SessionError {
    /// Stable name sent to the GUI alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::Sync(e) => e.kind(),
            SessionError::Store(StoreError::IndexOutOfRange { .. }) => "index_out_of_range",
            SessionError::UnknownProfile(_) => "unknown_profile",
            SessionError::UnsavedChanges => "unsaved_changes",
        }
    }
}
