//! Sidebar error types.

use std::path::PathBuf;

/// Error returned while building or rendering a sidebar.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// Filesystem access failed during traversal.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that could not be read or stat'ed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Sidebar could not be serialized.
    #[error("Failed to serialize sidebar: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SidebarError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
