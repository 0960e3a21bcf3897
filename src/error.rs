//! Error taxonomy shared by all commands.
//!
//! Each class has its own fate. Malformed operator input is re-prompted.
//! A filesystem failure skips that one file while the batch continues.
//! A failing external tool ends the run.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed operator input (name, email or URL failed a format check).
    #[error("{0}")]
    Validation(String),

    /// A filesystem operation failed; carries the offending path.
    #[error("filesystem operation failed on {path}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external tool exited non-zero. Its output already went to the
    /// operator's terminal through inherited stdio.
    #[error("{tool} exited with {status}")]
    ExternalTool { tool: String, status: ExitStatus },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn filesystem(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
