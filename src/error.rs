//! Error types for credential package generation.
//!
//! Every operation collapses into one of five causes: bad input, a
//! filesystem failure, a tool that could not be spawned, a tool that ran
//! and failed, or a staging directory that could not be removed. Callers
//! can match on the variant; diagnostic detail (tool output, staged paths)
//! goes to the logs.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lscpack operations.
pub type Result<T> = std::result::Result<T, LscError>;

/// Errors that can occur while generating a credential package.
#[derive(Error, Debug)]
pub enum LscError {
    /// Input rejected before any I/O was attempted.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A file or directory operation failed.
    #[error("failed to {action} {}", .path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An external tool could not be started.
    #[error("failed to spawn {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// An external tool ran but did not exit successfully.
    #[error("{program} failed: {detail}")]
    Tool { program: String, detail: String },

    /// A staging directory could not be removed after the work was done.
    #[error("failed to remove staging directory {}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LscError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        LscError::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn file(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        LscError::File {
            action,
            path: path.into(),
            source,
        }
    }
}
