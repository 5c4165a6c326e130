//! Error types for Mac App Store operations.
//!
//! Every fallible step (translation, location, authentication, install)
//! returns one of these variants. Nothing is retried: the first error ends
//! the invocation.

use std::path::PathBuf;
use thiserror::Error;

/// Categories of errors, used for user-facing advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The `mas` binary could not be found or started
    MasNotFound,
    /// No App Store session on this host
    NotAuthenticated,
    /// The caller's request was malformed
    InvalidInput,
    /// The application name is not in the catalog
    UnknownApplication,
    /// `mas install` reported a failure
    InstallFailed,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::MasNotFound => "mas not installed",
            Self::NotAuthenticated => "Not signed in to the App Store",
            Self::InvalidInput => "Invalid request",
            Self::UnknownApplication => "Unknown application",
            Self::InstallFailed => "Install failed",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::MasNotFound => "Install mas with `brew install mas` or pass an explicit mas_path",
            Self::NotAuthenticated => "Open the App Store and sign in, then try again",
            Self::InvalidInput => "Pass exactly one of id or name, with state=present",
            Self::UnknownApplication => {
                "Use the numeric App Store id, or add the name to the [apps] config table"
            }
            Self::InstallFailed => "Check the mas output above for details",
        }
    }
}

/// Errors that can occur while ensuring an app is installed.
#[derive(Debug, Error)]
pub enum Error {
    /// No executable `mas` among the candidates
    #[error("could not find the mas binary (searched {} location(s))", searched.len())]
    NotFound {
        /// Every path that was checked, in order
        searched: Vec<PathBuf>,
    },

    /// `mas account` reported no session
    #[error("you must sign in to the Mac App Store")]
    NotAuthenticated,

    /// Both an id and a name were supplied
    #[error("parameters are mutually exclusive: id ({id}) and name ({name})")]
    ConflictingInput {
        /// The supplied identifier
        id: String,
        /// The supplied name
        name: String,
    },

    /// Neither an id nor a name was supplied
    #[error("one of the following is required: id, name")]
    MissingInput,

    /// Name not present in the translation table
    #[error("unable to find the application '{name}'")]
    UnknownApplication {
        /// The name that was looked up
        name: String,
    },

    /// `mas install` exited unsuccessfully
    #[error("mas install failed for {id}: {stderr}")]
    InstallFailed {
        /// Identifier passed to `mas install`
        id: String,
        /// Trimmed standard error of the install command
        stderr: String,
    },

    /// Requested state other than `present`
    #[error("unsupported state '{0}' (only 'present' is supported)")]
    UnsupportedState(String),

    /// The OS refused to start the binary
    #[error("failed to execute {}: {source}", program.display())]
    Spawn {
        /// Program that failed to start
        program: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NotFound { .. } | Error::Spawn { .. } => ErrorCategory::MasNotFound,
            Error::NotAuthenticated => ErrorCategory::NotAuthenticated,
            Error::ConflictingInput { .. } | Error::MissingInput | Error::UnsupportedState(_) => {
                ErrorCategory::InvalidInput
            }
            Error::UnknownApplication { .. } => ErrorCategory::UnknownApplication,
            Error::InstallFailed { .. } => ErrorCategory::InstallFailed,
        }
    }
}

/// Result type for mas operations.
pub type Result<T> = std::result::Result<T, Error>;
