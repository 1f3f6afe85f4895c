//! Errors reported by commands.
//!
//! None of these end the shell: the interpreter prints them to standard
//! error and prompts again.

use std::io;
use thiserror::Error;

/// Failure of a single command invocation.
#[derive(Error, Debug)]
pub enum ShellError {
    /// A builtin was invoked without an argument it requires.
    #[error("xsh: {command}: missing argument")]
    MissingArgument { command: &'static str },

    /// The working directory could not be changed.
    #[error("xsh: cd: {target}: {source}")]
    ChangeDir {
        target: String,
        #[source]
        source: io::Error,
    },

    /// The program could not be started, including when it is not found on PATH.
    #[error("xsh: {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Waiting for a started child failed.
    #[error("xsh: {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Writing a builtin's output failed.
    #[error("xsh: {0}")]
    Io(#[from] io::Error),
}

impl ShellError {
    pub fn missing_argument(command: &'static str) -> Self {
        Self::MissingArgument { command }
    }

    /// Returns the error category, used when logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingArgument { .. } => "missing argument",
            Self::ChangeDir { .. } | Self::Spawn { .. } | Self::Wait { .. } | Self::Io(_) => {
                "os error"
            }
        }
    }

    /// True when the program could not be resolved to an executable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Result type alias using ShellError.
pub type Result<T> = std::result::Result<T, ShellError>;
