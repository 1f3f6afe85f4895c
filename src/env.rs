use crate::error::{Result, ShellError};
use std::env as stdenv;
use std::fs;
use std::path::{Path, PathBuf};

/// Literal that ends every prompt.
pub const PROMPT_SUFFIX: &str = "xsh> ";

/// State the shell carries from one dispatch cycle to the next.
///
/// The environment contains:
/// - `current_dir`: the working directory shown by the prompt, changed only by
///   `cd`, which moves the process directory (and so every later child) with it.
///   Empty when the process directory could not be read at startup.
/// - `should_exit`: set by `exit` or end-of-input; the loop stops once it is true.
#[derive(Debug, Clone)]
pub struct Environment {
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// When set to true, indicates that the interactive loop should exit.
    pub should_exit: bool,
}

impl Environment {
    /// Capture the current process working directory into a new `Environment`.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_default();
        Self::with_current_dir(current_dir)
    }

    pub fn with_current_dir(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: current_dir.into(),
            should_exit: false,
        }
    }

    /// Change the working directory of the shell.
    ///
    /// Relative targets resolve against `current_dir`. The process-wide
    /// directory changes too, so both always agree. On failure neither is
    /// touched.
    pub fn change_dir(&mut self, target: &str) -> Result<()> {
        let path = Path::new(target);
        let new_dir = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.current_dir.join(path)
        };

        let err = |source| ShellError::ChangeDir {
            target: target.to_string(),
            source,
        };
        let canonical = fs::canonicalize(&new_dir).map_err(err)?;
        stdenv::set_current_dir(&canonical).map_err(err)?;
        self.current_dir = canonical;
        Ok(())
    }

    /// Prompt shown before each line: the working directory, a space and `xsh> `.
    ///
    /// Just `xsh> ` when the directory is unknown or has been removed.
    pub fn prompt(&self) -> String {
        if !self.current_dir.is_dir() {
            return PROMPT_SUFFIX.to_string();
        }
        format!("{} {}", self.current_dir.display(), PROMPT_SUFFIX)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
