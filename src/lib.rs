//! A tiny interactive shell.
//!
//! Each input line is split on whitespace into tokens. If the first token
//! names a builtin (`help`, `exit`, `cd`) it runs inside the shell process;
//! otherwise the tokens become the argument vector of a child process that is
//! looked up on `PATH` and waited for before the next prompt. There are no
//! pipelines, redirections, quotes or variables.
//!
//! The main entry point is [`Interpreter`], which runs single lines or a
//! whole read-eval loop over any [`LineSource`].

pub mod builtin;
pub mod command;
pub mod env;
pub mod error;
pub mod external;
mod interpreter;
pub mod io_adapters;
pub mod lexer;
pub mod logging;
#[cfg(test)]
mod test_support;

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;

pub use builtin::Builtin;
pub use error::ShellError;
pub use external::{ChildOutcome, ProcessRunner};
pub use io_adapters::{EditorSource, LineSource, PlainSource, ReadOutcome, ScriptedLines};
pub use lexer::{Tokens, split_into_tokens};
