use crate::env::Environment;
use crate::error::Result;
use std::io::Write;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// The shell only logs it; it never changes the shell's own exit status.
pub type ExitCode = i32;

/// Anything the dispatcher can hand the tokens of one line to.
///
/// Implemented by [`Builtin`](crate::builtin::Builtin) for in-process
/// commands and by [`ProcessRunner`](crate::external::ProcessRunner) for
/// external programs.
pub trait ShellCommand {
    /// Executes the command.
    ///
    /// `args` is the whole token sequence, so `args[0]` is the command name.
    /// `stdout` receives in-process output; external programs write straight
    /// to the inherited standard output instead.
    fn execute(
        &self,
        args: &[&str],
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode>;
}
