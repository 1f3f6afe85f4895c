use crate::builtin::{self, Builtin};
use crate::command::{ExitCode, ShellCommand};
use crate::env::Environment;
use crate::external::ProcessRunner;
use crate::io_adapters::{LineSource, ReadOutcome};
use crate::lexer;
use std::io::Write;
use tracing::{debug, info};

/// A minimal interactive shell: builtins run in-process, everything else is
/// spawned as a child and waited for.
///
/// The interpreter owns the [`Environment`] carried between lines and the
/// ordered set of builtins consulted before falling back to an external
/// program. See [`Default`] for the builtins included out of the box.
///
/// Example
/// ```
/// use xsh::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut out: Vec<u8> = Vec::new();
/// let mut err: Vec<u8> = Vec::new();
/// sh.execute_line_with_output("help", &mut out, &mut err);
/// assert!(String::from_utf8(out).unwrap().contains("exit"));
/// assert!(err.is_empty());
/// ```
pub struct Interpreter {
    env: Environment,
    builtins: Vec<Builtin>,
    runner: ProcessRunner,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of builtins.
    pub fn new(builtins: Vec<Builtin>) -> Self {
        Self::with_env(builtins, Environment::new())
    }

    pub fn with_env(builtins: Vec<Builtin>, env: Environment) -> Self {
        Self {
            env,
            builtins,
            runner: ProcessRunner,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// True once `exit` ran or the input ended.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Route a non-empty token sequence to a builtin or to an external program.
    ///
    /// Errors are written to `stderr` and swallowed; the returned code is
    /// `None` when the command failed before producing one.
    pub fn dispatch(
        &mut self,
        args: &[&str],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Option<ExitCode> {
        let name = *args.first()?;
        let found = builtin::lookup_in(&self.builtins, name);
        let command: &dyn ShellCommand = match &found {
            Some(b) => {
                debug!(command = name, "running builtin");
                b
            }
            None => {
                debug!(command = name, "running external program");
                &self.runner
            }
        };

        match command.execute(args, stdout, &mut self.env) {
            Ok(code) => Some(code),
            Err(e) => {
                info!(command = name, category = e.category(), "{e}");
                let _ = writeln!(stderr, "{e}");
                let _ = stderr.flush();
                None
            }
        }
    }

    /// Tokenize one input line and execute it, writing to the process streams.
    pub fn execute_line(&mut self, line: &str) -> Option<ExitCode> {
        self.execute_line_with_output(line, &mut std::io::stdout(), &mut std::io::stderr())
    }

    /// Tokenize one input line and execute it.
    ///
    /// A blank line does nothing and returns `None`.
    pub fn execute_line_with_output(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Option<ExitCode> {
        let tokens = lexer::split_into_tokens(line);
        if tokens.is_empty() {
            return None;
        }
        self.dispatch(&tokens, stdout, stderr)
    }

    /// Read-eval loop on the process streams.
    pub fn repl(&mut self, source: &mut dyn LineSource) -> anyhow::Result<()> {
        self.repl_with_output(source, &mut std::io::stdout(), &mut std::io::stderr())
    }

    /// Read-eval loop: prompt, read a line, execute it, until `exit` or end of input.
    ///
    /// A line that cannot be decoded is reported on `stderr` and skipped. Only
    /// a failure of the line source itself ends the loop with an error.
    pub fn repl_with_output(
        &mut self,
        source: &mut dyn LineSource,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> anyhow::Result<()> {
        while !self.env.should_exit {
            let prompt = self.env.prompt();
            match source.read_line(&prompt)? {
                ReadOutcome::Line(line) => {
                    let code = self.execute_line_with_output(&line, stdout, stderr);
                    debug!(?code, "line finished");
                }
                ReadOutcome::Unreadable(reason) => {
                    info!(%reason, "skipping unreadable input line");
                    let _ = writeln!(stderr, "xsh: {reason}");
                    let _ = stderr.flush();
                }
                ReadOutcome::Interrupted => {
                    debug!("prompt interrupted");
                }
                ReadOutcome::Eof => {
                    debug!("end of input");
                    self.env.should_exit = true;
                }
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default builtins: `help`, `exit`, `cd`.
    fn default() -> Self {
        Self::new(Builtin::ALL.to_vec())
    }
}
