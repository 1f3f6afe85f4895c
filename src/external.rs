use crate::command::{ExitCode, ShellCommand};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use std::fmt;
use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcome {
    /// The child called `exit` (or returned from `main`) with this code.
    Exited(i32),
    /// The child was terminated by this signal.
    Signaled(i32),
}

impl ChildOutcome {
    /// Exit code in the usual shell convention, where a signal maps to 128 + signal.
    pub fn code(self) -> ExitCode {
        match self {
            ChildOutcome::Exited(code) => code,
            ChildOutcome::Signaled(signal) => 128 + signal,
        }
    }
}

impl From<ExitStatus> for ChildOutcome {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ChildOutcome::Exited(code),
            None => terminated_by_signal(status),
        }
    }
}

impl fmt::Display for ChildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildOutcome::Exited(code) => write!(f, "exited with status {code}"),
            ChildOutcome::Signaled(signal) => write!(f, "terminated by signal {signal}"),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> ChildOutcome {
    use std::os::unix::process::ExitStatusExt;
    ChildOutcome::Signaled(status.signal().unwrap_or(-1))
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> ChildOutcome {
    ChildOutcome::Exited(-1)
}

/// Launches programs that are not builtins.
///
/// The program named by the first token is looked up the way `execvp` does:
/// a name containing `/` is used as a path, any other name is searched for in
/// `PATH`. The child inherits standard input, output and error, the process
/// environment, and the process working directory, which `cd` keeps in step
/// with [`Environment::current_dir`]. The whole token sequence becomes its
/// argument vector.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Spawns `args[0]` with `args` as its argument vector and blocks until it ends.
    ///
    /// `Child::wait` does not report stopped children, so a child that is
    /// stopped and later continued keeps the shell waiting until it exits or
    /// is killed. No child is left behind when this returns.
    pub fn run(&self, args: &[&str]) -> Result<ChildOutcome> {
        let (program, rest) = args.split_first().ok_or_else(|| ShellError::Spawn {
            program: String::new(),
            source: std::io::Error::from(std::io::ErrorKind::InvalidInput),
        })?;

        let mut child = Command::new(program)
            .args(rest)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ShellError::Spawn {
                program: program.to_string(),
                source,
            })?;
        debug!(program = %program, pid = child.id(), "spawned child");

        let status = child.wait().map_err(|source| ShellError::Wait {
            program: program.to_string(),
            source,
        })?;
        let outcome = ChildOutcome::from(status);
        debug!(program = %program, %outcome, "child finished");
        Ok(outcome)
    }
}

impl ShellCommand for ProcessRunner {
    fn execute(
        &self,
        args: &[&str],
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        // Anything buffered by builtins must reach the terminal before the
        // child starts writing to the same stream.
        stdout.flush()?;
        self.run(args).map(ChildOutcome::code)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_support::lock_current_dir;
    use std::env as stdenv;
    use std::fs;
    use std::path::Path;

    fn run_in(dir: &Path, args: &[&str]) -> Result<ChildOutcome> {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        stdenv::set_current_dir(dir).unwrap();
        let res = ProcessRunner.run(args);
        stdenv::set_current_dir(orig).unwrap();
        res
    }

    #[test]
    fn test_exit_codes_are_observed() {
        let runner = ProcessRunner;

        assert_eq!(runner.run(&["true"]).unwrap(), ChildOutcome::Exited(0));
        assert_eq!(runner.run(&["false"]).unwrap(), ChildOutcome::Exited(1));
        assert_eq!(
            runner.run(&["sh", "-c", "exit 7"]).unwrap(),
            ChildOutcome::Exited(7)
        );
    }

    #[test]
    fn test_signaled_child() {
        let outcome = ProcessRunner.run(&["sh", "-c", "kill -9 $$"]).unwrap();

        assert_eq!(outcome, ChildOutcome::Signaled(9));
        assert_eq!(outcome.code(), 137);
        assert_eq!(outcome.to_string(), "terminated by signal 9");
    }

    #[test]
    fn test_stopped_child_does_not_end_wait() {
        let script = "(sleep 0.5; kill -CONT $$) & kill -STOP $$; exit 4";
        let outcome = ProcessRunner.run(&["sh", "-c", script]).unwrap();

        assert_eq!(outcome, ChildOutcome::Exited(4));
    }

    #[test]
    fn test_unknown_program_is_spawn_error() {
        let err = ProcessRunner
            .run(&["frobnicate-xsh-test-missing"])
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(
            err.to_string()
                .starts_with("xsh: frobnicate-xsh-test-missing: "),
            "got {err}"
        );
    }

    #[test]
    fn test_path_with_slash_is_not_searched() {
        let temp = tempfile::tempdir().unwrap();
        let err = run_in(temp.path(), &["./true"]).unwrap_err();
        assert!(matches!(err, ShellError::Spawn { .. }));
    }

    #[test]
    fn test_argv_is_passed_through() {
        let temp = tempfile::tempdir().unwrap();

        let outcome = run_in(
            temp.path(),
            &["sh", "-c", "echo \"$0|$1|$2\" > args.txt", "zero", "-la", "/tmp"],
        )
        .unwrap();

        assert_eq!(outcome, ChildOutcome::Exited(0));
        let written = fs::read_to_string(temp.path().join("args.txt")).unwrap();
        assert_eq!(written, "zero|-la|/tmp\n");
    }

    #[test]
    fn test_child_inherits_process_dir() {
        let temp = tempfile::tempdir().unwrap();
        let canonical = fs::canonicalize(temp.path()).unwrap();

        run_in(&canonical, &["sh", "-c", "pwd -P > cwd.txt"]).unwrap();

        let written = fs::read_to_string(canonical.join("cwd.txt")).unwrap();
        assert_eq!(written.trim_end(), canonical.to_string_lossy());
    }

    #[test]
    fn test_child_runs_after_shell_dir_is_removed() {
        let temp = tempfile::tempdir().unwrap();
        let doomed = fs::canonicalize(temp.path()).unwrap().join("doomed");
        fs::create_dir(&doomed).unwrap();

        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let mut env = Environment::with_current_dir(&orig);
        env.change_dir(doomed.to_str().unwrap()).unwrap();
        fs::remove_dir(&doomed).unwrap();

        let res = ProcessRunner.execute(&["true"], &mut Vec::<u8>::new(), &mut env);
        let prompt = env.prompt();
        stdenv::set_current_dir(&orig).unwrap();

        assert_eq!(res.unwrap(), 0);
        assert_eq!(prompt, "xsh> ");
    }

    #[test]
    fn test_execute_flushes_and_returns_code() {
        let mut env = Environment::with_current_dir(stdenv::temp_dir());
        let mut out: Vec<u8> = Vec::new();
        let code = ProcessRunner
            .execute(&["sh", "-c", "exit 3"], &mut out, &mut env)
            .unwrap();
        assert_eq!(code, 3);
    }
}
