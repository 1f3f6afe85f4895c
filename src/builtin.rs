use crate::command::{ExitCode, ShellCommand};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use std::io::Write;

/// Text printed by `help`.
pub const HELP_TEXT: &str = "Xsh - the X version of Shell. \
The following commands are available: \n\
\x20 cd       Change the working directory.\n\
\x20 exit     Exit the shell.\n\
\x20 help     Print this help text.\n";

/// Commands executed inside the shell process without spawning a child.
///
/// Builtins need to touch the shell's own state (working directory, exit
/// flag), which a child process could not do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Help,
    Exit,
    Cd,
}

impl Builtin {
    /// Every builtin, in lookup order.
    pub const ALL: [Builtin; 3] = [Builtin::Help, Builtin::Exit, Builtin::Cd];

    /// Canonical name of the command, e.g. "help" or "cd".
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Help => "help",
            Builtin::Exit => "exit",
            Builtin::Cd => "cd",
        }
    }

    /// Finds a builtin by exact, case-sensitive name.
    pub fn lookup(name: &str) -> Option<Builtin> {
        lookup_in(&Self::ALL, name)
    }
}

/// First builtin in `registry` whose name equals `name`.
pub fn lookup_in(registry: &[Builtin], name: &str) -> Option<Builtin> {
    registry.iter().copied().find(|b| b.name() == name)
}

impl ShellCommand for Builtin {
    fn execute(
        &self,
        args: &[&str],
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        match self {
            Builtin::Help => help(stdout),
            Builtin::Exit => exit(env),
            Builtin::Cd => cd(args, env),
        }
    }
}

fn help(stdout: &mut dyn Write) -> Result<ExitCode> {
    stdout.write_all(HELP_TEXT.as_bytes())?;
    stdout.flush()?;
    Ok(0)
}

// The loop checks the flag before reading the next line, so nothing else
// runs after this returns.
fn exit(env: &mut Environment) -> Result<ExitCode> {
    env.should_exit = true;
    Ok(0)
}

fn cd(args: &[&str], env: &mut Environment) -> Result<ExitCode> {
    let target = args
        .get(1)
        .ok_or_else(|| ShellError::missing_argument(Builtin::Cd.name()))?;
    env.change_dir(target)?;
    Ok(0)
}
