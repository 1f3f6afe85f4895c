use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::error;
use xsh::{EditorSource, Interpreter, PlainSource, logging};

fn main() -> ExitCode {
    logging::init_stderr_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xsh: {e:#}");
            error!("xsh: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let mut sh = Interpreter::default();
    if io::stdin().is_terminal() {
        let mut source = EditorSource::new()?;
        sh.repl(&mut source)
    } else {
        sh.repl(&mut PlainSource::stdio())
    }
}
