use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::borrow::Cow;
use std::collections::VecDeque;
use std::io::{self, BufRead, ErrorKind, Stdout, StdinLock, Write};
use tracing::debug;

/// What a [`LineSource`] produced for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line of input, without its line terminator.
    Line(String),
    /// A line arrived but could not be decoded; the reason is reported and
    /// the line is skipped.
    Unreadable(String),
    /// The user interrupted the prompt (Ctrl-C); nothing to run.
    Interrupted,
    /// The input stream is closed.
    Eof,
}

/// Source of input lines for the interpreter loop.
pub trait LineSource {
    /// Show `prompt` and read one line.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

/// Interactive line editor on the terminal.
///
/// History is kept in memory for the session only.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("failed to initialise line editor")?;
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor
                        .add_history_entry(line.as_str())
                        .context("failed to record history")?;
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(ReadlineError::Io(err)) if err.kind() == ErrorKind::InvalidData => {
                Ok(ReadOutcome::Unreadable(err.to_string()))
            }
            Err(err) => Err(err).context("failed to read input line"),
        }
    }
}

/// Plain line reader used when standard input is not a terminal.
///
/// The prompt is written and flushed to `output` before every read. Lines are
/// read as bytes and decoded lossily, so stray non-UTF-8 bytes never stop the
/// shell.
pub struct PlainSource<R, W> {
    input: R,
    output: W,
    buf: Vec<u8>,
}

impl<R: BufRead, W: Write> PlainSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            buf: Vec::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl PlainSource<StdinLock<'static>, Stdout> {
    /// Reads the process standard input and prompts on standard output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineSource for PlainSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.output
            .write_all(prompt.as_bytes())
            .and_then(|()| self.output.flush())
            .context("failed to write prompt")?;

        self.buf.clear();
        let read = self
            .input
            .read_until(b'\n', &mut self.buf)
            .context("failed to read input line")?;
        if read == 0 {
            return Ok(ReadOutcome::Eof);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        let line = String::from_utf8_lossy(&self.buf);
        if let Cow::Owned(_) = line {
            debug!("input line is not valid UTF-8, decoded lossily");
        }
        Ok(ReadOutcome::Line(line.into_owned()))
    }
}

/// Fixed list of lines, followed by end-of-input.
///
/// Prompts are recorded so callers can check what the user would have seen.
#[derive(Debug, Default)]
pub struct ScriptedLines {
    lines: VecDeque<ReadOutcome>,
    prompts: Vec<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(|l| ReadOutcome::Line(l.into()))
                .collect(),
            prompts: Vec::new(),
        }
    }

    /// Queue an interrupted prompt after the lines added so far.
    pub fn interrupt(mut self) -> Self {
        self.lines.push_back(ReadOutcome::Interrupted);
        self
    }

    /// Queue a line that cannot be decoded.
    pub fn unreadable(mut self, reason: impl Into<String>) -> Self {
        self.lines.push_back(ReadOutcome::Unreadable(reason.into()));
        self
    }

    /// Queue more lines.
    pub fn then<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines
            .extend(lines.into_iter().map(|l| ReadOutcome::Line(l.into())));
        self
    }

    /// Every prompt shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Number of queued outcomes not yet read.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedLines {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front().unwrap_or(ReadOutcome::Eof))
    }
}
