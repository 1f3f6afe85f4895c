//! Splitting of a raw input line into command-argument tokens.
//!
//! There is no quoting and no escaping: a token is a maximal run of
//! non-delimiter characters, and runs of delimiters collapse into one
//! separator.

use std::ops::Deref;

/// Characters that separate tokens.
pub const DELIMITERS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Capacity the token storage starts with for every line.
pub const INITIAL_CAPACITY: usize = 16;

/// Ordered tokens of one input line.
///
/// The tokens borrow the line they were cut from, so they live exactly as
/// long as the dispatch cycle that owns the line. When non-empty, the first
/// token is the command name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'a> {
    items: Vec<&'a str>,
}

impl<'a> Tokens<'a> {
    fn new() -> Self {
        Self {
            items: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Appends a token, growing the storage by half its capacity when full.
    fn push(&mut self, token: &'a str) {
        if self.items.len() == self.items.capacity() {
            let grow_by = (self.items.capacity() / 2).max(1);
            self.items.reserve_exact(grow_by);
        }
        self.items.push(token);
    }

    /// The command name, if the line was not blank.
    pub fn command(&self) -> Option<&'a str> {
        self.items.first().copied()
    }

    /// Current capacity of the token storage.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }
}

impl<'a> Deref for Tokens<'a> {
    type Target = [&'a str];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a, 'b> IntoIterator for &'a Tokens<'b> {
    type Item = &'a &'b str;
    type IntoIter = std::slice::Iter<'a, &'b str>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

/// Splits `line` into whitespace-delimited tokens.
///
/// A blank or all-delimiter line yields an empty sequence; that is not an
/// error.
///
/// ```
/// let tokens = xsh::split_into_tokens("ls  -la   /tmp\n");
/// assert_eq!(&*tokens, &["ls", "-la", "/tmp"]);
/// ```
pub fn split_into_tokens(line: &str) -> Tokens<'_> {
    let mut tokens = Tokens::new();
    for token in line.split(is_delimiter).filter(|t| !t.is_empty()) {
        tokens.push(token);
    }
    tokens
}
