//! Argument vectors passed to the relayed program

use relay_core::{RelayError, Result};

/// Ordered arguments for the child, excluding the program path.
///
/// Only the two shapes the harness uses are accepted: a single input file, or
/// a mode flag, a mode name and an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentVector {
    args: Vec<String>,
}

impl ArgumentVector {
    /// Build from any sequence of strings, rejecting lengths other than 1 or 3.
    pub fn new<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        match args.len() {
            1 | 3 => Ok(Self { args }),
            count => Err(RelayError::InvalidArgumentCount { count }),
        }
    }

    /// Plain mode: just the input file.
    pub fn single(input: impl Into<String>) -> Self {
        Self {
            args: vec![input.into()],
        }
    }

    /// Mode-flag form, e.g. `-C INFORMIX file.pgc`.
    pub fn with_mode(
        flag: impl Into<String>,
        mode: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self {
            args: vec![flag.into(), mode.into(), input.into()],
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a ArgumentVector {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}
