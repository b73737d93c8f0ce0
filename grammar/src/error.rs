use std::error;
use std::fmt::{self, Display};

/// Errors produced while compiling a grammar description.
///
/// Every variant carries the offending rule line (or pattern) verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The line has no ` => ` separating the symbol from its body.
    MissingArrow(String),
    /// The left-hand side is empty or contains whitespace.
    InvalidSymbol(String),
    /// Nothing follows the arrow.
    EmptyBody(String),
    /// One of the ` | ` separated alternatives has no atoms.
    EmptyAlternative(String),
    /// The inter-token whitespace pattern is not a valid regex.
    Whitespace(String, regex::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::MissingArrow(ref line) => write!(f, "missing ' => ' in rule: {}", line),
            Error::InvalidSymbol(ref line) => write!(f, "invalid symbol in rule: {}", line),
            Error::EmptyBody(ref line) => write!(f, "empty right-hand side in rule: {}", line),
            Error::EmptyAlternative(ref line) => {
                write!(f, "empty alternative in rule: {}", line)
            }
            Error::Whitespace(ref pattern, ref err) => {
                write!(f, "invalid whitespace pattern '{}': {}", pattern, err)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Whitespace(_, ref err) => Some(err),
            _ => None,
        }
    }
}

/// A terminal whose regex fragment the regex engine rejected.
///
/// Terminals are not validated when a grammar is compiled, so this only shows
/// up the first time the matcher tries the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternError {
    pub terminal: String,
    pub source: regex::Error,
}

impl Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid terminal pattern '{}': {}", self.terminal, self.source)
    }
}

impl error::Error for PatternError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.source)
    }
}
