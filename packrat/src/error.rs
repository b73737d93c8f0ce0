use std::error;
use std::fmt::{self, Display};

use grammar::PatternError;

/// Conditions that abort a parse outright.
///
/// Failing to match is not one of them: that is an ordinary `None` result.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchError {
    /// A terminal's regex did not compile.
    Pattern(PatternError),
    /// Rules nested deeper than the configured limit, usually because of
    /// left recursion.
    StackLimitExceeded { depth: usize },
    /// The start symbol is not a rule of the grammar.
    UnknownSymbol(String),
}

impl Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MatchError::Pattern(ref err) => write!(f, "{}", err),
            MatchError::StackLimitExceeded { depth } => {
                write!(f, "rule nesting exceeded depth {}", depth)
            }
            MatchError::UnknownSymbol(ref s) => write!(f, "unknown start symbol: {}", s),
        }
    }
}

impl error::Error for MatchError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            MatchError::Pattern(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<PatternError> for MatchError {
    fn from(err: PatternError) -> MatchError {
        MatchError::Pattern(err)
    }
}
