//! A memoizing PEG matcher over compiled grammars.
//!
//! Grammars come from the `grammar` crate. Matching is deterministic: the
//! alternatives of a rule are tried left to right and the first one that
//! matches is taken, so put longer alternatives first (`E => T op E | T`,
//! not `E => T | T op E`). Left recursion (`E => E op T`) is not supported
//! and ends in [`MatchError::StackLimitExceeded`].
//!
//! ```
//! let g = grammar::compile("value => a | b").unwrap();
//! let parsed = packrat::parse("value", "ab", &g).unwrap().unwrap();
//! assert_eq!(parsed.tree.to_string(), r#"["value", "a"]"#);
//! assert_eq!(parsed.remainder, "b");
//! ```

use grammar::Grammar;
use tracing::instrument;

mod error;
mod matcher;
mod memo;
mod options;
mod stack;
mod tree;

pub use error::MatchError;
pub use matcher::Matcher;
pub use memo::MemoStats;
pub use options::Options;
pub use tree::{Parsed, Tree};

/// Matches a prefix of `text` against `start`.
///
/// `Ok(None)` means the text does not start with a `start`. On success the
/// remainder says how much was left over; an empty remainder means the whole
/// text was consumed.
pub fn parse<'a>(
    start: &str,
    text: &'a str,
    grammar: &'a Grammar,
) -> Result<Option<Parsed<'a>>, MatchError> {
    parse_with(start, text, grammar, &Options::default())
}

/// Like [`parse`], with explicit options.
#[instrument(level = "debug", skip_all, fields(start = start, len = text.len()))]
pub fn parse_with<'a>(
    start: &str,
    text: &'a str,
    grammar: &'a Grammar,
    options: &Options,
) -> Result<Option<Parsed<'a>>, MatchError> {
    Matcher::new(grammar, text, *options).run(start)
}
