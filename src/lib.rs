//! Table driven PEG parsing.
//!
//! A grammar is written as a small rule description, compiled into a table,
//! and then used to parse text with a memoizing recursive descent matcher:
//!
//! ```
//! use grammatic::{compile, parse};
//!
//! let g = compile("greeting => hello name\nname => [a-z]+").unwrap();
//! let parsed = parse("greeting", "hello  world", &g).unwrap().unwrap();
//! assert_eq!(parsed.tree.to_string(), r#"["greeting", "hello", ["name", "world"]]"#);
//! assert!(parsed.is_complete());
//! ```
//!
//! Parsers can also be derived, in which case the grammar is checked at
//! compile time and symbols become variants of a generated `Rule` enum:
//!
//! ```
//! use grammatic::Parser;
//!
//! #[derive(Parser)]
//! #[grammar_inline = "pair => key = value\nkey => [a-z]+\nvalue => [0-9]+"]
//! struct Assignment;
//!
//! let parsed = Assignment::parse(Rule::pair, "x = 42").unwrap().unwrap();
//! assert_eq!(parsed.tree.children()[2].text(), "42");
//! ```

// Lets the derive's `::grammatic` paths resolve inside this crate too.
extern crate self as grammatic;

use std::fmt::Debug;

pub use derive::Parser;
pub use grammar::{
    compile, compile_with, Atom, Compiler, Error as CompileError, Grammar, PatternError,
    SymbolId, TerminalId, DEFAULT_WHITESPACE,
};
pub use packrat::{parse, parse_with, MatchError, Matcher, MemoStats, Options, Parsed, Tree};

pub mod json;

/// A grammar symbol usable as a start rule.
pub trait ParserRule: Copy + Debug + Eq {
    fn name(self) -> &'static str;
}

/// A parser backed by a fixed grammar.
pub trait Parser<R: ParserRule> {
    fn grammar() -> &'static Grammar;

    /// Matches a prefix of `input` against `rule`. `Ok(None)` when the input
    /// does not start with a `rule`.
    fn parse(rule: R, input: &str) -> anyhow::Result<Option<Parsed<'_>>> {
        Ok(packrat::parse(rule.name(), input, Self::grammar())?)
    }

    fn parse_with<'a>(
        rule: R,
        input: &'a str,
        options: &Options,
    ) -> anyhow::Result<Option<Parsed<'a>>> {
        Ok(packrat::parse_with(
            rule.name(),
            input,
            Self::grammar(),
            options,
        )?)
    }
}

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::OnceCell;
}
