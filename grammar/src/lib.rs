//! Compiles rule descriptions into grammar tables.
//!
//! A description is a list of rules, one per line:
//!
//! ```text
//! Symbol => A1 A2 ... | B1 B2 ... | C1 C2 ...
//! ```
//!
//! The right-hand side holds one or more alternatives separated by ` | `.
//! Each alternative is a sequence of atoms separated by spaces. An atom is
//! either a symbol defined on some left-hand side, or a regular expression
//! matched against the input as a token. Repetition operators are not part of
//! the rule syntax, but are fine inside a token's regex.
//!
//! Spaces around `=>` and `|` are required. Tabs count as spaces, blank lines
//! are ignored, and a line ending in a lone `\` continues on the next line.
//!
//! Tokens may be preceded by whitespace, described by its own pattern
//! (`\s*` unless configured otherwise through [`Compiler::whitespace`]).

use std::fmt::{self, Display};
use std::str::FromStr;

use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

mod error;
pub use error::{Error, PatternError};
mod parser;
mod tokenizer;
pub use tokenizer::{Token, Tokenizer, Whitespace};

/// Whitespace allowed between tokens unless configured otherwise.
pub const DEFAULT_WHITESPACE: &str = r"\s*";

/// Identifies a rule within its grammar.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(usize);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identifies a terminal within its grammar.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalId(usize);

impl TerminalId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single element of an alternative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Atom {
    NonTerminal(SymbolId),
    Terminal(TerminalId),
}

/// A symbol and its alternatives, in priority order.
#[derive(Debug)]
pub struct Rule {
    name: String,
    alternatives: Vec<Vec<Atom>>,
}

impl Rule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alternatives(&self) -> &[Vec<Atom>] {
        &self.alternatives
    }
}

/// A regex fragment used as a token.
#[derive(Debug)]
pub struct Terminal {
    source: String,
    tokenizer: OnceCell<Result<Tokenizer, regex::Error>>,
}

impl Terminal {
    fn new(source: String) -> Self {
        Terminal {
            source,
            tokenizer: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A compiled grammar.
///
/// Immutable once built. Terminal regexes are compiled the first time they
/// are asked for and cached, which is safe to share across threads.
#[derive(Debug)]
pub struct Grammar {
    rules: Vec<Rule>,
    symbols: FxHashMap<String, SymbolId>,
    terminals: Vec<Terminal>,
    whitespace: Whitespace,
}

impl Grammar {
    /// Looks up a rule by name.
    pub fn symbol(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }

    /// # Panics
    ///
    /// If `id` belongs to a different grammar with more rules.
    pub fn rule(&self, id: SymbolId) -> &Rule {
        &self.rules[id.0]
    }

    /// Rules in the order they were first defined.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// # Panics
    ///
    /// If `id` belongs to a different grammar with more terminals.
    pub fn terminal(&self, id: TerminalId) -> &Terminal {
        &self.terminals[id.0]
    }

    pub fn whitespace(&self) -> &str {
        self.whitespace.as_str()
    }

    /// The text an atom was written as.
    pub fn atom_name(&self, atom: Atom) -> &str {
        match atom {
            Atom::NonTerminal(id) => self.rule(id).name(),
            Atom::Terminal(id) => self.terminal(id).source(),
        }
    }

    /// Returns the tokenizer for a terminal, compiling it on first use.
    pub fn tokenizer(&self, id: TerminalId) -> Result<&Tokenizer, PatternError> {
        let terminal = self.terminal(id);
        terminal
            .tokenizer
            .get_or_init(|| {
                trace!(terminal = %terminal.source, "compiling tokenizer");
                Tokenizer::new(&self.whitespace, &terminal.source)
            })
            .as_ref()
            .map_err(|err| PatternError {
                terminal: terminal.source.clone(),
                source: err.clone(),
            })
    }
}

/// Renders the rules back as a description. The whitespace pattern is not
/// part of the output.
impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rule in &self.rules {
            write!(f, "{} =>", rule.name)?;
            for (i, alternative) in rule.alternatives.iter().enumerate() {
                if i > 0 {
                    write!(f, " |")?;
                }
                for atom in alternative {
                    write!(f, " {}", self.atom_name(*atom))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grammar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        compile(s)
    }
}

/// Grammar compiler configuration.
#[derive(Debug, Clone)]
pub struct Compiler {
    whitespace: String,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler {
            whitespace: DEFAULT_WHITESPACE.to_owned(),
        }
    }
}

/// A rule line before its atoms are resolved.
struct RawRule<'a> {
    name: &'a str,
    alternatives: Vec<Vec<&'a str>>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pattern skipped before every token. Use `""` to disallow
    /// whitespace between tokens.
    pub fn whitespace(mut self, pattern: impl Into<String>) -> Self {
        self.whitespace = pattern.into();
        self
    }

    pub fn compile(&self, description: &str) -> Result<Grammar, Error> {
        let whitespace = Whitespace::new(&self.whitespace)
            .map_err(|err| Error::Whitespace(self.whitespace.clone(), err))?;

        let description = description.replace('\t', " ");
        let lines = logical_lines(&description);
        let raw = lines
            .iter()
            .map(|line| rule_from_line(line))
            .collect::<Result<Vec<_>, _>>()?;

        // Symbols first so that atoms may refer to rules defined further down.
        let mut rules: Vec<Rule> = Vec::new();
        let mut symbols: FxHashMap<String, SymbolId> = FxHashMap::default();
        for rule in &raw {
            if symbols.contains_key(rule.name) {
                warn!(symbol = rule.name, "symbol redefined, later definition wins");
                continue;
            }
            symbols.insert(rule.name.to_owned(), SymbolId(rules.len()));
            rules.push(Rule {
                name: rule.name.to_owned(),
                alternatives: Vec::new(),
            });
        }

        let mut terminals: Vec<Terminal> = Vec::new();
        let mut terminal_ids: FxHashMap<&str, TerminalId> = FxHashMap::default();
        for rule in &raw {
            let alternatives: Vec<Vec<Atom>> = rule
                .alternatives
                .iter()
                .map(|atoms| {
                    atoms
                        .iter()
                        .map(|&atom| match symbols.get(atom) {
                            Some(&id) => Atom::NonTerminal(id),
                            None => {
                                let id = *terminal_ids.entry(atom).or_insert_with(|| {
                                    terminals.push(Terminal::new(atom.to_owned()));
                                    TerminalId(terminals.len() - 1)
                                });
                                Atom::Terminal(id)
                            }
                        })
                        .collect()
                })
                .collect();
            rules[symbols[rule.name].0].alternatives = alternatives;
        }

        debug!(
            rules = rules.len(),
            terminals = terminals.len(),
            "compiled grammar"
        );

        Ok(Grammar {
            rules,
            symbols,
            terminals,
            whitespace,
        })
    }
}

/// Compiles a description using the default whitespace pattern.
pub fn compile(description: &str) -> Result<Grammar, Error> {
    Compiler::new().compile(description)
}

/// Compiles a description with a custom whitespace pattern.
pub fn compile_with(description: &str, whitespace: &str) -> Result<Grammar, Error> {
    Compiler::new().whitespace(whitespace).compile(description)
}

/// Joins continued lines and drops blank ones. Returned lines are trimmed.
fn logical_lines(description: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending = String::new();
    for line in description.lines() {
        let line = line.trim();
        if let Some(head) = continued(line) {
            pending.push_str(head);
            pending.push(' ');
            continue;
        }
        pending.push_str(line);
        let joined = pending.trim();
        if !joined.is_empty() {
            lines.push(joined.to_owned());
        }
        pending.clear();
    }
    let joined = pending.trim();
    if !joined.is_empty() {
        lines.push(joined.to_owned());
    }
    lines
}

/// If the line ends in a lone `\`, returns what comes before it.
fn continued(line: &str) -> Option<&str> {
    let head = line.strip_suffix('\\')?;
    if head.is_empty() || head.ends_with(' ') {
        Some(head)
    } else {
        None
    }
}

fn rule_from_line(line: &str) -> Result<RawRule<'_>, Error> {
    trace!(line, "compiling rule");
    let (_, (lhs, body)) = match parser::rule_line(line) {
        Ok(parsed) => parsed,
        Err(_) if line.ends_with(parser::ARROW.trim_end()) => {
            return Err(Error::EmptyBody(line.to_owned()))
        }
        // Lines arrive trimmed, so a missing symbol leaves the arrow first.
        Err(_)
            if line == parser::ARROW.trim() || line.starts_with(parser::ARROW.trim_start()) =>
        {
            return Err(Error::InvalidSymbol(line.to_owned()));
        }
        Err(_) => return Err(Error::MissingArrow(line.to_owned())),
    };

    let name = lhs.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(Error::InvalidSymbol(line.to_owned()));
    }

    let body = body.trim();
    if body.is_empty() {
        return Err(Error::EmptyBody(line.to_owned()));
    }

    let alternatives = match parser::alternatives(body) {
        Ok((_, alternatives)) => alternatives,
        Err(_) => return Err(Error::EmptyBody(line.to_owned())),
    };
    let alternatives = alternatives
        .into_iter()
        .map(|alternative| match parser::atoms(alternative) {
            Ok((_, atoms)) if !atoms.is_empty() => Ok(atoms),
            _ => Err(Error::EmptyAlternative(line.to_owned())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawRule { name, alternatives })
}
