use std::sync::Arc;

use grammar::{Atom, Grammar};
use tracing::debug;

use crate::memo::{Entry, Memo, MemoStats};
use crate::stack::ensure_sufficient_stack;
use crate::{MatchError, Options, Parsed, Tree};

/// Children matched so far by a sequence, and the position after them.
type SequenceMatch<'a> = Option<(Vec<Arc<Tree<'a>>>, usize)>;

/// Matches one input against a grammar.
///
/// Owns the memo for that input, so a matcher is good for exactly one text.
/// Alternatives are tried in order and the first that matches wins; within
/// an alternative, a failing atom fails the whole alternative without
/// retrying earlier atoms.
pub struct Matcher<'a> {
    grammar: &'a Grammar,
    text: &'a str,
    options: Options,
    memo: Memo<'a>,
    depth: usize,
}

impl<'a> Matcher<'a> {
    pub fn new(grammar: &'a Grammar, text: &'a str, options: Options) -> Self {
        Matcher {
            grammar,
            text,
            options,
            memo: Memo::new(options.is_memoized()),
            depth: 0,
        }
    }

    /// Matches a prefix of the text against `start`.
    pub fn run(&mut self, start: &str) -> Result<Option<Parsed<'a>>, MatchError> {
        let id = self
            .grammar
            .symbol(start)
            .ok_or_else(|| MatchError::UnknownSymbol(start.to_owned()))?;
        let result = self.match_atom(Atom::NonTerminal(id), 0)?;

        let stats = self.memo.stats();
        debug!(
            matched = result.is_some(),
            hits = stats.hits,
            misses = stats.misses,
            "parse finished"
        );

        let text = self.text;
        Ok(result.map(|(tree, end)| Parsed {
            tree: Arc::try_unwrap(tree).unwrap_or_else(|tree| (*tree).clone()),
            remainder: &text[end..],
        }))
    }

    pub fn stats(&self) -> MemoStats {
        self.memo.stats()
    }

    /// Number of distinct (atom, position) pairs remembered.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    fn match_atom(&mut self, atom: Atom, pos: usize) -> Result<Entry<'a>, MatchError> {
        if let Some(entry) = self.memo.get(atom, pos) {
            return Ok(entry);
        }
        if self.depth >= self.options.depth_limit() {
            return Err(MatchError::StackLimitExceeded { depth: self.depth });
        }

        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.evaluate(atom, pos));
        self.depth -= 1;

        let entry = result?;
        self.memo.insert(atom, pos, entry.clone());
        Ok(entry)
    }

    fn evaluate(&mut self, atom: Atom, pos: usize) -> Result<Entry<'a>, MatchError> {
        let grammar = self.grammar;
        match atom {
            Atom::NonTerminal(id) => {
                let rule = grammar.rule(id);
                for alternative in rule.alternatives() {
                    if let Some((children, end)) = self.match_sequence(alternative, pos)? {
                        let tree = Tree::Node {
                            symbol: rule.name(),
                            children,
                        };
                        return Ok(Some((Arc::new(tree), end)));
                    }
                }
                Ok(None)
            }
            Atom::Terminal(id) => {
                let text = self.text;
                let token = grammar.tokenizer(id)?.tokenize(&text[pos..]);
                Ok(token.map(|token| (Arc::new(Tree::Token(token.text)), pos + token.end)))
            }
        }
    }

    fn match_sequence(
        &mut self,
        atoms: &[Atom],
        mut pos: usize,
    ) -> Result<SequenceMatch<'a>, MatchError> {
        let mut children = Vec::with_capacity(atoms.len());
        for &atom in atoms {
            match self.match_atom(atom, pos)? {
                Some((tree, end)) => {
                    children.push(tree);
                    pos = end;
                }
                None => return Ok(None),
            }
        }
        Ok(Some((children, pos)))
    }
}
