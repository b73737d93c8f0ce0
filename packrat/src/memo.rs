use std::sync::Arc;

use grammar::Atom;
use rustc_hash::FxHashMap;

use crate::Tree;

/// Outcome of matching one atom at one position: the tree and the position
/// after it, or `None` if the atom did not match.
pub type Entry<'a> = Option<(Arc<Tree<'a>>, usize)>;

/// Counters for a single parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Lookups answered from the memo.
    pub hits: usize,
    /// Atoms actually evaluated.
    pub misses: usize,
}

/// Results keyed by atom and byte offset.
///
/// Every text the matcher looks at is a suffix of the one input, so the
/// offset stands in for the remaining text itself.
#[derive(Debug)]
pub struct Memo<'a> {
    enabled: bool,
    entries: FxHashMap<(Atom, usize), Entry<'a>>,
    stats: MemoStats,
}

impl<'a> Memo<'a> {
    pub fn new(enabled: bool) -> Self {
        Memo {
            enabled,
            entries: FxHashMap::default(),
            stats: MemoStats::default(),
        }
    }

    pub fn get(&mut self, atom: Atom, pos: usize) -> Option<Entry<'a>> {
        let entry = self.entries.get(&(atom, pos)).cloned();
        if entry.is_some() {
            self.stats.hits += 1;
        }
        entry
    }

    pub fn insert(&mut self, atom: Atom, pos: usize, entry: Entry<'a>) {
        self.stats.misses += 1;
        if self.enabled {
            self.entries.insert((atom, pos), entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom() -> Atom {
        let g = grammar::compile("a => b").unwrap();
        g.rule(g.symbol("a").unwrap()).alternatives()[0][0]
    }

    #[test]
    fn remembers_failures_and_matches() {
        let mut memo = Memo::new(true);
        let a = atom();
        memo.insert(a, 0, None);
        memo.insert(a, 1, Some((Arc::new(Tree::token("b")), 2)));

        assert_eq!(memo.get(a, 0), Some(None));
        assert_eq!(memo.get(a, 1), Some(Some((Arc::new(Tree::token("b")), 2))));
        assert_eq!(memo.get(a, 2), None);
        assert_eq!(memo.stats(), MemoStats { hits: 2, misses: 2 });
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn disabled_memo_stores_nothing() {
        let mut memo = Memo::new(false);
        let a = atom();
        memo.insert(a, 0, None);
        assert_eq!(memo.get(a, 0), None);
        assert_eq!(memo.len(), 0);
        assert_eq!(memo.stats().misses, 1);
    }
}
