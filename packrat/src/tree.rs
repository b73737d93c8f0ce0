use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt::{self, Debug, Display};
use std::mem;
use std::sync::Arc;

use crate::stack::ensure_sufficient_stack;

/// A parse tree.
///
/// Symbol names borrow from the grammar, token text from the input. Subtrees
/// are reference counted since the memo hands the same subtree to every
/// derivation that reaches it.
///
/// Trees can be as deep as the matcher's depth limit allows, so nothing that
/// walks one relies on the native stack alone: dropping and [`Tree::text`]
/// use a worklist, the trait impls grow the stack as they descend.
#[derive(Clone)]
pub enum Tree<'a> {
    /// A non-terminal, with one child per atom of the alternative that
    /// matched.
    Node {
        symbol: &'a str,
        children: Vec<Arc<Tree<'a>>>,
    },
    /// Text captured by a terminal, leading whitespace excluded.
    Token(&'a str),
}

impl<'a> Tree<'a> {
    pub fn node<I>(symbol: &'a str, children: I) -> Self
    where
        I: IntoIterator<Item = Tree<'a>>,
    {
        Tree::Node {
            symbol,
            children: children.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn token(text: &'a str) -> Self {
        Tree::Token(text)
    }

    /// The symbol of a node, `None` for tokens.
    pub fn symbol(&self) -> Option<&'a str> {
        match *self {
            Tree::Node { symbol, .. } => Some(symbol),
            Tree::Token(_) => None,
        }
    }

    pub fn children(&self) -> &[Arc<Tree<'a>>] {
        match self {
            Tree::Node { children, .. } => children,
            Tree::Token(_) => &[],
        }
    }

    /// All token text under this tree, concatenated in order. Skipped
    /// whitespace is not included.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![self];
        while let Some(tree) = pending.pop() {
            match tree {
                Tree::Token(text) => out.push_str(text),
                Tree::Node { children, .. } => {
                    pending.extend(children.iter().rev().map(|child| child.as_ref()))
                }
            }
        }
        out
    }
}

/// Unlinks subtrees one at a time instead of recursing into them. Shared
/// subtrees are left to their other owners.
impl Drop for Tree<'_> {
    fn drop(&mut self) {
        let mut pending = match self {
            Tree::Node { children, .. } => mem::take(children),
            Tree::Token(_) => return,
        };
        while let Some(child) = pending.pop() {
            if let Ok(mut tree) = Arc::try_unwrap(child) {
                if let Tree::Node { children, .. } = &mut tree {
                    pending.append(children);
                }
            }
        }
    }
}

impl PartialEq for Tree<'_> {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Tree::Token(a), Tree::Token(b)) => a == b,
            (
                Tree::Node {
                    symbol: a,
                    children: a_children,
                },
                Tree::Node {
                    symbol: b,
                    children: b_children,
                },
            ) => a == b && a_children == b_children,
            _ => false,
        })
    }
}

impl Eq for Tree<'_> {}

impl Debug for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Tree::Node { symbol, children } => f
                .debug_struct("Node")
                .field("symbol", symbol)
                .field("children", children)
                .finish(),
            Tree::Token(text) => f.debug_tuple("Token").field(text).finish(),
        })
    }
}

/// Nested list form: `["value", ["string", "\"a\""]]`.
impl Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tree::Token(text) => write!(f, "{:?}", text),
            Tree::Node { symbol, children } => {
                write!(f, "[{:?}", symbol)?;
                for child in children {
                    ensure_sufficient_stack(|| write!(f, ", {}", child))?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Serializes nodes as `[symbol, children...]` and tokens as strings.
impl Serialize for Tree<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Tree::Token(text) => serializer.serialize_str(text),
            Tree::Node { symbol, children } => {
                let mut seq = serializer.serialize_seq(Some(children.len() + 1))?;
                seq.serialize_element(symbol)?;
                for child in children {
                    ensure_sufficient_stack(|| seq.serialize_element(child.as_ref()))?;
                }
                seq.end()
            }
        }
    }
}

/// A successful match of some prefix of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<'a> {
    pub tree: Tree<'a>,
    /// Input left after the match. Empty when everything was consumed.
    pub remainder: &'a str,
}

impl Parsed<'_> {
    pub fn is_complete(&self) -> bool {
        self.remainder.is_empty()
    }
}
