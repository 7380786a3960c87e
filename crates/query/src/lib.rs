//! # Boolean query AST
//!
//! A small tree of `AND`/`OR` nodes over word literals, evaluated against
//! a caller-supplied [`Resolver`] that maps a word to its posting set.
//!
//! The tree is shallow by design (two internal node kinds plus a
//! literal) and is represented as a tagged enum rather than a trait
//! object hierarchy — there is no need for virtual dispatch on the node
//! kind itself, only on the resolver callback.
//!
//! `And`/`Or` children are `Option<Node>` rather than bare `Node`: the
//! pattern index builds its query by repeatedly wrapping a growing `And`
//! around a `None` sentinel and a new literal, one segment at a time,
//! and a `None` child is simply skipped during evaluation.

use docset::DocSet;

/// A node in the boolean query tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single word literal, resolved via [`Resolver::resolve`].
    Literal(String),
    /// Conjunction. Identity (empty `And`) is the universe (all docs).
    And(Vec<Option<Node>>),
    /// Disjunction. Identity (empty `Or`) is the empty set.
    Or(Vec<Option<Node>>),
}

/// Resolves a word literal to the set of documents containing it.
///
/// An explicit single-method interface rather than a closure capturing
/// interior-mutable state, so implementors can use whichever
/// index-backed lookup they like (see `word_index`'s
/// `WordIndexResolver`).
pub trait Resolver<const N: usize> {
    /// Looks up the set of documents containing `word`.
    fn resolve(&self, word: &str) -> DocSet<N>;
}

impl Node {
    /// Convenience constructor for a literal node.
    pub fn lit(word: impl Into<String>) -> Node {
        Node::Literal(word.into())
    }

    /// Evaluates the tree against `resolver`.
    ///
    /// Evaluation is pure: nothing is cached across calls, and the same
    /// tree can be evaluated against different resolvers to get
    /// different results.
    pub fn eval<const N: usize>(&self, resolver: &dyn Resolver<N>) -> DocSet<N> {
        match self {
            Node::Literal(word) => resolver.resolve(word),
            Node::And(children) => {
                let mut acc: DocSet<N> = DocSet::new();
                acc.set_all();
                for child in children {
                    if let Some(child) = child {
                        acc = acc.and(&child.eval(resolver));
                    }
                }
                acc
            }
            Node::Or(children) => {
                let mut acc: DocSet<N> = DocSet::new();
                for child in children {
                    if let Some(child) = child {
                        acc = acc.or(&child.eval(resolver));
                    }
                }
                acc
            }
        }
    }
}

/// Builds an `And` node from word literals.
pub fn and(words: impl IntoIterator<Item = impl Into<String>>) -> Node {
    Node::And(words.into_iter().map(|w| Some(Node::lit(w))).collect())
}

/// Builds an `Or` node from word literals.
pub fn or(words: impl IntoIterator<Item = impl Into<String>>) -> Node {
    Node::Or(words.into_iter().map(|w| Some(Node::lit(w))).collect())
}

#[cfg(test)]
mod tests;
