//! AST node model for the garnet compiler.
//!
//! The parsing front end is an external collaborator: it hands the emitter a
//! tree of [`AstNode`] values annotated with source positions. Nodes are
//! immutable once built; rewrites (`returns`, the single-statement sequence
//! optimization) always derive a new node with [`AstNode::updated`].
//!
//! Trees can also be delivered as JSON through `serde`, which is how tooling
//! outside the Rust process feeds the emitter.

pub mod tag;
pub use tag::{Tag, UnknownTag};

pub mod node;
pub use node::{AstNode, Child, InvalidFlags, Literal, NodeFlags};

// Node construction helpers (`s(...)`-style) for the parser and tests
pub mod build;

#[cfg(test)]
#[path = "tests/node_tests.rs"]
mod node_tests;
