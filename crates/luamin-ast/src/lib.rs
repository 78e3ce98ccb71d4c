//! Lua syntax tree model.
//!
//! The tree is produced by an external Lua parser and handed to this
//! workspace either directly (through the builder constructors on [`Node`])
//! or as JSON through serde. Nothing in this crate tokenizes or parses Lua.
//!
//! - [`node`]: `Chunk`, `Block`, `Node` and the closed `NodeKind` enum
//! - [`operators`]: binary/unary operators with their Lua binding priorities
//! - [`visit`]: depth-first `Visitor` walk with a recursion limit

pub mod node;
pub use node::{
    Block, Chunk, Comment, ElseBranch, IndexNotation, Node, NodeKind, ParseFailure, Position,
    SourceTree, StringDelimiter,
};

pub mod operators;
pub use operators::{BinaryOperator, Priority, UNARY_PRIORITY, UnaryOperator};

pub mod visit;
pub use visit::{DepthExceeded, Visitor, walk_block, walk_chunk, walk_node};
