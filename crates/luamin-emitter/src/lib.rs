//! Lua source regeneration.
//!
//! Given a tree produced by an external Lua parser, [`regenerate`] re-emits
//! syntactically valid Lua text. Comments are dropped unless
//! [`Options::keep_comments`] is set; table fields keyed by a name can be
//! forced into bracket notation with [`Options::keep_table_field_brackets`].
//!
//! ```
//! use luamin_ast::{Chunk, Node};
//! use luamin_emitter::{Options, regenerate};
//!
//! let chunk = Chunk::new(vec![Node::local_assign(
//!     vec![Node::name("x")],
//!     vec![Node::number("1")],
//! )]);
//! let out = regenerate(&Ok(chunk), Options::default()).unwrap();
//! assert_eq!(out.text.trim(), "local x = 1");
//! ```
//!
//! Every call owns its [`source_writer::SourceWriter`] and diagnostic list,
//! so independent files can be regenerated on separate threads.

use luamin_ast::{Block, Chunk, ParseFailure, SourceTree};
use luamin_common::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod emitter;
pub mod source_writer;

pub use emitter::{CommentAnchor, Printer};
pub use source_writer::{FragmentKind, SourceWriter};

/// Per-run emission options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Write name-keyed fields as `["name"] = v` instead of `name = v`.
    pub keep_table_field_brackets: bool,
    pub keep_comments: bool,
}

/// Output of one successful regeneration.
#[derive(Clone, Debug, Default)]
pub struct Regenerated {
    pub text: String,
    /// Node kind names, one per line, indented by tree depth.
    pub trace: String,
    /// Recoverable problems met while emitting.
    pub diagnostics: Vec<Diagnostic>,
}

impl Regenerated {
    /// Diagnostics joined one per line, or `None` when there were none.
    pub fn errors(&self) -> Option<String> {
        if self.diagnostics.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .diagnostics
            .iter()
            .map(|d| d.message_text.clone())
            .collect();
        Some(lines.join("\n"))
    }
}

/// Failures that abort the whole call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegenerateError {
    #[error("parse failed: {0}")]
    Parse(ParseFailure),
    #[error("syntax tree nests deeper than {limit} nodes")]
    TooDeep { limit: u32 },
}

/// Regenerate a parsed source unit.
///
/// A tree whose upstream parse failed is reported without emitting anything.
pub fn regenerate(tree: &SourceTree, options: Options) -> Result<Regenerated, RegenerateError> {
    match tree {
        Ok(chunk) => regenerate_chunk(chunk, options),
        Err(failure) => Err(RegenerateError::Parse(failure.clone())),
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(statements = chunk.body.body.len()))]
pub fn regenerate_chunk(chunk: &Chunk, options: Options) -> Result<Regenerated, RegenerateError> {
    let mut printer = Printer::new(options);
    printer.print_chunk(chunk)?;
    Ok(printer.finish())
}

/// Regenerate one block on its own, as used for nesting snippets.
///
/// The block is written at depth 0, like a chunk body.
pub fn regenerate_block(block: &Block, options: Options) -> Result<Regenerated, RegenerateError> {
    let mut printer = Printer::new(options);
    printer.print_block(block)?;
    Ok(printer.finish())
}
