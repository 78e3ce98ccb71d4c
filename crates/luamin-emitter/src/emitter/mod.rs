//! The node emitter.
//!
//! [`Printer`] walks the tree depth-first and writes each node through a
//! [`SourceWriter`]. Dispatch is a single `match` over [`NodeKind`]; the only
//! kind without a handler is [`NodeKind::Unsupported`], which records a
//! diagnostic and lets the siblings carry on.
//!
//! Handlers are split by concern:
//! - `statements`: assignments, control flow, function declarations
//! - `expressions`: calls, indexing, operators, tables
//! - `literals`: names, numbers, strings
//! - `comments`: placement of attached comments around every node

use crate::source_writer::SourceWriter;
use crate::{Options, RegenerateError, Regenerated};
use luamin_ast::{Block, Chunk, Node, NodeKind};
use luamin_common::diagnostics::format_message;
use luamin_common::limits::{MAX_EMIT_DEPTH, STACK_GROWTH, STACK_RED_ZONE};
use luamin_common::{Diagnostic, diagnostic_codes, diagnostic_messages};

mod comments;
mod expressions;
mod helpers;
mod literals;
mod statements;

pub use comments::CommentAnchor;

pub(crate) type EmitResult = Result<(), RegenerateError>;

/// How a node is being emitted by its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct NodeContext {
    /// The node follows another statement in the same body.
    pub(crate) after_statement: bool,
    /// The parent writes the node's trailing comments itself.
    pub(crate) defer_trailing: bool,
}

pub struct Printer {
    writer: SourceWriter,
    options: Options,
    diagnostics: Vec<Diagnostic>,
    depth: u32,
}

impl Printer {
    pub fn new(options: Options) -> Self {
        Printer {
            writer: SourceWriter::new(),
            options,
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    pub fn writer(&self) -> &SourceWriter {
        &self.writer
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Emit a whole chunk. The chunk body is not indented.
    pub fn print_chunk(&mut self, chunk: &Chunk) -> EmitResult {
        self.emit_block(&chunk.body, false)?;
        debug_assert_eq!(self.writer.indent_depth(), 0);
        Ok(())
    }

    /// Emit a block as if it were a chunk body.
    pub fn print_block(&mut self, block: &Block) -> EmitResult {
        self.emit_block(block, false)
    }

    pub fn finish(self) -> Regenerated {
        Regenerated {
            text: self.writer.content(),
            trace: self.writer.trace_log(),
            diagnostics: self.diagnostics,
        }
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    pub(crate) fn emit_block(&mut self, block: &Block, indent: bool) -> EmitResult {
        self.writer.append_node("Block", self.depth as usize);
        if indent {
            self.writer.indent();
        }
        self.emit_body(&block.body)?;
        if indent {
            self.writer.unindent();
        }
        Ok(())
    }

    /// Statements are separated by one line break. A statement that writes
    /// nothing takes its separator back.
    fn emit_body(&mut self, body: &[Node]) -> EmitResult {
        let mut emitted_any = false;
        for statement in body {
            if emitted_any {
                self.writer.newline();
            }
            let before = self.writer.fragment_count();
            let ctx = NodeContext {
                after_statement: emitted_any,
                defer_trailing: false,
            };
            self.emit_node_with(statement, ctx)?;
            if self.writer.fragment_count() > before {
                emitted_any = true;
            } else if emitted_any {
                self.writer.drop_last();
            }
        }
        Ok(())
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    pub(crate) fn emit_node(&mut self, node: &Node) -> EmitResult {
        self.emit_node_with(node, NodeContext::default())
    }

    pub(crate) fn emit_node_with(&mut self, node: &Node, ctx: NodeContext) -> EmitResult {
        if self.depth >= MAX_EMIT_DEPTH {
            return Err(RegenerateError::TooDeep {
                limit: MAX_EMIT_DEPTH,
            });
        }
        self.writer
            .append_node(node.kind_name(), self.depth as usize);
        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
            self.emit_node_inner(node, ctx)
        });
        self.depth -= 1;
        result
    }

    fn emit_node_inner(&mut self, node: &Node, ctx: NodeContext) -> EmitResult {
        tracing::trace!(kind = node.kind_name(), depth = self.depth, "emit node");

        self.emit_leading_comments(&node.leading_comments);
        if ctx.after_statement && statements::starts_with_paren(node) {
            self.writer.close(";");
        }

        let wrap = node.wrapped && node.kind.is_expression();
        if wrap {
            self.writer.append("(");
        }
        self.emit_kind(node)?;
        if wrap {
            self.writer.append(")");
        }

        if !ctx.defer_trailing {
            self.emit_trailing_comments(&node.trailing_comments);
        }
        Ok(())
    }

    fn emit_kind(&mut self, node: &Node) -> EmitResult {
        match &node.kind {
            // Statements
            NodeKind::Assign { targets, values } => self.emit_assign(targets, values, false),
            NodeKind::LocalAssign { targets, values } => self.emit_assign(targets, values, true),
            NodeKind::While { test, body } => self.emit_while(test, body),
            NodeKind::Do { body } => self.emit_do(body),
            NodeKind::Repeat { body, test } => self.emit_repeat(body, test),
            NodeKind::If { test, body, orelse } => self.emit_if(test, body, orelse.as_ref()),
            NodeKind::ElseIf { test, body, orelse } => {
                self.emit_else_if(test, body, orelse.as_ref())
            }
            NodeKind::Label { id } => {
                self.emit_label(id);
                Ok(())
            }
            NodeKind::Goto { label } => {
                self.emit_goto(label);
                Ok(())
            }
            NodeKind::SemiColon => Ok(()),
            NodeKind::Break => {
                self.writer.append("break");
                Ok(())
            }
            NodeKind::Return { values } => self.emit_return(values),
            NodeKind::Fornum {
                target,
                start,
                stop,
                step,
                body,
            } => self.emit_fornum(target, start, stop, step.as_deref(), body),
            NodeKind::Forin {
                targets,
                iter,
                body,
            } => self.emit_forin(targets, iter, body),
            NodeKind::Function { name, args, body } => self.emit_function(name, args, body),
            NodeKind::LocalFunction { name, args, body } => {
                self.emit_local_function(name, args, body)
            }
            NodeKind::Method {
                source,
                name,
                args,
                body,
            } => self.emit_method(source, name, args, body),
            NodeKind::Comment { text } => {
                self.emit_comment_statement(text);
                Ok(())
            }

            // Expressions
            NodeKind::Call { func, args } => self.emit_call(func, args),
            NodeKind::Invoke { source, func, args } => self.emit_invoke(source, func, args),
            NodeKind::Index {
                value,
                idx,
                notation,
            } => self.emit_index(value, idx, *notation),
            NodeKind::Table { fields } => self.emit_table(fields),
            NodeKind::Field {
                key,
                value,
                between_brackets,
            } => self.emit_field(key.as_deref(), value, *between_brackets),
            NodeKind::AnonymousFunction { args, body } => {
                self.emit_anonymous_function(args, body)
            }
            NodeKind::BinaryOp { op, left, right } => self.emit_binary(*op, left, right),
            NodeKind::UnaryOp { op, operand } => self.emit_unary(*op, operand),
            NodeKind::Name { id } => {
                self.emit_name(id);
                Ok(())
            }
            NodeKind::Nil => {
                self.writer.append("nil");
                Ok(())
            }
            NodeKind::True => {
                self.writer.append("true");
                Ok(())
            }
            NodeKind::False => {
                self.writer.append("false");
                Ok(())
            }
            NodeKind::Number { n } => {
                self.emit_number(n);
                Ok(())
            }
            NodeKind::Varargs => {
                self.writer.append("...");
                Ok(())
            }
            NodeKind::String { s, delimiter } => {
                self.emit_string(s, *delimiter);
                Ok(())
            }

            NodeKind::Unsupported { name } => {
                self.report(Diagnostic::error(
                    format_message(diagnostic_messages::EMITTER_NOT_IMPLEMENTED, &[name.as_str()]),
                    diagnostic_codes::EMITTER_NOT_IMPLEMENTED,
                ));
                Ok(())
            }
        }
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(code = diagnostic.code, message = %diagnostic.message_text, "recoverable emit error");
        self.diagnostics.push(diagnostic);
    }
}
