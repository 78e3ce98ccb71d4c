use super::{EmitResult, NodeContext, Printer};
use luamin_ast::{
    BinaryOperator, Block, IndexNotation, Node, NodeKind, UNARY_PRIORITY, UnaryOperator,
};
use luamin_common::diagnostics::format_message;
use luamin_common::{Diagnostic, diagnostic_codes, diagnostic_messages};

impl Printer {
    // =========================================================================
    // Calls and Indexing
    // =========================================================================

    pub(super) fn emit_call(&mut self, func: &Node, args: &[Node]) -> EmitResult {
        self.emit_prefix(func)?;
        self.emit_parenthesized_list(args)
    }

    pub(super) fn emit_invoke(&mut self, source: &Node, func: &str, args: &[Node]) -> EmitResult {
        self.emit_prefix(source)?;
        self.writer.append(":");
        self.writer.append(func);
        self.emit_parenthesized_list(args)
    }

    pub(super) fn emit_index(&mut self, value: &Node, idx: &Node, notation: IndexNotation) -> EmitResult {
        self.emit_prefix(value)?;
        match (notation, &idx.kind) {
            (IndexNotation::Dot, NodeKind::Name { .. }) => {
                self.writer.append(".");
                self.emit_node(idx)
            }
            (IndexNotation::Dot, _) => {
                self.report(Diagnostic::warning(
                    format_message(diagnostic_messages::DOT_KEY_NOT_A_NAME, &[idx.kind_name()]),
                    diagnostic_codes::KEY_NOTATION_MISMATCH,
                ));
                self.emit_bracketed(idx)
            }
            (IndexNotation::Square, _) => self.emit_bracketed(idx),
        }
    }

    fn emit_bracketed(&mut self, key: &Node) -> EmitResult {
        self.writer.append("[");
        self.emit_node(key)?;
        self.writer.append("]");
        Ok(())
    }

    // =========================================================================
    // Tables
    // =========================================================================

    /// Tables with more than one field put each field on its own line.
    ///
    /// A field's trailing comments go after its separator so that a line
    /// comment never swallows the comma.
    pub(super) fn emit_table(&mut self, fields: &[Node]) -> EmitResult {
        self.writer.open_scope("{");
        let multiline = fields.len() > 1;
        if multiline {
            self.writer.indent();
        }
        let deferred = NodeContext {
            after_statement: false,
            defer_trailing: true,
        };
        for (index, field) in fields.iter().enumerate() {
            self.emit_node_with(field, deferred)?;
            if index + 1 < fields.len() {
                if self.writer.ends_with_break() {
                    self.writer.drop_last();
                }
                self.writer.close(",");
                self.emit_trailing_comments(&field.trailing_comments);
                self.writer.newline();
            } else {
                self.emit_trailing_comments(&field.trailing_comments);
            }
        }
        if multiline {
            self.writer.unindent();
        }
        self.writer.close("}");
        Ok(())
    }

    pub(super) fn emit_field(&mut self, key: Option<&Node>, value: &Node, between_brackets: bool) -> EmitResult {
        let Some(key) = key else {
            return self.emit_node(value);
        };
        match &key.kind {
            NodeKind::Name { id } if !between_brackets => {
                if self.options.keep_table_field_brackets {
                    self.writer.append("[");
                    self.emit_string(id, luamin_ast::StringDelimiter::DoubleQuote);
                    self.writer.append("]");
                } else {
                    self.emit_node(key)?;
                }
            }
            _ => {
                if !between_brackets {
                    self.report(Diagnostic::warning(
                        format_message(diagnostic_messages::DOT_KEY_NOT_A_NAME, &[key.kind_name()]),
                        diagnostic_codes::KEY_NOTATION_MISMATCH,
                    ));
                }
                self.emit_bracketed(key)?;
            }
        }
        self.writer.append(" = ");
        self.emit_node(value)
    }

    pub(super) fn emit_anonymous_function(&mut self, args: &[Node], body: &Block) -> EmitResult {
        self.writer.append("function");
        self.emit_function_tail(args, body)
    }

    // =========================================================================
    // Operators
    // =========================================================================

    pub(super) fn emit_binary(&mut self, op: BinaryOperator, left: &Node, right: &Node) -> EmitResult {
        let priority = op.priority();
        let left_needs = match &left.kind {
            NodeKind::BinaryOp { op: inner, .. } => priority.left > inner.priority().right,
            NodeKind::UnaryOp { .. } => priority.left > UNARY_PRIORITY,
            _ => false,
        };
        let right_needs = match &right.kind {
            NodeKind::BinaryOp { op: inner, .. } => inner.priority().left <= priority.right,
            _ => false,
        };
        self.emit_operand(left, left_needs)?;
        self.writer.append(" ");
        self.writer.append(op.symbol());
        self.writer.append(" ");
        self.emit_operand(right, right_needs)
    }

    /// `not` always parenthesizes its operand; `-` keeps a space before a
    /// second `-` so the pair never reads as a comment.
    pub(super) fn emit_unary(&mut self, op: UnaryOperator, operand: &Node) -> EmitResult {
        if op == UnaryOperator::Not {
            self.writer.append("not (");
            self.emit_node(operand)?;
            self.writer.append(")");
            return Ok(());
        }
        self.writer.append(op.symbol());
        if op == UnaryOperator::Minus && !operand.wrapped && starts_with_minus(operand) {
            self.writer.append(" ");
        }
        let needs = match &operand.kind {
            NodeKind::BinaryOp { op: inner, .. } => inner.priority().left <= UNARY_PRIORITY,
            _ => false,
        };
        self.emit_operand(operand, needs)
    }
}

/// Whether the operand's text would begin with `-`.
fn starts_with_minus(mut node: &Node) -> bool {
    loop {
        match &node.kind {
            NodeKind::UnaryOp {
                op: UnaryOperator::Minus,
                ..
            } => return true,
            NodeKind::Number { n } => return n.starts_with('-'),
            NodeKind::BinaryOp { op, left, .. } => {
                // A binary operand is either parenthesized or starts with its left side.
                let parenthesized = op.priority().left <= UNARY_PRIORITY;
                if parenthesized || left.wrapped {
                    return false;
                }
                node = left.as_ref();
            }
            _ => return false,
        }
    }
}
