use super::{EmitResult, Printer};
use luamin_ast::{Block, Node};

impl Printer {
    // =========================================================================
    // List Helpers
    // =========================================================================

    /// Emit nodes separated by `, `.
    pub(super) fn emit_list(&mut self, nodes: &[Node]) -> EmitResult {
        for (index, node) in nodes.iter().enumerate() {
            if index > 0 {
                self.writer.append(", ");
            }
            self.emit_node(node)?;
        }
        Ok(())
    }

    /// Emit `(a, b, c)`.
    pub(super) fn emit_parenthesized_list(&mut self, nodes: &[Node]) -> EmitResult {
        self.writer.append("(");
        self.emit_list(nodes)?;
        self.writer.append(")");
        Ok(())
    }

    /// Emit `(params) body end` shared by every function form.
    pub(super) fn emit_function_tail(&mut self, args: &[Node], body: &Block) -> EmitResult {
        self.emit_parenthesized_list(args)?;
        self.emit_block(body, true)?;
        self.writer.close("end");
        Ok(())
    }

    // =========================================================================
    // Parenthesization
    // =========================================================================

    /// Emit a node, adding parentheses when `needed` and the node does not
    /// already carry its own.
    pub(super) fn emit_operand(&mut self, node: &Node, needed: bool) -> EmitResult {
        if needed && !node.wrapped {
            self.writer.append("(");
            self.emit_node(node)?;
            self.writer.append(")");
            Ok(())
        } else {
            self.emit_node(node)
        }
    }

    /// Emit the base of a call, method call or index.
    pub(super) fn emit_prefix(&mut self, node: &Node) -> EmitResult {
        self.emit_operand(node, !node.is_prefix_expression())
    }
}
