use super::{EmitResult, Printer};
use luamin_ast::{Block, ElseBranch, Node, NodeKind};

impl Printer {
    // =========================================================================
    // Assignments
    // =========================================================================

    pub(super) fn emit_assign(&mut self, targets: &[Node], values: &[Node], local: bool) -> EmitResult {
        if local {
            self.writer.append("local ");
        }
        self.emit_list(targets)?;
        if !values.is_empty() {
            self.writer.append(" = ");
            self.emit_list(values)?;
        }
        Ok(())
    }

    pub(super) fn emit_return(&mut self, values: &[Node]) -> EmitResult {
        self.writer.append("return");
        if !values.is_empty() {
            self.writer.append(" ");
            self.emit_list(values)?;
        }
        Ok(())
    }

    pub(super) fn emit_label(&mut self, id: &str) {
        self.writer.append(&format!("::{id}::"));
    }

    pub(super) fn emit_goto(&mut self, label: &str) {
        self.writer.append(&format!("goto {label}"));
    }

    // =========================================================================
    // Loops
    // =========================================================================

    pub(super) fn emit_while(&mut self, test: &Node, body: &Block) -> EmitResult {
        self.writer.append("while ");
        self.emit_node(test)?;
        self.writer.append(" do");
        self.emit_block(body, true)?;
        self.writer.close("end");
        Ok(())
    }

    pub(super) fn emit_do(&mut self, body: &Block) -> EmitResult {
        self.writer.append("do");
        self.emit_block(body, true)?;
        self.writer.close("end");
        Ok(())
    }

    pub(super) fn emit_repeat(&mut self, body: &Block, test: &Node) -> EmitResult {
        self.writer.append("repeat");
        self.emit_block(body, true)?;
        self.writer.append("until ");
        self.emit_node(test)
    }

    pub(super) fn emit_fornum(
        &mut self,
        target: &str,
        start: &Node,
        stop: &Node,
        step: Option<&Node>,
        body: &Block,
    ) -> EmitResult {
        self.writer.append("for ");
        self.writer.append(target);
        self.writer.append(" = ");
        self.emit_node(start)?;
        self.writer.append(", ");
        self.emit_node(stop)?;
        if let Some(step) = step {
            self.writer.append(", ");
            self.emit_node(step)?;
        }
        self.writer.append(" do");
        self.emit_block(body, true)?;
        self.writer.close("end");
        Ok(())
    }

    pub(super) fn emit_forin(&mut self, targets: &[Node], iter: &[Node], body: &Block) -> EmitResult {
        self.writer.append("for ");
        self.emit_list(targets)?;
        self.writer.append(" in ");
        self.emit_list(iter)?;
        self.writer.append(" do");
        self.emit_block(body, true)?;
        self.writer.close("end");
        Ok(())
    }

    // =========================================================================
    // Conditionals
    // =========================================================================

    pub(super) fn emit_if(&mut self, test: &Node, body: &Block, orelse: Option<&ElseBranch>) -> EmitResult {
        self.writer.append("if ");
        self.emit_node(test)?;
        self.writer.append(" then");
        self.emit_block(body, true)?;
        self.emit_orelse(orelse)?;
        self.writer.close("end");
        Ok(())
    }

    pub(super) fn emit_else_if(
        &mut self,
        test: &Node,
        body: &Block,
        orelse: Option<&ElseBranch>,
    ) -> EmitResult {
        self.writer.append("elseif ");
        self.emit_node(test)?;
        self.writer.append(" then");
        self.emit_block(body, true)?;
        self.emit_orelse(orelse)
    }

    fn emit_orelse(&mut self, orelse: Option<&ElseBranch>) -> EmitResult {
        match orelse {
            Some(ElseBranch::Else(block)) => {
                self.writer.append("else");
                self.emit_block(block, true)
            }
            Some(ElseBranch::ElseIf(node)) => self.emit_node(node),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    pub(super) fn emit_function(&mut self, name: &Node, args: &[Node], body: &Block) -> EmitResult {
        self.writer.append("function ");
        self.emit_node(name)?;
        self.emit_function_tail(args, body)
    }

    pub(super) fn emit_local_function(&mut self, name: &str, args: &[Node], body: &Block) -> EmitResult {
        self.writer.append("local function ");
        self.writer.append(name);
        self.emit_function_tail(args, body)
    }

    pub(super) fn emit_method(
        &mut self,
        source: &Node,
        name: &str,
        args: &[Node],
        body: &Block,
    ) -> EmitResult {
        self.writer.append("function ");
        self.emit_node(source)?;
        self.writer.append(":");
        self.writer.append(name);
        self.emit_function_tail(args, body)
    }
}

/// Whether a statement's text begins with `(`.
///
/// Lua reads `a = b` followed by `(f)()` on the next line as the single
/// call `b(f)()`, so such statements get a `;` in front.
pub(super) fn starts_with_paren(mut node: &Node) -> bool {
    loop {
        if node.wrapped && node.kind.is_expression() {
            return true;
        }
        match &node.kind {
            NodeKind::Call { func: base, .. }
            | NodeKind::Invoke { source: base, .. }
            | NodeKind::Index { value: base, .. } => {
                if !base.is_prefix_expression() {
                    return true;
                }
                node = base.as_ref();
            }
            NodeKind::Assign { targets, .. } => match targets.first() {
                Some(target) => node = target,
                None => return false,
            },
            _ => return false,
        }
    }
}
