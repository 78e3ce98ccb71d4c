//! Depth-first traversal over the syntax tree.
//!
//! Implementors override only the hooks they need. The walk calls
//! [`Visitor::visit_node`] before descending into a node's children and
//! brackets every block (chunk body, loop body, function body, branch body)
//! with [`Visitor::enter_block`] / [`Visitor::exit_block`]. Children are
//! visited in source order.

use crate::node::{Block, Chunk, ElseBranch, Node, NodeKind};
use luamin_common::limits::{MAX_WALK_DEPTH, STACK_GROWTH, STACK_RED_ZONE};
use thiserror::Error;

/// The tree nests deeper than the walker's recursion limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("syntax tree nests deeper than {limit} nodes")]
pub struct DepthExceeded {
    pub limit: u32,
}

pub trait Visitor<'ast> {
    fn enter_block(&mut self, _block: &'ast Block) {}

    fn exit_block(&mut self, _block: &'ast Block) {}

    fn visit_node(&mut self, _node: &'ast Node) {}
}

struct Walker<'v, V> {
    visitor: &'v mut V,
    depth: u32,
    limit: u32,
}

pub fn walk_chunk<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    chunk: &'ast Chunk,
) -> Result<(), DepthExceeded> {
    walk_block(visitor, &chunk.body)
}

pub fn walk_block<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    block: &'ast Block,
) -> Result<(), DepthExceeded> {
    Walker::new(visitor).block(block)
}

pub fn walk_node<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    node: &'ast Node,
) -> Result<(), DepthExceeded> {
    Walker::new(visitor).node(node)
}

impl<'v, 'ast, V: Visitor<'ast>> Walker<'v, V> {
    fn new(visitor: &'v mut V) -> Self {
        Walker {
            visitor,
            depth: 0,
            limit: MAX_WALK_DEPTH,
        }
    }

    fn block(&mut self, block: &'ast Block) -> Result<(), DepthExceeded> {
        self.visitor.enter_block(block);
        for statement in &block.body {
            self.node(statement)?;
        }
        self.visitor.exit_block(block);
        Ok(())
    }

    fn nodes(&mut self, nodes: &'ast [Node]) -> Result<(), DepthExceeded> {
        for node in nodes {
            self.node(node)?;
        }
        Ok(())
    }

    fn orelse(&mut self, orelse: &'ast Option<ElseBranch>) -> Result<(), DepthExceeded> {
        match orelse {
            Some(ElseBranch::Else(block)) => self.block(block),
            Some(ElseBranch::ElseIf(node)) => self.node(node),
            None => Ok(()),
        }
    }

    fn node(&mut self, node: &'ast Node) -> Result<(), DepthExceeded> {
        if self.depth >= self.limit {
            return Err(DepthExceeded { limit: self.limit });
        }
        self.depth += 1;
        self.visitor.visit_node(node);
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || self.children(node));
        self.depth -= 1;
        result
    }

    fn children(&mut self, node: &'ast Node) -> Result<(), DepthExceeded> {
        match &node.kind {
            NodeKind::Assign { targets, values } | NodeKind::LocalAssign { targets, values } => {
                self.nodes(targets)?;
                self.nodes(values)
            }
            NodeKind::While { test, body } => {
                self.node(test)?;
                self.block(body)
            }
            NodeKind::Do { body } => self.block(body),
            NodeKind::Repeat { body, test } => {
                self.block(body)?;
                self.node(test)
            }
            NodeKind::If { test, body, orelse } | NodeKind::ElseIf { test, body, orelse } => {
                self.node(test)?;
                self.block(body)?;
                self.orelse(orelse)
            }
            NodeKind::Return { values } => self.nodes(values),
            NodeKind::Fornum {
                start,
                stop,
                step,
                body,
                ..
            } => {
                self.node(start)?;
                self.node(stop)?;
                if let Some(step) = step {
                    self.node(step)?;
                }
                self.block(body)
            }
            NodeKind::Forin {
                targets,
                iter,
                body,
            } => {
                self.nodes(targets)?;
                self.nodes(iter)?;
                self.block(body)
            }
            NodeKind::Call { func, args } => {
                self.node(func)?;
                self.nodes(args)
            }
            NodeKind::Invoke { source, args, .. } => {
                self.node(source)?;
                self.nodes(args)
            }
            NodeKind::Function { name, args, body } => {
                self.node(name)?;
                self.nodes(args)?;
                self.block(body)
            }
            NodeKind::LocalFunction { args, body, .. }
            | NodeKind::AnonymousFunction { args, body } => {
                self.nodes(args)?;
                self.block(body)
            }
            NodeKind::Method {
                source, args, body, ..
            } => {
                self.node(source)?;
                self.nodes(args)?;
                self.block(body)
            }
            NodeKind::Index { value, idx, .. } => {
                self.node(value)?;
                self.node(idx)
            }
            NodeKind::Table { fields } => self.nodes(fields),
            NodeKind::Field { key, value, .. } => {
                if let Some(key) = key {
                    self.node(key)?;
                }
                self.node(value)
            }
            NodeKind::BinaryOp { left, right, .. } => {
                self.node(left)?;
                self.node(right)
            }
            NodeKind::UnaryOp { operand, .. } => self.node(operand),
            NodeKind::Label { .. }
            | NodeKind::Goto { .. }
            | NodeKind::SemiColon
            | NodeKind::Break
            | NodeKind::Comment { .. }
            | NodeKind::Name { .. }
            | NodeKind::Nil
            | NodeKind::True
            | NodeKind::False
            | NodeKind::Number { .. }
            | NodeKind::Varargs
            | NodeKind::String { .. }
            | NodeKind::Unsupported { .. } => Ok(()),
        }
    }
}
