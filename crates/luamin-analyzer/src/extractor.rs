//! String literal and comment extraction.
//!
//! Comments attached to a node report that node's position; free-standing
//! comment statements report their own.

use crate::AnalysisFailure;
use luamin_ast::{Comment, Node, NodeKind, SourceTree, Visitor, walk_chunk};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Element {
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Elements {
    pub strings: Vec<Element>,
    pub comments: Vec<Element>,
}

/// Collects elements in source order.
#[derive(Default)]
pub struct ElementExtractor {
    elements: Elements,
}

impl ElementExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> Elements {
        self.elements
    }

    fn push_comments(&mut self, node: &Node, comments: &[Comment]) {
        for comment in comments {
            self.elements.comments.push(element(node, &comment.text));
        }
    }
}

fn element(node: &Node, text: &str) -> Element {
    Element {
        line: node.position.map(|p| p.line),
        column: node.position.map(|p| p.column),
        text: text.to_string(),
    }
}

impl<'ast> Visitor<'ast> for ElementExtractor {
    fn visit_node(&mut self, node: &'ast Node) {
        self.push_comments(node, &node.leading_comments);
        match &node.kind {
            NodeKind::String { s, .. } => self.elements.strings.push(element(node, s)),
            NodeKind::Comment { text } => self.elements.comments.push(element(node, text)),
            _ => {}
        }
        // Listed before the node's children, which the walk visits next.
        self.push_comments(node, &node.trailing_comments);
    }
}

/// Every string literal and comment of a parsed source unit.
pub fn extract_elements(tree: &SourceTree) -> Result<Elements, AnalysisFailure> {
    let chunk = tree.as_ref().map_err(|failure| AnalysisFailure::Parse(failure.clone()))?;
    let mut extractor = ElementExtractor::new();
    walk_chunk(&mut extractor, chunk)?;
    Ok(extractor.finish())
}
