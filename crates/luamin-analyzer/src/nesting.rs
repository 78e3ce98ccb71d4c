//! Block-nesting analysis.
//!
//! Every block the walk enters (chunk body, loop body, function body, branch
//! body) is recorded at its nesting level. Level 0 holds the chunk body
//! alone, so a file's deepest nesting is the number of levels minus one.
//!
//! Blocks refer to their enclosing block by [`BlockId`], the order in which
//! the walk entered them. Ids index [`NestingReport::block`]; the tree itself
//! is only borrowed.

use crate::AnalysisFailure;
use luamin_ast::{Block, SourceTree, Visitor, walk_chunk};
use luamin_emitter::{Options, RegenerateError, regenerate_block};
use serde::Serialize;

/// Position of a block in walk order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BlockId(pub usize);

/// One recorded block.
#[derive(Clone, Copy, Debug)]
pub struct WrapBlock<'a> {
    pub block: &'a Block,
    pub id: BlockId,
    pub parent: Option<BlockId>,
    pub level: usize,
}

/// Display record for a block, detached from the tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub id: BlockId,
    pub level: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<BlockId>,
    pub statements: usize,
    /// Line of the first statement, when the parser recorded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl<'a> WrapBlock<'a> {
    /// Banner line followed by the block's regenerated text.
    pub fn render_snippet(&self) -> Result<String, RegenerateError> {
        self.render_snippet_with(Options::default())
    }

    pub fn render_snippet_with(&self, options: Options) -> Result<String, RegenerateError> {
        let out = regenerate_block(self.block, options)?;
        Ok(format!("[nesting level {}]\n{}", self.level, out.text))
    }

    pub fn info(&self) -> BlockInfo {
        BlockInfo {
            id: self.id,
            level: self.level,
            parent: self.parent,
            statements: self.block.body.len(),
            line: self
                .block
                .body
                .first()
                .and_then(|node| node.position)
                .map(|position| position.line),
        }
    }
}

// =============================================================================
// Visitor
// =============================================================================

/// Records blocks by level as the walk enters them.
#[derive(Default)]
pub struct NestedVisitor<'a> {
    stack: Vec<BlockId>,
    current_level: usize,
    levels: Vec<Vec<WrapBlock<'a>>>,
    entered: usize,
}

impl<'a> NestedVisitor<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_levels(self) -> Vec<Vec<WrapBlock<'a>>> {
        debug_assert!(self.stack.is_empty(), "unbalanced block walk");
        self.levels
    }
}

impl<'a> Visitor<'a> for NestedVisitor<'a> {
    fn enter_block(&mut self, block: &'a Block) {
        let id = BlockId(self.entered);
        self.entered += 1;
        let record = WrapBlock {
            block,
            id,
            parent: self.stack.last().copied(),
            level: self.current_level,
        };
        tracing::debug!(id = id.0, level = self.current_level, "enter block");
        if self.levels.len() <= self.current_level {
            self.levels.resize_with(self.current_level + 1, Vec::new);
        }
        self.levels[self.current_level].push(record);
        self.stack.push(id);
        self.current_level += 1;
    }

    fn exit_block(&mut self, _block: &'a Block) {
        self.current_level = self.current_level.saturating_sub(1);
        self.stack.pop();
    }
}

// =============================================================================
// Report
// =============================================================================

/// Result of [`analyze_nesting`].
#[derive(Debug)]
pub struct NestingReport<'a> {
    failure: Option<AnalysisFailure>,
    levels: Vec<Vec<WrapBlock<'a>>>,
    /// `(level, index within level)` for every id.
    index: Vec<(usize, usize)>,
}

impl<'a> NestingReport<'a> {
    fn failed(failure: AnalysisFailure) -> Self {
        NestingReport {
            failure: Some(failure),
            levels: Vec::new(),
            index: Vec::new(),
        }
    }

    fn from_levels(levels: Vec<Vec<WrapBlock<'a>>>) -> Self {
        let total = levels.iter().map(Vec::len).sum();
        let mut index = vec![(0, 0); total];
        for (level, blocks) in levels.iter().enumerate() {
            for (position, block) in blocks.iter().enumerate() {
                index[block.id.0] = (level, position);
            }
        }
        NestingReport {
            failure: None,
            levels,
            index,
        }
    }

    pub fn ok(&self) -> bool {
        self.failure.is_none()
    }

    pub fn failure(&self) -> Option<&AnalysisFailure> {
        self.failure.as_ref()
    }

    /// Blocks grouped by level, level 0 first. Empty when the analysis failed.
    pub fn per_level_blocks(&self) -> &[Vec<WrapBlock<'a>>] {
        &self.levels
    }

    /// Deepest nesting level reached; 0 for a failed analysis.
    pub fn max_nested_depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Every block, level by level.
    pub fn blocks(&self) -> impl Iterator<Item = &WrapBlock<'a>> + '_ {
        self.levels.iter().flatten()
    }

    pub fn block(&self, id: BlockId) -> Option<&WrapBlock<'a>> {
        let &(level, position) = self.index.get(id.0)?;
        self.levels.get(level)?.get(position)
    }

    pub fn parent_of(&self, block: &WrapBlock<'a>) -> Option<&WrapBlock<'a>> {
        block.parent.and_then(|id| self.block(id))
    }

    /// Blocks nested deeper than `level`, deepest level first.
    pub fn blocks_beyond(&self, level: usize) -> Vec<&WrapBlock<'a>> {
        self.levels
            .iter()
            .skip(level + 1)
            .rev()
            .flatten()
            .collect()
    }

    /// Whether the file nests deeper than `threshold`.
    pub fn exceeds(&self, threshold: usize) -> bool {
        self.ok() && self.max_nested_depth() > threshold
    }
}

/// Record the nesting structure of a parsed source unit.
///
/// A tree whose upstream parse failed is not walked.
#[tracing::instrument(level = "debug", skip_all)]
pub fn analyze_nesting(tree: &SourceTree) -> NestingReport<'_> {
    let chunk = match tree {
        Ok(chunk) => chunk,
        Err(failure) => return NestingReport::failed(AnalysisFailure::Parse(failure.clone())),
    };
    let mut visitor = NestedVisitor::new();
    if let Err(err) = walk_chunk(&mut visitor, chunk) {
        tracing::debug!(%err, "nesting walk aborted");
        return NestingReport::failed(err.into());
    }
    let report = NestingReport::from_levels(visitor.into_levels());
    tracing::debug!(depth = report.max_nested_depth(), "nesting analyzed");
    report
}
