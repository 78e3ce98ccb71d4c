//! Structural analyses over a parsed Lua source unit.
//!
//! - [`nesting`]: block-nesting levels per file, with on-demand snippets
//! - [`extractor`]: string literals and comments with their positions
//!
//! Both read the tree without mutating it and allocate all their state per
//! call.

use luamin_ast::{DepthExceeded, ParseFailure};
use thiserror::Error;

pub mod extractor;
pub mod nesting;

pub use extractor::{Element, ElementExtractor, Elements, extract_elements};
pub use nesting::{BlockId, BlockInfo, NestedVisitor, NestingReport, WrapBlock, analyze_nesting};

/// Why an analysis produced no data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AnalysisFailure {
    #[error("parse failed: {0}")]
    Parse(ParseFailure),
    #[error("syntax tree nests deeper than {limit} nodes")]
    TooDeep { limit: u32 },
}

impl From<DepthExceeded> for AnalysisFailure {
    fn from(err: DepthExceeded) -> Self {
        AnalysisFailure::TooDeep { limit: err.limit }
    }
}
