//! Recoverable diagnostics.
//!
//! A diagnostic never aborts a call. The emitter and analyzers push them into
//! a per-call list that is returned next to the (possibly partial) output.

use serde::Serialize;
use std::fmt;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub message_text: String,
}

pub mod diagnostic_codes {
    /// No emitter exists for a node kind.
    pub const EMITTER_NOT_IMPLEMENTED: u32 = 1001;
    /// Comment text that is not a well-formed Lua comment.
    pub const MALFORMED_COMMENT: u32 = 1002;
    /// A dot-notation key or field that is not a plain name.
    pub const KEY_NOTATION_MISMATCH: u32 = 1003;
}

pub mod diagnostic_messages {
    pub const EMITTER_NOT_IMPLEMENTED: &str = "emitter not implemented for kind {0}";
    pub const COMMENT_MISSING_DASHES: &str = "comment does not start with `--`: {0}";
    pub const COMMENT_SPANS_LINES: &str = "line comment spans several lines and was dropped: {0}";
    pub const DOT_KEY_NOT_A_NAME: &str = "dot-notation key on `{0}` is not a name; emitted with brackets";
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            message_text: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            code,
            message_text: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = match self.category {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
        };
        write!(f, "{category} L{}: {}", self.code, self.message_text)
    }
}

/// Substitute `{0}`, `{1}`, … placeholders in a message template.
pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
