//! Re-attaching comments around emitted nodes.
//!
//! Before a node is written its leading comments are spliced in, and after
//! it its trailing comments. Where they go depends on what the writer last
//! emitted, classified into a [`CommentAnchor`]:
//!
//! | anchor            | prefix before comments          | break after leading |
//! |-------------------|---------------------------------|---------------------|
//! | `OpenedScope`     | `indent()`, depth restored after | no                  |
//! | `ClosedStatement` | newline at depth + 1 (leading) or depth (trailing) | yes |
//! | `AlreadyBroken`   | the existing break is reused    | yes                 |
//! | `Bare`            | newline at the current depth    | no                  |
//!
//! `OpenedScope` gets no break after leading comments because the table
//! that opened the scope lays out its own lines. That asymmetry is kept as
//! is; output compatibility depends on it.

use super::Printer;
use crate::source_writer::FragmentKind;
use luamin_ast::Comment;
use luamin_common::diagnostics::format_message;
use luamin_common::{Diagnostic, diagnostic_codes, diagnostic_messages};

/// Where the writer stands when comments are about to be inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommentAnchor {
    /// Last fragment opened a scope (`{`).
    OpenedScope,
    /// Last fragment finished a statement (`}`, `,`, `;`, `end`).
    ClosedStatement,
    /// Last fragment is a line break; its text is reused as the join prefix.
    AlreadyBroken(String),
    /// Anything else.
    Bare,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placement {
    Leading,
    Trailing,
}

/// A comment ready to be written.
struct PreparedComment {
    text: String,
    line: bool,
}

impl Printer {
    /// Classify the writer's last fragment for comment placement.
    pub fn anchor(&self) -> CommentAnchor {
        match self.writer.last_kind() {
            Some(FragmentKind::ScopeOpen) => CommentAnchor::OpenedScope,
            Some(FragmentKind::StatementClose) => CommentAnchor::ClosedStatement,
            Some(FragmentKind::LineBreak) => {
                CommentAnchor::AlreadyBroken(self.writer.last().unwrap_or("\n").to_string())
            }
            // The start of the stream behaves like the start of a line.
            None => CommentAnchor::AlreadyBroken(self.writer.line_break_at(0)),
            Some(_) => CommentAnchor::Bare,
        }
    }

    pub(super) fn emit_leading_comments(&mut self, comments: &[Comment]) {
        self.place_comments(comments, Placement::Leading);
    }

    pub(super) fn emit_trailing_comments(&mut self, comments: &[Comment]) {
        self.place_comments(comments, Placement::Trailing);
    }

    /// A free-standing comment statement.
    pub(super) fn emit_comment_statement(&mut self, text: &str) {
        if !self.options.keep_comments {
            return;
        }
        if let Some(comment) = self.prepare(&Comment::new(text)) {
            self.writer.append_comment(&comment.text, comment.line);
        }
    }

    fn place_comments(&mut self, comments: &[Comment], placement: Placement) {
        if !self.options.keep_comments || comments.is_empty() {
            return;
        }
        let prepared: Vec<PreparedComment> =
            comments.iter().filter_map(|c| self.prepare(c)).collect();
        if prepared.is_empty() {
            return;
        }

        let depth = self.writer.indent_depth();
        match self.anchor() {
            CommentAnchor::OpenedScope => {
                self.writer.indent();
                let prefix = self.writer.line_break_at(depth + 1);
                self.write_joined(&prepared, &prefix);
                self.writer.restore_depth(depth);
            }
            CommentAnchor::ClosedStatement => {
                let prefix_depth = match placement {
                    Placement::Leading => depth + 1,
                    Placement::Trailing => depth,
                };
                let prefix = self.writer.line_break_at(prefix_depth);
                self.write_prefixed(&prepared, &prefix);
                if placement == Placement::Leading {
                    self.writer.newline();
                }
            }
            CommentAnchor::AlreadyBroken(prefix) => {
                self.write_joined(&prepared, &prefix);
                if placement == Placement::Leading {
                    self.writer.newline();
                }
            }
            CommentAnchor::Bare => {
                let prefix = self.writer.line_break_at(depth);
                self.write_prefixed(&prepared, &prefix);
            }
        }
    }

    /// First comment goes right where the writer stands.
    fn write_joined(&mut self, comments: &[PreparedComment], prefix: &str) {
        for (index, comment) in comments.iter().enumerate() {
            if index > 0 {
                self.writer.append_break(prefix);
            }
            self.writer.append_comment(&comment.text, comment.line);
        }
    }

    /// Every comment, the first included, starts with the prefix.
    fn write_prefixed(&mut self, comments: &[PreparedComment], prefix: &str) {
        for comment in comments {
            self.writer.append_break(prefix);
            self.writer.append_comment(&comment.text, comment.line);
        }
    }

    /// Normalize one comment, reporting text that is not a valid comment.
    fn prepare(&mut self, comment: &Comment) -> Option<PreparedComment> {
        let text = comment.text.trim_end();
        if text.trim().is_empty() {
            return None;
        }
        let line = comment.is_line_comment();
        if line && text.contains('\n') {
            self.report(Diagnostic::warning(
                format_message(diagnostic_messages::COMMENT_SPANS_LINES, &[text]),
                diagnostic_codes::MALFORMED_COMMENT,
            ));
            return None;
        }
        if !text.starts_with("--") {
            self.report(Diagnostic::warning(
                format_message(diagnostic_messages::COMMENT_MISSING_DASHES, &[text]),
                diagnostic_codes::MALFORMED_COMMENT,
            ));
            return Some(PreparedComment {
                text: format!("-- {}", text.trim_start()),
                line: true,
            });
        }
        Some(PreparedComment {
            text: text.to_string(),
            line,
        })
    }
}
