//! Fragment-based output stream with indentation bookkeeping.
//!
//! The writer keeps every appended fragment separately, tagged with what it
//! was emitted as. Comment placement looks at the tag of the last fragment
//! instead of re-reading emitted text, and the table emitter can take back
//! a trailing line break with [`SourceWriter::drop_last`].
//!
//! Line comments get one extra rule: a line comment runs to the end of the
//! line, so the writer remembers that a break is owed and inserts
//! [`SourceWriter::newline`] before the next non-break fragment.

/// What a fragment was emitted as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentKind {
    /// Any ordinary token or run of tokens.
    Token,
    /// Opened a nested scope (`{`).
    ScopeOpen,
    /// Finished a statement or element (`}`, `,`, `;`, `end`).
    StatementClose,
    /// `\n` followed by indentation.
    LineBreak,
    /// `-- ...` up to the end of the line.
    LineComment,
    /// `--[[ ... ]]`
    BlockComment,
}

#[derive(Clone, Debug)]
struct Fragment {
    text: String,
    kind: FragmentKind,
}

#[derive(Clone, Debug, Default)]
pub struct SourceWriter {
    fragments: Vec<Fragment>,
    indent: usize,
    trace: Vec<String>,
    /// A line comment is the last thing on the current line.
    pending_break: bool,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Appending
    // =========================================================================

    /// Append a plain token.
    pub fn append(&mut self, text: &str) {
        self.push(text, FragmentKind::Token);
    }

    /// Append text that opens a nested scope.
    pub fn open_scope(&mut self, text: &str) {
        self.push(text, FragmentKind::ScopeOpen);
    }

    /// Append text that finishes a statement or list element.
    pub fn close(&mut self, text: &str) {
        self.push(text, FragmentKind::StatementClose);
    }

    pub fn append_comment(&mut self, text: &str, line_comment: bool) {
        if line_comment {
            self.push(text, FragmentKind::LineComment);
            self.pending_break = true;
        } else {
            self.push(text, FragmentKind::BlockComment);
        }
    }

    /// Append a pre-built line break such as one from [`Self::line_break_at`].
    pub fn append_break(&mut self, text: &str) {
        self.fragments.push(Fragment {
            text: text.to_string(),
            kind: FragmentKind::LineBreak,
        });
        self.pending_break = false;
    }

    fn push(&mut self, text: &str, kind: FragmentKind) {
        if text.is_empty() {
            return;
        }
        if self.pending_break {
            self.newline();
        }
        self.fragments.push(Fragment {
            text: text.to_string(),
            kind,
        });
    }

    // =========================================================================
    // Line breaks and indentation
    // =========================================================================

    /// Emit `\n` followed by one tab per indent level.
    pub fn newline(&mut self) {
        let text = self.line_break_at(self.indent);
        self.append_break(&text);
    }

    /// Increase the depth, then break the line at the new depth.
    pub fn indent(&mut self) {
        self.indent += 1;
        self.newline();
    }

    /// Decrease the depth, then break the line at the new depth.
    pub fn unindent(&mut self) {
        debug_assert!(self.indent > 0, "unindent below zero");
        self.indent = self.indent.saturating_sub(1);
        self.newline();
    }

    pub fn indent_depth(&self) -> usize {
        self.indent
    }

    /// Reset the depth without emitting anything.
    pub fn restore_depth(&mut self, depth: usize) {
        self.indent = depth;
    }

    /// The text [`Self::newline`] would emit at `depth`.
    pub fn line_break_at(&self, depth: usize) -> String {
        let mut text = String::with_capacity(depth + 1);
        text.push('\n');
        for _ in 0..depth {
            text.push('\t');
        }
        text
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// The most recent fragment, or `None` on an empty stream.
    pub fn last(&self) -> Option<&str> {
        self.peek_back(0)
    }

    /// The fragment `back` places before the most recent one.
    pub fn peek_back(&self, back: usize) -> Option<&str> {
        let len = self.fragments.len();
        if back >= len {
            return None;
        }
        Some(self.fragments[len - 1 - back].text.as_str())
    }

    pub fn last_kind(&self) -> Option<FragmentKind> {
        self.fragments.last().map(|fragment| fragment.kind)
    }

    pub fn ends_with_break(&self) -> bool {
        self.last_kind() == Some(FragmentKind::LineBreak)
    }

    /// Remove the most recent fragment.
    pub fn drop_last(&mut self) -> Option<String> {
        let dropped = self.fragments.pop()?;
        self.pending_break = self.last_kind() == Some(FragmentKind::LineComment);
        Some(dropped.text)
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Number of fragments written so far.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    pub fn content(&self) -> String {
        let len = self.fragments.iter().map(|f| f.text.len()).sum();
        let mut out = String::with_capacity(len);
        for fragment in &self.fragments {
            out.push_str(&fragment.text);
        }
        out
    }

    // =========================================================================
    // AST trace
    // =========================================================================

    /// Record a node name at the given tree depth.
    pub fn append_node(&mut self, name: &str, depth: usize) {
        let mut line = "\t".repeat(depth);
        line.push_str(name);
        self.trace.push(line);
    }

    pub fn trace_log(&self) -> String {
        self.trace.join("\n")
    }
}

#[cfg(test)]
#[path = "../tests/source_writer.rs"]
mod tests;
