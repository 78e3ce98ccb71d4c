use super::Printer;
use luamin_ast::StringDelimiter;

impl Printer {
    // =========================================================================
    // Literals
    // =========================================================================

    pub(super) fn emit_name(&mut self, id: &str) {
        self.writer.append(id);
    }

    pub(super) fn emit_number(&mut self, n: &str) {
        self.writer.append(n);
    }

    /// Re-emit a string with the delimiter it was written with.
    ///
    /// Quoted strings keep their escapes as written, so changing the quote
    /// character would change what the escapes mean.
    pub(super) fn emit_string(&mut self, s: &str, delimiter: StringDelimiter) {
        let text = match delimiter {
            StringDelimiter::SingleQuote => format!("'{s}'"),
            StringDelimiter::DoubleQuote => format!("\"{s}\""),
            StringDelimiter::DoubleSquare => long_bracket(s),
        };
        self.writer.append(&text);
    }
}

/// Wrap `s` in the lowest long bracket level whose closing bracket cannot
/// end the string early.
fn long_bracket(s: &str) -> String {
    let mut level = 0;
    loop {
        let equals = "=".repeat(level);
        let close = format!("]{equals}]");
        // The content followed by the closing bracket minus its last `]`
        // must not already contain the closing bracket.
        let probe = format!("{s}]{equals}");
        if !probe.contains(&close) {
            // Lua drops a newline right after the opening bracket.
            let lead = if s.starts_with('\n') || s.starts_with('\r') {
                "\n"
            } else {
                ""
            };
            return format!("[{equals}[{lead}{s}{close}");
        }
        level += 1;
    }
}
