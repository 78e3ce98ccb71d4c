use super::*;

#[test]
fn test_indent_and_unindent_end_on_a_fresh_line() {
    let mut writer = SourceWriter::new();
    writer.append("do");
    writer.indent();
    writer.append("x()");
    writer.unindent();
    writer.close("end");
    assert_eq!(writer.content(), "do\n\tx()\nend");
    assert_eq!(writer.indent_depth(), 0);
}

#[test]
fn test_last_tolerates_empty_stream() {
    let writer = SourceWriter::new();
    assert_eq!(writer.last(), None);
    assert_eq!(writer.peek_back(3), None);
    assert_eq!(writer.last_kind(), None);
}

#[test]
fn test_peek_back_counts_from_most_recent() {
    let mut writer = SourceWriter::new();
    writer.append("a");
    writer.append("b");
    assert_eq!(writer.last(), Some("b"));
    assert_eq!(writer.peek_back(1), Some("a"));
}

#[test]
fn test_drop_last_removes_trailing_break() {
    let mut writer = SourceWriter::new();
    writer.append("x");
    writer.newline();
    assert!(writer.ends_with_break());
    assert_eq!(writer.drop_last().as_deref(), Some("\n"));
    writer.close(",");
    assert_eq!(writer.content(), "x,");
}

#[test]
fn test_line_comment_forces_break_before_next_token() {
    let mut writer = SourceWriter::new();
    writer.append("x");
    writer.append_break("\n");
    writer.append_comment("-- note", true);
    writer.append("y");
    assert_eq!(writer.content(), "x\n-- note\ny");
}

#[test]
fn test_block_comment_does_not_force_break() {
    let mut writer = SourceWriter::new();
    writer.append_comment("--[[ a ]]", false);
    writer.append(" y");
    assert_eq!(writer.content(), "--[[ a ]] y");
}

#[test]
fn test_drop_last_rearms_pending_break_after_comment() {
    let mut writer = SourceWriter::new();
    writer.append_comment("-- c", true);
    writer.newline();
    writer.drop_last();
    writer.close(",");
    assert_eq!(writer.content(), "-- c\n,");
}

#[test]
fn test_line_break_at_uses_tabs() {
    let writer = SourceWriter::new();
    assert_eq!(writer.line_break_at(0), "\n");
    assert_eq!(writer.line_break_at(2), "\n\t\t");
}

#[test]
fn test_trace_log_mirrors_depth() {
    let mut writer = SourceWriter::new();
    writer.append_node("Block", 0);
    writer.append_node("LocalAssign", 1);
    writer.append_node("Name", 2);
    assert_eq!(writer.trace_log(), "Block\n\tLocalAssign\n\t\tName");
}

#[test]
fn test_fragment_kinds_are_recorded() {
    let mut writer = SourceWriter::new();
    writer.open_scope("{");
    assert_eq!(writer.last_kind(), Some(FragmentKind::ScopeOpen));
    writer.close("}");
    assert_eq!(writer.last_kind(), Some(FragmentKind::StatementClose));
    writer.append("end_of_name");
    assert_eq!(writer.last_kind(), Some(FragmentKind::Token));
}
