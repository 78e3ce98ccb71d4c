use luamin_cli::tracing_config::{LUAMIN_TARGETS, LogFormat, filter_directive};

#[test]
fn test_logging_stays_off_without_variables() {
    assert_eq!(filter_directive(None, None), None);
    assert_eq!(filter_directive(Some("  "), None), None);
}

#[test]
fn test_bare_level_is_scoped_to_luamin_crates() {
    let directive = filter_directive(Some("debug"), None).expect("directive");
    let parts: Vec<&str> = directive.split(',').collect();
    assert_eq!(parts.len(), LUAMIN_TARGETS.len());
    assert!(parts.contains(&"luamin_emitter=debug"));
    assert!(parts.contains(&"luamin_analyzer=debug"));
    assert!(!directive.contains("rayon"));
}

#[test]
fn test_full_directive_is_used_unchanged() {
    assert_eq!(
        filter_directive(Some("luamin_emitter=trace,walkdir=warn"), None).as_deref(),
        Some("luamin_emitter=trace,walkdir=warn")
    );
}

#[test]
fn test_luamin_log_takes_precedence_over_rust_log() {
    assert_eq!(
        filter_directive(Some("luamin_cli=info"), Some("trace")).as_deref(),
        Some("luamin_cli=info")
    );
    assert_eq!(
        filter_directive(Some(""), Some("warn")).as_deref(),
        Some("warn")
    );
}

#[test]
fn test_rust_log_is_not_rescoped() {
    assert_eq!(filter_directive(None, Some("debug")).as_deref(), Some("debug"));
}

#[test]
fn test_log_format_parse() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
    assert_eq!(LogFormat::parse("fancy"), LogFormat::Text);
    assert_eq!(LogFormat::parse(""), LogFormat::default());
}
