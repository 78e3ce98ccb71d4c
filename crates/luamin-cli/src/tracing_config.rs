//! Logging for the `luamin` binary.
//!
//! Nothing is installed unless `LUAMIN_LOG` or `RUST_LOG` is set. A bare
//! level in `LUAMIN_LOG` is scoped to the luamin crates, so batch runs do not
//! pick up rayon or walkdir events; anything else is used as a filter
//! directive unchanged.
//!
//! ```bash
//! LUAMIN_LOG=debug luamin nesting src/
//! LUAMIN_LOG="luamin_emitter=trace" LUAMIN_LOG_FORMAT=tree luamin minify dumps/
//! ```
//!
//! Events always go to stderr; stdout carries the batch report and the JSON
//! printed by `extract`.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Crates a bare `LUAMIN_LOG` level applies to.
pub const LUAMIN_TARGETS: [&str; 5] = [
    "luamin",
    "luamin_cli",
    "luamin_emitter",
    "luamin_analyzer",
    "luamin_ast",
];

/// Output format, from `LUAMIN_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event.
    #[default]
    Text,
    /// Spans as an indented tree, which follows the emitter's descent.
    Tree,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Unknown values fall back to [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// The filter to install, or `None` to leave logging off.
pub fn filter_directive(luamin_log: Option<&str>, rust_log: Option<&str>) -> Option<String> {
    fn set(value: Option<&str>) -> Option<&str> {
        value.map(str::trim).filter(|value| !value.is_empty())
    }
    match (set(luamin_log), set(rust_log)) {
        (Some(value), _) => Some(scope_to_luamin(value)),
        (None, Some(value)) => Some(value.to_string()),
        (None, None) => None,
    }
}

fn scope_to_luamin(value: &str) -> String {
    if value.parse::<LevelFilter>().is_err() {
        return value.to_string();
    }
    LUAMIN_TARGETS
        .iter()
        .map(|target| format!("{target}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn init_tracing() {
    let luamin_log = std::env::var("LUAMIN_LOG").ok();
    let rust_log = std::env::var("RUST_LOG").ok();
    let Some(directive) = filter_directive(luamin_log.as_deref(), rust_log.as_deref()) else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(directive);
    let format = LogFormat::parse(&std::env::var("LUAMIN_LOG_FORMAT").unwrap_or_default());

    match format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text_layer).init();
        }
    }
}
