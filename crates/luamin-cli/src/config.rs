//! `luamin.json` handling.
//!
//! Every key is optional. Values found in the file fill in what command-line
//! flags leave unset.

use anyhow::{Context, Result};
use luamin_common::limits::{DEFAULT_NESTING_THRESHOLD, DEFAULT_SNIPPET_LEVEL};
use luamin_emitter::Options;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "luamin.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LuaminConfig {
    #[serde(default)]
    pub keep_comments: Option<bool>,
    #[serde(default)]
    pub keep_table_field_brackets: Option<bool>,
    #[serde(default)]
    pub replace: Option<bool>,
    #[serde(default)]
    pub nesting_threshold: Option<usize>,
    #[serde(default)]
    pub snippet_level: Option<usize>,
}

/// Effective settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub options: Options,
    pub replace: bool,
    pub nesting_threshold: usize,
    pub snippet_level: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            options: Options::default(),
            replace: false,
            nesting_threshold: DEFAULT_NESTING_THRESHOLD,
            snippet_level: DEFAULT_SNIPPET_LEVEL,
        }
    }
}

impl Settings {
    pub fn from_config(config: &LuaminConfig) -> Self {
        let defaults = Settings::default();
        Settings {
            options: Options {
                keep_comments: config.keep_comments.unwrap_or(false),
                keep_table_field_brackets: config.keep_table_field_brackets.unwrap_or(false),
            },
            replace: config.replace.unwrap_or(defaults.replace),
            nesting_threshold: config
                .nesting_threshold
                .unwrap_or(defaults.nesting_threshold),
            snippet_level: config.snippet_level.unwrap_or(defaults.snippet_level),
        }
    }
}

pub fn parse_config(source: &str) -> Result<LuaminConfig> {
    let config = serde_json::from_str(source)?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<LuaminConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Look for `luamin.json` next to `start` and then in each ancestor.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let dir = if start.is_dir() { start } else { start.parent()? };
    dir.ancestors()
        .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// An explicit `--config` must exist; a discovered one is optional.
pub fn resolve_config(explicit: Option<&Path>, search_from: &Path) -> Result<LuaminConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match find_config(search_from) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using config file");
            load_config(&path)
        }
        None => Ok(LuaminConfig::default()),
    }
}
