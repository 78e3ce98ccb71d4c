use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Settings;

/// CLI arguments for the luamin binary.
#[derive(Parser, Debug)]
#[command(
    name = "luamin",
    version,
    about = "Regenerate, minify and inspect Lua syntax tree dumps"
)]
pub struct CliArgs {
    /// Path to a luamin.json file. Defaults to the nearest one above the input.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Regenerate every `*.json` tree dump under a path.
    Minify(MinifyArgs),
    /// Report block-nesting depth per file.
    Nesting(NestingArgs),
    /// Print the string literals and comments of one dump as JSON.
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
pub struct MinifyArgs {
    /// A dump file or a directory to search.
    pub path: PathBuf,

    /// Keep comments in the output. `--keepComments=false` overrides a
    /// config file that turns it on.
    #[arg(
        long = "keepComments",
        alias = "keep-comments",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub keep_comments: Option<bool>,

    /// Write name-keyed table fields as `["name"] = v`.
    #[arg(
        long = "keepTableFieldBrackets",
        alias = "keep-table-field-brackets",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub keep_table_field_brackets: Option<bool>,

    /// Write `<stem>` instead of `<stem>.min`.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub replace: Option<bool>,
}

#[derive(Args, Debug)]
pub struct NestingArgs {
    /// A dump file or a directory to search.
    pub path: PathBuf,

    /// Flag files that nest deeper than this.
    #[arg(long)]
    pub threshold: Option<usize>,

    /// Print snippets of blocks nested deeper than the snippet level.
    #[arg(long)]
    pub show: bool,

    #[arg(long = "snippetLevel", alias = "snippet-level")]
    pub snippet_level: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    pub file: PathBuf,

    #[arg(long)]
    pub pretty: bool,
}

impl Command {
    /// Where to start looking for a config file.
    pub fn input_path(&self) -> &PathBuf {
        match self {
            Command::Minify(args) => &args.path,
            Command::Nesting(args) => &args.path,
            Command::Extract(args) => &args.file,
        }
    }

    /// Layer command-line flags over file settings.
    pub fn apply(&self, settings: &mut Settings) {
        match self {
            Command::Minify(args) => {
                if let Some(keep) = args.keep_comments {
                    settings.options.keep_comments = keep;
                }
                if let Some(keep) = args.keep_table_field_brackets {
                    settings.options.keep_table_field_brackets = keep;
                }
                if let Some(replace) = args.replace {
                    settings.replace = replace;
                }
            }
            Command::Nesting(args) => {
                if let Some(threshold) = args.threshold {
                    settings.nesting_threshold = threshold;
                }
                if let Some(level) = args.snippet_level {
                    settings.snippet_level = level;
                }
            }
            Command::Extract(_) => {}
        }
    }
}
