//! Batch operations over syntax tree dumps.
//!
//! A dump is the JSON form of a [`Chunk`], or `{"error": {...}}` when the
//! external parser rejected the source. Files are processed in parallel;
//! results are reported in path order once the batch is done.

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use luamin_analyzer::{analyze_nesting, extract_elements};
use luamin_ast::{Chunk, ParseFailure, SourceTree};
use luamin_common::limits::{DUMP_STACK_SIZE, MAX_DUMP_NESTING};
use luamin_emitter::regenerate;
use rayon::prelude::*;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::args::{CliArgs, Command, ExtractArgs, MinifyArgs, NestingArgs};
use crate::config::{CONFIG_FILE_NAME, Settings, resolve_config};

pub const DUMP_EXTENSION: &str = "json";

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_SOME_FILES_FAILED: i32 = 1;

#[derive(Deserialize)]
#[serde(untagged)]
enum Dump {
    Failed { error: ParseFailure },
    Parsed(Chunk),
}

/// Deepest `{`/`[` nesting of a JSON document. Brackets inside strings do
/// not count.
fn json_nesting(source: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    let mut in_string = false;
    let mut escaped = false;
    for byte in source.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

/// Parse a dump. serde_json's own recursion limit is off; nesting is bounded
/// by [`MAX_DUMP_NESTING`] instead, and deep documents need a stack such as
/// the one [`with_dump_stack`] provides.
pub fn parse_dump(source: &str) -> Result<SourceTree> {
    let nesting = json_nesting(source);
    if nesting > MAX_DUMP_NESTING {
        bail!("syntax tree dump nests {nesting} levels deep (limit {MAX_DUMP_NESTING})");
    }
    let mut deserializer = serde_json::Deserializer::from_str(source);
    deserializer.disable_recursion_limit();
    let dump = Dump::deserialize(&mut deserializer).context("not a syntax tree dump")?;
    deserializer.end().context("not a syntax tree dump")?;
    Ok(match dump {
        Dump::Failed { error } => Err(error),
        Dump::Parsed(chunk) => Ok(chunk),
    })
}

pub fn load_dump(path: &Path) -> Result<SourceTree> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_dump(&source).with_context(|| format!("failed to load {}", path.display()))
}

/// Run one file's work on a dedicated stack segment, so loading and dropping
/// a deep tree never depends on the worker thread's stack size.
pub fn with_dump_stack<R>(work: impl FnOnce() -> R) -> R {
    stacker::grow(DUMP_STACK_SIZE, work)
}

// =============================================================================
// Input discovery
// =============================================================================

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_dump(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == DUMP_EXTENSION)
        && path.file_name().is_some_and(|name| name != CONFIG_FILE_NAME)
}

/// `root` itself when it is a file, otherwise every dump below it in path
/// order. Hidden files and directories are skipped.
pub fn collect_inputs(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.is_dir() {
        bail!("no such file or directory: {}", root.display());
    }
    let inputs = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_dump(entry.path()))
        .map(DirEntry::into_path)
        .collect();
    Ok(inputs)
}

/// `foo.lua.json` becomes `foo.lua`, or `foo.lua.min` unless replacing.
pub fn output_path(input: &Path, replace: bool) -> PathBuf {
    let stem = input.with_extension("");
    if replace {
        return stem;
    }
    let mut name = stem.into_os_string();
    name.push(".min");
    PathBuf::from(name)
}

// =============================================================================
// Commands
// =============================================================================

/// Per-batch counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub ok: usize,
    pub bad: usize,
}

impl Summary {
    pub fn exit_code(&self) -> i32 {
        if self.bad > 0 {
            EXIT_SOME_FILES_FAILED
        } else {
            EXIT_SUCCESS
        }
    }
}

fn status(ok: bool, color: bool) -> String {
    match (ok, color) {
        (true, true) => "OK".green().to_string(),
        (true, false) => "OK".to_string(),
        (false, true) => "Bad".red().to_string(),
        (false, false) => "Bad".to_string(),
    }
}

/// What a successful minify wrote.
#[derive(Debug, Clone)]
pub struct MinifyOutcome {
    pub output: PathBuf,
    /// Recoverable problems, one per line.
    pub errors: Option<String>,
}

pub fn minify_file(path: &Path, settings: &Settings) -> Result<MinifyOutcome> {
    with_dump_stack(|| minify_on_stack(path, settings))
}

fn minify_on_stack(path: &Path, settings: &Settings) -> Result<MinifyOutcome> {
    let tree = load_dump(path)?;
    let regenerated = regenerate(&tree, settings.options)?;
    let output = output_path(path, settings.replace);
    std::fs::write(&output, &regenerated.text)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(MinifyOutcome {
        output,
        errors: regenerated.errors(),
    })
}

#[tracing::instrument(level = "debug", skip_all, fields(path = %args.path.display()))]
pub fn run_minify(
    args: &MinifyArgs,
    settings: &Settings,
    out: &mut dyn Write,
    color: bool,
) -> Result<Summary> {
    let inputs = collect_inputs(&args.path)?;
    tracing::debug!(files = inputs.len(), "minify batch");

    let results: Vec<(PathBuf, Result<MinifyOutcome>)> = inputs
        .into_par_iter()
        .map(|path| {
            let result = minify_file(&path, settings);
            (path, result)
        })
        .collect();

    let mut summary = Summary::default();
    for (path, result) in results {
        match result {
            Ok(outcome) => {
                summary.ok += 1;
                writeln!(
                    out,
                    "{} -> {} {}",
                    path.display(),
                    outcome.output.display(),
                    status(true, color)
                )?;
                if let Some(errors) = outcome.errors {
                    for line in errors.lines() {
                        writeln!(out, "  {line}")?;
                    }
                }
            }
            Err(err) => {
                summary.bad += 1;
                writeln!(out, "{} {}: {err:#}", path.display(), status(false, color))?;
            }
        }
    }
    Ok(summary)
}

/// Nesting result for one file.
#[derive(Debug, Clone)]
pub struct NestingLine {
    pub depth: usize,
    pub flagged: bool,
    pub snippets: Vec<String>,
}

pub fn nesting_file(path: &Path, settings: &Settings, show: bool) -> Result<NestingLine> {
    with_dump_stack(|| nesting_on_stack(path, settings, show))
}

fn nesting_on_stack(path: &Path, settings: &Settings, show: bool) -> Result<NestingLine> {
    let tree = load_dump(path)?;
    let report = analyze_nesting(&tree);
    if let Some(failure) = report.failure() {
        return Err(anyhow!(failure.clone()));
    }
    let snippets = if show {
        report
            .blocks_beyond(settings.snippet_level)
            .iter()
            .map(|block| block.render_snippet_with(settings.options))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        Vec::new()
    };
    Ok(NestingLine {
        depth: report.max_nested_depth(),
        flagged: report.exceeds(settings.nesting_threshold),
        snippets,
    })
}

#[tracing::instrument(level = "debug", skip_all, fields(path = %args.path.display()))]
pub fn run_nesting(
    args: &NestingArgs,
    settings: &Settings,
    out: &mut dyn Write,
    color: bool,
) -> Result<Summary> {
    let inputs = collect_inputs(&args.path)?;
    let results: Vec<(PathBuf, Result<NestingLine>)> = inputs
        .into_par_iter()
        .map(|path| {
            let result = nesting_file(&path, settings, args.show);
            (path, result)
        })
        .collect();

    let mut summary = Summary::default();
    for (path, result) in results {
        match result {
            Ok(line) => {
                summary.ok += 1;
                let mut text = format!("{}: depth {}", path.display(), line.depth);
                if line.flagged {
                    let flag = format!("deeper than {}", settings.nesting_threshold);
                    let flag = if color { flag.yellow().to_string() } else { flag };
                    text.push_str(&format!(" ({flag})"));
                }
                writeln!(out, "{text}")?;
                for snippet in &line.snippets {
                    writeln!(out, "{snippet}")?;
                    writeln!(out)?;
                }
            }
            Err(err) => {
                summary.bad += 1;
                writeln!(out, "{} {}: {err:#}", path.display(), status(false, color))?;
            }
        }
    }
    Ok(summary)
}

pub fn run_extract(args: &ExtractArgs, out: &mut dyn Write) -> Result<()> {
    let elements = with_dump_stack(|| -> Result<_> {
        let tree = load_dump(&args.file)?;
        Ok(extract_elements(&tree)?)
    })?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&elements)?
    } else {
        serde_json::to_string(&elements)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

/// Run one command and return the process exit code.
pub fn run(cli: &CliArgs, out: &mut dyn Write, color: bool) -> Result<i32> {
    let config = resolve_config(cli.config.as_deref(), cli.command.input_path())?;
    let mut settings = Settings::from_config(&config);
    cli.command.apply(&mut settings);
    tracing::debug!(?settings, "resolved settings");

    match &cli.command {
        Command::Minify(args) => Ok(run_minify(args, &settings, out, color)?.exit_code()),
        Command::Nesting(args) => Ok(run_nesting(args, &settings, out, color)?.exit_code()),
        Command::Extract(args) => {
            run_extract(args, out)?;
            Ok(EXIT_SUCCESS)
        }
    }
}
