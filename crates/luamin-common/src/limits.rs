//! Centralized limits for the luamin tree walkers.
//!
//! The emitter and the analyzers walk the syntax tree recursively. An input
//! that nests deeply enough would otherwise exhaust the call stack, so every
//! walker counts its depth against one of these constants and bails out with
//! a diagnosable error instead.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum node depth for source regeneration.
///
/// Counted once per emitted node, so expression nesting and statement
/// nesting share the budget.
///
/// # Lua example
///
/// ```lua
/// -- Each parenthesised level adds two nodes (the operator and its operand):
/// local x = -(-(-(-(-(-(-(-(1))))))))
///
/// -- Each nested table adds a table node and a field node:
/// local t = {{{{{{{{{{{{}}}}}}}}}}}}
/// ```
pub const MAX_EMIT_DEPTH: u32 = 1000;

/// Maximum node depth for analysis walks (nesting, element extraction).
///
/// Equal to [`MAX_EMIT_DEPTH`]: every block the analyzer records can be
/// rendered as a snippet.
pub const MAX_WALK_DEPTH: u32 = MAX_EMIT_DEPTH;

// =============================================================================
// Stack Growth
// =============================================================================
// The depth limits bound the work; these keep the recursion itself off the
// caller's stack. A walker checks the remaining stack before every node and
// continues on a fresh heap segment when less than the red zone is left, so a
// tree within the limits fits on a 2 MiB worker thread in any build profile.

/// Remaining stack below which a recursive walker switches segments.
pub const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each stack segment a walker allocates when it runs low.
pub const STACK_GROWTH: usize = 2 * 1024 * 1024;

/// Stack reserved for loading, processing and dropping one dump in the
/// batch driver.
pub const DUMP_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Maximum JSON nesting accepted when loading a dump.
///
/// A node sits at most three JSON levels below its parent (node object,
/// block object, body array), so every tree within [`MAX_EMIT_DEPTH`] loads.
pub const MAX_DUMP_NESTING: usize = 4 * MAX_EMIT_DEPTH as usize;

// =============================================================================
// Presentation Defaults
// =============================================================================
// The analyzer never reads these; batch drivers use them as flag defaults.

/// Nesting depth above which a file is flagged as overly complex.
pub const DEFAULT_NESTING_THRESHOLD: usize = 6;

/// Blocks deeper than this level are shown when inspecting a file.
pub const DEFAULT_SNIPPET_LEVEL: usize = 5;
