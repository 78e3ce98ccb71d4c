//! Common types and utilities shared by the luamin crates.
//!
//! This crate provides foundational pieces used across the workspace:
//! - Recursion limits for the tree walkers
//! - Diagnostics collected by the emitter and analyzers

// Centralized limits and thresholds
pub mod limits;

// Recoverable diagnostics
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, diagnostic_codes, diagnostic_messages};
