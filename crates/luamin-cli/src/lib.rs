//! The `luamin` batch driver.
//!
//! Inputs are JSON dumps of syntax trees written by an external Lua parser,
//! one file per source unit. The driver regenerates them, reports nesting
//! depth, or lists their string literals and comments.

pub mod args;
pub mod config;
pub mod driver;
pub mod tracing_config;
