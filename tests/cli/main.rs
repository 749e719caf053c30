//! CLI integration tests for runmark.
//!
//! These tests execute the compiled binary and verify CLI behavior including:
//! - Subcommand behavior (parse, tokens)
//! - Stdin/stdout handling
//! - Exit codes
//! - Config discovery

mod common;
mod parse;
mod tokens;
