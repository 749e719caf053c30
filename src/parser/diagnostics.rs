//! Non-fatal findings reported alongside parse output.

use serde::Serialize;
use std::fmt;

/// Something the parser degraded to literal text, or an internal
/// inconsistency it skipped. Token indices refer to the tokenized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A pair opened while `depth` formats were already active.
    NestingTooDeep {
        open: usize,
        close: usize,
        depth: usize,
    },
    /// A pair dropped because another pair closed across it.
    CrossingPair { open: usize, close: usize },
    /// A closing marker with no matching entry on the format stack.
    OrphanCloser { index: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NestingTooDeep { open, close, depth } => write!(
                f,
                "markers at tokens {open}..{close} exceed nesting depth {depth}"
            ),
            Diagnostic::CrossingPair { open, close } => {
                write!(f, "markers at tokens {open}..{close} cross another pair")
            }
            Diagnostic::OrphanCloser { index } => {
                write!(f, "closing marker at token {index} has no open format")
            }
        }
    }
}
