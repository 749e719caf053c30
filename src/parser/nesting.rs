//! Nesting validation - enforce bracket-like order and a depth limit
//!
//! Markers behave like brackets: a pair must close inside whatever opened
//! after it, and at most `max_depth` pairs may be open at once. Pairs that
//! break either rule are removed from the map and later render as literal
//! text.

use super::diagnostics::Diagnostic;
use super::pairing::PairMap;
use super::token::Token;

/// Default maximum number of concurrently active formats.
pub const MAX_NESTING_DEPTH: usize = 2;

/// Drop candidate pairs that cross or nest deeper than `max_depth`.
///
/// Returns the surviving pairs and one diagnostic per dropped pair.
pub fn validate_pairs(
    tokens: &[Token<'_>],
    candidates: &PairMap,
    max_depth: usize,
) -> (PairMap, Vec<Diagnostic>) {
    let mut valid = candidates.clone();
    let mut diagnostics = Vec::new();
    // Opener indices, innermost last
    let mut stack: Vec<usize> = Vec::with_capacity(max_depth);

    for index in 0..tokens.len() {
        // Pairs already dropped (over-depth openers, crossed pairs) are skipped
        let Some(partner) = valid.get(index) else {
            continue;
        };

        if partner > index {
            if stack.len() >= max_depth {
                log::debug!(
                    "Dropping pair {}..{}: nesting depth {} exceeded",
                    index,
                    partner,
                    max_depth
                );
                valid.remove_pair(index);
                diagnostics.push(Diagnostic::NestingTooDeep {
                    open: index,
                    close: partner,
                    depth: max_depth,
                });
            } else {
                stack.push(index);
            }
            continue;
        }

        if stack.last() == Some(&partner) {
            stack.pop();
            continue;
        }

        // Closed out of order: everything opened since `partner` is void
        let Some(at) = stack.iter().position(|open| *open == partner) else {
            continue;
        };
        for open in stack.drain(at..) {
            if let Some((open, close)) = valid.remove_pair(open) {
                log::debug!("Dropping crossing pair {}..{}", open, close);
                diagnostics.push(Diagnostic::CrossingPair { open, close });
            }
        }
    }

    log::trace!(
        "Validated {} of {} candidate pairs",
        valid.len(),
        candidates.len()
    );
    (valid, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::pairing::identify_pairs;
    use crate::parser::tokenizer::tokenize;

    fn validate(text: &str, max_depth: usize) -> (Vec<(usize, usize)>, Vec<Diagnostic>) {
        let tokens = tokenize(text);
        let candidates = identify_pairs(&tokens);
        let (valid, diagnostics) = validate_pairs(&tokens, &candidates, max_depth);
        (valid.pairs(), diagnostics)
    }

    #[test]
    fn test_proper_nesting_survives() {
        // ** a * b * a **
        let (pairs, diagnostics) = validate("**a*b*a**", MAX_NESTING_DEPTH);
        assert_eq!(pairs, vec![(0, 6), (2, 4)]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_sequential_pairs_survive() {
        let (pairs, _) = validate("*a* **b** ~c~", MAX_NESTING_DEPTH);
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_crossing_pairs_both_dropped() {
        // * a ~~ b * c ~~
        let (pairs, diagnostics) = validate("*a~~b*c~~", MAX_NESTING_DEPTH);
        assert!(pairs.is_empty());
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::CrossingPair { open: 0, close: 4 },
                Diagnostic::CrossingPair { open: 2, close: 6 },
            ]
        );
    }

    #[test]
    fn test_innermost_pair_dropped_when_too_deep() {
        // ** a * b ~~ c ~~ b * a **
        let (pairs, diagnostics) = validate("**a*b~~c~~b*a**", MAX_NESTING_DEPTH);
        assert_eq!(pairs, vec![(0, 10), (2, 8)]);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::NestingTooDeep {
                open: 4,
                close: 6,
                depth: 2
            }]
        );
    }

    #[test]
    fn test_depth_limit_is_configurable() {
        let (pairs, diagnostics) = validate("**a*b~~c~~b*a**", 3);
        assert_eq!(pairs.len(), 3);
        assert!(diagnostics.is_empty());

        let (pairs, _) = validate("**a*b*a**", 1);
        assert_eq!(pairs, vec![(0, 6)]);
    }

    #[test]
    fn test_crossing_drops_everything_above_partner() {
        // ** a * b ^ c ** d * e ^   with depth 3
        // `**` closes while `*` and `^` are open above it: all three go
        let (pairs, diagnostics) = validate("**a*b^c**d*e^", 3);
        assert!(pairs.is_empty());
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_crossing_keeps_outer_pairs() {
        // ** x * a ~~ b * c ~~ x **   with depth 3
        let (pairs, _) = validate("**x*a~~b*c~~x**", 3);
        assert_eq!(pairs, vec![(0, 10)]);
    }

    #[test]
    fn test_unpaired_markers_are_ignored() {
        let (pairs, diagnostics) = validate("*a **b** c", MAX_NESTING_DEPTH);
        assert_eq!(pairs, vec![(2, 4)]);
        assert!(diagnostics.is_empty());
    }
}
