//! Pairing stage - match marker tokens of the same kind
//!
//! One stack per marker kind. A marker meeting an empty stack becomes a
//! candidate opener; a marker meeting a non-empty stack closes the top entry.
//! Kinds never interact here; crossing pairs are rejected later by the
//! nesting validator.

use super::token::{MarkerKind, Token};

/// Symmetric token-index pairing: if `i` maps to `j` then `j` maps to `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairMap {
    partners: Vec<Option<usize>>,
}

impl PairMap {
    /// An empty map over `token_count` tokens.
    pub fn with_len(token_count: usize) -> Self {
        Self {
            partners: vec![None; token_count],
        }
    }

    pub fn insert(&mut self, open: usize, close: usize) {
        debug_assert!(open < close, "opener must precede closer");
        self.partners[open] = Some(close);
        self.partners[close] = Some(open);
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.partners.get(index).copied().flatten()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// An opener's partner has a larger index.
    pub fn is_opener(&self, index: usize) -> bool {
        self.get(index).is_some_and(|partner| partner > index)
    }

    /// Drop the pair containing `index`, both directions.
    pub fn remove_pair(&mut self, index: usize) -> Option<(usize, usize)> {
        let partner = self.partners.get_mut(index)?.take()?;
        self.partners[partner] = None;
        Some((index.min(partner), index.max(partner)))
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.partners.iter().flatten().count() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.partners.iter().all(Option::is_none)
    }

    /// All pairs as (open, close), ordered by opener.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.partners
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.filter(|p| *p > i).map(|p| (i, p)))
            .collect()
    }
}

/// Pair marker tokens by kind, ignoring nesting order across kinds.
pub fn identify_pairs(tokens: &[Token<'_>]) -> PairMap {
    let mut pairs = PairMap::with_len(tokens.len());
    let mut stacks: [Vec<usize>; MarkerKind::COUNT] = Default::default();

    for (index, token) in tokens.iter().enumerate() {
        let Some(kind) = token.kind.marker() else {
            continue;
        };

        let stack = &mut stacks[kind.index()];
        match stack.pop() {
            Some(open) => pairs.insert(open, index),
            None => stack.push(index),
        }
    }

    log::trace!(
        "Identified {} candidate pairs ({} unpaired markers)",
        pairs.len(),
        stacks.iter().map(Vec::len).sum::<usize>()
    );
    pairs
}
