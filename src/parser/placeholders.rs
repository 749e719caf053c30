//! Placeholder parsing and lookup.
//!
//! Syntax:
//! - Single braces: `{key}`
//! - Double braces: `{{key}}`
//!
//! A key is one or more ASCII alphanumerics or underscores, so numeric keys
//! like `{0}` address list-based placeholder sources. The closing braces must
//! follow the key immediately and match the opening count.

use std::collections::HashMap;

/// Try to parse a placeholder starting from the current position.
/// Returns (total_length, key) if successful.
pub(crate) fn try_parse_placeholder(text: &str) -> Option<(usize, &str)> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'{') {
        return None;
    }

    let brace_count = if bytes.get(1) == Some(&b'{') { 2 } else { 1 };

    let key_len = bytes[brace_count..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    if key_len == 0 {
        return None;
    }

    let close_start = brace_count + key_len;
    let close_end = close_start + brace_count;
    if bytes.len() < close_end || bytes[close_start..close_end].iter().any(|b| *b != b'}') {
        return None;
    }

    Some((close_end, &text[brace_count..close_start]))
}

/// Opaque inline objects substituted for placeholders.
///
/// The parser never looks inside `P`; it only clones it into the output.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholders<P> {
    entries: HashMap<String, P>,
}

impl<P> Default for Placeholders<P> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<P> Placeholders<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index-addressed source: item `i` answers to key `"i"`.
    pub fn from_list(items: impl IntoIterator<Item = P>) -> Self {
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item))
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: P) -> Option<P> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&P> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key, for stable hashing and comparison.
    pub fn sorted_entries(&self) -> Vec<(&str, &P)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<P> From<HashMap<String, P>> for Placeholders<P> {
    fn from(entries: HashMap<String, P>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, P> FromIterator<(K, P)> for Placeholders<P> {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_brace() {
        assert_eq!(try_parse_placeholder("{x} rest"), Some((3, "x")));
    }

    #[test]
    fn test_double_brace() {
        assert_eq!(
            try_parse_placeholder("{{user_name}}"),
            Some((13, "user_name"))
        );
    }

    #[test]
    fn test_numeric_key() {
        assert_eq!(try_parse_placeholder("{12}"), Some((4, "12")));
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(try_parse_placeholder("{}"), None);
        assert_eq!(try_parse_placeholder("{{}}"), None);
    }

    #[test]
    fn test_space_inside_braces() {
        assert_eq!(try_parse_placeholder("{ x}"), None);
        assert_eq!(try_parse_placeholder("{x }"), None);
    }

    #[test]
    fn test_unclosed() {
        assert_eq!(try_parse_placeholder("{x"), None);
        assert_eq!(try_parse_placeholder("{{x}"), None);
    }

    #[test]
    fn test_extra_closing_brace_is_not_consumed() {
        assert_eq!(try_parse_placeholder("{x}}"), Some((3, "x")));
    }

    #[test]
    fn test_from_list_uses_indices() {
        let placeholders = Placeholders::from_list(["a", "b"]);
        assert_eq!(placeholders.get("0"), Some(&"a"));
        assert_eq!(placeholders.get("1"), Some(&"b"));
        assert_eq!(placeholders.get("2"), None);
    }

    #[test]
    fn test_sorted_entries() {
        let placeholders: Placeholders<i32> = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(placeholders.sorted_entries(), vec![("a", &1), ("b", &2)]);
    }
}
