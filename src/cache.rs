//! Memoized parsing.
//!
//! [`ParseCache`] is a least-recently-used cache over parse results. It scans
//! its entries linearly, so keep the capacity in the order of tens. A hit
//! returns a clone of the stored runs and is indistinguishable from a fresh
//! parse of the same input.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::config::Config;
use crate::parser::{MarkupParser, Placeholders};
use crate::runs::Run;
use crate::style::{StyleResolver, TextStyle};

/// Everything a parse result depends on, borrowed for lookups.
struct LookupKey<'a, P> {
    hash: u64,
    text: &'a str,
    base: &'a TextStyle,
    placeholders: Vec<(&'a str, &'a P)>,
}

impl<'a, P: PartialEq + Clone> LookupKey<'a, P> {
    fn new(text: &'a str, base: &'a TextStyle, placeholders: &'a Placeholders<P>) -> Self {
        let placeholders = placeholders.sorted_entries();
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        base.hash(&mut hasher);
        for (key, _) in &placeholders {
            key.hash(&mut hasher);
        }
        Self {
            hash: hasher.finish(),
            text,
            base,
            placeholders,
        }
    }

    fn matches(&self, key: &CacheKey<P>) -> bool {
        self.hash == key.hash
            && self.text == key.text
            && *self.base == key.base
            && self.placeholders.len() == key.placeholders.len()
            && self
                .placeholders
                .iter()
                .zip(&key.placeholders)
                .all(|((k1, v1), (k2, v2))| *k1 == k2.as_str() && *v1 == v2)
    }

    fn to_owned_key(&self) -> CacheKey<P> {
        CacheKey {
            hash: self.hash,
            text: self.text.to_string(),
            base: self.base.clone(),
            placeholders: self
                .placeholders
                .iter()
                .map(|(key, value)| (key.to_string(), (*value).clone()))
                .collect(),
        }
    }
}

struct CacheKey<P> {
    hash: u64,
    text: String,
    base: TextStyle,
    placeholders: Vec<(String, P)>,
}

struct Entry<P> {
    epoch: u64,
    key: CacheKey<P>,
    runs: Vec<Run<P>>,
}

pub struct ParseCache<P = ()> {
    entries: Vec<Entry<P>>,
    epoch: u64,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl<P: Clone + PartialEq> ParseCache<P> {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            epoch: 0,
            max_entries,
            hits: 0,
            misses: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Return the cached runs for this input, computing them with `parse` on
    /// a miss. A zero-capacity cache always calls `parse`.
    pub fn get_or_parse(
        &mut self,
        text: &str,
        base: &TextStyle,
        placeholders: &Placeholders<P>,
        parse: impl FnOnce() -> Vec<Run<P>>,
    ) -> Vec<Run<P>> {
        if self.max_entries == 0 {
            return parse();
        }

        let key = LookupKey::new(text, base, placeholders);
        let epoch = self.epoch;
        let mut lowest_epoch = epoch;
        let mut lowest_index = 0;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            if key.matches(&entry.key) {
                entry.epoch = epoch;
                self.hits += 1;
                log::trace!("Parse cache hit for {} bytes", text.len());
                return entry.runs.clone();
            }
            if entry.epoch < lowest_epoch {
                lowest_epoch = entry.epoch;
                lowest_index = i;
            }
        }

        self.misses += 1;
        log::trace!("Parse cache miss for {} bytes", text.len());
        let runs = parse();
        let entry = Entry {
            epoch,
            key: key.to_owned_key(),
            runs: runs.clone(),
        };
        if self.entries.len() < self.max_entries {
            self.entries.push(entry);
        } else {
            self.entries[lowest_index] = entry;
        }
        self.epoch += 1;
        runs
    }
}

/// A [`MarkupParser`] with a result cache in front of it.
pub struct CachedParser<'r, R: ?Sized, P = ()> {
    parser: MarkupParser<'r, R>,
    cache: ParseCache<P>,
}

impl<'r, R, P> CachedParser<'r, R, P>
where
    R: StyleResolver + ?Sized,
    P: Clone + PartialEq,
{
    pub fn new(parser: MarkupParser<'r, R>, capacity: usize) -> Self {
        Self {
            parser,
            cache: ParseCache::new(capacity),
        }
    }

    /// Depth limit and capacity from `config`.
    pub fn from_config(resolver: &'r R, config: &Config) -> Self {
        let parser = MarkupParser::new(resolver).with_max_nesting_depth(config.max_nesting_depth);
        Self::new(parser, config.cache_capacity)
    }

    pub fn parse(&mut self, text: &str, base: &TextStyle) -> Vec<Run<P>> {
        self.parse_with_placeholders(text, base, &Placeholders::new())
    }

    pub fn parse_with_placeholders(
        &mut self,
        text: &str,
        base: &TextStyle,
        placeholders: &Placeholders<P>,
    ) -> Vec<Run<P>> {
        let parser = &self.parser;
        self.cache.get_or_parse(text, base, placeholders, || {
            parser.parse_with_placeholders(text, base, placeholders)
        })
    }

    pub fn cache(&self) -> &ParseCache<P> {
        &self.cache
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::DefaultStyleResolver;

    fn runs(text: &str) -> Vec<Run> {
        vec![Run::text(text, TextStyle::new())]
    }

    #[test]
    fn test_hit_does_not_reparse() {
        let mut cache = ParseCache::new(3);
        let empty = Placeholders::new();
        let base = TextStyle::new();
        let first = cache.get_or_parse("a", &base, &empty, || runs("a"));
        let second = cache.get_or_parse("a", &base, &empty, || panic!("should be cached"));
        assert_eq!(first, second);
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn test_base_style_is_part_of_key() {
        let mut cache = ParseCache::new(3);
        let empty = Placeholders::new();
        cache.get_or_parse("a", &TextStyle::new(), &empty, || runs("a"));
        let mut parsed = false;
        cache.get_or_parse("a", &TextStyle::new().bold(), &empty, || {
            parsed = true;
            runs("a")
        });
        assert!(parsed);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_placeholder_values_are_part_of_key() {
        let mut cache: ParseCache<u32> = ParseCache::new(3);
        let base = TextStyle::new();
        let one: Placeholders<u32> = [("x", 1)].into_iter().collect();
        let two: Placeholders<u32> = [("x", 2)].into_iter().collect();
        cache.get_or_parse("{x}", &base, &one, Vec::new);
        let mut parsed = false;
        cache.get_or_parse("{x}", &base, &two, || {
            parsed = true;
            Vec::new()
        });
        assert!(parsed);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = ParseCache::new(3);
        let empty = Placeholders::new();
        let base = TextStyle::new();
        cache.get_or_parse("1", &base, &empty, || runs("1"));
        cache.get_or_parse("2", &base, &empty, || runs("2"));
        cache.get_or_parse("3", &base, &empty, || runs("3"));

        // Touch "1" so "2" becomes the oldest
        cache.get_or_parse("1", &base, &empty, || panic!("should be cached"));
        cache.get_or_parse("4", &base, &empty, || runs("4"));

        cache.get_or_parse("1", &base, &empty, || panic!("1 should still be present"));
        let mut was_parsed = false;
        cache.get_or_parse("2", &base, &empty, || {
            was_parsed = true;
            runs("2")
        });
        assert!(was_parsed, "2 should have been evicted");
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_zero_capacity_disables() {
        let mut cache = ParseCache::new(0);
        let empty = Placeholders::new();
        cache.get_or_parse("a", &TextStyle::new(), &empty, || runs("a"));
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), (0, 0));
    }

    #[test]
    fn test_cached_parser_matches_fresh_parse() {
        let resolver = DefaultStyleResolver::default();
        let mut cached: CachedParser<'_, _> =
            CachedParser::from_config(&resolver, &Config::default());
        let fresh = MarkupParser::new(&resolver);
        let text = "**a** [b](c.d) ~e~";
        let base = TextStyle::new();
        let first = cached.parse(text, &base);
        let second = cached.parse(text, &base);
        assert_eq!(first, fresh.parse(text, &base));
        assert_eq!(second, first);
        assert_eq!(cached.cache().stats(), (1, 1));
    }
}
