//! Memoized tree derivation.
//!
//! Building and filtering are cheap and pure, so caching is never needed
//! for correctness. A caller re-rendering on every keystroke can still keep
//! a [`TreeCache`] keyed on the listing's [`Fingerprint`] and the query.

use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;
use sha2::{Digest, Sha256};

use crate::model::{Category, CategoryNode};
use crate::tree::{build_tree, filter_tree};

pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// SHA-256 over every field of a category listing (order-sensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of(categories: &[Category]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((categories.len() as u64).to_le_bytes());
        for category in categories {
            hash_category(&mut hasher, category);
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }
}

fn hash_category(hasher: &mut Sha256, category: &Category) {
    hash_str(hasher, &category.id);
    hash_str(hasher, &category.name);
    hash_str(hasher, &category.description);
    hash_str(hasher, &category.path);
    match &category.parent_id {
        Some(parent_id) => {
            hasher.update([1u8]);
            hash_str(hasher, parent_id);
        }
        None => hasher.update([0u8]),
    }
    hasher.update(category.level.to_le_bytes());
    hasher.update(category.sort_order.to_le_bytes());
    hasher.update([u8::from(category.is_active)]);
    hasher.update(category.product_count.to_le_bytes());
}

/// Length-prefixed so adjacent fields cannot run together.
fn hash_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Cache of the last built forest and its filtered views.
#[derive(Debug)]
pub struct TreeCache {
    current: Option<(Fingerprint, Vec<CategoryNode>)>,
    filtered: LruCache<String, Vec<CategoryNode>>,
    hits: u64,
    misses: u64,
}

impl Default for TreeCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl TreeCache {
    /// `capacity` bounds the number of remembered queries (at least 1).
    /// The least recently used query is evicted first.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            current: None,
            filtered: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// The forest for `categories`, rebuilt only when the listing changed.
    pub fn forest(&mut self, categories: &[Category]) -> &[CategoryNode] {
        let fingerprint = Fingerprint::of(categories);
        self.refresh(fingerprint, categories);
        match &self.current {
            Some((_, forest)) => forest,
            None => &[],
        }
    }

    /// `filter_tree(build_tree(categories), query)`, memoized.
    pub fn filtered(&mut self, categories: &[Category], query: &str) -> &[CategoryNode] {
        let fingerprint = Fingerprint::of(categories);
        self.refresh(fingerprint, categories);

        if self.filtered.contains(query) {
            self.hits += 1;
            tracing::trace!(query, "tree cache hit");
        } else {
            self.misses += 1;
            let forest = match &self.current {
                Some((_, forest)) => filter_tree(forest, query),
                None => Vec::new(),
            };
            self.filtered.put(query.to_string(), forest);
        }

        self.filtered.get(query).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of cached query results.
    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    fn refresh(&mut self, fingerprint: Fingerprint, categories: &[Category]) {
        if matches!(&self.current, Some((current, _)) if *current == fingerprint) {
            return;
        }
        tracing::debug!(%fingerprint, "category listing changed, rebuilding tree");
        self.filtered.clear();
        self.current = Some((fingerprint, build_tree(categories)));
    }
}
