use std::collections::HashSet;

use super::ElementKey;

/// Grow-only set of revealed element keys.
///
/// There is no removal API. The set lives as long as the section that owns
/// it and is dropped with it.
#[derive(Debug, Default, Clone)]
pub struct RevealSet {
    keys: HashSet<ElementKey>,
}

impl RevealSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key`. Returns `true` if it was not revealed before.
    #[inline]
    pub fn insert(&mut self, key: ElementKey) -> bool {
        self.keys.insert(key)
    }

    #[inline]
    pub fn contains(&self, key: &ElementKey) -> bool {
        self.keys.contains(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iteration order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &ElementKey> {
        self.keys.iter()
    }
}
