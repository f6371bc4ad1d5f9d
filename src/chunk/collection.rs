//! Chunk collection
//!
//! Ordered list of chunks with lookup by key. Duplicate keys are kept.

use std::ops::Deref;

use super::Chunk;

/// Chunks in stream order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunks {
    items: Vec<Chunk>,
}

impl Chunks {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append a chunk at the end
    pub fn push(&mut self, chunk: Chunk) {
        self.items.push(chunk);
    }

    /// All chunks whose key equals `key`, in stream order
    pub fn find_by_key(&self, key: &[u8]) -> Chunks {
        self.items
            .iter()
            .filter(|chunk| chunk.key() == key)
            .cloned()
            .collect()
    }

    /// Whether any chunk has exactly this key
    pub fn has_key(&self, key: &[u8]) -> bool {
        self.items.iter().any(|chunk| chunk.key() == key)
    }

    pub fn into_vec(self) -> Vec<Chunk> {
        self.items
    }
}

impl Deref for Chunks {
    type Target = [Chunk];

    fn deref(&self) -> &[Chunk] {
        &self.items
    }
}

impl From<Vec<Chunk>> for Chunks {
    fn from(items: Vec<Chunk>) -> Self {
        Self { items }
    }
}

impl FromIterator<Chunk> for Chunks {
    fn from_iter<I: IntoIterator<Item = Chunk>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Chunk> for Chunks {
    fn extend<I: IntoIterator<Item = Chunk>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Chunks {
    type Item = Chunk;
    type IntoIter = std::vec::IntoIter<Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Chunks {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
