//! Instance banks.
//!
//! A bank stores generated instances without duplicates: an instance equal to
//! one already stored gets the existing index back. Lookup goes by
//! [`stable_hash`] first, then structural equality, so a hash collision
//! between unequal instances still stores both.

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::hash::stable_hash;

// =============================================================================
// InstanceBank
// =============================================================================

/// De-duplicating, append-only store of instances.
#[derive(Debug, Clone)]
pub struct InstanceBank<T> {
    items: Vec<T>,
    by_hash: FxHashMap<u64, SmallVec<[usize; 1]>>,
}

impl<T> Default for InstanceBank<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            by_hash: FxHashMap::default(),
        }
    }
}

impl<T: Hash + Eq> InstanceBank<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `item` unless an equal instance is present.
    ///
    /// Returns the index of the stored instance and whether it was newly added.
    pub fn insert(&mut self, item: T) -> (usize, bool) {
        let hash = stable_hash(&item);
        let bucket = self.by_hash.entry(hash).or_default();
        if let Some(&index) = bucket.iter().find(|&&i| self.items[i] == item) {
            crate::log::debug!(index, hash, "duplicate instance");
            return (index, false);
        }
        if !bucket.is_empty() {
            crate::log::warn!(hash, "hash collision between unequal instances");
        }
        let index = self.items.len();
        bucket.push(index);
        self.items.push(item);
        (index, true)
    }

    /// Index of an instance equal to `item`.
    pub fn position(&self, item: &T) -> Option<usize> {
        let bucket = self.by_hash.get(&stable_hash(item))?;
        bucket.iter().copied().find(|&i| self.items[i] == *item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.position(item).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Instances in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.by_hash.clear();
    }
}

// =============================================================================
// SharedInstanceBank
// =============================================================================

/// Thread-safe shared [`InstanceBank`].
///
/// Uses `parking_lot::RwLock`; clones share the same bank.
#[derive(Debug)]
pub struct SharedInstanceBank<T> {
    inner: Arc<RwLock<InstanceBank<T>>>,
}

impl<T> Clone for SharedInstanceBank<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedInstanceBank<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(InstanceBank::default())),
        }
    }
}

impl<T: Hash + Eq> SharedInstanceBank<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a closure with read access to the bank.
    pub fn with_read<R>(&self, f: impl FnOnce(&InstanceBank<T>) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with write access to the bank.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut InstanceBank<T>) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    pub fn insert(&self, item: T) -> (usize, bool) {
        self.with_write(|bank| bank.insert(item))
    }

    /// Clone of the instance at `index`.
    pub fn get(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.with_read(|bank| bank.get(index).cloned())
    }

    pub fn contains(&self, item: &T) -> bool {
        self.with_read(|bank| bank.contains(item))
    }

    pub fn len(&self) -> usize {
        self.with_read(InstanceBank::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.with_write(InstanceBank::clear);
    }
}

// =============================================================================
// Batch hashing
// =============================================================================

/// [`stable_hash`] of every item, in order.
#[cfg(feature = "parallel")]
pub fn structural_hashes<T: Hash + Sync>(items: &[T]) -> Vec<u64> {
    use rayon::prelude::*;
    items.par_iter().map(stable_hash::<T>).collect()
}

/// [`stable_hash`] of every item, in order.
#[cfg(not(feature = "parallel"))]
pub fn structural_hashes<T: Hash>(items: &[T]) -> Vec<u64> {
    items.iter().map(stable_hash::<T>).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{DocNode, HSpace, NodeBase, Text};

    fn hspace(width: f64) -> DocNode {
        HSpace::new(NodeBase::plain(), width).into()
    }

    #[test]
    fn test_insert_deduplicates() {
        let mut bank = InstanceBank::new();
        assert_eq!(bank.insert(hspace(1.0)), (0, true));
        assert_eq!(bank.insert(hspace(2.0)), (1, true));
        assert_eq!(bank.insert(hspace(1.0)), (0, false));
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(1), Some(&hspace(2.0)));
        assert!(bank.contains(&hspace(2.0)));
        assert!(!bank.contains(&hspace(3.0)));
    }

    #[test]
    fn test_exact_floats_are_distinct_instances() {
        let mut bank = InstanceBank::new();
        bank.insert(hspace(0.1 + 0.2));
        let (_, inserted) = bank.insert(hspace(0.3));
        assert!(inserted);
    }

    #[test]
    fn test_iter_in_insertion_order() {
        let mut bank = InstanceBank::new();
        for s in ["b", "a", "b", "c"] {
            bank.insert(Text::new(NodeBase::plain(), s));
        }
        let texts: Vec<&str> = bank.iter().map(Text::text).collect();
        assert_eq!(texts, ["b", "a", "c"]);
    }

    #[test]
    fn test_shared_bank_across_threads() {
        let bank: SharedInstanceBank<DocNode> = SharedInstanceBank::new();
        std::thread::scope(|s| {
            for _ in 0..4 {
                let bank = bank.clone();
                s.spawn(move || {
                    for w in 0..8 {
                        bank.insert(hspace(f64::from(w)));
                    }
                });
            }
        });
        assert_eq!(bank.len(), 8);
        assert!(bank.contains(&hspace(7.0)));
        assert!((0..8).all(|i| bank.get(i).is_some_and(|n| n.is_h_space())));
    }

    #[test]
    fn test_clear() {
        let bank = SharedInstanceBank::new();
        bank.insert(hspace(1.0));
        bank.clear();
        assert!(bank.is_empty());
        assert_eq!(bank.insert(hspace(1.0)), (0, true));
    }

    #[test]
    fn test_structural_hashes_match_items() {
        let items = vec![hspace(1.0), hspace(2.0), hspace(1.0)];
        let hashes = structural_hashes(&items);
        assert_eq!(hashes.len(), 3);
        assert_eq!(hashes[0], hashes[2]);
        assert_ne!(hashes[0], hashes[1]);
        assert_eq!(hashes[1], items[1].structural_hash());
    }
}
