use alloc::vec::Vec;
use core::fmt;

use crate::error::Error;
use crate::raw::{Handle, RawAvlTree, Side};

mod capacity;
mod order_statistic;

pub use crate::Rank;

/// A sorted map from `i64` keys to an arbitrary payload, backed by a
/// size-augmented AVL tree.
///
/// Keys are unique and fixed at insertion; so is the payload. Mutating
/// operations report how many rotations the rebalancing walk performed, and
/// fail without touching the tree when given a duplicate key
/// ([`Error::DuplicateKey`]) or an absent one ([`Error::KeyNotFound`]).
///
/// Handles to the minimum and maximum entries are cached and maintained
/// incrementally, so [`min`](AvlMap::min) and [`max`](AvlMap::max) are O(1).
///
/// # Examples
///
/// ```
/// use ranked_avl::AvlMap;
///
/// let mut seen = AvlMap::new();
///
/// seen.insert(1969, "moon landing").unwrap();
/// seen.insert(1903, "first flight").unwrap();
/// seen.insert(1957, "sputnik").unwrap();
///
/// assert_eq!(seen.get(1957), Some(&"sputnik"));
/// assert_eq!(seen.min(), Some((1903, &"first flight")));
/// assert_eq!(seen.max(), Some((1969, &"moon landing")));
/// assert_eq!(seen.sorted_keys(), [1903, 1957, 1969]);
///
/// // A second insert under an existing key is rejected.
/// assert!(seen.insert(1957, "explorer 1").is_err());
/// assert_eq!(seen.len(), 3);
/// ```
pub struct AvlMap<V> {
    raw: RawAvlTree<V>,
    /// Cached handle of the entry with the smallest key.
    min: Option<Handle>,
    /// Cached handle of the entry with the largest key.
    max: Option<Handle>,
}

impl<V> AvlMap<V> {
    /// Creates an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_avl::AvlMap;
    ///
    /// let map: AvlMap<&str> = AvlMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: RawAvlTree::new(),
            min: None,
            max: None,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1) - read off the root's subtree size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.min = None;
        self.max = None;
    }

    /// Returns a reference to the payload stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_avl::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a").unwrap();
    ///
    /// assert_eq!(map.get(1), Some(&"a"));
    /// assert_eq!(map.get(2), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: i64) -> Option<&V> {
        self.find(key).map(|h| self.raw.node(h).value())
    }

    /// Returns the key-value pair stored under `key`.
    #[must_use]
    pub fn get_key_value(&self, key: i64) -> Option<(i64, &V)> {
        self.find(key).map(|h| {
            let node = self.raw.node(h);
            (node.key(), node.value())
        })
    }

    /// Returns true if the map contains `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains_key(&self, key: i64) -> bool {
        self.find(key).is_some()
    }

    /// Inserts `value` under `key`.
    ///
    /// Returns the number of rotations the rebalancing walk performed - at
    /// most one single or one double rotation for an insert, so 0, 1, or 2.
    /// If `key` is already present the map is left untouched and
    /// [`Error::DuplicateKey`] is returned.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if an entry with `key` already exists.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_avl::{AvlMap, Error};
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.insert(3, "c"), Ok(0));
    /// assert_eq!(map.insert(2, "b"), Ok(0));
    /// // The third insert along a descending run costs one rotation.
    /// assert_eq!(map.insert(1, "a"), Ok(1));
    ///
    /// assert_eq!(map.insert(2, "again"), Err(Error::DuplicateKey(2)));
    /// ```
    pub fn insert(&mut self, key: i64, value: V) -> Result<usize, Error> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.raw.root();
        while let Some(h) = current {
            let k = self.raw.node(h).key();
            if k == key {
                return Err(Error::DuplicateKey(key));
            }
            parent = Some(h);
            side = if key < k { Side::Left } else { Side::Right };
            current = self.raw.node(h).child(side);
        }

        let new = match parent {
            None => self.raw.attach_root(key, value),
            Some(p) => self.raw.attach(p, side, key, value),
        };
        let rotations = self.raw.fix_up_path(self.raw.node(new).parent());

        // Rotations move nodes, not handles, so the caches stay valid; a
        // key comparison is all a refresh takes.
        match self.min {
            Some(min) if key >= self.raw.node(min).key() => {}
            _ => self.min = Some(new),
        }
        match self.max {
            Some(max) if key <= self.raw.node(max).key() => {}
            _ => self.max = Some(new),
        }

        Ok(rotations)
    }

    /// Removes the entry stored under `key`.
    ///
    /// Returns the number of rotations the rebalancing walk performed; a
    /// deletion may rebalance once per ancestor level, so the count is
    /// bounded by the tree height.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no entry with `key` exists; the map is
    /// left untouched.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_avl::{AvlMap, Error};
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a").unwrap();
    ///
    /// assert!(map.remove(1).is_ok());
    /// assert_eq!(map.remove(1), Err(Error::KeyNotFound(1)));
    /// ```
    pub fn remove(&mut self, key: i64) -> Result<usize, Error> {
        let node = self.find(key).ok_or(Error::KeyNotFound(key))?;
        let start = self.raw.unlink(node);
        self.raw.take_node(node);
        let rotations = self.raw.fix_up_path(start);

        // Only the targeted node's slot was freed, and an extreme has at
        // most one child, so it is never the surviving successor of a
        // two-child splice: the caches can only dangle if they named the
        // target itself.
        if self.min == Some(node) {
            self.min = self.raw.min_in_subtree(self.raw.root());
        }
        if self.max == Some(node) {
            self.max = self.raw.max_in_subtree(self.raw.root());
        }

        Ok(rotations)
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Complexity
    ///
    /// O(1) - served from the cached handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_avl::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.min(), None);
    ///
    /// map.insert(2, "b").unwrap();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.min(), Some((1, &"a")));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<(i64, &V)> {
        let node = self.raw.node(self.min?);
        Some((node.key(), node.value()))
    }

    /// Returns the entry with the largest key.
    ///
    /// # Complexity
    ///
    /// O(1) - served from the cached handle.
    #[must_use]
    pub fn max(&self) -> Option<(i64, &V)> {
        let node = self.raw.node(self.max?);
        Some((node.key(), node.value()))
    }

    /// Returns every key in ascending order, materialized.
    ///
    /// The result is a snapshot: callers get random access and the map can
    /// be mutated afterwards without invalidating it.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_avl::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// for key in [5, 3, 8] {
    ///     map.insert(key, ()).unwrap();
    /// }
    /// assert_eq!(map.sorted_keys(), [3, 5, 8]);
    /// ```
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<i64> {
        let mut keys = Vec::with_capacity(self.len());
        self.raw.for_each_in_order(|node| keys.push(node.key()));
        keys
    }

    /// Returns a reference to every payload, in ascending key order,
    /// materialized.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn sorted_values(&self) -> Vec<&V> {
        let mut values = Vec::with_capacity(self.len());
        self.raw.for_each_in_order(|node| values.push(node.value()));
        values
    }

    /// Binary descent to the node holding `key`.
    fn find(&self, key: i64) -> Option<Handle> {
        let mut current = self.raw.root();
        while let Some(h) = current {
            let node = self.raw.node(h);
            let k = node.key();
            if k == key {
                return Some(h);
            }
            current = if key < k { node.left() } else { node.right() };
        }
        None
    }
}

impl<V> Default for AvlMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for AvlMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.raw.for_each_in_order(|node| {
            map.entry(&node.key(), node.value());
        });
        map.finish()
    }
}

/// Inserts every pair; pairs whose key is already present are skipped.
impl<V> Extend<(i64, V)> for AvlMap<V> {
    fn extend<I: IntoIterator<Item = (i64, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ = self.insert(key, value);
        }
    }
}

impl<V> FromIterator<(i64, V)> for AvlMap<V> {
    fn from_iter<I: IntoIterator<Item = (i64, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V, const N: usize> From<[(i64, V); N]> for AvlMap<V> {
    /// Builds a map from an array of pairs.
    ///
    /// ```
    /// use ranked_avl::AvlMap;
    ///
    /// let map = AvlMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.sorted_keys(), [1, 2]);
    /// ```
    fn from(pairs: [(i64, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}
