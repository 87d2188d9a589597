use core::ops::Index;

use super::AvlMap;
use crate::Rank;

impl<V> AvlMap<V> {
    /// Returns the entry at zero-based position `rank` in sorted key order.
    ///
    /// Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n) - order-statistic selection over subtree sizes, no
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_avl::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(10, "a").unwrap();
    /// map.insert(30, "c").unwrap();
    /// map.insert(20, "b").unwrap();
    ///
    /// assert_eq!(map.get_by_rank(1), Some((20, &"b")));
    /// assert_eq!(map.get_by_rank(3), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(i64, &V)> {
        let handle = self.raw.select(rank.checked_add(1)?)?;
        let node = self.raw.node(handle);
        Some((node.key(), node.value()))
    }

    /// Returns the zero-based position of `key` in sorted key order, or
    /// `None` if the key is not present.
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
    /// map.insert(10, "a").unwrap();
    /// map.insert(20, "b").unwrap();
    ///
    /// assert_eq!(map.rank_of(10), Some(0));
    /// assert_eq!(map.rank_of(20), Some(1));
    /// assert_eq!(map.rank_of(15), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, key: i64) -> Option<usize> {
        let mut rank = 0usize;
        let mut current = self.raw.root();
        while let Some(h) = current {
            let node = self.raw.node(h);
            let k = node.key();
            if key == k {
                return Some(rank + self.raw.subtree_size(node.left()));
            }
            if key < k {
                current = node.left();
            } else {
                rank += self.raw.subtree_size(node.left()) + 1;
                current = node.right();
            }
        }
        None
    }
}

/// Indexes into the map by sorted position.
///
/// # Panics
///
/// Panics if the rank is out of bounds.
///
/// # Examples
///
/// ```
/// use ranked_avl::{AvlMap, Rank};
///
/// let map = AvlMap::from([(1, "a"), (2, "b")]);
/// assert_eq!(map[Rank(1)], "b");
/// ```
impl<V> Index<Rank> for AvlMap<V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}
