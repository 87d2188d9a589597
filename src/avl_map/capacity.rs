use super::AvlMap;
use crate::raw::RawAvlTree;

impl<V> AvlMap<V> {
    /// Creates an empty map with room for at least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_avl::AvlMap;
    ///
    /// let map: AvlMap<i32> = AvlMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlMap {
            raw: RawAvlTree::with_capacity(capacity),
            min: None,
            max: None,
        }
    }

    /// Returns the current node capacity of the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
