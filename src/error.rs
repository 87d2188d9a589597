use thiserror::Error;

/// Failure classes for the fallible collection operations.
///
/// Every variant is detected before any structural change is made, so a
/// returned error always means the collection is exactly as it was. The
/// variants are distinct per failure class so callers can branch on them
/// rather than on message text.
///
/// # Examples
///
/// ```
/// use ranked_avl::{AvlMap, Error};
///
/// let mut map = AvlMap::new();
/// map.insert(1, "one").unwrap();
///
/// assert_eq!(map.insert(1, "again"), Err(Error::DuplicateKey(1)));
/// assert_eq!(map.remove(2), Err(Error::KeyNotFound(2)));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// An [`AvlMap`](crate::AvlMap) insert found the key already present.
    #[error("key {0} is already present")]
    DuplicateKey(i64),

    /// An [`AvlMap`](crate::AvlMap) remove found no node with the key.
    #[error("key {0} was not found")]
    KeyNotFound(i64),

    /// A [`RankList`](crate::RankList) operation was given a position
    /// outside the valid range (`0..len` for retrieve/delete, `0..=len`
    /// for insert).
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange {
        /// The rejected position.
        index: usize,
        /// The list length at the time of the call.
        len: usize,
    },
}
