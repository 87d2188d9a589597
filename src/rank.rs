/// A zero-based rank into the sorted order of an [`AvlMap`](crate::AvlMap).
///
/// Wrapping the position in a newtype keeps rank indexing visibly distinct
/// from keyed lookup at the call site.
///
/// # Examples
///
/// ```
/// use ranked_avl::{AvlMap, Rank};
///
/// let mut map = AvlMap::new();
/// map.insert(10, "a").unwrap();
/// map.insert(5, "b").unwrap();
///
/// assert_eq!(map[Rank(0)], "b");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
