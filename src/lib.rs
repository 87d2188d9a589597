//! Ranked AVL tree collections for Rust.
//!
//! This crate provides two collection types built on one arena-backed,
//! size-augmented AVL tree engine:
//!
//! - [`AvlMap`] - a sorted map from `i64` keys to an arbitrary payload, with
//!   O(log n) insert/remove/lookup and O(1) access to the minimum and maximum
//!   entries
//! - [`RankList`] - a list addressed purely by position, with O(log n)
//!   insert/retrieve/delete at any index
//!
//! Both types share the same rebalancing machinery (height/size bookkeeping,
//! rotation selection, successor splicing on two-child deletion); they differ
//! only in how a target node is located - by key comparison in [`AvlMap`], by
//! rank arithmetic in [`RankList`]. The keys carried by a [`RankList`] are
//! inert cargo and are never compared.
//!
//! # Example
//!
//! ```
//! use ranked_avl::{AvlMap, RankList};
//!
//! let mut map = AvlMap::new();
//! map.insert(3, "three").unwrap();
//! map.insert(1, "one").unwrap();
//! map.insert(2, "two").unwrap();
//!
//! assert_eq!(map.get(2), Some(&"two"));
//! assert_eq!(map.min(), Some((1, &"one")));
//! assert_eq!(map.sorted_keys(), [1, 2, 3]);
//!
//! let mut list = RankList::new();
//! list.insert(0, 10, "a").unwrap();
//! list.insert(0, 20, "b").unwrap();
//! list.insert(1, 30, "c").unwrap();
//!
//! // Positional order, independent of the keys.
//! assert_eq!(list.retrieve(0).unwrap(), (20, &"b"));
//! assert_eq!(list.retrieve(1).unwrap(), (30, &"c"));
//! assert_eq!(list.retrieve(2).unwrap(), (10, &"a"));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library
//!   dependency
//! - **O(log n) rank operations** - Order-statistic selection via subtree
//!   size augmentation, shared between the map's [`get_by_rank`] extension
//!   and the list's positional addressing
//! - **Rotation accounting** - [`AvlMap`] mutations report how many
//!   rotations restoring the balance invariant cost
//!
//! [`get_by_rank`]: AvlMap::get_by_rank
//!
//! # Implementation
//!
//! Nodes live in a slot arena and reference each other through `NonZero`
//! index handles, so child links, parent back-references, and subtree sizes
//! are all plain 4-byte fields with no reference counting and no unsafe
//! code. Parent handles are non-owning: a node is kept alive by exactly one
//! child slot (or the root), and upward fix-up walks follow the back
//! references without ever making destruction decisions through them.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod rank;
mod raw;

pub mod avl_map;
pub mod rank_list;

pub use avl_map::AvlMap;
pub use error::Error;
pub use rank::Rank;
pub use rank_list::RankList;
