//! Ordered multisets of keys, with order statistics: rank of a key, k-th smallest key,
//! predecessor and successor.
//!
//! Three balanced search tree engines implement the same [`OrderStatisticTree`] interface:
//! - [`splay::SplayTree`], amortized `O(log n)`, no balancing data in the nodes.
//! - [`treap::Treap`], expected `O(log n)`, balanced by rotations on random priorities.
//! - [`fhq_treap::FhqTreap`], expected `O(log n)`, balanced by splitting and merging.
//!   Only accepts keys from a discrete domain, see [`DiscreteKey`].
//!
//!```
//! use rank_trees::*;
//! use rank_trees::splay::SplayTree;
//!
//! let mut tree: SplayTree<i32> = vec![5, 3, 8, 3].into_iter().collect();
//! assert_eq!(tree.size(), 4);
//! assert_eq!(tree.rank(3), 1);
//! assert_eq!(tree.kth(2), Ok(3));
//! assert_eq!(tree.prev(5), Ok(3));
//! assert_eq!(tree.next(8), Err(TreeError::NoNextValue));
//!```

pub mod data;
pub mod driver;
pub mod error;
pub mod trees;

pub use data::{DiscreteKey, Key};
pub use error::{DriverError, TreeError};
pub use trees::*;
