//! Ordered collections backed by a left-leaning red black tree.
//!
//! `RedBlackSet` is an ordered set with logarithmic insertion, deletion and order-statistic
//! queries. Collections that only need the common ordered-set operations can be written against
//! the `OrderedSet` trait instead, so that the underlying implementation can be swapped.

mod error;
pub mod ordered;
pub mod red_black_tree;

pub use crate::error::{Error, Result};
pub use crate::ordered::OrderedSet;
