//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions. Red links always lean left, which
//! makes the tree isomorphic to a 2-3 tree.

mod audit;
mod node;
mod set;
mod tree;

pub use self::audit::Invariant;
pub use self::set::{
    Operation, RedBlackSet, RedBlackSetIntoIter, RedBlackSetIter, RedBlackSetRange,
};
