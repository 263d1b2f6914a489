//! A common interface over ordered sets, so that callers can swap one balanced tree for another
//! without change.

use crate::error::{Error, Result};
use crate::red_black_tree::RedBlackSet;
use std::collections::BTreeSet;

/// The operations shared by every ordered set implementation.
///
/// # Examples
///
/// ```
/// use llrb_collections::red_black_tree::RedBlackSet;
/// use llrb_collections::OrderedSet;
/// use std::collections::BTreeSet;
///
/// fn fill<S: OrderedSet<u32>>(set: &mut S) {
///     for key in &[5, 2, 8] {
///         set.insert(*key);
///     }
/// }
///
/// let mut llrb = RedBlackSet::new();
/// let mut btree = BTreeSet::new();
/// fill(&mut llrb);
/// fill(&mut btree);
///
/// assert_eq!(OrderedSet::min(&llrb), OrderedSet::min(&btree));
/// assert_eq!(OrderedSet::len(&llrb), OrderedSet::len(&btree));
/// ```
pub trait OrderedSet<T> {
    /// Inserts a key into the set. Returns `true` if the key was not already present.
    fn insert(&mut self, key: T) -> bool;

    /// Removes a key from the set. Returns `true` if the key was present.
    fn remove(&mut self, key: &T) -> bool;

    /// Checks if a key exists in the set.
    fn contains(&self, key: &T) -> bool;

    /// Returns the minimum key of the set, or `Error::Underflow` if the set is empty.
    fn min(&self) -> Result<&T>;

    /// Returns the maximum key of the set, or `Error::Underflow` if the set is empty.
    fn max(&self) -> Result<&T>;

    /// Returns the number of keys in the set.
    fn len(&self) -> usize;

    /// Returns `true` if the set is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> OrderedSet<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn insert(&mut self, key: T) -> bool {
        RedBlackSet::insert(self, key).is_none()
    }

    fn remove(&mut self, key: &T) -> bool {
        RedBlackSet::remove(self, key).is_some()
    }

    fn contains(&self, key: &T) -> bool {
        RedBlackSet::contains(self, key)
    }

    fn min(&self) -> Result<&T> {
        RedBlackSet::min(self)
    }

    fn max(&self) -> Result<&T> {
        RedBlackSet::max(self)
    }

    fn len(&self) -> usize {
        RedBlackSet::len(self)
    }
}

impl<T> OrderedSet<T> for BTreeSet<T>
where
    T: Ord,
{
    fn insert(&mut self, key: T) -> bool {
        BTreeSet::insert(self, key)
    }

    fn remove(&mut self, key: &T) -> bool {
        BTreeSet::remove(self, key)
    }

    fn contains(&self, key: &T) -> bool {
        BTreeSet::contains(self, key)
    }

    fn min(&self) -> Result<&T> {
        self.iter().next().ok_or(Error::Underflow("min"))
    }

    fn max(&self) -> Result<&T> {
        self.iter().next_back().ok_or(Error::Underflow("max"))
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}
