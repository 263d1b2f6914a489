use crate::error::{Error, Result};
use crate::red_black_tree::audit::{self, Invariant};
use crate::red_black_tree::node::Node;
use crate::red_black_tree::tree;
use log::{error, trace};
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::result;
use std::time::{Duration, Instant};

/// An enum representing a mutating operation reported to an observability hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Insert,
    Remove,
    DeleteMin,
    DeleteMax,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Insert => "insert",
            Operation::Remove => "remove",
            Operation::DeleteMin => "delete_min",
            Operation::DeleteMax => "delete_max",
        };
        write!(f, "{}", name)
    }
}

type Hook = Box<dyn Fn(Operation, Duration) + Send + Sync>;

/// An ordered set implemented using a left-leaning red black tree.
///
/// A left-leaning red black tree is a binary search tree that is isomorphic to a 2-3 tree. A
/// 3-node is represented as a black node with a red left child, so no red link ever leans right
/// and every path from the root to a leaf has the same number of black links. Every node also
/// tracks the size of its subtree, so order statistics take logarithmic time.
///
/// # Examples
///
/// ```
/// use llrb_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Ok(&0));
/// assert_eq!(set.ceil(&2), Ok(Some(&3)));
/// assert_eq!(set.select(1), Ok(&3));
/// assert_eq!(set.rank(&3), 1);
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// assert!(set.check());
/// ```
pub struct RedBlackSet<T> {
    tree: tree::Tree<T>,
    hook: Option<Hook>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        RedBlackSet {
            tree: None,
            hook: None,
        }
    }

    /// Installs a hook that is invoked with the operation and its duration after every
    /// successful mutation. Replaces any previously installed hook.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::{Operation, RedBlackSet};
    /// use std::sync::{Arc, Mutex};
    ///
    /// let operations = Arc::new(Mutex::new(Vec::new()));
    /// let recorded = Arc::clone(&operations);
    ///
    /// let mut set = RedBlackSet::new();
    /// set.set_hook(move |operation, _| recorded.lock().unwrap().push(operation));
    /// set.insert(1);
    /// set.remove(&1);
    ///
    /// assert_eq!(*operations.lock().unwrap(), vec![Operation::Insert, Operation::Remove]);
    /// ```
    pub fn set_hook<F>(&mut self, hook: F)
    where
        F: Fn(Operation, Duration) + Send + Sync + 'static,
    {
        self.hook = Some(Box::new(hook));
    }

    /// Removes the hook installed by `set_hook`, if any.
    pub fn clear_hook(&mut self) {
        self.hook = None;
    }

    fn start(&self) -> Option<Instant> {
        self.hook.as_ref().map(|_| Instant::now())
    }

    fn observe(&self, operation: Operation, start: Option<Instant>) {
        match (start, &self.hook) {
            (Some(start), Some(hook)) => {
                let elapsed = start.elapsed();
                trace!("{} completed in {:?}; len = {}", operation, elapsed, self.len());
                hook(operation, elapsed);
            },
            _ => trace!("{} completed; len = {}", operation, self.len()),
        }
    }

    /// Inserts a key into the set. If the key already exists in the set, it will return and
    /// replace the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.insert(1), None);
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Some(1));
    /// ```
    pub fn insert(&mut self, key: T) -> Option<T>
    where
        T: Ord,
    {
        let start = self.start();
        let ret = tree::insert(&mut self.tree, key);
        tree::blacken_root(&mut self.tree);
        self.observe(Operation::Insert, start);
        ret
    }

    /// Removes a key from the set. If the key exists in the set, it will return the removed key.
    /// Otherwise it will return `None` and leave the set untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        if !self.contains(key) {
            return None;
        }

        let start = self.start();
        tree::redden_root(&mut self.tree);
        let ret = tree::remove(&mut self.tree, key);
        tree::blacken_root(&mut self.tree);
        self.observe(Operation::Remove, start);
        ret
    }

    /// Removes and returns the minimum key of the set.
    ///
    /// # Errors
    ///
    /// Returns `Error::Underflow` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.delete_min(), Ok(1));
    /// assert_eq!(set.delete_min(), Ok(3));
    /// assert!(set.delete_min().is_err());
    /// ```
    pub fn delete_min(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::Underflow("delete_min"));
        }

        let start = self.start();
        tree::redden_root(&mut self.tree);
        let ret = tree::remove_min(&mut self.tree);
        tree::blacken_root(&mut self.tree);
        self.observe(Operation::DeleteMin, start);
        ret.ok_or(Error::Underflow("delete_min"))
    }

    /// Removes and returns the maximum key of the set.
    ///
    /// # Errors
    ///
    /// Returns `Error::Underflow` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.delete_max(), Ok(3));
    /// assert_eq!(set.delete_max(), Ok(1));
    /// assert!(set.delete_max().is_err());
    /// ```
    pub fn delete_max(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::Underflow("delete_max"));
        }

        let start = self.start();
        tree::redden_root(&mut self.tree);
        let ret = tree::remove_max(&mut self.tree);
        tree::blacken_root(&mut self.tree);
        self.observe(Operation::DeleteMax, start);
        ret.ok_or(Error::Underflow("delete_max"))
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns a reference to the key in the set that is equal to a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(String::from("a"));
    /// assert_eq!(set.get("a"), Some(&String::from("a")));
    /// assert_eq!(set.get("b"), None);
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, key)
    }

    /// Returns the number of keys in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        tree::size(&self.tree)
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    /// Returns the number of links on the longest path from the root to a leaf, or `None` if the
    /// set is empty. A set with a single key has a height of zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.height(), None);
    /// set.insert(1);
    /// assert_eq!(set.height(), Some(0));
    /// set.insert(2);
    /// set.insert(3);
    /// assert_eq!(set.height(), Some(1));
    /// ```
    pub fn height(&self) -> Option<usize> {
        tree::height(&self.tree)
    }

    /// Clears the set, removing all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
    }

    /// Returns the largest key in the set that is less than or equal to a particular key.
    /// Returns `Ok(None)` if such a key does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::Underflow` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.floor(&0), Ok(None));
    /// assert_eq!(set.floor(&2), Ok(Some(&1)));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Result<Option<&T>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        if self.is_empty() {
            return Err(Error::Underflow("floor"));
        }
        Ok(tree::floor(&self.tree, key))
    }

    /// Returns the smallest key in the set that is greater than or equal to a particular key.
    /// Returns `Ok(None)` if such a key does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::Underflow` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.ceil(&0), Ok(Some(&1)));
    /// assert_eq!(set.ceil(&2), Ok(None));
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Result<Option<&T>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        if self.is_empty() {
            return Err(Error::Underflow("ceil"));
        }
        Ok(tree::ceil(&self.tree, key))
    }

    /// Returns the minimum key of the set.
    ///
    /// # Errors
    ///
    /// Returns `Error::Underflow` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&T> {
        tree::min(&self.tree).ok_or(Error::Underflow("min"))
    }

    /// Returns the maximum key of the set.
    ///
    /// # Errors
    ///
    /// Returns `Error::Underflow` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Ok(&3));
    /// ```
    pub fn max(&self) -> Result<&T> {
        tree::max(&self.tree).ok_or(Error::Underflow("max"))
    }

    /// Returns the key with a particular rank, that is, the key that has exactly `index` smaller
    /// keys in the set.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `index` is not less than the length of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(10);
    /// set.insert(20);
    /// assert_eq!(set.select(0), Ok(&10));
    /// assert_eq!(set.select(1), Ok(&20));
    /// assert!(set.select(2).is_err());
    /// ```
    pub fn select(&self, index: usize) -> Result<&T> {
        tree::select(&self.tree, index).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "rank {} is out of bounds for a set of length {}",
                index,
                self.len(),
            ))
        })
    }

    /// Returns the number of keys in the set that are strictly less than a particular key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(10);
    /// set.insert(20);
    /// assert_eq!(set.rank(&5), 0);
    /// assert_eq!(set.rank(&20), 1);
    /// assert_eq!(set.rank(&25), 2);
    /// ```
    pub fn rank<V>(&self, key: &V) -> usize
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::rank(&self.tree, key)
    }

    /// Returns the number of keys `key` in the set with `lo <= key <= hi`, without traversing
    /// the range. Returns zero if `lo > hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = (1..10).collect();
    /// assert_eq!(set.range_len(&3, &5), 3);
    /// assert_eq!(set.range_len(&0, &100), 9);
    /// assert_eq!(set.range_len(&5, &3), 0);
    /// ```
    pub fn range_len<V>(&self, lo: &V, hi: &V) -> usize
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        if lo > hi {
            return 0;
        }
        let upper = self.rank(hi) + if self.contains(hi) { 1 } else { 0 };
        upper - self.rank(lo)
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter {
            current: &self.tree,
            stack: Vec::new(),
            remaining: self.len(),
        }
    }

    /// Returns an iterator over the keys `key` in the set with `lo <= key <= hi`, in order. Only
    /// the subtrees that can contain such keys are visited. The iterator is empty if `lo > hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = (1..10).collect();
    /// assert_eq!(set.range(&3, &5).collect::<Vec<&u32>>(), vec![&3, &4, &5]);
    /// assert_eq!(set.range(&5, &3).next(), None);
    /// ```
    pub fn range<'a, V>(&'a self, lo: &'a V, hi: &'a V) -> RedBlackSetRange<'a, T, V>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut range = RedBlackSetRange {
            stack: Vec::new(),
            lo,
            hi,
        };
        range.descend(&self.tree);
        range
    }

    /// Returns `true` if every structural invariant of the underlying tree holds. Every violated
    /// invariant is logged at the error level. This is a verification tool that runs in linear
    /// time, and is not needed for the correctness of the other operations.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = (0..100).rev().collect();
    /// assert!(set.check());
    /// ```
    pub fn check(&self) -> bool
    where
        T: Ord,
    {
        let violations = self.violations();
        for invariant in &violations {
            error!("red black tree invariant violated: {}", invariant);
        }
        violations.is_empty()
    }

    /// Returns every structural invariant that the underlying tree violates.
    pub fn violations(&self) -> Vec<Invariant>
    where
        T: Ord,
    {
        audit::violations(&self.tree)
    }
}

impl<T> IntoIterator for RedBlackSet<T> {
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            remaining: self.len(),
            current: self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct RedBlackSetIntoIter<T> {
    current: tree::Tree<T>,
    stack: Vec<Node<T>>,
    remaining: usize,
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { key, right, .. } = node;
            self.current = right;
            self.remaining -= 1;
            key
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for RedBlackSetIntoIter<T> {}

/// An iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct RedBlackSetIter<'a, T> {
    current: &'a tree::Tree<T>,
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            self.remaining -= 1;
            &node.key
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for RedBlackSetIter<'a, T> where T: 'a {}

/// An iterator over a range of keys of a `RedBlackSet<T>`.
///
/// This iterator traverses the keys `key` with `lo <= key <= hi` in-order and yields immutable
/// references. Subtrees that lie entirely outside of the range are never visited.
pub struct RedBlackSetRange<'a, T, V>
where
    V: ?Sized,
{
    stack: Vec<&'a Node<T>>,
    lo: &'a V,
    hi: &'a V,
}

impl<'a, T, V> RedBlackSetRange<'a, T, V>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    // pushes the path to the smallest key in `tree` that is not less than `lo`
    fn descend(&mut self, mut tree: &'a tree::Tree<T>) {
        while let Some(node) = tree {
            if node.key.borrow() < self.lo {
                tree = &node.right;
            } else {
                self.stack.push(node);
                tree = &node.left;
            }
        }
    }
}

impl<'a, T, V> Iterator for RedBlackSetRange<'a, T, V>
where
    T: Borrow<V> + 'a,
    V: Ord + ?Sized,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if node.key.borrow() > self.hi {
            self.stack.clear();
            return None;
        }
        self.descend(&node.right);
        Some(&node.key)
    }
}

impl<T> Default for RedBlackSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RedBlackSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for RedBlackSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &RedBlackSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for RedBlackSet<T> where T: Eq {}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> Serialize for RedBlackSet<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

struct RedBlackSetVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for RedBlackSetVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = RedBlackSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of keys")
    }

    fn visit_seq<A>(self, mut seq: A) -> result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = RedBlackSet::new();
        while let Some(key) = seq.next_element()? {
            set.insert(key);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for RedBlackSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RedBlackSetVisitor {
            marker: PhantomData,
        })
    }
}
