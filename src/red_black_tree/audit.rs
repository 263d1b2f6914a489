//! Independent verification of the structural invariants of a left-leaning red black tree.

use crate::red_black_tree::tree::{self, Tree};
use std::fmt;

/// An enum representing a structural invariant of a left-leaning red black tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Invariant {
    /// Every key in a left subtree is strictly less than its ancestor, and every key in a right
    /// subtree is strictly greater.
    SymmetricOrder,
    /// The size of every node is one more than the sum of the sizes of its children.
    SizeConsistency,
    /// No node has a red right link.
    RightLeaningRed,
    /// No red node other than the root has a red left link.
    ConsecutiveReds,
    /// Every path from the root to a leaf has the same number of black links.
    BlackBalance,
    /// Selecting a rank and ranking the selected key agree, in both directions.
    RankConsistency,
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Invariant::SymmetricOrder => "not in symmetric order",
            Invariant::SizeConsistency => "subtree counts not consistent",
            Invariant::RightLeaningRed => "red right link",
            Invariant::ConsecutiveReds => "two red links in a row",
            Invariant::BlackBalance => "not black balanced",
            Invariant::RankConsistency => "ranks not consistent",
        };
        write!(f, "{}", description)
    }
}

/// Returns every invariant that `tree` violates, in declaration order of `Invariant`.
pub fn violations<T>(tree: &Tree<T>) -> Vec<Invariant>
where
    T: Ord,
{
    let mut ret = Vec::new();
    if !is_bst(tree, None, None) {
        ret.push(Invariant::SymmetricOrder);
    }
    if !is_size_consistent(tree) {
        ret.push(Invariant::SizeConsistency);
    }
    if has_red_right_link(tree) {
        ret.push(Invariant::RightLeaningRed);
    }
    if let Some(node) = tree {
        if has_consecutive_reds(&node.left) || has_consecutive_reds(&node.right) {
            ret.push(Invariant::ConsecutiveReds);
        }
    }
    if !is_balanced(tree) {
        ret.push(Invariant::BlackBalance);
    }
    if !is_rank_consistent(tree) {
        ret.push(Invariant::RankConsistency);
    }
    ret
}

fn is_bst<T>(tree: &Tree<T>, min: Option<&T>, max: Option<&T>) -> bool
where
    T: Ord,
{
    match tree {
        None => true,
        Some(node) => {
            if min.map_or(false, |min| node.key <= *min) {
                return false;
            }
            if max.map_or(false, |max| node.key >= *max) {
                return false;
            }
            is_bst(&node.left, min, Some(&node.key)) && is_bst(&node.right, Some(&node.key), max)
        },
    }
}

fn is_size_consistent<T>(tree: &Tree<T>) -> bool {
    match tree {
        None => true,
        Some(node) => {
            node.size == tree::size(&node.left) + tree::size(&node.right) + 1
                && is_size_consistent(&node.left)
                && is_size_consistent(&node.right)
        },
    }
}

fn has_red_right_link<T>(tree: &Tree<T>) -> bool {
    match tree {
        None => false,
        Some(node) => {
            tree::is_red(&node.right)
                || has_red_right_link(&node.left)
                || has_red_right_link(&node.right)
        },
    }
}

// The root is exempt: its color is a leftover of the deletion protocol rather than a link.
fn has_consecutive_reds<T>(tree: &Tree<T>) -> bool {
    match tree {
        None => false,
        Some(node) => {
            (node.is_red() && tree::is_red(&node.left))
                || has_consecutive_reds(&node.left)
                || has_consecutive_reds(&node.right)
        },
    }
}

fn is_balanced<T>(tree: &Tree<T>) -> bool {
    let mut black = 0;
    let mut curr = tree;
    while let Some(node) = curr {
        if !node.is_red() {
            black += 1;
        }
        curr = &node.left;
    }
    is_balanced_with(tree, black)
}

fn is_balanced_with<T>(tree: &Tree<T>, mut black: usize) -> bool {
    match tree {
        None => black == 0,
        Some(node) => {
            if !node.is_red() {
                if black == 0 {
                    return false;
                }
                black -= 1;
            }
            is_balanced_with(&node.left, black) && is_balanced_with(&node.right, black)
        },
    }
}

fn is_rank_consistent<T>(tree: &Tree<T>) -> bool
where
    T: Ord,
{
    let len = tree::size(tree);
    for index in 0..len {
        match tree::select(tree, index) {
            Some(key) if tree::rank(tree, key) == index => {},
            _ => return false,
        }
    }

    let mut keys = Vec::with_capacity(len);
    collect_keys(tree, &mut keys);
    keys.into_iter().all(|key| {
        let index = tree::rank(tree, key);
        tree::select(tree, index).map_or(false, |selected| selected == key)
    })
}

fn collect_keys<'a, T>(tree: &'a Tree<T>, keys: &mut Vec<&'a T>) {
    if let Some(node) = tree {
        collect_keys(&node.left, keys);
        keys.push(&node.key);
        collect_keys(&node.right, keys);
    }
}

#[cfg(test)]
mod tests {
    use super::{violations, Invariant};
    use crate::red_black_tree::node::{Color, Node};
    use crate::red_black_tree::tree::{self, Tree};

    fn leaf(key: u32, color: Color) -> Tree<u32> {
        let mut node = Node::new(key);
        node.color = color;
        Some(Box::new(node))
    }

    fn join(key: u32, color: Color, left: Tree<u32>, right: Tree<u32>) -> Tree<u32> {
        let mut node = Node::new(key);
        node.color = color;
        node.left = left;
        node.right = right;
        node.update();
        Some(Box::new(node))
    }

    #[test]
    fn test_empty_tree_is_valid() {
        let tree: Tree<u32> = None;
        assert!(violations(&tree).is_empty());
    }

    #[test]
    fn test_inserted_tree_is_valid() {
        let mut tree = None;
        for key in 0..100 {
            tree::insert(&mut tree, (key * 37) % 101);
            tree::blacken_root(&mut tree);
            assert!(violations(&tree).is_empty());
        }
    }

    #[test]
    fn test_symmetric_order_violation() {
        // 3 sits in the left subtree of 2 even though it is greater
        let tree = join(2, Color::Black, leaf(3, Color::Black), leaf(4, Color::Black));
        assert!(violations(&tree).contains(&Invariant::SymmetricOrder));
    }

    #[test]
    fn test_size_violation() {
        let mut tree = join(2, Color::Black, leaf(1, Color::Black), leaf(3, Color::Black));
        if let Some(node) = tree.as_mut() {
            node.size = 4;
        }
        let ret = violations(&tree);
        assert!(ret.contains(&Invariant::SizeConsistency));
        assert!(!ret.contains(&Invariant::SymmetricOrder));
    }

    #[test]
    fn test_right_leaning_red_violation() {
        let tree = join(1, Color::Black, None, leaf(2, Color::Red));
        assert_eq!(violations(&tree), vec![Invariant::RightLeaningRed]);
    }

    #[test]
    fn test_consecutive_reds_violation() {
        let tree = join(
            3,
            Color::Black,
            join(2, Color::Red, leaf(1, Color::Red), None),
            leaf(4, Color::Black),
        );
        let ret = violations(&tree);
        assert!(ret.contains(&Invariant::ConsecutiveReds));
    }

    #[test]
    fn test_red_root_with_red_left_child_is_allowed() {
        let tree = join(2, Color::Red, leaf(1, Color::Red), None);
        assert!(violations(&tree).is_empty());
    }

    #[test]
    fn test_black_balance_violation() {
        let tree = join(2, Color::Black, leaf(1, Color::Black), None);
        assert_eq!(violations(&tree), vec![Invariant::BlackBalance]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Invariant::BlackBalance.to_string(), "not black balanced");
        assert_eq!(Invariant::SymmetricOrder.to_string(), "not in symmetric order");
    }
}
