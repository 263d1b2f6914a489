use crate::red_black_tree::node::{Color, Node};
use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::mem;

pub type Tree<T> = Option<Box<Node<T>>>;

pub fn is_red<T>(tree: &Tree<T>) -> bool {
    match tree {
        None => false,
        Some(node) => node.color == Color::Red,
    }
}

pub fn size<T>(tree: &Tree<T>) -> usize {
    match tree {
        None => 0,
        Some(node) => node.size,
    }
}

// Counts links, so an empty tree has no height and a single node has a height of zero.
pub fn height<T>(tree: &Tree<T>) -> Option<usize> {
    tree.as_ref().map(|node| {
        let left = height(&node.left).map_or(0, |height| height + 1);
        let right = height(&node.right).map_or(0, |height| height + 1);
        cmp::max(left, right)
    })
}

// A deletion may only descend into a child through a red parent, so a root whose children are
// both black is temporarily colored red.
pub fn redden_root<T>(tree: &mut Tree<T>) {
    if let Some(node) = tree {
        if !is_red(&node.left) && !is_red(&node.right) {
            node.color = Color::Red;
        }
    }
}

pub fn blacken_root<T>(tree: &mut Tree<T>) {
    if let Some(node) = tree {
        node.color = Color::Black;
    }
}

pub fn insert<T>(tree: &mut Tree<T>, key: T) -> Option<T>
where
    T: Ord,
{
    let ret = match tree {
        Some(node) => match key.cmp(&node.key) {
            Ordering::Less => insert(&mut node.left, key),
            Ordering::Greater => insert(&mut node.right, key),
            Ordering::Equal => Some(mem::replace(&mut node.key, key)),
        },
        None => {
            *tree = Some(Box::new(Node::new(key)));
            return None;
        },
    };

    if let Some(node) = tree {
        node.fix_up();
    }

    ret
}

// Removes the minimum key of the tree. The root of the tree must be red, or have a red left child.
pub fn remove_min<T>(tree: &mut Tree<T>) -> Option<T> {
    let mut node = tree.take()?;

    if node.left.is_none() {
        *tree = node.right.take();
        return Some(node.key);
    }

    if node.needs_red_left() {
        node.move_red_left();
    }

    let ret = remove_min(&mut node.left);
    node.balance();
    *tree = Some(node);
    ret
}

// Removes the maximum key of the tree. The root of the tree must be red, or have a red left child.
pub fn remove_max<T>(tree: &mut Tree<T>) -> Option<T> {
    let mut node = tree.take()?;

    if is_red(&node.left) {
        node.rotate_right();
    }

    if node.right.is_none() {
        *tree = node.left.take();
        return Some(node.key);
    }

    if node.needs_red_right() {
        node.move_red_right();
    }

    let ret = remove_max(&mut node.right);
    node.balance();
    *tree = Some(node);
    ret
}

// precondition: the key exists in the tree
pub fn remove<T, V>(tree: &mut Tree<T>, key: &V) -> Option<T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut node = tree.take()?;

    let ret = if key < node.key.borrow() {
        if node.needs_red_left() {
            node.move_red_left();
        }
        remove(&mut node.left, key)
    } else {
        if is_red(&node.left) {
            node.rotate_right();
        }

        if key == node.key.borrow() && node.right.is_none() {
            debug_assert!(node.left.is_none());
            return Some(node.key);
        }

        if node.needs_red_right() {
            node.move_red_right();
        }

        if key == node.key.borrow() {
            remove_min(&mut node.right).map(|successor| mem::replace(&mut node.key, successor))
        } else {
            remove(&mut node.right, key)
        }
    };

    node.balance();
    *tree = Some(node);
    ret
}

pub fn get<'a, T, V>(tree: &'a Tree<T>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    while let Some(node) = curr {
        match key.cmp(node.key.borrow()) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return Some(&node.key),
        }
    }
    None
}

pub fn ceil<'a, T, V>(tree: &'a Tree<T>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.key.borrow()) {
        Ordering::Greater => ceil(&node.right, key),
        Ordering::Less => match ceil(&node.left, key) {
            None => Some(&node.key),
            res => res,
        },
        Ordering::Equal => Some(&node.key),
    })
}

pub fn floor<'a, T, V>(tree: &'a Tree<T>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.key.borrow()) {
        Ordering::Less => floor(&node.left, key),
        Ordering::Greater => match floor(&node.right, key) {
            None => Some(&node.key),
            res => res,
        },
        Ordering::Equal => Some(&node.key),
    })
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(left_node) = &curr.left {
            curr = left_node;
        }
        &curr.key
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(right_node) = &curr.right {
            curr = right_node;
        }
        &curr.key
    })
}

pub fn select<T>(tree: &Tree<T>, index: usize) -> Option<&T> {
    tree.as_ref().and_then(|node| {
        let left_size = size(&node.left);
        match index.cmp(&left_size) {
            Ordering::Less => select(&node.left, index),
            Ordering::Greater => select(&node.right, index - left_size - 1),
            Ordering::Equal => Some(&node.key),
        }
    })
}

pub fn rank<T, V>(tree: &Tree<T>, key: &V) -> usize
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    match tree {
        None => 0,
        Some(node) => match key.cmp(node.key.borrow()) {
            Ordering::Less => rank(&node.left, key),
            Ordering::Greater => 1 + size(&node.left) + rank(&node.right, key),
            Ordering::Equal => size(&node.left),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(keys: &[u32]) -> Tree<u32> {
        let mut tree = None;
        for key in keys {
            insert(&mut tree, *key);
            blacken_root(&mut tree);
        }
        tree
    }

    fn remove_key(tree: &mut Tree<u32>, key: u32) -> Option<u32> {
        redden_root(tree);
        let ret = remove(tree, &key);
        blacken_root(tree);
        ret
    }

    fn in_order(tree: &Tree<u32>, keys: &mut Vec<u32>) {
        if let Some(node) = tree {
            in_order(&node.left, keys);
            keys.push(node.key);
            in_order(&node.right, keys);
        }
    }

    #[test]
    fn test_insert_ascending_leans_left() {
        let tree = build(&[1, 2, 3]);
        let root = tree.as_ref().unwrap();
        assert_eq!(root.key, 2);
        assert_eq!(root.color, Color::Black);
        assert_eq!(root.size, 3);
        assert_eq!(root.left.as_ref().unwrap().color, Color::Black);
        assert_eq!(root.right.as_ref().unwrap().color, Color::Black);
    }

    #[test]
    fn test_insert_two_keys_makes_red_left_link() {
        let tree = build(&[1, 2]);
        let root = tree.as_ref().unwrap();
        assert_eq!(root.key, 2);
        assert!(is_red(&root.left));
        assert!(root.right.is_none());
    }

    #[test]
    fn test_insert_replace() {
        let mut tree = build(&[1, 2, 3]);
        assert_eq!(insert(&mut tree, 2), Some(2));
        assert_eq!(size(&tree), 3);
    }

    #[test]
    fn test_height() {
        assert_eq!(height::<u32>(&None), None);
        assert_eq!(height(&build(&[1])), Some(0));
        assert_eq!(height(&build(&[1, 2])), Some(1));
        assert_eq!(height(&build(&[1, 2, 3])), Some(1));
        assert_eq!(height(&build(&[1, 2, 3, 4])), Some(2));
    }

    #[test]
    fn test_remove_min_max() {
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);

        redden_root(&mut tree);
        assert_eq!(remove_min(&mut tree), Some(1));
        blacken_root(&mut tree);

        redden_root(&mut tree);
        assert_eq!(remove_max(&mut tree), Some(7));
        blacken_root(&mut tree);

        let mut keys = Vec::new();
        in_order(&tree, &mut keys);
        assert_eq!(keys, vec![2, 3, 4, 5, 6]);
        assert_eq!(size(&tree), 5);
    }

    #[test]
    fn test_remove_min_max_empty() {
        let mut tree: Tree<u32> = None;
        assert_eq!(remove_min(&mut tree), None);
        assert_eq!(remove_max(&mut tree), None);
    }

    #[test]
    fn test_remove_internal_node() {
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(remove_key(&mut tree, 4), Some(4));
        assert_eq!(remove_key(&mut tree, 2), Some(2));

        let mut keys = Vec::new();
        in_order(&tree, &mut keys);
        assert_eq!(keys, vec![1, 3, 5, 6, 7]);
        assert_eq!(size(&tree), 5);
    }

    #[test]
    fn test_remove_last_key() {
        let mut tree = build(&[1]);
        assert_eq!(remove_key(&mut tree, 1), Some(1));
        assert!(tree.is_none());
    }

    #[test]
    fn test_get() {
        let tree = build(&[1, 3, 5]);
        assert_eq!(get(&tree, &3), Some(&3));
        assert_eq!(get(&tree, &4), None);
    }

    #[test]
    fn test_floor_ceil() {
        let tree = build(&[1, 3, 5]);
        assert_eq!(floor(&tree, &0), None);
        assert_eq!(floor(&tree, &4), Some(&3));
        assert_eq!(floor(&tree, &5), Some(&5));
        assert_eq!(ceil(&tree, &4), Some(&5));
        assert_eq!(ceil(&tree, &1), Some(&1));
        assert_eq!(ceil(&tree, &6), None);
    }

    #[test]
    fn test_min_max() {
        let tree = build(&[5, 2, 8, 1, 9, 3]);
        assert_eq!(min(&tree), Some(&1));
        assert_eq!(max(&tree), Some(&9));
        assert_eq!(min::<u32>(&None), None);
        assert_eq!(max::<u32>(&None), None);
    }

    #[test]
    fn test_select_rank() {
        let tree = build(&[10, 20, 30, 40, 50]);
        assert_eq!(select(&tree, 0), Some(&10));
        assert_eq!(select(&tree, 4), Some(&50));
        assert_eq!(select(&tree, 5), None);

        assert_eq!(rank(&tree, &5), 0);
        assert_eq!(rank(&tree, &30), 2);
        assert_eq!(rank(&tree, &35), 3);
        assert_eq!(rank(&tree, &60), 5);
    }
}
