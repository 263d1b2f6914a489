use crate::red_black_tree::tree;
use std::mem;

/// An enum representing the color of the link from a node's parent to the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn flip(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// A struct representing an internal node of a left-leaning red black tree.
pub struct Node<T> {
    pub key: T,
    pub color: Color,
    pub size: usize,
    pub left: tree::Tree<T>,
    pub right: tree::Tree<T>,
}

impl<T> Node<T> {
    pub fn new(key: T) -> Self {
        Node {
            key,
            color: Color::Red,
            size: 1,
            left: None,
            right: None,
        }
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    pub fn update(&mut self) {
        self.size = tree::size(&self.left) + tree::size(&self.right) + 1;
    }

    pub fn flip_colors(&mut self) {
        self.color = self.color.flip();
        if let Some(ref mut child) = self.left {
            child.color = child.color.flip();
        }
        if let Some(ref mut child) = self.right {
            child.color = child.color.flip();
        }
    }

    // precondition: the right child is red
    pub fn rotate_left(&mut self) {
        debug_assert!(tree::is_red(&self.right));
        if let Some(mut child) = self.right.take() {
            self.right = child.left.take();
            mem::swap(&mut *child, self);
            self.color = child.color;
            self.size = child.size;
            child.color = Color::Red;
            child.update();
            self.left = Some(child);
        }
    }

    // precondition: the left child is red
    pub fn rotate_right(&mut self) {
        debug_assert!(tree::is_red(&self.left));
        if let Some(mut child) = self.left.take() {
            self.left = child.right.take();
            mem::swap(&mut *child, self);
            self.color = child.color;
            self.size = child.size;
            child.color = Color::Red;
            child.update();
            self.right = Some(child);
        }
    }

    fn is_left_left_red(&self) -> bool {
        match self.left {
            Some(ref child) => child.is_red() && tree::is_red(&child.left),
            None => false,
        }
    }

    /// Restores the left-leaning invariants of a node on the way back up from an insertion.
    pub fn fix_up(&mut self) {
        if tree::is_red(&self.right) && !tree::is_red(&self.left) {
            self.rotate_left();
        }
        if self.is_left_left_red() {
            self.rotate_right();
        }
        if tree::is_red(&self.left) && tree::is_red(&self.right) {
            self.flip_colors();
        }
        self.update();
    }

    /// Restores the left-leaning invariants of a node on the way back up from a deletion.
    pub fn balance(&mut self) {
        if tree::is_red(&self.right) {
            self.rotate_left();
        }
        if self.is_left_left_red() {
            self.rotate_right();
        }
        if tree::is_red(&self.left) && tree::is_red(&self.right) {
            self.flip_colors();
        }
        self.update();
    }

    /// Returns `true` if the left child is a 2-node that has to borrow a red link before a
    /// deletion can descend into it.
    pub fn needs_red_left(&self) -> bool {
        match self.left {
            Some(ref child) => !child.is_red() && !tree::is_red(&child.left),
            None => true,
        }
    }

    /// Returns `true` if the right child is a 2-node that has to borrow a red link before a
    /// deletion can descend into it.
    pub fn needs_red_right(&self) -> bool {
        match self.right {
            Some(ref child) => !child.is_red() && !tree::is_red(&child.left),
            None => true,
        }
    }

    // precondition: the node is red, and both its left child and left grandchild are black
    pub fn move_red_left(&mut self) {
        self.flip_colors();
        if let Some(mut child) = self.right.take() {
            if tree::is_red(&child.left) {
                child.rotate_right();
                self.right = Some(child);
                self.rotate_left();
                self.flip_colors();
            } else {
                self.right = Some(child);
            }
        }
    }

    // precondition: the node is red, and both its right child and the right child's left child
    // are black
    pub fn move_red_right(&mut self) {
        self.flip_colors();
        if self.is_left_red_grandchild() {
            self.rotate_right();
            self.flip_colors();
        }
    }

    fn is_left_red_grandchild(&self) -> bool {
        match self.left {
            Some(ref child) => tree::is_red(&child.left),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Node};

    fn black(key: u32, left: Option<Node<u32>>, right: Option<Node<u32>>) -> Node<u32> {
        colored(key, Color::Black, left, right)
    }

    fn red(key: u32, left: Option<Node<u32>>, right: Option<Node<u32>>) -> Node<u32> {
        colored(key, Color::Red, left, right)
    }

    fn colored(
        key: u32,
        color: Color,
        left: Option<Node<u32>>,
        right: Option<Node<u32>>,
    ) -> Node<u32> {
        let mut node = Node::new(key);
        node.color = color;
        node.left = left.map(Box::new);
        node.right = right.map(Box::new);
        node.update();
        node
    }

    #[test]
    fn test_new_node_is_red_leaf() {
        let node = Node::new(1);
        assert_eq!(node.color, Color::Red);
        assert_eq!(node.size, 1);
        assert!(node.left.is_none());
        assert!(node.right.is_none());
    }

    #[test]
    fn test_color_flip() {
        assert_eq!(Color::Red.flip(), Color::Black);
        assert_eq!(Color::Black.flip(), Color::Red);
    }

    #[test]
    fn test_rotate_left() {
        let mut node = black(
            2,
            Some(black(1, None, None)),
            Some(red(4, Some(black(3, None, None)), Some(black(5, None, None)))),
        );
        node.rotate_left();

        assert_eq!(node.key, 4);
        assert_eq!(node.color, Color::Black);
        assert_eq!(node.size, 5);

        let left = node.left.as_ref().unwrap();
        assert_eq!(left.key, 2);
        assert_eq!(left.color, Color::Red);
        assert_eq!(left.size, 3);
        assert_eq!(left.right.as_ref().unwrap().key, 3);
        assert_eq!(node.right.as_ref().unwrap().key, 5);
    }

    #[test]
    fn test_rotate_right() {
        let mut node = black(
            4,
            Some(red(2, Some(black(1, None, None)), Some(black(3, None, None)))),
            Some(black(5, None, None)),
        );
        node.rotate_right();

        assert_eq!(node.key, 2);
        assert_eq!(node.color, Color::Black);
        assert_eq!(node.size, 5);

        let right = node.right.as_ref().unwrap();
        assert_eq!(right.key, 4);
        assert_eq!(right.color, Color::Red);
        assert_eq!(right.size, 3);
        assert_eq!(right.left.as_ref().unwrap().key, 3);
        assert_eq!(node.left.as_ref().unwrap().key, 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_rotate_left_toward_black_child() {
        let mut node = black(1, None, Some(black(2, None, None)));
        node.rotate_left();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_rotate_right_without_child() {
        let mut node = black(1, None, None);
        node.rotate_right();
    }

    #[test]
    fn test_flip_colors() {
        let mut node = black(2, Some(red(1, None, None)), Some(red(3, None, None)));
        node.flip_colors();
        assert_eq!(node.color, Color::Red);
        assert_eq!(node.left.as_ref().unwrap().color, Color::Black);
        assert_eq!(node.right.as_ref().unwrap().color, Color::Black);
    }

    #[test]
    fn test_fix_up_right_leaning() {
        let mut node = black(1, None, Some(red(2, None, None)));
        node.fix_up();
        assert_eq!(node.key, 2);
        assert_eq!(node.color, Color::Black);
        assert_eq!(node.left.as_ref().unwrap().color, Color::Red);
        assert!(node.right.is_none());
    }

    #[test]
    fn test_fix_up_left_left_red() {
        let mut node = black(3, Some(red(2, Some(red(1, None, None)), None)), None);
        node.fix_up();
        assert_eq!(node.key, 2);
        assert_eq!(node.color, Color::Red);
        assert_eq!(node.size, 3);
        assert_eq!(node.left.as_ref().unwrap().color, Color::Black);
        assert_eq!(node.right.as_ref().unwrap().color, Color::Black);
    }

    #[test]
    fn test_move_red_left_borrows_from_sibling() {
        // the right sibling is a 3-node, so a key moves over to the left
        let mut node = red(
            2,
            Some(black(1, None, None)),
            Some(black(4, Some(red(3, None, None)), None)),
        );
        node.move_red_left();

        assert_eq!(node.key, 3);
        assert_eq!(node.color, Color::Red);
        let left = node.left.as_ref().unwrap();
        assert_eq!(left.key, 2);
        assert_eq!(left.color, Color::Black);
        assert_eq!(left.left.as_ref().unwrap().color, Color::Red);
        assert_eq!(node.right.as_ref().unwrap().key, 4);
        assert_eq!(node.size, 4);
    }

    #[test]
    fn test_move_red_right_flips_only() {
        let mut node = red(2, Some(black(1, None, None)), Some(black(3, None, None)));
        node.move_red_right();
        assert_eq!(node.key, 2);
        assert_eq!(node.color, Color::Black);
        assert_eq!(node.left.as_ref().unwrap().color, Color::Red);
        assert_eq!(node.right.as_ref().unwrap().color, Color::Red);
    }
}
