//! AVL-balanced sorted list.
//!
//! Values are ordered by a comparator supplied at construction time. Equal
//! values are all retained; a value equal to an existing one is placed after
//! it, so iteration is stable with respect to insertion order among equals.

use std::cmp::Ordering;
use std::fmt;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    height: usize,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Sorted container backed by an AVL tree.
///
/// Insertion is `O(log n)` regardless of input order. Iteration walks the tree
/// in ascending comparator order and can be restarted any number of times.
pub struct AvlSortedList<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    root: Link<T>,
    len: usize,
    compare: F,
}

impl<T, F> AvlSortedList<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Create an empty list ordered by `compare`.
    pub fn new(compare: F) -> Self {
        Self {
            root: None,
            len: 0,
            compare,
        }
    }

    /// Insert a value at its sorted position.
    pub fn add(&mut self, value: T) {
        let root = self.root.take();
        self.root = Some(insert(root, value, &self.compare));
        self.len += 1;
    }

    /// Number of values stored, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the underlying tree (0 when empty).
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Iterate values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            stack: Vec::with_capacity(self.height()),
            remaining: self.len,
        };
        iter.push_left(self.root.as_deref());
        iter
    }
}

impl<T, F> Extend<T> for AvlSortedList<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.add(value);
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for AvlSortedList<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

fn insert<T, F>(link: Link<T>, value: T, compare: &F) -> Box<Node<T>>
where
    F: Fn(&T, &T) -> Ordering,
{
    let Some(mut node) = link else {
        return Node::leaf(value);
    };

    if compare(&value, &node.value) == Ordering::Less {
        node.left = Some(insert(node.left.take(), value, compare));
    } else {
        node.right = Some(insert(node.right.take(), value, compare));
    }

    rebalance(node)
}

fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        // Left-right case collapses into left-left first
        if let Some(left) = node.left.take() {
            node.left = Some(if left.balance_factor() < 0 {
                rotate_left(left)
            } else {
                left
            });
        }
        rotate_right(node)
    } else if balance < -1 {
        if let Some(right) = node.right.take() {
            node.right = Some(if right.balance_factor() > 0 {
                rotate_right(right)
            } else {
                right
            });
        }
        rotate_left(node)
    } else {
        node
    }
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Borrowing in-order iterator over an [`AvlSortedList`].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn push_left(&mut self, mut link: Option<&'a Node<T>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T, F> IntoIterator for &'a AvlSortedList<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Consuming in-order iterator; drains the list in ascending order.
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    fn push_left(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left(node.right.take());
        self.remaining -= 1;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T, F> IntoIterator for AvlSortedList<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut iter = IntoIter {
            stack: Vec::with_capacity(self.height()),
            remaining: self.len,
        };
        iter.push_left(self.root.take());
        iter
    }
}
