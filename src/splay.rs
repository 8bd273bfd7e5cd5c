//! A splay tree. Nodes keep no balance metadata at all; instead every access
//! rotates the node it touched up to the root. Keys that are used often stay
//! near the top and the cost of any sequence of operations is logarithmic
//! amortized over the sequence.
//!
//! Because lookups restructure the tree, [`Tree::search`] takes `&mut self`.
//!
//! # Examples
//!
//! ```
//! use balanced_trees::splay::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [15, 10, 20] {
//!     tree.insert(key);
//! }
//!
//! // The last inserted key sits at the root.
//! assert_eq!(tree.root(), Some(&20));
//!
//! // Searching moves the found key up.
//! assert!(tree.search(&10));
//! assert_eq!(tree.root(), Some(&10));
//!
//! tree.delete(&15);
//! assert_eq!(tree.inorder(), vec![10, 20]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::trace;

type Link<K> = Option<Box<Node<K>>>;

/// A self-adjusting Binary Search Tree holding unique keys.
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    // Splay trees can legitimately degrade into a list (e.g. after ascending
    // inserts) so nodes are unlinked with an explicit stack instead of letting
    // `Box` recurse once per level.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K> Clone for Tree<K>
where
    K: Clone,
{
    // Post-order with an explicit stack, like `Drop`: both children are
    // copied before the parent that adopts them.
    fn clone(&self) -> Self {
        enum Visit<'a, K> {
            Enter(&'a Node<K>),
            Exit(&'a Node<K>),
        }

        let mut todo: Vec<Visit<'_, K>> =
            self.root.as_deref().map(Visit::Enter).into_iter().collect();
        let mut copied: Vec<Box<Node<K>>> = Vec::new();
        while let Some(visit) = todo.pop() {
            match visit {
                Visit::Enter(node) => {
                    todo.push(Visit::Exit(node));
                    todo.extend(node.right.as_deref().map(Visit::Enter));
                    todo.extend(node.left.as_deref().map(Visit::Enter));
                }
                Visit::Exit(node) => {
                    let mut copy = Node::new_boxed(node.key.clone());
                    if node.right.is_some() {
                        copy.right = copied.pop();
                    }
                    if node.left.is_some() {
                        copy.left = copied.pop();
                    }
                    copied.push(copy);
                }
            }
        }

        Self {
            root: copied.pop(),
            len: self.len,
        }
    }
}

/// Lists the keys in order rather than the node structure.
impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The key currently at the root, i.e. the most recently accessed one.
    pub fn root(&self) -> Option<&K> {
        self.root.as_ref().map(|n| &n.key)
    }

    /// Returns whether `key` is in the tree. Either way the last node on the
    /// search path, the match or its in-order neighbour, ends up at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::splay::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [1, 2, 3] {
    ///     tree.insert(key);
    /// }
    ///
    /// assert!(!tree.search(&0));
    /// // The closest key was splayed instead.
    /// assert_eq!(tree.root(), Some(&1));
    /// ```
    pub fn search(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        self.root = splay(self.root.take(), key);
        self.root.as_ref().is_some_and(|n| n.key == *key)
    }

    /// Adds `key` to the tree as its new root. Returns `false` and leaves the
    /// key set untouched if the key is already present (it is still splayed).
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let Some(mut old_root) = splay(self.root.take(), &key) else {
            self.root = Some(Node::new_boxed(key));
            self.len += 1;
            return true;
        };

        let new_root = match key.cmp(&old_root.key) {
            Ordering::Equal => {
                self.root = Some(old_root);
                return false;
            }
            // The splayed node is the closest key, so everything left of it is
            // also smaller than `key` and everything right of it larger.
            Ordering::Less => {
                let mut new_root = Node::new_boxed(key);
                new_root.left = old_root.left.take();
                new_root.right = Some(old_root);
                new_root
            }
            Ordering::Greater => {
                let mut new_root = Node::new_boxed(key);
                new_root.right = old_root.right.take();
                new_root.left = Some(old_root);
                new_root
            }
        };
        trace!(len = self.len + 1, "splay insert new root");
        self.root = Some(new_root);
        self.len += 1;
        true
    }

    /// Removes `key` from the tree. Returns `false` if the key was never
    /// there, in which case only the splay side effect remains.
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        let Some(mut root) = splay(self.root.take(), key) else {
            return false;
        };
        if root.key != *key {
            self.root = Some(root);
            return false;
        }

        self.root = match (root.left.take(), root.right.take()) {
            (None, right) => right,
            (left, None) => left,
            (left, Some(right)) => {
                // Every key on the left is smaller than `key`, so splaying for
                // it brings the left subtree's maximum up. That node has no
                // right child and can adopt the old right subtree.
                let mut joined = splay(left, key);
                if let Some(max) = joined.as_mut() {
                    max.right = Some(right);
                }
                joined
            }
        };
        self.len -= 1;
        true
    }

    /// Iterates over the keys in ascending order without splaying.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Collects the keys in ascending order without splaying.
    pub fn inorder(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the keys of a [`Tree`].
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Iter<'a, K> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.key)
    }
}

struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
        })
    }
}

/// The rotation a [`Frame`] owes once the subtree below it has been splayed.
#[derive(Clone, Copy)]
enum Step {
    /// Key is in the left child's left subtree.
    ZigZigLeft,
    /// Key is in the left child's right subtree.
    ZigZagLeft,
    /// Key is in the right child's right subtree.
    ZigZigRight,
    /// Key is in the right child's left subtree.
    ZigZagRight,
}

/// A node and the child we descended through, both detached from the tree
/// while the grandchild subtree is splayed.
struct Frame<K> {
    node: Box<Node<K>>,
    child: Box<Node<K>>,
    step: Step,
}

/// Brings the node holding `key`, or the last node visited looking for it, to
/// the top of the subtree and returns the new subtree root.
///
/// Walks down two levels at a time, keeping the path on a heap-allocated
/// stack, then applies the zig-zig / zig-zag rotations bottom-up.
fn splay<K>(link: Link<K>, key: &K) -> Link<K>
where
    K: Ord,
{
    let mut path: Vec<Frame<K>> = Vec::new();
    let mut link = link;

    let mut splayed = loop {
        let Some(mut node) = link else {
            break None;
        };
        match key.cmp(&node.key) {
            Ordering::Equal => break Some(node),
            Ordering::Less => {
                let Some(mut left) = node.left.take() else {
                    break Some(node);
                };
                let step = match key.cmp(&left.key) {
                    Ordering::Less => {
                        link = left.left.take();
                        Step::ZigZigLeft
                    }
                    Ordering::Greater => {
                        link = left.right.take();
                        Step::ZigZagLeft
                    }
                    // Zig
                    Ordering::Equal => {
                        node.left = Some(left);
                        break Some(rotate_right(node));
                    }
                };
                path.push(Frame {
                    node,
                    child: left,
                    step,
                });
            }
            Ordering::Greater => {
                let Some(mut right) = node.right.take() else {
                    break Some(node);
                };
                let step = match key.cmp(&right.key) {
                    Ordering::Greater => {
                        link = right.right.take();
                        Step::ZigZigRight
                    }
                    Ordering::Less => {
                        link = right.left.take();
                        Step::ZigZagRight
                    }
                    // Zig
                    Ordering::Equal => {
                        node.right = Some(right);
                        break Some(rotate_left(node));
                    }
                };
                path.push(Frame {
                    node,
                    child: right,
                    step,
                });
            }
        }
    };

    while let Some(Frame {
        mut node,
        mut child,
        step,
    }) = path.pop()
    {
        let lifted = match step {
            Step::ZigZigLeft => {
                child.left = splayed;
                node.left = Some(child);
                node = rotate_right(node);
                if node.left.is_some() {
                    rotate_right(node)
                } else {
                    node
                }
            }
            Step::ZigZagLeft => {
                child.right = splayed;
                if child.right.is_some() {
                    child = rotate_left(child);
                }
                node.left = Some(child);
                rotate_right(node)
            }
            Step::ZigZigRight => {
                child.right = splayed;
                node.right = Some(child);
                node = rotate_left(node);
                if node.right.is_some() {
                    rotate_left(node)
                } else {
                    node
                }
            }
            Step::ZigZagRight => {
                child.left = splayed;
                if child.left.is_some() {
                    child = rotate_right(child);
                }
                node.right = Some(child);
                rotate_left(node)
            }
        };
        splayed = Some(lifted);
    }

    splayed
}

/// Lifts the left child above `old_root`. A node without a left child is
/// returned as is.
fn rotate_right<K>(mut old_root: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut new_root) = old_root.left.take() else {
        return old_root;
    };
    old_root.left = new_root.right.take();
    new_root.right = Some(old_root);
    new_root
}

/// Lifts the right child above `old_root`. A node without a right child is
/// returned as is.
fn rotate_left<K>(mut old_root: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut new_root) = old_root.right.take() else {
        return old_root;
    };
    old_root.right = new_root.left.take();
    new_root.left = Some(old_root);
    new_root
}
