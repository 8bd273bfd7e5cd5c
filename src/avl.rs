//! An AVL tree. Every node caches the height of its subtree and, after each
//! insert or delete, the nodes on the path back to the root are rotated until
//! the heights of their two children differ by at most one.
//!
//! # Examples
//!
//! ```
//! use balanced_trees::avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.search(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.search(&1));
//!
//! // Inserting the same key again changes nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! assert!(tree.delete(&1));
//! assert!(!tree.search(&1));
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::trace;

type Link<K> = Option<Box<Node<K>>>;

/// A self-balancing Binary Search Tree holding unique keys.
#[derive(Clone)]
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root).finish()
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

    /// Height of the tree. An empty tree has a height of 0 and a lone root a
    /// height of 1.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Adds `key` to the tree, rebalancing on the way back up. Returns `false`
    /// and leaves the tree untouched if the key is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in 1..=3 {
    ///     tree.insert(key);
    /// }
    ///
    /// // Three ascending inserts get rotated into a perfectly balanced tree.
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let mut inserted = false;
        self.root = Some(insert(self.root.take(), key, &mut inserted));
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Returns whether `key` is in the tree.
    pub fn search(&self, key: &K) -> bool
    where
        K: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    /// Removes `key` from the tree, rebalancing on the way back up. Returns
    /// `false` if the key was never there.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.delete(&1));
    /// assert!(!tree.delete(&1));
    /// ```
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        let mut deleted = false;
        self.root = delete(self.root.take(), key, &mut deleted);
        if deleted {
            self.len -= 1;
        }
        deleted
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Collects the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [3, 1, 2] {
    ///     tree.insert(key);
    /// }
    ///
    /// assert_eq!(tree.traverse_in_order(), vec![1, 2, 3]);
    /// ```
    pub fn traverse_in_order(&self) -> Vec<K>
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

/// In-order iterator over the keys of a [`Tree`]. Keeps the unvisited left
/// spine on an explicit stack rather than recursing.
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

/// A `Node` has a key that is used for searching/sorting and two children
/// which may be empty.
#[derive(Clone)]
struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<K> fmt::Debug for Node<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("height", &self.height)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// Height of the left subtree minus the height of the right subtree.
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

fn balance_factor<K>(link: &Link<K>) -> isize {
    link.as_ref().map_or(0, |n| n.balance_factor())
}

fn insert<K>(link: Link<K>, key: K, inserted: &mut bool) -> Box<Node<K>>
where
    K: Ord,
{
    let mut node = match link {
        Some(node) => node,
        None => {
            *inserted = true;
            return Node::new_boxed(key);
        }
    };

    // Where the key lands relative to the child we descend into. Recorded now
    // because the key itself moves into the recursive call.
    let grandchild_side = match key.cmp(&node.key) {
        Ordering::Less => {
            let side = node.left.as_ref().map(|l| key.cmp(&l.key));
            node.left = Some(insert(node.left.take(), key, inserted));
            side
        }
        Ordering::Equal => return node,
        Ordering::Greater => {
            let side = node.right.as_ref().map(|r| key.cmp(&r.key));
            node.right = Some(insert(node.right.take(), key, inserted));
            side
        }
    };

    node.fix_height();
    let node = match (node.balance_factor(), grandchild_side) {
        // Left Left
        (bf, Some(Ordering::Less)) if bf > 1 => rotate_right(node),
        // Left Right
        (bf, Some(Ordering::Greater)) if bf > 1 => rotate_left_right(node),
        // Right Right
        (bf, Some(Ordering::Greater)) if bf < -1 => rotate_left(node),
        // Right Left
        (bf, Some(Ordering::Less)) if bf < -1 => rotate_right_left(node),
        _ => node,
    };
    check_balanced(&node);
    node
}

fn delete<K>(link: Link<K>, key: &K, deleted: &mut bool) -> Link<K>
where
    K: Ord,
{
    let mut node = link?;
    match key.cmp(&node.key) {
        Ordering::Less => node.left = delete(node.left.take(), key, deleted),
        Ordering::Greater => node.right = delete(node.right.take(), key, deleted),
        Ordering::Equal => {
            *deleted = true;
            match (node.left.take(), node.right.take()) {
                (None, right) => return right,
                (left, None) => return left,
                // With two children the in-order successor, the smallest node
                // of the right subtree, takes this node's place.
                (left, Some(right)) => {
                    let (successor, new_right) = delete_smallest(right);
                    node.key = successor;
                    node.left = left;
                    node.right = new_right;
                }
            }
        }
    }
    Some(rebalance(node))
}

/// Returns the smallest key of the subtree and the rebalanced subtree without it.
fn delete_smallest<K>(mut node: Box<Node<K>>) -> (K, Link<K>) {
    match node.left.take() {
        None => {
            let Node { key, right, .. } = *node;
            (key, right)
        }
        Some(left) => {
            let (key, new_left) = delete_smallest(left);
            node.left = new_left;
            (key, Some(rebalance(node)))
        }
    }
}

/// Balances a node using the heights of its children. The key that triggered
/// the imbalance is gone, so the child's own balance factor picks between the
/// single and double rotations.
fn rebalance<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node.fix_height();
    let bf = node.balance_factor();
    let node = if bf > 1 {
        if balance_factor(&node.left) >= 0 {
            rotate_right(node)
        } else {
            rotate_left_right(node)
        }
    } else if bf < -1 {
        if balance_factor(&node.right) <= 0 {
            rotate_left(node)
        } else {
            rotate_right_left(node)
        }
    } else {
        node
    };
    check_balanced(&node);
    node
}

/// In debug builds, after balancing, assert that we've restored/maintained the AVL invariant.
fn check_balanced<K>(node: &Node<K>) {
    let left_height = height(&node.left);
    let right_height = height(&node.right);
    debug_assert_eq!(node.height, left_height.max(right_height) + 1);
    debug_assert!(left_height.abs_diff(right_height) <= 1);
}

/// Rotate `old_root` to the right. This moves the left child up vertically and
/// `old_root` down vertically. A node without a left child is returned as is.
///
/// ```text
///      old_root             new_root
///       /     \              /     \
///   new_root   z   ->       x    old_root
///    /  \                          /  \
///   x    y                        y    z
/// ```
fn rotate_right<K>(mut old_root: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut new_root) = old_root.left.take() else {
        return old_root;
    };
    trace!(height = old_root.height, "avl rotate right");
    old_root.left = new_root.right.take();
    // The lower node's height feeds the upper node's, so it goes first.
    old_root.fix_height();
    new_root.right = Some(old_root);
    new_root.fix_height();
    new_root
}

/// Mirror image of [`rotate_right`]: the right child moves up.
fn rotate_left<K>(mut old_root: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut new_root) = old_root.right.take() else {
        return old_root;
    };
    trace!(height = old_root.height, "avl rotate left");
    old_root.right = new_root.left.take();
    old_root.fix_height();
    new_root.left = Some(old_root);
    new_root.fix_height();
    new_root
}

fn rotate_left_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}

fn rotate_right_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}
