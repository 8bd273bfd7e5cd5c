//! A B-tree of minimum degree `t`. Nodes hold between `t - 1` and `2t - 1`
//! sorted keys (the root may hold fewer) and all leaves sit at the same depth.
//!
//! Inserts split full nodes on the way down so there is always room for the
//! key once a leaf is reached; the tree only grows taller when the root itself
//! is split. Removals mirror this by topping up any child with the bare
//! minimum of keys before descending into it.
//!
//! # Examples
//!
//! ```
//! use balanced_trees::btree::Tree;
//!
//! let mut tree = Tree::new(3).unwrap();
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key);
//! }
//!
//! let node = tree.search(&6).unwrap();
//! assert!(node.keys().contains(&6));
//!
//! tree.remove(&6);
//! assert!(tree.search(&6).is_none());
//! ```

use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::degree::Degree;
use crate::error::Result;

/// A balanced multiway search tree holding unique keys.
#[derive(Clone)]
pub struct Tree<K> {
    root: Option<Node<K>>,
    degree: Degree,
    len: usize,
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("degree", &self.degree)
            .field("root", &self.root)
            .finish()
    }
}

/// Renders the tree in pre-order, one node per line, indented by depth.
impl<K> fmt::Display for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => root.fmt_level(f, 0),
            None => writeln!(f, "(empty)"),
        }
    }
}

impl<K> Tree<K> {
    /// Creates an empty tree of minimum degree `t`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDegree`](crate::Error::InvalidDegree) if `t < 2`.
    pub fn new(t: usize) -> Result<Self> {
        Ok(Self::with_degree(Degree::new(t)?))
    }

    /// Creates an empty tree with an already validated degree.
    pub fn with_degree(degree: Degree) -> Self {
        Self {
            root: Some(Node::new(true)),
            degree,
            len: 0,
        }
    }

    /// The minimum degree this tree was configured with.
    pub fn degree(&self) -> Degree {
        self.degree
    }

    /// Number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels. An empty leaf root counts as one level, a tree
    /// whose root was removed entirely has none.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root.as_ref();
        while let Some(node) = current {
            height += 1;
            current = node.children.first();
        }
        height
    }

    /// Adds `key` to the tree. Returns `false` and leaves the tree untouched
    /// if the key is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::btree::Tree;
    ///
    /// let mut tree = Tree::new(2).unwrap();
    /// for key in 1..=3 {
    ///     tree.insert(key);
    /// }
    /// assert_eq!(tree.height(), 1);
    ///
    /// // The root is full (2t - 1 keys) so the next insert splits it.
    /// tree.insert(4);
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        if self.search(&key).is_some() {
            return false;
        }

        let degree = self.degree;
        let root = self.root.get_or_insert_with(|| Node::new(true));
        if root.keys.len() == degree.max_keys() {
            let old_root = mem::replace(root, Node::new(false));
            root.children.push(old_root);
            root.split_child(0, degree);
            debug!(%degree, "b-tree root split");
        }
        root.insert_non_full(key, degree);
        self.len += 1;
        true
    }

    /// Finds the node holding `key`.
    pub fn search(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        let mut node = self.root.as_ref()?;
        loop {
            let idx = node.find_key(key);
            if node.keys.get(idx) == Some(key) {
                return Some(node);
            }
            if node.leaf {
                return None;
            }
            node = &node.children[idx];
        }
    }

    /// Removes `key` from the tree. Returns `false` if the key was never
    /// there.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::btree::Tree;
    ///
    /// let mut tree = Tree::new(2).unwrap();
    /// tree.insert(1);
    ///
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// ```
    pub fn remove(&mut self, key: &K) -> bool
    where
        K: Ord + Clone,
    {
        let Some(mut root) = self.root.take() else {
            return false;
        };
        let removed = root.remove(key, self.degree);

        self.root = if !root.keys.is_empty() {
            Some(root)
        } else if root.leaf {
            // A fresh tree keeps its empty leaf root until a key is removed.
            if removed {
                None
            } else {
                Some(root)
            }
        } else {
            debug!("b-tree root collapsed");
            root.children.pop()
        };
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Collects the keys in ascending order.
    pub fn traverse_in_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len);
        if let Some(root) = &self.root {
            root.collect_keys(&mut keys);
        }
        keys
    }

    /// Writes the structure of the tree to stdout, see the [`Display`](fmt::Display)
    /// implementation for the format.
    pub fn print_structure(&self)
    where
        K: fmt::Debug,
    {
        print!("{}", self);
    }
}

/// A node of a B-tree. Obtained from [`Tree::search`].
#[derive(Clone)]
pub struct Node<K> {
    leaf: bool,
    keys: Vec<K>,
    /// Empty for leaves, `keys.len() + 1` entries otherwise.
    children: Vec<Node<K>>,
}

impl<K> fmt::Debug for Node<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("keys", &self.keys)
            .field("children", &self.children)
            .finish()
    }
}

impl<K> Node<K> {
    fn new(leaf: bool) -> Self {
        Self {
            leaf,
            keys: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The keys stored in this node, in ascending order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    fn fmt_level(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result
    where
        K: fmt::Debug,
    {
        writeln!(f, "{:indent$}Level {} Keys: {:?}", "", level, self.keys, indent = level * 2)?;
        for child in &self.children {
            child.fmt_level(f, level + 1)?;
        }
        Ok(())
    }

    fn collect_keys(&self, keys: &mut Vec<K>)
    where
        K: Clone,
    {
        if self.leaf {
            keys.extend(self.keys.iter().cloned());
            return;
        }
        for (child, key) in self.children.iter().zip(&self.keys) {
            child.collect_keys(keys);
            keys.push(key.clone());
        }
        if let Some(last) = self.children.last() {
            last.collect_keys(keys);
        }
    }

    /// Index of the first key that is not less than `key`.
    fn find_key(&self, key: &K) -> usize
    where
        K: Ord,
    {
        self.keys.partition_point(|k| k < key)
    }

    /// Inserts into a node that is known to have room for one more key.
    fn insert_non_full(&mut self, key: K, degree: Degree)
    where
        K: Ord,
    {
        let mut idx = self.keys.partition_point(|k| k < &key);
        if self.leaf {
            self.keys.insert(idx, key);
            return;
        }

        if self.children[idx].keys.len() == degree.max_keys() {
            self.split_child(idx, degree);
            // The median now at `idx` separates the two halves.
            if key > self.keys[idx] {
                idx += 1;
            }
        }
        self.children[idx].insert_non_full(key, degree);
    }

    /// Splits the full child at `idx`. Its upper `t - 1` keys (and upper `t`
    /// children) move into a new right sibling and its median moves up into
    /// this node.
    fn split_child(&mut self, idx: usize, degree: Degree) {
        let t = degree.get();
        let child = &mut self.children[idx];
        debug_assert_eq!(child.keys.len(), degree.max_keys());

        let mut sibling = Node::new(child.leaf);
        sibling.keys = child.keys.split_off(t);
        if !child.leaf {
            sibling.children = child.children.split_off(t);
        }
        let median = child.keys.remove(t - 1);
        trace!(idx, "b-tree split child");

        self.keys.insert(idx, median);
        self.children.insert(idx + 1, sibling);
    }

    fn remove(&mut self, key: &K, degree: Degree) -> bool
    where
        K: Ord + Clone,
    {
        let idx = self.find_key(key);
        if self.keys.get(idx) == Some(key) {
            if self.leaf {
                self.keys.remove(idx);
                return true;
            }
            return self.remove_from_internal(idx, degree);
        }

        if self.leaf {
            return false;
        }
        let idx = if self.children[idx].keys.len() < degree.get() {
            self.fill(idx, degree)
        } else {
            idx
        };
        self.children[idx].remove(key, degree)
    }

    /// Removes the key at `idx` of an internal node by replacing it with its
    /// predecessor or successor, whichever child can spare a key, or by
    /// merging both children around it.
    fn remove_from_internal(&mut self, idx: usize, degree: Degree) -> bool
    where
        K: Ord + Clone,
    {
        let t = degree.get();
        if self.children[idx].keys.len() >= t {
            let predecessor = self.children[idx].max_key().clone();
            self.keys[idx] = predecessor.clone();
            self.children[idx].remove(&predecessor, degree)
        } else if self.children[idx + 1].keys.len() >= t {
            let successor = self.children[idx + 1].min_key().clone();
            self.keys[idx] = successor.clone();
            self.children[idx + 1].remove(&successor, degree)
        } else {
            let key = self.merge(idx);
            self.children[idx].remove(&key, degree)
        }
    }

    fn max_key(&self) -> &K {
        let mut node = self;
        while !node.leaf {
            node = &node.children[node.children.len() - 1];
        }
        &node.keys[node.keys.len() - 1]
    }

    fn min_key(&self) -> &K {
        let mut node = self;
        while !node.leaf {
            node = &node.children[0];
        }
        &node.keys[0]
    }

    /// Gives the child at `idx`, which holds only `t - 1` keys, at least `t`
    /// keys. Returns the index of the child that now covers the same key
    /// range: merging into the left sibling shifts it one place left.
    fn fill(&mut self, idx: usize, degree: Degree) -> usize
    where
        K: Clone,
    {
        let t = degree.get();
        let has_left = idx > 0;
        let has_right = idx < self.keys.len();

        if has_left && self.children[idx - 1].keys.len() >= t {
            self.borrow_from_prev(idx);
            idx
        } else if has_right && self.children[idx + 1].keys.len() >= t {
            self.borrow_from_next(idx);
            idx
        } else if has_left {
            self.merge(idx - 1);
            idx - 1
        } else {
            self.merge(idx);
            idx
        }
    }

    /// Rotates a key from the left sibling through this node into the child
    /// at `idx`.
    fn borrow_from_prev(&mut self, idx: usize) {
        let (before, after) = self.children.split_at_mut(idx);
        let sibling = &mut before[idx - 1];
        let child = &mut after[0];

        let Some(sibling_key) = sibling.keys.pop() else {
            return;
        };
        let separator = mem::replace(&mut self.keys[idx - 1], sibling_key);
        child.keys.insert(0, separator);
        if !child.leaf {
            if let Some(grandchild) = sibling.children.pop() {
                child.children.insert(0, grandchild);
            }
        }
        trace!(idx, "b-tree borrow from left sibling");
    }

    /// Rotates a key from the right sibling through this node into the child
    /// at `idx`.
    fn borrow_from_next(&mut self, idx: usize) {
        let (before, after) = self.children.split_at_mut(idx + 1);
        let child = &mut before[idx];
        let sibling = &mut after[0];

        let sibling_key = sibling.keys.remove(0);
        let separator = mem::replace(&mut self.keys[idx], sibling_key);
        child.keys.push(separator);
        if !child.leaf {
            child.children.push(sibling.children.remove(0));
        }
        trace!(idx, "b-tree borrow from right sibling");
    }

    /// Folds the child at `idx + 1` and the key separating it from the child
    /// at `idx` into the child at `idx`. Returns a copy of that separator.
    fn merge(&mut self, idx: usize) -> K
    where
        K: Clone,
    {
        let sibling = self.children.remove(idx + 1);
        let separator = self.keys.remove(idx);
        let child = &mut self.children[idx];

        child.keys.push(separator.clone());
        child.keys.extend(sibling.keys);
        child.children.extend(sibling.children);
        trace!(idx, keys = child.keys.len(), "b-tree merge children");
        separator
    }
}
