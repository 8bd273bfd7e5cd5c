//! A B+ tree of minimum degree `t`. Like the [B-tree](crate::btree) every
//! non-root node holds between `t - 1` and `2t - 1` keys, but here the leaves
//! hold the whole key set. Keys in internal nodes are routing copies: the
//! separator at index `i` is greater than every key below `children[i]` and no
//! greater than any key below `children[i + 1]`.
//!
//! Leaves are chained left to right through a `next` link, so ordered scans
//! and range queries walk the chain instead of re-descending the tree.
//!
//! Nodes live in an arena owned by the tree and refer to each other by
//! [`NodeId`], which keeps the non-owning leaf chain free of reference cycles.
//!
//! # Examples
//!
//! ```
//! use balanced_trees::bptree::Tree;
//!
//! let mut tree = Tree::new(2).unwrap();
//! for key in [10, 20, 5, 6, 15, 30, 25, 16, 2, 12, 28, 35] {
//!     tree.insert(key);
//! }
//!
//! assert_eq!(tree.range_query(&10, &30), vec![10, 12, 15, 16, 20, 25, 28, 30]);
//!
//! tree.delete(&16);
//! assert!(tree.search(&16).is_none());
//! ```

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use crate::degree::Degree;
use crate::error::Result;

/// Handle of a node inside a tree's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A B+ tree holding unique keys, with its leaves linked for range scans.
#[derive(Clone)]
pub struct Tree<K> {
    nodes: Arena<K>,
    root: NodeId,
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
            .field("len", &self.len)
            .field("root", &self.root)
            .field("nodes", &self.nodes.slots)
            .finish()
    }
}

/// Renders the tree level by level, one line per level, each node's keys
/// in brackets.
impl<K> fmt::Display for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut level = vec![self.root];
        while !level.is_empty() {
            let mut next_level = Vec::new();
            for (i, id) in level.iter().enumerate() {
                let node = &self.nodes[*id];
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:?}", node.keys)?;
                next_level.extend_from_slice(&node.children);
            }
            writeln!(f)?;
            level = next_level;
        }
        Ok(())
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

    /// Creates an empty tree, a single empty leaf, with an already validated
    /// degree.
    pub fn with_degree(degree: Degree) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(Node::new(true));
        Self {
            nodes,
            root,
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

    /// Number of levels, counting the leaves. Never zero.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = &self.nodes[self.root];
        while !node.leaf {
            height += 1;
            node = &self.nodes[node.children[0]];
        }
        height
    }

    /// Adds `key` to the tree. Returns `false` and leaves the tree untouched
    /// if the key is already present.
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord + Clone,
    {
        if self.search(&key).is_some() {
            return false;
        }

        if self.nodes[self.root].keys.len() == self.degree.max_keys() {
            let mut new_root = Node::new(false);
            new_root.children.push(self.root);
            self.root = self.nodes.alloc(new_root);
            self.split_child(self.root, 0);
            debug!(degree = %self.degree, "b+ tree root split");
        }
        self.insert_non_full(self.root, key);
        self.len += 1;
        true
    }

    /// Returns the leaf holding `key`. Internal nodes are only used for
    /// routing, so a match there does not count.
    pub fn search(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        let leaf = &self.nodes[self.find_leaf(key)];
        leaf.keys.binary_search(key).ok().map(|_| leaf)
    }

    /// Removes `key` from the tree. Returns `false` if the key was never
    /// there.
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord + Clone,
    {
        let deleted = self.delete_from(self.root, key);

        let root = &self.nodes[self.root];
        if root.keys.is_empty() && !root.leaf {
            let child = root.children[0];
            self.nodes.free(self.root);
            self.root = child;
            debug!("b+ tree root collapsed");
        }
        if deleted {
            self.len -= 1;
        }
        deleted
    }

    /// Returns the keys in `[start, end]`, ascending. Descends once to the
    /// leaf where `start` would live and follows the leaf chain from there.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::bptree::Tree;
    ///
    /// let mut tree = Tree::new(2).unwrap();
    /// for key in 0..100 {
    ///     tree.insert(key);
    /// }
    ///
    /// assert_eq!(tree.range_query(&40, &45), vec![40, 41, 42, 43, 44, 45]);
    /// assert!(tree.range_query(&45, &40).is_empty());
    /// ```
    pub fn range_query(&self, start: &K, end: &K) -> Vec<K>
    where
        K: Ord + Clone,
    {
        let mut result = Vec::new();
        if start > end {
            return result;
        }

        let mut current = Some(self.find_leaf(start));
        while let Some(id) = current {
            let leaf = &self.nodes[id];
            for key in &leaf.keys {
                if key > end {
                    return result;
                }
                if key >= start {
                    result.push(key.clone());
                }
            }
            current = leaf.next;
        }
        result
    }

    /// Iterates over the keys in ascending order by walking the leaf chain.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut first = self.root;
        while !self.nodes[first].leaf {
            first = self.nodes[first].children[0];
        }
        Iter {
            nodes: &self.nodes,
            leaf: Some(first),
            pos: 0,
        }
    }

    /// Collects the keys in ascending order.
    pub fn traverse_in_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Writes the structure of the tree to stdout, see the [`Display`](fmt::Display)
    /// implementation for the format.
    pub fn print_structure(&self)
    where
        K: fmt::Debug,
    {
        print!("{}", self);
    }

    /// The leaf whose key range covers `key`.
    fn find_leaf(&self, key: &K) -> NodeId
    where
        K: Ord,
    {
        let mut id = self.root;
        loop {
            let node = &self.nodes[id];
            if node.leaf {
                return id;
            }
            id = node.children[node.route(key)];
        }
    }

    fn insert_non_full(&mut self, mut id: NodeId, key: K)
    where
        K: Ord + Clone,
    {
        loop {
            let node = &self.nodes[id];
            if node.leaf {
                let pos = node.keys.partition_point(|k| k < &key);
                self.nodes[id].keys.insert(pos, key);
                return;
            }

            let mut idx = node.route(&key);
            let child = node.children[idx];
            if self.nodes[child].keys.len() == self.degree.max_keys() {
                self.split_child(id, idx);
                // Keys equal to the new separator belong on its right.
                if key >= self.nodes[id].keys[idx] {
                    idx += 1;
                }
            }
            id = self.nodes[id].children[idx];
        }
    }

    /// Splits the full child at `idx` of `parent`.
    ///
    /// A leaf keeps its lower `t - 1` keys, hands the upper `t` to a new leaf
    /// spliced into the chain right after it, and a copy of the new leaf's
    /// first key becomes the separator. An internal node splits as in a
    /// B-tree: its median moves up.
    fn split_child(&mut self, parent: NodeId, idx: usize)
    where
        K: Clone,
    {
        let t = self.degree.get();
        let child_id = self.nodes[parent].children[idx];
        let child = &mut self.nodes[child_id];
        debug_assert_eq!(child.keys.len(), self.degree.max_keys());

        let mut sibling = Node::new(child.leaf);
        let separator = if child.leaf {
            sibling.keys = child.keys.split_off(t - 1);
            sibling.next = child.next;
            sibling.keys[0].clone()
        } else {
            sibling.keys = child.keys.split_off(t);
            sibling.children = child.children.split_off(t);
            child.keys.remove(t - 1)
        };
        let leaf = child.leaf;

        let sibling_id = self.nodes.alloc(sibling);
        if leaf {
            self.nodes[child_id].next = Some(sibling_id);
        }
        trace!(idx, leaf, "b+ tree split child");

        let parent = &mut self.nodes[parent];
        parent.keys.insert(idx, separator);
        parent.children.insert(idx + 1, sibling_id);
    }

    fn delete_from(&mut self, id: NodeId, key: &K) -> bool
    where
        K: Ord + Clone,
    {
        if self.nodes[id].leaf {
            let leaf = &mut self.nodes[id];
            return match leaf.keys.binary_search(key) {
                Ok(pos) => {
                    leaf.keys.remove(pos);
                    true
                }
                Err(_) => false,
            };
        }

        let mut idx = self.nodes[id].route(key);
        let child = self.nodes[id].children[idx];
        if self.nodes[child].keys.len() < self.degree.get() {
            idx = self.fix_child(id, idx);
        }
        let child = self.nodes[id].children[idx];
        let deleted = self.delete_from(child, key);

        // The key may also have been routing copy here. Its replacement is
        // the successor: the first key of the leaf that held it.
        if deleted {
            if let Ok(pos) = self.nodes[id].keys.binary_search(key) {
                let successor = self.first_key(self.nodes[id].children[pos + 1]).clone();
                self.nodes[id].keys[pos] = successor;
            }
        }
        deleted
    }

    fn first_key(&self, mut id: NodeId) -> &K {
        while !self.nodes[id].leaf {
            id = self.nodes[id].children[0];
        }
        &self.nodes[id].keys[0]
    }

    /// Gives the child at `idx` of `parent` at least `t` keys by borrowing
    /// from a sibling that can spare one, or else by merging it with a
    /// sibling, the left one first. Returns the index of the child that now
    /// covers the same key range.
    fn fix_child(&mut self, parent: NodeId, idx: usize) -> usize
    where
        K: Clone,
    {
        let t = self.degree.get();
        let siblings = &self.nodes[parent].children;
        let left = idx.checked_sub(1).map(|i| siblings[i]);
        let right = siblings.get(idx + 1).copied();

        if let Some(left) = left.filter(|id| self.nodes[*id].keys.len() >= t) {
            self.borrow_from_left(parent, idx, left);
            idx
        } else if let Some(right) = right.filter(|id| self.nodes[*id].keys.len() >= t) {
            self.borrow_from_right(parent, idx, right);
            idx
        } else if left.is_some() {
            self.merge(parent, idx - 1);
            idx - 1
        } else {
            self.merge(parent, idx);
            idx
        }
    }

    fn borrow_from_left(&mut self, parent: NodeId, idx: usize, left: NodeId)
    where
        K: Clone,
    {
        let child = self.nodes[parent].children[idx];
        let Some(borrowed) = self.nodes[left].keys.pop() else {
            return;
        };

        if self.nodes[child].leaf {
            // The borrowed key is the child's new minimum, hence its separator.
            self.nodes[parent].keys[idx - 1] = borrowed.clone();
            self.nodes[child].keys.insert(0, borrowed);
        } else {
            let separator = mem::replace(&mut self.nodes[parent].keys[idx - 1], borrowed);
            self.nodes[child].keys.insert(0, separator);
            if let Some(grandchild) = self.nodes[left].children.pop() {
                self.nodes[child].children.insert(0, grandchild);
            }
        }
        trace!(idx, "b+ tree borrow from left sibling");
    }

    fn borrow_from_right(&mut self, parent: NodeId, idx: usize, right: NodeId)
    where
        K: Clone,
    {
        let child = self.nodes[parent].children[idx];
        let borrowed = self.nodes[right].keys.remove(0);

        if self.nodes[child].leaf {
            self.nodes[child].keys.push(borrowed);
            self.nodes[parent].keys[idx] = self.nodes[right].keys[0].clone();
        } else {
            let separator = mem::replace(&mut self.nodes[parent].keys[idx], borrowed);
            self.nodes[child].keys.push(separator);
            let grandchild = self.nodes[right].children.remove(0);
            self.nodes[child].children.push(grandchild);
        }
        trace!(idx, "b+ tree borrow from right sibling");
    }

    /// Folds the child at `idx + 1` of `parent` into the child at `idx`. Leaves
    /// drop the separator, since it only copies a key that is already stored,
    /// and the merged leaf takes over the absorbed leaf's place in the chain.
    fn merge(&mut self, parent: NodeId, idx: usize) {
        let parent = &mut self.nodes[parent];
        let right_id = parent.children.remove(idx + 1);
        let separator = parent.keys.remove(idx);
        let left_id = parent.children[idx];

        let right = self.nodes.free(right_id);
        let left = &mut self.nodes[left_id];
        if left.leaf {
            left.next = right.next;
        } else {
            left.keys.push(separator);
        }
        left.keys.extend(right.keys);
        left.children.extend(right.children);
        trace!(idx, keys = left.keys.len(), "b+ tree merge children");
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the keys of a [`Tree`], following the leaf chain.
pub struct Iter<'a, K> {
    nodes: &'a Arena<K>,
    leaf: Option<NodeId>,
    pos: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        loop {
            let leaf = &nodes[self.leaf?];
            if let Some(key) = leaf.keys.get(self.pos) {
                self.pos += 1;
                return Some(key);
            }
            self.leaf = leaf.next;
            self.pos = 0;
        }
    }
}

/// A node of a B+ tree. Obtained from [`Tree::search`].
#[derive(Clone)]
pub struct Node<K> {
    leaf: bool,
    keys: Vec<K>,
    /// Empty for leaves, `keys.len() + 1` entries otherwise.
    children: Vec<NodeId>,
    /// The next leaf in key order. Always `None` for internal nodes.
    next: Option<NodeId>,
}

impl<K> fmt::Debug for Node<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("leaf", &self.leaf)
            .field("keys", &self.keys)
            .field("children", &self.children)
            .field("next", &self.next)
            .finish()
    }
}

impl<K> Node<K> {
    fn new(leaf: bool) -> Self {
        Self {
            leaf,
            keys: Vec::new(),
            children: Vec::new(),
            next: None,
        }
    }

    /// The keys stored in this node, in ascending order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// The leaf following this one in key order.
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Index of the child to descend into for `key`: past every separator
    /// that is less than or equal to it.
    fn route(&self, key: &K) -> usize
    where
        K: Ord,
    {
        self.keys.partition_point(|k| k <= key)
    }
}

/// Slot storage for nodes. Freed slots are recycled by later allocations.
#[derive(Clone)]
struct Arena<K> {
    slots: Vec<Node<K>>,
    free: Vec<NodeId>,
}

impl<K> Arena<K> {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    fn alloc(&mut self, node: Node<K>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = node;
                id
            }
            None => {
                self.slots.push(node);
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Takes the node out of its slot and makes the slot available again.
    fn free(&mut self, id: NodeId) -> Node<K> {
        self.free.push(id);
        mem::replace(&mut self.slots[id.0], Node::new(true))
    }
}

impl<K> Index<NodeId> for Arena<K> {
    type Output = Node<K>;

    fn index(&self, id: NodeId) -> &Node<K> {
        &self.slots[id.0]
    }
}

impl<K> IndexMut<NodeId> for Arena<K> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.slots[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    /// Checks key order, occupancy, equal leaf depth and that every separator
    /// bounds its two neighbouring subtrees. Returns the leaves below `id`
    /// from left to right together with their depth.
    fn assert_node<K: Ord + fmt::Debug>(
        tree: &Tree<K>,
        id: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        leaves: &mut Vec<NodeId>,
    ) -> usize {
        let node = &tree.nodes[id];
        let degree = tree.degree;
        assert!(node.keys.windows(2).all(|w| w[0] < w[1]), "{:?}", node);
        assert!(node.keys.len() <= degree.max_keys());
        if id != tree.root {
            assert!(node.keys.len() >= degree.min_keys(), "{:?}", node);
        }
        if let (Some(lower), Some(first)) = (lower, node.keys.first()) {
            assert!(first >= lower);
        }
        if let (Some(upper), Some(last)) = (upper, node.keys.last()) {
            assert!(last < upper);
        }

        if node.leaf {
            assert!(node.children.is_empty());
            leaves.push(id);
            return 1;
        }
        assert!(node.next.is_none());
        assert_eq!(node.children.len(), node.keys.len() + 1);
        let mut depth = None;
        for (i, child) in node.children.iter().enumerate() {
            let child_lower = if i == 0 { lower } else { Some(&node.keys[i - 1]) };
            let child_upper = node.keys.get(i).or(upper);
            let d = assert_node(tree, *child, child_lower, child_upper, leaves);
            assert_eq!(*depth.get_or_insert(d), d);
        }
        depth.unwrap_or(0) + 1
    }

    fn assert_valid<K: Ord + Clone + fmt::Debug>(tree: &Tree<K>) {
        let mut leaves = Vec::new();
        let depth = assert_node(tree, tree.root, None, None, &mut leaves);
        assert_eq!(depth, tree.height());

        // The chain visits exactly the leaves found by descending, in order.
        let mut chain = Vec::new();
        let mut current = Some(leaves[0]);
        while let Some(id) = current {
            chain.push(id);
            current = tree.nodes[id].next;
        }
        assert_eq!(chain, leaves);

        let keys = tree.traverse_in_order();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(keys.len(), tree.len());
    }

    fn build(t: usize, keys: impl IntoIterator<Item = i32>) -> Tree<i32> {
        let mut tree = Tree::new(t).unwrap();
        for key in keys {
            tree.insert(key);
            assert_valid(&tree);
        }
        tree
    }

    const SCENARIO: [i32; 12] = [10, 20, 5, 6, 15, 30, 25, 16, 2, 12, 28, 35];

    #[test]
    fn test_rejects_degree_below_two() {
        assert_eq!(
            Tree::<i32>::new(0).unwrap_err(),
            Error::InvalidDegree { degree: 0, min: 2 }
        );
    }

    #[test]
    fn test_range_query_scenario() {
        let tree = build(2, SCENARIO);

        let mut sorted = SCENARIO.to_vec();
        sorted.sort_unstable();
        assert_eq!(tree.traverse_in_order(), sorted);

        let expected: Vec<_> = sorted
            .iter()
            .copied()
            .filter(|k| (10..=30).contains(k))
            .collect();
        assert_eq!(tree.range_query(&10, &30), expected);
        assert_eq!(expected, vec![10, 12, 15, 16, 20, 25, 28, 30]);
    }

    #[test]
    fn test_range_query_bounds() {
        let tree = build(2, SCENARIO);

        assert_eq!(tree.range_query(&0, &1), Vec::<i32>::new());
        assert_eq!(tree.range_query(&36, &100), Vec::<i32>::new());
        assert_eq!(tree.range_query(&7, &9), Vec::<i32>::new());
        assert_eq!(tree.range_query(&16, &16), vec![16]);
        assert_eq!(tree.range_query(&-5, &5), vec![2, 5]);
        assert_eq!(tree.range_query(&29, &1000), vec![30, 35]);
    }

    #[test]
    fn test_leaf_split_copies_separator() {
        let tree = build(2, [1, 2, 3, 4]);

        let root = &tree.nodes[tree.root];
        assert_eq!(root.keys, vec![2]);
        assert_eq!(tree.nodes[root.children[0]].keys, vec![1]);
        assert_eq!(tree.nodes[root.children[1]].keys, vec![2, 3, 4]);

        // 2 is both a routing key and stored in a leaf.
        let leaf = tree.search(&2).unwrap();
        assert!(leaf.is_leaf());
        assert_eq!(leaf.keys(), &[2, 3, 4]);
        assert_eq!(leaf.next(), None);
    }

    #[test]
    fn test_search_only_matches_leaves() {
        let tree = build(3, 0..50);
        for key in 0..50 {
            let leaf = tree.search(&key).unwrap();
            assert!(leaf.is_leaf());
            assert!(leaf.keys().contains(&key));
        }
        assert!(tree.search(&50).is_none());
        assert!(tree.search(&-1).is_none());
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let mut tree = build(2, SCENARIO);

        assert!(!tree.insert(16));
        assert_eq!(tree.len(), SCENARIO.len());
        assert_valid(&tree);
    }

    #[test]
    fn test_delete_separator_refreshes_routing_copy() {
        let mut tree = build(2, [1, 2, 3, 4]);
        tree.insert(5);
        // The full leaf [2, 3, 4] split: root [2, 3] over [1] [2] [3, 4, 5].
        assert_eq!(tree.nodes[tree.root].keys, vec![2, 3]);

        assert!(tree.delete(&3));
        assert_valid(&tree);
        assert!(tree.search(&3).is_none());
        assert!(!tree.nodes[tree.root].keys.contains(&3));
        assert_eq!(tree.traverse_in_order(), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_delete_merges_leaves_and_relinks_chain() {
        let mut tree = build(2, [1, 2, 3, 4]);
        // root [2] over [1] and [2, 3, 4]; topping up [1] borrows from the right.
        assert!(tree.delete(&1));
        assert_valid(&tree);
        assert_eq!(tree.traverse_in_order(), vec![2, 3, 4]);

        // Now [2] [3, 4]: deleting 3 merges the leaves and collapses the root.
        assert!(tree.delete(&4));
        assert!(tree.delete(&3));
        assert_valid(&tree);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.traverse_in_order(), vec![2]);
    }

    #[test]
    fn test_delete_everything() {
        let keys: Vec<i32> = (0..300).map(|x| (x * 7919) % 300).collect();
        let mut tree = build(3, keys.iter().copied());

        for (i, key) in keys.iter().enumerate() {
            assert!(tree.delete(key));
            assert_valid(&tree);
            assert!(tree.search(key).is_none());
            assert_eq!(tree.len(), keys.len() - i - 1);
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 1);
        assert!(tree.traverse_in_order().is_empty());
    }

    #[test]
    fn test_delete_missing_key() {
        let mut tree = build(2, SCENARIO);

        assert!(!tree.delete(&11));
        assert!(!tree.delete(&100));
        assert_eq!(tree.len(), SCENARIO.len());
        assert_valid(&tree);

        let mut empty: Tree<i32> = Tree::new(2).unwrap();
        assert!(!empty.delete(&1));
    }

    #[test]
    fn test_arena_recycles_slots() {
        let mut tree = build(2, 0..64);
        for key in 0..64 {
            tree.delete(&key);
        }
        let slots = tree.nodes.slots.len();
        for key in 0..64 {
            tree.insert(key);
        }
        assert_eq!(tree.nodes.slots.len(), slots);
        assert_valid(&tree);
    }

    #[test]
    fn test_display() {
        let tree = build(2, [1, 2, 3, 4]);
        assert_eq!(tree.to_string(), "[2]\n[1] [2, 3, 4]\n");
    }
}
