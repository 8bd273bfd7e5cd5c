use balanced_trees::btree::Tree;
use balanced_trees::Degree;

use crate::{do_ops, Op, OrderedSet};

impl<K: Ord + Clone> OrderedSet<K> for Tree<K> {
    fn insert(&mut self, key: K) -> bool {
        Tree::insert(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        Tree::remove(self, key)
    }

    fn contains(&mut self, key: &K) -> bool {
        self.search(key).is_some()
    }

    fn keys(&self) -> Vec<K> {
        self.traverse_in_order()
    }

    fn len(&self) -> usize {
        Tree::len(self)
    }
}

/// Maps an arbitrary byte onto a small degree so that splits and merges
/// happen often.
fn degree(t: u8) -> Degree {
    Degree::new(2 + usize::from(t % 4)).unwrap_or_default()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(t: u8, ops: Vec<Op<i8>>) -> bool {
    do_ops(&ops, &mut Tree::with_degree(degree(t)))
}

#[quickcheck]
fn found_node_holds_key(t: u8, xs: Vec<i16>) -> bool {
    let mut tree = Tree::with_degree(degree(t));
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter()
        .all(|x| tree.search(x).is_some_and(|node| node.keys().contains(x)))
}

#[quickcheck]
fn remove_all_empties_tree(t: u8, xs: Vec<i8>) -> bool {
    let mut tree = Tree::with_degree(degree(t));
    for x in &xs {
        tree.insert(*x);
    }
    for x in &xs {
        tree.remove(x);
    }

    tree.is_empty() && tree.traverse_in_order().is_empty() && tree.height() == 0
}
