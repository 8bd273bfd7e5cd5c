use std::collections::BTreeSet;

use balanced_trees::bptree::Tree;
use balanced_trees::Degree;

use crate::{do_ops, Op, OrderedSet};

impl<K: Ord + Clone> OrderedSet<K> for Tree<K> {
    fn insert(&mut self, key: K) -> bool {
        Tree::insert(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        self.delete(key)
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
fn range_query_matches_filter(t: u8, xs: Vec<i8>, deletes: Vec<i8>, lo: i8, hi: i8) -> bool {
    let mut tree = Tree::with_degree(degree(t));
    for x in &xs {
        tree.insert(*x);
    }
    for x in &deletes {
        tree.delete(x);
    }

    let mut set: BTreeSet<i8> = xs.into_iter().collect();
    for x in &deletes {
        set.remove(x);
    }
    let expected: Vec<i8> = set.into_iter().filter(|x| lo <= *x && *x <= hi).collect();
    tree.range_query(&lo, &hi) == expected
}

#[quickcheck]
fn leaf_chain_is_sorted(t: u8, xs: Vec<i16>) -> bool {
    let mut tree = Tree::with_degree(degree(t));
    for x in &xs {
        tree.insert(*x);
    }

    let mut expected = xs;
    expected.sort_unstable();
    expected.dedup();
    tree.iter().copied().collect::<Vec<_>>() == expected
}
