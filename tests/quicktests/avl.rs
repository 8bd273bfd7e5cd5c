use balanced_trees::avl::Tree;

use crate::{do_ops, Op, OrderedSet};

impl<K: Ord + Clone> OrderedSet<K> for Tree<K> {
    fn insert(&mut self, key: K) -> bool {
        Tree::insert(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        self.delete(key)
    }

    fn contains(&mut self, key: &K) -> bool {
        self.search(key)
    }

    fn keys(&self) -> Vec<K> {
        self.traverse_in_order()
    }

    fn len(&self) -> usize {
        Tree::len(self)
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    do_ops(&ops, &mut Tree::new())
}

#[quickcheck]
fn round_trip_is_sorted(xs: Vec<i16>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    let mut expected = xs;
    expected.sort_unstable();
    expected.dedup();
    tree.traverse_in_order() == expected
}

#[quickcheck]
fn height_stays_logarithmic(xs: Vec<u16>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    // An AVL tree with n nodes is at most ~1.44 lg(n + 2) tall.
    let bound = 1.45 * ((tree.len() + 2) as f64).log2();
    tree.height() as f64 <= bound
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    for delete in &deletes {
        tree.delete(delete);
    }

    deletes.iter().all(|x| !tree.search(x))
        && xs
            .iter()
            .filter(|x| !deletes.contains(x))
            .all(|x| tree.search(x))
}
