use balanced_trees::splay::Tree;

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
        self.inorder()
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
fn successful_search_splays_to_root(xs: Vec<i8>, probes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    probes.iter().all(|p| {
        let found = tree.search(p);
        found == xs.contains(p) && (!found || tree.root() == Some(p))
    })
}

#[quickcheck]
fn insert_puts_key_at_root(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    xs.iter().all(|x| {
        tree.insert(*x);
        tree.root() == Some(x)
    })
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

    let remaining = tree.inorder();
    deletes.iter().all(|x| !remaining.contains(x))
        && xs
            .iter()
            .filter(|x| !deletes.contains(x))
            .all(|x| remaining.contains(x))
}
