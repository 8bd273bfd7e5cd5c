//! Randomised comparisons of every tree against `std::collections::BTreeSet`.
//!
//! Set `RUST_LOG=balanced_trees=trace` to see the rotations, splits and merges
//! performed while a property runs.

#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod avl;
mod bptree;
mod btree;
mod splay;

use std::collections::BTreeSet;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert the K into the data structure
    Insert(K),
    /// Remove the K from the data structure
    Remove(K),
    /// Look the K up
    Search(K),
    /// Compare in-order traversals
    Iter,
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Inserts are
    /// weighted up so trees grow deep enough to exercise rebalancing.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2, 3]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Search(K::arbitrary(g)),
            3 => Op::Iter,
            _ => unreachable!(),
        }
    }
}

/// The operations shared by all trees, so one driver can check them all.
pub(crate) trait OrderedSet<K> {
    fn insert(&mut self, key: K) -> bool;
    fn remove(&mut self, key: &K) -> bool;
    fn contains(&mut self, key: &K) -> bool;
    fn keys(&self) -> Vec<K>;
    fn len(&self) -> usize;
}

/// Installs a subscriber printing the crate's trace events through the test
/// writer. Safe to call from every test.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Applies a set of operations to a tree and to a `BTreeSet`, checking after
/// every step that both agree on the outcome.
pub(crate) fn do_ops<K, T>(ops: &[Op<K>], tree: &mut T) -> bool
where
    K: Ord + Clone,
    T: OrderedSet<K>,
{
    init_tracing();
    let mut set = BTreeSet::new();

    for op in ops {
        let agrees = match op {
            Op::Insert(k) => tree.insert(k.clone()) == set.insert(k.clone()),
            Op::Remove(k) => tree.remove(k) == set.remove(k),
            Op::Search(k) => tree.contains(k) == set.contains(k),
            Op::Iter => tree.keys() == set.iter().cloned().collect::<Vec<_>>(),
        };
        if !agrees || tree.len() != set.len() {
            return false;
        }
    }

    tree.keys() == set.into_iter().collect::<Vec<_>>()
}
