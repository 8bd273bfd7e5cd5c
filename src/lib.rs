//! This crate exposes various self-balancing ordered containers mostly for
//! educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! Searching takes `O(height)`, so everything here is about keeping the height
//! down while keys come and go. Each container does it differently:
//!
//! - [`avl`] caches subtree heights and rotates whenever two siblings differ
//!   in height by more than one.
//! - [`splay`] stores nothing extra and instead rotates every accessed key up
//!   to the root, which keeps the *amortized* cost logarithmic.
//! - [`btree`] stores many keys per node and keeps every leaf at the same
//!   depth by splitting full nodes and merging sparse ones.
//! - [`bptree`] is a B-tree whose leaves hold every key and are linked
//!   together for range scans.
//!
//! The B-tree family is configured with a minimum [`Degree`]; asking for an
//! invalid one is the only error this crate reports. Structural changes
//! (rotations, splits, merges) are emitted as `tracing` events.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod bptree;
pub mod btree;
mod degree;
mod error;
pub mod splay;

pub use degree::Degree;
pub use error::{Error, Result};
