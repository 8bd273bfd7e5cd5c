//! Errors raised while configuring a tree.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The only failure this crate reports. Missing keys and duplicate inserts are
/// ordinary outcomes and show up as `bool`/`Option` results instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A B-tree or B+ tree was asked for a minimum degree below the supported minimum.
    #[error("minimum degree must be at least {min}, got {degree}")]
    InvalidDegree {
        /// The rejected degree.
        degree: usize,
        /// The smallest accepted degree.
        min: usize,
    },
}
