//! The minimum degree `t` shared by every node of a B-tree or B+ tree.

use std::fmt;

use crate::error::{Error, Result};

/// A validated minimum degree. Every non-root node of a tree configured with
/// degree `t` holds between `t - 1` and `2t - 1` keys.
///
/// # Examples
///
/// ```
/// use balanced_trees::Degree;
///
/// let degree = Degree::new(3).unwrap();
/// assert_eq!(degree.min_keys(), 2);
/// assert_eq!(degree.max_keys(), 5);
///
/// assert!(Degree::new(1).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Degree(usize);

impl Degree {
    /// The smallest degree that still yields a valid tree.
    pub const MIN: Self = Self(2);

    /// Validates `t`, rejecting anything below [`Degree::MIN`].
    pub fn new(t: usize) -> Result<Self> {
        if t < Self::MIN.0 {
            return Err(Error::InvalidDegree {
                degree: t,
                min: Self::MIN.0,
            });
        }
        Ok(Self(t))
    }

    /// The raw value of `t`.
    pub fn get(self) -> usize {
        self.0
    }

    /// Fewest keys a non-root node may hold.
    pub fn min_keys(self) -> usize {
        self.0 - 1
    }

    /// Most keys any node may hold. A node with this many keys is full and
    /// gets split before an insert descends into it.
    pub fn max_keys(self) -> usize {
        2 * self.0 - 1
    }
}

impl Default for Degree {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<usize> for Degree {
    type Error = Error;

    fn try_from(t: usize) -> Result<Self> {
        Self::new(t)
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}
