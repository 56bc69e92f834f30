//! One subject's sparse item ratings.

use std::collections::BTreeMap;
use std::collections::btree_map;

use thiserror::Error;

/// Errors returned when building [`Ratings`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RatingsError {
    /// The score was NaN or infinite.
    #[error("rating {score} is not a finite number")]
    NonFinite {
        /// Rejected score.
        score: f64,
    },
}

/// Item scores assigned by a single subject.
///
/// Not every subject rates every item; metrics only ever compare the items two
/// mappings share. Scores are stored as `f64` and must be finite. Iteration
/// follows item order, so every ranking built on top is deterministic.
///
/// # Examples
/// ```
/// use concord_core::Ratings;
///
/// # fn main() -> Result<(), concord_core::RatingsError> {
/// let ratings = Ratings::new()
///     .with_rating("Snakes on a Plane", 4.5)?
///     .with_rating("Superman Returns", 4)?;
/// assert_eq!(ratings.get(&"Superman Returns"), Some(4.0));
/// assert!(ratings.get(&"Just My Luck").is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "BTreeMap<I, f64>",
        into = "BTreeMap<I, f64>",
        bound(
            serialize = "I: Ord + Clone + serde::Serialize",
            deserialize = "I: Ord + serde::Deserialize<'de>"
        )
    )
)]
pub struct Ratings<I: Ord = String> {
    scores: BTreeMap<I, f64>,
}

impl<I: Ord> Ratings<I> {
    /// Create an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scores: BTreeMap::new(),
        }
    }

    /// Wrap scores that are already known to be finite.
    pub(crate) const fn from_validated(scores: BTreeMap<I, f64>) -> Self {
        Self { scores }
    }

    /// Insert or replace the score for `item`.
    ///
    /// Integer scores are promoted to `f64`.
    ///
    /// # Errors
    /// Returns [`RatingsError::NonFinite`] when the score is NaN or infinite;
    /// the mapping is left unchanged.
    pub fn insert(&mut self, item: I, score: impl Into<f64>) -> Result<(), RatingsError> {
        let value = finite(score.into())?;
        self.scores.insert(item, value);
        Ok(())
    }

    /// Insert a score while returning `self` for chaining.
    ///
    /// # Errors
    /// Returns [`RatingsError::NonFinite`] when the score is NaN or infinite.
    pub fn with_rating(mut self, item: I, score: impl Into<f64>) -> Result<Self, RatingsError> {
        self.insert(item, score)?;
        Ok(self)
    }

    /// Return the score for `item`, if rated.
    #[must_use]
    pub fn get(&self, item: &I) -> Option<f64> {
        self.scores.get(item).copied()
    }

    /// Report whether `item` has been rated.
    #[must_use]
    pub fn contains(&self, item: &I) -> bool {
        self.scores.contains_key(item)
    }

    /// Number of rated items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Report whether no item has been rated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate over `(item, score)` pairs in item order.
    pub fn iter(&self) -> impl Iterator<Item = (&I, f64)> {
        self.scores.iter().map(|(item, &score)| (item, score))
    }

    /// Iterate over rated items in order.
    pub fn items(&self) -> impl Iterator<Item = &I> {
        self.scores.keys()
    }
}

impl<I: Ord> Default for Ratings<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Ord> TryFrom<BTreeMap<I, f64>> for Ratings<I> {
    type Error = RatingsError;

    fn try_from(scores: BTreeMap<I, f64>) -> Result<Self, Self::Error> {
        if let Some(&score) = scores.values().find(|score| !score.is_finite()) {
            return Err(RatingsError::NonFinite { score });
        }
        Ok(Self { scores })
    }
}

impl<I: Ord> From<Ratings<I>> for BTreeMap<I, f64> {
    fn from(ratings: Ratings<I>) -> Self {
        ratings.scores
    }
}

impl<I: Ord> IntoIterator for Ratings<I> {
    type Item = (I, f64);
    type IntoIter = btree_map::IntoIter<I, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.into_iter()
    }
}

const fn finite(score: f64) -> Result<f64, RatingsError> {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(RatingsError::NonFinite { score })
    }
}
