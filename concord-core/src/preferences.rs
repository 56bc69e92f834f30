//! Ratings datasets keyed by subject.

use std::collections::BTreeMap;

use crate::recommend::{self, Scored};
use crate::{Metric, Ratings, RatingsError, RecommendError};

/// A ratings dataset: every subject's [`Ratings`], keyed by subject.
///
/// Subjects are unique and enumerate in key order. Ranking never mutates the
/// dataset; callers must not mutate it while a ranking call is in flight.
///
/// # Examples
/// ```
/// use concord_core::{Metric, Preferences};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut prefs = Preferences::new();
/// prefs.rate("Toby", "Snakes on a Plane", 4.5)?;
/// prefs.rate("Toby", "Superman Returns", 4.0)?;
/// prefs.rate("Lisa Rose", "Snakes on a Plane", 3.5)?;
/// prefs.rate("Lisa Rose", "Superman Returns", 3.5)?;
/// prefs.rate("Lisa Rose", "Lady in the Water", 2.5)?;
///
/// let picks = prefs.top_item_matches(&"Toby", 5, Metric::Distance)?;
/// assert_eq!(picks[0].id, &"Lady in the Water");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        transparent,
        bound(
            serialize = "S: Ord + serde::Serialize, I: Ord + Clone + serde::Serialize",
            deserialize = "S: Ord + serde::Deserialize<'de>, I: Ord + serde::Deserialize<'de>"
        )
    )
)]
pub struct Preferences<S: Ord = String, I: Ord = String> {
    subjects: BTreeMap<S, Ratings<I>>,
}

impl<S: Ord, I: Ord> Preferences<S, I> {
    /// Create an empty dataset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            subjects: BTreeMap::new(),
        }
    }

    /// Insert or replace a subject's ratings, returning the previous ones.
    pub fn insert(&mut self, subject: S, ratings: Ratings<I>) -> Option<Ratings<I>> {
        self.subjects.insert(subject, ratings)
    }

    /// Record a single rating, creating the subject when missing.
    ///
    /// # Errors
    /// Returns [`RatingsError::NonFinite`] when the score is NaN or infinite.
    pub fn rate(
        &mut self,
        subject: S,
        item: I,
        score: impl Into<f64>,
    ) -> Result<(), RatingsError> {
        self.subjects.entry(subject).or_default().insert(item, score)
    }

    /// Return a subject's ratings, if present.
    #[must_use]
    pub fn get(&self, subject: &S) -> Option<&Ratings<I>> {
        self.subjects.get(subject)
    }

    /// Report whether the subject is present.
    #[must_use]
    pub fn contains(&self, subject: &S) -> bool {
        self.subjects.contains_key(subject)
    }

    /// Number of subjects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Report whether the dataset has no subjects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Iterate over `(subject, ratings)` pairs in subject order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &Ratings<I>)> {
        self.subjects.iter()
    }

    /// Iterate over subjects in order.
    pub fn subjects(&self) -> impl Iterator<Item = &S> {
        self.subjects.keys()
    }

    /// Swap subjects and items.
    ///
    /// `{subject: {item: score}}` becomes `{item: {subject: score}}`, so the
    /// ranking functions can answer item-to-item questions ("which films are
    /// like this one"). Subjects without ratings have no counterpart in the
    /// transposed dataset.
    ///
    /// # Examples
    /// ```
    /// use concord_core::Preferences;
    ///
    /// # fn main() -> Result<(), concord_core::RatingsError> {
    /// let mut prefs = Preferences::new();
    /// prefs.rate("ann", "dune", 4.0)?;
    /// prefs.rate("bob", "dune", 2.5)?;
    ///
    /// let by_item = prefs.transpose();
    /// let dune = by_item.get(&"dune").expect("dune was rated");
    /// assert_eq!(dune.get(&"bob"), Some(2.5));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn transpose(&self) -> Preferences<I, S>
    where
        S: Clone,
        I: Clone,
    {
        let mut transposed = BTreeMap::<I, BTreeMap<S, f64>>::new();
        for (subject, ratings) in &self.subjects {
            for (item, score) in ratings.iter() {
                transposed
                    .entry(item.clone())
                    .or_default()
                    .insert(subject.clone(), score);
            }
        }
        Preferences {
            subjects: transposed
                .into_iter()
                .map(|(item, scores)| (item, Ratings::from_validated(scores)))
                .collect(),
        }
    }

    /// Rank the subjects most similar to `subject`.
    ///
    /// See [`recommend::top_subject_matches`].
    ///
    /// # Errors
    /// Returns [`RecommendError::UnknownSubject`] when `subject` is absent.
    pub fn top_subject_matches(
        &self,
        subject: &S,
        limit: usize,
        metric: Metric,
    ) -> Result<Vec<Scored<&S>>, RecommendError>
    where
        S: std::fmt::Debug,
    {
        recommend::top_subject_matches(self, subject, limit, metric)
    }

    /// Rank predicted scores for the items `subject` has not rated.
    ///
    /// See [`recommend::top_item_matches`].
    ///
    /// # Errors
    /// Returns [`RecommendError::UnknownSubject`] when `subject` is absent.
    pub fn top_item_matches(
        &self,
        subject: &S,
        limit: usize,
        metric: Metric,
    ) -> Result<Vec<Scored<&I>>, RecommendError>
    where
        S: std::fmt::Debug,
    {
        recommend::top_item_matches(self, subject, limit, metric)
    }
}

impl<S: Ord, I: Ord> Default for Preferences<S, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Ord, I: Ord> FromIterator<(S, Ratings<I>)> for Preferences<S, I> {
    fn from_iter<T: IntoIterator<Item = (S, Ratings<I>)>>(iter: T) -> Self {
        Self {
            subjects: iter.into_iter().collect(),
        }
    }
}

impl<S: Ord, I: Ord> TryFrom<BTreeMap<S, BTreeMap<I, f64>>> for Preferences<S, I> {
    type Error = RatingsError;

    fn try_from(map: BTreeMap<S, BTreeMap<I, f64>>) -> Result<Self, Self::Error> {
        map.into_iter()
            .map(|(subject, scores)| Ratings::try_from(scores).map(|ratings| (subject, ratings)))
            .collect()
    }
}
