//! Rank similar subjects and recommend unrated items.
//!
//! All functions are pure: they read a [`Preferences`] dataset, build their
//! accumulators per call, and return owned vectors borrowing identifiers from
//! the dataset. Rankings sort by score descending with a stable sort, so equal
//! scores keep the dataset's enumeration order.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::{Metric, Preferences, Ratings, RecommendError};

/// Number of entries returned when the caller has no preference.
pub const DEFAULT_LIMIT: usize = 5;

/// An identifier paired with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scored<K> {
    /// Subject or item identifier.
    pub id: K,
    /// Similarity score or predicted rating.
    pub score: f64,
}

impl<K> Scored<K> {
    /// Pair an identifier with a score.
    #[must_use]
    pub const fn new(id: K, score: f64) -> Self {
        Self { id, score }
    }
}

impl<K: Clone> Scored<&K> {
    /// Clone the borrowed identifier into an owned entry.
    #[must_use]
    pub fn cloned(self) -> Scored<K> {
        Scored::new(self.id.clone(), self.score)
    }
}

/// Score every other subject against `subject`, in enumeration order.
///
/// The target subject is never compared with itself.
///
/// # Errors
/// Returns [`RecommendError::UnknownSubject`] when `subject` is absent.
pub fn subject_similarities<'a, S, I>(
    prefs: &'a Preferences<S, I>,
    subject: &S,
    metric: Metric,
) -> Result<Vec<Scored<&'a S>>, RecommendError>
where
    S: Ord + fmt::Debug,
    I: Ord,
{
    let target = target_ratings(prefs, subject)?;
    Ok(prefs
        .iter()
        .filter(|(other, _)| *other != subject)
        .map(|(other, ratings)| Scored::new(other, metric.similarity(target, ratings)))
        .collect())
}

/// Rank the `limit` subjects most similar to `subject`.
///
/// Returns `min(limit, prefs.len() - 1)` entries, highest score first.
///
/// # Errors
/// Returns [`RecommendError::UnknownSubject`] when `subject` is absent.
pub fn top_subject_matches<'a, S, I>(
    prefs: &'a Preferences<S, I>,
    subject: &S,
    limit: usize,
    metric: Metric,
) -> Result<Vec<Scored<&'a S>>, RecommendError>
where
    S: Ord + fmt::Debug,
    I: Ord,
{
    let scores = subject_similarities(prefs, subject, metric)?;
    debug!(
        "ranked {} subjects against {subject:?} using {metric}",
        scores.len()
    );
    Ok(rank(scores, limit))
}

/// Predict scores for every item `subject` has not rated.
///
/// Each prediction is the similarity-weighted average of the other subjects'
/// ratings for the item. Subjects with a negative similarity are ignored.
/// Subjects with a similarity of zero take part but carry no weight, so an
/// item only they rated has no prediction and is left out. Entries follow item
/// order.
///
/// # Errors
/// Returns [`RecommendError::UnknownSubject`] when `subject` is absent.
#[expect(
    clippy::float_arithmetic,
    reason = "weighted averages need floating-point sums and division"
)]
pub fn item_recommendations<'a, S, I>(
    prefs: &'a Preferences<S, I>,
    subject: &S,
    metric: Metric,
) -> Result<Vec<Scored<&'a I>>, RecommendError>
where
    S: Ord + fmt::Debug,
    I: Ord,
{
    let target = target_ratings(prefs, subject)?;
    let mut totals: BTreeMap<&'a I, Weighted> = BTreeMap::new();
    for neighbour in subject_similarities(prefs, subject, metric)? {
        if neighbour.score < 0.0 {
            continue;
        }
        let Some(ratings) = prefs.get(neighbour.id) else {
            continue;
        };
        for (item, rating) in unrated_by(ratings, target) {
            let entry = totals.entry(item).or_default();
            entry.weighted_sum += neighbour.score * rating;
            entry.weight += neighbour.score;
        }
    }

    let candidates = totals.len();
    let predictions: Vec<_> = totals
        .into_iter()
        .filter(|(_, sums)| sums.weight != 0.0)
        .map(|(item, sums)| Scored::new(item, sums.weighted_sum / sums.weight))
        .collect();
    debug!(
        "predicted {} of {candidates} unrated items for {subject:?} using {metric}",
        predictions.len()
    );
    Ok(predictions)
}

/// Rank the `limit` highest predicted scores for items `subject` has not
/// rated.
///
/// # Errors
/// Returns [`RecommendError::UnknownSubject`] when `subject` is absent.
pub fn top_item_matches<'a, S, I>(
    prefs: &'a Preferences<S, I>,
    subject: &S,
    limit: usize,
    metric: Metric,
) -> Result<Vec<Scored<&'a I>>, RecommendError>
where
    S: Ord + fmt::Debug,
    I: Ord,
{
    item_recommendations(prefs, subject, metric).map(|scores| rank(scores, limit))
}

/// Running sums for one candidate item.
#[derive(Debug, Default, Clone, Copy)]
struct Weighted {
    weighted_sum: f64,
    weight: f64,
}

fn target_ratings<'a, S, I>(
    prefs: &'a Preferences<S, I>,
    subject: &S,
) -> Result<&'a Ratings<I>, RecommendError>
where
    S: Ord + fmt::Debug,
    I: Ord,
{
    prefs
        .get(subject)
        .ok_or_else(|| RecommendError::UnknownSubject {
            subject: format!("{subject:?}"),
        })
}

/// Items in `ratings` that `target` has not rated.
fn unrated_by<'a, I: Ord>(
    ratings: &'a Ratings<I>,
    target: &'a Ratings<I>,
) -> impl Iterator<Item = (&'a I, f64)> + 'a {
    ratings.iter().filter(|(item, _)| !target.contains(item))
}

/// Sort descending by score, keeping ties in input order, and keep `limit`.
fn rank<K>(mut scores: Vec<Scored<K>>, limit: usize) -> Vec<Scored<K>> {
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores.truncate(limit);
    scores
}
