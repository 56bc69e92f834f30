//! Similarity metrics over two subjects' ratings.
//!
//! Every metric compares only the items both mappings rated; see
//! [`common_items`]. Higher scores always mean "more similar".
//!
//! # Examples
//! ```
//! use concord_core::{Metric, Ratings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let lisa = Ratings::new().with_rating("Snakes on a Plane", 3.5)?.with_rating("Superman Returns", 3.5)?;
//! let gene = Ratings::new().with_rating("Snakes on a Plane", 3.5)?.with_rating("Superman Returns", 5.0)?;
//!
//! let metric: Metric = "sim_distance".parse()?;
//! let score = metric.similarity(&lisa, &gene);
//! assert!(score > 0.0 && score < 1.0);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::{Ratings, UnknownMetric};

/// Similarity metric used to compare two [`Ratings`].
///
/// Metrics are selected by name at call time: parse any accepted name with
/// [`str::parse`]. The set of names is fixed; the canonical name is the first
/// alias.
///
/// # Examples
/// ```
/// use concord_core::Metric;
///
/// assert_eq!("linear_similarity".parse::<Metric>(), Ok(Metric::Pearson));
/// assert_eq!(Metric::Distance.to_string(), "sim_distance");
/// assert!("cosine".parse::<Metric>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "&'static str")
)]
pub enum Metric {
    /// Pearson correlation over shared items, in `[-1, 1]`.
    #[default]
    Pearson,
    /// Inverse of one plus the summed squared differences, in `[0, 1]`.
    Distance,
}

impl Metric {
    /// Every available metric.
    pub const ALL: [Self; 2] = [Self::Pearson, Self::Distance];

    /// Canonical name of the metric.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pearson => "pearson_similarity",
            Self::Distance => "sim_distance",
        }
    }

    /// Every name that resolves to this metric, canonical name first.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Pearson => &["pearson_similarity", "linear_similarity"],
            Self::Distance => &["sim_distance", "distance_similarity"],
        }
    }

    /// Score the similarity of `x` and `y`.
    #[must_use]
    pub fn similarity<I: Ord>(self, x: &Ratings<I>, y: &Ratings<I>) -> f64 {
        match self {
            Self::Pearson => linear_similarity(x, y),
            Self::Distance => distance_similarity(x, y),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.aliases().iter().any(|alias| *alias == s))
            .ok_or_else(|| UnknownMetric { name: s.to_owned() })
    }
}

impl TryFrom<String> for Metric {
    type Error = UnknownMetric;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<Metric> for &'static str {
    fn from(metric: Metric) -> Self {
        metric.name()
    }
}

/// Items rated in both `x` and `y`, in item order.
///
/// Returns an empty vector when the mappings are disjoint.
#[must_use]
pub fn common_items<'a, I: Ord>(x: &'a Ratings<I>, y: &Ratings<I>) -> Vec<&'a I> {
    x.items().filter(|item| y.contains(item)).collect()
}

/// Paired scores for every shared item, `x` first.
fn shared_scores<'a, I: Ord>(
    x: &'a Ratings<I>,
    y: &'a Ratings<I>,
) -> impl Iterator<Item = (f64, f64)> + 'a {
    x.iter()
        .filter_map(|(item, x_score)| y.get(item).map(|y_score| (x_score, y_score)))
}

/// Sum of squared score differences over the shared items.
///
/// Disjoint mappings sum to `0.0`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "distance metrics sum squared differences"
)]
pub fn euclidean_sum_of_squares<I: Ord>(x: &Ratings<I>, y: &Ratings<I>) -> f64 {
    shared_scores(x, y)
        .map(|(x_score, y_score)| (x_score - y_score).powi(2))
        .sum()
}

/// Similarity derived from [`euclidean_sum_of_squares`]:
/// `1 / (1 + sum_of_squares)`.
///
/// Identical overlapping ratings score exactly `1.0`. Mappings with no shared
/// item have nothing to compare and score `0.0`, the least similar value,
/// rather than the `1.0` an empty sum would produce.
///
/// # Examples
/// ```
/// use concord_core::{Ratings, distance_similarity};
///
/// # fn main() -> Result<(), concord_core::RatingsError> {
/// let a = Ratings::new().with_rating("dune", 4.0)?;
/// let b = Ratings::new().with_rating("heat", 4.0)?;
/// assert_eq!(distance_similarity(&a, &a.clone()), 1.0);
/// assert_eq!(distance_similarity(&a, &b), 0.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "similarity is the inverse of the squared distance"
)]
pub fn distance_similarity<I: Ord>(x: &Ratings<I>, y: &Ratings<I>) -> f64 {
    if shared_scores(x, y).next().is_none() {
        trace!("distance similarity: no shared items");
        return 0.0;
    }
    1.0 / (1.0 + euclidean_sum_of_squares(x, y))
}

/// Pearson correlation coefficient over the shared items.
///
/// Returns a value in `[-1, 1]`. Corrects for "grade inflation": a subject who
/// consistently scores higher than another still correlates perfectly when
/// their preferences move together. Returns `0.0` when nothing is shared or
/// either side has zero variance over the shared items.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "correlation requires floating-point sums and a square root"
)]
pub fn linear_similarity<I: Ord>(x: &Ratings<I>, y: &Ratings<I>) -> f64 {
    let mut n = 0.0_f64;
    let (mut sum_x, mut sum_y) = (0.0_f64, 0.0_f64);
    let (mut sum_x_sq, mut sum_y_sq, mut sum_xy) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x_score, y_score) in shared_scores(x, y) {
        n += 1.0;
        sum_x += x_score;
        sum_y += y_score;
        sum_x_sq += x_score * x_score;
        sum_y_sq += y_score * y_score;
        sum_xy += x_score * y_score;
    }
    if n == 0.0 {
        trace!("linear similarity: no shared items");
        return 0.0;
    }

    let denominator = ((sum_x_sq - sum_x * sum_x / n) * (sum_y_sq - sum_y * sum_y / n)).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        trace!("linear similarity: zero variance over {n} shared items");
        return 0.0;
    }
    ((sum_xy - sum_x * sum_y / n) / denominator).clamp(-1.0, 1.0)
}
