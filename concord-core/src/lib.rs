//! Core similarity and recommendation logic for Concord.
//!
//! Subjects (for example film critics) assign sparse numeric ratings to items
//! (for example films). This crate compares two subjects' ratings with a
//! [`Metric`] and ranks either the subjects most similar to a target or the
//! items a target is most likely to rate highly.
//!
//! # Examples
//!
//! ```
//! use concord_core::{Metric, Preferences, top_item_matches, top_subject_matches};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut prefs: Preferences = Preferences::new();
//! prefs.rate("ann".to_owned(), "dune".to_owned(), 4.5)?;
//! prefs.rate("ann".to_owned(), "heat".to_owned(), 2.0)?;
//! prefs.rate("bob".to_owned(), "dune".to_owned(), 4.0)?;
//! prefs.rate("bob".to_owned(), "heat".to_owned(), 1.5)?;
//! prefs.rate("bob".to_owned(), "alien".to_owned(), 5.0)?;
//!
//! let similar = top_subject_matches(&prefs, &"ann".to_owned(), 5, Metric::Pearson)?;
//! assert_eq!(similar[0].id, "bob");
//!
//! let picks = top_item_matches(&prefs, &"ann".to_owned(), 5, Metric::Pearson)?;
//! assert_eq!(picks[0].id, "alien");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub mod metric;
mod preferences;
mod ratings;
pub mod recommend;

pub use error::{RecommendError, UnknownMetric};
pub use metric::{
    Metric, common_items, distance_similarity, euclidean_sum_of_squares, linear_similarity,
};
pub use preferences::Preferences;
pub use ratings::{Ratings, RatingsError};
pub use recommend::{
    DEFAULT_LIMIT, Scored, item_recommendations, subject_similarities, top_item_matches,
    top_subject_matches,
};
