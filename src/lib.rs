//! Facade crate for the Concord similarity and recommendation engine.
//!
//! This crate re-exports the core ratings types, similarity metrics and
//! ranking operations so callers depend on a single crate.

#![forbid(unsafe_code)]

pub use concord_core::{
    DEFAULT_LIMIT, Metric, Preferences, Ratings, RatingsError, RecommendError, Scored,
    UnknownMetric, common_items, distance_similarity, euclidean_sum_of_squares,
    item_recommendations, linear_similarity, subject_similarities, top_item_matches,
    top_subject_matches,
};
