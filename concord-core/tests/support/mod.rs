//! Shared fixtures for the core integration tests.

use concord_core::Preferences;

/// Film critics' ratings from the classic collaborative filtering example.
const CRITICS: &[(&str, &[(&str, f64)])] = &[
    (
        "Lisa Rose",
        &[
            ("Lady in the Water", 2.5),
            ("Snakes on a Plane", 3.5),
            ("Just My Luck", 3.0),
            ("Superman Returns", 3.5),
            ("You, Me and Dupree", 2.5),
            ("The Night Listener", 3.0),
        ],
    ),
    (
        "Gene Seymour",
        &[
            ("Lady in the Water", 3.0),
            ("Snakes on a Plane", 3.5),
            ("Just My Luck", 1.5),
            ("Superman Returns", 5.0),
            ("You, Me and Dupree", 3.5),
            ("The Night Listener", 3.0),
        ],
    ),
    (
        "Michael Phillips",
        &[
            ("Lady in the Water", 2.5),
            ("Snakes on a Plane", 3.0),
            ("Superman Returns", 3.5),
            ("The Night Listener", 4.0),
        ],
    ),
    (
        "Claudia Puig",
        &[
            ("Snakes on a Plane", 3.5),
            ("Just My Luck", 3.0),
            ("Superman Returns", 4.0),
            ("You, Me and Dupree", 2.5),
            ("The Night Listener", 4.5),
        ],
    ),
    (
        "Mick LaSalle",
        &[
            ("Lady in the Water", 3.0),
            ("Snakes on a Plane", 4.0),
            ("Just My Luck", 2.0),
            ("Superman Returns", 3.0),
            ("You, Me and Dupree", 2.0),
            ("The Night Listener", 3.0),
        ],
    ),
    (
        "Jack Matthews",
        &[
            ("Lady in the Water", 3.0),
            ("Snakes on a Plane", 4.0),
            ("Superman Returns", 5.0),
            ("You, Me and Dupree", 3.5),
            ("The Night Listener", 3.0),
        ],
    ),
    (
        "Toby",
        &[
            ("Snakes on a Plane", 4.5),
            ("Superman Returns", 4.0),
            ("You, Me and Dupree", 1.0),
        ],
    ),
];

/// Build the seven-critic dataset.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture scores are finite constants")]
pub fn critics() -> Preferences {
    let mut prefs = Preferences::new();
    for &(critic, films) in CRITICS {
        for &(film, score) in films {
            prefs
                .rate(critic.to_owned(), film.to_owned(), score)
                .expect("fixture scores are finite");
        }
    }
    prefs
}

/// Collect borrowed identifiers from a ranking.
#[must_use]
pub fn ids<K: AsRef<str>>(ranking: &[concord_core::Scored<K>]) -> Vec<&str> {
    ranking.iter().map(|entry| entry.id.as_ref()).collect()
}
