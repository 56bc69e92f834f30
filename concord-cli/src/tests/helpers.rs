//! Test helpers for writing ratings datasets to temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Film critics' ratings as the CLI expects them on disk.
pub(super) const CRITICS_JSON: &str = r#"{
  "Lisa Rose": {"Lady in the Water": 2.5, "Snakes on a Plane": 3.5, "Just My Luck": 3.0,
                "Superman Returns": 3.5, "You, Me and Dupree": 2.5, "The Night Listener": 3.0},
  "Gene Seymour": {"Lady in the Water": 3.0, "Snakes on a Plane": 3.5, "Just My Luck": 1.5,
                   "Superman Returns": 5.0, "You, Me and Dupree": 3.5, "The Night Listener": 3.0},
  "Michael Phillips": {"Lady in the Water": 2.5, "Snakes on a Plane": 3.0,
                       "Superman Returns": 3.5, "The Night Listener": 4.0},
  "Claudia Puig": {"Snakes on a Plane": 3.5, "Just My Luck": 3.0, "Superman Returns": 4.0,
                   "You, Me and Dupree": 2.5, "The Night Listener": 4.5},
  "Mick LaSalle": {"Lady in the Water": 3.0, "Snakes on a Plane": 4.0, "Just My Luck": 2.0,
                   "Superman Returns": 3.0, "You, Me and Dupree": 2.0, "The Night Listener": 3.0},
  "Jack Matthews": {"Lady in the Water": 3.0, "Snakes on a Plane": 4.0, "Superman Returns": 5.0,
                    "You, Me and Dupree": 3.5, "The Night Listener": 3.0},
  "Toby": {"Snakes on a Plane": 4.5, "Superman Returns": 4.0, "You, Me and Dupree": 1.0}
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// A temporary directory holding a dataset path that may not exist yet.
#[derive(Debug)]
pub(super) struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn dataset(&self) -> Utf8PathBuf {
        self.root.join("critics.json")
    }

    pub(super) fn write_critics(&self) -> Utf8PathBuf {
        let path = self.dataset();
        write_utf8(&path, CRITICS_JSON.as_bytes());
        path
    }
}

/// Decode a ranking printed by the CLI.
pub(super) fn parse_ranking(stdout: &[u8]) -> Vec<(String, f64)> {
    let value: serde_json::Value = serde_json::from_slice(stdout).expect("stdout should be JSON");
    value
        .as_array()
        .expect("ranking should be a JSON array")
        .iter()
        .map(|entry| {
            let id = entry
                .get("id")
                .and_then(serde_json::Value::as_str)
                .expect("id should be a string")
                .to_owned();
            let score = entry
                .get("score")
                .and_then(serde_json::Value::as_f64)
                .expect("score should be a number");
            (id, score)
        })
        .collect()
}

pub(super) fn ids(ranking: &[(String, f64)]) -> Vec<&str> {
    ranking.iter().map(|(id, _)| id.as_str()).collect()
}
