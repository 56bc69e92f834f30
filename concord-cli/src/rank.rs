//! `matches` and `recommend` command implementations for the Concord CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use concord_core::{DEFAULT_LIMIT, Metric, Preferences, Scored};
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_DATASET, ARG_LIMIT, ARG_METRIC, ARG_SUBJECT, ARG_TRANSPOSE, CliError,
    ENV_MATCHES_DATASET, ENV_MATCHES_SUBJECT, ENV_RECOMMEND_DATASET, ENV_RECOMMEND_SUBJECT,
};

/// CLI arguments for the `matches` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the subjects whose ratings most resemble the target \
                 subject's ratings. The dataset is a JSON object mapping each \
                 subject to an object of item scores.",
    about = "Rank similar subjects"
)]
#[ortho_config(prefix = "CONCORD")]
pub(crate) struct MatchesArgs {
    /// Path to a JSON ratings dataset.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Subject to find matches for.
    #[arg(long = ARG_SUBJECT, value_name = "id")]
    #[serde(default)]
    pub(crate) subject: Option<String>,
    /// Maximum number of matches to print (defaults to 5).
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Similarity metric (`pearson_similarity` or `sim_distance`).
    #[arg(long = ARG_METRIC, value_name = "name")]
    #[serde(default)]
    pub(crate) metric: Option<String>,
    /// Rank items against items instead of subjects against subjects.
    #[arg(long = ARG_TRANSPOSE)]
    #[serde(default)]
    pub(crate) transpose: bool,
}

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Predict scores for the items the target subject has not \
                 rated, weighting every other subject's scores by their \
                 similarity to the target.",
    about = "Recommend unrated items"
)]
#[ortho_config(prefix = "CONCORD")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON ratings dataset.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Subject to recommend items for.
    #[arg(long = ARG_SUBJECT, value_name = "id")]
    #[serde(default)]
    pub(crate) subject: Option<String>,
    /// Maximum number of recommendations to print (defaults to 5).
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Similarity metric (`pearson_similarity` or `sim_distance`).
    #[arg(long = ARG_METRIC, value_name = "name")]
    #[serde(default)]
    pub(crate) metric: Option<String>,
    /// Recommend subjects for an item instead of items for a subject.
    #[arg(long = ARG_TRANSPOSE)]
    #[serde(default)]
    pub(crate) transpose: bool,
}

impl MatchesArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Which ranking a command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RankMode {
    /// Similar subjects, as printed by `matches`.
    Subjects,
    /// Predicted item scores, as printed by `recommend`.
    Items,
}

/// Resolved ranking command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    /// Path to the JSON dataset.
    pub(crate) dataset: Utf8PathBuf,
    /// Target subject (or item, when transposed).
    pub(crate) subject: String,
    /// Maximum number of entries to print.
    pub(crate) limit: usize,
    /// Similarity metric used to weigh neighbours.
    pub(crate) metric: Metric,
    /// Whether to rank the item-major view of the dataset.
    pub(crate) transpose: bool,
}

/// Environment variables reported when a required option is missing.
struct RequiredEnv {
    dataset: &'static str,
    subject: &'static str,
}

impl RankConfig {
    fn resolve(
        dataset_path: Option<Utf8PathBuf>,
        subject_id: Option<String>,
        limit: Option<usize>,
        metric_name: Option<&str>,
        transpose: bool,
        env: &RequiredEnv,
    ) -> Result<Self, CliError> {
        let dataset = dataset_path.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: env.dataset,
        })?;
        let subject = subject_id.ok_or(CliError::MissingArgument {
            field: ARG_SUBJECT,
            env: env.subject,
        })?;
        let metric = metric_name
            .map(str::parse::<Metric>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            dataset,
            subject,
            limit: limit.unwrap_or(DEFAULT_LIMIT),
            metric,
            transpose,
        })
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.dataset, ARG_DATASET)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<MatchesArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: MatchesArgs) -> Result<Self, Self::Error> {
        Self::resolve(
            args.dataset,
            args.subject,
            args.limit,
            args.metric.as_deref(),
            args.transpose,
            &RequiredEnv {
                dataset: ENV_MATCHES_DATASET,
                subject: ENV_MATCHES_SUBJECT,
            },
        )
    }
}

impl TryFrom<RecommendArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        Self::resolve(
            args.dataset,
            args.subject,
            args.limit,
            args.metric.as_deref(),
            args.transpose,
            &RequiredEnv {
                dataset: ENV_RECOMMEND_DATASET,
                subject: ENV_RECOMMEND_SUBJECT,
            },
        )
    }
}

/// Load the dataset named by `config`, rank it, and write the ranking as
/// pretty-printed JSON.
pub(crate) fn run_rank(
    config: &RankConfig,
    mode: RankMode,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    config.validate_sources()?;
    let prefs = load_dataset(&config.dataset)?;
    let ranking = if config.transpose {
        rank(&prefs.transpose(), config, mode)?
    } else {
        rank(&prefs, config, mode)?
    };
    write_ranking(writer, &ranking)
}

fn load_dataset(path: &Utf8Path) -> Result<Preferences, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenDataset {
        path: path.to_path_buf(),
        source,
    })?;
    let prefs: Preferences = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        CliError::ParseDataset {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!("loaded {} subjects from {path}", prefs.len());
    Ok(prefs)
}

fn rank(
    prefs: &Preferences,
    config: &RankConfig,
    mode: RankMode,
) -> Result<Vec<Scored<String>>, CliError> {
    let ranking = match mode {
        RankMode::Subjects => {
            prefs.top_subject_matches(&config.subject, config.limit, config.metric)?
        }
        RankMode::Items => prefs.top_item_matches(&config.subject, config.limit, config.metric)?,
    };
    Ok(ranking.into_iter().map(Scored::cloned).collect())
}

fn write_ranking(writer: &mut dyn Write, ranking: &[Scored<String>]) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(ranking).map_err(CliError::SerializeRanking)?;
    writer
        .write_all(json.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
