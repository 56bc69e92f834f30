//! Command-line interface for ranking Concord ratings datasets.
//!
//! The CLI loads a JSON dataset of the form `{subject: {item: score}}` and
//! prints rankings as JSON:
//!
//! - `concord matches <dataset> --subject <id>` ranks similar subjects;
//! - `concord recommend <dataset> --subject <id>` ranks predicted scores for
//!   the items the subject has not rated.
//!
//! Options can come from CLI flags, configuration files, or environment
//! variables prefixed with `CONCORD_CMDS_<SUBCOMMAND>_`.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod rank;

pub use error::CliError;

use rank::{MatchesArgs, RankMode, RecommendArgs};

pub(crate) const ARG_DATASET: &str = "dataset";
pub(crate) const ARG_SUBJECT: &str = "subject";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_METRIC: &str = "metric";
pub(crate) const ARG_TRANSPOSE: &str = "transpose";
pub(crate) const ENV_MATCHES_DATASET: &str = "CONCORD_CMDS_MATCHES_DATASET";
pub(crate) const ENV_MATCHES_SUBJECT: &str = "CONCORD_CMDS_MATCHES_SUBJECT";
pub(crate) const ENV_RECOMMEND_DATASET: &str = "CONCORD_CMDS_RECOMMEND_DATASET";
pub(crate) const ENV_RECOMMEND_SUBJECT: &str = "CONCORD_CMDS_RECOMMEND_SUBJECT";

/// Run the Concord CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// dataset cannot be loaded, ranking fails, or the output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Matches(args) => {
            let config = args.into_config()?;
            rank::run_rank(&config, RankMode::Subjects, &mut stdout)
        }
        Command::Recommend(args) => {
            let config = args.into_config()?;
            rank::run_rank(&config, RankMode::Items, &mut stdout)
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "concord",
    about = "Rank similar subjects and recommend items from sparse ratings",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the subjects most similar to a subject.
    Matches(MatchesArgs),
    /// Recommend unrated items for a subject.
    Recommend(RecommendArgs),
}

#[cfg(test)]
mod tests;
