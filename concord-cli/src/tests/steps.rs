//! Behaviour-driven step definitions driving the ranking CLI scenarios.

use super::helpers::{Workspace, parse_ranking};
use super::*;
use crate::rank::run_rank;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug)]
struct RankWorld {
    workspace: Workspace,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RankWorld {
    fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self, command: &str, subject: &str, limit: usize) -> Vec<String> {
        let mut argv = vec![
            "concord".to_owned(),
            command.to_owned(),
            self.workspace.dataset().as_str().to_owned(),
            format!("--{ARG_SUBJECT}"),
            subject.trim_matches('"').to_owned(),
            format!("--{ARG_LIMIT}"),
            limit.to_string(),
        ];
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn run(&self, command: &str, subject: &str, limit: usize) {
        let invocation = self.build_command_line(command, subject, limit);
        let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
        let outcome = parsed.and_then(|cli| {
            let mut buffer = self.stdout.borrow_mut();
            match cli.command {
                Command::Matches(args) => {
                    let config = args.into_config()?;
                    run_rank(&config, RankMode::Subjects, &mut *buffer)
                }
                Command::Recommend(args) => {
                    let config = args.into_config()?;
                    run_rank(&config, RankMode::Items, &mut *buffer)
                }
            }
        });
        self.result.replace(Some(outcome));
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> RankWorld {
    RankWorld::new()
}

#[given("the film critics dataset exists on disk")]
fn critics_dataset_exists(#[from(world)] world: &RankWorld) {
    world.workspace.write_critics();
}

#[given("I rank the dataset by item")]
fn rank_by_item(#[from(world)] world: &RankWorld) {
    world
        .cli_args
        .borrow_mut()
        .push(format!("--{ARG_TRANSPOSE}"));
}

#[given("I choose the {metric} metric")]
fn choose_metric(#[from(world)] world: &RankWorld, metric: String) {
    world.cli_args.borrow_mut().extend([
        format!("--{ARG_METRIC}"),
        metric.trim_matches('"').to_owned(),
    ]);
}

#[when("I run the matches command for {subject} with limit {limit}")]
fn run_matches_command(#[from(world)] world: &RankWorld, subject: String, limit: usize) {
    world.run("matches", &subject, limit);
}

#[when("I run the recommend command for {subject} with limit {limit}")]
fn run_recommend_command(#[from(world)] world: &RankWorld, subject: String, limit: usize) {
    world.run("recommend", &subject, limit);
}

#[then("the command succeeds and prints {expected} first")]
fn command_succeeds_and_prints_first(#[from(world)] world: &RankWorld, expected: String) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let ranking = parse_ranking(&world.stdout.borrow());
    let first = ranking.first().map(|(id, _)| id.as_str());
    assert_eq!(first, Some(expected.trim_matches('"')));
}

#[then("the command fails because the metric is unknown")]
fn command_fails_unknown_metric(#[from(world)] world: &RankWorld) {
    match &*world.error() {
        CliError::InvalidMetric(unknown) => assert_eq!(unknown.name, "cosine"),
        other => panic!("expected InvalidMetric, found {other:?}"),
    }
}

#[then("the command fails because the dataset is missing")]
fn command_fails_missing_dataset(#[from(world)] world: &RankWorld) {
    match &*world.error() {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_DATASET),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

macro_rules! register_rank_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/rank_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RankWorld) {
            let _ = world;
        }
    };
}

register_rank_scenario!(matches_for_toby, "printing the critics closest to Toby");
register_rank_scenario!(recommend_for_toby, "printing film recommendations for Toby");
register_rank_scenario!(matches_for_a_film, "printing films similar to a film");
register_rank_scenario!(unknown_metric, "rejecting an unknown metric");
register_rank_scenario!(missing_dataset, "rejecting a missing dataset");
