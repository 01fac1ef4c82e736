//! Behaviour tests for the admin command line.
//!
//! Each step parses a command the way the binary does and runs it against a
//! store opened from a temporary data directory, so state carries between
//! steps only through the snapshot files.

use std::cell::RefCell;
use std::path::PathBuf;

use clap::Parser;
use rbac_admin::inbound::cli::{Cli, open_store, run};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

struct CliWorld {
    temp: RefCell<Option<TempDir>>,
    outcome: RefCell<Option<Result<Vec<String>, String>>>,
}

impl CliWorld {
    fn new() -> Self {
        Self {
            temp: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    fn data_dir(&self) -> PathBuf {
        self.temp
            .borrow()
            .as_ref()
            .expect("data directory should exist")
            .path()
            .join("rbac-data")
    }

    fn execute(&self, command_line: &str) {
        let args = std::iter::once("rbac-admin").chain(command_line.split_whitespace());
        let cli = Cli::try_parse_from(args).expect("command line should parse");
        let result = open_store(self.data_dir())
            .and_then(|mut store| run(cli.command, &mut store))
            .map_err(|err| err.to_string());
        *self.outcome.borrow_mut() = Some(result);
    }

    fn outcome(&self) -> Result<Vec<String>, String> {
        self.outcome
            .borrow()
            .clone()
            .expect("a command should have run")
    }
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

#[fixture]
fn world() -> CliWorld {
    CliWorld::new()
}

#[given("an empty data directory")]
fn an_empty_data_directory(world: &CliWorld) {
    let temp = TempDir::new().expect("create temp dir");
    *world.temp.borrow_mut() = Some(temp);
}

#[when("the command {command_line} runs")]
fn the_command_runs(world: &CliWorld, command_line: String) {
    world.execute(unquote(&command_line));
}

#[then("the command succeeds")]
fn the_command_succeeds(world: &CliWorld) {
    world.outcome().expect("command should succeed");
}

#[then("the output starts with {prefix}")]
fn the_output_starts_with(world: &CliWorld, prefix: String) {
    let lines = world.outcome().expect("command should succeed");
    let first = lines.first().expect("command should print something");
    assert!(first.starts_with(unquote(&prefix)), "unexpected output: {first}");
}

#[then("the output has {count} lines")]
fn the_output_has_lines(world: &CliWorld, count: usize) {
    let lines = world.outcome().expect("command should succeed");
    assert_eq!(lines.len(), count, "unexpected output: {lines:?}");
}

#[then("the command fails with {message}")]
fn the_command_fails_with(world: &CliWorld, message: String) {
    let err = world.outcome().expect_err("command should fail");
    assert_eq!(err, unquote(&message));
}

#[then("the data directory holds users.json and roles.json")]
fn the_data_directory_holds_snapshots(world: &CliWorld) {
    let dir = world.data_dir();
    assert!(dir.join("users.json").is_file());
    assert!(dir.join("roles.json").is_file());
}

#[then("the data directory holds no snapshots")]
fn the_data_directory_holds_no_snapshots(world: &CliWorld) {
    let dir = world.data_dir();
    assert!(!dir.join("users.json").exists());
    assert!(!dir.join("roles.json").exists());
}

#[scenario(path = "tests/features/admin_cli.feature")]
fn admin_cli_scenarios(world: CliWorld) {
    drop(world);
}
