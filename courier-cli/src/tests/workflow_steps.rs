//! Behavioural coverage for the generate, train and route workflow.

use super::helpers::{Workspace, invoke, write_utf8};
use super::*;
use camino::Utf8Path;
use courier_core::SearchError;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

struct WorkflowWorld {
    workspace: RefCell<Option<Workspace>>,
    report: RefCell<Option<serde_json::Value>>,
    error: RefCell<Option<CliError>>,
}

impl WorkflowWorld {
    fn path(&self, relative: &str) -> String {
        self.workspace
            .borrow()
            .as_ref()
            .expect("workspace should be initialised")
            .path(relative)
            .into_string()
    }

    fn record(&self, outcome: Result<serde_json::Value, CliError>) {
        match outcome {
            Ok(report) => {
                self.report.replace(Some(report));
                self.error.replace(None);
            }
            Err(err) => {
                self.report.replace(None);
                self.error.replace(Some(err));
            }
        }
    }

    fn report(&self) -> serde_json::Value {
        if let Some(err) = self.error.borrow().as_ref() {
            panic!("command failed: {err}");
        }
        self.report.borrow().clone().expect("a command should have run")
    }

    fn take_error(&self) -> CliError {
        self.error.take().expect("the command should have failed")
    }
}

#[fixture]
fn workflow_world() -> WorkflowWorld {
    WorkflowWorld {
        workspace: RefCell::new(None),
        report: RefCell::new(None),
        error: RefCell::new(None),
    }
}

#[given("an empty workspace")]
fn empty_workspace(#[from(workflow_world)] world: &WorkflowWorld) {
    world.workspace.replace(Some(Workspace::new()));
}

#[given("a Solomon benchmark with {customers} customers in {dir}")]
fn solomon_benchmark(#[from(workflow_world)] world: &WorkflowWorld, customers: u32, dir: String) {
    let mut text = String::from(
        "C101\n\nCUSTOMER\nCUST NO.  XCOORD.  YCOORD.  DEMAND  READY TIME  DUE DATE  SERVICE TIME\n\n",
    );
    for id in 0..customers {
        let x = 10 * id;
        let y = 40 + 3 * id;
        text.push_str(&format!("{id} {x} {y} 10 0 1000 90\n"));
    }
    let path = world.path(&format!("{}/c101.txt", dir.trim_matches('"')));
    write_utf8(Utf8Path::new(&path), text.as_bytes());
}

#[when("I ingest the {dir} directory")]
fn ingest_directory(#[from(workflow_world)] world: &WorkflowWorld, dir: String) {
    let dataset_dir = world.path(dir.trim_matches('"'));
    let output = world.path("data/records.csv");
    world.record(invoke(&[
        "ingest",
        "--dataset-dir",
        &dataset_dir,
        "--output",
        &output,
    ]));
}

#[then("{count} edge records are written")]
fn records_written(#[from(workflow_world)] world: &WorkflowWorld, count: usize) {
    let report = world.report();
    assert_eq!(report["records"].as_u64(), u64::try_from(count).ok());
    let records = courier_data::read_edge_records(Utf8Path::new(&world.path("data/records.csv")))
        .expect("written records load");
    assert_eq!(records.len(), count);
    assert!(records.iter().all(|r| r.start_location != r.end_location));
}

#[when("I generate {records} records over {locations} locations")]
fn generate_dataset(
    #[from(workflow_world)] world: &WorkflowWorld,
    records: usize,
    locations: usize,
) {
    let output = world.path("data/records.csv");
    let record_count = records.to_string();
    let location_count = locations.to_string();
    world.record(invoke(&[
        "generate",
        "--output",
        &output,
        "--records",
        &record_count,
        "--locations",
        &location_count,
    ]));
    let report = world.report();
    assert_eq!(report["records"].as_u64(), u64::try_from(records).ok());
}

#[when("I train a model on the generated records")]
fn train_model(#[from(workflow_world)] world: &WorkflowWorld) {
    let records = world.path("data/records.csv");
    let model = world.path("models/travel_time.bin");
    world.record(invoke(&["train", "--records", &records, "--model", &model]));
    let report = world.report();
    assert!(report["mae"].as_f64().expect("mae is numeric") < 1.0);
}

#[when("I train without naming a model file")]
fn train_without_model(#[from(workflow_world)] world: &WorkflowWorld) {
    let records = world.path("data/records.csv");
    world.record(invoke(&["train", "--records", &records]));
}

#[when("I compare routes from {from} to {to} in the {time_of_day}")]
fn compare(
    #[from(workflow_world)] world: &WorkflowWorld,
    from: String,
    to: String,
    time_of_day: String,
) {
    let records = world.path("data/records.csv");
    let model = world.path("models/travel_time.bin");
    world.record(invoke(&[
        "route",
        "--records",
        &records,
        "--model",
        &model,
        "--from",
        from.trim_matches('"'),
        "--to",
        to.trim_matches('"'),
        "--time-of-day",
        time_of_day.trim_matches('"'),
    ]));
}

#[then("both routes start at {from} and end at {to}")]
fn routes_connect(#[from(workflow_world)] world: &WorkflowWorld, from: String, to: String) {
    let report = world.report();
    for key in ["optimized_path", "baseline_path"] {
        let path: Vec<String> =
            serde_json::from_value(report[key].clone()).expect("route should exist");
        assert_eq!(path.first().map(String::as_str), Some(from.trim_matches('"')));
        assert_eq!(path.last().map(String::as_str), Some(to.trim_matches('"')));
    }
}

#[then("the optimised route is no slower than the baseline route")]
fn optimised_not_slower(#[from(workflow_world)] world: &WorkflowWorld) {
    let report = world.report();
    let optimized = report["optimized_time"].as_f64().expect("optimised time");
    let baseline = report["baseline_time"].as_f64().expect("baseline time");
    assert!(
        optimized <= baseline + 0.05,
        "optimised {optimized} exceeds baseline {baseline}"
    );
}

#[then("the command fails because {name} is not in the graph")]
fn fails_for_unknown_node(#[from(workflow_world)] world: &WorkflowWorld, name: String) {
    match world.take_error() {
        CliError::Route(SearchError::UnknownNode { name: missing }) => {
            assert_eq!(missing, name.trim_matches('"'));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[then("the command reports the missing {field} argument")]
fn reports_missing_argument(#[from(workflow_world)] world: &WorkflowWorld, field: String) {
    match world.take_error() {
        CliError::MissingArgument { field: missing, env } => {
            assert_eq!(missing, field.trim_matches('"'));
            assert_eq!(env, ENV_TRAIN_MODEL);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[scenario(path = "tests/features/workflow.feature", index = 0)]
fn full_workflow(#[from(workflow_world)] world: WorkflowWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/workflow.feature", index = 1)]
fn unknown_location(#[from(workflow_world)] world: WorkflowWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/workflow.feature", index = 2)]
fn missing_model_path(#[from(workflow_world)] world: WorkflowWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/workflow.feature", index = 3)]
fn solomon_ingest(#[from(workflow_world)] world: WorkflowWorld) {
    let _ = world;
}
