//! `route` command: compare the baseline and optimised routes.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use courier_core::{
    PlannedRoute, RouteGraph, SearchError, TimeOfDay, TravelTimePredictor, build_graph,
    find_baseline_route, find_optimized_route, path_cost,
};
use courier_data::read_edge_records;
use courier_predictor::read_model_file;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::write_json;
use crate::paths::require_existing_file;
use crate::{
    ARG_FROM, ARG_MODEL, ARG_RECORDS, ARG_TIME_OF_DAY, ARG_TO, CliError, ENV_ROUTE_FROM,
    ENV_ROUTE_MODEL, ENV_ROUTE_RECORDS, ENV_ROUTE_TO,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Build the road graph from edge records, find the shortest \
                 route by distance and the fastest route by predicted travel \
                 time, and print both with their times, fuel costs and the \
                 savings of the optimised route.",
    about = "Compare the baseline and optimised routes between two locations"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct RouteArgs {
    /// Edge-record CSV describing the road network.
    #[arg(long = ARG_RECORDS, value_name = "path")]
    #[serde(default)]
    pub(crate) records: Option<Utf8PathBuf>,
    /// Model file written by `courier train`.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// Start location.
    #[arg(long = ARG_FROM, value_name = "location")]
    #[serde(default)]
    pub(crate) from: Option<String>,
    /// Destination location.
    #[arg(long = ARG_TO, value_name = "location")]
    #[serde(default)]
    pub(crate) to: Option<String>,
    /// Time of day the trip happens in (default afternoon).
    #[arg(long = ARG_TIME_OF_DAY, value_name = "morning|afternoon|evening|night")]
    #[serde(default)]
    pub(crate) time_of_day: Option<TimeOfDay>,
}

impl RouteArgs {
    fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouteConfig {
    pub(crate) records: Utf8PathBuf,
    pub(crate) model: Utf8PathBuf,
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) time_of_day: TimeOfDay,
}

impl RouteConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing_file(&self.records, ARG_RECORDS)?;
        require_existing_file(&self.model, ARG_MODEL)?;
        Ok(())
    }
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let records = args.records.ok_or(CliError::MissingArgument {
            field: ARG_RECORDS,
            env: ENV_ROUTE_RECORDS,
        })?;
        let model = args.model.ok_or(CliError::MissingArgument {
            field: ARG_MODEL,
            env: ENV_ROUTE_MODEL,
        })?;
        let from = args.from.ok_or(CliError::MissingArgument {
            field: ARG_FROM,
            env: ENV_ROUTE_FROM,
        })?;
        let to = args.to.ok_or(CliError::MissingArgument {
            field: ARG_TO,
            env: ENV_ROUTE_TO,
        })?;
        Ok(Self {
            records,
            model,
            from,
            to,
            time_of_day: args.time_of_day.unwrap_or_default(),
        })
    }
}

/// Side-by-side report of the baseline and optimised routes.
///
/// Times are minutes and costs are fuel currency units, all rounded to two
/// decimals. A route that does not exist is `null`, as are the savings that
/// depend on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteComparison {
    /// Requested start location.
    pub start_node: String,
    /// Requested destination.
    pub end_node: String,
    /// Time of day the optimised route was planned for.
    pub time_of_day: TimeOfDay,
    /// Locations visited by the optimised route.
    pub optimized_path: Option<Vec<String>>,
    /// Locations visited by the baseline route.
    pub baseline_path: Option<Vec<String>>,
    /// Predicted minutes of the optimised route.
    pub optimized_time: Option<f64>,
    /// Derived minutes of the baseline route.
    pub baseline_time: Option<f64>,
    /// Fuel cost of the optimised route.
    pub optimized_cost: Option<f64>,
    /// Fuel cost of the baseline route.
    pub baseline_cost: Option<f64>,
    /// Baseline minutes minus optimised minutes.
    pub time_saved: Option<f64>,
    /// Baseline cost minus optimised cost.
    pub cost_saved: Option<f64>,
    /// Time saved as a percentage of the baseline time; `0` when the
    /// baseline takes no time.
    pub efficiency_gain: Option<f64>,
}

/// Plan both routes from `from` to `to` and compare them.
///
/// # Errors
/// Propagates [`SearchError`] from either search, e.g. for unknown
/// locations or predictor failures.
pub fn compare_routes<P>(
    graph: &RouteGraph,
    predictor: &P,
    from: &str,
    to: &str,
    time_of_day: TimeOfDay,
) -> Result<RouteComparison, SearchError>
where
    P: TravelTimePredictor + ?Sized,
{
    let baseline = find_baseline_route(graph, from, to)?;
    let optimized = find_optimized_route(graph, predictor, from, to, time_of_day)?;
    let cost = |route: &PlannedRoute| path_cost(graph, &route.path);

    let baseline_metrics = baseline.as_ref().map(|r| (r.travel_minutes, cost(r)));
    let optimized_metrics = optimized.as_ref().map(|r| (r.travel_minutes, cost(r)));
    let savings = baseline_metrics.zip(optimized_metrics).map(
        |((base_time, base_cost), (opt_time, opt_cost))| {
            let time_saved = base_time - opt_time;
            let efficiency = if base_time > 0.0 {
                time_saved / base_time * 100.0
            } else {
                0.0
            };
            (time_saved, base_cost - opt_cost, efficiency)
        },
    );

    Ok(RouteComparison {
        start_node: from.to_owned(),
        end_node: to.to_owned(),
        time_of_day,
        optimized_time: optimized_metrics.map(|(time, _)| round2(time)),
        baseline_time: baseline_metrics.map(|(time, _)| round2(time)),
        optimized_cost: optimized_metrics.map(|(_, cost)| round2(cost)),
        baseline_cost: baseline_metrics.map(|(_, cost)| round2(cost)),
        time_saved: savings.map(|(time, _, _)| round2(time)),
        cost_saved: savings.map(|(_, cost, _)| round2(cost)),
        efficiency_gain: savings.map(|(_, _, gain)| round2(gain)),
        optimized_path: optimized.map(|r| r.path),
        baseline_path: baseline.map(|r| r.path),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn run_route(args: RouteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let comparison = execute_route(&config)?;
    write_json(writer, &comparison)
}

pub(crate) fn execute_route(config: &RouteConfig) -> Result<RouteComparison, CliError> {
    let records = read_edge_records(&config.records).map_err(CliError::LoadRecords)?;
    let graph = build_graph(records).map_err(|source| CliError::BuildGraph {
        path: config.records.clone(),
        source,
    })?;
    let model = read_model_file(&config.model)?;
    let comparison = compare_routes(
        &graph,
        &model,
        &config.from,
        &config.to,
        config.time_of_day,
    )?;
    if comparison.optimized_path.is_none() {
        log::warn!("no route from {} to {}", config.from, config.to);
    }
    Ok(comparison)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
