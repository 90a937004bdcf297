//! Baseline and optimised route planning.
//!
//! Both operations run the same [`shortest_path`] traversal with a different
//! [`EdgeWeight`]:
//!
//! - the **baseline** minimises raw distance and then reports a derived
//!   travel time of `distance_km × traffic_factor` summed over the path;
//! - the **optimised** route minimises the minutes estimated by a
//!   [`TravelTimePredictor`] under a caller-chosen time of day.

use crate::graph::{EdgeRef, RouteGraph};
use crate::search::{EdgeWeight, SearchContext, SearchError, ShortestPath, shortest_path};
use crate::{PredictionError, TimeOfDay, TravelFeatures, TravelTimePredictor};

/// Weight an edge by its length in kilometres.
#[derive(Debug, Default, Clone, Copy)]
pub struct DistanceWeight;

impl EdgeWeight for DistanceWeight {
    fn weight(&self, edge: EdgeRef<'_>, _context: &SearchContext) -> Result<f64, PredictionError> {
        Ok(edge.attributes.distance_km)
    }
}

/// Weight an edge by the minutes a predictor estimates for it.
#[derive(Debug, Clone, Copy)]
pub struct PredictedTimeWeight<P> {
    predictor: P,
}

impl<P> PredictedTimeWeight<P> {
    /// Weigh edges with `predictor`.
    pub const fn new(predictor: P) -> Self {
        Self { predictor }
    }
}

impl<P> EdgeWeight for PredictedTimeWeight<P>
where
    P: TravelTimePredictor,
{
    fn weight(&self, edge: EdgeRef<'_>, context: &SearchContext) -> Result<f64, PredictionError> {
        self.predictor.predict(&TravelFeatures::for_edge(
            edge.attributes,
            context.time_of_day,
        ))
    }
}

/// A planned route and its travel-time estimate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedRoute {
    /// Location names from start to end, inclusive.
    pub path: Vec<String>,
    /// Reported travel time in minutes.
    pub travel_minutes: f64,
    /// Total weight minimised by the search: kilometres for the baseline,
    /// predicted minutes for the optimised route.
    pub search_weight: f64,
}

/// Shortest route by distance, reported with its derived travel time.
///
/// `travel_minutes` comes from [`baseline_travel_minutes`] and is generally
/// not equal to `search_weight`, which is the path length in kilometres.
///
/// # Errors
/// Returns [`SearchError::UnknownNode`] when `start` or `end` is missing.
///
/// # Examples
/// ```
/// use courier_core::{EdgeRecord, build_graph, find_baseline_route};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let graph = build_graph([
///     EdgeRecord::new("A", "B", 100.0, "morning").with_traffic_factor(1.5),
/// ])?;
/// let route = find_baseline_route(&graph, "A", "B")?.expect("B is reachable");
/// assert_eq!(route.path, ["A", "B"]);
/// assert_eq!(route.search_weight, 100.0);
/// assert_eq!(route.travel_minutes, 150.0);
/// # Ok(())
/// # }
/// ```
pub fn find_baseline_route(
    graph: &RouteGraph,
    start: &str,
    end: &str,
) -> Result<Option<PlannedRoute>, SearchError> {
    let found = shortest_path(graph, start, end, &DistanceWeight, &SearchContext::default())?;
    Ok(found.map(|ShortestPath { nodes, total_weight }| PlannedRoute {
        travel_minutes: baseline_travel_minutes(graph, &nodes),
        path: nodes,
        search_weight: total_weight,
    }))
}

/// Fastest route according to `predictor` at `time_of_day`.
///
/// The predictor is consulted once per examined edge with the same
/// `time_of_day` for every edge; wrap it in
/// [`MemoizedPredictor`](crate::MemoizedPredictor) to share estimates across
/// calls. `travel_minutes` equals `search_weight`.
///
/// # Errors
/// - [`SearchError::UnknownNode`] when `start` or `end` is missing.
/// - [`SearchError::Prediction`] when the predictor fails.
/// - [`SearchError::InvalidWeight`] when it returns a negative or
///   non-finite estimate.
pub fn find_optimized_route<P>(
    graph: &RouteGraph,
    predictor: &P,
    start: &str,
    end: &str,
    time_of_day: TimeOfDay,
) -> Result<Option<PlannedRoute>, SearchError>
where
    P: TravelTimePredictor + ?Sized,
{
    let weight = PredictedTimeWeight::new(predictor);
    let found = shortest_path(graph, start, end, &weight, &SearchContext::new(time_of_day))?;
    Ok(found.map(|ShortestPath { nodes, total_weight }| PlannedRoute {
        path: nodes,
        travel_minutes: total_weight,
        search_weight: total_weight,
    }))
}

/// Derived baseline travel time of `path`: `distance_km × traffic_factor`
/// summed over its edges.
///
/// Pairs without a stored edge contribute nothing; paths returned by the
/// searches never contain such pairs.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "derived time scales distance by the traffic factor"
)]
pub fn baseline_travel_minutes<S>(graph: &RouteGraph, path: &[S]) -> f64
where
    S: AsRef<str>,
{
    path.windows(2)
        .filter_map(|pair| match pair {
            [from, to] => graph.edge(from.as_ref(), to.as_ref()),
            _ => None,
        })
        .map(|edge| edge.distance_km * edge.traffic_factor)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_graph;
    use crate::test_support::{
        CountingPredictor, DistanceTablePredictor, FailingPredictor, TrafficTimePredictor, record,
    };
    use rstest::{fixture, rstest};

    #[fixture]
    fn triangle() -> RouteGraph {
        build_graph([
            record("A", "B", 100.0, 1.0),
            record("B", "C", 100.0, 1.0),
            record("A", "C", 300.0, 1.0),
        ])
        .expect("valid records")
    }

    #[rstest]
    fn baseline_prefers_shorter_distance(triangle: RouteGraph) {
        let route = find_baseline_route(&triangle, "A", "C")
            .expect("search succeeds")
            .expect("C is reachable");
        assert_eq!(route.path, ["A", "B", "C"]);
        assert_eq!(route.search_weight, 200.0);
        assert_eq!(route.travel_minutes, 200.0);
    }

    #[rstest]
    fn optimised_route_follows_the_predictor(triangle: RouteGraph) {
        let predictor = DistanceTablePredictor::new([(300.0, 50.0), (100.0, 80.0)]);
        let route =
            find_optimized_route(&triangle, &predictor, "A", "C", TimeOfDay::Afternoon)
                .expect("search succeeds")
                .expect("C is reachable");
        assert_eq!(route.path, ["A", "C"]);
        assert_eq!(route.travel_minutes, 50.0);
        assert_eq!(route.search_weight, 50.0);
    }

    #[rstest]
    fn baseline_time_is_distance_times_traffic() {
        let graph = build_graph([record("A", "B", 37.3, 1.9)]).expect("valid records");
        let route = find_baseline_route(&graph, "A", "B")
            .expect("search succeeds")
            .expect("B is reachable");
        assert_eq!(route.travel_minutes, 37.3 * 1.9);
    }

    #[rstest]
    fn baseline_never_consults_a_predictor(triangle: RouteGraph) {
        let counting = CountingPredictor::new(FailingPredictor);
        let baseline = find_baseline_route(&triangle, "A", "C").expect("search succeeds");
        assert!(baseline.is_some());
        let optimised = find_optimized_route(&triangle, &counting, "A", "C", TimeOfDay::Night);
        assert!(matches!(optimised, Err(SearchError::Prediction { .. })));
        assert_eq!(counting.calls(), 1);
    }

    #[rstest]
    fn both_searches_reject_unknown_nodes(triangle: RouteGraph) {
        let expected = SearchError::UnknownNode {
            name: "Q".to_owned(),
        };
        assert_eq!(
            find_baseline_route(&triangle, "Q", "C").expect_err("unknown start"),
            expected
        );
        assert_eq!(
            find_optimized_route(&triangle, &TrafficTimePredictor, "A", "Q", TimeOfDay::Morning)
                .expect_err("unknown end"),
            expected
        );
    }

    #[rstest]
    fn both_searches_report_missing_routes(triangle: RouteGraph) {
        assert_eq!(find_baseline_route(&triangle, "C", "A"), Ok(None));
        assert_eq!(
            find_optimized_route(&triangle, &TrafficTimePredictor, "C", "A", TimeOfDay::Morning),
            Ok(None)
        );
    }

    #[rstest]
    fn start_equal_to_end_is_a_single_node_route(triangle: RouteGraph) {
        let baseline = find_baseline_route(&triangle, "B", "B")
            .expect("search succeeds")
            .expect("trivial route");
        assert_eq!(baseline.path, ["B"]);
        assert_eq!(baseline.travel_minutes, 0.0);
        let optimised =
            find_optimized_route(&triangle, &FailingPredictor, "B", "B", TimeOfDay::Night)
                .expect("no edge is examined")
                .expect("trivial route");
        assert_eq!(optimised.path, ["B"]);
        assert_eq!(optimised.search_weight, 0.0);
    }

    #[rstest]
    fn derived_time_skips_unknown_pairs(triangle: RouteGraph) {
        assert_eq!(baseline_travel_minutes(&triangle, &["A", "B", "Z"]), 100.0);
        assert_eq!(baseline_travel_minutes::<&str>(&triangle, &[]), 0.0);
    }
}
