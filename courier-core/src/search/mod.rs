//! Generalised Dijkstra search over a [`RouteGraph`].
//!
//! The traversal is written once and parameterised by an [`EdgeWeight`]
//! strategy. The baseline and optimised route operations in
//! [`crate::routes`] are the two instantiations used by callers, but any
//! weight function with finite, non-negative output can be plugged in.
//!
//! The search runs once per query and returns the path together with its
//! total weight. The graph is only read, so a caller may abandon a search
//! between relaxations without leaving anything behind.

mod error;

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::debug;

pub use error::SearchError;

use crate::graph::{EdgeRef, NodeId, RouteGraph};
use crate::{PredictionError, TimeOfDay};

/// Context shared by every weight evaluation within one search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchContext {
    /// Time of day applied uniformly to every edge evaluated.
    pub time_of_day: TimeOfDay,
}

impl SearchContext {
    /// Build a context for `time_of_day`.
    #[must_use]
    pub const fn new(time_of_day: TimeOfDay) -> Self {
        Self { time_of_day }
    }
}

/// Strategy assigning a scalar weight to an edge.
///
/// Implementations must return finite, non-negative weights; anything else
/// aborts the search with [`SearchError::InvalidWeight`]. A failed
/// prediction aborts it with [`SearchError::Prediction`].
///
/// The search calls [`EdgeWeight::weight`] once for every edge it examines
/// and never caches results. Wrap expensive predictors in
/// [`MemoizedPredictor`](crate::MemoizedPredictor) when repeated evaluation
/// matters.
///
/// Closures with the matching signature implement the trait:
///
/// ```
/// use courier_core::{EdgeRecord, PredictionError, SearchContext, build_graph, shortest_path};
/// use courier_core::graph::EdgeRef;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let graph = build_graph([EdgeRecord::new("A", "B", 4.0, "night")])?;
/// let hops = |_: EdgeRef<'_>, _: &SearchContext| -> Result<f64, PredictionError> { Ok(1.0) };
/// let found = shortest_path(&graph, "A", "B", &hops, &SearchContext::default())?
///     .expect("B is reachable");
/// assert_eq!(found.total_weight, 1.0);
/// # Ok(())
/// # }
/// ```
pub trait EdgeWeight {
    /// Weight of traversing `edge` under `context`.
    ///
    /// # Errors
    /// Returns [`PredictionError`] when the weight cannot be computed.
    fn weight(&self, edge: EdgeRef<'_>, context: &SearchContext) -> Result<f64, PredictionError>;
}

impl<F> EdgeWeight for F
where
    F: Fn(EdgeRef<'_>, &SearchContext) -> Result<f64, PredictionError>,
{
    fn weight(&self, edge: EdgeRef<'_>, context: &SearchContext) -> Result<f64, PredictionError> {
        self(edge, context)
    }
}

/// A path found by [`shortest_path`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortestPath {
    /// Location names from source to target, inclusive.
    pub nodes: Vec<String>,
    /// Sum of the weights of the edges on the path.
    pub total_weight: f64,
}

impl ShortestPath {
    /// Number of edges on the path.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Priority-queue entry ordered by distance, then by node identifier.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    distance: f64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// Per-node search labels.
struct Labels {
    distance: Vec<f64>,
    predecessor: Vec<Option<NodeId>>,
    settled: Vec<bool>,
}

impl Labels {
    fn new(node_count: usize, source: NodeId) -> Self {
        let mut distance = vec![f64::INFINITY; node_count];
        if let Some(slot) = distance.get_mut(source.index()) {
            *slot = 0.0;
        }
        Self {
            distance,
            predecessor: vec![None; node_count],
            settled: vec![false; node_count],
        }
    }

    fn distance(&self, node: NodeId) -> f64 {
        self.distance
            .get(node.index())
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    fn is_settled(&self, node: NodeId) -> bool {
        self.settled.get(node.index()).copied().unwrap_or(true)
    }

    fn settle(&mut self, node: NodeId) {
        if let Some(flag) = self.settled.get_mut(node.index()) {
            *flag = true;
        }
    }

    fn improve(&mut self, node: NodeId, distance: f64, via: NodeId) {
        if let Some(slot) = self.distance.get_mut(node.index()) {
            *slot = distance;
        }
        if let Some(slot) = self.predecessor.get_mut(node.index()) {
            *slot = Some(via);
        }
    }

    fn path_to(&self, source: NodeId, target: NodeId) -> Vec<NodeId> {
        let mut path = vec![target];
        let mut current = target;
        while current != source {
            match self.predecessor.get(current.index()).copied().flatten() {
                Some(previous) => {
                    path.push(previous);
                    current = previous;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

/// Find the minimum-weight path from `source` to `target`.
///
/// Returns `Ok(None)` when every node reachable from `source` has been
/// settled without reaching `target`. When `source == target` the result is
/// the single-node path with weight `0`.
///
/// Ties between equally distant frontier nodes are broken by [`NodeId`], so
/// results are reproducible for a fixed graph and a pure weight function.
///
/// # Errors
/// - [`SearchError::UnknownNode`] if either endpoint is not in the graph; no
///   traversal is attempted.
/// - [`SearchError::InvalidWeight`] if `weight` yields a negative or
///   non-finite value.
/// - [`SearchError::WeightOverflow`] if a path weight exceeds `f64::MAX`.
/// - [`SearchError::Prediction`] if `weight` itself fails.
#[expect(
    clippy::float_arithmetic,
    reason = "path weights accumulate edge weights"
)]
pub fn shortest_path<W>(
    graph: &RouteGraph,
    source: &str,
    target: &str,
    weight: &W,
    context: &SearchContext,
) -> Result<Option<ShortestPath>, SearchError>
where
    W: EdgeWeight + ?Sized,
{
    let source_id = resolve(graph, source)?;
    let target_id = resolve(graph, target)?;

    let mut labels = Labels::new(graph.node_count(), source_id);
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse(FrontierEntry {
        distance: 0.0,
        node: source_id,
    }));
    let mut evaluations = 0_usize;

    while let Some(Reverse(FrontierEntry { distance, node })) = frontier.pop() {
        if labels.is_settled(node) {
            continue;
        }
        labels.settle(node);
        if node == target_id {
            debug!(
                "search {source} -> {target} settled target after {evaluations} weight evaluations"
            );
            return Ok(Some(ShortestPath {
                nodes: names(graph, &labels.path_to(source_id, target_id)),
                total_weight: distance,
            }));
        }
        for edge in graph.edges_from(node) {
            if labels.is_settled(edge.to) {
                continue;
            }
            let edge_weight = evaluate(graph, weight, edge, context)?;
            evaluations += 1;
            let candidate = distance + edge_weight;
            if !candidate.is_finite() {
                return Err(SearchError::WeightOverflow {
                    from: name_of(graph, edge.from),
                    to: name_of(graph, edge.to),
                });
            }
            if candidate < labels.distance(edge.to) {
                labels.improve(edge.to, candidate, node);
                frontier.push(Reverse(FrontierEntry {
                    distance: candidate,
                    node: edge.to,
                }));
            }
        }
    }

    debug!("search {source} -> {target} exhausted after {evaluations} weight evaluations");
    Ok(None)
}

fn resolve(graph: &RouteGraph, name: &str) -> Result<NodeId, SearchError> {
    graph.node_id(name).ok_or_else(|| SearchError::UnknownNode {
        name: name.to_owned(),
    })
}

fn evaluate<W>(
    graph: &RouteGraph,
    weight: &W,
    edge: EdgeRef<'_>,
    context: &SearchContext,
) -> Result<f64, SearchError>
where
    W: EdgeWeight + ?Sized,
{
    let value = weight
        .weight(edge, context)
        .map_err(|source| SearchError::Prediction {
            from: name_of(graph, edge.from),
            to: name_of(graph, edge.to),
            source,
        })?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SearchError::InvalidWeight {
            from: name_of(graph, edge.from),
            to: name_of(graph, edge.to),
            weight: value,
        })
    }
}

fn name_of(graph: &RouteGraph, id: NodeId) -> String {
    graph.node_name(id).unwrap_or_default().to_owned()
}

fn names(graph: &RouteGraph, ids: &[NodeId]) -> Vec<String> {
    ids.iter().map(|id| name_of(graph, *id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EdgeRecord, build_graph};
    use rstest::{fixture, rstest};
    use std::cell::Cell;

    fn by_distance(edge: EdgeRef<'_>, _: &SearchContext) -> Result<f64, PredictionError> {
        Ok(edge.attributes.distance_km)
    }

    #[fixture]
    fn diamond() -> RouteGraph {
        build_graph([
            EdgeRecord::new("A", "B", 1.0, "morning"),
            EdgeRecord::new("A", "C", 1.0, "morning"),
            EdgeRecord::new("B", "D", 1.0, "morning"),
            EdgeRecord::new("C", "D", 1.0, "morning"),
            EdgeRecord::new("D", "E", 3.0, "morning"),
        ])
        .expect("valid records")
    }

    #[rstest]
    fn ties_are_broken_by_node_identity(diamond: RouteGraph) {
        let found = shortest_path(&diamond, "A", "D", &by_distance, &SearchContext::default())
            .expect("search succeeds")
            .expect("D is reachable");
        assert_eq!(found.nodes, ["A", "B", "D"]);
        assert_eq!(found.total_weight, 2.0);
        assert_eq!(found.hop_count(), 2);
    }

    #[rstest]
    fn source_equal_to_target_yields_single_node(diamond: RouteGraph) {
        let found = shortest_path(&diamond, "C", "C", &by_distance, &SearchContext::default())
            .expect("search succeeds")
            .expect("trivial path");
        assert_eq!(found.nodes, ["C"]);
        assert_eq!(found.total_weight, 0.0);
        assert_eq!(found.hop_count(), 0);
    }

    #[rstest]
    fn unreachable_target_is_not_an_error(diamond: RouteGraph) {
        let found = shortest_path(&diamond, "E", "A", &by_distance, &SearchContext::default())
            .expect("search succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[case("Z", "A")]
    #[case("A", "Z")]
    fn unknown_endpoints_fail_before_traversal(
        diamond: RouteGraph,
        #[case] from: &str,
        #[case] to: &str,
    ) {
        let calls = Cell::new(0_u32);
        let counting = |edge: EdgeRef<'_>, _: &SearchContext| -> Result<f64, PredictionError> {
            calls.set(calls.get() + 1);
            Ok(edge.attributes.distance_km)
        };
        let err = shortest_path(&diamond, from, to, &counting, &SearchContext::default())
            .expect_err("unknown node");
        assert_eq!(
            err,
            SearchError::UnknownNode {
                name: "Z".to_owned()
            }
        );
        assert_eq!(calls.get(), 0);
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn invalid_weights_abort_the_search(diamond: RouteGraph, #[case] bad: f64) {
        let broken =
            move |_: EdgeRef<'_>, _: &SearchContext| -> Result<f64, PredictionError> { Ok(bad) };
        let err = shortest_path(&diamond, "A", "E", &broken, &SearchContext::default())
            .expect_err("invalid weight");
        assert!(matches!(err, SearchError::InvalidWeight { ref from, .. } if from == "A"));
    }

    #[rstest]
    fn overflowing_path_weights_are_errors_not_missing_routes() {
        let graph = build_graph([
            EdgeRecord::new("A", "B", 1e308, "morning"),
            EdgeRecord::new("B", "C", 1e308, "morning"),
        ])
        .expect("valid records");
        let err = shortest_path(&graph, "A", "C", &by_distance, &SearchContext::default())
            .expect_err("path weight overflows");
        assert_eq!(
            err,
            SearchError::WeightOverflow {
                from: "B".to_owned(),
                to: "C".to_owned()
            }
        );
    }

    #[rstest]
    fn prediction_failures_abort_the_search(diamond: RouteGraph) {
        let failing = |_: EdgeRef<'_>, _: &SearchContext| -> Result<f64, PredictionError> {
            Err(PredictionError::Model {
                message: "offline".to_owned(),
            })
        };
        let err = shortest_path(&diamond, "A", "E", &failing, &SearchContext::default())
            .expect_err("prediction failed");
        assert!(matches!(err, SearchError::Prediction { .. }));
    }

    #[rstest]
    fn each_examined_edge_is_weighed_once(diamond: RouteGraph) {
        let calls = Cell::new(0_u32);
        let counting = |edge: EdgeRef<'_>, _: &SearchContext| -> Result<f64, PredictionError> {
            calls.set(calls.get() + 1);
            Ok(edge.attributes.distance_km)
        };
        shortest_path(&diamond, "A", "E", &counting, &SearchContext::default())
            .expect("search succeeds")
            .expect("E is reachable");
        // D is still open when C settles, so C->D is weighed as well.
        assert_eq!(calls.get(), 5);
    }

    #[rstest]
    fn context_reaches_the_weight_function(diamond: RouteGraph) {
        let seen = Cell::new(None);
        let recording =
            |edge: EdgeRef<'_>, context: &SearchContext| -> Result<f64, PredictionError> {
                seen.set(Some(context.time_of_day));
                Ok(edge.attributes.distance_km)
            };
        let context = SearchContext::new(TimeOfDay::Night);
        shortest_path(&diamond, "A", "B", &recording, &context).expect("search succeeds");
        assert_eq!(seen.get(), Some(TimeOfDay::Night));
    }

    #[rstest]
    fn frontier_orders_by_distance_then_node(diamond: RouteGraph) {
        let node = |name: &str| diamond.node_id(name).expect("known node");
        let near = FrontierEntry {
            distance: 1.0,
            node: node("D"),
        };
        let far = FrontierEntry {
            distance: 2.0,
            node: node("A"),
        };
        let tie = FrontierEntry {
            distance: 1.0,
            node: node("B"),
        };
        assert!(near < far);
        assert!(tie < near);
    }
}
