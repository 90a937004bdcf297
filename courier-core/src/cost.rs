//! Fuel cost of a path.

use log::warn;

use crate::graph::RouteGraph;

/// Fuel cost per kilometre assumed for edges recorded without one.
pub const DEFAULT_FUEL_COST_PER_KM: f64 = 0.2;

/// Total fuel cost along `path`: `distance_km × fuel_cost_per_km` summed over
/// consecutive pairs.
///
/// The computation never fails:
/// - paths with fewer than two nodes cost `0`;
/// - edges without a fuel cost use [`DEFAULT_FUEL_COST_PER_KM`];
/// - pairs with no stored edge contribute nothing, since their distance is
///   unknown, and are logged.
///
/// # Examples
/// ```
/// use courier_core::{EdgeRecord, build_graph, path_cost};
///
/// # fn main() -> Result<(), courier_core::GraphBuildError> {
/// let graph = build_graph([
///     EdgeRecord::new("A", "B", 10.0, "morning").with_fuel_cost_per_km(0.25),
///     EdgeRecord::new("B", "C", 10.0, "morning"),
/// ])?;
/// assert_eq!(path_cost(&graph, &["A", "B", "C"]), 2.5 + 2.0);
/// assert_eq!(path_cost(&graph, &["A"]), 0.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "fuel cost multiplies distance by a per-kilometre rate"
)]
pub fn path_cost<S>(graph: &RouteGraph, path: &[S]) -> f64
where
    S: AsRef<str>,
{
    let mut total = 0.0;
    for pair in path.windows(2) {
        let [origin, destination] = pair else { continue };
        let (from, to) = (origin.as_ref(), destination.as_ref());
        match graph.edge(from, to) {
            Some(edge) => {
                let rate = edge.fuel_cost_per_km.unwrap_or(DEFAULT_FUEL_COST_PER_KM);
                total += edge.distance_km * rate;
            }
            None => warn!("path step {from} -> {to} has no edge; costing it at zero"),
        }
    }
    total
}
