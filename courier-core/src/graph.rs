//! Directed road graph built from edge records.
//!
//! Location names are interned into dense [`NodeId`] values in first-seen
//! order. Each ordered pair of nodes stores at most one edge: a later record
//! for the same pair replaces the earlier one. The graph is immutable once
//! built, so it can be shared freely between concurrent searches.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use thiserror::Error;

use crate::{EdgeRecord, TimeOfDay};

/// Dense identifier of a location inside one [`RouteGraph`].
///
/// Identifiers are assigned in the order locations first appear in the input
/// records and double as the search's tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Return the position of the node in the graph's node table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Validated attributes of a stored edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeAttributes {
    /// Link length in kilometres, finite and non-negative.
    pub distance_km: f64,
    /// Delivery demand, finite.
    pub demand: f64,
    /// Traffic multiplier, finite and strictly positive.
    pub traffic_factor: f64,
    /// Fuel cost per kilometre, finite and non-negative when present.
    pub fuel_cost_per_km: Option<f64>,
    /// Time-of-day category recorded with the link.
    pub time_of_day: TimeOfDay,
}

/// Reason a record was rejected by [`build_graph`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordDefect {
    /// A location name was empty.
    #[error("{field} is missing")]
    MissingLocation {
        /// Name of the empty field.
        field: &'static str,
    },
    /// A numeric attribute was NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Value found in the record.
        value: f64,
    },
    /// The distance was negative.
    #[error("distance_km must not be negative, got {0}")]
    NegativeDistance(f64),
    /// The traffic factor was zero or negative.
    #[error("traffic_factor must be positive, got {0}")]
    NonPositiveTraffic(f64),
    /// The fuel cost was negative.
    #[error("fuel_cost_per_km must not be negative, got {0}")]
    NegativeFuelCost(f64),
    /// The time-of-day text did not name a known category.
    #[error("unrecognised time_of_day '{0}'")]
    UnknownTimeOfDay(String),
}

/// Errors returned by [`build_graph`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphBuildError {
    /// A record carried a missing or semantically invalid attribute.
    #[error("record {index} is malformed: {defect}")]
    MalformedRecord {
        /// Zero-based position of the record in the input sequence.
        index: usize,
        /// What was wrong with it.
        #[source]
        defect: RecordDefect,
    },
}

impl EdgeAttributes {
    /// Validate the attribute fields of `record`.
    ///
    /// Location names are not inspected here; see [`build_graph`].
    ///
    /// # Errors
    /// Returns the first [`RecordDefect`] found. Values are never coerced.
    pub fn from_record(record: &EdgeRecord) -> Result<Self, RecordDefect> {
        let distance_km = finite("distance_km", record.distance_km)?;
        if distance_km < 0.0 {
            return Err(RecordDefect::NegativeDistance(distance_km));
        }
        let demand = finite("delivery_demand", record.delivery_demand)?;
        let traffic_factor = finite("traffic_factor", record.traffic_factor)?;
        if traffic_factor <= 0.0 {
            return Err(RecordDefect::NonPositiveTraffic(traffic_factor));
        }
        let fuel_cost_per_km = match record.fuel_cost_per_km {
            Some(raw) => {
                let cost = finite("fuel_cost_per_km", raw)?;
                if cost < 0.0 {
                    return Err(RecordDefect::NegativeFuelCost(cost));
                }
                Some(cost)
            }
            None => None,
        };
        let time_of_day = record
            .time_of_day
            .parse::<TimeOfDay>()
            .map_err(|_| RecordDefect::UnknownTimeOfDay(record.time_of_day.clone()))?;
        Ok(Self {
            distance_km,
            demand,
            traffic_factor,
            fuel_cost_per_km,
            time_of_day,
        })
    }
}

const fn finite(field: &'static str, value: f64) -> Result<f64, RecordDefect> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RecordDefect::NonFinite { field, value })
    }
}

/// Borrowed view of one stored edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRef<'g> {
    /// Origin node.
    pub from: NodeId,
    /// Destination node.
    pub to: NodeId,
    /// Stored attributes.
    pub attributes: &'g EdgeAttributes,
}

/// Directed graph of delivery locations with at most one edge per ordered
/// node pair.
///
/// # Examples
/// ```
/// use courier_core::{EdgeRecord, build_graph};
///
/// # fn main() -> Result<(), courier_core::GraphBuildError> {
/// let graph = build_graph([
///     EdgeRecord::new("A", "B", 10.0, "morning"),
///     EdgeRecord::new("A", "B", 20.0, "night"),
/// ])?;
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.edge("A", "B").map(|e| e.distance_km), Some(20.0));
/// assert!(graph.edge("B", "A").is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    names: Vec<String>,
    ids: HashMap<String, NodeId>,
    outgoing: Vec<BTreeMap<NodeId, EdgeAttributes>>,
}

impl RouteGraph {
    /// Number of distinct locations.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(BTreeMap::len).sum()
    }

    /// Whether `name` appears in the graph.
    #[must_use]
    pub fn contains_node(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Look up the identifier of `name`.
    #[must_use]
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    /// Look up the name behind `id`.
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    /// Location names in identifier order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Attributes of the edge `from → to`, if stored.
    #[must_use]
    pub fn edge(&self, from: &str, to: &str) -> Option<&EdgeAttributes> {
        let from_id = self.node_id(from)?;
        let to_id = self.node_id(to)?;
        self.outgoing.get(from_id.0)?.get(&to_id)
    }

    /// Outgoing edges of `from`, ordered by destination identifier.
    pub fn edges_from(&self, from: NodeId) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.outgoing
            .get(from.0)
            .into_iter()
            .flat_map(move |targets| {
                targets.iter().map(move |(to, attributes)| EdgeRef {
                    from,
                    to: *to,
                    attributes,
                })
            })
    }

    /// Every stored edge, grouped by origin.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        (0..self.names.len()).flat_map(move |index| self.edges_from(NodeId(index)))
    }

    fn intern(&mut self, name: &str) -> NodeId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = NodeId(self.names.len());
        self.names.push(name.to_owned());
        self.ids.insert(name.to_owned(), id);
        self.outgoing.push(BTreeMap::new());
        id
    }

    fn insert(&mut self, from: NodeId, to: NodeId, attributes: EdgeAttributes) -> bool {
        self.outgoing
            .get_mut(from.0)
            .map(|targets| targets.insert(to, attributes).is_some())
            .unwrap_or_default()
    }
}

/// Build a [`RouteGraph`] from records processed in input order.
///
/// A record for an ordered pair that already has an edge replaces it
/// (last write wins). Self-loops are stored as given. The whole build fails
/// on the first malformed record.
///
/// # Errors
/// Returns [`GraphBuildError::MalformedRecord`] when a location name is empty
/// or an attribute fails validation.
pub fn build_graph<I>(records: I) -> Result<RouteGraph, GraphBuildError>
where
    I: IntoIterator<Item = EdgeRecord>,
{
    let mut graph = RouteGraph::default();
    let mut replaced = 0_usize;
    for (index, record) in records.into_iter().enumerate() {
        let malformed = |defect| GraphBuildError::MalformedRecord { index, defect };
        if record.start_location.is_empty() {
            return Err(malformed(RecordDefect::MissingLocation {
                field: "start_location",
            }));
        }
        if record.end_location.is_empty() {
            return Err(malformed(RecordDefect::MissingLocation {
                field: "end_location",
            }));
        }
        let attributes = EdgeAttributes::from_record(&record).map_err(malformed)?;
        let from = graph.intern(&record.start_location);
        let to = graph.intern(&record.end_location);
        if graph.insert(from, to, attributes) {
            debug!(
                "record {index} replaces edge {} -> {}",
                record.start_location, record.end_location
            );
            replaced += 1;
        }
    }
    debug!(
        "built graph with {} nodes and {} edges ({replaced} duplicates overwritten)",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
