//! Raw edge records and the time-of-day categories they carry.
//!
//! An [`EdgeRecord`] is the unvalidated ingestion value produced by data
//! collaborators (CSV files, synthetic generators, benchmark converters).
//! Validation happens once, when the record is turned into
//! [`EdgeAttributes`](crate::EdgeAttributes) by the graph builder.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Coarse time-of-day category used as prediction context.
///
/// # Examples
/// ```
/// use courier_core::TimeOfDay;
///
/// assert_eq!("Evening".parse::<TimeOfDay>(), Ok(TimeOfDay::Evening));
/// assert_eq!(TimeOfDay::Night.to_string(), "night");
/// assert_eq!(TimeOfDay::default(), TimeOfDay::Afternoon);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeOfDay {
    /// Morning rush.
    Morning,
    /// Daytime traffic; the default prediction context.
    #[default]
    Afternoon,
    /// Evening rush.
    Evening,
    /// Night-time traffic.
    Night,
}

impl TimeOfDay {
    /// Every category in canonical order.
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];

    /// Return the category as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a [`TimeOfDay`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time of day '{0}'")]
pub struct ParseTimeOfDayError(pub String);

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            _ => Err(ParseTimeOfDayError(s.to_owned())),
        }
    }
}

/// One directed link as supplied by a data source.
///
/// Field names follow the tabular ingestion format, so the record
/// deserialises directly from a CSV row when the `serde` feature is enabled.
/// `fuel_cost_per_km` may be absent; the cost aggregator then falls back to
/// [`DEFAULT_FUEL_COST_PER_KM`](crate::DEFAULT_FUEL_COST_PER_KM).
///
/// # Examples
/// ```
/// use courier_core::EdgeRecord;
///
/// let record = EdgeRecord::new("Depot", "Harbour", 12.5, "morning")
///     .with_traffic_factor(1.4)
///     .with_fuel_cost_per_km(0.2);
/// assert_eq!(record.start_location, "Depot");
/// assert_eq!(record.fuel_cost_per_km, Some(0.2));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeRecord {
    /// Name of the origin location.
    pub start_location: String,
    /// Name of the destination location.
    pub end_location: String,
    /// Link length in kilometres.
    pub distance_km: f64,
    /// Delivery demand attached to the link.
    pub delivery_demand: f64,
    /// Fuel cost per kilometre, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fuel_cost_per_km: Option<f64>,
    /// Multiplier applied to free-flow travel time.
    pub traffic_factor: f64,
    /// Time-of-day category as free text.
    pub time_of_day: String,
}

impl EdgeRecord {
    /// Construct a record with neutral demand, traffic factor `1.0` and no
    /// fuel cost.
    #[must_use]
    pub fn new(
        start_location: impl Into<String>,
        end_location: impl Into<String>,
        distance_km: f64,
        time_of_day: impl Into<String>,
    ) -> Self {
        Self {
            start_location: start_location.into(),
            end_location: end_location.into(),
            distance_km,
            delivery_demand: 0.0,
            fuel_cost_per_km: None,
            traffic_factor: 1.0,
            time_of_day: time_of_day.into(),
        }
    }

    /// Set the delivery demand.
    #[must_use]
    pub const fn with_delivery_demand(mut self, delivery_demand: f64) -> Self {
        self.delivery_demand = delivery_demand;
        self
    }

    /// Set the traffic factor.
    #[must_use]
    pub const fn with_traffic_factor(mut self, traffic_factor: f64) -> Self {
        self.traffic_factor = traffic_factor;
        self
    }

    /// Set the fuel cost per kilometre.
    #[must_use]
    pub const fn with_fuel_cost_per_km(mut self, fuel_cost_per_km: f64) -> Self {
        self.fuel_cost_per_km = Some(fuel_cost_per_km);
        self
    }
}
