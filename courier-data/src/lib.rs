//! Edge-record sources for the Courier engine.
//!
//! The crate feeds [`courier_core::build_graph`] from three places:
//! - CSV files holding one [`EdgeRecord`](courier_core::EdgeRecord) per row
//!   ([`read_edge_records`], [`write_edge_records`]);
//! - seeded synthetic datasets ([`generate_records`]);
//! - Solomon VRP benchmark files, expanded into a complete set of simulated
//!   links between their customers ([`load_solomon_dir`]).
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use courier_data::{SyntheticConfig, generate_records, write_edge_records};
//!
//! let records = generate_records(&SyntheticConfig::default()).expect("valid config");
//! write_edge_records(Utf8Path::new("data/logistics_data.csv"), &records)
//!     .expect("write dataset");
//! ```

#![forbid(unsafe_code)]

mod error;
mod records;
mod solomon;
mod synthetic;

pub use error::{DataError, SolomonError};
pub use records::{CSV_HEADER, read_edge_records, write_edge_records};
pub use solomon::{SolomonCustomer, links_from_customers, load_solomon_dir, parse_solomon};
pub use synthetic::{SyntheticConfig, generate_records, location_name};
