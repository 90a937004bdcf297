//! Solomon VRP benchmark ingestion.
//!
//! A benchmark file describes customers on a plane. The customer table
//! starts on the line after the `CUST NO.` header and holds seven numeric
//! columns per row: id, x, y, demand, ready time, due date and service time.
//! Customers become a complete directed link set whose distances are
//! Euclidean and whose fuel, traffic and time-of-day columns are simulated.

use std::io::Read;

use camino::Utf8Path;
use courier_core::EdgeRecord;
use courier_fs::{list_files_with_extension, open_utf8_file};
use geo::Coord;
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::synthetic::simulated_link;
use crate::{DataError, SolomonError};

const HEADER_MARKER: &str = "CUST NO.";
const COLUMNS: usize = 7;

/// One customer row of a Solomon benchmark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolomonCustomer {
    /// Customer number.
    pub id: u32,
    /// Planar position.
    pub location: Coord<f64>,
    /// Quantity to deliver.
    pub demand: f64,
    /// Earliest service start.
    pub ready_time: f64,
    /// Latest service start.
    pub due_date: f64,
    /// Time spent serving the customer.
    pub service_time: f64,
}

impl SolomonCustomer {
    /// Location name used in generated links.
    #[must_use]
    pub fn name(&self) -> String {
        format!("C_{}", self.id)
    }

    /// Straight-line distance to `other`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "Euclidean distance subtracts coordinates"
    )]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let delta = self.location - other.location;
        delta.x.hypot(delta.y)
    }
}

/// Parse the customer table of a Solomon benchmark.
///
/// The header match ignores case. Blank lines inside the table are skipped.
///
/// # Errors
/// Returns [`SolomonError::MissingHeader`] when no header line exists and
/// [`SolomonError::MalformedRow`] when a row is not seven numbers.
pub fn parse_solomon(text: &str) -> Result<Vec<SolomonCustomer>, SolomonError> {
    let mut lines = text.lines().enumerate();
    lines
        .by_ref()
        .find(|(_, line)| line.to_uppercase().contains(HEADER_MARKER))
        .ok_or(SolomonError::MissingHeader)?;
    lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_row(index.saturating_add(1), line))
        .collect()
}

fn parse_row(line_number: usize, line: &str) -> Result<SolomonCustomer, SolomonError> {
    let malformed = |reason: String| SolomonError::MalformedRow {
        line: line_number,
        reason,
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [id, x, y, demand, ready_time, due_date, service_time] = *fields.as_slice() else {
        return Err(malformed(format!(
            "expected {COLUMNS} columns, found {}",
            fields.len()
        )));
    };
    let number = |field: &str| {
        field
            .parse::<f64>()
            .map_err(|_| malformed(format!("{field:?} is not a number")))
    };
    let customer_id = id
        .parse::<u32>()
        .map_err(|_| malformed(format!("customer number {id:?} is not an integer")))?;
    Ok(SolomonCustomer {
        id: customer_id,
        location: Coord {
            x: number(x)?,
            y: number(y)?,
        },
        demand: number(demand)?,
        ready_time: number(ready_time)?,
        due_date: number(due_date)?,
        service_time: number(service_time)?,
    })
}

/// Link every customer to every other customer in both directions.
///
/// Distances are Euclidean and each link's demand is its destination's. Fuel
/// cost, traffic factor and time of day are drawn from a generator seeded
/// with `seed`, in the same ranges as synthetic datasets.
#[must_use]
pub fn links_from_customers(customers: &[SolomonCustomer], seed: u64) -> Vec<EdgeRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut links = Vec::with_capacity(customers.len().saturating_mul(customers.len()));
    for (i, origin) in customers.iter().enumerate() {
        for (j, destination) in customers.iter().enumerate() {
            if i == j {
                continue;
            }
            let link = simulated_link(
                &mut rng,
                origin.name(),
                destination.name(),
                origin.distance_to(destination),
            )
            .with_delivery_demand(destination.demand);
            links.push(link);
        }
    }
    links
}

/// Load the first `.txt` benchmark (in lexical order) from `dir` and expand
/// it into links.
///
/// # Errors
/// Returns [`DataError::ReadDirectory`] or [`DataError::NoDatasetFiles`] when
/// no benchmark can be found, [`DataError::OpenFile`] or
/// [`DataError::ReadBenchmark`] when it cannot be read, and
/// [`DataError::Solomon`] when it does not parse.
pub fn load_solomon_dir(dir: &Utf8Path, seed: u64) -> Result<Vec<EdgeRecord>, DataError> {
    let files = list_files_with_extension(dir, "txt").map_err(|source| {
        DataError::ReadDirectory {
            path: dir.to_path_buf(),
            source,
        }
    })?;
    let Some((first, rest)) = files.split_first() else {
        return Err(DataError::NoDatasetFiles {
            path: dir.to_path_buf(),
        });
    };
    if !rest.is_empty() {
        warn!("using {first}; ignoring {} further dataset files", rest.len());
    }

    let mut text = String::new();
    open_utf8_file(first)
        .map_err(|source| DataError::OpenFile {
            path: first.clone(),
            source,
        })?
        .read_to_string(&mut text)
        .map_err(|source| DataError::ReadBenchmark {
            path: first.clone(),
            source,
        })?;
    let customers = parse_solomon(&text).map_err(|source| DataError::Solomon {
        path: first.clone(),
        source,
    })?;
    let links = links_from_customers(&customers, seed);
    info!(
        "parsed {} customers from {first} into {} links",
        customers.len(),
        links.len()
    );
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = "C101\n\
        \n\
        VEHICLE\n\
        NUMBER     CAPACITY\n\
          25         200\n\
        \n\
        CUSTOMER\n\
        cust no.  XCOORD.   YCOORD.    DEMAND   READY TIME  DUE DATE   SERVICE   TIME\n\
        \n\
            0      40         50          0          0       1236          0\n\
            1      45         68         10        912        967         90\n\
            2      43         65         20        825        870         90\n";

    #[rstest]
    fn parses_rows_after_a_case_insensitive_header() {
        let customers = parse_solomon(SAMPLE).expect("sample parses");
        assert_eq!(customers.len(), 3);
        let second = customers.get(1).expect("customer 1");
        assert_eq!(second.id, 1);
        assert_eq!(second.location, Coord { x: 45.0, y: 68.0 });
        assert_eq!(second.demand, 10.0);
        assert_eq!(second.ready_time, 912.0);
        assert_eq!(second.due_date, 967.0);
        assert_eq!(second.service_time, 90.0);
    }

    #[rstest]
    fn missing_header_is_reported() {
        assert_eq!(
            parse_solomon("0 40 50 0 0 1236 0\n"),
            Err(SolomonError::MissingHeader)
        );
    }

    #[rstest]
    #[case("CUST NO.\n1 2 3\n", 2)]
    #[case("CUST NO.\n\n1 2 3 4 5 6 x\n", 3)]
    #[case("CUST NO.\n1.5 2 3 4 5 6 7\n", 2)]
    fn malformed_rows_name_their_line(#[case] text: &str, #[case] line: usize) {
        assert!(matches!(
            parse_solomon(text),
            Err(SolomonError::MalformedRow { line: reported, .. }) if reported == line
        ));
    }

    #[rstest]
    fn links_form_a_complete_digraph_without_self_loops() {
        let customers = parse_solomon(SAMPLE).expect("sample parses");
        let links = links_from_customers(&customers, 42);
        assert_eq!(links.len(), 6);
        assert!(links.iter().all(|l| l.start_location != l.end_location));

        let to_c1 = links
            .iter()
            .find(|l| l.start_location == "C_0" && l.end_location == "C_1")
            .expect("C_0 -> C_1 exists");
        assert!((to_c1.distance_km - 5.0_f64.hypot(18.0)).abs() < 1e-12);
        assert_eq!(to_c1.delivery_demand, 10.0);
        assert!(to_c1.fuel_cost_per_km.is_some());
        assert!((1.0..2.5).contains(&to_c1.traffic_factor));
    }

    #[rstest]
    fn links_are_reproducible_for_a_seed() {
        let customers = parse_solomon(SAMPLE).expect("sample parses");
        assert_eq!(
            links_from_customers(&customers, 9),
            links_from_customers(&customers, 9)
        );
    }
}
