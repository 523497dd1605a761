//! # Trace ingestion
//!
//! High-level utilities to **build and extend** a [`TraceSet`] from raw visit
//! records: CSV files, arbitrary byte readers, or records already split in memory.
//!
//! ## Overview
//! -----------------
//! This module exposes the [`TraceFile`] trait implemented for [`TraceSet`].
//! It provides:
//! - Constructors that **create** a new set from a given source (`new_from_*`),
//! - Appenders that **extend** an existing set (`add_from_*`).
//!
//! ## Ordering
//! -----------------
//! After each ingestion, every entity touched by the source is re-sorted by
//! timestamp with a **stable** sort. Observations sharing a timestamp keep their
//! arrival order, so samples already in the set precede newly appended ones.
//!
//! ## Duplicates
//! -----------------
//! - **No deduplication** is performed by any `add_*` method. Ingesting the same
//!   source twice doubles its observations.
//!
//! ## Error semantics
//! -----------------
//! - The whole source is parsed before anything is inserted: on error the target
//!   set is left untouched.
//! - A source without any data record (empty, or headers only) fails with
//!   [`FootprintError::EmptyInput`].
//!
//! ## Example
//! -----------------
//! ```no_run
//! use camino::Utf8Path;
//! use footprint::{TraceFile, TraceSet};
//!
//! # fn demo() -> Result<(), footprint::FootprintError> {
//! let mut traces = TraceSet::new_from_csv(Utf8Path::new("visits_april.csv"))?;
//! traces.add_from_csv(Utf8Path::new("visits_may.csv"))?;
//! # Ok(()) }
//! ```
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};

use ahash::RandomState;
use camino::Utf8Path;
use tracing::debug;

use super::csv_reader::{parse_records, read_csv, RawRecord};
use crate::{
    constants::{EntityId, TraceSet},
    footprint_errors::FootprintError,
    observations::Observation,
};

/// A trait for the TraceSet type definition.
/// This trait provides methods to create a TraceSet from different sources
/// and to add observations to an existing TraceSet from these sources.
///
/// Note
/// ----
/// * Warning: No check is done for duplicated observations for every add method.
///   * The user should be careful to not add the same records or same file twice
pub trait TraceFile {
    /// Create a TraceSet from a CSV file of 7-field visit records.
    ///
    /// Arguments
    /// ---------
    /// * `csv_file`: a path to the CSV file
    ///
    /// Return
    /// ------
    /// * a TraceSet with one chronologically sorted trace per entity
    fn new_from_csv(csv_file: &Utf8Path) -> Result<Self, FootprintError>
    where
        Self: Sized;

    /// Add the visit records of a CSV file to a TraceSet.
    /// If an entity already exists, the observations are merged into its trace.
    fn add_from_csv(&mut self, csv_file: &Utf8Path) -> Result<(), FootprintError>;

    /// Create a TraceSet from any reader yielding CSV visit records.
    fn new_from_reader<R: Read>(reader: R) -> Result<Self, FootprintError>
    where
        Self: Sized;

    /// Add the CSV visit records of a reader to a TraceSet.
    fn add_from_reader<R: Read>(&mut self, reader: R) -> Result<(), FootprintError>;

    /// Create a TraceSet from raw records already split into fields.
    ///
    /// Arguments
    /// ---------
    /// * `records`: the raw records, in source order. Failures report the 1-based
    ///   position of the offending record.
    fn new_from_records<I>(records: I) -> Result<Self, FootprintError>
    where
        I: IntoIterator<Item = RawRecord>,
        Self: Sized;

    /// Add raw records already split into fields to a TraceSet.
    fn add_from_records<I>(&mut self, records: I) -> Result<(), FootprintError>
    where
        I: IntoIterator<Item = RawRecord>;
}

/// Insert parsed pairs and restore the chronological order of every touched trace.
fn merge_observations(
    traces: &mut TraceSet,
    pairs: Vec<(EntityId, Observation)>,
    source: &str,
) -> Result<(), FootprintError> {
    if pairs.is_empty() {
        return Err(FootprintError::EmptyInput(format!(
            "no visit record found in {source}"
        )));
    }

    let n_obs = pairs.len();
    let mut touched: HashSet<EntityId, RandomState> = HashSet::default();
    for (id, observation) in pairs {
        if !touched.contains(&id) {
            touched.insert(id.clone());
        }
        traces.entry(id).or_default().push(observation);
    }

    for id in &touched {
        if let Some(trace) = traces.get_mut(id) {
            trace.sort_by_key(|o| o.timestamp);
        }
    }

    debug!(
        source,
        observations = n_obs,
        entities = touched.len(),
        "merged observations into trace set"
    );
    Ok(())
}

impl TraceFile for TraceSet {
    fn new_from_csv(csv_file: &Utf8Path) -> Result<Self, FootprintError> {
        let mut traces = TraceSet::default();
        traces.add_from_csv(csv_file)?;
        Ok(traces)
    }

    fn add_from_csv(&mut self, csv_file: &Utf8Path) -> Result<(), FootprintError> {
        let file = File::open(csv_file)?;
        let pairs = read_csv(BufReader::new(file))?;
        merge_observations(self, pairs, csv_file.as_str())
    }

    fn new_from_reader<R: Read>(reader: R) -> Result<Self, FootprintError> {
        let mut traces = TraceSet::default();
        traces.add_from_reader(reader)?;
        Ok(traces)
    }

    fn add_from_reader<R: Read>(&mut self, reader: R) -> Result<(), FootprintError> {
        let pairs = read_csv(reader)?;
        merge_observations(self, pairs, "reader")
    }

    fn new_from_records<I>(records: I) -> Result<Self, FootprintError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut traces = TraceSet::default();
        traces.add_from_records(records)?;
        Ok(traces)
    }

    fn add_from_records<I>(&mut self, records: I) -> Result<(), FootprintError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let numbered = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| (i as u64 + 1, record));
        let pairs = parse_records(numbered)?;
        merge_observations(self, pairs, "records")
    }
}
