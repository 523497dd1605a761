//! # Traces: ingestion, grouping, and statistics
//!
//! High-level facilities to **ingest** and **store** location observations grouped
//! by entity. The central type is [`TraceSet`], a fast hash map that buckets
//! chronologically sorted observations per [`EntityId`](crate::constants::EntityId).
//!
//! Modules
//! -----------------
//! * [`csv_reader`](crate::traces::csv_reader) – 7-field visit record parsing.
//! * [`trace_file`](crate::traces::trace_file) – **Public** trait exposing `new_from_*` and `add_from_*` helpers
//!   to construct/extend a [`TraceSet`].
//! * [`trace_stats`](crate::traces::trace_stats) – Set-level metrics (counts, percentiles, time span).
//!
//! Data Model
//! -----------------
//! * **Key:** entity identifier (`String`).
//! * **Value:** `Observations` = `SmallVec<Observation>`, sorted ascending by timestamp,
//!   ties kept in arrival order. Never empty.
//! * **Set:** [`TraceSet`] = `HashMap<EntityId, Observations, ahash::RandomState>`.
//!
//! Quick-Start
//! -----------------
//! ```rust,no_run
//! use footprint::{GridParams, TraceSet};
//! use footprint::grid::batch::FootprintBatch;
//!
//! # fn run() -> Result<(), footprint::FootprintError> {
//! let file = std::fs::File::open("visits.csv")?;
//! let traces: TraceSet = footprint::traces::load(file)?;
//! let footprints = traces.encode_all(&GridParams::default());
//! # Ok(()) }
//! ```
use std::io::Read;

use crate::constants::TraceSet;
use crate::footprint_errors::FootprintError;
use crate::traces::trace_file::TraceFile;

pub mod csv_reader;
pub mod trace_file;
pub mod trace_stats;

/// Load raw visit records and group them into chronologically sorted traces.
///
/// Arguments
/// -----------------
/// * `source` – A reader over comma-separated 7-field visit records, header optional.
///
/// Return
/// ----------
/// * The entity → trace mapping.
///
/// Errors
/// ----------
/// * [`FootprintError::RecordParsing`] on the first malformed record.
/// * [`FootprintError::EmptyInput`] if the source holds no data record.
pub fn load<R: Read>(source: R) -> Result<TraceSet, FootprintError> {
    TraceSet::new_from_reader(source)
}
