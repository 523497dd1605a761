//! # Raw visit record reader
//!
//! Utilities to parse **7-field visit records** and turn them into
//! [`Observation`] values keyed by entity.
//!
//! ## Record layout
//! -----------------
//! ```text
//! id, start_time, hour, duration, visit_type, lat, lon
//! ```
//! * `start_time` – `YYYY-MM-DD HH:MM:SS`, read as a civil date-time.
//! * `lat`, `lon` – decimal degrees, must be finite.
//! * `hour`, `duration`, `visit_type` – kept verbatim in [`VisitMeta`].
//!
//! A record whose `id` is the literal `"id"` is a header and is skipped,
//! wherever it appears in the stream. Fields are whitespace-trimmed and
//! blank lines are ignored.
//!
//! ## Error Handling
//! -----------------
//! Record failures are wrapped into [`FootprintError::RecordParsing`] with the
//! 1-based line number and a [`ParseRecordError`] payload. Reading stops at the
//! first malformed record.
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{EntityId, HEADER_SENTINEL, RAW_RECORD_FIELDS},
    footprint_errors::{FootprintError, ParseRecordError},
    observations::{Observation, VisitMeta},
    time::parse_timestamp,
};

/// One raw visit record, fields kept as text.
///
/// Fields are deserialized **by position** from header-less CSV rows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub start_time: String,
    pub hour: String,
    pub duration: String,
    pub visit_type: String,
    pub lat: String,
    pub lon: String,
}

impl RawRecord {
    /// True for the header row (`id` field equal to the sentinel).
    pub fn is_header(&self) -> bool {
        self.id == HEADER_SENTINEL
    }

    /// Parse the timestamp and coordinates of the record into an [`Observation`].
    ///
    /// Return
    /// ----------
    /// * The observation with its [`VisitMeta`] attached, or the first field error found
    ///   (timestamp, then latitude, then longitude).
    pub fn to_observation(&self) -> Result<Observation, ParseRecordError> {
        let timestamp = parse_timestamp(self.start_time.trim())
            .ok_or_else(|| ParseRecordError::InvalidTimestamp(self.start_time.clone()))?;

        let latitude = parse_coordinate(&self.lat)
            .ok_or_else(|| ParseRecordError::InvalidLatitude(self.lat.clone()))?;

        let longitude = parse_coordinate(&self.lon)
            .ok_or_else(|| ParseRecordError::InvalidLongitude(self.lon.clone()))?;

        Ok(
            Observation::new(timestamp, latitude, longitude).with_visit(VisitMeta {
                hour: self.hour.trim().to_string(),
                duration: self.duration.trim().to_string(),
                visit_type: self.visit_type.trim().to_string(),
            }),
        )
    }
}

fn parse_coordinate(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Turn raw records into `(entity, observation)` pairs, skipping header rows.
///
/// Arguments
/// -----------------
/// * `records` – `(line, record)` pairs; `line` is reported on failure.
///
/// Return
/// ----------
/// * The parsed pairs in input order, or the first [`FootprintError::RecordParsing`].
pub(crate) fn parse_records<I>(records: I) -> Result<Vec<(EntityId, Observation)>, FootprintError>
where
    I: IntoIterator<Item = (u64, RawRecord)>,
{
    let mut parsed = Vec::new();
    let mut headers = 0usize;

    for (line, record) in records {
        if record.is_header() {
            headers += 1;
            continue;
        }
        let observation = record
            .to_observation()
            .map_err(|source| FootprintError::RecordParsing { line, source })?;
        parsed.push((record.id, observation));
    }

    debug!(records = parsed.len(), headers, "parsed raw visit records");
    Ok(parsed)
}

/// Read every record of a header-less, comma-separated visit stream.
///
/// Arguments
/// -----------------
/// * `reader` – Any byte source (file, buffer, ...).
///
/// Return
/// ----------
/// * The parsed `(entity, observation)` pairs in input order.
///
/// Errors
/// ----------
/// * [`FootprintError::RecordParsing`] with [`ParseRecordError::WrongFieldCount`] when a row
///   does not hold exactly seven fields, or any field error of [`RawRecord::to_observation`].
/// * [`FootprintError::Csv`] for I/O or UTF-8 failures of the underlying CSV reader.
pub(crate) fn read_csv<R: Read>(reader: R) -> Result<Vec<(EntityId, Observation)>, FootprintError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut raw = Vec::new();
    for result in csv_reader.records() {
        let record: StringRecord = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() != RAW_RECORD_FIELDS {
            return Err(FootprintError::RecordParsing {
                line,
                source: ParseRecordError::WrongFieldCount(record.len()),
            });
        }

        let parsed: RawRecord = record.deserialize(None)?;
        raw.push((line, parsed));
    }

    parse_records(raw)
}
