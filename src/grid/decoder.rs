//! # Footprint grid → trace decoding
//!
//! Reads a `rows × 2S` grid back into a dense list of `rows × S` observations,
//! one per slot, timestamped at the start of the slot. Row `r` stands for the
//! calendar day `anchor + r`.
//!
//! Decoding does not recover the sparse input observations: the output is
//! the imputed dense trace, including the slots filled by forward fill.
//!
//! Shapes
//! -----------------
//! * [`decode`] takes a `rows × 2S` matrix.
//! * [`decode_flat`] takes a single row (or several rows concatenated in
//!   row-major order) as a flat slice, whose length must be a positive multiple
//!   of `2S`.
use tracing::debug;

use super::GridParams;
use crate::{
    constants::{Grid, Observations},
    footprint_errors::FootprintError,
    observations::Observation,
    time::slot_start,
};
use chrono::NaiveDate;

/// Decode a footprint grid into a dense per-slot trace.
///
/// Arguments
/// -----------------
/// * `grid` – The `rows × 2S` footprint matrix.
/// * `anchor` – Calendar date of row 0.
/// * `params` – Grid resolution (gives `S`).
///
/// Return
/// ----------
/// * `rows × S` observations ordered by day then slot. Entry `(r, j)` has the
///   timestamp `anchor + r days + j × interval`, the latitude `grid[(r, j)]` and
///   the longitude `grid[(r, S + j)]`.
///
/// Errors
/// ----------
/// * [`FootprintError::Shape`] if the grid has no row or does not have `2S` columns.
/// * [`FootprintError::DateOutOfRange`] if a slot start cannot be represented.
pub fn decode(
    grid: &Grid,
    anchor: NaiveDate,
    params: &GridParams,
) -> Result<Observations, FootprintError> {
    let slots = params.slots_per_day();
    let (rows, cols) = grid.shape();

    if cols != params.columns() {
        return Err(FootprintError::Shape(format!(
            "expected {} columns ({} slots per day), got {cols}",
            params.columns(),
            slots
        )));
    }
    if rows == 0 {
        return Err(FootprintError::Shape("grid has no row".into()));
    }

    let interval = params.interval_seconds();
    let mut trace = Observations::with_capacity(rows * slots);
    for day in 0..rows {
        for slot in 0..slots {
            let timestamp = slot_start(anchor, day, slot, interval).ok_or_else(|| {
                FootprintError::DateOutOfRange(format!(
                    "day {day} slot {slot} from anchor {anchor}"
                ))
            })?;
            trace.push(Observation::new(
                timestamp,
                grid[(day, slot)],
                grid[(day, slots + slot)],
            ));
        }
    }

    debug!(%anchor, rows, observations = trace.len(), "decoded footprint grid");
    Ok(trace)
}

/// Decode a flat row-major buffer of one or more grid rows.
///
/// A single row of length `2S` is treated as a one-day grid.
///
/// Errors
/// ----------
/// * [`FootprintError::Shape`] if the length is zero or not a multiple of `2S`.
/// * [`FootprintError::DateOutOfRange`] as in [`decode`].
pub fn decode_flat(
    values: &[f64],
    anchor: NaiveDate,
    params: &GridParams,
) -> Result<Observations, FootprintError> {
    let cols = params.columns();
    if values.is_empty() || values.len() % cols != 0 {
        return Err(FootprintError::Shape(format!(
            "flat grid of length {} is not a positive multiple of {cols}",
            values.len()
        )));
    }

    let grid = Grid::from_row_slice(values.len() / cols, cols, values);
    decode(&grid, anchor, params)
}
