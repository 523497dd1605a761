//! # Trace → footprint grid encoding
//!
//! Converts one entity's chronologically sorted trace into a dense
//! `D × 2S` [`Grid`](crate::constants::Grid) with last-known-value imputation.
//!
//! ## Algorithm
//! -----------------
//! 1. **Span**: `D = (last.date - first.date).days + 1`; row 0 is the date of the
//!    first observation (the anchor).
//! 2. **Placement**: every observation is written at `(day offset, slot)`. Slots
//!    start unset (`None`). When several observations share a slot, the one
//!    sorted last wins.
//! 3. **Forward fill**: a single row-major scan over all `D × S` slots carries a
//!    running last-known position, seeded with the first observation of the
//!    trace. Unset slots receive it, set slots refresh it. Values only travel
//!    forward in time, and day boundaries do not reset the running value.
//!
//! Slots of day 0 earlier than the first observation therefore hold the first
//! observation's position.
//!
//! ## Errors
//! -----------------
//! Encoding either returns a fully populated grid or fails before any placement:
//! * [`FootprintError::EmptyInput`] – empty trace.
//! * [`FootprintError::InvalidCoordinate`] – a non-finite latitude or longitude.
//! * [`FootprintError::UnsortedTrace`] – a timestamp lower than its predecessor.
use tracing::debug;

use super::{Footprint, GridParams};
use crate::{
    constants::{Degree, Grid},
    footprint_errors::FootprintError,
    observations::Observation,
    time::{day_offset, slot_index},
};

/// Check the trace preconditions of the encoder.
///
/// Return
/// ----------
/// * The first and last observations of the trace.
fn validate_trace(trace: &[Observation]) -> Result<(&Observation, &Observation), FootprintError> {
    let (Some(first), Some(last)) = (trace.first(), trace.last()) else {
        return Err(FootprintError::EmptyInput(
            "cannot encode an empty trace".into(),
        ));
    };

    for (index, obs) in trace.iter().enumerate() {
        if !obs.has_finite_position() {
            return Err(FootprintError::InvalidCoordinate { index });
        }
        if index > 0 && obs.timestamp < trace[index - 1].timestamp {
            return Err(FootprintError::UnsortedTrace { index });
        }
    }
    Ok((first, last))
}

/// Encode a sorted trace into a footprint grid.
///
/// Arguments
/// -----------------
/// * `trace` – Observations of a single entity, sorted ascending by timestamp.
/// * `params` – Grid resolution.
///
/// Return
/// ----------
/// * A [`Footprint`] anchored at the date of the first observation, with
///   `D` rows and `2S` columns, every cell finite.
///
/// Example
/// -----------------
/// ```rust
/// use footprint::{encode, GridParams, Observation};
/// use footprint::time::parse_timestamp;
///
/// let trace = vec![
///     Observation::new(parse_timestamp("2023-04-01 00:00:00").unwrap(), 1.0, 100.0),
///     Observation::new(parse_timestamp("2023-04-01 06:00:00").unwrap(), 2.0, 101.0),
/// ];
/// let fp = encode(&trace, &GridParams::default()).unwrap();
/// assert_eq!(fp.days(), 1);
/// assert_eq!(fp.cell(0, 23), Some((1.0, 100.0)));
/// assert_eq!(fp.cell(0, 24), Some((2.0, 101.0)));
/// ```
pub fn encode(trace: &[Observation], params: &GridParams) -> Result<Footprint, FootprintError> {
    let (first, last) = validate_trace(trace)?;

    let anchor = first.timestamp.date();
    let days = day_offset(anchor, &last.timestamp) as usize + 1;
    let slots = params.slots_per_day();
    let interval = params.interval_seconds();

    // Step 1: placement, last write wins.
    let mut cells: Vec<Option<(Degree, Degree)>> = vec![None; days * slots];
    for obs in trace {
        let row = day_offset(anchor, &obs.timestamp) as usize;
        let col = slot_index(&obs.timestamp, interval);
        cells[row * slots + col] = Some(obs.position());
    }

    // Step 2: forward fill over the whole day × slot span, straight into the grid.
    let mut grid = Grid::zeros(days, 2 * slots);
    let mut last_known = first.position();
    let mut observed_slots = 0usize;
    for (i, cell) in cells.into_iter().enumerate() {
        if let Some(position) = cell {
            last_known = position;
            observed_slots += 1;
        }
        let (row, col) = (i / slots, i % slots);
        grid[(row, col)] = last_known.0;
        grid[(row, slots + col)] = last_known.1;
    }

    debug!(
        %anchor,
        days,
        observations = trace.len(),
        observed_slots,
        "encoded trace into footprint grid"
    );

    Ok(Footprint::new(anchor, grid))
}
