//! # Footprint grids
//!
//! A **footprint** is the dense, fixed-resolution rendition of one entity's trace:
//! a `D × 2S` matrix where row `r` is calendar day `anchor + r`, columns `[0, S)`
//! hold the latitude of each slot and columns `[S, 2S)` the longitude of the same
//! slots. `S` is the number of slots per day (96 by default, i.e. 15-minute slots).
//!
//! The matrix itself carries no calendar information, so it always travels
//! with its anchor date inside a [`Footprint`].
//!
//! Modules
//! -----------------
//! * [`encoder`](crate::grid::encoder) – Trace → grid with last-known-value imputation.
//! * [`decoder`](crate::grid::decoder) – Grid → dense per-slot trace.
//! * [`batch`](crate::grid::batch) – Per-entity encoding over a whole [`TraceSet`](crate::constants::TraceSet).
//!
//! Configuration
//! -----------------
//! [`GridParams`] holds the slot resolution. Build custom values with the
//! validating builder:
//!
//! ```rust
//! use footprint::grid::GridParams;
//!
//! let hourly = GridParams::builder().slots_per_day(24).build().unwrap();
//! assert_eq!(hourly.interval_seconds(), 3600);
//! assert_eq!(hourly.columns(), 48);
//! ```
use std::fmt;

use chrono::NaiveDate;
use itertools::Itertools;
use nalgebra::DMatrixView;

use crate::{
    constants::{Degree, Grid, Observations, SECONDS_PER_DAY, SLOTS_PER_DAY},
    footprint_errors::FootprintError,
    time::slot_label,
};

pub mod batch;
pub mod decoder;
pub mod encoder;

#[cfg(feature = "progress")]
pub(crate) mod progress_bar;

/// Resolution of a footprint grid.
///
/// Invariants
/// -----------------
/// * `slots_per_day >= 1`
/// * `86400 % slots_per_day == 0`, so every slot spans a whole number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridParams {
    slots_per_day: usize,
}

impl GridParams {
    /// Construct a new [`GridParams`] with the default 15-minute resolution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`GridParamsBuilder`] to configure a custom resolution.
    pub fn builder() -> GridParamsBuilder {
        GridParamsBuilder::new()
    }

    /// Number of slots per day (`S`).
    #[inline]
    pub fn slots_per_day(&self) -> usize {
        self.slots_per_day
    }

    /// Width of one slot in seconds (`86400 / S`).
    #[inline]
    pub fn interval_seconds(&self) -> u32 {
        SECONDS_PER_DAY / self.slots_per_day as u32
    }

    /// Number of grid columns (`2 * S`).
    #[inline]
    pub fn columns(&self) -> usize {
        2 * self.slots_per_day
    }

    /// `HH:MM:SS` caption of the start of `slot`, `None` past the end of the day.
    pub fn slot_label(&self, slot: usize) -> Option<String> {
        if slot >= self.slots_per_day {
            return None;
        }
        slot_label(slot, self.interval_seconds())
    }
}

impl Default for GridParams {
    fn default() -> Self {
        GridParams {
            slots_per_day: SLOTS_PER_DAY,
        }
    }
}

/// Builder for [`GridParams`], with validation.
#[derive(Debug, Clone)]
pub struct GridParamsBuilder {
    params: GridParams,
}

impl Default for GridParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GridParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: GridParams::default(),
        }
    }

    pub fn slots_per_day(mut self, v: usize) -> Self {
        self.params.slots_per_day = v;
        self
    }

    /// Finalize the builder and produce a [`GridParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `slots_per_day >= 1`
    /// * `slots_per_day` divides `86400`
    ///
    /// Returns
    /// -----------------
    /// * `Err(FootprintError::InvalidGridParameter)` if any rule fails.
    pub fn build(self) -> Result<GridParams, FootprintError> {
        let s = self.params.slots_per_day;
        if s == 0 {
            return Err(FootprintError::InvalidGridParameter(
                "slots_per_day must be >= 1".into(),
            ));
        }
        if s > SECONDS_PER_DAY as usize || SECONDS_PER_DAY as usize % s != 0 {
            return Err(FootprintError::InvalidGridParameter(format!(
                "slots_per_day must divide {SECONDS_PER_DAY}, got {s}"
            )));
        }
        Ok(self.params)
    }
}

/// Geographic extent of a footprint grid, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub lat_min: Degree,
    pub lat_max: Degree,
    pub lon_min: Degree,
    pub lon_max: Degree,
}

impl GridBounds {
    /// Area of the bounding box in squared degrees.
    pub fn area(&self) -> f64 {
        (self.lat_max - self.lat_min) * (self.lon_max - self.lon_min)
    }
}

/// A footprint grid paired with the calendar date of its first row.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    anchor_date: NaiveDate,
    grid: Grid,
}

impl Footprint {
    /// Pair a grid with its anchor date. The shape is checked when decoding.
    pub fn new(anchor_date: NaiveDate, grid: Grid) -> Self {
        Self { anchor_date, grid }
    }

    /// Calendar date of row 0.
    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_parts(self) -> (NaiveDate, Grid) {
        (self.anchor_date, self.grid)
    }

    /// Number of days (rows) spanned by the grid.
    pub fn days(&self) -> usize {
        self.grid.nrows()
    }

    /// Number of slots per day (`columns / 2`).
    pub fn slots_per_day(&self) -> usize {
        self.grid.ncols() / 2
    }

    /// Latitude block `[0, S)`: one row per day, one column per slot.
    pub fn latitudes(&self) -> DMatrixView<'_, f64> {
        let s = self.slots_per_day();
        self.grid.columns(0, s)
    }

    /// Longitude block `[S, 2S)`: one row per day, one column per slot.
    pub fn longitudes(&self) -> DMatrixView<'_, f64> {
        let s = self.slots_per_day();
        self.grid.columns(s, s)
    }

    /// `(latitude, longitude)` of a slot, `None` outside the grid.
    pub fn cell(&self, day: usize, slot: usize) -> Option<(Degree, Degree)> {
        let s = self.slots_per_day();
        if day >= self.days() || slot >= s {
            return None;
        }
        Some((self.grid[(day, slot)], self.grid[(day, slot + s)]))
    }

    /// Extent of every position stored in the grid.
    ///
    /// Return
    /// ----------
    /// * `None` for a grid without cells.
    pub fn bounds(&self) -> Option<GridBounds> {
        let (lat_min, lat_max) = self.latitudes().iter().copied().minmax().into_option()?;
        let (lon_min, lon_max) = self.longitudes().iter().copied().minmax().into_option()?;
        Some(GridBounds {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        })
    }

    /// Decode the grid back into a dense per-slot trace starting at the anchor date.
    ///
    /// See also
    /// ------------
    /// * [`decoder::decode`] – Underlying routine.
    pub fn decode(&self, params: &GridParams) -> Result<Observations, FootprintError> {
        decoder::decode(&self.grid, self.anchor_date, params)
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Footprint from {}: {} day(s) x {} slot(s)",
            self.anchor_date,
            self.days(),
            self.slots_per_day()
        )
    }
}
