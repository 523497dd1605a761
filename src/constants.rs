//! # Constants and type definitions for footprint
//!
//! This module centralizes the **grid geometry constants**, the **raw input
//! conventions**, and the **common type definitions** used throughout the crate.
//!
//! ## Overview
//!
//! - Day/slot geometry (seconds per day, default slot count)
//! - Raw record conventions (header sentinel, timestamp pattern, field count)
//! - Core type aliases used across the crate
//! - Container types for storing traces and grids

use ahash::RandomState;
use nalgebra::DMatrix;
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::observations::Observation;

// -------------------------------------------------------------------------------------------------
// Grid geometry
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a civil day
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Default number of time slots per day (15-minute resolution)
pub const SLOTS_PER_DAY: usize = 96;

// -------------------------------------------------------------------------------------------------
// Raw record conventions
// -------------------------------------------------------------------------------------------------

/// Identifier value marking a header record
pub const HEADER_SENTINEL: &str = "id";

/// Expected number of fields in a raw visit record
pub const RAW_RECORD_FIELDS: usize = 7;

/// Timestamp pattern of the raw records (`YYYY-MM-DD HH:MM:SS`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Frame caption pattern for a slot start (`HH:MM:SS`)
pub const SLOT_LABEL_FORMAT: &str = "%H:%M:%S";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;

/// Identifier of a mobile entity (device, user, ...)
pub type EntityId = String;

/// Time-ordered observations of a single entity.
pub type Observations = SmallVec<[Observation; 6]>;

/// A full set of traces for multiple entities.
///
/// The key is the [`EntityId`].
/// The value is the chronologically sorted list of [`Observation`] of this entity.
///
/// Uses [`ahash`](https://docs.rs/ahash) for fast hashing.
pub type TraceSet = HashMap<EntityId, Observations, RandomState>;

/// Dense day × slot matrix.
///
/// Row `r` is day `anchor + r`, columns `[0, S)` hold latitudes and
/// columns `[S, 2S)` hold longitudes of the same slots.
pub type Grid = DMatrix<f64>;
