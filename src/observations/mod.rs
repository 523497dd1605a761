//! # Location observations
//!
//! The atomic sample of the crate: a timestamped `(latitude, longitude)` fix of
//! one entity, optionally carrying the visit metadata of the raw record it was
//! read from.
//!
//! Modules
//! -----------------
//! * [`display`](crate::observations::display) – Table renderers for [`Observations`](crate::constants::Observations).
pub mod display;

use chrono::NaiveDateTime;

use crate::constants::Degree;

/// Visit metadata carried by a raw record but unused by the grid codec.
///
/// The fields are kept verbatim (trimmed) as they appear in the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisitMeta {
    pub hour: String,
    pub duration: String,
    pub visit_type: String,
}

/// A struct containing the time and the position of an observation
///
/// # Fields
///
/// * `timestamp` - The civil date-time of the observation, second resolution
/// * `latitude` - The latitude of the observation in degrees
/// * `longitude` - The longitude of the observation in degrees
/// * `visit` - The visit metadata of the raw record, `None` for decoded or synthetic samples
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub latitude: Degree,
    pub longitude: Degree,
    pub visit: Option<VisitMeta>,
}

impl Observation {
    /// Create a new observation without visit metadata
    ///
    /// Arguments
    /// ---------
    /// * `timestamp`: the time of the observation
    /// * `latitude`: the latitude in degrees
    /// * `longitude`: the longitude in degrees
    ///
    /// Return
    /// ------
    /// * a new Observation struct
    pub fn new(timestamp: NaiveDateTime, latitude: Degree, longitude: Degree) -> Self {
        Observation {
            timestamp,
            latitude,
            longitude,
            visit: None,
        }
    }

    /// Attach the visit metadata of the source record.
    pub fn with_visit(mut self, visit: VisitMeta) -> Self {
        self.visit = Some(visit);
        self
    }

    /// The `(latitude, longitude)` pair.
    #[inline]
    pub fn position(&self) -> (Degree, Degree) {
        (self.latitude, self.longitude)
    }

    /// True when both coordinates are finite numbers.
    #[inline]
    pub fn has_finite_position(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}
