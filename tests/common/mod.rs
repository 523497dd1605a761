use approx::assert_relative_eq;
use chrono::NaiveDateTime;
use footprint::time::parse_timestamp;
use footprint::{Footprint, Observation};

pub fn ts(s: &str) -> NaiveDateTime {
    parse_timestamp(s).unwrap()
}

pub fn obs(t: &str, lat: f64, lon: f64) -> Observation {
    Observation::new(ts(t), lat, lon)
}

/// Every slot of `day` in `[from, to)` holds `(lat, lon)`.
pub fn assert_slots(fp: &Footprint, day: usize, from: usize, to: usize, lat: f64, lon: f64) {
    for slot in from..to {
        let (l, g) = fp.cell(day, slot).unwrap();
        assert_relative_eq!(l, lat, epsilon = 1e-12);
        assert_relative_eq!(g, lon, epsilon = 1e-12);
    }
}
