//! # Batch footprint encoding over trace sets
//!
//! Encode every trace of a [`TraceSet`] into its own [`Footprint`] and collect
//! **per-entity outcomes**.
//!
//! ## Overview
//! -----------------
//! This module implements the [`FootprintBatch`] trait on `TraceSet`:
//!
//! * `encode_all` – encode **every entity** with one [`GridParams`],
//! * `encode_all_with_cancel` – same, with **cooperative cancellation**,
//! * `encode_all_parallel` – same, spread over the rayon thread pool
//!   (feature: `parallel`).
//!
//! ## Result Model
//! -----------------
//! ```text
//! EntityId → Result<Footprint, FootprintError>
//! ```
//!
//! Failures are isolated: an entity whose trace cannot be encoded gets an
//! `Err` entry and does not abort the batch. Use [`footprint_for`] to borrow an
//! outcome or [`take_footprint`] to move it out of the map.
//!
//! ## Execution Modes
//! -----------------
//! ### Progress UI (feature: `progress`)
//! `encode_all` and `encode_all_with_cancel` render a live `indicatif` bar with
//! per-entity timing.
//!
//! ### Cooperative cancellation
//! `encode_all_with_cancel` calls `should_cancel()` at most every 20 ms of wall
//! clock. Once it returns `true` the loop stops and the entities already
//! encoded are returned.
//!
//! ## Examples
//! -----------------
//! ```rust,no_run
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use footprint::{FootprintBatch, GridParams, TraceSet};
//!
//! # fn demo(traces: TraceSet) {
//! let stop = AtomicBool::new(false);
//! let results = traces.encode_all_with_cancel(&GridParams::default(), || {
//!     stop.load(Ordering::Relaxed)
//! });
//! for (id, res) in &results {
//!     match res {
//!         Ok(fp) => eprintln!("{id}: {fp}"),
//!         Err(e) => eprintln!("{id}: error={e}"),
//!     }
//! }
//! # }
//! ```
use std::collections::HashMap;
use std::time::{Duration, Instant};

use ahash::RandomState;
use tracing::{info, warn};

use super::{encoder::encode, Footprint, GridParams};
use crate::{
    constants::{EntityId, TraceSet},
    footprint_errors::FootprintError,
    observations::Observation,
};

#[cfg(feature = "progress")]
use super::progress_bar::EntityProgress;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Full batch encoding results, one entry per processed entity.
///
/// ```ignore
/// HashMap<EntityId, Result<Footprint, FootprintError>, RandomState>
/// ```
pub type FullFootprintResult = HashMap<EntityId, Result<Footprint, FootprintError>, RandomState>;

/// Borrow the footprint for a given entity.
///
/// Return
/// ----------
/// * `Ok(Some(&Footprint))` – the entity was encoded.
/// * `Ok(None)` – the entity is absent from the results.
/// * `Err(&FootprintError)` – encoding failed for that entity.
pub fn footprint_for<'a>(
    all: &'a FullFootprintResult,
    key: &str,
) -> Result<Option<&'a Footprint>, &'a FootprintError> {
    match all.get(key) {
        None => Ok(None),
        Some(Err(e)) => Err(e),
        Some(Ok(fp)) => Ok(Some(fp)),
    }
}

/// Take ownership of the footprint for `key`, removing it from the map.
pub fn take_footprint(
    all: &mut FullFootprintResult,
    key: &str,
) -> Result<Option<Footprint>, FootprintError> {
    match all.remove(key) {
        None => Ok(None),
        Some(Err(e)) => Err(e),
        Some(Ok(fp)) => Ok(Some(fp)),
    }
}

fn encode_entity(
    id: &EntityId,
    trace: &[Observation],
    params: &GridParams,
) -> Result<Footprint, FootprintError> {
    let res = encode(trace, params);
    if let Err(e) = &res {
        warn!(entity = %id, error = %e, "failed to encode trace");
    }
    res
}

fn log_summary(results: &FullFootprintResult, total: usize, interrupted: bool) {
    let failed = results.values().filter(|r| r.is_err()).count();
    info!(
        entities = total,
        encoded = results.len() - failed,
        failed,
        interrupted,
        "batch footprint encoding finished"
    );
}

/// Encode entities in map order until `should_cancel` answers `true`.
///
/// `should_cancel` is consulted before an entity once `poll_interval` has
/// elapsed since the previous consultation.
fn encode_until<F>(
    traces: &TraceSet,
    params: &GridParams,
    mut should_cancel: F,
    poll_interval: Duration,
) -> FullFootprintResult
where
    F: FnMut() -> bool,
{
    #[cfg(feature = "progress")]
    let mut progress = EntityProgress::new(traces.len());
    let mut results: FullFootprintResult = HashMap::default();
    let mut last_poll = Instant::now();
    let mut interrupted = false;

    for (id, trace) in traces {
        if last_poll.elapsed() >= poll_interval {
            if should_cancel() {
                interrupted = true;
                break;
            }
            last_poll = Instant::now();
        }

        results.insert(id.clone(), encode_entity(id, trace, params));
        #[cfg(feature = "progress")]
        progress.entity_done();
    }

    #[cfg(feature = "progress")]
    {
        if interrupted {
            progress.interrupted();
        }
        progress.close();
    }
    log_summary(&results, traces.len(), interrupted);
    results
}

pub trait FootprintBatch {
    /// Encode **every trace** of the set into a footprint.
    ///
    /// Arguments
    /// -----------------
    /// * `params`: Grid resolution shared by every entity.
    ///
    /// Return
    /// ----------
    /// * A [`FullFootprintResult`] with one entry per entity.
    fn encode_all(&self, params: &GridParams) -> FullFootprintResult;

    /// Same as [`encode_all`](FootprintBatch::encode_all), polling
    /// `should_cancel` at most every 20 ms and stopping early when it returns `true`.
    ///
    /// Return
    /// ----------
    /// * The outcomes of the entities processed before the interruption.
    fn encode_all_with_cancel<F>(&self, params: &GridParams, should_cancel: F) -> FullFootprintResult
    where
        F: FnMut() -> bool;

    /// Encode every trace on the rayon thread pool.
    ///
    /// The results are identical to [`encode_all`](FootprintBatch::encode_all).
    #[cfg(feature = "parallel")]
    fn encode_all_parallel(&self, params: &GridParams) -> FullFootprintResult;
}

impl FootprintBatch for TraceSet {
    #[cfg(feature = "progress")]
    fn encode_all(&self, params: &GridParams) -> FullFootprintResult {
        let mut progress = EntityProgress::new(self.len());
        let mut results: FullFootprintResult = HashMap::default();

        for (id, trace) in self {
            results.insert(id.clone(), encode_entity(id, trace, params));
            progress.entity_done();
        }

        progress.close();
        log_summary(&results, self.len(), false);
        results
    }

    #[cfg(not(feature = "progress"))]
    fn encode_all(&self, params: &GridParams) -> FullFootprintResult {
        let results: FullFootprintResult = self
            .iter()
            .map(|(id, trace)| (id.clone(), encode_entity(id, trace, params)))
            .collect();

        log_summary(&results, self.len(), false);
        results
    }

    fn encode_all_with_cancel<F>(&self, params: &GridParams, should_cancel: F) -> FullFootprintResult
    where
        F: FnMut() -> bool,
    {
        encode_until(self, params, should_cancel, POLL_INTERVAL)
    }

    #[cfg(feature = "parallel")]
    fn encode_all_parallel(&self, params: &GridParams) -> FullFootprintResult {
        use rayon::prelude::*;

        let results: FullFootprintResult = self
            .par_iter()
            .map(|(id, trace)| (id.clone(), encode_entity(id, trace, params)))
            .collect();

        log_summary(&results, self.len(), false);
        results
    }
}

#[cfg(test)]
mod batch_test {
    use super::*;
    use crate::constants::Observations;
    use crate::time::parse_timestamp;

    fn trace(points: &[(&str, f64)]) -> Observations {
        points
            .iter()
            .map(|(t, lat)| Observation::new(parse_timestamp(t).unwrap(), *lat, -*lat))
            .collect()
    }

    fn sample_set() -> TraceSet {
        let mut set = TraceSet::default();
        set.insert(
            "a".into(),
            trace(&[("2023-04-01 00:00:00", 1.0), ("2023-04-02 06:00:00", 2.0)]),
        );
        set.insert("b".into(), trace(&[("2023-04-05 12:00:00", 3.0)]));
        // out of order on purpose: only this entity fails
        set.insert(
            "broken".into(),
            trace(&[("2023-04-05 12:00:00", 3.0), ("2023-04-05 11:00:00", 4.0)]),
        );
        set
    }

    #[test]
    fn test_encode_all_isolates_failures() {
        let set = sample_set();
        let results = set.encode_all(&GridParams::default());

        assert_eq!(results.len(), 3);
        let a = footprint_for(&results, "a").unwrap().unwrap();
        assert_eq!(a.days(), 2);
        let b = footprint_for(&results, "b").unwrap().unwrap();
        assert_eq!(b.days(), 1);
        assert_eq!(b.cell(0, 0), Some((3.0, -3.0)));

        assert_eq!(
            footprint_for(&results, "broken").unwrap_err(),
            &FootprintError::UnsortedTrace { index: 1 }
        );
        assert!(footprint_for(&results, "missing").unwrap().is_none());
    }

    #[test]
    fn test_take_footprint() {
        let set = sample_set();
        let mut results = set.encode_all(&GridParams::default());

        let a = take_footprint(&mut results, "a").unwrap().unwrap();
        assert_eq!(a.anchor_date().to_string(), "2023-04-01");
        assert!(take_footprint(&mut results, "a").unwrap().is_none());
        assert!(take_footprint(&mut results, "broken").is_err());
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_cancel_never_matches_encode_all() {
        let set = sample_set();
        let params = GridParams::default();
        let full = set.encode_all(&params);
        let with_cancel = set.encode_all_with_cancel(&params, || false);
        assert_eq!(full, with_cancel);
    }

    fn long_traces(entities: usize, days: i64) -> TraceSet {
        let start = parse_timestamp("2023-01-01 08:00:00").unwrap();
        (0..entities)
            .map(|i| {
                let lat = i as f64 * 0.01;
                let trace: Observations = smallvec::smallvec![
                    Observation::new(start, lat, -lat),
                    Observation::new(start + chrono::TimeDelta::days(days), lat + 1.0, -lat),
                ];
                (format!("entity-{i}"), trace)
            })
            .collect()
    }

    #[test]
    fn test_cancel_stops_after_requested_polls() {
        let set = long_traces(10, 3);
        let mut polls = 0;
        let results = encode_until(
            &set,
            &GridParams::default(),
            || {
                polls += 1;
                polls > 4
            },
            Duration::ZERO,
        );

        // every entity is preceded by a poll: four are encoded, the fifth poll stops
        assert_eq!(polls, 5);
        assert_eq!(results.len(), 4);
        assert!(results.values().all(|r| r.is_ok()));
        assert!(results.keys().all(|id| set.contains_key(id)));
    }

    #[test]
    fn test_cancel_interrupts_long_batch() {
        let set = long_traces(400, 200);
        let results = set.encode_all_with_cancel(&GridParams::default(), || true);

        assert!(results.len() < set.len());
        assert!(results.values().all(|r| r.is_ok()));
    }

    #[test]
    fn test_cancel_on_empty_set() {
        let set = TraceSet::default();
        let results = set.encode_all_with_cancel(&GridParams::default(), || true);
        assert!(results.is_empty());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let set = sample_set();
        let params = GridParams::default();
        assert_eq!(set.encode_all(&params), set.encode_all_parallel(&params));
    }
}
