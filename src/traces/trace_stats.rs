//! # Trace set statistics
//!
//! Set-level metrics over a [`TraceSet`]: observation totals, number of
//! entities, distribution of trace lengths and the overall time span.
//!
//! Quick stats for logging/reporting:
//!
//! ```rust
//! use footprint::traces::trace_stats::TraceStats;
//!
//! fn summarize(set: &footprint::TraceSet) {
//!     let n_traces = set.number_of_traces();
//!     let n_obs = set.total_observations();
//!     if let Some(stats) = set.obs_count_stats() {
//!         eprintln!("Traces: {n_traces}, Observations: {n_obs}");
//!         eprintln!("{:#}", stats);
//!     }
//! }
//! ```
use std::fmt;

use chrono::NaiveDateTime;
use itertools::{Itertools, MinMaxResult};

use crate::constants::{Observations, TraceSet};

/// Summary statistics for per-trace observation counts.
///
/// Percentiles are computed using the *nearest-rank* method:
/// the index is `round(q × (N-1))` for quantile `q ∈ [0,1]`, clamped to valid range.
///
/// Display
/// -----------------
/// * `format!("{}", stats)` – one line, e.g.:
///   ```text
///   trace length 2..20 (p25 4, median 8, p95 15)
///   ```
///
/// * `format!("{:#}", stats)` – one quantile per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObsCountStats {
    pub min: usize,
    pub p25: usize,
    pub median: usize,
    pub p95: usize,
    pub max: usize,
}

impl fmt::Display for ObsCountStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !f.alternate() {
            return write!(
                f,
                "trace length {}..{} (p25 {}, median {}, p95 {})",
                self.min, self.max, self.p25, self.median, self.p95
            );
        }

        writeln!(f, "Observations per entity")?;
        for (label, value) in [
            ("shortest", self.min),
            ("p25", self.p25),
            ("median", self.median),
            ("p95", self.p95),
            ("longest", self.max),
        ] {
            writeln!(f, "  {label:<8} {value:>6}")?;
        }
        Ok(())
    }
}

pub trait TraceStats {
    /// Count the total number of observations across all traces.
    fn total_observations(&self) -> usize;

    /// Return the number of distinct traces (entities) in the set.
    fn number_of_traces(&self) -> usize;

    /// Compute distribution statistics for the number of observations per trace.
    ///
    /// Return
    /// ----------
    /// * `None` if the set is empty.
    /// * `Some(ObsCountStats)` containing the summary statistics otherwise.
    fn obs_count_stats(&self) -> Option<ObsCountStats>;

    /// Earliest and latest timestamps over every trace of the set.
    ///
    /// Return
    /// ----------
    /// * `None` if the set holds no observation.
    fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)>;
}

impl TraceStats for TraceSet {
    #[inline]
    fn total_observations(&self) -> usize {
        self.values().map(|obs: &Observations| obs.len()).sum()
    }

    #[inline]
    fn number_of_traces(&self) -> usize {
        self.len()
    }

    fn obs_count_stats(&self) -> Option<ObsCountStats> {
        let mut counts: Vec<usize> = self.values().map(|obs| obs.len()).collect();
        if counts.is_empty() {
            return None;
        }

        counts.sort_unstable();

        // nearest rank on [0, n-1]
        let last = counts.len() - 1;
        let rank = |q: f64| counts[((q * last as f64).round() as usize).min(last)];

        Some(ObsCountStats {
            min: counts[0],
            p25: rank(0.25),
            median: rank(0.50),
            p95: rank(0.95),
            max: counts[last],
        })
    }

    fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match self
            .values()
            .flat_map(|obs| obs.iter().map(|o| o.timestamp))
            .minmax()
        {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(t) => Some((t, t)),
            MinMaxResult::MinMax(first, last) => Some((first, last)),
        }
    }
}

#[cfg(test)]
mod trace_stats_test {
    use super::*;
    use crate::observations::Observation;
    use crate::time::parse_timestamp;

    fn trace(times: &[&str]) -> Observations {
        times
            .iter()
            .map(|t| Observation::new(parse_timestamp(t).unwrap(), 0.0, 0.0))
            .collect()
    }

    #[test]
    fn test_empty_set() {
        let set = TraceSet::default();
        assert_eq!(set.total_observations(), 0);
        assert_eq!(set.number_of_traces(), 0);
        assert!(set.obs_count_stats().is_none());
        assert!(set.time_span().is_none());
    }

    #[test]
    fn test_counts_and_span() {
        let mut set = TraceSet::default();
        set.insert("a".into(), trace(&["2023-04-01 00:00:00"]));
        set.insert(
            "b".into(),
            trace(&["2023-03-30 10:00:00", "2023-04-02 11:00:00", "2023-04-03 12:00:00"]),
        );

        assert_eq!(set.total_observations(), 4);
        assert_eq!(set.number_of_traces(), 2);

        let stats = set.obs_count_stats().unwrap();
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 3);
        assert_eq!((stats.p25, stats.median, stats.p95), (1, 3, 3));
        assert_eq!(
            format!("{stats}"),
            "trace length 1..3 (p25 1, median 3, p95 3)"
        );
        let table = format!("{stats:#}");
        assert!(table.starts_with("Observations per entity\n"));
        assert!(table.contains("  longest       3\n"));

        let (first, last) = set.time_span().unwrap();
        assert_eq!(first, parse_timestamp("2023-03-30 10:00:00").unwrap());
        assert_eq!(last, parse_timestamp("2023-04-03 12:00:00").unwrap());
    }
}
