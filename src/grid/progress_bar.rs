//! Live progress for batch footprint encoding.
//!
//! [`EntityProgress`] owns the `indicatif` bar of one batch and the running
//! cost of encoding a single entity. After each entity the bar message shows
//! the cost of that entity and a smoothed mean, e.g. `entity 3ms | mean 2ms`.
//!
//! Only compiled with the `progress` feature.
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) | {per_sec} | ETA {eta_precise} | {msg}";

/// Weight of the newest entity in the smoothed mean.
const SMOOTHING: f64 = 0.2;

pub(crate) struct EntityProgress {
    bar: ProgressBar,
    entity_start: Instant,
    mean: Option<Duration>,
}

impl EntityProgress {
    /// Bar sized for `total` entities, ticking steadily until closed.
    pub(crate) fn new(total: usize) -> Self {
        let bar = ProgressBar::new((total as u64).max(1));
        bar.set_style(
            ProgressStyle::with_template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.enable_steady_tick(Duration::from_millis(200));
        Self {
            bar,
            entity_start: Instant::now(),
            mean: None,
        }
    }

    /// Record one encoded entity and advance the bar.
    pub(crate) fn entity_done(&mut self) {
        let now = Instant::now();
        let cost = now.duration_since(self.entity_start);
        self.entity_start = now;

        let mean = smoothed_mean(self.mean, cost);
        self.mean = Some(mean);
        self.bar.set_message(format!(
            "entity {} | mean {}",
            short_duration(cost),
            short_duration(mean)
        ));
        self.bar.inc(1);
    }

    pub(crate) fn interrupted(&self) {
        self.bar.set_message("Interrupted");
    }

    pub(crate) fn close(self) {
        self.bar.disable_steady_tick();
        self.bar.finish_and_clear();
    }
}

fn smoothed_mean(mean: Option<Duration>, cost: Duration) -> Duration {
    match mean {
        None => cost,
        Some(m) => m.mul_f64(1.0 - SMOOTHING) + cost.mul_f64(SMOOTHING),
    }
}

fn short_duration(d: Duration) -> String {
    match d.as_micros() {
        us @ 0..=999 => format!("{us}µs"),
        us @ 1_000..=999_999 => format!("{}ms", us / 1_000),
        _ => format!("{:.2}s", d.as_secs_f64()),
    }
}

#[cfg(test)]
mod progress_bar_test {
    use super::*;

    #[test]
    fn test_short_duration() {
        assert_eq!(short_duration(Duration::from_micros(253)), "253µs");
        assert_eq!(short_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(short_duration(Duration::from_millis(3140)), "3.14s");
    }

    #[test]
    fn test_smoothed_mean() {
        let first = Duration::from_millis(10);
        assert_eq!(smoothed_mean(None, first), first);

        let next = smoothed_mean(Some(first), Duration::from_millis(20));
        assert!((11_990..=12_010).contains(&next.as_micros()));
    }

    #[test]
    fn test_entity_done_counts() {
        let mut progress = EntityProgress::new(3);
        progress.entity_done();
        progress.entity_done();
        assert_eq!(progress.bar.position(), 2);
        assert!(progress.mean.is_some());
        progress.close();
    }
}
