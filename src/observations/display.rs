//! # Tabular display for location traces
//!
//! Pretty, zero-copy renderers to print an [`Observations`] collection
//! (a `SmallVec<[Observation; 6]>`) as a **table**.
//!
//! ## Overview
//!
//! The main entry point is the display adaptor [`TraceDisplay`]. It **borrows**
//! your observations and renders a formatted table when used with Rust formatting
//! (`{}`), without cloning or moving data.
//!
//! Two layouts are available:
//!
//! - **Default** (compact, fixed-width):
//!   `# | Timestamp | Lat [deg] | Lon [deg]`
//! - **Wide** (diagnostic, uses `comfy-table`):
//!   adds `MJD (UTC) | Hour | Duration | Visit type`
//!
//! ## Units & Conventions
//!
//! - **Time**: timestamps are civil date-times; the MJD column reads them as **UTC**
//!   and is computed with `hifitime`.
//! - **Angles**: latitude/longitude in decimal **degrees**.
//!
//! ## Quick examples
//!
//! ```rust,ignore
//! use footprint::observations::display::TraceDisplayExt;
//!
//! // 1) Compact table
//! println!("{}", trace.show());
//!
//! // 2) Wide table with visit metadata, 4 decimals on coordinates
//! println!("{}", trace.table_wide().with_coordinate_precision(4));
//! ```
//!
//! [`comfy-table`]: https://crates.io/crates/comfy-table
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::constants::{Observations, TIMESTAMP_FORMAT};
use crate::observations::Observation;
use crate::time::to_mjd_utc;

/// Internal layout selector for the table renderer.
enum TableMode {
    Default, // timestamp + lat/lon
    Wide,    // + MJD(UTC), visit metadata
}

/// Display adaptor to render an [`Observations`] collection as a **table**.
///
/// Render modes
/// -----------------
/// * **Default** (via [`TraceDisplayExt::show`]):
///   columns `# | Timestamp | Lat [deg] | Lon [deg]`.
/// * **Wide** (via [`TraceDisplayExt::table_wide`]):
///   adds `MJD (UTC) | Hour | Duration | Visit type`.
pub struct TraceDisplay<'a> {
    /// Borrowed collection to render.
    obs: &'a Observations,
    mode: TableMode,
    /// Fractional digits for latitude/longitude (default = 6).
    coord_prec: usize,
}

/// Pre-computed, per-row fields shared across all modes.
struct RowFields {
    i: usize,
    timestamp: String,
    lat: String,
    lon: String,
    mjd_utc: Option<f64>,
    hour: String,
    duration: String,
    visit_type: String,
}

impl<'a> TraceDisplay<'a> {
    /// Build a new table adaptor (default: **compact** columns).
    pub fn new(obs: &'a Observations) -> Self {
        Self {
            obs,
            mode: TableMode::Default,
            coord_prec: 6,
        }
    }

    /// Switch to **wide** mode (adds MJD and visit metadata).
    ///
    /// Arguments
    /// -----------------
    /// * `yes` – If `true`, selects the **Wide** layout; otherwise resets to **Default**.
    pub fn wide(mut self, yes: bool) -> Self {
        self.mode = if yes {
            TableMode::Wide
        } else {
            TableMode::Default
        };
        self
    }

    /// Set the number of fractional digits printed for latitude and longitude.
    pub fn with_coordinate_precision(mut self, p: usize) -> Self {
        self.coord_prec = p;
        self
    }

    fn format_row_fields(&self, i: usize, o: &Observation) -> RowFields {
        let p = self.coord_prec;
        let (hour, duration, visit_type) = match (&self.mode, &o.visit) {
            (TableMode::Wide, Some(v)) => {
                (v.hour.clone(), v.duration.clone(), v.visit_type.clone())
            }
            _ => (String::new(), String::new(), String::new()),
        };
        let mjd_utc = match self.mode {
            TableMode::Default => None,
            TableMode::Wide => to_mjd_utc(&o.timestamp),
        };

        RowFields {
            i,
            timestamp: o.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            lat: format!("{:.*}", p, o.latitude),
            lon: format!("{:.*}", p, o.longitude),
            mjd_utc,
            hour,
            duration,
            visit_type,
        }
    }

    /// Render the WIDE table using comfy-table.
    fn render_wide_comfy(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("#"),
            Cell::new("Timestamp"),
            Cell::new("MJD (UTC)"),
            Cell::new("Lat [deg]"),
            Cell::new("Lon [deg]"),
            Cell::new("Hour"),
            Cell::new("Duration"),
            Cell::new("Visit type"),
        ]);

        for (i, o) in self.obs.iter().enumerate() {
            let r = self.format_row_fields(i, o);
            let mjd = r
                .mjd_utc
                .map(|m| format!("{m:.6}"))
                .unwrap_or_default();

            table.add_row(Row::from(vec![
                Cell::new(r.i).set_alignment(CellAlignment::Right),
                Cell::new(r.timestamp),
                Cell::new(mjd).set_alignment(CellAlignment::Right),
                Cell::new(r.lat).set_alignment(CellAlignment::Right),
                Cell::new(r.lon).set_alignment(CellAlignment::Right),
                Cell::new(r.hour).set_alignment(CellAlignment::Right),
                Cell::new(r.duration).set_alignment(CellAlignment::Right),
                Cell::new(r.visit_type),
            ]));
        }

        table.to_string()
    }
}

/// Ergonomic extension to create table adaptors from an [`Observations`] collection.
///
/// Examples
/// ----------
/// ```rust,ignore
/// println!("{}", trace.show());        // Default
/// println!("{}", trace.table_wide());  // Wide
/// ```
pub trait TraceDisplayExt {
    /// Wide table (adds MJD and visit metadata).
    fn table_wide(&self) -> TraceDisplay<'_>;

    /// Create a zero-allocation display adaptor (Default/compact mode).
    fn show(&self) -> TraceDisplay<'_>;

    /// Convenience: return a formatted `String` in **compact** mode.
    fn show_string(&self) -> String {
        format!("{}", self.show())
    }
}

impl TraceDisplayExt for Observations {
    fn table_wide(&self) -> TraceDisplay<'_> {
        TraceDisplay::new(self).wide(true)
    }
    fn show(&self) -> TraceDisplay<'_> {
        TraceDisplay::new(self)
    }
}

impl fmt::Display for TraceDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.obs.len();
        writeln!(f, "Observations (n={n})")?;
        writeln!(f, "-------------------")?;

        match self.mode {
            TableMode::Wide => f.write_str(&self.render_wide_comfy()),
            TableMode::Default => {
                let w = self.coord_prec + 5;
                writeln!(
                    f,
                    "{:>3}  {:>19}  {:>w$}  {:>w$}",
                    "#",
                    "Timestamp",
                    "Lat [deg]",
                    "Lon [deg]",
                    w = w
                )?;
                for (i, o) in self.obs.iter().enumerate() {
                    let r = self.format_row_fields(i, o);
                    writeln!(
                        f,
                        "{i:>3}  {ts:>19}  {lat:>w$}  {lon:>w$}",
                        i = r.i,
                        ts = r.timestamp,
                        lat = r.lat,
                        lon = r.lon,
                        w = w
                    )?;
                }
                Ok(())
            }
        }
    }
}
