//! # footprint
//!
//! Dense spatio-temporal footprints from sparse location traces.
//!
//! Visit records (`id, start_time, hour, duration, type, lat, lon`) are grouped
//! per entity into chronologically sorted traces, then each trace is encoded into
//! a `D × 2S` grid: one row per calendar day, one latitude and one longitude
//! column per time slot (`S = 96` fifteen-minute slots by default). Slots without
//! an observation hold the last known position. The decoder turns a grid back
//! into a dense, per-slot trace.
//!
//! ```rust
//! use footprint::{FootprintBatch, GridParams, TraceSet};
//!
//! let csv = "\
//! id,start_time,hour,duration,type,lat,lon
//! u1,2023-04-01 00:00:00,0,10,home,1.0,100.0
//! u1,2023-04-01 06:00:00,6,30,work,2.0,101.0
//! ";
//! let traces: TraceSet = footprint::load(csv.as_bytes()).unwrap();
//! let params = GridParams::default();
//! let results = traces.encode_all(&params);
//!
//! let fp = results["u1"].as_ref().unwrap();
//! assert_eq!(fp.grid().shape(), (1, 192));
//! assert_eq!(fp.decode(&params).unwrap().len(), 96);
//! ```
pub mod constants;
pub mod footprint_errors;
pub mod grid;
pub mod observations;
pub mod time;
pub mod traces;

pub use constants::{EntityId, Grid, Observations, TraceSet};
pub use footprint_errors::{FootprintError, ParseRecordError};
pub use grid::{
    batch::{FootprintBatch, FullFootprintResult},
    decoder::{decode, decode_flat},
    encoder::encode,
    Footprint, GridBounds, GridParams,
};
pub use observations::{Observation, VisitMeta};
pub use traces::{load, trace_file::TraceFile, trace_stats::TraceStats};
