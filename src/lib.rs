//! time-scale-rs: calendar-aware time-scale division engine.
//!
//! Divides time intervals (milliseconds since 1970 UTC) into major, medium
//! and minor ticks aligned to calendar units, from milliseconds to years,
//! handling variable month lengths, leap years, weeks, daylight-saving
//! offsets and the absence of year 0.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{DateScaleEngine, DateScaleEngineConfig, ScaleDivision, ScaleEngine};
pub use error::{ScaleError, ScaleResult};
