//! Thermwatch Overlay Core
//!
//! Pure computation behind the event list and detail screens:
//! - **Coordinate mapping:** Fit-center transform from an image's intrinsic
//!   pixel space into the viewport that displays it, applied to detections
//! - **Overlay composition:** Screen boxes paired with confidence labels
//! - **Aggregation:** Per-event detection counts, preview image, time span,
//!   and deduplicated air-quality averages
//! - **Dashboard:** Event filtering, status statistics, and triage rules
//!
//! This crate does no I/O and holds no shared state. All inputs are data;
//! all outputs are new values, so every function is safe to call from any
//! thread.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod mapper;
pub mod overlay;
pub mod stats;
pub mod triage;

pub use aggregate::{
    compute_air_quality_averages, compute_detection_stats, summarize, summarize_event,
    AirQualityAverages, DetectionStats, EventSummary, TimeSpan,
};
pub use error::{AggregateError, DimensionSubject, OverlayError, TimestampOrigin, TriageError};
pub use filter::{filter_events, pending_count, EventFilter, EventScope};
pub use mapper::{CoordinateMapper, FitTransform, LabelStyle};
pub use overlay::{compose_overlay, confidence_label, OverlayBox};
pub use stats::EventStatistics;
pub use triage::{triage, TriageAction};
