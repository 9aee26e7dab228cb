//! Thermwatch Event Model
//!
//! Defines the data contracts shared by the overlay and aggregation code:
//! - **Geometry:** Pixel dimensions, rectangles, and viewport frames
//! - **Detections:** Bounding boxes produced by the recognition model and
//!   the captured images they belong to
//! - **Air quality:** Telemetry samples recorded around an event
//! - **Events:** The triage unit operators confirm or discard
//!
//! Detection coordinates are only meaningful against the intrinsic size of
//! the image they were computed on. Wire field names follow the backend API.

pub mod air_quality;
pub mod detection;
pub mod event;
pub mod geometry;

pub use air_quality::*;
pub use detection::*;
pub use event::*;
pub use geometry::*;
