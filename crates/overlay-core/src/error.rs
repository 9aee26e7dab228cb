//! Failure modes of the overlay and aggregation code.
//!
//! Every error names the precondition that failed. Nothing here is
//! transient: retrying with the same input yields the same error, except
//! [`OverlayError::ViewportNotReady`], which clears once layout completes.

use std::fmt;

use thermwatch_common::error::ThermwatchError;
use thermwatch_event_model::{EventId, EventStatus, ImageId, UserRole};

/// Which surface had unusable dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionSubject {
    Image,
    Viewport,
}

impl fmt::Display for DimensionSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => f.write_str("image"),
            Self::Viewport => f.write_str("viewport"),
        }
    }
}

/// Coordinate mapping failures. The caller skips drawing the frame.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverlayError {
    #[error("invalid {subject} dimensions {width}x{height}")]
    InvalidDimensions {
        subject: DimensionSubject,
        width: f64,
        height: f64,
    },

    #[error("viewport not laid out yet ({width}x{height})")]
    ViewportNotReady { width: f64, height: f64 },

    #[error("image {image_id} has not been decoded; intrinsic size unknown")]
    ImageNotDecoded { image_id: ImageId },
}

/// Where a malformed timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampOrigin {
    Image {
        image_id: ImageId,
    },
    Sample {
        index: usize,
        record_id: Option<i64>,
    },
}

impl fmt::Display for TimestampOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image { image_id } => write!(f, "image {image_id}"),
            Self::Sample {
                index,
                record_id: Some(id),
            } => write!(f, "sample #{index} (record {id})"),
            Self::Sample {
                index,
                record_id: None,
            } => write!(f, "sample #{index}"),
        }
    }
}

/// Aggregation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    #[error("malformed timestamp on {origin}: {value:?} ({reason})")]
    MalformedTimestamp {
        origin: TimestampOrigin,
        value: String,
        reason: String,
    },
}

/// Triage rule violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriageError {
    #[error("event {event_id} is already {}", .status.label().to_lowercase())]
    AlreadyTriaged {
        event_id: EventId,
        status: EventStatus,
    },

    #[error("role {role:?} may not triage events")]
    NotPermitted { role: UserRole },
}

impl From<OverlayError> for ThermwatchError {
    fn from(err: OverlayError) -> Self {
        ThermwatchError::overlay(err.to_string())
    }
}

impl From<AggregateError> for ThermwatchError {
    fn from(err: AggregateError) -> Self {
        ThermwatchError::aggregation(err.to_string())
    }
}

impl From<TriageError> for ThermwatchError {
    fn from(err: TriageError) -> Self {
        ThermwatchError::triage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_origin_display() {
        let origin = TimestampOrigin::Sample {
            index: 2,
            record_id: Some(41),
        };
        assert_eq!(origin.to_string(), "sample #2 (record 41)");
        assert_eq!(
            TimestampOrigin::Image { image_id: 7 }.to_string(),
            "image 7"
        );
    }

    #[test]
    fn test_errors_lift_into_top_level() {
        let err: ThermwatchError = OverlayError::ViewportNotReady {
            width: 0.0,
            height: 0.0,
        }
        .into();
        assert!(matches!(err, ThermwatchError::Overlay { .. }));

        let err: ThermwatchError = TriageError::AlreadyTriaged {
            event_id: 4,
            status: EventStatus::Confirmed,
        }
        .into();
        assert_eq!(err.to_string(), "Triage error: event 4 is already confirmed");
    }
}
