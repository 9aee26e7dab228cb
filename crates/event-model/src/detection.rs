//! Detections and the captured images that carry them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thermwatch_common::clock::{parse_timestamp, TimestampError};

use crate::geometry::{Dimensions, Rect, ViewportFrame};

/// Backend identifier for an image.
pub type ImageId = i64;

/// One bounding box produced by the recognition model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "deteccion_id")]
    pub detection_id: i64,

    #[serde(rename = "imagen_id")]
    pub image_id: ImageId,

    /// Model confidence in `[0.0, 1.0]`.
    #[serde(rename = "confianza")]
    pub confidence: f64,

    /// Box in the owning image's intrinsic pixel space.
    #[serde(flatten)]
    pub rect: Rect,
}

impl Detection {
    pub fn new(detection_id: i64, image_id: ImageId, confidence: f64, rect: Rect) -> Self {
        Self {
            detection_id,
            image_id,
            confidence,
            rect,
        }
    }
}

/// One captured frame of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedImage {
    #[serde(rename = "imagen_id")]
    pub image_id: ImageId,

    #[serde(rename = "evento_id", default)]
    pub event_id: Option<i64>,

    /// Location the image loader fetches the bitmap from.
    #[serde(rename = "ruta_imagen", default)]
    pub path: String,

    /// Upload time as sent by the backend.
    #[serde(rename = "hora_subida")]
    pub captured_at: String,

    /// Decoded pixel size. Filled in by the image loader after decode;
    /// absent in raw API payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intrinsic_size: Option<Dimensions>,

    #[serde(rename = "detecciones", default)]
    pub detections: Vec<Detection>,
}

impl DetectedImage {
    pub fn new(image_id: ImageId, captured_at: impl Into<String>) -> Self {
        Self {
            image_id,
            event_id: None,
            path: String::new(),
            captured_at: captured_at.into(),
            intrinsic_size: None,
            detections: Vec::new(),
        }
    }

    /// Attach the decoded pixel size.
    pub fn with_intrinsic_size(mut self, size: Dimensions) -> Self {
        self.intrinsic_size = Some(size);
        self
    }

    pub fn with_detections(mut self, detections: Vec<Detection>) -> Self {
        self.detections = detections;
        self
    }

    /// Parsed capture time.
    pub fn captured_at_utc(&self) -> Result<DateTime<Utc>, TimestampError> {
        parse_timestamp(&self.captured_at)
    }

    pub fn detection_count(&self) -> usize {
        self.detections.len()
    }

    /// Detection boxes in input order.
    pub fn rects(&self) -> Vec<Rect> {
        self.detections.iter().map(|d| d.rect).collect()
    }

    /// Confidences in the same order as [`rects`](Self::rects).
    pub fn confidences(&self) -> Vec<f64> {
        self.detections.iter().map(|d| d.confidence).collect()
    }

    /// Pair this image with a viewport, once its intrinsic size is known.
    pub fn frame_in(&self, viewport_size: Dimensions) -> Option<ViewportFrame> {
        self.intrinsic_size
            .map(|size| ViewportFrame::new(size, viewport_size))
    }
}
