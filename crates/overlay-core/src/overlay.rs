//! Overlay composition: screen boxes paired with their confidence labels.
//!
//! The presentation layer draws exactly what this returns, one box per
//! detection in input order.

use serde::Serialize;
use thermwatch_event_model::{DetectedImage, Detection, Dimensions, Point2D, Rect, ViewportFrame};

use crate::error::OverlayError;
use crate::mapper::CoordinateMapper;

/// Drawing instruction for a single detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayBox {
    pub detection_id: i64,
    /// Box in viewport pixels.
    pub rect: Rect,
    /// Confidence text, e.g. `"87%"`.
    pub label: String,
    /// Baseline origin for `label`.
    pub anchor: Point2D,
    pub confidence: f64,
}

/// Confidence as a whole percentage, truncated.
pub fn confidence_label(confidence: f64) -> String {
    let clamped = if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    };
    format!("{}%", (clamped * 100.0) as u32)
}

/// Map detections and attach labels.
pub fn compose_overlay(
    mapper: &CoordinateMapper,
    frame: &ViewportFrame,
    detections: &[Detection],
) -> Result<Vec<OverlayBox>, OverlayError> {
    let rects: Vec<Rect> = detections.iter().map(|d| d.rect).collect();
    let screen = mapper.map_detections(frame, &rects)?;

    Ok(detections
        .iter()
        .zip(screen)
        .map(|(det, rect)| OverlayBox {
            detection_id: det.detection_id,
            rect,
            label: confidence_label(det.confidence),
            anchor: mapper.label_anchor(&rect),
            confidence: det.confidence,
        })
        .collect())
}

impl CoordinateMapper {
    /// Compose the overlay for one decoded image.
    pub fn overlay_for_image(
        &self,
        image: &DetectedImage,
        viewport_size: Dimensions,
    ) -> Result<Vec<OverlayBox>, OverlayError> {
        let frame = image
            .frame_in(viewport_size)
            .ok_or(OverlayError::ImageNotDecoded {
                image_id: image.image_id,
            })?;
        compose_overlay(self, &frame, &image.detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_label_truncates() {
        assert_eq!(confidence_label(0.876), "87%");
        assert_eq!(confidence_label(1.0), "100%");
        assert_eq!(confidence_label(0.0), "0%");
        assert_eq!(confidence_label(1.7), "100%");
        assert_eq!(confidence_label(-0.2), "0%");
        assert_eq!(confidence_label(f64::NAN), "0%");
    }

    #[test]
    fn test_compose_preserves_order_and_labels() {
        let mapper = CoordinateMapper::with_defaults();
        let frame = ViewportFrame::new(Dimensions::new(640.0, 480.0), Dimensions::new(300.0, 300.0));
        let detections = vec![
            Detection::new(1, 9, 0.91, Rect::new(100.0, 100.0, 200.0, 200.0)),
            Detection::new(2, 9, 0.42, Rect::new(0.0, 0.0, 64.0, 48.0)),
        ];

        let boxes = compose_overlay(&mapper, &frame, &detections).unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].detection_id, 1);
        assert_eq!(boxes[0].label, "91%");
        assert_eq!(boxes[1].label, "42%");

        // Second box touches the drawn image's top edge at y = 37.5,
        // so its label clamps to the text height.
        assert!((boxes[1].rect.y1 - 37.5).abs() < 1e-9);
        assert!((boxes[1].anchor.y - 40.0).abs() < 1e-9);
        assert!((boxes[0].anchor.y - (84.375 - 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_overlay_for_image_uses_intrinsic_size() {
        let mapper = CoordinateMapper::with_defaults();
        let image = DetectedImage::new(3, "2025-11-03T12:00:00")
            .with_intrinsic_size(Dimensions::new(100.0, 100.0))
            .with_detections(vec![Detection::new(
                7,
                3,
                0.5,
                Rect::new(10.0, 10.0, 20.0, 20.0),
            )]);

        let boxes = mapper
            .overlay_for_image(&image, Dimensions::new(200.0, 400.0))
            .unwrap();
        // scale 2, offset (0, 100)
        assert_eq!(boxes[0].rect, Rect::new(20.0, 120.0, 40.0, 140.0));
    }

    #[test]
    fn test_overlay_propagates_not_ready() {
        let mapper = CoordinateMapper::with_defaults();
        let image = DetectedImage::new(3, "2025-11-03T12:00:00")
            .with_intrinsic_size(Dimensions::new(100.0, 100.0));
        let err = mapper
            .overlay_for_image(&image, Dimensions::new(0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, OverlayError::ViewportNotReady { .. }));
    }
}
