//! Fit-center coordinate mapping.
//!
//! Detections are reported in the pixel space of the decoded image. The
//! viewport shows that image scaled uniformly to the largest size that fits
//! without cropping, centered, with letterboxing on the slack axis. This
//! module computes that transform once per frame and applies it to every
//! detection so boxes land on the pixels they describe.
//!
//! # Algorithm
//!
//! 1. `scale = min(viewport.w / image.w, viewport.h / image.h)`
//! 2. `scaled = image * scale`
//! 3. `offset = (viewport - scaled) / 2`
//! 4. each corner `p` maps to `p * scale + offset`
//! 5. confidence labels anchor at `(x1, max(y1 - margin, text_height))`

use thermwatch_common::config::{DetectionSpace, OverlayConfig};
use thermwatch_event_model::{DetectedImage, Dimensions, Point2D, Rect, ViewportFrame};

use crate::error::{DimensionSubject, OverlayError};

/// Uniform scale plus centering offset from image space to viewport space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f64,
    pub offset: Point2D,
    /// Size of the image as drawn inside the viewport.
    pub scaled_size: Dimensions,
}

impl FitTransform {
    /// Compute the fit-center transform for a frame.
    ///
    /// Image dimensions are checked first: a bad image is never fixed by
    /// waiting for layout.
    pub fn fit_center(frame: &ViewportFrame) -> Result<Self, OverlayError> {
        let image = frame.image_intrinsic_size;
        let viewport = frame.viewport_size;

        if !image.is_positive() {
            return Err(OverlayError::InvalidDimensions {
                subject: DimensionSubject::Image,
                width: image.width,
                height: image.height,
            });
        }
        check_viewport(viewport)?;

        let scale = (viewport.width / image.width).min(viewport.height / image.height);
        // Subnormal image sides overflow the ratio.
        if !scale.is_finite() {
            return Err(OverlayError::InvalidDimensions {
                subject: DimensionSubject::Image,
                width: image.width,
                height: image.height,
            });
        }
        let scaled_size = image.scaled(scale);
        let offset = Point2D::new(
            (viewport.width - scaled_size.width) / 2.0,
            (viewport.height - scaled_size.height) / 2.0,
        );

        Ok(Self {
            scale,
            offset,
            scaled_size,
        })
    }

    /// Map a rectangle from image space into viewport space.
    pub fn apply(&self, rect: &Rect) -> Rect {
        rect.transformed(self.scale, self.offset)
    }

    /// The drawn image's bounds inside the viewport.
    pub fn image_rect(&self) -> Rect {
        Rect::new(
            self.offset.x,
            self.offset.y,
            self.offset.x + self.scaled_size.width,
            self.offset.y + self.scaled_size.height,
        )
    }
}

fn check_viewport(viewport: Dimensions) -> Result<(), OverlayError> {
    if viewport.is_positive() {
        return Ok(());
    }
    let non_negative = |v: f64| v.is_finite() && v >= 0.0;
    if viewport.is_unset() && non_negative(viewport.width) && non_negative(viewport.height) {
        return Err(OverlayError::ViewportNotReady {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Err(OverlayError::InvalidDimensions {
        subject: DimensionSubject::Viewport,
        width: viewport.width,
        height: viewport.height,
    })
}

/// Placement rule for confidence labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    /// Gap above the box's top edge.
    pub margin: f64,
    /// Label text height; also the lowest baseline allowed, so labels on
    /// boxes touching the viewport top stay on canvas.
    pub text_height: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        let config = OverlayConfig::default();
        Self {
            margin: config.label_margin,
            text_height: config.label_text_height,
        }
    }
}

impl LabelStyle {
    /// Baseline anchor for the label of a box already in viewport space.
    pub fn anchor(&self, screen_rect: &Rect) -> Point2D {
        let top_left = screen_rect.top_left();
        Point2D::new(top_left.x, (top_left.y - self.margin).max(self.text_height))
    }
}

/// Maps detection boxes onto a viewport.
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    space: DetectionSpace,
    label: LabelStyle,
}

impl CoordinateMapper {
    /// Create a mapper from overlay configuration.
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            space: config.detection_space,
            label: LabelStyle {
                margin: config.label_margin,
                text_height: config.label_text_height,
            },
        }
    }

    /// Create a mapper with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(&OverlayConfig::default())
    }

    pub fn label_style(&self) -> &LabelStyle {
        &self.label
    }

    pub fn detection_space(&self) -> DetectionSpace {
        self.space
    }

    /// Map every rectangle into viewport space.
    ///
    /// Output has one rectangle per input, in input order. Coordinates
    /// outside the image bounds are transformed as-is.
    pub fn map_detections(
        &self,
        frame: &ViewportFrame,
        detections: &[Rect],
    ) -> Result<Vec<Rect>, OverlayError> {
        let transform = FitTransform::fit_center(frame)?;

        if detections.is_empty() {
            return Ok(Vec::new());
        }

        let mapped = match self.space {
            DetectionSpace::Intrinsic => detections.iter().map(|r| transform.apply(r)).collect(),
            DetectionSpace::InferFromExtent => {
                let ratio = extent_ratio(frame.image_intrinsic_size, detections);
                if ratio > 1.0 {
                    tracing::warn!(
                        ratio,
                        count = detections.len(),
                        "Detections exceed image bounds; rescaling by inferred coordinate ratio"
                    );
                    let shrink = 1.0 / ratio;
                    detections
                        .iter()
                        .map(|r| transform.apply(&r.transformed(shrink, Point2D::new(0.0, 0.0))))
                        .collect()
                } else {
                    detections.iter().map(|r| transform.apply(r)).collect()
                }
            }
        };

        tracing::debug!(
            scale = transform.scale,
            offset_x = transform.offset.x,
            offset_y = transform.offset.y,
            count = detections.len(),
            "Mapped detections into viewport"
        );

        Ok(mapped)
    }

    /// Map one decoded image's detections.
    pub fn map_image(
        &self,
        image: &DetectedImage,
        viewport_size: Dimensions,
    ) -> Result<Vec<Rect>, OverlayError> {
        let frame = image
            .frame_in(viewport_size)
            .ok_or(OverlayError::ImageNotDecoded {
                image_id: image.image_id,
            })?;
        self.map_detections(&frame, &image.rects())
    }

    /// Label anchor for a box already in viewport space.
    pub fn label_anchor(&self, screen_rect: &Rect) -> Point2D {
        self.label.anchor(screen_rect)
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Largest overshoot of detection coordinates past the image size.
/// `<= 1.0` means every detection fits.
fn extent_ratio(image: Dimensions, detections: &[Rect]) -> f64 {
    let (max_x, max_y) = detections.iter().fold((0.0_f64, 0.0_f64), |(mx, my), r| {
        (mx.max(r.x1).max(r.x2), my.max(r.y1).max(r.y2))
    });
    (max_x / image.width).max(max_y / image.height)
}
