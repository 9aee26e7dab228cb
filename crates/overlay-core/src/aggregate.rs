//! Event aggregation: the numbers shown on list rows and detail headers.
//!
//! Images are not assumed to arrive in capture order, and telemetry may
//! contain duplicate transmissions. Duplicates are collapsed by whole
//! second (first seen wins) before any averaging. A channel with no
//! readings averages to `None`, never to zero.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::collections::HashSet;

use thermwatch_common::clock::{format_local_time, parse_timestamp, truncate_to_second};
use thermwatch_event_model::{AirQualitySample, DetectedImage, Event, ImageId};

use crate::error::{AggregateError, TimestampOrigin};

/// Earliest and latest capture time of an event's images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSpan {
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// `"HH:MM:SS - HH:MM:SS"` in the given display offset.
    pub fn format_local(&self, offset: FixedOffset) -> String {
        format!(
            "{} - {}",
            format_local_time(self.start, offset),
            format_local_time(self.end, offset)
        )
    }
}

/// Detection-derived figures for one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionStats {
    pub total_images: usize,
    pub total_detections: usize,
    pub max_detections_in_single_image: usize,
    /// Image with the most detections; earliest capture wins ties.
    pub preview_image_id: Option<ImageId>,
    pub time_span: Option<TimeSpan>,
}

/// Mean particulate readings, per channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AirQualityAverages {
    pub avg_pm1_0: Option<f64>,
    pub avg_pm2_5: Option<f64>,
    pub avg_pm10: Option<f64>,
}

impl AirQualityAverages {
    /// No channel had any reading.
    pub fn is_empty(&self) -> bool {
        self.avg_pm1_0.is_none() && self.avg_pm2_5.is_none() && self.avg_pm10.is_none()
    }

    /// One-line list-row text, absent channels omitted.
    pub fn summary_line(&self) -> String {
        let parts: Vec<String> = [
            ("PM10", self.avg_pm10),
            ("PM2.5", self.avg_pm2_5),
            ("PM1.0", self.avg_pm1_0),
        ]
        .iter()
        .filter_map(|(name, value)| value.map(|v| format!("{name}: {v:.1} ug/m3")))
        .collect();

        if parts.is_empty() {
            "No air quality data".to_string()
        } else {
            parts.join(" | ")
        }
    }
}

/// Everything a list row or detail header needs about an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub total_images: usize,
    pub total_detections: usize,
    pub max_detections_in_single_image: usize,
    pub preview_image_id: Option<ImageId>,
    pub time_span: Option<TimeSpan>,
    pub air_quality: AirQualityAverages,
}

/// Reduce an event's images to detection counts, preview and time span.
pub fn compute_detection_stats(
    images: &[DetectedImage],
) -> Result<DetectionStats, AggregateError> {
    let mut total_detections = 0;
    let mut max_detections = 0;
    // (count, captured_at, id) of the current preview candidate.
    let mut preview: Option<(usize, DateTime<Utc>, ImageId)> = None;
    let mut span: Option<TimeSpan> = None;

    for image in images {
        let captured_at = image
            .captured_at_utc()
            .map_err(|e| AggregateError::MalformedTimestamp {
                origin: TimestampOrigin::Image {
                    image_id: image.image_id,
                },
                value: e.value,
                reason: e.reason,
            })?;
        let count = image.detection_count();

        total_detections += count;
        max_detections = max_detections.max(count);

        let better = match preview {
            None => true,
            Some((best_count, best_at, _)) => {
                count > best_count || (count == best_count && captured_at < best_at)
            }
        };
        if better {
            preview = Some((count, captured_at, image.image_id));
        }

        span = Some(match span {
            None => TimeSpan {
                start: captured_at,
                end: captured_at,
            },
            Some(s) => TimeSpan {
                start: s.start.min(captured_at),
                end: s.end.max(captured_at),
            },
        });
    }

    let stats = DetectionStats {
        total_images: images.len(),
        total_detections,
        max_detections_in_single_image: max_detections,
        preview_image_id: preview.map(|(_, _, id)| id),
        time_span: span,
    };

    tracing::debug!(
        images = stats.total_images,
        detections = stats.total_detections,
        max = stats.max_detections_in_single_image,
        preview = ?stats.preview_image_id,
        "Computed detection stats"
    );

    Ok(stats)
}

/// Keep the first sample seen for each distinct whole second.
///
/// Fails on the first sample whose timestamp is missing or unparseable.
pub fn dedupe_by_second(
    samples: &[AirQualitySample],
) -> Result<Vec<&AirQualitySample>, AggregateError> {
    let mut seen = HashSet::with_capacity(samples.len());
    let mut kept = Vec::with_capacity(samples.len());

    for (index, sample) in samples.iter().enumerate() {
        let origin = TimestampOrigin::Sample {
            index,
            record_id: sample.record_id,
        };
        let raw = sample
            .sampled_at
            .as_deref()
            .ok_or_else(|| AggregateError::MalformedTimestamp {
                origin,
                value: String::new(),
                reason: "missing".to_string(),
            })?;
        let ts = parse_timestamp(raw).map_err(|e| AggregateError::MalformedTimestamp {
            origin,
            value: e.value,
            reason: e.reason,
        })?;

        if seen.insert(truncate_to_second(ts)) {
            kept.push(sample);
        }
    }

    let dropped = samples.len() - kept.len();
    if dropped > 0 {
        tracing::warn!(
            dropped,
            kept = kept.len(),
            "Dropped duplicate air-quality samples sharing a timestamp second"
        );
    }

    Ok(kept)
}

/// Running mean over the readings that are present.
#[derive(Debug, Default, Clone, Copy)]
struct ChannelMean {
    sum: f64,
    count: usize,
}

impl ChannelMean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Average each particulate channel over deduplicated samples.
pub fn compute_air_quality_averages(
    samples: &[AirQualitySample],
) -> Result<AirQualityAverages, AggregateError> {
    let unique = dedupe_by_second(samples)?;

    let mut pm1_0 = ChannelMean::default();
    let mut pm2_5 = ChannelMean::default();
    let mut pm10 = ChannelMean::default();
    for sample in unique {
        pm1_0.push(sample.pm1_0);
        pm2_5.push(sample.pm2_5);
        pm10.push(sample.pm10);
    }

    Ok(AirQualityAverages {
        avg_pm1_0: pm1_0.mean(),
        avg_pm2_5: pm2_5.mean(),
        avg_pm10: pm10.mean(),
    })
}

/// Build a full summary from raw images and samples.
pub fn summarize(
    images: &[DetectedImage],
    samples: &[AirQualitySample],
) -> Result<EventSummary, AggregateError> {
    let stats = compute_detection_stats(images)?;
    let air_quality = compute_air_quality_averages(samples)?;

    Ok(EventSummary {
        total_images: stats.total_images,
        total_detections: stats.total_detections,
        max_detections_in_single_image: stats.max_detections_in_single_image,
        preview_image_id: stats.preview_image_id,
        time_span: stats.time_span,
        air_quality,
    })
}

/// Summarize an event from its own images and air-quality records.
pub fn summarize_event(event: &Event) -> Result<EventSummary, AggregateError> {
    summarize(&event.images, &event.air_quality)
}
