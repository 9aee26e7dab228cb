//! Admin dashboard statistics over a set of events.

use chrono::NaiveDate;
use serde::Serialize;
use thermwatch_event_model::{Event, EventStatus};

/// Status breakdown and detection totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventStatistics {
    pub total_events: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub discarded: usize,
    pub total_detections: usize,
    /// `None` when there are no events.
    pub mean_detections_per_event: Option<f64>,
    /// Earliest readable event date.
    pub first_date: Option<NaiveDate>,
    /// Latest readable event date.
    pub last_date: Option<NaiveDate>,
}

impl EventStatistics {
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut stats = Self {
            total_events: 0,
            pending: 0,
            confirmed: 0,
            discarded: 0,
            total_detections: 0,
            mean_detections_per_event: None,
            first_date: None,
            last_date: None,
        };

        for event in events {
            stats.total_events += 1;
            match event.status {
                EventStatus::Pending => stats.pending += 1,
                EventStatus::Confirmed => stats.confirmed += 1,
                EventStatus::Discarded => stats.discarded += 1,
            }
            stats.total_detections += event.detection_count();

            if let Some(date) = event.date() {
                stats.first_date = Some(stats.first_date.map_or(date, |d| d.min(date)));
                stats.last_date = Some(stats.last_date.map_or(date, |d| d.max(date)));
            }
        }

        if stats.total_events > 0 {
            stats.mean_detections_per_event =
                Some(stats.total_detections as f64 / stats.total_events as f64);
        }

        tracing::debug!(
            total = stats.total_events,
            pending = stats.pending,
            detections = stats.total_detections,
            "Computed event statistics"
        );

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermwatch_event_model::{DetectedImage, Detection, Rect};

    fn with_detections(id: i64, date: &str, status: EventStatus, n: usize) -> Event {
        let dets = (0..n)
            .map(|i| Detection::new(i as i64, id, 0.7, Rect::new(0.0, 0.0, 1.0, 1.0)))
            .collect();
        Event::new(id, date)
            .with_status(status)
            .with_images(vec![DetectedImage::new(id, "2025-11-03T12:00:00").with_detections(dets)])
    }

    #[test]
    fn test_status_breakdown() {
        let events = vec![
            with_detections(1, "2025-11-05", EventStatus::Pending, 3),
            with_detections(2, "2025-11-01", EventStatus::Confirmed, 1),
            with_detections(3, "2025-11-03", EventStatus::Discarded, 0),
            with_detections(4, "bad", EventStatus::Pending, 4),
        ];
        let stats = EventStatistics::from_events(&events);
        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.confirmed, 1);
        assert_eq!(stats.discarded, 1);
        assert_eq!(stats.total_detections, 8);
        assert!((stats.mean_detections_per_event.unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(stats.first_date.unwrap().to_string(), "2025-11-01");
        assert_eq!(stats.last_date.unwrap().to_string(), "2025-11-05");
    }

    #[test]
    fn test_no_events() {
        let stats = EventStatistics::from_events(&Vec::<Event>::new());
        assert_eq!(stats.total_events, 0);
        assert_eq!(stats.mean_detections_per_event, None);
        assert_eq!(stats.first_date, None);
    }
}
