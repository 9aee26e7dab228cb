use std::path::PathBuf;

use thermwatch_common::clock::display_offset;
use thermwatch_event_model::{parse_event, parse_events, Dimensions, Event, Rect};
use thermwatch_overlay_core::{
    filter_events, summarize_event, CoordinateMapper, EventFilter, EventStatistics, OverlayError,
};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-event")
        .join(name);
    std::fs::read_to_string(path).expect("fixture should be readable")
}

fn load_event() -> Event {
    parse_event(&fixture("event.json")).expect("fixture event should parse")
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn fixture_event_summary_is_stable() {
    let event = load_event();
    let summary = summarize_event(&event).unwrap();

    assert_eq!(summary.total_images, 3);
    assert_eq!(summary.total_detections, 7);
    assert_eq!(summary.max_detections_in_single_image, 3);
    // 300 and 301 tie on three detections; 300 was captured first.
    assert_eq!(summary.preview_image_id, Some(300));

    let span = summary.time_span.unwrap();
    assert_eq!(span.format_local(display_offset(-360)), "12:04:09 - 12:04:15");

    // Records 1 and 2 share 18:04:09; only record 1 counts.
    assert_close(summary.air_quality.avg_pm1_0.unwrap(), 10.0);
    assert_close(summary.air_quality.avg_pm2_5.unwrap(), 18.0);
    assert_close(summary.air_quality.avg_pm10.unwrap(), 26.0);
}

#[test]
fn fixture_overlay_matches_letterbox_geometry() {
    let event = load_event();
    let mapper = CoordinateMapper::with_defaults();
    let image = event.image(301).unwrap();

    let boxes = mapper
        .overlay_for_image(image, Dimensions::new(300.0, 300.0))
        .unwrap();
    assert_eq!(boxes.len(), image.detections.len());

    let first = &boxes[0];
    assert_eq!(first.detection_id, 9001);
    assert_eq!(first.label, "91%");
    let expected = Rect::new(46.875, 84.375, 93.75, 131.25);
    assert_close(first.rect.x1, expected.x1);
    assert_close(first.rect.y1, expected.y1);
    assert_close(first.rect.x2, expected.x2);
    assert_close(first.rect.y2, expected.y2);

    // Box on the image's top edge keeps its label on canvas.
    let top = &boxes[1];
    assert_close(top.rect.y1, 37.5);
    assert_close(top.anchor.y, 40.0);
}

#[test]
fn fixture_undecoded_image_is_reported() {
    let event = load_event();
    let mapper = CoordinateMapper::with_defaults();
    let image = event.image(302).unwrap();

    let err = mapper
        .overlay_for_image(image, Dimensions::new(300.0, 300.0))
        .unwrap_err();
    assert_eq!(err, OverlayError::ImageNotDecoded { image_id: 302 });
}

#[test]
fn fixture_event_list_statistics_and_filters() {
    let events = parse_events(&fixture("events.json")).unwrap();

    let stats = EventStatistics::from_events(&events);
    assert_eq!(stats.total_events, 3);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.confirmed, 1);
    assert_eq!(stats.discarded, 1);
    assert_eq!(stats.total_detections, 3);
    assert_close(stats.mean_detections_per_event.unwrap(), 1.0);

    let mine: Vec<i64> = filter_events(&events, &EventFilter::handled_by(5))
        .iter()
        .map(|e| e.event_id)
        .collect();
    assert_eq!(mine, vec![39]);

    let day = chrono::NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
    let that_day = filter_events(&events, &EventFilter::all().on_date(day));
    assert_eq!(that_day.len(), 2);

    let pending = filter_events(&events, &EventFilter::pending());
    let pending_stats = EventStatistics::from_events(pending);
    assert_eq!(pending_stats.total_events, 1);
    assert_eq!(pending_stats.total_detections, 2);
}
