//! Dashboard statistics for an event list.

use std::path::PathBuf;

use chrono::NaiveDate;
use thermwatch_overlay_core::{filter_events, pending_count, EventFilter, EventStatistics};

pub fn run(
    path: PathBuf,
    pending: bool,
    handled_by: Option<i64>,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let events = super::load_events(&path)?;

    let mut filter = match (pending, handled_by) {
        (true, _) => EventFilter::pending(),
        (false, Some(user_id)) => EventFilter::handled_by(user_id),
        (false, None) => EventFilter::all(),
    };
    if let Some(date) = date {
        filter = filter.on_date(date);
    }

    let selected = filter_events(&events, &filter);
    tracing::debug!(
        loaded = events.len(),
        selected = selected.len(),
        "Applied event filter"
    );
    let stats = EventStatistics::from_events(selected);

    println!("Events: {} (of {} loaded)", stats.total_events, events.len());
    println!("  Pending: {}", stats.pending);
    println!("  Confirmed: {}", stats.confirmed);
    println!("  Discarded: {}", stats.discarded);
    println!("  Detections: {}", stats.total_detections);
    match stats.mean_detections_per_event {
        Some(mean) => println!("  Mean detections/event: {mean:.2}"),
        None => println!("  Mean detections/event: n/a"),
    }
    if let (Some(first), Some(last)) = (stats.first_date, stats.last_date) {
        println!("  Dates: {first} to {last}");
    }
    println!("\nAwaiting triage overall: {}", pending_count(&events));

    Ok(())
}
