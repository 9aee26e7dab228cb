//! Summarize one event.

use std::path::PathBuf;

use thermwatch_common::clock::display_offset;
use thermwatch_common::config::AppConfig;
use thermwatch_overlay_core::summarize_event;

pub fn run(path: PathBuf, json: bool, config: &AppConfig) -> anyhow::Result<()> {
    let event = super::load_event(&path)?;
    let summary =
        summarize_event(&event).map_err(|e| anyhow::anyhow!("Failed to summarize event: {e}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let offset = display_offset(config.display.utc_offset_minutes);

    println!("Event {} ({})", event.event_id, event.event_date);
    println!("  Status: {}", event.status.label());
    println!(
        "  Description: {}",
        event.description.as_deref().unwrap_or("No description")
    );
    if let Some(ref user) = event.user {
        println!("  Handled by: {}", user.username);
    }
    println!();

    println!("Detections:");
    println!("  Images: {}", summary.total_images);
    println!("  Total: {}", summary.total_detections);
    println!("  Max in one image: {}", summary.max_detections_in_single_image);
    match summary.preview_image_id {
        Some(id) => println!("  Preview image: {id}"),
        None => println!("  Preview image: none"),
    }
    match summary.time_span {
        Some(span) => println!("  Time span: {}", span.format_local(offset)),
        None => println!("  Time span: no images"),
    }
    println!();

    println!("Air quality:");
    println!("  {}", summary.air_quality.summary_line());

    Ok(())
}
