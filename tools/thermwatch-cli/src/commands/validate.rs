//! Check an event payload for data-quality problems.

use std::path::PathBuf;

use thermwatch_common::clock::parse_timestamp;
use thermwatch_overlay_core::{compute_air_quality_averages, compute_detection_stats};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating event at: {}", path.display());

    let event = super::load_event(&path)?;
    let mut issues = Vec::new();

    if event.date().is_none() {
        issues.push(format!("unreadable event date {:?}", event.event_date));
    }

    for image in &event.images {
        if let Err(e) = image.captured_at_utc() {
            issues.push(format!("image {}: {e}", image.image_id));
        }
        match image.intrinsic_size {
            None => issues.push(format!(
                "image {}: intrinsic size unknown (not decoded)",
                image.image_id
            )),
            Some(size) if !size.is_positive() => issues.push(format!(
                "image {}: invalid intrinsic size {}x{}",
                image.image_id, size.width, size.height
            )),
            Some(size) => {
                for det in &image.detections {
                    if det.rect.exceeds(size) {
                        issues.push(format!(
                            "detection {} on image {} extends past {}x{}",
                            det.detection_id, image.image_id, size.width, size.height
                        ));
                    }
                }
            }
        }
        for det in &image.detections {
            if !det.rect.is_well_formed() {
                issues.push(format!(
                    "detection {} on image {} has inverted corners",
                    det.detection_id, image.image_id
                ));
            }
            if !(0.0..=1.0).contains(&det.confidence) {
                issues.push(format!(
                    "detection {} confidence {} outside [0, 1]",
                    det.detection_id, det.confidence
                ));
            }
        }
    }

    for (index, sample) in event.air_quality.iter().enumerate() {
        let label = match sample.record_id {
            Some(id) => format!("sample #{index} (record {id})"),
            None => format!("sample #{index}"),
        };
        match sample.sampled_at.as_deref() {
            None => issues.push(format!("{label}: missing timestamp")),
            Some(raw) => {
                if let Err(e) = parse_timestamp(raw) {
                    issues.push(format!("{label}: {e}"));
                }
            }
        }
    }

    println!("  Images: {}", event.images.len());
    println!("  Air-quality samples: {}", event.air_quality.len());

    if issues.is_empty() {
        // Both reductions must succeed on a clean payload.
        compute_detection_stats(&event.images)?;
        compute_air_quality_averages(&event.air_quality)?;
        println!("\nEvent is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!("\n{} issue(s) found.", issues.len());
    }

    Ok(())
}
