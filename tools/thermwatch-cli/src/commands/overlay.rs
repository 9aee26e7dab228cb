//! Map one image's detections onto a viewport.

use std::path::PathBuf;

use thermwatch_common::config::AppConfig;
use thermwatch_event_model::Dimensions;
use thermwatch_overlay_core::{CoordinateMapper, FitTransform};

pub fn run(
    path: PathBuf,
    image_id: i64,
    viewport_width: f64,
    viewport_height: f64,
    image_size: Option<(f64, f64)>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let event = super::load_event(&path)?;
    let mut image = event
        .image(image_id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Event {} has no image {image_id}", event.event_id))?;

    if let Some((w, h)) = image_size {
        image = image.with_intrinsic_size(Dimensions::new(w, h));
    }

    let viewport = Dimensions::new(viewport_width, viewport_height);
    let mapper = CoordinateMapper::new(&config.overlay);
    let boxes = mapper
        .overlay_for_image(&image, viewport)
        .map_err(|e| anyhow::anyhow!("Cannot map image {image_id}: {e}"))?;

    if let Some(frame) = image.frame_in(viewport) {
        let transform = FitTransform::fit_center(&frame)?;
        println!(
            "Image {} ({}x{}) in viewport {}x{}",
            image_id,
            frame.image_intrinsic_size.width,
            frame.image_intrinsic_size.height,
            viewport.width,
            viewport.height
        );
        println!(
            "  Scale: {:.6}  Offset: ({:.3}, {:.3})",
            transform.scale, transform.offset.x, transform.offset.y
        );
    }

    if boxes.is_empty() {
        println!("  No detections.");
        return Ok(());
    }

    for b in &boxes {
        println!(
            "  #{:<6} {:>5}  ({:.3}, {:.3}) - ({:.3}, {:.3})  label @ ({:.3}, {:.3})",
            b.detection_id, b.label, b.rect.x1, b.rect.y1, b.rect.x2, b.rect.y2, b.anchor.x, b.anchor.y
        );
    }

    Ok(())
}
