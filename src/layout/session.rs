use thiserror::Error;

use super::labeler::Labeler;
use super::types::{AnchorPoint, LabelBox, LabelData, SceneLabel};
use crate::calendar::{day_of_year_from_month_day, parse_date_key};
use crate::config::LabelerConfig;
use crate::geometry::Viewport;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The zoom subsystem handed over a degenerate window; the engine's work
    /// rectangle must have positive extent.
    #[error("viewport must have positive dimensions, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

/// Convert the boundary records into the shared working array consumed by
/// every later pipeline step. Zero or unmeasured text sizes fall back to the
/// configured nominal box so no NaN reaches the energy function; a label
/// whose anchor sits outside the viewport gets `tile_visible = false`.
pub fn build_session(
    scene_labels: &[SceneLabel],
    viewport: Viewport,
    config: &LabelerConfig,
    year: i32,
) -> Result<Vec<LabelData>, SessionError> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Err(SessionError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let labels = scene_labels
        .iter()
        .map(|scene| {
            let width = if scene.width.is_finite() && scene.width > 0.0 {
                scene.width
            } else {
                config.fallback_label_width
            };
            let height = if scene.height.is_finite() && scene.height > 0.0 {
                scene.height
            } else {
                config.fallback_label_height
            };
            let day_of_year = parse_date_key(&scene.date_key)
                .map(|(month, day)| day_of_year_from_month_day(month, day, year))
                .unwrap_or(1);

            LabelData {
                date_key: scene.date_key.clone(),
                index: scene.index,
                text: scene.text.clone(),
                position: scene.home,
                original_position: scene.home,
                anchor: scene.anchor,
                anchor_radius: scene.anchor_radius,
                width,
                height,
                day_of_year,
                is_isolated: false,
                tile_visible: viewport.contains(scene.anchor.0, scene.anchor.1),
                should_show: true,
            }
        })
        .collect();

    Ok(labels)
}

/// Run the annealing engine over the session. Scene coordinates are shifted
/// by `(-viewport.x, -viewport.y)` into the engine's non-negative work
/// rectangle and shifted back on the way out; each run starts fresh from the
/// labels' home positions.
pub fn anneal_session(
    labels: &mut [LabelData],
    viewport: Viewport,
    config: &LabelerConfig,
    seed: u64,
) {
    if labels.is_empty() {
        return;
    }

    let offset_x = -viewport.x;
    let offset_y = -viewport.y;

    let mut boxes: Vec<LabelBox> = labels
        .iter()
        .map(|label| LabelBox {
            x: label.original_position.0 + offset_x,
            y: label.original_position.1 + offset_y,
            width: label.width,
            height: label.height,
        })
        .collect();
    let anchors: Vec<AnchorPoint> = labels
        .iter()
        .map(|label| AnchorPoint {
            x: label.anchor.0 + offset_x,
            y: label.anchor.1 + offset_y,
            radius: label.anchor_radius,
        })
        .collect();

    let mut engine = Labeler::new(config, viewport.width, viewport.height, seed);
    engine.run(&mut boxes, &anchors, config.sweeps);

    for (label, placed) in labels.iter_mut().zip(&boxes) {
        label.position = (placed.x - offset_x, placed.y - offset_y);
    }
}
