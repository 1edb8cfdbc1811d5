pub mod collision;
pub mod isolation;
pub mod labeler;
pub mod session;
pub(crate) mod types;
pub mod visibility;

pub use collision::group_collisions;
pub use isolation::mark_isolation;
pub use labeler::Labeler;
pub use session::{anneal_session, build_session, SessionError};
pub use types::{AnchorPoint, LabelBox, LabelData, SceneLabel};
pub use visibility::{label_priority, quota_per_group, resolve_visibility};

use crate::annotations::AnnotationStore;
use crate::calendar::{days_in_year, Today};
use crate::config::{Config, VisibilityConfig};
use crate::geometry::Viewport;
use crate::scene::build_scene_labels;

/// Run the full placement pipeline for the current annotation set: derive
/// marker geometry, build the session, mark isolation, anneal label
/// positions, then group and resolve visibility. This is the annotation
/// add/edit/delete (and initial load) trigger; an empty annotation set
/// short-circuits after the build.
#[allow(clippy::too_many_arguments)]
pub fn run_label_pipeline(
    store: &AnnotationStore,
    year: i32,
    today: Today,
    viewport: Viewport,
    zoom: f32,
    measure: &dyn Fn(&str) -> (f32, f32),
    config: &Config,
    seed: u64,
) -> Result<Vec<LabelData>, SessionError> {
    let scene_labels = build_scene_labels(store, year, &config.wheel, measure);
    let mut labels = build_session(&scene_labels, viewport, &config.labeler, year)?;
    if labels.is_empty() {
        return Ok(labels);
    }

    mark_isolation(
        &mut labels,
        days_in_year(year),
        config.visibility.isolation_window_days,
    );
    anneal_session(&mut labels, viewport, &config.labeler, seed);
    refresh_visibility(&mut labels, zoom, store, today, year, &config.visibility);
    Ok(labels)
}

/// Re-run only collision grouping and visibility resolution over existing
/// positions. This is the zoom/pan trigger; the engine does not re-run.
pub fn refresh_visibility(
    labels: &mut [LabelData],
    zoom: f32,
    store: &AnnotationStore,
    today: Today,
    year: i32,
    config: &VisibilityConfig,
) {
    if labels.is_empty() {
        return;
    }
    let groups = group_collisions(labels, config.collision_padding);
    resolve_visibility(labels, &groups, zoom, store, today, year, config);
}

/// Persist a manual drag of one label: update the single session entry and
/// write the position through to the event record. Deliberately does not
/// re-anneal; only an annotation change or zoom does that.
pub fn apply_drag(
    store: &mut AnnotationStore,
    labels: &mut [LabelData],
    date_key: &str,
    index: usize,
    x: f32,
    y: f32,
) -> bool {
    if !store.set_position(date_key, index, x, y) {
        return false;
    }
    if let Some(label) = labels
        .iter_mut()
        .find(|label| label.date_key == date_key && label.index == index)
    {
        label.position = (x, y);
        label.original_position = (x, y);
    }
    true
}
