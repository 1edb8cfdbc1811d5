//! Marker geometry: where each event's label and connector live on the year
//! wheel. Pure derivation from the annotation store; the rendering layer
//! turns these records into actual text and line elements.

use crate::annotations::AnnotationStore;
use crate::calendar::{
    date_to_angle, day_of_year_from_month_day, days_in_year, format_date, format_date_range,
    parse_date_key,
};
use crate::config::WheelConfig;
use crate::geometry::polar_to_cartesian;
use crate::layout::SceneLabel;

/// Derive one [`SceneLabel`] per non-hidden annotation. Hidden events get no
/// marker at all and never reach the placement pipeline. `measure` supplies
/// text extents (the rendering layer owns fonts); degenerate measurements
/// are handled downstream at session build.
pub fn build_scene_labels(
    store: &AnnotationStore,
    year: i32,
    config: &WheelConfig,
    measure: &dyn Fn(&str) -> (f32, f32),
) -> Vec<SceneLabel> {
    let total_days = days_in_year(year);
    let mut out = Vec::new();

    for (date_key, list) in store.entries() {
        let Some((start_month, start_day)) = parse_date_key(date_key) else {
            continue;
        };
        for (index, annotation) in list.iter().enumerate() {
            if annotation.hidden {
                continue;
            }

            let (end_month, end_day) = annotation.end_date().unwrap_or((start_month, start_day));
            let start_doy = day_of_year_from_month_day(start_month, start_day, year);
            let end_doy = day_of_year_from_month_day(end_month, end_day, year);
            // Multi-day events hang off their midpoint day, single days off
            // the middle of their own wedge.
            let mid_doy = if annotation.is_multi_day() {
                (start_doy + end_doy) as f32 / 2.0
            } else {
                start_doy as f32 - 0.5
            };
            let angle = date_to_angle(mid_doy, total_days);

            let home = match (annotation.x, annotation.y) {
                (Some(x), Some(y)) => (x, y),
                _ => {
                    let radius = config.outer_radius
                        + config.label_radius_gap
                        + index as f32 * config.label_stack_step;
                    polar_to_cartesian(angle, radius)
                }
            };

            let anchor = connector_start(angle, home, config);

            let date_label = if annotation.is_multi_day() {
                format_date_range(start_month, start_day, end_month, end_day)
            } else {
                format_date(start_month, start_day)
            };
            // Only the first event of a day carries the date prefix.
            let text = if index == 0 {
                format!("{date_label}: {}", annotation.title)
            } else {
                annotation.title.clone()
            };

            let (width, height) = measure(&text);

            out.push(SceneLabel {
                date_key: date_key.to_string(),
                index,
                text,
                home,
                anchor,
                anchor_radius: config.anchor_radius,
                width,
                height,
            });
        }
    }

    out
}

/// Where a label's connector meets the wheel: just inside the inner edge
/// when the label has been dragged into the ring, just outside the outer
/// edge otherwise.
pub fn connector_start(angle: f32, label_pos: (f32, f32), config: &WheelConfig) -> (f32, f32) {
    let label_dist = (label_pos.0 * label_pos.0 + label_pos.1 * label_pos.1).sqrt();
    let radius = if label_dist < config.inner_radius {
        config.inner_radius - config.label_radius_gap
    } else {
        config.outer_radius + config.label_radius_gap
    };
    polar_to_cartesian(angle, radius)
}

/// Endpoint of a connector line, stopped `gap` units short of the text so
/// the line does not touch the glyphs.
pub fn connector_end(start: (f32, f32), label_pos: (f32, f32), gap: f32) -> (f32, f32) {
    let dx = label_pos.0 - start.0;
    let dy = label_pos.1 - start.1;
    let len = (dx * dx + dy * dy).sqrt();
    if len > gap {
        (label_pos.0 - dx / len * gap, label_pos.1 - dy / len * gap)
    } else {
        label_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::Annotation;

    fn fixed_measure(_text: &str) -> (f32, f32) {
        (60.0, 12.0)
    }

    fn config() -> WheelConfig {
        WheelConfig::default()
    }

    #[test]
    fn hidden_events_produce_no_marker() {
        let mut store = AnnotationStore::new();
        store.add("6-1", Annotation::new("visible"));
        let mut hidden = Annotation::new("secret");
        hidden.hidden = true;
        store.add("6-1", hidden);

        let labels = build_scene_labels(&store, 2026, &config(), &fixed_measure);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].text, "Jun 1: visible");
    }

    #[test]
    fn stacked_events_step_outward_and_drop_the_date() {
        let mut store = AnnotationStore::new();
        store.add("6-1", Annotation::new("first"));
        store.add("6-1", Annotation::new("second"));

        let labels = build_scene_labels(&store, 2026, &config(), &fixed_measure);
        assert_eq!(labels[0].text, "Jun 1: first");
        assert_eq!(labels[1].text, "second");

        let cfg = config();
        let dist0 = (labels[0].home.0.powi(2) + labels[0].home.1.powi(2)).sqrt();
        let dist1 = (labels[1].home.0.powi(2) + labels[1].home.1.powi(2)).sqrt();
        assert!((dist0 - (cfg.outer_radius + cfg.label_radius_gap)).abs() < 1e-3);
        assert!((dist1 - dist0 - cfg.label_stack_step).abs() < 1e-3);
    }

    #[test]
    fn stored_positions_override_the_default_slot() {
        let mut store = AnnotationStore::new();
        let mut dragged = Annotation::new("moved");
        dragged.x = Some(42.0);
        dragged.y = Some(-17.0);
        store.add("6-1", dragged);

        let labels = build_scene_labels(&store, 2026, &config(), &fixed_measure);
        assert_eq!(labels[0].home, (42.0, -17.0));
    }

    #[test]
    fn multi_day_events_anchor_at_their_midpoint() {
        let mut store = AnnotationStore::new();
        let mut range = Annotation::new("festival");
        range.end_month = Some(5);
        range.end_day = Some(11);
        store.add("6-1", range);
        store.add("6-6", Annotation::new("midpoint"));

        let labels = build_scene_labels(&store, 2026, &config(), &fixed_measure);
        assert_eq!(labels[0].text, "Jun 1-11: festival");
        // June 1-11 midpoint is day 157, June 6's wedge center is 157.5; the
        // two anchors land within a day's angle of each other.
        let angle_gap = (labels[0].anchor.1 - labels[1].anchor.1).abs()
            + (labels[0].anchor.0 - labels[1].anchor.0).abs();
        assert!(angle_gap < 4.0, "anchors too far apart: {angle_gap}");
    }

    #[test]
    fn connector_start_side_follows_the_label() {
        let cfg = config();
        let outside = connector_start(0.0, (cfg.outer_radius + 10.0, 0.0), &cfg);
        let outside_dist = (outside.0.powi(2) + outside.1.powi(2)).sqrt();
        assert!((outside_dist - (cfg.outer_radius + cfg.label_radius_gap)).abs() < 1e-3);

        let inside = connector_start(0.0, (50.0, 0.0), &cfg);
        let inside_dist = (inside.0.powi(2) + inside.1.powi(2)).sqrt();
        assert!((inside_dist - (cfg.inner_radius - cfg.label_radius_gap)).abs() < 1e-3);
    }

    #[test]
    fn connector_end_trims_short_of_the_text() {
        let end = connector_end((0.0, 0.0), (10.0, 0.0), 3.0);
        assert!((end.0 - 7.0).abs() < 1e-4);
        assert_eq!(end.1, 0.0);

        // Too close to trim: the endpoint collapses onto the label.
        let end = connector_end((0.0, 0.0), (2.0, 0.0), 3.0);
        assert_eq!(end, (2.0, 0.0));
    }
}
