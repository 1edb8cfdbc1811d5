use std::cmp::Ordering;

use super::types::LabelData;
use crate::annotations::{duration_days, Annotation, AnnotationStore};
use crate::calendar::{day_of_year_from_month_day, parse_date_key, Today};
use crate::config::VisibilityConfig;

/// How many labels each collision group may reveal at the given zoom.
/// Scales linearly from the minimum at zoom 1 to the maximum at the top of
/// the zoom range.
pub fn quota_per_group(zoom: f32, config: &VisibilityConfig) -> usize {
    let span = (config.max_zoom - 1.0).max(1.0);
    let range = config
        .max_labels_per_group
        .saturating_sub(config.min_labels_per_group) as f32;
    let raw = (1.0 + (zoom - 1.0) * range / span).floor() as i64;
    raw.clamp(
        config.min_labels_per_group as i64,
        config.max_labels_per_group as i64,
    ) as usize
}

/// Priority of one event for visibility contests (higher wins):
/// proximity to today decaying one point per week from 50, a +10 bias for
/// events that have not passed yet, and a duration bonus that favors short
/// and medium events over long-running ones.
pub fn label_priority(date_key: &str, annotation: &Annotation, today: Today, year: i32) -> f32 {
    let Some((month, day)) = parse_date_key(date_key) else {
        return 0.0;
    };
    let event_doy = day_of_year_from_month_day(month, day, year) as f32;

    // Round half up.
    let days_diff = (event_doy - today.day_of_year + 0.5).floor().abs();
    let weeks_diff = days_diff / 7.0;
    let mut priority = (50.0 - weeks_diff).max(0.0);

    // Day-granular comparison so an event on the current day still counts
    // as upcoming.
    if event_doy >= today.day_of_year.floor() {
        priority += 10.0;
    }

    priority += match duration_days(date_key, annotation, year) {
        2..=4 => 15.0,
        1 => 5.0,
        _ => 0.0,
    };

    priority
}

/// Decide `should_show` for every label: within each collision group, rank
/// members by priority and reveal the zoom quota's worth of them. Isolated
/// members are always revealed and never consume quota. Labels outside all
/// groups (hidden tiles) stay hidden.
pub fn resolve_visibility(
    labels: &mut [LabelData],
    groups: &[Vec<usize>],
    zoom: f32,
    store: &AnnotationStore,
    today: Today,
    year: i32,
    config: &VisibilityConfig,
) {
    let quota = quota_per_group(zoom, config);

    for label in labels.iter_mut() {
        label.should_show = false;
    }

    for group in groups {
        let mut ranked: Vec<(usize, f32)> = group
            .iter()
            .map(|&index| {
                let label = &labels[index];
                let priority = store
                    .get(&label.date_key, label.index)
                    .map(|annotation| label_priority(&label.date_key, annotation, today, year))
                    .unwrap_or(0.0);
                (index, priority)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let mut shown = 0_usize;
        for (index, _) in ranked {
            if labels[index].is_isolated {
                labels[index].should_show = true;
            } else if shown < quota {
                labels[index].should_show = true;
                shown += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::label_for;

    fn config() -> VisibilityConfig {
        VisibilityConfig::default()
    }

    #[test]
    fn quota_endpoints_are_exact() {
        let config = config();
        assert_eq!(quota_per_group(1.0, &config), 1);
        assert_eq!(quota_per_group(15.0, &config), 4);
    }

    #[test]
    fn quota_is_monotonic_and_bounded() {
        let config = config();
        let mut previous = 0;
        let mut zoom = 0.8_f32;
        while zoom <= 15.0 {
            let quota = quota_per_group(zoom, &config);
            assert!((1..=4).contains(&quota), "quota {quota} at zoom {zoom}");
            assert!(quota >= previous, "quota dropped at zoom {zoom}");
            previous = quota;
            zoom += 0.1;
        }
        // Below and above the range stay clamped.
        assert_eq!(quota_per_group(0.5, &config), 1);
        assert_eq!(quota_per_group(40.0, &config), 4);
    }

    // Worked examples: today is midnight on day 100 of 2026 (April 10).
    fn today() -> Today {
        Today::from_date(2026, 3, 10)
    }

    #[test]
    fn priority_of_todays_single_day_event() {
        let annotation = Annotation::new("today");
        let priority = label_priority("4-10", &annotation, today(), 2026);
        assert_eq!(priority, 65.0); // 50 proximity + 10 future + 5 single-day
    }

    #[test]
    fn priority_of_future_medium_event() {
        // Ten weeks out (day 170 = June 19), three days long.
        let mut annotation = Annotation::new("trip");
        annotation.end_month = Some(5);
        annotation.end_day = Some(21);
        let priority = label_priority("6-19", &annotation, today(), 2026);
        assert_eq!(priority, 65.0); // 40 proximity + 10 future + 15 duration
    }

    #[test]
    fn priority_of_past_long_event() {
        // Ten weeks back (day 30 = January 30), ten days long.
        let mut annotation = Annotation::new("done");
        annotation.end_month = Some(1);
        annotation.end_day = Some(8);
        let priority = label_priority("1-30", &annotation, today(), 2026);
        assert_eq!(priority, 40.0); // 40 proximity, no future bias, no bonus
    }

    #[test]
    fn proximity_floors_at_zero() {
        // January 1 to December 31 is 52 weeks out; the proximity term
        // floors at zero instead of going negative.
        let annotation = Annotation::new("far");
        let january_first = Today::from_date(2026, 0, 1);
        let priority = label_priority("12-31", &annotation, january_first, 2026);
        assert_eq!(priority, 15.0); // 0 proximity + 10 future + 5 single-day
    }

    #[test]
    fn group_quota_hides_the_lowest_ranked() {
        let mut store = AnnotationStore::new();
        store.add("4-10", Annotation::new("today"));
        let mut trip = Annotation::new("trip");
        trip.end_month = Some(5);
        trip.end_day = Some(21);
        store.add("6-19", trip);
        let mut done = Annotation::new("done");
        done.end_month = Some(1);
        done.end_day = Some(8);
        store.add("1-30", done);

        let mut labels = vec![
            label_for("4-10", 0, 100),
            label_for("6-19", 0, 170),
            label_for("1-30", 0, 30),
        ];
        let groups = vec![vec![0, 1, 2]];

        // Quota 2: the past long event is the one hidden.
        let mut cfg = config();
        cfg.max_zoom = 15.0;
        let zoom = 6.0; // floor(1 + 5*3/14) = 2
        assert_eq!(quota_per_group(zoom, &cfg), 2);
        resolve_visibility(&mut labels, &groups, zoom, &store, today(), 2026, &cfg);
        assert!(labels[0].should_show);
        assert!(labels[1].should_show);
        assert!(!labels[2].should_show);
    }

    #[test]
    fn isolated_labels_ignore_quota() {
        let mut store = AnnotationStore::new();
        store.add("4-10", Annotation::new("a"));
        store.add("4-11", Annotation::new("b"));
        let mut done = Annotation::new("old");
        done.end_month = Some(1);
        done.end_day = Some(8);
        store.add("1-30", done);

        let mut labels = vec![
            label_for("4-10", 0, 100),
            label_for("4-11", 0, 101),
            label_for("1-30", 0, 30),
        ];
        // The stale event is isolated but ranks last; it must show anyway,
        // without consuming the group's single slot.
        labels[2].is_isolated = true;
        let groups = vec![vec![0, 1, 2]];

        resolve_visibility(&mut labels, &groups, 1.0, &store, today(), 2026, &config());
        assert!(labels[2].should_show);
        let quota_used: usize = labels[..2].iter().filter(|l| l.should_show).count();
        assert_eq!(quota_used, 1);
    }

    #[test]
    fn labels_outside_groups_stay_hidden() {
        let mut store = AnnotationStore::new();
        store.add("4-10", Annotation::new("a"));
        let mut labels = vec![label_for("4-10", 0, 100)];
        labels[0].should_show = true;
        resolve_visibility(&mut labels, &[], 1.0, &store, today(), 2026, &config());
        assert!(!labels[0].should_show);
    }
}
