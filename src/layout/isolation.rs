use super::types::LabelData;
use crate::calendar::circular_day_distance;

/// Mark labels that have no temporal neighbor: a label is isolated when
/// every other label's anchor date is more than `window_days` away on the
/// circular calendar (wrapping across the year boundary).
///
/// Brute-force O(n^2) pairwise scan. Sufficient for realistic yearly event
/// counts (tens to low hundreds); revisit with a sorted sweep if that
/// assumption ever breaks.
pub fn mark_isolation(labels: &mut [LabelData], total_days: u32, window_days: u32) {
    for i in 0..labels.len() {
        let mut has_neighbor = false;
        for (j, other) in labels.iter().enumerate() {
            if i == j {
                continue;
            }
            let distance =
                circular_day_distance(labels[i].day_of_year, other.day_of_year, total_days);
            if distance <= window_days {
                has_neighbor = true;
                break;
            }
        }
        labels[i].is_isolated = !has_neighbor;
    }
}
