use super::types::LabelData;
use crate::geometry::{inflate_rect, rects_overlap, Rect};

/// Partition labels into connected components of mutually overlapping boxes
/// (directly or through a chain of overlaps). Boxes are the post-annealing
/// label bounds grown by `padding` on every side for near-miss tolerance.
///
/// Labels whose tile is hidden are skipped up front; they never appear in a
/// group. Traversal uses an explicit worklist, so a degenerate input where
/// every label overlaps every other costs no stack depth.
pub fn group_collisions(labels: &[LabelData], padding: f32) -> Vec<Vec<usize>> {
    let boxes: Vec<Option<Rect>> = labels
        .iter()
        .map(|label| {
            if label.tile_visible {
                Some(inflate_rect(label.bounds(), padding))
            } else {
                None
            }
        })
        .collect();

    let mut groups = Vec::new();
    let mut visited = vec![false; labels.len()];

    for start in 0..labels.len() {
        if visited[start] || boxes[start].is_none() {
            continue;
        }

        let mut group = Vec::new();
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            if visited[index] {
                continue;
            }
            visited[index] = true;
            group.push(index);

            let Some(bounds) = boxes[index] else {
                continue;
            };
            for (other, other_bounds) in boxes.iter().enumerate() {
                if visited[other] {
                    continue;
                }
                if let Some(other_bounds) = other_bounds {
                    if rects_overlap(&bounds, other_bounds) {
                        stack.push(other);
                    }
                }
            }
        }

        groups.push(group);
    }

    groups
}
