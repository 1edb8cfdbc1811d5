//! Simulated-annealing label placement: perturb one label at a time and
//! accept or reject each move against an energy functional that charges for
//! long leader lines, label-label overlap, and labels sitting on anchors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{AnchorPoint, LabelBox};
use crate::config::LabelerConfig;
use crate::geometry::{inflate_rect, overlap_area};

pub struct Labeler {
    width: f32,
    height: f32,
    max_move: f32,
    max_angle: f32,
    weight_leader_len: f32,
    weight_label_overlap: f32,
    weight_anchor_overlap: f32,
    rng: StdRng,
    accepted: u64,
    rejected: u64,
}

impl Labeler {
    /// Build an engine for the work rectangle `[0, width] x [0, height]`.
    /// The seed makes runs replayable; two engines with the same seed and
    /// input produce identical placements.
    pub fn new(config: &LabelerConfig, width: f32, height: f32, seed: u64) -> Self {
        Self {
            width,
            height,
            max_move: config.max_move,
            max_angle: config.max_angle,
            weight_leader_len: config.weight_leader_len,
            weight_label_overlap: config.weight_label_overlap,
            weight_anchor_overlap: config.weight_anchor_overlap,
            rng: StdRng::seed_from_u64(seed),
            accepted: 0,
            rejected: 0,
        }
    }

    /// Anneal `labels` in place. Labels pair with anchors by index, and all
    /// coordinates must already be shifted into the non-negative work
    /// rectangle. One sweep is `labels.len()` move attempts on uniformly
    /// chosen (possibly repeated) labels; temperature cools linearly from
    /// 1.0 to zero over `sweeps`. `sweeps == 0` leaves the input untouched.
    pub fn run(&mut self, labels: &mut [LabelBox], anchors: &[AnchorPoint], sweeps: u32) {
        assert_eq!(
            labels.len(),
            anchors.len(),
            "every label needs exactly one anchor"
        );
        if labels.is_empty() || sweeps == 0 {
            return;
        }

        let mut temperature = 1.0_f32;
        let cooling_step = 1.0 / sweeps as f32;
        for _ in 0..sweeps {
            for _ in 0..labels.len() {
                if self.rng.random::<f32>() < 0.5 {
                    self.translate_move(labels, anchors, temperature);
                } else {
                    self.rotate_move(labels, anchors, temperature);
                }
            }
            temperature -= cooling_step;
        }
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Energy of a single label against the current positions of all others.
    fn energy(&self, index: usize, labels: &[LabelBox], anchors: &[AnchorPoint]) -> f32 {
        let label = &labels[index];
        let own_anchor = &anchors[index];

        let dx = label.x - own_anchor.x;
        let dy = label.y - own_anchor.y;
        let mut energy = (dx * dx + dy * dy).sqrt() * self.weight_leader_len;

        let bounds = label.bounds();
        for (i, other) in labels.iter().enumerate() {
            if i == index {
                continue;
            }
            energy += overlap_area(&bounds, &other.bounds()) * self.weight_label_overlap;
        }

        // Flat penalty per anchor point sitting inside the label box, the
        // box grown by the anchor's nominal occupied radius.
        for anchor in anchors {
            let occupied = inflate_rect(bounds, anchor.radius);
            if anchor.x > occupied.0
                && anchor.x < occupied.0 + occupied.2
                && anchor.y > occupied.1
                && anchor.y < occupied.1 + occupied.3
            {
                energy += self.weight_anchor_overlap;
            }
        }

        energy
    }

    fn translate_move(&mut self, labels: &mut [LabelBox], anchors: &[AnchorPoint], temperature: f32) {
        let index = self.rng.random_range(0..labels.len());
        let old_x = labels[index].x;
        let old_y = labels[index].y;
        let old_energy = self.energy(index, labels, anchors);

        labels[index].x += (self.rng.random::<f32>() - 0.5) * self.max_move;
        labels[index].y += (self.rng.random::<f32>() - 0.5) * self.max_move;
        self.constrain(&mut labels[index], old_x, old_y);

        let delta = self.energy(index, labels, anchors) - old_energy;
        self.metropolis(labels, index, old_x, old_y, delta, temperature);
    }

    fn rotate_move(&mut self, labels: &mut [LabelBox], anchors: &[AnchorPoint], temperature: f32) {
        let index = self.rng.random_range(0..labels.len());
        let old_x = labels[index].x;
        let old_y = labels[index].y;
        let old_energy = self.energy(index, labels, anchors);

        let angle = (self.rng.random::<f32>() - 0.5) * self.max_angle;
        let (sin, cos) = angle.sin_cos();
        let anchor = anchors[index];
        let dx = labels[index].x - anchor.x;
        let dy = labels[index].y - anchor.y;
        labels[index].x = anchor.x + dx * cos - dy * sin;
        labels[index].y = anchor.y + dx * sin + dy * cos;
        self.constrain(&mut labels[index], old_x, old_y);

        let delta = self.energy(index, labels, anchors) - old_energy;
        self.metropolis(labels, index, old_x, old_y, delta, temperature);
    }

    /// Per-axis boundary constraint: an axis that left the work rectangle
    /// reverts to its old value on its own; the other axis keeps its
    /// candidate.
    fn constrain(&self, label: &mut LabelBox, old_x: f32, old_y: f32) {
        if label.x > self.width || label.x < 0.0 {
            label.x = old_x;
        }
        if label.y > self.height || label.y < 0.0 {
            label.y = old_y;
        }
    }

    /// Metropolis criterion: downhill moves always pass (`exp` of a
    /// non-negative argument is at least one), uphill moves pass with
    /// probability `exp(-delta / temperature)`.
    fn metropolis(
        &mut self,
        labels: &mut [LabelBox],
        index: usize,
        old_x: f32,
        old_y: f32,
        delta: f32,
        temperature: f32,
    ) {
        if self.rng.random::<f32>() < (-delta / temperature).exp() {
            self.accepted += 1;
        } else {
            labels[index].x = old_x;
            labels[index].y = old_y;
            self.rejected += 1;
        }
    }
}
