use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle as `(x, y, width, height)`.
pub type Rect = (f32, f32, f32, f32);

/// Convert polar coordinates (angle in degrees) to Cartesian.
pub fn polar_to_cartesian(angle_deg: f32, radius: f32) -> (f32, f32) {
    let rad = angle_deg.to_radians();
    (rad.cos() * radius, rad.sin() * radius)
}

/// SVG path for an annular wedge between two angles.
pub fn arc_path(start_angle: f32, end_angle: f32, inner_r: f32, outer_r: f32) -> String {
    let outer_start = polar_to_cartesian(start_angle, outer_r);
    let outer_end = polar_to_cartesian(end_angle, outer_r);
    let inner_start = polar_to_cartesian(end_angle, inner_r);
    let inner_end = polar_to_cartesian(start_angle, inner_r);
    let large_arc = if end_angle - start_angle > 180.0 { 1 } else { 0 };

    format!(
        "M {} {} A {} {} 0 {} 1 {} {} L {} {} A {} {} 0 {} 0 {} {} Z",
        outer_start.0,
        outer_start.1,
        outer_r,
        outer_r,
        large_arc,
        outer_end.0,
        outer_end.1,
        inner_start.0,
        inner_start.1,
        inner_r,
        inner_r,
        large_arc,
        inner_end.0,
        inner_end.1,
    )
}

pub fn overlap_area(a: &Rect, b: &Rect) -> f32 {
    let x0 = a.0.max(b.0);
    let y0 = a.1.max(b.1);
    let x1 = (a.0 + a.2).min(b.0 + b.2);
    let y1 = (a.1 + a.3).min(b.1 + b.3);
    let w = (x1 - x0).max(0.0);
    let h = (y1 - y0).max(0.0);
    w * h
}

pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.0 <= b.0 + b.2 && b.0 <= a.0 + a.2 && a.1 <= b.1 + b.3 && b.1 <= a.1 + a.3
}

pub fn inflate_rect(rect: Rect, pad: f32) -> Rect {
    if pad <= 0.0 {
        return rect;
    }
    (
        rect.0 - pad,
        rect.1 - pad,
        rect.2 + pad * 2.0,
        rect.3 + pad * 2.0,
    )
}

/// The current pan/zoom window in scene coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}
