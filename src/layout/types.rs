use crate::geometry::Rect;

/// Vertical slack below the label baseline when forming its box: the box
/// spans from `y - height + 2` to `y + 2`.
pub(crate) const BASELINE_PAD: f32 = 2.0;

/// A movable label rectangle inside the engine's work domain. `(x, y)` is
/// the left end of the text baseline; the box extends upward from it.
#[derive(Debug, Clone, Copy)]
pub struct LabelBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LabelBox {
    pub fn bounds(&self) -> Rect {
        (
            self.x,
            self.y - self.height + BASELINE_PAD,
            self.width,
            self.height,
        )
    }
}

/// The immovable point a label's connector leads back to.
#[derive(Debug, Clone, Copy)]
pub struct AnchorPoint {
    pub x: f32,
    pub y: f32,
    /// Nominal occupied radius; only the label-anchor overlap penalty reads
    /// it.
    pub radius: f32,
}

/// Boundary record for one rendered annotation text element, supplied by the
/// rendering layer (or derived from the store by [`crate::scene`]). The core
/// never reaches into a rendering tree; this is all it sees.
#[derive(Debug, Clone)]
pub struct SceneLabel {
    pub date_key: String,
    pub index: usize,
    pub text: String,
    /// Persisted home position of the text baseline.
    pub home: (f32, f32),
    /// Connector start point on the wheel edge.
    pub anchor: (f32, f32),
    pub anchor_radius: f32,
    /// Measured text size; zero or non-finite values fall back to nominal
    /// defaults at session build.
    pub width: f32,
    pub height: f32,
}

/// Shared working record for one label across the placement pipeline:
/// annealing updates `position`, the grouper reads the resulting boxes, the
/// resolver writes `should_show`.
#[derive(Debug, Clone)]
pub struct LabelData {
    pub date_key: String,
    pub index: usize,
    pub text: String,
    /// Current position, updated by annealing or dragging.
    pub position: (f32, f32),
    /// Position before any adjustment; what gets persisted.
    pub original_position: (f32, f32),
    pub anchor: (f32, f32),
    pub anchor_radius: f32,
    pub width: f32,
    pub height: f32,
    pub day_of_year: u32,
    pub is_isolated: bool,
    /// False when the label's anchor lies outside the viewport; such labels
    /// skip collision grouping and visibility entirely.
    pub tile_visible: bool,
    pub should_show: bool,
}

impl LabelData {
    pub fn bounds(&self) -> Rect {
        (
            self.position.0,
            self.position.1 - self.height + BASELINE_PAD,
            self.width,
            self.height,
        )
    }
}
