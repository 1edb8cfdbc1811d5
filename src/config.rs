use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tuning for the simulated-annealing label placer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelerConfig {
    /// Full passes over the label set; temperature reaches zero at the end.
    pub sweeps: u32,
    /// Span of the uniform translation step, per axis.
    pub max_move: f32,
    /// Span of the uniform rotation step about the anchor, in radians.
    pub max_angle: f32,
    pub weight_leader_len: f32,
    /// Inert: no active move evaluates leader-line crossings.
    pub weight_leader_cross: f32,
    pub weight_label_overlap: f32,
    pub weight_anchor_overlap: f32,
    /// Inert: no active move evaluates orientation bias.
    pub weight_orientation: f32,
    /// Substitute label size when text has not been measured yet.
    pub fallback_label_width: f32,
    pub fallback_label_height: f32,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            sweeps: 500,
            max_move: 5.0,
            max_angle: 0.5,
            weight_leader_len: 0.2,
            weight_leader_cross: 1.0,
            weight_label_overlap: 30.0,
            weight_anchor_overlap: 30.0,
            weight_orientation: 3.0,
            fallback_label_width: 50.0,
            fallback_label_height: 10.0,
        }
    }
}

/// Tuning for the collision/priority visibility pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub default_zoom: f32,
    /// Labels revealed per collision group at minimum zoom.
    pub min_labels_per_group: u32,
    /// Labels revealed per collision group at maximum zoom.
    pub max_labels_per_group: u32,
    /// A label with no neighbor within this many days (circular) is isolated
    /// and always shown.
    pub isolation_window_days: u32,
    /// Near-miss tolerance added to every side of a label box when grouping.
    pub collision_padding: f32,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.8,
            max_zoom: 15.0,
            default_zoom: 1.4,
            min_labels_per_group: 1,
            max_labels_per_group: 4,
            isolation_window_days: 30,
            collision_padding: 2.0,
        }
    }
}

/// Geometry of the year wheel itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelConfig {
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub center_radius: f32,
    /// Gap between the wheel edge and a connector's start point.
    pub label_radius_gap: f32,
    /// Radial step between stacked default label slots on one day.
    pub label_stack_step: f32,
    /// Connector lines stop this far short of the label text.
    pub connector_gap: f32,
    /// Nominal occupied radius around an anchor point, fed to the engine's
    /// label-anchor overlap penalty.
    pub anchor_radius: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            outer_radius: 200.0,
            inner_radius: 140.0,
            center_radius: 100.0,
            label_radius_gap: 3.0,
            label_stack_step: 10.0,
            connector_gap: 3.0,
            anchor_radius: 5.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub labeler: LabelerConfig,
    pub visibility: VisibilityConfig,
    pub wheel: WheelConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    labeler: Option<LabelerConfig>,
    visibility: Option<VisibilityConfig>,
    wheel: Option<WheelConfig>,
}

/// Load a JSON config file over the defaults. `None` returns the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(labeler) = parsed.labeler {
        config.labeler = labeler;
    }
    if let Some(visibility) = parsed.visibility {
        config.visibility = visibility;
    }
    if let Some(wheel) = parsed.wheel {
        config.wheel = wheel;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hold_the_tuned_constants() {
        let config = Config::default();
        assert_eq!(config.labeler.sweeps, 500);
        assert_eq!(config.labeler.weight_leader_len, 0.2);
        assert_eq!(config.labeler.weight_label_overlap, 30.0);
        assert_eq!(config.visibility.max_zoom, 15.0);
        assert_eq!(config.visibility.max_labels_per_group, 4);
        assert_eq!(config.wheel.outer_radius, 200.0);
        assert_eq!(config.wheel.inner_radius, 140.0);
    }

    #[test]
    fn missing_path_returns_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.labeler.sweeps, 500);
    }

    #[test]
    fn partial_file_overrides_one_section() {
        let parsed: ConfigFile = serde_json::from_str(
            r#"{"visibility": {"minZoom": 1.0, "maxZoom": 10.0,
                "defaultZoom": 1.0, "minLabelsPerGroup": 1, "maxLabelsPerGroup": 6,
                "isolationWindowDays": 14, "collisionPadding": 2.0}}"#,
        )
        .unwrap();
        assert!(parsed.labeler.is_none());
        let visibility = parsed.visibility.unwrap();
        assert_eq!(visibility.max_labels_per_group, 6);
        assert_eq!(visibility.isolation_window_days, 14);
    }
}
