use serde::{Deserialize, Serialize};

use crate::math::Vector3;
use crate::operations::{HollowSettings, HollowType};

/// A 2D view projection, named after the plane it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewType {
    Yz,
    Xz,
    Xy,
}

impl ViewType {
    /// The axis the view looks along.
    #[must_use]
    pub fn axis(self) -> Vector3 {
        match self {
            Self::Yz => Vector3::x(),
            Self::Xz => Vector3::y(),
            Self::Xy => Vector3::z(),
        }
    }
}

/// How the faces to leave open are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionMode {
    /// Faces the user selected.
    #[default]
    Faces,
    /// Faces most aligned with the axis of a 2D view.
    Projection(ViewType),
    /// Faces most aligned with a camera's view direction, angles in degrees.
    Camera { pitch: f64, yaw: f64 },
}

/// Settings of the CSG tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsgToolConfig {
    /// Wall thickness for hollowing and distance for shrink/expand.
    pub offset: f64,
    pub exclusion: ExclusionMode,
    /// Put the caulk shader on hidden faces.
    pub caulk: bool,
    /// Delete the source brushes after hollowing.
    pub remove_inner: bool,
}

impl Default for CsgToolConfig {
    fn default() -> Self {
        Self {
            offset: 16.0,
            exclusion: ExclusionMode::default(),
            caulk: true,
            remove_inner: true,
        }
    }
}

impl CsgToolConfig {
    /// Resolves the exclusion mode to an axis; zero means selected faces.
    #[must_use]
    pub fn exclusion_axis(&self) -> Vector3 {
        match self.exclusion {
            ExclusionMode::Faces => Vector3::zeros(),
            ExclusionMode::Projection(view) => view.axis(),
            ExclusionMode::Camera { pitch, yaw } => {
                let (pitch, yaw) = (pitch.to_radians(), yaw.to_radians());
                Vector3::new(yaw.cos() * pitch.cos(), yaw.sin() * pitch.cos(), pitch.sin())
            }
        }
    }

    /// Hollow settings for `hollow_type` with this configuration.
    #[must_use]
    pub fn hollow_settings(&self, hollow_type: HollowType) -> HollowSettings {
        HollowSettings {
            hollow_type,
            offset: self.offset,
            exclusion_axis: self.exclusion_axis(),
            caulk: self.caulk,
            remove_inner: self.remove_inner,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_json_gives_defaults() {
        let config: CsgToolConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CsgToolConfig::default());
        assert_eq!(config.exclusion_axis(), Vector3::zeros());
    }

    #[test]
    fn projection_mode_uses_view_axis() {
        let config: CsgToolConfig =
            serde_json::from_str(r#"{ "offset": 8, "exclusion": { "projection": "XZ" } }"#)
                .unwrap();
        assert_relative_eq!(config.offset, 8.0);
        assert_eq!(config.exclusion_axis(), Vector3::y());
    }

    #[test]
    fn camera_mode_uses_view_vector() {
        let config = CsgToolConfig {
            exclusion: ExclusionMode::Camera {
                pitch: 0.0,
                yaw: 90.0,
            },
            ..CsgToolConfig::default()
        };
        assert_relative_eq!(config.exclusion_axis(), Vector3::y(), epsilon = 1e-12);

        let config = CsgToolConfig {
            exclusion: ExclusionMode::Camera {
                pitch: -90.0,
                yaw: 0.0,
            },
            ..CsgToolConfig::default()
        };
        assert_relative_eq!(config.exclusion_axis(), -Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn hollow_settings_carry_flags() {
        let config = CsgToolConfig {
            caulk: false,
            exclusion: ExclusionMode::Projection(ViewType::Xy),
            ..CsgToolConfig::default()
        };
        let settings = config.hollow_settings(HollowType::Wrap);
        assert_eq!(settings.hollow_type, HollowType::Wrap);
        assert!(!settings.caulk);
        assert!(settings.remove_inner);
        assert_eq!(settings.exclusion_axis, Vector3::z());
    }
}
