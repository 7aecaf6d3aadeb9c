use serde::{Deserialize, Serialize};

use crate::brush::TextureProjection;

/// Supplies the shaders given to faces the commands create.
pub trait ShaderSource {
    /// Shader for faces that are never seen.
    fn caulk_shader(&self) -> &str;

    /// Shader the user currently has active.
    fn selected_shader(&self) -> &str;

    /// Projection for new faces.
    fn default_projection(&self) -> TextureProjection;
}

/// Fixed shader names, loadable from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderDefaults {
    pub caulk: String,
    pub selected: String,
    pub projection: TextureProjection,
}

impl Default for ShaderDefaults {
    fn default() -> Self {
        Self {
            caulk: "textures/common/caulk".into(),
            selected: "textures/common/notex".into(),
            projection: TextureProjection::default(),
        }
    }
}

impl ShaderSource for ShaderDefaults {
    fn caulk_shader(&self) -> &str {
        &self.caulk
    }

    fn selected_shader(&self) -> &str {
        &self.selected
    }

    fn default_projection(&self) -> TextureProjection {
        self.projection.clone()
    }
}
