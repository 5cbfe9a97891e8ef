//! YAML scene description read by the host.
//!
//! ```yaml
//! camera:
//!   position: [-5.0, 2.0, -3.0]
//!   direction: [5.0, 0.0, 3.0]
//!   fov: 45
//! orbit: true
//! skybox: { shader: 1, cube_map: 1 }
//! models:
//!   - mesh: builtin:cube
//!     shader: 2
//!     placement: { translate: [0, 0, 4] }
//! ```
//!
//! Mesh paths are resolved against the scene file's directory. Omitted camera
//! fields take the [`Camera::default`] values.

use std::path::{Path, PathBuf};

use lumen_math::{Mat4, Vec3, rotate, scale_vec, translate_vec};
use lumen_scene::Camera;
use serde::{Deserialize, Serialize};

/// Mesh key that resolves to the built-in unit cube instead of a file.
pub const BUILTIN_CUBE: &str = "builtin:cube";

#[derive(Debug, thiserror::Error)]
pub enum SceneFileError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid scene: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    #[serde(default)]
    pub camera: CameraConfig,
    /// Swing the camera direction around the vertical axis every frame.
    #[serde(default)]
    pub orbit: bool,
    #[serde(default)]
    pub skybox: Option<SkyboxConfig>,
    #[serde(default)]
    pub models: Vec<ModelConfig>,
    /// Directory mesh paths are relative to; set by [`SceneFile::load`].
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub direction: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            position: camera.position.into(),
            direction: camera.direction.into(),
            up: camera.up.into(),
            fov: camera.fov.to_degrees(),
            aspect: camera.aspect,
            near: camera.near,
            far: camera.far,
        }
    }
}

impl CameraConfig {
    pub fn to_camera(&self) -> Camera {
        Camera {
            position: self.position.into(),
            direction: self.direction.into(),
            up: self.up.into(),
            fov: self.fov.to_radians(),
            aspect: self.aspect,
            near: self.near,
            far: self.far,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkyboxConfig {
    pub shader: u32,
    pub cube_map: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// OBJ or JSON path, or `builtin:cube`.
    pub mesh: String,
    pub shader: u32,
    #[serde(default)]
    pub placement: Placement,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rotation {
    pub axis: [f32; 3],
    pub degrees: f32,
}

/// World placement applied as `translate · rotate · scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Placement {
    pub translate: [f32; 3],
    pub scale: [f32; 3],
    pub rotate: Option<Rotation>,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            translate: [0.0; 3],
            scale: [1.0; 3],
            rotate: None,
        }
    }
}

impl Placement {
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = match self.rotate {
            Some(r) => rotate(r.degrees.to_radians(), &Vec3::from(r.axis).normalized()),
            None => Mat4::new(),
        };
        translate_vec(&Vec3::from(self.translate)) * rotation * scale_vec(&Vec3::from(self.scale))
    }
}

impl SceneFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneFileError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut scene = Self::parse(&text)?;
        scene.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(scene)
    }

    pub fn parse(text: &str) -> Result<Self, SceneFileError> {
        let scene: Self = serde_yaml::from_str(text)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Where the mesh for `model` lives on disk, or `None` for built-ins.
    pub fn mesh_path(&self, model: &ModelConfig) -> Option<PathBuf> {
        if model.mesh == BUILTIN_CUBE {
            None
        } else {
            Some(self.base_dir.join(&model.mesh))
        }
    }

    fn validate(&self) -> Result<(), SceneFileError> {
        let invalid = |msg: String| Err(SceneFileError::Invalid(msg));
        let c = &self.camera;

        if !(c.fov > 0.0 && c.fov < 180.0) {
            return invalid(format!("camera fov must be in (0, 180) degrees, got {}", c.fov));
        }
        if c.aspect <= 0.0 {
            return invalid(format!("camera aspect must be positive, got {}", c.aspect));
        }
        if !(c.near > 0.0 && c.far > c.near) {
            return invalid(format!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                c.near, c.far
            ));
        }
        if Vec3::from(c.direction).length_squared() == 0.0 {
            return invalid("camera direction must be non-zero".into());
        }
        if Vec3::from(c.up).cross(&Vec3::from(c.direction)).length_squared() == 0.0 {
            return invalid("camera up must not be parallel to its direction".into());
        }

        for (i, model) in self.models.iter().enumerate() {
            if model.mesh.is_empty() {
                return invalid(format!("model {i} has an empty mesh path"));
            }
            if let Some(r) = model.placement.rotate {
                if Vec3::from(r.axis).length_squared() == 0.0 {
                    return invalid(format!("model {i} rotation axis must be non-zero"));
                }
            }
        }
        Ok(())
    }
}
