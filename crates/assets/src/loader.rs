//! Asset-loader capability and the file formats shipped with it.
//!
//! Loaders turn a file path into a [`Mesh`]; they never touch the graphics
//! device. Failures surface as [`AssetError`] for the host to handle.

use std::path::Path;

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::mesh::{Material, Mesh, MeshPart};

/// Errors from asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OBJ load error: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("part {part} has {positions} positions but {normals} normals")]
    NormalCountMismatch {
        part: usize,
        positions: usize,
        normals: usize,
    },
    #[error("part {part} has {count} vertices, more than a draw call can address")]
    TooManyVertices { part: usize, count: usize },
    #[error("part {part} has {count} vertices, not a whole number of triangles")]
    NotTriangles { part: usize, count: usize },
    #[error("mesh contains no geometry: {0}")]
    Empty(String),
    #[error("unsupported mesh format: {0}")]
    UnsupportedFormat(String),
}

/// Reject a part the device could not draw as a plain triangle list.
fn check_part(part: usize, positions: usize, normals: usize) -> Result<(), AssetError> {
    if u32::try_from(positions).is_err() {
        return Err(AssetError::TooManyVertices {
            part,
            count: positions,
        });
    }
    if positions != normals {
        return Err(AssetError::NormalCountMismatch {
            part,
            positions,
            normals,
        });
    }
    if positions % 3 != 0 {
        return Err(AssetError::NotTriangles {
            part,
            count: positions,
        });
    }
    Ok(())
}

/// Anything that can turn a path into renderable geometry.
pub trait AssetLoader {
    fn load_mesh(&self, path: &Path) -> Result<Mesh, AssetError>;
}

/// Wavefront OBJ import through `tobj`.
///
/// Faces are triangulated and flattened so each face corner becomes its own
/// vertex. Albedo comes from the diffuse colour; roughness and metalness from
/// the PBR `Pr`/`Pm` statements when present.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjLoader;

impl ObjLoader {
    fn material(material: &tobj::Material) -> Material {
        let defaults = Material::default();
        let param = |key: &str, fallback: f32| {
            material
                .unknown_param
                .get(key)
                .and_then(|v| v.trim().parse::<f32>().ok())
                .unwrap_or(fallback)
        };
        Material {
            albedo: material.diffuse.map(Vec3::from).unwrap_or(defaults.albedo),
            roughness: param("Pr", defaults.roughness),
            metalness: param("Pm", defaults.metalness),
        }
    }
}

impl AssetLoader for ObjLoader {
    fn load_mesh(&self, path: &Path) -> Result<Mesh, AssetError> {
        let options = tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        };
        let (models, materials) = tobj::load_obj(path, &options)?;
        let materials = materials.unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "no usable materials, using defaults");
            Vec::new()
        });

        let mut parts = Vec::with_capacity(models.len());
        for (i, model) in models.iter().enumerate() {
            let mesh = &model.mesh;
            let mut part = MeshPart {
                positions: Vec::with_capacity(mesh.indices.len()),
                normals: Vec::with_capacity(mesh.indices.len()),
                material: mesh
                    .material_id
                    .and_then(|id| materials.get(id))
                    .map(Self::material)
                    .unwrap_or_default(),
            };
            for &index in &mesh.indices {
                let i = index as usize * 3;
                part.positions.push(Vec3::new(
                    mesh.positions[i],
                    mesh.positions[i + 1],
                    mesh.positions[i + 2],
                ));
                let normal = mesh
                    .normals
                    .get(i..i + 3)
                    .map(|n| Vec3::new(n[0], n[1], n[2]))
                    .unwrap_or_default();
                part.normals.push(normal);
            }
            check_part(i, part.positions.len(), part.normals.len())?;
            tracing::debug!(name = %model.name, vertices = part.positions.len(), "imported OBJ part");
            parts.push(part);
        }

        let mesh = Mesh::new(parts);
        if mesh.is_empty() {
            return Err(AssetError::Empty(path.display().to_string()));
        }
        Ok(mesh)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonMaterial {
    albedo: [f32; 3],
    #[serde(default = "default_roughness")]
    roughness: f32,
    #[serde(default)]
    metalness: f32,
}

fn default_roughness() -> f32 {
    Material::default().roughness
}

impl Default for JsonMaterial {
    fn default() -> Self {
        Material::default().into()
    }
}

impl From<Material> for JsonMaterial {
    fn from(m: Material) -> Self {
        Self {
            albedo: m.albedo.into(),
            roughness: m.roughness,
            metalness: m.metalness,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonPart {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    #[serde(default)]
    material: JsonMaterial,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonMesh {
    parts: Vec<JsonPart>,
}

/// Plain JSON mesh documents: `{"parts": [{"positions", "normals", "material"}]}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonMeshLoader;

impl JsonMeshLoader {
    /// Write `mesh` in the format [`JsonMeshLoader`] reads.
    pub fn save(mesh: &Mesh, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let doc = JsonMesh {
            parts: mesh
                .parts
                .iter()
                .map(|p| JsonPart {
                    positions: p.positions.iter().map(|v| v.into_array()).collect(),
                    normals: p.normals.iter().map(|v| v.into_array()).collect(),
                    material: p.material.into(),
                })
                .collect(),
        };
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &doc)?;
        Ok(())
    }
}

impl AssetLoader for JsonMeshLoader {
    fn load_mesh(&self, path: &Path) -> Result<Mesh, AssetError> {
        let file = std::fs::File::open(path)?;
        let doc: JsonMesh = serde_json::from_reader(std::io::BufReader::new(file))?;

        let mut parts = Vec::with_capacity(doc.parts.len());
        for (i, part) in doc.parts.into_iter().enumerate() {
            check_part(i, part.positions.len(), part.normals.len())?;
            parts.push(MeshPart {
                positions: part.positions.into_iter().map(Vec3::from).collect(),
                normals: part.normals.into_iter().map(Vec3::from).collect(),
                material: Material {
                    albedo: part.material.albedo.into(),
                    roughness: part.material.roughness,
                    metalness: part.material.metalness,
                },
            });
        }

        let mesh = Mesh::new(parts);
        if mesh.is_empty() {
            return Err(AssetError::Empty(path.display().to_string()));
        }
        Ok(mesh)
    }
}

/// Picks a loader from the file extension (`.obj` or `.json`).
#[derive(Debug, Default, Clone, Copy)]
pub struct FileLoader;

impl AssetLoader for FileLoader {
    fn load_mesh(&self, path: &Path) -> Result<Mesh, AssetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("obj") => ObjLoader.load_mesh(path),
            Some("json") => JsonMeshLoader.load_mesh(path),
            _ => Err(AssetError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
