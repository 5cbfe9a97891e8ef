//! Mesh assets for the lumen renderer.
//!
//! A [`Mesh`] is a list of [`MeshPart`]s, each carrying positions, normals and
//! a PBR-style [`Material`]. Meshes come from an [`AssetLoader`]; the stock
//! [`FileLoader`] understands Wavefront OBJ and a small JSON format.
//! [`MeshLibrary`] caches loaded meshes by path.

mod library;
mod loader;
mod mesh;

pub use library::MeshLibrary;
pub use loader::{AssetError, AssetLoader, FileLoader, JsonMeshLoader, ObjLoader};
pub use mesh::{Material, Mesh, MeshPart};

pub fn crate_info() -> &'static str {
    "lumen-assets v0.1.0"
}
