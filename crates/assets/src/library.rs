//! Path-keyed cache of loaded meshes.
//!
//! Meshes are shared with [`Rc`]: every model node that references the same
//! file draws from one copy.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::loader::{AssetError, AssetLoader, FileLoader};
use crate::mesh::Mesh;

pub struct MeshLibrary {
    loader: Box<dyn AssetLoader>,
    meshes: BTreeMap<PathBuf, Rc<Mesh>>,
}

impl Default for MeshLibrary {
    fn default() -> Self {
        Self::new(FileLoader)
    }
}

impl MeshLibrary {
    pub fn new(loader: impl AssetLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            meshes: BTreeMap::new(),
        }
    }

    /// Return the cached mesh for `path`, loading it on first use.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Rc<Mesh>, AssetError> {
        let path = path.as_ref();
        if let Some(mesh) = self.meshes.get(path) {
            return Ok(Rc::clone(mesh));
        }
        let mesh = Rc::new(self.loader.load_mesh(path)?);
        tracing::info!(
            path = %path.display(),
            parts = mesh.parts.len(),
            vertices = mesh.vertex_count(),
            "loaded mesh"
        );
        self.meshes.insert(path.to_path_buf(), Rc::clone(&mesh));
        Ok(mesh)
    }

    /// Register an in-memory mesh under `key`, replacing any earlier entry.
    pub fn insert(&mut self, key: impl Into<PathBuf>, mesh: Mesh) -> Rc<Mesh> {
        let mesh = Rc::new(mesh);
        self.meshes.insert(key.into(), Rc::clone(&mesh));
        mesh
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<Rc<Mesh>> {
        self.meshes.get(path.as_ref()).cloned()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
