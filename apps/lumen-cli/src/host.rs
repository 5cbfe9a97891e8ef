//! Scene assembly and the headless frame loop.

use anyhow::Context;
use lumen_assets::{Mesh, MeshLibrary};
use lumen_math::Mat4;
use lumen_render::{FrameStats, GraphicsDevice, ShaderHandle, TextureHandle, TracingDevice};
use lumen_scene::{
    Children, Model, NodeBehavior, NodeId, NodeKind, RenderState, SceneGraph, Skybox,
};

use crate::scene_file::{BUILTIN_CUBE, SceneFile};

/// Places its subtree in the world by composing a fixed matrix into `world`.
struct Placement {
    world: Mat4,
}

impl NodeBehavior for Placement {
    fn draw(&self, mut state: RenderState, device: &mut dyn GraphicsDevice, children: Children<'_>) {
        state.world = state.world * self.world;
        children.draw(state, device);
    }
}

/// A built scene: `root → camera → {skybox, placement → model, ...}`.
pub struct Viewer {
    pub graph: SceneGraph,
    pub root: NodeId,
    pub camera: NodeId,
    orbit: bool,
    time: f32,
}

impl Viewer {
    pub fn build(scene: &SceneFile, library: &mut MeshLibrary) -> anyhow::Result<Self> {
        library.insert(BUILTIN_CUBE, Mesh::cube());

        let mut graph = SceneGraph::new();
        let root = graph.insert_group();
        let camera = graph.insert(scene.camera.to_camera());
        graph.add(root, camera);

        if let Some(sky) = scene.skybox {
            let skybox = graph.insert(Skybox::new(
                ShaderHandle(sky.shader),
                TextureHandle(sky.cube_map),
            ));
            graph.add(camera, skybox);
        }

        for model in &scene.models {
            let mesh = match scene.mesh_path(model) {
                Some(path) => library
                    .load(&path)
                    .with_context(|| format!("failed to load mesh {}", path.display()))?,
                None => library.load(BUILTIN_CUBE)?,
            };
            let placement = graph.insert(NodeKind::custom(Placement {
                world: model.placement.to_matrix(),
            }));
            let node = graph.insert(Model::new(mesh, ShaderHandle(model.shader)));
            graph.add(camera, placement);
            graph.add(placement, node);
        }

        tracing::info!(nodes = graph.len(), models = scene.models.len(), "scene built");
        Ok(Self {
            graph,
            root,
            camera,
            orbit: scene.orbit,
            time: 0.0,
        })
    }

    /// Advance the scene by `dt` seconds: orbit the camera, then update the tree.
    pub fn update(&mut self, dt: f32) {
        if self.orbit {
            self.time += dt;
            if let Some(camera) = self.graph.camera_mut(self.camera) {
                *camera.direction.x_mut() = self.time.cos();
                *camera.direction.z_mut() = self.time.sin();
            }
        }
        self.graph.update(self.root, dt);
    }

    pub fn draw(&self, device: &mut dyn GraphicsDevice) {
        self.graph.draw(self.root, RenderState::default(), device);
    }

    /// Resize the viewport the camera projects onto.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(camera) = self.graph.camera_mut(self.camera) {
            camera.set_aspect(width, height);
        }
    }
}

/// Run `frames` frames against a [`TracingDevice`], returning per-frame stats.
pub fn run_frames(viewer: &mut Viewer, frames: u32, dt: f32) -> Vec<FrameStats> {
    let mut device = TracingDevice::new();
    device.set_depth_test(true);
    device.end_frame();

    let mut stats = Vec::with_capacity(frames as usize);
    for frame in 0..frames {
        let _span = tracing::info_span!("frame", frame).entered();
        viewer.update(dt);
        viewer.draw(&mut device);
        stats.push(device.end_frame());
    }
    stats
}
