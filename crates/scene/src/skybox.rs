use lumen_assets::Mesh;
use lumen_math::Mat4;
use lumen_render::{DepthTestOverride, GraphicsDevice, ShaderHandle, TextureHandle};

use crate::node::{Children, NodeBehavior};
use crate::state::RenderState;

/// Cube-mapped backdrop that follows the camera's rotation but not its
/// position.
///
/// The skybox and its whole subtree draw with depth testing disabled; the
/// previous depth-test state comes back when the subtree is done, even if a
/// child panics.
#[derive(Debug, Clone, PartialEq)]
pub struct Skybox {
    mesh: Mesh,
    pub shader: ShaderHandle,
    pub cube_map: TextureHandle,
}

impl Skybox {
    pub fn new(shader: ShaderHandle, cube_map: TextureHandle) -> Self {
        Self {
            mesh: Mesh::cube(),
            shader,
            cube_map,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

/// `view` with its translation column cleared.
fn rotation_only(view: Mat4) -> Mat4 {
    let mut view = view;
    for row in 0..3 {
        view[(row, 3)] = 0.0;
    }
    view
}

impl NodeBehavior for Skybox {
    fn draw(&self, state: RenderState, device: &mut dyn GraphicsDevice, children: Children<'_>) {
        let state = RenderState {
            view: rotation_only(state.view),
            world: Mat4::new(),
            ..state
        };

        let mut device = DepthTestOverride::disable(device);
        device.bind_and_use(self.shader);
        device.set_uniform("transform", state.transform().into());
        device.set_uniform("world", state.world.into());
        device.set_uniform("cube", self.cube_map.into());
        self.mesh.draw(&mut *device);

        children.draw(state, &mut *device);
    }
}
