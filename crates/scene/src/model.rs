use std::rc::Rc;

use lumen_assets::Mesh;
use lumen_render::{GraphicsDevice, ShaderHandle};

use crate::node::{Children, NodeBehavior};
use crate::state::RenderState;

/// An instance of a shared mesh drawn with a given shader.
///
/// The incoming `world` matrix is used as-is; placement is the business of
/// whoever sets `world` above this node.
#[derive(Debug, Clone)]
pub struct Model {
    pub mesh: Rc<Mesh>,
    pub shader: ShaderHandle,
}

impl Model {
    pub fn new(mesh: Rc<Mesh>, shader: ShaderHandle) -> Self {
        Self { mesh, shader }
    }
}

impl NodeBehavior for Model {
    fn draw(&self, state: RenderState, device: &mut dyn GraphicsDevice, children: Children<'_>) {
        device.bind_and_use(self.shader);
        device.set_uniform("transform", state.transform().into());
        device.set_uniform("world", state.world.into());
        self.mesh.draw(device);
        children.draw(state, device);
    }
}
