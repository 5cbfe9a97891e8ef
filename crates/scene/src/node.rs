//! Node variants and the behavior capability they share.

use std::fmt;

use lumen_render::GraphicsDevice;

use crate::camera::Camera;
use crate::graph::{NodeId, SceneGraph};
use crate::model::Model;
use crate::skybox::Skybox;
use crate::state::RenderState;

/// The `{update, draw}` capability every node variant provides.
///
/// Both methods receive the node's children as a continuation
/// ([`UpdateChildren`], [`Children`]), so a node chooses whether its own work
/// runs before or after its subtree. The defaults just recurse.
pub trait NodeBehavior {
    fn update(&mut self, dt: f32, mut children: UpdateChildren<'_>) {
        children.update(dt);
    }

    fn draw(&self, state: RenderState, device: &mut dyn GraphicsDevice, children: Children<'_>) {
        children.draw(state, device);
    }
}

/// The closed set of node variants, plus an escape hatch for host-defined ones.
pub enum NodeKind {
    /// Structural node with no behavior of its own.
    Group,
    Camera(Camera),
    Skybox(Skybox),
    Model(Model),
    Custom(Box<dyn NodeBehavior>),
}

impl NodeKind {
    pub fn custom(behavior: impl NodeBehavior + 'static) -> Self {
        Self::Custom(Box::new(behavior))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Camera(_) => "camera",
            Self::Skybox(_) => "skybox",
            Self::Model(_) => "model",
            Self::Custom(_) => "custom",
        }
    }

    pub(crate) fn update(&mut self, dt: f32, mut children: UpdateChildren<'_>) {
        match self {
            Self::Group => children.update(dt),
            Self::Camera(camera) => camera.update(dt, children),
            Self::Skybox(skybox) => skybox.update(dt, children),
            Self::Model(model) => model.update(dt, children),
            Self::Custom(behavior) => behavior.update(dt, children),
        }
    }

    pub(crate) fn draw(
        &self,
        state: RenderState,
        device: &mut dyn GraphicsDevice,
        children: Children<'_>,
    ) {
        match self {
            Self::Group => children.draw(state, device),
            Self::Camera(camera) => camera.draw(state, device, children),
            Self::Skybox(skybox) => skybox.draw(state, device, children),
            Self::Model(model) => model.draw(state, device, children),
            Self::Custom(behavior) => behavior.draw(state, device, children),
        }
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => f.write_str("Group"),
            Self::Camera(camera) => f.debug_tuple("Camera").field(camera).finish(),
            Self::Skybox(skybox) => f.debug_tuple("Skybox").field(skybox).finish(),
            Self::Model(model) => f.debug_tuple("Model").field(model).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<Camera> for NodeKind {
    fn from(camera: Camera) -> Self {
        Self::Camera(camera)
    }
}

impl From<Skybox> for NodeKind {
    fn from(skybox: Skybox) -> Self {
        Self::Skybox(skybox)
    }
}

impl From<Model> for NodeKind {
    fn from(model: Model) -> Self {
        Self::Model(model)
    }
}

/// The children of the node being drawn, in insertion order.
#[derive(Clone, Copy)]
pub struct Children<'a> {
    graph: &'a SceneGraph,
    parent: NodeId,
}

impl<'a> Children<'a> {
    pub(crate) fn new(graph: &'a SceneGraph, parent: NodeId) -> Self {
        Self { graph, parent }
    }

    pub fn ids(&self) -> &'a [NodeId] {
        self.graph.children(self.parent)
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    /// Draw every child with its own copy of `state`.
    pub fn draw(&self, state: RenderState, device: &mut dyn GraphicsDevice) {
        for &child in self.ids() {
            self.graph.draw(child, state, device);
        }
    }
}

/// The children of the node being updated, in insertion order.
///
/// While a node runs its `update`, its own slot in the graph is vacant; the
/// handle only reaches the subtree below it.
pub struct UpdateChildren<'a> {
    graph: &'a mut SceneGraph,
    parent: NodeId,
}

impl<'a> UpdateChildren<'a> {
    pub(crate) fn new(graph: &'a mut SceneGraph, parent: NodeId) -> Self {
        Self { graph, parent }
    }

    pub fn ids(&self) -> &[NodeId] {
        self.graph.children(self.parent)
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    /// Update every child subtree with `dt`.
    pub fn update(&mut self, dt: f32) {
        for i in 0..self.len() {
            let child = self.ids()[i];
            self.graph.update(child, dt);
        }
    }
}
