//! Arena-backed scene tree.
//!
//! # Invariants
//! - A node has at most one parent; attaching an already-parented node panics.
//! - A node is never its own ancestor.
//! - Child order is insertion order and is the traversal order.
//! - A node can only be destroyed once detached from its parent.
//!
//! Misuse of the tree is a caller bug and panics with a diagnostic rather than
//! returning an error.

use slotmap::SlotMap;

use lumen_render::GraphicsDevice;

use crate::camera::Camera;
use crate::model::Model;
use crate::node::{Children, NodeKind, UpdateChildren};
use crate::skybox::Skybox;
use crate::state::RenderState;

slotmap::new_key_type! {
    /// Stable handle to a node stored in a [`SceneGraph`].
    pub struct NodeId;
}

/// A node's payload lifted out of its slot for the duration of its update.
/// Put back on drop, including during unwinding.
struct Vacancy<'a> {
    graph: &'a mut SceneGraph,
    id: NodeId,
    kind: Option<NodeKind>,
}

impl Drop for Vacancy<'_> {
    fn drop(&mut self) {
        if let (Some(kind), Some(node)) = (self.kind.take(), self.graph.nodes.get_mut(self.id)) {
            node.kind = kind;
        }
    }
}

#[derive(Debug)]
struct SceneNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// Owns every node of a scene and the links between them.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a detached node.
    pub fn insert(&mut self, kind: impl Into<NodeKind>) -> NodeId {
        let kind = kind.into();
        let label = kind.label();
        let id = self.nodes.insert(SceneNode {
            parent: None,
            children: Vec::new(),
            kind,
        });
        tracing::debug!(?id, kind = label, "node inserted");
        id
    }

    pub fn insert_group(&mut self) -> NodeId {
        self.insert(NodeKind::Group)
    }

    /// Free a detached node and return its payload. Its children stay in the
    /// arena as detached roots.
    pub fn destroy(&mut self, id: NodeId) -> NodeKind {
        let parent = self.node(id).parent;
        if let Some(parent) = parent {
            panic!("cannot destroy node {id:?} while it is attached to {parent:?}");
        }
        let node = self
            .nodes
            .remove(id)
            .unwrap_or_else(|| panic!("unknown node {id:?}"));
        for child in &node.children {
            if let Some(child) = self.nodes.get_mut(*child) {
                child.parent = None;
            }
        }
        tracing::debug!(?id, orphaned = node.children.len(), "node destroyed");
        node.kind
    }

    /// Append `child` to `parent`'s children.
    pub fn add(&mut self, parent: NodeId, child: NodeId) {
        if let Some(current) = self.node(child).parent {
            panic!("node {child:?} already has a parent ({current:?})");
        }
        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                panic!("attaching {child:?} under {parent:?} would create a cycle");
            }
            ancestor = self.node(id).parent;
        }

        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        tracing::debug!(?parent, ?child, "node attached");
    }

    /// Detach `child` from `parent`.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) {
        let current = self.node(child).parent;
        if current != Some(parent) {
            panic!("node {child:?} is not a child of {parent:?} (parent: {current:?})");
        }
        let children = &mut self.node_mut(parent).children;
        if let Some(pos) = children.iter().position(|&c| c == child) {
            children.remove(pos);
        }
        self.node_mut(child).parent = None;
        tracing::debug!(?parent, ?child, "node detached");
    }

    /// First direct child of `node` accepted by `predicate`.
    pub fn find(
        &self,
        node: NodeId,
        mut predicate: impl FnMut(NodeId, &NodeKind) -> bool,
    ) -> Option<NodeId> {
        self.node(node)
            .children
            .iter()
            .copied()
            .find(|&child| predicate(child, &self.node(child).kind))
    }

    pub fn get_parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.node_mut(id).kind
    }

    pub fn camera(&self, id: NodeId) -> Option<&Camera> {
        match self.kind(id) {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    pub fn camera_mut(&mut self, id: NodeId) -> Option<&mut Camera> {
        match self.kind_mut(id) {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    pub fn skybox(&self, id: NodeId) -> Option<&Skybox> {
        match self.kind(id) {
            NodeKind::Skybox(skybox) => Some(skybox),
            _ => None,
        }
    }

    pub fn skybox_mut(&mut self, id: NodeId) -> Option<&mut Skybox> {
        match self.kind_mut(id) {
            NodeKind::Skybox(skybox) => Some(skybox),
            _ => None,
        }
    }

    pub fn model(&self, id: NodeId) -> Option<&Model> {
        match self.kind(id) {
            NodeKind::Model(model) => Some(model),
            _ => None,
        }
    }

    pub fn model_mut(&mut self, id: NodeId) -> Option<&mut Model> {
        match self.kind_mut(id) {
            NodeKind::Model(model) => Some(model),
            _ => None,
        }
    }

    /// Depth-first update of the subtree rooted at `id`. Each node decides
    /// whether its own work runs before or after its children.
    pub fn update(&mut self, id: NodeId, dt: f32) {
        let node = self.node_mut(id);
        tracing::trace!(?id, kind = node.kind.label(), dt, "update");
        let kind = std::mem::replace(&mut node.kind, NodeKind::Group);
        let mut vacancy = Vacancy {
            graph: self,
            id,
            kind: Some(kind),
        };
        if let Some(kind) = vacancy.kind.as_mut() {
            kind.update(dt, UpdateChildren::new(vacancy.graph, id));
        }
    }

    /// Depth-first pre-order draw of the subtree rooted at `id`.
    pub fn draw(&self, id: NodeId, state: RenderState, device: &mut dyn GraphicsDevice) {
        let node = self.node(id);
        tracing::trace!(?id, kind = node.kind.label(), "draw");
        node.kind.draw(state, device, Children::new(self, id));
    }

    fn node(&self, id: NodeId) -> &SceneNode {
        self.nodes
            .get(id)
            .unwrap_or_else(|| panic!("unknown node {id:?}"))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        self.nodes
            .get_mut(id)
            .unwrap_or_else(|| panic!("unknown node {id:?}"))
    }
}
