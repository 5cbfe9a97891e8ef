//! Scene graph and render-state traversal.
//!
//! A [`SceneGraph`] owns every node in an arena and links them by [`NodeId`].
//! Each frame the host calls [`SceneGraph::update`] and then
//! [`SceneGraph::draw`] on the root. Drawing threads a [`RenderState`] down the
//! tree by value, so a node may rewrite it for its own subtree without
//! affecting siblings.
//!
//! Built-in variants: [`Camera`] starts a render pass, [`Skybox`] draws a
//! backdrop with depth testing suspended, [`Model`] draws a mesh. Hosts add
//! their own through [`NodeBehavior`] and [`NodeKind::Custom`].

mod camera;
mod graph;
mod model;
mod node;
mod skybox;
mod state;

pub use camera::Camera;
pub use graph::{NodeId, SceneGraph};
pub use model::Model;
pub use node::{Children, NodeBehavior, NodeKind, UpdateChildren};
pub use skybox::Skybox;
pub use state::RenderState;

pub fn crate_info() -> &'static str {
    "lumen-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
