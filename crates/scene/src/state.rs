use lumen_math::Mat4;

/// Matrices threaded down one draw traversal.
///
/// Passed by value: a node edits its own copy before handing it to its
/// children, so nothing it changes reaches a sibling or its parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderState {
    pub projection: Mat4,
    pub view: Mat4,
    pub world: Mat4,
}

impl RenderState {
    /// `projection · view`, the value bound to the `transform` uniform.
    pub fn transform(&self) -> Mat4 {
        self.projection * self.view
    }
}
