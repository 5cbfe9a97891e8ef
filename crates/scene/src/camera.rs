use lumen_math::{Mat4, PI, Vec3, look_at, perspective};
use lumen_render::{ClearFlags, GraphicsDevice};

use crate::node::{Children, NodeBehavior};
use crate::state::RenderState;

/// Perspective camera and render-pass boundary.
///
/// Drawing a camera clears colour and depth, then hands its children a fresh
/// [`RenderState`] built from its own fields. Whatever state arrived from
/// above is discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Facing direction; need not be unit length.
    pub direction: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, 1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: PI / 4.0,
            aspect: 1280.0 / 720.0,
            near: 1.0,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        look_at(&self.position, &(self.position + self.direction), &self.up)
    }

    pub fn projection(&self) -> Mat4 {
        perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// `projection · view`.
    pub fn transform(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Track a resized viewport. A zero height (minimised window) is ignored.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }
}

impl NodeBehavior for Camera {
    fn draw(&self, _state: RenderState, device: &mut dyn GraphicsDevice, children: Children<'_>) {
        device.clear_buffers(ClearFlags::COLOR_AND_DEPTH);
        let state = RenderState {
            projection: self.projection(),
            view: self.view(),
            world: Mat4::new(),
        };
        children.draw(state, device);
    }
}
