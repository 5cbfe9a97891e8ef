use lumen_math::{Mat4, Vec2, Vec3, Vec4};

/// Opaque handle to a linked shader program owned by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Opaque handle to a texture (2-D or cube map) owned by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Which buffers a clear touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearFlags {
    pub color: bool,
    pub depth: bool,
}

impl ClearFlags {
    pub const COLOR_AND_DEPTH: Self = Self {
        color: true,
        depth: true,
    };
}

/// A value bound to a named shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    Matrix(Mat4),
    Scalar(f32),
    Vector2(Vec2),
    Vector3(Vec3),
    Vector4(Vec4),
    Texture(TextureHandle),
}

impl From<Mat4> for Uniform {
    fn from(m: Mat4) -> Self {
        Self::Matrix(m)
    }
}

impl From<f32> for Uniform {
    fn from(x: f32) -> Self {
        Self::Scalar(x)
    }
}

impl From<Vec2> for Uniform {
    fn from(v: Vec2) -> Self {
        Self::Vector2(v)
    }
}

impl From<Vec3> for Uniform {
    fn from(v: Vec3) -> Self {
        Self::Vector3(v)
    }
}

impl From<Vec4> for Uniform {
    fn from(v: Vec4) -> Self {
        Self::Vector4(v)
    }
}

impl From<TextureHandle> for Uniform {
    fn from(t: TextureHandle) -> Self {
        Self::Texture(t)
    }
}

/// The graphics-device capability consumed by scene nodes.
///
/// Implementations wrap a real GPU API; the scene core only issues calls in a
/// fixed order and never inspects results.
pub trait GraphicsDevice {
    fn clear_buffers(&mut self, flags: ClearFlags);

    fn set_uniform(&mut self, name: &str, value: Uniform);

    fn bind_and_use(&mut self, shader: ShaderHandle);

    fn draw_primitives(&mut self, vertex_count: u32);

    fn set_depth_test(&mut self, enabled: bool);

    /// Current depth-test state, so scoped overrides can restore it.
    fn depth_test_enabled(&self) -> bool;
}
