use std::fmt;

use crate::device::{ClearFlags, GraphicsDevice, ShaderHandle, Uniform};

/// One call made against a [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    Clear(ClearFlags),
    SetUniform { name: String, value: Uniform },
    BindAndUse(ShaderHandle),
    DrawPrimitives(u32),
    SetDepthTest(bool),
}

impl DeviceCall {
    /// Uniform name, for `SetUniform` calls.
    pub fn uniform_name(&self) -> Option<&str> {
        match self {
            Self::SetUniform { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear(flags) => write!(f, "clear color={} depth={}", flags.color, flags.depth),
            Self::SetUniform { name, value } => match value {
                Uniform::Matrix(_) => write!(f, "uniform {name} = mat4"),
                Uniform::Scalar(x) => write!(f, "uniform {name} = {x:.3}"),
                Uniform::Vector2(v) => write!(f, "uniform {name} = ({:.3}, {:.3})", v.x(), v.y()),
                Uniform::Vector3(v) => write!(
                    f,
                    "uniform {name} = ({:.3}, {:.3}, {:.3})",
                    v.x(),
                    v.y(),
                    v.z()
                ),
                Uniform::Vector4(v) => write!(
                    f,
                    "uniform {name} = ({:.3}, {:.3}, {:.3}, {:.3})",
                    v.x(),
                    v.y(),
                    v.z(),
                    v.w()
                ),
                Uniform::Texture(t) => write!(f, "uniform {name} = texture#{}", t.0),
            },
            Self::BindAndUse(shader) => write!(f, "use shader#{}", shader.0),
            Self::DrawPrimitives(count) => write!(f, "draw {count} vertices"),
            Self::SetDepthTest(enabled) => write!(f, "depth test {}", if *enabled { "on" } else { "off" }),
        }
    }
}

/// Device double that records every call in order.
///
/// Depth testing starts enabled, matching a host that turns it on right after
/// creating its context.
#[derive(Debug, Clone)]
pub struct RecordingDevice {
    calls: Vec<DeviceCall>,
    depth_test: bool,
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            depth_test: true,
        }
    }
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Drain and return the recorded calls.
    pub fn take_calls(&mut self) -> Vec<DeviceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Forget recorded calls; device state is kept.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Number of `DrawPrimitives` calls recorded so far.
    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::DrawPrimitives(_)))
            .count()
    }
}

impl GraphicsDevice for RecordingDevice {
    fn clear_buffers(&mut self, flags: ClearFlags) {
        self.calls.push(DeviceCall::Clear(flags));
    }

    fn set_uniform(&mut self, name: &str, value: Uniform) {
        self.calls.push(DeviceCall::SetUniform {
            name: name.to_string(),
            value,
        });
    }

    fn bind_and_use(&mut self, shader: ShaderHandle) {
        self.calls.push(DeviceCall::BindAndUse(shader));
    }

    fn draw_primitives(&mut self, vertex_count: u32) {
        self.calls.push(DeviceCall::DrawPrimitives(vertex_count));
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.depth_test = enabled;
        self.calls.push(DeviceCall::SetDepthTest(enabled));
    }

    fn depth_test_enabled(&self) -> bool {
        self.depth_test
    }
}
