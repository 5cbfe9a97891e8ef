use crate::device::{ClearFlags, GraphicsDevice, ShaderHandle, Uniform};

/// Per-frame counters gathered by [`TracingDevice`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub clears: usize,
    pub shader_binds: usize,
    pub uniforms: usize,
    pub draw_calls: usize,
    pub vertices: u64,
    pub depth_toggles: usize,
}

impl std::fmt::Display for FrameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "clears={} binds={} uniforms={} draws={} vertices={} depth_toggles={}",
            self.clears,
            self.shader_binds,
            self.uniforms,
            self.draw_calls,
            self.vertices,
            self.depth_toggles
        )
    }
}

/// Headless device that logs every call through `tracing` and counts work.
///
/// Stands in for a GPU backend when running scenes from the command line.
#[derive(Debug)]
pub struct TracingDevice {
    depth_test: bool,
    stats: FrameStats,
}

impl Default for TracingDevice {
    fn default() -> Self {
        Self {
            depth_test: true,
            stats: FrameStats::default(),
        }
    }
}

impl TracingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Return the counters gathered since the last call and reset them.
    pub fn end_frame(&mut self) -> FrameStats {
        std::mem::take(&mut self.stats)
    }
}

impl GraphicsDevice for TracingDevice {
    fn clear_buffers(&mut self, flags: ClearFlags) {
        tracing::debug!(color = flags.color, depth = flags.depth, "clear");
        self.stats.clears += 1;
    }

    fn set_uniform(&mut self, name: &str, value: Uniform) {
        tracing::trace!(name, ?value, "set uniform");
        self.stats.uniforms += 1;
    }

    fn bind_and_use(&mut self, shader: ShaderHandle) {
        tracing::debug!(shader = shader.0, "bind shader");
        self.stats.shader_binds += 1;
    }

    fn draw_primitives(&mut self, vertex_count: u32) {
        tracing::debug!(vertex_count, "draw");
        self.stats.draw_calls += 1;
        self.stats.vertices += u64::from(vertex_count);
    }

    fn set_depth_test(&mut self, enabled: bool) {
        tracing::debug!(enabled, "depth test");
        self.depth_test = enabled;
        self.stats.depth_toggles += 1;
    }

    fn depth_test_enabled(&self) -> bool {
        self.depth_test
    }
}
