//! Graphics-device capability consumed by the scene graph.
//!
//! # Invariants
//! - Scene nodes talk to the GPU only through [`GraphicsDevice`].
//! - Global device toggles are changed through scoped guards
//!   ([`DepthTestOverride`]) that restore the prior state on every exit path.
//!
//! Two devices ship with the crate: [`RecordingDevice`] keeps an ordered call
//! log for tests and traces, [`TracingDevice`] logs calls and counts per-frame
//! work for headless runs.

mod device;
mod recording;
mod scope;
mod tracing_device;

pub use device::{ClearFlags, GraphicsDevice, ShaderHandle, TextureHandle, Uniform};
pub use recording::{DeviceCall, RecordingDevice};
pub use scope::DepthTestOverride;
pub use tracing_device::{FrameStats, TracingDevice};

pub fn crate_info() -> &'static str {
    "lumen-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
