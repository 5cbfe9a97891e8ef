use std::ops::{Deref, DerefMut};

use crate::device::GraphicsDevice;

/// Scoped depth-test override.
///
/// Applies the requested state on construction and puts back whatever the
/// device reported beforehand when dropped, including during unwinding. Issue
/// further device calls through the guard while it is alive.
pub struct DepthTestOverride<'a> {
    device: &'a mut dyn GraphicsDevice,
    previous: bool,
}

impl<'a> DepthTestOverride<'a> {
    pub fn new(device: &'a mut dyn GraphicsDevice, enabled: bool) -> Self {
        let previous = device.depth_test_enabled();
        device.set_depth_test(enabled);
        tracing::trace!(enabled, previous, "depth test override");
        Self { device, previous }
    }

    pub fn disable(device: &'a mut dyn GraphicsDevice) -> Self {
        Self::new(device, false)
    }

    /// The state that will be restored on drop.
    pub fn previous(&self) -> bool {
        self.previous
    }
}

impl<'a> Deref for DepthTestOverride<'a> {
    type Target = dyn GraphicsDevice + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.device
    }
}

impl<'a> DerefMut for DepthTestOverride<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.device
    }
}

impl Drop for DepthTestOverride<'_> {
    fn drop(&mut self) {
        self.device.set_depth_test(self.previous);
    }
}
