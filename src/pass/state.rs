//! Scoped save/restore of cross-cutting host renderer state.
//!
//! The reflection render must not inherit the host's stereo/XR camera
//! override or trigger shadow-map recomputation, and neither flag may leak
//! past the offscreen render. The guard snapshots both at capture,
//! neutralizes them, and restores them in `Drop`, so restoration runs on
//! every exit path without the pass having to thread it through each
//! branch.

use crate::host::HostRenderer;

/// Snapshot of host flags, neutralized while alive, restored on drop.
pub struct HostStateGuard<'a, R: HostRenderer> {
    renderer: &'a mut R,
    xr_enabled: bool,
    shadow_auto_update: bool,
}

impl<'a, R: HostRenderer> HostStateGuard<'a, R> {
    pub fn capture(renderer: &'a mut R) -> Self {
        let xr_enabled = renderer.xr_enabled();
        let shadow_auto_update = renderer.shadow_auto_update();

        renderer.set_xr_enabled(false);
        renderer.set_shadow_auto_update(false);

        Self {
            renderer,
            xr_enabled,
            shadow_auto_update,
        }
    }

    /// Access to the guarded renderer for the offscreen render itself.
    pub fn renderer(&mut self) -> &mut R {
        self.renderer
    }
}

impl<R: HostRenderer> Drop for HostStateGuard<'_, R> {
    fn drop(&mut self) {
        self.renderer.set_xr_enabled(self.xr_enabled);
        self.renderer.set_shadow_auto_update(self.shadow_auto_update);
    }
}
