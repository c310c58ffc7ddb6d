//! Backend trait for issuing draw target render passes.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::scene::{DrawTargetSurface, GeometryCollection};
use crate::task::RenderPassState;
use crate::types::{FrontFaceWinding, RenderTag};

/// Depth-bias (polygon offset) state applied around a batch of passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBias {
    /// Whether the bias is applied at all.
    pub enabled: bool,
    /// Slope-scaled bias factor.
    pub slope_factor: f32,
    /// Constant bias factor.
    pub constant_factor: f32,
}

/// The low-level executor the render tasks issue work through.
///
/// The first group of methods mutates context-wide raster state; the second
/// group binds per-pass state and issues draws. Implementations translate
/// these into actual GPU commands; the scheduling layer only guarantees the
/// order in which they are called.
pub trait RenderBackend: fmt::Debug {
    /// Backend name for diagnostics.
    fn name(&self) -> &'static str;

    /// Enable or disable depth bias with the given factors.
    fn set_depth_bias(&self, bias: DepthBias);

    /// Enable or disable alpha-to-coverage sampling.
    fn set_alpha_to_coverage(&self, enabled: bool);

    /// Enable or disable shader-programmable point sizes.
    fn set_program_point_size(&self, enabled: bool);

    /// Set which triangle winding is treated as front-facing.
    fn set_front_face(&self, winding: FrontFaceWinding);

    /// Upload any pending per-pass GPU state (uniform buffers etc.).
    fn prepare_pass(&self, state: &RenderPassState) -> Result<()>;

    /// Make `state` current for subsequent draws.
    fn bind_pass(&self, state: &RenderPassState);

    /// Draw every piece of geometry in `collection` carrying one of
    /// `render_tags` into `surface`.
    fn draw(
        &self,
        state: &RenderPassState,
        collection: &GeometryCollection,
        render_tags: &[RenderTag],
        surface: &Arc<dyn DrawTargetSurface>,
    ) -> Result<()>;

    /// Undo [`bind_pass`](Self::bind_pass).
    fn unbind_pass(&self, state: &RenderPassState);
}

/// Raster toggle overrides applied for the duration of a scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOverrides {
    /// Depth-bias override; `None` leaves the context state untouched.
    pub depth_bias: Option<DepthBias>,
    /// Alpha-to-coverage toggle.
    pub alpha_to_coverage: bool,
    /// Shader-programmable point size toggle.
    pub program_point_size: bool,
    /// Front-face winding.
    pub front_face: FrontFaceWinding,
}

/// Scoped application of context-wide raster toggles.
///
/// The overrides are applied on construction and every toggle is returned to
/// its context default when the guard drops, on every exit path. The guard
/// is not reentrant: two live guards on the same backend would stomp each
/// other's restores.
pub struct ScopedRasterState<'a> {
    backend: &'a dyn RenderBackend,
}

impl<'a> ScopedRasterState<'a> {
    /// Apply `overrides` to `backend` until the returned guard drops.
    pub fn apply(backend: &'a dyn RenderBackend, overrides: &RasterOverrides) -> Self {
        if let Some(bias) = overrides.depth_bias {
            backend.set_depth_bias(bias);
        }
        backend.set_alpha_to_coverage(overrides.alpha_to_coverage);
        backend.set_program_point_size(overrides.program_point_size);
        backend.set_front_face(overrides.front_face);
        Self { backend }
    }
}

impl Drop for ScopedRasterState<'_> {
    fn drop(&mut self) {
        // Context defaults; restored unconditionally, including when the
        // depth bias was never overridden.
        self.backend.set_alpha_to_coverage(false);
        self.backend.set_program_point_size(false);
        self.backend.set_depth_bias(DepthBias {
            enabled: false,
            slope_factor: 0.0,
            constant_factor: 0.0,
        });
        self.backend.set_front_face(FrontFaceWinding::CounterClockwise);
    }
}
