//! The per-target render pass owned by the draw target task.

use std::sync::Arc;

use crate::backend::RenderBackend;
use crate::error::Result;
use crate::path::ScenePath;
use crate::scene::{DrawTarget, DrawTargetSurface, GeometryCollection};
use crate::task::pass_state::RenderPassState;
use crate::types::RenderTag;

/// A render pass that draws one target's geometry collection into its
/// surface.
#[derive(Debug)]
pub struct DrawTargetRenderPass {
    surface: Arc<dyn DrawTargetSurface>,
    collection: GeometryCollection,
    has_dependent_draw_targets: bool,
}

impl DrawTargetRenderPass {
    /// Create a pass for `target`.
    pub(crate) fn new(target: &DrawTarget, has_dependent_draw_targets: bool) -> Self {
        Self {
            surface: target.surface(),
            collection: target.collection().clone(),
            has_dependent_draw_targets,
        }
    }

    /// The surface this pass renders into.
    pub fn surface(&self) -> &Arc<dyn DrawTargetSurface> {
        &self.surface
    }

    /// Rebind the surface after the target's attachments were rebuilt.
    pub(crate) fn set_surface(&mut self, surface: Arc<dyn DrawTargetSurface>) {
        self.surface = surface;
    }

    /// Whether a later pass samples this pass's output.
    pub fn has_dependent_draw_targets(&self) -> bool {
        self.has_dependent_draw_targets
    }

    /// Per-sync hook; the geometry behind the collection is synced by the
    /// scene, so there is nothing to pull here yet.
    pub(crate) fn sync(&mut self) {
        log::trace!(
            "synced draw target pass into '{}'",
            self.surface.label()
        );
    }

    /// Per-prepare hook, invoked after sync and before execute.
    pub(crate) fn prepare(&mut self) {
        log::trace!(
            "prepared draw target pass into '{}'",
            self.surface.label()
        );
    }

    /// Issue the draw through the backend.
    pub(crate) fn execute(
        &self,
        backend: &dyn RenderBackend,
        state: &RenderPassState,
        render_tags: &[RenderTag],
    ) -> Result<()> {
        backend.draw(state, &self.collection, render_tags, &self.surface)
    }
}

/// Published handle to one scheduled pass, in execution order.
///
/// The draw target task stores a list of these in the task context under
/// [`tokens::DRAW_TARGET_RENDER_PASSES`](crate::task::tokens::DRAW_TARGET_RENDER_PASSES)
/// so the downstream resolve task can finish the frame without recomputing
/// the dependency graph.
#[derive(Debug, Clone)]
pub struct ResolveHandle {
    /// Path of the draw target the pass renders.
    pub path: ScenePath,
    /// The surface to resolve.
    pub surface: Arc<dyn DrawTargetSurface>,
}
