//! The resolve task: final multisample resolve for all draw targets.

use crate::scene::{DirtyBits, SceneDelegate};
use crate::task::context::{tokens, TaskContext};
use crate::task::render_pass::ResolveHandle;

/// Resolves every draw target surface published by the draw target task.
///
/// The draw target task resolves a surface mid-batch only when a later pass
/// samples it; this task runs afterwards and brings every surface to its
/// readable state for the rest of the frame. It consumes the pass list from
/// the task context, so the dependency graph is never recomputed.
#[derive(Debug, Default)]
pub struct DrawTargetResolveTask;

impl DrawTargetResolveTask {
    /// Create a resolve task.
    pub fn new() -> Self {
        Self
    }

    /// Nothing to pull from the scene; clears the dirty bits.
    pub fn sync(
        &mut self,
        _delegate: &dyn SceneDelegate,
        _ctx: &mut TaskContext,
        dirty_bits: &mut DirtyBits,
    ) {
        *dirty_bits = DirtyBits::empty();
    }

    /// No per-frame preparation.
    pub fn prepare(&mut self, _ctx: &mut TaskContext) {}

    /// Resolve every published surface, in pass order.
    pub fn execute(&mut self, ctx: &mut TaskContext) {
        let Some(handles) = ctx.get::<Vec<ResolveHandle>>(tokens::DRAW_TARGET_RENDER_PASSES)
        else {
            log::trace!("no draw target passes published; nothing to resolve");
            return;
        };

        for handle in handles.iter() {
            handle.surface.resolve();
        }
    }
}
