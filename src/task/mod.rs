//! Frame tasks orchestrating draw target rendering.
//!
//! Tasks run three phases per frame (sync, prepare, execute) and share
//! per-frame results through the [`TaskContext`]. The [`DrawTargetTask`]
//! schedules and renders all draw targets in dependency order; the
//! [`DrawTargetResolveTask`] consumes its published pass list and finishes
//! the frame's multisample resolves.

mod context;
mod draw_target_task;
mod pass_state;
mod render_pass;
mod resolve_task;
mod sort;

pub use context::{tokens, TaskContext};
pub use draw_target_task::{DrawTargetTask, RenderPassEntry};
pub use pass_state::RenderPassState;
pub use render_pass::{DrawTargetRenderPass, ResolveHandle};
pub use resolve_task::DrawTargetResolveTask;
