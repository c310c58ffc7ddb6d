//! # Mirage Render
//!
//! A draw-target scheduling engine: renders a scene into a set of off-screen
//! draw targets whose outputs other geometry in the same scene samples
//! (reflections, shadow maps, render-to-texture effects).
//!
//! ## Overview
//!
//! Draw targets can depend on each other: one target's output texture is
//! sampled by geometry rendered into another, so they cannot simply be
//! drawn in authoring order. Each frame this crate:
//!
//! - infers the dependency graph between targets from their geometry
//!   collections and topologically sorts them (cycle tolerant);
//! - derives per-target render state (conformed projection,
//!   priority-adjusted depth test, lighting bindings);
//! - executes the passes in dependency order, resolving each multisampled
//!   target right before a downstream pass samples it.
//!
//! Scene data arrives through the [`SceneDelegate`] contract, draws are
//! issued through the [`RenderBackend`] trait, and tasks running in the same
//! frame share results through the [`TaskContext`].
//!
//! ## Example
//!
//! ```ignore
//! use mirage_render::{DirtyBits, DrawTargetTask, TaskContext};
//!
//! let mut task = DrawTargetTask::new(backend);
//! let mut ctx = TaskContext::new();
//! let mut dirty = DirtyBits::all();
//!
//! // Each frame:
//! task.sync(&scene, &mut ctx, &mut dirty);
//! task.prepare(&mut ctx);
//! task.execute(&mut ctx);
//! ```

pub mod backend;
pub mod error;
pub mod path;
pub mod scene;
pub mod task;
pub mod types;

// Re-export main types for convenience
pub use backend::{
    BackendEvent, DepthBias, DummyBackend, DummySurface, RasterOverrides, RenderBackend,
    ScopedRasterState,
};
pub use error::{Error, Result};
pub use path::ScenePath;
pub use scene::{
    conform_projection, Camera, DirtyBits, DrawTarget, DrawTargetPassState, DrawTargetSurface,
    DrawTargetTaskParams, GeometryCollection, LightingContext, LightingShader, SceneDelegate,
    ShadowSettings, SimpleLight, SimpleMaterial, WindowPolicy,
};
pub use task::{
    tokens, DrawTargetRenderPass, DrawTargetResolveTask, DrawTargetTask, RenderPassEntry,
    RenderPassState, ResolveHandle, TaskContext,
};
pub use types::{
    AovBinding, CompareFunction, CullStyle, DepthPriority, FrontFaceWinding, RenderTag, Viewport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the render task subsystem.
///
/// This only emits a startup banner; call it once before the first frame.
pub fn init() {
    log::info!("Mirage Render v{} initialized", VERSION);
}
