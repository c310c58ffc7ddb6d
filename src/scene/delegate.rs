//! The scene delegate contract and its change-tracking flags.

use std::sync::Arc;

use glam::Vec4;

use crate::path::ScenePath;
use crate::scene::camera::Camera;
use crate::scene::draw_target::DrawTarget;
use crate::types::{CompareFunction, CullStyle, RenderTag};

bitflags::bitflags! {
    /// Change-tracking flags handed to a task on sync.
    ///
    /// The scene's change tracker sets bits as input data changes; the task
    /// consumes the categories it reads and clears the flags when the sync
    /// completes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirtyBits: u32 {
        /// Task parameters changed.
        const PARAMS = 1 << 0;
        /// The render tag list changed.
        const RENDER_TAGS = 1 << 1;
    }
}

/// Parameters of the draw target task, polled from the scene delegate when
/// the `PARAMS` dirty bit is set.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawTargetTaskParams {
    /// Color overriding all shading when bound.
    pub override_color: Vec4,
    /// Color used for wireframe rendering.
    pub wireframe_color: Vec4,
    /// Whether lighting is enabled for the passes.
    pub enable_lighting: bool,
    /// Alpha threshold below which fragments are discarded.
    pub alpha_threshold: f32,
    /// Leave the context's depth-bias state untouched when true.
    pub depth_bias_use_default: bool,
    /// Whether depth bias (polygon offset) is enabled.
    pub depth_bias_enable: bool,
    /// Constant depth bias factor.
    pub depth_bias_constant_factor: f32,
    /// Slope-scaled depth bias factor.
    pub depth_bias_slope_factor: f32,
    /// Requested depth comparison, before priority remapping.
    pub depth_func: CompareFunction,
    /// Face culling style.
    pub cull_style: CullStyle,
}

impl Default for DrawTargetTaskParams {
    fn default() -> Self {
        Self {
            override_color: Vec4::ZERO,
            wireframe_color: Vec4::ZERO,
            enable_lighting: false,
            alpha_threshold: 0.0,
            depth_bias_use_default: true,
            depth_bias_enable: false,
            depth_bias_constant_factor: 0.0,
            depth_bias_slope_factor: 1.0,
            depth_func: CompareFunction::LessEqual,
            cull_style: CullStyle::BackUnlessDoubleSided,
        }
    }
}

/// The scene-side collaborator the render tasks pull their inputs from.
///
/// This is a narrow read-only contract: the tasks never push state back into
/// the scene. Expensive queries (`task_params`, `render_tags`) are polled
/// only when the corresponding [`DirtyBits`] flag is set;
/// `draw_target_set_version` gates the full re-enumeration of targets.
pub trait SceneDelegate {
    /// Current task parameters, or `None` when they cannot be produced.
    fn task_params(&self) -> Option<DrawTargetTaskParams>;

    /// Tags of the geometry the task should draw.
    fn render_tags(&self) -> Vec<RenderTag>;

    /// Version of the draw-target *set*; advances whenever targets are
    /// added, removed, or enabled/disabled.
    fn draw_target_set_version(&self) -> u64;

    /// All draw targets currently in the scene, in namespace order.
    fn draw_targets(&self) -> Vec<Arc<DrawTarget>>;

    /// Look up a camera by path; `None` if absent from the scene.
    fn camera(&self, path: &ScenePath) -> Option<Arc<Camera>>;

    /// Debug switch force-disabling alpha-to-coverage.
    fn alpha_to_coverage_disabled(&self) -> bool {
        false
    }
}
