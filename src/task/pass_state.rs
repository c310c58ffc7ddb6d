//! Execution state for a single draw target render pass.

use glam::{Mat4, Vec4};

use crate::scene::LightingShader;
use crate::types::{AovBinding, CompareFunction, CullStyle, Viewport};

/// The raster, camera, and lighting state a render pass executes with.
///
/// One instance is owned per scheduled draw target; the draw target task
/// rewrites it every sync from the task parameters and the target's own
/// settings, so it never goes stale by more than a frame.
#[derive(Debug, Clone, Default)]
pub struct RenderPassState {
    override_color: Vec4,
    wireframe_color: Vec4,
    lighting_enabled: bool,
    alpha_threshold: f32,
    cull_style: CullStyle,
    depth_func: CompareFunction,
    aov_bindings: Vec<AovBinding>,
    lighting_shader: LightingShader,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    viewport: Viewport,
    clip_planes: Vec<Vec4>,
}

impl RenderPassState {
    /// Create a pass state with default raster settings and identity camera.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shading override color.
    pub fn set_override_color(&mut self, color: Vec4) {
        self.override_color = color;
    }

    /// The shading override color.
    pub fn override_color(&self) -> Vec4 {
        self.override_color
    }

    /// Set the wireframe color.
    pub fn set_wireframe_color(&mut self, color: Vec4) {
        self.wireframe_color = color;
    }

    /// The wireframe color.
    pub fn wireframe_color(&self) -> Vec4 {
        self.wireframe_color
    }

    /// Enable or disable lighting.
    pub fn set_lighting_enabled(&mut self, enabled: bool) {
        self.lighting_enabled = enabled;
    }

    /// Whether lighting is enabled.
    pub fn lighting_enabled(&self) -> bool {
        self.lighting_enabled
    }

    /// Set the alpha discard threshold.
    pub fn set_alpha_threshold(&mut self, threshold: f32) {
        self.alpha_threshold = threshold;
    }

    /// The alpha discard threshold.
    pub fn alpha_threshold(&self) -> f32 {
        self.alpha_threshold
    }

    /// Set the face culling style.
    pub fn set_cull_style(&mut self, cull_style: CullStyle) {
        self.cull_style = cull_style;
    }

    /// The face culling style.
    pub fn cull_style(&self) -> CullStyle {
        self.cull_style
    }

    /// Set the depth comparison function (already priority-resolved).
    pub fn set_depth_func(&mut self, depth_func: CompareFunction) {
        self.depth_func = depth_func;
    }

    /// The depth comparison function.
    pub fn depth_func(&self) -> CompareFunction {
        self.depth_func
    }

    /// Replace the output channel bindings.
    pub fn set_aov_bindings(&mut self, bindings: Vec<AovBinding>) {
        self.aov_bindings = bindings;
    }

    /// The output channel bindings.
    pub fn aov_bindings(&self) -> &[AovBinding] {
        &self.aov_bindings
    }

    /// The pass's private lighting shader.
    pub fn lighting_shader(&self) -> &LightingShader {
        &self.lighting_shader
    }

    /// Mutable access to the pass's private lighting shader.
    pub fn lighting_shader_mut(&mut self) -> &mut LightingShader {
        &mut self.lighting_shader
    }

    /// Set the camera framing: matrices, viewport, and clip planes.
    pub fn set_camera_framing(
        &mut self,
        view_matrix: Mat4,
        projection_matrix: Mat4,
        viewport: Viewport,
        clip_planes: Vec<Vec4>,
    ) {
        self.view_matrix = view_matrix;
        self.projection_matrix = projection_matrix;
        self.viewport = viewport;
        self.clip_planes = clip_planes;
    }

    /// The view matrix.
    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// The projection matrix, conformed and flipped for the target.
    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// The viewport.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// User clip planes in view space.
    pub fn clip_planes(&self) -> &[Vec4] {
        &self.clip_planes
    }
}
