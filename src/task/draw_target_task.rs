//! The draw target task: schedules and renders all draw targets in a scene.

use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::backend::{DepthBias, RasterOverrides, RenderBackend, ScopedRasterState};
use crate::scene::{
    conform_projection, DirtyBits, DrawTarget, DrawTargetTaskParams, LightingContext,
    SceneDelegate,
};
use crate::task::context::{tokens, TaskContext};
use crate::task::pass_state::RenderPassState;
use crate::task::render_pass::{DrawTargetRenderPass, ResolveHandle};
use crate::task::sort::sort_draw_targets;
use crate::types::{CompareFunction, DepthPriority, FrontFaceWinding, RenderTag, Viewport};

/// Remap of requested depth comparisons per depth priority.
///
/// `Farthest` mirrors the ordering comparisons so the farthest fragment wins;
/// `Never`, `Equal`, `NotEqual`, and `Always` are order-free and pass
/// through. Indexed by `[priority][requested function]`, both in variant
/// order.
const RESOLVED_DEPTH_FUNC: [[CompareFunction; 8]; 2] = [
    // DepthPriority::Nearest
    [
        CompareFunction::Never,
        CompareFunction::Less,
        CompareFunction::Equal,
        CompareFunction::LessEqual,
        CompareFunction::Greater,
        CompareFunction::NotEqual,
        CompareFunction::GreaterEqual,
        CompareFunction::Always,
    ],
    // DepthPriority::Farthest
    [
        CompareFunction::Never,
        CompareFunction::GreaterEqual,
        CompareFunction::Equal,
        CompareFunction::Greater,
        CompareFunction::LessEqual,
        CompareFunction::NotEqual,
        CompareFunction::Less,
        CompareFunction::Always,
    ],
];

fn resolved_depth_func(depth_func: CompareFunction, priority: DepthPriority) -> CompareFunction {
    RESOLVED_DEPTH_FUNC[priority as usize][depth_func as usize]
}

/// One scheduled draw target with its execution state.
#[derive(Debug)]
pub struct RenderPassEntry {
    pass_state: RenderPassState,
    render_pass: DrawTargetRenderPass,
    target: Arc<DrawTarget>,
    /// Target version the pass was last refreshed against.
    version: u64,
}

impl RenderPassEntry {
    /// The pass's execution state.
    pub fn pass_state(&self) -> &RenderPassState {
        &self.pass_state
    }

    /// The pass itself.
    pub fn render_pass(&self) -> &DrawTargetRenderPass {
        &self.render_pass
    }

    /// The draw target this entry renders.
    pub fn target(&self) -> &Arc<DrawTarget> {
        &self.target
    }

    /// The target version this entry was last refreshed against.
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Renders a scene into every enabled draw target, in dependency order.
///
/// The task runs three phases per frame:
///
/// 1. [`sync`](Self::sync) - pull changed inputs from the scene delegate,
///    re-sort the targets when the set changed, and rebuild per-pass render
///    state;
/// 2. [`prepare`](Self::prepare) - per-pass finalization hooks;
/// 3. [`execute`](Self::execute) - issue the draws in the stored order,
///    resolving each multisampled target as soon as a later pass needs to
///    sample it.
///
/// The ordered pass list is published into the [`TaskContext`] under
/// [`tokens::DRAW_TARGET_RENDER_PASSES`] for the downstream resolve task.
#[derive(Debug)]
pub struct DrawTargetTask {
    backend: Arc<dyn RenderBackend>,
    /// Version of the draw-target set the entries were built against.
    current_set_version: u64,
    entries: Vec<RenderPassEntry>,
    params: DrawTargetTaskParams,
    enable_alpha_to_coverage: bool,
    render_tags: Vec<RenderTag>,
}

impl DrawTargetTask {
    /// Create a task issuing work through `backend`.
    pub fn new(backend: Arc<dyn RenderBackend>) -> Self {
        Self {
            backend,
            current_set_version: 0,
            entries: Vec::new(),
            params: DrawTargetTaskParams::default(),
            enable_alpha_to_coverage: true,
            render_tags: Vec::new(),
        }
    }

    /// The scheduled entries, in execution order.
    pub fn entries(&self) -> &[RenderPassEntry] {
        &self.entries
    }

    /// Tags of the geometry this task draws.
    pub fn render_tags(&self) -> &[RenderTag] {
        &self.render_tags
    }

    /// Whether alpha-to-coverage will be enabled during execute.
    pub fn alpha_to_coverage_enabled(&self) -> bool {
        self.enable_alpha_to_coverage
    }

    /// Pull changed inputs from the scene and rebuild render state.
    ///
    /// Consumed dirty bits are cleared on success. A missing camera abandons
    /// the remaining state refresh for this frame: entries refreshed before
    /// the fault keep their new state, later entries keep last frame's, and
    /// the dirty bits are left set so the next sync retries.
    pub fn sync(
        &mut self,
        delegate: &dyn SceneDelegate,
        ctx: &mut TaskContext,
        dirty_bits: &mut DirtyBits,
    ) {
        if dirty_bits.contains(DirtyBits::PARAMS) {
            let Some(params) = delegate.task_params() else {
                log::error!("draw target task parameters unavailable from the scene delegate");
                return;
            };
            self.params = params;
        }

        if dirty_bits.contains(DirtyBits::RENDER_TAGS) {
            self.render_tags = delegate.render_tags();
        }

        // Re-sorting is quadratic in the number of targets, so it runs only
        // when the set itself changed; individual target edits take the
        // cheap path below.
        let set_version = delegate.draw_target_set_version();
        if self.current_set_version != set_version {
            self.rebuild_entries(delegate);
            self.current_set_version = set_version;
        } else {
            for entry in &mut self.entries {
                let target_version = entry.target.version();
                if entry.version != target_version {
                    entry.render_pass.set_surface(entry.target.surface());
                    entry.version = target_version;
                }
            }
        }

        // Publish the ordered pass list so the resolve task does not have to
        // extract the targets again.
        let handles: Vec<ResolveHandle> = self
            .entries
            .iter()
            .map(|entry| ResolveHandle {
                path: entry.target.path().clone(),
                surface: entry.render_pass.surface().clone(),
            })
            .collect();
        ctx.set(tokens::DRAW_TARGET_RENDER_PASSES, Arc::new(handles));

        // Draw targets address texels top-down; flip the projection's Y to
        // match.
        let y_flip = Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0));

        let shared_lighting = ctx.get::<LightingContext>(tokens::LIGHTING_CONTEXT);
        let backend = Arc::clone(&self.backend);
        let params = self.params.clone();

        for entry in &mut self.entries {
            let target = Arc::clone(&entry.target);
            let camera_path = target.pass_state().camera_path();

            let Some(camera) = delegate.camera(camera_path) else {
                // The pass should not have been scheduled against a camera
                // that is absent from the scene.
                log::error!(
                    "invalid camera '{}' for draw target '{}'",
                    camera_path,
                    target.path()
                );
                return;
            };

            let depth_func =
                resolved_depth_func(params.depth_func, target.pass_state().depth_priority());

            let state = &mut entry.pass_state;
            state.set_override_color(params.override_color);
            state.set_wireframe_color(params.wireframe_color);
            state.set_lighting_enabled(params.enable_lighting);
            state.set_alpha_threshold(params.alpha_threshold);
            state.set_cull_style(params.cull_style);
            state.set_depth_func(depth_func);
            state.set_aov_bindings(target.pass_state().aov_bindings().to_vec());

            let resolution = target.resolution();
            let aspect = if resolution.y != 0 {
                resolution.x as f32 / resolution.y as f32
            } else {
                1.0
            };

            let view_matrix = camera.view_matrix();
            let projection_matrix = conform_projection(
                camera.projection_matrix(),
                camera.window_policy(),
                aspect,
            ) * y_flip;

            state.set_camera_framing(
                view_matrix,
                projection_matrix,
                Viewport::from_resolution(resolution),
                camera.clip_planes().to_vec(),
            );

            let lighting = state.lighting_shader_mut().lighting_context_mut();
            lighting.set_camera(view_matrix, projection_matrix);
            if let Some(shared) = &shared_lighting {
                lighting.set_use_lighting(shared.use_lighting());
                lighting.set_lights(shared.lights().to_vec());
                lighting.set_material(shared.material());
                lighting.set_scene_ambient(shared.scene_ambient());
                lighting.set_shadows(shared.shadows());
                lighting.set_use_color_material_diffuse(shared.use_color_material_diffuse());
            }

            if let Err(err) = backend.prepare_pass(&entry.pass_state) {
                log::error!(
                    "preparing pass state for draw target '{}' failed: {err}",
                    target.path()
                );
            }
            entry.render_pass.sync();
        }

        // Rendering into draw targets needs alpha-to-coverage until a proper
        // transparency pass exists, so it is forced on; the delegate's debug
        // switch is the only way to turn it off.
        self.enable_alpha_to_coverage = !delegate.alpha_to_coverage_disabled();

        *dirty_bits = DirtyBits::empty();
    }

    /// Run per-pass finalization hooks, in order.
    pub fn prepare(&mut self, _ctx: &mut TaskContext) {
        for entry in &mut self.entries {
            entry.render_pass.prepare();
        }
    }

    /// Issue the draws in the stored topological order.
    ///
    /// A target with dependent targets is resolved immediately after its
    /// draw, before any later pass that might sample it. Context-wide raster
    /// toggles are applied up front and restored when the frame's batch
    /// ends, whether or not any entries were scheduled.
    pub fn execute(&mut self, _ctx: &mut TaskContext) {
        let backend = Arc::clone(&self.backend);

        let overrides = RasterOverrides {
            depth_bias: (!self.params.depth_bias_use_default).then_some(DepthBias {
                enabled: self.params.depth_bias_enable,
                slope_factor: self.params.depth_bias_slope_factor,
                constant_factor: self.params.depth_bias_constant_factor,
            }),
            alpha_to_coverage: self.enable_alpha_to_coverage,
            program_point_size: true,
            // Upstream geometry is authored counter-clockwise; rendering
            // into a flipped target reverses it.
            front_face: FrontFaceWinding::Clockwise,
        };
        let _raster_state = ScopedRasterState::apply(backend.as_ref(), &overrides);

        for entry in &self.entries {
            backend.bind_pass(&entry.pass_state);
            if let Err(err) =
                entry
                    .render_pass
                    .execute(backend.as_ref(), &entry.pass_state, &self.render_tags)
            {
                log::error!("draw target pass '{}' failed: {err}", entry.target.path());
            }
            backend.unbind_pass(&entry.pass_state);

            if entry.render_pass.has_dependent_draw_targets() {
                // Later passes sample this target; resolve before they fire.
                entry.render_pass.surface().resolve();
            }
        }
    }

    /// Discard all entries and rebuild them from the scene, in dependency
    /// order, one per enabled target.
    fn rebuild_entries(&mut self, delegate: &dyn SceneDelegate) {
        let draw_targets = delegate.draw_targets();
        let sorted = sort_draw_targets(&draw_targets);

        self.entries.clear();
        self.entries.reserve(sorted.len());

        for entry in sorted {
            if !entry.draw_target.is_enabled() {
                continue;
            }
            let version = entry.draw_target.version();
            self.entries.push(RenderPassEntry {
                pass_state: RenderPassState::new(),
                render_pass: DrawTargetRenderPass::new(
                    &entry.draw_target,
                    entry.has_dependent_draw_targets,
                ),
                target: entry.draw_target,
                version,
            });
        }

        log::trace!("rebuilt {} draw target render passes", self.entries.len());
    }
}
