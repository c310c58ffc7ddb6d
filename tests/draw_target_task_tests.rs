//! Integration tests for the draw target task.
//!
//! These drive full sync/prepare/execute frames against the dummy backend
//! and a scripted scene, asserting on the recorded backend event stream:
//! execution order, interleaved resolves, incremental refresh behavior, and
//! raster-toggle symmetry.

mod common;

use std::sync::Arc;

use glam::UVec2;

use common::{
    entry_position, event_position, has_event, init_logging, make_target, TestScene, MAIN_CAMERA,
};
use mirage_render::{
    tokens, AovBinding, BackendEvent, CompareFunction, DepthBias, DirtyBits, DrawTarget,
    DrawTargetPassState, DrawTargetResolveTask, DrawTargetTask, DummyBackend, FrontFaceWinding,
    LightingContext, ScenePath, TaskContext,
};

/// Run one full frame: sync, prepare, execute.
fn run_frame(
    task: &mut DrawTargetTask,
    scene: &TestScene,
    ctx: &mut TaskContext,
    dirty_bits: &mut DirtyBits,
) {
    task.sync(scene, ctx, dirty_bits);
    task.prepare(ctx);
    task.execute(ctx);
}

#[test]
fn draws_in_dependency_order_and_resolves_between() {
    init_logging();
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();

    // Discovery order is b before a, but b samples a's output.
    scene.add_target(make_target(&backend, "b", &["/Targets/a"]));
    scene.add_target(make_target(&backend, "a", &["/World"]));

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();

    task.sync(&scene, &mut ctx, &mut dirty);
    task.prepare(&mut ctx);
    backend.take_events();

    task.execute(&mut ctx);
    let events = backend.take_events();

    let draw_a = event_position(&events, &BackendEvent::Draw("a".to_string()));
    let resolve_a = event_position(&events, &BackendEvent::Resolve("a".to_string()));
    let draw_b = event_position(&events, &BackendEvent::Draw("b".to_string()));

    assert!(draw_a < resolve_a, "a must be resolved after its draw");
    assert!(resolve_a < draw_b, "a must be resolved before b samples it");
    assert!(
        !has_event(&events, &BackendEvent::Resolve("b".to_string())),
        "nothing depends on b, so the task must not resolve it"
    );
}

#[test]
fn raster_toggles_are_restored_after_execute() {
    init_logging();
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(make_target(&backend, "a", &["/World"]));

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();

    task.sync(&scene, &mut ctx, &mut dirty);
    backend.take_events();

    task.execute(&mut ctx);
    let events = backend.take_events();

    // Everything enabled up front is back at its default at the end.
    let restore = &events[events.len() - 4..];
    assert_eq!(
        restore,
        &[
            BackendEvent::AlphaToCoverage(false),
            BackendEvent::ProgramPointSize(false),
            BackendEvent::DepthBias(DepthBias {
                enabled: false,
                slope_factor: 0.0,
                constant_factor: 0.0,
            }),
            BackendEvent::FrontFace(FrontFaceWinding::CounterClockwise),
        ]
    );

    let draw = event_position(&events, &BackendEvent::Draw("a".to_string()));
    let front_face_override =
        event_position(&events, &BackendEvent::FrontFace(FrontFaceWinding::Clockwise));
    assert!(front_face_override < draw);
}

#[test]
fn raster_toggles_are_restored_with_no_targets() {
    let backend = Arc::new(DummyBackend::new());
    let scene = TestScene::new();

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();

    run_frame(&mut task, &scene, &mut ctx, &mut dirty);

    assert!(task.entries().is_empty());
    assert_eq!(
        backend.take_events(),
        vec![
            BackendEvent::AlphaToCoverage(true),
            BackendEvent::ProgramPointSize(true),
            BackendEvent::FrontFace(FrontFaceWinding::Clockwise),
            BackendEvent::AlphaToCoverage(false),
            BackendEvent::ProgramPointSize(false),
            BackendEvent::DepthBias(DepthBias {
                enabled: false,
                slope_factor: 0.0,
                constant_factor: 0.0,
            }),
            BackendEvent::FrontFace(FrontFaceWinding::CounterClockwise),
        ]
    );
    assert!(dirty.is_empty());
}

#[test]
fn individual_version_bump_only_rebinds_that_surface() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(make_target(&backend, "a", &["/World/A"]));
    scene.add_target(make_target(&backend, "b", &["/World/B"]));

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);

    let a = entry_position(task.entries(), "a");
    let b = entry_position(task.entries(), "b");
    let b_surface_before = task.entries()[b].render_pass().surface().clone();
    let b_version_before = task.entries()[b].version();

    // Rebuild a's attachments: swaps the surface and bumps its version; the
    // set version is untouched.
    scene.targets[0].set_surface(backend.create_surface("a-rebuilt", 4));

    let mut dirty = DirtyBits::empty();
    task.sync(&scene, &mut ctx, &mut dirty);

    assert_eq!(task.entries().len(), 2);
    assert_eq!(entry_position(task.entries(), "a"), a, "order unchanged");
    assert_eq!(
        task.entries()[a].render_pass().surface().label(),
        "a-rebuilt"
    );
    assert_eq!(task.entries()[a].version(), scene.targets[0].version());

    // The other entry is untouched.
    assert!(Arc::ptr_eq(
        task.entries()[b].render_pass().surface(),
        &b_surface_before
    ));
    assert_eq!(task.entries()[b].version(), b_version_before);
}

#[test]
fn set_version_change_rebuilds_membership() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(make_target(&backend, "a", &["/World"]));

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);
    assert_eq!(task.entries().len(), 1);

    scene.add_target(make_target(&backend, "b", &["/World"]));
    let mut dirty = DirtyBits::empty();
    task.sync(&scene, &mut ctx, &mut dirty);
    assert_eq!(task.entries().len(), 2);

    scene.remove_target(&ScenePath::new("/Targets/a"));
    task.sync(&scene, &mut ctx, &mut dirty);
    assert_eq!(task.entries().len(), 1);
    assert_eq!(entry_position(task.entries(), "b"), 0);
}

#[test]
fn disabled_targets_are_not_scheduled() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(make_target(&backend, "a", &["/World"]));
    scene.add_target(Arc::new(
        DrawTarget::new(
            ScenePath::new("/Targets/off"),
            DrawTargetPassState::new(ScenePath::new(MAIN_CAMERA)),
            backend.create_surface("off", 4),
        )
        .unwrap()
        .with_enabled(false),
    ));

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);

    assert_eq!(task.entries().len(), 1);
    assert_eq!(entry_position(task.entries(), "a"), 0);
}

#[test]
fn missing_camera_abandons_the_sync() {
    init_logging();
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(Arc::new(
        DrawTarget::new(
            ScenePath::new("/Targets/orphan"),
            DrawTargetPassState::new(ScenePath::new("/Cameras/Gone")),
            backend.create_surface("orphan", 4),
        )
        .unwrap(),
    ));

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);

    // The entry exists but the sync aborted before completing, so the dirty
    // bits stay set and the next sync retries.
    assert_eq!(task.entries().len(), 1);
    assert!(!dirty.is_empty());

    // Once the camera appears the same sync succeeds.
    scene.cameras.insert(
        ScenePath::new("/Cameras/Gone"),
        scene.cameras[&ScenePath::new(MAIN_CAMERA)].clone(),
    );
    task.sync(&scene, &mut ctx, &mut dirty);
    assert!(dirty.is_empty());
}

#[test]
fn zero_height_resolution_falls_back_to_square_aspect() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(Arc::new(
        DrawTarget::new(
            ScenePath::new("/Targets/flat"),
            DrawTargetPassState::new(ScenePath::new(MAIN_CAMERA)),
            backend.create_surface("flat", 4),
        )
        .unwrap()
        .with_resolution(UVec2::new(256, 0)),
    ));

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);

    let projection = task.entries()[0].pass_state().projection_matrix();
    assert!(projection.is_finite());
    // Conformed to the 1.0 fallback aspect (and Y-flipped): the horizontal
    // scale matches the negated vertical scale.
    assert_eq!(projection.x_axis.x, -projection.y_axis.y);
}

#[test]
fn projection_is_conformed_and_y_flipped() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(Arc::new(
        DrawTarget::new(
            ScenePath::new("/Targets/wide"),
            DrawTargetPassState::new(ScenePath::new(MAIN_CAMERA)),
            backend.create_surface("wide", 4),
        )
        .unwrap()
        .with_resolution(UVec2::new(512, 256)),
    ));

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);

    let state = task.entries()[0].pass_state();
    let projection = state.projection_matrix();

    // Vertical aperture preserved, horizontal conformed to 2:1, Y flipped.
    let camera_projection = scene.cameras[&ScenePath::new(MAIN_CAMERA)].projection_matrix();
    assert_eq!(projection.y_axis.y, -camera_projection.y_axis.y);
    assert!((projection.x_axis.x - camera_projection.y_axis.y / 2.0).abs() < 1e-5);

    assert_eq!(state.viewport().width, 512.0);
    assert_eq!(state.viewport().height, 256.0);
    assert_eq!(state.clip_planes().len(), 1, "camera clip planes carried over");
}

#[test]
fn aov_bindings_are_copied_from_the_target() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(Arc::new(
        DrawTarget::new(
            ScenePath::new("/Targets/aov"),
            DrawTargetPassState::new(ScenePath::new(MAIN_CAMERA))
                .with_aov_binding(AovBinding::new("color").with_clear_value(glam::Vec4::ONE))
                .with_aov_binding(AovBinding::new("depth")),
            backend.create_surface("aov", 4),
        )
        .unwrap(),
    ));

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);

    let bindings = task.entries()[0].pass_state().aov_bindings();
    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings[0].name, "color");
    assert_eq!(bindings[1].clear_value, None);
}

#[test]
fn params_are_polled_only_when_dirty() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(make_target(&backend, "a", &["/World"]));
    scene.params.depth_func = CompareFunction::Greater;

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);
    assert_eq!(
        task.entries()[0].pass_state().depth_func(),
        CompareFunction::Greater
    );

    // The scene's params change, but nothing marked them dirty.
    scene.params.depth_func = CompareFunction::Less;
    let mut dirty = DirtyBits::empty();
    task.sync(&scene, &mut ctx, &mut dirty);
    assert_eq!(
        task.entries()[0].pass_state().depth_func(),
        CompareFunction::Greater
    );
}

#[test]
fn unavailable_params_leave_dirty_bits_set() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(make_target(&backend, "a", &["/World"]));
    scene.params_available = false;

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);

    assert!(task.entries().is_empty(), "sync aborted before scheduling");
    assert!(dirty.contains(DirtyBits::PARAMS));
}

#[test]
fn render_tags_are_polled_only_when_dirty() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);
    assert_eq!(task.render_tags(), ["geometry".to_string()]);

    scene.render_tags = vec!["geometry".to_string(), "guide".to_string()];
    let mut dirty = DirtyBits::empty();
    task.sync(&scene, &mut ctx, &mut dirty);
    assert_eq!(task.render_tags().len(), 1);

    let mut dirty = DirtyBits::RENDER_TAGS;
    task.sync(&scene, &mut ctx, &mut dirty);
    assert_eq!(task.render_tags().len(), 2);
}

#[test]
fn shared_lighting_context_is_propagated() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(make_target(&backend, "a", &["/World"]));

    let mut shared = LightingContext::new();
    shared.set_use_lighting(true);
    shared.set_lights(vec![Default::default(), Default::default()]);
    shared.set_scene_ambient(glam::Vec4::splat(0.3));

    let mut ctx = TaskContext::new();
    ctx.set(tokens::LIGHTING_CONTEXT, Arc::new(shared));

    let mut task = DrawTargetTask::new(backend.clone());
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);

    let state = task.entries()[0].pass_state();
    let lighting = state.lighting_shader().lighting_context();
    assert!(lighting.use_lighting());
    assert_eq!(lighting.lights().len(), 2);
    assert_eq!(lighting.scene_ambient(), glam::Vec4::splat(0.3));
    // The private context also picked up this pass's camera.
    assert_eq!(lighting.projection_matrix(), state.projection_matrix());
}

#[test]
fn absent_lighting_context_leaves_private_state_alone() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(make_target(&backend, "a", &["/World"]));

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);

    let lighting = task.entries()[0].pass_state().lighting_shader().lighting_context();
    assert!(!lighting.use_lighting());
    assert!(lighting.lights().is_empty());
}

#[test]
fn alpha_to_coverage_debug_switch_disables_it() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.disable_alpha_to_coverage = true;

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);
    assert!(!task.alpha_to_coverage_enabled());

    backend.take_events();
    task.execute(&mut ctx);
    let events = backend.take_events();
    assert_eq!(events[0], BackendEvent::AlphaToCoverage(false));
}

#[test]
fn depth_bias_override_is_applied_when_not_defaulted() {
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.params.depth_bias_use_default = false;
    scene.params.depth_bias_enable = true;
    scene.params.depth_bias_slope_factor = 2.0;
    scene.params.depth_bias_constant_factor = 4.0;

    let mut task = DrawTargetTask::new(backend.clone());
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    task.sync(&scene, &mut ctx, &mut dirty);

    backend.take_events();
    task.execute(&mut ctx);
    let events = backend.take_events();
    assert_eq!(
        events[0],
        BackendEvent::DepthBias(DepthBias {
            enabled: true,
            slope_factor: 2.0,
            constant_factor: 4.0,
        })
    );
}

#[test]
fn resolve_task_consumes_the_published_pass_list() {
    init_logging();
    let backend = Arc::new(DummyBackend::new());
    let mut scene = TestScene::new();
    scene.add_target(make_target(&backend, "b", &["/Targets/a"]));
    scene.add_target(make_target(&backend, "a", &["/World"]));

    let mut task = DrawTargetTask::new(backend.clone());
    let mut resolve_task = DrawTargetResolveTask::new();
    let mut ctx = TaskContext::new();
    let mut dirty = DirtyBits::all();
    let mut resolve_dirty = DirtyBits::all();

    task.sync(&scene, &mut ctx, &mut dirty);
    resolve_task.sync(&scene, &mut ctx, &mut resolve_dirty);
    task.prepare(&mut ctx);
    resolve_task.prepare(&mut ctx);
    task.execute(&mut ctx);
    backend.take_events();

    resolve_task.execute(&mut ctx);
    let events = backend.take_events();

    // Every scheduled pass is resolved, in execution order: a before b.
    assert_eq!(
        events,
        vec![
            BackendEvent::Resolve("a".to_string()),
            BackendEvent::Resolve("b".to_string()),
        ]
    );
    assert!(resolve_dirty.is_empty());
}
