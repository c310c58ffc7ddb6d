//! Common utilities for draw target task integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use glam::{Mat4, Vec4};

use mirage_render::{
    BackendEvent, Camera, DrawTarget, DrawTargetPassState, DrawTargetTaskParams, DummyBackend,
    GeometryCollection, RenderPassEntry, RenderTag, SceneDelegate, ScenePath,
};

/// Initialize test logging (idempotent).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Path of the camera every test target renders through by default.
pub const MAIN_CAMERA: &str = "/Cameras/Main";

/// A scripted scene the tests mutate between frames.
pub struct TestScene {
    pub params: DrawTargetTaskParams,
    pub params_available: bool,
    pub render_tags: Vec<RenderTag>,
    pub set_version: u64,
    pub targets: Vec<Arc<DrawTarget>>,
    pub cameras: HashMap<ScenePath, Arc<Camera>>,
    pub disable_alpha_to_coverage: bool,
}

impl TestScene {
    /// A scene with a single square-aspect camera at [`MAIN_CAMERA`] and no
    /// draw targets yet.
    pub fn new() -> Self {
        let camera_path = ScenePath::new(MAIN_CAMERA);
        let camera = Camera::new(camera_path.clone())
            .with_view_matrix(Mat4::IDENTITY)
            .with_projection_matrix(Mat4::perspective_rh(
                std::f32::consts::FRAC_PI_4,
                1.0,
                0.1,
                100.0,
            ))
            .with_clip_plane(Vec4::new(0.0, 1.0, 0.0, 0.0));

        let mut cameras = HashMap::new();
        cameras.insert(camera_path, Arc::new(camera));

        Self {
            params: DrawTargetTaskParams::default(),
            params_available: true,
            render_tags: vec!["geometry".to_string()],
            set_version: 1,
            targets: Vec::new(),
            cameras,
            disable_alpha_to_coverage: false,
        }
    }

    /// Add a draw target, bumping the set version.
    pub fn add_target(&mut self, target: Arc<DrawTarget>) {
        self.targets.push(target);
        self.set_version += 1;
    }

    /// Remove a draw target by path, bumping the set version.
    pub fn remove_target(&mut self, path: &ScenePath) {
        self.targets.retain(|target| target.path() != path);
        self.set_version += 1;
    }
}

impl SceneDelegate for TestScene {
    fn task_params(&self) -> Option<DrawTargetTaskParams> {
        self.params_available.then(|| self.params.clone())
    }

    fn render_tags(&self) -> Vec<RenderTag> {
        self.render_tags.clone()
    }

    fn draw_target_set_version(&self) -> u64 {
        self.set_version
    }

    fn draw_targets(&self) -> Vec<Arc<DrawTarget>> {
        self.targets.clone()
    }

    fn camera(&self, path: &ScenePath) -> Option<Arc<Camera>> {
        self.cameras.get(path).cloned()
    }

    fn alpha_to_coverage_disabled(&self) -> bool {
        self.disable_alpha_to_coverage
    }
}

/// Create a 4-sample target at `/Targets/<name>` collecting `roots`,
/// rendering through the default camera. The surface label is `name`.
pub fn make_target(backend: &DummyBackend, name: &str, roots: &[&str]) -> Arc<DrawTarget> {
    let mut collection = GeometryCollection::new();
    for root in roots {
        collection = collection.with_root(ScenePath::new(*root));
    }
    Arc::new(
        DrawTarget::new(
            ScenePath::new(format!("/Targets/{name}")),
            DrawTargetPassState::new(ScenePath::new(MAIN_CAMERA)),
            backend.create_surface(name, 4),
        )
        .unwrap()
        .with_collection(collection),
    )
}

/// Index of the entry rendering `/Targets/<name>`.
pub fn entry_position(entries: &[RenderPassEntry], name: &str) -> usize {
    let path = ScenePath::new(format!("/Targets/{name}"));
    entries
        .iter()
        .position(|entry| entry.target().path() == &path)
        .unwrap_or_else(|| panic!("no entry for {path}"))
}

/// Index of the first event equal to `event`.
pub fn event_position(events: &[BackendEvent], event: &BackendEvent) -> usize {
    events
        .iter()
        .position(|e| e == event)
        .unwrap_or_else(|| panic!("event {event:?} not found in {events:?}"))
}

/// Whether `events` contains `event`.
pub fn has_event(events: &[BackendEvent], event: &BackendEvent) -> bool {
    events.iter().any(|e| e == event)
}
