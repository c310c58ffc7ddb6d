//! Draw targets: off-screen render surfaces scene geometry renders into.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::UVec2;
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::path::ScenePath;
use crate::scene::collection::GeometryCollection;
use crate::types::{AovBinding, DepthPriority};

/// The GPU surface backing a draw target.
///
/// Implemented by the backend; the scheduling layer only needs the explicit
/// resolve operation that merges multisampled contents into the readable
/// single-sample texture.
pub trait DrawTargetSurface: fmt::Debug + Send + Sync {
    /// Debug label identifying the surface.
    fn label(&self) -> &str;

    /// Samples per pixel; greater than one means multisampled.
    fn sample_count(&self) -> u32;

    /// Merge multisampled contents into the readable texture.
    fn resolve(&self);
}

/// Per-target render pass settings authored on the draw target itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawTargetPassState {
    camera_path: ScenePath,
    depth_priority: DepthPriority,
    aov_bindings: Vec<AovBinding>,
}

impl DrawTargetPassState {
    /// Create pass settings rendering through the camera at `camera_path`.
    pub fn new(camera_path: ScenePath) -> Self {
        Self {
            camera_path,
            depth_priority: DepthPriority::default(),
            aov_bindings: Vec::new(),
        }
    }

    /// Set the depth priority.
    pub fn with_depth_priority(mut self, depth_priority: DepthPriority) -> Self {
        self.depth_priority = depth_priority;
        self
    }

    /// Add an output channel binding.
    pub fn with_aov_binding(mut self, binding: AovBinding) -> Self {
        self.aov_bindings.push(binding);
        self
    }

    /// Path of the camera this target renders through.
    pub fn camera_path(&self) -> &ScenePath {
        &self.camera_path
    }

    /// How the depth test is biased for this target.
    pub fn depth_priority(&self) -> DepthPriority {
        self.depth_priority
    }

    /// Output channel bindings.
    pub fn aov_bindings(&self) -> &[AovBinding] {
        &self.aov_bindings
    }
}

/// An off-screen render surface that scene geometry renders into and other
/// geometry can later sample.
///
/// Draw targets live in the scene and are handed to the render tasks as
/// shared references. The version counter advances on every state change;
/// the surface binding is the only piece the tasks re-read mid-lifetime
/// (swapped when the target's attachments are rebuilt).
#[derive(Debug)]
pub struct DrawTarget {
    path: ScenePath,
    enabled: bool,
    version: AtomicU64,
    collection: GeometryCollection,
    resolution: UVec2,
    pass_state: DrawTargetPassState,
    surface: RwLock<Arc<dyn DrawTargetSurface>>,
}

impl DrawTarget {
    /// Default resolution for newly created draw targets.
    pub const DEFAULT_RESOLUTION: UVec2 = UVec2::new(512, 512);

    /// Create an enabled draw target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `path` is not absolute.
    pub fn new(
        path: ScenePath,
        pass_state: DrawTargetPassState,
        surface: Arc<dyn DrawTargetSurface>,
    ) -> Result<Self> {
        if !path.is_absolute() {
            return Err(Error::InvalidParameter(format!(
                "draw target path '{path}' is not absolute"
            )));
        }
        Ok(Self {
            path,
            enabled: true,
            version: AtomicU64::new(1),
            collection: GeometryCollection::new(),
            resolution: Self::DEFAULT_RESOLUTION,
            pass_state,
            surface: RwLock::new(surface),
        })
    }

    /// Set the geometry collection rendered into this target.
    pub fn with_collection(mut self, collection: GeometryCollection) -> Self {
        self.collection = collection;
        self
    }

    /// Set the resolution in pixels.
    pub fn with_resolution(mut self, resolution: UVec2) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the enable flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Path identifying this draw target in the scene.
    pub fn path(&self) -> &ScenePath {
        &self.path
    }

    /// Whether this target is scheduled at all.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current version; advances on every state change.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Relaxed)
    }

    /// Advance the version counter, returning the new value.
    pub fn bump_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The geometry collection rendered into this target.
    pub fn collection(&self) -> &GeometryCollection {
        &self.collection
    }

    /// Resolution in pixels.
    #[inline]
    pub fn resolution(&self) -> UVec2 {
        self.resolution
    }

    /// Render pass settings authored on this target.
    pub fn pass_state(&self) -> &DrawTargetPassState {
        &self.pass_state
    }

    /// The current GPU surface binding.
    pub fn surface(&self) -> Arc<dyn DrawTargetSurface> {
        self.surface.read().clone()
    }

    /// Swap the GPU surface binding and advance the version.
    pub fn set_surface(&self, surface: Arc<dyn DrawTargetSurface>) {
        *self.surface.write() = surface;
        self.bump_version();
    }
}
