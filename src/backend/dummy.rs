//! Dummy backend for testing and development.
//!
//! This backend doesn't perform actual GPU operations but provides a valid
//! implementation for exercising the scheduling layer without GPU hardware.
//! Every operation is appended to a shared event log, so tests can assert on
//! the exact order of draws, resolves, and raster-state changes.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::scene::{DrawTargetSurface, GeometryCollection};
use crate::task::RenderPassState;
use crate::types::{FrontFaceWinding, RenderTag};

use super::traits::{DepthBias, RenderBackend};

/// An operation issued through the dummy backend, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// Depth bias state changed.
    DepthBias(DepthBias),
    /// Alpha-to-coverage toggled.
    AlphaToCoverage(bool),
    /// Program point size toggled.
    ProgramPointSize(bool),
    /// Front-face winding changed.
    FrontFace(FrontFaceWinding),
    /// Per-pass state uploaded.
    PreparePass,
    /// Pass state bound.
    BindPass,
    /// Draw issued into the named surface.
    Draw(String),
    /// Pass state unbound.
    UnbindPass,
    /// The named surface was resolved.
    Resolve(String),
}

/// Shared, clonable event recorder.
#[derive(Debug, Clone, Default)]
struct EventLog(Arc<Mutex<Vec<BackendEvent>>>);

impl EventLog {
    fn record(&self, event: BackendEvent) {
        self.0.lock().push(event);
    }

    fn take(&self) -> Vec<BackendEvent> {
        std::mem::take(&mut *self.0.lock())
    }

    fn snapshot(&self) -> Vec<BackendEvent> {
        self.0.lock().clone()
    }
}

/// Dummy render backend.
#[derive(Debug, Default)]
pub struct DummyBackend {
    log: EventLog,
}

impl DummyBackend {
    /// Create a new dummy backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface whose operations record into this backend's log.
    pub fn create_surface(&self, label: &str, sample_count: u32) -> Arc<DummySurface> {
        log::trace!(
            "DummyBackend: creating surface '{}' ({} samples)",
            label,
            sample_count
        );
        Arc::new(DummySurface {
            label: label.to_string(),
            sample_count,
            log: self.log.clone(),
        })
    }

    /// All events recorded so far, oldest first.
    pub fn events(&self) -> Vec<BackendEvent> {
        self.log.snapshot()
    }

    /// Drain the event log, returning the recorded events.
    pub fn take_events(&self) -> Vec<BackendEvent> {
        self.log.take()
    }
}

impl RenderBackend for DummyBackend {
    fn name(&self) -> &'static str {
        "Dummy"
    }

    fn set_depth_bias(&self, bias: DepthBias) {
        log::trace!("DummyBackend: depth bias {:?}", bias);
        self.log.record(BackendEvent::DepthBias(bias));
    }

    fn set_alpha_to_coverage(&self, enabled: bool) {
        log::trace!("DummyBackend: alpha to coverage {}", enabled);
        self.log.record(BackendEvent::AlphaToCoverage(enabled));
    }

    fn set_program_point_size(&self, enabled: bool) {
        log::trace!("DummyBackend: program point size {}", enabled);
        self.log.record(BackendEvent::ProgramPointSize(enabled));
    }

    fn set_front_face(&self, winding: FrontFaceWinding) {
        log::trace!("DummyBackend: front face {:?}", winding);
        self.log.record(BackendEvent::FrontFace(winding));
    }

    fn prepare_pass(&self, _state: &RenderPassState) -> Result<()> {
        self.log.record(BackendEvent::PreparePass);
        Ok(())
    }

    fn bind_pass(&self, _state: &RenderPassState) {
        self.log.record(BackendEvent::BindPass);
    }

    fn draw(
        &self,
        _state: &RenderPassState,
        collection: &GeometryCollection,
        render_tags: &[RenderTag],
        surface: &Arc<dyn DrawTargetSurface>,
    ) -> Result<()> {
        log::trace!(
            "DummyBackend: drawing {} roots ({} tags) into '{}'",
            collection.root_paths().len(),
            render_tags.len(),
            surface.label()
        );
        self.log
            .record(BackendEvent::Draw(surface.label().to_string()));
        Ok(())
    }

    fn unbind_pass(&self, _state: &RenderPassState) {
        self.log.record(BackendEvent::UnbindPass);
    }
}

/// Surface created by [`DummyBackend::create_surface`].
#[derive(Debug)]
pub struct DummySurface {
    label: String,
    sample_count: u32,
    log: EventLog,
}

impl DrawTargetSurface for DummySurface {
    fn label(&self) -> &str {
        &self.label
    }

    fn sample_count(&self) -> u32 {
        self.sample_count
    }

    fn resolve(&self) {
        log::trace!("DummyBackend: resolving surface '{}'", self.label);
        self.log.record(BackendEvent::Resolve(self.label.clone()));
    }
}
