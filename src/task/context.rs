//! Shared per-frame task context.
//!
//! Tasks running in the same frame communicate through a small map of
//! shared values keyed by well-known tokens: an upstream lighting task
//! publishes the frame's lighting context, the draw target task publishes
//! its ordered pass list for the downstream resolve task, and so on.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Well-known context tokens.
pub mod tokens {
    /// Ordered draw target pass list published by the draw target task
    /// (`Arc<Vec<ResolveHandle>>`).
    pub const DRAW_TARGET_RENDER_PASSES: &str = "drawTargetRenderPasses";

    /// Shared lighting context published by an upstream lighting task
    /// (`Arc<LightingContext>`).
    pub const LIGHTING_CONTEXT: &str = "lightingContext";
}

/// Per-frame map of values shared between tasks.
///
/// Values are stored as `Arc<dyn Any>` and retrieved by token plus concrete
/// type; a type mismatch reads as absence.
#[derive(Default)]
pub struct TaskContext {
    entries: HashMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

impl TaskContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `token`, replacing any previous entry.
    pub fn set<T: Any + Send + Sync>(&mut self, token: &'static str, value: Arc<T>) {
        self.entries.insert(token, value);
    }

    /// Fetch the entry under `token`, if present with the requested type.
    pub fn get<T: Any + Send + Sync>(&self, token: &str) -> Option<Arc<T>> {
        self.entries
            .get(token)
            .and_then(|value| value.clone().downcast::<T>().ok())
    }

    /// Remove the entry under `token`.
    pub fn remove(&mut self, token: &str) {
        self.entries.remove(token);
    }

    /// Whether an entry exists under `token`.
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }
}

impl fmt::Debug for TaskContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
