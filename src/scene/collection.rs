//! Geometry collections.
//!
//! A collection describes which geometry a render pass draws: everything
//! under its root paths, minus everything under its exclude paths.

use crate::path::ScenePath;

/// A set of scene geometry described by root and exclude paths.
///
/// Membership is prefix-based: a path is in the collection when it is under
/// one of the root paths and not under any exclude path. Exclusion wins over
/// inclusion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryCollection {
    root_paths: Vec<ScenePath>,
    exclude_paths: Vec<ScenePath>,
}

impl GeometryCollection {
    /// Create an empty collection. An empty collection contains nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root path.
    pub fn with_root(mut self, path: ScenePath) -> Self {
        self.root_paths.push(path);
        self
    }

    /// Add an exclude path.
    pub fn with_exclude(mut self, path: ScenePath) -> Self {
        self.exclude_paths.push(path);
        self
    }

    /// Root paths of this collection.
    pub fn root_paths(&self) -> &[ScenePath] {
        &self.root_paths
    }

    /// Exclude paths of this collection.
    pub fn exclude_paths(&self) -> &[ScenePath] {
        &self.exclude_paths
    }

    /// Whether `path` is a member of this collection.
    pub fn contains_path(&self, path: &ScenePath) -> bool {
        for exclude_path in &self.exclude_paths {
            if path.has_prefix(exclude_path) {
                return false;
            }
        }
        for root_path in &self.root_paths {
            if path.has_prefix(root_path) {
                return true;
            }
        }
        false
    }
}
