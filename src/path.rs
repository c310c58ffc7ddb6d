//! Hierarchical scene paths.
//!
//! Every object the render tasks deal with (draw targets, cameras, geometry
//! roots) is identified by an absolute, `/`-separated path into the scene.
//! Paths are cheap to clone and compare, and support the segment-aware prefix
//! test that drives geometry collection membership.

use std::fmt;

/// An absolute, `/`-separated path identifying an object in the scene.
///
/// `ScenePath` is an ordinary string newtype; `/` is the root path and
/// `"/World/Mirror"` names an object two levels down. Prefix tests are
/// segment-aware: `"/World/Mirror"` has prefix `"/World"` but not `"/Wo"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScenePath(String);

impl ScenePath {
    /// Create a path from a string.
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self(path.into())
    }

    /// The root path, `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// The path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this path starts at the scene root.
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// The final path segment, or the whole path if it has no separators.
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Segment-aware prefix test.
    ///
    /// Returns true if `prefix` names this path or one of its ancestors.
    /// Unlike a raw string prefix test, `"/World/MirrorB"` does not have
    /// prefix `"/World/Mirror"`.
    pub fn has_prefix(&self, prefix: &ScenePath) -> bool {
        if prefix.0 == "/" {
            return self.is_absolute();
        }
        if self.0 == prefix.0 {
            return true;
        }
        self.0.len() > prefix.0.len()
            && self.0.starts_with(&prefix.0)
            && self.0.as_bytes()[prefix.0.len()] == b'/'
    }
}

impl fmt::Display for ScenePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ScenePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
