//! Common types shared across the render task system.

use glam::{UVec2, Vec4};

// ============================================================================
// Depth and raster state
// ============================================================================

/// Comparison function for depth testing.
///
/// Variant order matches the depth-priority remap table in the draw target
/// task; do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareFunction {
    /// Never passes.
    Never,
    /// Passes if the incoming value is less than the stored value.
    Less,
    /// Passes if the incoming value equals the stored value.
    Equal,
    /// Passes if the incoming value is less than or equal to the stored value.
    #[default]
    LessEqual,
    /// Passes if the incoming value is greater than the stored value.
    Greater,
    /// Passes if the incoming value differs from the stored value.
    NotEqual,
    /// Passes if the incoming value is greater than or equal to the stored value.
    GreaterEqual,
    /// Always passes.
    Always,
}

/// Face culling style for rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullStyle {
    /// Cull nothing.
    Nothing,
    /// Cull back faces.
    Back,
    /// Cull front faces.
    Front,
    /// Cull back faces of single-sided geometry only.
    #[default]
    BackUnlessDoubleSided,
    /// Cull front faces of single-sided geometry only.
    FrontUnlessDoubleSided,
}

/// How a draw target's depth test is biased against normal scene depth
/// ordering.
///
/// `Nearest` keeps the requested comparison; `Farthest` mirrors it so that
/// the farthest fragment wins (used e.g. for shadow-map style targets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthPriority {
    /// Nearest fragment wins; comparison functions pass through unchanged.
    #[default]
    Nearest,
    /// Farthest fragment wins; ordering comparisons are mirrored.
    Farthest,
}

/// Triangle winding that identifies a front face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrontFaceWinding {
    /// Counter-clockwise front faces (the context default).
    #[default]
    CounterClockwise,
    /// Clockwise front faces.
    Clockwise,
}

// ============================================================================
// Render outputs
// ============================================================================

/// Tag classifying renderable geometry (e.g. `"geometry"`, `"guide"`).
///
/// A render pass draws only the geometry whose tag appears in its tag list.
pub type RenderTag = String;

/// A named render output channel written by a render pass.
///
/// Draw targets can route a pass's outputs (color, depth, arbitrary data)
/// into named channels; the binding carries the channel name and an optional
/// clear value applied when the pass begins.
#[derive(Debug, Clone, PartialEq)]
pub struct AovBinding {
    /// Output channel name (e.g. `"color"`, `"depth"`).
    pub name: String,
    /// Value the channel is cleared to at pass start, if any.
    pub clear_value: Option<Vec4>,
}

impl AovBinding {
    /// Create a binding for a named output channel.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            clear_value: None,
        }
    }

    /// Set the clear value.
    pub fn with_clear_value(mut self, clear_value: Vec4) -> Self {
        self.clear_value = Some(clear_value);
        self
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// Viewport configuration for rendering.
///
/// Defines the rectangular region of the target that will be rendered to,
/// along with the depth range mapping (`[0, 1]` by convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// X coordinate of the viewport's origin.
    pub x: f32,
    /// Y coordinate of the viewport's origin.
    pub y: f32,
    /// Width of the viewport.
    pub width: f32,
    /// Height of the viewport.
    pub height: f32,
    /// Minimum depth value.
    pub min_depth: f32,
    /// Maximum depth value.
    pub max_depth: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

impl Viewport {
    /// Create a new viewport with the standard `[0, 1]` depth range.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// Create a full-target viewport from a resolution, origin at (0, 0).
    pub fn from_resolution(resolution: UVec2) -> Self {
        Self::new(0.0, 0.0, resolution.x as f32, resolution.y as f32)
    }
}
