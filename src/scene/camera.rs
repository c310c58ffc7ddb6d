//! Scene cameras and projection-window conforming.

use glam::{Mat4, Vec3, Vec4};

use crate::path::ScenePath;

/// Policy for fitting a camera's projection window to a target aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowPolicy {
    /// Keep the vertical aperture; widen or narrow horizontally.
    #[default]
    MatchVertically,
    /// Keep the horizontal aperture; widen or narrow vertically.
    MatchHorizontally,
    /// Fit the whole camera window inside the target (may add slack).
    Fit,
    /// Fill the target with the camera window (may crop).
    Crop,
    /// Leave the projection untouched.
    DontConform,
}

/// A camera supplying view and projection matrices for a render pass.
///
/// Cameras are owned by the scene and resolved by path through the scene
/// delegate; the render tasks never mutate them.
#[derive(Debug, Clone)]
pub struct Camera {
    path: ScenePath,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    window_policy: WindowPolicy,
    clip_planes: Vec<Vec4>,
}

impl Camera {
    /// Create a camera with identity matrices and the default window policy.
    pub fn new(path: ScenePath) -> Self {
        Self {
            path,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            window_policy: WindowPolicy::default(),
            clip_planes: Vec::new(),
        }
    }

    /// Set the view matrix.
    pub fn with_view_matrix(mut self, view_matrix: Mat4) -> Self {
        self.view_matrix = view_matrix;
        self
    }

    /// Set the projection matrix.
    pub fn with_projection_matrix(mut self, projection_matrix: Mat4) -> Self {
        self.projection_matrix = projection_matrix;
        self
    }

    /// Set the window policy.
    pub fn with_window_policy(mut self, window_policy: WindowPolicy) -> Self {
        self.window_policy = window_policy;
        self
    }

    /// Add a user clip plane in view space.
    pub fn with_clip_plane(mut self, plane: Vec4) -> Self {
        self.clip_planes.push(plane);
        self
    }

    /// Path identifying this camera in the scene.
    pub fn path(&self) -> &ScenePath {
        &self.path
    }

    /// The view matrix (world to camera).
    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// The projection matrix (camera to clip).
    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// Policy used when conforming the projection to a target aspect ratio.
    #[inline]
    pub fn window_policy(&self) -> WindowPolicy {
        self.window_policy
    }

    /// User clip planes in view space.
    pub fn clip_planes(&self) -> &[Vec4] {
        &self.clip_planes
    }
}

/// Conform a projection matrix to a target aspect ratio.
///
/// The camera's implied aspect ratio is read off the projection diagonal;
/// the window is then stretched along one axis per `policy` so the result
/// presents `target_aspect` (width / height). Degenerate projections and
/// non-positive aspects are returned unchanged.
pub fn conform_projection(projection: Mat4, policy: WindowPolicy, target_aspect: f32) -> Mat4 {
    if policy == WindowPolicy::DontConform || target_aspect <= 0.0 {
        return projection;
    }

    let m00 = projection.x_axis.x;
    let m11 = projection.y_axis.y;
    if m00 == 0.0 || m11 == 0.0 {
        return projection;
    }
    let current_aspect = (m11 / m00).abs();

    // Fit and Crop pick a match direction from the two aspects.
    let policy = match policy {
        WindowPolicy::Fit => {
            if target_aspect > current_aspect {
                WindowPolicy::MatchVertically
            } else {
                WindowPolicy::MatchHorizontally
            }
        }
        WindowPolicy::Crop => {
            if target_aspect > current_aspect {
                WindowPolicy::MatchHorizontally
            } else {
                WindowPolicy::MatchVertically
            }
        }
        other => other,
    };

    match policy {
        WindowPolicy::MatchVertically => {
            projection * Mat4::from_scale(Vec3::new(current_aspect / target_aspect, 1.0, 1.0))
        }
        WindowPolicy::MatchHorizontally => {
            projection * Mat4::from_scale(Vec3::new(1.0, target_aspect / current_aspect, 1.0))
        }
        _ => projection,
    }
}
