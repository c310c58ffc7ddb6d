//! Scene-side data the render tasks consume.
//!
//! Everything in this module is owned by the scene and reached through the
//! [`SceneDelegate`] contract: draw targets, cameras, lighting state, and the
//! change-tracking flags that tell a task which inputs went stale.

mod camera;
mod collection;
mod delegate;
mod draw_target;
mod lighting;

pub use camera::{conform_projection, Camera, WindowPolicy};
pub use collection::GeometryCollection;
pub use delegate::{DirtyBits, DrawTargetTaskParams, SceneDelegate};
pub use draw_target::{DrawTarget, DrawTargetPassState, DrawTargetSurface};
pub use lighting::{
    LightingContext, LightingShader, ShadowSettings, SimpleLight, SimpleMaterial,
};
