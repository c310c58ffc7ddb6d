//! Simple lighting state shared with draw target render passes.

use glam::{Mat4, Vec4};

/// A single light in the simple lighting model.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleLight {
    /// Light position; `w == 0` marks a directional light.
    pub position: Vec4,
    /// Ambient contribution.
    pub ambient: Vec4,
    /// Diffuse contribution.
    pub diffuse: Vec4,
    /// Specular contribution.
    pub specular: Vec4,
    /// Whether this light casts shadows.
    pub has_shadow: bool,
}

impl Default for SimpleLight {
    fn default() -> Self {
        Self {
            position: Vec4::new(0.0, 0.0, 0.0, 1.0),
            ambient: Vec4::new(0.0, 0.0, 0.0, 1.0),
            diffuse: Vec4::ONE,
            specular: Vec4::ONE,
            has_shadow: false,
        }
    }
}

/// Surface material parameters for the simple lighting model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleMaterial {
    /// Ambient reflectance.
    pub ambient: Vec4,
    /// Diffuse reflectance.
    pub diffuse: Vec4,
    /// Specular reflectance.
    pub specular: Vec4,
    /// Emissive color.
    pub emission: Vec4,
    /// Specular exponent.
    pub shininess: f32,
}

impl Default for SimpleMaterial {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::new(0.8, 0.8, 0.8, 1.0),
            specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
            emission: Vec4::new(0.0, 0.0, 0.0, 1.0),
            shininess: 32.0,
        }
    }
}

/// Shadow-map parameters carried alongside the light list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    /// Whether shadow maps are sampled at all.
    pub enabled: bool,
    /// Shadow map resolution (square).
    pub map_resolution: u32,
    /// Depth bias applied when sampling.
    pub bias: f32,
    /// Blur radius in texels.
    pub blur: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            map_resolution: 1024,
            bias: 0.005,
            blur: 0.0,
        }
    }
}

/// Ambient lighting state for a frame or a single render pass.
///
/// One shared instance describes the frame's lighting (published by an
/// upstream lighting task); each draw target render pass additionally owns a
/// private instance, seeded from the shared one every sync, that also carries
/// that pass's camera matrices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightingContext {
    use_lighting: bool,
    lights: Vec<SimpleLight>,
    material: SimpleMaterial,
    scene_ambient: Vec4,
    shadows: ShadowSettings,
    use_color_material_diffuse: bool,
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl LightingContext {
    /// Create a lighting context with no lights and lighting disabled.
    pub fn new() -> Self {
        Self {
            scene_ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            ..Self::default()
        }
    }

    /// Enable or disable lighting.
    pub fn set_use_lighting(&mut self, use_lighting: bool) {
        self.use_lighting = use_lighting;
    }

    /// Whether lighting is enabled.
    pub fn use_lighting(&self) -> bool {
        self.use_lighting
    }

    /// Replace the light list.
    pub fn set_lights(&mut self, lights: Vec<SimpleLight>) {
        self.lights = lights;
    }

    /// The current light list.
    pub fn lights(&self) -> &[SimpleLight] {
        &self.lights
    }

    /// Set the material.
    pub fn set_material(&mut self, material: SimpleMaterial) {
        self.material = material;
    }

    /// The current material.
    pub fn material(&self) -> SimpleMaterial {
        self.material
    }

    /// Set the scene-wide ambient term.
    pub fn set_scene_ambient(&mut self, scene_ambient: Vec4) {
        self.scene_ambient = scene_ambient;
    }

    /// The scene-wide ambient term.
    pub fn scene_ambient(&self) -> Vec4 {
        self.scene_ambient
    }

    /// Set the shadow parameters.
    pub fn set_shadows(&mut self, shadows: ShadowSettings) {
        self.shadows = shadows;
    }

    /// The shadow parameters.
    pub fn shadows(&self) -> ShadowSettings {
        self.shadows
    }

    /// Use the vertex diffuse color in place of the material diffuse.
    pub fn set_use_color_material_diffuse(&mut self, enabled: bool) {
        self.use_color_material_diffuse = enabled;
    }

    /// Whether the vertex diffuse color replaces the material diffuse.
    pub fn use_color_material_diffuse(&self) -> bool {
        self.use_color_material_diffuse
    }

    /// Set the camera matrices lights are transformed by.
    pub fn set_camera(&mut self, view_matrix: Mat4, projection_matrix: Mat4) {
        self.view_matrix = view_matrix;
        self.projection_matrix = projection_matrix;
    }

    /// The view matrix lights are transformed by.
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// The projection matrix used for lighting computations.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }
}

/// A lighting shader instance owned by a single render pass.
///
/// Wraps the pass's private [`LightingContext`]; the uniform data uploaded
/// for the pass's lighting comes from here.
#[derive(Debug, Clone, Default)]
pub struct LightingShader {
    context: LightingContext,
}

impl LightingShader {
    /// Create a lighting shader with an empty private context.
    pub fn new() -> Self {
        Self {
            context: LightingContext::new(),
        }
    }

    /// The private lighting context.
    pub fn lighting_context(&self) -> &LightingContext {
        &self.context
    }

    /// Mutable access to the private lighting context.
    pub fn lighting_context_mut(&mut self) -> &mut LightingContext {
        &mut self.context
    }
}
