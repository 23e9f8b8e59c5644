//! Material shader capability
//!
//! A shader is bound to one material. Draw submission drives it as
//! `activate -> update* -> deactivate` once per material bucket and frame.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::display_array::MeshUser;
use super::rasterizer::Rasterizer;

/// Shader program bound to a material
pub trait MaterialShader: fmt::Debug {
    /// Return true when the shader can be bound
    fn is_valid(&self) -> bool;

    /// Bind the shader and update global uniforms
    ///
    /// Callers check [`is_valid`](Self::is_valid) first. An invalid shader
    /// does nothing here.
    fn activate(&mut self, rasterizer: &mut dyn Rasterizer);

    /// Unbind the shader. Idempotent.
    fn deactivate(&mut self);

    /// Push per-instance state such as the model matrix
    ///
    /// Called between [`activate`](Self::activate) and the draw, once per
    /// mesh instance.
    fn update(&mut self, rasterizer: &mut dyn Rasterizer, mesh_user: &dyn MeshUser);
}

/// Shared, mutable handle to a shader
pub type ShaderRef = Rc<RefCell<dyn MaterialShader>>;

/// Wrap a shader into a [`ShaderRef`]
pub fn shader_ref(shader: impl MaterialShader + 'static) -> ShaderRef {
    Rc::new(RefCell::new(shader))
}

/// Shader that forwards the mesh model matrix to the rasterizer
///
/// Covers the common case where per-instance state is only the transform.
#[derive(Debug)]
pub struct TransformShader {
    valid: bool,
    bound: bool,
    updates: usize,
}

impl TransformShader {
    /// Create a shader that can be bound
    pub const fn new() -> Self {
        Self {
            valid: true,
            bound: false,
            updates: 0,
        }
    }

    /// Create a shader whose program failed to link
    pub const fn invalid() -> Self {
        Self {
            valid: false,
            bound: false,
            updates: 0,
        }
    }

    /// Whether the shader is currently bound
    pub const fn is_bound(&self) -> bool {
        self.bound
    }

    /// Number of per-instance updates since creation
    pub const fn update_count(&self) -> usize {
        self.updates
    }
}

impl MaterialShader for TransformShader {
    fn is_valid(&self) -> bool {
        self.valid
    }

    fn activate(&mut self, _rasterizer: &mut dyn Rasterizer) {
        if self.valid {
            self.bound = true;
        }
    }

    fn deactivate(&mut self) {
        self.bound = false;
    }

    fn update(&mut self, rasterizer: &mut dyn Rasterizer, mesh_user: &dyn MeshUser) {
        debug_assert!(self.bound, "shader updated while not bound");
        rasterizer.set_model_matrix(&mesh_user.model_matrix());
        self.updates += 1;
    }
}
