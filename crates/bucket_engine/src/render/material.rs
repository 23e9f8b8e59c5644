//! Material identity and classification predicates
//!
//! Buckets never look inside a material. They compare materials by identity
//! and query the [`PolyMaterial`] predicates once, when a bucket is created,
//! to decide which category lists it joins.
//!
//! Materials are owned outside the bucket manager through [`MaterialRef`].
//! Buckets only observe them through [`WeakMaterialRef`].

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::{Rc, Weak};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::shader::ShaderRef;

bitflags! {
    /// Render-pass relevant properties of a material
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MaterialFlags: u32 {
        /// Material is drawn into shadow maps
        const CASTS_SHADOWS = 1 << 0;
        /// Material is alpha blended
        const ALPHA = 1 << 1;
        /// Shadow pass uses the alpha-tested shadow path
        const ALPHA_SHADOW = 1 << 2;
        /// Alpha geometry must be depth sorted per mesh
        const ALPHA_DEPTH = 1 << 3;
        /// Material is only rendered into shadow maps
        const ONLY_SHADOW = 1 << 4;
        /// Draws are submitted through GPU instancing
        const INSTANCING = 1 << 5;
    }
}

/// Material as seen by the bucket manager
///
/// Predicates default to a plain opaque material that casts no shadows.
pub trait PolyMaterial: fmt::Debug {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Material is drawn into shadow maps
    fn casts_shadows(&self) -> bool {
        false
    }

    /// Material is alpha blended
    fn is_alpha(&self) -> bool {
        false
    }

    /// Shadow pass uses the alpha-tested shadow path
    fn is_alpha_shadow(&self) -> bool {
        false
    }

    /// Alpha geometry must be depth sorted per mesh
    fn is_alpha_depth(&self) -> bool {
        false
    }

    /// Material is only rendered into shadow maps
    fn only_shadow(&self) -> bool {
        false
    }

    /// Draws are submitted through GPU instancing
    fn use_instancing(&self) -> bool {
        false
    }

    /// Shader currently bound to this material, if it has one
    fn shader(&self) -> Option<ShaderRef> {
        None
    }

    /// Release GPU resources held by the material
    fn release_material(&self) {}
}

impl MaterialFlags {
    /// Collect the predicates of a material into a flag set
    pub fn of(material: &dyn PolyMaterial) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::CASTS_SHADOWS, material.casts_shadows());
        flags.set(Self::ALPHA, material.is_alpha());
        flags.set(Self::ALPHA_SHADOW, material.is_alpha_shadow());
        flags.set(Self::ALPHA_DEPTH, material.is_alpha_depth());
        flags.set(Self::ONLY_SHADOW, material.only_shadow());
        flags.set(Self::INSTANCING, material.use_instancing());
        flags
    }
}

/// Shared handle to a material, compared by identity
///
/// Two handles are equal only when they point at the same material object,
/// never because two materials happen to hold equal parameters.
#[derive(Clone)]
pub struct MaterialRef(Rc<dyn PolyMaterial>);

impl MaterialRef {
    /// Wrap a material in a new handle
    pub fn new(material: impl PolyMaterial + 'static) -> Self {
        Self(Rc::new(material))
    }

    /// Wrap an already shared material
    pub fn from_rc(material: Rc<dyn PolyMaterial>) -> Self {
        Self(material)
    }

    /// Borrow the shared material
    pub fn as_rc(&self) -> &Rc<dyn PolyMaterial> {
        &self.0
    }

    /// Address identifying the material object
    pub fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast::<()>()
    }

    /// Number of live owning handles to this material
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Create a non-owning handle to the same material
    pub fn downgrade(&self) -> WeakMaterialRef {
        WeakMaterialRef(Rc::downgrade(&self.0))
    }
}

impl Deref for MaterialRef {
    type Target = dyn PolyMaterial;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl PartialEq for MaterialRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.addr(), other.addr())
    }
}

impl Eq for MaterialRef {}

impl Hash for MaterialRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.addr(), state);
    }
}

impl fmt::Debug for MaterialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialRef")
            .field("name", &self.0.name())
            .field("addr", &self.addr())
            .finish()
    }
}

/// Non-owning handle to a material, compared by identity
///
/// While any weak handle exists the allocation of the material is kept, so
/// its address stays unique even after the material itself was dropped.
#[derive(Clone)]
pub struct WeakMaterialRef(Weak<dyn PolyMaterial>);

impl WeakMaterialRef {
    /// Owning handle to the material, if it is still alive
    pub fn upgrade(&self) -> Option<MaterialRef> {
        self.0.upgrade().map(MaterialRef)
    }

    /// Address identifying the material object
    pub fn addr(&self) -> *const () {
        self.0.as_ptr().cast::<()>()
    }

    /// Whether this handle observes `material`
    pub fn is(&self, material: &MaterialRef) -> bool {
        std::ptr::eq(self.addr(), material.addr())
    }

    /// Whether the material is still alive
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl PartialEq for WeakMaterialRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.addr(), other.addr())
    }
}

impl Eq for WeakMaterialRef {}

impl Hash for WeakMaterialRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.addr(), state);
    }
}

impl fmt::Debug for WeakMaterialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("WeakMaterialRef");
        match self.upgrade() {
            Some(material) => debug.field("name", &material.name()),
            None => debug.field("name", &"<dropped>"),
        };
        debug.field("addr", &self.addr()).finish()
    }
}

/// Serializable description of a material, used by scene files
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    /// Material name
    pub name: String,
    /// Material properties
    #[serde(default)]
    pub flags: MaterialFlags,
}

/// Flag-driven material with an optional shader
pub struct BasicMaterial {
    name: String,
    flags: MaterialFlags,
    shader: Option<ShaderRef>,
    release_count: Cell<usize>,
}

impl BasicMaterial {
    /// Create a material with the given properties
    pub fn new(name: impl Into<String>, flags: MaterialFlags) -> Self {
        Self {
            name: name.into(),
            flags,
            shader: None,
            release_count: Cell::new(0),
        }
    }

    /// Attach a shader to the material
    #[must_use]
    pub fn with_shader(mut self, shader: ShaderRef) -> Self {
        self.shader = Some(shader);
        self
    }

    /// Material properties
    pub const fn flags(&self) -> MaterialFlags {
        self.flags
    }

    /// How many times the material resources were released
    pub fn release_count(&self) -> usize {
        self.release_count.get()
    }
}

impl From<MaterialDescriptor> for BasicMaterial {
    fn from(descriptor: MaterialDescriptor) -> Self {
        Self::new(descriptor.name, descriptor.flags)
    }
}

impl fmt::Debug for BasicMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicMaterial")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("has_shader", &self.shader.is_some())
            .finish()
    }
}

impl PolyMaterial for BasicMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn casts_shadows(&self) -> bool {
        self.flags.contains(MaterialFlags::CASTS_SHADOWS)
    }

    fn is_alpha(&self) -> bool {
        self.flags.contains(MaterialFlags::ALPHA)
    }

    fn is_alpha_shadow(&self) -> bool {
        self.flags.contains(MaterialFlags::ALPHA_SHADOW)
    }

    fn is_alpha_depth(&self) -> bool {
        self.flags.contains(MaterialFlags::ALPHA_DEPTH)
    }

    fn only_shadow(&self) -> bool {
        self.flags.contains(MaterialFlags::ONLY_SHADOW)
    }

    fn use_instancing(&self) -> bool {
        self.flags.contains(MaterialFlags::INSTANCING)
    }

    fn shader(&self) -> Option<ShaderRef> {
        self.shader.clone()
    }

    fn release_material(&self) {
        self.release_count.set(self.release_count.get() + 1);
        log::trace!("Released material '{}'", self.name);
    }
}
