//! Scene descriptions loaded from TOML and their bucket managers

use std::collections::HashMap;
use std::rc::Rc;

use bucket_engine::prelude::*;
use bucket_engine::render::{shader_ref, TransformShader};
use bucket_engine::render::material::MaterialDescriptor;
use serde::{Deserialize, Serialize};

/// Errors while building a scene
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A mesh names a material the scene does not declare
    #[error("Mesh '{mesh}' uses unknown material '{material}'")]
    UnknownMaterial {
        /// Mesh name
        mesh: String,
        /// Missing material name
        material: String,
    },

    /// Bucket manager rejected an operation
    #[error("Bucket error: {0}")]
    Bucket(#[from] BucketError),
}

/// Mesh placed in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDescriptor {
    /// Mesh name
    pub name: String,
    /// Material name
    pub material: String,
    /// Geometry storage mode
    #[serde(default)]
    pub storage: DisplayArrayStorage,
    /// World position
    #[serde(default)]
    pub position: [f32; 3],
}

/// One scene: its materials and meshes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    /// Scene name
    pub name: String,
    /// Materials declared by the scene
    #[serde(default)]
    pub materials: Vec<MaterialDescriptor>,
    /// Meshes of the scene
    #[serde(default)]
    pub meshes: Vec<MeshDescriptor>,
}

/// File with all scenes to compose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    /// Bucket manager settings shared by every scene
    #[serde(default)]
    pub buckets: BucketManagerConfig,
    /// Scenes, the first one receives the others on merge
    pub scenes: Vec<SceneDescriptor>,
}

impl Config for SceneFile {}

impl Default for SceneFile {
    fn default() -> Self {
        let material = |name: &str, flags| MaterialDescriptor {
            name: name.to_string(),
            flags,
        };
        let mesh = |name: &str, material: &str, storage, position| MeshDescriptor {
            name: name.to_string(),
            material: material.to_string(),
            storage,
            position,
        };

        Self {
            buckets: BucketManagerConfig::default(),
            scenes: vec![
                SceneDescriptor {
                    name: "level".to_string(),
                    materials: vec![
                        material("stone", MaterialFlags::CASTS_SHADOWS),
                        material("glass", MaterialFlags::ALPHA | MaterialFlags::ALPHA_DEPTH),
                    ],
                    meshes: vec![
                        mesh("wall", "stone", DisplayArrayStorage::Static, [0.0, 0.0, 0.0]),
                        mesh("floor", "stone", DisplayArrayStorage::Batching, [0.0, -1.0, 0.0]),
                        mesh("window", "glass", DisplayArrayStorage::Static, [0.0, 1.0, 2.0]),
                    ],
                },
                SceneDescriptor {
                    name: "library".to_string(),
                    materials: vec![
                        material("foliage", MaterialFlags::ALPHA | MaterialFlags::CASTS_SHADOWS | MaterialFlags::ALPHA_SHADOW),
                        material("grass", MaterialFlags::INSTANCING),
                    ],
                    meshes: vec![
                        mesh("tree", "foliage", DisplayArrayStorage::Static, [5.0, 0.0, 5.0]),
                        mesh("lawn", "grass", DisplayArrayStorage::Batching, [0.0, 0.0, 5.0]),
                    ],
                },
            ],
        }
    }
}

/// Scene-graph side objects that display-array buckets observe
#[derive(Default)]
struct SceneGeometry {
    arrays: Vec<Rc<dyn DisplayArray>>,
    meshes: Vec<Rc<dyn MeshUser>>,
    slots: Vec<Rc<MeshMaterial>>,
}

/// Bucket manager of a built scene together with the objects it observes
pub struct Scene {
    /// Scene name
    pub name: String,
    /// Buckets of the scene
    pub buckets: BucketManager,
    materials: Vec<MaterialRef>,
    geometry: SceneGeometry,
}

impl Scene {
    /// Build the buckets of a scene description
    pub fn build(descriptor: &SceneDescriptor, config: &BucketManagerConfig) -> Result<Self, SceneError> {
        let text = MaterialRef::new(BasicMaterial::new("text", MaterialFlags::empty()));
        let mut buckets = BucketManager::with_config(text, config.clone());
        let mut geometry = SceneGeometry::default();

        let materials: HashMap<&str, MaterialRef> = descriptor
            .materials
            .iter()
            .map(|material| {
                let shader = shader_ref(TransformShader::new());
                let material_ref = MaterialRef::new(BasicMaterial::from(material.clone()).with_shader(shader));
                (material.name.as_str(), material_ref)
            })
            .collect();

        for (slot_index, mesh) in (0u32..).zip(&descriptor.meshes) {
            let material = materials.get(mesh.material.as_str()).ok_or_else(|| SceneError::UnknownMaterial {
                mesh: mesh.name.clone(),
                material: mesh.material.clone(),
            })?;
            let (bucket, _) = buckets.find_bucket(material);

            let array: Rc<dyn DisplayArray> = Rc::new(GeometryArray::new(mesh.storage, 24, 36));
            let [x, y, z] = mesh.position;
            let user: Rc<dyn MeshUser> = Rc::new(MeshInstance::new(
                mesh.name.clone(),
                Transform::from_position(Vec3::new(x, y, z)),
            ));
            let slot = Rc::new(MeshMaterial::new(slot_index, mesh.material.clone()));

            let unit = DisplayArrayBucket::new(bucket)
                .with_display_array(&array)
                .with_mesh(&user)
                .with_mesh_material(&slot);
            buckets.add_display_array_bucket(bucket, unit)?;

            geometry.arrays.push(array);
            geometry.meshes.push(user);
            geometry.slots.push(slot);
        }

        log::info!(
            "Built scene '{}' with {} buckets and {} meshes",
            descriptor.name,
            buckets.bucket_count(),
            geometry.meshes.len()
        );

        Ok(Self {
            name: descriptor.name.clone(),
            buckets,
            materials: materials.into_values().collect(),
            geometry,
        })
    }

    /// Absorb another scene: its buckets and the objects they observe
    pub fn merge(&mut self, mut other: Self) {
        let moved = self.buckets.merge_bucket_manager(&mut other.buckets);
        self.materials.append(&mut other.materials);
        self.geometry.arrays.append(&mut other.geometry.arrays);
        self.geometry.meshes.append(&mut other.geometry.meshes);
        self.geometry.slots.append(&mut other.geometry.slots);
        log::info!("Merged scene '{}' into '{}' ({} buckets)", other.name, self.name, moved);
    }

    /// Tear the scene down material by material
    pub fn clear(&mut self) {
        for material in self.materials.drain(..) {
            self.buckets.release_materials(Some(&material));
            self.buckets.remove_material(&material);
        }
        self.geometry = SceneGeometry::default();
    }
}
