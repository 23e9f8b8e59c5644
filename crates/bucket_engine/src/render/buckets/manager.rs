//! Bucket manager: material lookup, category index and ownership

use std::collections::{HashMap, HashSet};

use crate::foundation::collections::{BucketArena, DisplayArrayBucketId, MaterialBucketId};
use crate::render::config::{BucketManagerConfig, LookupStrategy};
use crate::render::material::MaterialRef;

use super::{BucketCategory, BucketError, BucketResult, DisplayArrayBucket, MaterialBucket};

const ALL: usize = BucketCategory::All.index();

/// Upper bound on the storage reserved up front from configuration
const MAX_INITIAL_CAPACITY: usize = 1 << 16;

/// Reserved bucket used for on-screen text, outside every category list
struct TextBucket {
    material: MaterialRef,
    bucket: MaterialBucketId,
    array_bucket: DisplayArrayBucket,
}

/// Registry of all material buckets of a scene
///
/// Buckets live in an arena. Category lists store ids in insertion order;
/// a bucket may be listed in several categories but is listed in
/// [`BucketCategory::All`] exactly once while alive, and only removal from
/// that list destroys it.
///
/// Materials are owned by the caller and must outlive their buckets. The
/// only material the manager owns is the one of the text bucket.
pub struct BucketManager {
    config: BucketManagerConfig,
    buckets: BucketArena<MaterialBucket>,
    lists: [Vec<MaterialBucketId>; BucketCategory::COUNT],
    /// First bucket in "all" order for each material address. A bucket's
    /// weak handle pins the allocation, so addresses are not reused while
    /// an entry exists.
    index: HashMap<*const (), MaterialBucketId>,
    text: TextBucket,
}

impl BucketManager {
    /// Create a manager with default configuration
    ///
    /// The text material is used for the reserved text bucket and owned by
    /// the manager from now on.
    pub fn new(text_material: MaterialRef) -> Self {
        Self::with_config(text_material, BucketManagerConfig::default())
    }

    /// Create a manager with the given configuration
    pub fn with_config(text_material: MaterialRef, config: BucketManagerConfig) -> Self {
        let capacity = config.initial_capacity.min(MAX_INITIAL_CAPACITY);
        if capacity < config.initial_capacity {
            log::warn!(
                "Initial capacity {} clamped to {}",
                config.initial_capacity,
                MAX_INITIAL_CAPACITY
            );
        }
        let mut buckets = BucketArena::with_capacity_and_key(capacity.saturating_add(1));
        let text_bucket = buckets.insert(MaterialBucket::new(&text_material));

        let mut lists: [Vec<MaterialBucketId>; BucketCategory::COUNT] = std::array::from_fn(|_| Vec::new());
        lists[ALL].reserve(capacity);

        log::debug!(
            "Created bucket manager (lookup: {:?}, instancing: {})",
            config.lookup,
            config.instancing_enabled
        );

        Self {
            config,
            buckets,
            lists,
            index: HashMap::with_capacity(capacity),
            text: TextBucket {
                material: text_material,
                bucket: text_bucket,
                array_bucket: DisplayArrayBucket::new(text_bucket),
            },
        }
    }

    /// Active configuration
    pub const fn config(&self) -> &BucketManagerConfig {
        &self.config
    }

    /// Find the bucket of a material, creating it on first use
    ///
    /// Returns the bucket id and whether it was created by this call. A new
    /// bucket is classified into its category lists once, from the material
    /// predicates at this moment.
    pub fn find_bucket(&mut self, material: &MaterialRef) -> (MaterialBucketId, bool) {
        if let Some(id) = self.lookup(material) {
            return (id, false);
        }

        let categories = BucketCategory::classify(&**material, self.config.instancing_enabled);
        let id = self.buckets.insert(MaterialBucket::new(material));
        for category in &categories {
            self.lists[category.index()].push(id);
        }
        self.index.entry(material.addr()).or_insert(id);

        log::debug!(
            "Created bucket for material '{}' in [{}]",
            material.name(),
            categories.iter().map(|category| category.name()).collect::<Vec<_>>().join(", ")
        );

        (id, true)
    }

    fn lookup(&self, material: &MaterialRef) -> Option<MaterialBucketId> {
        match self.config.lookup {
            LookupStrategy::Linear => self.lists[ALL]
                .iter()
                .copied()
                .find(|&id| self.buckets.get(id).is_some_and(|bucket| bucket.is_material(material))),
            LookupStrategy::Hashed => self.index.get(&material.addr()).copied(),
        }
    }

    /// Remove every bucket of a material from every list and destroy it
    ///
    /// Absent materials are a no-op. Returns the number of destroyed buckets,
    /// which exceeds one only after a merge brought in a second bucket for
    /// the same material.
    pub fn remove_material(&mut self, material: &MaterialRef) -> usize {
        let buckets = &self.buckets;
        let matches = |id: &MaterialBucketId| buckets.get(*id).is_some_and(|bucket| bucket.is_material(material));

        for category in BucketCategory::ALL_CATEGORIES {
            if category != BucketCategory::All {
                self.lists[category.index()].retain(|id| !matches(id));
            }
        }

        let mut removed = Vec::new();
        self.lists[ALL].retain(|id| {
            let hit = matches(id);
            if hit {
                removed.push(*id);
            }
            !hit
        });

        for id in &removed {
            self.buckets.remove(*id);
        }
        self.index.remove(&material.addr());

        if !removed.is_empty() {
            log::debug!("Removed {} bucket(s) for material '{}'", removed.len(), material.name());
        }
        debug_assert!(self.is_consistent());

        removed.len()
    }

    /// Move every bucket of `other` into this manager
    ///
    /// Each category list of `other` is appended, in order, to the matching
    /// list here and then cleared. Ownership moves with the buckets and their
    /// display-array buckets are re-pointed at the new ids. Buckets are not
    /// deduplicated: a material with a bucket on both sides ends up with two.
    /// The text bucket of `other` stays where it is.
    pub fn merge_bucket_manager(&mut self, other: &mut Self) -> usize {
        let mut remap = HashMap::with_capacity(other.lists[ALL].len());

        for &old_id in &other.lists[ALL] {
            let Some(mut bucket) = other.buckets.remove(old_id) else {
                continue;
            };
            let key = bucket.material_handle().addr();
            let new_id = self.buckets.insert_with_key(|new_id| {
                bucket.rebind(new_id);
                bucket
            });
            self.index.entry(key).or_insert(new_id);
            remap.insert(old_id, new_id);
        }

        for category in BucketCategory::ALL_CATEGORIES {
            let moved = std::mem::take(&mut other.lists[category.index()]);
            self.lists[category.index()].extend(moved.into_iter().filter_map(|id| remap.get(&id).copied()));
        }
        other.index.clear();

        log::debug!("Merged {} bucket(s) from another manager", remap.len());
        debug_assert!(self.is_consistent());
        debug_assert!(other.is_consistent());

        remap.len()
    }

    /// Refresh the cached shader of every bucket, or only of the buckets of
    /// `material`
    pub fn update_shaders(&mut self, material: Option<&MaterialRef>) {
        for &id in &self.lists[ALL] {
            if let Some(bucket) = self.buckets.get_mut(id) {
                if material.map_or(true, |material| bucket.is_material(material)) {
                    bucket.update_shader();
                }
            }
        }
    }

    /// Release GPU resources of every material, or only of `material`
    ///
    /// Buckets stay in place; see [`remove_material`](Self::remove_material)
    /// to drop them.
    pub fn release_materials(&self, material: Option<&MaterialRef>) {
        for bucket in self.lists[ALL].iter().filter_map(|&id| self.buckets.get(id)) {
            if material.map_or(true, |material| bucket.is_material(material)) {
                if let Some(material) = bucket.material() {
                    material.release_material();
                }
            }
        }
    }

    /// Attach a draw unit to a material bucket
    pub fn add_display_array_bucket(
        &mut self,
        bucket: MaterialBucketId,
        array_bucket: DisplayArrayBucket,
    ) -> BucketResult<DisplayArrayBucketId> {
        debug_assert_eq!(array_bucket.bucket(), bucket, "display array bucket points at another bucket");
        let target = self.buckets.get_mut(bucket).ok_or(BucketError::UnknownBucket(bucket))?;
        Ok(target.add_display_array_bucket(array_bucket))
    }

    /// Detach a draw unit from a material bucket and hand it back
    pub fn remove_display_array_bucket(
        &mut self,
        bucket: MaterialBucketId,
        array: DisplayArrayBucketId,
    ) -> BucketResult<DisplayArrayBucket> {
        let source = self.buckets.get_mut(bucket).ok_or(BucketError::UnknownBucket(bucket))?;
        source
            .remove_display_array_bucket(array)
            .ok_or(BucketError::UnknownDisplayArrayBucket { bucket, array })
    }

    /// Move a draw unit to another material bucket, e.g. after the mesh
    /// material changed at runtime
    ///
    /// Detaches from `from`, re-points the unit and attaches it to `to`. On
    /// error nothing is moved.
    pub fn move_display_array_bucket(
        &mut self,
        from: MaterialBucketId,
        array: DisplayArrayBucketId,
        to: MaterialBucketId,
    ) -> BucketResult<DisplayArrayBucketId> {
        if !self.buckets.contains_key(to) {
            return Err(BucketError::UnknownBucket(to));
        }

        let mut unit = self.remove_display_array_bucket(from, array)?;
        unit.change_material_bucket(to);
        let target = self.buckets.get_mut(to).ok_or(BucketError::UnknownBucket(to))?;
        Ok(target.add_display_array_bucket(unit))
    }

    /// Look up a bucket
    pub fn bucket(&self, id: MaterialBucketId) -> Option<&MaterialBucket> {
        self.buckets.get(id)
    }

    /// Look up a bucket for modification
    pub fn bucket_mut(&mut self, id: MaterialBucketId) -> Option<&mut MaterialBucket> {
        self.buckets.get_mut(id)
    }

    /// Ids of a category list in insertion order
    pub fn bucket_ids(&self, category: BucketCategory) -> &[MaterialBucketId] {
        &self.lists[category.index()]
    }

    /// Buckets of a category list in insertion order
    pub fn buckets(&self, category: BucketCategory) -> impl Iterator<Item = (MaterialBucketId, &MaterialBucket)> {
        self.lists[category.index()]
            .iter()
            .filter_map(|&id| self.buckets.get(id).map(|bucket| (id, bucket)))
    }

    /// Number of buckets in a category list
    pub fn category_len(&self, category: BucketCategory) -> usize {
        self.lists[category.index()].len()
    }

    /// Number of buckets owned by the manager, the text bucket excluded
    pub fn bucket_count(&self) -> usize {
        self.lists[ALL].len()
    }

    /// Whether the manager owns no bucket besides the text bucket
    pub fn is_empty(&self) -> bool {
        self.lists[ALL].is_empty()
    }

    /// Whether a category list contains a bucket
    pub fn contains(&self, category: BucketCategory, id: MaterialBucketId) -> bool {
        self.lists[category.index()].contains(&id)
    }

    /// Category lists a bucket is listed in, in enumeration order
    pub fn categories_of(&self, id: MaterialBucketId) -> Vec<BucketCategory> {
        BucketCategory::ALL_CATEGORIES
            .into_iter()
            .filter(|&category| self.contains(category, id))
            .collect()
    }

    /// Reserved draw unit for on-screen text
    pub const fn text_display_array_bucket(&self) -> &DisplayArrayBucket {
        &self.text.array_bucket
    }

    /// Material of the text bucket, owned by the manager
    pub const fn text_material(&self) -> &MaterialRef {
        &self.text.material
    }

    /// Reserved material bucket for on-screen text
    pub fn text_material_bucket(&self) -> Option<&MaterialBucket> {
        self.buckets.get(self.text.bucket)
    }

    /// Id of the reserved text bucket
    pub const fn text_bucket_id(&self) -> MaterialBucketId {
        self.text.bucket
    }

    /// Check the index invariants
    ///
    /// Every listed id is alive and listed in "all", "all" has no duplicates,
    /// the text bucket is in no list and the arena holds nothing else.
    pub fn is_consistent(&self) -> bool {
        let all: HashSet<MaterialBucketId> = self.lists[ALL].iter().copied().collect();
        if all.len() != self.lists[ALL].len() || all.contains(&self.text.bucket) {
            return false;
        }
        if self.buckets.len() != all.len() + 1 || !self.buckets.contains_key(self.text.bucket) {
            return false;
        }
        self.lists
            .iter()
            .flatten()
            .all(|id| all.contains(id) && self.buckets.contains_key(*id))
    }
}

impl std::fmt::Debug for BucketManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("BucketManager");
        for category in BucketCategory::ALL_CATEGORIES {
            debug.field(category.name(), &self.category_len(category));
        }
        debug.finish()
    }
}

impl Drop for BucketManager {
    fn drop(&mut self) {
        log::debug!("BucketManager dropping with {} buckets", self.bucket_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::material::{BasicMaterial, MaterialFlags, PolyMaterial};
    use crate::render::shader::{shader_ref, ShaderRef, TransformShader};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn material(name: &str, flags: MaterialFlags) -> MaterialRef {
        MaterialRef::new(BasicMaterial::new(name, flags))
    }

    fn manager() -> BucketManager {
        BucketManager::new(material("text", MaterialFlags::empty()))
    }

    fn linear_manager() -> BucketManager {
        BucketManager::with_config(
            material("text", MaterialFlags::empty()),
            BucketManagerConfig::default().with_lookup(LookupStrategy::Linear),
        )
    }

    #[test]
    fn test_find_bucket_is_idempotent() {
        for mut manager in [manager(), linear_manager()] {
            let stone = material("stone", MaterialFlags::empty());

            let (first, created) = manager.find_bucket(&stone);
            assert!(created);
            let (second, created) = manager.find_bucket(&stone);
            assert!(!created);
            assert_eq!(first, second);
            assert_eq!(manager.bucket_count(), 1);
        }
    }

    #[test]
    fn test_identity_lookup() {
        let mut manager = manager();
        let a = material("same", MaterialFlags::empty());
        let b = material("same", MaterialFlags::empty());

        let (id_a, _) = manager.find_bucket(&a);
        let (id_b, created) = manager.find_bucket(&b);
        assert!(created);
        assert_ne!(id_a, id_b);
    }

    #[test]
    fn test_solid_placement() {
        let mut manager = manager();
        let solid = material("solid", MaterialFlags::empty());
        let (id, _) = manager.find_bucket(&solid);

        assert_eq!(manager.categories_of(id), vec![BucketCategory::Solid, BucketCategory::All]);
    }

    #[test]
    fn test_alpha_depth_shadow_placement() {
        let mut manager = manager();
        let flags = MaterialFlags::ALPHA
            | MaterialFlags::ALPHA_DEPTH
            | MaterialFlags::CASTS_SHADOWS
            | MaterialFlags::ALPHA_SHADOW;
        let (id, _) = manager.find_bucket(&material("glass", flags));

        assert_eq!(
            manager.categories_of(id),
            vec![
                BucketCategory::Alpha,
                BucketCategory::AlphaDepth,
                BucketCategory::AlphaShadow,
                BucketCategory::All,
            ]
        );
    }

    #[test]
    fn test_instancing_config() {
        let grass = material("grass", MaterialFlags::INSTANCING);

        let mut instanced = manager();
        let (id, _) = instanced.find_bucket(&grass);
        assert!(instanced.contains(BucketCategory::SolidInstancing, id));

        let mut plain = BucketManager::with_config(
            material("text", MaterialFlags::empty()),
            BucketManagerConfig::default().without_instancing(),
        );
        let (id, _) = plain.find_bucket(&grass);
        assert!(plain.contains(BucketCategory::Solid, id));
        assert_eq!(plain.category_len(BucketCategory::SolidInstancing), 0);
    }

    #[test]
    fn test_remove_material() {
        let mut manager = manager();
        let glass = material("glass", MaterialFlags::ALPHA | MaterialFlags::ALPHA_DEPTH);
        let stone = material("stone", MaterialFlags::empty());
        let (glass_id, _) = manager.find_bucket(&glass);
        let (stone_id, _) = manager.find_bucket(&stone);

        assert_eq!(manager.remove_material(&glass), 1);
        assert!(manager.bucket(glass_id).is_none());
        assert!(manager.categories_of(glass_id).is_empty());
        assert_eq!(manager.categories_of(stone_id), vec![BucketCategory::Solid, BucketCategory::All]);
        assert_eq!(glass.handle_count(), 1);

        let (new_id, created) = manager.find_bucket(&glass);
        assert!(created);
        assert_ne!(new_id, glass_id);
    }

    #[test]
    fn test_remove_absent_material_is_noop() {
        let mut manager = manager();
        let stone = material("stone", MaterialFlags::empty());
        manager.find_bucket(&stone);

        assert_eq!(manager.remove_material(&material("missing", MaterialFlags::empty())), 0);
        assert_eq!(manager.bucket_count(), 1);
        assert!(manager.is_consistent());
    }

    #[test]
    fn test_merge_moves_buckets_in_order() {
        let mut target = manager();
        let mut source = manager();
        let a = material("a", MaterialFlags::empty());
        let b = material("b", MaterialFlags::ALPHA);
        let c = material("c", MaterialFlags::empty());
        let (a_id, _) = target.find_bucket(&a);
        source.find_bucket(&b);
        source.find_bucket(&c);

        assert_eq!(target.merge_bucket_manager(&mut source), 2);

        let all: Vec<_> = target
            .buckets(BucketCategory::All)
            .filter_map(|(_, bucket)| bucket.material())
            .collect();
        assert_eq!(all, vec![a.clone(), b.clone(), c.clone()]);
        assert_eq!(target.bucket_ids(BucketCategory::Solid)[0], a_id);
        assert_eq!(target.category_len(BucketCategory::Solid), 2);
        assert_eq!(target.category_len(BucketCategory::Alpha), 1);

        for category in BucketCategory::ALL_CATEGORIES {
            assert_eq!(source.category_len(category), 0);
        }
        assert!(source.text_material_bucket().is_some());
    }

    #[test]
    fn test_merged_buckets_are_found() {
        let mut target = manager();
        let mut source = manager();
        let b = material("b", MaterialFlags::empty());
        source.find_bucket(&b);

        target.merge_bucket_manager(&mut source);

        let (_, created) = target.find_bucket(&b);
        assert!(!created);
        let (_, created) = source.find_bucket(&b);
        assert!(created);
    }

    #[test]
    fn test_merge_does_not_deduplicate() {
        let shared = material("shared", MaterialFlags::empty());
        let mut target = linear_manager();
        let mut source = manager();
        let (own, _) = target.find_bucket(&shared);
        source.find_bucket(&shared);

        target.merge_bucket_manager(&mut source);
        assert_eq!(target.bucket_count(), 2);
        assert_eq!(target.find_bucket(&shared), (own, false));

        assert_eq!(target.remove_material(&shared), 2);
        assert!(target.is_empty());
    }

    #[test]
    fn test_merge_rebinds_display_array_buckets() {
        let mut target = manager();
        let mut source = manager();
        let m = material("m", MaterialFlags::empty());
        let (source_id, _) = source.find_bucket(&m);
        source
            .add_display_array_bucket(source_id, DisplayArrayBucket::new(source_id))
            .unwrap();

        target.merge_bucket_manager(&mut source);

        let (new_id, bucket) = target.buckets(BucketCategory::All).next().unwrap();
        let (_, unit) = bucket.display_array_buckets().next().unwrap();
        assert_eq!(unit.bucket(), new_id);
    }

    #[test]
    fn test_text_bucket_isolation() {
        let text = material("text", MaterialFlags::empty());
        let mut manager = BucketManager::new(text.clone());
        let text_id = manager.text_bucket_id();

        let (id, created) = manager.find_bucket(&text);
        assert!(created);
        assert_ne!(id, text_id);
        assert!(manager.categories_of(text_id).is_empty());
        assert_eq!(manager.text_display_array_bucket().bucket(), text_id);
        assert!(manager.text_display_array_bucket().display_array().is_none());

        manager.remove_material(&text);
        assert!(manager.text_material_bucket().is_some());
        assert_eq!(manager.text_material_bucket().unwrap().material(), Some(text.clone()));
        assert_eq!(manager.text_material(), &text);
    }

    #[test]
    fn test_manager_owns_only_the_text_material() {
        let materials: Vec<_> = (0..4)
            .map(|i| material(&format!("m{i}"), MaterialFlags::CASTS_SHADOWS))
            .collect();
        let text = material("text", MaterialFlags::empty());
        let mut manager = BucketManager::new(text.clone());
        for material in &materials {
            manager.find_bucket(material);
        }

        assert!(materials.iter().all(|material| material.handle_count() == 1));
        assert_eq!(text.handle_count(), 2);

        drop(manager);
        assert_eq!(text.handle_count(), 1);
    }

    #[test]
    fn test_hashed_lookup_survives_merge_and_remove() {
        let shared = material("shared", MaterialFlags::empty());
        let other = material("other", MaterialFlags::ALPHA);
        let mut target = manager();
        let mut source = manager();
        source.find_bucket(&shared);
        source.find_bucket(&other);

        target.merge_bucket_manager(&mut source);
        let (merged, created) = target.find_bucket(&shared);
        assert!(!created);

        target.remove_material(&shared);
        assert!(target.bucket(merged).is_none());
        let (_, created) = target.find_bucket(&other);
        assert!(!created);
        let (_, created) = target.find_bucket(&shared);
        assert!(created);
    }

    #[test]
    fn test_oversized_initial_capacity_is_clamped() {
        let config = BucketManagerConfig {
            initial_capacity: usize::MAX,
            ..BucketManagerConfig::default()
        };
        let mut manager = BucketManager::with_config(material("text", MaterialFlags::empty()), config);
        let stone = material("stone", MaterialFlags::empty());

        let (_, created) = manager.find_bucket(&stone);
        assert!(created);
        assert_eq!(manager.config().initial_capacity, usize::MAX);
        assert!(manager.is_consistent());
    }

    #[derive(Debug)]
    struct RecompiledMaterial {
        name: &'static str,
        shader: RefCell<Option<ShaderRef>>,
    }

    impl RecompiledMaterial {
        fn new(name: &'static str) -> Rc<Self> {
            Rc::new(Self {
                name,
                shader: RefCell::new(None),
            })
        }

        fn compile(&self) {
            *self.shader.borrow_mut() = Some(shader_ref(TransformShader::new()));
        }
    }

    impl PolyMaterial for RecompiledMaterial {
        fn name(&self) -> &str {
            self.name
        }

        fn shader(&self) -> Option<ShaderRef> {
            self.shader.borrow().clone()
        }
    }

    #[test]
    fn test_update_shaders_with_filter() {
        let first = RecompiledMaterial::new("first");
        let second = RecompiledMaterial::new("second");
        let first_ref = MaterialRef::from_rc(first.clone());
        let second_ref = MaterialRef::from_rc(second.clone());

        let mut manager = manager();
        let (first_id, _) = manager.find_bucket(&first_ref);
        let (second_id, _) = manager.find_bucket(&second_ref);
        first.compile();
        second.compile();

        manager.update_shaders(Some(&first_ref));
        assert!(manager.bucket(first_id).unwrap().shader().is_some());
        assert!(manager.bucket(second_id).unwrap().shader().is_none());

        manager.update_shaders(None);
        assert!(manager.bucket(second_id).unwrap().shader().is_some());
    }

    #[test]
    fn test_release_materials_with_filter() {
        let a = Rc::new(BasicMaterial::new("a", MaterialFlags::empty()));
        let b = Rc::new(BasicMaterial::new("b", MaterialFlags::empty()));
        let a_ref = MaterialRef::from_rc(a.clone());
        let b_ref = MaterialRef::from_rc(b.clone());

        let mut manager = manager();
        manager.find_bucket(&a_ref);
        manager.find_bucket(&b_ref);

        manager.release_materials(Some(&a_ref));
        assert_eq!(a.release_count(), 1);
        assert_eq!(b.release_count(), 0);

        manager.release_materials(None);
        assert_eq!(a.release_count(), 2);
        assert_eq!(b.release_count(), 1);
        assert_eq!(manager.bucket_count(), 2);
    }

    #[test]
    fn test_move_display_array_bucket() {
        let mut manager = manager();
        let old = material("old", MaterialFlags::empty());
        let new = material("new", MaterialFlags::ALPHA);
        let (from, _) = manager.find_bucket(&old);
        let (to, _) = manager.find_bucket(&new);
        let array = manager
            .add_display_array_bucket(from, DisplayArrayBucket::new(from))
            .unwrap();

        let moved = manager.move_display_array_bucket(from, array, to).unwrap();
        assert!(manager.bucket(from).unwrap().is_empty());
        assert_eq!(
            manager.bucket(to).unwrap().display_array_bucket(moved).unwrap().bucket(),
            to
        );
    }

    #[test]
    fn test_move_to_unknown_bucket_keeps_unit() {
        let mut manager = manager();
        let gone = material("gone", MaterialFlags::empty());
        let old = material("old", MaterialFlags::empty());
        let (from, _) = manager.find_bucket(&old);
        let (to, _) = manager.find_bucket(&gone);
        let array = manager
            .add_display_array_bucket(from, DisplayArrayBucket::new(from))
            .unwrap();
        manager.remove_material(&gone);

        assert_eq!(
            manager.move_display_array_bucket(from, array, to),
            Err(BucketError::UnknownBucket(to))
        );
        assert_eq!(manager.bucket(from).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_unknown_display_array_bucket() {
        let mut manager = manager();
        let m = material("m", MaterialFlags::empty());
        let (id, _) = manager.find_bucket(&m);
        let array = manager.add_display_array_bucket(id, DisplayArrayBucket::new(id)).unwrap();
        manager.remove_display_array_bucket(id, array).unwrap();

        assert_eq!(
            manager.remove_display_array_bucket(id, array).unwrap_err(),
            BucketError::UnknownDisplayArrayBucket { bucket: id, array }
        );
    }
}
