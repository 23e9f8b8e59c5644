//! Render categories a material bucket can belong to

use std::fmt;

use crate::render::material::PolyMaterial;

/// Named category list of the bucket manager
///
/// The declaration order is the enumeration order used by draw submission and
/// by merges. [`BucketCategory::All`] is the ownership list, every live bucket
/// appears in it exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketCategory {
    /// Opaque geometry
    Solid,
    /// Alpha blended geometry
    Alpha,
    /// Opaque geometry drawn with instancing
    SolidInstancing,
    /// Alpha blended geometry drawn with instancing
    AlphaInstancing,
    /// Alpha geometry sorted by depth per mesh
    AlphaDepth,
    /// Depth sorted alpha geometry drawn with instancing
    AlphaDepthInstancing,
    /// Opaque shadow casters
    SolidShadow,
    /// Alpha tested shadow casters
    AlphaShadow,
    /// Opaque shadow casters drawn with instancing
    SolidShadowInstancing,
    /// Alpha tested shadow casters drawn with instancing
    AlphaShadowInstancing,
    /// Every bucket owned by the manager
    All,
}

impl BucketCategory {
    /// Number of category lists, including [`BucketCategory::All`]
    pub const COUNT: usize = 11;

    /// Every category in enumeration order
    pub const ALL_CATEGORIES: [Self; Self::COUNT] = [
        Self::Solid,
        Self::Alpha,
        Self::SolidInstancing,
        Self::AlphaInstancing,
        Self::AlphaDepth,
        Self::AlphaDepthInstancing,
        Self::SolidShadow,
        Self::AlphaShadow,
        Self::SolidShadowInstancing,
        Self::AlphaShadowInstancing,
        Self::All,
    ];

    /// Position of the list in the manager
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Instancing counterpart of a category
    ///
    /// Instanced categories and [`BucketCategory::All`] map to themselves.
    pub const fn instanced(self) -> Self {
        match self {
            Self::Solid => Self::SolidInstancing,
            Self::Alpha => Self::AlphaInstancing,
            Self::AlphaDepth => Self::AlphaDepthInstancing,
            Self::SolidShadow => Self::SolidShadowInstancing,
            Self::AlphaShadow => Self::AlphaShadowInstancing,
            other => other,
        }
    }

    /// Whether the category holds instanced draws
    pub const fn is_instancing(self) -> bool {
        matches!(
            self,
            Self::SolidInstancing
                | Self::AlphaInstancing
                | Self::AlphaDepthInstancing
                | Self::SolidShadowInstancing
                | Self::AlphaShadowInstancing
        )
    }

    /// Whether the category feeds the shadow pass
    pub const fn is_shadow(self) -> bool {
        matches!(
            self,
            Self::SolidShadow | Self::AlphaShadow | Self::SolidShadowInstancing | Self::AlphaShadowInstancing
        )
    }

    /// Short name used in logs
    pub const fn name(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Alpha => "alpha",
            Self::SolidInstancing => "solid_instancing",
            Self::AlphaInstancing => "alpha_instancing",
            Self::AlphaDepth => "alpha_depth",
            Self::AlphaDepthInstancing => "alpha_depth_instancing",
            Self::SolidShadow => "solid_shadow",
            Self::AlphaShadow => "alpha_shadow",
            Self::SolidShadowInstancing => "solid_shadow_instancing",
            Self::AlphaShadowInstancing => "alpha_shadow_instancing",
            Self::All => "all",
        }
    }

    /// Category lists a new bucket for `material` joins, [`BucketCategory::All`] last
    ///
    /// Draw categories and shadow categories are independent of each other; a
    /// depth sorted alpha material is in both the alpha and the alpha depth list.
    pub fn classify(material: &dyn PolyMaterial, instancing_enabled: bool) -> Vec<Self> {
        let instancing = instancing_enabled && material.use_instancing();
        let variant = |category: Self| if instancing { category.instanced() } else { category };

        let mut categories = Vec::with_capacity(4);
        if !material.only_shadow() {
            if material.is_alpha() {
                categories.push(variant(Self::Alpha));
                if material.is_alpha_depth() {
                    categories.push(variant(Self::AlphaDepth));
                }
            } else {
                categories.push(variant(Self::Solid));
            }
        }
        if material.casts_shadows() {
            if material.is_alpha_shadow() {
                categories.push(variant(Self::AlphaShadow));
            } else {
                categories.push(variant(Self::SolidShadow));
            }
        }
        categories.push(Self::All);
        categories
    }
}

impl fmt::Display for BucketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
