//! Bucket manager configuration

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// How [`BucketManager::find_bucket`](crate::render::buckets::BucketManager::find_bucket)
/// resolves a material to its bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStrategy {
    /// Scan the "all" list in insertion order
    Linear,
    /// Consult an identity index kept alongside the "all" list
    #[default]
    Hashed,
}

/// Configuration for a [`BucketManager`](crate::render::buckets::BucketManager)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketManagerConfig {
    /// Honour materials that request GPU instancing. When disabled, such
    /// materials are classified into the plain category lists.
    pub instancing_enabled: bool,

    /// Material lookup strategy
    pub lookup: LookupStrategy,

    /// Number of material buckets to reserve up front, capped at 65536
    pub initial_capacity: usize,
}

impl Default for BucketManagerConfig {
    fn default() -> Self {
        Self {
            instancing_enabled: true,
            lookup: LookupStrategy::default(),
            initial_capacity: 64,
        }
    }
}

impl BucketManagerConfig {
    /// Disable instancing classification
    #[must_use]
    pub const fn without_instancing(mut self) -> Self {
        self.instancing_enabled = false;
        self
    }

    /// Use the given lookup strategy
    #[must_use]
    pub const fn with_lookup(mut self, lookup: LookupStrategy) -> Self {
        self.lookup = lookup;
        self
    }
}

impl Config for BucketManagerConfig {}
