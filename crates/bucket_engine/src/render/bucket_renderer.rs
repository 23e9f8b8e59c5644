//! # Bucket Renderer
//!
//! Submits the category lists of a [`BucketManager`] to a [`Rasterizer`].
//!
//! ## Architecture
//!
//! - **RenderPass**: a fixed group of category lists drawn together
//! - **BucketRenderer**: walks the lists and drives each bucket's shader
//!   through `activate -> update* -> deactivate`
//! - **DrawStats**: per-submission counters
//!
//! Batched display arrays are handed to the rasterizer as they are; every
//! other display array gets a shader update with its mesh instance first.

use std::time::Instant;

use super::buckets::{BucketCategory, BucketManager, MaterialBucket};
use super::rasterizer::Rasterizer;

/// Group of category lists drawn in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPass {
    /// Shadow map pass
    Shadow,
    /// Opaque geometry
    Solid,
    /// Alpha blended geometry drawn per bucket
    Alpha,
    /// Alpha blended geometry that the rasterizer sorts per mesh
    AlphaDepth,
}

impl RenderPass {
    /// Category lists of the pass, plain lists before their instanced variants
    pub const fn categories(self) -> &'static [BucketCategory] {
        match self {
            Self::Shadow => &[
                BucketCategory::SolidShadow,
                BucketCategory::SolidShadowInstancing,
                BucketCategory::AlphaShadow,
                BucketCategory::AlphaShadowInstancing,
            ],
            Self::Solid => &[BucketCategory::Solid, BucketCategory::SolidInstancing],
            Self::Alpha => &[BucketCategory::Alpha, BucketCategory::AlphaInstancing],
            Self::AlphaDepth => &[BucketCategory::AlphaDepth, BucketCategory::AlphaDepthInstancing],
        }
    }
}

/// Statistics for bucket submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Material buckets visited
    pub buckets_visited: usize,

    /// Buckets skipped because their shader was missing or invalid
    pub buckets_skipped: usize,

    /// Shader activations
    pub shader_activations: usize,

    /// Per-object draw calls
    pub draw_calls: usize,

    /// Batched draw calls
    pub batched_draws: usize,

    /// Time spent submitting (microseconds)
    pub submission_time_us: u64,
}

impl DrawStats {
    /// Total number of draw calls of any kind
    pub const fn total_draws(&self) -> usize {
        self.draw_calls + self.batched_draws
    }
}

/// Draw submission over bucket category lists
#[derive(Debug, Default)]
pub struct BucketRenderer {
    stats: DrawStats,
}

impl BucketRenderer {
    /// Create a renderer with zeroed statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw every category list of a pass
    pub fn render_pass(&mut self, manager: &BucketManager, pass: RenderPass, rasterizer: &mut dyn Rasterizer) {
        for &category in pass.categories() {
            self.render_category(manager, category, rasterizer);
        }
    }

    /// Draw one category list in list order
    pub fn render_category(
        &mut self,
        manager: &BucketManager,
        category: BucketCategory,
        rasterizer: &mut dyn Rasterizer,
    ) {
        let start_time = Instant::now();

        for (_, bucket) in manager.buckets(category) {
            self.render_bucket(bucket, rasterizer);
        }

        let elapsed = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.stats.submission_time_us = self.stats.submission_time_us.saturating_add(elapsed);
    }

    fn render_bucket(&mut self, bucket: &MaterialBucket, rasterizer: &mut dyn Rasterizer) {
        self.stats.buckets_visited += 1;
        if bucket.is_empty() {
            return;
        }

        let Some(shader) = bucket.shader().filter(|shader| shader.borrow().is_valid()) else {
            log::warn!("Skipping bucket '{}': no valid shader", bucket.material_name());
            self.stats.buckets_skipped += 1;
            return;
        };

        let mut shader = shader.borrow_mut();
        shader.activate(rasterizer);
        self.stats.shader_activations += 1;

        for (_, array_bucket) in bucket.display_array_buckets() {
            if array_bucket.use_batching() {
                rasterizer.draw_batched(array_bucket);
                self.stats.batched_draws += 1;
            } else {
                if let Some(mesh) = array_bucket.mesh() {
                    shader.update(rasterizer, &*mesh);
                }
                rasterizer.draw(array_bucket);
                self.stats.draw_calls += 1;
            }
        }

        shader.deactivate();
        log::trace!(
            "Submitted bucket '{}' with {} display array buckets",
            bucket.material_name(),
            bucket.len()
        );
    }

    /// Get current submission statistics
    pub const fn stats(&self) -> &DrawStats {
        &self.stats
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = DrawStats::default();
    }
}
