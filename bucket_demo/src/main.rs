//! Bucket demo application
//!
//! Builds every scene of a scene file into its own bucket manager, merges
//! them into the first one like a library-linked scene, and submits one
//! frame to a rasterizer that only logs what it is asked to draw.
//!
//! Usage: `bucket_demo [scenes.toml]`. Without an argument a built-in scene
//! file is used.

mod scene;

use bucket_engine::foundation::logging;
use bucket_engine::prelude::*;

use scene::{Scene, SceneError, SceneFile};

/// Rasterizer that logs draw calls instead of talking to a GPU
#[derive(Default)]
struct LoggingRasterizer {
    model_matrix: Mat4,
}

impl Rasterizer for LoggingRasterizer {
    fn set_model_matrix(&mut self, matrix: &Mat4) {
        self.model_matrix = *matrix;
    }

    fn draw(&mut self, array_bucket: &DisplayArrayBucket) {
        let name = array_bucket
            .mesh_material()
            .map_or_else(|| "<none>".to_string(), |slot| slot.name.clone());
        log::info!(
            "  draw slot '{}' at ({:.1}, {:.1}, {:.1})",
            name,
            self.model_matrix.m14,
            self.model_matrix.m24,
            self.model_matrix.m34
        );
    }

    fn draw_batched(&mut self, array_bucket: &DisplayArrayBucket) {
        let vertices = array_bucket.display_array().map_or(0, |array| array.vertex_count());
        log::info!("  draw batched array ({vertices} vertices)");
    }
}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Scene file declares no scenes")]
    NoScenes,
}

fn run() -> Result<(), DemoError> {
    let scene_file = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading scene file {path}");
            SceneFile::load_from_file(&path)?
        }
        None => SceneFile::default(),
    };

    let mut scenes = scene_file
        .scenes
        .iter()
        .map(|descriptor| Scene::build(descriptor, &scene_file.buckets))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();
    let mut world = scenes.next().ok_or(DemoError::NoScenes)?;
    for scene in scenes {
        world.merge(scene);
    }
    log::info!("Composed buckets: {:?}", world.buckets);

    let mut rasterizer = LoggingRasterizer::default();
    let mut renderer = BucketRenderer::new();
    for pass in [RenderPass::Shadow, RenderPass::Solid, RenderPass::Alpha, RenderPass::AlphaDepth] {
        log::info!("Pass {pass:?}");
        renderer.render_pass(&world.buckets, pass, &mut rasterizer);
    }

    let stats = renderer.stats();
    log::info!(
        "Frame: {} buckets, {} activations, {} draws ({} batched), {} us",
        stats.buckets_visited,
        stats.shader_activations,
        stats.total_draws(),
        stats.batched_draws,
        stats.submission_time_us
    );

    world.clear();
    Ok(())
}

fn main() {
    logging::init_with_default_filter("info");

    log::info!("Starting bucket demo");
    if let Err(e) = run() {
        log::error!("Application error: {e}");
        std::process::exit(1);
    }
    log::info!("Bucket demo finished successfully");
}
