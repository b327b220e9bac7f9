//! Synthetic scene construction and the per-thread acquire loop.

use crate::error::CliError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::Arc;
use texstore::color::ColorSpace;
use texstore::scene::{
    Assembly, AssemblyId, CheckerTexture, GradientTexture, Scene, Texture, TextureId,
};
use texstore::store::{TextureStore, TileKey};

/// Shape of the synthetic scene the workload runs against.
#[derive(Debug, Clone)]
pub struct SceneParams {
    /// Textures registered directly on the scene
    pub scene_textures: usize,
    /// Assemblies, each with one texture; every other one nests a child
    /// assembly with a texture of its own
    pub assemblies: usize,
    /// Tiles per axis in every texture
    pub grid: usize,
    /// Tile edge length in pixels
    pub tile_size: usize,
}

/// Result of one worker thread's run.
pub struct WorkerReport {
    /// Number of successful acquires
    pub acquires: usize,
    /// Sum of sampled pixel values, for run-to-run comparison
    pub checksum: f64,
}

/// Build the synthetic scene and the full universe of tile keys.
pub fn build_scene(params: &SceneParams) -> (Arc<Scene>, Vec<TileKey>) {
    let mut scene = Scene::new();
    let mut keys = Vec::new();
    let mut texture_index = 0;

    for _ in 0..params.scene_textures {
        let texture = scene.add_texture(make_texture(texture_index, params));
        texture_index += 1;
        push_tile_keys(&mut keys, None, texture, params.grid);
    }

    for i in 0..params.assemblies {
        let mut assembly = Assembly::new();
        let assembly_id = assembly.id();
        let texture = assembly.add_texture(make_texture(texture_index, params));
        texture_index += 1;
        push_tile_keys(&mut keys, Some(assembly_id), texture, params.grid);

        // Every other assembly nests a child with its own texture.
        if i % 2 == 0 {
            let mut child = Assembly::new();
            let child_id = child.id();
            let texture = child.add_texture(make_texture(texture_index, params));
            texture_index += 1;
            push_tile_keys(&mut keys, Some(child_id), texture, params.grid);
            assembly.add_assembly(child);
        }

        scene.add_assembly(assembly);
    }

    (Arc::new(scene), keys)
}

/// Acquire random tiles from the store, holding a sliding window of
/// handles so resident tiles overlap owners across iterations.
pub fn run_worker(
    store: &TextureStore,
    keys: &[TileKey],
    seed: u64,
    iterations: usize,
    hold_window: usize,
) -> Result<WorkerReport, CliError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut held = VecDeque::with_capacity(hold_window + 1);
    let mut checksum = 0.0f64;

    for _ in 0..iterations {
        let key = keys[rng.gen_range(0..keys.len())];
        let tile = store.acquire(key)?;

        let [red, green, blue] = tile.pixel3(0);
        checksum += (red + green + blue) as f64;

        held.push_back(tile);
        if held.len() > hold_window {
            held.pop_front();
        }
    }

    Ok(WorkerReport {
        acquires: iterations,
        checksum,
    })
}

fn push_tile_keys(
    keys: &mut Vec<TileKey>,
    assembly: Option<AssemblyId>,
    texture: TextureId,
    grid: usize,
) {
    for tile_y in 0..grid {
        for tile_x in 0..grid {
            keys.push(match assembly {
                Some(id) => TileKey::assembly(id, texture, tile_x, tile_y),
                None => TileKey::scene(texture, tile_x, tile_y),
            });
        }
    }
}

/// Rotate through texture flavors so the workload covers every color
/// space and both channel counts.
fn make_texture(index: usize, params: &SceneParams) -> Box<dyn Texture> {
    let size = params.tile_size;
    let grid = params.grid;
    match index % 4 {
        0 => Box::new(
            GradientTexture::new(format!("gradient_{:03}.exr", index), size, size)
                .with_color_space(ColorSpace::Srgb)
                .with_grid(grid, grid),
        ),
        1 => Box::new(
            CheckerTexture::new(format!("checker_{:03}.exr", index), size, size)
                .with_cell_size(size / 8)
                .with_grid(grid, grid),
        ),
        2 => Box::new(
            GradientTexture::new(format!("gradient_rgba_{:03}.exr", index), size, size)
                .with_channels(4)
                .with_color_space(ColorSpace::LinearRgb)
                .with_grid(grid, grid),
        ),
        _ => Box::new(
            CheckerTexture::new(format!("checker_srgb_{:03}.exr", index), size, size)
                .with_color_space(ColorSpace::Srgb)
                .with_colors([0.2, 0.2, 0.8], [0.9, 0.9, 0.1])
                .with_grid(grid, grid),
        ),
    }
}
