//! TexStore CLI - Exercise a texture tile store under concurrent load
//!
//! Builds a synthetic scene of procedural textures, hammers the store
//! from worker threads, and reports cache statistics.

mod error;
mod workload;

use clap::Parser;
use error::CliError;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use texstore::logging::{default_log_dir, default_log_file, init_logging};
use texstore::store::{format_bytes, Size, TextureStore, TileStoreConfig};
use tracing::info;
use workload::SceneParams;

#[derive(Parser)]
#[command(name = "texstore")]
#[command(about = "Exercise a texture tile store under concurrent load", long_about = None)]
#[command(version)]
struct Args {
    /// Memory budget for resident tiles (e.g. 64MB, 1GB)
    #[arg(long, default_value = "256MB")]
    max_size: Size,

    /// Number of worker threads
    #[arg(long, default_value = "4")]
    threads: usize,

    /// Acquires per worker thread
    #[arg(long, default_value = "10000")]
    iterations: usize,

    /// Textures registered directly on the scene
    #[arg(long, default_value = "8")]
    textures: usize,

    /// Assemblies with one texture each; every other one nests a child
    #[arg(long, default_value = "4")]
    assemblies: usize,

    /// Tiles per axis in every texture
    #[arg(long, default_value = "8")]
    grid: usize,

    /// Tile edge length in pixels
    #[arg(long, default_value = "64")]
    tile_size: usize,

    /// Live handles each worker keeps across iterations
    #[arg(long, default_value = "4")]
    hold_window: usize,

    /// Seed for the random workload
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Log every tile load
    #[arg(long)]
    track_tile_loading: bool,

    /// Log every tile unload
    #[arg(long)]
    track_tile_unloading: bool,

    /// Log the store size after every load
    #[arg(long)]
    track_store_size: bool,

    /// Default to debug-level logging (RUST_LOG still wins)
    #[arg(long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let _logging_guard = init_logging(default_log_dir(), default_log_file(), args.debug)
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    validate(&args)?;

    info!("TexStore v{}", texstore::VERSION);

    let params = SceneParams {
        scene_textures: args.textures,
        assemblies: args.assemblies,
        grid: args.grid,
        tile_size: args.tile_size,
    };
    let (scene, keys) = workload::build_scene(&params);

    let tile_bytes = args.tile_size * args.tile_size * 3 * std::mem::size_of::<f32>();
    println!(
        "Scene: {} tiles across {} textures ({}x{} px, ~{} each)",
        keys.len(),
        args.textures + args.assemblies + args.assemblies.div_ceil(2),
        args.tile_size,
        args.tile_size,
        format_bytes(tile_bytes)
    );

    let config = TileStoreConfig::default()
        .with_max_size(args.max_size.bytes())
        .with_track_tile_loading(args.track_tile_loading)
        .with_track_tile_unloading(args.track_tile_unloading)
        .with_track_store_size(args.track_store_size);
    let store = Arc::new(TextureStore::with_config(scene, config)?);

    println!("Store budget: {}", format_bytes(store.max_size()));
    println!(
        "Running {} threads x {} acquires (seed {})...",
        args.threads, args.iterations, args.seed
    );
    println!();

    let keys = Arc::new(keys);
    let start = Instant::now();

    let handles: Vec<_> = (0..args.threads)
        .map(|index| {
            let store = Arc::clone(&store);
            let keys = Arc::clone(&keys);
            let seed = args.seed.wrapping_add(index as u64);
            let iterations = args.iterations;
            let hold_window = args.hold_window;
            thread::spawn(move || {
                workload::run_worker(&store, &keys, seed, iterations, hold_window)
            })
        })
        .collect();

    let mut total_acquires = 0usize;
    for (index, handle) in handles.into_iter().enumerate() {
        let report = handle
            .join()
            .map_err(|_| CliError::Worker(format!("worker {} panicked", index)))??;
        info!(
            "worker {} finished: {} acquires, checksum {:.3}",
            index, report.acquires, report.checksum
        );
        total_acquires += report.acquires;
    }

    let elapsed = start.elapsed();
    println!(
        "✓ Completed {} acquires in {:.2}s ({:.0} acquires/s)",
        total_acquires,
        elapsed.as_secs_f64(),
        total_acquires as f64 / elapsed.as_secs_f64()
    );
    println!();
    println!("{}", store.statistics().format());

    Ok(())
}

fn validate(args: &Args) -> Result<(), CliError> {
    if args.threads == 0 {
        return Err(CliError::Config("--threads must be at least 1".to_string()));
    }
    if args.textures == 0 && args.assemblies == 0 {
        return Err(CliError::Config(
            "the scene needs at least one texture (--textures or --assemblies)".to_string(),
        ));
    }
    if args.grid == 0 {
        return Err(CliError::Config("--grid must be at least 1".to_string()));
    }
    if args.tile_size == 0 {
        return Err(CliError::Config("--tile-size must be at least 1".to_string()));
    }
    Ok(())
}
