//! Heightfield - build a procedural terrain mesh and report on it.
//!
//! The mesh itself is handed to a renderer in-process; this binary builds
//! it, prints statistics and optionally writes image previews.

use std::time::Instant;

use clap::Parser;

use heightfield::cli::Args;
use heightfield::preview;
use heightfield::terrain::TerrainSystem;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.terrain_config();

    println!("Heightfield Generator");
    println!("  Grid: {}x{}", args.width, args.height);
    println!(
        "  Octaves: {}, lacunarity: {}, gain: {}",
        config.fractal.octaves, config.fractal.lacunarity, config.fractal.gain
    );

    let start = Instant::now();
    let mut terrain = TerrainSystem::new(config);
    let mesh = terrain.rebuild(args.width, args.height)?;
    let elapsed = start.elapsed();

    let (lo, hi) = mesh.height_range();
    println!("  Vertices: {}", mesh.vertices().len());
    println!("  Triangles: {}", mesh.indices().len() / 3);
    println!("  Height range: {:.4} .. {:.4}", lo, hi);
    println!("  Time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    if let Some(path) = &args.normal_map {
        preview::save_normal_map(mesh, path)?;
        log::info!("Wrote normal map to {}", path.display());
    }
    if let Some(path) = &args.height_map {
        preview::save_height_map(mesh, path)?;
        log::info!("Wrote height map to {}", path.display());
    }

    Ok(())
}
