use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use dungeon_core::logging::init_tracing;
use dungeon_core::{Ai, Engine, Entity, Fighter, GameConfig, GameMap, Inventory, Rect, TileType, World};

/// Generate a dungeon level and print a JSON summary of it.
#[derive(Parser, Debug)]
#[command(name = "dungeon-procedural-core", version)]
struct Args {
    /// RON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured seed
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,
}

#[derive(Serialize)]
struct MapSummary {
    seed: u64,
    width: i32,
    height: i32,
    rooms: Vec<Rect>,
    floor_tiles: usize,
    player: (i32, i32),
    nodes: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(width) = args.width {
        config.map.width = width;
    }
    if let Some(height) = args.height {
        config.map.height = height;
    }
    config.validate()?;
    init_tracing(&config.logging);

    let mut world = World::new();
    let engine = world.create_engine(Engine::from_config(&config));
    let map = world.generate_map(engine, config.map.width, config.map.height)?;

    let start = world
        .payload::<GameMap>(map)?
        .rooms()
        .first()
        .map(Rect::center)
        .context("generated map has no rooms")?;
    let player = world.create_actor(
        Entity::new(0, 0, '@', "Player"),
        Ai::controlled(),
        Fighter::new(30, 2, 5),
        Some(Inventory::new(26)),
    )?;
    world.place(player, start.0, start.1, Some(map))?;
    world.begin_turn(engine)?;

    let game_map = world.payload::<GameMap>(map)?;
    let summary = MapSummary {
        seed: config.seed,
        width: game_map.width(),
        height: game_map.height(),
        rooms: game_map.rooms().to_vec(),
        floor_tiles: game_map.count_tiles(TileType::Floor),
        player: start,
        nodes: world.len(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
