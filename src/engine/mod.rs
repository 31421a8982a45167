//! Engine root node.
//!
//! The engine owns the single seeded RNG every map is generated from, so one
//! seed reproduces the whole dungeon. Maps attach under the engine; actions
//! find the engine by walking up from their actor.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::info;

use crate::config::{GameConfig, GeneratorParams};
use crate::error::CoreResult;
use crate::map::GameMap;
use crate::node::{NodeId, World};

#[derive(Debug, Clone)]
pub struct Engine {
    seed: u64,
    rng: Xoshiro256PlusPlus,
    pub generator: GeneratorParams,
    pub turn: u64,
}

impl Engine {
    pub fn new(seed: u64, generator: GeneratorParams) -> Self {
        Self {
            seed,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            generator,
            turn: 0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.seed, config.map.generator)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rng(&mut self) -> &mut Xoshiro256PlusPlus {
        &mut self.rng
    }
}

impl World {
    pub fn create_engine(&mut self, engine: Engine) -> NodeId {
        info!(seed = engine.seed(), "engine created");
        self.insert(engine)
    }

    /// Generate a map from the engine's RNG and attach it under the engine.
    /// The newest map is the engine's active map.
    pub fn generate_map(&mut self, engine: NodeId, width: i32, height: i32) -> CoreResult<NodeId> {
        let state = self.payload_mut::<Engine>(engine)?;
        let params = state.generator;
        let map = GameMap::generate(state.rng(), width, height, &params)?;

        let map_id = self.insert(map);
        self.attach(engine, map_id)?;
        Ok(map_id)
    }

    /// Most recently generated map under `engine`.
    pub fn active_map(&self, engine: NodeId) -> CoreResult<NodeId> {
        self.get::<GameMap>(engine)
    }

    /// Advance the turn counter and rebuild the active map's content index.
    pub fn begin_turn(&mut self, engine: NodeId) -> CoreResult<u64> {
        let map = self.active_map(engine)?;
        self.index_entities(map)?;
        let state = self.payload_mut::<Engine>(engine)?;
        state.turn += 1;
        Ok(state.turn)
    }
}
