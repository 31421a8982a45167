//! Dungeon Crawler - Procedural Core Library
//!
//! This crate provides the turn-based runtime substrate for a grid-world
//! roguelike:
//! - Node composition (arena of parent/child nodes, capability lookup)
//! - Entities, actors and items built on nodes
//! - Action command objects resolved through node ancestry
//! - Procedural room + corridor map generation (seeded, reproducible)
//! - Per-tile blocked/visibility layers and spatial content index

pub mod action;
pub mod components;
pub mod config;
pub mod constants;
pub mod engine;
pub mod entity;
pub mod error;
pub mod logging;
pub mod map;
pub mod node;

pub use action::{Action, DirectedAction, Wait};
pub use components::{Ai, AiKind, Consumable, ConsumableKind, Fighter, Inventory};
pub use config::{GameConfig, GeneratorParams, MapConfig};
pub use engine::Engine;
pub use entity::{Color, Entity, EntityKind, RenderOrder};
pub use error::{CoreError, CoreResult};
pub use map::{GameMap, Glyph, Rect, TileType};
pub use node::{Capability, CapabilityKind, NodeData, NodeId, World};
