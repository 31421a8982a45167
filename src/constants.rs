//! Centralized game constants for the dungeon procedural core.
//!
//! Defaults for config fields live here so the generator, the config layer
//! and the CLI agree on a single source of truth.

// =====================================================
// Map Generation
// =====================================================

/// Number of room placement attempts per map
pub const MAX_ROOMS: u32 = 30;

/// Smallest room side, walls included
pub const ROOM_MIN_SIZE: i32 = 6;

/// Largest room side, walls included
pub const ROOM_MAX_SIZE: i32 = 10;

/// Rooms smaller than this have no inner floor worth carving
pub const ROOM_SIZE_FLOOR: i32 = 3;

/// Default map width in tiles
pub const MAP_WIDTH: i32 = 80;

/// Default map height in tiles (leaves room for a status panel)
pub const MAP_HEIGHT: i32 = 43;

// =====================================================
// Engine
// =====================================================

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

/// Probability of a tunnel bending horizontally first
pub const TUNNEL_HORIZONTAL_FIRST: f64 = 0.5;

// =====================================================
// Entities
// =====================================================

/// Name given to entities created without one
pub const UNNAMED_ENTITY: &str = "<Unnamed>";

/// Glyph given to entities created without one
pub const DEFAULT_GLYPH: char = '?';
