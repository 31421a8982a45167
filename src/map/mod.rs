//! Grid world: tiles, derived layers and the per-tile content index.
//!
//! Every layer is a flat vector of `width * height` cells addressed through
//! [`GameMap::idx`]. Grid reads do not bounds-check beyond what vector
//! indexing does: call [`GameMap::in_bounds`] first.

pub mod bresenham;
pub mod generator;
pub mod rect;
pub mod tiles;

use serde::{Deserialize, Serialize};

use crate::components::Fighter;
use crate::entity::Entity;
use crate::error::CoreResult;
use crate::node::{NodeId, World};

pub use rect::Rect;
pub use tiles::{Glyph, TileType, SHROUD};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMap {
    width: i32,
    height: i32,
    tiles: Vec<TileType>,
    rooms: Vec<Rect>,
    blocked: Vec<bool>,
    visible: Vec<bool>,
    explored: Vec<bool>,
    memory: Vec<Glyph>,
    tile_content: Vec<Vec<NodeId>>,
}

impl GameMap {
    /// Solid-wall map with no rooms. Non-positive dimensions give an empty
    /// grid.
    pub fn new(width: i32, height: i32) -> Self {
        let area = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            tiles: vec![TileType::Wall; area],
            rooms: Vec::new(),
            blocked: vec![true; area],
            visible: vec![false; area],
            explored: vec![false; area],
            memory: vec![SHROUD; area],
            tile_content: vec![Vec::new(); area],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells in every layer
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    /// Row-major flattening shared by every layer.
    #[inline]
    pub fn idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        0 <= x && x < self.width && 0 <= y && y < self.height
    }

    pub fn tile(&self, x: i32, y: i32) -> TileType {
        self.tiles[self.idx(x, y)]
    }

    /// Does not touch the blocked layer; re-run `populate_blocked` afterwards.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileType) {
        let idx = self.idx(x, y);
        self.tiles[idx] = tile;
    }

    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.blocked[self.idx(x, y)]
    }

    pub fn walkable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && !self.is_blocked(x, y)
    }

    /// Rebuild the blocked layer from tile types.
    pub fn populate_blocked(&mut self) {
        for (blocked, tile) in self.blocked.iter_mut().zip(&self.tiles) {
            *blocked = *tile == TileType::Wall;
        }
    }

    pub fn count_tiles(&self, tile: TileType) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    pub fn blocked(&self) -> &[bool] {
        &self.blocked
    }

    pub fn visible(&self) -> &[bool] {
        &self.visible
    }

    pub fn visible_mut(&mut self) -> &mut [bool] {
        &mut self.visible
    }

    pub fn explored(&self) -> &[bool] {
        &self.explored
    }

    pub fn explored_mut(&mut self) -> &mut [bool] {
        &mut self.explored
    }

    pub fn memory(&self) -> &[Glyph] {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut [Glyph] {
        &mut self.memory
    }

    pub fn tile_content(&self) -> &[Vec<NodeId>] {
        &self.tile_content
    }

    /// Empty every tile's content list. Run once per turn before
    /// re-registering entities.
    pub fn clear_content_index(&mut self) {
        for content in &mut self.tile_content {
            content.clear();
        }
    }

    pub fn register(&mut self, id: NodeId, x: i32, y: i32) {
        let idx = self.idx(x, y);
        self.tile_content[idx].push(id);
    }

    pub fn content_at(&self, x: i32, y: i32) -> &[NodeId] {
        &self.tile_content[self.idx(x, y)]
    }
}

impl World {
    /// Entity nodes standing directly on `map`.
    pub fn entities_on(&self, map: NodeId) -> Vec<NodeId> {
        self.children(map)
            .iter()
            .copied()
            .filter(|&child| self.is::<Entity>(child))
            .collect()
    }

    /// Clear the content index of `map` and register every in-bounds entity
    /// on it. Returns how many were registered.
    pub fn index_entities(&mut self, map: NodeId) -> CoreResult<usize> {
        let placements: Vec<(NodeId, i32, i32)> = self
            .entities_on(map)
            .into_iter()
            .filter_map(|id| self.entity(id).ok().map(|e| (id, e.x, e.y)))
            .collect();

        let game_map = self.payload_mut::<GameMap>(map)?;
        game_map.clear_content_index();
        let mut registered = 0;
        for (id, x, y) in placements {
            if game_map.in_bounds(x, y) {
                game_map.register(id, x, y);
                registered += 1;
            }
        }
        tracing::trace!(%map, registered, "indexed entities");
        Ok(registered)
    }

    fn first_content_at(
        &self,
        map: NodeId,
        x: i32,
        y: i32,
        predicate: impl Fn(NodeId) -> bool,
    ) -> CoreResult<Option<NodeId>> {
        let game_map = self.payload::<GameMap>(map)?;
        if !game_map.in_bounds(x, y) {
            return Ok(None);
        }
        Ok(game_map.content_at(x, y).iter().copied().find(|&id| predicate(id)))
    }

    /// First entity on the tile with combat stats.
    pub fn target_at_location(&self, map: NodeId, x: i32, y: i32) -> CoreResult<Option<NodeId>> {
        self.first_content_at(map, x, y, |id| self.try_get::<Fighter>(id).is_some())
    }

    /// First entity on the tile that blocks movement.
    pub fn blocking_entity_at(&self, map: NodeId, x: i32, y: i32) -> CoreResult<Option<NodeId>> {
        self.first_content_at(map, x, y, |id| {
            self.entity(id).map(|e| e.blocks_movement).unwrap_or(false)
        })
    }

    /// First actor on the tile.
    pub fn actor_at_location(&self, map: NodeId, x: i32, y: i32) -> CoreResult<Option<NodeId>> {
        self.first_content_at(map, x, y, |id| self.is_actor(id))
    }
}
