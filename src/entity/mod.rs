//! Entities: positioned, renderable nodes (players, monsters, items).
//!
//! An actor is an entity node with `Ai`, `Fighter` and `Inventory` children.
//! An item is an entity node with an optional `Consumable` child. Both are
//! created standalone, then placed on a map (`place`) or stamped out from a
//! template (`spawn`).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::components::{Ai, Consumable, Fighter, Inventory};
use crate::constants::{DEFAULT_GLYPH, UNNAMED_ENTITY};
use crate::error::{CoreError, CoreResult};
use crate::map::GameMap;
use crate::node::{NodeId, World};

/// 3-channel display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Draw layering. Later variants are drawn on top.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RenderOrder {
    #[default]
    Corpse,
    Item,
    Actor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[default]
    Prop,
    Actor,
    Item,
}

/// Entity payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    pub ch: char,
    pub color: Color,
    pub name: String,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub kind: EntityKind,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            ch: DEFAULT_GLYPH,
            color: Color::WHITE,
            name: UNNAMED_ENTITY.to_string(),
            blocks_movement: false,
            render_order: RenderOrder::Corpse,
            kind: EntityKind::Prop,
        }
    }
}

impl Entity {
    pub fn new(x: i32, y: i32, ch: char, name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            ch,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_blocks_movement(mut self, blocks_movement: bool) -> Self {
        self.blocks_movement = blocks_movement;
        self
    }

    pub fn with_render_order(mut self, render_order: RenderOrder) -> Self {
        self.render_order = render_order;
        self
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_actor(&self) -> bool {
        self.kind == EntityKind::Actor
    }

    /// Euclidean distance to `(x, y)`
    pub fn distance(&self, x: i32, y: i32) -> f64 {
        let dx = f64::from(x) - f64::from(self.x);
        let dy = f64::from(y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Translate by a delta. No bounds or collision checks: actions validate
    /// the destination before calling this.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            f.write_str("Unnamed")
        } else {
            f.write_str(&self.name)
        }
    }
}

impl World {
    pub fn create_entity(&mut self, entity: Entity) -> NodeId {
        self.insert(entity)
    }

    /// Create an actor node with its three capabilities attached. An absent
    /// inventory becomes an empty one with capacity 0.
    pub fn create_actor(
        &mut self,
        entity: Entity,
        ai: Ai,
        fighter: Fighter,
        inventory: Option<Inventory>,
    ) -> CoreResult<NodeId> {
        let actor = self.insert(Entity {
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            kind: EntityKind::Actor,
            ..entity
        });
        self.add_component(actor, ai)?;
        self.add_component(actor, fighter)?;
        self.add_component(actor, inventory.unwrap_or_default())?;
        Ok(actor)
    }

    pub fn create_item(
        &mut self,
        entity: Entity,
        consumable: Option<Consumable>,
    ) -> CoreResult<NodeId> {
        let item = self.insert(Entity {
            blocks_movement: false,
            render_order: RenderOrder::Item,
            kind: EntityKind::Item,
            ..entity
        });
        if let Some(consumable) = consumable {
            self.add_component(item, consumable)?;
        }
        Ok(item)
    }

    pub fn entity(&self, id: NodeId) -> CoreResult<&Entity> {
        self.payload::<Entity>(id)
    }

    pub fn entity_mut(&mut self, id: NodeId) -> CoreResult<&mut Entity> {
        self.payload_mut::<Entity>(id)
    }

    /// Map this entity is standing on (or carried within).
    pub fn gamemap_of(&self, id: NodeId) -> CoreResult<NodeId> {
        self.get_parent::<GameMap>(id)
    }

    /// Stamp out an independent copy of `template` (capabilities and carried
    /// items included) at `(x, y)` on `map`.
    pub fn spawn(&mut self, template: NodeId, map: NodeId, x: i32, y: i32) -> CoreResult<NodeId> {
        self.entity(template)?;
        self.node(map)?;

        let clone = self.deep_clone(template)?;
        let entity = self.entity_mut(clone)?;
        entity.x = x;
        entity.y = y;
        self.attach(map, clone)?;
        debug!(%template, %clone, %map, x, y, "spawned entity");
        Ok(clone)
    }

    /// Move an entity to `(x, y)`, reparenting it to `map`. `None` detaches it
    /// from any map. A rejected reparent leaves the position untouched.
    pub fn place(&mut self, id: NodeId, x: i32, y: i32, map: Option<NodeId>) -> CoreResult<()> {
        self.entity(id)?;
        match map {
            Some(map) => self.attach(map, id)?,
            None => self.detach(id)?,
        }
        let entity = self.entity_mut(id)?;
        entity.x = x;
        entity.y = y;
        Ok(())
    }

    pub fn is_actor(&self, id: NodeId) -> bool {
        self.entity(id).map(Entity::is_actor).unwrap_or(false)
    }

    /// An actor is alive while it has an AI attached.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.try_get::<Ai>(id).is_some()
    }

    pub fn ai(&self, id: NodeId) -> CoreResult<&Ai> {
        self.component::<Ai>(id)
    }

    pub fn fighter(&self, id: NodeId) -> CoreResult<&Fighter> {
        self.component::<Fighter>(id)
    }

    pub fn fighter_mut(&mut self, id: NodeId) -> CoreResult<&mut Fighter> {
        self.component_mut::<Fighter>(id)
    }

    pub fn inventory(&self, id: NodeId) -> CoreResult<&Inventory> {
        self.component::<Inventory>(id)
    }

    pub fn consumable(&self, id: NodeId) -> Option<&Consumable> {
        self.try_component::<Consumable>(id)
    }

    /// Fails with `NotAnActor` for props and items.
    pub fn expect_actor(&self, id: NodeId) -> CoreResult<&Entity> {
        let entity = self.entity(id)?;
        if entity.is_actor() {
            Ok(entity)
        } else {
            Err(CoreError::NotAnActor(id))
        }
    }
}
