//! Inventory capability.
//!
//! Items held by an actor are item nodes attached under the actor's inventory
//! node, so they leave the map's entity list while carried and keep their own
//! capabilities (consumables) intact.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::{Entity, EntityKind};
use crate::error::{CoreError, CoreResult};
use crate::map::GameMap;
use crate::node::{NodeId, World};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub capacity: usize,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl World {
    /// Item nodes carried by `actor`, oldest first.
    pub fn inventory_items(&self, actor: NodeId) -> CoreResult<Vec<NodeId>> {
        let inventory = self.get::<Inventory>(actor)?;
        Ok(self
            .children(inventory)
            .iter()
            .copied()
            .filter(|&child| self.is::<Entity>(child))
            .collect())
    }

    pub fn inventory_len(&self, actor: NodeId) -> CoreResult<usize> {
        Ok(self.inventory_items(actor)?.len())
    }

    pub fn inventory_is_full(&self, actor: NodeId) -> CoreResult<bool> {
        let capacity = self.component::<Inventory>(actor)?.capacity;
        Ok(self.inventory_len(actor)? >= capacity)
    }

    /// Move `item` into `actor`'s inventory. Only item entities can be
    /// carried; picking up an item already held is a no-op.
    pub fn pick_up(&mut self, actor: NodeId, item: NodeId) -> CoreResult<()> {
        if self.payload::<Entity>(item)?.kind != EntityKind::Item {
            return Err(CoreError::NotAnItem(item));
        }
        let inventory = self.get::<Inventory>(actor)?;
        if self.parent(item) == Some(inventory) {
            return Ok(());
        }
        if self.inventory_is_full(actor)? {
            let capacity = self.payload::<Inventory>(inventory)?.capacity;
            return Err(CoreError::InventoryFull { actor, capacity });
        }
        self.attach(inventory, item)?;
        debug!(%actor, %item, "picked up item");
        Ok(())
    }

    /// Put a carried `item` back on the actor's map, at the actor's position.
    pub fn drop_item(&mut self, actor: NodeId, item: NodeId) -> CoreResult<()> {
        let inventory = self.get::<Inventory>(actor)?;
        if self.parent(item) != Some(inventory) {
            return Err(CoreError::NotHeld { actor, item });
        }
        let map = self.get_parent::<GameMap>(actor)?;
        let (x, y) = self.entity(actor)?.position();
        self.place(item, x, y, Some(map))?;
        debug!(%actor, %item, x, y, "dropped item");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Ai, Fighter};

    fn setup() -> (World, NodeId, NodeId) {
        let mut world = World::new();
        let map = world.insert(GameMap::new(12, 12));
        let actor = world
            .create_actor(
                Entity::new(3, 4, '@', "Player"),
                Ai::controlled(),
                Fighter::new(30, 2, 5),
                Some(Inventory::new(1)),
            )
            .unwrap();
        world.attach(map, actor).unwrap();
        (world, map, actor)
    }

    #[test]
    fn test_pick_up_and_drop() {
        let (mut world, map, actor) = setup();
        let potion = world
            .create_item(Entity::new(3, 4, '!', "Health Potion"), None)
            .unwrap();
        world.attach(map, potion).unwrap();

        world.pick_up(actor, potion).unwrap();
        assert_eq!(world.inventory_items(actor).unwrap(), vec![potion]);
        assert!(!world.children(map).contains(&potion));

        world.entity_mut(actor).unwrap().move_by(1, 1);
        world.drop_item(actor, potion).unwrap();
        assert!(world.inventory_items(actor).unwrap().is_empty());
        assert_eq!(world.parent(potion), Some(map));
        assert_eq!(world.entity(potion).unwrap().position(), (4, 5));
    }

    #[test]
    fn test_pick_up_respects_capacity() {
        let (mut world, _map, actor) = setup();
        let a = world.create_item(Entity::new(0, 0, '!', "a"), None).unwrap();
        let b = world.create_item(Entity::new(0, 0, '!', "b"), None).unwrap();
        world.pick_up(actor, a).unwrap();
        assert_eq!(
            world.pick_up(actor, b),
            Err(CoreError::InventoryFull { actor, capacity: 1 })
        );
    }

    #[test]
    fn test_len_and_is_full() {
        let (mut world, _map, actor) = setup();
        assert_eq!(world.inventory_len(actor), Ok(0));
        assert_eq!(world.inventory_is_full(actor), Ok(false));
        let potion = world.create_item(Entity::new(0, 0, '!', "potion"), None).unwrap();
        world.pick_up(actor, potion).unwrap();
        assert_eq!(world.inventory_len(actor), Ok(1));
        assert_eq!(world.inventory_is_full(actor), Ok(true));
    }

    #[test]
    fn test_pick_up_held_item_is_noop() {
        let (mut world, _map, actor) = setup();
        let potion = world.create_item(Entity::new(0, 0, '!', "potion"), None).unwrap();
        world.pick_up(actor, potion).unwrap();
        // Inventory is at capacity 1, so a second insert would report full
        world.pick_up(actor, potion).unwrap();
        assert_eq!(world.inventory_items(actor).unwrap(), vec![potion]);
    }

    #[test]
    fn test_only_items_can_be_picked_up() {
        let (mut world, map, actor) = setup();
        let orc = world
            .create_actor(
                Entity::new(3, 5, 'o', "Orc"),
                Ai::hostile(),
                Fighter::new(10, 0, 3),
                None,
            )
            .unwrap();
        world.attach(map, orc).unwrap();
        let statue = world.create_entity(Entity::new(3, 5, '&', "Statue"));
        world.attach(map, statue).unwrap();

        assert_eq!(world.pick_up(actor, orc), Err(CoreError::NotAnItem(orc)));
        assert_eq!(world.pick_up(actor, statue), Err(CoreError::NotAnItem(statue)));
        assert_eq!(world.parent(orc), Some(map));
        assert_eq!(world.parent(statue), Some(map));
        assert!(world.inventory_items(actor).unwrap().is_empty());
    }

    #[test]
    fn test_drop_requires_held_item() {
        let (mut world, _map, actor) = setup();
        let loose = world.create_item(Entity::new(0, 0, '!', "loose"), None).unwrap();
        assert_eq!(
            world.drop_item(actor, loose),
            Err(CoreError::NotHeld { actor, item: loose })
        );
    }
}
