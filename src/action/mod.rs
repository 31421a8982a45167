//! Action command objects.
//!
//! An action binds the actor that performs it. Anything else it needs (the
//! engine, the active map, other entities) is found through the actor's place
//! in the node graph at the moment the action is performed.

use tracing::trace;

use crate::engine::Engine;
use crate::error::{CoreError, CoreResult};
use crate::node::{NodeId, World};

pub trait Action {
    /// The actor performing this action
    fn entity(&self) -> NodeId;

    /// Engine owning the actor's tree
    fn engine(&self, world: &World) -> CoreResult<NodeId> {
        world.get_parent::<Engine>(self.entity())
    }

    /// Apply the action to the world. Legality checks are the implementor's
    /// job.
    fn perform(&self, world: &mut World) -> CoreResult<()>;
}

/// Pass the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    pub entity: NodeId,
}

impl Wait {
    pub fn new(entity: NodeId) -> Self {
        Self { entity }
    }
}

impl Action for Wait {
    fn entity(&self) -> NodeId {
        self.entity
    }

    fn perform(&self, _world: &mut World) -> CoreResult<()> {
        trace!(entity = %self.entity, "wait");
        Ok(())
    }
}

/// An action aimed at the tile `(dx, dy)` away from the actor.
///
/// Movement, melee and bump actions wrap this and supply their own `perform`;
/// performing the bare directed action fails with `NotImplemented`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectedAction {
    pub entity: NodeId,
    pub dx: i32,
    pub dy: i32,
}

impl DirectedAction {
    pub fn new(entity: NodeId, dx: i32, dy: i32) -> Self {
        Self { entity, dx, dy }
    }

    /// Destination tile
    pub fn dest_xy(&self, world: &World) -> CoreResult<(i32, i32)> {
        let entity = world.entity(self.entity)?;
        Ok((entity.x + self.dx, entity.y + self.dy))
    }

    /// Entity at the destination that blocks movement, if any.
    pub fn blocking_entity(&self, world: &World) -> CoreResult<Option<NodeId>> {
        let (x, y) = self.dest_xy(world)?;
        let map = world.active_map(self.engine(world)?)?;
        world.blocking_entity_at(map, x, y)
    }

    /// Actor at the destination, if any.
    pub fn target_actor(&self, world: &World) -> CoreResult<Option<NodeId>> {
        let (x, y) = self.dest_xy(world)?;
        let map = world.active_map(self.engine(world)?)?;
        world.actor_at_location(map, x, y)
    }
}

impl Action for DirectedAction {
    fn entity(&self) -> NodeId {
        self.entity
    }

    fn perform(&self, _world: &mut World) -> CoreResult<()> {
        Err(CoreError::NotImplemented("DirectedAction::perform"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Ai, Fighter};
    use crate::config::GeneratorParams;
    use crate::entity::Entity;
    use crate::map::GameMap;
    use crate::node::CapabilityKind;

    fn world_with_actor() -> (World, NodeId, NodeId, NodeId) {
        let mut world = World::new();
        let engine = world.create_engine(Engine::new(42, GeneratorParams::default()));
        let map = world.insert(GameMap::new(20, 20));
        world.attach(engine, map).unwrap();
        let actor = world
            .create_actor(
                Entity::new(0, 0, '@', "Player"),
                Ai::controlled(),
                Fighter::new(30, 2, 5),
                None,
            )
            .unwrap();
        world.place(actor, 5, 5, Some(map)).unwrap();
        (world, engine, map, actor)
    }

    #[test]
    fn test_engine_resolves_through_ancestry() {
        let (world, engine, _map, actor) = world_with_actor();
        assert_eq!(Wait::new(actor).engine(&world), Ok(engine));
    }

    #[test]
    fn test_engine_missing_when_detached() {
        let (mut world, _engine, _map, actor) = world_with_actor();
        world.place(actor, 5, 5, None).unwrap();
        assert_eq!(
            Wait::new(actor).engine(&world),
            Err(CoreError::MissingCapability {
                node: actor,
                kind: CapabilityKind::Engine
            })
        );
    }

    #[test]
    fn test_wait_changes_nothing() {
        let (mut world, _engine, _map, actor) = world_with_actor();
        let before = world.entity(actor).unwrap().clone();
        let nodes = world.len();
        Wait::new(actor).perform(&mut world).unwrap();
        assert_eq!(world.entity(actor).unwrap(), &before);
        assert_eq!(world.len(), nodes);
    }

    #[test]
    fn test_directed_action_dest_and_blocker() {
        let (mut world, _engine, map, actor) = world_with_actor();
        let action = DirectedAction::new(actor, 1, 0);
        assert_eq!(action.dest_xy(&world), Ok((6, 5)));

        world.index_entities(map).unwrap();
        assert_eq!(action.blocking_entity(&world), Ok(None));
        assert_eq!(action.target_actor(&world), Ok(None));

        let boulder = world.create_entity(Entity::new(6, 5, '0', "Boulder").with_blocks_movement(true));
        world.attach(map, boulder).unwrap();
        world.index_entities(map).unwrap();
        assert_eq!(action.blocking_entity(&world), Ok(Some(boulder)));
        assert_eq!(action.target_actor(&world), Ok(None));
    }

    #[test]
    fn test_bump_off_map_edge_finds_nothing() {
        let (mut world, _engine, map, actor) = world_with_actor();
        let orc = world
            .create_actor(
                Entity::new(0, 0, 'o', "Orc"),
                Ai::hostile(),
                Fighter::new(10, 0, 3),
                None,
            )
            .unwrap();
        world.place(orc, 19, 4, Some(map)).unwrap();
        world.place(actor, 0, 5, Some(map)).unwrap();
        world.index_entities(map).unwrap();

        let west = DirectedAction::new(actor, -1, 0);
        assert_eq!(west.dest_xy(&world), Ok((-1, 5)));
        assert_eq!(west.target_actor(&world), Ok(None));
        assert_eq!(west.blocking_entity(&world), Ok(None));

        world.place(actor, 0, 0, Some(map)).unwrap();
        let north_west = DirectedAction::new(actor, -1, -1);
        assert_eq!(north_west.target_actor(&world), Ok(None));
        assert_eq!(north_west.blocking_entity(&world), Ok(None));
    }

    #[test]
    fn test_bare_directed_action_not_implemented() {
        let (mut world, _engine, _map, actor) = world_with_actor();
        let result = DirectedAction::new(actor, 0, 1).perform(&mut world);
        assert_eq!(
            result,
            Err(CoreError::NotImplemented("DirectedAction::perform"))
        );
    }
}
