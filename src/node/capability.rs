//! Closed set of payloads a node can carry, and the type-to-kind mapping used
//! by capability lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::{Ai, Consumable, Fighter, Inventory};
use crate::engine::Engine;
use crate::entity::Entity;
use crate::map::GameMap;

/// Tag identifying which payload a node carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CapabilityKind {
    Engine,
    GameMap,
    Entity,
    Ai,
    Fighter,
    Inventory,
    Consumable,
}

impl CapabilityKind {
    /// Unique kinds may appear at most once among a node's direct children.
    /// Attaching a second one replaces the first.
    pub fn is_unique(&self) -> bool {
        matches!(
            self,
            Self::Ai | Self::Fighter | Self::Inventory | Self::Consumable
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engine => "Engine",
            Self::GameMap => "GameMap",
            Self::Entity => "Entity",
            Self::Ai => "Ai",
            Self::Fighter => "Fighter",
            Self::Inventory => "Inventory",
            Self::Consumable => "Consumable",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload owned by a node.
#[derive(Debug, Clone)]
pub enum Capability {
    Engine(Engine),
    GameMap(GameMap),
    Entity(Entity),
    Ai(Ai),
    Fighter(Fighter),
    Inventory(Inventory),
    Consumable(Consumable),
}

impl Capability {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Self::Engine(_) => CapabilityKind::Engine,
            Self::GameMap(_) => CapabilityKind::GameMap,
            Self::Entity(_) => CapabilityKind::Entity,
            Self::Ai(_) => CapabilityKind::Ai,
            Self::Fighter(_) => CapabilityKind::Fighter,
            Self::Inventory(_) => CapabilityKind::Inventory,
            Self::Consumable(_) => CapabilityKind::Consumable,
        }
    }
}

/// A Rust type that can live in a node payload.
///
/// Lookups such as `World::get_parent::<Engine>(id)` are keyed on
/// [`NodeData::KIND`].
pub trait NodeData: Sized + Into<Capability> {
    const KIND: CapabilityKind;

    fn from_capability(capability: &Capability) -> Option<&Self>;

    fn from_capability_mut(capability: &mut Capability) -> Option<&mut Self>;
}

macro_rules! node_data {
    ($ty:ty, $variant:ident) => {
        impl NodeData for $ty {
            const KIND: CapabilityKind = CapabilityKind::$variant;

            fn from_capability(capability: &Capability) -> Option<&Self> {
                match capability {
                    Capability::$variant(value) => Some(value),
                    _ => None,
                }
            }

            fn from_capability_mut(capability: &mut Capability) -> Option<&mut Self> {
                match capability {
                    Capability::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Capability {
            fn from(value: $ty) -> Self {
                Capability::$variant(value)
            }
        }
    };
}

node_data!(Engine, Engine);
node_data!(GameMap, GameMap);
node_data!(Entity, Entity);
node_data!(Ai, Ai);
node_data!(Fighter, Fighter);
node_data!(Inventory, Inventory);
node_data!(Consumable, Consumable);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_kinds() {
        assert!(CapabilityKind::Ai.is_unique());
        assert!(CapabilityKind::Fighter.is_unique());
        assert!(CapabilityKind::Inventory.is_unique());
        assert!(CapabilityKind::Consumable.is_unique());
        assert!(!CapabilityKind::Entity.is_unique());
        assert!(!CapabilityKind::GameMap.is_unique());
        assert!(!CapabilityKind::Engine.is_unique());
    }

    #[test]
    fn test_kind_roundtrip_through_capability() {
        let cap: Capability = Fighter::new(10, 1, 3).into();
        assert_eq!(cap.kind(), CapabilityKind::Fighter);
        assert!(Fighter::from_capability(&cap).is_some());
        assert!(Ai::from_capability(&cap).is_none());
    }
}
