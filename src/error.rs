//! Structural errors raised by the node graph, entities, actions and the map
//! generator.
//!
//! Raw grid reads (`GameMap::is_blocked`, `GameMap::content_at`) never return
//! these: callers check `in_bounds` first.

use crate::node::{CapabilityKind, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Missing capability: {kind} not found for {node}")]
    MissingCapability { node: NodeId, kind: CapabilityKind },

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Cycle rejected: {child} is an ancestor of {parent}")]
    CycleRejected { parent: NodeId, child: NodeId },

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Wrong kind: {node} holds {found}, expected {expected}")]
    WrongKind {
        node: NodeId,
        expected: CapabilityKind,
        found: CapabilityKind,
    },

    #[error("Not an actor: {0}")]
    NotAnActor(NodeId),

    #[error("Not an item: {0} cannot be carried")]
    NotAnItem(NodeId),

    #[error("Inventory full: {actor} already holds {capacity} items")]
    InventoryFull { actor: NodeId, capacity: usize },

    #[error("Not held: {item} is not in the inventory of {actor}")]
    NotHeld { actor: NodeId, item: NodeId },

    #[error("Invalid map dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: i32,
        height: i32,
        reason: String,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;
