//! Node composition arena.
//!
//! Every engine, map, entity and capability is a node in a [`World`]. A node
//! has at most one parent and an ordered list of children, and carries one
//! [`Capability`] payload. Gameplay code finds behavior by walking the graph:
//! up through ancestors (`get_parent`) or across direct children (`get`).
//!
//! The graph is a forest. `attach` rejects any link that would make a node its
//! own ancestor.

pub mod capability;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{CoreError, CoreResult};

pub use capability::{Capability, CapabilityKind, NodeData};

/// Generational handle to a node. A handle to a despawned node never resolves
/// to a node created later in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({}v{})", self.index, self.generation)
    }
}

/// A single node: parent link, children, payload.
#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    payload: Capability,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn payload(&self) -> &Capability {
        &self.payload
    }

    pub fn kind(&self) -> CapabilityKind {
        self.payload.kind()
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena owning every node.
#[derive(Debug, Clone, Default)]
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Create a detached root node carrying `payload`.
    pub fn insert(&mut self, payload: impl Into<Capability>) -> NodeId {
        let node = Node {
            parent: None,
            children: Vec::new(),
            payload: payload.into(),
        };
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    pub fn node(&self, id: NodeId) -> CoreResult<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(CoreError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> CoreResult<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(CoreError::UnknownNode(id))
    }

    pub fn kind_of(&self, id: NodeId) -> Option<CapabilityKind> {
        self.node(id).ok().map(Node::kind)
    }

    /// True if `id` is live and carries a `T` payload.
    pub fn is<T: NodeData>(&self, id: NodeId) -> bool {
        self.kind_of(id) == Some(T::KIND)
    }

    /// Typed payload of the node itself.
    pub fn payload<T: NodeData>(&self, id: NodeId) -> CoreResult<&T> {
        let node = self.node(id)?;
        T::from_capability(&node.payload).ok_or(CoreError::WrongKind {
            node: id,
            expected: T::KIND,
            found: node.kind(),
        })
    }

    pub fn payload_mut<T: NodeData>(&mut self, id: NodeId) -> CoreResult<&mut T> {
        let node = self.node_mut(id)?;
        let found = node.kind();
        T::from_capability_mut(&mut node.payload).ok_or(CoreError::WrongKind {
            node: id,
            expected: T::KIND,
            found,
        })
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok().and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    /// Walks from `id` itself up to its root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            world: self,
            next: self.contains(id).then_some(id),
        }
    }

    /// Link `child` under `parent`, unlinking it from any previous parent.
    ///
    /// If `child` carries a unique capability kind, an existing direct child
    /// of `parent` with the same kind is despawned first.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> CoreResult<()> {
        self.node(parent)?;
        let kind = self.node(child)?.kind();

        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(CoreError::CycleRejected { parent, child });
        }
        if self.parent(child) == Some(parent) {
            return Ok(());
        }

        self.detach(child)?;

        if kind.is_unique() {
            let existing = self
                .children(parent)
                .iter()
                .copied()
                .find(|&sibling| self.kind_of(sibling) == Some(kind));
            if let Some(replaced) = existing {
                trace!(%parent, %replaced, %kind, "replacing capability");
                self.despawn(replaced)?;
            }
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        trace!(%parent, %child, %kind, "attached node");
        Ok(())
    }

    /// Unlink `child` from its parent. No-op for roots.
    pub fn detach(&mut self, child: NodeId) -> CoreResult<()> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };
        if let Ok(parent_node) = self.node_mut(parent) {
            parent_node.children.retain(|&c| c != child);
        }
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    /// Destroy `id` and its whole subtree.
    pub fn despawn(&mut self, id: NodeId) -> CoreResult<()> {
        self.detach(id)?;

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index as usize];
            if slot.generation != current.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                self.live -= 1;
                stack.extend(node.children);
            }
        }
        trace!(node = %id, "despawned subtree");
        Ok(())
    }

    /// Nearest node carrying `T`, starting at `id` itself and walking up.
    pub fn get_parent_or_none<T: NodeData>(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|&ancestor| self.is::<T>(ancestor))
    }

    pub fn get_parent<T: NodeData>(&self, id: NodeId) -> CoreResult<NodeId> {
        self.node(id)?;
        self.get_parent_or_none::<T>(id)
            .ok_or(CoreError::MissingCapability {
                node: id,
                kind: T::KIND,
            })
    }

    /// Most recently attached direct child carrying `T`.
    pub fn try_get<T: NodeData>(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .iter()
            .rev()
            .copied()
            .find(|&child| self.is::<T>(child))
    }

    pub fn get<T: NodeData>(&self, id: NodeId) -> CoreResult<NodeId> {
        self.node(id)?;
        self.try_get::<T>(id).ok_or(CoreError::MissingCapability {
            node: id,
            kind: T::KIND,
        })
    }

    /// Payload of the direct child capability `T`.
    pub fn component<T: NodeData>(&self, id: NodeId) -> CoreResult<&T> {
        let child = self.get::<T>(id)?;
        self.payload::<T>(child)
    }

    pub fn component_mut<T: NodeData>(&mut self, id: NodeId) -> CoreResult<&mut T> {
        let child = self.get::<T>(id)?;
        self.payload_mut::<T>(child)
    }

    pub fn try_component<T: NodeData>(&self, id: NodeId) -> Option<&T> {
        self.try_get::<T>(id)
            .and_then(|child| self.payload::<T>(child).ok())
    }

    /// Attach `capability` as a fresh child of `id`, returning the new node.
    pub fn add_component<T: NodeData>(&mut self, id: NodeId, capability: T) -> CoreResult<NodeId> {
        self.node(id)?;
        let child = self.insert(capability);
        self.attach(id, child)?;
        Ok(child)
    }

    /// Despawn the direct child capability `T`. Returns whether one existed.
    pub fn remove<T: NodeData>(&mut self, id: NodeId) -> CoreResult<bool> {
        self.node(id)?;
        match self.try_get::<T>(id) {
            Some(child) => {
                self.despawn(child)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Copy the subtree rooted at `id`. The copy is a detached root sharing no
    /// nodes with the source.
    pub fn deep_clone(&mut self, id: NodeId) -> CoreResult<NodeId> {
        let payload = self.node(id)?.payload.clone();
        let root = self.insert(payload);

        let mut stack = vec![(id, root)];
        while let Some((source, copy)) = stack.pop() {
            let children = self.node(source)?.children.clone();
            for child in children {
                let payload = self.node(child)?.payload.clone();
                let child_copy = self.insert(payload);
                self.node_mut(child_copy)?.parent = Some(copy);
                self.node_mut(copy)?.children.push(child_copy);
                stack.push((child, child_copy));
            }
        }
        trace!(source = %id, copy = %root, "cloned subtree");
        Ok(root)
    }
}

/// Iterator returned by [`World::ancestors`].
pub struct Ancestors<'w> {
    world: &'w World,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.world.parent(current);
        Some(current)
    }
}
