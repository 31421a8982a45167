//! Capabilities attachable to entity nodes.
//!
//! These carry data only. Deciding what an AI does, how damage is computed or
//! what a consumable does when used belongs to gameplay code outside this
//! crate.

pub mod inventory;

use serde::{Deserialize, Serialize};

pub use inventory::Inventory;

/// AI capability. An actor is alive for as long as one is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ai {
    pub kind: AiKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiKind {
    Hostile,
    /// Player-driven; turns come from the input collaborator
    Controlled,
    Confused {
        turns_remaining: u32,
        previous: Box<AiKind>,
    },
}

impl Ai {
    pub fn new(kind: AiKind) -> Self {
        Self { kind }
    }

    pub fn hostile() -> Self {
        Self::new(AiKind::Hostile)
    }

    pub fn controlled() -> Self {
        Self::new(AiKind::Controlled)
    }

    /// Wrap the current behavior in a confusion that lasts `turns` turns.
    pub fn confuse(&mut self, turns: u32) {
        let previous = std::mem::replace(&mut self.kind, AiKind::Hostile);
        self.kind = AiKind::Confused {
            turns_remaining: turns,
            previous: Box::new(previous),
        };
    }
}

/// Combat stats capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub max_hp: i32,
    hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Fighter {
    pub fn new(hp: i32, defense: i32, power: i32) -> Self {
        Self {
            max_hp: hp,
            hp,
            defense,
            power,
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Clamped to `0..=max_hp`
    pub fn set_hp(&mut self, value: i32) {
        self.hp = value.clamp(0, self.max_hp.max(0));
    }
}

/// Consumable capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumable {
    pub kind: ConsumableKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConsumableKind {
    Healing { amount: i32 },
    Lightning { damage: i32, maximum_range: i32 },
    Confusion { number_of_turns: u32 },
    Fireball { damage: i32, radius: i32 },
}

impl Consumable {
    pub fn new(kind: ConsumableKind) -> Self {
        Self { kind }
    }
}
