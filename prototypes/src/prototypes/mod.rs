mod item;
mod species;

pub use item::*;
pub use species::*;

use serde::{Deserialize, Serialize};

/// Fields every prototype shares
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrototypeBase {
    /// Stable identifier, hashed into the prototype id. Never shown to players.
    pub name: String,
    /// Human readable label
    pub label: String,
}

crate::prototype_id!(ItemID => ItemPrototype);
crate::prototype_id!(SpeciesID => SpeciesPrototype);
