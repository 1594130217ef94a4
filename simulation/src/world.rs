use crate::economy::{CommodityLedgerEntry, PetListingEntry};
use crate::impl_entity;
use derive_more::{From, TryInto};
use prototypes::{Money, SpeciesID};
use serde::{Deserialize, Serialize};
use slotmapd::{new_key_type, HopSlotMap};
use std::fmt::{Display, Formatter};

new_key_type! {
    pub struct BrokerID;
    pub struct HumanID;
    pub struct CreatureID;
}

impl_entity!(BrokerID, BrokerEnt, brokers);
impl_entity!(HumanID, HumanEnt, humans);
impl_entity!(CreatureID, CreatureEnt, creatures);

#[derive(PartialEq, Eq, Copy, Clone, Debug, From, TryInto)]
pub enum AnyEntity {
    BrokerID(BrokerID),
    HumanID(HumanID),
    CreatureID(CreatureID),
}

pub const MAX_LOYALTY: u8 = 100;

/// Tile coordinates on the game map
#[derive(Default, PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const ZERO: TilePos = TilePos { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Display for TilePos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Where a creature currently lives. `Internal` is the off-map holding area:
/// the creature still exists and keeps its state but has no map position.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum Location {
    World(TilePos),
    Internal,
}

/// Standing order given to a controlled creature
#[derive(Default, PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum ControlOrder {
    #[default]
    None,
    Stay,
    Follow,
    Guard,
}

#[derive(Serialize, Deserialize)]
pub struct BrokerEnt {
    pub name: String,
    /// Funds the broker can spend buying goods from players
    pub bank: Money,
    pub ledger: Vec<CommodityLedgerEntry>,
    pub pets: Vec<PetListingEntry>,
}

#[derive(Serialize, Deserialize)]
pub struct HumanEnt {
    pub name: String,
    pub pos: TilePos,
}

#[derive(Serialize, Deserialize)]
pub struct CreatureEnt {
    pub species: SpeciesID,
    pub name: String,
    pub location: Location,

    pub home: TilePos,
    pub range_home: u32,

    pub loyalty: u8,
    pub stabled: bool,
    pub blessed: bool,

    pub control_master: Option<HumanID>,
    pub summon_master: Option<HumanID>,
    pub control_target: Option<CreatureID>,
    pub control_order: ControlOrder,
}

#[derive(Default, Serialize, Deserialize)]
pub struct World {
    pub brokers: HopSlotMap<BrokerID, BrokerEnt>,
    pub humans: HopSlotMap<HumanID, HumanEnt>,
    pub creatures: HopSlotMap<CreatureID, CreatureEnt>,
}

impl World {
    pub fn get<E: EntityID>(&self, id: E) -> Option<&E::Entity> {
        <<E as EntityID>::Entity as Entity>::storage(self).get(id)
    }

    pub fn get_mut<E: EntityID>(&mut self, id: E) -> Option<&mut E::Entity> {
        <<E as EntityID>::Entity as Entity>::storage_mut(self).get_mut(id)
    }

    pub fn storage<E: Entity>(&self) -> &HopSlotMap<E::ID, E> {
        E::storage(self)
    }

    pub fn storage_id<E: EntityID>(&self, _: E) -> &HopSlotMap<E, E::Entity> {
        E::Entity::storage(self)
    }

    pub fn insert<E: Entity>(&mut self, e: E) -> E::ID {
        E::storage_mut(self).insert(e)
    }

    pub fn contains(&self, id: AnyEntity) -> bool {
        match id {
            AnyEntity::BrokerID(id) => self.storage_id(id).contains_key(id),
            AnyEntity::HumanID(id) => self.storage_id(id).contains_key(id),
            AnyEntity::CreatureID(id) => self.storage_id(id).contains_key(id),
        }
    }

    /// None when the broker is gone, its funds are then unknown
    pub fn broker_funds(&self, id: BrokerID) -> Option<Money> {
        self.brokers.get(id).map(|b| b.bank)
    }
}

/// A trait that describes an entity, therefore having storage within the world
pub trait Entity: 'static + Sized + Send {
    type ID: EntityID<Entity = Self>;

    fn storage(w: &World) -> &HopSlotMap<Self::ID, Self>;
    fn storage_mut(w: &mut World) -> &mut HopSlotMap<Self::ID, Self>;
}

/// A trait that describes an entity id to be able to find an Entity from an ID
pub trait EntityID: 'static + slotmapd::Key + Send {
    type Entity: Entity<ID = Self>;
}

mod macros {
    #[macro_export]
    macro_rules! impl_entity {
        ($id:ty, $obj:ty, $s:ident) => {
            impl Entity for $obj {
                type ID = $id;

                fn storage(w: &World) -> &HopSlotMap<Self::ID, Self> {
                    &w.$s
                }

                fn storage_mut(w: &mut World) -> &mut HopSlotMap<Self::ID, Self> {
                    &mut w.$s
                }
            }

            impl EntityID for $id {
                type Entity = $obj;
            }
        };
    }
}

impl Display for AnyEntity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AnyEntity::BrokerID(id) => write!(f, "{:?}", id),
            AnyEntity::HumanID(id) => write!(f, "{:?}", id),
            AnyEntity::CreatureID(id) => write!(f, "{:?}", id),
        }
    }
}
