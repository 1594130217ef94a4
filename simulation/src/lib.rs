#![allow(clippy::too_many_arguments)]
#![warn(clippy::iter_over_hash_type)]

use crate::init::{GSYSTEMS, INIT_FUNCS, SAVELOAD_FUNCS};
use crate::utils::resources::{Ref, RefMut, Resources};
use crate::utils::scheduler::RunnableSystem;
use common::saveload::Encoder;
use common::FastMap;
use derive_more::{From, TryInto};
use prototypes::{GameTime, Tick};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::ptr::addr_of;
use std::time::{Duration, Instant};
use utils::scheduler::SeqSchedule;

pub mod economy;
pub mod init;
pub mod souls;
#[cfg(test)]
mod tests;
pub mod utils;
pub mod wildlife;
mod world;

pub use world::*;

const VERSION: &str = include_str!("../../VERSION");

/// Anything that can own money or goods
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash, From, TryInto,
)]
pub enum SoulID {
    Human(HumanID),
    Broker(BrokerID),
}

impl Display for SoulID {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SoulID::Human(id) => write!(f, "{:?}", id),
            SoulID::Broker(id) => write!(f, "{:?}", id),
        }
    }
}

impl From<SoulID> for AnyEntity {
    fn from(value: SoulID) -> Self {
        match value {
            SoulID::Human(id) => AnyEntity::HumanID(id),
            SoulID::Broker(id) => AnyEntity::BrokerID(id),
        }
    }
}

impl TryFrom<AnyEntity> for SoulID {
    type Error = ();

    fn try_from(value: AnyEntity) -> Result<Self, Self::Error> {
        match value {
            AnyEntity::HumanID(id) => Ok(SoulID::Human(id)),
            AnyEntity::BrokerID(id) => Ok(SoulID::Broker(id)),
            _ => Err(()),
        }
    }
}

pub struct Simulation {
    pub(crate) world: World,
    pub(crate) resources: Resources,
}

impl Simulation {
    pub fn schedule() -> SeqSchedule {
        let mut schedule = SeqSchedule::default();
        unsafe {
            for s in &*addr_of!(GSYSTEMS) {
                let s = (s.s)();
                schedule.add_system(s);
            }
        }
        schedule
    }

    pub fn new() -> Simulation {
        let mut sim = Simulation {
            world: Default::default(),
            resources: Default::default(),
        };

        unsafe {
            for s in &*addr_of!(INIT_FUNCS) {
                (s.f)(&mut sim);
            }
        }

        sim
    }

    pub fn world_res(&mut self) -> (&mut World, &mut Resources) {
        (&mut self.world, &mut self.resources)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut_unchecked(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn tick(&mut self, game_schedule: &mut SeqSchedule) -> Duration {
        let t = Instant::now();

        {
            let mut time = self.write::<GameTime>();
            *time = GameTime::new(Tick(time.tick.0 + 1));
        }

        game_schedule.execute(self);

        t.elapsed()
    }

    pub fn get_tick(&self) -> u64 {
        self.resources.read::<GameTime>().tick.0
    }

    pub fn hashes(&self) -> BTreeMap<String, u64> {
        let mut hashes = BTreeMap::new();
        let ser = common::saveload::Bincode::encode(&self.world).unwrap();
        hashes.insert("world".to_string(), common::hash_u64(&*ser));

        unsafe {
            for l in &*addr_of!(SAVELOAD_FUNCS) {
                let v = (l.save)(self);
                hashes.insert(l.name.to_string(), common::hash_u64(&*v));
            }
        }

        hashes
    }

    pub fn load_from_disk(save_name: &str) -> Option<Self> {
        let sim: Simulation = common::saveload::Bincode::load(save_name).ok()?;
        Some(sim)
    }

    pub fn save_to_disk(&self, save_name: &str) {
        common::saveload::Bincode::save(&self, save_name);
    }

    pub fn get<E: EntityID>(&self, id: E) -> Option<&E::Entity> {
        self.world.get(id)
    }

    pub fn contains(&self, id: AnyEntity) -> bool {
        self.world.contains(id)
    }

    pub fn write_or_default<T: Any + Send + Sync + Default>(&mut self) -> RefMut<T> {
        self.resources.write_or_default::<T>()
    }

    pub fn try_write<T: Any + Send + Sync>(&self) -> Option<RefMut<T>> {
        self.resources.try_write().ok()
    }

    pub fn write<T: Any + Send + Sync>(&self) -> RefMut<T> {
        self.resources.write()
    }

    pub fn read<T: Any + Send + Sync>(&self) -> Ref<T> {
        self.resources.read()
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, res: T) {
        self.resources.insert(res);
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Simulation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        log::info!("serializing sim state");
        let mut m: FastMap<String, Vec<u8>> = FastMap::default();

        unsafe {
            for l in &*addr_of!(SAVELOAD_FUNCS) {
                let v: Vec<u8> = (l.save)(self);
                m.insert(l.name.to_string(), v);
            }
        }

        SimulationSer {
            world: &self.world,
            version: VERSION.to_string(),
            res: m,
        }
        .serialize(serializer)
    }
}

#[derive(Serialize)]
struct SimulationSer<'a> {
    world: &'a World,
    version: String,
    res: FastMap<String, Vec<u8>>,
}

#[derive(Deserialize)]
struct SimulationDeser {
    world: World,
    version: String,
    res: FastMap<String, Vec<u8>>,
}

impl<'de> Deserialize<'de> for Simulation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        log::info!("deserializing sim state");

        let mut simdeser = <SimulationDeser as Deserialize>::deserialize(deserializer)?;

        let cur_version_parts = VERSION.split('.').collect::<Vec<_>>();
        let deser_parts = simdeser.version.split('.').collect::<Vec<_>>();

        if cur_version_parts[0] != deser_parts[0]
            || (cur_version_parts[0] == "0" && cur_version_parts[1] != deser_parts[1])
        {
            log::warn!(
                "incompatible version, save might be corrupted! save is: {} - game is: {}",
                simdeser.version,
                VERSION
            );
        }

        let mut sim = Self {
            world: World::default(),
            resources: Resources::default(),
        };

        unsafe {
            for s in &*addr_of!(INIT_FUNCS) {
                (s.f)(&mut sim);
            }
        }

        sim.world = simdeser.world;

        unsafe {
            for l in &*addr_of!(SAVELOAD_FUNCS) {
                if let Some(data) = simdeser.res.remove(l.name) {
                    (l.load)(&mut sim, data);
                }
            }
        }

        // pet listings survive the save, the deferred cleanup they imply does not
        let (world, resources) = sim.world_res();
        crate::economy::reload_pet_listings(world, resources);

        Ok(sim)
    }
}
