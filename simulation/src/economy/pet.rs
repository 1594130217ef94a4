use crate::utils::deferred::{DeferredTask, DeferredTasks};
use crate::utils::resources::Resources;
use crate::wildlife::make_creature;
use crate::world::{ControlOrder, CreatureEnt, CreatureID, Location, TilePos, World, MAX_LOYALTY};
use common::TransparentMap;
use prototypes::{try_prototype, GameDuration, Money, SpeciesID};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const LISTING_VERSION: u32 = 0;

pub const DEFAULT_PET_PRICE: Money = Money::new_bucks(1000);

/// Delay between reloading a pet listing and pulling the pet off the map, so
/// anything still pointing at its old position settles first.
pub const PET_INTERNALIZE_GRACE: GameDuration = GameDuration::from_secs(10);

/// A live pet put up for sale at a broker. The creature itself stays in the
/// world, the listing only points at it.
#[derive(Clone, Debug)]
pub struct PetListingEntry {
    pet: CreatureID,
    pub sale_price: Money,
    /// Default display name of the species, shown to buyers instead of
    /// whatever the seller renamed the pet to
    pub type_name: String,
}

impl PetListingEntry {
    pub fn new(
        pet: CreatureID,
        creature: &CreatureEnt,
        price: Option<Money>,
        names: &mut PetNameCache,
    ) -> Self {
        Self {
            pet,
            sale_price: price.unwrap_or(DEFAULT_PET_PRICE),
            type_name: names.original_name(creature.species),
        }
    }

    pub fn pet(&self) -> CreatureID {
        self.pet
    }

    /// Severs the pet from whoever controlled it and moves it to the off-map
    /// holding area. Already internal pets are left untouched.
    pub fn internalize(&self, c: &mut CreatureEnt) {
        internalize(c);
    }
}

fn internalize(c: &mut CreatureEnt) {
    if c.location == Location::Internal {
        return;
    }

    c.control_target = None;
    c.control_order = ControlOrder::Stay;
    c.location = Location::Internal;

    c.control_master = None;
    c.summon_master = None;

    c.stabled = true;
    c.loyalty = MAX_LOYALTY;

    c.home = TilePos::ZERO;
    c.range_home = 10;
    c.blessed = false;
}

impl Serialize for PetListingEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (LISTING_VERSION, self.pet, self.sale_price, &self.type_name).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PetListingEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (version, pet, sale_price, type_name): (u32, CreatureID, Money, String) =
            Deserialize::deserialize(deserializer)?;

        if version != LISTING_VERSION {
            return Err(D::Error::custom(format!(
                "unknown pet listing version {} (expected {})",
                version, LISTING_VERSION
            )));
        }

        Ok(Self {
            pet,
            sale_price,
            type_name,
        })
    }
}

/// Default display name of each species, filled lazily. Finding a name on a
/// cache miss builds one throwaway creature through the species factory, so
/// that cost is paid at most once per species per process.
#[derive(Default, Serialize, Deserialize)]
pub struct PetNameCache {
    names: TransparentMap<SpeciesID, String>,
}

impl PetNameCache {
    /// First registration wins, empty names are ignored
    pub fn register(&mut self, species: SpeciesID, name: &str) {
        if name.is_empty() {
            return;
        }
        self.names
            .entry(species)
            .or_insert_with(|| name.to_string());
    }

    pub fn get(&self, species: SpeciesID) -> Option<&str> {
        self.names.get(&species).map(|s| s.as_str())
    }

    pub fn original_name(&mut self, species: SpeciesID) -> String {
        if let Some(name) = self.names.get(&species) {
            return name.clone();
        }

        let Some(proto) = try_prototype(species) else {
            log::warn!("no prototype to name species {:?}", species);
            return format!("{:?}", species);
        };

        let scratch = make_creature(proto, TilePos::ZERO);
        self.register(species, &scratch.name);
        scratch.name
    }
}

/// Runs the deferred internalizes that came due this tick. A task whose pet
/// no longer exists is dropped silently, the sale or release that removed the
/// pet already did the cleanup.
pub fn pet_internalize_system(world: &mut World, resources: &mut Resources) {
    let now = resources.tick();
    let mut tasks = resources.write::<DeferredTasks>();

    for task in tasks.drain_due(now) {
        match task {
            DeferredTask::InternalizePet { pet } => {
                let Some(c) = world.creatures.get_mut(pet) else {
                    log::debug!("deferred internalize: pet {:?} is gone", pet);
                    continue;
                };
                internalize(c);
            }
        }
    }
}

/// Post-load fixup for pet listings: re-registers species names, re-marks
/// every listed pet as stabled and schedules its internalize after the grace
/// window. Runs on every load, internalize being idempotent makes it safe.
pub fn reload_pet_listings(world: &mut World, resources: &mut Resources) {
    let now = resources.tick();
    let mut names = resources.write::<PetNameCache>();
    let mut tasks = resources.write::<DeferredTasks>();

    let World {
        brokers, creatures, ..
    } = world;

    for (broker_id, broker) in brokers.iter() {
        for listing in &broker.pets {
            let Some(c) = creatures.get_mut(listing.pet) else {
                log::warn!(
                    "{:?} lists pet {:?} which no longer exists",
                    broker_id,
                    listing.pet
                );
                continue;
            };

            names.register(c.species, &listing.type_name);
            c.stabled = true;
            tasks.schedule_after(
                now,
                PET_INTERNALIZE_GRACE,
                DeferredTask::InternalizePet { pet: listing.pet },
            );
        }
    }
}
