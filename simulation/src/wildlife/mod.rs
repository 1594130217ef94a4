use crate::world::{ControlOrder, CreatureEnt, CreatureID, Location, TilePos, World, MAX_LOYALTY};
use prototypes::{try_prototype, SpeciesID, SpeciesPrototype};

/// Builds a fresh creature of the species with its default name and stats,
/// not yet inserted anywhere. This is also what the pet name cache reads
/// throwaway instances from.
pub fn make_creature(proto: &SpeciesPrototype, pos: TilePos) -> CreatureEnt {
    CreatureEnt {
        species: proto.id,
        name: proto.label.clone(),
        location: Location::World(pos),
        home: pos,
        range_home: proto.wander_range,
        loyalty: MAX_LOYALTY,
        stabled: false,
        blessed: false,
        control_master: None,
        summon_master: None,
        control_target: None,
        control_order: ControlOrder::None,
    }
}

pub fn spawn_creature(world: &mut World, species: SpeciesID, pos: TilePos) -> Option<CreatureID> {
    let proto = try_prototype(species)?;
    let id = world.insert(make_creature(proto, pos));
    log::debug!("spawned {} at {} as {:?}", proto.label, pos, id);
    Some(id)
}
