//! Prototypes are the static descriptions of the kinds of things that exist
//! in the game: tradable commodities and creature species. They are loaded
//! once per process from a data file and immutable afterwards.
//!
//! A prototype id is the hash of its stable name, so persisting the name and
//! re-hashing it on load is enough to find the kind again.

use common::TransparentMap;

mod load;
mod macros;
mod prototypes;
mod types;

#[cfg(test)]
mod tests;

pub use load::*;
pub use prototypes::*;
pub use types::*;

/// The description of one kind of thing, parsed from the data file.
pub trait Prototype: 'static + Sized {
    type ID: PrototypeID<Prototype = Self>;

    /// The key under which this prototype family appears in the data file
    const KIND: &'static str;

    fn id(&self) -> Self::ID;
    fn name(&self) -> &str;

    fn storage(p: &Prototypes) -> &TransparentMap<Self::ID, Self>;
    fn storage_mut(p: &mut Prototypes) -> &mut TransparentMap<Self::ID, Self>;
}

/// An id that knows which prototype family it belongs to
pub trait PrototypeID: 'static + Copy + Eq + std::hash::Hash + std::fmt::Debug {
    type Prototype: Prototype<ID = Self>;
}

#[derive(Default)]
pub struct Prototypes {
    pub(crate) items: TransparentMap<ItemID, ItemPrototype>,
    pub(crate) species: TransparentMap<SpeciesID, SpeciesPrototype>,
}

impl Prototypes {
    pub(crate) fn print_stats(&self) {
        if self.items.is_empty() {
            log::warn!("no {} loaded", ItemPrototype::KIND);
        } else {
            log::info!("loaded {} {}", self.items.len(), ItemPrototype::KIND);
        }
        if self.species.is_empty() {
            log::warn!("no {} loaded", SpeciesPrototype::KIND);
        } else {
            log::info!("loaded {} {}", self.species.len(), SpeciesPrototype::KIND);
        }
    }
}

static mut PROTOTYPES: Option<&'static Prototypes> = None;

#[inline]
fn try_prototypes() -> Option<&'static Prototypes> {
    // Safety: only mutated by load_prototypes, before anything reads it
    unsafe { PROTOTYPES }
}

#[inline]
fn prototypes() -> &'static Prototypes {
    try_prototypes().expect("prototypes were not loaded")
}

#[inline]
pub fn try_prototype<ID: PrototypeID>(id: ID) -> Option<&'static ID::Prototype> {
    ID::Prototype::storage(try_prototypes()?).get(&id)
}

#[inline]
pub fn prototype<ID: PrototypeID>(id: ID) -> &'static ID::Prototype {
    match try_prototype(id) {
        Some(x) => x,
        None => panic!("no prototype for id {:?}", id),
    }
}

pub fn prototypes_iter<T: Prototype>() -> impl Iterator<Item = &'static T> {
    T::storage(prototypes()).values()
}

pub fn prototypes_iter_ids<T: Prototype>() -> impl Iterator<Item = T::ID> {
    T::storage(prototypes()).keys().copied()
}
