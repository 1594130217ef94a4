use crate::prototypes::PrototypeBase;
use crate::{Prototype, Prototypes, SpeciesID};
use common::TransparentMap;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Species is the runtime representation of a creature kind, such as a horse
/// or a dire wolf. The label is the default name a freshly made creature of
/// that species carries.
#[derive(Clone, Debug)]
pub struct SpeciesPrototype {
    pub id: SpeciesID,
    pub base: PrototypeBase,
    /// Default wander range around home, in tiles
    pub wander_range: u32,
}

/// The data-file form of a species prototype
#[derive(Serialize, Deserialize)]
pub struct SpeciesPrototypeJSON {
    #[serde(flatten)]
    pub base: PrototypeBase,
    #[serde(default = "default_wander_range")]
    pub wander_range: u32,
}

fn default_wander_range() -> u32 {
    10
}

impl SpeciesPrototype {
    pub(crate) fn from_json(json: SpeciesPrototypeJSON) -> Self {
        Self {
            id: SpeciesID::new(&json.base.name),
            base: json.base,
            wander_range: json.wander_range,
        }
    }

    #[inline]
    pub fn iter() -> impl Iterator<Item = &'static Self> {
        crate::prototypes_iter::<Self>()
    }
}

impl Deref for SpeciesPrototype {
    type Target = PrototypeBase;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl Prototype for SpeciesPrototype {
    type ID = SpeciesID;
    const KIND: &'static str = "species";

    fn id(&self) -> Self::ID {
        self.id
    }

    fn name(&self) -> &str {
        &self.base.name
    }

    fn storage(p: &Prototypes) -> &TransparentMap<Self::ID, Self> {
        &p.species
    }

    fn storage_mut(p: &mut Prototypes) -> &mut TransparentMap<Self::ID, Self> {
        &mut p.species
    }
}
