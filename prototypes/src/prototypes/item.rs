use crate::prototypes::PrototypeBase;
use crate::{ItemID, Prototype, Prototypes};
use common::TransparentMap;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Item is the runtime representation of a tradable commodity kind, such as
/// wheat, iron ingots, etc.
#[derive(Clone, Debug)]
pub struct ItemPrototype {
    pub id: ItemID,
    pub base: PrototypeBase,
    /// Presentation id of the item graphic
    pub icon: u32,
}

/// The data-file form of an item prototype
#[derive(Serialize, Deserialize)]
pub struct ItemPrototypeJSON {
    #[serde(flatten)]
    pub base: PrototypeBase,
    #[serde(default)]
    pub icon: u32,
}

impl ItemPrototype {
    pub(crate) fn from_json(json: ItemPrototypeJSON) -> Self {
        Self {
            id: ItemID::new(&json.base.name),
            base: json.base,
            icon: json.icon,
        }
    }

    #[inline]
    pub fn iter() -> impl Iterator<Item = &'static Self> {
        crate::prototypes_iter::<Self>()
    }
}

impl Deref for ItemPrototype {
    type Target = PrototypeBase;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl Prototype for ItemPrototype {
    type ID = ItemID;
    const KIND: &'static str = "items";

    fn id(&self) -> Self::ID {
        self.id
    }

    fn name(&self) -> &str {
        &self.base.name
    }

    fn storage(p: &Prototypes) -> &TransparentMap<Self::ID, Self> {
        &p.items
    }

    fn storage_mut(p: &mut Prototypes) -> &mut TransparentMap<Self::ID, Self> {
        &mut p.items
    }
}
