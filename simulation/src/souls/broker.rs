use crate::economy::{CommodityLedgerEntry, PetListingEntry, PetNameCache};
use crate::world::{BrokerEnt, BrokerID, ControlOrder, CreatureID, HumanID, Location, World};
use prototypes::{ItemID, Money};

impl BrokerEnt {
    pub fn entry(&self, kind: ItemID) -> Option<&CommodityLedgerEntry> {
        self.ledger.iter().find(|e| e.kind() == Some(kind))
    }

    pub fn entry_mut(&mut self, kind: ItemID) -> Option<&mut CommodityLedgerEntry> {
        self.ledger.iter_mut().find(|e| e.kind() == Some(kind))
    }

    pub fn pet_listing(&self, pet: CreatureID) -> Option<&PetListingEntry> {
        self.pets.iter().find(|l| l.pet() == pet)
    }
}

pub fn spawn_broker(world: &mut World, name: &str, bank: Money) -> BrokerID {
    let id = world.insert(BrokerEnt {
        name: name.to_string(),
        bank,
        ledger: Vec::new(),
        pets: Vec::new(),
    });
    log::info!("spawned broker {} as {:?}", name, id);
    id
}

/// Adds `amount` units of `kind` to the broker's stock, opening a ledger
/// entry on first stocking. False when the broker does not exist.
pub fn stock_commodity(world: &mut World, broker: BrokerID, kind: ItemID, amount: u32) -> bool {
    let Some(b) = world.brokers.get_mut(broker) else {
        return false;
    };
    match b.ledger.iter_mut().find(|e| e.kind() == Some(kind)) {
        Some(e) => e.stock += amount,
        None => b.ledger.push(CommodityLedgerEntry::new(kind, broker, amount)),
    }
    log::debug!("{:?} stocked {} of {:?}", broker, amount, kind);
    true
}

/// Commits a player buying `amount` units from the broker: the eligibility
/// check and the stock and bank mutations happen in one step.
pub fn try_player_buy(world: &mut World, broker: BrokerID, kind: ItemID, amount: u32) -> bool {
    let Some(b) = world.brokers.get_mut(broker) else {
        return false;
    };
    let Some(idx) = b.ledger.iter().position(|e| e.kind() == Some(kind)) else {
        return false;
    };

    let e = &b.ledger[idx];
    // an uncapped entry still cannot sell more units than it holds
    if !e.player_can_buy(amount) || amount > e.stock {
        return false;
    }
    let total = e.sell_price_per * amount as i64;

    b.ledger[idx].stock -= amount;
    b.bank += total;
    log::debug!("{:?} sold {} of {:?} for {}", broker, amount, kind, total);
    true
}

/// Commits a player selling `amount` units to the broker. On top of the
/// per-unit eligibility check, the full cost must fit in the broker's bank.
pub fn try_player_sell(world: &mut World, broker: BrokerID, kind: ItemID, amount: u32) -> bool {
    let Some(b) = world.brokers.get_mut(broker) else {
        return false;
    };
    let Some(idx) = b.ledger.iter().position(|e| e.kind() == Some(kind)) else {
        return false;
    };

    let e = &b.ledger[idx];
    if !e.player_can_sell(amount, Some(b.bank)) {
        return false;
    }
    let total = e.buy_price_per * amount as i64;
    if total > b.bank {
        return false;
    }

    b.ledger[idx].stock += amount;
    b.bank -= total;
    log::debug!("{:?} bought {} of {:?} for {}", broker, amount, kind, total);
    true
}

/// Lists a live pet for sale. The pet is stabled and its control severed
/// right away but it stays on the map, only a deferred internalize or a
/// sale moves it. False when broker or pet are gone or the pet is already
/// listed there.
pub fn list_pet(
    world: &mut World,
    names: &mut PetNameCache,
    broker: BrokerID,
    pet: CreatureID,
    price: Option<Money>,
) -> bool {
    let World {
        brokers, creatures, ..
    } = world;
    let Some(b) = brokers.get_mut(broker) else {
        return false;
    };
    let Some(c) = creatures.get_mut(pet) else {
        return false;
    };
    if b.pets.iter().any(|l| l.pet() == pet) {
        return false;
    }

    let listing = PetListingEntry::new(pet, c, price, names);
    c.stabled = true;
    c.control_target = None;
    c.control_order = ControlOrder::Stay;

    log::debug!(
        "{:?} listed {} ({}) for {}",
        broker,
        c.name,
        listing.type_name,
        listing.sale_price
    );
    b.pets.push(listing);
    true
}

/// Cancels a listing and un-stables the pet. Giving the pet back to an owner
/// is the caller's concern.
pub fn delist_pet(world: &mut World, broker: BrokerID, pet: CreatureID) -> Option<PetListingEntry> {
    let b = world.brokers.get_mut(broker)?;
    let idx = b.pets.iter().position(|l| l.pet() == pet)?;
    let listing = b.pets.remove(idx);

    if let Some(c) = world.creatures.get_mut(pet) {
        c.stabled = false;
    }
    log::debug!("{:?} delisted pet {:?}", broker, pet);
    Some(listing)
}

/// Sells a listed pet: the listing is consumed, the broker banks the price
/// and the pet joins the buyer at their position as their controlled pet.
pub fn sell_pet(world: &mut World, broker: BrokerID, pet: CreatureID, buyer: HumanID) -> bool {
    let World {
        brokers,
        humans,
        creatures,
    } = world;
    let Some(b) = brokers.get_mut(broker) else {
        return false;
    };
    let Some(buyer_ent) = humans.get(buyer) else {
        return false;
    };
    let Some(idx) = b.pets.iter().position(|l| l.pet() == pet) else {
        return false;
    };

    let Some(c) = creatures.get_mut(pet) else {
        // stale listing, drop it instead of selling a ghost
        b.pets.remove(idx);
        log::warn!("{:?} listed pet {:?} which no longer exists", broker, pet);
        return false;
    };

    let listing = b.pets.remove(idx);
    b.bank += listing.sale_price;

    c.stabled = false;
    c.control_master = Some(buyer);
    c.control_order = ControlOrder::Follow;
    c.location = Location::World(buyer_ent.pos);
    c.home = buyer_ent.pos;

    log::debug!(
        "{:?} sold {} to {:?} for {}",
        broker,
        listing.type_name,
        buyer,
        listing.sale_price
    );
    true
}
