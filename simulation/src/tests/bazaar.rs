use super::TestCtx;
use crate::economy::{PetListingEntry, PetNameCache, DEFAULT_PET_PRICE};
use crate::souls::broker::{
    delist_pet, list_pet, sell_pet, spawn_broker, stock_commodity, try_player_buy, try_player_sell,
};
use crate::utils::deferred::DeferredTasks;
use crate::wildlife::spawn_creature;
use crate::world::{ControlOrder, HumanEnt, Location, TilePos, MAX_LOYALTY};
use common::saveload::{Bincode, Encoder};
use prototypes::{ItemID, Money, SpeciesID};

/// Ticks needed to get past the post-load internalize grace window
const GRACE_TICKS: u64 = 51;

#[test]
fn commodity_trading_flow() {
    let mut ctx = TestCtx::new();
    let wheat = ItemID::new("wheat");

    let broker;
    {
        let (world, _) = ctx.g.world_res();
        broker = spawn_broker(world, "Sigrid", Money::new_bucks(150));

        assert!(stock_commodity(world, broker, wheat, 70));
        assert!(stock_commodity(world, broker, wheat, 10));

        let b = world.brokers.get_mut(broker).unwrap();
        let e = b.entry_mut(wheat).unwrap();
        assert_eq!(e.stock, 80);
        assert_eq!(e.label(), "Wheat");
        assert_eq!(e.icon(), 4155);
        e.sell_price_per = Money::new_bucks(5);
        e.buy_price_per = Money::new_bucks(10);
        e.buy_limit = 100;
    }
    ctx.tick();

    {
        let (world, _) = ctx.g.world_res();

        // player buys 10 units for 50$
        assert!(try_player_buy(world, broker, wheat, 10));
        assert_eq!(world.brokers[broker].bank, Money::new_bucks(200));
        assert_eq!(world.brokers[broker].entry(wheat).unwrap().stock, 70);

        // 100 units at 10$ would cost 1000$, the bank only covers 20
        let funds = world.broker_funds(broker);
        let e = world.brokers[broker].entry(wheat).unwrap();
        assert_eq!(e.actual_buy_limit(funds), 20);

        assert!(!try_player_sell(world, broker, wheat, 21));
        assert!(try_player_sell(world, broker, wheat, 20));
        assert_eq!(world.brokers[broker].bank, Money::ZERO);
        assert_eq!(world.brokers[broker].entry(wheat).unwrap().stock, 90);

        // broke broker cannot buy anything anymore
        assert!(!try_player_sell(world, broker, wheat, 1));
    }
    ctx.tick();
}

#[test]
fn ledger_survives_reload() {
    let mut ctx = TestCtx::new();
    let wheat = ItemID::new("wheat");

    {
        let (world, _) = ctx.g.world_res();
        let broker = spawn_broker(world, "Sigrid", Money::new_bucks(500));
        stock_commodity(world, broker, wheat, 42);
        let b = world.brokers.get_mut(broker).unwrap();
        b.entry_mut(wheat).unwrap().sell_price_per = Money::new_bucks(3);
    }
    ctx.tick();
    ctx.reload();

    let (world, _) = ctx.g.world_res();
    let b = world.brokers.values().next().unwrap();
    let e = b.entry(ItemID::new("wheat")).unwrap();
    assert_eq!(e.kind(), Some(wheat));
    assert_eq!(e.kind_name(), "wheat");
    assert_eq!(e.label(), "Wheat");
    assert_eq!(e.stock, 42);
    assert_eq!(e.sell_price_per, Money::new_bucks(3));
}

#[test]
fn missing_broker_disables_sales() {
    let mut ctx = TestCtx::new();
    let wheat = ItemID::new("wheat");

    let (world, _) = ctx.g.world_res();
    let broker = spawn_broker(world, "Sigrid", Money::new_bucks(1000));
    stock_commodity(world, broker, wheat, 10);
    let b = world.brokers.get_mut(broker).unwrap();
    let e = b.entry_mut(wheat).unwrap();
    e.buy_price_per = Money::new_bucks(1);
    e.buy_limit = 50;
    let entry = e.clone();

    world.brokers.remove(broker);

    let funds = world.broker_funds(broker);
    assert_eq!(funds, None);
    assert!(!entry.player_can_sell(1, funds));
    // without known funds only the cap bound remains
    assert_eq!(entry.actual_buy_limit(funds), 40);

    assert!(!try_player_sell(world, broker, wheat, 1));
    assert!(!try_player_buy(world, broker, wheat, 1));
    assert!(!stock_commodity(world, broker, wheat, 5));
}

#[test]
fn listed_pet_is_internalized_after_reload() {
    let mut ctx = TestCtx::new();
    let species = SpeciesID::new("dire-wolf");

    let (broker, owner, pet);
    {
        let (world, resources) = ctx.g.world_res();
        broker = spawn_broker(world, "Hina", Money::new_bucks(5000));
        owner = world.insert(HumanEnt {
            name: "Auric".to_string(),
            pos: TilePos::new(10, 10),
        });
        pet = spawn_creature(world, species, TilePos::new(12, 10)).unwrap();
        world.creatures[pet].control_master = Some(owner);
        world.creatures[pet].control_order = ControlOrder::Follow;

        let mut names = resources.write::<PetNameCache>();
        assert!(list_pet(world, &mut names, broker, pet, None));
        // double listing is refused
        assert!(!list_pet(world, &mut names, broker, pet, None));
    }

    {
        let world = ctx.g.world();
        let listing = world.brokers[broker].pet_listing(pet).unwrap();
        assert_eq!(listing.type_name, "a dire wolf");
        assert_eq!(listing.sale_price, DEFAULT_PET_PRICE);

        let c = &world.creatures[pet];
        assert!(c.stabled);
        assert_eq!(c.control_order, ControlOrder::Stay);
        // listing alone does not move the pet off the map
        assert_eq!(c.location, Location::World(TilePos::new(12, 10)));
        // nothing pending before a reload
        assert!(ctx.g.read::<DeferredTasks>().is_empty());
    }

    ctx.tick_n(3);
    ctx.reload();

    // the reload re-registered the species name and queued exactly one cleanup
    assert_eq!(ctx.g.read::<DeferredTasks>().len(), 1);
    assert_eq!(
        ctx.g.read::<PetNameCache>().get(species),
        Some("a dire wolf")
    );
    assert_eq!(
        ctx.g.world().creatures[pet].location,
        Location::World(TilePos::new(12, 10))
    );

    ctx.tick_n(GRACE_TICKS);

    let c = &ctx.g.world().creatures[pet];
    assert_eq!(c.location, Location::Internal);
    assert_eq!(c.control_master, None);
    assert_eq!(c.summon_master, None);
    assert_eq!(c.loyalty, MAX_LOYALTY);
    assert_eq!(c.home, TilePos::ZERO);
    assert_eq!(c.range_home, 10);
    assert!(c.stabled);
    assert!(ctx.g.read::<DeferredTasks>().is_empty());

    // a second reload runs the same cleanup again without disturbing the pet
    ctx.reload();
    ctx.tick_n(GRACE_TICKS);
    assert_eq!(ctx.g.world().creatures[pet].location, Location::Internal);
}

#[test]
fn stale_internalize_task_is_dropped() {
    let mut ctx = TestCtx::new();

    let (broker, pet);
    {
        let (world, resources) = ctx.g.world_res();
        broker = spawn_broker(world, "Hina", Money::new_bucks(5000));
        pet = spawn_creature(world, SpeciesID::new("horse"), TilePos::ZERO).unwrap();
        let mut names = resources.write::<PetNameCache>();
        assert!(list_pet(world, &mut names, broker, pet, None));
    }

    ctx.reload();
    assert_eq!(ctx.g.read::<DeferredTasks>().len(), 1);

    // the pet disappears before the grace window ends
    ctx.g.world_mut_unchecked().creatures.remove(pet);

    ctx.tick_n(GRACE_TICKS);
    assert!(ctx.g.read::<DeferredTasks>().is_empty());
    assert_eq!(ctx.g.world().brokers[broker].pets.len(), 1);
}

#[test]
fn selling_and_delisting_pets() {
    let mut ctx = TestCtx::new();

    let (world, resources) = ctx.g.world_res();
    let broker = spawn_broker(world, "Hina", Money::new_bucks(100));
    let buyer = world.insert(HumanEnt {
        name: "Tomasz".to_string(),
        pos: TilePos::new(3, 3),
    });
    let pet = spawn_creature(world, SpeciesID::new("horse"), TilePos::new(7, 7)).unwrap();
    let other = spawn_creature(world, SpeciesID::new("horse"), TilePos::new(8, 7)).unwrap();

    {
        let mut names = resources.write::<PetNameCache>();
        assert!(list_pet(
            world,
            &mut names,
            broker,
            pet,
            Some(Money::new_bucks(250))
        ));
        assert!(list_pet(world, &mut names, broker, other, None));
    }

    // delisting hands the listing back and un-stables the pet
    let listing = delist_pet(world, broker, other).unwrap();
    assert_eq!(listing.pet(), other);
    assert!(!world.creatures[other].stabled);
    assert!(world.brokers[broker].pet_listing(other).is_none());

    assert!(sell_pet(world, broker, pet, buyer));
    assert_eq!(world.brokers[broker].bank, Money::new_bucks(350));
    assert!(world.brokers[broker].pets.is_empty());

    let c = &world.creatures[pet];
    assert_eq!(c.control_master, Some(buyer));
    assert_eq!(c.location, Location::World(TilePos::new(3, 3)));
    assert_eq!(c.home, TilePos::new(3, 3));
    assert!(!c.stabled);

    // selling the same pet twice does nothing
    assert!(!sell_pet(world, broker, pet, buyer));
}

#[test]
fn unknown_record_versions_are_rejected() {
    let mut ctx = TestCtx::new();

    let pet;
    {
        let (world, _) = ctx.g.world_res();
        pet = spawn_creature(world, SpeciesID::new("horse"), TilePos::ZERO).unwrap();
    }

    let good = Bincode::encode(&(0u32, pet, Money::ZERO, "a horse".to_string())).unwrap();
    assert!(Bincode::decode::<PetListingEntry>(&good).is_ok());

    let bad = Bincode::encode(&(7u32, pet, Money::ZERO, "a horse".to_string())).unwrap();
    assert!(Bincode::decode::<PetListingEntry>(&bad).is_err());
}
