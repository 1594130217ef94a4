use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Once;

#[allow(unused_imports)]
use common::saveload::{Bincode, Encoder, JSONPretty, JSON};
use prototypes::{GameTime, Tick};

use crate::economy::{pet_internalize_system, PetNameCache};
use crate::utils::deferred::DeferredTasks;
use crate::utils::resources::Resources;
use crate::world::World;
use crate::{utils, RunnableSystem, Simulation};

static INIT_ONCE: Once = Once::new();

/// Registers systems and resources. Must run before building a [`Simulation`],
/// later calls are no-ops.
pub fn init() {
    INIT_ONCE.call_once(init_inner);
}

fn init_inner() {
    #[cfg(not(test))]
    let base = "./";
    #[cfg(test)]
    let base = "../";

    if let Err(e) = prototypes::load_prototypes(base) {
        panic!("Error loading prototypes: {}", e)
    }

    register_system("pet_internalize", pet_internalize_system);

    register_resource_noserialize::<DeferredTasks>();
    register_resource_default::<PetNameCache, Bincode>("pet_names");
    register_resource::<GameTime, Bincode>("game_time", || GameTime::new(Tick(1)));
}

pub struct InitFunc {
    pub f: Box<dyn Fn(&mut Simulation) + 'static>,
}

pub(crate) struct SaveLoadFunc {
    pub name: &'static str,
    pub save: Box<dyn Fn(&Simulation) -> Vec<u8> + 'static>,
    pub load: Box<dyn Fn(&mut Simulation, Vec<u8>) + 'static>,
}

pub(crate) struct GSystem {
    pub(crate) s: Box<dyn Fn() -> Box<dyn RunnableSystem>>,
}

pub(crate) static mut INIT_FUNCS: Vec<InitFunc> = Vec::new();
pub(crate) static mut SAVELOAD_FUNCS: Vec<SaveLoadFunc> = Vec::new();
pub(crate) static mut GSYSTEMS: Vec<GSystem> = Vec::new();

fn register_system(name: &'static str, s: fn(&mut World, &mut Resources)) {
    unsafe {
        GSYSTEMS.push(GSystem {
            s: Box::new(move || {
                Box::new(utils::scheduler::RunnableFn {
                    f: move |sim| s(&mut sim.world, &mut sim.resources),
                    name,
                })
            }),
        });
    }
}

fn register_resource_noserialize<T: 'static + Default + Send + Sync>() {
    unsafe {
        INIT_FUNCS.push(InitFunc {
            f: Box::new(|uiw| {
                uiw.insert(T::default());
            }),
        });
    }
}

fn register_resource_default<
    T: 'static + Send + Sync + Serialize + DeserializeOwned + Default,
    E: Encoder,
>(
    name: &'static str,
) {
    register_resource::<T, E>(name, T::default);
}

fn register_resource<T: 'static + Send + Sync + Serialize + DeserializeOwned, E: Encoder>(
    name: &'static str,
    initializer: impl Fn() -> T + 'static,
) {
    unsafe {
        INIT_FUNCS.push(InitFunc {
            f: Box::new(move |uiw| {
                uiw.insert(initializer());
            }),
        });
    }
    register_resource_noinit::<T, E>(name);
}

fn register_resource_noinit<T: 'static + Send + Sync + Serialize + DeserializeOwned, E: Encoder>(
    name: &'static str,
) {
    unsafe {
        SAVELOAD_FUNCS.push(SaveLoadFunc {
            name,
            save: Box::new(move |sim| E::encode(&*sim.read::<T>()).unwrap()),
            load: Box::new(move |sim, data| match E::decode::<T>(&data) {
                Ok(res) => {
                    sim.insert(res);
                }
                Err(e) => {
                    log::error!("Error loading resource {}: {}", name, e);
                }
            }),
        });
    }
}
