#![allow(dead_code)]
#![cfg(test)]

use crate::utils::scheduler::SeqSchedule;
use crate::Simulation;
use common::logger::MyLog;
use common::saveload::Encoder;

mod bazaar;

pub(crate) struct TestCtx {
    pub g: Simulation,
    sched: SeqSchedule,
}

impl TestCtx {
    pub(crate) fn new() -> Self {
        MyLog::init();
        crate::init::init();

        let g = Simulation::new();
        let sched = Simulation::schedule();

        Self { g, sched }
    }

    /// Advances one tick, then checks that a serialize/deserialize round trip
    /// reproduces the exact same state.
    pub(crate) fn tick(&mut self) {
        self.g.tick(&mut self.sched);

        let serialized = common::saveload::Bincode::encode(&self.g).unwrap();
        let deserialized: Simulation = common::saveload::Bincode::decode(&serialized).unwrap();

        let testhashes = self.g.hashes();
        for (key, hash) in deserialized.hashes().iter() {
            assert_eq!(
                testhashes.get(key),
                Some(hash),
                "key: {:?} at tick {}",
                key,
                self.g.get_tick(),
            );
        }
    }

    pub(crate) fn tick_n(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Simulates quitting and restarting from a save
    pub(crate) fn reload(&mut self) {
        let serialized = common::saveload::Bincode::encode(&self.g).unwrap();
        self.g = common::saveload::Bincode::decode(&serialized).unwrap();
    }
}
