use crate::world::CreatureID;
use prototypes::{GameDuration, Tick};
use serde::{Deserialize, Serialize};

/// A one-shot action to run at a later tick. Tasks carry ids, never
/// references: whatever they point at may be gone by the time they fire,
/// and running them must then be a no-op.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub enum DeferredTask {
    InternalizePet { pet: CreatureID },
}

/// Queue of deferred tasks, drained once their due tick passes.
/// Not persisted: loading a save re-derives pending tasks from world state.
#[derive(Default)]
pub struct DeferredTasks {
    tasks: Vec<(Tick, DeferredTask)>,
}

impl DeferredTasks {
    pub fn schedule_after(&mut self, now: Tick, delay: GameDuration, task: DeferredTask) {
        let due = Tick(now.0 + delay.0 .0);
        log::debug!("scheduling {:?} for tick {}", task, due);
        self.tasks.push((due, task));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Removes and returns every task due at `now` or earlier
    pub fn drain_due(&mut self, now: Tick) -> Vec<DeferredTask> {
        let mut due = Vec::new();
        self.tasks.retain(|&(at, task)| {
            if at <= now {
                due.push(task);
                false
            } else {
                true
            }
        });
        due
    }
}
