use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, Sub};

pub const SECONDS_PER_REALTIME_SECOND: u32 = 10;
pub const SECONDS_PER_MINUTE: i32 = 60;
pub const TICKS_PER_REALTIME_SECOND: u64 = 50;
pub const TICKS_PER_SECOND: u64 = TICKS_PER_REALTIME_SECOND / SECONDS_PER_REALTIME_SECOND as u64;
pub const TICKS_PER_MINUTE: u64 = TICKS_PER_SECOND * SECONDS_PER_MINUTE as u64;

/// The amount of time the game was updated
/// Used as a resource
#[derive(Default, PartialOrd, Ord, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct Tick(pub u64);

/// An in-game instant used to measure time differences
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
pub struct GameInstant(pub Tick);

/// The duration of a game event, in ticks
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
pub struct GameDuration(pub Tick);

/// The resource to know everything about the current in-game time
/// `GameTime` is subject to timewarp
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct GameTime {
    /// The number of ticks elapsed since the start of the game
    pub tick: Tick,

    /// Monotonic time in (game) seconds elapsed since the start of the game as a double.
    pub timestamp: f64,

    /// Game time in seconds elapsed since the start of the game
    pub seconds: u32,
}

impl GameTime {
    pub fn new(tick: Tick) -> GameTime {
        let timestamp = tick.0 as f64 / TICKS_PER_SECOND as f64;

        GameTime {
            tick,
            timestamp,
            seconds: timestamp as u32,
        }
    }

    pub fn instant(&self) -> GameInstant {
        GameInstant(self.tick)
    }
}

impl GameDuration {
    pub const fn from_secs(secs: u64) -> Self {
        GameDuration(Tick(secs * TICKS_PER_SECOND))
    }

    pub const fn from_minutes(mins: u64) -> Self {
        GameDuration(Tick(mins * TICKS_PER_MINUTE))
    }

    pub fn seconds(&self) -> f64 {
        self.0 .0 as f64 / TICKS_PER_SECOND as f64
    }
}

impl GameInstant {
    /// Time elapsed since instant was taken
    pub fn elapsed(&self, time: &GameTime) -> GameDuration {
        GameDuration(Tick(time.tick.0 - self.0 .0))
    }
}

impl Add<GameDuration> for GameInstant {
    type Output = GameInstant;

    fn add(self, rhs: GameDuration) -> Self::Output {
        GameInstant(Tick(self.0 .0 + rhs.0 .0))
    }
}

impl Sub<GameDuration> for GameInstant {
    type Output = GameInstant;

    fn sub(self, rhs: GameDuration) -> Self::Output {
        GameInstant(Tick(self.0 .0.saturating_sub(rhs.0 .0)))
    }
}

impl Debug for Tick {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Tick {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for GameDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let x = self.0 .0 as f64;
        if x < TICKS_PER_MINUTE as f64 {
            write!(f, "{}s", x / TICKS_PER_SECOND as f64)
        } else {
            write!(f, "{}m", x / TICKS_PER_MINUTE as f64)
        }
    }
}
