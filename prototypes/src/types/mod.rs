mod money;
mod time;

pub use money::*;
pub use time::*;
