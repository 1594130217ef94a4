pub mod history;
pub mod logger;
pub mod saveload;

mod hash;

pub use hash::*;

#[macro_export]
macro_rules! unwrap_orr {
    ($e: expr, $t: expr) => {
        match $e {
            Ok(x) => x,
            Err(_) => $t,
        }
    };
}
