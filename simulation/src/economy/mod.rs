//! Everything related to trading at the bazaar: the broker's commodity
//! ledger and the pet listings, both persisted inside [`crate::BrokerEnt`].

mod commodity;
mod pet;

pub use commodity::*;
pub use pet::*;
