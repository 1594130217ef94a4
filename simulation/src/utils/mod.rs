pub mod deferred;
pub mod resources;
pub mod scheduler;
