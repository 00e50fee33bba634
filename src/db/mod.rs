pub mod connection;
pub mod pending_profiles;

pub use connection::{init_db, Database};
