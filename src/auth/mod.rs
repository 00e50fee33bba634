pub mod provider;
pub mod sessions;
pub mod token;
