pub mod favorites;
pub mod listing;
pub mod profiles;

pub use favorites::{toggle_favorite, ToggleOutcome};
pub use listing::Listing;
