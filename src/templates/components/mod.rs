pub mod favorite_button;
pub mod listing_card;
pub mod notice;

pub use favorite_button::favorite_button;
pub use listing_card::listing_card;
