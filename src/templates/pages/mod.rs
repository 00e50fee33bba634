pub mod auth;
pub mod error;
pub mod home;
pub mod profile;
pub mod property;

pub use auth::{auth_page, AuthForm, AuthMode};
pub use error::error_page;
pub use home::home_page;
pub use profile::{profile_loading_page, profile_page};
pub use property::{property_not_found_page, property_page};
