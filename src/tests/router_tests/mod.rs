mod auth_tests;
mod favorite_tests;
mod home_tests;
mod property_tests;
