pub mod components;
pub mod layouts;
pub mod pages;

pub use layouts::app::{app_layout, Chrome};
