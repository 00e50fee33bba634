pub mod cookies;
pub mod errors;
pub mod html;
pub mod reply;

pub use errors::{html_error_response, ResultResp};
pub use reply::Reply;
