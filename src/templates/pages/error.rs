use crate::routes;
use maud::{html, Markup, DOCTYPE};

/// Standalone page: rendered when a request failed, so it needs no session.
pub fn error_page(status: u16, message: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Error " (status) }
                link rel="stylesheet" href=(routes::STYLESHEET);
            }
            body {
                main class="container narrow error-page" {
                    h1 { "Error " (status) }
                    p { (message) }
                    p { a href=(routes::HOME) { "← Back to home" } }
                }
            }
        }
    }
}
