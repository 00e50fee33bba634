use crate::routes;
use crate::templates::{app_layout, Chrome};
use maud::{html, Markup};

pub fn profile_page(chrome: Chrome<'_>, email: Option<&str>, initials: &str) -> Markup {
    app_layout(
        "My profile",
        chrome,
        html! {
            main class="container narrow" {
                section class="card profile-card" {
                    div class="avatar" aria-hidden="true" { (initials) }
                    h1 { "My profile" }

                    div class="field-readonly" {
                        div class="muted" { "Email" }
                        div class="value" { (email.unwrap_or("")) }
                    }

                    form method="post" action=(routes::SIGN_OUT) {
                        button type="submit" class="btn btn-outline btn-block" { "Sign out" }
                    }
                }

                p class="center" {
                    a href=(routes::HOME) class="btn btn-ghost" { "Back to home" }
                }
            }
        },
    )
}

/// Shown while the session is still being resolved.
pub fn profile_loading_page(chrome: Chrome<'_>) -> Markup {
    app_layout(
        "My profile",
        chrome,
        html! {
            main class="container narrow center" {
                p class="muted" aria-busy="true" { "Loading..." }
            }
        },
    )
}
