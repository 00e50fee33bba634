use crate::notifications::Notice;
use crate::routes;
use crate::templates::components::notice::toasts;
use maud::{html, Markup, DOCTYPE};

/// Per-request bits every page shell needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chrome<'a> {
    pub signed_in: bool,
    pub notice: Option<&'a Notice>,
}

pub fn app_layout(title: &str, chrome: Chrome<'_>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Rental Simple" }
                link rel="stylesheet" href=(routes::STYLESHEET);
                script src="https://unpkg.com/htmx.org@1.9.12" defer {};
            }
            body {
                header class="topbar" {
                    a href=(routes::HOME) class="brand" {
                        svg
                            xmlns="http://www.w3.org/2000/svg"
                            width="24"
                            height="24"
                            viewBox="0 0 24 24"
                            fill="none"
                            stroke="currentColor"
                            stroke-width="2"
                            stroke-linecap="round"
                            stroke-linejoin="round"
                        {
                            path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                            path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                            path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                        }
                        span { "Rental Simple" }
                    }
                    nav {
                        ul {
                            li { a href=(routes::HOME) { "Explore" } }
                            @if chrome.signed_in {
                                li { a href=(routes::PROFILE) { "Profile" } }
                            } @else {
                                li { a href=(routes::AUTH) class="btn btn-small" { "Sign in" } }
                            }
                        }
                    }
                }

                (toasts(chrome.notice, false))

                (content)
            }
        }
    }
}
